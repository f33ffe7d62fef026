use std::sync::Arc;

use crate::{
    app::resource::{CreateResource, ResourcePatch, UpdateResource},
    domain::{
        datatype::{ResourceId, ResourceStatus, ReviewDecision, ReviewerId},
        entity::{course::Course, Comment, Entity, Resource},
        service::{CourseGateway, ResourceGateway},
    },
    error::{app::ApplicationError, gateway::FetchError},
};

/// Loading flag and last error of a store slice.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SliceState {
    pub loading: bool,
    pub error: Option<String>,
}

impl SliceState {
    fn begin(&mut self) {
        self.loading = true;
        self.error = None;
    }

    fn fulfill(&mut self) {
        self.loading = false;
    }

    fn reject(&mut self, message: String) {
        self.loading = false;
        self.error = Some(message);
    }
}

fn position<E: Entity>(entities: &[E], ident: &E::Ident) -> Option<usize> {
    entities.iter().position(|entity| entity.ident() == ident)
}

/// Session copy of the backend resource collection.
///
/// Network operations replace whole entries with what the backend returns;
/// counters, comments and discards only touch the local copy and are lost on
/// the next [`ResourceStore::load`].
pub struct ResourceStore<G> {
    gateway: Arc<G>,
    resources: Vec<Resource>,
    slice: SliceState,
}

impl<G: ResourceGateway> ResourceStore<G> {
    pub fn new(gateway: Arc<G>) -> Self {
        Self {
            gateway,
            resources: Vec::new(),
            slice: SliceState::default(),
        }
    }

    pub fn resources(&self) -> &[Resource] {
        &self.resources
    }

    pub fn get(&self, id: &ResourceId) -> Option<&Resource> {
        position(&self.resources, id).map(|idx| &self.resources[idx])
    }

    pub fn slice(&self) -> &SliceState {
        &self.slice
    }

    /// Replace the collection with the backend one; keeps the old collection on failure.
    pub async fn load(&mut self) -> Result<(), FetchError> {
        self.slice.begin();
        tracing::debug!("loading resources");

        match self.gateway.fetch_resources().await {
            Ok(resources) => {
                tracing::debug!(count = resources.len(), "resources loaded");
                self.resources = resources;
                self.slice.fulfill();
                Ok(())
            }
            Err(err) => {
                tracing::error!("failed to load resources: {err}");
                self.slice.reject(err.to_string());
                Err(err)
            }
        }
    }

    /// Create a resource and append the backend representation.
    pub async fn create(&mut self, payload: &CreateResource) -> Result<Resource, FetchError> {
        let created = self.gateway.create_resource(payload).await.map_err(|err| {
            tracing::error!("failed to create resource: {err}");
            err
        })?;

        tracing::debug!(id = %created.ident(), "resource created");
        self.resources.push(created.clone());
        Ok(created)
    }

    /// Approve or reject a pending resource.
    pub async fn set_status(
        &mut self,
        id: &ResourceId,
        decision: ReviewDecision,
    ) -> Result<(), ApplicationError<ResourcePatch>> {
        let status = ResourceStatus::from(decision);
        if let Some(resource) = self.get(id) {
            if let Err(err) = resource.check_transition(status) {
                tracing::warn!("refused status change: {err}");
                return Err(err.into());
            }
        }

        self.patch(id, ResourcePatch::Status { status }).await?;
        Ok(())
    }

    pub async fn set_reviewer(
        &mut self,
        id: &ResourceId,
        reviewer_id: ReviewerId,
    ) -> Result<(), ApplicationError<ResourcePatch>> {
        self.patch(id, ResourcePatch::Reviewer { reviewer_id }).await?;
        Ok(())
    }

    /// Send the editable fields of an existing resource and return the
    /// backend copy, whether or not it was loaded in this session.
    pub async fn update(
        &mut self,
        id: &ResourceId,
        fields: UpdateResource,
    ) -> Result<Resource, ApplicationError<ResourcePatch>> {
        self.patch(id, ResourcePatch::Content(fields)).await
    }

    async fn patch(
        &mut self,
        id: &ResourceId,
        patch: ResourcePatch,
    ) -> Result<Resource, ApplicationError<ResourcePatch>> {
        let updated = self
            .gateway
            .patch_resource(id, &patch)
            .await
            .map_err(|err| {
                tracing::error!(%id, "failed to patch resource: {err}");
                err
            })?;

        self.replace(updated.clone());
        Ok(updated)
    }

    fn replace(&mut self, updated: Resource) {
        match position(&self.resources, updated.ident()) {
            Some(idx) => {
                tracing::debug!(id = %updated.ident(), "resource replaced");
                self.resources[idx] = updated;
            }
            None => tracing::debug!(id = %updated.ident(), "updated resource not loaded, ignored"),
        }
    }

    fn local_mut(&mut self, id: &ResourceId) -> Option<&mut Resource> {
        position(&self.resources, id).map(|idx| &mut self.resources[idx])
    }

    /// Local only; returns whether a resource matched.
    pub fn like(&mut self, id: &ResourceId) -> bool {
        self.local_mut(id).map(Resource::like).is_some()
    }

    /// Local only; returns whether a resource matched.
    pub fn dislike(&mut self, id: &ResourceId) -> bool {
        self.local_mut(id).map(Resource::dislike).is_some()
    }

    /// Local only; returns whether a resource matched.
    pub fn append_comment(&mut self, id: &ResourceId, comment: Comment) -> bool {
        match self.local_mut(id) {
            Some(resource) => {
                resource.append_comment(comment);
                true
            }
            None => false,
        }
    }

    /// Drop a resource from the session copy. It comes back on the next load.
    pub fn discard(&mut self, id: &ResourceId) -> Option<Resource> {
        let idx = position(&self.resources, id)?;
        tracing::debug!(%id, "resource discarded locally");
        Some(self.resources.remove(idx))
    }
}

/// Session copy of the course list.
pub struct CourseStore<G> {
    gateway: Arc<G>,
    courses: Vec<Course>,
    slice: SliceState,
}

impl<G: CourseGateway> CourseStore<G> {
    pub const LOAD_ERROR: &'static str = "Failed to fetch courses";

    pub fn new(gateway: Arc<G>) -> Self {
        Self {
            gateway,
            courses: Vec::new(),
            slice: SliceState::default(),
        }
    }

    pub fn courses(&self) -> &[Course] {
        &self.courses
    }

    pub fn slice(&self) -> &SliceState {
        &self.slice
    }

    pub fn find_by_code(&self, code: &str) -> Option<&Course> {
        self.courses
            .iter()
            .find(|course| course.course_code() == code)
    }

    pub async fn load(&mut self) -> Result<(), FetchError> {
        self.slice.begin();
        tracing::debug!("loading courses");

        match self.gateway.fetch_courses().await {
            Ok(courses) => {
                tracing::debug!(count = courses.len(), "courses loaded");
                self.courses = courses;
                self.slice.fulfill();
                Ok(())
            }
            Err(err) => {
                tracing::error!("failed to load courses: {err}");
                let message = err.to_string();
                self.slice.reject(if message.is_empty() {
                    Self::LOAD_ERROR.into()
                } else {
                    format!("{}: {message}", Self::LOAD_ERROR)
                });
                Err(err)
            }
        }
    }
}
