use std::str::FromStr;

use derive_more::Display;

use crate::{
    app::{
        resource::{CourseOption, CreateResource, ResourceDraft, ValidResource},
        store::{CourseStore, ResourceStore},
    },
    domain::{
        datatype::InstructorId,
        entity::{Attachment, AttachmentCandidate, Entity, Resource},
        service::{CourseGateway, ResourceGateway},
    },
    error::{
        app::ApplicationError,
        command::CommandError,
        resource::{ValidationErrorKind, ValidationFieldError},
        workflow::WorkflowError,
    },
};

mod validation {
    use crate::{
        app::resource::{ResourceDraft, ValidResource},
        domain::datatype::text::{CourseCode, Description, ResourceTitle},
        error::resource::ValidationError,
    };

    /// Check every field and report all failures at once.
    pub fn resource_draft(
        draft: &ResourceDraft,
    ) -> Result<ValidResource, ValidationError<ResourceDraft>> {
        let course_code = CourseCode::parse(&draft.course_code);
        let resource_title = ResourceTitle::parse(&draft.resource_title);
        let description = Description::parse(&draft.description);

        match (course_code, resource_title, description) {
            (Ok(course_code), Ok(resource_title), Ok(description)) => Ok(ValidResource {
                resource_title,
                description,
                course_code,
                attachments: draft.attachments.clone(),
            }),
            (course_code, resource_title, description) => {
                let fields = [
                    course_code.err(),
                    resource_title.err(),
                    description.err(),
                ]
                .into_iter()
                .flatten()
                .collect();
                Err(ValidationError::from_resource(draft.clone(), fields))
            }
        }
    }
}

/// Draft field that the user can type into.
#[derive(Debug, Display, Clone, Copy, PartialEq, Eq)]
pub enum DraftField {
    #[display(fmt = "courseCode")]
    CourseCode,
    #[display(fmt = "resourceTitle")]
    ResourceTitle,
    #[display(fmt = "description")]
    Description,
}

impl FromStr for DraftField {
    type Err = CommandError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "course" | "coursecode" => Ok(Self::CourseCode),
            "title" | "resourcetitle" => Ok(Self::ResourceTitle),
            "description" => Ok(Self::Description),
            _ => Err(CommandError::InvalidArgument {
                name: "field",
                value: s.into(),
            }),
        }
    }
}

/// Message shown beside a field that failed validation.
pub fn field_message(field: &ValidationFieldError) -> String {
    let kind = field.kinds.first();
    match (field.path.as_str(), kind) {
        ("/courseCode", _) => "Please select a course".into(),
        ("/resourceTitle", _) => "Resource title must be at least 3 characters".into(),
        ("/description", _) => "Description must be at least 5 characters".into(),
        (path, Some(ValidationErrorKind::Required)) => format!("{path} is required"),
        (path, Some(ValidationErrorKind::MinLength(min))) => {
            format!("{path} must be at least {min} characters")
        }
        (path, None) => format!("{path} is invalid"),
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum FormState {
    Idle,
    Creating(ResourceDraft),
    Editing {
        original: Resource,
        draft: ResourceDraft,
    },
}

/// Create/edit session of the resource form.
///
/// ```text
/// Idle ──new──▶ Creating ──submit/close──▶ Idle
///   │              │
///   └──select──▶ Editing ──submit/close/delete──▶ Idle
/// ```
#[derive(Debug)]
pub struct ResourceForm {
    state: FormState,
    instructor_id: InstructorId,
}

impl ResourceForm {
    pub fn new(instructor_id: InstructorId) -> Self {
        Self {
            state: FormState::Idle,
            instructor_id,
        }
    }

    pub fn state(&self) -> &FormState {
        &self.state
    }

    pub fn draft(&self) -> Option<&ResourceDraft> {
        match &self.state {
            FormState::Idle => None,
            FormState::Creating(draft) | FormState::Editing { draft, .. } => Some(draft),
        }
    }

    fn draft_mut(&mut self) -> Result<&mut ResourceDraft, WorkflowError> {
        match &mut self.state {
            FormState::Idle => Err(WorkflowError::NoDraft),
            FormState::Creating(draft) | FormState::Editing { draft, .. } => Ok(draft),
        }
    }

    pub fn new_resource(&mut self) {
        let draft = ResourceDraft::empty();
        tracing::debug!(id = %draft.id, "form creating new resource");
        self.state = FormState::Creating(draft);
    }

    pub fn select(&mut self, resource: &Resource) {
        tracing::debug!(id = %resource.ident(), "form editing resource");
        self.state = FormState::Editing {
            original: resource.clone(),
            draft: ResourceDraft::from(resource),
        };
    }

    pub fn close(&mut self) {
        self.state = FormState::Idle;
    }

    pub fn set_field(
        &mut self,
        field: DraftField,
        value: impl Into<String>,
    ) -> Result<(), WorkflowError> {
        let draft = self.draft_mut()?;
        let value = value.into();
        match field {
            DraftField::CourseCode => draft.course_code = value,
            DraftField::ResourceTitle => draft.resource_title = value,
            DraftField::Description => draft.description = value,
        }
        Ok(())
    }

    /// Admit a picked file; it replaces any earlier attachment.
    pub fn select_attachment(
        &mut self,
        candidate: &AttachmentCandidate,
    ) -> Result<&Attachment, ApplicationError<AttachmentCandidate>> {
        let draft = self.draft_mut()?;
        let attachment = Attachment::admit(candidate).map_err(|err| {
            tracing::warn!("attachment refused: {err}");
            err
        })?;

        draft.attachments = vec![attachment];
        Ok(&draft.attachments[0])
    }

    pub fn validate(&self) -> Result<ValidResource, ApplicationError<ResourceDraft>> {
        let draft = self.draft().ok_or(WorkflowError::NoDraft)?;
        Ok(validation::resource_draft(draft)?)
    }

    /// Validate and commit the draft; the form goes back to `Idle` on success.
    ///
    /// A new resource is created with `POST`; an edited one sends its fields
    /// with `PATCH`. On any failure the draft stays open and the store is
    /// untouched.
    pub async fn submit<G: ResourceGateway>(
        &mut self,
        store: &mut ResourceStore<G>,
    ) -> Result<Resource, ApplicationError<ResourceDraft>> {
        let valid = self.validate()?;

        let committed = match &self.state {
            FormState::Idle => return Err(WorkflowError::NoDraft.into()),
            FormState::Creating(_) => {
                let payload = CreateResource::new(valid, self.instructor_id.clone());
                store.create(&payload).await?
            }
            FormState::Editing { original, draft } => {
                let id = original.ident().clone();
                let draft = draft.clone();
                store
                    .update(&id, valid.into())
                    .await
                    .map_err(|err| err.map_resource(|_| draft))?
            }
        };

        tracing::debug!(id = %committed.ident(), "form submitted");
        self.state = FormState::Idle;
        Ok(committed)
    }

    /// Remove the edited resource from the session after `confirm` agrees.
    ///
    /// Only the local copy is dropped; no delete request reaches the backend.
    pub fn delete<G, C>(
        &mut self,
        store: &mut ResourceStore<G>,
        confirm: C,
    ) -> Result<Resource, WorkflowError>
    where
        G: ResourceGateway,
        C: FnOnce(&Resource) -> bool,
    {
        let original = match &self.state {
            FormState::Editing { original, .. } => original,
            _ => return Err(WorkflowError::NotEditing),
        };

        if !confirm(original) {
            return Err(WorkflowError::Cancelled);
        }

        let id = original.ident().clone();
        let removed = store
            .discard(&id)
            .ok_or(WorkflowError::UnknownResource(id))?;
        self.state = FormState::Idle;
        Ok(removed)
    }

    pub fn course_options<G: CourseGateway>(courses: &CourseStore<G>) -> Vec<CourseOption> {
        courses.courses().iter().map(CourseOption::from).collect()
    }
}
