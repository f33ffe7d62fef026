pub mod review {
    use crate::{
        app::{resource::ResourcePatch, store::ResourceStore},
        domain::{
            datatype::{ResourceId, ResourceStatus, ReviewDecision},
            entity::Resource,
            service::ResourceGateway,
        },
        error::{app::ApplicationError, gateway::FetchError},
    };

    /// Fetch the collection the review queue is built from.
    pub async fn mount<G: ResourceGateway>(store: &mut ResourceStore<G>) -> Result<(), FetchError> {
        store.load().await
    }

    pub fn pending<G: ResourceGateway>(store: &ResourceStore<G>) -> Vec<&Resource> {
        store
            .resources()
            .iter()
            .filter(|res| res.status() == ResourceStatus::Pending)
            .collect()
    }

    pub async fn decide<G: ResourceGateway>(
        store: &mut ResourceStore<G>,
        id: &ResourceId,
        decision: ReviewDecision,
    ) -> Result<(), ApplicationError<ResourcePatch>> {
        tracing::debug!(%id, %decision, "review decision");
        store.set_status(id, decision).await
    }

    pub async fn approve<G: ResourceGateway>(
        store: &mut ResourceStore<G>,
        id: &ResourceId,
    ) -> Result<(), ApplicationError<ResourcePatch>> {
        decide(store, id, ReviewDecision::Approve).await
    }

    pub async fn reject<G: ResourceGateway>(
        store: &mut ResourceStore<G>,
        id: &ResourceId,
    ) -> Result<(), ApplicationError<ResourcePatch>> {
        decide(store, id, ReviewDecision::Reject).await
    }
}

pub mod assignment {
    use serde::Serialize;

    use crate::{
        app::{resource::ResourcePatch, store::ResourceStore},
        domain::{
            datatype::{ResourceId, ReviewerId},
            service::ResourceGateway,
        },
        error::{app::ApplicationError, workflow::WorkflowError},
    };

    pub use super::review::{mount, pending};

    #[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
    pub struct ReviewerCandidate {
        pub id: u64,
        pub name: &'static str,
    }

    impl ReviewerCandidate {
        pub fn reviewer_id(&self) -> ReviewerId {
            ReviewerId::from(self.id)
        }
    }

    /// Reviewers offered by the assignment view; not fetched from the backend.
    pub const REVIEWER_CANDIDATES: [ReviewerCandidate; 1] = [ReviewerCandidate {
        id: 2,
        name: "Reviewer 2",
    }];

    pub fn candidate(reviewer_id: &ReviewerId) -> Option<&'static ReviewerCandidate> {
        REVIEWER_CANDIDATES
            .iter()
            .find(|candidate| &candidate.reviewer_id() == reviewer_id)
    }

    pub async fn assign<G: ResourceGateway>(
        store: &mut ResourceStore<G>,
        id: &ResourceId,
        reviewer_id: &ReviewerId,
    ) -> Result<(), ApplicationError<ResourcePatch>> {
        let candidate = candidate(reviewer_id).ok_or_else(|| {
            tracing::warn!(%reviewer_id, "refused unknown reviewer");
            WorkflowError::UnknownReviewer(reviewer_id.to_string())
        })?;

        tracing::debug!(%id, reviewer = candidate.name, "assigning reviewer");
        store.set_reviewer(id, candidate.reviewer_id()).await
    }
}

pub mod catalog {
    use crate::{
        app::store::ResourceStore,
        domain::{
            datatype::{text::CommentText, AuthorId, ResourceId, ResourceStatus},
            entity::{Comment, Resource},
            service::ResourceGateway,
        },
        error::{
            app::ApplicationError, resource::ValidationError, workflow::WorkflowError,
        },
    };

    pub use super::review::mount;

    pub fn approved<G: ResourceGateway>(store: &ResourceStore<G>) -> Vec<&Resource> {
        store
            .resources()
            .iter()
            .filter(|res| res.status() == ResourceStatus::Approved)
            .collect()
    }

    pub fn like<G: ResourceGateway>(
        store: &mut ResourceStore<G>,
        id: &ResourceId,
    ) -> Result<(), WorkflowError> {
        if store.like(id) {
            Ok(())
        } else {
            Err(WorkflowError::UnknownResource(id.clone()))
        }
    }

    pub fn dislike<G: ResourceGateway>(
        store: &mut ResourceStore<G>,
        id: &ResourceId,
    ) -> Result<(), WorkflowError> {
        if store.dislike(id) {
            Ok(())
        } else {
            Err(WorkflowError::UnknownResource(id.clone()))
        }
    }

    /// Append a comment authored by `author_id`; kept in the session only.
    pub fn comment<G: ResourceGateway>(
        store: &mut ResourceStore<G>,
        id: &ResourceId,
        author_id: AuthorId,
        text: &str,
    ) -> Result<Comment, ApplicationError<String>> {
        let text = CommentText::parse(text)
            .map_err(|field| ValidationError::from_resource(text.to_owned(), vec![field]))?;

        let comment = Comment::new(text, author_id);
        if !store.append_comment(id, comment.clone()) {
            return Err(WorkflowError::UnknownResource(id.clone()).into());
        }

        tracing::debug!(%id, comment = %comment.id(), "comment added");
        Ok(comment)
    }
}
