use serde::Serialize;

use crate::{
    base::resource_id,
    domain::{
        datatype::{
            text::{CourseCode, Description, ResourceTitle},
            InstructorId, ResourceId, ResourceStatus, ReviewerId,
        },
        entity::{Attachment, Comment},
    },
};

/// Resource being edited in the form; nothing about it is trusted yet.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResourceDraft {
    pub id: ResourceId,
    pub resource_title: String,
    pub description: String,
    pub course_code: String,
    pub attachments: Vec<Attachment>,
}

resource_id!(ResourceDraft, "resource::ResourceDraft");

impl ResourceDraft {
    /// Blank draft with a fresh client-side id.
    pub fn empty() -> Self {
        Self {
            id: ResourceId::generate(),
            resource_title: String::new(),
            description: String::new(),
            course_code: String::new(),
            attachments: Vec::new(),
        }
    }
}

/// Draft that passed the form schema.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidResource {
    pub resource_title: ResourceTitle,
    pub description: Description,
    pub course_code: CourseCode,
    pub attachments: Vec<Attachment>,
}

/// Body of `POST /resources`: a resource without its id.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateResource {
    pub resource_title: ResourceTitle,
    pub description: Description,
    pub course_code: CourseCode,
    pub attachments: Vec<Attachment>,
    pub status: ResourceStatus,
    pub instructor_id: InstructorId,
    pub reviewer_id: Option<ReviewerId>,
    pub likes: u64,
    pub dislikes: u64,
    pub comments: Vec<Comment>,
}

resource_id!(CreateResource, "resource::CreateResource");

impl CreateResource {
    pub fn new(resource: ValidResource, instructor_id: InstructorId) -> Self {
        Self {
            resource_title: resource.resource_title,
            description: resource.description,
            course_code: resource.course_code,
            attachments: resource.attachments,
            status: ResourceStatus::Pending,
            instructor_id,
            reviewer_id: None,
            likes: 0,
            dislikes: 0,
            comments: Vec::new(),
        }
    }
}

/// Editable fields of an existing resource.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateResource {
    pub resource_title: ResourceTitle,
    pub description: Description,
    pub course_code: CourseCode,
    pub attachments: Vec<Attachment>,
}

resource_id!(UpdateResource, "resource::UpdateResource");

impl From<ValidResource> for UpdateResource {
    fn from(resource: ValidResource) -> Self {
        Self {
            resource_title: resource.resource_title,
            description: resource.description,
            course_code: resource.course_code,
            attachments: resource.attachments,
        }
    }
}

/// Body of `PATCH /resources/{id}`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ResourcePatch {
    Status {
        status: ResourceStatus,
    },
    Reviewer {
        #[serde(rename = "reviewerId")]
        reviewer_id: ReviewerId,
    },
    Content(UpdateResource),
}

resource_id!(ResourcePatch, "resource::ResourcePatch");

/// Entry of the course selector.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CourseOption {
    pub value: String,
    pub label: String,
}
