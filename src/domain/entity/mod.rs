pub mod course;

use chrono::Utc;
use serde::{Deserialize, Serialize};

use super::datatype::{
    mime::AttachmentType,
    text::CommentText,
    AttachmentId, AuthorId, CommentId, InstructorId, ResourceId, ResourceStatus, ReviewerId,
};
use crate::error::{attachment::FileTypeError, workflow::TransitionError};

pub trait Entity {
    type Ident: PartialEq + std::fmt::Display;

    fn ident(&self) -> &Self::Ident;
}

macro_rules! state_ref {
    ($prop:ident, $rtrn:ty) => {
        pub fn $prop(&self) -> &$rtrn {
            &self.$prop
        }
    };

    ($prop:ident, $rtrn:ty, copy) => {
        pub fn $prop(&self) -> $rtrn {
            self.$prop
        }
    };
}

pub(self) use state_ref;

macro_rules! impl_entity {
    ($entity:ty, $ident:ty) => {
        impl crate::domain::entity::Entity for $entity {
            type Ident = $ident;

            fn ident(&self) -> &Self::Ident {
                &self.id
            }
        }
    };
}

pub(self) use impl_entity;

fn timestamp() -> String {
    Utc::now().to_rfc3339()
}

/// Course resource shared by an instructor.
///
/// Records are only built from backend responses; the store mutates them
/// through the counter and comment operations below, and replaces them
/// wholesale when the backend returns a newer representation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Resource {
    pub(in crate::domain) id: ResourceId,
    #[serde(default)]
    pub(in crate::domain) resource_title: String,
    #[serde(default)]
    pub(in crate::domain) description: String,
    #[serde(default)]
    pub(in crate::domain) course_code: String,
    #[serde(default)]
    pub(in crate::domain) attachments: Vec<Attachment>,
    #[serde(default)]
    pub(in crate::domain) status: ResourceStatus,
    #[serde(default)]
    pub(in crate::domain) instructor_id: Option<InstructorId>,
    #[serde(default)]
    pub(in crate::domain) reviewer_id: Option<ReviewerId>,
    #[serde(default)]
    pub(in crate::domain) likes: u64,
    #[serde(default)]
    pub(in crate::domain) dislikes: u64,
    #[serde(default)]
    pub(in crate::domain) comments: Vec<Comment>,
}

impl_entity!(Resource, ResourceId);

impl Resource {
    state_ref!(id, ResourceId);
    state_ref!(resource_title, String);
    state_ref!(description, String);
    state_ref!(course_code, String);
    state_ref!(attachments, Vec<Attachment>);
    state_ref!(status, ResourceStatus, copy);
    state_ref!(instructor_id, Option<InstructorId>);
    state_ref!(reviewer_id, Option<ReviewerId>);
    state_ref!(likes, u64, copy);
    state_ref!(dislikes, u64, copy);
    state_ref!(comments, Vec<Comment>);

    pub fn like(&mut self) {
        self.likes = self.likes.saturating_add(1);
    }

    pub fn dislike(&mut self) {
        self.dislikes = self.dislikes.saturating_add(1);
    }

    pub fn append_comment(&mut self, comment: Comment) {
        self.comments.push(comment);
    }

    pub fn check_transition(&self, next: ResourceStatus) -> Result<(), TransitionError> {
        if self.status.can_transition_to(next) {
            return Ok(());
        }

        Err(TransitionError {
            resource_id: self.id.clone(),
            from: self.status,
            to: next,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Comment {
    pub(in crate::domain) id: CommentId,
    pub(in crate::domain) text: String,
    pub(in crate::domain) author_id: AuthorId,
    #[serde(default)]
    pub(in crate::domain) timestamp: String,
}

impl_entity!(Comment, CommentId);

impl Comment {
    state_ref!(id, CommentId);
    state_ref!(text, String);
    state_ref!(author_id, AuthorId);
    state_ref!(timestamp, String);

    pub fn new(text: CommentText, author_id: AuthorId) -> Self {
        Self {
            id: CommentId::generate(),
            text: text.into(),
            author_id,
            timestamp: timestamp(),
        }
    }
}

/// File metadata picked in the form, before it is checked against the allow-list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AttachmentCandidate {
    pub file_name: String,
    pub file_type: String,
    pub path: String,
}

crate::base::resource_id!(AttachmentCandidate, "resource::AttachmentCandidate");

impl AttachmentCandidate {
    /// Candidate for a local file, typed from its extension.
    pub fn from_path(path: &str) -> Self {
        let file_name = std::path::Path::new(path)
            .file_name()
            .and_then(|name| name.to_str())
            .unwrap_or(path)
            .to_owned();
        let file_type = AttachmentType::from_path(path)
            .map(|ty| ty.as_mime())
            .unwrap_or("application/octet-stream")
            .to_owned();

        Self {
            file_name,
            file_type,
            path: path.to_owned(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Attachment {
    pub(in crate::domain) id: AttachmentId,
    pub(in crate::domain) file_name: String,
    pub(in crate::domain) file_type: String,
    #[serde(default)]
    pub(in crate::domain) path: String,
    #[serde(default)]
    pub(in crate::domain) timestamp: String,
    #[serde(default)]
    pub(in crate::domain) file_path: String,
}

impl_entity!(Attachment, AttachmentId);

impl Attachment {
    state_ref!(id, AttachmentId);
    state_ref!(file_name, String);
    state_ref!(file_type, String);
    state_ref!(path, String);
    state_ref!(timestamp, String);
    state_ref!(file_path, String);

    /// Admit a candidate only when its type is in the allow-list.
    pub fn admit(candidate: &AttachmentCandidate) -> Result<Self, FileTypeError> {
        let ty = AttachmentType::from_mime(&candidate.file_type).ok_or_else(|| FileTypeError {
            file_name: candidate.file_name.clone(),
            file_type: candidate.file_type.clone(),
        })?;

        Ok(Self {
            id: AttachmentId::generate(),
            file_name: candidate.file_name.clone(),
            file_type: ty.as_mime().to_owned(),
            path: candidate.path.clone(),
            timestamp: timestamp(),
            file_path: candidate.path.clone(),
        })
    }
}
