pub mod mime;
pub mod text;

use std::borrow::Cow;

use derive_more::Display;
use serde::{Deserialize, Serialize};

// ### OpaqueId

/// Identifier as the backend sent it, either a JSON number or a JSON string.
///
/// Two ids are equal when their textual forms are equal, so `7` and `"7"`
/// address the same record.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum OpaqueId {
    Number(u64),
    Text(String),
}

impl OpaqueId {
    pub fn as_key(&self) -> Cow<'_, str> {
        match self {
            OpaqueId::Number(n) => Cow::Owned(n.to_string()),
            OpaqueId::Text(s) => Cow::Borrowed(s.as_str()),
        }
    }

    /// Parse user input, preferring the numeric form.
    pub fn parse(s: &str) -> Self {
        match s.parse::<u64>() {
            Ok(n) => OpaqueId::Number(n),
            Err(_) => OpaqueId::Text(s.to_owned()),
        }
    }
}

impl PartialEq for OpaqueId {
    fn eq(&self, other: &Self) -> bool {
        self.as_key() == other.as_key()
    }
}

impl Eq for OpaqueId {}

impl std::hash::Hash for OpaqueId {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.as_key().hash(state)
    }
}

impl std::fmt::Display for OpaqueId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.as_key())
    }
}

macro_rules! opaque_id {
    ($name:ident, $resource_name:literal) => {
        #[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(OpaqueId);

        impl $name {
            pub fn parse(s: &str) -> Self {
                Self(OpaqueId::parse(s))
            }

            /// Fresh client-side identifier.
            pub fn generate() -> Self {
                Self(OpaqueId::Text(uuid::Uuid::new_v4().to_string()))
            }

            pub fn as_key(&self) -> Cow<'_, str> {
                self.0.as_key()
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                std::fmt::Display::fmt(&self.0, f)
            }
        }

        impl From<u64> for $name {
            fn from(n: u64) -> Self {
                Self(OpaqueId::Number(n))
            }
        }

        impl<'a> From<&'a str> for $name {
            fn from(s: &'a str) -> Self {
                Self(OpaqueId::Text(s.to_owned()))
            }
        }

        crate::base::resource_id!($name, $resource_name);
    };
}

opaque_id!(ResourceId, "base::resource_id");
opaque_id!(CourseId, "base::course_id");
opaque_id!(CommentId, "base::comment_id");
opaque_id!(AttachmentId, "base::attachment_id");
opaque_id!(InstructorId, "base::instructor_id");
opaque_id!(ReviewerId, "base::reviewer_id");
opaque_id!(AuthorId, "base::author_id");

// ### ResourceStatus

#[derive(Debug, Display, Default, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResourceStatus {
    #[default]
    #[display(fmt = "pending")]
    Pending,
    #[display(fmt = "approved")]
    Approved,
    #[display(fmt = "rejected")]
    Rejected,
}

impl ResourceStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ResourceStatus::Pending => "pending",
            ResourceStatus::Approved => "approved",
            ResourceStatus::Rejected => "rejected",
        }
    }

    /// Only pending resources may be decided; approved and rejected are final.
    pub fn can_transition_to(&self, next: ResourceStatus) -> bool {
        matches!(
            (self, next),
            (ResourceStatus::Pending, ResourceStatus::Approved)
                | (ResourceStatus::Pending, ResourceStatus::Rejected)
        )
    }
}

/// Outcome a reviewer can give to a pending resource.
#[derive(Debug, Display, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ReviewDecision {
    #[display(fmt = "approved")]
    Approve,
    #[display(fmt = "rejected")]
    Reject,
}

impl From<ReviewDecision> for ResourceStatus {
    fn from(decision: ReviewDecision) -> Self {
        match decision {
            ReviewDecision::Approve => ResourceStatus::Approved,
            ReviewDecision::Reject => ResourceStatus::Rejected,
        }
    }
}
