use derive_more::Display;

pub type BoxedError = Box<dyn std::error::Error + Send + Sync + 'static>;

#[derive(Debug, Display)]
pub struct UnknownError(BoxedError);

impl std::error::Error for UnknownError {}

impl UnknownError {
    pub fn new(err: BoxedError) -> Self {
        Self(err)
    }
}

pub mod app {
    use derive_more::Display;

    use super::{
        attachment::FileTypeError,
        gateway::FetchError,
        resource::ValidationError,
        workflow::{TransitionError, WorkflowError},
    };

    #[derive(Debug, Display)]
    pub enum ApplicationError<R> {
        Validation(ValidationError<R>),
        FileType(FileTypeError),
        Fetch(FetchError),
        Transition(TransitionError),
        Workflow(WorkflowError),
    }

    impl<R: std::fmt::Debug> std::error::Error for ApplicationError<R> {}

    impl<R> From<ValidationError<R>> for ApplicationError<R> {
        fn from(err: ValidationError<R>) -> Self {
            Self::Validation(err)
        }
    }

    impl<R> From<FileTypeError> for ApplicationError<R> {
        fn from(err: FileTypeError) -> Self {
            Self::FileType(err)
        }
    }

    impl<R> From<FetchError> for ApplicationError<R> {
        fn from(err: FetchError) -> Self {
            Self::Fetch(err)
        }
    }

    impl<R> From<TransitionError> for ApplicationError<R> {
        fn from(err: TransitionError) -> Self {
            Self::Transition(err)
        }
    }

    impl<R> From<WorkflowError> for ApplicationError<R> {
        fn from(err: WorkflowError) -> Self {
            Self::Workflow(err)
        }
    }

    impl<R> ApplicationError<R> {
        /// Re-tag the error with another resource, keeping every other variant.
        pub fn map_resource<T>(self, op: impl FnOnce(R) -> T) -> ApplicationError<T> {
            match self {
                Self::Validation(err) => ApplicationError::Validation(err.map_resource(op)),
                Self::FileType(err) => ApplicationError::FileType(err),
                Self::Fetch(err) => ApplicationError::Fetch(err),
                Self::Transition(err) => ApplicationError::Transition(err),
                Self::Workflow(err) => ApplicationError::Workflow(err),
            }
        }
    }
}

pub mod gateway {
    use std::io;

    use derive_more::Display;

    use super::UnknownError;

    #[derive(Debug, Display)]
    pub enum DispatchError {
        #[display(fmt = "Dispatched request timed out in {_0:?}")]
        Timeout(Option<std::time::Duration>),
        #[display(fmt = "IO error dispatching {_0}")]
        IO(io::Error),
    }

    impl std::error::Error for DispatchError {}

    /// Failure talking to the REST backend.
    #[derive(Debug, Display)]
    pub enum FetchError {
        #[display(fmt = "invalid backend url: {_0}")]
        InvalidUrl(String),
        #[display(fmt = "backend connection error: {_0}")]
        Connection(DispatchError),
        #[display(fmt = "backend responded with HTTP {status}: {message}")]
        Status { status: u16, message: String },
        #[display(fmt = "backend response could not be decoded: {_0}")]
        Decode(String),
        #[display(fmt = "unknown backend error: {_0}")]
        Unknown(UnknownError),
    }

    impl std::error::Error for FetchError {}

    impl From<reqwest::Error> for FetchError {
        fn from(err: reqwest::Error) -> Self {
            if err.is_timeout() {
                Self::Connection(DispatchError::Timeout(None))
            } else if err.is_connect() {
                Self::Connection(DispatchError::IO(io::Error::new(
                    io::ErrorKind::ConnectionRefused,
                    err.to_string(),
                )))
            } else if err.is_decode() {
                Self::Decode(err.to_string())
            } else if err.is_status() {
                Self::Status {
                    status: err.status().map(|s| s.as_u16()).unwrap_or_default(),
                    message: err.to_string(),
                }
            } else if err.is_builder() {
                Self::InvalidUrl(err.to_string())
            } else {
                Self::Unknown(UnknownError::new(err.into()))
            }
        }
    }
}

pub mod resource {
    use derive_more::{Display, Error};
    use serde::{Deserialize, Serialize};

    use crate::base::ResourceID;

    #[derive(Debug, Display, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
    pub enum ValidationErrorKind {
        /// When a required property is missing.
        Required,
        /// Minimum inclusive string length.
        MinLength(u64),
    }

    impl std::error::Error for ValidationErrorKind {}

    #[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
    pub struct ValidationError<R> {
        /// Resource value
        pub resource: R,
        /// Name of the resource
        pub resource_type: &'static str,
        /// Invalid resource fields
        pub fields: Vec<ValidationFieldError>,
    }

    impl<R> ValidationError<R> {
        pub fn from_resource(resource: R, fields: Vec<ValidationFieldError>) -> Self
        where
            R: ResourceID,
        {
            Self {
                resource,
                resource_type: R::resource_id(),
                fields,
            }
        }

        /// Field error reported for a json pointer path, e.g. `/resourceTitle`.
        pub fn field(&self, path: &str) -> Option<&ValidationFieldError> {
            self.fields.iter().find(|field| field.path == path)
        }

        pub fn map_resource<T>(self, op: impl FnOnce(R) -> T) -> ValidationError<T> {
            ValidationError {
                resource: op(self.resource),
                resource_type: self.resource_type,
                fields: self.fields,
            }
        }
    }

    impl<R> std::fmt::Display for ValidationError<R> {
        fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
            f.write_fmt(format_args!(
                "Invalid resource {}, fields {:?}",
                self.resource_type, self.fields
            ))
        }
    }

    impl<R: std::fmt::Debug> std::error::Error for ValidationError<R> {}

    #[derive(Debug, Display, Error, Clone, PartialEq, Eq, Hash, Serialize)]
    #[display(fmt = "{path}: {value:?}, {kinds:?}")]
    pub struct ValidationFieldError {
        /// Resource field path with invalid value
        pub path: String,
        /// Displayed invalid value
        pub value: String,
        /// Value type id
        pub type_id: &'static str,
        /// Kinds of validation errors
        pub kinds: Vec<ValidationErrorKind>,
    }

    impl ValidationFieldError {
        pub fn new(
            type_id: &'static str,
            value: String,
            path: String,
            kinds: Vec<ValidationErrorKind>,
        ) -> Self {
            Self {
                path,
                type_id,
                value,
                kinds,
            }
        }
    }
}

pub mod attachment {
    use derive_more::Display;

    /// Attachment refused at selection time because its type is outside the allow-list.
    #[derive(Debug, Display, Clone, PartialEq, Eq)]
    #[display(fmt = "{file_name} has unsupported type {file_type:?}, only PDF, DOCX and PPTX files are accepted")]
    pub struct FileTypeError {
        pub file_name: String,
        pub file_type: String,
    }

    impl std::error::Error for FileTypeError {}
}

pub mod workflow {
    use derive_more::Display;

    use crate::domain::datatype::{ResourceId, ResourceStatus};

    #[derive(Debug, Display, Clone, PartialEq, Eq)]
    #[display(fmt = "resource {resource_id} cannot move from {from} to {to}")]
    pub struct TransitionError {
        pub resource_id: ResourceId,
        pub from: ResourceStatus,
        pub to: ResourceStatus,
    }

    impl std::error::Error for TransitionError {}

    #[derive(Debug, Display, Clone, PartialEq, Eq)]
    pub enum WorkflowError {
        /// No draft is open in the form.
        #[display(fmt = "no resource draft is open")]
        NoDraft,
        /// The operation requires an existing resource to be selected.
        #[display(fmt = "operation requires editing an existing resource")]
        NotEditing,
        #[display(fmt = "resource {_0} is not loaded")]
        UnknownResource(ResourceId),
        #[display(fmt = "reviewer {_0} is not a reviewer candidate")]
        UnknownReviewer(String),
        #[display(fmt = "operation cancelled")]
        Cancelled,
    }

    impl std::error::Error for WorkflowError {}
}

pub mod command {
    use derive_more::Display;

    #[derive(Debug, Display, Clone, PartialEq, Eq)]
    pub enum CommandError {
        #[display(fmt = "unknown command {_0:?}, type `help` for the command list")]
        Unknown(String),
        #[display(fmt = "missing argument <{_0}>")]
        MissingArgument(&'static str),
        #[display(fmt = "invalid argument <{name}>: {value:?}")]
        InvalidArgument { name: &'static str, value: String },
    }

    impl std::error::Error for CommandError {}
}
