use serde::Serialize;

use crate::error::resource::{ValidationErrorKind, ValidationFieldError};

/// Length check shared by the validated text fields.
///
/// Length counts characters, not bytes. An empty value reports `Required`,
/// a short one reports `MinLength`.
fn check_length(
    type_id: &'static str,
    path: &str,
    value: &str,
    min: u64,
) -> Result<(), ValidationFieldError> {
    let len = value.chars().count() as u64;
    let kind = if len == 0 {
        ValidationErrorKind::Required
    } else if len < min {
        ValidationErrorKind::MinLength(min)
    } else {
        return Ok(());
    };

    Err(ValidationFieldError::new(
        type_id,
        value.into(),
        path.into(),
        vec![kind],
    ))
}

macro_rules! bounded_text {
    ($(#[$meta:meta])* $name:ident, $resource_name:literal, $path:literal, $min:literal) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            pub const PATH: &'static str = $path;
            pub const MIN_LENGTH: u64 = $min;

            pub fn parse(value: &str) -> Result<Self, ValidationFieldError> {
                check_length($resource_name, $path, value, $min)?;
                Ok(Self(value.to_owned()))
            }

            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl std::str::FromStr for $name {
            type Err = ValidationFieldError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Self::parse(s)
            }
        }

        impl From<$name> for String {
            fn from(value: $name) -> Self {
                value.0
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(&self.0)
            }
        }

        crate::base::resource_id!($name, $resource_name);
    };
}

bounded_text!(
    /// Title shown for a resource, at least 3 characters.
    ResourceTitle,
    "resource::resourceTitle",
    "/resourceTitle",
    3
);

bounded_text!(
    /// Resource description, at least 5 characters.
    Description,
    "resource::description",
    "/description",
    5
);

bounded_text!(
    /// Code of the course a resource belongs to, e.g. `CoSc3081`.
    CourseCode,
    "course::courseCode",
    "/courseCode",
    1
);

bounded_text!(CommentText, "resource::comment", "/text", 1);

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn title_needs_three_characters() {
        assert!(ResourceTitle::parse("Lab").is_ok());

        let err = ResourceTitle::parse("La").unwrap_err();
        assert_eq!(err.path, "/resourceTitle");
        assert_eq!(err.kinds, vec![ValidationErrorKind::MinLength(3)]);
    }

    #[test]
    fn empty_values_are_required() {
        let err = CourseCode::parse("").unwrap_err();
        assert_eq!(err.kinds, vec![ValidationErrorKind::Required]);

        let err = Description::parse("").unwrap_err();
        assert_eq!(err.kinds, vec![ValidationErrorKind::Required]);
    }

    #[test]
    fn length_counts_characters() {
        // five characters, ten bytes
        assert!(Description::parse("ééééé").is_ok());
        assert!(Description::parse("éééé").is_err());
    }
}
