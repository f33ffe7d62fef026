use serde::{Deserialize, Serialize};

use super::{impl_entity, state_ref};
use crate::domain::datatype::CourseId;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct YearOfOffering {
    pub year: u16,
    pub semester: u8,
}

/// Course reference data; read-only for resource management.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Course {
    pub(in crate::domain) id: CourseId,
    pub(in crate::domain) course_code: String,
    pub(in crate::domain) course_title: String,
    pub(in crate::domain) year_of_offering: Option<YearOfOffering>,
}

impl_entity!(Course, CourseId);

impl Course {
    state_ref!(id, CourseId);
    state_ref!(course_code, String);
    state_ref!(course_title, String);
    state_ref!(year_of_offering, Option<YearOfOffering>);

    /// Option label shown by the course selector, e.g. `CoSc3081 - Web Programming`.
    pub fn label(&self) -> String {
        format!("{} - {}", self.course_code, self.course_title)
    }
}
