use super::entity::{course::Course, Resource};
use crate::app::resource::{CourseOption, ResourceDraft};

impl From<&Resource> for ResourceDraft {
    fn from(res: &Resource) -> Self {
        Self {
            id: res.id.clone(),
            resource_title: res.resource_title.clone(),
            description: res.description.clone(),
            course_code: res.course_code.clone(),
            attachments: res.attachments.clone(),
        }
    }
}

impl From<&Course> for CourseOption {
    fn from(course: &Course) -> Self {
        Self {
            value: course.course_code.clone(),
            label: course.label(),
        }
    }
}
