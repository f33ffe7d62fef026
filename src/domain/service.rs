use async_trait::async_trait;

use super::{
    datatype::ResourceId,
    entity::{course::Course, Resource},
};
use crate::{
    app::resource::{CreateResource, ResourcePatch},
    error::gateway::FetchError,
};

/// Backend collection of resources.
#[async_trait]
pub trait ResourceGateway: Send + Sync {
    async fn fetch_resources(&self) -> Result<Vec<Resource>, FetchError>;

    async fn create_resource(&self, payload: &CreateResource) -> Result<Resource, FetchError>;

    async fn patch_resource(
        &self,
        id: &ResourceId,
        patch: &ResourcePatch,
    ) -> Result<Resource, FetchError>;
}

/// Backend collection of courses.
#[async_trait]
pub trait CourseGateway: Send + Sync {
    async fn fetch_courses(&self) -> Result<Vec<Course>, FetchError>;
}
