use std::time::Duration;

use async_trait::async_trait;
use reqwest::{
    header::{HeaderMap, HeaderValue},
    Client, Response,
};
use serde::de::DeserializeOwned;
use url::Url;

use crate::{
    app::resource::{CreateResource, ResourcePatch},
    config::env_var::EnvVar,
    domain::{
        datatype::ResourceId,
        entity::{course::Course, Resource},
        service::{CourseGateway, ResourceGateway},
    },
    error::gateway::FetchError,
};

const KEEP_ALIVE: Duration = Duration::from_secs(60 * 60);

pub fn create_client(config: &EnvVar) -> Result<Client, FetchError> {
    let mut headers = HeaderMap::new();
    headers.append("accept", HeaderValue::from_static("application/json"));

    let client = Client::builder()
        .tcp_keepalive(KEEP_ALIVE)
        .connect_timeout(config.connect_timeout)
        .timeout(config.request_timeout)
        .pool_max_idle_per_host(5)
        .default_headers(headers)
        .brotli(true)
        .gzip(true)
        .build()?;

    Ok(client)
}

/// REST backend reached over HTTP.
///
/// ```text
/// GET   /resources         -> [Resource]
/// POST  /resources         -> Resource
/// PATCH /resources/{id}    -> Resource
/// GET   /courses           -> [Course]
/// ```
pub struct HttpGateway {
    client: Client,
    base_url: Url,
}

impl HttpGateway {
    pub fn new(client: Client, base_url: Url) -> Self {
        Self { client, base_url }
    }

    pub fn from_config(config: &EnvVar) -> Result<Self, FetchError> {
        Ok(Self::new(create_client(config)?, config.api_url.clone()))
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    fn endpoint(&self, segments: &[&str]) -> Result<Url, FetchError> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| FetchError::InvalidUrl(self.base_url.to_string()))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    async fn parse<T: DeserializeOwned>(res: Response) -> Result<T, FetchError> {
        let status = res.status();
        if !status.is_success() {
            let message = res.text().await.unwrap_or_default();
            return Err(FetchError::Status {
                status: status.as_u16(),
                message,
            });
        }

        let bytes = res.bytes().await?;
        serde_json::from_slice(&bytes).map_err(|err| FetchError::Decode(err.to_string()))
    }
}

#[async_trait]
impl ResourceGateway for HttpGateway {
    async fn fetch_resources(&self) -> Result<Vec<Resource>, FetchError> {
        let url = self.endpoint(&["resources"])?;
        tracing::debug!(%url, "GET resources");

        let res = self.client.get(url).send().await?;
        Self::parse(res).await
    }

    async fn create_resource(&self, payload: &CreateResource) -> Result<Resource, FetchError> {
        let url = self.endpoint(&["resources"])?;
        tracing::debug!(%url, "POST resource");

        let res = self.client.post(url).json(payload).send().await?;
        Self::parse(res).await
    }

    async fn patch_resource(
        &self,
        id: &ResourceId,
        patch: &ResourcePatch,
    ) -> Result<Resource, FetchError> {
        let key = id.as_key();
        let url = self.endpoint(&["resources", &key])?;
        tracing::debug!(%url, "PATCH resource");

        let res = self.client.patch(url).json(patch).send().await?;
        Self::parse(res).await
    }
}

#[async_trait]
impl CourseGateway for HttpGateway {
    async fn fetch_courses(&self) -> Result<Vec<Course>, FetchError> {
        let url = self.endpoint(&["courses"])?;
        tracing::debug!(%url, "GET courses");

        let res = self.client.get(url).send().await?;
        Self::parse(res).await
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn gateway(base: &str) -> HttpGateway {
        HttpGateway::new(Client::new(), Url::parse(base).unwrap())
    }

    #[test]
    fn endpoints_join_below_the_base_path() {
        let root = gateway("http://localhost:5000");
        assert_eq!(
            root.endpoint(&["resources"]).unwrap().as_str(),
            "http://localhost:5000/resources"
        );

        let nested = gateway("http://localhost:5000/api/");
        assert_eq!(
            nested.endpoint(&["resources", "42"]).unwrap().as_str(),
            "http://localhost:5000/api/resources/42"
        );
    }

    #[test]
    fn opaque_base_urls_are_refused() {
        let gateway = gateway("mailto:hub@example.com");
        assert!(matches!(
            gateway.endpoint(&["courses"]),
            Err(FetchError::InvalidUrl(_))
        ));
    }
}
