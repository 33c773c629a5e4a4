//! reqwest implementation of [`RaceApi`].

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, Method, RequestBuilder, Url};
use serde::de::DeserializeOwned;
use serde::Serialize;

use super::{ApiError, RaceApi};
use crate::config::ApiConfig;
use crate::models::{
    Car, CarPayload, EntityId, EntityKind, Page, PageRequest, Pilot, PilotPayload, Race, RacePayload,
};

/// HTTP client for the race server.
#[derive(Clone)]
pub struct HttpApi {
    client: Client,
    base_url: Url,
    endpoint: String,
}

impl HttpApi {
    /// Create a client for `base_url` (for example `http://localhost:8080`).
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, ApiError> {
        let mut base_url = Url::parse(base_url).map_err(|e| ApiError::Config(format!("{}: {}", base_url, e)))?;
        if !base_url.path().ends_with('/') {
            let path = format!("{}/", base_url.path());
            base_url.set_path(&path);
        }

        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| ApiError::Config(e.to_string()))?;

        let endpoint = base_url.as_str().trim_end_matches('/').to_string();
        Ok(Self {
            client,
            base_url,
            endpoint,
        })
    }

    pub fn from_config(config: &ApiConfig) -> Result<Self, ApiError> {
        Self::new(&config.base_url, Duration::from_secs(config.request_timeout_secs))
    }

    fn url(&self, kind: EntityKind, id: Option<EntityId>) -> Result<Url, ApiError> {
        let path = match id {
            Some(id) => format!("api/{}/{}", kind.collection(), id),
            None => format!("api/{}", kind.collection()),
        };
        self.base_url
            .join(&path)
            .map_err(|e| ApiError::Config(format!("invalid path {}: {}", path, e)))
    }

    fn request(&self, method: Method, kind: EntityKind, id: Option<EntityId>) -> Result<RequestBuilder, ApiError> {
        Ok(self.client.request(method, self.url(kind, id)?))
    }

    async fn send(builder: RequestBuilder) -> Result<reqwest::Response, ApiError> {
        let response = builder.send().await?;
        let status = response.status();
        if status.is_success() {
            Ok(response)
        } else {
            let body = response.text().await.unwrap_or_default();
            Err(ApiError::from_response(status.as_u16(), &body))
        }
    }

    async fn list<T: DeserializeOwned>(&self, kind: EntityKind, request: PageRequest) -> Result<Page<T>, ApiError> {
        let builder = self.request(Method::GET, kind, None)?.query(&request.query());
        let response = Self::send(builder).await?;
        response.json::<Page<T>>().await.map_err(|e| ApiError::Decode(e.to_string()))
    }

    async fn get<T: DeserializeOwned>(&self, kind: EntityKind, id: EntityId) -> Result<T, ApiError> {
        let response = Self::send(self.request(Method::GET, kind, Some(id))?).await?;
        response.json::<T>().await.map_err(|e| ApiError::Decode(e.to_string()))
    }

    async fn write<P: Serialize + Sync>(
        &self,
        method: Method,
        kind: EntityKind,
        id: Option<EntityId>,
        payload: &P,
    ) -> Result<(), ApiError> {
        Self::send(self.request(method, kind, id)?.json(payload)).await?;
        Ok(())
    }

    async fn remove(&self, kind: EntityKind, id: EntityId) -> Result<(), ApiError> {
        Self::send(self.request(Method::DELETE, kind, Some(id))?).await?;
        Ok(())
    }
}

#[async_trait]
impl RaceApi for HttpApi {
    fn endpoint(&self) -> &str {
        &self.endpoint
    }

    async fn list_pilots(&self, request: PageRequest) -> Result<Page<Pilot>, ApiError> {
        self.list(EntityKind::Pilot, request).await
    }

    async fn get_pilot(&self, id: EntityId) -> Result<Pilot, ApiError> {
        self.get(EntityKind::Pilot, id).await
    }

    async fn create_pilot(&self, payload: &PilotPayload) -> Result<(), ApiError> {
        self.write(Method::POST, EntityKind::Pilot, None, payload).await
    }

    async fn update_pilot(&self, id: EntityId, payload: &PilotPayload) -> Result<(), ApiError> {
        self.write(Method::PUT, EntityKind::Pilot, Some(id), payload).await
    }

    async fn delete_pilot(&self, id: EntityId) -> Result<(), ApiError> {
        self.remove(EntityKind::Pilot, id).await
    }

    async fn list_cars(&self, request: PageRequest) -> Result<Page<Car>, ApiError> {
        self.list(EntityKind::Car, request).await
    }

    async fn get_car(&self, id: EntityId) -> Result<Car, ApiError> {
        self.get(EntityKind::Car, id).await
    }

    async fn create_car(&self, payload: &CarPayload) -> Result<(), ApiError> {
        self.write(Method::POST, EntityKind::Car, None, payload).await
    }

    async fn update_car(&self, id: EntityId, payload: &CarPayload) -> Result<(), ApiError> {
        self.write(Method::PUT, EntityKind::Car, Some(id), payload).await
    }

    async fn delete_car(&self, id: EntityId) -> Result<(), ApiError> {
        self.remove(EntityKind::Car, id).await
    }

    async fn list_races(&self, request: PageRequest) -> Result<Page<Race>, ApiError> {
        self.list(EntityKind::Race, request).await
    }

    async fn get_race(&self, id: EntityId) -> Result<Race, ApiError> {
        self.get(EntityKind::Race, id).await
    }

    async fn create_race(&self, payload: &RacePayload) -> Result<(), ApiError> {
        self.write(Method::POST, EntityKind::Race, None, payload).await
    }

    async fn update_race(&self, id: EntityId, payload: &RacePayload) -> Result<(), ApiError> {
        self.write(Method::PUT, EntityKind::Race, Some(id), payload).await
    }

    async fn delete_race(&self, id: EntityId) -> Result<(), ApiError> {
        self.remove(EntityKind::Race, id).await
    }
}
