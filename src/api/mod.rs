//! REST API abstraction for the race server.
//!
//! This module defines the interface every table and dialog talks to, along
//! with the error type shared by all implementations.

use async_trait::async_trait;
use serde_json::Value;

use crate::constants::ERROR_GENERIC_OPERATION;
use crate::models::{Car, CarPayload, EntityId, Page, PageRequest, Pilot, PilotPayload, Race, RacePayload};

pub mod http;

pub use http::HttpApi;

/// Common error types for API operations.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("{message}")]
    Http { status: u16, message: String },

    #[error("Network error: {0}")]
    Network(String),

    #[error("Invalid response: {0}")]
    Decode(String),

    #[error("Invalid client configuration: {0}")]
    Config(String),
}

impl ApiError {
    /// Build an HTTP error from a failed response body.
    pub fn from_response(status: u16, body: &str) -> Self {
        ApiError::Http {
            status,
            message: extract_server_message(body).unwrap_or_else(|| ERROR_GENERIC_OPERATION.to_string()),
        }
    }

    /// Message suitable for the status line.
    pub fn user_message(&self) -> String {
        match self {
            ApiError::Http { message, .. } => message.clone(),
            other => other.to_string(),
        }
    }

    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Http { status, .. } => Some(*status),
            _ => None,
        }
    }
}

impl From<reqwest::Error> for ApiError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            ApiError::Decode(err.to_string())
        } else {
            ApiError::Network(err.to_string())
        }
    }
}

/// Pull a human readable message out of an error body.
///
/// Looks at `message`, then `error`, then treats the object as a
/// `{field: message}` map of validation errors.
pub fn extract_server_message(body: &str) -> Option<String> {
    let value: Value = serde_json::from_str(body).ok()?;
    let object = value.as_object()?;

    for key in ["message", "error"] {
        if let Some(text) = object.get(key).and_then(Value::as_str) {
            if !text.trim().is_empty() {
                return Some(text.to_string());
            }
        }
    }

    let field_errors: Vec<&str> = object
        .values()
        .filter_map(Value::as_str)
        .filter(|text| !text.trim().is_empty())
        .collect();
    if field_errors.is_empty() {
        None
    } else {
        Some(field_errors.join("; "))
    }
}

/// Interface to the race server.
///
/// Every operation is a direct pass-through to one endpoint; callers re-fetch
/// after a mutation instead of trusting returned bodies.
#[async_trait]
pub trait RaceApi: Send + Sync {
    /// Base URL the client talks to, for display.
    fn endpoint(&self) -> &str;

    // Pilots
    async fn list_pilots(&self, request: PageRequest) -> Result<Page<Pilot>, ApiError>;
    async fn get_pilot(&self, id: EntityId) -> Result<Pilot, ApiError>;
    async fn create_pilot(&self, payload: &PilotPayload) -> Result<(), ApiError>;
    async fn update_pilot(&self, id: EntityId, payload: &PilotPayload) -> Result<(), ApiError>;
    async fn delete_pilot(&self, id: EntityId) -> Result<(), ApiError>;

    // Cars
    async fn list_cars(&self, request: PageRequest) -> Result<Page<Car>, ApiError>;
    async fn get_car(&self, id: EntityId) -> Result<Car, ApiError>;
    async fn create_car(&self, payload: &CarPayload) -> Result<(), ApiError>;
    async fn update_car(&self, id: EntityId, payload: &CarPayload) -> Result<(), ApiError>;
    async fn delete_car(&self, id: EntityId) -> Result<(), ApiError>;

    // Races
    async fn list_races(&self, request: PageRequest) -> Result<Page<Race>, ApiError>;
    async fn get_race(&self, id: EntityId) -> Result<Race, ApiError>;
    async fn create_race(&self, payload: &RacePayload) -> Result<(), ApiError>;
    async fn update_race(&self, id: EntityId, payload: &RacePayload) -> Result<(), ApiError>;
    async fn delete_race(&self, id: EntityId) -> Result<(), ApiError>;
}
