//! Stateless HTTP request builder and response parser for the items API.
//!
//! # Design
//! `ItemsClient` holds only a `base_url` and carries no mutable state between
//! calls. Each CRUD operation is split into a `build_*` method that produces
//! an `HttpRequest` and a `parse_*` method that consumes an `HttpResponse`.
//! The caller executes the actual HTTP round-trip, keeping the core
//! deterministic and free of I/O dependencies.

use serde::de::DeserializeOwned;
use tracing::{debug, warn};

use crate::error::ApiError;
use crate::http::{HttpMethod, HttpRequest, HttpResponse};
use crate::types::{Item, ItemInput};

/// Synchronous, stateless client for the items API.
#[derive(Debug, Clone)]
pub struct ItemsClient {
    base_url: String,
}

impl ItemsClient {
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn build_list_items(&self) -> HttpRequest {
        self.bare(HttpMethod::Get, self.collection_url())
    }

    pub fn build_get_item(&self, id: &str) -> HttpRequest {
        self.bare(HttpMethod::Get, self.item_url(id))
    }

    pub fn build_create_item(&self, input: &ItemInput) -> Result<HttpRequest, ApiError> {
        self.with_json(HttpMethod::Post, self.collection_url(), input)
    }

    pub fn build_update_item(&self, id: &str, input: &ItemInput) -> Result<HttpRequest, ApiError> {
        self.with_json(HttpMethod::Put, self.item_url(id), input)
    }

    pub fn build_delete_item(&self, id: &str) -> HttpRequest {
        self.bare(HttpMethod::Delete, self.item_url(id))
    }

    pub fn parse_list_items(&self, response: HttpResponse) -> Result<Vec<Item>, ApiError> {
        decode(response)
    }

    pub fn parse_get_item(&self, response: HttpResponse) -> Result<Item, ApiError> {
        decode(response)
    }

    pub fn parse_create_item(&self, response: HttpResponse) -> Result<Item, ApiError> {
        decode(response)
    }

    pub fn parse_update_item(&self, response: HttpResponse) -> Result<Item, ApiError> {
        decode(response)
    }

    /// Any 2xx is success; the body, if any, is ignored.
    pub fn parse_delete_item(&self, response: HttpResponse) -> Result<(), ApiError> {
        check_status(response).map(drop)
    }

    fn collection_url(&self) -> String {
        format!("{}/items", self.base_url)
    }

    fn item_url(&self, id: &str) -> String {
        format!("{}/items/{id}", self.base_url)
    }

    fn bare(&self, method: HttpMethod, path: String) -> HttpRequest {
        debug!(%method, %path, "built request");
        HttpRequest {
            method,
            path,
            headers: Vec::new(),
            body: None,
        }
    }

    fn with_json(&self, method: HttpMethod, path: String, input: &ItemInput) -> Result<HttpRequest, ApiError> {
        let body = serde_json::to_string(input).map_err(ApiError::Encode)?;
        debug!(%method, %path, "built request with json body");
        Ok(HttpRequest {
            method,
            path,
            headers: vec![("content-type".to_string(), "application/json".to_string())],
            body: Some(body),
        })
    }
}

/// Reject non-2xx responses, handing back the response otherwise.
fn check_status(response: HttpResponse) -> Result<HttpResponse, ApiError> {
    if response.is_success() {
        return Ok(response);
    }
    warn!(status = response.status, "items API returned an error status");
    Err(ApiError::Status {
        status: response.status,
        body: response.body,
    })
}

fn decode<T: DeserializeOwned>(response: HttpResponse) -> Result<T, ApiError> {
    let response = check_status(response)?;
    serde_json::from_str(&response.body).map_err(ApiError::Decode)
}
