//! API client core and page router for the items frontend.
//!
//! # Overview
//! Builds `HttpRequest` values and parses `HttpResponse` values without
//! touching the network (host-does-IO pattern). A host either executes the
//! round-trip itself between `build_*` and `parse_*`, or plugs a
//! [`Transport`] into [`ItemsApi`] to get one-call async operations.
//!
//! # Design
//! - `ItemsClient` is stateless; it holds only `base_url`.
//! - Each CRUD operation is split into `build_*` (produces request) and
//!   `parse_*` (consumes response), so the I/O boundary is explicit.
//! - The router maps paths to host-supplied view values; it never renders.
//! - DTOs are defined independently from the mock-server crate; integration
//!   tests catch schema drift.

pub mod api;
pub mod client;
pub mod config;
pub mod error;
pub mod http;
pub mod router;
pub mod transport;
pub mod types;

pub use api::ItemsApi;
pub use client::ItemsClient;
pub use config::ApiConfig;
pub use error::{ApiError, TransportError};
pub use http::{HttpMethod, HttpRequest, HttpResponse};
pub use router::{app_router, AppView, Resolved, Router, RouterError};
pub use transport::Transport;
pub use types::{Item, ItemInput};
