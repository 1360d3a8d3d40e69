//! Host-provided execution of HTTP requests.
//!
//! The core never opens sockets. A host that wants one-call operations
//! implements [`Transport`] with its HTTP stack of choice and hands it to
//! [`crate::ItemsApi`].

use async_trait::async_trait;

use crate::error::TransportError;
use crate::http::{HttpRequest, HttpResponse};

/// Executes a single HTTP round trip.
///
/// Implementations must return non-2xx responses as `Ok` data: status
/// interpretation belongs to the core. No retries.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn execute(&self, request: HttpRequest) -> Result<HttpResponse, TransportError>;
}

#[async_trait]
impl<T: Transport + ?Sized> Transport for std::sync::Arc<T> {
    async fn execute(&self, request: HttpRequest) -> Result<HttpResponse, TransportError> {
        (**self).execute(request).await
    }
}
