//! One-call async operations over a [`Transport`].
//!
//! Each method is build, execute once, parse. There is no retry, no timeout
//! override and nothing is cached; concurrent calls share nothing but the
//! client's base URL, so they complete in whatever order the network allows.

use tracing::debug;

use crate::client::ItemsClient;
use crate::error::ApiError;
use crate::http::{HttpRequest, HttpResponse};
use crate::transport::Transport;
use crate::types::{Item, ItemInput};

#[derive(Debug, Clone)]
pub struct ItemsApi<T> {
    client: ItemsClient,
    transport: T,
}

impl<T: Transport> ItemsApi<T> {
    pub fn new(client: ItemsClient, transport: T) -> Self {
        Self { client, transport }
    }

    pub fn client(&self) -> &ItemsClient {
        &self.client
    }

    pub async fn list(&self) -> Result<Vec<Item>, ApiError> {
        let response = self.send(self.client.build_list_items()).await?;
        self.client.parse_list_items(response)
    }

    pub async fn get(&self, id: &str) -> Result<Item, ApiError> {
        let response = self.send(self.client.build_get_item(id)).await?;
        self.client.parse_get_item(response)
    }

    pub async fn create(&self, input: &ItemInput) -> Result<Item, ApiError> {
        let response = self.send(self.client.build_create_item(input)?).await?;
        self.client.parse_create_item(response)
    }

    pub async fn update(&self, id: &str, input: &ItemInput) -> Result<Item, ApiError> {
        let response = self.send(self.client.build_update_item(id, input)?).await?;
        self.client.parse_update_item(response)
    }

    pub async fn delete(&self, id: &str) -> Result<(), ApiError> {
        let response = self.send(self.client.build_delete_item(id)).await?;
        self.client.parse_delete_item(response)
    }

    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, ApiError> {
        let method = request.method;
        let path = request.path.clone();
        let response = self.transport.execute(request).await?;
        debug!(%method, %path, status = response.status, "round trip complete");
        Ok(response)
    }
}
