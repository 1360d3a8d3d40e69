//! In-memory stand-in for the items backend.
//!
//! Mirrors the wire shape of the real service (`_id`, camelCase timestamps,
//! a `__v` version key) closely enough for the client to be exercised end to
//! end. Nothing is persisted.

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use chrono::{SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use serde_json::json;
use tokio::{net::TcpListener, sync::RwLock};
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use uuid::Uuid;

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Item {
    #[serde(rename = "_id")]
    pub id: String,
    pub name: String,
    pub description: String,
    pub created_at: String,
    pub updated_at: String,
    #[serde(rename = "__v")]
    pub version: u32,
}

#[derive(Deserialize)]
pub struct ItemInput {
    pub name: String,
    pub description: String,
}

/// Items in insertion order.
pub type Db = Arc<RwLock<Vec<Item>>>;

type ApiResult<T> = Result<T, (StatusCode, Json<serde_json::Value>)>;

pub fn app() -> Router {
    let db: Db = Arc::new(RwLock::new(Vec::new()));
    Router::new()
        .route("/items", get(list_items).post(create_item))
        .route("/items/{id}", get(get_item).put(update_item).delete(delete_item))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(db)
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    if let Ok(addr) = listener.local_addr() {
        info!(%addr, "mock items backend listening");
    }
    axum::serve(listener, app()).await
}

fn now() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)
}

fn not_found() -> (StatusCode, Json<serde_json::Value>) {
    (StatusCode::NOT_FOUND, Json(json!({ "message": "Item not found" })))
}

async fn list_items(State(db): State<Db>) -> Json<Vec<Item>> {
    Json(db.read().await.clone())
}

async fn create_item(
    State(db): State<Db>,
    Json(input): Json<ItemInput>,
) -> (StatusCode, Json<Item>) {
    let stamp = now();
    let item = Item {
        id: Uuid::new_v4().simple().to_string(),
        name: input.name,
        description: input.description,
        created_at: stamp.clone(),
        updated_at: stamp,
        version: 0,
    };
    db.write().await.push(item.clone());
    (StatusCode::CREATED, Json(item))
}

async fn get_item(State(db): State<Db>, Path(id): Path<String>) -> ApiResult<Json<Item>> {
    let items = db.read().await;
    items
        .iter()
        .find(|item| item.id == id)
        .cloned()
        .map(Json)
        .ok_or_else(not_found)
}

async fn update_item(
    State(db): State<Db>,
    Path(id): Path<String>,
    Json(input): Json<ItemInput>,
) -> ApiResult<Json<Item>> {
    let mut items = db.write().await;
    let item = items.iter_mut().find(|item| item.id == id).ok_or_else(not_found)?;
    item.name = input.name;
    item.description = input.description;
    item.updated_at = now();
    Ok(Json(item.clone()))
}

async fn delete_item(State(db): State<Db>, Path(id): Path<String>) -> ApiResult<StatusCode> {
    let mut items = db.write().await;
    let pos = items.iter().position(|item| item.id == id).ok_or_else(not_found)?;
    items.remove(pos);
    Ok(StatusCode::NO_CONTENT)
}
