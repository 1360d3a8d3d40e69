//! Command-line surface: one subcommand per API operation, plus `route`.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use items_core::{app_router, AppView, ItemInput, ItemsApi, Resolved, Transport};
use serde::Serialize;
use tracing::info;

#[derive(Parser, Debug)]
#[command(name = "items")]
#[command(version)]
#[command(about = "Create, read, update and delete items on the items backend")]
pub struct Args {
    /// Backend base URL (default: $BACKEND_URL, then http://localhost:3001)
    #[arg(long, global = true)]
    pub base_url: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// List all items
    List,

    /// Show one item
    Get { id: String },

    /// Create an item
    Create {
        #[arg(long)]
        name: String,
        #[arg(long)]
        description: String,
    },

    /// Update an item; omitted fields keep their current value
    Update {
        id: String,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        description: Option<String>,
    },

    /// Delete an item
    Delete { id: String },

    /// Navigate the page router through the given paths and print each view
    Route {
        #[arg(required = true)]
        paths: Vec<String>,
    },
}

/// Run one command, returning what should be printed.
pub async fn run<T: Transport>(command: Command, api: &ItemsApi<T>) -> Result<String> {
    match command {
        Command::List => {
            let items = api.list().await.context("failed to list items")?;
            pretty(&items)
        }
        Command::Get { id } => {
            let item = api
                .get(&id)
                .await
                .with_context(|| format!("failed to get item {id}"))?;
            pretty(&item)
        }
        Command::Create { name, description } => {
            let item = api
                .create(&ItemInput::new(name, description))
                .await
                .context("failed to create item")?;
            pretty(&item)
        }
        Command::Update {
            id,
            name,
            description,
        } => {
            let input = match (name, description) {
                (Some(name), Some(description)) => ItemInput::new(name, description),
                (name, description) => {
                    let current = api
                        .get(&id)
                        .await
                        .with_context(|| format!("failed to load item {id} for editing"))?;
                    let mut input = ItemInput::from(&current);
                    if let Some(name) = name {
                        input.name = name;
                    }
                    if let Some(description) = description {
                        input.description = description;
                    }
                    input
                }
            };
            let item = api
                .update(&id, &input)
                .await
                .with_context(|| format!("failed to update item {id}"))?;
            pretty(&item)
        }
        Command::Delete { id } => {
            api.delete(&id)
                .await
                .with_context(|| format!("failed to delete item {id}"))?;
            Ok(format!("deleted {id}"))
        }
        Command::Route { paths } => route(&paths),
    }
}

/// Walk the app router through `paths` as successive navigations.
pub fn route(paths: &[String]) -> Result<String> {
    let mut router = app_router(AppView::List, AppView::Create, AppView::Edit, || {
        info!("about view loaded");
        AppView::About
    });

    let mut lines = Vec::with_capacity(paths.len());
    for path in paths {
        let resolved = router
            .navigate(path)
            .with_context(|| format!("failed to resolve {path}"))?;
        lines.push(describe(path, &resolved));
    }
    Ok(lines.join("\n"))
}

fn describe(input: &str, resolved: &Resolved<'_, AppView>) -> String {
    let mut line = format!("{input} -> {}", resolved.view.as_str());
    if !resolved.params.is_empty() {
        let params: Vec<String> = resolved
            .params
            .iter()
            .map(|(k, v)| format!("{k}={v}"))
            .collect();
        line.push_str(&format!(" [{}]", params.join(", ")));
    }
    if resolved.redirected_from.is_some() {
        line.push_str(&format!(" (redirected to {})", resolved.path));
    }
    line
}

fn pretty<T: Serialize>(value: &T) -> Result<String> {
    serde_json::to_string_pretty(value).context("failed to render response")
}
