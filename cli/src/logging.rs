//! Subscriber setup for the `items` binary.

use std::path::Path;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Load `.env`, then install a stderr fmt layer filtered by `RUST_LOG`.
pub fn init() {
    let filter = env_filter(None, "RUST_LOG");
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();
}

/// `.env` must be loaded before the filter reads `var`, or a level set there
/// is never seen. `None` searches the working directory and its parents.
fn env_filter(dotenv_path: Option<&Path>, var: &str) -> EnvFilter {
    match dotenv_path {
        Some(path) => {
            let _ = dotenv::from_path(path);
        }
        None => {
            let _ = dotenv::dotenv();
        }
    }
    EnvFilter::from_env(var)
}
