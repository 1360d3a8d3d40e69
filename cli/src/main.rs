use anyhow::Result;
use clap::Parser;
use items_cli::{commands, Args, ReqwestTransport};
use items_core::{config, ApiConfig, ItemsApi, ItemsClient};

#[tokio::main]
async fn main() -> Result<()> {
    items_cli::logging::init();

    let args = Args::parse();

    let config = match args.base_url {
        Some(url) => ApiConfig::new(url),
        None => config::config().clone(),
    };
    let api = ItemsApi::new(ItemsClient::new(&config.base_url), ReqwestTransport::default());

    let output = commands::run(args.command, &api).await?;
    println!("{output}");
    Ok(())
}
