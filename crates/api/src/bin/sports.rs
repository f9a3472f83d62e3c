use std::sync::Arc;

use anyhow::Context;

use ledgerdesk_api::{app, config::SportsServiceConfig, server};
use ledgerdesk_sports::SportsClient;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    ledgerdesk_observability::init();

    let config = SportsServiceConfig::from_env().context("invalid sports configuration")?;
    tracing::info!(upstream = %config.upstream.base_url, "sports proxy configured");

    let client = Arc::new(SportsClient::new(config.upstream));
    let app = app::build_sports_app(client);
    server::serve(config.bind_addr, app, "sports")
        .await
        .with_context(|| format!("sports server failed on {}", config.bind_addr))?;
    Ok(())
}
