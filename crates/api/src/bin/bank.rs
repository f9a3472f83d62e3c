use std::sync::Arc;

use anyhow::Context;

use ledgerdesk_api::{app, config::BankConfig, server};
use ledgerdesk_ledger::{JsonFileSink, LedgerSink, LedgerStore};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    ledgerdesk_observability::init();

    let config = BankConfig::from_env().context("invalid bank configuration")?;

    let sink: Arc<dyn LedgerSink> = Arc::new(JsonFileSink::new(&config.users_db_file));
    let ledger = Arc::new(LedgerStore::open(sink).with_context(|| {
        format!("failed to open ledger at {}", config.users_db_file.display())
    })?);
    tracing::info!(path = %config.users_db_file.display(), "ledger ready");

    let app = app::build_bank_app(ledger.clone(), &config.allowed_origins);
    server::serve(config.bind_addr, app, "bank")
        .await
        .with_context(|| format!("bank server failed on {}", config.bind_addr))?;

    ledger.flush().context("failed to flush ledger on shutdown")?;
    Ok(())
}
