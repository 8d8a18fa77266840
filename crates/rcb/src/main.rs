use std::sync::Arc;

use rcb_core::config::Config;

#[tokio::main]
async fn main() -> Result<(), rcb_core::Error> {
    rcb_core::logging::init("rcb")?;

    let cfg = Arc::new(Config::load()?);
    tracing::debug!(?cfg, "configuration loaded");

    rcb_telegram::router::run_polling(cfg)
        .await
        .map_err(|e| rcb_core::Error::External(format!("telegram bot failed: {e}")))?;

    Ok(())
}
