use tracing_subscriber::{fmt, EnvFilter};

use crate::{Error, Result};

/// Initialize tracing for the bot.
///
/// Default: info for our crates and everything else. Can be overridden with
/// `RUST_LOG`.
pub fn init(service_name: &str) -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(format!(
            "info,rcb_core=info,rcb_telegram=info,{service_name}=info"
        ))
    });

    fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_ansi(true)
        .try_init()
        .map_err(|e| Error::External(format!("failed to install tracing subscriber: {e}")))
}
