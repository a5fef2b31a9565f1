// Meetbook relay: static front-end plus /api reverse proxy

use anyhow::Context;
use log::{error, info};
use tokio_util::sync::CancellationToken;

use meetbook::config::{self, RelayConfig};
use meetbook::relay;
use meetbook::utils::logging;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    logging::init_logging().context("Failed to initialize logging")?;

    let config = RelayConfig::from_env().context("Failed to load relay configuration")?;
    config::validate_config(&config)?;

    let shutdown = CancellationToken::new();
    let signal_token = shutdown.clone();
    tokio::spawn(async move {
        match tokio::signal::ctrl_c().await {
            Ok(()) => {
                info!("Received shutdown signal");
                signal_token.cancel();
            }
            Err(e) => error!("Failed to listen for shutdown signal: {}", e),
        }
    });

    if let Err(e) = relay::serve(config, shutdown).await {
        let e = anyhow::Error::from(e);
        logging::log_error_with_context(&e, "relay");
        return Err(e);
    }
    Ok(())
}
