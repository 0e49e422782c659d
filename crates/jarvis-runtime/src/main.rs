//! # Jarvis
//!
//! WeCom callback endpoint with a small todo secretary behind it.
//!
//! Configuration comes from the environment; see [`jarvis_runtime::config`].

use anyhow::{Context, Result};
use jarvis_runtime::{init_logging, mask_corp_id, JarvisConfig, JarvisRuntime};
use tracing::{info, warn};

#[tokio::main]
async fn main() -> Result<()> {
    let config = JarvisConfig::from_env().context("Failed to read configuration")?;

    init_logging(&config.logging).context("Failed to initialize logging")?;

    info!("===========================================");
    info!("  Jarvis v{}", env!("CARGO_PKG_VERSION"));
    info!("===========================================");
    info!("  Listen:   {}", config.gateway.http_addr());
    info!("  Callback: {}", config.gateway.callback.path);
    info!("  Corp ID:  {}", mask_corp_id(&config.secrets.corp_id));
    info!("===========================================");

    let runtime = JarvisRuntime::new(config).context("Failed to assemble runtime")?;
    let mut server = runtime.into_server();
    let mut shutdown = server.shutdown_handle();

    let mut serving = tokio::spawn(server.run());

    info!("Jarvis is running. Press Ctrl+C to stop.");
    tokio::select! {
        // server exited on its own (bind failure, I/O error)
        result = &mut serving => {
            result
                .context("Server task panicked")?
                .context("Server stopped with an error")?;
            return Ok(());
        }
        signal = tokio::signal::ctrl_c() => {
            signal.context("Failed to listen for Ctrl+C")?;
        }
    }

    warn!("Shutdown requested");
    shutdown.shutdown();

    serving
        .await
        .context("Server task panicked")?
        .context("Server stopped with an error")?;

    info!("Goodbye");
    Ok(())
}
