//! Mock backend for the ReactiveLooper frontend: contract-address allocation
//! and the WETH test faucet over HTTP.

use reactive_looper::api::{self, AppState};
use reactive_looper::runtime::{init_tracing, parse_runtime_args};
use reactive_looper::utils::config::ServerConfig;
use tokio::net::TcpListener;

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::error!("[API] Failed to listen for Ctrl-C: {}", err);
        std::future::pending::<()>().await;
    }
    tracing::info!("[API] Shutdown requested; draining connections.");
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let runtime_args = parse_runtime_args()?;

    // Validate environment files and load defaults before reading config.
    reactive_looper::utils::env_guard::harden_env_setup();
    init_tracing();

    let config = ServerConfig::load()?;
    tracing::info!(
        "[STARTUP] network={} chain_id={} rpc={} bind={} pool={} latency_ms={} faucet_window_s={} faucet_signer={}",
        config.network.name,
        config.network.chain_id,
        config.rpc_url.host_str().unwrap_or("?"),
        config.bind_addr,
        config.contract_pool.len(),
        config.allocator_latency.as_millis(),
        config.faucet_rate_limit.as_secs(),
        config
            .faucet_signer
            .as_ref()
            .map(|signer| signer.address().to_checksum(None))
            .unwrap_or_else(|| "unset".to_string()),
    );
    if runtime_args.explain_config {
        tracing::info!("[STARTUP] LOOPER_EXPLAIN_CONFIG=true requested; exiting after config dump.");
        return Ok(());
    }
    if config.faucet_signer.is_none() {
        tracing::warn!("[FAUCET] FAUCET_PRIVATE_KEY unset; faucet requests will fail closed.");
    }

    let state = AppState::from_config(&config);
    let listener = TcpListener::bind(config.bind_addr).await?;
    api::serve(listener, state, shutdown_signal()).await?;
    tracing::info!("[API] Server stopped.");
    Ok(())
}
