//! Mock backend routes: contract-address allocation and the WETH faucet.

mod contract_address;
mod faucet;
pub mod wire;

use crate::allocator::AddressPool;
use crate::faucet::FaucetService;
use crate::utils::config::ServerConfig;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;
use tokio::net::TcpListener;
use wire::ErrorBody;

#[derive(Clone)]
pub struct AppState {
    pub pool: Arc<AddressPool>,
    pub faucet: Arc<FaucetService>,
    pub network: String,
    pub allocator_latency: Duration,
}

impl AppState {
    pub fn from_config(config: &ServerConfig) -> Self {
        Self {
            pool: Arc::new(AddressPool::new(config.contract_pool.iter().copied())),
            faucet: Arc::new(FaucetService::from_config(config)),
            network: config.network.name.clone(),
            allocator_latency: config.allocator_latency,
        }
    }
}

pub(crate) fn json_error(status: StatusCode, message: &str) -> Response {
    (
        status,
        Json(ErrorBody {
            error: message.to_string(),
        }),
    )
        .into_response()
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route(
            "/api/contract-address",
            get(contract_address::info).post(contract_address::assign),
        )
        .route("/api/faucet", get(faucet::info).post(faucet::request))
        .with_state(state)
}

/// Serves the API on `listener` until `shutdown` resolves.
pub async fn serve<F>(listener: TcpListener, state: AppState, shutdown: F) -> std::io::Result<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    if let Ok(addr) = listener.local_addr() {
        tracing::info!(
            "[API] Listening on http://{} (pool={} faucet_configured={})",
            addr,
            state.pool.available(),
            state.faucet.is_configured()
        );
    }
    axum::serve(listener, router(state))
        .with_graceful_shutdown(shutdown)
        .await
}
