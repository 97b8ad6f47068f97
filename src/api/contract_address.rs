use super::wire::{ContractAddressInfo, ContractAddressRequest, ContractAddressResponse};
use super::{json_error, AppState};
use crate::error::{ExhaustedError, LooperError, ValidationError};
use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;

const ESTIMATED_GAS: &str = "0.002";

pub(crate) async fn assign(
    State(state): State<AppState>,
    body: Result<Json<ContractAddressRequest>, JsonRejection>,
) -> Response {
    let request = match body {
        Ok(Json(request)) => request,
        Err(rejection) => {
            tracing::warn!("[API] contract-address body rejected: {}", rejection.body_text());
            return json_error(
                StatusCode::INTERNAL_SERVER_ERROR,
                "Failed to generate contract address",
            );
        }
    };

    let user_address = request.user_address.unwrap_or_default();
    let leverage = request.leverage.unwrap_or(0.0);
    let amount = request.amount.unwrap_or_default();

    match state.pool.assign(&user_address, leverage, &amount) {
        Ok(assignment) => {
            if !state.allocator_latency.is_zero() {
                tokio::time::sleep(state.allocator_latency).await;
            }
            Json(ContractAddressResponse {
                success: true,
                contract_address: assignment.contract_address.to_checksum(None),
                message: format!(
                    "Contract assigned for {}x leverage with {} WETH",
                    leverage, amount
                ),
                user_address,
                leverage,
                amount,
                estimated_gas: ESTIMATED_GAS.to_string(),
                network: state.network.clone(),
                remaining_addresses: assignment.remaining,
            })
            .into_response()
        }
        Err(err @ LooperError::Validation(ValidationError::MissingParameters)) => {
            json_error(StatusCode::BAD_REQUEST, &err.user_message())
        }
        Err(err @ LooperError::Exhausted(ExhaustedError::PoolExhausted)) => {
            json_error(StatusCode::SERVICE_UNAVAILABLE, &err.user_message())
        }
        Err(err) => {
            tracing::error!("[API] Contract address generation error: {}", err);
            json_error(
                StatusCode::INTERNAL_SERVER_ERROR,
                "Failed to generate contract address",
            )
        }
    }
}

pub(crate) async fn info(State(state): State<AppState>) -> Json<ContractAddressInfo> {
    Json(ContractAddressInfo {
        message: "ReactiveLooper Contract Address API".to_string(),
        usage: r#"POST with { "userAddress": "0x...", "leverage": 2.5, "amount": "0.1" }"#
            .to_string(),
        available_addresses: state.pool.available(),
    })
}
