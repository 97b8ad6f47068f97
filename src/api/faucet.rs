use super::wire::{FaucetInfo, FaucetRequest, FaucetResponse};
use super::{json_error, AppState};
use crate::error::{ExhaustedError, LooperError, ProviderError, ValidationError};
use crate::faucet::{FAUCET_AMOUNT, FAUCET_TOKEN_SYMBOL};
use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;

const GENERIC_FAILURE: &str = "Failed to send WETH. Please try again later.";

/// Status and body text for a failed disbursement.
pub(crate) fn faucet_failure(err: &LooperError) -> (StatusCode, String) {
    match err {
        LooperError::Validation(ValidationError::InvalidAddress(_))
        | LooperError::Validation(ValidationError::UnsupportedNetwork(_)) => {
            (StatusCode::BAD_REQUEST, err.user_message())
        }
        LooperError::NotConfigured(_)
        | LooperError::Exhausted(ExhaustedError::InsufficientFaucetBalance) => {
            (StatusCode::INTERNAL_SERVER_ERROR, err.user_message())
        }
        LooperError::Provider(ProviderError::InsufficientGas) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            "Faucet has insufficient ETH for gas fees".to_string(),
        ),
        LooperError::Provider(ProviderError::Congestion(_))
        | LooperError::Provider(ProviderError::RateLimited) => {
            (StatusCode::TOO_MANY_REQUESTS, err.user_message())
        }
        _ => (StatusCode::INTERNAL_SERVER_ERROR, GENERIC_FAILURE.to_string()),
    }
}

pub(crate) async fn request(
    State(state): State<AppState>,
    body: Result<Json<FaucetRequest>, JsonRejection>,
) -> Response {
    let address = match body {
        Ok(Json(request)) => request.address.unwrap_or_default(),
        Err(rejection) => {
            tracing::warn!("[API] faucet body rejected: {}", rejection.body_text());
            return json_error(StatusCode::INTERNAL_SERVER_ERROR, GENERIC_FAILURE);
        }
    };

    match state.faucet.disburse(&address).await {
        Ok(disbursement) => Json(FaucetResponse {
            success: true,
            tx_hash: format!("{:#x}", disbursement.tx_hash),
            amount: disbursement.amount,
            token: FAUCET_TOKEN_SYMBOL.to_string(),
            recipient: address,
            message: "WETH sent successfully!".to_string(),
        })
        .into_response(),
        Err(err) => {
            tracing::error!("[API] Faucet error for `{}`: {}", address, err);
            let (status, message) = faucet_failure(&err);
            json_error(status, &message)
        }
    }
}

pub(crate) async fn info(State(state): State<AppState>) -> Json<FaucetInfo> {
    let window_secs = state.faucet.rate_limit_window().as_secs();
    let rate_limit = if window_secs == 0 {
        "disabled".to_string()
    } else if window_secs == 3600 {
        "1 request per hour per address".to_string()
    } else {
        format!("1 request per {window_secs}s per address")
    };
    Json(FaucetInfo {
        message: "WETH Faucet API".to_string(),
        usage: format!(
            r#"POST with {{ "address": "0x..." }} to receive {FAUCET_AMOUNT} {FAUCET_TOKEN_SYMBOL}"#
        ),
        rate_limit,
    })
}
