//! Frontend side of the backend API, plus the launch orchestration built on it.

pub mod orchestrator;

use crate::api::wire::{
    ContractAddressRequest, ContractAddressResponse, ErrorBody, FaucetRequest,
};
use crate::error::{ExhaustedError, LooperError, Result, ValidationError};
use crate::utils::error::compact_error_message;
use async_trait::async_trait;
use reqwest::StatusCode;
use serde::{Deserialize, Serialize};

pub use orchestrator::{Orchestrator, TransferResult};

const CLIENT_ERROR_MAX_LEN: usize = 200;

/// Outcome of one faucet request, as shown to the user.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FaucetResult {
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tx_hash: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub amount: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub recipient: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl FaucetResult {
    pub fn failure(error: impl Into<String>) -> Self {
        Self {
            success: false,
            error: Some(error.into()),
            ..Self::default()
        }
    }
}

#[async_trait]
pub trait AllocatorClient: Send + Sync {
    async fn assign(
        &self,
        user_address: &str,
        leverage: f64,
        amount: &str,
    ) -> Result<ContractAddressResponse>;
}

#[async_trait]
pub trait FaucetClient: Send + Sync {
    /// Never fails: transport and server errors come back as
    /// `success: false` with a message.
    async fn request_weth(&self, address: &str) -> FaucetResult;
}

#[derive(Debug, Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: reqwest::Url,
}

impl ApiClient {
    /// `base_url` may carry a path prefix; routes resolve beneath it.
    pub fn new(mut base_url: reqwest::Url) -> Self {
        if !base_url.path().ends_with('/') {
            let prefixed = format!("{}/", base_url.path());
            base_url.set_path(&prefixed);
        }
        Self {
            http: reqwest::Client::new(),
            base_url,
        }
    }

    fn endpoint(&self, path: &str) -> Result<reqwest::Url> {
        self.base_url
            .join(path)
            .map_err(|e| LooperError::InvalidConfig(format!("bad API path `{path}`: {e}")))
    }

    async fn error_text(response: reqwest::Response, fallback: &str) -> String {
        match response.json::<ErrorBody>().await {
            Ok(body) if !body.error.is_empty() => body.error,
            _ => fallback.to_string(),
        }
    }
}

#[async_trait]
impl AllocatorClient for ApiClient {
    async fn assign(
        &self,
        user_address: &str,
        leverage: f64,
        amount: &str,
    ) -> Result<ContractAddressResponse> {
        let url = self.endpoint("api/contract-address")?;
        let body = ContractAddressRequest {
            user_address: Some(user_address.to_string()),
            leverage: Some(leverage),
            amount: Some(amount.to_string()),
        };
        let response = self
            .http
            .post(url)
            .json(&body)
            .send()
            .await
            .map_err(|e| {
                LooperError::Unknown(compact_error_message(&e.to_string(), CLIENT_ERROR_MAX_LEN))
            })?;

        let status = response.status();
        if !status.is_success() {
            let text = Self::error_text(response, "Failed to get contract address").await;
            tracing::warn!("[API] contract-address returned {}: {}", status, text);
            return Err(match status {
                StatusCode::BAD_REQUEST => ValidationError::MissingParameters.into(),
                StatusCode::SERVICE_UNAVAILABLE => ExhaustedError::PoolExhausted.into(),
                _ => LooperError::Unknown(text),
            });
        }

        response
            .json::<ContractAddressResponse>()
            .await
            .map_err(|e| LooperError::Unknown(format!("Failed to get contract address: {e}")))
    }
}

#[async_trait]
impl FaucetClient for ApiClient {
    async fn request_weth(&self, address: &str) -> FaucetResult {
        let url = match self.endpoint("api/faucet") {
            Ok(url) => url,
            Err(err) => return FaucetResult::failure(err.user_message()),
        };
        let body = FaucetRequest {
            address: Some(address.to_string()),
        };
        let response = match self.http.post(url).json(&body).send().await {
            Ok(response) => response,
            Err(err) => {
                tracing::warn!("[FAUCET] Faucet request failed: {}", err);
                return FaucetResult::failure(compact_error_message(
                    &err.to_string(),
                    CLIENT_ERROR_MAX_LEN,
                ));
            }
        };

        if !response.status().is_success() {
            let text = Self::error_text(response, "Failed to request WETH").await;
            tracing::warn!("[FAUCET] Faucet request refused: {}", text);
            return FaucetResult::failure(text);
        }
        match response.json::<FaucetResult>().await {
            Ok(result) => result,
            Err(err) => FaucetResult::failure(format!("Failed to request WETH: {err}")),
        }
    }
}
