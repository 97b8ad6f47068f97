//! Signing boundary between this crate and an EVM node or wallet.
//!
//! Everything that reads chain state or submits a transaction goes through
//! [`WalletSigner`], so the faucet, the orchestrator and the vault page can be
//! driven by an alloy-backed signer in production and by recording fakes in
//! tests.

pub mod signer;

use crate::error::{LooperError, ProviderError, Result};
use crate::utils::error::compact_error_message;
use alloy::primitives::{Address, Bytes, B256, U256};
use async_trait::async_trait;

pub use signer::AlloySigner;

const PROVIDER_ERROR_MAX_LEN: usize = 240;

/// EIP-1193 "user rejected request".
pub const EIP1193_USER_REJECTED: i64 = 4001;

/// Result of a mined transaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TxOutcome {
    pub tx_hash: B256,
    pub success: bool,
}

#[async_trait]
pub trait WalletSigner: Send + Sync {
    /// Address the signer authorizes transactions for.
    async fn address(&self) -> Result<Address>;

    /// Read-only `eth_call`.
    async fn call(&self, to: Address, input: Bytes) -> Result<Bytes>;

    /// Submits a transaction and waits for one confirmation.
    ///
    /// There is no timeout: the future resolves only when the provider
    /// returns a receipt or an error.
    async fn send(&self, to: Address, input: Bytes, value: U256) -> Result<TxOutcome>;
}

/// Maps a JSON-RPC error (code and message) onto the provider taxonomy.
pub fn classify_provider_error(code: Option<i64>, message: &str) -> LooperError {
    let lower = message.to_ascii_lowercase();
    if code == Some(EIP1193_USER_REJECTED)
        || lower.contains("user rejected")
        || lower.contains("user denied")
        || lower.contains("action_rejected")
    {
        return ProviderError::UserRejected.into();
    }
    if lower.contains("insufficient funds") {
        return ProviderError::InsufficientGas.into();
    }
    if lower.contains("nonce too low")
        || lower.contains("nonce expired")
        || lower.contains("nonce_expired")
        || lower.contains("replacement transaction underpriced")
        || lower.contains("replacement_underpriced")
    {
        return ProviderError::Congestion(compact_error_message(message, PROVIDER_ERROR_MAX_LEN))
            .into();
    }
    ProviderError::Rpc(compact_error_message(message, PROVIDER_ERROR_MAX_LEN)).into()
}
