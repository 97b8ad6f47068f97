use super::AllocatorClient;
use crate::chain::WalletSigner;
use crate::error::{ExhaustedError, LooperError, ProviderError, Result, ValidationError};
use crate::token::{format_token_amount, parse_token_amount, Erc20};
use crate::utils::hex::parse_address;
use alloy::primitives::Address;
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use std::sync::Arc;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransferResult {
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tx_hash: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub contract_address: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub amount: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl TransferResult {
    pub fn failure(error: impl Into<String>) -> Self {
        Self {
            success: false,
            error: Some(error.into()),
            ..Self::default()
        }
    }
}

/// Two-phase launch: obtain a looper contract from the allocator, then move
/// the user's WETH into it from the connected wallet.
///
/// Phases run strictly in order with no retry and no compensation. An
/// address assigned in phase one stays consumed even if the transfer fails.
pub struct Orchestrator {
    allocator: Arc<dyn AllocatorClient>,
    weth: Address,
}

impl Orchestrator {
    pub fn new(allocator: Arc<dyn AllocatorClient>, weth: Address) -> Self {
        Self { allocator, weth }
    }

    pub async fn launch(
        &self,
        signer: &dyn WalletSigner,
        user_address: &str,
        leverage: f64,
        amount: &str,
    ) -> TransferResult {
        match self.try_launch(signer, user_address, leverage, amount).await {
            Ok(result) => result,
            Err(err) => {
                tracing::warn!("[LAUNCH] ReactiveLooper launch failed: {}", err);
                TransferResult::failure(err.user_message())
            }
        }
    }

    pub async fn try_launch(
        &self,
        signer: &dyn WalletSigner,
        user_address: &str,
        leverage: f64,
        amount: &str,
    ) -> Result<TransferResult> {
        let user = parse_address(user_address)
            .ok_or_else(|| ValidationError::InvalidAddress(user_address.to_string()))?;
        if !leverage.is_finite() || leverage <= 0.0 {
            return Err(ValidationError::InvalidLeverage(leverage.to_string()).into());
        }
        let amount_wei = parse_token_amount(amount)?;

        tracing::info!("[LAUNCH] Requesting contract address for {:#x}", user);
        let assignment = self.allocator.assign(user_address, leverage, amount).await?;
        if !assignment.success || assignment.contract_address.is_empty() {
            return Err(LooperError::Unknown(
                "Failed to get contract address".to_string(),
            ));
        }
        let contract = Address::from_str(&assignment.contract_address).map_err(|_| {
            LooperError::Unknown(format!(
                "allocator returned malformed address `{}`",
                assignment.contract_address
            ))
        })?;

        // Address equality is case-insensitive by construction.
        let signer_address = signer.address().await?;
        if signer_address != user {
            tracing::warn!(
                "[LAUNCH] Signer {:#x} does not match requested user {:#x}",
                signer_address,
                user
            );
            return Err(ProviderError::AddressMismatch.into());
        }

        let weth = Erc20::new(self.weth, signer);
        let balance = weth.balance_of(user).await?;
        if balance < amount_wei {
            return Err(ExhaustedError::InsufficientBalance {
                have: format_token_amount(balance),
                need: amount.trim().to_string(),
            }
            .into());
        }

        tracing::info!(
            "[LAUNCH] Transferring {} WETH to contract {:#x}",
            amount.trim(),
            contract
        );
        let outcome = weth.transfer(contract, amount_wei).await?;
        tracing::info!("[LAUNCH] Transfer confirmed in {:#x}", outcome.tx_hash);

        Ok(TransferResult {
            success: true,
            tx_hash: Some(format!("{:#x}", outcome.tx_hash)),
            contract_address: Some(assignment.contract_address),
            amount: Some(amount.trim().to_string()),
            error: None,
        })
    }
}
