//! WETH faucet: validates the recipient, enforces the per-address window and
//! sends a fixed amount from the configured faucet key.

pub mod rate_limit;

use crate::chain::{AlloySigner, WalletSigner};
use crate::error::{ExhaustedError, LooperError, ProviderError, Result, ValidationError};
use crate::token::{parse_token_amount, Erc20};
use crate::utils::config::ServerConfig;
use crate::utils::hex::parse_address;
use alloy::primitives::{Address, B256, U256};
use std::sync::Arc;
use std::time::{Duration, Instant};

pub use rate_limit::RateLimiter;

pub const FAUCET_AMOUNT: &str = "0.0001";
pub const FAUCET_TOKEN_SYMBOL: &str = "WETH";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Disbursement {
    pub tx_hash: B256,
    pub recipient: Address,
    pub amount: String,
}

pub struct FaucetService {
    signer: Option<Arc<dyn WalletSigner>>,
    token: Option<Address>,
    network: String,
    amount: U256,
    limiter: RateLimiter,
}

impl FaucetService {
    pub fn new(
        signer: Option<Arc<dyn WalletSigner>>,
        token: Option<Address>,
        network: impl Into<String>,
        rate_limit_window: Duration,
    ) -> Self {
        let amount = parse_token_amount(FAUCET_AMOUNT).unwrap_or(U256::ZERO);
        Self {
            signer,
            token,
            network: network.into(),
            amount,
            limiter: RateLimiter::new(rate_limit_window),
        }
    }

    pub fn from_config(config: &ServerConfig) -> Self {
        let signer = config.faucet_signer.clone().map(|key| {
            Arc::new(AlloySigner::with_key(config.rpc_url.clone(), key)) as Arc<dyn WalletSigner>
        });
        Self::new(
            signer,
            config.network.weth,
            config.network.name.clone(),
            config.faucet_rate_limit,
        )
    }

    pub fn is_configured(&self) -> bool {
        self.signer.is_some()
    }

    pub fn rate_limit_window(&self) -> Duration {
        self.limiter.window()
    }

    /// Sends [`FAUCET_AMOUNT`] WETH to `recipient_raw`.
    ///
    /// Checks run in a fixed order and each one fails before any chain
    /// access that follows it: address format, faucet key, network token,
    /// rate limit, faucet balance. The rate-limit slot is reserved before the
    /// first chain call and kept only after a successful receipt.
    pub async fn disburse(&self, recipient_raw: &str) -> Result<Disbursement> {
        let recipient = parse_address(recipient_raw)
            .ok_or_else(|| ValidationError::InvalidAddress(recipient_raw.to_string()))?;

        let Some(signer) = self.signer.as_deref() else {
            return Err(LooperError::NotConfigured("Faucet not configured".to_string()));
        };
        let Some(token) = self.token else {
            return Err(ValidationError::UnsupportedNetwork(self.network.clone()).into());
        };

        let reservation = match self.limiter.reserve(recipient, Instant::now()) {
            Ok(reservation) => reservation,
            Err(wait) => {
                tracing::info!(
                    "[FAUCET] Refusing {:#x}: rate limited for another {}s",
                    recipient,
                    wait.as_secs()
                );
                return Err(ProviderError::RateLimited.into());
            }
        };

        let weth = Erc20::new(token, signer);
        let faucet_address = signer.address().await?;
        let balance = weth.balance_of(faucet_address).await?;
        if balance < self.amount {
            tracing::warn!(
                "[FAUCET] Faucet {:#x} holds {} wei, below disbursement {}",
                faucet_address,
                balance,
                self.amount
            );
            return Err(ExhaustedError::InsufficientFaucetBalance.into());
        }

        let outcome = weth.transfer(recipient, self.amount).await?;
        reservation.confirm(Instant::now());
        tracing::info!(
            "[FAUCET] Sent {} {} to {:#x} in {:#x}",
            FAUCET_AMOUNT,
            FAUCET_TOKEN_SYMBOL,
            recipient,
            outcome.tx_hash
        );

        Ok(Disbursement {
            tx_hash: outcome.tx_hash,
            recipient,
            amount: FAUCET_AMOUNT.to_string(),
        })
    }
}
