use super::{header, section, CONNECT_FIRST};
use crate::chain::{TxOutcome, WalletSigner};
use crate::error::{LooperError, ProviderError, Result, ValidationError};
use crate::token::{parse_token_amount, IReactiveVault};
use crate::wallet::{SessionManager, WalletSession};
use alloy::primitives::{Address, Bytes, U256};
use alloy::sol_types::SolCall;

/// Deposits above this many ETH need an explicit confirmation.
pub const HIGH_AMOUNT_ETH: &str = "0.01";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VaultAction {
    Deposit,
    Withdraw,
}

impl VaultAction {
    fn label(self) -> &'static str {
        match self {
            Self::Deposit => "Deposit",
            Self::Withdraw => "Withdrawal",
        }
    }
}

/// Result of the pre-flight checks for a vault action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Preflight {
    Ready(U256),
    NeedsConfirmation(String),
    Rejected(String),
}

/// Vault product app page.
pub struct VaultPage {
    vault: Address,
}

impl VaultPage {
    pub fn new(vault: Address) -> Self {
        Self { vault }
    }

    pub fn preflight(
        &self,
        session: &WalletSession,
        action: VaultAction,
        amount: &str,
        confirmed: bool,
    ) -> Preflight {
        if !session.connected || session.address.is_none() {
            return Preflight::Rejected(CONNECT_FIRST.to_string());
        }
        let wei = match parse_token_amount(amount) {
            Ok(wei) => wei,
            Err(_) => return Preflight::Rejected("Please enter a valid amount!".to_string()),
        };
        let threshold = parse_token_amount(HIGH_AMOUNT_ETH).unwrap_or(U256::MAX);
        if action == VaultAction::Deposit && wei > threshold && !confirmed {
            return Preflight::NeedsConfirmation(format!(
                "You're about to use {} ETH. We recommend using smaller amounts (0.001 - 0.01 ETH). \
                 Re-run with `confirm` to continue.",
                amount.trim()
            ));
        }
        Preflight::Ready(wei)
    }

    /// Sends the vault call and waits for the receipt. Deposits carry the
    /// amount as value.
    pub async fn execute(
        &self,
        signer: &dyn WalletSigner,
        action: VaultAction,
        amount_wei: U256,
    ) -> Result<TxOutcome> {
        let (input, value) = match action {
            VaultAction::Deposit => (
                IReactiveVault::depositCall { amount: amount_wei }.abi_encode(),
                amount_wei,
            ),
            VaultAction::Withdraw => (
                IReactiveVault::withdrawCall { amount: amount_wei }.abi_encode(),
                U256::ZERO,
            ),
        };
        let outcome = signer.send(self.vault, Bytes::from(input), value).await?;
        if !outcome.success {
            return Err(LooperError::TransactionFailed(format!(
                "vault {} reverted in {:#x}",
                action.label().to_ascii_lowercase(),
                outcome.tx_hash
            )));
        }
        Ok(outcome)
    }

    /// Runs preflight and execution; returns the banner text.
    pub async fn submit(
        &self,
        wallet: &SessionManager,
        action: VaultAction,
        amount: &str,
        confirmed: bool,
    ) -> String {
        let wei = match self.preflight(&wallet.session(), action, amount, confirmed) {
            Preflight::Ready(wei) => wei,
            Preflight::NeedsConfirmation(message) | Preflight::Rejected(message) => {
                return message
            }
        };
        let Some(signer) = wallet.signer() else {
            return CONNECT_FIRST.to_string();
        };
        tracing::info!(
            "[VAULT] {} of {} to {:#x}",
            action.label(),
            amount.trim(),
            self.vault
        );
        match self.execute(signer.as_ref(), action, wei).await {
            Ok(outcome) => format!(
                "{} confirmed: {} {}\nContract: {}\nTx: {:#x}",
                action.label(),
                amount.trim(),
                match action {
                    VaultAction::Deposit => "ETH deposited",
                    VaultAction::Withdraw => "vault tokens withdrawn",
                },
                self.vault.to_checksum(None),
                outcome.tx_hash
            ),
            Err(err) => {
                tracing::warn!("[VAULT] {} error: {}", action.label(), err);
                format!("{} Failed: {}", action.label(), describe_vault_error(action, &err))
            }
        }
    }

    pub fn render(&self, session: &WalletSession, banner: Option<&str>) -> String {
        let mut out = header("ReactiveVault", Some("home"), session);
        out.push_str(&section(
            "Interact with vault",
            "Deposit and withdraw to interact with pool.\n\
             Deposit ETH to receive vault tokens that represent your share in the \
             yield-optimized pool.\n\n\
             Usage: deposit <amount ETH> [confirm] | withdraw <amount>",
        ));
        out.push_str(&format!("\n  Vault: {}\n", self.vault.to_checksum(None)));
        if let Some(text) = banner {
            out.push_str(&format!("\n  {text}\n"));
        }
        out
    }
}

/// Maps a vault failure onto the page's wording.
pub fn describe_vault_error(action: VaultAction, err: &LooperError) -> String {
    match err {
        LooperError::Provider(ProviderError::UserRejected) => {
            "Transaction was rejected by user".to_string()
        }
        LooperError::Provider(ProviderError::InsufficientGas) => match action {
            VaultAction::Deposit => "Insufficient ETH balance".to_string(),
            VaultAction::Withdraw => "Insufficient vault token balance".to_string(),
        },
        LooperError::Validation(ValidationError::InvalidAmount(_)) => err.user_message(),
        other => {
            let message = other.user_message();
            let lower = message.to_ascii_lowercase();
            if lower.contains("insufficient") {
                match action {
                    VaultAction::Deposit => "Insufficient ETH balance".to_string(),
                    VaultAction::Withdraw => "Insufficient vault token balance".to_string(),
                }
            } else if lower.contains("gas") {
                match action {
                    VaultAction::Deposit => {
                        "Gas estimation failed - check your ETH balance".to_string()
                    }
                    VaultAction::Withdraw => "Gas estimation failed".to_string(),
                }
            } else if message.is_empty() {
                "Unknown error occurred".to_string()
            } else {
                message
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn connected() -> WalletSession {
        WalletSession {
            address: Some(Address::repeat_byte(3)),
            connected: true,
        }
    }

    fn page() -> VaultPage {
        VaultPage::new(Address::repeat_byte(0x60))
    }

    #[test]
    fn preflight_requires_connection_and_valid_amount() {
        assert_eq!(
            page().preflight(&WalletSession::default(), VaultAction::Deposit, "0.001", false),
            Preflight::Rejected(CONNECT_FIRST.to_string())
        );
        assert_eq!(
            page().preflight(&connected(), VaultAction::Withdraw, "0", false),
            Preflight::Rejected("Please enter a valid amount!".to_string())
        );
    }

    #[test]
    fn large_deposits_need_confirmation_but_withdrawals_do_not() {
        assert!(matches!(
            page().preflight(&connected(), VaultAction::Deposit, "0.02", false),
            Preflight::NeedsConfirmation(_)
        ));
        assert!(matches!(
            page().preflight(&connected(), VaultAction::Deposit, "0.02", true),
            Preflight::Ready(_)
        ));
        assert!(matches!(
            page().preflight(&connected(), VaultAction::Withdraw, "0.02", false),
            Preflight::Ready(_)
        ));
        assert!(matches!(
            page().preflight(&connected(), VaultAction::Deposit, "0.01", false),
            Preflight::Ready(_)
        ));
    }

    #[test]
    fn errors_map_to_page_wording() {
        assert_eq!(
            describe_vault_error(VaultAction::Deposit, &ProviderError::UserRejected.into()),
            "Transaction was rejected by user"
        );
        assert_eq!(
            describe_vault_error(VaultAction::Withdraw, &ProviderError::InsufficientGas.into()),
            "Insufficient vault token balance"
        );
        assert_eq!(
            describe_vault_error(
                VaultAction::Deposit,
                &ProviderError::Rpc("gas required exceeds allowance".into()).into()
            ),
            "Gas estimation failed - check your ETH balance"
        );
        assert_eq!(
            describe_vault_error(
                VaultAction::Deposit,
                &ProviderError::Rpc("execution reverted".into()).into()
            ),
            "execution reverted"
        );
    }
}
