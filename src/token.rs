use crate::chain::{TxOutcome, WalletSigner};
use crate::error::{LooperError, Result, ValidationError};
use alloy::primitives::utils::{format_ether, parse_ether};
use alloy::primitives::{Address, Bytes, U256};
use alloy::sol_types::SolCall;

alloy::sol! {
    interface IERC20 {
        function transfer(address to, uint256 amount) external returns (bool);
        function balanceOf(address account) external view returns (uint256 balance);
        function allowance(address owner, address spender) external view returns (uint256 remaining);
        function approve(address spender, uint256 amount) external returns (bool);
    }

    interface IReactiveVault {
        function deposit(uint256 amount) external payable;
        function withdraw(uint256 amount) external;
    }
}

/// Parses a decimal amount with 18 decimals. Zero, negative and malformed
/// inputs are rejected.
pub fn parse_token_amount(raw: &str) -> std::result::Result<U256, ValidationError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() || trimmed.starts_with('-') {
        return Err(ValidationError::InvalidAmount(raw.to_string()));
    }
    let wei = parse_ether(trimmed).map_err(|_| ValidationError::InvalidAmount(raw.to_string()))?;
    if wei.is_zero() {
        return Err(ValidationError::InvalidAmount(raw.to_string()));
    }
    Ok(wei)
}

/// Formats wei as a short decimal string (`500000000000000` -> `0.0005`).
pub fn format_token_amount(wei: U256) -> String {
    let mut out = format_ether(wei);
    if out.contains('.') {
        let trimmed_len = out.trim_end_matches('0').len();
        out.truncate(trimmed_len);
        if out.ends_with('.') {
            out.push('0');
        }
    }
    out
}

/// An ERC-20 token bound to the signer that operates on it.
pub struct Erc20<'a> {
    token: Address,
    signer: &'a dyn WalletSigner,
}

impl<'a> Erc20<'a> {
    pub fn new(token: Address, signer: &'a dyn WalletSigner) -> Self {
        Self { token, signer }
    }

    pub async fn balance_of(&self, account: Address) -> Result<U256> {
        let input = IERC20::balanceOfCall { account }.abi_encode();
        let raw = self.signer.call(self.token, Bytes::from(input)).await?;
        let decoded = <IERC20::balanceOfCall as SolCall>::abi_decode_returns(raw.as_ref(), true)
            .map_err(|err| {
                LooperError::Unknown(format!(
                    "balanceOf decode failed for token={:#x}: {}",
                    self.token, err
                ))
            })?;
        Ok(decoded.balance)
    }

    /// Transfers `amount` to `to` and waits for the receipt. A mined but
    /// reverted transfer is a `TransactionFailed` error.
    pub async fn transfer(&self, to: Address, amount: U256) -> Result<TxOutcome> {
        let input = IERC20::transferCall { to, amount }.abi_encode();
        let outcome = self
            .signer
            .send(self.token, Bytes::from(input), U256::ZERO)
            .await?;
        if !outcome.success {
            return Err(LooperError::TransactionFailed(format!(
                "transfer receipt {:#x} reported failure",
                outcome.tx_hash
            )));
        }
        Ok(outcome)
    }
}
