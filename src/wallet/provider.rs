use crate::chain::{classify_provider_error, AlloySigner, WalletSigner};
use crate::error::{LooperError, Result};
use alloy::primitives::Address;
use alloy::providers::{Provider, ProviderBuilder};
use alloy::signers::local::PrivateKeySigner;
use alloy::transports::TransportError;
use async_trait::async_trait;
use std::sync::Arc;

const METHOD_NOT_FOUND: i64 = -32601;

/// The wallet a page talks to: account access requests, the current account
/// set, and a signer for a granted account.
#[async_trait]
pub trait InjectedProvider: Send + Sync {
    /// `eth_requestAccounts`: asks the wallet for access.
    async fn request_accounts(&self) -> Result<Vec<Address>>;

    /// `eth_accounts`: accounts already granted, without prompting.
    async fn accounts(&self) -> Result<Vec<Address>>;

    fn signer(&self, account: Address) -> Arc<dyn WalletSigner>;
}

fn rpc_error(err: &TransportError) -> LooperError {
    match err.as_error_resp() {
        Some(payload) => classify_provider_error(Some(payload.code), &payload.message.to_string()),
        None => classify_provider_error(None, &err.to_string()),
    }
}

/// Accounts held by a JSON-RPC node or wallet bridge.
#[derive(Debug, Clone)]
pub struct NodeWalletProvider {
    rpc_url: reqwest::Url,
}

impl NodeWalletProvider {
    pub fn new(rpc_url: reqwest::Url) -> Self {
        Self { rpc_url }
    }
}

#[async_trait]
impl InjectedProvider for NodeWalletProvider {
    async fn request_accounts(&self) -> Result<Vec<Address>> {
        let provider = ProviderBuilder::new().on_http(self.rpc_url.clone());
        let requested: std::result::Result<Vec<Address>, TransportError> = provider
            .raw_request("eth_requestAccounts".into(), Vec::<serde_json::Value>::new())
            .await;
        match requested {
            Ok(accounts) => Ok(accounts),
            // Plain nodes do not implement the wallet method; their accounts are pre-granted.
            Err(err)
                if err
                    .as_error_resp()
                    .is_some_and(|payload| payload.code == METHOD_NOT_FOUND) =>
            {
                self.accounts().await
            }
            Err(err) => Err(rpc_error(&err)),
        }
    }

    async fn accounts(&self) -> Result<Vec<Address>> {
        let provider = ProviderBuilder::new().on_http(self.rpc_url.clone());
        provider.get_accounts().await.map_err(|err| rpc_error(&err))
    }

    fn signer(&self, account: Address) -> Arc<dyn WalletSigner> {
        Arc::new(AlloySigner::node_account(self.rpc_url.clone(), account))
    }
}

/// A single local key acting as the wallet. Access is always granted.
#[derive(Debug, Clone)]
pub struct LocalKeyProvider {
    rpc_url: reqwest::Url,
    key: PrivateKeySigner,
}

impl LocalKeyProvider {
    pub fn new(rpc_url: reqwest::Url, key: PrivateKeySigner) -> Self {
        Self { rpc_url, key }
    }
}

#[async_trait]
impl InjectedProvider for LocalKeyProvider {
    async fn request_accounts(&self) -> Result<Vec<Address>> {
        Ok(vec![self.key.address()])
    }

    async fn accounts(&self) -> Result<Vec<Address>> {
        Ok(vec![self.key.address()])
    }

    fn signer(&self, account: Address) -> Arc<dyn WalletSigner> {
        if account != self.key.address() {
            tracing::warn!(
                "[WALLET] Signer requested for {:#x} but local key controls {:#x}",
                account,
                self.key.address()
            );
        }
        Arc::new(AlloySigner::with_key(self.rpc_url.clone(), self.key.clone()))
    }
}
