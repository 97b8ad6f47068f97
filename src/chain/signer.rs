use super::{classify_provider_error, TxOutcome, WalletSigner};
use crate::error::{LooperError, Result};
use alloy::network::{EthereumWallet, TransactionBuilder};
use alloy::primitives::{Address, Bytes, U256};
use alloy::providers::{Provider, ProviderBuilder};
use alloy::rpc::types::{TransactionReceipt, TransactionRequest};
use alloy::signers::local::PrivateKeySigner;
use alloy::transports::TransportError;
use async_trait::async_trait;

fn transport_error(err: TransportError) -> LooperError {
    match err.as_error_resp() {
        Some(payload) => classify_provider_error(Some(payload.code), &payload.message.to_string()),
        None => classify_provider_error(None, &err.to_string()),
    }
}

/// Signer backed by an alloy HTTP provider.
///
/// With a local key the wallet filler signs and fills nonce/gas; without one
/// the node is asked to sign for `from` via `eth_sendTransaction`, which is how
/// unlocked dev-node accounts and wallet bridges behave.
#[derive(Clone)]
pub struct AlloySigner {
    rpc_url: reqwest::Url,
    from: Address,
    wallet: Option<EthereumWallet>,
}

impl std::fmt::Debug for AlloySigner {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AlloySigner")
            .field("rpc_url", &self.rpc_url.as_str())
            .field("from", &self.from)
            .field("local_key", &self.wallet.is_some())
            .finish()
    }
}

impl AlloySigner {
    pub fn with_key(rpc_url: reqwest::Url, key: PrivateKeySigner) -> Self {
        let from = key.address();
        Self {
            rpc_url,
            from,
            wallet: Some(EthereumWallet::from(key)),
        }
    }

    pub fn node_account(rpc_url: reqwest::Url, from: Address) -> Self {
        Self {
            rpc_url,
            from,
            wallet: None,
        }
    }

    fn outcome(receipt: TransactionReceipt) -> TxOutcome {
        TxOutcome {
            tx_hash: receipt.transaction_hash,
            success: receipt.status(),
        }
    }
}

#[async_trait]
impl WalletSigner for AlloySigner {
    async fn address(&self) -> Result<Address> {
        Ok(self.from)
    }

    async fn call(&self, to: Address, input: Bytes) -> Result<Bytes> {
        let provider = ProviderBuilder::new().on_http(self.rpc_url.clone());
        let request = TransactionRequest::default()
            .with_from(self.from)
            .with_to(to)
            .with_input(input);
        provider.call(&request).await.map_err(transport_error)
    }

    async fn send(&self, to: Address, input: Bytes, value: U256) -> Result<TxOutcome> {
        let request = TransactionRequest::default()
            .with_from(self.from)
            .with_to(to)
            .with_input(input)
            .with_value(value);

        let receipt = match &self.wallet {
            Some(wallet) => {
                let provider = ProviderBuilder::new()
                    .with_recommended_fillers()
                    .wallet(wallet.clone())
                    .on_http(self.rpc_url.clone());
                let pending = provider
                    .send_transaction(request)
                    .await
                    .map_err(transport_error)?;
                tracing::info!("[CHAIN] Submitted {:#x} from {:#x}", pending.tx_hash(), self.from);
                pending.get_receipt().await
            }
            None => {
                let provider = ProviderBuilder::new().on_http(self.rpc_url.clone());
                let pending = provider
                    .send_transaction(request)
                    .await
                    .map_err(transport_error)?;
                tracing::info!("[CHAIN] Submitted {:#x} from {:#x}", pending.tx_hash(), self.from);
                pending.get_receipt().await
            }
        }
        .map_err(|err| classify_provider_error(None, &err.to_string()))?;

        Ok(Self::outcome(receipt))
    }
}
