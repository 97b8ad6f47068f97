#![allow(dead_code)]

use alloy::primitives::{Address, Bytes, B256, U256};
use alloy::sol_types::SolCall;
use async_trait::async_trait;
use reactive_looper::chain::{classify_provider_error, TxOutcome, WalletSigner};
use reactive_looper::client::{AllocatorClient, FaucetClient, FaucetResult};
use reactive_looper::api::wire::ContractAddressResponse;
use reactive_looper::error::{ExhaustedError, LooperError, Result, ValidationError};
use reactive_looper::token::IERC20;
use reactive_looper::wallet::InjectedProvider;
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SentTx {
    pub to: Address,
    pub input: Bytes,
    pub value: U256,
}

/// In-memory ERC-20 ledger behind the signer boundary. `balanceOf` calls are
/// answered from the ledger and `transfer` sends move funds out of
/// `account`; every send is recorded.
pub struct MockChain {
    account: Address,
    balances: Mutex<HashMap<(Address, Address), U256>>,
    sends: Mutex<Vec<SentTx>>,
    calls: AtomicUsize,
    send_error: Mutex<Option<String>>,
    revert_sends: AtomicBool,
}

impl MockChain {
    pub fn new(account: Address) -> Arc<Self> {
        Arc::new(Self {
            account,
            balances: Mutex::new(HashMap::new()),
            sends: Mutex::new(Vec::new()),
            calls: AtomicUsize::new(0),
            send_error: Mutex::new(None),
            revert_sends: AtomicBool::new(false),
        })
    }

    pub fn account(&self) -> Address {
        self.account
    }

    pub fn set_balance(&self, token: Address, holder: Address, amount: U256) {
        self.balances
            .lock()
            .expect("balances lock")
            .insert((token, holder), amount);
    }

    pub fn balance(&self, token: Address, holder: Address) -> U256 {
        self.balances
            .lock()
            .expect("balances lock")
            .get(&(token, holder))
            .copied()
            .unwrap_or(U256::ZERO)
    }

    pub fn sends(&self) -> Vec<SentTx> {
        self.sends.lock().expect("sends lock").clone()
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    /// Every later send fails with a provider error carrying `message`.
    pub fn fail_sends_with(&self, message: &str) {
        *self.send_error.lock().expect("send error lock") = Some(message.to_string());
    }

    /// Later sends are mined but report a failed receipt.
    pub fn revert_sends(&self) {
        self.revert_sends.store(true, Ordering::SeqCst);
    }
}

#[async_trait]
impl WalletSigner for MockChain {
    async fn address(&self) -> Result<Address> {
        Ok(self.account)
    }

    async fn call(&self, to: Address, input: Bytes) -> Result<Bytes> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let call = IERC20::balanceOfCall::abi_decode(input.as_ref(), true)
            .map_err(|err| LooperError::Unknown(format!("unsupported call: {err}")))?;
        let balance = self.balance(to, call.account);
        Ok(Bytes::from(balance.to_be_bytes::<32>().to_vec()))
    }

    async fn send(&self, to: Address, input: Bytes, value: U256) -> Result<TxOutcome> {
        if let Some(message) = self.send_error.lock().expect("send error lock").clone() {
            return Err(classify_provider_error(None, &message));
        }
        let nonce = {
            let mut sends = self.sends.lock().expect("sends lock");
            sends.push(SentTx {
                to,
                input: input.clone(),
                value,
            });
            sends.len()
        };
        let tx_hash = B256::with_last_byte(nonce as u8);
        if self.revert_sends.load(Ordering::SeqCst) {
            return Ok(TxOutcome {
                tx_hash,
                success: false,
            });
        }

        let mut success = true;
        if input.len() >= 4 && input[..4] == IERC20::transferCall::SELECTOR {
            let transfer = IERC20::transferCall::abi_decode(input.as_ref(), true)
                .map_err(|err| LooperError::Unknown(format!("bad transfer: {err}")))?;
            let mut balances = self.balances.lock().expect("balances lock");
            let from_balance = balances
                .get(&(to, self.account))
                .copied()
                .unwrap_or(U256::ZERO);
            if from_balance < transfer.amount {
                success = false;
            } else {
                balances.insert((to, self.account), from_balance - transfer.amount);
                let entry = balances.entry((to, transfer.to)).or_insert(U256::ZERO);
                *entry += transfer.amount;
            }
        }
        Ok(TxOutcome { tx_hash, success })
    }
}

/// Allocator fake that hands out a fixed address and counts calls.
pub struct StaticAllocator {
    contract: Option<Address>,
    calls: AtomicUsize,
}

impl StaticAllocator {
    pub fn new(contract: Address) -> Arc<Self> {
        Arc::new(Self {
            contract: Some(contract),
            calls: AtomicUsize::new(0),
        })
    }

    pub fn exhausted() -> Arc<Self> {
        Arc::new(Self {
            contract: None,
            calls: AtomicUsize::new(0),
        })
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl AllocatorClient for StaticAllocator {
    async fn assign(
        &self,
        user_address: &str,
        leverage: f64,
        amount: &str,
    ) -> Result<ContractAddressResponse> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if user_address.is_empty() || amount.is_empty() {
            return Err(ValidationError::MissingParameters.into());
        }
        let Some(contract) = self.contract else {
            return Err(ExhaustedError::PoolExhausted.into());
        };
        Ok(ContractAddressResponse {
            success: true,
            contract_address: contract.to_checksum(None),
            user_address: user_address.to_string(),
            leverage,
            amount: amount.to_string(),
            message: format!("Contract assigned for {leverage}x leverage with {amount} WETH"),
            estimated_gas: "0.002".to_string(),
            network: "sepolia".to_string(),
            remaining_addresses: 0,
        })
    }
}

/// Faucet fake that records every recipient.
#[derive(Default)]
pub struct RecordingFaucet {
    recipients: Mutex<Vec<String>>,
}

impl RecordingFaucet {
    pub fn recipients(&self) -> Vec<String> {
        self.recipients.lock().expect("recipients lock").clone()
    }
}

#[async_trait]
impl FaucetClient for RecordingFaucet {
    async fn request_weth(&self, address: &str) -> FaucetResult {
        self.recipients
            .lock()
            .expect("recipients lock")
            .push(address.to_string());
        FaucetResult {
            success: true,
            tx_hash: Some("0x01".to_string()),
            amount: Some("0.0001".to_string()),
            token: Some("WETH".to_string()),
            recipient: Some(address.to_string()),
            message: Some("WETH sent successfully!".to_string()),
            error: None,
        }
    }
}

/// Injected-wallet fake whose granted accounts can be changed from tests.
pub struct MockWallet {
    accounts: Mutex<Vec<Address>>,
    granted: AtomicBool,
    chain: Arc<MockChain>,
}

impl MockWallet {
    pub fn new(accounts: Vec<Address>, chain: Arc<MockChain>) -> Arc<Self> {
        Arc::new(Self {
            accounts: Mutex::new(accounts),
            granted: AtomicBool::new(false),
            chain,
        })
    }

    /// Simulates an earlier session that already granted access.
    pub fn pre_granted(self: &Arc<Self>) -> Arc<Self> {
        self.granted.store(true, Ordering::SeqCst);
        Arc::clone(self)
    }

    pub fn set_accounts(&self, accounts: Vec<Address>) {
        *self.accounts.lock().expect("accounts lock") = accounts;
    }
}

#[async_trait]
impl InjectedProvider for MockWallet {
    async fn request_accounts(&self) -> Result<Vec<Address>> {
        self.granted.store(true, Ordering::SeqCst);
        Ok(self.accounts.lock().expect("accounts lock").clone())
    }

    async fn accounts(&self) -> Result<Vec<Address>> {
        if !self.granted.load(Ordering::SeqCst) {
            return Ok(Vec::new());
        }
        Ok(self.accounts.lock().expect("accounts lock").clone())
    }

    fn signer(&self, _account: Address) -> Arc<dyn WalletSigner> {
        self.chain.clone()
    }
}
