//! Process-wide wallet session shared by every page.
//!
//! The manager is the only writer; pages read snapshots through
//! [`SessionManager::session`] or register an observer. Account changes
//! reported by the provider are picked up by [`SessionManager::watch_accounts`].

pub mod provider;

use crate::chain::WalletSigner;
use crate::client::FaucetClient;
use crate::error::{ProviderError, Result};
use alloy::primitives::Address;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, RwLock};
use std::time::Duration;
use tokio::sync::oneshot;
use tokio::task::JoinHandle;

pub use provider::{InjectedProvider, LocalKeyProvider, NodeWalletProvider};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WalletSession {
    pub address: Option<Address>,
    pub connected: bool,
}

impl WalletSession {
    fn connected(address: Address) -> Self {
        Self {
            address: Some(address),
            connected: true,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ObserverId(u64);

type Observer = Arc<dyn Fn(&WalletSession) + Send + Sync>;

pub struct SessionManager {
    provider: Option<Arc<dyn InjectedProvider>>,
    state: RwLock<WalletSession>,
    observers: Mutex<Vec<(ObserverId, Observer)>>,
    next_observer: AtomicU64,
    auto_faucet: Option<Arc<dyn FaucetClient>>,
}

impl SessionManager {
    pub fn new(provider: Option<Arc<dyn InjectedProvider>>) -> Self {
        Self {
            provider,
            state: RwLock::new(WalletSession::default()),
            observers: Mutex::new(Vec::new()),
            next_observer: AtomicU64::new(1),
            auto_faucet: None,
        }
    }

    /// Requests test WETH for every newly connected address.
    pub fn with_auto_faucet(mut self, faucet: Arc<dyn FaucetClient>) -> Self {
        self.auto_faucet = Some(faucet);
        self
    }

    fn lock_observers(&self) -> MutexGuard<'_, Vec<(ObserverId, Observer)>> {
        match self.observers.lock() {
            Ok(guard) => guard,
            Err(poisoned) => {
                tracing::error!("[WALLET] Observer list lock poisoned; recovering guard state.");
                poisoned.into_inner()
            }
        }
    }

    pub fn session(&self) -> WalletSession {
        match self.state.read() {
            Ok(guard) => *guard,
            Err(poisoned) => *poisoned.into_inner(),
        }
    }

    fn replace(&self, next: WalletSession) {
        let changed = {
            let mut guard = match self.state.write() {
                Ok(guard) => guard,
                Err(poisoned) => poisoned.into_inner(),
            };
            let changed = *guard != next;
            *guard = next;
            changed
        };
        if changed {
            self.notify(&next);
        }
    }

    fn notify(&self, session: &WalletSession) {
        // Callbacks run outside the lock so they may (un)subscribe.
        let observers: Vec<Observer> = self
            .lock_observers()
            .iter()
            .map(|(_, observer)| Arc::clone(observer))
            .collect();
        for observer in observers {
            observer(session);
        }
    }

    pub fn subscribe<F>(&self, observer: F) -> ObserverId
    where
        F: Fn(&WalletSession) + Send + Sync + 'static,
    {
        let id = ObserverId(self.next_observer.fetch_add(1, Ordering::Relaxed));
        self.lock_observers().push((id, Arc::new(observer)));
        id
    }

    pub fn unsubscribe(&self, id: ObserverId) -> bool {
        let mut observers = self.lock_observers();
        let before = observers.len();
        observers.retain(|(existing, _)| *existing != id);
        observers.len() != before
    }

    fn provider(&self) -> Result<&Arc<dyn InjectedProvider>> {
        self.provider
            .as_ref()
            .ok_or_else(|| ProviderError::Unavailable.into())
    }

    /// Page-load probe: adopts an account the wallet already granted,
    /// without prompting. Failures leave the session disconnected.
    pub async fn probe(&self) -> WalletSession {
        let Ok(provider) = self.provider() else {
            return self.session();
        };
        match provider.accounts().await {
            Ok(accounts) => {
                if let Some(first) = accounts.first() {
                    tracing::info!("[WALLET] Restored existing grant for {:#x}", first);
                    self.replace(WalletSession::connected(*first));
                }
            }
            Err(err) => tracing::warn!("[WALLET] Account probe failed: {}", err),
        }
        self.session()
    }

    pub async fn connect(&self) -> Result<Address> {
        let provider = self.provider()?;
        let accounts = provider.request_accounts().await?;
        let Some(address) = accounts.first().copied() else {
            return Err(ProviderError::UserRejected.into());
        };

        self.replace(WalletSession::connected(address));
        tracing::info!("[WALLET] Connected {:#x}", address);

        if let Some(faucet) = self.auto_faucet.clone() {
            let recipient = address.to_checksum(None);
            tokio::spawn(async move {
                let result = faucet.request_weth(&recipient).await;
                if result.success {
                    tracing::info!(
                        "[FAUCET] Auto-faucet sent {} {} to {} ({})",
                        result.amount.as_deref().unwrap_or("?"),
                        result.token.as_deref().unwrap_or("WETH"),
                        recipient,
                        result.tx_hash.as_deref().unwrap_or("no hash")
                    );
                } else {
                    tracing::warn!(
                        "[FAUCET] Auto-faucet for {} failed: {}",
                        recipient,
                        result.error.as_deref().unwrap_or("unknown error")
                    );
                }
            });
        }
        Ok(address)
    }

    /// Clears local state only; the wallet's grant is left in place.
    pub fn disconnect(&self) {
        self.replace(WalletSession::default());
        tracing::info!("[WALLET] Disconnected");
    }

    pub fn signer(&self) -> Option<Arc<dyn WalletSigner>> {
        let session = self.session();
        let address = session.address.filter(|_| session.connected)?;
        let provider = self.provider.as_ref()?;
        Some(provider.signer(address))
    }

    /// Resynchronises a connected session with the provider's account set.
    /// A locally disconnected session is left alone.
    pub fn handle_accounts_changed(&self, accounts: &[Address]) {
        let current = self.session();
        if !current.connected {
            return;
        }
        match accounts.first() {
            None => {
                tracing::info!("[WALLET] Provider reports no accounts; disconnecting");
                self.replace(WalletSession::default());
            }
            Some(first) if current.address != Some(*first) => {
                tracing::info!("[WALLET] Account switched to {:#x}", first);
                self.replace(WalletSession::connected(*first));
            }
            Some(_) => {}
        }
    }

    /// Polls `eth_accounts` every `interval` and feeds changes to
    /// [`Self::handle_accounts_changed`]. The task lives as long as the
    /// returned guard.
    pub fn watch_accounts(self: &Arc<Self>, interval: Duration) -> AccountWatch {
        let (stop_tx, mut stop_rx) = oneshot::channel::<()>();
        let manager = Arc::clone(self);
        let handle = tokio::spawn(async move {
            loop {
                tokio::select! {
                    _ = &mut stop_rx => break,
                    _ = tokio::time::sleep(interval) => {}
                }
                if !manager.session().connected {
                    continue;
                }
                let Ok(provider) = manager.provider() else {
                    break;
                };
                match provider.accounts().await {
                    Ok(accounts) => manager.handle_accounts_changed(&accounts),
                    Err(err) => tracing::debug!("[WALLET] Account poll failed: {}", err),
                }
            }
            tracing::debug!("[WALLET] Account watcher stopped");
        });
        AccountWatch {
            stop: Some(stop_tx),
            handle: Some(handle),
        }
    }
}

/// Guard for the account-change poller.
pub struct AccountWatch {
    stop: Option<oneshot::Sender<()>>,
    handle: Option<JoinHandle<()>>,
}

impl AccountWatch {
    /// Stops the poller and waits for it to exit.
    pub async fn stop(mut self) {
        if let Some(stop) = self.stop.take() {
            let _ = stop.send(());
        }
        if let Some(handle) = self.handle.take() {
            let _ = handle.await;
        }
    }
}

impl Drop for AccountWatch {
    fn drop(&mut self) {
        if let Some(stop) = self.stop.take() {
            let _ = stop.send(());
        }
        if let Some(handle) = self.handle.take() {
            handle.abort();
        }
    }
}
