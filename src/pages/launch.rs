use super::{header, section, CONNECT_FIRST, TITLE};
use crate::client::{Orchestrator, TransferResult};
use crate::config::chains::NetworkConfig;
use crate::wallet::{SessionManager, WalletSession};

/// Looper product app page: amount and leverage in, one launch out.
pub struct LaunchPage {
    orchestrator: Orchestrator,
    network: NetworkConfig,
}

impl LaunchPage {
    pub fn new(orchestrator: Orchestrator, network: NetworkConfig) -> Self {
        Self {
            orchestrator,
            network,
        }
    }

    pub async fn submit(
        &self,
        wallet: &SessionManager,
        amount: &str,
        leverage: f64,
    ) -> TransferResult {
        let session = wallet.session();
        let (Some(user), Some(signer)) = (
            session.address.filter(|_| session.connected),
            wallet.signer(),
        ) else {
            return TransferResult::failure(CONNECT_FIRST);
        };
        self.orchestrator
            .launch(signer.as_ref(), &user.to_checksum(None), leverage, amount)
            .await
    }

    pub fn render(&self, session: &WalletSession, last: Option<&TransferResult>) -> String {
        let mut out = header(TITLE, Some("home"), session);
        out.push_str(&section(
            "Launch ReactiveLooper",
            "Deposit WETH into a dedicated looper contract; the Reactive Network runs the \
             supply-borrow-swap loop for the chosen leverage.\n\n\
             Usage: launch <amount WETH> <leverage>   e.g. launch 0.001 2.5",
        ));
        if !session.connected {
            out.push_str(&format!("\n  ! {CONNECT_FIRST}\n"));
        }
        if let Some(result) = last {
            out.push_str(&render_result(result, &self.network));
        }
        out
    }
}

pub fn render_result(result: &TransferResult, network: &NetworkConfig) -> String {
    if result.success {
        let tx = result.tx_hash.as_deref().unwrap_or("-");
        format!(
            "\n  ReactiveLooper launched!\n  Amount:   {} WETH\n  Contract: {}\n  Tx:       {}\n  Explorer: {}\n",
            result.amount.as_deref().unwrap_or("-"),
            result.contract_address.as_deref().unwrap_or("-"),
            tx,
            network.tx_link(tx),
        )
    } else {
        format!(
            "\n  Launch failed: {}\n",
            result.error.as_deref().unwrap_or("Failed to launch ReactiveLooper")
        )
    }
}
