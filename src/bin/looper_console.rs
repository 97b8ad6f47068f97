//! Console frontend: wallet session, pages, faucet and launch/vault actions
//! against a running API server.

use alloy::primitives::Address;
use reactive_looper::client::{ApiClient, FaucetClient, Orchestrator};
use reactive_looper::config::chains::NetworkConfig;
use reactive_looper::pages::dashboard::render_dashboard;
use reactive_looper::pages::home::{get_started, render_home};
use reactive_looper::pages::launch::LaunchPage;
use reactive_looper::pages::vault::{VaultAction, VaultPage};
use reactive_looper::pages::{Page, CONNECT_FIRST};
use reactive_looper::runtime::{init_tracing, parse_runtime_args};
use reactive_looper::utils::config::{ConsoleConfig, ProductVariant};
use reactive_looper::wallet::{InjectedProvider, LocalKeyProvider, NodeWalletProvider, SessionManager};
use std::sync::Arc;
use tokio::io::{AsyncBufReadExt, BufReader};

const HELP: &str = "commands:
  connect                       connect the wallet (requests test WETH when enabled)
  disconnect                    forget the connected account
  faucet                        request 0.0001 WETH for the connected account
  launch <amount> <leverage>    launch a looper position (looper product)
  deposit <amount> [confirm]    deposit ETH into the vault (vault product)
  withdraw <amount>             withdraw from the vault (vault product)
  page <home|app|dashboard>     show a page
  help                          this text
  quit                          exit";

enum AppPage {
    Launch(LaunchPage),
    Vault(VaultPage),
}

struct Console {
    wallet: Arc<SessionManager>,
    api: Arc<ApiClient>,
    network: NetworkConfig,
    app: AppPage,
    current: Page,
}

fn required(address: Option<Address>, what: &str, network: &NetworkConfig) -> anyhow::Result<Address> {
    address.ok_or_else(|| {
        anyhow::anyhow!(
            "network `{}` has no {} deployment; set NETWORK=sepolia",
            network.name,
            what
        )
    })
}

impl Console {
    fn render(&self, page: Page) -> String {
        let session = self.wallet.session();
        match page {
            Page::Home => render_home(&session),
            Page::Dashboard => render_dashboard(&session, &self.network),
            Page::App => match &self.app {
                AppPage::Launch(launch) => launch.render(&session, None),
                AppPage::Vault(vault) => vault.render(&session, None),
            },
        }
    }

    fn show(&mut self, page: Page) {
        if page == Page::App {
            if let Err(message) = get_started(&self.wallet.session()) {
                println!("{message}");
                return;
            }
        }
        self.current = page;
        println!("{}", self.render(page));
    }

    async fn faucet(&self) {
        let session = self.wallet.session();
        let Some(address) = session.address.filter(|_| session.connected) else {
            println!("{CONNECT_FIRST}");
            return;
        };
        let result = self.api.request_weth(&address.to_checksum(None)).await;
        if result.success {
            println!(
                "Received {} {} (tx {})",
                result.amount.as_deref().unwrap_or("?"),
                result.token.as_deref().unwrap_or("WETH"),
                result.tx_hash.as_deref().unwrap_or("-")
            );
        } else {
            println!(
                "Faucet failed: {}",
                result.error.as_deref().unwrap_or("unknown error")
            );
        }
    }

    async fn launch(&self, args: &[&str]) {
        let AppPage::Launch(page) = &self.app else {
            println!("launch is only available with LOOPER_PRODUCT=looper");
            return;
        };
        let [amount, leverage] = args else {
            println!("usage: launch <amount> <leverage>");
            return;
        };
        let Ok(leverage) = leverage.parse::<f64>() else {
            println!("Please enter a valid leverage!");
            return;
        };
        let result = page.submit(&self.wallet, amount, leverage).await;
        println!("{}", page.render(&self.wallet.session(), Some(&result)));
    }

    async fn vault(&self, action: VaultAction, args: &[&str]) {
        let AppPage::Vault(page) = &self.app else {
            println!("deposit/withdraw are only available with LOOPER_PRODUCT=vault");
            return;
        };
        let (amount, confirmed) = match args {
            [amount] => (*amount, false),
            [amount, "confirm"] => (*amount, true),
            _ => {
                println!("usage: deposit <amount> [confirm] | withdraw <amount>");
                return;
            }
        };
        let banner = page.submit(&self.wallet, action, amount, confirmed).await;
        println!("{}", page.render(&self.wallet.session(), Some(&banner)));
    }

    /// Returns `false` when the console should exit.
    async fn dispatch(&mut self, line: &str) -> bool {
        let words: Vec<&str> = line.split_whitespace().collect();
        let Some((command, args)) = words.split_first() else {
            return true;
        };
        match command.to_ascii_lowercase().as_str() {
            "quit" | "exit" => return false,
            "help" => println!("{HELP}"),
            "connect" => match self.wallet.connect().await {
                Ok(address) => {
                    println!("Connected {}", address.to_checksum(None));
                    println!("{}", self.render(self.current));
                }
                Err(err) => println!("{}", err.user_message()),
            },
            "disconnect" => {
                self.wallet.disconnect();
                println!("{}", self.render(self.current));
            }
            "faucet" => self.faucet().await,
            "launch" => self.launch(args).await,
            "deposit" => self.vault(VaultAction::Deposit, args).await,
            "withdraw" => self.vault(VaultAction::Withdraw, args).await,
            "page" => match args.first().and_then(|raw| Page::parse(raw)) {
                Some(page) => self.show(page),
                None => println!("usage: page <home|app|dashboard>"),
            },
            other => println!("unknown command `{other}`; type `help`"),
        }
        true
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let runtime_args = parse_runtime_args()?;
    reactive_looper::utils::env_guard::harden_env_setup();
    init_tracing();

    let config = ConsoleConfig::load()?;
    tracing::info!(
        "[STARTUP] api={} wallet_rpc={} network={} product={} auto_faucet={} poll_ms={} local_key={}",
        config.api_base_url,
        config.wallet_rpc_url.host_str().unwrap_or("?"),
        config.network.name,
        config.product.as_str(),
        config.auto_faucet_on_connect,
        config.account_poll.as_millis(),
        config.wallet_private_key.is_some(),
    );
    if runtime_args.explain_config {
        tracing::info!("[STARTUP] LOOPER_EXPLAIN_CONFIG=true requested; exiting after config dump.");
        return Ok(());
    }

    let provider: Arc<dyn InjectedProvider> = match config.wallet_private_key.clone() {
        Some(key) => Arc::new(LocalKeyProvider::new(config.wallet_rpc_url.clone(), key)),
        None => Arc::new(NodeWalletProvider::new(config.wallet_rpc_url.clone())),
    };
    let api = Arc::new(ApiClient::new(config.api_base_url.clone()));

    let mut manager = SessionManager::new(Some(provider));
    if config.auto_faucet_on_connect {
        manager = manager.with_auto_faucet(api.clone());
    }
    let wallet = Arc::new(manager);
    wallet.subscribe(|session| match session.address.filter(|_| session.connected) {
        Some(address) => tracing::info!("[WALLET] Session now {:#x}", address),
        None => tracing::info!("[WALLET] Session now disconnected"),
    });
    wallet.probe().await;
    let watch = wallet.watch_accounts(config.account_poll);

    let app = match config.product {
        ProductVariant::Looper => {
            let weth = required(config.network.weth, "WETH", &config.network)?;
            AppPage::Launch(LaunchPage::new(
                Orchestrator::new(api.clone(), weth),
                config.network.clone(),
            ))
        }
        ProductVariant::Vault => {
            AppPage::Vault(VaultPage::new(required(config.network.vault, "vault", &config.network)?))
        }
    };

    let mut console = Console {
        wallet: Arc::clone(&wallet),
        api,
        network: config.network.clone(),
        app,
        current: Page::Home,
    };
    println!("{}", console.render(Page::Home));
    println!("{HELP}");

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        tokio::select! {
            _ = tokio::signal::ctrl_c() => {
                tracing::info!("[STARTUP] Ctrl-C received; exiting.");
                break;
            }
            line = lines.next_line() => match line {
                Ok(Some(line)) => {
                    if !console.dispatch(&line).await {
                        break;
                    }
                }
                Ok(None) => break,
                Err(err) => {
                    tracing::error!("[STARTUP] stdin read failed: {}", err);
                    break;
                }
            },
        }
    }

    watch.stop().await;
    Ok(())
}
