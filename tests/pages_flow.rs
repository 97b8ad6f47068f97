#[path = "support/mock_chain.rs"]
mod mock_chain;

use alloy::primitives::{address, Address, U256};
use alloy::sol_types::SolCall;
use mock_chain::{MockChain, MockWallet, StaticAllocator};
use reactive_looper::client::Orchestrator;
use reactive_looper::config::chains::NetworkConfig;
use reactive_looper::pages::launch::LaunchPage;
use reactive_looper::pages::vault::{VaultAction, VaultPage};
use reactive_looper::pages::CONNECT_FIRST;
use reactive_looper::token::{parse_token_amount, IReactiveVault};
use reactive_looper::wallet::{InjectedProvider, SessionManager};
use std::sync::Arc;

const WETH: Address = address!("C558DBdd856501FCd9aaF1E62eae57A9F0629a3c");
const VAULT: Address = address!("60E3567B0987c5bE1A01f21114ed79c3e9dB6A2E");
const LOOPER: Address = address!("78D49B70CCe71E527af992ce1e7e15331C41F151");
const USER: Address = address!("000000000000000000000000000000000000dEaD");

fn wallet_with(chain: &Arc<MockChain>) -> SessionManager {
    let provider: Arc<dyn InjectedProvider> = MockWallet::new(vec![USER], chain.clone());
    SessionManager::new(Some(provider))
}

#[tokio::test]
async fn launch_page_requires_connection_then_launches() {
    let chain = MockChain::new(USER);
    chain.set_balance(WETH, USER, parse_token_amount("0.01").expect("amount"));
    let allocator = StaticAllocator::new(LOOPER);
    let page = LaunchPage::new(
        Orchestrator::new(allocator.clone(), WETH),
        NetworkConfig::sepolia(),
    );
    let wallet = wallet_with(&chain);

    let refused = page.submit(&wallet, "0.001", 2.0).await;
    assert_eq!(refused.error.as_deref(), Some(CONNECT_FIRST));
    assert_eq!(allocator.calls(), 0);

    wallet.connect().await.expect("connect");
    let launched = page.submit(&wallet, "0.001", 2.0).await;
    assert!(launched.success, "unexpected failure: {:?}", launched.error);
    let rendered = page.render(&wallet.session(), Some(&launched));
    assert!(rendered.contains("ReactiveLooper launched!"));
}

#[tokio::test]
async fn vault_deposit_sends_amount_as_value() {
    let chain = MockChain::new(USER);
    let wallet = wallet_with(&chain);
    wallet.connect().await.expect("connect");
    let page = VaultPage::new(VAULT);

    let banner = page
        .submit(&wallet, VaultAction::Deposit, "0.005", false)
        .await;
    assert!(banner.starts_with("Deposit confirmed"), "banner: {banner}");

    let sends = chain.sends();
    assert_eq!(sends.len(), 1);
    assert_eq!(sends[0].to, VAULT);
    let amount = parse_token_amount("0.005").expect("amount");
    assert_eq!(sends[0].value, amount);
    let call = IReactiveVault::depositCall::abi_decode(sends[0].input.as_ref(), true)
        .expect("deposit calldata");
    assert_eq!(call.amount, amount);
}

#[tokio::test]
async fn large_deposit_waits_for_confirmation() {
    let chain = MockChain::new(USER);
    let wallet = wallet_with(&chain);
    wallet.connect().await.expect("connect");
    let page = VaultPage::new(VAULT);

    let banner = page.submit(&wallet, VaultAction::Deposit, "0.5", false).await;
    assert!(banner.contains("You're about to use 0.5 ETH"), "banner: {banner}");
    assert!(chain.sends().is_empty());

    page.submit(&wallet, VaultAction::Deposit, "0.5", true).await;
    assert_eq!(chain.sends().len(), 1);
}

#[tokio::test]
async fn vault_withdraw_carries_no_value_and_maps_errors() {
    let chain = MockChain::new(USER);
    let wallet = wallet_with(&chain);
    wallet.connect().await.expect("connect");
    let page = VaultPage::new(VAULT);

    page.submit(&wallet, VaultAction::Withdraw, "1", false).await;
    let sends = chain.sends();
    assert_eq!(sends[0].value, U256::ZERO);
    assert!(IReactiveVault::withdrawCall::abi_decode(sends[0].input.as_ref(), true).is_ok());

    chain.fail_sends_with("insufficient funds for gas * price + value");
    let banner = page.submit(&wallet, VaultAction::Withdraw, "1", false).await;
    assert_eq!(banner, "Withdrawal Failed: Insufficient vault token balance");
}
