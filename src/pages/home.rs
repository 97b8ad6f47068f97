use super::{header, section, Page, TITLE};
use crate::wallet::WalletSession;

const HERO: &str = "Optimize Your DeFi Leverage";
const TAGLINE: &str = "Execute complex multi-step DeFi operations in a single atomic transaction, \
eliminating gas waste and price risk exposure.";
const PROBLEM: &str = "Achieving optimal leverage in decentralized finance typically involves complex, \
multi-step transaction sequences which are vulnerable to high gas costs and critical exposure \
to price risk between operations.";
const SOLUTION: &str = "A custom smart contract architecture uses Reactive Network's smart contract \
automation to orchestrate the multi-step execution. The recursive supply-borrow-swap loop runs \
within a single atomic transaction, removing the exposure window to asset volatility that \
exists when transactions are submitted individually.";
const HOW_IT_WORKS: &str = "ReactiveLooper uses Reactive Network's reactive and callback contracts \
to monitor supply and borrow events from the Aave V3 pool, together with a swapper contract that \
converts between the collateral and borrow assets. Every step of the loop is contained in one \
callback contract.";

pub fn render_home(session: &WalletSession) -> String {
    let mut out = header(TITLE, None, session);
    out.push_str(&format!("\n{HERO}\n{TAGLINE}\n"));
    out.push_str(if session.connected {
        "\n  > Get Started   (page app)\n"
    } else {
        "\n  > Get Started   (connect a wallet first)\n"
    });
    out.push_str(&section("Problem Statement", PROBLEM));
    out.push_str(&section("Solution", SOLUTION));
    out.push_str(&section("How It Works", HOW_IT_WORKS));
    out
}

/// "Get Started" is gated on a connected wallet.
pub fn get_started(session: &WalletSession) -> Result<Page, String> {
    if session.connected {
        Ok(Page::App)
    } else {
        Err("Please connect your wallet first to get started!".to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloy::primitives::Address;

    #[test]
    fn get_started_requires_connection() {
        assert!(get_started(&WalletSession::default()).is_err());
        let session = WalletSession {
            address: Some(Address::repeat_byte(1)),
            connected: true,
        };
        assert_eq!(get_started(&session), Ok(Page::App));
    }

    #[test]
    fn home_renders_all_sections() {
        let page = render_home(&WalletSession::default());
        for heading in ["Problem Statement", "Solution", "How It Works", HERO] {
            assert!(page.contains(heading), "missing {heading}");
        }
    }
}
