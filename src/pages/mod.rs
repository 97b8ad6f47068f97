//! Terminal renditions of the product pages.
//!
//! Render functions are pure (`&state -> String`); the actions that touch
//! the wallet or the backend live next to them and return the text of the
//! alert or banner the page shows.

pub mod dashboard;
pub mod home;
pub mod launch;
pub mod vault;

use crate::utils::hex::short_address;
use crate::wallet::WalletSession;

pub const TITLE: &str = "ReactiveLooper";
pub const CONNECT_FIRST: &str = "Please connect your wallet first!";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Page {
    Home,
    App,
    Dashboard,
}

impl Page {
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "home" | "/" => Some(Self::Home),
            "app" | "/app" => Some(Self::App),
            "dashboard" | "/dashboard" => Some(Self::Dashboard),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Home => "home",
            Self::App => "app",
            Self::Dashboard => "dashboard",
        }
    }
}

/// Header widget: shortened address with a disconnect hint, or a connect
/// prompt.
pub fn wallet_badge(session: &WalletSession) -> String {
    match session.address.filter(|_| session.connected) {
        Some(address) => format!("{}  [disconnect]", short_address(&address)),
        None => "[connect] Connect Wallet".to_string(),
    }
}

pub(crate) fn header(title: &str, back: Option<&str>, session: &WalletSession) -> String {
    let left = match back {
        Some(target) => format!("<- {target}  |  {title}"),
        None => title.to_string(),
    };
    let right = wallet_badge(session);
    let rule = "=".repeat(72);
    format!("{rule}\n{left:<44}{right:>28}\n{rule}\n")
}

pub(crate) fn section(title: &str, body: &str) -> String {
    format!("\n## {title}\n{body}\n")
}
