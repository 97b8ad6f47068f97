use super::{header, section};
use crate::config::chains::NetworkConfig;
use crate::utils::hex::medium_address;
use crate::wallet::WalletSession;

/// Placeholder position shown until on-chain activity indexing lands.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActivitySummary {
    pub leverage: &'static str,
    pub amount: &'static str,
    pub status: &'static str,
    pub timestamp: &'static str,
}

pub const MOCK_ACTIVITY: ActivitySummary = ActivitySummary {
    leverage: "3.5x",
    amount: "0.005 WETH",
    status: "Active",
    timestamp: "2024-12-17 14:30:00",
};

fn status_badge(status: &str) -> String {
    match status {
        "Active" => "[* Active]".to_string(),
        "Pending" => "[~ Pending]".to_string(),
        "Completed" => "[v Completed]".to_string(),
        other => format!("[{other}]"),
    }
}

pub fn render_directory(network: &NetworkConfig) -> String {
    let mut body = String::new();
    for contract in &network.directory {
        body.push_str(&format!(
            "  {:<18} {}\n  {:<18} {}\n",
            contract.display_name(),
            contract.address.to_checksum(None),
            "",
            network.explorer_link(contract.address),
        ));
    }
    section("Deployed Contracts", body.trim_end())
}

pub fn render_dashboard(session: &WalletSession, network: &NetworkConfig) -> String {
    let mut out = header("Dashboard", Some("home"), session);
    out.push_str(&render_directory(network));

    if session.connected {
        let mut body = format!(
            "  Leverage:  {}\n  Amount:    {}\n  Status:    {}\n  Updated:   {}\n",
            MOCK_ACTIVITY.leverage,
            MOCK_ACTIVITY.amount,
            status_badge(MOCK_ACTIVITY.status),
            MOCK_ACTIVITY.timestamp,
        );
        body.push_str("  Contracts:\n");
        for contract in &network.directory {
            body.push_str(&format!(
                "    {:<18} {}\n",
                contract.display_name(),
                medium_address(&contract.address)
            ));
        }
        out.push_str(&section("Your Activity", body.trim_end()));
    } else {
        out.push_str(&section(
            "Connect Your Wallet",
            "Connect your wallet to view your ReactiveLooper activity.",
        ));
    }

    let status = if session.connected {
        MOCK_ACTIVITY.status
    } else {
        "N/A"
    };
    out.push_str(&section(
        "Quick Actions",
        &format!(
            "  [Launch New Loop]  page app\n  [Your Contracts]   {}\n  [Status]           {}",
            network.directory.len(),
            status
        ),
    ));
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloy::primitives::Address;

    #[test]
    fn directory_links_reactive_contracts_to_reactscan() {
        let rendered = render_directory(&NetworkConfig::sepolia());
        assert!(rendered.contains("Swap Reactive"));
        assert!(rendered.contains("lasna.reactscan.net"));
        assert!(rendered.contains(
            "https://sepolia.etherscan.io/address/0x78D49B70CCe71E527af992ce1e7e15331C41F151"
        ));
    }

    #[test]
    fn activity_card_only_when_connected() {
        let network = NetworkConfig::sepolia();
        let offline = render_dashboard(&WalletSession::default(), &network);
        assert!(offline.contains("Connect Your Wallet"));
        assert!(offline.contains("N/A"));
        assert!(!offline.contains("Your Activity"));

        let session = WalletSession {
            address: Some(Address::repeat_byte(9)),
            connected: true,
        };
        let online = render_dashboard(&session, &network);
        assert!(online.contains("Your Activity"));
        assert!(online.contains("3.5x"));
        assert!(online.contains("[* Active]"));
        assert!(online.contains("[Your Contracts]   6"));
    }
}
