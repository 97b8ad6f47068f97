use crate::config::chains::NetworkConfig;
use crate::error::{LooperError, Result};
use alloy::primitives::Address;
use alloy::signers::local::PrivateKeySigner;
use std::env;
use std::net::SocketAddr;
use std::str::FromStr;
use std::time::Duration;

const DEFAULT_RPC_URL: &str = "https://sepolia.infura.io/v3/YOUR_INFURA_KEY";
const DEFAULT_NETWORK: &str = "sepolia";
const DEFAULT_BIND_ADDR: &str = "127.0.0.1:3000";
const DEFAULT_API_BASE_URL: &str = "http://127.0.0.1:3000";
const DEFAULT_ALLOCATOR_LATENCY_MS: u64 = 500;
const DEFAULT_FAUCET_RATE_LIMIT_SECS: u64 = 60 * 60;
const DEFAULT_ACCOUNT_POLL_MS: u64 = 2_000;

/// Settings for the mock backend API.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub rpc_url: reqwest::Url,
    pub network: NetworkConfig,
    pub faucet_signer: Option<PrivateKeySigner>,
    pub bind_addr: SocketAddr,
    pub contract_pool: Vec<Address>,
    pub allocator_latency: Duration,
    pub faucet_rate_limit: Duration,
}

/// Which app page the console frontend serves.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProductVariant {
    Looper,
    Vault,
}

impl ProductVariant {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Looper => "looper",
            Self::Vault => "vault",
        }
    }

    fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "looper" => Some(Self::Looper),
            "vault" => Some(Self::Vault),
            _ => None,
        }
    }
}

/// Settings for the console frontend.
#[derive(Debug, Clone)]
pub struct ConsoleConfig {
    pub api_base_url: reqwest::Url,
    pub wallet_rpc_url: reqwest::Url,
    pub wallet_private_key: Option<PrivateKeySigner>,
    pub network: NetworkConfig,
    pub product: ProductVariant,
    pub auto_faucet_on_connect: bool,
    pub account_poll: Duration,
}

pub(crate) fn parse_bool_flag(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

fn non_empty(raw: Option<String>) -> Option<String> {
    raw.map(|v| v.trim().to_string()).filter(|v| !v.is_empty())
}

fn validate_http_url(name: &str, raw: &str) -> Result<reqwest::Url> {
    let parsed = raw.parse::<reqwest::Url>().map_err(|e| {
        LooperError::InvalidConfig(format!("{name} must be a valid URL, got `{raw}`: {e}"))
    })?;
    match parsed.scheme() {
        "http" | "https" => Ok(parsed),
        other => Err(LooperError::InvalidConfig(format!(
            "{name} must use http(s) scheme, got `{other}`"
        ))),
    }
}

fn parse_private_key(name: &str, raw: &str) -> Result<PrivateKeySigner> {
    let clean = crate::utils::hex::clean_hex(raw);
    let hexish = clean.len() == 64 && clean.as_bytes().iter().all(|b| b.is_ascii_hexdigit());
    if !hexish {
        return Err(LooperError::InvalidConfig(format!(
            "{name} must be 32 bytes of hex (optionally 0x-prefixed)"
        )));
    }
    PrivateKeySigner::from_str(clean)
        .map_err(|e| LooperError::InvalidConfig(format!("{name} is not a valid secp256k1 key: {e}")))
}

fn parse_u64(name: &str, raw: Option<String>, default: u64) -> Result<u64> {
    match raw {
        Some(value) => value.parse::<u64>().map_err(|_| {
            LooperError::InvalidConfig(format!("{name} must be a valid u64, got `{value}`"))
        }),
        None => Ok(default),
    }
}

fn parse_contract_pool(raw: &str) -> Result<Vec<Address>> {
    raw.split(',')
        .map(str::trim)
        .filter(|entry| !entry.is_empty())
        .map(|entry| {
            Address::from_str(entry).map_err(|e| {
                LooperError::InvalidConfig(format!(
                    "CONTRACT_POOL entry `{entry}` is not a valid address: {e}"
                ))
            })
        })
        .collect()
}

impl ServerConfig {
    pub fn load() -> Result<Self> {
        Self::load_from(|key| env::var(key).ok())
    }

    pub fn load_from<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| non_empty(lookup(key));

        let rpc_url = validate_http_url(
            "RPC_URL",
            &get("RPC_URL").unwrap_or_else(|| DEFAULT_RPC_URL.to_string()),
        )?;
        let network = NetworkConfig::get(&get("NETWORK").unwrap_or_else(|| DEFAULT_NETWORK.to_string()));

        // Absent key disables the faucet; a present but malformed key is a startup error.
        let faucet_signer = get("FAUCET_PRIVATE_KEY")
            .map(|raw| parse_private_key("FAUCET_PRIVATE_KEY", &raw))
            .transpose()?;

        let bind_raw = get("API_BIND_ADDR").unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string());
        let bind_addr = bind_raw.parse::<SocketAddr>().map_err(|e| {
            LooperError::InvalidConfig(format!(
                "API_BIND_ADDR must be host:port, got `{bind_raw}`: {e}"
            ))
        })?;

        let contract_pool = match get("CONTRACT_POOL") {
            Some(raw) => parse_contract_pool(&raw)?,
            None => network.default_contract_pool(),
        };

        let allocator_latency = Duration::from_millis(parse_u64(
            "ALLOCATOR_LATENCY_MS",
            get("ALLOCATOR_LATENCY_MS"),
            DEFAULT_ALLOCATOR_LATENCY_MS,
        )?);
        let faucet_rate_limit = Duration::from_secs(parse_u64(
            "FAUCET_RATE_LIMIT_SECS",
            get("FAUCET_RATE_LIMIT_SECS"),
            DEFAULT_FAUCET_RATE_LIMIT_SECS,
        )?);

        Ok(Self {
            rpc_url,
            network,
            faucet_signer,
            bind_addr,
            contract_pool,
            allocator_latency,
            faucet_rate_limit,
        })
    }
}

impl ConsoleConfig {
    pub fn load() -> Result<Self> {
        Self::load_from(|key| env::var(key).ok())
    }

    pub fn load_from<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| non_empty(lookup(key));

        let api_base_url = validate_http_url(
            "API_BASE_URL",
            &get("API_BASE_URL").unwrap_or_else(|| DEFAULT_API_BASE_URL.to_string()),
        )?;
        let wallet_rpc_raw = get("WALLET_RPC_URL")
            .or_else(|| get("RPC_URL"))
            .unwrap_or_else(|| DEFAULT_RPC_URL.to_string());
        let wallet_rpc_url = validate_http_url("WALLET_RPC_URL", &wallet_rpc_raw)?;
        let wallet_private_key = get("WALLET_PRIVATE_KEY")
            .map(|raw| parse_private_key("WALLET_PRIVATE_KEY", &raw))
            .transpose()?;
        let network = NetworkConfig::get(&get("NETWORK").unwrap_or_else(|| DEFAULT_NETWORK.to_string()));

        let product = match get("LOOPER_PRODUCT") {
            Some(raw) => ProductVariant::parse(&raw).ok_or_else(|| {
                LooperError::InvalidConfig(format!(
                    "LOOPER_PRODUCT must be `looper` or `vault`, got `{raw}`"
                ))
            })?,
            None => ProductVariant::Looper,
        };
        let auto_faucet_on_connect = get("AUTO_FAUCET_ON_CONNECT")
            .and_then(|raw| parse_bool_flag(&raw))
            .unwrap_or(true);
        let account_poll = Duration::from_millis(
            parse_u64("ACCOUNT_POLL_MS", get("ACCOUNT_POLL_MS"), DEFAULT_ACCOUNT_POLL_MS)?
                .clamp(100, 60_000),
        );

        Ok(Self {
            api_base_url,
            wallet_rpc_url,
            wallet_private_key,
            network,
            product,
            auto_faucet_on_connect,
            account_poll,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    const TEST_KEY: &str = "0x59c6995e998f97a5a0044966f0945389dc9e86dae88c7a8412f4603b6b78690d";

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn server_defaults_leave_faucet_disabled() {
        let config = ServerConfig::load_from(lookup(&[])).expect("defaults load");
        assert!(config.faucet_signer.is_none());
        assert_eq!(config.network.name, "sepolia");
        assert_eq!(config.contract_pool.len(), 1);
        assert_eq!(config.allocator_latency, Duration::from_millis(500));
        assert_eq!(config.faucet_rate_limit, Duration::from_secs(3600));
    }

    #[test]
    fn server_parses_key_and_pool() {
        let config = ServerConfig::load_from(lookup(&[
            ("FAUCET_PRIVATE_KEY", TEST_KEY),
            (
                "CONTRACT_POOL",
                "0x000000000000000000000000000000000000dEaD, 0x000000000000000000000000000000000000bEEF",
            ),
            ("ALLOCATOR_LATENCY_MS", "0"),
        ]))
        .expect("config load");
        assert!(config.faucet_signer.is_some());
        assert_eq!(config.contract_pool.len(), 2);
        assert_eq!(config.allocator_latency, Duration::ZERO);
    }

    #[test]
    fn server_rejects_malformed_key() {
        let err = ServerConfig::load_from(lookup(&[("FAUCET_PRIVATE_KEY", "0x1234")]))
            .expect_err("short key must fail");
        assert!(err.to_string().contains("FAUCET_PRIVATE_KEY"), "{err}");
    }

    #[test]
    fn server_rejects_non_http_rpc() {
        let err = ServerConfig::load_from(lookup(&[("RPC_URL", "wss://node.example")]))
            .expect_err("ws scheme must fail");
        assert!(err.to_string().contains("http(s)"), "{err}");
    }

    #[test]
    fn console_product_variant_parses() {
        let config = ConsoleConfig::load_from(lookup(&[
            ("LOOPER_PRODUCT", "Vault"),
            ("AUTO_FAUCET_ON_CONNECT", "off"),
        ]))
        .expect("config load");
        assert_eq!(config.product, ProductVariant::Vault);
        assert!(!config.auto_faucet_on_connect);

        let err = ConsoleConfig::load_from(lookup(&[("LOOPER_PRODUCT", "lending")]))
            .expect_err("unknown product");
        assert!(err.to_string().contains("LOOPER_PRODUCT"));
    }

    #[test]
    fn console_wallet_rpc_falls_back_to_rpc_url() {
        let config = ConsoleConfig::load_from(lookup(&[("RPC_URL", "http://127.0.0.1:8545")]))
            .expect("config load");
        assert_eq!(config.wallet_rpc_url.as_str(), "http://127.0.0.1:8545/");
    }
}
