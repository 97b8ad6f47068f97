use alloy::primitives::{address, Address};

const SEPOLIA_EXPLORER: &str = "https://sepolia.etherscan.io";
const REACTSCAN_RVM: &str =
    "https://lasna.reactscan.net/address/0x58e95d9300254fbba4a6b0b8abc5e94bf9dc4c52/contract";

/// A named deployment shown on the dashboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DeployedContract {
    pub name: &'static str,
    pub address: Address,
    /// Reactive contracts live on the Reactive Network, not on the origin chain.
    pub reactive: bool,
}

impl DeployedContract {
    pub fn display_name(&self) -> String {
        let spaced = self.name.replace("reactive", " Reactive");
        let mut chars = spaced.chars();
        match chars.next() {
            Some(first) => first.to_uppercase().chain(chars).collect(),
            None => String::new(),
        }
    }
}

const SEPOLIA_DIRECTORY: [DeployedContract; 6] = [
    DeployedContract {
        name: "swapper",
        address: address!("a72B2d49db7CA4Ac669e2016c51BC608BCca9EF8"),
        reactive: false,
    },
    DeployedContract {
        name: "looper",
        address: address!("78D49B70CCe71E527af992ce1e7e15331C41F151"),
        reactive: false,
    },
    DeployedContract {
        name: "swapreactive",
        address: address!("c7000f3A7FE3606C664F78f5BFbF8614dd520285"),
        reactive: true,
    },
    DeployedContract {
        name: "borrowreactive",
        address: address!("f72BE3492988BCDeF396722229A76e18b6902d31"),
        reactive: true,
    },
    DeployedContract {
        name: "supplyreactive",
        address: address!("DcB9984F6d19d15dA03F90F2a1e0cc8EF6392C98"),
        reactive: true,
    },
    DeployedContract {
        name: "transferreactive",
        address: address!("36fBD788F67a90FB5D9095AEa52C8B3A9471B117"),
        reactive: true,
    },
];

#[derive(Debug, Clone)]
pub struct NetworkConfig {
    pub name: String,
    pub chain_id: u64,
    /// Wrapped ether used by the faucet and the looper deposit.
    pub weth: Option<Address>,
    pub vault: Option<Address>,
    pub looper: Option<Address>,
    pub explorer_url: String,
    pub directory: Vec<DeployedContract>,
}

impl NetworkConfig {
    pub fn get(name: &str) -> Self {
        match name.trim().to_ascii_lowercase().as_str() {
            "sepolia" => Self::sepolia(),
            other => Self::unsupported(other),
        }
    }

    pub fn sepolia() -> Self {
        Self {
            name: "sepolia".to_string(),
            chain_id: 11_155_111,
            weth: Some(address!("C558DBdd856501FCd9aaF1E62eae57A9F0629a3c")),
            vault: Some(address!("60E3567B0987c5bE1A01f21114ed79c3e9dB6A2E")),
            looper: Some(address!("78D49B70CCe71E527af992ce1e7e15331C41F151")),
            explorer_url: SEPOLIA_EXPLORER.to_string(),
            directory: SEPOLIA_DIRECTORY.to_vec(),
        }
    }

    fn unsupported(name: &str) -> Self {
        Self {
            name: name.to_string(),
            chain_id: 0,
            weth: None,
            vault: None,
            looper: None,
            explorer_url: SEPOLIA_EXPLORER.to_string(),
            directory: Vec::new(),
        }
    }

    /// Default pool handed to the mock allocator.
    pub fn default_contract_pool(&self) -> Vec<Address> {
        self.looper.into_iter().collect()
    }

    pub fn explorer_link(&self, address: Address) -> String {
        let reactive = self
            .directory
            .iter()
            .any(|contract| contract.reactive && contract.address == address);
        if reactive {
            return format!("{REACTSCAN_RVM}/{address:#x}");
        }
        format!("{}/address/{}", self.explorer_url, address.to_checksum(None))
    }

    pub fn tx_link(&self, tx_hash: &str) -> String {
        format!("{}/tx/{}", self.explorer_url, tx_hash)
    }
}
