use thiserror::Error;

pub type Result<T> = std::result::Result<T, LooperError>;

#[derive(Debug, Error)]
pub enum LooperError {
    #[error("validation error: {0}")]
    Validation(#[from] ValidationError),
    #[error("resource exhausted: {0}")]
    Exhausted(#[from] ExhaustedError),
    #[error("not configured: {0}")]
    NotConfigured(String),
    #[error("provider error: {0}")]
    Provider(#[from] ProviderError),
    #[error("transaction failed: {0}")]
    TransactionFailed(String),
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
    #[error("{0}")]
    Unknown(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("missing required parameters: userAddress, leverage, amount")]
    MissingParameters,
    #[error("invalid address `{0}`")]
    InvalidAddress(String),
    #[error("invalid amount `{0}`")]
    InvalidAmount(String),
    #[error("invalid leverage `{0}`")]
    InvalidLeverage(String),
    #[error("token not supported on network `{0}`")]
    UnsupportedNetwork(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ExhaustedError {
    #[error("contract address pool is empty")]
    PoolExhausted,
    #[error("faucet token balance below disbursement amount")]
    InsufficientFaucetBalance,
    #[error("token balance {have} below requested {need}")]
    InsufficientBalance { have: String, need: String },
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ProviderError {
    #[error("no wallet provider available")]
    Unavailable,
    #[error("request rejected by user")]
    UserRejected,
    #[error("insufficient native balance for gas")]
    InsufficientGas,
    #[error("nonce or fee congestion: {0}")]
    Congestion(String),
    #[error("connected signer does not match requested user")]
    AddressMismatch,
    #[error("address is rate limited")]
    RateLimited,
    #[error("rpc failure: {0}")]
    Rpc(String),
}

impl LooperError {
    /// Message shown to the person at the keyboard.
    pub fn user_message(&self) -> String {
        match self {
            Self::Validation(ValidationError::MissingParameters) => {
                "Missing required parameters: userAddress, leverage, amount".to_string()
            }
            Self::Validation(ValidationError::InvalidAddress(_)) => {
                "Invalid Ethereum address".to_string()
            }
            Self::Validation(ValidationError::InvalidAmount(_)) => {
                "Please enter a valid amount!".to_string()
            }
            Self::Validation(ValidationError::InvalidLeverage(_)) => {
                "Please enter a valid leverage!".to_string()
            }
            Self::Validation(ValidationError::UnsupportedNetwork(_)) => {
                "WETH not supported on this network".to_string()
            }
            Self::Exhausted(ExhaustedError::PoolExhausted) => {
                "No contract addresses available. Please try again later.".to_string()
            }
            Self::Exhausted(ExhaustedError::InsufficientFaucetBalance) => {
                "Faucet has insufficient WETH balance".to_string()
            }
            Self::Exhausted(ExhaustedError::InsufficientBalance { have, need }) => format!(
                "Insufficient WETH balance. You have {have} WETH but need {need} WETH."
            ),
            Self::NotConfigured(detail) => detail.clone(),
            Self::Provider(ProviderError::Unavailable) => {
                "Please install MetaMask or another Web3 wallet!".to_string()
            }
            Self::Provider(ProviderError::UserRejected) => {
                "Transaction was rejected by user".to_string()
            }
            Self::Provider(ProviderError::InsufficientGas) => {
                "Insufficient ETH for gas fees".to_string()
            }
            Self::Provider(ProviderError::Congestion(_)) => {
                "Transaction failed due to network congestion. Please try again.".to_string()
            }
            Self::Provider(ProviderError::AddressMismatch) => {
                "Wallet address mismatch. Please reconnect your wallet.".to_string()
            }
            Self::Provider(ProviderError::RateLimited) => {
                "Rate limit exceeded: 1 request per hour per address".to_string()
            }
            Self::Provider(ProviderError::Rpc(raw)) => raw.clone(),
            Self::TransactionFailed(_) => "Transaction failed".to_string(),
            Self::InvalidConfig(detail) => detail.clone(),
            Self::Unknown(raw) => raw.clone(),
        }
    }
}
