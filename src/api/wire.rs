//! JSON bodies shared by the backend routes and the HTTP client.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContractAddressRequest {
    #[serde(default)]
    pub user_address: Option<String>,
    #[serde(default, deserialize_with = "lenient_leverage")]
    pub leverage: Option<f64>,
    #[serde(default)]
    pub amount: Option<String>,
}

/// Accepts a JSON number or a numeric string. Anything else reads as absent
/// so the route answers with missing parameters.
fn lenient_leverage<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let parsed = match Option::<Value>::deserialize(deserializer)? {
        Some(Value::Number(number)) => number.as_f64(),
        Some(Value::String(text)) => text.trim().parse::<f64>().ok(),
        _ => None,
    };
    Ok(parsed.filter(|leverage| leverage.is_finite()))
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContractAddressResponse {
    pub success: bool,
    pub contract_address: String,
    pub user_address: String,
    pub leverage: f64,
    pub amount: String,
    pub message: String,
    pub estimated_gas: String,
    pub network: String,
    pub remaining_addresses: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContractAddressInfo {
    pub message: String,
    pub usage: String,
    pub available_addresses: usize,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FaucetRequest {
    #[serde(default)]
    pub address: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FaucetResponse {
    pub success: bool,
    pub tx_hash: String,
    pub amount: String,
    pub token: String,
    pub recipient: String,
    pub message: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FaucetInfo {
    pub message: String,
    pub usage: String,
    pub rate_limit: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: String,
}
