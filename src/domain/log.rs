use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tracing::debug;

use super::amount::deserialize_u64_scalar;

/// One indexed contract event
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionLog {
    /// Unique per block number + log position
    pub id: String,
    pub tx_hash: String,
    #[serde(deserialize_with = "deserialize_u64_scalar")]
    pub block_number: u64,
    #[serde(deserialize_with = "deserialize_u64_scalar")]
    pub timestamp: u64,
    pub event_name: String,
    pub contract_address: String,
    pub contract_type: String,
    #[serde(default)]
    pub escrow_address: Option<String>,
    #[serde(default)]
    pub agent_address: Option<String>,
    #[serde(default)]
    pub user_address: Option<String>,
    /// JSON-encoded event arguments
    #[serde(default)]
    pub event_data: String,
}

impl TransactionLog {
    /// Decoded event arguments; empty when the payload is not a JSON object
    pub fn event_data(&self) -> Map<String, Value> {
        parse_event_data(&self.event_data)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionLogPage {
    #[serde(default)]
    pub items: Vec<TransactionLog>,
}

/// Best-effort decode of a log's embedded payload.
///
/// Malformed JSON and non-object JSON both yield an empty map.
pub fn parse_event_data(event_data: &str) -> Map<String, Value> {
    match serde_json::from_str::<Value>(event_data) {
        Ok(Value::Object(map)) => map,
        Ok(other) => {
            debug!("event payload is not an object ({}), ignoring", type_name(&other));
            Map::new()
        }
        Err(e) => {
            debug!("event payload failed to decode: {}", e);
            Map::new()
        }
    }
}

fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
