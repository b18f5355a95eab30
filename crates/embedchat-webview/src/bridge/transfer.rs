//! Decoding of `onTransfer` payloads.

use std::collections::BTreeMap;

use embedchat_common::BridgeError;
use serde::Deserialize;

use crate::listener::ConversationTransfer;

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct TransferPayload {
    #[serde(default)]
    is_synchronous: bool,
    #[serde(default)]
    is_contact_center: bool,
    #[serde(default)]
    data: Vec<TransferEntry>,
}

#[derive(Deserialize)]
struct TransferEntry {
    key: String,
    value: String,
}

/// Parse the JSON payload of a transfer. Duplicate keys keep the last value.
pub fn parse_transfer(payload: &str) -> Result<ConversationTransfer, BridgeError> {
    let parsed: TransferPayload = serde_json::from_str(payload)
        .map_err(|e| BridgeError::MalformedPayload(format!("onTransfer: {e}")))?;

    let data: BTreeMap<String, String> = parsed
        .data
        .into_iter()
        .map(|entry| (entry.key, entry.value))
        .collect();

    Ok(ConversationTransfer {
        is_synchronous: parsed.is_synchronous,
        is_contact_center: parsed.is_contact_center,
        data,
    })
}
