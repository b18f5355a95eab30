//! The registered-function table exposed to the page.
//!
//! Every name the page may call maps to one handler. Anything else is
//! rejected before it reaches the store or the listener.

use embedchat_common::BridgeError;
use serde_json::Value;

use super::BridgeMessageHandler;

/// What a bridge method hands back to the page.
#[derive(Debug, Clone, PartialEq)]
pub enum BridgeReply {
    None,
    Value(Value),
}

type Handler = fn(&BridgeMessageHandler, &[Value]) -> Result<BridgeReply, BridgeError>;

const BRIDGE_METHODS: &[(&str, Handler)] = &[
    ("onTransfer", on_transfer),
    ("onAgentMessageEnd", on_agent_message_end),
    ("onEndChat", on_end_chat),
    ("onConversationStart", on_conversation_start),
    ("storeValue", store_value),
    ("getStoredValue", get_stored_value),
    ("clearStorage", clear_storage),
    ("onSecretExpiry", on_secret_expiry),
    ("onPrint", on_print),
];

/// Check whether a method name is exposed to the page. Case-sensitive.
pub fn is_bridge_method(name: &str) -> bool {
    lookup(name).is_some()
}

pub(super) fn lookup(name: &str) -> Option<Handler> {
    BRIDGE_METHODS
        .iter()
        .find(|(method, _)| *method == name)
        .map(|(_, handler)| *handler)
}

/// All exposed method names, in table order.
pub fn bridge_methods() -> impl Iterator<Item = &'static str> {
    BRIDGE_METHODS.iter().map(|(name, _)| *name)
}

fn string_arg<'a>(method: &str, args: &'a [Value], index: usize) -> Result<&'a str, BridgeError> {
    match args.get(index) {
        Some(Value::String(s)) => Ok(s.as_str()),
        Some(other) => Err(BridgeError::InvalidArguments {
            method: method.to_string(),
            reason: format!("argument {index} must be a string, got {other}"),
        }),
        None => Err(BridgeError::InvalidArguments {
            method: method.to_string(),
            reason: format!("missing argument {index}"),
        }),
    }
}

fn on_transfer(h: &BridgeMessageHandler, args: &[Value]) -> Result<BridgeReply, BridgeError> {
    // The page normally sends a JSON string; an inline object is accepted too.
    let payload = match args.first() {
        Some(Value::String(s)) => s.clone(),
        Some(other) => other.to_string(),
        None => {
            return Err(BridgeError::InvalidArguments {
                method: "onTransfer".into(),
                reason: "missing argument 0".into(),
            })
        }
    };
    h.on_transfer(&payload);
    Ok(BridgeReply::None)
}

fn on_agent_message_end(h: &BridgeMessageHandler, _: &[Value]) -> Result<BridgeReply, BridgeError> {
    h.on_agent_message_end();
    Ok(BridgeReply::None)
}

fn on_end_chat(h: &BridgeMessageHandler, _: &[Value]) -> Result<BridgeReply, BridgeError> {
    h.on_end_chat();
    Ok(BridgeReply::None)
}

fn on_conversation_start(h: &BridgeMessageHandler, args: &[Value]) -> Result<BridgeReply, BridgeError> {
    h.on_conversation_start(string_arg("onConversationStart", args, 0)?);
    Ok(BridgeReply::None)
}

fn store_value(h: &BridgeMessageHandler, args: &[Value]) -> Result<BridgeReply, BridgeError> {
    let key = string_arg("storeValue", args, 0)?;
    let value = string_arg("storeValue", args, 1)?;
    h.store_value(key, value);
    Ok(BridgeReply::None)
}

fn get_stored_value(h: &BridgeMessageHandler, args: &[Value]) -> Result<BridgeReply, BridgeError> {
    let key = string_arg("getStoredValue", args, 0)?;
    let value = h.get_stored_value(key).map(Value::String).unwrap_or(Value::Null);
    Ok(BridgeReply::Value(value))
}

fn clear_storage(h: &BridgeMessageHandler, _: &[Value]) -> Result<BridgeReply, BridgeError> {
    h.clear_storage();
    Ok(BridgeReply::None)
}

fn on_secret_expiry(h: &BridgeMessageHandler, args: &[Value]) -> Result<BridgeReply, BridgeError> {
    let secret_name = string_arg("onSecretExpiry", args, 0)?;
    let callback_id = string_arg("onSecretExpiry", args, 1)?;
    h.on_secret_expiry(secret_name, callback_id);
    Ok(BridgeReply::None)
}

fn on_print(h: &BridgeMessageHandler, args: &[Value]) -> Result<BridgeReply, BridgeError> {
    let url = string_arg("onPrint", args, 0)?;
    let data = string_arg("onPrint", args, 1)?;
    h.on_print(url, data);
    Ok(BridgeReply::None)
}
