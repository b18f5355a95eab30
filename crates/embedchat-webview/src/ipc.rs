//! IPC protocol between Rust and the chat page.
//!
//! Messages flow in both directions:
//! - **Page -> Rust**: the page calls a method on `window.embedChatBridge`,
//!   which posts `{"method", "args", "callId"}` through `window.ipc.postMessage`.
//! - **Rust -> Page**: Rust evaluates a script in the page, either a
//!   well-known function (`printTranscript()`, `globalResolverFunction(..)`)
//!   or a bridge reply for a call that expects a value.

use embedchat_common::BridgeError;
use serde::{Deserialize, Serialize};

/// Global function the page exposes to receive asynchronous results.
pub const GLOBAL_RESOLVER_FUNCTION: &str = "globalResolverFunction";

pub const PRINT_TRANSCRIPT_SCRIPT: &str = "printTranscript()";
pub const END_CONVERSATION_SCRIPT: &str = "endConversation()";

/// A call from the page into Rust.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BridgeCall {
    pub method: String,
    #[serde(default)]
    pub args: Vec<serde_json::Value>,
    /// Present when the page awaits a return value.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub call_id: Option<String>,
}

impl BridgeCall {
    pub fn new(method: impl Into<String>, args: Vec<serde_json::Value>) -> Self {
        Self {
            method: method.into(),
            args,
            call_id: None,
        }
    }

    pub fn with_call_id(mut self, call_id: impl Into<String>) -> Self {
        self.call_id = Some(call_id.into());
        self
    }

    /// Parse a call from the raw IPC body.
    pub fn from_json(raw: &str) -> Result<Self, BridgeError> {
        serde_json::from_str(raw).map_err(|e| BridgeError::MalformedPayload(e.to_string()))
    }
}

/// JavaScript that installs `window.embedChatBridge` in every page. Method
/// names and argument order match what the chat page calls.
pub const BRIDGE_INIT_SCRIPT: &str = r#"
(function() {
    if (window.embedChatBridge) { return; }
    var pending = {};
    var nextId = 0;
    function post(method, args) {
        window.ipc.postMessage(JSON.stringify({ method: method, args: args }));
    }
    function request(method, args) {
        var callId = 'c' + (++nextId);
        return new Promise(function(resolve) {
            pending[callId] = resolve;
            window.ipc.postMessage(JSON.stringify({ method: method, args: args, callId: callId }));
        });
    }
    window.embedChatBridge = {
        onTransfer: function(payload) { post('onTransfer', [payload]); },
        onAgentMessageEnd: function() { post('onAgentMessageEnd', []); },
        onEndChat: function() { post('onEndChat', []); },
        onConversationStart: function(conversationId) { post('onConversationStart', [conversationId]); },
        storeValue: function(key, value) { post('storeValue', [key, value]); },
        getStoredValue: function(key) { return request('getStoredValue', [key]); },
        clearStorage: function() { post('clearStorage', []); },
        onSecretExpiry: function(secretName, callbackId) { post('onSecretExpiry', [secretName, callbackId]); },
        onPrint: function(url, data) { post('onPrint', [url, data]); },
        _reply: function(callId, value) {
            var resolve = pending[callId];
            if (resolve) {
                delete pending[callId];
                resolve(value);
            }
        }
    };
})();
"#;

fn js_string(value: &str) -> String {
    serde_json::to_string(value).unwrap_or_else(|_| "\"\"".to_string())
}

/// `globalResolverFunction(callbackId, value|null[, error])`.
pub fn js_global_resolver(callback_id: &str, value: Option<&str>, error: Option<&str>) -> String {
    let value = value.map(js_string).unwrap_or_else(|| "null".to_string());
    match error {
        Some(err) => format!(
            "{GLOBAL_RESOLVER_FUNCTION}({}, {value}, {});",
            js_string(callback_id),
            js_string(err)
        ),
        None => format!("{GLOBAL_RESOLVER_FUNCTION}({}, {value});", js_string(callback_id)),
    }
}

/// Deliver a bridge return value to the promise awaiting `call_id`.
pub fn js_bridge_reply(call_id: &str, value: &serde_json::Value) -> String {
    let payload = serde_json::to_string(value).unwrap_or_else(|_| "null".to_string());
    format!("window.embedChatBridge._reply({}, {payload});", js_string(call_id))
}
