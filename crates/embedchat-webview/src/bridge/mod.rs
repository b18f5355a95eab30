//! The native call surface the chat page invokes.
//!
//! `BridgeMessageHandler` is safe to call from any thread. It only touches
//! the shared store directly; listener events and anything needing the
//! page go through the control queue.

mod table;
mod transfer;

#[cfg(test)]
mod tests;

pub use table::{bridge_methods, is_bridge_method, BridgeReply};
pub use transfer::parse_transfer;

use std::sync::MutexGuard;

use embedchat_common::BridgeError;
use embedchat_storage::{KeyValueStore, SharedStore};
use tracing::{debug, warn};

use crate::control::{ControlMessage, ControlQueue, SurfaceCommand};
use crate::dispatcher::EventDispatcher;
use crate::ipc::{js_bridge_reply, BridgeCall};
use crate::listener::SecretResolver;

pub struct BridgeMessageHandler {
    store: SharedStore,
    dispatcher: EventDispatcher,
    queue: ControlQueue,
}

impl BridgeMessageHandler {
    pub fn new(store: SharedStore, dispatcher: EventDispatcher, queue: ControlQueue) -> Self {
        Self {
            store,
            dispatcher,
            queue,
        }
    }

    fn store(&self) -> MutexGuard<'_, KeyValueStore> {
        // A panic elsewhere must not take conversation storage down with it.
        self.store.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Entry point for a raw IPC body. Errors are logged and dropped; a
    /// call carrying a `callId` gets its reply posted back to the page.
    pub fn handle_message(&self, raw: &str) {
        let call = match BridgeCall::from_json(raw) {
            Ok(call) => call,
            Err(e) => {
                warn!(body_len = raw.len(), error = %e, "bridge message rejected");
                return;
            }
        };

        match self.dispatch(&call) {
            Ok(reply) => {
                if let Some(call_id) = &call.call_id {
                    let value = match reply {
                        BridgeReply::Value(v) => v,
                        BridgeReply::None => serde_json::Value::Null,
                    };
                    self.post_script(js_bridge_reply(call_id, &value));
                }
            }
            Err(e) => {
                warn!(method = %call.method, error = %e, "bridge call rejected");
            }
        }
    }

    /// Route a decoded call through the function table.
    pub fn dispatch(&self, call: &BridgeCall) -> Result<BridgeReply, BridgeError> {
        let handler = table::lookup(&call.method)
            .ok_or_else(|| BridgeError::UnknownMethod(call.method.clone()))?;
        debug!(method = %call.method, args = call.args.len(), "bridge call");
        handler(self, &call.args)
    }

    fn post_script(&self, script: String) {
        self.queue
            .post(ControlMessage::Surface(SurfaceCommand::EvaluateScript(script)));
    }

    /// A malformed payload is logged and dropped without notifying the
    /// listener.
    pub fn on_transfer(&self, payload: &str) {
        match parse_transfer(payload) {
            Ok(transfer) => {
                debug!(
                    synchronous = transfer.is_synchronous,
                    contact_center = transfer.is_contact_center,
                    fields = transfer.data.len(),
                    "conversation transfer"
                );
                self.dispatcher.conversation_transfer(transfer);
            }
            Err(e) => warn!(error = %e, "transfer payload dropped"),
        }
    }

    pub fn on_agent_message_end(&self) {
        self.dispatcher.agent_message_end();
    }

    pub fn on_end_chat(&self) {
        self.dispatcher.conversation_ended();
    }

    pub fn on_conversation_start(&self, conversation_id: &str) {
        self.dispatcher.conversation_start(conversation_id.to_string());
    }

    pub fn store_value(&self, key: &str, value: &str) {
        debug!(key, value_len = value.len(), "store value");
        self.store().set(key, value);
    }

    pub fn get_stored_value(&self, key: &str) -> Option<String> {
        self.store().get(key)
    }

    pub fn clear_storage(&self) {
        debug!("clear storage");
        self.store().clear();
    }

    /// Ask the host for a replacement secret. The page's pending call is
    /// answered through `globalResolverFunction` once the host resolves.
    pub fn on_secret_expiry(&self, secret_name: &str, callback_id: &str) {
        debug!(secret = secret_name, callback = callback_id, "secret expired");
        let resolver = SecretResolver::new(callback_id, self.queue.clone());
        self.dispatcher.secret_expiry(secret_name.to_string(), resolver);
    }

    /// Queue an off-screen print of `data`. Never blocks the caller.
    pub fn on_print(&self, url: &str, data: &str) {
        debug!(url, data_len = data.len(), "print requested");
        self.queue.post(ControlMessage::Surface(SurfaceCommand::Print {
            url: url.to_string(),
            data: data.to_string(),
        }));
    }
}
