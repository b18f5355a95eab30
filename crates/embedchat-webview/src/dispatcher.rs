//! Delivers conversation events to the host listener on the control thread.

use std::sync::Arc;

use tracing::debug;

use crate::control::ControlQueue;
use crate::listener::{ConversationListener, ConversationTransfer, InitializationError, SecretResolver};

/// Re-posts every listener call onto the control queue.
///
/// Calls run later, serialized, in the order they were made, and never on
/// the calling thread. Without a listener every call is dropped.
#[derive(Clone)]
pub struct EventDispatcher {
    listener: Option<Arc<dyn ConversationListener>>,
    queue: ControlQueue,
}

impl EventDispatcher {
    pub fn new(listener: Option<Arc<dyn ConversationListener>>, queue: ControlQueue) -> Self {
        Self { listener, queue }
    }

    pub fn has_listener(&self) -> bool {
        self.listener.is_some()
    }

    fn post(&self, event: &'static str, call: impl FnOnce(&dyn ConversationListener) + Send + 'static) {
        let Some(listener) = &self.listener else {
            debug!(event, "no listener, event dropped");
            return;
        };
        let listener = Arc::clone(listener);
        self.queue.invoke(move || call(listener.as_ref()));
    }

    pub fn conversation_initialization_error(&self, error: InitializationError) {
        self.post("initialization_error", move |l| {
            l.on_conversation_initialization_error(error)
        });
    }

    pub fn conversation_transfer(&self, transfer: ConversationTransfer) {
        self.post("transfer", move |l| l.on_conversation_transfer(transfer));
    }

    pub fn agent_message_end(&self) {
        self.post("agent_message_end", |l| l.on_agent_message_end());
    }

    pub fn conversation_start(&self, conversation_id: String) {
        self.post("conversation_start", move |l| {
            l.on_conversation_start(conversation_id)
        });
    }

    pub fn conversation_ended(&self) {
        self.post("conversation_ended", |l| l.on_conversation_ended());
    }

    pub fn secret_expiry(&self, secret_name: String, resolver: SecretResolver) {
        self.post("secret_expiry", move |l| l.on_secret_expiry(secret_name, resolver));
    }
}
