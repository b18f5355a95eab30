//! Host-facing conversation events.

use std::collections::BTreeMap;
use std::fmt;

use tracing::debug;

use crate::control::{ControlMessage, ControlQueue, SurfaceCommand};
use crate::ipc::js_global_resolver;

/// A hand-off of the conversation to a human agent.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConversationTransfer {
    pub is_synchronous: bool,
    pub is_contact_center: bool,
    pub data: BTreeMap<String, String>,
}

/// The chat page failed to load.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InitializationError {
    pub url: String,
    pub description: String,
}

/// Receives conversation events. Every method runs on the control thread,
/// one at a time, in the order the page raised them.
pub trait ConversationListener: Send + Sync {
    fn on_conversation_initialization_error(&self, _error: InitializationError) {}

    fn on_conversation_transfer(&self, _transfer: ConversationTransfer) {}

    fn on_agent_message_end(&self) {}

    fn on_conversation_start(&self, _conversation_id: String) {}

    fn on_conversation_ended(&self) {}

    /// A secret passed to the page has expired. Answer through `resolver`;
    /// dropping it unanswered leaves the page waiting.
    fn on_secret_expiry(&self, secret_name: String, resolver: SecretResolver) {
        debug!(secret = %secret_name, callback = %resolver.callback_id(), "secret expiry not handled");
    }
}

/// One-shot answer to a secret-expiry request.
///
/// Resolving posts `globalResolverFunction(callbackId, value, error?)` to the
/// control queue, so it may be called from any thread.
pub struct SecretResolver {
    callback_id: String,
    queue: ControlQueue,
}

impl SecretResolver {
    pub(crate) fn new(callback_id: impl Into<String>, queue: ControlQueue) -> Self {
        Self {
            callback_id: callback_id.into(),
            queue,
        }
    }

    pub fn callback_id(&self) -> &str {
        &self.callback_id
    }

    /// Hand the page a replacement secret.
    pub fn resolve(self, value: impl Into<String>) {
        self.complete(Ok(value.into()));
    }

    /// Tell the page no replacement is available.
    pub fn reject(self, error: impl Into<String>) {
        self.complete(Err(error.into()));
    }

    pub fn complete(self, result: Result<String, String>) {
        let script = match &result {
            Ok(value) => js_global_resolver(&self.callback_id, Some(value), None),
            Err(error) => js_global_resolver(&self.callback_id, None, Some(error)),
        };
        debug!(callback = %self.callback_id, ok = result.is_ok(), "secret resolved");
        self.queue
            .post(ControlMessage::Surface(SurfaceCommand::EvaluateScript(script)));
    }
}

impl fmt::Debug for SecretResolver {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SecretResolver")
            .field("callback_id", &self.callback_id)
            .finish_non_exhaustive()
    }
}
