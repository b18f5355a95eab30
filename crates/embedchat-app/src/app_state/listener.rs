//! The host listener: logs every conversation event.

use std::collections::BTreeMap;

use embedchat_webview::{
    ConversationListener, ConversationTransfer, InitializationError, SecretResolver,
};

/// Logs events and answers secret expiry from the configured secrets.
pub struct LoggingListener {
    secrets: BTreeMap<String, String>,
}

impl LoggingListener {
    pub fn new(secrets: BTreeMap<String, String>) -> Self {
        Self { secrets }
    }
}

impl ConversationListener for LoggingListener {
    fn on_conversation_initialization_error(&self, error: InitializationError) {
        tracing::error!(url = %error.url, "Chat failed to load: {}", error.description);
    }

    fn on_conversation_transfer(&self, transfer: ConversationTransfer) {
        tracing::info!(
            synchronous = transfer.is_synchronous,
            contact_center = transfer.is_contact_center,
            fields = ?transfer.data.keys().collect::<Vec<_>>(),
            "Conversation transferred"
        );
    }

    fn on_agent_message_end(&self) {
        tracing::debug!("Agent message finished");
    }

    fn on_conversation_start(&self, conversation_id: String) {
        tracing::info!(conversation = %conversation_id, "Conversation started");
    }

    fn on_conversation_ended(&self) {
        tracing::info!("Conversation ended");
    }

    fn on_secret_expiry(&self, secret_name: String, resolver: SecretResolver) {
        match self.secrets.get(&secret_name) {
            Some(value) => {
                tracing::info!(secret = %secret_name, "Secret expired, resending configured value");
                resolver.resolve(value.clone());
            }
            None => {
                tracing::warn!(secret = %secret_name, "Secret expired, no replacement available");
                resolver.reject(format!("no replacement for secret '{secret_name}'"));
            }
        }
    }
}
