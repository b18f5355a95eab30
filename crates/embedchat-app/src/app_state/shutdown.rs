//! Tearing down the webview and the session.

use super::core::EmbedChatApp;

impl EmbedChatApp {
    /// Drop the webview, keeping a snapshot for the next attach.
    pub(super) fn detach_webview(&mut self) {
        let Some(session) = self.session.as_mut() else {
            return;
        };
        if !session.is_attached() {
            return;
        }
        let snapshot = session.detach();
        tracing::debug!(
            loaded = snapshot.loaded,
            appearance = %snapshot.appearance,
            "Webview detached"
        );
        self.snapshot = Some(snapshot);
    }

    /// Detach, then release the session, its listener, and the window.
    pub(super) fn shutdown(&mut self) {
        tracing::info!("Initiating shutdown");
        self.detach_webview();
        self.session = None;
        self.snapshot = None;
        self.listeners.remove(&self.session_id);
        self.window = None;
        tracing::info!("Session released");
    }
}
