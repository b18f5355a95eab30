//! Window creation, session construction, and webview attachment.

use std::sync::{Arc, Mutex};

use winit::event_loop::ActiveEventLoop;
use winit::window::{Theme, Window, WindowAttributes};

use embedchat_common::{Appearance, PersistenceMode, SessionError};
use embedchat_storage::FileStore;
use embedchat_webview::{
    build_chat_webview, ChatSession, ConversationListener, DisplayEnvironment, SurfaceOptions, WryPrintSurfaces,
};
use embedchat_webview::wry_host::full_bounds;

use super::core::{EmbedChatApp, UserEvent};
use super::listener::LoggingListener;
use super::opener::SystemBrowser;

pub(super) fn appearance_of(theme: Theme) -> Appearance {
    match theme {
        Theme::Dark => Appearance::Dark,
        Theme::Light => Appearance::Light,
    }
}

impl EmbedChatApp {
    /// Create the window. Returns `false` if the event loop should exit.
    pub(super) fn initialize_window(&mut self, event_loop: &ActiveEventLoop) -> bool {
        let mut attrs = WindowAttributes::default()
            .with_title(self.config.chat.bot_name.clone())
            .with_inner_size(winit::dpi::LogicalSize::new(420.0, 720.0));
        if self.force_dark {
            attrs = attrs.with_theme(Some(Theme::Dark));
        }

        let window = match event_loop.create_window(attrs) {
            Ok(w) => Arc::new(w),
            Err(e) => {
                tracing::error!("Failed to create window: {e}");
                return false;
            }
        };

        if !self.force_dark {
            self.appearance = appearance_of(window.theme().unwrap_or(Theme::Light));
        }
        self.window = Some(window);
        true
    }

    pub(super) fn environment(&self) -> DisplayEnvironment {
        DisplayEnvironment::from_env(self.appearance)
    }

    fn build_session(&self, window: &Arc<Window>) -> Result<ChatSession, SessionError> {
        let listener = self.listeners.get_or_insert_with(&self.session_id, || {
            Arc::new(LoggingListener::new(
                self.config.chat.resolved_conversation().secrets,
            )) as Arc<dyn ConversationListener>
        });

        // The waker is called from bridge threads.
        let proxy = Mutex::new(self.proxy.clone());
        let mut builder = ChatSession::builder(self.config.agent.clone(), self.config.chat.clone())
            .listener(listener)
            .external_opener(Arc::new(SystemBrowser))
            .print_surfaces(Box::new(WryPrintSurfaces::new(Arc::clone(window))))
            .control_waker(move || {
                if let Ok(proxy) = proxy.lock() {
                    if proxy.send_event(UserEvent::ControlQueue).is_err() {
                        tracing::debug!("Event loop closed, control queue wake dropped");
                    }
                }
            });

        if self.config.agent.persistence_mode == PersistenceMode::Disk {
            let store = FileStore::default_location()?;
            tracing::info!("Conversation store: {}", store.root().display());
            builder = builder.durable_store(Arc::new(store));
        }

        builder.build()
    }

    /// Build the webview and attach it, restoring from the last snapshot
    /// when possible. Returns `false` on failure.
    pub(super) fn attach_webview(&mut self) -> bool {
        let Some(window) = self.window.clone() else {
            return false;
        };

        if self.session.is_none() {
            match self.build_session(&window) {
                Ok(session) => self.session = Some(session),
                Err(e) => {
                    tracing::error!("Failed to create chat session: {e}");
                    return false;
                }
            }
        }

        let environment = self.environment();
        let snapshot = self.snapshot.take();
        let Some(session) = self.session.as_mut() else {
            return false;
        };

        let size = window.inner_size();
        let surface = match build_chat_webview(
            session,
            &*window,
            full_bounds(size.width, size.height),
            &SurfaceOptions::default(),
        ) {
            Ok(surface) => surface,
            Err(e) => {
                tracing::error!("Failed to create webview: {e}");
                return false;
            }
        };

        if let Err(e) = session.attach(Box::new(surface), environment, snapshot) {
            tracing::error!("Failed to attach chat: {e}");
            return false;
        }
        tracing::info!(state = %session.state(), "Chat attached");
        true
    }
}
