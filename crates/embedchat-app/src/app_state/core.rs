use std::sync::Arc;

use winit::event_loop::EventLoopProxy;
use winit::keyboard::ModifiersState;
use winit::window::Window;

use embedchat_common::{Appearance, SessionId};
use embedchat_config::EmbedConfig;
use embedchat_webview::{ChatSession, ConversationListener, SessionRegistry, SessionSnapshot};

/// Events posted to the winit loop from other threads.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UserEvent {
    /// The session's control queue has work; call `pump`.
    ControlQueue,
}

pub struct EmbedChatApp {
    pub(super) config: EmbedConfig,
    pub(super) appearance: Appearance,
    /// Set by `--dark`; pins the appearance regardless of the OS theme.
    pub(super) force_dark: bool,
    pub(super) proxy: EventLoopProxy<UserEvent>,
    pub(super) session_id: SessionId,
    /// Listeners outlive the window and webview they were created for.
    pub(super) listeners: SessionRegistry<dyn ConversationListener>,
    pub(super) window: Option<Arc<Window>>,
    pub(super) session: Option<ChatSession>,
    /// Captured when the webview is torn down, consumed on reattach.
    pub(super) snapshot: Option<SessionSnapshot>,
    pub(super) modifiers: ModifiersState,
}

impl EmbedChatApp {
    pub fn new(config: EmbedConfig, force_dark: bool, proxy: EventLoopProxy<UserEvent>) -> Self {
        Self {
            config,
            appearance: if force_dark {
                Appearance::Dark
            } else {
                Appearance::Light
            },
            force_dark,
            proxy,
            session_id: SessionId::from_key("main"),
            listeners: SessionRegistry::new(),
            window: None,
            session: None,
            snapshot: None,
            modifiers: ModifiersState::empty(),
        }
    }
}
