//! `ApplicationHandler` implementation for the winit event loop.

use winit::application::ApplicationHandler;
use winit::event::{ElementState, KeyEvent, WindowEvent};
use winit::event_loop::ActiveEventLoop;
use winit::keyboard::{Key, ModifiersState};
use winit::window::WindowId;

use super::core::{EmbedChatApp, UserEvent};
use super::init::appearance_of;

/// Host actions bound to keyboard shortcuts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) enum Shortcut {
    PrintTranscript,
    EndConversation,
    ResetConversation,
}

/// Cmd/Ctrl+P prints, Cmd/Ctrl+E ends, Cmd/Ctrl+Shift+R starts over.
pub(super) fn shortcut_for(key: &Key, modifiers: ModifiersState) -> Option<Shortcut> {
    if !(modifiers.control_key() || modifiers.super_key()) {
        return None;
    }
    let Key::Character(c) = key else {
        return None;
    };
    match (c.to_ascii_lowercase().as_str(), modifiers.shift_key()) {
        ("p", false) => Some(Shortcut::PrintTranscript),
        ("e", false) => Some(Shortcut::EndConversation),
        ("r", true) => Some(Shortcut::ResetConversation),
        _ => None,
    }
}

impl EmbedChatApp {
    fn handle_keyboard_input(&mut self, event: KeyEvent) {
        if event.state != ElementState::Pressed || event.repeat {
            return;
        }
        let Some(shortcut) = shortcut_for(&event.logical_key, self.modifiers) else {
            return;
        };
        let Some(session) = self.session.as_mut() else {
            return;
        };
        tracing::debug!(?shortcut, "Shortcut");
        match shortcut {
            Shortcut::PrintTranscript => session.print_transcript(),
            Shortcut::EndConversation => session.end_conversation(),
            Shortcut::ResetConversation => {
                if let Err(e) = session.reset_conversation() {
                    tracing::warn!("Reset failed: {e}");
                }
            }
        }
    }

    fn handle_theme_changed(&mut self, theme: winit::window::Theme) {
        if self.force_dark {
            return;
        }
        self.appearance = appearance_of(theme);
        let environment = self.environment();
        if let Some(session) = self.session.as_mut() {
            if let Err(e) = session.on_environment_changed(environment) {
                tracing::warn!("Reload after theme change failed: {e}");
            }
        }
    }
}

impl ApplicationHandler<UserEvent> for EmbedChatApp {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_none() && !self.initialize_window(event_loop) {
            event_loop.exit();
            return;
        }
        if self.session.as_ref().is_some_and(|s| s.is_attached()) {
            return;
        }
        if !self.attach_webview() {
            event_loop.exit();
        }
    }

    fn suspended(&mut self, _event_loop: &ActiveEventLoop) {
        self.detach_webview();
    }

    fn user_event(&mut self, _event_loop: &ActiveEventLoop, event: UserEvent) {
        match event {
            UserEvent::ControlQueue => {
                if let Some(session) = self.session.as_mut() {
                    session.pump();
                }
            }
        }
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        match event {
            WindowEvent::CloseRequested => {
                tracing::info!("Window close requested");
                self.shutdown();
                event_loop.exit();
            }

            WindowEvent::Resized(size) => {
                if size.width > 0 && size.height > 0 {
                    if let Some(session) = &self.session {
                        session.resize(size.width, size.height);
                    }
                }
            }

            WindowEvent::ThemeChanged(theme) => self.handle_theme_changed(theme),

            WindowEvent::ModifiersChanged(new_modifiers) => {
                self.modifiers = new_modifiers.state();
            }

            WindowEvent::KeyboardInput { event, .. } => {
                self.handle_keyboard_input(event);
            }

            _ => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ch(s: &str) -> Key {
        Key::Character(s.into())
    }

    #[test]
    fn shortcuts_need_a_command_modifier() {
        assert_eq!(shortcut_for(&ch("p"), ModifiersState::empty()), None);
        assert_eq!(
            shortcut_for(&ch("p"), ModifiersState::CONTROL),
            Some(Shortcut::PrintTranscript)
        );
        assert_eq!(
            shortcut_for(&ch("e"), ModifiersState::SUPER),
            Some(Shortcut::EndConversation)
        );
    }

    #[test]
    fn reset_needs_shift() {
        assert_eq!(shortcut_for(&ch("r"), ModifiersState::CONTROL), None);
        assert_eq!(
            shortcut_for(&ch("R"), ModifiersState::CONTROL | ModifiersState::SHIFT),
            Some(Shortcut::ResetConversation)
        );
    }

    #[test]
    fn other_keys_do_nothing() {
        assert_eq!(shortcut_for(&ch("x"), ModifiersState::CONTROL), None);
        assert_eq!(
            shortcut_for(
                &Key::Named(winit::keyboard::NamedKey::Enter),
                ModifiersState::CONTROL
            ),
            None
        );
    }
}
