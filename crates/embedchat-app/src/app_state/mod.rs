//! Top-level application state.
//!
//! Implements `winit::application::ApplicationHandler` to drive the main
//! event loop. Owns the window, the chat session, and the snapshot kept
//! while the webview is torn down.

mod core;
mod event_handler;
mod init;
mod listener;
mod opener;
mod shutdown;

pub use core::{EmbedChatApp, UserEvent};
