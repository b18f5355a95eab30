//! Embeds the hosted chat page in a native webview.
//!
//! Provides:
//! - The launch URL that carries agent and chat options to the page
//! - The bridge the page calls into (storage, lifecycle events, secrets, print)
//! - Ordered delivery of conversation events to the host listener
//! - The session controller deciding load vs restore across view lifecycles
//! - A `wry` adapter for desktop hosts

pub mod bridge;
pub mod control;
pub mod dispatcher;
pub mod ipc;
pub mod launch_url;
pub mod listener;
pub mod navigation;
pub mod print;
pub mod registry;
pub mod session;
pub mod surface;
pub mod wry_host;

pub use bridge::{BridgeMessageHandler, BridgeReply};
pub use control::{ControlMessage, ControlQueue, SurfaceCommand};
pub use dispatcher::EventDispatcher;
pub use ipc::BridgeCall;
pub use launch_url::{build_launch_url, LaunchUrlBuilder};
pub use listener::{ConversationListener, ConversationTransfer, InitializationError, SecretResolver};
pub use navigation::{CertificateDecision, ExternalOpener, NavigationDecision, NavigationPolicy};
pub use print::{PrintSpooler, PrintSurface, PrintSurfaceFactory};
pub use registry::SessionRegistry;
pub use session::{ChatSession, ChatSessionBuilder, DisplayEnvironment, SessionSnapshot, SessionState};
pub use surface::{ChatSurface, SurfaceState};
pub use wry_host::{build_chat_webview, SurfaceOptions, WryPrintSurfaces, WrySurface};
