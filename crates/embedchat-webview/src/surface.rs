//! The embedded browser seen from the session.
//!
//! A surface lives on the control thread. The session only ever calls it
//! from `attach`, `pump` and the host actions, all of which run there.

use embedchat_common::SessionError;
use serde::{Deserialize, Serialize};

/// Opaque navigation/scroll state a surface can hand back on restore.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SurfaceState(pub Vec<u8>);

/// Capabilities the session needs from an embedded browser.
pub trait ChatSurface {
    fn load_url(&mut self, url: &str) -> Result<(), SessionError>;

    /// Fire-and-forget script evaluation.
    fn evaluate_script(&self, script: &str) -> Result<(), SessionError>;

    /// Capture state for a later [`ChatSurface::restore_state`]. Surfaces
    /// that cannot do this return `None`, which forces a reload on
    /// reattach.
    fn save_state(&self) -> Option<SurfaceState> {
        None
    }

    /// Returns `true` only if the state was fully restored.
    fn restore_state(&mut self, _state: &SurfaceState) -> bool {
        false
    }

    fn set_size(&self, _width: u32, _height: u32) -> Result<(), SessionError> {
        Ok(())
    }
}

/// `about:blank`, loaded after a primary-URL failure.
pub const BLANK_PAGE: &str = "about:blank";
