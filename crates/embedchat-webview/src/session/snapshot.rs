//! Saved session state and the load-or-restore decision.

use std::collections::BTreeMap;

use embedchat_common::{Appearance, SessionError};
use embedchat_config::EmbedConfig;
use serde::{Deserialize, Serialize};

use crate::surface::SurfaceState;

/// Captured on detach, consumed on the next attach.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionSnapshot {
    /// Configuration the page was loaded with.
    pub config: EmbedConfig,
    /// Whether that load had succeeded.
    pub loaded: bool,
    pub appearance: Appearance,
    /// URL of the last load, including the device locale it was built for.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub launch_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub surface_state: Option<SurfaceState>,
    /// Memory-mode entries, so a recreated process can carry them over.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub entries: Option<BTreeMap<String, String>>,
}

impl SessionSnapshot {
    pub fn to_json(&self) -> Result<String, SessionError> {
        serde_json::to_string(self).map_err(|e| SessionError::Snapshot(e.to_string()))
    }

    pub fn from_json(json: &str) -> Result<Self, SessionError> {
        serde_json::from_str(json).map_err(|e| SessionError::Snapshot(e.to_string()))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RestoreDecision {
    /// Keep the page as it was; no load is issued.
    Restore,
    /// Load the launch URL. `clear_store` is set when the saved
    /// configuration differs from the current one.
    Reload { clear_store: bool },
}

/// Restore only when the configuration, appearance and launch URL all match
/// and the previous load had succeeded. `launch_url` is the URL the current
/// environment would load.
pub fn restore_decision(
    snapshot: Option<&SessionSnapshot>,
    config: &EmbedConfig,
    appearance: Appearance,
    launch_url: &str,
) -> RestoreDecision {
    let Some(snapshot) = snapshot else {
        return RestoreDecision::Reload { clear_store: false };
    };
    if snapshot.config != *config {
        return RestoreDecision::Reload { clear_store: true };
    }
    if snapshot.appearance != appearance
        || !snapshot.loaded
        || snapshot.launch_url.as_deref() != Some(launch_url)
    {
        return RestoreDecision::Reload { clear_store: false };
    }
    RestoreDecision::Restore
}
