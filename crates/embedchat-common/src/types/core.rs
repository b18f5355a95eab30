use serde::{Deserialize, Serialize};
use std::fmt;

/// Light or dark UI appearance. A change forces the chat to reload so the
/// page picks up the new scheme.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Appearance {
    #[default]
    Light,
    Dark,
}

impl fmt::Display for Appearance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Light => f.write_str("light"),
            Self::Dark => f.write_str("dark"),
        }
    }
}

/// Where conversation key/value state lives.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PersistenceMode {
    /// Nothing is kept; reads always miss.
    None,
    /// Kept for the lifetime of the process.
    #[default]
    Memory,
    /// Mirrored to a durable per-agent store.
    Disk,
}
