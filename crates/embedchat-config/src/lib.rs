//! Embedded chat configuration.
//!
//! Agent identity, chat presentation options and per-conversation options
//! as plain serde value objects, with TOML loading and validation. All
//! sections use defaults so partial configs work out of the box.
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use embedchat_config::{load_config, config_to_json};
//!
//! let config = load_config(None).expect("failed to load config");
//! println!("{}", config_to_json(&config));
//! ```

pub mod greeting;
pub mod schema;
pub mod toml_loader;
pub mod validation;

pub use greeting::effective_greeting;
pub use schema::{
    AgentConfig, ApiHost, ChatColors, ChatOptions, ChatStyle, ConversationOptions, EmbedConfig,
    MessageLabelPlacement, TransferMessages, Typography,
};
pub use toml_loader::{default_config_path, load_default, load_from_path};
pub use validation::validate;

use embedchat_common::ConfigError;
use std::path::Path;

/// Load config from `path`, or from the platform default location when no
/// path is given, and validate it.
pub fn load_config(path: Option<&Path>) -> Result<EmbedConfig, ConfigError> {
    let config = match path {
        Some(p) => load_from_path(p)?,
        None => load_default()?,
    };
    validate(&config)?;
    Ok(config)
}

/// Serialize a config to a pretty-printed JSON string.
pub fn config_to_json(config: &EmbedConfig) -> String {
    serde_json::to_string_pretty(config)
        .unwrap_or_else(|e| format!("{{\"error\": \"failed to serialize config: {e}\"}}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_to_json_contains_sections() {
        let config = EmbedConfig::default();
        let json = config_to_json(&config);
        assert!(json.contains("\"agent\""));
        assert!(json.contains("\"chat\""));
        assert!(json.contains("\"typography\""));
    }

    #[test]
    fn load_config_validates() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[agent]\ntoken = \"\"\n").unwrap();
        assert!(matches!(
            load_config(Some(&path)),
            Err(ConfigError::ValidationError(_))
        ));

        std::fs::write(&path, "[agent]\ntoken = \"acme\"\n").unwrap();
        assert_eq!(load_config(Some(&path)).unwrap().agent.token, "acme");
    }
}
