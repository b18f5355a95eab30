//! Configuration validation.
//!
//! Each section has its own check; this orchestrator runs them all and
//! collects errors into a single `ConfigError`.

mod agent;
mod chat;
mod helpers;


use crate::schema::EmbedConfig;
use embedchat_common::ConfigError;

/// Run all validations on a config, collecting all errors.
pub fn validate(config: &EmbedConfig) -> Result<(), ConfigError> {
    let mut errors: Vec<String> = Vec::new();

    agent::validate_agent(&mut errors, &config.agent);
    chat::validate_style(&mut errors, &config.chat);
    chat::validate_conversation(&mut errors, &config.chat);

    if errors.is_empty() {
        Ok(())
    } else {
        Err(ConfigError::ValidationError(errors.join("; ")))
    }
}
