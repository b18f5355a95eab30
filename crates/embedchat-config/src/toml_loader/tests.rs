//! Tests for TOML config loading, creation, and path resolution.

use super::*;
use crate::schema::{ApiHost, MessageLabelPlacement};
use embedchat_common::{Color, ConfigError, LanguageTag, PersistenceMode};
use std::path::Path;

#[test]
fn load_from_nonexistent_returns_file_not_found() {
    let result = load_from_path(Path::new("/tmp/nonexistent_embedchat_config.toml"));
    assert!(matches!(result, Err(ConfigError::FileNotFound(_))));
}

#[test]
fn load_valid_partial_toml() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.toml");
    std::fs::write(
        &path,
        r##"
[agent]
token = "acme"
api_host = "eu"
persistence_mode = "disk"

[chat]
bot_name = "Ada"
can_print_transcript = true
message_label_placement = "below"

[chat.style.colors]
primary = "#FF0000"

[chat.conversation]
locale = "fr_CA"

[chat.conversation.variables]
plan = "pro"
"##,
    )
    .unwrap();

    let config = load_from_path(&path).unwrap();
    assert_eq!(config.agent.token, "acme");
    assert_eq!(config.agent.api_host, ApiHost::Eu);
    assert_eq!(config.agent.persistence_mode, PersistenceMode::Disk);
    assert_eq!(config.chat.bot_name, "Ada");
    assert!(config.chat.can_print_transcript);
    assert_eq!(config.chat.message_label_placement, MessageLabelPlacement::Below);
    assert_eq!(config.chat.style.colors.primary, Color::from_argb(0xFFFF_0000));

    let conversation = config.chat.conversation.unwrap();
    assert_eq!(conversation.locale, LanguageTag::parse("fr-CA"));
    assert_eq!(conversation.variables["plan"], "pro");

    // Defaults preserved
    assert_eq!(config.chat.style.typography.font_size, 16);
    assert!(!config.chat.hide_title_bar);
}

#[test]
fn load_invalid_toml_returns_parse_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.toml");
    std::fs::write(&path, "this is not valid toml {{{").unwrap();

    let result = load_from_path(&path);
    assert!(matches!(result, Err(ConfigError::ParseError(_))));
}

#[test]
fn load_bad_color_returns_parse_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.toml");
    std::fs::write(&path, "[chat.style.colors]\nprimary = \"blue\"\n").unwrap();

    let err = load_from_path(&path).unwrap_err();
    assert!(err.to_string().contains("invalid color"));
}

#[test]
fn template_parses_to_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("nested").join("config.toml");
    create_default_config(&path).unwrap();
    assert!(path.exists());

    let config = load_from_path(&path).unwrap();
    assert_eq!(config, crate::schema::EmbedConfig::default());
}

#[test]
fn default_config_path_ends_with_app_dir() {
    let path = default_config_path().unwrap();
    assert_eq!(path.file_name().unwrap(), "config.toml");
    assert!(path.parent().unwrap().ends_with("embedchat"));
}
