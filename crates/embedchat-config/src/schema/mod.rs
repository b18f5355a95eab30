//! Configuration schema types.
//!
//! All structs use `serde(default)` so partial configs work correctly.

mod agent;
mod chat;
mod conversation;
mod style;

pub use agent::*;
pub use chat::*;
pub use conversation::*;
pub use style::*;

use serde::{Deserialize, Serialize};

/// Root of a config file: the agent to reach and how its chat looks.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EmbedConfig {
    pub agent: AgentConfig,
    pub chat: ChatOptions,
}

impl EmbedConfig {
    pub fn new(agent: AgentConfig, chat: ChatOptions) -> Self {
        Self { agent, chat }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use embedchat_common::PersistenceMode;

    #[test]
    fn base_url_per_host() {
        let agent = AgentConfig::new("abc123");
        assert_eq!(agent.base_url(), "https://chat.embedchat.io/agent/abc123/mobile");

        let agent = agent.with_api_host(ApiHost::Eu);
        assert_eq!(agent.base_url(), "https://eu.chat.embedchat.io/agent/abc123/mobile");

        let agent = AgentConfig::new("t").with_api_host(ApiHost::Local);
        assert_eq!(agent.base_url(), "https://localhost:8443/agent/t/mobile");
    }

    #[test]
    fn only_local_is_local_development() {
        for host in [ApiHost::Prod, ApiHost::Eu, ApiHost::Sg, ApiHost::Staging] {
            assert!(!host.is_local_development());
        }
        assert!(ApiHost::Local.is_local_development());
    }

    #[test]
    fn api_host_parse() {
        assert_eq!(ApiHost::parse("PROD"), Some(ApiHost::Prod));
        assert_eq!(ApiHost::parse("production"), Some(ApiHost::Prod));
        assert_eq!(ApiHost::parse("sg"), Some(ApiHost::Sg));
        assert_eq!(ApiHost::parse("mars"), None);
    }

    #[test]
    fn label_placement_tokens() {
        assert_eq!(MessageLabelPlacement::Default.as_token(), "");
        assert_eq!(MessageLabelPlacement::Above.as_token(), "above");
        assert_eq!(MessageLabelPlacement::Below.as_token(), "below");
    }

    #[test]
    fn resolved_conversation_defaults_when_absent() {
        let options = ChatOptions::default();
        assert_eq!(options.resolved_conversation(), ConversationOptions::default());

        let options = options.with_conversation(ConversationOptions::default().with_variable("a", "1"));
        assert_eq!(options.resolved_conversation().variables["a"], "1");
    }

    #[test]
    fn configs_compare_by_value() {
        let a = EmbedConfig::new(AgentConfig::new("t"), ChatOptions::default());
        let mut b = a.clone();
        assert_eq!(a, b);

        b.chat.style.typography.font_size += 1;
        assert_ne!(a, b);

        let mut c = a.clone();
        c.agent.persistence_mode = PersistenceMode::Disk;
        assert_ne!(a, c);
    }

    #[test]
    fn config_json_roundtrip() {
        let config = EmbedConfig::new(
            AgentConfig::new("t").with_target("billing"),
            ChatOptions::default()
                .with_conversation(ConversationOptions::default().with_secret("jwt", "x")),
        );
        let json = serde_json::to_string(&config).unwrap();
        let back: EmbedConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(config, back);
    }
}
