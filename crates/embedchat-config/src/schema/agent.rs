//! Agent identity and endpoint selection.

use embedchat_common::PersistenceMode;
use serde::{Deserialize, Serialize};

/// Deployment the chat page is served from.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ApiHost {
    #[default]
    Prod,
    Eu,
    Sg,
    Staging,
    /// Developer machine serving the page with a self-signed certificate.
    Local,
}

impl ApiHost {
    pub fn host(self) -> &'static str {
        match self {
            Self::Prod => "chat.embedchat.io",
            Self::Eu => "eu.chat.embedchat.io",
            Self::Sg => "sg.chat.embedchat.io",
            Self::Staging => "staging.chat.embedchat.io",
            Self::Local => "localhost:8443",
        }
    }

    /// Only the local endpoint may bypass certificate validation.
    pub fn is_local_development(self) -> bool {
        matches!(self, Self::Local)
    }

    pub fn parse(name: &str) -> Option<Self> {
        match name.to_ascii_lowercase().as_str() {
            "prod" | "production" => Some(Self::Prod),
            "eu" => Some(Self::Eu),
            "sg" => Some(Self::Sg),
            "staging" => Some(Self::Staging),
            "local" => Some(Self::Local),
            _ => None,
        }
    }
}

/// Which agent to talk to and how its conversation state is kept.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AgentConfig {
    pub token: String,
    /// Optional routing target forwarded to the page.
    pub target: Option<String>,
    pub api_host: ApiHost,
    pub persistence_mode: PersistenceMode,
}

impl AgentConfig {
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            token: token.into(),
            ..Default::default()
        }
    }

    pub fn with_api_host(mut self, api_host: ApiHost) -> Self {
        self.api_host = api_host;
        self
    }

    pub fn with_persistence(mut self, mode: PersistenceMode) -> Self {
        self.persistence_mode = mode;
        self
    }

    pub fn with_target(mut self, target: impl Into<String>) -> Self {
        self.target = Some(target.into());
        self
    }

    /// `https://{host}/agent/{token}/mobile`
    pub fn base_url(&self) -> String {
        format!("https://{}/agent/{}/mobile", self.api_host.host(), self.token)
    }
}
