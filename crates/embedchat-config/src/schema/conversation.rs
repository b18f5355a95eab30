//! Per-conversation options.

use std::collections::BTreeMap;

use embedchat_common::LanguageTag;
use serde::{Deserialize, Serialize};

/// Options scoped to one conversation. Maps are ordered so the launch URL
/// is identical for identical options.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConversationOptions {
    pub variables: BTreeMap<String, String>,
    pub secrets: BTreeMap<String, String>,
    /// Overrides the device locale when set.
    pub locale: Option<LanguageTag>,
    /// Overrides `ChatOptions::greeting_message` when set.
    pub greeting: Option<String>,
    pub contact_center: bool,
}

impl ConversationOptions {
    pub fn with_variable(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.variables.insert(name.into(), value.into());
        self
    }

    pub fn with_secret(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.secrets.insert(name.into(), value.into());
        self
    }

    pub fn with_locale(mut self, locale: LanguageTag) -> Self {
        self.locale = Some(locale);
        self
    }

    pub fn with_greeting(mut self, greeting: impl Into<String>) -> Self {
        self.greeting = Some(greeting.into());
        self
    }
}
