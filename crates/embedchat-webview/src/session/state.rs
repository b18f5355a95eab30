use std::fmt;

use embedchat_common::{Appearance, LanguageTag};

/// Load state of the chat page.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SessionState {
    #[default]
    Uninitialized,
    Loading,
    Loaded,
    Error,
}

impl fmt::Display for SessionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Uninitialized => "uninitialized",
            Self::Loading => "loading",
            Self::Loaded => "loaded",
            Self::Error => "error",
        };
        f.write_str(name)
    }
}

/// What the display currently looks like. A change in either field can
/// require the page to be reloaded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisplayEnvironment {
    pub locale: LanguageTag,
    pub appearance: Appearance,
}

impl DisplayEnvironment {
    pub fn new(locale: LanguageTag, appearance: Appearance) -> Self {
        Self { locale, appearance }
    }

    /// Device locale from the process environment.
    pub fn from_env(appearance: Appearance) -> Self {
        Self::new(LanguageTag::from_env(), appearance)
    }
}

impl Default for DisplayEnvironment {
    fn default() -> Self {
        Self::new(LanguageTag::default(), Appearance::default())
    }
}
