//! Colors and typography forwarded to the chat page.

use embedchat_common::Color;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChatColors {
    pub primary: Color,
    pub background: Color,
    pub bot_bubble: Color,
    pub bot_text: Color,
    pub user_bubble: Color,
    pub user_text: Color,
}

impl Default for ChatColors {
    fn default() -> Self {
        Self {
            primary: Color::from_argb(0xFF1F_6FEB),
            background: Color::WHITE,
            bot_bubble: Color::from_argb(0xFFF1_F3F5),
            bot_text: Color::from_argb(0xFF21_2529),
            user_bubble: Color::from_argb(0xFF1F_6FEB),
            user_text: Color::WHITE,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Typography {
    pub font_family: String,
    /// Base font size in pixels.
    pub font_size: u32,
}

impl Default for Typography {
    fn default() -> Self {
        Self {
            font_family: "system-ui".into(),
            font_size: 16,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChatStyle {
    pub colors: ChatColors,
    pub typography: Typography,
}

/// Where the sender label sits relative to a message bubble.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageLabelPlacement {
    /// Let the page decide.
    #[default]
    Default,
    Above,
    Below,
}

impl MessageLabelPlacement {
    pub fn as_token(self) -> &'static str {
        match self {
            Self::Default => "",
            Self::Above => "above",
            Self::Below => "below",
        }
    }
}
