//! Chat presentation options.

use serde::{Deserialize, Serialize};

use super::conversation::ConversationOptions;
use super::style::{ChatStyle, MessageLabelPlacement};

/// Status lines shown while a conversation is handed to a human agent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TransferMessages {
    pub connecting: String,
    pub connected: String,
    pub unavailable: String,
    pub ended: String,
}

impl Default for TransferMessages {
    fn default() -> Self {
        Self {
            connecting: "Connecting you to an agent...".into(),
            connected: "You are now chatting with an agent.".into(),
            unavailable: "No agents are available right now.".into(),
            ended: "The agent has left the conversation.".into(),
        }
    }
}

/// Everything the host can say about how the chat looks and behaves.
///
/// Plain data, compared field by field on restore. The listener goes to the
/// session builder instead.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChatOptions {
    pub bot_name: String,
    pub greeting_message: String,
    pub error_message: String,
    pub transfer_messages: TransferMessages,
    pub input_placeholder: String,
    pub disclosure_text: Option<String>,
    pub conversation_ended_message: String,
    pub style: ChatStyle,
    pub message_label_placement: MessageLabelPlacement,

    pub hide_title_bar: bool,
    pub can_print_transcript: bool,
    pub can_end_conversation: bool,
    pub can_start_new_chat: bool,
    pub start_at_top: bool,
    pub pin_disclosure: bool,
    pub use_configured_chat_strings: bool,
    pub use_configured_style: bool,

    pub conversation: Option<ConversationOptions>,
}

impl Default for ChatOptions {
    fn default() -> Self {
        Self {
            bot_name: "Assistant".into(),
            greeting_message: String::new(),
            error_message: "Something went wrong. Please try again.".into(),
            transfer_messages: TransferMessages::default(),
            input_placeholder: "Type a message".into(),
            disclosure_text: None,
            conversation_ended_message: "This conversation has ended.".into(),
            style: ChatStyle::default(),
            message_label_placement: MessageLabelPlacement::Default,
            hide_title_bar: false,
            can_print_transcript: false,
            can_end_conversation: false,
            can_start_new_chat: false,
            start_at_top: false,
            pin_disclosure: false,
            use_configured_chat_strings: false,
            use_configured_style: false,
            conversation: None,
        }
    }
}

impl ChatOptions {
    /// The conversation options, defaulted when the host gave none.
    pub fn resolved_conversation(&self) -> ConversationOptions {
        self.conversation.clone().unwrap_or_default()
    }

    pub fn with_conversation(mut self, conversation: ConversationOptions) -> Self {
        self.conversation = Some(conversation);
        self
    }
}
