//! Greeting reconciliation.
//!
//! A greeting can come from `ChatOptions::greeting_message` or from the
//! newer `ConversationOptions::greeting`. This is the one place the two are
//! reconciled.

use crate::schema::ChatOptions;

/// The greeting to send to the page, if any.
///
/// The conversation-level greeting wins when both are set; the chat-level
/// message is used only when it is non-empty.
pub fn effective_greeting(options: &ChatOptions) -> Option<String> {
    let conversation = options
        .conversation
        .as_ref()
        .and_then(|c| c.greeting.as_deref())
        .filter(|g| !g.is_empty());

    conversation
        .or_else(|| Some(options.greeting_message.as_str()).filter(|g| !g.is_empty()))
        .map(str::to_owned)
}
