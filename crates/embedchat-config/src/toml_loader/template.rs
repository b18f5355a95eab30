//! Default TOML config template with inline documentation comments.

/// Generate the default TOML config content with comments.
pub(crate) fn default_config_toml() -> String {
    r##"# Embedded chat configuration
# Only override what you want to change -- missing fields use defaults.

[agent]
# Agent token from the dashboard (letters, digits, '-' and '_').
token = ""
# target = "billing"
# api_host = "prod"          # prod | eu | sg | staging | local
# persistence_mode = "memory" # none | memory | disk

[chat]
# bot_name = "Assistant"
# greeting_message = ""
# error_message = "Something went wrong. Please try again."
# input_placeholder = "Type a message"
# disclosure_text = "Conversations may be recorded."
# conversation_ended_message = "This conversation has ended."
# message_label_placement = "default"   # default | above | below
# hide_title_bar = false
# can_print_transcript = false
# can_end_conversation = false
# can_start_new_chat = false
# start_at_top = false
# pin_disclosure = false
# use_configured_chat_strings = false
# use_configured_style = false

[chat.transfer_messages]
# connecting = "Connecting you to an agent..."
# connected = "You are now chatting with an agent."
# unavailable = "No agents are available right now."
# ended = "The agent has left the conversation."

[chat.style.colors]
# primary = "#1F6FEB"
# background = "#FFFFFF"
# bot_bubble = "#F1F3F5"
# bot_text = "#212529"
# user_bubble = "#1F6FEB"
# user_text = "#FFFFFF"

[chat.style.typography]
# font_family = "system-ui"
# font_size = 16             # 1-96

# [chat.conversation]
# locale = "en-US"
# greeting = "Hi there!"
# contact_center = false
#
# [chat.conversation.variables]
# plan = "pro"
#
# [chat.conversation.secrets]
# jwt = "..."
"##
    .to_string()
}
