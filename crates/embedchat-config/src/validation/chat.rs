use crate::schema::ChatOptions;

use super::helpers::validate_range;

pub(super) fn validate_style(errors: &mut Vec<String>, chat: &ChatOptions) {
    let typography = &chat.style.typography;
    validate_range(errors, "chat.style.typography.font_size", typography.font_size, 1, 96);
    if typography.font_family.trim().is_empty() {
        errors.push("chat.style.typography.font_family must not be empty".into());
    }
}

pub(super) fn validate_conversation(errors: &mut Vec<String>, chat: &ChatOptions) {
    let Some(conversation) = &chat.conversation else {
        return;
    };

    // Names travel as `name:value`; the first ':' is the separator.
    for (section, map) in [
        ("variables", &conversation.variables),
        ("secrets", &conversation.secrets),
    ] {
        for name in map.keys() {
            if name.is_empty() {
                errors.push(format!("chat.conversation.{section} has an empty name"));
            } else if name.contains(':') {
                errors.push(format!(
                    "chat.conversation.{section} name '{name}' must not contain ':'"
                ));
            }
        }
    }
}
