//! Launch URL construction.
//!
//! The chat page reads its whole configuration from the query string of the
//! URL it is loaded with. Parameter names and encodings are a wire contract
//! with the page. Output is deterministic for identical input, which the
//! session relies on to tell whether a reload is needed.

use embedchat_common::{LanguageTag, SessionError};
use embedchat_config::{effective_greeting, AgentConfig, ChatOptions, ChatStyle};
use serde::Serialize;
use url::Url;

/// Responsive size keys the page expects; each gets the same font size.
const FONT_SIZE_KEYS: [&str; 5] = ["xs", "sm", "md", "lg", "xl"];

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct Brand<'a> {
    bot_name: &'a str,
    greeting_message: &'a str,
    error_message: &'a str,
    transfer_messages: TransferStrings<'a>,
    style: StylePayload,
    message_label_placement: &'static str,
}

#[derive(Serialize)]
struct TransferStrings<'a> {
    connecting: &'a str,
    connected: &'a str,
    unavailable: &'a str,
    ended: &'a str,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct StylePayload {
    colors: ColorPayload,
    typography: TypographyPayload,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ColorPayload {
    primary: String,
    background: String,
    bot_bubble: String,
    bot_text: String,
    user_bubble: String,
    user_text: String,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct TypographyPayload {
    font_family: String,
    font_size: serde_json::Map<String, serde_json::Value>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ChatInterfaceStrings<'a> {
    input_placeholder: &'a str,
    disclosure_text: &'a str,
    conversation_ended_message: &'a str,
}

impl From<&ChatStyle> for StylePayload {
    fn from(style: &ChatStyle) -> Self {
        let c = &style.colors;
        let size = format!("{}px", style.typography.font_size);
        Self {
            colors: ColorPayload {
                primary: c.primary.to_rgb_hex(),
                background: c.background.to_rgb_hex(),
                bot_bubble: c.bot_bubble.to_rgb_hex(),
                bot_text: c.bot_text.to_rgb_hex(),
                user_bubble: c.user_bubble.to_rgb_hex(),
                user_text: c.user_text.to_rgb_hex(),
            },
            typography: TypographyPayload {
                font_family: style.typography.font_family.clone(),
                font_size: FONT_SIZE_KEYS
                    .iter()
                    .map(|k| (k.to_string(), serde_json::Value::String(size.clone())))
                    .collect(),
            },
        }
    }
}

fn to_json(value: &impl Serialize) -> Result<String, SessionError> {
    serde_json::to_string(value).map_err(|e| SessionError::InvalidConfig(e.to_string()))
}

/// Builds the URL the chat page is loaded from.
pub struct LaunchUrlBuilder<'a> {
    agent: &'a AgentConfig,
    options: &'a ChatOptions,
    device_locale: &'a LanguageTag,
}

impl<'a> LaunchUrlBuilder<'a> {
    pub fn new(agent: &'a AgentConfig, options: &'a ChatOptions, device_locale: &'a LanguageTag) -> Self {
        Self {
            agent,
            options,
            device_locale,
        }
    }

    fn brand(&self) -> Brand<'a> {
        let o = self.options;
        Brand {
            bot_name: &o.bot_name,
            greeting_message: &o.greeting_message,
            error_message: &o.error_message,
            transfer_messages: TransferStrings {
                connecting: &o.transfer_messages.connecting,
                connected: &o.transfer_messages.connected,
                unavailable: &o.transfer_messages.unavailable,
                ended: &o.transfer_messages.ended,
            },
            style: StylePayload::from(&o.style),
            message_label_placement: o.message_label_placement.as_token(),
        }
    }

    fn interface_strings(&self) -> ChatInterfaceStrings<'a> {
        let o = self.options;
        ChatInterfaceStrings {
            input_placeholder: &o.input_placeholder,
            disclosure_text: o.disclosure_text.as_deref().unwrap_or(""),
            conversation_ended_message: &o.conversation_ended_message,
        }
    }

    pub fn build(&self) -> Result<Url, SessionError> {
        let base = self.agent.base_url();
        let mut url = Url::parse(&base)
            .map_err(|e| SessionError::InvalidConfig(format!("bad base url {base}: {e}")))?;

        let options = self.options;
        let conversation = options.resolved_conversation();
        let brand = to_json(&self.brand())?;
        let strings = to_json(&self.interface_strings())?;

        {
            let mut query = url.query_pairs_mut();

            if let Some(target) = self.agent.target.as_deref().filter(|t| !t.is_empty()) {
                query.append_pair("target", target);
            }
            query.append_pair("brand", &brand);
            query.append_pair("chatInterfaceStrings", &strings);
            if options.hide_title_bar {
                query.append_pair("hideTitleBar", "true");
            }
            query.append_pair("persistenceMode", "custom");

            let locale = conversation.locale.as_ref().unwrap_or(self.device_locale);
            query.append_pair("locale", locale.as_str());

            for (name, value) in &conversation.variables {
                query.append_pair("variable", &format!("{name}:{value}"));
            }
            for (name, value) in &conversation.secrets {
                query.append_pair("secret", &format!("{name}:{value}"));
            }

            if let Some(greeting) = effective_greeting(options) {
                query.append_pair("greeting", &greeting);
            }
            query.append_pair(
                "enableContactCenter",
                if conversation.contact_center { "true" } else { "false" },
            );

            for (name, enabled) in [
                ("canPrintTranscript", options.can_print_transcript),
                ("canEndConversation", options.can_end_conversation),
                ("canStartNewChat", options.can_start_new_chat),
                ("startAtTop", options.start_at_top),
                ("pinDisclosure", options.pin_disclosure),
                ("useConfiguredChatStrings", options.use_configured_chat_strings),
                ("useConfiguredStyle", options.use_configured_style),
            ] {
                if enabled {
                    query.append_pair(name, "true");
                }
            }
        }

        Ok(url)
    }
}

/// Convenience wrapper returning the URL as a string.
pub fn build_launch_url(
    agent: &AgentConfig,
    options: &ChatOptions,
    device_locale: &LanguageTag,
) -> Result<String, SessionError> {
    LaunchUrlBuilder::new(agent, options, device_locale)
        .build()
        .map(String::from)
}

#[cfg(test)]
mod tests {
    use super::*;
    use embedchat_common::Color;
    use embedchat_config::{ConversationOptions, MessageLabelPlacement};
    use serde_json::Value;

    fn en_us() -> LanguageTag {
        LanguageTag::parse("en-US").unwrap()
    }

    fn pairs(url: &str) -> Vec<(String, String)> {
        Url::parse(url)
            .unwrap()
            .query_pairs()
            .map(|(k, v)| (k.into_owned(), v.into_owned()))
            .collect()
    }

    fn values<'a>(pairs: &'a [(String, String)], key: &str) -> Vec<&'a str> {
        pairs
            .iter()
            .filter(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
            .collect()
    }

    fn one(pairs: &[(String, String)], key: &str) -> Option<String> {
        let found = values(pairs, key);
        assert!(found.len() <= 1, "{key} appears {} times", found.len());
        found.first().map(|s| s.to_string())
    }

    fn launch(agent: &AgentConfig, options: &ChatOptions) -> Vec<(String, String)> {
        pairs(&build_launch_url(agent, options, &en_us()).unwrap())
    }

    #[test]
    fn starts_with_base_url() {
        let url = build_launch_url(&AgentConfig::new("acme"), &ChatOptions::default(), &en_us())
            .unwrap();
        assert!(url.starts_with("https://chat.embedchat.io/agent/acme/mobile?"));
    }

    #[test]
    fn deterministic_for_identical_input() {
        let agent = AgentConfig::new("acme").with_target("sales");
        let options = ChatOptions::default().with_conversation(
            ConversationOptions::default()
                .with_variable("b", "2")
                .with_variable("a", "1")
                .with_secret("jwt", "x"),
        );
        let first = build_launch_url(&agent, &options, &en_us()).unwrap();
        let second = build_launch_url(&agent.clone(), &options.clone(), &en_us()).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn always_present_parameters() {
        let p = launch(&AgentConfig::new("acme"), &ChatOptions::default());
        assert!(one(&p, "brand").is_some());
        assert!(one(&p, "chatInterfaceStrings").is_some());
        assert_eq!(one(&p, "persistenceMode").as_deref(), Some("custom"));
        assert_eq!(one(&p, "enableContactCenter").as_deref(), Some("false"));
        assert_eq!(one(&p, "locale").as_deref(), Some("en-US"));
        assert_eq!(one(&p, "target"), None);
        assert_eq!(one(&p, "greeting"), None);
        assert_eq!(one(&p, "hideTitleBar"), None);
    }

    #[test]
    fn parameter_order_is_stable() {
        let agent = AgentConfig::new("acme").with_target("sales");
        let options = ChatOptions {
            hide_title_bar: true,
            greeting_message: "hi".into(),
            can_print_transcript: true,
            ..Default::default()
        };
        let keys: Vec<String> = launch(&agent, &options).into_iter().map(|(k, _)| k).collect();
        assert_eq!(
            keys,
            vec![
                "target",
                "brand",
                "chatInterfaceStrings",
                "hideTitleBar",
                "persistenceMode",
                "locale",
                "greeting",
                "enableContactCenter",
                "canPrintTranscript",
            ]
        );
    }

    #[test]
    fn empty_target_is_omitted() {
        let mut agent = AgentConfig::new("acme");
        agent.target = Some(String::new());
        assert_eq!(one(&launch(&agent, &ChatOptions::default()), "target"), None);
    }

    #[test]
    fn optional_flags_present_only_when_true() {
        const FLAGS: [&str; 7] = [
            "canPrintTranscript",
            "canEndConversation",
            "canStartNewChat",
            "startAtTop",
            "pinDisclosure",
            "useConfiguredChatStrings",
            "useConfiguredStyle",
        ];

        let off = launch(&AgentConfig::new("t"), &ChatOptions::default());
        for flag in FLAGS {
            assert_eq!(one(&off, flag), None, "{flag} should be absent");
        }

        let on = ChatOptions {
            can_print_transcript: true,
            can_end_conversation: true,
            can_start_new_chat: true,
            start_at_top: true,
            pin_disclosure: true,
            use_configured_chat_strings: true,
            use_configured_style: true,
            ..Default::default()
        };
        let on = launch(&AgentConfig::new("t"), &on);
        for flag in FLAGS {
            assert_eq!(one(&on, flag).as_deref(), Some("true"), "{flag}");
        }

        let only_one = ChatOptions {
            pin_disclosure: true,
            ..Default::default()
        };
        let only_one = launch(&AgentConfig::new("t"), &only_one);
        for flag in FLAGS {
            let expected = (flag == "pinDisclosure").then(|| "true".to_string());
            assert_eq!(one(&only_one, flag), expected, "{flag}");
        }
    }

    #[test]
    fn variables_and_secrets_use_repeated_keys() {
        let options = ChatOptions::default().with_conversation(
            ConversationOptions::default()
                .with_variable("plan", "pro")
                .with_variable("region", "eu:west")
                .with_secret("jwt", "abc"),
        );
        let p = launch(&AgentConfig::new("t"), &options);

        let variables = values(&p, "variable");
        assert_eq!(variables, vec!["plan:pro", "region:eu:west"]);

        let decoded: Vec<(&str, &str)> = variables
            .iter()
            .map(|v| v.split_once(':').unwrap())
            .collect();
        assert_eq!(decoded, vec![("plan", "pro"), ("region", "eu:west")]);

        assert_eq!(values(&p, "secret"), vec!["jwt:abc"]);
    }

    #[test]
    fn conversation_locale_overrides_device() {
        let options = ChatOptions::default().with_conversation(
            ConversationOptions::default().with_locale(LanguageTag::parse("fr_CA").unwrap()),
        );
        let p = launch(&AgentConfig::new("t"), &options);
        assert_eq!(one(&p, "locale").as_deref(), Some("fr-CA"));

        let device = LanguageTag::parse("de-DE").unwrap();
        let url = build_launch_url(&AgentConfig::new("t"), &ChatOptions::default(), &device).unwrap();
        assert_eq!(one(&pairs(&url), "locale").as_deref(), Some("de-DE"));
    }

    #[test]
    fn greeting_precedence() {
        let chat_only = ChatOptions {
            greeting_message: "from chat".into(),
            ..Default::default()
        };
        assert_eq!(
            one(&launch(&AgentConfig::new("t"), &chat_only), "greeting").as_deref(),
            Some("from chat")
        );

        let both = chat_only.with_conversation(ConversationOptions::default().with_greeting("from conversation"));
        assert_eq!(
            one(&launch(&AgentConfig::new("t"), &both), "greeting").as_deref(),
            Some("from conversation")
        );
    }

    #[test]
    fn contact_center_flag_is_stringified() {
        let options = ChatOptions::default().with_conversation(ConversationOptions {
            contact_center: true,
            ..Default::default()
        });
        assert_eq!(
            one(&launch(&AgentConfig::new("t"), &options), "enableContactCenter").as_deref(),
            Some("true")
        );
    }

    #[test]
    fn brand_payload_shape() {
        let mut options = ChatOptions {
            bot_name: "Ada".into(),
            message_label_placement: MessageLabelPlacement::Above,
            ..Default::default()
        };
        options.style.colors.primary = Color::from_argb(0xFF12_34AB);
        options.style.typography.font_family = "Inter".into();
        options.style.typography.font_size = 18;

        let p = launch(&AgentConfig::new("t"), &options);
        let brand: Value = serde_json::from_str(&one(&p, "brand").unwrap()).unwrap();

        assert_eq!(brand["botName"], "Ada");
        assert_eq!(brand["messageLabelPlacement"], "above");
        assert_eq!(brand["style"]["colors"]["primary"], "#1234AB");
        assert_eq!(brand["style"]["typography"]["fontFamily"], "Inter");
        for key in FONT_SIZE_KEYS {
            assert_eq!(brand["style"]["typography"]["fontSize"][key], "18px");
        }
        assert!(brand["transferMessages"]["connecting"].is_string());
    }

    #[test]
    fn default_label_placement_is_empty_string() {
        let p = launch(&AgentConfig::new("t"), &ChatOptions::default());
        let brand: Value = serde_json::from_str(&one(&p, "brand").unwrap()).unwrap();
        assert_eq!(brand["messageLabelPlacement"], "");
    }

    #[test]
    fn interface_strings_default_disclosure_to_empty() {
        let p = launch(&AgentConfig::new("t"), &ChatOptions::default());
        let strings: Value = serde_json::from_str(&one(&p, "chatInterfaceStrings").unwrap()).unwrap();
        assert_eq!(strings["disclosureText"], "");
        assert_eq!(strings["inputPlaceholder"], "Type a message");

        let with = ChatOptions {
            disclosure_text: Some("Recorded".into()),
            ..Default::default()
        };
        let p = launch(&AgentConfig::new("t"), &with);
        let strings: Value = serde_json::from_str(&one(&p, "chatInterfaceStrings").unwrap()).unwrap();
        assert_eq!(strings["disclosureText"], "Recorded");
    }
}
