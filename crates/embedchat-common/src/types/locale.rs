use serde::{Deserialize, Serialize};
use std::fmt;

/// A BCP-47 language tag such as `en-US`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct LanguageTag(String);

impl LanguageTag {
    /// Parse a tag. POSIX locale strings (`en_US.UTF-8`, `de_DE@euro`) are
    /// accepted and normalized: language lower-case, region upper-case,
    /// subtags joined with `-`.
    pub fn parse(raw: &str) -> Option<Self> {
        let base = raw
            .split(['.', '@'])
            .next()
            .unwrap_or_default()
            .trim();
        if base.is_empty() || base.eq_ignore_ascii_case("c") || base.eq_ignore_ascii_case("posix")
        {
            return None;
        }

        let mut parts = base.split(['-', '_']);
        let language = parts.next()?;
        if !(2..=3).contains(&language.len()) || !language.chars().all(|c| c.is_ascii_alphabetic())
        {
            return None;
        }

        let mut tag = language.to_ascii_lowercase();
        for subtag in parts {
            if subtag.is_empty()
                || subtag.len() > 8
                || !subtag.chars().all(|c| c.is_ascii_alphanumeric())
            {
                return None;
            }
            tag.push('-');
            match subtag.len() {
                2 => tag.push_str(&subtag.to_ascii_uppercase()),
                4 => {
                    // Script subtag: title case (e.g. `Hant`).
                    let mut chars = subtag.chars();
                    if let Some(first) = chars.next() {
                        tag.push(first.to_ascii_uppercase());
                        tag.push_str(&chars.as_str().to_ascii_lowercase());
                    }
                }
                _ => tag.push_str(&subtag.to_ascii_lowercase()),
            }
        }
        Some(Self(tag))
    }

    /// Device locale from `LC_ALL`, `LC_MESSAGES` or `LANG`, falling back
    /// to `en-US`.
    pub fn from_env() -> Self {
        ["LC_ALL", "LC_MESSAGES", "LANG"]
            .iter()
            .filter_map(|var| std::env::var(var).ok())
            .find_map(|value| Self::parse(&value))
            .unwrap_or_default()
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The primary language subtag (`en` for `en-US`).
    pub fn language(&self) -> &str {
        self.0.split('-').next().unwrap_or(&self.0)
    }
}

impl Default for LanguageTag {
    fn default() -> Self {
        Self("en-US".to_string())
    }
}

impl fmt::Display for LanguageTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for LanguageTag {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value).ok_or_else(|| format!("invalid language tag '{value}'"))
    }
}

impl From<LanguageTag> for String {
    fn from(tag: LanguageTag) -> Self {
        tag.0
    }
}
