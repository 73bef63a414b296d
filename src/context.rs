//! Parse configuration: locale and trigger phrases

use serde::Deserialize;
use tracing::warn;

/// Trigger phrases used when none are configured
pub const DEFAULT_PREFIXES: [&str; 2] = ["voicemark", "voice mark"];

/// Locale controlling phrase aliases
#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
pub enum Locale {
    /// Baseline grammar ("full stop")
    #[default]
    #[serde(rename = "default", alias = "en-GB")]
    Default,
    /// Alternate grammar where "period" means "full stop"
    #[serde(rename = "alt", alias = "en-US")]
    Alt,
}

impl Locale {
    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "default" | "en-gb" => Some(Locale::Default),
            "alt" | "en-us" => Some(Locale::Alt),
            _ => None,
        }
    }

    /// Phrase aliases active for this locale, as (spoken, canonical)
    pub fn aliases(&self) -> &'static [(&'static str, &'static str)] {
        match self {
            Locale::Default => &[],
            Locale::Alt => &[("period", "full stop")],
        }
    }
}

/// Configuration shared by every compile call
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseContext {
    locale: Locale,
    prefixes: Vec<String>,
}

impl Default for ParseContext {
    fn default() -> Self {
        Self {
            locale: Locale::Default,
            prefixes: DEFAULT_PREFIXES.iter().map(|p| p.to_string()).collect(),
        }
    }
}

impl ParseContext {
    /// Build a context. Prefixes are lowercased and whitespace-collapsed;
    /// blank ones are dropped, and an empty set falls back to the defaults.
    pub fn new<S: AsRef<str>>(locale: Locale, prefixes: &[S]) -> Self {
        let mut normalized: Vec<String> = Vec::with_capacity(prefixes.len());
        for prefix in prefixes {
            let p = collapse_whitespace(&prefix.as_ref().to_lowercase());
            if !p.is_empty() && !normalized.contains(&p) {
                normalized.push(p);
            }
        }

        if normalized.is_empty() {
            warn!(
                "No usable trigger phrases configured, falling back to {:?}",
                DEFAULT_PREFIXES
            );
            return Self {
                locale,
                ..Self::default()
            };
        }

        Self {
            locale,
            prefixes: normalized,
        }
    }

    pub fn with_locale(mut self, locale: Locale) -> Self {
        self.locale = locale;
        self
    }

    pub fn locale(&self) -> Locale {
        self.locale
    }

    /// Trigger phrases in scan order
    pub fn prefixes(&self) -> &[String] {
        &self.prefixes
    }
}

/// Trim and join words with single spaces
pub(crate) fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_context() {
        let ctx = ParseContext::default();
        assert_eq!(ctx.locale(), Locale::Default);
        assert_eq!(ctx.prefixes(), &["voicemark", "voice mark"]);
    }

    #[test]
    fn test_prefixes_are_normalized() {
        let ctx = ParseContext::new(Locale::Alt, &["  Hey   Editor ", "NOTE", "note"]);
        assert_eq!(ctx.prefixes(), &["hey editor", "note"]);
        assert_eq!(ctx.locale(), Locale::Alt);
    }

    #[test]
    fn test_empty_prefixes_fall_back() {
        let empty: [&str; 0] = [];
        let ctx = ParseContext::new(Locale::Alt, &empty);
        assert_eq!(ctx.prefixes(), &["voicemark", "voice mark"]);
        assert_eq!(ctx.locale(), Locale::Alt);

        let blank = ParseContext::new(Locale::Default, &["   ", ""]);
        assert_eq!(blank.prefixes(), ParseContext::default().prefixes());
    }

    #[test]
    fn test_locale_from_str() {
        assert_eq!(Locale::from_str("alt"), Some(Locale::Alt));
        assert_eq!(Locale::from_str("en-US"), Some(Locale::Alt));
        assert_eq!(Locale::from_str("Default"), Some(Locale::Default));
        assert_eq!(Locale::from_str("fr"), None);
    }

    #[test]
    fn test_alias_table() {
        assert!(Locale::Default.aliases().is_empty());
        assert_eq!(Locale::Alt.aliases(), &[("period", "full stop")]);
    }
}
