use crate::context::{DEFAULT_PREFIXES, Locale, ParseContext};
use crate::editor::DEFAULT_HISTORY_SIZE;
use serde::Deserialize;
use std::fs;
use std::path::Path;
use tracing::warn;

/// Default config file looked up in the working directory
pub const DEFAULT_CONFIG_PATH: &str = "voicemark.toml";

#[derive(Debug, Deserialize, Default, PartialEq)]
pub struct Config {
    #[serde(default)]
    pub commands: CommandsConfig,
    #[serde(default)]
    pub editor: EditorConfig,
}

// ============================================================================
// Commands Config
// ============================================================================

#[derive(Debug, Deserialize, PartialEq)]
pub struct CommandsConfig {
    /// Grammar locale: "default" or "alt" ("period" means "full stop")
    #[serde(default)]
    pub locale: Locale,

    /// Trigger phrases, in scan order
    #[serde(default = "default_prefixes")]
    pub prefixes: Vec<String>,
}

impl Default for CommandsConfig {
    fn default() -> Self {
        Self {
            locale: Locale::default(),
            prefixes: default_prefixes(),
        }
    }
}

fn default_prefixes() -> Vec<String> {
    DEFAULT_PREFIXES.iter().map(|p| p.to_string()).collect()
}

// ============================================================================
// Editor Config
// ============================================================================

#[derive(Debug, Deserialize, PartialEq)]
pub struct EditorConfig {
    /// Undo steps kept by the built-in text buffer
    #[serde(default = "default_history_size")]
    pub history_size: usize,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            history_size: default_history_size(),
        }
    }
}

fn default_history_size() -> usize {
    DEFAULT_HISTORY_SIZE
}

impl Config {
    /// Load from `path`, falling back to defaults if the file is missing or
    /// cannot be parsed
    pub fn load(path: &Path) -> Self {
        if !path.exists() {
            return Config::default();
        }

        let contents = match fs::read_to_string(path) {
            Ok(s) => s,
            Err(e) => {
                warn!("Could not read {}: {}, using defaults", path.display(), e);
                return Config::default();
            }
        };

        Self::from_toml(&contents).unwrap_or_else(|e| {
            warn!("Invalid config in {}: {}, using defaults", path.display(), e);
            Config::default()
        })
    }

    pub fn from_toml(contents: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(contents)
    }

    /// Parse context for the compiler (empty prefix lists fall back to defaults)
    pub fn parse_context(&self) -> ParseContext {
        ParseContext::new(self.commands.locale, &self.commands.prefixes)
    }
}
