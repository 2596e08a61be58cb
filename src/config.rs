use regex::{Captures, Regex};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::fs;
use std::path::Path;

use crate::platform::DEFAULT_ACCENT_COLOR;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },

    #[error("invalid YAML configuration: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("invalid JSON configuration: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid configuration: {0}")]
    Invalid(String),
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub system_config: SystemConfig,
    #[serde(default)]
    pub platform_config: PlatformConfig,
    #[serde(default)]
    pub translator_config: TranslatorConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SystemConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    /// Unset means one outstanding model call per eligible message
    #[serde(default)]
    pub max_in_flight: Option<usize>,
    #[serde(default = "default_event_buffer")]
    pub event_buffer: usize,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    12393
}

fn default_event_buffer() -> usize {
    256
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlatformConfig {
    /// Connect to the Discord gateway; off means bridge ingress only
    #[serde(default = "default_true")]
    pub gateway_enabled: bool,
    #[serde(default)]
    pub bot_token: String,
    #[serde(default = "default_accent_color")]
    pub accent_color: u32,
}

fn default_true() -> bool {
    true
}

fn default_accent_color() -> u32 {
    DEFAULT_ACCENT_COLOR
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TranslatorConfig {
    #[serde(default = "default_target_language")]
    pub target_language: String,
    #[serde(default = "default_llm_provider")]
    pub llm_provider: String,
    /// Provider key -> provider settings
    #[serde(default)]
    pub llm_configs: Value,
}

fn default_target_language() -> String {
    "English".to_string()
}

fn default_llm_provider() -> String {
    "gemini_llm".to_string()
}

impl Default for SystemConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            max_in_flight: None,
            event_buffer: default_event_buffer(),
        }
    }
}

impl Default for PlatformConfig {
    fn default() -> Self {
        Self {
            gateway_enabled: default_true(),
            bot_token: String::new(),
            accent_color: default_accent_color(),
        }
    }
}

impl Default for TranslatorConfig {
    fn default() -> Self {
        Self {
            target_language: default_target_language(),
            llm_provider: default_llm_provider(),
            llm_configs: Value::Null,
        }
    }
}

impl TranslatorConfig {
    /// Settings block of the selected provider, empty if absent
    pub fn provider_config(&self) -> Value {
        self.llm_configs
            .get(&self.llm_provider)
            .cloned()
            .unwrap_or_else(|| json!({}))
    }
}

const PLACEHOLDER: &str = r"\$\{(\w+)\}";

/// Replace `${VAR_NAME}` placeholders; unknown variables are left as-is
pub fn substitute_vars(content: &str, lookup: impl Fn(&str) -> Option<String>) -> String {
    let pattern = Regex::new(PLACEHOLDER).expect("static pattern");
    pattern
        .replace_all(content, |caps: &Captures| {
            lookup(&caps[1]).unwrap_or_else(|| caps[0].to_string())
        })
        .into_owned()
}

/// True for blank values and `${VAR}` placeholders left by a missing variable
pub fn is_unset(value: &str) -> bool {
    let value = value.trim();
    if value.is_empty() {
        return true;
    }
    let whole = Regex::new(&format!("^{}$", PLACEHOLDER)).expect("static pattern");
    whole.is_match(value)
}

impl Config {
    pub fn load(path: &str) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_string(),
            source,
        })?;
        let content = substitute_vars(&content, |name| std::env::var(name).ok());
        Self::parse(path, &content)
    }

    fn parse(path: &str, content: &str) -> Result<Self, ConfigError> {
        if path.to_lowercase().ends_with(".json") {
            Ok(serde_json::from_str(content)?)
        } else {
            Ok(serde_yaml::from_str(content)?)
        }
    }

    /// Load from `CONFIG_PATH`, `conf.yaml` or `conf.json`, falling back to
    /// defaults. Returns the path that was used, if any.
    pub fn discover() -> Result<(Self, Option<String>), ConfigError> {
        Self::discover_from(std::env::var("CONFIG_PATH").ok())
    }

    /// An explicit path must exist; only the implicit candidates may be absent
    pub fn discover_from(explicit: Option<String>) -> Result<(Self, Option<String>), ConfigError> {
        if let Some(path) = explicit {
            return Ok((Self::load(&path)?, Some(path)));
        }

        for path in ["conf.yaml", "conf.json"] {
            if Path::new(path).exists() {
                return Ok((Self::load(path)?, Some(path.to_string())));
            }
            tracing::debug!("No config at {}", path);
        }
        Ok((Self::default(), None))
    }

    /// Apply environment overrides; credentials normally arrive this way
    pub fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(token) = lookup("DISCORD_TOKEN") {
            self.platform_config.bot_token = token;
        }
        if let Some(provider) = lookup("LLM_PROVIDER") {
            self.translator_config.llm_provider = provider;
        }
        if let Some(language) = lookup("TARGET_LANGUAGE") {
            self.translator_config.target_language = language;
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if is_unset(&self.platform_config.bot_token) {
            return Err(ConfigError::Invalid(
                "chat platform token missing (set DISCORD_TOKEN)".to_string(),
            ));
        }
        if is_unset(&self.translator_config.target_language) {
            return Err(ConfigError::Invalid("target_language is empty".to_string()));
        }
        if self.system_config.event_buffer == 0 {
            return Err(ConfigError::Invalid("event_buffer must be positive".to_string()));
        }
        Ok(())
    }
}
