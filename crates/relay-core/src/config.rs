//! Configuration types for lead-relay.
//!
//! [`Settings::load`] layers, lowest precedence first: the embedded
//! [`DEFAULT_CONFIG`], an optional TOML file, `LEAD_RELAY__SECTION__KEY`
//! environment variables and finally explicit [`Overrides`] (the CLI flags,
//! which also pick up the legacy `PORT`, `BOT_TOKEN` and `CHAT_ID`
//! variables). [`Settings::defaults`] returns the embedded defaults without
//! touching the filesystem or the environment (useful in tests).
//!
//! Missing Telegram secrets are not a load error. They surface per delivery
//! attempt instead, so the relay can still start and answer `/health`.

use std::collections::BTreeMap;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::aliases::FieldAliasTable;
use crate::types::LeadField;

// ---------------------------------------------------------------------------
// Embedded defaults
// ---------------------------------------------------------------------------

pub const DEFAULT_CONFIG: &str = r#"
[server]
bind             = "0.0.0.0"
port             = 10000
allowed_origins  = ["https://engineering.dfxcapital.ru", "http://engineering.dfxcapital.ru"]
delivery_mode    = "synchronous"
body_limit_bytes = 204800

[telegram]
api_base     = "https://api.telegram.org"
timeout_secs = 10

[message]
placeholder        = "—"
title              = "🆕 New lead: engineering audit"
max_concerns_chars = 2000
omit_placeholders  = false
"#;

const ENV_PREFIX: &str = "LEAD_RELAY";

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("config: {0}")]
    Load(#[from] config::ConfigError),

    #[error("invalid setting `{key}`: {reason}")]
    Invalid { key: String, reason: &'static str },
}

// ---------------------------------------------------------------------------
// Public config types
// ---------------------------------------------------------------------------

/// Top-level relay configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Settings {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub telegram: TelegramConfig,
    #[serde(default)]
    pub message: MessageConfig,
    /// Per-field alias overrides; fields not listed keep the built-in list.
    #[serde(default)]
    pub aliases: BTreeMap<LeadField, Vec<String>>,
}

/// How `/lead` waits for delivery.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DeliveryMode {
    /// Respond only after the outbound call finished; failures reach the caller.
    #[default]
    Synchronous,
    /// Acknowledge immediately and deliver on a detached task; failures are logged.
    #[serde(alias = "fire-and-forget")]
    FireAndForget,
}

/// `[server]` section.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerConfig {
    #[serde(default = "default_bind")]
    pub bind: String,
    #[serde(default = "default_port")]
    pub port: u16,
    #[serde(default)]
    pub allowed_origins: Vec<String>,
    #[serde(default)]
    pub delivery_mode: DeliveryMode,
    #[serde(default = "default_body_limit_bytes")]
    pub body_limit_bytes: usize,
}

fn default_bind() -> String { "0.0.0.0".to_string() }
fn default_port() -> u16 { 10000 }
fn default_body_limit_bytes() -> usize { 200 * 1024 }

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: default_bind(),
            port: default_port(),
            allowed_origins: Vec::new(),
            delivery_mode: DeliveryMode::default(),
            body_limit_bytes: default_body_limit_bytes(),
        }
    }
}

/// `[telegram]` section. `Debug` never prints the token.
#[derive(Clone, Deserialize, Serialize)]
pub struct TelegramConfig {
    #[serde(default = "default_api_base")]
    pub api_base: String,
    #[serde(default)]
    pub bot_token: Option<String>,
    #[serde(default)]
    pub chat_id: Option<String>,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_api_base() -> String { "https://api.telegram.org".to_string() }
fn default_timeout_secs() -> u64 { 10 }

impl Default for TelegramConfig {
    fn default() -> Self {
        Self {
            api_base: default_api_base(),
            bot_token: None,
            chat_id: None,
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl std::fmt::Debug for TelegramConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TelegramConfig")
            .field("api_base", &self.api_base)
            .field("bot_token", &self.bot_token.as_ref().map(|_| REDACTED))
            .field("chat_id", &self.chat_id)
            .field("timeout_secs", &self.timeout_secs)
            .finish()
    }
}

/// `[message]` section.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct MessageConfig {
    #[serde(default = "default_placeholder")]
    pub placeholder: String,
    #[serde(default = "default_title")]
    pub title: String,
    #[serde(default = "default_max_concerns_chars")]
    pub max_concerns_chars: usize,
    #[serde(default)]
    pub omit_placeholders: bool,
}

fn default_placeholder() -> String { "—".to_string() }
fn default_title() -> String { "🆕 New lead: engineering audit".to_string() }
fn default_max_concerns_chars() -> usize { 2000 }

impl Default for MessageConfig {
    fn default() -> Self {
        Self {
            placeholder: default_placeholder(),
            title: default_title(),
            max_concerns_chars: default_max_concerns_chars(),
            omit_placeholders: false,
        }
    }
}

/// Values that win over every other layer, usually taken from the CLI.
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub port: Option<u16>,
    pub bot_token: Option<String>,
    pub chat_id: Option<String>,
}

const REDACTED: &str = "***";

impl Default for Settings {
    fn default() -> Self {
        Self::defaults()
    }
}

impl Settings {
    /// Load and validate the layered configuration. `path`, when given, must
    /// exist.
    pub fn load(path: Option<&Path>, overrides: &Overrides) -> Result<Self, ConfigError> {
        let mut builder = config::Config::builder()
            .add_source(config::File::from_str(DEFAULT_CONFIG, config::FileFormat::Toml));

        if let Some(path) = path {
            builder = builder.add_source(config::File::from(path).required(true));
        }

        let mut env = config::Environment::with_prefix(ENV_PREFIX)
            .prefix_separator("__")
            .separator("__")
            .try_parsing(true)
            .list_separator(",")
            .with_list_parse_key("server.allowed_origins");
        for field in LeadField::ALL {
            env = env.with_list_parse_key(&format!("aliases.{}", field.as_str().to_lowercase()));
        }

        let settings: Settings = builder
            .add_source(env)
            .set_override_option("server.port", overrides.port.map(i64::from))?
            .set_override_option("telegram.bot_token", overrides.bot_token.clone())?
            .set_override_option("telegram.chat_id", overrides.chat_id.clone())?
            .build()?
            .try_deserialize()?;

        settings.validate()?;
        Ok(settings)
    }

    /// Return the built-in defaults without touching the filesystem.
    pub fn defaults() -> Self {
        config::Config::builder()
            .add_source(config::File::from_str(DEFAULT_CONFIG, config::FileFormat::Toml))
            .build()
            .expect("built-in default config must be valid TOML")
            .try_deserialize()
            .expect("built-in default config must deserialize correctly")
    }

    /// Reject values the relay cannot run with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.message.placeholder.trim().is_empty() {
            return Err(invalid("message.placeholder", "must not be blank"));
        }
        if self.message.max_concerns_chars == 0 {
            return Err(invalid("message.max_concerns_chars", "must be greater than zero"));
        }
        if self.telegram.timeout_secs == 0 {
            return Err(invalid("telegram.timeout_secs", "must be greater than zero"));
        }
        if self.server.body_limit_bytes == 0 {
            return Err(invalid("server.body_limit_bytes", "must be greater than zero"));
        }
        for (field, keys) in &self.aliases {
            if keys.iter().all(|k| k.trim().is_empty()) {
                return Err(invalid(&format!("aliases.{field}"), "must list at least one key"));
            }
        }
        Ok(())
    }

    /// Built-in aliases with the `[aliases]` overrides applied.
    pub fn alias_table(&self) -> FieldAliasTable {
        self.aliases
            .iter()
            .fold(FieldAliasTable::builtin(), |table, (field, keys)| {
                table.with_aliases(*field, keys.iter().map(|k| k.trim()).filter(|k| !k.is_empty()))
            })
    }

    /// Names of the Telegram settings that are absent or blank.
    pub fn missing_secrets(&self) -> Vec<&'static str> {
        let blank = |v: &Option<String>| v.as_deref().map_or(true, |s| s.trim().is_empty());
        let mut missing = Vec::new();
        if blank(&self.telegram.bot_token) {
            missing.push("telegram.bot_token");
        }
        if blank(&self.telegram.chat_id) {
            missing.push("telegram.chat_id");
        }
        missing
    }

    /// The effective configuration as JSON with the bot token masked.
    pub fn redacted(&self) -> serde_json::Value {
        let mut copy = self.clone();
        if copy.telegram.bot_token.is_some() {
            copy.telegram.bot_token = Some(REDACTED.to_string());
        }
        serde_json::to_value(copy).unwrap_or(serde_json::Value::Null)
    }
}

fn invalid(key: &str, reason: &'static str) -> ConfigError {
    ConfigError::Invalid {
        key: key.to_string(),
        reason,
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
