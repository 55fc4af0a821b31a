//! Test builders — ergonomic constructors for inbound records, settings and
//! clients.
//!
//! These builders are designed for readability in test assertions, not for
//! production use. They panic on invalid input rather than returning `Result`.

use relay_core::{InboundRecord, Settings, TelegramConfig};
use relay_delivery::TelegramClient;

// ---------------------------------------------------------------------------
// InboundBuilder
// ---------------------------------------------------------------------------

/// Fluent builder for [`InboundRecord`] fixtures.
///
/// # Example
///
/// ```rust
/// let inbound = InboundBuilder::new()
///     .field("type", "House")
///     .field("phone", "+1-555-0100")
///     .build();
/// ```
#[derive(Default)]
pub struct InboundBuilder {
    fields: InboundRecord,
}

impl InboundBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn field(mut self, key: impl Into<String>, value: impl Into<serde_json::Value>) -> Self {
        self.fields.insert(key.into(), value.into());
        self
    }

    pub fn null(mut self, key: impl Into<String>) -> Self {
        self.fields.insert(key.into(), serde_json::Value::Null);
        self
    }

    pub fn build(self) -> InboundRecord {
        self.fields
    }
}

/// Parse a JSON object literal into an [`InboundRecord`].
pub fn inbound_from_json(raw: &str) -> InboundRecord {
    match serde_json::from_str::<serde_json::Value>(raw).expect("fixture must be valid JSON") {
        serde_json::Value::Object(map) => map,
        other => panic!("fixture must be a JSON object, got {other}"),
    }
}

// ---------------------------------------------------------------------------
// Settings / client helpers
// ---------------------------------------------------------------------------

pub const TEST_TOKEN: &str = "123456:test-token";
pub const TEST_CHAT_ID: &str = "-1001234567890";

/// Telegram settings aimed at `base_url` with both secrets present.
pub fn telegram_config(base_url: &str) -> TelegramConfig {
    TelegramConfig {
        api_base: base_url.to_string(),
        bot_token: Some(TEST_TOKEN.to_string()),
        chat_id: Some(TEST_CHAT_ID.to_string()),
        timeout_secs: 5,
    }
}

/// Default settings with Telegram aimed at `base_url`.
pub fn settings_for(base_url: &str) -> Settings {
    let mut settings = Settings::defaults();
    settings.telegram = telegram_config(base_url);
    settings
}

pub fn client_for(config: &TelegramConfig) -> TelegramClient {
    TelegramClient::new(config).expect("test client must build")
}
