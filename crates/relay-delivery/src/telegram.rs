//! Telegram Bot API client — one `sendMessage` call per lead.
//!
//! The request body carries the chat id, the HTML text, `parse_mode=HTML`
//! and `disable_web_page_preview=true`. The response is interpreted in
//! order: HTTP status, then JSON shape, then the `ok` flag. There is no
//! retry; every failure is logged with its status and raw body and returned
//! to the caller.

use std::time::Duration;

use relay_core::{OutboundMessage, TelegramConfig};
use serde::{Deserialize, Serialize};

use crate::error::DeliveryError;
use crate::{DeliveryFuture, LeadSink};

#[derive(Debug, Serialize)]
struct SendMessageRequest<'a> {
    chat_id: &'a str,
    text: &'a str,
    parse_mode: &'static str,
    disable_web_page_preview: bool,
}

#[derive(Debug, Deserialize)]
struct ApiResponse {
    ok: bool,
    #[serde(default)]
    description: Option<String>,
}

/// Delivery client for a single bot/chat pair.
pub struct TelegramClient {
    http: reqwest::Client,
    api_base: String,
    bot_token: Option<String>,
    chat_id: Option<String>,
}

impl TelegramClient {
    /// Build the client. Missing secrets are accepted here and reported by
    /// every [`send_message`](Self::send_message) call instead.
    pub fn new(config: &TelegramConfig) -> Result<Self, DeliveryError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| DeliveryError::Client(e.without_url()))?;

        Ok(Self {
            http,
            api_base: config.api_base.trim_end_matches('/').to_string(),
            bot_token: non_blank(config.bot_token.as_deref()),
            chat_id: non_blank(config.chat_id.as_deref()),
        })
    }

    fn credentials(&self) -> Result<(&str, &str), DeliveryError> {
        let token = self
            .bot_token
            .as_deref()
            .ok_or(DeliveryError::ConfigurationMissing("telegram.bot_token"))?;
        let chat_id = self
            .chat_id
            .as_deref()
            .ok_or(DeliveryError::ConfigurationMissing("telegram.chat_id"))?;
        Ok((token, chat_id))
    }

    /// Post `message` to the configured chat.
    pub async fn send_message(&self, message: &OutboundMessage) -> Result<(), DeliveryError> {
        let (token, chat_id) = self.credentials()?;

        let body = SendMessageRequest {
            chat_id,
            text: message.as_str(),
            parse_mode: "HTML",
            disable_web_page_preview: true,
        };

        let response = self
            .http
            .post(format!("{}/bot{}/sendMessage", self.api_base, token))
            .json(&body)
            .send()
            .await
            .map_err(|e| network_error(e.without_url()))?;

        let status = response.status().as_u16();
        let raw = response
            .text()
            .await
            .map_err(|e| network_error(e.without_url()))?;

        interpret_response(status, raw)
    }
}

impl LeadSink for TelegramClient {
    fn deliver<'a>(&'a self, message: &'a OutboundMessage) -> DeliveryFuture<'a> {
        Box::pin(self.send_message(message))
    }
}

/// Map a `sendMessage` response onto success or a [`DeliveryError`].
pub fn interpret_response(status: u16, body: String) -> Result<(), DeliveryError> {
    if !(200..300).contains(&status) {
        tracing::error!(status, body = %body, "telegram HTTP error");
        return Err(DeliveryError::Transport { status, body });
    }

    let parsed: ApiResponse = match serde_json::from_str(&body) {
        Ok(parsed) => parsed,
        Err(source) => {
            tracing::error!(status, body = %body, error = %source, "telegram returned non-JSON");
            return Err(DeliveryError::MalformedResponse { body, source });
        }
    };

    if !parsed.ok {
        tracing::error!(status, body = %body, "telegram ok:false");
        return Err(DeliveryError::RemoteRejected {
            description: parsed.description,
            body,
        });
    }

    tracing::debug!(status, "telegram accepted message");
    Ok(())
}

fn network_error(e: reqwest::Error) -> DeliveryError {
    tracing::error!(error = %e, timeout = e.is_timeout(), "telegram request failed");
    DeliveryError::Network(e)
}

fn non_blank(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}
