//! lead-relay — receive a lead-capture form, normalise it, post it to Telegram.
//!
//! This crate re-exports the three workspace layers so that integration
//! harnesses and benches can reach them through one path.
//!
//! # Architecture
//!
//! ```text
//! POST /lead ──► Normalizer ──► Formatter ──► LeadSink ──► Telegram Bot API
//!  (relay-server)   (relay-core)               (relay-delivery)
//! ```
//!
//! Requests share nothing mutable: the alias table, placeholder and message
//! settings are built once from [`Settings`] and only read afterwards.

pub use relay_core::{
    escape_html, format_message, normalize, CanonicalLead, DeliveryMode, FieldAliasTable,
    InboundRecord, LeadField, MessageConfig, Normalizer, OutboundMessage, Settings,
};
pub use relay_delivery::{DeliveryError, LeadSink, TelegramClient};
pub use relay_server::{router, Relay};
