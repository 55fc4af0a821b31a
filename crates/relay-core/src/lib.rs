//! relay-core — lead normalisation and message formatting.
//!
//! Everything in this crate is pure: no I/O besides reading configuration,
//! no shared mutable state. The pipeline stages are exposed as public
//! modules so the server and the integration harnesses can drive them
//! directly.
//!
//! # Pipeline
//!
//! ```text
//! InboundRecord ──► normalize ──► CanonicalLead ──► format_message ──► OutboundMessage
//!                      ▲                                  ▲
//!               FieldAliasTable                     MessageConfig
//! ```

pub mod aliases;
pub mod config;
pub mod format;
pub mod normalizer;
pub mod types;

pub use aliases::FieldAliasTable;
pub use config::{DeliveryMode, MessageConfig, Settings, TelegramConfig};
pub use format::{escape_html, format_message};
pub use normalizer::{normalize, Normalizer};
pub use types::{CanonicalLead, InboundRecord, LeadField, OutboundMessage};
