//! relay-delivery — outbound lead delivery for lead-relay.
//!
//! The server only sees the [`LeadSink`] trait; [`TelegramClient`] is the
//! production implementation. Each call is a single attempt: no retry, no
//! queue. Callers decide whether a failure reaches the original requester.

use std::future::Future;
use std::pin::Pin;

use relay_core::OutboundMessage;

pub mod error;
pub mod telegram;

pub use error::DeliveryError;
pub use telegram::TelegramClient;

/// Boxed future returned by [`LeadSink::deliver`].
pub type DeliveryFuture<'a> = Pin<Box<dyn Future<Output = Result<(), DeliveryError>> + Send + 'a>>;

/// Destination for rendered lead messages.
pub trait LeadSink: Send + Sync {
    /// Deliver one message. Exactly one outbound attempt per call.
    fn deliver<'a>(&'a self, message: &'a OutboundMessage) -> DeliveryFuture<'a>;
}
