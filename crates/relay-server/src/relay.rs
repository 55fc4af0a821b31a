//! The per-request pipeline: normalise → format → deliver.
//!
//! [`Relay`] holds only read-only configuration and the shared sink, so one
//! instance serves every request without locking.

use std::sync::Arc;

use relay_core::{
    format_message, CanonicalLead, DeliveryMode, InboundRecord, LeadField, MessageConfig,
    Normalizer, OutboundMessage, Settings,
};
use relay_delivery::{DeliveryError, LeadSink};

/// What happened to a lead that was accepted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// The sink confirmed delivery before we answered.
    Delivered,
    /// Delivery runs on a detached task; its result only reaches the log.
    Dispatched,
}

pub struct Relay {
    normalizer: Normalizer,
    message: MessageConfig,
    sink: Arc<dyn LeadSink>,
    mode: DeliveryMode,
}

impl Relay {
    pub fn new(
        normalizer: Normalizer,
        message: MessageConfig,
        sink: Arc<dyn LeadSink>,
        mode: DeliveryMode,
    ) -> Self {
        Self {
            normalizer,
            message,
            sink,
            mode,
        }
    }

    pub fn from_settings(settings: &Settings, sink: Arc<dyn LeadSink>) -> Self {
        Self::new(
            Normalizer::new(settings.alias_table(), settings.message.placeholder.clone()),
            settings.message.clone(),
            sink,
            settings.server.delivery_mode,
        )
    }

    pub fn mode(&self) -> DeliveryMode {
        self.mode
    }

    /// Normalise and render without delivering.
    pub fn prepare(
        &self,
        inbound: &InboundRecord,
        source_fallback: Option<&str>,
    ) -> (CanonicalLead, OutboundMessage) {
        let lead = self.normalizer.normalize(inbound, source_fallback);
        let message = format_message(&lead, &self.message);
        (lead, message)
    }

    /// Run the whole pipeline for one submission.
    ///
    /// In [`DeliveryMode::Synchronous`] the delivery result is returned. In
    /// [`DeliveryMode::FireAndForget`] this returns as soon as the delivery
    /// task is spawned and never fails.
    pub async fn submit(
        &self,
        inbound: &InboundRecord,
        source_fallback: Option<&str>,
    ) -> Result<Outcome, DeliveryError> {
        let (lead, message) = self.prepare(inbound, source_fallback);

        tracing::info!(
            resolved = lead.resolved_count(),
            source = lead.get(LeadField::Source),
            mode = ?self.mode,
            "lead normalised"
        );
        tracing::debug!(text = %message, "rendered message");

        match self.mode {
            DeliveryMode::Synchronous => {
                self.sink.deliver(&message).await.inspect_err(log_failure)?;
                tracing::info!("lead delivered");
                Ok(Outcome::Delivered)
            }
            DeliveryMode::FireAndForget => {
                let sink = Arc::clone(&self.sink);
                tokio::spawn(async move {
                    match sink.deliver(&message).await {
                        Ok(()) => tracing::info!("lead delivered"),
                        Err(err) => log_failure(&err),
                    }
                });
                Ok(Outcome::Dispatched)
            }
        }
    }
}

fn log_failure(err: &DeliveryError) {
    tracing::error!(
        kind = err.kind(),
        status = ?err.status(),
        body = err.body().unwrap_or(""),
        error = %err,
        "lead delivery failed"
    );
}
