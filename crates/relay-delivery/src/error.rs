/// Why a single delivery attempt failed.
///
/// None of the variants carry the bot token: reqwest errors are stripped of
/// their URL before they are wrapped.
#[derive(Debug, thiserror::Error)]
pub enum DeliveryError {
    #[error("delivery not configured: {0} is missing")]
    ConfigurationMissing(&'static str),

    #[error("HTTP client: {0}")]
    Client(#[source] reqwest::Error),

    #[error("telegram request failed: {0}")]
    Network(#[source] reqwest::Error),

    #[error("telegram HTTP {status}")]
    Transport { status: u16, body: String },

    #[error("telegram returned a malformed body: {source}")]
    MalformedResponse {
        body: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("telegram rejected the message: {}", .description.as_deref().unwrap_or("ok:false"))]
    RemoteRejected {
        description: Option<String>,
        body: String,
    },
}

impl DeliveryError {
    /// Short, stable tag for log fields.
    pub fn kind(&self) -> &'static str {
        match self {
            DeliveryError::ConfigurationMissing(_) => "configuration_missing",
            DeliveryError::Client(_) => "client",
            DeliveryError::Network(_) => "network",
            DeliveryError::Transport { .. } => "transport",
            DeliveryError::MalformedResponse { .. } => "malformed_response",
            DeliveryError::RemoteRejected { .. } => "remote_rejected",
        }
    }

    /// HTTP status of the remote response, when one was received.
    pub fn status(&self) -> Option<u16> {
        match self {
            DeliveryError::Transport { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Raw response body, when one was received.
    pub fn body(&self) -> Option<&str> {
        match self {
            DeliveryError::Transport { body, .. }
            | DeliveryError::MalformedResponse { body, .. }
            | DeliveryError::RemoteRejected { body, .. } => Some(body),
            _ => None,
        }
    }
}
