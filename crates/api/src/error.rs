use core::time::Duration;
use rentals_types::SchemaValidationError;
use reqwest::StatusCode;
use serde_json::Value;

/// Errors returned by the [`ListingSubmitter`].
///
/// [`ListingSubmitter`]: crate::ListingSubmitter
#[derive(Debug, thiserror::Error)]
pub enum SubmissionError {
    /// The listing cannot be expressed as a payload.
    #[error(transparent)]
    Schema(#[from] SchemaValidationError),

    /// The payload could not be serialized.
    #[error("failed to encode listing payload: {0}")]
    Encode(#[from] serde_json::Error),

    /// The listings service could not be reached.
    #[error("error contacting listings service: {0}")]
    Transport(Box<dyn core::error::Error + Send + Sync + 'static>),

    /// The listings service answered with a non-success status.
    #[error("listing rejected with status {status}: {reason}")]
    Rejected {
        /// The response status.
        status: StatusCode,
        /// The reason given by the service.
        reason: String,
        /// The response body, when it was JSON.
        body: Option<Value>,
    },

    /// The listings service answered with a success status but a body that
    /// is not JSON.
    #[error("malformed listings service response with status {status}: {source}")]
    MalformedResponse {
        /// The response status.
        status: StatusCode,
        /// The JSON parse error.
        source: serde_json::Error,
    },

    /// No response was received in time.
    #[error("listings service did not respond within {0:?}")]
    Timeout(Duration),

    /// The submission was cancelled before a response was received.
    #[error("listing submission cancelled")]
    Cancelled,
}

impl SubmissionError {
    /// Wrap a transport error.
    pub fn transport<E>(err: E) -> Self
    where
        E: core::error::Error + Send + Sync + 'static,
    {
        Self::Transport(Box::new(err))
    }

    /// True if the service answered and refused the listing.
    pub const fn is_rejected(&self) -> bool {
        matches!(self, Self::Rejected { .. })
    }

    /// True if the listing may not have reached the service.
    pub const fn is_transient(&self) -> bool {
        matches!(self, Self::Transport(_) | Self::Timeout(_) | Self::Cancelled)
    }

    /// The reason given by the service, if it rejected the listing.
    pub fn rejection_reason(&self) -> Option<&str> {
        match self {
            Self::Rejected { reason, .. } => Some(reason),
            _ => None,
        }
    }
}
