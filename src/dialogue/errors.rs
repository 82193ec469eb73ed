//! Error types surfaced by the reply broker.
use std::fmt;

/// Fixed in-character line used when no API credential is configured.
pub const MISSING_CREDENTIAL_LINE: &str = "I seem to have lost my voice... (Missing API Key)";

/// Fixed in-character line used when the reply call fails for any other
/// reason. Raw errors never reach the transcript.
pub const SERVICE_FAILURE_LINE: &str = "I'm feeling a bit dizzy right now. Can we talk later?";

/// Shown when the service answers successfully but with no usable text.
pub const EMPTY_COMPLETION_LINE: &str = "...";

/// Why a reply request failed. Every variant is terminal for its request;
/// there is no automatic retry.
#[derive(Debug, Clone)]
pub enum ReplyError {
    /// No API key is configured; the call was never attempted.
    MissingCredential,
    /// Network-level failure, including the bounded request timeout.
    Transport { message: String },
    /// The service answered with a non-success status.
    ServiceStatus { status: u16, message: String },
    /// The service answered successfully but produced no usable text.
    EmptyCompletion,
}

impl ReplyError {
    pub fn transport(message: impl Into<String>) -> Self {
        Self::Transport {
            message: message.into(),
        }
    }

    pub fn service_status(status: u16, message: impl Into<String>) -> Self {
        Self::ServiceStatus {
            status,
            message: message.into(),
        }
    }

    /// The line the coordinator appends in place of a reply.
    pub fn fallback_line(&self) -> &'static str {
        match self {
            Self::MissingCredential => MISSING_CREDENTIAL_LINE,
            Self::Transport { .. } | Self::ServiceStatus { .. } => SERVICE_FAILURE_LINE,
            Self::EmptyCompletion => EMPTY_COMPLETION_LINE,
        }
    }
}

impl fmt::Display for ReplyError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingCredential => write!(f, "missing API credential"),
            Self::Transport { message } => write!(f, "transport failure: {}", message),
            Self::ServiceStatus { status, message } => {
                write!(f, "service returned HTTP {}: {}", status, message)
            }
            Self::EmptyCompletion => write!(f, "service returned an empty completion"),
        }
    }
}

impl std::error::Error for ReplyError {}
