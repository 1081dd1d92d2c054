//! Normalised gateway errors.

use serde::Deserialize;
use thiserror::Error;

/// Message used when a failed response carries no readable message.
pub const FALLBACK_ERROR_MESSAGE: &str = "An error occurred";

/// Message used for a 401 response without a server-supplied message.
pub const SESSION_EXPIRED_MESSAGE: &str = "Your session has expired, please sign in again";

/// Result type for gateway calls.
pub type GatewayResult<T> = Result<T, GatewayError>;

/// Errors returned by remote gateway adapters.
///
/// Transport-level error objects never cross this boundary; every variant
/// carries only a human-readable message and, where one exists, the HTTP
/// status.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum GatewayError {
    /// The server rejected the bearer token. The session has already been
    /// invalidated by the time this is returned.
    #[error("{message}")]
    Unauthorized {
        /// Server-supplied or fallback message.
        message: String,
    },

    /// The server answered with a non-2xx status other than 401.
    #[error("{message}")]
    Status {
        /// HTTP status code.
        status: u16,
        /// Server-supplied or fallback message.
        message: String,
    },

    /// The request never produced a response.
    #[error("{0}")]
    Transport(String),

    /// A 2xx response body could not be decoded.
    #[error("invalid response from server: {0}")]
    InvalidResponse(String),
}

impl GatewayError {
    /// Builds the error for a non-2xx response from its status and raw body.
    #[must_use]
    pub fn from_response(status: u16, body: &[u8]) -> Self {
        let body_message = server_message(body);
        if status == 401 {
            return Self::Unauthorized {
                message: body_message.unwrap_or_else(|| SESSION_EXPIRED_MESSAGE.to_owned()),
            };
        }
        Self::Status {
            status,
            message: body_message.unwrap_or_else(|| FALLBACK_ERROR_MESSAGE.to_owned()),
        }
    }

    /// Builds the error for a non-2xx response to a request sent without a
    /// bearer token.
    ///
    /// A 401 here rejects the supplied credentials rather than a session, so
    /// it stays an ordinary [`GatewayError::Status`].
    #[must_use]
    pub fn from_anonymous_response(status: u16, body: &[u8]) -> Self {
        if status != 401 {
            return Self::from_response(status, body);
        }
        Self::Status {
            status,
            message: server_message(body).unwrap_or_else(|| FALLBACK_ERROR_MESSAGE.to_owned()),
        }
    }

    /// Wraps a transport failure.
    pub fn transport(err: &impl std::error::Error) -> Self {
        let message = err.to_string();
        if message.trim().is_empty() {
            return Self::Transport(FALLBACK_ERROR_MESSAGE.to_owned());
        }
        Self::Transport(message)
    }

    /// Returns the HTTP status, if the server answered.
    #[must_use]
    pub const fn status(&self) -> Option<u16> {
        match self {
            Self::Unauthorized { .. } => Some(401),
            Self::Status { status, .. } => Some(*status),
            Self::Transport(_) | Self::InvalidResponse(_) => None,
        }
    }

    /// Returns `true` for a rejected session.
    #[must_use]
    pub const fn is_unauthorized(&self) -> bool {
        matches!(self, Self::Unauthorized { .. })
    }
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    message: Option<String>,
    error: Option<String>,
}

/// Extracts the server's `message` (or `error`) field from an error body.
fn server_message(body: &[u8]) -> Option<String> {
    let parsed: ErrorBody = serde_json::from_slice(body).ok()?;
    parsed
        .message
        .into_iter()
        .chain(parsed.error)
        .map(|message| message.trim().to_owned())
        .find(|message| !message.is_empty())
}

/// Single error shape handed to presentation code.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("{message}")]
pub struct ApiError {
    message: String,
    status: Option<u16>,
}

impl ApiError {
    /// Creates an error from a message and optional status.
    #[must_use]
    pub fn new(message: impl Into<String>, status: Option<u16>) -> Self {
        Self {
            message: message.into(),
            status,
        }
    }

    /// Returns the human-readable message.
    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Returns the HTTP status, if the server answered.
    #[must_use]
    pub const fn status(&self) -> Option<u16> {
        self.status
    }

    /// Returns `true` when the failure requires signing in again.
    #[must_use]
    pub const fn is_unauthorized(&self) -> bool {
        matches!(self.status, Some(401))
    }
}

impl From<GatewayError> for ApiError {
    fn from(value: GatewayError) -> Self {
        let status = value.status();
        Self::new(value.to_string(), status)
    }
}
