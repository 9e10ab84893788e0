use thiserror::Error;

/// Errors surfaced by the API client and everything built on top of it.
///
/// The loader never propagates these to the rendering layer; it absorbs them,
/// records the last one, and hands a human-readable message to the notifier.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The request never completed, or the body could not be decoded.
    #[error("request failed: {0}")]
    Network(#[from] reqwest::Error),

    /// The server answered with a non-success status and (usually) an
    /// `{ "error": ... }` body.
    #[error("{message} (status {status})")]
    Api { status: u16, message: String },
}

impl ApiError {
    /// Status code of a server-side rejection, if this was one.
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Api { status, .. } => Some(*status),
            ApiError::Network(_) => None,
        }
    }

    /// Message suitable for a transient user-facing notification.
    pub fn user_message(&self) -> &str {
        match self {
            ApiError::Api { message, .. } => message,
            ApiError::Network(_) => "Could not reach the server",
        }
    }
}
