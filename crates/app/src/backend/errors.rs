//! Backend client errors.

use thiserror::Error;

/// Errors that can occur when talking to the point-of-sale backend.
#[derive(Debug, Error)]
pub enum BackendError {
    /// An HTTP transport or body decoding error occurred.
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),

    /// The backend rejected the session token.
    #[error("session expired or invalid, log in again")]
    Unauthorized,

    /// The backend answered with an error status or `success: false`.
    #[error("{message} (status {status})")]
    Api {
        /// HTTP status code of the response.
        status: u16,

        /// Message reported by the backend.
        message: String,
    },

    /// The backend answered with a body this client does not understand.
    #[error("unexpected response from backend: {0}")]
    UnexpectedResponse(String),
}
