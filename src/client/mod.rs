//! Client side of OctoPulse: the locally persisted state and a typed HTTP
//! client for the API.
//!
//! [`ClientState`] is an explicit configuration object with two I/O
//! boundaries, [`ClientState::load`] and [`ClientState::save`]. Nothing
//! else touches the file.

pub mod api_client;
pub mod state;

pub use api_client::PulseClient;
pub use state::ClientState;

/// Errors raised by the client library.
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    /// Reading or writing the state file failed.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// The state file or a response body is not valid JSON.
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    /// The HTTP request could not be completed.
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),

    /// The API answered with a failure envelope.
    #[error("api error ({status}): {message}")]
    Api {
        /// HTTP status code.
        status: u16,
        /// The envelope's `error` string.
        message: String,
    },

    /// The operation needs a completed setup.
    #[error("setup has not been completed")]
    NotConfigured,
}
