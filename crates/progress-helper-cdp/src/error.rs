//! CDP errors.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum CdpError {
    /// The debugging endpoint is not a usable URL.
    #[error("Invalid debugging endpoint: {0}")]
    InvalidEndpoint(String),

    /// Nothing answered `/json/version` at the endpoint.
    #[error("No browser at {0}. Start Chrome with --remote-debugging-port=9222")]
    BrowserUnavailable(String),

    /// Listing tabs over HTTP failed.
    #[error("Tab discovery failed: {0}")]
    Discovery(String),

    #[error("WebSocket error: {0}")]
    WebSocket(String),

    /// The browser rejected a command.
    #[error("CDP error: {message} (code: {code})")]
    Protocol { code: i64, message: String },

    #[error("Malformed CDP payload: {0}")]
    Decode(#[from] serde_json::Error),

    /// A page-side function threw.
    #[error("Page script threw: {0}")]
    JavaScript(String),

    /// No response within the call timeout. Holds the method name.
    #[error("{0} timed out")]
    Timeout(String),

    /// The WebSocket went away while a call was waiting.
    #[error("Browser connection closed")]
    SessionClosed,

    /// A response lacked a field the caller needs.
    #[error("Invalid response: {0}")]
    InvalidResponse(String),
}

impl From<tokio_tungstenite::tungstenite::Error> for CdpError {
    fn from(e: tokio_tungstenite::tungstenite::Error) -> Self {
        CdpError::WebSocket(e.to_string())
    }
}

impl From<reqwest::Error> for CdpError {
    fn from(e: reqwest::Error) -> Self {
        CdpError::Discovery(e.to_string())
    }
}

impl From<url::ParseError> for CdpError {
    fn from(e: url::ParseError) -> Self {
        CdpError::InvalidEndpoint(e.to_string())
    }
}

impl CdpError {
    /// Whether the browser itself could not be reached.
    pub fn is_unreachable(&self) -> bool {
        matches!(
            self,
            CdpError::InvalidEndpoint(_) | CdpError::BrowserUnavailable(_) | CdpError::WebSocket(_)
        )
    }
}
