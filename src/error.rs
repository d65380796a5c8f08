use thiserror::Error;

/// Errors that can occur while relaying requests to the upstream services
#[derive(Error, Debug)]
pub enum RelayError {
    /// The recipe search API answered with a non-success status
    #[error("Upstream returned {status}: {body}")]
    Upstream { status: u16, body: String },

    /// Transport level failure talking to an upstream service
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// An upstream answered with a body we could not interpret
    #[error("Failed to parse upstream response: {0}")]
    Parse(String),

    /// A dependent service has no credentials configured
    #[error("Service unavailable: {0}")]
    ServiceUnavailable(String),

    /// Fetching or parsing the news feed failed
    #[error("Feed error: {0}")]
    Feed(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),

    /// Binding or serving the HTTP listener failed
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<serde_json::Error> for RelayError {
    fn from(err: serde_json::Error) -> Self {
        RelayError::Parse(err.to_string())
    }
}

impl From<rss::Error> for RelayError {
    fn from(err: rss::Error) -> Self {
        RelayError::Feed(err.to_string())
    }
}
