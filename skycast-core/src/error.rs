use thiserror::Error;

/// Failure taxonomy for one weather query.
///
/// Every variant is terminal for the query that produced it; nothing is
/// retried and nothing is swallowed. The `Display` form is the single
/// human-readable message the presentation layer shows.
#[derive(Debug, Error)]
pub enum WeatherError {
    /// Rejected locally before any network interaction.
    #[error("{0}")]
    Input(String),

    /// The remote API rejected the request; the message comes from the
    /// API's own error body when it has one.
    #[error("API error: {0}")]
    Api(String),

    /// Network-level failure: DNS, connection, timeout, body read.
    #[error("Network error: {0}")]
    Transport(#[from] reqwest::Error),

    /// Success status but the body did not match the documented schema.
    #[error("Malformed response: {0}")]
    Malformed(String),
}

impl WeatherError {
    pub fn input<S: Into<String>>(message: S) -> Self {
        Self::Input(message.into())
    }

    pub fn api<S: Into<String>>(message: S) -> Self {
        Self::Api(message.into())
    }

    pub fn malformed<S: Into<String>>(message: S) -> Self {
        Self::Malformed(message.into())
    }
}
