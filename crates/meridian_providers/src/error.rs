use thiserror::Error;

/// An upstream provider could not deliver a usable answer.
#[derive(Debug, Error)]
pub enum ProviderError {
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("API error: {status} - {message}")]
    Api { status: u16, message: String },

    #[error("Deserialization error: {0}")]
    Deserialize(#[from] serde_json::Error),

    #[error("No route found between the requested locations")]
    NoRoute,

    #[error("Invalid response: {0}")]
    InvalidResponse(String),
}
