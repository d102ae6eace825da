use jamtogether_core::CoreError;
use thiserror::Error;

/// Errors returned by the search backend client.
#[derive(Debug, Error)]
pub enum ClientError {
    /// The filter is not searchable; no request was sent.
    #[error("invalid search filter: {0}")]
    Validation(#[from] CoreError),

    /// Network or TLS failure, or a non-2xx status.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The response body did not have the expected shape.
    #[error("JSON deserialization error for {context}: {source}")]
    Deserialize {
        context: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("invalid backend URL \"{url}\": {reason}")]
    InvalidBaseUrl { url: String, reason: String },
}
