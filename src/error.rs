use reqwest::StatusCode;
use thiserror::Error;

/// Failures raised by the client itself, before or outside a remote call.
#[derive(Error, Debug)]
pub enum ClientError {
    #[error("missing CLEVER_API_TOKEN")]
    MissingToken,

    #[error("invalid base URL {url}: {source}")]
    InvalidBaseUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },

    /// A call was made with arguments that can never succeed (e.g. an empty id).
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    #[error("transport setup failed: {0}")]
    TransportSetup(String),
}

/// A single failed attempt against the upstream API.
#[derive(Error, Debug)]
pub enum TransportError {
    #[error("request failed: {0}")]
    Send(String),

    #[error("upstream returned {status} ({kind}): {body}")]
    Status {
        status: StatusCode,
        kind: &'static str,
        body: String,
    },

    #[error("response body is not valid JSON: {0}")]
    Decode(#[from] serde_json::Error),
}

impl From<reqwest::Error> for TransportError {
    fn from(e: reqwest::Error) -> Self {
        TransportError::Send(e.to_string())
    }
}

#[derive(Error, Debug)]
pub enum OutputError {
    #[error("io error on {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to serialize response: {0}")]
    Serialize(#[from] serde_json::Error),
}
