//! Error types
//!
//! `ServerError` covers startup failures; `RequestError` covers everything a
//! single request can get wrong and knows how it is reported to the client.

use std::net::AddrParseError;
use std::time::Duration;

use hyper::StatusCode;
use thiserror::Error;

use crate::messages::Messages;

/// Fatal errors raised while building the server
#[derive(Debug, Error)]
pub enum ServerError {
    #[error("configuration error: {0}")]
    Config(#[from] config::ConfigError),

    #[error("invalid listen address '{addr}': {source}")]
    InvalidAddress {
        addr: String,
        #[source]
        source: AddrParseError,
    },

    #[error("invalid value for {field}: {value:?} is not a valid header value")]
    InvalidHeader { field: &'static str, value: String },

    #[error("failed to read messages file {path}: {source}")]
    MessagesIo {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse messages file {path}: {source}")]
    MessagesParse {
        path: String,
        #[source]
        source: toml::de::Error,
    },
}

/// Per-request failures. None of these affect the store.
#[derive(Debug, Error)]
pub enum RequestError {
    #[error("invalid JSON body: {0}")]
    InvalidJson(#[from] serde_json::Error),

    #[error("invalid word or definition")]
    InvalidData,

    #[error("request body exceeds {limit} bytes")]
    PayloadTooLarge { limit: u64 },

    #[error("request body not received within {0:?}")]
    Timeout(Duration),

    #[error("failed to read request body: {0}")]
    BodyRead(String),
}

impl RequestError {
    pub const fn status(&self) -> StatusCode {
        match self {
            Self::InvalidJson(_) | Self::InvalidData | Self::BodyRead(_) => {
                StatusCode::BAD_REQUEST
            }
            Self::PayloadTooLarge { .. } => StatusCode::PAYLOAD_TOO_LARGE,
            Self::Timeout(_) => StatusCode::REQUEST_TIMEOUT,
        }
    }

    /// Client-facing text for this error, taken from the message catalog
    pub fn client_message<'a>(&self, messages: &'a Messages) -> &'a str {
        match self {
            Self::InvalidJson(_) | Self::BodyRead(_) => &messages.invalid_json,
            Self::InvalidData => &messages.invalid_data,
            Self::PayloadTooLarge { .. } => &messages.payload_too_large,
            Self::Timeout(_) => &messages.request_timeout,
        }
    }
}
