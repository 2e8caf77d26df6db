use std::io;
use thiserror::Error;

/// The raw exchange could not be performed.
#[derive(Error, Debug)]
pub enum TransportError {
    #[error("invalid exchange target: {reason}")]
    InvalidTarget { reason: String },

    #[error("invalid request: {reason}")]
    InvalidRequest { reason: String },

    #[error("exchange failed: {source}")]
    Exchange {
        #[from]
        source: ureq::Error,
    },

    #[error("malformed response: {reason}")]
    MalformedResponse { reason: String },

    #[error("io error: {source}")]
    Io {
        #[from]
        source: io::Error,
    },
}

impl TransportError {
    pub fn invalid_target<S: ToString>(str: S) -> Self {
        Self::InvalidTarget { reason: str.to_string() }
    }

    pub fn invalid_request<S: ToString>(str: S) -> Self {
        Self::InvalidRequest { reason: str.to_string() }
    }

    pub fn malformed_response<S: ToString>(str: S) -> Self {
        Self::MalformedResponse { reason: str.to_string() }
    }

    pub fn io<E: Into<io::Error>>(e: E) -> Self {
        Self::Io { source: e.into() }
    }
}
