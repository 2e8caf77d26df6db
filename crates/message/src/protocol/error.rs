use thiserror::Error;

/// Raised when a caller hands a message mutator a value it cannot accept.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ArgumentError {
    #[error("invalid http method: {method:?}")]
    InvalidMethod { method: String },

    #[error("the request target may not contain whitespace: {target:?}")]
    InvalidRequestTarget { target: String },

    #[error("invalid http status code: {code}")]
    InvalidStatus { code: u16 },

    #[error("invalid uri: {reason}")]
    InvalidUri { reason: String },
}

impl ArgumentError {
    pub fn invalid_method<S: ToString>(method: S) -> Self {
        Self::InvalidMethod { method: method.to_string() }
    }

    pub fn invalid_request_target<S: ToString>(target: S) -> Self {
        Self::InvalidRequestTarget { target: target.to_string() }
    }

    pub fn invalid_status(code: u16) -> Self {
        Self::InvalidStatus { code }
    }

    pub fn invalid_uri<S: ToString>(reason: S) -> Self {
        Self::InvalidUri { reason: reason.to_string() }
    }
}
