use micro_message::protocol::ArgumentError;
use micro_message::stream::StreamError;
use thiserror::Error;

use crate::transport::TransportError;

#[derive(Error, Debug)]
pub enum ClientError {
    #[error("invalid argument: {source}")]
    Argument {
        #[from]
        source: ArgumentError,
    },

    #[error("invalid redirect type: {value:?}")]
    InvalidRedirectType { value: String },

    #[error("stream error: {source}")]
    Stream {
        #[from]
        source: StreamError,
    },

    #[error("transport error: {source}")]
    Transport {
        #[from]
        source: TransportError,
    },

    #[error("encode error: {reason}")]
    Encode { reason: String },
}

impl ClientError {
    pub fn invalid_redirect_type<S: ToString>(value: S) -> Self {
        Self::InvalidRedirectType { value: value.to_string() }
    }

    pub fn encode<S: ToString>(str: S) -> Self {
        Self::Encode { reason: str.to_string() }
    }
}
