//! The raw exchange behind [`Client::send`](crate::Client::send).
//!
//! A [`Transport`] takes a serialized request head and body, performs the
//! exchange and hands back the response body as a remote [`Stream`] whose
//! `response_lines` metadata holds the status line and header lines.

mod agent;
mod config;
mod error;

pub use agent::AgentTransport;
pub use config::ConfigError;
pub use config::TransportConfig;
pub use error::TransportError;

use bytes::Bytes;
use http::Method;
use micro_message::stream::Stream;

/// Everything a transport needs to put a request on the wire.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Exchange {
    pub scheme: String,
    pub method: Method,
    /// Origin-form target written in the request line.
    pub request_target: String,
    /// Serialized header block, `Name: value\r\n` per header.
    pub header: String,
    pub content: Bytes,
    pub protocol_version: String,
}

#[cfg_attr(test, mockall::automock)]
pub trait Transport {
    /// Performs one exchange with `target`.
    ///
    /// The returned stream is positioned at the start of the response body and
    /// carries the raw response lines under the
    /// [`RESPONSE_LINES`](micro_message::stream::RESPONSE_LINES) metadata key.
    fn open(&self, target: &str, exchange: &Exchange) -> Result<Stream, TransportError>;
}
