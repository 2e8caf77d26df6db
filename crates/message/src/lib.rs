//! Immutable HTTP messages and the byte streams carrying their bodies.
//!
//! This crate provides the value model used by `micro-client`: requests and
//! responses whose mutators never change the receiver, a header collection that
//! matches names case-insensitively while remembering how they were written, and
//! a [`Stream`](stream::Stream) abstraction over files, memory buffers and
//! transport readers.
//!
//! # Example
//!
//! ```
//! use micro_message::protocol::{HttpMessage, Response};
//! use micro_message::stream::Stream;
//!
//! let response = Response::new()
//!     .with_status(404, None)
//!     .unwrap()
//!     .with_header("Content-Type", "text/plain")
//!     .with_body(Stream::from("missing"));
//!
//! assert_eq!(response.reason_phrase(), "Not Found");
//! assert_eq!(response.header("content-type"), ["text/plain"]);
//! assert_eq!(response.body().to_string(), "missing");
//! ```
//!
//! # Architecture
//!
//! - [`protocol`]: headers, messages, requests, responses
//! - [`stream`]: streams, open modes, stream metadata
//!
//! # Error Handling
//!
//! - [`protocol::ArgumentError`]: a mutator was given a value it cannot accept
//! - [`stream::StreamError`]: a stream lacks a capability or its resource failed
//!
//! Stringifying a stream or a body is the one operation that never fails; it
//! yields an empty string instead.

pub mod protocol;
pub mod stream;

mod utils;
pub(crate) use utils::ensure;
