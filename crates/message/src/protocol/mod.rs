//! The immutable HTTP message model.
//!
//! - **Headers** ([`Headers`]): case-insensitive lookups, casing-preserving
//!   storage, insertion ordered
//! - **Messages** ([`Message`], [`HttpMessage`]): protocol version, headers and
//!   a [`Body`], with copy-on-write mutators shared by requests and responses
//! - **Requests** ([`Request`]): method, URI, request-target and the Host header
//!   synchronization rules
//! - **Responses** ([`Response`]): status code and reason phrase
//! - **Errors** ([`ArgumentError`]): rejected mutator arguments
//!
//! # Example
//!
//! ```
//! use micro_message::protocol::{HttpMessage, Request};
//!
//! let request = Request::new()
//!     .with_method("post")
//!     .unwrap()
//!     .with_uri("http://example.com:8080/items?page=2".parse().unwrap(), false)
//!     .with_header("Content-Type", "text/plain");
//!
//! assert_eq!(request.method(), http::Method::POST);
//! assert_eq!(request.request_target(), "/items?page=2");
//! assert_eq!(request.header_line("host"), "example.com:8080");
//! ```

mod header;
pub use header::Headers;

mod message;
pub use message::Body;
pub use message::DEFAULT_PROTOCOL_VERSION;
pub use message::HttpMessage;
pub use message::Message;

mod request;
pub use request::Request;
pub use request::parse_method;

mod response;
pub use response::Response;

mod error;
pub use error::ArgumentError;
