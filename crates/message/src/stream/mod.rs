//! Byte streams backing message bodies.
//!
//! - [`Stream`]: a readable/writable/seekable byte sequence over a file, an
//!   in-memory buffer or a remote reader
//! - [`OpenMode`]: fopen-style open modes deciding a stream's capabilities
//! - [`Metadata`]: what a stream knows about its resource, including the raw
//!   response lines of transport streams
//! - [`StreamError`]: capability and io failures

mod error;
mod metadata;
mod mode;
#[allow(clippy::module_inception, reason = "the stream type lives in its own file like the other modules")]
mod stream;

pub use error::StreamError;
pub use metadata::Metadata;
pub use metadata::MetadataValue;
pub use metadata::{MODE, RESPONSE_LINES, SEEKABLE, URI};
pub use mode::OpenMode;
pub use stream::Handle;
pub use stream::Stream;
