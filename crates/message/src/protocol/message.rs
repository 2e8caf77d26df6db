use std::fmt;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use bytes::Bytes;

use crate::protocol::Headers;
use crate::stream::{Stream, StreamError};

/// Protocol version of freshly built messages.
pub const DEFAULT_PROTOCOL_VERSION: &str = "1.1";

/// Handle to the body [`Stream`] of a message.
///
/// Cloning a message clones the handle, not the stream: every message value
/// derived from another one through a header or version mutator reads and writes
/// the same stream. [`HttpMessage::with_body`] is the only way to give a message
/// a different stream.
#[derive(Clone)]
pub struct Body {
    inner: Arc<Mutex<Stream>>,
}

impl Body {
    pub fn new(stream: Stream) -> Self {
        Self { inner: Arc::new(Mutex::new(stream)) }
    }

    /// An empty in-memory body.
    pub fn empty() -> Self {
        Self::new(Stream::memory())
    }

    /// Locks the stream for direct use.
    pub fn lock(&self) -> MutexGuard<'_, Stream> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Reads the whole body from the start when the stream is seekable, or what
    /// is left of it otherwise.
    pub fn contents(&self) -> Result<Bytes, StreamError> {
        let mut stream = self.lock();
        if stream.is_seekable() {
            stream.rewind()?;
        }
        stream.get_contents()
    }

    /// Returns true if both handles refer to the same stream.
    pub fn ptr_eq(&self, other: &Body) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }
}

impl Default for Body {
    fn default() -> Self {
        Self::empty()
    }
}

impl From<Stream> for Body {
    fn from(stream: Stream) -> Self {
        Self::new(stream)
    }
}

impl fmt::Debug for Body {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.inner.try_lock() {
            Ok(stream) => f.debug_tuple("Body").field(&*stream).finish(),
            Err(_) => f.write_str("Body(<locked>)"),
        }
    }
}

/// Stringifies the whole body, see [`Stream::stringify`]. Never fails.
impl fmt::Display for Body {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.lock().stringify())
    }
}

/// The parts shared by requests and responses.
#[derive(Debug, Clone)]
pub struct Message {
    protocol_version: String,
    headers: Headers,
    body: Body,
}

impl Default for Message {
    fn default() -> Self {
        Self { protocol_version: DEFAULT_PROTOCOL_VERSION.to_owned(), headers: Headers::new(), body: Body::empty() }
    }
}

impl Message {
    pub fn new() -> Self {
        Self::default()
    }
}

/// Copy-on-write access to the protocol version, headers and body of a message.
///
/// Every `with*` method returns a new value with exactly one part changed and
/// leaves `self` untouched. Implementors only provide access to their embedded
/// [`Message`].
pub trait HttpMessage: Clone {
    fn message(&self) -> &Message;

    fn message_mut(&mut self) -> &mut Message;

    fn protocol_version(&self) -> &str {
        &self.message().protocol_version
    }

    #[must_use]
    fn with_protocol_version<V: Into<String>>(&self, version: V) -> Self {
        let mut that = self.clone();
        that.message_mut().protocol_version = version.into();
        that
    }

    fn headers(&self) -> &Headers {
        &self.message().headers
    }

    fn has_header(&self, name: &str) -> bool {
        self.headers().contains(name)
    }

    /// All values of `name`, empty if the header is absent.
    fn header(&self, name: &str) -> &[String] {
        self.headers().get(name)
    }

    /// All values of `name` joined with `", "`.
    fn header_line(&self, name: &str) -> String {
        self.headers().line(name)
    }

    /// Replaces all values of `name`, matched case-insensitively.
    #[must_use]
    fn with_header<N: Into<String>, V: Into<String>>(&self, name: N, value: V) -> Self {
        self.with_header_values(name, [value])
    }

    #[must_use]
    fn with_header_values<N, I, V>(&self, name: N, values: I) -> Self
    where
        N: Into<String>,
        I: IntoIterator<Item = V>,
        V: Into<String>,
    {
        let mut that = self.clone();
        that.message_mut().headers.set(name, values.into_iter().map(Into::into).collect());
        that
    }

    /// Appends a value to `name`, creating the header if needed.
    #[must_use]
    fn with_added_header<N: Into<String>, V: Into<String>>(&self, name: N, value: V) -> Self {
        let mut that = self.clone();
        that.message_mut().headers.append(name, vec![value.into()]);
        that
    }

    #[must_use]
    fn without_header(&self, name: &str) -> Self {
        let mut that = self.clone();
        that.message_mut().headers.remove(name);
        that
    }

    fn body(&self) -> &Body {
        &self.message().body
    }

    /// Returns a copy holding `body`; `self` keeps its own stream.
    #[must_use]
    fn with_body<B: Into<Body>>(&self, body: B) -> Self {
        let mut that = self.clone();
        that.message_mut().body = body.into();
        that
    }
}

impl HttpMessage for Message {
    fn message(&self) -> &Message {
        self
    }

    fn message_mut(&mut self) -> &mut Message {
        self
    }
}
