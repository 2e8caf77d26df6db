use std::fmt;
use std::fs::File;
use std::io::{Cursor, Read, Seek, SeekFrom, Write};
use std::path::Path;

use bytes::Bytes;
use tracing::trace;

use crate::ensure;
use crate::stream::{Metadata, OpenMode, StreamError};

/// The raw resource behind a [`Stream`].
///
/// Returned by [`Stream::detach`], after which the caller owns it.
pub enum Handle {
    /// A file on the local file system
    File(File),
    /// An in-memory read-write buffer
    Memory(Cursor<Vec<u8>>),
    /// A forward-only reader, typically the body of a transport exchange
    Remote(Box<dyn Read + Send>),
}

impl Handle {
    fn reader(&mut self) -> &mut dyn Read {
        match self {
            Handle::File(file) => file,
            Handle::Memory(cursor) => cursor,
            Handle::Remote(reader) => reader.as_mut(),
        }
    }
}

impl fmt::Debug for Handle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Handle::File(file) => f.debug_tuple("File").field(file).finish(),
            Handle::Memory(cursor) => f
                .debug_struct("Memory")
                .field("len", &cursor.get_ref().len())
                .field("position", &cursor.position())
                .finish(),
            Handle::Remote(_) => f.write_str("Remote"),
        }
    }
}

/// A readable, writable and seekable byte sequence over an owned resource.
///
/// The resource is acquired when the stream is constructed and released when the
/// stream is dropped, closed or detached. Once the resource is gone every
/// operation fails with [`StreamError::Detached`].
///
/// Capabilities depend on the resource and the [`OpenMode`]:
///
/// - file streams honour their open mode and are seekable
/// - memory streams (see [`Stream::from_string`]) are read-write and seekable
/// - remote streams are read-only and forward-only, and carry the raw response
///   lines of the exchange that produced them in their [`Metadata`]
pub struct Stream {
    handle: Option<Handle>,
    mode: OpenMode,
    uri: Option<String>,
    response_lines: Option<Vec<String>>,
    // forward-only bookkeeping for remote streams
    consumed: u64,
    exhausted: bool,
}

impl Stream {
    /// Opens the file at `path` with an fopen-style `mode`.
    ///
    /// # Errors
    ///
    /// Fails with [`StreamError::InvalidMode`] for an unknown mode and with
    /// [`StreamError::Io`] when the file cannot be opened.
    pub fn open<P: AsRef<Path>>(path: P, mode: &str) -> Result<Self, StreamError> {
        let mode = OpenMode::parse(mode)?;
        let path = path.as_ref();
        let file = mode.open_options().open(path)?;

        trace!(path = %path.display(), mode = %mode, "opened file stream");
        Ok(Self::with_handle(Handle::File(file), mode, Some(path.display().to_string())))
    }

    /// An empty in-memory read-write stream.
    pub fn memory() -> Self {
        Self::from_string(Vec::new())
    }

    /// An in-memory read-write stream pre-loaded with `content`, positioned at
    /// offset 0 so the content can be read back right away.
    pub fn from_string<B: Into<Vec<u8>>>(content: B) -> Self {
        let cursor = Cursor::new(content.into());
        Self::with_handle(Handle::Memory(cursor), OpenMode::read_write(), None)
    }

    /// A read-only stream over the body of a transport exchange.
    ///
    /// `response_lines` is exposed under the
    /// [`RESPONSE_LINES`](crate::stream::RESPONSE_LINES) metadata key.
    pub fn remote<R, U>(reader: R, uri: U, response_lines: Vec<String>) -> Self
    where
        R: Read + Send + 'static,
        U: Into<String>,
    {
        let mut stream = Self::with_handle(Handle::Remote(Box::new(reader)), OpenMode::read(), Some(uri.into()));
        stream.response_lines = Some(response_lines);
        stream
    }

    fn with_handle(handle: Handle, mode: OpenMode, uri: Option<String>) -> Self {
        Self { handle: Some(handle), mode, uri, response_lines: None, consumed: 0, exhausted: false }
    }

    fn handle_mut(&mut self) -> Result<&mut Handle, StreamError> {
        self.handle.as_mut().ok_or(StreamError::Detached)
    }

    pub fn is_readable(&self) -> bool {
        self.handle.is_some() && self.mode.is_readable()
    }

    pub fn is_writable(&self) -> bool {
        self.handle.is_some() && self.mode.is_writable()
    }

    pub fn is_seekable(&self) -> bool {
        matches!(self.handle, Some(Handle::File(_) | Handle::Memory(_)))
    }

    /// Reads up to `length` bytes. Fewer bytes are returned when the end of the
    /// stream is reached first.
    pub fn read(&mut self, length: usize) -> Result<Bytes, StreamError> {
        ensure!(self.handle.is_some(), StreamError::Detached);
        ensure!(self.mode.is_readable(), StreamError::NotReadable);

        let limit = u64::try_from(length).unwrap_or(u64::MAX);
        let mut buf = Vec::with_capacity(length.min(8 * 1024));
        let read = self.handle_mut()?.reader().take(limit).read_to_end(&mut buf)?;

        self.consumed += read as u64;
        if read < length {
            self.exhausted = true;
        }
        Ok(Bytes::from(buf))
    }

    /// Writes all of `bytes`, returning the number of bytes written.
    pub fn write(&mut self, bytes: &[u8]) -> Result<usize, StreamError> {
        ensure!(self.handle.is_some(), StreamError::Detached);
        ensure!(self.mode.is_writable(), StreamError::NotWritable);

        let append = self.mode.is_append();
        match self.handle_mut()? {
            Handle::File(file) => file.write_all(bytes)?,
            Handle::Memory(cursor) => {
                if append {
                    cursor.seek(SeekFrom::End(0))?;
                }
                cursor.write_all(bytes)?;
            }
            Handle::Remote(_) => return Err(StreamError::NotWritable),
        }
        Ok(bytes.len())
    }

    /// Moves the cursor, returning the new offset from the start.
    pub fn seek(&mut self, pos: SeekFrom) -> Result<u64, StreamError> {
        let offset = match self.handle_mut()? {
            Handle::File(file) => file.seek(pos)?,
            Handle::Memory(cursor) => cursor.seek(pos)?,
            Handle::Remote(_) => return Err(StreamError::NotSeekable),
        };
        self.exhausted = false;
        Ok(offset)
    }

    pub fn rewind(&mut self) -> Result<(), StreamError> {
        self.seek(SeekFrom::Start(0)).map(|_| ())
    }

    /// Current offset of the cursor. Remote streams report the number of bytes
    /// consumed so far.
    pub fn tell(&mut self) -> Result<u64, StreamError> {
        let consumed = self.consumed;
        match self.handle_mut()? {
            Handle::File(file) => Ok(file.stream_position()?),
            Handle::Memory(cursor) => Ok(cursor.position()),
            Handle::Remote(_) => Ok(consumed),
        }
    }

    /// True when the stream is detached or has nothing left to read.
    pub fn eof(&self) -> bool {
        match &self.handle {
            None => true,
            Some(Handle::Memory(cursor)) => cursor.position() >= cursor.get_ref().len() as u64,
            Some(Handle::File(file)) => {
                let mut file = file;
                match (file.stream_position(), file.metadata()) {
                    (Ok(position), Ok(metadata)) => position >= metadata.len(),
                    _ => true,
                }
            }
            Some(Handle::Remote(_)) => self.exhausted,
        }
    }

    /// Size in bytes if known.
    pub fn size(&self) -> Option<u64> {
        match self.handle.as_ref()? {
            Handle::File(file) => file.metadata().ok().map(|metadata| metadata.len()),
            Handle::Memory(cursor) => u64::try_from(cursor.get_ref().len()).ok(),
            Handle::Remote(_) => None,
        }
    }

    /// Reads everything from the current position to the end.
    pub fn get_contents(&mut self) -> Result<Bytes, StreamError> {
        ensure!(self.handle.is_some(), StreamError::Detached);
        ensure!(self.mode.is_readable(), StreamError::NotReadable);

        let mut buf = Vec::new();
        let read = self.handle_mut()?.reader().read_to_end(&mut buf)?;

        self.consumed += read as u64;
        self.exhausted = true;
        Ok(Bytes::from(buf))
    }

    /// Rewinds and reads the whole stream into a string.
    ///
    /// This never fails: any error, including a stream that cannot be rewound,
    /// yields an empty string. Invalid UTF-8 is replaced.
    pub fn stringify(&mut self) -> String {
        match self.rewind().and_then(|()| self.get_contents()) {
            Ok(bytes) => String::from_utf8_lossy(&bytes).into_owned(),
            Err(e) => {
                trace!(cause = %e, "stringify stream failed, fall back to empty string");
                String::new()
            }
        }
    }

    /// Metadata of the underlying resource, `None` once detached.
    pub fn metadata(&self) -> Option<Metadata> {
        self.handle.as_ref()?;
        Some(Metadata {
            seekable: self.is_seekable(),
            mode: self.mode.to_string(),
            uri: self.uri.clone(),
            response_lines: self.response_lines.clone(),
        })
    }

    /// Separates the underlying resource from the stream and hands it to the
    /// caller. The stream is unusable afterwards.
    pub fn detach(&mut self) -> Option<Handle> {
        self.handle.take()
    }

    /// Detaches and releases the underlying resource. Closing twice is a no-op.
    pub fn close(&mut self) {
        if let Some(handle) = self.detach() {
            trace!(handle = ?handle, "closing stream");
        }
    }
}

impl fmt::Debug for Stream {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Stream")
            .field("handle", &self.handle)
            .field("mode", &self.mode.as_str())
            .field("uri", &self.uri)
            .finish_non_exhaustive()
    }
}

impl From<String> for Stream {
    fn from(value: String) -> Self {
        Stream::from_string(value)
    }
}

impl From<&str> for Stream {
    fn from(value: &str) -> Self {
        Stream::from_string(value)
    }
}

impl From<Vec<u8>> for Stream {
    fn from(value: Vec<u8>) -> Self {
        Stream::from_string(value)
    }
}

impl From<Bytes> for Stream {
    fn from(value: Bytes) -> Self {
        Stream::from_string(value)
    }
}
