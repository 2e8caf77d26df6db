/// Metadata key for the seekable flag.
pub const SEEKABLE: &str = "seekable";
/// Metadata key for the open mode.
pub const MODE: &str = "mode";
/// Metadata key for the resource location the stream was opened from.
pub const URI: &str = "uri";
/// Reserved metadata key holding the raw response lines of a transport stream,
/// status line first.
pub const RESPONSE_LINES: &str = "response_lines";

/// Snapshot of a stream's metadata, see [`Stream::metadata`](crate::stream::Stream::metadata).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Metadata {
    pub seekable: bool,
    pub mode: String,
    pub uri: Option<String>,
    pub response_lines: Option<Vec<String>>,
}

/// A single metadata entry looked up by key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MetadataValue<'a> {
    Bool(bool),
    Str(&'a str),
    Lines(&'a [String]),
}

impl Metadata {
    pub fn get(&self, key: &str) -> Option<MetadataValue<'_>> {
        match key {
            SEEKABLE => Some(MetadataValue::Bool(self.seekable)),
            MODE => Some(MetadataValue::Str(&self.mode)),
            URI => self.uri.as_deref().map(MetadataValue::Str),
            RESPONSE_LINES => self.response_lines.as_deref().map(MetadataValue::Lines),
            _ => None,
        }
    }

    pub fn response_lines(&self) -> Option<&[String]> {
        self.response_lines.as_deref()
    }
}
