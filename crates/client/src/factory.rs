use std::fmt;

use http::Uri;
use micro_message::protocol::{ArgumentError, HttpMessage, Request};
use micro_message::stream::Stream;

use crate::ClientError;
use crate::encoding::url_encode;

/// The body a factory puts into a new request.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Payload {
    #[default]
    Empty,
    Text(String),
    /// Pairs URL-encoded as `application/x-www-form-urlencoded`.
    Form(Vec<(String, String)>),
}

impl From<&str> for Payload {
    fn from(text: &str) -> Self {
        Self::Text(text.to_owned())
    }
}

impl From<String> for Payload {
    fn from(text: String) -> Self {
        Self::Text(text)
    }
}

impl Payload {
    fn into_stream(self) -> Result<Stream, ClientError> {
        let content = match self {
            Self::Empty => String::new(),
            Self::Text(text) => text,
            Self::Form(pairs) => url_encode(&pairs)?,
        };
        Ok(Stream::from_string(content))
    }
}

/// Builds the requests a [`Client`](crate::Client) sends.
pub trait RequestFactory {
    /// Creates a request for `method` and `uri`, applying `headers` in order
    /// and filling the body from `payload`.
    ///
    /// # Errors
    ///
    /// - [`ArgumentError::InvalidMethod`] for an unknown method
    /// - [`ArgumentError::InvalidUri`] if `uri` cannot be converted into a [`Uri`]
    /// - [`ClientError::Encode`] if the form payload cannot be encoded
    fn create<U>(
        &self,
        method: &str,
        uri: U,
        headers: &[(&str, &str)],
        payload: Payload,
    ) -> Result<Request, ClientError>
    where
        U: TryInto<Uri>,
        U::Error: fmt::Display;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultRequestFactory;

impl RequestFactory for DefaultRequestFactory {
    fn create<U>(
        &self,
        method: &str,
        uri: U,
        headers: &[(&str, &str)],
        payload: Payload,
    ) -> Result<Request, ClientError>
    where
        U: TryInto<Uri>,
        U::Error: fmt::Display,
    {
        let request = Request::new().with_method(method)?;
        let uri: Uri = uri.try_into().map_err(ArgumentError::invalid_uri)?;
        let request = request.with_uri(uri, false);

        let request = headers.iter().fold(request, |request, (name, value)| request.with_header(*name, *value));

        Ok(request.with_body(payload.into_stream()?))
    }
}
