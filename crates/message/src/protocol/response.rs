//! HTTP responses.
//!
//! A [`Response`] is a [`Message`] plus a status code and a reason phrase. The
//! status code is validated with [`http::StatusCode`], which also provides the
//! canonical reason phrase used when none is given.

use http::StatusCode;

use crate::protocol::{ArgumentError, HttpMessage, Message};

#[derive(Debug, Clone)]
pub struct Response {
    message: Message,
    status: StatusCode,
    reason_phrase: String,
}

impl Default for Response {
    fn default() -> Self {
        Self { message: Message::new(), status: StatusCode::OK, reason_phrase: canonical_reason(StatusCode::OK) }
    }
}

impl HttpMessage for Response {
    fn message(&self) -> &Message {
        &self.message
    }

    fn message_mut(&mut self) -> &mut Message {
        &mut self.message
    }
}

fn canonical_reason(status: StatusCode) -> String {
    status.canonical_reason().unwrap_or_default().to_owned()
}

impl Response {
    /// A `200 OK` response with an empty body.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn status(&self) -> StatusCode {
        self.status
    }

    pub fn status_code(&self) -> u16 {
        self.status.as_u16()
    }

    pub fn reason_phrase(&self) -> &str {
        &self.reason_phrase
    }

    /// Returns a copy with the given status.
    ///
    /// A missing or empty `reason` falls back to the canonical phrase of `code`,
    /// or to an empty phrase for codes without one.
    ///
    /// # Errors
    ///
    /// [`ArgumentError::InvalidStatus`] if `code` is not a three digit status code.
    pub fn with_status(&self, code: u16, reason: Option<&str>) -> Result<Self, ArgumentError> {
        let status = StatusCode::from_u16(code).ok().ok_or_else(|| ArgumentError::invalid_status(code))?;

        let mut that = self.clone();
        that.status = status;
        that.reason_phrase = match reason {
            Some(reason) if !reason.is_empty() => reason.to_owned(),
            _ => canonical_reason(status),
        };
        Ok(that)
    }
}
