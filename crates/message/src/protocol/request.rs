//! Outgoing HTTP requests.
//!
//! A [`Request`] is a [`Message`] plus a method, a target URI and an optional
//! request-target override. Like every message it is immutable: `with_*`
//! methods return a new request.
//!
//! The Host header follows the URI: [`Request::with_uri`] writes the new URI's
//! authority into Host unless asked to preserve an existing one.

use http::{Method, Uri};

use crate::ensure;
use crate::protocol::{ArgumentError, HttpMessage, Message};

/// The methods a request accepts, matched case-insensitively.
const VALID_METHODS: [Method; 9] = [
    Method::CONNECT,
    Method::DELETE,
    Method::GET,
    Method::HEAD,
    Method::OPTIONS,
    Method::PATCH,
    Method::POST,
    Method::PUT,
    Method::TRACE,
];

/// Parses `method` against the fixed method set, normalizing it to upper case.
pub fn parse_method(method: &str) -> Result<Method, ArgumentError> {
    VALID_METHODS
        .iter()
        .find(|valid| valid.as_str().eq_ignore_ascii_case(method))
        .cloned()
        .ok_or_else(|| ArgumentError::invalid_method(method))
}

/// An HTTP request.
#[derive(Debug, Clone)]
pub struct Request {
    message: Message,
    method: Method,
    uri: Uri,
    request_target: Option<String>,
}

impl Default for Request {
    fn default() -> Self {
        Self { message: Message::new(), method: Method::GET, uri: Uri::default(), request_target: None }
    }
}

impl HttpMessage for Request {
    fn message(&self) -> &Message {
        &self.message
    }

    fn message_mut(&mut self) -> &mut Message {
        &mut self.message
    }
}

impl Request {
    /// A `GET /` request without headers and with an empty body.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn method(&self) -> &Method {
        &self.method
    }

    /// Returns a copy using `method`.
    ///
    /// # Errors
    ///
    /// [`ArgumentError::InvalidMethod`] unless `method` is one of CONNECT,
    /// DELETE, GET, HEAD, OPTIONS, PATCH, POST, PUT or TRACE in any casing.
    pub fn with_method(&self, method: &str) -> Result<Self, ArgumentError> {
        let method = parse_method(method)?;
        let mut that = self.clone();
        that.method = method;
        Ok(that)
    }

    /// The request-target: the explicit override when one is set, otherwise the
    /// origin-form of the URI (path and query), `/` when both are empty.
    pub fn request_target(&self) -> String {
        if let Some(target) = &self.request_target {
            return target.clone();
        }

        let mut target = self.uri.path().to_owned();
        if let Some(query) = self.uri.query().filter(|query| !query.is_empty()) {
            target.push('?');
            target.push_str(query);
        }
        if target.is_empty() {
            target.push('/');
        }
        target
    }

    /// Returns a copy with an explicit request-target, used verbatim. An empty
    /// target falls back to the one derived from the URI.
    ///
    /// # Errors
    ///
    /// [`ArgumentError::InvalidRequestTarget`] if `target` contains whitespace.
    pub fn with_request_target(&self, target: &str) -> Result<Self, ArgumentError> {
        ensure!(!target.contains(char::is_whitespace), ArgumentError::invalid_request_target(target));

        let mut that = self.clone();
        that.request_target = (!target.is_empty()).then(|| target.to_owned());
        Ok(that)
    }

    pub fn uri(&self) -> &Uri {
        &self.uri
    }

    /// Returns a copy targeting `uri`.
    ///
    /// When the URI has a host, the Host header is replaced by the URI's
    /// authority. With `preserve_host` an existing non-empty Host header is kept
    /// and only a missing or empty one is filled in. Passing the current URI
    /// returns an equivalent copy.
    #[must_use]
    pub fn with_uri(&self, uri: Uri, preserve_host: bool) -> Self {
        if self.uri == uri {
            return self.clone();
        }

        let host = host_header(&uri);
        let mut that = self.clone();
        that.uri = uri;

        let Some(host) = host else {
            return that;
        };

        if preserve_host && !self.header_line("Host").is_empty() {
            return that;
        }

        that.with_header("Host", host)
    }
}

/// The Host header value for `uri`: its host, plus the port when the port is
/// given and is not the scheme's default.
fn host_header(uri: &Uri) -> Option<String> {
    let host = uri.host().filter(|host| !host.is_empty())?;

    let default_port = match uri.scheme_str() {
        Some("http") => Some(80),
        Some("https") => Some(443),
        _ => None,
    };

    match uri.port_u16() {
        Some(port) if Some(port) != default_port => Some(format!("{host}:{port}")),
        _ => Some(host.to_owned()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn uri(s: &str) -> Uri {
        s.parse().unwrap()
    }

    #[test]
    fn default_request() {
        let request = Request::new();
        assert_eq!(request.method(), Method::GET);
        assert_eq!(request.request_target(), "/");
        assert_eq!(request.protocol_version(), "1.1");
        assert!(!request.has_header("Host"));
    }

    #[test]
    fn method_is_case_insensitive() {
        let request = Request::new().with_method("post").unwrap();
        assert_eq!(request.method(), Method::POST);

        let lower = Request::new().with_method("get").unwrap();
        let upper = Request::new().with_method("GET").unwrap();
        assert_eq!(lower.method(), upper.method());

        for method in ["connect", "Delete", "HEAD", "options", "patch", "put", "trace"] {
            assert!(Request::new().with_method(method).is_ok(), "{method}");
        }
    }

    #[test]
    fn unknown_method_is_rejected() {
        let error = Request::new().with_method("FOO").unwrap_err();
        assert_eq!(error, ArgumentError::invalid_method("FOO"));
        assert!(Request::new().with_method("").is_err());
    }

    #[test]
    fn request_target_from_uri() {
        let request = Request::new().with_uri(uri("http://example.com/a/b?x=1"), false);
        assert_eq!(request.request_target(), "/a/b?x=1");

        let request = Request::new().with_uri(uri("http://example.com"), false);
        assert_eq!(request.request_target(), "/");

        let request = Request::new().with_uri(uri("example.com:8080"), false);
        assert_eq!(request.request_target(), "/");
    }

    #[test]
    fn request_target_override() {
        let request = Request::new()
            .with_uri(uri("http://example.com/a"), false)
            .with_request_target("*")
            .unwrap();
        assert_eq!(request.request_target(), "*");

        let reset = request.with_request_target("").unwrap();
        assert_eq!(reset.request_target(), "/a");
    }

    #[test]
    fn request_target_rejects_whitespace() {
        for target in ["/a b", "/a\tb", "/a\n"] {
            let error = Request::new().with_request_target(target).unwrap_err();
            assert!(matches!(error, ArgumentError::InvalidRequestTarget { .. }), "{target:?}");
        }
    }

    #[test]
    fn with_uri_sets_host() {
        let request = Request::new().with_uri(uri("http://example.com/path"), false);
        assert_eq!(request.header("host"), ["example.com"]);

        let request = Request::new().with_uri(uri("http://example.com:8080/path"), false);
        assert_eq!(request.header_line("Host"), "example.com:8080");

        let request = Request::new().with_uri(uri("http://example.com:80/path"), false);
        assert_eq!(request.header_line("Host"), "example.com");

        let request = Request::new().with_uri(uri("https://example.com:443/"), false);
        assert_eq!(request.header_line("Host"), "example.com");
    }

    #[test]
    fn with_uri_replaces_host() {
        let request = Request::new()
            .with_header("host", "old.example.com")
            .with_uri(uri("http://new.example.com/"), false);

        assert_eq!(request.header("HOST"), ["new.example.com"]);
        assert_eq!(request.headers().len(), 1);
    }

    #[test]
    fn with_uri_preserves_existing_host() {
        let request = Request::new()
            .with_header("Host", "kept.example.com")
            .with_uri(uri("http://other.example.com/"), true);
        assert_eq!(request.header_line("Host"), "kept.example.com");
        assert_eq!(request.uri(), &uri("http://other.example.com/"));

        let request = Request::new().with_uri(uri("http://filled.example.com/"), true);
        assert_eq!(request.header_line("Host"), "filled.example.com");

        let request = Request::new()
            .with_header("Host", "")
            .with_uri(uri("http://filled.example.com/"), true);
        assert_eq!(request.header_line("Host"), "filled.example.com");
    }

    #[test]
    fn with_uri_without_host_keeps_header() {
        let request = Request::new()
            .with_header("Host", "example.com")
            .with_uri(uri("/relative?q=1"), false);

        assert_eq!(request.header_line("Host"), "example.com");
        assert_eq!(request.request_target(), "/relative?q=1");
    }

    #[test]
    fn same_uri_is_a_no_op() {
        let request = Request::new()
            .with_uri(uri("http://example.com/"), false)
            .with_header("Host", "custom");

        let same = request.with_uri(uri("http://example.com/"), false);
        assert_eq!(same.header_line("Host"), "custom");
        assert_eq!(same.headers(), request.headers());
    }

    #[test]
    fn mutators_do_not_touch_original() {
        let request = Request::new().with_uri(uri("http://example.com/"), false);
        let _ = request.with_method("PUT").unwrap();
        let _ = request.with_uri(uri("http://other.com/"), false);
        let _ = request.with_request_target("/x").unwrap();

        assert_eq!(request.method(), Method::GET);
        assert_eq!(request.header_line("Host"), "example.com");
        assert_eq!(request.request_target(), "/");
    }
}
