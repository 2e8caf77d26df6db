use http::StatusCode;
use micro_message::protocol::{HttpMessage, Request, Response};
use micro_message::stream::Stream;
use serde::Serialize;
use tracing::{debug, trace};

use crate::encoding::{append_query, to_json, url_encode};
use crate::factory::{DefaultRequestFactory, Payload, RequestFactory};
use crate::redirect::RedirectType;
use crate::transport::{AgentTransport, Exchange, Transport, TransportConfig, TransportError};
use crate::ClientError;

const CONTENT_TYPE: &str = "Content-Type";

/// A blocking HTTP client.
///
/// Requests are built by a [`RequestFactory`] and exchanged through a
/// [`Transport`]. The client keeps no state between calls; each call performs
/// at most one exchange and never follows redirects.
#[derive(Debug, Clone, Default)]
pub struct Client<F = DefaultRequestFactory, T = AgentTransport> {
    factory: F,
    transport: T,
}

impl Client {
    pub fn new() -> Self {
        Self::default()
    }

    /// A client exchanging through an [`AgentTransport`] built from `config`.
    ///
    /// # Errors
    ///
    /// [`TransportError::Exchange`] if the configured proxy is invalid.
    pub fn with_config(config: TransportConfig) -> Result<Self, TransportError> {
        Ok(Self::with_parts(DefaultRequestFactory, AgentTransport::new(config)?))
    }
}

impl<F> Client<F> {
    pub fn with_factory(factory: F) -> Self {
        Self::with_parts(factory, AgentTransport::default())
    }
}

impl<T> Client<DefaultRequestFactory, T> {
    pub fn with_transport(transport: T) -> Self {
        Self::with_parts(DefaultRequestFactory, transport)
    }
}

impl<F, T> Client<F, T> {
    pub fn with_parts(factory: F, transport: T) -> Self {
        Self { factory, transport }
    }

    pub fn factory(&self) -> &F {
        &self.factory
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }
}

impl<F: RequestFactory, T: Transport> Client<F, T> {
    /// Sends a `GET` with `data` URL-encoded into the query of `target`.
    ///
    /// `data` is anything that serializes to key/value pairs: a slice of
    /// tuples, a map, a struct, or `&()` for no data.
    pub fn get<D: Serialize + ?Sized>(&self, target: &str, data: &D) -> Result<Response, ClientError> {
        let target = append_query(target, &url_encode(data)?);
        let request =
            self.factory.create("GET", target.as_str(), &[(CONTENT_TYPE, mime::TEXT_PLAIN.as_ref())], Payload::Empty)?;
        self.send(&request)
    }

    /// Sends a `POST` with `data` as URL-encoded form body.
    pub fn post<D: Serialize + ?Sized>(&self, target: &str, data: &D) -> Result<Response, ClientError> {
        let payload = Payload::Text(url_encode(data)?);
        let request = self.factory.create(
            "POST",
            target,
            &[(CONTENT_TYPE, mime::APPLICATION_WWW_FORM_URLENCODED.as_ref())],
            payload,
        )?;
        self.send(&request)
    }

    /// Sends a `POST` with `data` as JSON body. `<`, `>`, `&`, `'` and `"`
    /// inside JSON strings are written as unicode escapes.
    pub fn json<D: Serialize + ?Sized>(&self, target: &str, data: &D) -> Result<Response, ClientError> {
        let payload = Payload::Text(to_json(data)?);
        let request =
            self.factory.create("POST", target, &[(CONTENT_TYPE, mime::APPLICATION_JSON.as_ref())], payload)?;
        self.send(&request)
    }

    /// Builds a redirect response to `target` with `data` appended to its query,
    /// without touching the network.
    pub fn redirect<D: Serialize + ?Sized>(
        &self,
        target: &str,
        data: &D,
        redirect_type: RedirectType,
    ) -> Result<Response, ClientError> {
        let target = append_query(target, &url_encode(data)?);
        debug!(%redirect_type, location = %target, "build redirect response");
        redirect_type.response(&target)
    }

    /// Performs the exchange for `request` and parses the result.
    ///
    /// The first response line is the status line, every following line of the
    /// form `Name: value` becomes a header. Other lines are skipped.
    ///
    /// # Errors
    ///
    /// - [`ClientError::Transport`] if the exchange fails or the status line is
    ///   missing or malformed
    /// - [`ClientError::Stream`] if the request or response body cannot be read
    pub fn send(&self, request: &Request) -> Result<Response, ClientError> {
        let uri = request.uri();
        let exchange = Exchange {
            scheme: uri.scheme_str().unwrap_or("http").to_owned(),
            method: request.method().clone(),
            request_target: request.request_target(),
            header: request.headers().to_string(),
            content: request.body().contents()?,
            protocol_version: request.protocol_version().to_owned(),
        };

        let target = uri.to_string();
        debug!(method = %exchange.method, uri = %target, "send request");
        let mut stream = self.transport.open(&target, &exchange)?;

        let lines = stream
            .metadata()
            .and_then(|metadata| metadata.response_lines().map(<[String]>::to_vec))
            .unwrap_or_default();
        let (status_line, header_lines) =
            lines.split_first().ok_or_else(|| TransportError::malformed_response("missing status line"))?;
        let status_line = StatusLine::parse(status_line)?;

        let content = stream.get_contents()?;
        debug!(status = status_line.status.as_u16(), content_size = content.len(), "received response");

        let mut response = Response::new()
            .with_protocol_version(status_line.version)
            .with_status(status_line.status.as_u16(), Some(status_line.reason.as_str()))?
            .with_body(Stream::from(content));

        for line in header_lines {
            match line.split_once(": ") {
                Some((name, value)) => response = response.with_header(name, value),
                None => trace!(line, "skip response line without header separator"),
            }
        }

        Ok(response)
    }
}

#[derive(Debug, PartialEq, Eq)]
struct StatusLine {
    version: String,
    status: StatusCode,
    reason: String,
}

impl StatusLine {
    /// Parses `HTTP/<version> <code> <reason...>`; the reason may contain spaces
    /// or be empty.
    fn parse(line: &str) -> Result<Self, TransportError> {
        let mut tokens = line.split(' ');

        let version = tokens
            .next()
            .and_then(|token| token.strip_prefix("HTTP/"))
            .filter(|version| !version.is_empty())
            .ok_or_else(|| TransportError::malformed_response(format!("invalid status line {line:?}")))?;

        let status = tokens
            .next()
            .and_then(|token| StatusCode::from_bytes(token.as_bytes()).ok())
            .ok_or_else(|| TransportError::malformed_response(format!("invalid status code in {line:?}")))?;

        let reason = tokens.collect::<Vec<_>>().join(" ");

        Ok(Self { version: version.to_owned(), status, reason })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transport::MockTransport;
    use bytes::Bytes;
    use std::collections::BTreeMap;
    use std::io::Cursor;

    fn remote(lines: &[&str], body: &'static str) -> Stream {
        let lines = lines.iter().map(|line| (*line).to_owned()).collect();
        Stream::remote(Cursor::new(body.as_bytes()), "http://example.com/", lines)
    }

    fn client(transport: MockTransport) -> Client<DefaultRequestFactory, MockTransport> {
        Client::with_transport(transport)
    }

    #[test]
    fn parse_status_line() {
        let status_line = StatusLine::parse("HTTP/1.1 404 Not Found").unwrap();
        assert_eq!(status_line.version, "1.1");
        assert_eq!(status_line.status, StatusCode::NOT_FOUND);
        assert_eq!(status_line.reason, "Not Found");

        let status_line = StatusLine::parse("HTTP/1.0 200").unwrap();
        assert_eq!(status_line.reason, "");

        for line in ["", "HTTP/1.1", "HTTP/1.1 abc OK", "HTTP/1.1 20 OK", "ICY 200 OK", "HTTP/1.1  200 OK"] {
            assert!(StatusLine::parse(line).is_err(), "{line:?}");
        }
    }

    #[test]
    fn send_parses_response() {
        let mut transport = MockTransport::new();
        transport
            .expect_open()
            .withf(|target, exchange| {
                target == "http://example.com/missing"
                    && exchange.method == http::Method::GET
                    && exchange.request_target == "/missing"
                    && exchange.scheme == "http"
            })
            .times(1)
            .returning(|_, _| Ok(remote(&["HTTP/1.1 404 Not Found", "Content-Type: text/plain"], "missing")));

        let response = client(transport).get("http://example.com/missing", &()).unwrap();

        assert_eq!(response.status_code(), 404);
        assert_eq!(response.reason_phrase(), "Not Found");
        assert_eq!(response.protocol_version(), "1.1");
        assert_eq!(response.header_line("content-type"), "text/plain");
        assert_eq!(response.body().to_string(), "missing");
    }

    #[test]
    fn send_keeps_multi_word_reason_and_skips_odd_lines() {
        let mut transport = MockTransport::new();
        transport.expect_open().returning(|_, _| {
            Ok(remote(&["HTTP/1.0 503 Service Temporarily Unavailable", "garbage", "Retry-After: 120", "X-Empty:"], ""))
        });

        let response = client(transport).get("http://example.com/", &()).unwrap();

        assert_eq!(response.status_code(), 503);
        assert_eq!(response.reason_phrase(), "Service Temporarily Unavailable");
        assert_eq!(response.protocol_version(), "1.0");
        assert_eq!(response.headers().names().collect::<Vec<_>>(), ["Retry-After"]);
    }

    #[test]
    fn send_fails_without_status_line() {
        let mut transport = MockTransport::new();
        transport.expect_open().returning(|_, _| Ok(remote(&[], "body")));

        let error = client(transport).get("http://example.com/", &()).unwrap_err();
        assert!(matches!(error, ClientError::Transport { source: TransportError::MalformedResponse { .. } }));

        let mut transport = MockTransport::new();
        transport.expect_open().returning(|_, _| Ok(remote(&["HTTP/1.1 OK"], "body")));

        let error = client(transport).get("http://example.com/", &()).unwrap_err();
        assert!(matches!(error, ClientError::Transport { source: TransportError::MalformedResponse { .. } }));
    }

    #[test]
    fn send_surfaces_transport_errors() {
        let mut transport = MockTransport::new();
        transport
            .expect_open()
            .times(1)
            .returning(|_, _| Err(TransportError::invalid_target("no host")));

        let error = client(transport).get("https://example.com/", &()).unwrap_err();
        assert!(matches!(error, ClientError::Transport { source: TransportError::InvalidTarget { .. } }));
    }

    #[test]
    fn get_appends_query() {
        let mut transport = MockTransport::new();
        transport
            .expect_open()
            .withf(|target, exchange| {
                target == "http://example.com/search?z=9&a=1&b=2"
                    && exchange.request_target == "/search?z=9&a=1&b=2"
                    && exchange.header == "Host: example.com\r\nContent-Type: text/plain\r\n"
                    && exchange.content.is_empty()
            })
            .returning(|_, _| Ok(remote(&["HTTP/1.1 200 OK"], "")));

        let response = client(transport).get("http://example.com/search?z=9", &[("a", "1"), ("b", "2")]).unwrap();
        assert_eq!(response.status_code(), 200);
    }

    #[test]
    fn post_sends_form_body() {
        let mut transport = MockTransport::new();
        transport
            .expect_open()
            .withf(|_, exchange| {
                exchange.method == http::Method::POST
                    && exchange.header.contains("Content-Type: application/x-www-form-urlencoded\r\n")
                    && exchange.content == Bytes::from_static(b"name=micro+client&lang=rust")
            })
            .returning(|_, _| Ok(remote(&["HTTP/1.1 201 Created", "Location: /items/1"], "")));

        let response =
            client(transport).post("http://example.com/items", &[("name", "micro client"), ("lang", "rust")]).unwrap();
        assert_eq!(response.status_code(), 201);
        assert_eq!(response.header_line("Location"), "/items/1");
    }

    #[test]
    fn json_sends_escaped_body() {
        let mut data = BTreeMap::new();
        data.insert("q", "<b>");

        let mut transport = MockTransport::new();
        transport
            .expect_open()
            .withf(|_, exchange| {
                exchange.header.contains("Content-Type: application/json\r\n")
                    && exchange.content == Bytes::from_static(br#"{"q":"\u003Cb\u003E"}"#)
            })
            .returning(|_, _| Ok(remote(&["HTTP/1.1 200 OK", "Content-Type: application/json"], "{}")));

        let response = client(transport).json("http://example.com/api", &data).unwrap();
        assert_eq!(response.body().to_string(), "{}");
    }

    #[test]
    fn send_reads_body_from_start() {
        let request = Request::new()
            .with_method("PUT")
            .unwrap()
            .with_uri("http://example.com/doc".parse().unwrap(), false)
            .with_body(Stream::from("document"));
        request.body().lock().read(3).unwrap();

        let mut transport = MockTransport::new();
        transport
            .expect_open()
            .withf(|_, exchange| {
                exchange.content == Bytes::from_static(b"document") && exchange.protocol_version == "1.1"
            })
            .returning(|_, _| Ok(remote(&["HTTP/1.1 204 No Content"], "")));

        let response = client(transport).send(&request).unwrap();
        assert_eq!(response.status_code(), 204);
    }

    #[test]
    fn redirect_does_no_io() {
        let mut transport = MockTransport::new();
        transport.expect_open().never();
        let client = client(transport);

        let response = client.redirect("http://dest", &(), RedirectType::Temporary).unwrap();
        assert_eq!(response.status_code(), 307);
        assert_eq!(response.header_line("Location"), "http://dest");
        assert_eq!(response.body().to_string(), "");

        let response = client.redirect("http://dest/", &[("a", "1"), ("b", "2")], RedirectType::Html).unwrap();
        assert_eq!(response.status_code(), 307);
        let body = response.body().to_string();
        assert!(body.contains(r#"meta http-equiv="refresh" content="1;url=http://dest/?a=1&amp;b=2""#));
    }

    #[test]
    fn invalid_target_is_an_argument_error() {
        let mut transport = MockTransport::new();
        transport.expect_open().never();

        let error = client(transport).get("http://exa mple.com/", &()).unwrap_err();
        assert!(matches!(error, ClientError::Argument { .. }));
    }
}
