use http::{StatusCode, Uri, Version};
use micro_message::stream::Stream;
use tracing::{debug, trace};
use ureq::{Agent, Proxy};

use crate::transport::config::timeout;
use crate::transport::{Exchange, Transport, TransportConfig, TransportError};

/// Exchanges requests through a blocking [`ureq::Agent`].
///
/// The agent reports every status as a response, never follows redirects and
/// decodes the response framing, so the stream handed back yields the plain
/// body. `http` and `https` targets are supported.
#[derive(Debug, Clone)]
pub struct AgentTransport {
    agent: Agent,
    config: TransportConfig,
}

impl Default for AgentTransport {
    fn default() -> Self {
        Self::with_proxy(TransportConfig::default(), None)
    }
}

impl AgentTransport {
    /// # Errors
    ///
    /// [`TransportError::Exchange`] if the configured proxy is not a valid proxy uri.
    pub fn new(config: TransportConfig) -> Result<Self, TransportError> {
        let proxy = config.proxy.as_deref().map(Proxy::new).transpose()?;
        Ok(Self::with_proxy(config, proxy))
    }

    fn with_proxy(config: TransportConfig, proxy: Option<Proxy>) -> Self {
        let agent = Agent::config_builder()
            .http_status_as_error(false)
            .max_redirects(0)
            .proxy(proxy)
            .timeout_connect(timeout(config.connect_timeout))
            .timeout_send_request(timeout(config.write_timeout))
            .timeout_send_body(timeout(config.write_timeout))
            .timeout_recv_response(timeout(config.read_timeout))
            .timeout_recv_body(timeout(config.read_timeout))
            .max_response_header_size(config.max_head_bytes)
            .build()
            .new_agent();

        Self { agent, config }
    }

    pub fn config(&self) -> &TransportConfig {
        &self.config
    }
}

/// The uri to request: `target`, with its path and query replaced by an
/// origin-form `request_target`.
fn request_uri(target: &str, request_target: &str) -> Result<Uri, TransportError> {
    let uri: Uri = target.parse().map_err(TransportError::invalid_target)?;
    if !request_target.starts_with('/') {
        return Ok(uri);
    }

    let mut parts = uri.into_parts();
    parts.path_and_query = Some(request_target.parse().map_err(TransportError::invalid_target)?);
    Uri::from_parts(parts).map_err(TransportError::invalid_target)
}

/// `(name, value)` pairs of a `Name: value\r\n` header block. The agent frames
/// the body itself, so a given Content-Length is left out.
fn header_pairs(block: &str) -> impl Iterator<Item = (&str, &str)> {
    block
        .lines()
        .filter_map(|line| line.split_once(':'))
        .map(|(name, value)| (name.trim(), value.trim()))
        .filter(|(name, _)| !name.is_empty() && !name.eq_ignore_ascii_case("content-length"))
}

fn parse_version(version: &str) -> Version {
    match version {
        "1.0" => Version::HTTP_10,
        _ => Version::HTTP_11,
    }
}

fn status_line(version: Version, status: StatusCode) -> String {
    let version = match version {
        Version::HTTP_09 => "0.9",
        Version::HTTP_10 => "1.0",
        Version::HTTP_2 => "2",
        Version::HTTP_3 => "3",
        _ => "1.1",
    };

    match status.canonical_reason() {
        Some(reason) => format!("HTTP/{version} {} {reason}", status.as_u16()),
        None => format!("HTTP/{version} {}", status.as_u16()),
    }
}

impl Transport for AgentTransport {
    fn open(&self, target: &str, exchange: &Exchange) -> Result<Stream, TransportError> {
        let uri = request_uri(target, &exchange.request_target)?;

        let mut builder = http::Request::builder()
            .method(exchange.method.clone())
            .uri(uri)
            .version(parse_version(&exchange.protocol_version));
        for (name, value) in header_pairs(&exchange.header) {
            builder = builder.header(name, value);
        }

        debug!(method = %exchange.method, uri = target, content_size = exchange.content.len(), "send exchange");
        let response = if exchange.content.is_empty() {
            self.agent.run(builder.body(()).map_err(TransportError::invalid_request)?)
        } else {
            self.agent.run(builder.body(exchange.content.to_vec()).map_err(TransportError::invalid_request)?)
        }?;

        let (parts, body) = response.into_parts();
        trace!(status = parts.status.as_u16(), header_count = parts.headers.len(), "received response head");

        let mut response_lines = Vec::with_capacity(parts.headers.len() + 1);
        response_lines.push(status_line(parts.version, parts.status));
        for (name, value) in &parts.headers {
            response_lines.push(format!("{name}: {}", String::from_utf8_lossy(value.as_bytes())));
        }

        Ok(Stream::remote(body.into_reader(), target, response_lines))
    }
}
