//! Redirect responses synthesized without any I/O.

use std::fmt;
use std::str::FromStr;

use http::StatusCode;
use micro_message::protocol::{HttpMessage, Response};
use micro_message::stream::Stream;

use crate::ClientError;
use crate::encoding::{html_escape, to_json};

const TARGET: &str = "{target}";
const TARGET_JSON: &str = "{target_json}";

const HTML_TEMPLATE: &str = r#"<!DOCTYPE html>
<html>
<head>
<meta charset="utf-8">
<meta http-equiv="refresh" content="1;url={target}">
<title>Redirecting</title>
</head>
<body>
<p>Redirecting to <a href="{target}">{target}</a></p>
</body>
</html>
"#;

const JS_TEMPLATE: &str = r#"<!DOCTYPE html>
<html>
<head>
<meta charset="utf-8">
<title>Redirecting</title>
<script>
setTimeout(function () {
    window.location.href = {target_json};
}, 1000);
</script>
</head>
<body>
<p>Redirecting to <a href="{target}">{target}</a></p>
</body>
</html>
"#;

const BLOCK_TEMPLATE: &str = r#"<!DOCTYPE html>
<html>
<head>
<meta charset="utf-8">
<title>Redirecting</title>
<script>
(function () {
    var target = {target_json};
    for (var i = 0; i < 10; i++) {
        window.history.pushState(null, document.title, target);
    }
    window.addEventListener("popstate", function () {
        window.history.pushState(null, document.title, target);
        window.location.replace(target);
    });
    window.location.replace(target);
})();
</script>
</head>
<body>
<p>Redirecting to <a href="{target}">{target}</a></p>
</body>
</html>
"#;

/// How [`Client::redirect`](crate::Client::redirect) sends the caller on.
///
/// `Temporary`, `Permanent` and `Proxy` answer with a `Location` header and no
/// body. `Html`, `Js` and `Block` answer `307` with a document doing the
/// redirect in the browser.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RedirectType {
    Temporary,
    Permanent,
    Proxy,
    /// Meta refresh after one second.
    Html,
    /// `window.location` assignment after one second.
    Js,
    /// Replaces the location and floods the history so "back" lands on the
    /// target again.
    Block,
}

impl RedirectType {
    pub fn status(self) -> StatusCode {
        match self {
            Self::Permanent => StatusCode::PERMANENT_REDIRECT,
            Self::Proxy => StatusCode::USE_PROXY,
            Self::Temporary | Self::Html | Self::Js | Self::Block => StatusCode::TEMPORARY_REDIRECT,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Temporary => "temporary",
            Self::Permanent => "permanent",
            Self::Proxy => "proxy",
            Self::Html => "html",
            Self::Js => "js",
            Self::Block => "block",
        }
    }

    fn template(self) -> Option<&'static str> {
        match self {
            Self::Temporary | Self::Permanent | Self::Proxy => None,
            Self::Html => Some(HTML_TEMPLATE),
            Self::Js => Some(JS_TEMPLATE),
            Self::Block => Some(BLOCK_TEMPLATE),
        }
    }

    /// Builds the redirect response to `target`.
    pub(crate) fn response(self, target: &str) -> Result<Response, ClientError> {
        let response = Response::new().with_status(self.status().as_u16(), None)?;

        let Some(template) = self.template() else {
            return Ok(response.with_header("Location", target));
        };

        Ok(response.with_body(Stream::from_string(render(template, target)?)))
    }
}

/// Fills the placeholders of `template` in a single pass: markup gets the
/// HTML-escaped target, script code the JSON string literal. Inserted text is
/// never scanned for placeholders again.
fn render(template: &str, target: &str) -> Result<String, ClientError> {
    let json = to_json(target)?;
    let html = html_escape(target);

    let mut document = String::with_capacity(template.len() + 4 * html.len());
    let mut rest = template;
    while let Some(start) = rest.find('{') {
        document.push_str(&rest[..start]);
        let tail = &rest[start..];
        if let Some(after) = tail.strip_prefix(TARGET_JSON) {
            document.push_str(&json);
            rest = after;
        } else if let Some(after) = tail.strip_prefix(TARGET) {
            document.push_str(&html);
            rest = after;
        } else {
            document.push('{');
            rest = &tail[1..];
        }
    }
    document.push_str(rest);
    Ok(document)
}

impl FromStr for RedirectType {
    type Err = ClientError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        [Self::Temporary, Self::Permanent, Self::Proxy, Self::Html, Self::Js, Self::Block]
            .into_iter()
            .find(|redirect_type| redirect_type.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| ClientError::invalid_redirect_type(s))
    }
}

impl fmt::Display for RedirectType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
