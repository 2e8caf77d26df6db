//! A blocking micro HTTP client
//!
//! The client builds [`Request`]s through a [`RequestFactory`], hands them to a
//! [`Transport`](transport::Transport) and parses the raw status line and
//! header lines it gets back into a [`Response`]. It also synthesizes redirect
//! responses in six styles without any network call.
//!
//! # Example
//!
//! ```
//! use micro_client::{Client, HttpMessage, RedirectType};
//!
//! let client = Client::new();
//! let response = client.redirect("http://example.com/next", &[("step", "2")], RedirectType::Temporary)?;
//!
//! assert_eq!(response.status_code(), 307);
//! assert_eq!(response.header_line("Location"), "http://example.com/next?step=2");
//! # Ok::<(), micro_client::ClientError>(())
//! ```
//!
//! Exchanges go through [`AgentTransport`](transport::AgentTransport) unless
//! another transport is given:
//!
//! ```no_run
//! use micro_client::transport::TransportConfig;
//! use micro_client::{Client, HttpMessage};
//!
//! let config = TransportConfig::from_toml_str("connect_timeout = 2.5")?;
//! let client = Client::with_config(config)?;
//!
//! let response = client.get("http://example.com/search", &[("q", "rust")])?;
//! println!("{} {}", response.status_code(), response.body());
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

mod client;
mod encoding;
mod error;
mod factory;
mod redirect;

pub mod transport;

pub use client::Client;
pub use error::ClientError;
pub use factory::DefaultRequestFactory;
pub use factory::Payload;
pub use factory::RequestFactory;
pub use redirect::RedirectType;

pub use micro_message::protocol::{HttpMessage, Request, Response};
