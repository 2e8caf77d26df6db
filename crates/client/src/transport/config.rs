use std::io;
use std::path::Path;
use std::time::Duration;

use serde::Deserialize;
use thiserror::Error;

const DEFAULT_MAX_HEAD_BYTES: usize = 64 * 1024;

/// Limits, timeouts and proxy of [`AgentTransport`](crate::transport::AgentTransport).
///
/// Timeouts are given in (fractional) seconds when loaded from TOML. A timeout
/// of `0` means no timeout.
///
/// ```toml
/// connect_timeout = 2.5
/// read_timeout = 10
/// max_head_bytes = 16384
/// proxy = "http://proxy.internal:3128"
/// ```
///
/// Missing keys keep their default. Without `proxy` requests go out directly.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct TransportConfig {
    #[serde(deserialize_with = "deserialize_duration")]
    pub connect_timeout: Duration,

    /// Bound for receiving the response head and, separately, its body.
    #[serde(deserialize_with = "deserialize_duration")]
    pub read_timeout: Duration,

    /// Bound for sending the request head and, separately, its body.
    #[serde(deserialize_with = "deserialize_duration")]
    pub write_timeout: Duration,

    /// Upper bound of the status line plus header lines, in bytes.
    pub max_head_bytes: usize,

    pub proxy: Option<String>,
}

impl Default for TransportConfig {
    fn default() -> Self {
        Self {
            connect_timeout: Duration::from_secs(10),
            read_timeout: Duration::from_secs(30),
            write_timeout: Duration::from_secs(30),
            max_head_bytes: DEFAULT_MAX_HEAD_BYTES,
            proxy: None,
        }
    }
}

/// A configured duration as agent timeout, `None` for zero.
pub(crate) fn timeout(duration: Duration) -> Option<Duration> {
    (!duration.is_zero()).then_some(duration)
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    Io { path: String, source: io::Error },

    #[error("failed to parse config: {source}")]
    Parse {
        #[from]
        source: toml::de::Error,
    },
}

impl TransportConfig {
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(content)?)
    }

    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .map_err(|source| ConfigError::Io { path: path.display().to_string(), source })?;
        Self::from_toml_str(&content)
    }
}

fn deserialize_duration<'de, D>(deserializer: D) -> Result<Duration, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let secs = f64::deserialize(deserializer)?;
    Duration::try_from_secs_f64(secs).map_err(serde::de::Error::custom)
}
