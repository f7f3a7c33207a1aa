use std::time::Duration;

use crate::error::ConfigError;

/// Default server address (the mapping server's development port).
pub const DEFAULT_SERVER_URL: &str = "http://127.0.0.1:5000";

/// How long a status notice stays visible.
pub const DEFAULT_NOTICE_MS: u64 = 3000;

/// Client configuration loaded from environment variables.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// Base URL of the mapping server, without a trailing slash.
    pub server_url: String,
    /// Display duration of status notices in milliseconds (default: `3000`).
    pub notice_ms: u64,
    /// Per-request timeout. `None` leaves requests unbounded.
    pub request_timeout_secs: Option<u64>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            server_url: DEFAULT_SERVER_URL.to_string(),
            notice_ms: DEFAULT_NOTICE_MS,
            request_timeout_secs: None,
        }
    }
}

impl ClientConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                         | Default                 |
    /// |---------------------------------|-------------------------|
    /// | `FIELDMAP_SERVER_URL`           | `http://127.0.0.1:5000` |
    /// | `FIELDMAP_NOTICE_MS`            | `3000`                  |
    /// | `FIELDMAP_REQUEST_TIMEOUT_SECS` | unset (no timeout)      |
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Build configuration from an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let server_url = lookup("FIELDMAP_SERVER_URL")
            .map(|url| url.trim().trim_end_matches('/').to_string())
            .filter(|url| !url.is_empty())
            .unwrap_or_else(|| DEFAULT_SERVER_URL.to_string());

        let notice_ms = match lookup("FIELDMAP_NOTICE_MS") {
            Some(raw) => parse_u64("FIELDMAP_NOTICE_MS", &raw)?,
            None => DEFAULT_NOTICE_MS,
        };

        let request_timeout_secs = lookup("FIELDMAP_REQUEST_TIMEOUT_SECS")
            .map(|raw| parse_u64("FIELDMAP_REQUEST_TIMEOUT_SECS", &raw))
            .transpose()?;

        Ok(Self {
            server_url,
            notice_ms,
            request_timeout_secs,
        })
    }

    pub fn notice_duration(&self) -> Duration {
        Duration::from_millis(self.notice_ms)
    }

    pub fn request_timeout(&self) -> Option<Duration> {
        self.request_timeout_secs.map(Duration::from_secs)
    }
}

fn parse_u64(name: &'static str, raw: &str) -> Result<u64, ConfigError> {
    raw.trim()
        .parse()
        .map_err(|_| ConfigError::InvalidValue {
            name,
            expected: "a non-negative integer",
            value: raw.to_string(),
        })
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name: &str| vars.get(name).cloned()
    }

    #[test]
    fn defaults_when_nothing_is_set() {
        let config = ClientConfig::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config, ClientConfig::default());
        assert_eq!(config.notice_duration(), Duration::from_millis(3000));
        assert_eq!(config.request_timeout(), None);
    }

    #[test]
    fn overrides_are_applied_and_trailing_slash_trimmed() {
        let config = ClientConfig::from_lookup(lookup(&[
            ("FIELDMAP_SERVER_URL", "http://mapper.local:8080/"),
            ("FIELDMAP_NOTICE_MS", "1500"),
            ("FIELDMAP_REQUEST_TIMEOUT_SECS", "10"),
        ]))
        .unwrap();

        assert_eq!(config.server_url, "http://mapper.local:8080");
        assert_eq!(config.notice_ms, 1500);
        assert_eq!(config.request_timeout(), Some(Duration::from_secs(10)));
    }

    #[test]
    fn invalid_number_is_reported() {
        let err = ClientConfig::from_lookup(lookup(&[("FIELDMAP_NOTICE_MS", "soon")])).unwrap_err();
        assert_eq!(
            err.to_string(),
            "FIELDMAP_NOTICE_MS must be a non-negative integer, got 'soon'"
        );
    }
}
