use std::env;
use std::str::FromStr;
use std::time::Duration;

const DEFAULT_PORT: u16 = 8080;
const DEFAULT_BIND_ADDR: &str = "0.0.0.0";
const DEFAULT_MAX_BODY_BYTES: usize = 1024 * 1024;
const DEFAULT_LOG_BODY_LIMIT: usize = 8000;
const DEFAULT_SHUTDOWN_TIMEOUT_SECS: u64 = 10;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ServerConfig {
    pub bind_addr: String,
    pub port: u16,
    /// Requests with larger bodies are rejected before reaching the webhook.
    pub max_body_bytes: usize,
    /// Request and response bodies are cut to this many characters in logs.
    pub log_body_limit: usize,
    /// After a shutdown signal, the process exits anyway once this has passed.
    pub shutdown_timeout_secs: u64,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: DEFAULT_BIND_ADDR.to_string(),
            port: DEFAULT_PORT,
            max_body_bytes: DEFAULT_MAX_BODY_BYTES,
            log_body_limit: DEFAULT_LOG_BODY_LIMIT,
            shutdown_timeout_secs: DEFAULT_SHUTDOWN_TIMEOUT_SECS,
        }
    }
}

impl ServerConfig {
    /// Reads `PORT`, `BIND_ADDR`, `MAX_BODY_BYTES`, `LOG_BODY_LIMIT` and
    /// `SHUTDOWN_TIMEOUT_SECS`.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        Self {
            bind_addr: lookup("BIND_ADDR")
                .filter(|v| !v.trim().is_empty())
                .unwrap_or(defaults.bind_addr),
            port: parse_or(&lookup, "PORT", defaults.port),
            max_body_bytes: parse_or(&lookup, "MAX_BODY_BYTES", defaults.max_body_bytes),
            log_body_limit: parse_or(&lookup, "LOG_BODY_LIMIT", defaults.log_body_limit),
            shutdown_timeout_secs: parse_or(
                &lookup,
                "SHUTDOWN_TIMEOUT_SECS",
                defaults.shutdown_timeout_secs,
            ),
        }
    }

    pub fn listen_addr(&self) -> String {
        format!("{}:{}", self.bind_addr, self.port)
    }

    pub fn shutdown_timeout(&self) -> Duration {
        Duration::from_secs(self.shutdown_timeout_secs)
    }
}

fn parse_or<T: FromStr>(lookup: &impl Fn(&str) -> Option<String>, key: &str, default: T) -> T {
    match lookup(key) {
        Some(raw) => raw.trim().parse().unwrap_or_else(|_| {
            tracing::warn!("Ignoring invalid {}={:?}", key, raw);
            default
        }),
        None => default,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults_when_unset() {
        let config = ServerConfig::from_lookup(lookup_from(&[]));
        assert_eq!(config, ServerConfig::default());
        assert_eq!(config.listen_addr(), "0.0.0.0:8080");
        assert_eq!(config.shutdown_timeout(), Duration::from_secs(10));
    }

    #[test]
    fn test_reads_overrides() {
        let config = ServerConfig::from_lookup(lookup_from(&[
            ("PORT", "3000"),
            ("BIND_ADDR", "127.0.0.1"),
            ("MAX_BODY_BYTES", "2048"),
            ("LOG_BODY_LIMIT", " 100 "),
            ("SHUTDOWN_TIMEOUT_SECS", "3"),
        ]));
        assert_eq!(config.listen_addr(), "127.0.0.1:3000");
        assert_eq!(config.max_body_bytes, 2048);
        assert_eq!(config.log_body_limit, 100);
        assert_eq!(config.shutdown_timeout(), Duration::from_secs(3));
    }

    #[test]
    fn test_invalid_values_fall_back() {
        let config = ServerConfig::from_lookup(lookup_from(&[
            ("PORT", "eighty"),
            ("BIND_ADDR", "  "),
            ("SHUTDOWN_TIMEOUT_SECS", "-1"),
        ]));
        assert_eq!(config.port, DEFAULT_PORT);
        assert_eq!(config.shutdown_timeout_secs, DEFAULT_SHUTDOWN_TIMEOUT_SECS);
        assert_eq!(config.bind_addr, DEFAULT_BIND_ADDR);
    }
}
