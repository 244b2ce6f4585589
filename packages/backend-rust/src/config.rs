use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::time::Duration;

const DEFAULT_PORT: u16 = 8000;
const DEFAULT_REDIS_URL: &str = "redis://localhost:6379";
const DEFAULT_STATE_TTL_SECS: u64 = 24 * 60 * 60;
const DEFAULT_STORE_TIMEOUT_MS: u64 = 500;

#[derive(Debug, Clone)]
pub struct Config {
    pub host: IpAddr,
    pub port: u16,
    pub log_level: String,
    /// Directory for the daily rolling log file, when file logging is on
    pub log_dir: Option<String>,
    /// `None` runs the service on the in-memory fallback only
    pub redis_url: Option<String>,
    pub state_ttl: Duration,
    pub store_timeout: Duration,
}

impl Config {
    pub fn from_env() -> Self {
        let port = env_parse("PORT").unwrap_or(DEFAULT_PORT);

        let host = env_parse("HOST").unwrap_or(IpAddr::V4(Ipv4Addr::new(0, 0, 0, 0)));

        let log_level = std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string());

        let log_dir = env_bool("ENABLE_FILE_LOGS")
            .unwrap_or(false)
            .then(|| std::env::var("LOG_DIR").unwrap_or_else(|_| "./logs".to_string()));

        let redis_url = match std::env::var("REDIS_URL") {
            Ok(value) => Some(value.trim().to_string()).filter(|v| !v.is_empty()),
            Err(_) => Some(DEFAULT_REDIS_URL.to_string()),
        };

        let state_ttl = Duration::from_secs(
            env_parse("IRT_STATE_TTL_SECS").unwrap_or(DEFAULT_STATE_TTL_SECS),
        );

        let store_timeout = Duration::from_millis(
            env_parse("STORE_TIMEOUT_MS").unwrap_or(DEFAULT_STORE_TIMEOUT_MS),
        );

        Self {
            host,
            port,
            log_level,
            log_dir,
            redis_url,
            state_ttl,
            store_timeout,
        }
    }

    /// Memory-only configuration, used by tests and local tooling
    pub fn in_memory() -> Self {
        Self {
            host: IpAddr::V4(Ipv4Addr::LOCALHOST),
            port: DEFAULT_PORT,
            log_level: "info".to_string(),
            log_dir: None,
            redis_url: None,
            state_ttl: Duration::from_secs(DEFAULT_STATE_TTL_SECS),
            store_timeout: Duration::from_millis(DEFAULT_STORE_TIMEOUT_MS),
        }
    }

    pub fn bind_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}

fn env_parse<T: std::str::FromStr>(key: &str) -> Option<T> {
    std::env::var(key)
        .ok()
        .and_then(|value| value.trim().parse::<T>().ok())
}

fn env_bool(key: &str) -> Option<bool> {
    let value = std::env::var(key).ok()?;
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}
