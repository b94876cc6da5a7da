use std::{net::SocketAddr, path::PathBuf, time::Duration};

use anyhow::Context;

const DEFAULT_LISTEN_ADDR: &str = "0.0.0.0:8080";
const DEFAULT_REQUEST_TIMEOUT_MS: u64 = 30_000;
const DEFAULT_BACKEND_TIMEOUT_MS: u64 = 10_000;
const DEFAULT_REFRESH_INTERVAL_SECS: u64 = 300;

#[derive(Debug, Clone)]
pub struct Config {
    pub listen_addr: SocketAddr,
    /// Base URL of the deal flow backend. Without it the services run on
    /// fixtures.
    pub backend_url: Option<String>,
    pub backend_token: Option<String>,
    pub backend_timeout: Duration,
    pub cors_allow: Vec<String>,
    pub request_timeout: Duration,
    pub scoring_policy_path: Option<PathBuf>,
    pub frameworks_path: Option<PathBuf>,
    /// Period of the background refresh; `None` disables it.
    pub refresh_interval: Option<Duration>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            listen_addr: SocketAddr::from(([0, 0, 0, 0], 8080)),
            backend_url: None,
            backend_token: None,
            backend_timeout: Duration::from_millis(DEFAULT_BACKEND_TIMEOUT_MS),
            cors_allow: vec!["*".to_string()],
            request_timeout: Duration::from_millis(DEFAULT_REQUEST_TIMEOUT_MS),
            scoring_policy_path: None,
            frameworks_path: None,
            refresh_interval: Some(Duration::from_secs(DEFAULT_REFRESH_INTERVAL_SECS)),
        }
    }
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the configuration from `lookup`, which maps a variable name to
    /// its value.
    pub fn from_lookup<F>(lookup: F) -> anyhow::Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_empty = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());

        let listen_raw = non_empty("DF_LISTEN_ADDR").unwrap_or_else(|| DEFAULT_LISTEN_ADDR.into());
        let listen_addr: SocketAddr = listen_raw
            .parse()
            .with_context(|| format!("Invalid DF_LISTEN_ADDR '{}'", listen_raw))?;

        let cors_allow = non_empty("DF_CORS_ALLOW_ORIGINS")
            .unwrap_or_else(|| "*".into())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        let number = |key: &str, default: u64| -> u64 {
            match non_empty(key) {
                Some(raw) => raw.parse().unwrap_or_else(|_| {
                    tracing::warn!("Invalid {} '{}', using {}", key, raw, default);
                    default
                }),
                None => default,
            }
        };

        let refresh_secs = number("DF_REFRESH_INTERVAL_SECS", DEFAULT_REFRESH_INTERVAL_SECS);

        Ok(Self {
            listen_addr,
            backend_url: non_empty("DF_BACKEND_URL"),
            backend_token: non_empty("DF_BACKEND_TOKEN"),
            backend_timeout: Duration::from_millis(number(
                "DF_BACKEND_TIMEOUT_MS",
                DEFAULT_BACKEND_TIMEOUT_MS,
            )),
            cors_allow,
            request_timeout: Duration::from_millis(number(
                "DF_REQUEST_TIMEOUT_MS",
                DEFAULT_REQUEST_TIMEOUT_MS,
            )),
            scoring_policy_path: non_empty("DF_SCORING_POLICY_PATH").map(PathBuf::from),
            frameworks_path: non_empty("DF_FRAMEWORKS_PATH").map(PathBuf::from),
            refresh_interval: (refresh_secs > 0).then(|| Duration::from_secs(refresh_secs)),
        })
    }
}
