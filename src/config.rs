use std::net::IpAddr;
use std::path::PathBuf;
use std::time::Duration;

use ipnet::IpNet;
use reqwest::Url;

#[derive(Debug, Clone)]
pub struct Config {
    pub relay_url: Url,
    pub relay_timeout: Duration,
    pub host: IpAddr,
    pub port: u16,
    pub max_body_size: usize,
    pub trusted_proxies: Vec<IpNet>,
    pub static_dir: PathBuf,
    pub profile_path: Option<PathBuf>,
    pub log_level: String,
}

impl Config {
    pub fn from_env() -> Result<Self, String> {
        let relay_url = parse_relay_url(&env_required("PORTFOLIO_RELAY_URL")?)?;

        let relay_timeout_secs: u64 = env_or("PORTFOLIO_RELAY_TIMEOUT_SECS", "30")
            .parse()
            .map_err(|e| format!("Invalid PORTFOLIO_RELAY_TIMEOUT_SECS: {e}"))?;

        let host: IpAddr = env_or("PORTFOLIO_HOST", "0.0.0.0")
            .parse()
            .map_err(|e| format!("Invalid PORTFOLIO_HOST: {e}"))?;

        let port: u16 = env_or("PORTFOLIO_PORT", "3000")
            .parse()
            .map_err(|e| format!("Invalid PORTFOLIO_PORT: {e}"))?;

        let max_body_size: usize = env_or("PORTFOLIO_MAX_BODY_SIZE", "1048576")
            .parse()
            .map_err(|e| format!("Invalid PORTFOLIO_MAX_BODY_SIZE: {e}"))?;

        let trusted_proxies = parse_trusted_proxies(&env_or("PORTFOLIO_TRUSTED_PROXIES", ""))?;

        let static_dir = PathBuf::from(env_or("PORTFOLIO_STATIC_DIR", "static"));

        let profile_path = std::env::var("PORTFOLIO_PROFILE_PATH")
            .ok()
            .filter(|s| !s.trim().is_empty())
            .map(PathBuf::from);

        let log_level = env_or("PORTFOLIO_LOG_LEVEL", "info");

        Ok(Config {
            relay_url,
            relay_timeout: Duration::from_secs(relay_timeout_secs),
            host,
            port,
            max_body_size,
            trusted_proxies,
            static_dir,
            profile_path,
            log_level,
        })
    }
}

/// The relay target must be an absolute http(s) URL.
pub fn parse_relay_url(raw: &str) -> Result<Url, String> {
    let url = Url::parse(raw.trim()).map_err(|e| format!("Invalid PORTFOLIO_RELAY_URL: {e}"))?;
    match url.scheme() {
        "http" | "https" => Ok(url),
        other => Err(format!(
            "Invalid PORTFOLIO_RELAY_URL: unsupported scheme '{other}'"
        )),
    }
}

pub fn parse_trusted_proxies(raw: &str) -> Result<Vec<IpNet>, String> {
    raw.split(',')
        .filter(|s| !s.trim().is_empty())
        .map(|s| {
            s.trim()
                .parse()
                .map_err(|e| format!("Invalid PORTFOLIO_TRUSTED_PROXIES entry '{s}': {e}"))
        })
        .collect()
}

fn env_required(key: &str) -> Result<String, String> {
    std::env::var(key).map_err(|_| format!("Missing required environment variable: {key}"))
}

fn env_or(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}
