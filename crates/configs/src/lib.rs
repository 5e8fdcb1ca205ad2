use std::time::Duration;

use anyhow::anyhow;
use anyhow::Result;
use serde::Deserialize;

pub const DEFAULT_PORT: u16 = 5000;

#[derive(Debug, Clone, Deserialize, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub external: ExternalConfig,
    #[serde(default)]
    pub client: ClientConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    #[serde(default)]
    pub worker_threads: Option<usize>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self { host: default_host(), port: DEFAULT_PORT, worker_threads: Some(4) }
    }
}

/// Third-party endpoint relayed by `/api/external-data`.
#[derive(Debug, Clone, Deserialize)]
pub struct ExternalConfig {
    #[serde(default = "default_external_url")]
    pub url: String,
    #[serde(default = "default_connect_timeout")]
    pub connect_timeout_secs: u64,
    #[serde(default = "default_request_timeout")]
    pub request_timeout_secs: u64,
}

impl Default for ExternalConfig {
    fn default() -> Self {
        Self {
            url: default_external_url(),
            connect_timeout_secs: default_connect_timeout(),
            request_timeout_secs: default_request_timeout(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct ClientConfig {
    #[serde(default = "default_api_url")]
    pub api_url: String,
    #[serde(default = "default_flash_secs")]
    pub flash_secs: u64,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self { api_url: default_api_url(), flash_secs: default_flash_secs() }
    }
}

fn default_host() -> String { "127.0.0.1".into() }
fn default_port() -> u16 { DEFAULT_PORT }
fn default_external_url() -> String { "https://jsonplaceholder.typicode.com/posts/1".into() }
fn default_connect_timeout() -> u64 { 5 }
fn default_request_timeout() -> u64 { 10 }
fn default_api_url() -> String { format!("http://localhost:{DEFAULT_PORT}/api") }
fn default_flash_secs() -> u64 { 3 }

pub fn load_from_file(path: &str) -> Result<AppConfig> {
    let content = std::fs::read_to_string(path)?;
    parse(&content)
}

fn is_not_found(err: &anyhow::Error) -> bool {
    err.downcast_ref::<std::io::Error>()
        .is_some_and(|io| io.kind() == std::io::ErrorKind::NotFound)
}

pub fn parse(content: &str) -> Result<AppConfig> {
    let cfg: AppConfig = toml::from_str(content)?;
    Ok(cfg)
}

impl AppConfig {
    /// Load `config.toml` (or `CONFIG_PATH`) when present, otherwise
    /// defaults with `SERVER_HOST` / `SERVER_PORT` applied on top.
    pub fn load_or_env() -> Result<Self> {
        let path = std::env::var("CONFIG_PATH").unwrap_or_else(|_| "config.toml".to_string());
        Self::load_or_env_from(&path)
    }

    /// Only a missing file falls back to defaults; unreadable or malformed
    /// files are errors.
    pub fn load_or_env_from(path: &str) -> Result<Self> {
        let mut cfg = match load_from_file(path) {
            Ok(cfg) => cfg,
            Err(e) if is_not_found(&e) => {
                let mut cfg = AppConfig::default();
                if let Ok(host) = std::env::var("SERVER_HOST") {
                    cfg.server.host = host;
                }
                if let Some(port) =
                    std::env::var("SERVER_PORT").ok().and_then(|p| p.parse::<u16>().ok())
                {
                    cfg.server.port = port;
                }
                cfg
            }
            Err(e) => return Err(e.context(format!("failed to load config from {path}"))),
        };
        cfg.normalize_and_validate()?;
        Ok(cfg)
    }

    pub fn normalize_and_validate(&mut self) -> Result<()> {
        self.server.normalize()?;
        self.external.validate()?;
        self.client.validate()?;
        Ok(())
    }
}

impl ServerConfig {
    fn normalize(&mut self) -> Result<()> {
        if self.host.trim().is_empty() {
            self.host = default_host();
        }
        if self.port == 0 {
            return Err(anyhow!("server.port must be in 1..=65535"));
        }
        match self.worker_threads {
            Some(w) if w > 0 => {}
            _ => self.worker_threads = Some(4),
        }
        Ok(())
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl ExternalConfig {
    pub fn validate(&self) -> Result<()> {
        let lower = self.url.trim().to_lowercase();
        if !(lower.starts_with("http://") || lower.starts_with("https://")) {
            return Err(anyhow!("external.url must start with http:// or https://"));
        }
        if self.connect_timeout_secs == 0 || self.request_timeout_secs == 0 {
            return Err(anyhow!("external timeouts must be positive seconds"));
        }
        Ok(())
    }

    pub fn connect_timeout(&self) -> Duration {
        Duration::from_secs(self.connect_timeout_secs)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}

impl ClientConfig {
    pub fn validate(&self) -> Result<()> {
        if self.api_url.trim().is_empty() {
            return Err(anyhow!("client.api_url is empty"));
        }
        Ok(())
    }

    pub fn flash_duration(&self) -> Duration {
        Duration::from_secs(self.flash_secs)
    }
}
