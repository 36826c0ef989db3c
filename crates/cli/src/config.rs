//! Configuration loading from modelgate.toml and the environment.

use std::net::SocketAddr;
use std::path::Path;

use serde::Deserialize;

pub const DEFAULT_MODEL: &str = "Qwen/Qwen3-14B";
pub const DEFAULT_PORT: u16 = 8080;
const DEFAULT_HOST: &str = "0.0.0.0";

/// Top-level configuration.
#[derive(Debug, Deserialize, Default)]
pub struct Config {
    /// Inference backend configuration.
    #[serde(default)]
    pub backend: BackendConfig,

    /// Listener configuration.
    #[serde(default)]
    pub server: ServerConfig,
}

/// Backend provider configuration.
#[derive(Debug, Deserialize)]
pub struct BackendConfig {
    /// Model to query.
    #[serde(default = "default_model")]
    pub model: String,

    /// Inference provider routed to by Hugging Face.
    #[serde(default = "default_provider")]
    pub provider: String,

    /// Hugging Face token. Usually left unset here and supplied via the
    /// HF_TOKEN environment variable instead.
    pub token: Option<String>,
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            model: default_model(),
            provider: default_provider(),
            token: None,
        }
    }
}

/// HTTP listener configuration.
#[derive(Debug, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

fn default_model() -> String {
    DEFAULT_MODEL.to_string()
}

fn default_provider() -> String {
    gateway::DEFAULT_PROVIDER.to_string()
}

fn default_host() -> String {
    DEFAULT_HOST.to_string()
}

fn default_port() -> u16 {
    std::env::var("PORT")
        .ok()
        .and_then(|p| p.parse().ok())
        .unwrap_or(DEFAULT_PORT)
}

impl Config {
    /// Load configuration from a TOML file, or defaults if it is absent.
    pub fn load_or_default(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(path)?;
        Self::parse(&content)
    }

    /// Parse configuration from a TOML string.
    pub fn parse(toml: &str) -> Result<Self, ConfigError> {
        toml::from_str(toml).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    /// Resolve the provider credential: file value, then HF_TOKEN.
    pub fn token(&self) -> Result<String, ConfigError> {
        if let Some(token) = &self.backend.token {
            return Ok(token.clone());
        }
        std::env::var("HF_TOKEN").map_err(|_| ConfigError::MissingToken)
    }

    /// The socket address the HTTP listener binds.
    pub fn bind_addr(&self) -> Result<SocketAddr, ConfigError> {
        format!("{}:{}", self.server.host, self.server.port)
            .parse()
            .map_err(|_| {
                ConfigError::InvalidAddr(format!("{}:{}", self.server.host, self.server.port))
            })
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse config: {0}")]
    Parse(String),

    #[error("provider token not configured: set backend.token or the HF_TOKEN environment variable")]
    MissingToken,

    #[error("invalid bind address: {0}")]
    InvalidAddr(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_when_empty() {
        let config = Config::parse("").unwrap();
        assert_eq!(config.backend.model, DEFAULT_MODEL);
        assert_eq!(config.backend.provider, "featherless-ai");
        assert_eq!(config.server.host, "0.0.0.0");
    }

    #[test]
    fn parses_backend_section() {
        let config = Config::parse(
            r#"
            [backend]
            model = "Qwen/Qwen3-32B"
            token = "hf_test"

            [server]
            port = 9090
            "#,
        )
        .unwrap();
        assert_eq!(config.backend.model, "Qwen/Qwen3-32B");
        assert_eq!(config.server.port, 9090);
        assert_eq!(config.token().unwrap(), "hf_test");
    }

    #[test]
    fn bind_addr_combines_host_and_port() {
        let config = Config::parse("[server]\nhost = \"127.0.0.1\"\nport = 3000\n").unwrap();
        assert_eq!(config.bind_addr().unwrap().port(), 3000);
    }

    #[test]
    fn rejects_malformed_toml() {
        assert!(matches!(
            Config::parse("[backend"),
            Err(ConfigError::Parse(_))
        ));
    }
}
