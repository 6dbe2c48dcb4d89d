use std::path::PathBuf;

use anyhow::Context;
use serde::Deserialize;

use crate::http::connection::DEFAULT_READ_BUFFER;

/// Env var naming an optional YAML config file.
pub const CONFIG_ENV: &str = "WICKET_CONFIG";
/// Env var overriding `server.listen_addr`.
pub const LISTEN_ENV: &str = "LISTEN";

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Config {
    pub server: ServerConfig,
    pub static_files: Option<StaticFilesConfig>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub listen_addr: String,
    /// Upper bound on connections served at once
    pub max_connections: usize,
    /// Size of the single read performed per connection
    pub read_buffer_size: usize,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct StaticFilesConfig {
    /// Directory whose files are served as `GET /<file name>`
    pub root: PathBuf,
    /// File name (inside `root`) that gets timestamp substitution
    pub template: String,
    pub template_token: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server: ServerConfig::default(),
            static_files: Some(StaticFilesConfig::default()),
        }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            listen_addr: "127.0.0.1:8080".to_string(),
            max_connections: 64,
            read_buffer_size: DEFAULT_READ_BUFFER,
        }
    }
}

impl Default for StaticFilesConfig {
    fn default() -> Self {
        Self {
            root: PathBuf::from("public"),
            template: "classic.html".to_string(),
            template_token: "{time}".to_string(),
        }
    }
}

impl Config {
    /// Loads the file named by `WICKET_CONFIG` (defaults when unset), then
    /// applies the `LISTEN` override.
    pub fn load() -> anyhow::Result<Self> {
        let mut cfg = match std::env::var(CONFIG_ENV) {
            Ok(path) => {
                let raw = std::fs::read_to_string(&path)
                    .with_context(|| format!("failed to read config file {}", path))?;
                Self::from_yaml(&raw).with_context(|| format!("invalid config file {}", path))?
            }
            Err(_) => Self::default(),
        };

        if let Ok(listen_addr) = std::env::var(LISTEN_ENV) {
            cfg.server.listen_addr = listen_addr;
        }

        Ok(cfg)
    }

    pub fn from_yaml(raw: &str) -> anyhow::Result<Self> {
        let cfg: Config = serde_yaml::from_str(raw).context("failed to parse YAML config")?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn validate(&self) -> anyhow::Result<()> {
        if self.server.max_connections == 0 {
            anyhow::bail!("server.max_connections must be greater than 0");
        }
        if self.server.read_buffer_size == 0 {
            anyhow::bail!("server.read_buffer_size must be greater than 0");
        }
        Ok(())
    }
}
