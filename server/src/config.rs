//! # Server Configuration
//!
//! Settings are read from an optional YAML file (path in `CAMPUS_PORTAL_CONFIG`)
//! and then overridden by individual environment variables.

use anyhow::{Context, Result};
use serde::Deserialize;
use std::net::SocketAddr;
use std::path::{Path, PathBuf};

pub const CONFIG_PATH_ENV: &str = "CAMPUS_PORTAL_CONFIG";
pub const BIND_ADDR_ENV: &str = "CAMPUS_PORTAL_ADDR";
pub const ALLOWED_ORIGIN_ENV: &str = "CAMPUS_PORTAL_ORIGIN";
pub const LOG_FILTER_ENV: &str = "RUST_LOG";

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Address the HTTP listener binds to
    pub bind_addr: SocketAddr,
    /// Origin allowed by CORS (the frontend dev server)
    pub allowed_origin: String,
    /// `EnvFilter` directive string
    pub log_filter: String,
    /// Seed the admin/teacher/student demo accounts on startup
    pub seed_demo_users: bool,
    /// Directory with the built frontend, served for non-API paths
    pub static_dir: Option<PathBuf>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: SocketAddr::from(([127, 0, 0, 1], 5001)),
            allowed_origin: "http://localhost:8080".to_string(),
            log_filter: "info".to_string(),
            seed_demo_users: true,
            static_dir: None,
        }
    }
}

impl ServerConfig {
    /// Load configuration from the environment
    pub fn load() -> Result<Self> {
        let mut config = match std::env::var_os(CONFIG_PATH_ENV) {
            Some(path) => Self::from_file(Path::new(&path))?,
            None => Self::default(),
        };
        config.apply_overrides(|key| std::env::var(key).ok())?;
        Ok(config)
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        Self::from_yaml_str(&contents)
            .with_context(|| format!("Failed to parse config file {}", path.display()))
    }

    pub fn from_yaml_str(contents: &str) -> Result<Self> {
        if contents.trim().is_empty() {
            return Ok(Self::default());
        }
        Ok(serde_yaml::from_str(contents)?)
    }

    fn apply_overrides<F>(&mut self, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(addr) = lookup(BIND_ADDR_ENV) {
            self.bind_addr = addr
                .parse()
                .with_context(|| format!("{} is not a socket address: {}", BIND_ADDR_ENV, addr))?;
        }
        if let Some(origin) = lookup(ALLOWED_ORIGIN_ENV) {
            self.allowed_origin = origin;
        }
        if let Some(filter) = lookup(LOG_FILTER_ENV) {
            self.log_filter = filter;
        }
        Ok(())
    }
}
