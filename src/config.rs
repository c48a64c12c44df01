// Configuration module
// Immutable process-lifetime configuration, loaded once at startup.

use serde::Deserialize;
use std::net::SocketAddr;

/// Main configuration structure
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub server: ServerConfig,
    pub files: FilesConfig,
    pub cache: CacheConfig,
    pub logging: LoggingConfig,
    pub performance: PerformanceConfig,
}

/// Server configuration
#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub workers: Option<usize>,
}

/// File serving configuration
#[derive(Debug, Deserialize, Clone)]
pub struct FilesConfig {
    /// Document root all request paths are resolved under.
    pub root: String,
    /// Directory entries whose names start with any of these prefixes are
    /// hidden from listings.
    pub ignore_prefixes: Vec<String>,
}

/// Cache header switches
#[derive(Debug, Deserialize, Clone)]
pub struct CacheConfig {
    pub enable_cache_control: bool,
    pub enable_expires: bool,
    pub enable_etag: bool,
    pub enable_last_modified: bool,
    /// Freshness lifetime in seconds for Cache-Control and Expires.
    pub max_age: u32,
}

/// Logging configuration
#[derive(Debug, Deserialize, Clone)]
pub struct LoggingConfig {
    pub level: String,
    pub access_log: bool,
}

/// Performance configuration
#[derive(Debug, Deserialize, Clone)]
pub struct PerformanceConfig {
    pub keep_alive_timeout: u64,
    pub read_timeout: u64,
    pub write_timeout: u64,
    pub max_connections: Option<u64>,
}

impl Config {
    /// Load configuration from "config.toml" in the working directory.
    pub fn load() -> Result<Self, config::ConfigError> {
        Self::load_from("config")
    }

    /// Load configuration from the specified file path (without extension).
    ///
    /// The file is optional; `SERVER_`-prefixed environment variables
    /// override it, and built-in defaults fill the rest.
    pub fn load_from(config_path: &str) -> Result<Self, config::ConfigError> {
        let settings = config::Config::builder()
            .add_source(config::File::with_name(config_path).required(false))
            .add_source(config::Environment::with_prefix("SERVER").separator("__"))
            .set_default("server.host", "127.0.0.1")?
            .set_default("server.port", 3003)?
            .set_default("files.root", ".")?
            .set_default("files.ignore_prefixes", vec![".", "~"])?
            .set_default("cache.enable_cache_control", true)?
            .set_default("cache.enable_expires", true)?
            .set_default("cache.enable_etag", true)?
            .set_default("cache.enable_last_modified", true)?
            .set_default("cache.max_age", 600)?
            .set_default("logging.level", "info")?
            .set_default("logging.access_log", true)?
            .set_default("performance.keep_alive_timeout", 75)?
            .set_default("performance.read_timeout", 30)?
            .set_default("performance.write_timeout", 30)?
            .build()?;

        settings.try_deserialize()
    }

    pub fn socket_addr(&self) -> Result<SocketAddr, String> {
        format!("{}:{}", self.server.host, self.server.port)
            .parse()
            .map_err(|e| format!("Invalid address: {e}"))
    }
}
