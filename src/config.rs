//! Application configuration loaded from environment variables.

use serde::Deserialize;

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    // === Server Configuration ===
    /// HTTP listen port.
    #[serde(default = "default_port")]
    pub port: u16,

    /// Bind address.
    #[serde(default = "default_host")]
    pub host: String,

    // === Service Metadata ===
    /// Deployment label surfaced by the root endpoint.
    #[serde(default = "default_environment")]
    pub environment: String,

    // === Store ===
    /// Load the seed items at startup.
    #[serde(default = "default_true")]
    pub seed_items: bool,

    // === Logging ===
    /// Log level (trace, debug, info, warn, error).
    #[serde(default = "default_log_level")]
    pub rust_log: String,
}

fn default_port() -> u16 {
    8000
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_environment() -> String {
    "development".to_string()
}

fn default_true() -> bool {
    true
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            port: default_port(),
            host: default_host(),
            environment: default_environment(),
            seed_items: default_true(),
            rust_log: default_log_level(),
        }
    }
}

impl Config {
    /// Load configuration from environment, reading .env file first.
    pub fn load() -> Result<Self, envy::Error> {
        dotenvy::dotenv().ok();
        envy::from_env()
    }

    /// Check if the configuration is valid.
    pub fn validate(&self) -> Result<(), String> {
        if self.port == 0 {
            return Err("PORT must be a non-zero port number".to_string());
        }

        if self.host.trim().is_empty() {
            return Err("HOST must not be empty".to_string());
        }

        if self.environment.trim().is_empty() {
            return Err("ENVIRONMENT must not be empty".to_string());
        }

        Ok(())
    }

    /// Socket address string to bind the HTTP server on.
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
