//! Configuration System
//!
//! Handles loading configuration from files and environment variables.
//! Supports TOML config files and environment variable overrides. Retry
//! policy and the source list are static startup configuration, not
//! runtime-mutable state.

use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::loader::{LoaderConfig, SourceSpec};

/// Main configuration structure
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,

    #[serde(default)]
    pub loader: RetryConfig,

    #[serde(default = "default_sources")]
    pub sources: Vec<SourceConfig>,

    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Dashboard server configuration
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,

    /// Directory holding the built dashboard assets.
    #[serde(default = "default_static_dir")]
    pub static_dir: String,

    /// Directory holding the analysis result documents.
    #[serde(default = "default_results_dir")]
    pub results_dir: String,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8090
}

fn default_static_dir() -> String {
    "sentiscope-ui/dist".to_string()
}

fn default_results_dir() -> String {
    "resultados".to_string()
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            static_dir: default_static_dir(),
            results_dir: default_results_dir(),
        }
    }
}

/// Per-source fetch retry configuration
#[derive(Debug, Clone, Deserialize)]
pub struct RetryConfig {
    #[serde(default = "default_retry_attempts")]
    pub retry_attempts: u32,

    #[serde(default = "default_retry_delay_ms")]
    pub retry_delay_ms: u64,
}

fn default_retry_attempts() -> u32 {
    3
}

fn default_retry_delay_ms() -> u64 {
    1000
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            retry_attempts: default_retry_attempts(),
            retry_delay_ms: default_retry_delay_ms(),
        }
    }
}

/// One configured analysis document source
#[derive(Debug, Clone, Deserialize)]
pub struct SourceConfig {
    pub id: String,
    pub url: String,
    pub display_name: String,
}

fn default_sources() -> Vec<SourceConfig> {
    [
        ("facebook", "facebook_analisis_completo.json", "Facebook"),
        ("linkedin", "linkedin_analisis_completo.json", "LinkedIn"),
        ("reddit", "reddit_analisis_completo.json", "Reddit"),
        ("x", "x_analisis_completo.json", "X (Twitter)"),
    ]
    .into_iter()
    .map(|(id, file, name)| SourceConfig {
        id: id.to_string(),
        url: format!("http://localhost:{}/resultados/{}", default_port(), file),
        display_name: name.to_string(),
    })
    .collect()
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,

    #[serde(default = "default_log_format")]
    pub format: String,
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "pretty".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

impl Config {
    /// Load configuration from a file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            error: e.to_string(),
        })?;

        let config: Config = toml::from_str(&content).map_err(|e| ConfigError::Parse {
            path: path.to_path_buf(),
            error: e.to_string(),
        })?;

        Ok(config)
    }

    /// Load configuration with environment variable overrides
    pub fn load_with_env(path: &Path) -> Result<Self, ConfigError> {
        let mut config = Self::load(path)?;
        config.apply_env_overrides();
        Ok(config)
    }

    /// Load configuration from environment variables only
    pub fn from_env() -> Self {
        let mut config = Config::default();
        config.apply_env_overrides();
        config
    }

    /// Load from default locations or environment
    pub fn load_default() -> Self {
        let config_paths = [
            dirs::config_dir().map(|p| p.join("sentiscope").join("config.toml")),
            Some(PathBuf::from("/etc/sentiscope/config.toml")),
            Some(PathBuf::from("./config.toml")),
        ];

        for path in config_paths.iter().flatten() {
            if path.exists() {
                match Self::load_with_env(path) {
                    Ok(config) => {
                        tracing::info!("Loaded config from {:?}", path);
                        return config;
                    }
                    Err(e) => {
                        tracing::warn!("Failed to load config from {:?}: {}", path, e);
                    }
                }
            }
        }

        tracing::info!("Using default config with environment overrides");
        Self::from_env()
    }

    /// Apply environment variable overrides to an existing config
    fn apply_env_overrides(&mut self) {
        if let Ok(host) = std::env::var("SENTISCOPE_HOST") {
            self.server.host = host;
        }
        if let Ok(port) = std::env::var("SENTISCOPE_PORT") {
            if let Ok(p) = port.parse() {
                self.server.port = p;
            }
        }
        if let Ok(static_dir) = std::env::var("SENTISCOPE_STATIC_DIR") {
            self.server.static_dir = static_dir;
        }
        if let Ok(results_dir) = std::env::var("SENTISCOPE_RESULTS_DIR") {
            self.server.results_dir = results_dir;
        }

        if let Ok(attempts) = std::env::var("SENTISCOPE_RETRY_ATTEMPTS") {
            if let Ok(a) = attempts.parse() {
                self.loader.retry_attempts = a;
            }
        }
        if let Ok(delay) = std::env::var("SENTISCOPE_RETRY_DELAY_MS") {
            if let Ok(d) = delay.parse() {
                self.loader.retry_delay_ms = d;
            }
        }

        if let Ok(level) = std::env::var("SENTISCOPE_LOG_LEVEL") {
            self.logging.level = level;
        }
        if let Ok(format) = std::env::var("SENTISCOPE_LOG_FORMAT") {
            self.logging.format = format;
        }
    }

    /// Retry policy in the loader's terms.
    pub fn loader_config(&self) -> LoaderConfig {
        LoaderConfig {
            retry_attempts: self.loader.retry_attempts,
            retry_delay: Duration::from_millis(self.loader.retry_delay_ms),
        }
    }

    /// Configured sources in the loader's terms, in declared order.
    pub fn source_specs(&self) -> Vec<SourceSpec> {
        self.sources
            .iter()
            .map(|s| SourceSpec::new(&s.id, &s.url, &s.display_name))
            .collect()
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server: ServerConfig::default(),
            loader: RetryConfig::default(),
            sources: default_sources(),
            logging: LoggingConfig::default(),
        }
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path:?}: {error}")]
    Io { path: PathBuf, error: String },

    #[error("Failed to parse config file {path:?}: {error}")]
    Parse { path: PathBuf, error: String },
}

/// Generate a default config file content
pub fn generate_default_config() -> String {
    r#"# Sentiscope Configuration
#
# Environment variables override these settings:
# - SENTISCOPE_HOST
# - SENTISCOPE_PORT
# - SENTISCOPE_STATIC_DIR
# - SENTISCOPE_RESULTS_DIR
# - SENTISCOPE_RETRY_ATTEMPTS
# - SENTISCOPE_RETRY_DELAY_MS
# - SENTISCOPE_LOG_LEVEL
# - SENTISCOPE_LOG_FORMAT

[server]
# Dashboard server host
host = "0.0.0.0"

# Dashboard server port
port = 8090

# Built dashboard assets
static_dir = "sentiscope-ui/dist"

# Analysis result documents
results_dir = "resultados"

[loader]
# Fetch attempts per source, including the first
retry_attempts = 3

# Fixed delay between attempts (ms)
retry_delay_ms = 1000

[logging]
# Log level: trace, debug, info, warn, error
level = "info"

# Log format: pretty (for development) or json (for production)
format = "pretty"

# One [[sources]] block per analysis document
[[sources]]
id = "facebook"
url = "http://localhost:8090/resultados/facebook_analisis_completo.json"
display_name = "Facebook"

[[sources]]
id = "linkedin"
url = "http://localhost:8090/resultados/linkedin_analisis_completo.json"
display_name = "LinkedIn"

[[sources]]
id = "reddit"
url = "http://localhost:8090/resultados/reddit_analisis_completo.json"
display_name = "Reddit"

[[sources]]
id = "x"
url = "http://localhost:8090/resultados/x_analisis_completo.json"
display_name = "X (Twitter)"
"#
    .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn defaults_match_the_documented_policy() {
        let config = Config::default();
        assert_eq!(config.loader.retry_attempts, 3);
        assert_eq!(config.loader.retry_delay_ms, 1000);
        assert_eq!(config.sources.len(), 4);
        assert_eq!(config.sources[0].id, "facebook");
        assert_eq!(config.server.port, 8090);
    }

    #[test]
    fn generated_default_config_parses_back() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(generate_default_config().as_bytes()).unwrap();

        let config = Config::load(file.path()).unwrap();
        assert_eq!(config.sources.len(), 4);
        assert_eq!(config.sources[3].display_name, "X (Twitter)");
        assert_eq!(config.loader_config().retry_attempts, 3);
    }

    #[test]
    fn partial_file_falls_back_to_defaults() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(
            br#"
[loader]
retry_attempts = 5

[[sources]]
id = "solo"
url = "http://example.test/solo.json"
display_name = "Solo"
"#,
        )
        .unwrap();

        let config = Config::load(file.path()).unwrap();
        assert_eq!(config.loader.retry_attempts, 5);
        assert_eq!(config.loader.retry_delay_ms, 1000);
        assert_eq!(config.sources.len(), 1);
        assert_eq!(config.server.host, "0.0.0.0");

        let specs = config.source_specs();
        assert_eq!(specs[0].id, "solo");
        assert_eq!(specs[0].url, "http://example.test/solo.json");
    }

    #[test]
    fn malformed_file_reports_a_parse_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(b"this is not toml [").unwrap();

        match Config::load(file.path()) {
            Err(ConfigError::Parse { .. }) => {}
            other => panic!("expected parse error, got {other:?}"),
        }
    }
}
