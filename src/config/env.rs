//! Environment variable configuration module.
//!
//! Provides environment variable loading and the global `APP_CONFIG` instance.

use std::env;
use std::path::PathBuf;
use std::sync::Once;

use once_cell::sync::Lazy;

static INIT: Once = Once::new();

/// Initializes the environment by loading the .env file.
/// This is called automatically when `get_env` is first used.
fn init_env() {
    INIT.call_once(|| {
        if let Err(e) = dotenvy::dotenv() {
            tracing::debug!(".env file not found or error loading: {}", e);
        }
    });
}

/// Retrieves an environment variable by key.
///
/// If the variable is not set, returns the provided default value.
/// If no default is provided and the variable is not set, returns an empty string.
pub fn get_env(key: &str, default: Option<&str>) -> String {
    init_env();
    env::var(key).unwrap_or_else(|_| default.unwrap_or("").to_string())
}

/// Retrieves an environment variable as a parsed type.
pub fn get_env_parsed<T: std::str::FromStr>(key: &str, default: T) -> T {
    init_env();
    env::var(key)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}

/// Log format used when `GEOM_LOG_FORMAT` is unset: JSON in production, text otherwise.
pub fn default_log_format(rust_env: &str) -> &'static str {
    if matches!(rust_env, "production" | "prod") {
        "json"
    } else {
        "text"
    }
}

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct AppConfig {
    // Logging
    pub log_json: bool,

    // Cache settings
    pub cache_dir: PathBuf,
    pub cache_enabled: bool,
    pub cache_ttl_secs: u64,

    // Bond window
    pub bond_min_length: f64,
    pub bond_max_length: f64,

    // Output
    pub precision: usize,
}

impl AppConfig {
    /// Creates a new `AppConfig` from environment variables.
    pub fn from_env() -> Self {
        let rust_env = get_env("RUST_ENV", Some("development"));
        let log_format = get_env("GEOM_LOG_FORMAT", Some(default_log_format(&rust_env)));

        Self {
            log_json: log_format == "json",

            cache_dir: PathBuf::from(get_env("GEOM_CACHE_DIR", Some("./cache"))),
            cache_enabled: get_env("GEOM_CACHE_ENABLED", Some("true")) == "true",
            cache_ttl_secs: get_env_parsed("GEOM_CACHE_TTL_SECS", 0),

            bond_min_length: get_env_parsed("GEOM_BOND_MIN", 0.0),
            bond_max_length: get_env_parsed("GEOM_BOND_MAX", 1.5),

            precision: get_env_parsed("GEOM_PRECISION", 3),
        }
    }
}

/// Global application configuration instance.
pub static APP_CONFIG: Lazy<AppConfig> = Lazy::new(AppConfig::from_env);
