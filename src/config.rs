//! Service configuration loaded from environment variables.
//!
//! All settings come from the environment (or a `.env` file via `dotenvy`)
//! and fall back to defaults when unset or unparsable.

use std::net::SocketAddr;
use std::path::PathBuf;

use crate::domain::ParameterSet;
use crate::domain::params::{
    DEFAULT_COST_RATE, DEFAULT_EXCHANGE_RATE, DEFAULT_FEE_RATE, DEFAULT_FIXED_COST,
};
use crate::ingest::DEFAULT_PRODUCTS_PER_KEYWORD;

/// Top-level configuration.
///
/// Loaded once at startup via [`ResearchConfig::from_env`].
#[derive(Debug, Clone)]
pub struct ResearchConfig {
    /// Socket address to bind the HTTP server to (e.g. `0.0.0.0:3000`).
    pub listen_addr: SocketAddr,

    /// Listing history file.
    pub data_file: PathBuf,

    /// Whether fetched batches are appended to [`Self::data_file`].
    pub persistence_enabled: bool,

    /// Parameters the session starts with.
    pub params: ParameterSet,

    /// Cap on listings taken per keyword in one refresh.
    pub products_per_keyword: usize,

    /// Directory of captured marketplace search payloads for live refreshes.
    pub snapshot_dir: Option<PathBuf>,
}

impl ResearchConfig {
    /// Loads configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv().ok()` to optionally load a `.env` file.
    ///
    /// # Errors
    ///
    /// Returns an error if `LISTEN_ADDR` is set but cannot be parsed as a
    /// [`SocketAddr`], or if the configured parameters are out of domain.
    pub fn from_env() -> Result<Self, Box<dyn std::error::Error>> {
        dotenvy::dotenv().ok();

        let listen_addr: SocketAddr = std::env::var("LISTEN_ADDR")
            .unwrap_or_else(|_| "0.0.0.0:3000".to_string())
            .parse()?;

        let data_file = std::env::var("DATA_FILE")
            .map_or_else(|_| PathBuf::from("research_results.csv"), PathBuf::from);
        let persistence_enabled = parse_env_bool("PERSISTENCE_ENABLED", true);

        let params = ParameterSet::new(
            parse_env("EXCHANGE_RATE", DEFAULT_EXCHANGE_RATE),
            parse_env("SALES_FEE_RATE", DEFAULT_FEE_RATE),
            parse_env("FIXED_COST_JPY", DEFAULT_FIXED_COST),
            parse_env("COST_RATE", DEFAULT_COST_RATE),
        )?;

        let products_per_keyword = parse_env("PRODUCTS_PER_KEYWORD", DEFAULT_PRODUCTS_PER_KEYWORD);
        let snapshot_dir = std::env::var("SNAPSHOT_DIR")
            .ok()
            .filter(|v| !v.trim().is_empty())
            .map(PathBuf::from);

        Ok(Self {
            listen_addr,
            data_file,
            persistence_enabled,
            params,
            products_per_keyword,
            snapshot_dir,
        })
    }
}

/// Parses an environment variable as `T`, returning `default` on missing
/// or invalid values.
fn parse_env<T: std::str::FromStr>(key: &str, default: T) -> T {
    std::env::var(key)
        .ok()
        .and_then(|v| v.trim().parse().ok())
        .unwrap_or(default)
}

/// Parses an environment variable as a boolean. Accepts `"true"`, `"1"`,
/// `"false"`, `"0"` (case-insensitive). Returns `default` otherwise.
fn parse_env_bool(key: &str, default: bool) -> bool {
    std::env::var(key)
        .ok()
        .map_or(default, |v| parse_bool(&v).unwrap_or(default))
}

fn parse_bool(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "true" | "1" => Some(true),
        "false" | "0" => Some(false),
        _ => None,
    }
}
