//! # Configuration
//!
//! Centralizes all settings with a clear override hierarchy:
//! defaults → config file → env vars → CLI flags.
//!
//! Config lives at `~/.sift/config.toml`. If missing on first run, a
//! commented-out default is generated so users can discover all options.

use log::{debug, info, warn};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::PathBuf;

// ============================================================================
// Config Structs (all fields Option<T> for sparse TOML)
// ============================================================================

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct SiftConfig {
    #[serde(default)]
    pub backend: BackendConfig,
    #[serde(default)]
    pub ui: UiConfig,
    #[serde(default)]
    pub example_queries: Vec<ExampleQuery>,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct BackendConfig {
    pub base_url: Option<String>,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct UiConfig {
    pub greeting: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ExampleQuery {
    pub text: String,
}

// ============================================================================
// Defaults
// ============================================================================

pub const DEFAULT_BASE_URL: &str = "http://127.0.0.1:5000";

const DEFAULT_GREETING: &str = "Hello! I can answer questions about the trainer \
    feedback on record. Press Ctrl+N to build the index if the backend isn't \
    ready yet, then ask away. F1-F4 run example queries.";

/// Fallback example queries bound to F1-F4 when the config file defines none.
fn default_example_queries() -> Vec<ExampleQuery> {
    [
        "What feedback did trainers give about the Seaweed Cultivation course?",
        "Summarize the challenges reported across all centres last month.",
        "Which batches had attendance problems?",
        "What suggestions have trainers made for improving course materials?",
    ]
    .iter()
    .map(|text| ExampleQuery {
        text: text.to_string(),
    })
    .collect()
}

// ============================================================================
// Resolved Config (concrete values, no Options)
// ============================================================================

#[derive(Debug, Clone)]
pub struct ResolvedConfig {
    pub base_url: String,
    pub greeting: String,
    pub example_queries: Vec<ExampleQuery>,
}

// ============================================================================
// Error Type
// ============================================================================

#[derive(Debug)]
pub enum ConfigError {
    Io(std::io::Error),
    Parse(toml::de::Error),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Io(e) => write!(f, "config I/O error: {e}"),
            ConfigError::Parse(e) => write!(f, "config parse error: {e}"),
        }
    }
}

impl std::error::Error for ConfigError {}

// ============================================================================
// Loading
// ============================================================================

/// Returns the path to `~/.sift/config.toml`.
pub fn config_path() -> Option<PathBuf> {
    dirs::home_dir().map(|h| h.join(".sift").join("config.toml"))
}

/// Load config from `~/.sift/config.toml`.
///
/// If the file doesn't exist, generates a commented-out default and
/// returns `SiftConfig::default()`. If it exists but is malformed,
/// returns `ConfigError::Parse`.
pub fn load_config() -> Result<SiftConfig, ConfigError> {
    let path = match config_path() {
        Some(p) => p,
        None => {
            warn!("Could not determine home directory, using default config");
            return Ok(SiftConfig::default());
        }
    };

    if !path.exists() {
        info!("No config file found, generating default at {}", path.display());
        generate_default_config(&path);
        return Ok(SiftConfig::default());
    }

    let contents = fs::read_to_string(&path).map_err(ConfigError::Io)?;
    let config: SiftConfig = toml::from_str(&contents).map_err(ConfigError::Parse)?;
    info!("Loaded config from {}", path.display());
    debug!("Config: {:?}", config);
    Ok(config)
}

/// Generates a commented-out default config file at the given path.
fn generate_default_config(path: &PathBuf) {
    let default_content = r#"# Sift Configuration
# All settings are optional — defaults are used for anything not specified.
# Override hierarchy: defaults → this file → env vars → CLI flags.

# [backend]
# base_url = "http://127.0.0.1:5000"   # Or set SIFT_BACKEND_URL env var

# [ui]
# greeting = "Hello! Ask me about trainer feedback."

# Example queries are bound to F1-F4 in order.
# [[example_queries]]
# text = "What feedback did trainers give about the Seaweed Cultivation course?"

# [[example_queries]]
# text = "Which batches had attendance problems?"
"#;

    if let Some(parent) = path.parent() {
        if let Err(e) = fs::create_dir_all(parent) {
            warn!("Failed to create config directory: {}", e);
            return;
        }
    }
    if let Err(e) = fs::write(path, default_content) {
        warn!("Failed to write default config: {}", e);
    }
}

// ============================================================================
// Resolution
// ============================================================================

/// Resolve the final config by collapsing: defaults → config file → env vars → CLI.
///
/// `cli_base_url` is from the `--backend-url` flag (None = not specified).
pub fn resolve(config: &SiftConfig, cli_base_url: Option<&str>) -> ResolvedConfig {
    // Backend URL: CLI → env → config → default
    let base_url = cli_base_url
        .map(|s| s.to_string())
        .or_else(|| std::env::var("SIFT_BACKEND_URL").ok())
        .or_else(|| config.backend.base_url.clone())
        .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());

    let greeting = config
        .ui
        .greeting
        .clone()
        .unwrap_or_else(|| DEFAULT_GREETING.to_string());

    let example_queries = if config.example_queries.is_empty() {
        default_example_queries()
    } else {
        config.example_queries.clone()
    };

    ResolvedConfig {
        base_url,
        greeting,
        example_queries,
    }
}
