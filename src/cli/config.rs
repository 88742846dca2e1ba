use std::path::PathBuf;
use std::time::Duration;

use clap::{Parser, Subcommand};
use serde::{Deserialize, Serialize};

use crate::transport::http::{DEFAULT_BASE_URL, DEFAULT_TIMEOUT_MS};

// ============================================================================
// CLI Argument Parsing (clap derive)
// ============================================================================

#[derive(Parser, Debug)]
#[command(
    name = "onboarding-forms",
    version,
    about = "Validate and submit hiring-platform login and registration forms"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Verbosity level (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Auth API base URL
    #[arg(long, global = true)]
    pub base_url: Option<String>,

    /// Credential storage file
    #[arg(long, global = true)]
    pub storage: Option<String>,

    /// Path to config file (default: onboarding-forms.yaml in current dir)
    #[arg(long, global = true)]
    pub config: Option<String>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List every flow with its fields
    Flows,

    /// Validate a fields file offline
    Validate {
        /// Flow name, e.g. client-registration
        #[arg(long)]
        flow: String,

        /// YAML file mapping field names to values
        #[arg(long)]
        fields: String,
    },

    /// Validate and submit a fields file to the auth API
    Submit {
        /// Flow name, e.g. freelancer-login
        #[arg(long)]
        flow: String,

        /// YAML file mapping field names to values
        #[arg(long)]
        fields: String,

        /// Request timeout in milliseconds
        #[arg(long)]
        timeout_ms: Option<u64>,
    },
}

// ============================================================================
// Config File Model (optional YAML)
// ============================================================================

/// Optional YAML config file: `onboarding-forms.yaml`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub api: ApiConfig,
    #[serde(default)]
    pub storage: StorageConfig,
    #[serde(default)]
    pub trace: TraceConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,

    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout_ms: DEFAULT_TIMEOUT_MS,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    #[serde(default = "default_storage_path")]
    pub path: String,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            path: default_storage_path(),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TraceConfig {
    /// JSONL trace file; tracing is off when unset
    pub path: Option<String>,
}

// Serde default helpers
fn default_base_url() -> String { DEFAULT_BASE_URL.to_string() }
fn default_timeout_ms() -> u64 { DEFAULT_TIMEOUT_MS }
fn default_storage_path() -> String { "credentials.json".to_string() }

// ============================================================================
// Config File Loading
// ============================================================================

/// Load config from a YAML file. Returns defaults if file is missing or malformed.
pub fn load_config(path: Option<&str>) -> AppConfig {
    let config_path = path.unwrap_or("onboarding-forms.yaml");
    match std::fs::read_to_string(config_path) {
        Ok(content) => serde_yaml::from_str(&content).unwrap_or_else(|e| {
            tracing::warn!(path = config_path, error = %e, "malformed config, using defaults");
            AppConfig::default()
        }),
        Err(_) => AppConfig::default(),
    }
}

// ============================================================================
// Settings (merge CLI args with config file)
// ============================================================================

/// Values a command runs with after CLI flags override the config file.
#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    pub base_url: String,
    pub timeout: Duration,
    pub storage_path: PathBuf,
    pub trace_path: Option<PathBuf>,
}

pub fn resolve_settings(
    config: &AppConfig,
    base_url: Option<&str>,
    storage: Option<&str>,
    timeout_ms: Option<u64>,
) -> Settings {
    Settings {
        base_url: base_url.unwrap_or(&config.api.base_url).to_string(),
        timeout: Duration::from_millis(timeout_ms.unwrap_or(config.api.timeout_ms)),
        storage_path: PathBuf::from(storage.unwrap_or(&config.storage.path)),
        trace_path: config.trace.path.as_ref().map(PathBuf::from),
    }
}
