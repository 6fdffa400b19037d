use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub server: ServerConfig,

    #[serde(default)]
    pub registry: RegistryConfig,

    #[serde(default)]
    pub validation: ValidationConfig,

    #[serde(default)]
    pub batch: BatchConfig,

    #[serde(default)]
    pub store: StoreConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_server_host")]
    pub host: String,

    /// Overridden by the `PORT` environment variable.
    #[serde(default = "default_server_port")]
    pub port: u16,

    /// Request body limit; bounds the size of uploaded spreadsheets.
    #[serde(default = "default_max_upload_bytes")]
    pub max_upload_bytes: usize,

    /// Response timeout. A synchronous batch that outlives it keeps running
    /// and is still stored; only the response is cut short.
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
}

fn default_server_host() -> String {
    "0.0.0.0".to_string()
}

fn default_server_port() -> u16 {
    5000
}

fn default_max_upload_bytes() -> usize {
    10 * 1024 * 1024
}

fn default_request_timeout_secs() -> u64 {
    600
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_server_host(),
            port: default_server_port(),
            max_upload_bytes: default_max_upload_bytes(),
            request_timeout_secs: default_request_timeout_secs(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegistryConfig {
    /// Scheme and host of the White List API; the path is fixed.
    #[serde(default = "default_registry_base_url")]
    pub base_url: String,

    /// Per-request client timeout.
    #[serde(default = "default_registry_timeout_ms")]
    pub timeout_ms: u64,
}

fn default_registry_base_url() -> String {
    "https://wl-api.mf.gov.pl".to_string()
}

fn default_registry_timeout_ms() -> u64 {
    10_000
}

impl Default for RegistryConfig {
    fn default() -> Self {
        Self {
            base_url: default_registry_base_url(),
            timeout_ms: default_registry_timeout_ms(),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ValidationConfig {
    /// Also require a correct NIP check digit. Off by default: only length
    /// and digit class are checked.
    #[serde(default)]
    pub checksum: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BatchConfig {
    /// Minimum gap between two successive registry calls.
    #[serde(default)]
    pub min_interval_ms: u64,

    /// Uploads with more identifiers are rejected before any lookup.
    #[serde(default = "default_max_identifiers")]
    pub max_identifiers: usize,

    /// Run submitted batches as background tasks polled via `/status/{id}`.
    #[serde(default)]
    pub background: bool,
}

fn default_max_identifiers() -> usize {
    1000
}

impl Default for BatchConfig {
    fn default() -> Self {
        Self {
            min_interval_ms: 0,
            max_identifiers: default_max_identifiers(),
            background: false,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoreConfig {
    /// How long stored result sets and finished tasks are kept.
    #[serde(default = "default_result_ttl_secs")]
    pub result_ttl_secs: u64,

    #[serde(default = "default_max_active_tasks")]
    pub max_active_tasks: usize,

    /// If set, every run's workbook is also written here (overwritten each run).
    #[serde(default)]
    pub latest_file: Option<String>,
}

fn default_result_ttl_secs() -> u64 {
    3600
}

fn default_max_active_tasks() -> usize {
    4
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            result_ttl_secs: default_result_ttl_secs(),
            max_active_tasks: default_max_active_tasks(),
            latest_file: None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_logging_enabled")]
    pub enabled: bool,

    /// If true, log to stderr.
    #[serde(default = "default_logging_console")]
    pub console: bool,

    /// If true, log to a file under `directory` (or OS temp dir if unset).
    #[serde(default)]
    pub file: bool,

    /// EnvFilter string, e.g. "info" or "vatcheck_core=debug".
    #[serde(default = "default_logging_level")]
    pub level: String,

    /// Optional directory for log files. If empty or unset, uses OS temp dir.
    #[serde(default)]
    pub directory: Option<String>,
}

fn default_logging_enabled() -> bool {
    true
}

fn default_logging_console() -> bool {
    true
}

fn default_logging_level() -> String {
    "info".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            enabled: default_logging_enabled(),
            console: default_logging_console(),
            file: false,
            level: default_logging_level(),
            directory: None,
        }
    }
}
