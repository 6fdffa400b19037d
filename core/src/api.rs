//! Stable re-exports for consumers (`cli`, `plugins`, and external crates).
//!
//! Prefer importing from `vatcheck_core::api` instead of reaching into internal modules.

pub use crate::config::{
    load_default, load_from_path, AppConfig, BatchConfig, LoggingConfig, RegistryConfig,
    ServerConfig, StoreConfig, ValidationConfig,
};
pub use crate::context::Services;
pub use crate::error::{CliError, InputError, SheetError, TaskError};
pub use crate::input::{collect_identifiers, Upload};
pub use crate::nip::{is_valid, normalize, NipValidator};
pub use crate::sheet::{
    read_identifiers, write_results, RESULTS_FILE_NAME, RESULTS_HEADER, RESULTS_SHEET_NAME,
    XLSX_MIME,
};
pub use crate::store::{ResultStore, StoredResults, TaskId, TaskState, TaskStore};
pub use crate::verify::models::{
    LABEL_BAD_RESPONSE, LABEL_INVALID_NIP, LABEL_NOT_FOUND, LABEL_NO_DATA, LABEL_REQUEST_ERROR,
    STATUS_INVALID_NIP, STATUS_NOT_FOUND, STATUS_UNKNOWN,
};
pub use crate::verify::{BatchVerifier, LookupOutcome, RegistryPlugin, ResultSet, VerificationResult};
