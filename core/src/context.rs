use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use crate::config::AppConfig;
use crate::store::{ResultStore, TaskStore};
use crate::verify::{BatchVerifier, RegistryPlugin};

/// Everything a front end needs to verify batches and keep their results.
#[derive(Clone)]
pub struct Services {
    pub verifier: BatchVerifier,
    pub results: ResultStore,
    pub tasks: TaskStore,
}

impl Services {
    pub fn new(registry: Arc<dyn RegistryPlugin>, cfg: &AppConfig) -> Self {
        let verifier = BatchVerifier::from_config(registry, cfg);
        let ttl = Duration::from_secs(cfg.store.result_ttl_secs);
        let latest_file = cfg
            .store
            .latest_file
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(PathBuf::from);

        let results = ResultStore::new(ttl, latest_file);
        let tasks = TaskStore::new(
            verifier.clone(),
            results.clone(),
            cfg.store.max_active_tasks,
            ttl,
        );

        Self {
            verifier,
            results,
            tasks,
        }
    }
}
