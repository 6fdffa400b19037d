use std::sync::Arc;

use anyhow::Result;

use vatcheck_core::api::{AppConfig, RegistryPlugin, Services};

use crate::registry::WhiteListPlugin;

pub fn build_registry(cfg: &AppConfig) -> Result<Arc<dyn RegistryPlugin>> {
    let plugin = WhiteListPlugin::new(cfg.registry.base_url.clone(), cfg.registry.timeout_ms)?;
    tracing::debug!(
        base_url = %cfg.registry.base_url,
        timeout_ms = cfg.registry.timeout_ms,
        "registry plugin built"
    );
    Ok(Arc::new(plugin))
}

pub fn build_services(cfg: &AppConfig) -> Result<Services> {
    let registry = build_registry(cfg)?;
    Ok(Services::new(registry, cfg))
}
