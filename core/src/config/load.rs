use std::path::{Path, PathBuf};

use super::types::AppConfig;

/// Get the default vatcheck data directory: ~/.vatcheck
pub fn get_vatcheck_data_dir() -> anyhow::Result<PathBuf> {
    let home = dirs::home_dir().ok_or_else(|| anyhow::anyhow!("Cannot determine home directory"))?;
    Ok(home.join(".vatcheck"))
}

pub fn load_default() -> anyhow::Result<AppConfig> {
    // Priority 1: ~/.vatcheck/config.toml (highest)
    let user_config = get_vatcheck_data_dir()
        .map(|dir| dir.join("config.toml"))
        .ok();

    // Priority 2: ./config.toml (current directory)
    let local_config = Path::new("config.toml");

    let mut cfg = match user_config.filter(|p| p.exists()) {
        Some(path) => read_toml(&path)?,
        None if local_config.exists() => read_toml(local_config)?,
        None => AppConfig::default(),
    };

    apply_env_overrides(&mut cfg, |key| std::env::var(key).ok());
    Ok(cfg)
}

/// Load an explicit config file, then apply environment overrides.
pub fn load_from_path(path: &Path) -> anyhow::Result<AppConfig> {
    let mut cfg = read_toml(path)?;
    apply_env_overrides(&mut cfg, |key| std::env::var(key).ok());
    Ok(cfg)
}

fn read_toml(path: &Path) -> anyhow::Result<AppConfig> {
    let s = std::fs::read_to_string(path)
        .map_err(|e| anyhow::anyhow!("read {} failed: {e}", path.display()))?;
    let cfg = toml::from_str::<AppConfig>(&s)
        .map_err(|e| anyhow::anyhow!("parse {} failed: {e}", path.display()))?;
    tracing::debug!("loaded config from {}", path.display());
    Ok(cfg)
}

/// Environment variable overrides (Priority 0: highest).
///
/// Unparseable numeric values are ignored with a warning.
pub fn apply_env_overrides<F>(cfg: &mut AppConfig, lookup: F)
where
    F: Fn(&str) -> Option<String>,
{
    let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

    if let Some(v) = get("PORT") {
        match v.trim().parse() {
            Ok(port) => cfg.server.port = port,
            Err(_) => tracing::warn!("ignoring invalid PORT value: {v}"),
        }
    }
    if let Some(v) = get("HOST") {
        cfg.server.host = v.trim().to_string();
    }
    if let Some(v) = get("VATCHECK_REGISTRY_URL") {
        cfg.registry.base_url = v.trim().to_string();
    }
    if let Some(v) = get("VATCHECK_REGISTRY_TIMEOUT_MS") {
        match v.trim().parse() {
            Ok(ms) => cfg.registry.timeout_ms = ms,
            Err(_) => tracing::warn!("ignoring invalid VATCHECK_REGISTRY_TIMEOUT_MS value: {v}"),
        }
    }
    if let Some(v) = get("VATCHECK_MIN_INTERVAL_MS") {
        match v.trim().parse() {
            Ok(ms) => cfg.batch.min_interval_ms = ms,
            Err(_) => tracing::warn!("ignoring invalid VATCHECK_MIN_INTERVAL_MS value: {v}"),
        }
    }
    if let Some(v) = get("VATCHECK_BACKGROUND") {
        cfg.batch.background = matches!(
            v.trim().to_ascii_lowercase().as_str(),
            "1" | "true" | "yes" | "on"
        );
    }
}
