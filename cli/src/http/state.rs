//! HTTP服务器状态管理

use chrono::{DateTime, Local};
use std::collections::BTreeMap;
use std::sync::{Arc, PoisonError, RwLock};
use vatcheck_core::api::{AppConfig, Services};

/// 应用状态（在所有handlers间共享）
#[derive(Clone)]
pub struct AppState {
    pub instance_id: String,
    pub config: Arc<AppConfig>,
    pub services: Services,
    pub stats: Arc<RwLock<ServerStats>>,
}

impl AppState {
    pub fn new(instance_id: String, config: AppConfig, services: Services) -> Self {
        Self {
            instance_id,
            config: Arc::new(config),
            services,
            stats: Arc::new(RwLock::new(ServerStats::new())),
        }
    }

    pub fn record_request(&self, endpoint: &str) {
        let mut stats = self.stats.write().unwrap_or_else(PoisonError::into_inner);
        stats.increment_request(endpoint);
    }

    pub fn record_error(&self) {
        let mut stats = self.stats.write().unwrap_or_else(PoisonError::into_inner);
        stats.increment_error();
    }

    pub fn stats_snapshot(&self) -> StatsSnapshot {
        let stats = self.stats.read().unwrap_or_else(PoisonError::into_inner);
        StatsSnapshot {
            uptime_seconds: stats.uptime_seconds(),
            requests_handled: stats.requests_total,
            errors_total: stats.errors_total,
            requests_by_endpoint: stats.requests_by_endpoint.clone(),
        }
    }
}

/// `/health` 使用的统计快照
#[derive(Debug, Clone)]
pub struct StatsSnapshot {
    pub uptime_seconds: f64,
    pub requests_handled: u64,
    pub errors_total: u64,
    pub requests_by_endpoint: BTreeMap<String, u64>,
}

/// 服务器统计信息
pub struct ServerStats {
    pub requests_total: u64,
    pub requests_by_endpoint: BTreeMap<String, u64>,
    pub errors_total: u64,
    pub start_time: DateTime<Local>,
}

impl ServerStats {
    pub fn new() -> Self {
        Self {
            requests_total: 0,
            requests_by_endpoint: BTreeMap::new(),
            errors_total: 0,
            start_time: Local::now(),
        }
    }

    pub fn increment_request(&mut self, endpoint: &str) {
        self.requests_total += 1;
        *self
            .requests_by_endpoint
            .entry(endpoint.to_string())
            .or_insert(0) += 1;
    }

    pub fn increment_error(&mut self) {
        self.errors_total += 1;
    }

    pub fn uptime_seconds(&self) -> f64 {
        let now = Local::now();
        (now - self.start_time).num_milliseconds() as f64 / 1000.0
    }
}

impl Default for ServerStats {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_server_stats_new() {
        let stats = ServerStats::new();
        assert_eq!(stats.requests_total, 0);
        assert_eq!(stats.errors_total, 0);
        assert!(stats.uptime_seconds() < 1.0);
    }

    #[test]
    fn test_increment_request() {
        let mut stats = ServerStats::new();
        stats.increment_request("/");
        stats.increment_request("/");
        stats.increment_request("/pobierz");

        assert_eq!(stats.requests_total, 3);
        assert_eq!(*stats.requests_by_endpoint.get("/").unwrap(), 2);
        assert_eq!(*stats.requests_by_endpoint.get("/pobierz").unwrap(), 1);
    }

    #[test]
    fn test_snapshot_orders_endpoints() {
        let mut stats = ServerStats::new();
        stats.increment_request("/pobierz");
        stats.increment_request("/");
        stats.increment_error();

        let endpoints: Vec<&str> = stats.requests_by_endpoint.keys().map(String::as_str).collect();
        assert_eq!(endpoints, vec!["/", "/pobierz"]);
        assert_eq!(stats.errors_total, 1);
    }

    #[test]
    fn test_increment_error() {
        let mut stats = ServerStats::new();
        stats.increment_error();
        stats.increment_error();
        assert_eq!(stats.errors_total, 2);
    }
}
