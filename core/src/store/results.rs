//! 结果集存储：按 token 保存，显式 TTL，另有一个每次运行都会覆盖的 "latest" 槽位

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};
use tokio::sync::RwLock;
use tokio::time::Instant;
use uuid::Uuid;

use crate::error::SheetError;
use crate::sheet::write_results;
use crate::verify::{ResultSet, VerificationResult};

/// 已保存的结果集
#[derive(Debug, Clone)]
pub struct StoredResults {
    pub token: String,
    pub results: Arc<ResultSet>,
    pub created_at: DateTime<Utc>,
    stored_at: Instant,
}

impl StoredResults {
    pub fn results(&self) -> &[VerificationResult] {
        &self.results
    }
}

/// 结果存储（可在 handlers 间克隆共享）
#[derive(Clone)]
pub struct ResultStore {
    inner: Arc<ResultStoreInner>,
}

struct ResultStoreInner {
    entries: RwLock<HashMap<String, StoredResults>>,
    /// 最近一次运行的 token
    latest: RwLock<Option<String>>,
    ttl: Duration,
    /// 可选：每次运行都把工作簿写到这个文件（覆盖）
    latest_file: Option<PathBuf>,
}

impl ResultStore {
    pub fn new(ttl: Duration, latest_file: Option<PathBuf>) -> Self {
        Self {
            inner: Arc::new(ResultStoreInner {
                entries: RwLock::new(HashMap::new()),
                latest: RwLock::new(None),
                ttl,
                latest_file,
            }),
        }
    }

    pub fn ttl(&self) -> Duration {
        self.inner.ttl
    }

    /// 保存结果集并返回新 token，同时成为 latest
    pub async fn put(&self, results: ResultSet) -> String {
        self.purge_expired().await;

        let token = Uuid::new_v4().simple().to_string();
        let entry = StoredResults {
            token: token.clone(),
            results: Arc::new(results),
            created_at: Utc::now(),
            stored_at: Instant::now(),
        };

        if let Some(path) = &self.inner.latest_file {
            // 镜像文件写失败不影响内存中的结果
            if let Err(e) = mirror_to_file(entry.results(), path.clone()).await {
                tracing::warn!(path = %path.display(), error = %e, "failed to write latest results file");
            }
        }

        {
            let mut entries = self.inner.entries.write().await;
            entries.insert(token.clone(), entry);
        }
        {
            let mut latest = self.inner.latest.write().await;
            *latest = Some(token.clone());
        }

        tracing::debug!(target: "vatcheck.store", token = %token, "results stored");
        token
    }

    /// 按 token 获取；过期的条目视为不存在
    pub async fn get(&self, token: &str) -> Option<StoredResults> {
        let entries = self.inner.entries.read().await;
        entries
            .get(token)
            .filter(|e| !self.is_expired(e))
            .cloned()
    }

    pub async fn latest(&self) -> Option<StoredResults> {
        let token = self.inner.latest.read().await.clone()?;
        self.get(&token).await
    }

    /// 最近一次运行的工作簿字节：优先内存，其次镜像文件
    pub async fn latest_workbook(&self) -> Result<Option<Vec<u8>>, SheetError> {
        if let Some(stored) = self.latest().await {
            return write_results(stored.results()).map(Some);
        }

        match &self.inner.latest_file {
            Some(path) => match tokio::fs::read(path).await {
                Ok(bytes) => Ok(Some(bytes)),
                Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
                Err(e) => Err(SheetError::Io(e)),
            },
            None => Ok(None),
        }
    }

    /// 清理过期条目，返回清理数量
    pub async fn purge_expired(&self) -> usize {
        let mut entries = self.inner.entries.write().await;
        let before = entries.len();
        entries.retain(|_, e| e.stored_at.elapsed() <= self.inner.ttl);
        let purged = before - entries.len();
        if purged > 0 {
            tracing::debug!(target: "vatcheck.store", purged = purged, "expired results purged");
        }
        purged
    }

    pub async fn len(&self) -> usize {
        self.inner.entries.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }

    fn is_expired(&self, entry: &StoredResults) -> bool {
        entry.stored_at.elapsed() > self.inner.ttl
    }
}

async fn mirror_to_file(results: &[VerificationResult], path: PathBuf) -> Result<(), SheetError> {
    let bytes = write_results(results)?;
    tokio::fs::write(&path, bytes).await?;
    Ok(())
}
