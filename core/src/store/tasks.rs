//! 后台任务存储：`submit(batch) -> TaskId`，`poll(TaskId) -> TaskState`
//!
//! 每次提交启动一个 tokio 任务顺序执行整批校验；任务表由 `RwLock` 保护，
//! 进度回调与轮询都通过它读写，锁不会跨越 await。

use std::collections::HashMap;
use std::sync::{Arc, PoisonError, RwLock};
use std::time::Duration;

use serde::Serialize;
use tokio::time::Instant;
use uuid::Uuid;

use super::results::ResultStore;
use crate::error::TaskError;
use crate::verify::BatchVerifier;

pub type TaskId = String;

/// 任务状态
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum TaskState {
    /// 进行中（已完成 / 总数）
    Pending { done: usize, total: usize },
    /// 完成，结果保存在 ResultStore 的 `token` 下
    Done { token: String },
    /// 失败
    Failed { message: String },
}

impl TaskState {
    pub fn is_finished(&self) -> bool {
        !matches!(self, Self::Pending { .. })
    }
}

struct TaskEntry {
    state: TaskState,
    finished_at: Option<Instant>,
}

/// 任务存储（可在 handlers 间克隆共享）
#[derive(Clone)]
pub struct TaskStore {
    inner: Arc<TaskStoreInner>,
}

struct TaskStoreInner {
    tasks: RwLock<HashMap<TaskId, TaskEntry>>,
    verifier: BatchVerifier,
    results: ResultStore,
    /// 同时进行中的任务上限
    max_active: usize,
    /// 已结束任务的保留时间
    ttl: Duration,
}

impl TaskStoreInner {
    fn set_state(&self, id: &str, state: TaskState) {
        let mut tasks = self.tasks.write().unwrap_or_else(PoisonError::into_inner);
        if let Some(entry) = tasks.get_mut(id) {
            if state.is_finished() {
                entry.finished_at = Some(Instant::now());
            }
            entry.state = state;
        }
    }

    fn is_expired(&self, entry: &TaskEntry) -> bool {
        entry
            .finished_at
            .map(|at| at.elapsed() > self.ttl)
            .unwrap_or(false)
    }
}

impl TaskStore {
    pub fn new(
        verifier: BatchVerifier,
        results: ResultStore,
        max_active: usize,
        ttl: Duration,
    ) -> Self {
        Self {
            inner: Arc::new(TaskStoreInner {
                tasks: RwLock::new(HashMap::new()),
                verifier,
                results,
                max_active,
                ttl,
            }),
        }
    }

    /// 提交一批原始标识符，立即返回任务 ID
    ///
    /// 必须在 tokio 运行时内调用。
    pub fn submit(&self, raws: Vec<String>) -> Result<TaskId, TaskError> {
        let id = Uuid::new_v4().simple().to_string();
        let total = raws.len();

        {
            let mut tasks = self
                .inner
                .tasks
                .write()
                .unwrap_or_else(PoisonError::into_inner);
            tasks.retain(|_, e| !self.inner.is_expired(e));

            let active = tasks.values().filter(|e| !e.state.is_finished()).count();
            if active >= self.inner.max_active {
                tracing::warn!(
                    target: "vatcheck.tasks",
                    active = active,
                    limit = self.inner.max_active,
                    "task rejected: capacity reached"
                );
                return Err(TaskError::Capacity {
                    limit: self.inner.max_active,
                });
            }

            tasks.insert(
                id.clone(),
                TaskEntry {
                    state: TaskState::Pending { done: 0, total },
                    finished_at: None,
                },
            );
        }

        tracing::info!(target: "vatcheck.tasks", task_id = %id, total = total, "task submitted");

        let inner = Arc::clone(&self.inner);
        let task_id = id.clone();
        tokio::spawn(async move {
            // 批处理放在独立的子任务里，panic 会变成 JoinError 而不是丢失状态
            let worker = {
                let inner = Arc::clone(&inner);
                let task_id = task_id.clone();
                tokio::spawn(async move {
                    let progress = Arc::clone(&inner);
                    inner
                        .verifier
                        .verify_all_with_progress(&raws, move |done, total| {
                            progress.set_state(&task_id, TaskState::Pending { done, total });
                        })
                        .await
                })
            };

            let state = match worker.await {
                Ok(results) => {
                    let token = inner.results.put(results).await;
                    tracing::info!(target: "vatcheck.tasks", task_id = %task_id, token = %token, "task done");
                    TaskState::Done { token }
                }
                Err(e) => {
                    tracing::error!(target: "vatcheck.tasks", task_id = %task_id, error = %e, "task failed");
                    TaskState::Failed {
                        message: format!("batch worker stopped: {e}"),
                    }
                }
            };
            inner.set_state(&task_id, state);
        });

        Ok(id)
    }

    /// 查询任务状态；未知或已过期的任务返回 `NotFound`
    pub fn poll(&self, id: &str) -> Result<TaskState, TaskError> {
        let tasks = self
            .inner
            .tasks
            .read()
            .unwrap_or_else(PoisonError::into_inner);
        tasks
            .get(id)
            .filter(|e| !self.inner.is_expired(e))
            .map(|e| e.state.clone())
            .ok_or_else(|| TaskError::NotFound(id.to_string()))
    }

    /// 进行中的任务数
    pub fn active_count(&self) -> usize {
        let tasks = self
            .inner
            .tasks
            .read()
            .unwrap_or_else(PoisonError::into_inner);
        tasks.values().filter(|e| !e.state.is_finished()).count()
    }

    pub fn results(&self) -> &ResultStore {
        &self.inner.results
    }
}
