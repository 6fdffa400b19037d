//! 结果与后台任务存储

pub mod results;
pub mod tasks;

pub use results::{ResultStore, StoredResults};
pub use tasks::{TaskId, TaskState, TaskStore};
