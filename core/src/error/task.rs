use thiserror::Error;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum TaskError {
    #[error("too many active tasks (limit: {limit})")]
    Capacity { limit: usize },

    #[error("task not found: {0}")]
    NotFound(String),
}
