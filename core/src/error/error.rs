use thiserror::Error;

use super::input::{InputError, SheetError};

#[derive(Error, Debug)]
pub enum CliError {
    #[error("command failed: {0}")]
    Command(String),
    #[error("config error: {0}")]
    Config(String),
    #[error("input error: {0}")]
    Input(#[from] InputError),
    #[error("spreadsheet error: {0}")]
    Sheet(#[from] SheetError),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("anyhow error: {0}")]
    Anyhow(#[from] anyhow::Error),
}
