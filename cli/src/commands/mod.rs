pub mod batch;
pub mod check;
pub mod cli;
