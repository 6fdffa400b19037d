//! HTTP服务器模块 - 表单页面、结果下载与 JSON API

pub mod form;
pub mod middleware;
pub mod models;
pub mod pages;
pub mod routes;
pub mod server;
pub mod state;
pub mod validation;

pub use models::*;
pub use server::*;
pub use state::*;
