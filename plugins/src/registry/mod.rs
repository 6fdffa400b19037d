pub mod http_client;
pub mod service;

pub use http_client::{HttpClient, RegistryHttpError, RegistryHttpErrorKind, Subject};
pub use service::WhiteListPlugin;
