pub mod batch;
pub mod models;
pub mod r#trait;

pub use batch::BatchVerifier;
pub use models::{LookupOutcome, ResultSet, VerificationResult};
pub use r#trait::RegistryPlugin;
