use crate::verify::models::LookupOutcome;
use async_trait::async_trait;

/// Registry backend queried once per well-formed NIP.
///
/// Implementations must not retry and must turn every failure into a
/// [`LookupOutcome`] instead of returning an error.
#[async_trait]
pub trait RegistryPlugin: Send + Sync {
    fn name(&self) -> &str;
    async fn lookup(&self, nip: &str) -> LookupOutcome;
}
