use std::sync::Arc;
use std::time::Duration;

use tokio::time::Instant;

use crate::config::AppConfig;
use crate::nip::{normalize, NipValidator};
use crate::verify::models::{ResultSet, VerificationResult};
use crate::verify::r#trait::RegistryPlugin;

/// Runs identifiers through normalize → validate → registry lookup, in input order.
///
/// Registry calls are strictly sequential. `min_interval` is the minimum gap
/// between the starts of two successive registry calls; identifiers rejected
/// by the validator never touch the registry and do not consume the interval.
#[derive(Clone)]
pub struct BatchVerifier {
    registry: Arc<dyn RegistryPlugin>,
    validator: NipValidator,
    min_interval: Duration,
}

impl BatchVerifier {
    pub fn new(
        registry: Arc<dyn RegistryPlugin>,
        validator: NipValidator,
        min_interval: Duration,
    ) -> Self {
        Self {
            registry,
            validator,
            min_interval,
        }
    }

    pub fn from_config(registry: Arc<dyn RegistryPlugin>, cfg: &AppConfig) -> Self {
        Self::new(
            registry,
            NipValidator::new(cfg.validation.checksum),
            Duration::from_millis(cfg.batch.min_interval_ms),
        )
    }

    pub fn registry_name(&self) -> &str {
        self.registry.name()
    }

    pub fn min_interval(&self) -> Duration {
        self.min_interval
    }

    pub async fn verify_all(&self, raws: &[String]) -> ResultSet {
        self.verify_all_with_progress(raws, |_, _| {}).await
    }

    /// Like [`verify_all`](Self::verify_all), calling `on_progress(done, total)`
    /// after every identifier.
    pub async fn verify_all_with_progress<F>(&self, raws: &[String], mut on_progress: F) -> ResultSet
    where
        F: FnMut(usize, usize) + Send,
    {
        let total = raws.len();
        let started = Instant::now();
        let mut results = Vec::with_capacity(total);
        let mut last_call: Option<Instant> = None;

        tracing::info!(
            target: "vatcheck.verify",
            stage = "verify.batch.in",
            total = total,
            registry = self.registry.name(),
            min_interval_ms = self.min_interval.as_millis() as u64
        );

        for raw in raws {
            let nip = normalize(raw);
            let result = if self.validator.accepts(&nip) {
                if let Some(prev) = last_call {
                    if !self.min_interval.is_zero() {
                        tokio::time::sleep_until(prev + self.min_interval).await;
                    }
                }
                last_call = Some(Instant::now());
                self.registry.lookup(&nip).await.into_result(nip)
            } else {
                VerificationResult::invalid(nip)
            };

            results.push(result);
            on_progress(results.len(), total);
        }

        tracing::info!(
            target: "vatcheck.verify",
            stage = "verify.batch.out",
            total = total,
            duration_ms = started.elapsed().as_millis() as u64
        );
        results
    }
}
