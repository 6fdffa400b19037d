use super::http_client::{HttpClient, RegistryHttpErrorKind};
use anyhow::Result;
use async_trait::async_trait;
use vatcheck_core::api::{LookupOutcome, RegistryPlugin};

/// White List (`wl-api.mf.gov.pl`) registry backend.
pub struct WhiteListPlugin {
    client: HttpClient,
}

impl WhiteListPlugin {
    pub fn new(base_url: String, timeout_ms: u64) -> Result<Self> {
        let client = HttpClient::new(base_url, timeout_ms)?;
        Ok(Self { client })
    }
}

/// Calendar date sent with every query, evaluated per call.
fn today() -> String {
    chrono::Local::now().format("%Y-%m-%d").to_string()
}

#[async_trait]
impl RegistryPlugin for WhiteListPlugin {
    fn name(&self) -> &str {
        "white_list"
    }

    async fn lookup(&self, nip: &str) -> LookupOutcome {
        let date = today();
        match self.client.search_nip(nip, &date).await {
            Ok(Some(subject)) => LookupOutcome::Found {
                name: subject.name,
                status_vat: subject.status_vat,
            },
            Ok(None) => LookupOutcome::NotFound,
            Err(err) if err.kind() == RegistryHttpErrorKind::Status => {
                tracing::warn!(
                    target: "vatcheck.registry",
                    stage = "registry.plugin.lookup.status",
                    nip = %nip,
                    error = %err
                );
                LookupOutcome::BadStatus(err.status().unwrap_or_default())
            }
            Err(err) => {
                tracing::warn!(
                    target: "vatcheck.registry",
                    stage = "registry.plugin.lookup.transport",
                    nip = %nip,
                    kind = %err.kind(),
                    error = %err
                );
                LookupOutcome::Transport(err.to_string())
            }
        }
    }
}
