//! Blocking recap client, run on a worker thread

use nexus_core::{
    check_sync_response, classify_response, decode_recap_response, ApiEndpoint, NexusError,
    Provider, Result, StatsSnapshot,
};
use std::sync::mpsc::Sender;
use std::time::Duration;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Debug, Clone)]
pub enum GenerateProgress {
    Syncing { provider: Provider, current: usize, total: usize },
    Fetching,
    Done(Option<Box<StatsSnapshot>>),
    Error(String),
}

pub struct RecapClient {
    endpoint: ApiEndpoint,
    http: reqwest::blocking::Client,
}

impl RecapClient {
    pub fn new(endpoint: ApiEndpoint) -> Result<Self> {
        let http = reqwest::blocking::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|e| NexusError::Network(e.to_string()))?;
        Ok(Self { endpoint, http })
    }

    /// `None` when the backend has no stats for the user yet
    pub fn fetch_recap(&self, user_id: u64) -> Result<Option<StatsSnapshot>> {
        let url = self.endpoint.recap_url(user_id);
        tracing::info!(%url, "Fetching recap");
        let response = self
            .http
            .get(&url)
            .send()
            .map_err(|e| NexusError::Network(e.to_string()))?;
        let status = response.status().as_u16();
        let body = response
            .text()
            .map_err(|e| NexusError::Network(e.to_string()))?;
        let snapshot = decode_recap_response(classify_response(status, &body))?;
        tracing::info!(status, found = snapshot.is_some(), "Recap fetched");
        Ok(snapshot)
    }

    pub fn sync_provider(&self, provider: Provider, user_id: u64) -> Result<()> {
        let url = self.endpoint.sync_url(provider, user_id);
        tracing::info!(%url, provider = provider.as_str(), "Syncing provider");
        let response = self
            .http
            .post(&url)
            .send()
            .map_err(|e| NexusError::Network(e.to_string()))?;
        let status = response.status().as_u16();
        let body = response.text().unwrap_or_default();
        check_sync_response(status, &body)
    }
}

/// Sync every linked provider, then fetch the recap, reporting each stage.
/// A failed sync is logged and skipped so stale stats still produce a Wrap.
pub fn generate_with_progress(
    client: &RecapClient,
    providers: &[Provider],
    user_id: u64,
    progress_tx: Sender<GenerateProgress>,
) {
    let total = providers.len();
    for (index, provider) in providers.iter().enumerate() {
        let _ = progress_tx.send(GenerateProgress::Syncing {
            provider: *provider,
            current: index + 1,
            total,
        });
        if let Err(e) = client.sync_provider(*provider, user_id) {
            tracing::warn!(provider = provider.as_str(), "Sync failed: {}", e);
        }
    }

    let _ = progress_tx.send(GenerateProgress::Fetching);
    let message = match client.fetch_recap(user_id) {
        Ok(snapshot) => GenerateProgress::Done(snapshot.map(Box::new)),
        Err(e) => {
            tracing::warn!("Recap fetch failed: {}", e);
            GenerateProgress::Error(e.to_string())
        }
    };
    let _ = progress_tx.send(message);
}
