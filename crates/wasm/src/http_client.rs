//! HTTP client for the recap API
//!
//! Uses gloo-net for browser fetch API

use gloo_net::http::Request;
use nexus_core::{
    check_sync_response, classify_response, decode_recap_response, ApiEndpoint, NexusError,
    Provider, Result, StatsSnapshot,
};

/// `None` when the backend has no stats for the user yet
pub async fn fetch_recap(endpoint: &ApiEndpoint, user_id: u64) -> Result<Option<StatsSnapshot>> {
    let url = endpoint.recap_url(user_id);
    tracing::info!(%url, "Fetching recap");

    let response = Request::get(&url)
        .send()
        .await
        .map_err(|e| NexusError::Network(e.to_string()))?;
    let status = response.status();
    let body = response
        .text()
        .await
        .map_err(|e| NexusError::Network(e.to_string()))?;

    decode_recap_response(classify_response(status, &body))
}

pub async fn sync_provider(endpoint: &ApiEndpoint, provider: Provider, user_id: u64) -> Result<()> {
    let url = endpoint.sync_url(provider, user_id);
    tracing::info!(%url, provider = provider.as_str(), "Syncing provider");

    let response = Request::post(&url)
        .send()
        .await
        .map_err(|e| NexusError::Network(e.to_string()))?;
    let status = response.status();
    let body = response.text().await.unwrap_or_default();
    check_sync_response(status, &body)
}
