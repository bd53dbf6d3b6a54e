//! Recap API endpoints and response decoding
//!
//! Transports are platform specific (blocking reqwest on desktop, gloo-net in
//! the browser); both build URLs and decode bodies through this module.

use crate::error::{NexusError, Result};
use crate::models::{Provider, RecapPayload, StatsSnapshot};

pub const DEFAULT_API_BASE_URL: &str = "http://localhost:8000/api/v1";
pub const DEFAULT_USER_ID: u64 = 1;

/// Base URL of the recap backend
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiEndpoint {
    base_url: String,
}

impl Default for ApiEndpoint {
    fn default() -> Self {
        Self::new(DEFAULT_API_BASE_URL)
    }
}

impl ApiEndpoint {
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim().trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn build(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// GET: aggregated stats for one user
    pub fn recap_url(&self, user_id: u64) -> String {
        self.build(&format!("/recap?user_id={}", user_id))
    }

    /// POST: refresh one provider's stats before fetching a recap
    pub fn sync_url(&self, provider: Provider, user_id: u64) -> String {
        self.build(&format!("/sync/{}?user_id={}", provider.as_str(), user_id))
    }

    /// Redirect target for linking a provider account. `next_url` is where the
    /// backend sends the browser after the provider login completes.
    pub fn provider_login_url(&self, provider: Provider, next_url: &str) -> String {
        self.build(&format!(
            "/auth/{}/start?next={}",
            provider.as_str(),
            urlencoding::encode(next_url)
        ))
    }
}

/// Outcome of a recap request, before the body is decoded
pub enum RecapResponse<'a> {
    Ok(&'a str),
    /// The user exists but has no synced provider yet
    NotFound,
    Failed { status: u16, body: &'a str },
}

/// Decode a recap HTTP response into a snapshot.
///
/// A 404 means "nothing to show" and yields `Ok(None)`; the presentation is
/// simply never opened.
pub fn decode_recap_response(response: RecapResponse<'_>) -> Result<Option<StatsSnapshot>> {
    match response {
        RecapResponse::Ok(body) => decode_recap(body).map(Some),
        RecapResponse::NotFound => Ok(None),
        RecapResponse::Failed { status, body } => Err(NexusError::Http {
            status,
            body: if body.trim().is_empty() {
                format!("Request failed with status {}", status)
            } else {
                body.to_string()
            },
        }),
    }
}

/// Decode a recap JSON body
pub fn decode_recap(body: &str) -> Result<StatsSnapshot> {
    let payload: RecapPayload = serde_json::from_str(body)?;
    Ok(StatsSnapshot::from_payload(payload))
}

/// Classify a status code into a `RecapResponse`
pub fn classify_response(status: u16, body: &str) -> RecapResponse<'_> {
    match status {
        200..=299 => RecapResponse::Ok(body),
        404 => RecapResponse::NotFound,
        _ => RecapResponse::Failed { status, body },
    }
}

/// Any non-2xx sync response is an error carrying the response body
pub fn check_sync_response(status: u16, body: &str) -> Result<()> {
    if (200..300).contains(&status) {
        Ok(())
    } else {
        Err(NexusError::Http {
            status,
            body: body.trim().to_string(),
        })
    }
}

/// Steam hosts the server proxies under `/steam-media/`
const STEAM_MEDIA_HOSTS: &[&str] = &[
    "avatars.steamstatic.com",
    "avatars.akamai.steamstatic.com",
    "steamcdn-a.akamaihd.net",
    "media.steampowered.com",
];

/// Rewrite a Steam CDN URL to `<origin>/steam-media/<host>/<path>`.
/// Other URLs are returned unchanged.
pub fn proxy_steam_image_url(origin: &str, url: &str) -> String {
    let without_scheme = url
        .strip_prefix("https://")
        .or_else(|| url.strip_prefix("http://"));
    if let Some(rest) = without_scheme {
        for host in STEAM_MEDIA_HOSTS {
            if let Some(path) = rest.strip_prefix(host).and_then(|p| p.strip_prefix('/')) {
                return format!("{}/steam-media/{}/{}", origin.trim_end_matches('/'), host, path);
            }
        }
    }
    url.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn urls_strip_trailing_slash() {
        let endpoint = ApiEndpoint::new("https://example.com/api/v1/");
        assert_eq!(endpoint.recap_url(7), "https://example.com/api/v1/recap?user_id=7");
        assert_eq!(
            endpoint.sync_url(Provider::Riot, 7),
            "https://example.com/api/v1/sync/riot?user_id=7"
        );
    }

    #[test]
    fn login_url_encodes_next() {
        let endpoint = ApiEndpoint::default();
        let url = endpoint.provider_login_url(Provider::Steam, "http://localhost:3000/");
        assert_eq!(
            url,
            "http://localhost:8000/api/v1/auth/steam/start?next=http%3A%2F%2Flocalhost%3A3000%2F"
        );
    }

    #[test]
    fn not_found_is_no_snapshot() {
        let result = decode_recap_response(classify_response(404, "missing")).unwrap();
        assert!(result.is_none());
    }

    #[test]
    fn server_error_keeps_body() {
        let err = decode_recap_response(classify_response(502, "")).unwrap_err();
        match err {
            NexusError::Http { status, body } => {
                assert_eq!(status, 502);
                assert!(body.contains("502"));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn ok_body_decodes() {
        let snapshot = decode_recap_response(classify_response(200, r#"{"total_hours": 240}"#))
            .unwrap()
            .unwrap();
        assert_eq!(snapshot.total_hours, 240.0);
    }

    #[test]
    fn sync_rejects_non_success() {
        assert!(check_sync_response(204, "").is_ok());
        assert!(matches!(
            check_sync_response(401, " not linked "),
            Err(NexusError::Http { status: 401, ref body }) if body == "not linked"
        ));
    }

    #[test]
    fn invalid_json_is_decode_error() {
        assert!(matches!(decode_recap("not json"), Err(NexusError::Decode(_))));
    }

    #[test]
    fn steam_avatars_go_through_the_proxy() {
        assert_eq!(
            proxy_steam_image_url(
                "https://wrap.example/",
                "https://avatars.steamstatic.com/abc_full.jpg"
            ),
            "https://wrap.example/steam-media/avatars.steamstatic.com/abc_full.jpg"
        );
        assert_eq!(
            proxy_steam_image_url("https://wrap.example", "http://media.steampowered.com/a/b.png"),
            "https://wrap.example/steam-media/media.steampowered.com/a/b.png"
        );
    }

    #[test]
    fn other_image_hosts_are_untouched() {
        let url = "https://cdn.example/avatar.png";
        assert_eq!(proxy_steam_image_url("https://wrap.example", url), url);
        // A lookalike host must not match by prefix
        let lookalike = "https://avatars.steamstatic.com.evil.example/a.jpg";
        assert_eq!(proxy_steam_image_url("https://wrap.example", lookalike), lookalike);
    }
}
