//! Steam avatar URL proxying for CORS avoidance

use nexus_core::proxy_steam_image_url;
use nexus_core::ui::WrapPlatform;

use crate::storage::origin;

/// Avatars load through the same-origin proxy
pub struct ProxiedImages {
    origin: String,
}

impl ProxiedImages {
    pub fn new() -> Self {
        Self { origin: origin() }
    }
}

impl Default for ProxiedImages {
    fn default() -> Self {
        Self::new()
    }
}

impl WrapPlatform for ProxiedImages {
    fn avatar_source(&self, url: &str) -> egui::ImageSource<'static> {
        egui::ImageSource::Uri(proxy_steam_image_url(&self.origin, url).into())
    }
}
