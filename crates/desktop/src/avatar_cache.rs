//! On-disk cache for profile avatars
//!
//! Avatars are downloaded once on a background thread and served from disk
//! afterwards. A file is read at most once; later frames reuse the bytes in
//! memory. Until the file exists egui loads the remote URL directly.

use nexus_core::ui::WrapPlatform;
use std::collections::{HashMap, HashSet};
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use std::thread;

const CACHE_DIR: &str = "avatar_cache";

pub struct AvatarCache {
    cache_dir: PathBuf,
    /// URLs currently being downloaded
    downloading: Arc<Mutex<HashSet<String>>>,
    /// Files already read from disk
    loaded: Mutex<HashMap<String, Arc<[u8]>>>,
}

impl AvatarCache {
    pub fn new() -> Self {
        Self::in_dir(PathBuf::from(CACHE_DIR))
    }

    pub fn in_dir(cache_dir: PathBuf) -> Self {
        if let Err(e) = fs::create_dir_all(&cache_dir) {
            tracing::warn!("Could not create {}: {}", cache_dir.display(), e);
        }
        Self {
            cache_dir,
            downloading: Arc::new(Mutex::new(HashSet::new())),
            loaded: Mutex::new(HashMap::new()),
        }
    }

    /// Local file for a URL, keyed by a hash of the whole URL
    fn cache_path(&self, url: &str) -> PathBuf {
        let filename = url.rsplit('/').next().unwrap_or("avatar.jpg");
        self.cache_dir
            .join(format!("{}_{}", simple_hash(url), sanitize(filename)))
    }

    /// Cached bytes if present; otherwise start a download and return `None`
    pub fn bytes(&self, url: &str) -> Option<Arc<[u8]>> {
        if url.is_empty() {
            return None;
        }
        if let Some(bytes) = self.loaded.lock().ok()?.get(url) {
            return Some(bytes.clone());
        }
        let path = self.cache_path(url);
        if path.exists() {
            let bytes: Arc<[u8]> = fs::read(&path).ok()?.into();
            if let Ok(mut loaded) = self.loaded.lock() {
                loaded.insert(url.to_string(), bytes.clone());
            }
            return Some(bytes);
        }
        self.trigger_download(url.to_string(), path);
        None
    }

    fn trigger_download(&self, url: String, cache_path: PathBuf) {
        {
            let Ok(mut set) = self.downloading.lock() else {
                return;
            };
            if !set.insert(url.clone()) {
                return;
            }
        }

        let downloading = self.downloading.clone();
        thread::spawn(move || {
            match download(&url, &cache_path) {
                Ok(()) => tracing::debug!(%url, "Avatar cached"),
                Err(e) => tracing::warn!(%url, "Avatar download failed: {}", e),
            }
            if let Ok(mut set) = downloading.lock() {
                set.remove(&url);
            }
        });
    }
}

impl Default for AvatarCache {
    fn default() -> Self {
        Self::new()
    }
}

impl WrapPlatform for AvatarCache {
    fn avatar_source(&self, url: &str) -> egui::ImageSource<'static> {
        match self.bytes(url) {
            Some(bytes) => egui::ImageSource::Bytes {
                uri: format!("bytes://{}", url).into(),
                bytes: bytes.into(),
            },
            None => egui::ImageSource::Uri(url.to_string().into()),
        }
    }
}

/// Fetch and keep only payloads the image decoder accepts
fn download(url: &str, cache_path: &Path) -> Result<(), Box<dyn std::error::Error>> {
    let bytes = reqwest::blocking::get(url)?.error_for_status()?.bytes()?;
    image::guess_format(&bytes)?;
    fs::write(cache_path, &bytes)?;
    Ok(())
}

fn sanitize(name: &str) -> String {
    name.chars()
        .map(|c| if c.is_ascii_alphanumeric() || c == '.' { c } else { '_' })
        .collect()
}

/// djb2, enough to keep cache filenames apart
fn simple_hash(s: &str) -> u64 {
    let mut hash: u64 = 5381;
    for c in s.bytes() {
        hash = hash.wrapping_mul(33).wrapping_add(c as u64);
    }
    hash
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cached_file_is_served_from_disk() {
        let dir = tempfile::tempdir().unwrap();
        let cache = AvatarCache::in_dir(dir.path().to_path_buf());
        let url = "https://avatars.example/abc_full.jpg";
        fs::write(cache.cache_path(url), b"jpeg bytes").unwrap();
        assert_eq!(cache.bytes(url).as_deref(), Some(&b"jpeg bytes"[..]));
    }

    #[test]
    fn file_is_read_once_then_served_from_memory() {
        let dir = tempfile::tempdir().unwrap();
        let cache = AvatarCache::in_dir(dir.path().to_path_buf());
        let url = "https://avatars.example/abc_full.jpg";
        let path = cache.cache_path(url);
        fs::write(&path, b"jpeg bytes").unwrap();

        let first = cache.bytes(url).unwrap();
        fs::remove_file(&path).unwrap();
        let second = cache.bytes(url).unwrap();
        assert!(Arc::ptr_eq(&first, &second));
    }

    #[test]
    fn distinct_urls_get_distinct_files() {
        let dir = tempfile::tempdir().unwrap();
        let cache = AvatarCache::in_dir(dir.path().to_path_buf());
        assert_ne!(
            cache.cache_path("https://a.example/x/full.jpg"),
            cache.cache_path("https://b.example/x/full.jpg")
        );
        assert!(cache
            .cache_path("https://a.example/x/we?ird.jpg")
            .to_string_lossy()
            .ends_with("we_ird.jpg"));
    }

    #[test]
    fn empty_url_is_never_fetched() {
        let dir = tempfile::tempdir().unwrap();
        let cache = AvatarCache::in_dir(dir.path().to_path_buf());
        assert_eq!(cache.bytes(""), None);
    }
}
