//! Core of Nexus Wrap
//!
//! This crate contains:
//! - The recap payload and its normalized `StatsSnapshot`
//! - The scene playback engine (counters, scenes, player, gestures)
//! - API endpoints and response decoding shared by the HTTP clients
//! - Translations, preferences and display formatting
//! - Shared egui presentation (with `ui` feature)

pub mod api;
pub mod error;
pub mod format;
pub mod i18n;
pub mod models;
pub mod playback;
pub mod prefs;

#[cfg(feature = "ui")]
pub mod ui;

pub use api::*;
pub use error::*;
pub use i18n::{Language, Translator};
pub use models::*;
pub use prefs::{KeyValueStore, MemoryStore, Preferences, Theme};
