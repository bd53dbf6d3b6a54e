//! Shared UI components for desktop and WASM
//!
//! This module provides platform-agnostic UI rendering using egui.
//! Platform-specific details (like image loading) are abstracted via traits.

mod player_card;
mod scenes;
mod shell;
pub mod theme;
mod widgets;

pub use player_card::render_player_card;
pub use scenes::render_scene;
pub use shell::{RecapOutcome, RecapView};
pub use theme::apply_theme;

/// Platform-specific operations needed by the Wrap views
pub trait WrapPlatform {
    /// Resolve a profile avatar URL to something egui can load
    fn avatar_source(&self, url: &str) -> egui::ImageSource<'static>;
}
