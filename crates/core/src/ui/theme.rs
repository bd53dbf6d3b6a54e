//! Brand colors and visuals

use egui::{Color32, Context, Visuals};

use crate::playback::SceneId;
use crate::prefs::Theme;

pub const BRAND_PURPLE: Color32 = Color32::from_rgb(139, 92, 246);
pub const BRAND_GREEN: Color32 = Color32::from_rgb(74, 222, 128);
pub const BRAND_BLACK: Color32 = Color32::from_rgb(12, 10, 20);
pub const GOLD: Color32 = Color32::from_rgb(255, 215, 0);
pub const MUTED: Color32 = Color32::from_rgb(150, 150, 160);

/// Install visuals for the chosen theme
pub fn apply_theme(ctx: &Context, theme: Theme) {
    let mut visuals = match theme {
        Theme::Dark => Visuals::dark(),
        Theme::Light => Visuals::light(),
    };
    visuals.selection.bg_fill = BRAND_PURPLE;
    visuals.hyperlink_color = BRAND_GREEN;
    if theme == Theme::Dark {
        visuals.panel_fill = BRAND_BLACK;
    }
    ctx.set_visuals(visuals);
}

/// Backdrop for a scene
pub fn scene_background(scene: SceneId, theme: Theme) -> Color32 {
    let dark = match scene {
        SceneId::Intro => Color32::from_rgb(22, 14, 44),
        SceneId::TotalTime => Color32::from_rgb(10, 28, 24),
        SceneId::TopGenres => Color32::from_rgb(30, 12, 38),
        SceneId::TopGames => Color32::from_rgb(14, 20, 40),
        SceneId::Trophies => Color32::from_rgb(36, 26, 8),
    };
    match theme {
        Theme::Dark => dark,
        // Tint of the dark backdrop over near-white
        Theme::Light => {
            let tint = |c: u8| 245 - (245 - c.min(245)) / 8;
            Color32::from_rgb(tint(dark.r()), tint(dark.g()), tint(dark.b()))
        }
    }
}

/// Color for a trophy tier label
pub fn tier_color(tier: crate::playback::scenes::TrophyTier) -> Color32 {
    use crate::playback::scenes::TrophyTier;
    match tier {
        TrophyTier::Legendary => GOLD,
        TrophyTier::Epic => BRAND_PURPLE,
        TrophyTier::Rare => Color32::from_rgb(96, 165, 250),
        TrophyTier::Uncommon => BRAND_GREEN,
        TrophyTier::Common => Color32::from_gray(200),
        TrophyTier::Unknown => MUTED,
    }
}
