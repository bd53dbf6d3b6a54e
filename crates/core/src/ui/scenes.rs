//! One renderer per scene
//!
//! Renderers only read scene state; every animated value comes from the
//! scene's own counters.

use egui::{self, RichText, Ui};
use egui_phosphor::regular;

use super::theme::{tier_color, BRAND_GREEN, BRAND_PURPLE, GOLD, MUTED};
use super::widgets::{avatar, caption, list_row, progress_ring, stat_tile};
use super::WrapPlatform;
use crate::format::{
    format_count, format_hours, format_one_decimal, format_percent, format_rarity,
};
use crate::i18n::Translator;
use crate::playback::scenes::{
    GenreLabel, IntroScene, TopGamesScene, TopGenresScene, TotalTimeScene, TrophiesScene,
};
use crate::playback::{ItemPhase, SceneSlot};

pub fn render_scene<P: WrapPlatform>(ui: &mut Ui, slot: &SceneSlot, platform: &P, t: &Translator) {
    ui.vertical_centered(|ui| {
        ui.label(
            RichText::new(t.t(slot.id().title_key()).to_uppercase())
                .size(16.0)
                .color(BRAND_PURPLE),
        );
        ui.add_space(16.0);
        match slot {
            SceneSlot::Intro(scene) => render_intro(ui, scene, platform, t),
            SceneSlot::TotalTime(scene) => render_total_time(ui, scene, t),
            SceneSlot::TopGenres(scene) => render_genres(ui, scene, t),
            SceneSlot::TopGames(scene) => render_top_games(ui, scene, t),
            SceneSlot::Trophies(scene) => render_trophies(ui, scene, t),
        }
    });
}

fn render_intro<P: WrapPlatform>(ui: &mut Ui, scene: &IntroScene, platform: &P, t: &Translator) {
    let name = scene
        .persona_name()
        .map(str::to_string)
        .unwrap_or_else(|| t.t("recap.unknownPlayer"));
    avatar(ui, platform, scene.avatar_url(), &name, 96.0);
    ui.add_space(8.0);
    ui.label(RichText::new(&name).size(32.0).strong());
    ui.add_space(24.0);

    let level = scene
        .level_value()
        .map(|v| format_count(v.floor() as u64))
        .unwrap_or_else(|| "--".to_string());

    let months = t.language().month_abbreviations();
    let created = match scene.date_reel() {
        Some(reel) => format!(
            "{:02} {} {}",
            reel.day(),
            months[(reel.month_index as usize).min(11)],
            reel.year()
        ),
        None => t.t("recap.unknownDate"),
    };

    let years = scene
        .years_value()
        .map(|v| format_count(v.floor() as u64))
        .unwrap_or_else(|| "--".to_string());

    ui.horizontal_wrapped(|ui| {
        stat_tile(ui, &t.t("recap.profileLevel"), &level, BRAND_GREEN);
        stat_tile(ui, &t.t("recap.profileCreated"), &created, BRAND_PURPLE);
        stat_tile(ui, &t.t("recap.yearsActive"), &years, BRAND_GREEN);
    });
}

fn render_total_time(ui: &mut Ui, scene: &TotalTimeScene, t: &Translator) {
    progress_ring(
        ui,
        scene.ring_degrees(),
        180.0,
        &format_count(scene.hours()),
        &t.t("recap.hoursShort"),
    );
    ui.add_space(16.0);
    ui.label(
        RichText::new(t.t_with(
            "recap.gamingTimeCopy",
            &[("hours", format_count(scene.target_hours() as u64))],
        ))
        .color(BRAND_GREEN),
    );
    ui.add_space(16.0);
    ui.horizontal_wrapped(|ui| {
        stat_tile(
            ui,
            &t.t("recap.equivalentDays"),
            &format_one_decimal(scene.days()),
            BRAND_GREEN,
        );
        stat_tile(
            ui,
            &t.t("recap.equivalentMonths"),
            &format_one_decimal(scene.months()),
            BRAND_GREEN,
        );
    });
}

fn render_genres(ui: &mut Ui, scene: &TopGenresScene, t: &Translator) {
    ui.label(RichText::new(t.t("recap.topGenresSubtitle")).color(MUTED));
    ui.add_space(12.0);
    if !scene.has_data() {
        ui.label(t.t("recap.noData"));
        return;
    }

    let width = ui.available_width().min(480.0);
    for row in scene.visible_rows() {
        let name = match &row.label {
            GenreLabel::Named(name) => name.clone(),
            GenreLabel::Other => t.t("recap.topGenresOther"),
        };
        ui.add_space(6.0);
        list_row(ui, &name, &format_percent(row.percent));
        ui.add(
            egui::ProgressBar::new(row.fill())
                .desired_width(width)
                .fill(match row.label {
                    GenreLabel::Other => MUTED,
                    GenreLabel::Named(_) => BRAND_PURPLE,
                }),
        );
    }
}

fn render_top_games(ui: &mut Ui, scene: &TopGamesScene, t: &Translator) {
    stat_tile(
        ui,
        &t.t("recap.recentHoursTitle"),
        &format!("{} {}", format_count(scene.recent_hours()), t.t("recap.hoursShort")),
        BRAND_GREEN,
    );
    ui.add_space(16.0);
    if scene.games().is_empty() {
        ui.label(t.t("recap.noData"));
    }

    let active = scene.active_game();
    for (index, game) in scene.games().iter().enumerate() {
        if scene.game_phase(index) == ItemPhase::Pending {
            // Keep the layout stable while lower entries are still counting
            ui.add_space(28.0);
            continue;
        }
        let color = if active == Some(index) { GOLD } else { BRAND_GREEN };
        ui.horizontal(|ui| {
            ui.label(RichText::new(format!("#{}", index + 1)).size(20.0).color(BRAND_PURPLE));
            ui.label(RichText::new(&game.name).size(20.0).strong());
            ui.label(
                RichText::new(t.t_with(
                    "recap.hoursPlayed",
                    &[("hours", format_count(scene.game_hours(index)))],
                ))
                .color(color),
            );
        });
    }

    ui.add_space(16.0);
    ui.columns(2, |columns| {
        caption(&mut columns[0], &t.t("recap.rareAchievementsTitle"));
        if scene.rare_achievements().is_empty() {
            columns[0].label(RichText::new(t.t("recap.noData")).color(MUTED));
        }
        for entry in scene.rare_achievements().iter().take(scene.visible_rare()) {
            list_row(
                &mut columns[0],
                &format!("{} - {}", entry.name, entry.game),
                &format_rarity(entry.percent),
            );
        }

        caption(&mut columns[1], &t.t("recap.completedGamesTitle"));
        if scene.completed_games().is_empty() {
            columns[1].label(RichText::new(t.t("recap.noData")).color(MUTED));
        }
        for game in scene.completed_games().iter().take(scene.visible_completed()) {
            let hours = format!("{} {}", format_hours(game.hours), t.t("recap.hoursShort"));
            list_row(&mut columns[1], &game.name, &hours);
        }
    });
}

fn render_trophies(ui: &mut Ui, scene: &TrophiesScene, t: &Translator) {
    ui.label(
        RichText::new(format!(
            "{} {}",
            regular::TROPHY,
            t.t_with("recap.trophiesTotal", &[("count", format_count(scene.total() as u64))])
        ))
        .size(18.0)
        .color(GOLD),
    );
    ui.add_space(12.0);
    if scene.total() == 0 {
        ui.label(t.t("recap.noData"));
        return;
    }

    for group in scene.visible_groups() {
        ui.add_space(6.0);
        ui.horizontal(|ui| {
            ui.label(
                RichText::new(t.t(group.tier.label_key()))
                    .strong()
                    .color(tier_color(group.tier)),
            );
            ui.label(RichText::new(format!("({})", group.trophies.len())).color(MUTED));
        });
        for entry in group.preview() {
            list_row(
                ui,
                &format!("{} - {}", entry.name, entry.game),
                &format_rarity(entry.percent),
            );
        }
        if group.overflow() > 0 {
            caption(
                ui,
                &t.t_with("recap.trophiesMore", &[("count", group.overflow().to_string())]),
            );
        }
    }
}
