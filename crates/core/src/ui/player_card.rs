//! Static summary of a snapshot
//!
//! Everything on the card renders at its final value; there is no playback.

use chrono::NaiveDate;
use egui::{self, RichText, Ui};
use egui_plot::{Bar, BarChart, Plot};
use egui_phosphor::regular;

use super::theme::{BRAND_GREEN, BRAND_PURPLE, MUTED};
use super::widgets::{avatar, caption, list_row, stat_tile};
use super::WrapPlatform;
use crate::format::{
    format_count, format_date, format_hours, format_one_decimal, format_percent, format_rarity,
};
use crate::i18n::Translator;
use crate::models::{AchievementEntry, StatsSnapshot};

/// Entries listed per section
const LIST_LIMIT: usize = 3;

pub fn render_player_card<P: WrapPlatform>(
    ui: &mut Ui,
    snapshot: &StatsSnapshot,
    today: NaiveDate,
    platform: &P,
    t: &Translator,
) {
    let name = snapshot
        .profile
        .persona_name
        .clone()
        .unwrap_or_else(|| t.t("recap.unknownPlayer"));

    ui.horizontal(|ui| {
        avatar(ui, platform, snapshot.profile.avatar_url.as_deref(), &name, 64.0);
        ui.vertical(|ui| {
            caption(ui, &t.t("playerCard.title"));
            ui.label(RichText::new(&name).size(28.0).strong());
            ui.label(
                RichText::new(t.t_with(
                    "playerCard.subtitle",
                    &[("year", snapshot.year.to_string())],
                ))
                .color(MUTED),
            );
        });
    });
    ui.horizontal_wrapped(|ui| {
        badge(ui, &t.t_with("playerCard.season", &[("year", snapshot.year.to_string())]));
        badge(ui, &snapshot.playstyle);
        if let Some(genre) = snapshot.top_genres.first() {
            badge(ui, &genre.name);
        }
    });
    ui.add_space(16.0);

    section(ui, &t.t("playerCard.profile"), |ui| {
        let level = snapshot
            .profile
            .level
            .map(|l| format_count(l as u64))
            .unwrap_or_else(|| "--".to_string());
        let created = snapshot
            .profile
            .created_at
            .map(|dt| format_date(dt.date_naive(), t.language()))
            .unwrap_or_else(|| "--".to_string());
        let years = snapshot
            .years_active(today)
            .map(|y| y.to_string())
            .unwrap_or_else(|| "--".to_string());
        ui.horizontal_wrapped(|ui| {
            stat_tile(ui, &t.t("recap.profileLevel"), &level, BRAND_GREEN);
            stat_tile(ui, &t.t("recap.profileCreated"), &created, BRAND_PURPLE);
            stat_tile(ui, &t.t("recap.yearsActive"), &years, BRAND_GREEN);
        });
    });

    section(ui, &t.t("playerCard.stats"), |ui| {
        ui.horizontal_wrapped(|ui| {
            stat_tile(
                ui,
                &t.t("playerCard.totalHours"),
                &format!("{} {}", format_hours(snapshot.total_hours), t.t("recap.hoursShort")),
                BRAND_GREEN,
            );
            stat_tile(
                ui,
                &t.t("playerCard.longestSession"),
                &format!("{}h", format_one_decimal(snapshot.longest_session)),
                BRAND_PURPLE,
            );
            stat_tile(
                ui,
                &t.t("playerCard.recentHours"),
                &format!("{}h", format_one_decimal(snapshot.recent_hours)),
                BRAND_GREEN,
            );
            stat_tile(
                ui,
                &t.t("playerCard.gamesOwned"),
                &format_count(snapshot.games_owned as u64),
                BRAND_PURPLE,
            );
        });
        let top_game = snapshot
            .top_game
            .clone()
            .unwrap_or_else(|| t.t("recap.unknownGame"));
        stat_tile(ui, &t.t("playerCard.topGame"), &top_game, BRAND_GREEN);
    });

    section(ui, &t.t("playerCard.steam"), |ui| {
        ui.columns(2, |columns| {
            caption(&mut columns[0], &t.t("playerCard.topGames"));
            if snapshot.top_games.is_empty() {
                columns[0].label(t.t("recap.noData"));
            } else {
                render_games_chart(&mut columns[0], snapshot);
            }

            caption(&mut columns[1], &t.t("playerCard.topGenres"));
            if snapshot.top_genres.is_empty() {
                columns[1].label(t.t("recap.noData"));
            }
            for genre in snapshot.top_genres.iter().take(LIST_LIMIT) {
                list_row(&mut columns[1], &genre.name, &format_percent(genre.percent));
            }
        });
    });

    section(ui, &t.t("playerCard.achievements"), |ui| {
        ui.columns(2, |columns| {
            caption(&mut columns[0], &t.t("playerCard.achievements"));
            achievement_list(&mut columns[0], &snapshot.achievements, t);
            caption(&mut columns[1], &t.t("playerCard.rareAchievements"));
            achievement_list(&mut columns[1], &snapshot.rare_achievements, t);
        });
    });

    section(ui, &t.t("playerCard.completedGames"), |ui| {
        if snapshot.completed_games.is_empty() {
            ui.label(t.t("recap.noData"));
        }
        for game in snapshot.completed_games.iter().take(LIST_LIMIT) {
            list_row(ui, &game.name, &format!("{}h", format_hours(game.hours)));
        }
    });

    if let Some(riot) = &snapshot.riot {
        section(ui, &t.t("playerCard.riotTitle"), |ui| {
            ui.horizontal_wrapped(|ui| {
                stat_tile(
                    ui,
                    &t.t("playerCard.rank"),
                    riot.rank.as_deref().unwrap_or("--"),
                    BRAND_PURPLE,
                );
                let win_rate = riot
                    .effective_win_rate()
                    .map(|r| format_percent(r.round()))
                    .unwrap_or_else(|| "--".to_string());
                stat_tile(ui, &t.t("playerCard.winRate"), &win_rate, BRAND_GREEN);
                stat_tile(
                    ui,
                    &t.t("playerCard.wins"),
                    &format_count(riot.wins as u64),
                    BRAND_GREEN,
                );
                stat_tile(
                    ui,
                    &t.t("playerCard.losses"),
                    &format_count(riot.losses as u64),
                    BRAND_PURPLE,
                );
            });
            stat_tile(
                ui,
                &t.t("playerCard.favorite"),
                riot.favorite.as_deref().unwrap_or("--"),
                BRAND_GREEN,
            );
        });
    }
}

/// Hours per top game as a horizontal bar chart
fn render_games_chart(ui: &mut Ui, snapshot: &StatsSnapshot) {
    let games: Vec<_> = snapshot.top_games.iter().take(LIST_LIMIT).collect();
    let bars: Vec<Bar> = games
        .iter()
        .enumerate()
        .map(|(i, game)| {
            // Top game at the top of the chart
            Bar::new((games.len() - i) as f64, game.hours)
                .name(&game.name)
                .fill(BRAND_GREEN)
        })
        .collect();
    let chart = BarChart::new("Hours", bars).horizontal();

    Plot::new("player_card_top_games")
        .height(120.0)
        .width(ui.available_width())
        .show_axes([true, false])
        .allow_drag(false)
        .allow_zoom(false)
        .allow_scroll(false)
        .show(ui, |plot_ui| {
            plot_ui.bar_chart(chart);
        });

    for game in &games {
        list_row(ui, &game.name, &format!("{}h", format_hours(game.hours)));
    }
}

fn achievement_list(ui: &mut Ui, entries: &[AchievementEntry], t: &Translator) {
    if entries.is_empty() {
        ui.label(t.t("recap.noData"));
        return;
    }
    for entry in entries.iter().take(LIST_LIMIT) {
        list_row(ui, &entry.name, &format_rarity(entry.percent));
        let game = if entry.game.is_empty() {
            t.t("recap.unknownGame")
        } else {
            entry.game.clone()
        };
        ui.label(RichText::new(game).small().color(MUTED));
    }
}

fn badge(ui: &mut Ui, text: &str) {
    egui::Frame::new()
        .stroke(egui::Stroke::new(1.0, MUTED.gamma_multiply(0.5)))
        .corner_radius(12.0)
        .inner_margin(egui::Margin::symmetric(10, 4))
        .show(ui, |ui| {
            ui.label(RichText::new(text.to_uppercase()).small().color(MUTED));
        });
}

fn section(ui: &mut Ui, title: &str, add_contents: impl FnOnce(&mut Ui)) {
    egui::Frame::new()
        .fill(ui.style().visuals.extreme_bg_color)
        .corner_radius(16.0)
        .inner_margin(16.0)
        .show(ui, |ui| {
            ui.set_width(ui.available_width());
            ui.label(
                RichText::new(format!("{} {}", regular::SPARKLE, title.to_uppercase()))
                    .color(BRAND_PURPLE),
            );
            ui.add_space(8.0);
            add_contents(ui);
        });
    ui.add_space(12.0);
}
