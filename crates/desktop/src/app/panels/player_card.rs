//! Player card screen shown after a timed Wrap

use eframe::egui;
use egui_phosphor::regular;
use nexus_core::playback::PlaybackMode;
use nexus_core::today_utc;
use nexus_core::ui::render_player_card;

use crate::app::{NexusApp, Screen};

impl NexusApp {
    pub(crate) fn render_player_card(&mut self, ctx: &egui::Context) {
        let t = self.translator.clone();
        let mut back = false;
        let mut replay = false;

        egui::CentralPanel::default().show(ctx, |ui| {
            ui.horizontal(|ui| {
                if ui.button(format!("{} {}", regular::ARROW_LEFT, t.t("wrap.close"))).clicked() {
                    back = true;
                }
                if ui.button(format!("{} {}", regular::PLAY, t.t("home.replay"))).clicked() {
                    replay = true;
                }
            });
            ui.separator();

            egui::ScrollArea::vertical().show(ui, |ui| match &self.snapshot {
                Some(snapshot) => {
                    render_player_card(ui, snapshot, today_utc(), &self.avatars, &t);
                }
                None => {
                    ui.label(t.t("recap.noData"));
                }
            });
        });

        if back {
            self.screen = Screen::Home;
        } else if replay {
            self.open_recap(PlaybackMode::Timed);
        }
    }
}
