//! Home screen - onboarding, provider links and the Wrap entry points

use eframe::egui::{self, RichText};
use egui_phosphor::regular;
use nexus_core::playback::PlaybackMode;
use nexus_core::ui::theme::{BRAND_GREEN, BRAND_PURPLE, MUTED};
use nexus_core::Provider;

use crate::app::{NexusApp, Screen};

impl NexusApp {
    pub(crate) fn render_home(&mut self, ctx: &egui::Context) {
        let t = self.translator.clone();
        let busy = self.state.is_busy();
        let has_snapshot = self.snapshot.is_some();
        let mut generate = false;
        let mut open: Option<PlaybackMode> = None;
        let mut show_card = false;
        let mut dismiss = false;

        egui::CentralPanel::default().show(ctx, |ui| {
            ui.vertical_centered(|ui| {
                ui.add_space(48.0);
                ui.label(RichText::new(t.t("home.title")).size(32.0).strong());
                ui.add_space(24.0);

                if !self.prefs.onboarding_seen {
                    egui::Frame::group(ui.style()).show(ui, |ui| {
                        ui.label(RichText::new(t.t("home.onboarding")).color(MUTED));
                        if ui.button(t.t("home.onboardingDismiss")).clicked() {
                            dismiss = true;
                        }
                    });
                    ui.add_space(16.0);
                }

                ui.horizontal(|ui| {
                    for provider in Provider::ALL {
                        let icon = match provider {
                            Provider::Steam => regular::STEAM_LOGO,
                            Provider::Riot => regular::GAME_CONTROLLER,
                        };
                        let label =
                            t.t_with("home.link", &[("provider", t.t(provider.label_key()))]);
                        let url = self
                            .endpoint
                            .provider_login_url(provider, &self.store.config().return_url);
                        ui.hyperlink_to(format!("{} {} {}", icon, regular::LINK, label), url);
                    }
                });
                ui.add_space(24.0);

                let button = egui::Button::new(
                    RichText::new(format!("{} {}", regular::SPARKLE, t.t("home.generate")))
                        .size(20.0)
                        .color(egui::Color32::WHITE),
                )
                .fill(BRAND_PURPLE);
                if ui.add_enabled(!busy, button).clicked() {
                    generate = true;
                }

                if has_snapshot {
                    ui.add_space(16.0);
                    ui.horizontal(|ui| {
                        if ui
                            .button(format!("{} {}", regular::PLAY, t.t("home.replay")))
                            .clicked()
                        {
                            open = Some(PlaybackMode::Timed);
                        }
                        if ui
                            .button(format!("{} {}", regular::STACK, t.t("home.browse")))
                            .clicked()
                        {
                            open = Some(PlaybackMode::Browse);
                        }
                        if ui
                            .button(RichText::new(format!(
                                "{} {}",
                                regular::IDENTIFICATION_CARD,
                                t.t("home.playerCard")
                            ))
                            .color(BRAND_GREEN))
                            .clicked()
                        {
                            show_card = true;
                        }
                    });
                }
            });
        });

        if dismiss {
            self.dismiss_onboarding();
        }
        if generate {
            self.start_generate();
        }
        if let Some(mode) = open {
            self.open_recap(mode);
        }
        if show_card {
            self.screen = Screen::PlayerCard;
        }
    }
}
