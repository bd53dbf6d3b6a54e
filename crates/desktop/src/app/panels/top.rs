//! Top toolbar panel - title, language, theme and generation status

use eframe::egui;
use egui_phosphor::regular;
use nexus_core::{Language, Theme};

use crate::app::NexusApp;

impl NexusApp {
    pub(crate) fn render_top_panel(&mut self, ctx: &egui::Context) {
        let t = self.translator.clone();
        let mut language = self.prefs.language;
        let mut theme = self.prefs.theme;

        egui::TopBottomPanel::top("top_panel").show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.heading(format!("{} Nexus Wrap", regular::GAME_CONTROLLER));
                ui.separator();

                if self.state.is_busy() {
                    ui.spinner();
                    ui.add(
                        egui::ProgressBar::new(self.state.progress())
                            .text(self.state.status(&t))
                            .animate(true),
                    );
                } else {
                    ui.label(self.state.status(&t));
                }

                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    let theme_icon = match theme {
                        Theme::Dark => regular::MOON,
                        Theme::Light => regular::SUN,
                    };
                    if ui
                        .button(theme_icon)
                        .on_hover_text(t.t("home.theme"))
                        .clicked()
                    {
                        theme = theme.toggle();
                    }

                    egui::ComboBox::from_id_salt("language")
                        .selected_text(language.code().to_uppercase())
                        .show_ui(ui, |ui| {
                            for option in Language::ALL {
                                ui.selectable_value(
                                    &mut language,
                                    option,
                                    option.code().to_uppercase(),
                                );
                            }
                        });
                    ui.label(regular::TRANSLATE);
                });
            });
        });

        self.set_language(language);
        self.set_theme(ctx, theme);
    }
}
