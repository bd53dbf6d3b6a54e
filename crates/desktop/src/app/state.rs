//! App state management - preferences, progress handling, and background operations

use crate::api::{generate_with_progress, GenerateProgress, RecapClient};
use crate::ui::{poll_progress, AppState};
use nexus_core::playback::PlaybackMode;
use nexus_core::ui::{apply_theme, RecapView};
use nexus_core::{today_utc, Language, Theme};

use eframe::egui;
use std::sync::mpsc::channel;
use std::thread;

use super::{NexusApp, Screen};

impl NexusApp {
    /// Sync the linked providers and fetch a fresh recap on a worker thread
    pub(crate) fn start_generate(&mut self) {
        if self.state.is_busy() {
            return;
        }
        let providers = self.store.config().providers.clone();
        if providers.is_empty() {
            self.state = AppState::Failed(self.translator.t("home.selectAtLeastOne"));
            return;
        }

        let client = match RecapClient::new(self.endpoint.clone()) {
            Ok(client) => client,
            Err(e) => {
                self.state = AppState::Failed(e.to_string());
                return;
            }
        };
        let user_id = self.store.config().user_id;
        let (tx, rx) = channel();
        self.receiver = Some(rx);
        self.state = AppState::Syncing {
            provider: providers[0],
            current: 0,
            total: providers.len(),
        };

        thread::spawn(move || {
            generate_with_progress(&client, &providers, user_id, tx);
        });
    }

    pub(crate) fn check_progress(&mut self) {
        let receiver = match self.receiver.take() {
            Some(r) => r,
            None => return,
        };

        while let Some(progress) = poll_progress(&receiver) {
            match progress {
                GenerateProgress::Syncing { provider, current, total } => {
                    self.state = AppState::Syncing { provider, current, total };
                }
                GenerateProgress::Fetching => {
                    self.state = AppState::Fetching;
                }
                GenerateProgress::Done(Some(snapshot)) => {
                    self.snapshot = Some(*snapshot);
                    self.state = AppState::Ready;
                    self.open_recap(PlaybackMode::Timed);
                    return;
                }
                GenerateProgress::Done(None) => {
                    self.state = AppState::NoRecap;
                    return;
                }
                GenerateProgress::Error(e) => {
                    self.state = AppState::Failed(e);
                    return;
                }
            }
        }
        self.receiver = Some(receiver);
    }

    /// Play the loaded snapshot, timed or as a browsable stack
    pub(crate) fn open_recap(&mut self, mode: PlaybackMode) {
        if let Some(snapshot) = &self.snapshot {
            let view = RecapView::new(snapshot, today_utc(), mode);
            self.screen = Screen::Recap(Box::new(view));
        }
    }

    /// A finished timed Wrap leads to the player card; browsing returns home
    pub(crate) fn close_recap(&mut self, mode: PlaybackMode) {
        self.screen = match mode {
            PlaybackMode::Timed => Screen::PlayerCard,
            PlaybackMode::Browse => Screen::Home,
        };
    }

    pub(crate) fn set_language(&mut self, language: Language) {
        if self.prefs.language == language {
            return;
        }
        self.prefs.language = language;
        self.translator = self.prefs.translator();
        self.save_prefs();
    }

    pub(crate) fn set_theme(&mut self, ctx: &egui::Context, theme: Theme) {
        if self.prefs.theme == theme {
            return;
        }
        self.prefs.theme = theme;
        apply_theme(ctx, theme);
        self.save_prefs();
    }

    pub(crate) fn dismiss_onboarding(&mut self) {
        self.prefs.onboarding_seen = true;
        self.save_prefs();
    }

    fn save_prefs(&mut self) {
        if let Err(e) = self.prefs.save(&mut self.store) {
            tracing::warn!("Failed to save preferences: {}", e);
        }
    }
}
