//! Main application module

mod panels;
mod state;

use crate::avatar_cache::AvatarCache;
use crate::config::ConfigStore;
use crate::ui::{AppState, ProgressReceiver};
use nexus_core::ui::{apply_theme, RecapOutcome, RecapView};
use nexus_core::{ApiEndpoint, Preferences, StatsSnapshot, Translator};

use eframe::egui;

/// What fills the window
pub(crate) enum Screen {
    Home,
    Recap(Box<RecapView>),
    PlayerCard,
}

pub struct NexusApp {
    pub(crate) store: ConfigStore,
    pub(crate) prefs: Preferences,
    pub(crate) translator: Translator,
    pub(crate) endpoint: ApiEndpoint,
    pub(crate) state: AppState,
    pub(crate) receiver: Option<ProgressReceiver>,
    pub(crate) snapshot: Option<StatsSnapshot>,
    pub(crate) screen: Screen,
    pub(crate) avatars: AvatarCache,
}

impl NexusApp {
    pub fn new(ctx: &egui::Context) -> Self {
        let store = ConfigStore::load();
        let prefs = Preferences::load(&store);
        let endpoint = ApiEndpoint::new(&store.config().api_base_url);
        tracing::info!(
            api = endpoint.base_url(),
            user_id = store.config().user_id,
            language = prefs.language.code(),
            "Starting Nexus Wrap"
        );
        apply_theme(ctx, prefs.theme);

        Self {
            translator: prefs.translator(),
            store,
            prefs,
            endpoint,
            state: AppState::Idle,
            receiver: None,
            snapshot: None,
            screen: Screen::Home,
            avatars: AvatarCache::new(),
        }
    }
}

impl eframe::App for NexusApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.check_progress();
        if self.state.is_busy() {
            ctx.request_repaint();
        }

        match &mut self.screen {
            Screen::Recap(view) => {
                let outcome = view.show(ctx, &self.avatars, &self.translator, self.prefs.theme);
                if outcome == RecapOutcome::Closed {
                    let mode = view.player().mode();
                    self.close_recap(mode);
                }
            }
            Screen::PlayerCard => {
                self.render_top_panel(ctx);
                self.render_player_card(ctx);
            }
            Screen::Home => {
                self.render_top_panel(ctx);
                self.render_home(ctx);
            }
        }
    }
}
