//! WASM App state and UI - matches desktop version layout

use eframe::egui::{self, RichText};
use egui_phosphor::regular;
use nexus_core::playback::PlaybackMode;
use nexus_core::ui::theme::{BRAND_GREEN, BRAND_PURPLE, MUTED};
use nexus_core::ui::{apply_theme, render_player_card, RecapOutcome, RecapView};
use nexus_core::{
    today_utc, ApiEndpoint, Language, Preferences, Provider, StatsSnapshot, Theme,
    Translator,
};
use std::cell::RefCell;
use std::rc::Rc;

use crate::http_client;
use crate::steam_images::ProxiedImages;
use crate::storage::{
    api_base_url, current_href, load_providers, resolve_user_id, save_providers, BrowserStore,
};

// ============================================================================
// Types
// ============================================================================

/// Messages posted by the async generate task
enum GenerateProgress {
    Syncing(Provider),
    Fetching,
    Done(Option<Box<StatsSnapshot>>),
    Error(String),
}

#[derive(Clone, PartialEq, Default)]
pub enum AppState {
    #[default]
    Idle,
    Syncing(Provider),
    Fetching,
    Ready,
    NoRecap,
    Failed(String),
}

impl AppState {
    pub fn is_busy(&self) -> bool {
        matches!(self, AppState::Syncing(_) | AppState::Fetching)
    }

    fn status(&self, t: &Translator) -> String {
        match self {
            AppState::Idle => String::new(),
            AppState::Syncing(provider) => {
                t.t_with("home.syncing", &[("provider", t.t(provider.label_key()))])
            }
            AppState::Fetching => t.t("home.fetching"),
            AppState::Ready => t.t("home.ready"),
            AppState::NoRecap => t.t("home.noRecap"),
            AppState::Failed(error) => t.t_with("home.failed", &[("error", error.clone())]),
        }
    }
}

enum Screen {
    Home,
    Recap(Box<RecapView>),
    PlayerCard,
}

// ============================================================================
// Main App
// ============================================================================

pub struct WasmApp {
    store: BrowserStore,
    prefs: Preferences,
    translator: Translator,
    endpoint: ApiEndpoint,
    user_id: u64,
    providers: Vec<Provider>,
    state: AppState,
    inbox: Rc<RefCell<Vec<GenerateProgress>>>,
    snapshot: Option<StatsSnapshot>,
    screen: Screen,
    images: ProxiedImages,
}

impl WasmApp {
    pub fn new(ctx: &egui::Context) -> Self {
        let mut store = BrowserStore;
        let prefs = Preferences::load(&store);
        let user_id = resolve_user_id(&mut store);
        let providers = load_providers(&store);
        let endpoint = ApiEndpoint::new(&api_base_url());
        tracing::info!(api = endpoint.base_url(), user_id, "Starting Nexus Wrap");
        apply_theme(ctx, prefs.theme);

        Self {
            translator: prefs.translator(),
            store,
            prefs,
            endpoint,
            user_id,
            providers,
            state: AppState::Idle,
            inbox: Rc::new(RefCell::new(Vec::new())),
            snapshot: None,
            screen: Screen::Home,
            images: ProxiedImages::new(),
        }
    }

    // ========================================================================
    // Generate flow
    // ========================================================================

    fn start_generate(&mut self, ctx: &egui::Context) {
        if self.state.is_busy() {
            return;
        }
        if self.providers.is_empty() {
            self.state = AppState::Failed(self.translator.t("home.selectAtLeastOne"));
            return;
        }
        self.state = AppState::Syncing(self.providers[0]);

        let inbox = self.inbox.clone();
        let endpoint = self.endpoint.clone();
        let providers = self.providers.clone();
        let user_id = self.user_id;
        let ctx = ctx.clone();
        wasm_bindgen_futures::spawn_local(async move {
            let post = |progress: GenerateProgress| {
                inbox.borrow_mut().push(progress);
                ctx.request_repaint();
            };
            for provider in providers {
                post(GenerateProgress::Syncing(provider));
                if let Err(e) = http_client::sync_provider(&endpoint, provider, user_id).await {
                    tracing::warn!(provider = provider.as_str(), "Sync failed: {}", e);
                }
            }
            post(GenerateProgress::Fetching);
            match http_client::fetch_recap(&endpoint, user_id).await {
                Ok(snapshot) => post(GenerateProgress::Done(snapshot.map(Box::new))),
                Err(e) => {
                    tracing::warn!("Recap fetch failed: {}", e);
                    post(GenerateProgress::Error(e.to_string()));
                }
            }
        });
    }

    fn check_progress(&mut self) {
        let messages: Vec<GenerateProgress> = self.inbox.borrow_mut().drain(..).collect();
        for progress in messages {
            match progress {
                GenerateProgress::Syncing(provider) => self.state = AppState::Syncing(provider),
                GenerateProgress::Fetching => self.state = AppState::Fetching,
                GenerateProgress::Done(Some(snapshot)) => {
                    self.snapshot = Some(*snapshot);
                    self.state = AppState::Ready;
                    self.open_recap(PlaybackMode::Timed);
                }
                GenerateProgress::Done(None) => self.state = AppState::NoRecap,
                GenerateProgress::Error(e) => self.state = AppState::Failed(e),
            }
        }
    }

    fn open_recap(&mut self, mode: PlaybackMode) {
        if let Some(snapshot) = &self.snapshot {
            self.screen = Screen::Recap(Box::new(RecapView::new(snapshot, today_utc(), mode)));
        }
    }

    // ========================================================================
    // Preferences
    // ========================================================================

    fn save_prefs(&mut self) {
        if let Err(e) = self.prefs.save(&mut self.store) {
            tracing::warn!("Failed to save preferences: {}", e);
        }
    }

    fn set_language(&mut self, language: Language) {
        if self.prefs.language != language {
            self.prefs.language = language;
            self.translator = self.prefs.translator();
            self.save_prefs();
        }
    }

    fn set_theme(&mut self, ctx: &egui::Context, theme: Theme) {
        if self.prefs.theme != theme {
            self.prefs.theme = theme;
            apply_theme(ctx, theme);
            self.save_prefs();
        }
    }

    fn toggle_provider(&mut self, provider: Provider) {
        if let Some(pos) = self.providers.iter().position(|p| *p == provider) {
            self.providers.remove(pos);
        } else {
            self.providers.push(provider);
        }
        save_providers(&mut self.store, &self.providers);
    }

    // ========================================================================
    // Panels
    // ========================================================================

    fn render_top_panel(&mut self, ctx: &egui::Context) {
        let t = self.translator.clone();
        let mut language = self.prefs.language;
        let mut theme = self.prefs.theme;

        egui::TopBottomPanel::top("top_panel").show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.heading(format!("{} Nexus Wrap", regular::GAME_CONTROLLER));
                ui.separator();
                if self.state.is_busy() {
                    ui.spinner();
                }
                ui.label(self.state.status(&t));

                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    let icon = match theme {
                        Theme::Dark => regular::MOON,
                        Theme::Light => regular::SUN,
                    };
                    if ui.button(icon).on_hover_text(t.t("home.theme")).clicked() {
                        theme = theme.toggle();
                    }
                    if ui
                        .button(language.code().to_uppercase())
                        .on_hover_text(t.t("home.language"))
                        .clicked()
                    {
                        language = language.toggle();
                    }
                });
            });
        });

        self.set_language(language);
        self.set_theme(ctx, theme);
    }

    fn render_home(&mut self, ctx: &egui::Context) {
        let t = self.translator.clone();
        let busy = self.state.is_busy();
        let login_next = current_href();
        let mut generate = false;
        let mut open = None;
        let mut show_card = false;
        let mut dismiss = false;
        let mut toggled = None;

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

                for provider in Provider::ALL {
                    ui.horizontal(|ui| {
                        let mut selected = self.providers.contains(&provider);
                        if ui.checkbox(&mut selected, t.t(provider.label_key())).changed() {
                            toggled = Some(provider);
                        }
                        let label =
                            t.t_with("home.link", &[("provider", t.t(provider.label_key()))]);
                        ui.hyperlink_to(
                            format!("{} {}", regular::LINK, label),
                            self.endpoint.provider_login_url(provider, &login_next),
                        );
                    });
                }
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

                if self.snapshot.is_some() {
                    ui.add_space(16.0);
                    ui.horizontal(|ui| {
                        let replay = format!("{} {}", regular::PLAY, t.t("home.replay"));
                        if ui.button(replay).clicked() {
                            open = Some(PlaybackMode::Timed);
                        }
                        let browse = format!("{} {}", regular::STACK, t.t("home.browse"));
                        if ui.button(browse).clicked() {
                            open = Some(PlaybackMode::Browse);
                        }
                        let card = RichText::new(format!(
                            "{} {}",
                            regular::IDENTIFICATION_CARD,
                            t.t("home.playerCard")
                        ))
                        .color(BRAND_GREEN);
                        if ui.button(card).clicked() {
                            show_card = true;
                        }
                    });
                }
            });
        });

        if dismiss {
            self.prefs.onboarding_seen = true;
            self.save_prefs();
        }
        if let Some(provider) = toggled {
            self.toggle_provider(provider);
        }
        if generate {
            self.start_generate(ctx);
        }
        if let Some(mode) = open {
            self.open_recap(mode);
        }
        if show_card {
            self.screen = Screen::PlayerCard;
        }
    }

    fn render_player_card(&mut self, ctx: &egui::Context) {
        let t = self.translator.clone();
        let mut back = false;

        egui::CentralPanel::default().show(ctx, |ui| {
            if ui.button(format!("{} {}", regular::ARROW_LEFT, t.t("wrap.close"))).clicked() {
                back = true;
            }
            ui.separator();
            egui::ScrollArea::vertical().show(ui, |ui| match &self.snapshot {
                Some(snapshot) => render_player_card(ui, snapshot, today_utc(), &self.images, &t),
                None => {
                    ui.label(t.t("recap.noData"));
                }
            });
        });

        if back {
            self.screen = Screen::Home;
        }
    }
}

impl eframe::App for WasmApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.check_progress();

        match &mut self.screen {
            Screen::Recap(view) => {
                let outcome = view.show(ctx, &self.images, &self.translator, self.prefs.theme);
                if outcome == RecapOutcome::Closed {
                    // A finished timed Wrap leads to the player card; browsing returns home
                    let mode = view.player().mode();
                    self.screen = match mode {
                        PlaybackMode::Timed => Screen::PlayerCard,
                        PlaybackMode::Browse => Screen::Home,
                    };
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
