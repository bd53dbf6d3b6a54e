//! Presentation shell around the scene player
//!
//! Owns the player and the gesture navigator, turns egui input into player
//! operations and draws the chrome (progress segments, pause, skip, close)
//! around the active scene. Desktop and web both drive it the same way.

use chrono::NaiveDate;
use egui::{self, Color32, Context, Key, RichText, Ui};
use egui_phosphor::regular;

use super::scenes::render_scene;
use super::theme::{scene_background, BRAND_GREEN, MUTED};
use super::WrapPlatform;
use crate::i18n::Translator;
use crate::models::StatsSnapshot;
use crate::playback::{GestureNavigator, NavDirection, PlaybackMode, PlayerEvent, ScenePlayer};
use crate::prefs::Theme;

/// Whether the view should stay on screen
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecapOutcome {
    Open,
    Closed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ChromeAction {
    TogglePause,
    Skip,
    Close,
    Previous,
    Next,
}

pub struct RecapView {
    player: ScenePlayer,
    gestures: GestureNavigator,
}

impl RecapView {
    pub fn new(snapshot: &StatsSnapshot, today: NaiveDate, mode: PlaybackMode) -> Self {
        tracing::info!(?mode, year = snapshot.year, "Starting recap presentation");
        Self {
            player: ScenePlayer::from_snapshot(snapshot, today, mode),
            gestures: GestureNavigator::default(),
        }
    }

    pub fn player(&self) -> &ScenePlayer {
        &self.player
    }

    /// Draw one frame. Returns `Closed` once the presentation has completed.
    pub fn show<P: WrapPlatform>(
        &mut self,
        ctx: &Context,
        platform: &P,
        t: &Translator,
        theme: Theme,
    ) -> RecapOutcome {
        let now_ms = ctx.input(|i| i.time) * 1000.0;
        self.handle_input(ctx, now_ms);
        let request = self.player.tick(now_ms);
        self.log_events();
        if self.player.is_finished() {
            return RecapOutcome::Closed;
        }

        let background = self
            .player
            .active_scene()
            .map(|slot| scene_background(slot.id(), theme))
            .unwrap_or(Color32::BLACK);

        let mut action = None;
        egui::CentralPanel::default()
            .frame(egui::Frame::new().fill(background).inner_margin(24.0))
            .show(ctx, |ui| {
                action = self.render_chrome(ui, t);
                ui.add_space(24.0);
                egui::ScrollArea::vertical().show(ui, |ui| {
                    if let Some(slot) = self.player.active_scene() {
                        render_scene(ui, slot, platform, t);
                    }
                });
            });

        if let Some(action) = action {
            self.apply(action);
            self.log_events();
        }
        if request.needs_frame() {
            ctx.request_repaint();
        }

        if self.player.is_finished() {
            RecapOutcome::Closed
        } else {
            RecapOutcome::Open
        }
    }

    fn handle_input(&mut self, ctx: &Context, now_ms: f64) {
        let (escape, space, right, left, scroll, events) = ctx.input(|i| {
            (
                i.key_pressed(Key::Escape),
                i.key_pressed(Key::Space),
                i.key_pressed(Key::ArrowRight),
                i.key_pressed(Key::ArrowLeft),
                i.raw_scroll_delta,
                i.events.clone(),
            )
        });

        if escape {
            self.player.close();
            return;
        }
        if space {
            self.player.toggle_pause();
        }
        if right {
            self.player.navigate(NavDirection::Next);
        }
        if left {
            self.player.navigate(NavDirection::Previous);
        }

        // egui reports scrolling down as negative y
        if scroll != egui::Vec2::ZERO {
            if let Some(direction) =
                self.gestures
                    .on_wheel(-scroll.x as f64, -scroll.y as f64, now_ms)
            {
                self.player.navigate(direction);
            }
        }

        for event in events {
            if let egui::Event::Touch { phase, pos, .. } = event {
                match phase {
                    egui::TouchPhase::Start => {
                        self.gestures.touch_start(pos.x as f64, pos.y as f64)
                    }
                    egui::TouchPhase::Move => self.gestures.touch_move(pos.x as f64, pos.y as f64),
                    egui::TouchPhase::End => {
                        if let Some(direction) = self.gestures.touch_end(now_ms) {
                            self.player.navigate(direction);
                        }
                    }
                    egui::TouchPhase::Cancel => self.gestures.touch_cancel(),
                }
            }
        }
    }

    fn render_chrome(&self, ui: &mut Ui, t: &Translator) -> Option<ChromeAction> {
        let mut action = None;
        render_segments(ui, &self.player);
        ui.add_space(8.0);

        ui.horizontal(|ui| {
            if self.player.mode() == PlaybackMode::Timed {
                let (icon, label) = if self.player.is_paused() {
                    (regular::PLAY, t.t("recap.resume"))
                } else {
                    (regular::PAUSE, t.t("recap.pause"))
                };
                if ui.button(format!("{} {}", icon, label)).clicked() {
                    action = Some(ChromeAction::TogglePause);
                }
                if ui
                    .button(format!("{} {}", regular::SKIP_FORWARD, t.t("recap.skip")))
                    .clicked()
                {
                    action = Some(ChromeAction::Skip);
                }
            } else {
                if ui
                    .button(format!("{} {}", regular::CARET_LEFT, t.t("wrap.previous")))
                    .clicked()
                {
                    action = Some(ChromeAction::Previous);
                }
                if ui
                    .button(format!("{} {}", regular::CARET_RIGHT, t.t("wrap.next")))
                    .clicked()
                {
                    action = Some(ChromeAction::Next);
                }
                ui.label(RichText::new(t.t("wrap.hint")).small().color(MUTED));
            }

            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                if ui
                    .button(format!("{} {}", regular::X, t.t("wrap.close")))
                    .clicked()
                {
                    action = Some(ChromeAction::Close);
                }
            });
        });
        action
    }

    fn apply(&mut self, action: ChromeAction) {
        match action {
            ChromeAction::TogglePause => self.player.toggle_pause(),
            ChromeAction::Skip => self.player.skip(),
            ChromeAction::Close => self.player.close(),
            ChromeAction::Previous => self.player.navigate(NavDirection::Previous),
            ChromeAction::Next => self.player.navigate(NavDirection::Next),
        }
    }

    fn log_events(&mut self) {
        for event in self.player.poll_events() {
            match event {
                PlayerEvent::Advanced { from, to, scene } => {
                    tracing::debug!(from, to, scene = scene.key(), "Recap moved to scene");
                }
                PlayerEvent::Completed => tracing::info!("Recap presentation finished"),
            }
        }
    }
}

/// One bar per scene: past scenes full, the active one by progress
fn render_segments(ui: &mut Ui, player: &ScenePlayer) {
    let count = player.scene_count().max(1);
    let gap = 6.0;
    let height = 4.0;
    let (rect, _) = ui.allocate_exact_size(
        egui::vec2(ui.available_width(), height),
        egui::Sense::hover(),
    );
    let width = (rect.width() - gap * (count - 1) as f32) / count as f32;
    let painter = ui.painter_at(rect);

    for index in 0..player.scene_count() {
        let left = rect.left() + index as f32 * (width + gap);
        let track =
            egui::Rect::from_min_size(egui::pos2(left, rect.top()), egui::vec2(width, height));
        painter.rect_filled(track, 2.0, Color32::from_white_alpha(40));

        let fill = player.segment_progress(index).clamp(0.0, 1.0) as f32;
        if fill > 0.0 {
            let filled = egui::Rect::from_min_size(track.min, egui::vec2(width * fill, height));
            painter.rect_filled(filled, 2.0, BRAND_GREEN);
        }
    }
}
