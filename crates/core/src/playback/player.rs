use std::collections::VecDeque;

use chrono::NaiveDate;

use super::{FrameRequest, NavDirection, Scene, SceneId, SceneSlot};
use crate::models::StatsSnapshot;

/// How long a settled scene stays on screen before auto-advancing
pub const SCENE_DWELL_MS: f64 = 6000.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PlaybackMode {
    /// Scenes animate and advance on their own
    #[default]
    Timed,
    /// Every scene shows its final state; navigation is manual
    Browse,
}

/// Notifications for the host, drained through `ScenePlayer::poll_events`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlayerEvent {
    Advanced { from: usize, to: usize, scene: SceneId },
    Completed,
}

/// Sequences scenes, owns pause state and decides when to move on.
///
/// Exactly one scene is active at a time. Completion is reported once; after
/// that every operation is a no-op.
#[derive(Debug, Clone, PartialEq)]
pub struct ScenePlayer {
    scenes: Vec<SceneSlot>,
    active: usize,
    mode: PlaybackMode,
    paused: bool,
    finished: bool,
    /// Cleared when the active scene has triggered its auto-advance
    advance_armed: bool,
    events: VecDeque<PlayerEvent>,
}

impl ScenePlayer {
    pub fn new(scenes: Vec<SceneSlot>, mode: PlaybackMode) -> Self {
        let mut player = Self {
            scenes,
            active: 0,
            mode,
            paused: mode == PlaybackMode::Browse,
            finished: false,
            advance_armed: true,
            events: VecDeque::new(),
        };

        if player.scenes.is_empty() {
            player.complete();
            return player;
        }
        match mode {
            PlaybackMode::Timed => player.scenes[0].scene_mut().activate(),
            PlaybackMode::Browse => {
                for slot in &mut player.scenes {
                    slot.scene_mut().show_final();
                }
            }
        }
        player
    }

    /// Player over every scene built from `snapshot`
    pub fn from_snapshot(snapshot: &StatsSnapshot, today: NaiveDate, mode: PlaybackMode) -> Self {
        Self::new(SceneSlot::build_all(snapshot, today), mode)
    }

    pub fn scenes(&self) -> &[SceneSlot] {
        &self.scenes
    }

    pub fn scene_count(&self) -> usize {
        self.scenes.len()
    }

    pub fn active_index(&self) -> usize {
        self.active
    }

    pub fn active_scene(&self) -> Option<&SceneSlot> {
        self.scenes.get(self.active)
    }

    pub fn mode(&self) -> PlaybackMode {
        self.mode
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    pub fn is_finished(&self) -> bool {
        self.finished
    }

    /// Progress of the active scene, 0..=1
    pub fn progress(&self) -> f64 {
        self.active_scene()
            .map(|slot| slot.scene().progress())
            .unwrap_or(1.0)
    }

    /// Fill for the progress segment of scene `index`
    pub fn segment_progress(&self, index: usize) -> f64 {
        if self.finished || index < self.active {
            1.0
        } else if index == self.active {
            self.progress()
        } else {
            0.0
        }
    }

    /// Move to the next scene, or complete after the last one
    pub fn advance(&mut self) {
        if self.finished {
            return;
        }
        if self.active + 1 < self.scenes.len() {
            self.switch_to(self.active + 1);
        } else {
            self.complete();
        }
    }

    /// Move to the previous scene; no-op on the first
    pub fn retreat(&mut self) {
        if self.finished || self.active == 0 {
            return;
        }
        self.switch_to(self.active - 1);
    }

    /// Activate scene `index` (clamped). Jumping to the active scene does nothing.
    pub fn jump_to(&mut self, index: usize) {
        if self.finished || self.scenes.is_empty() {
            return;
        }
        let index = index.min(self.scenes.len() - 1);
        if index != self.active {
            self.switch_to(index);
        }
    }

    /// One navigation step from a gesture or key.
    ///
    /// While timed, stepping past the last scene completes the player; in
    /// browse mode the index is clamped instead.
    pub fn navigate(&mut self, direction: NavDirection) {
        match (direction, self.mode) {
            (NavDirection::Next, PlaybackMode::Timed) => self.advance(),
            (NavDirection::Next, PlaybackMode::Browse) => self.jump_to(self.active + 1),
            (NavDirection::Previous, _) => self.retreat(),
        }
    }

    pub fn toggle_pause(&mut self) {
        self.set_paused(!self.paused);
    }

    pub fn set_paused(&mut self, paused: bool) {
        if self.finished || self.paused == paused {
            return;
        }
        self.paused = paused;
        if paused {
            if let Some(slot) = self.scenes.get_mut(self.active) {
                slot.scene_mut().pause();
            }
        }
        tracing::debug!(paused, scene = self.active, "Playback pause toggled");
    }

    /// End the presentation immediately
    pub fn skip(&mut self) {
        self.complete();
    }

    pub fn close(&mut self) {
        self.complete();
    }

    /// Feed a frame timestamp to the active scene and auto-advance when it
    /// completes. Returns whether another frame is wanted.
    pub fn tick(&mut self, now_ms: f64) -> FrameRequest {
        if self.finished || self.paused || self.mode == PlaybackMode::Browse {
            return FrameRequest::Idle;
        }
        let Some(slot) = self.scenes.get_mut(self.active) else {
            return FrameRequest::Idle;
        };
        let request = slot.scene_mut().tick(now_ms);
        if self.advance_armed && slot.scene().is_complete() {
            self.advance_armed = false;
            self.advance();
            return if self.finished {
                FrameRequest::Idle
            } else {
                FrameRequest::Continue
            };
        }
        request
    }

    /// Drain pending notifications
    pub fn poll_events(&mut self) -> Vec<PlayerEvent> {
        self.events.drain(..).collect()
    }

    fn switch_to(&mut self, index: usize) {
        let from = self.active;
        if self.mode == PlaybackMode::Timed {
            self.scenes[from].scene_mut().deactivate();
            self.scenes[index].scene_mut().activate();
        }
        self.active = index;
        self.advance_armed = true;

        let scene = self.scenes[index].id();
        tracing::debug!(from, to = index, scene = scene.key(), "Scene advanced");
        self.events.push_back(PlayerEvent::Advanced {
            from,
            to: index,
            scene,
        });
    }

    fn complete(&mut self) {
        if self.finished {
            return;
        }
        self.finished = true;
        self.paused = false;
        tracing::info!(scene = self.active, "Presentation completed");
        self.events.push_back(PlayerEvent::Completed);
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::playback::scenes::TOTAL_TIME_COUNT_MS;
    use crate::playback::ScenePhase;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 12, 1).unwrap()
    }

    fn player(mode: PlaybackMode) -> ScenePlayer {
        let snapshot = StatsSnapshot {
            total_hours: 240.0,
            ..Default::default()
        };
        ScenePlayer::from_snapshot(&snapshot, today(), mode)
    }

    /// Tick in 16 ms frames from `start` until `end`
    fn run(player: &mut ScenePlayer, start: f64, end: f64) -> f64 {
        let mut now = start;
        while now < end {
            player.tick(now);
            now += 16.0;
        }
        now
    }

    #[test]
    fn starts_on_the_first_scene() {
        let player = player(PlaybackMode::Timed);
        assert_eq!(player.scene_count(), 5);
        assert_eq!(player.active_index(), 0);
        assert_eq!(
            player.active_scene().map(|s| s.scene().phase()),
            Some(ScenePhase::Revealing)
        );
        assert_eq!(player.segment_progress(3), 0.0);
    }

    #[test]
    fn auto_advances_once_per_scene() {
        let mut player = player(PlaybackMode::Timed);
        run(&mut player, 0.0, SCENE_DWELL_MS + 32.0);
        assert_eq!(player.active_index(), 1);
        assert_eq!(
            player.poll_events(),
            vec![PlayerEvent::Advanced {
                from: 0,
                to: 1,
                scene: SceneId::TotalTime
            }]
        );
        assert_eq!(player.segment_progress(0), 1.0);
        assert!(player.poll_events().is_empty());
    }

    #[test]
    fn plays_through_and_completes_once() {
        let mut player = player(PlaybackMode::Timed);
        run(&mut player, 0.0, SCENE_DWELL_MS * 6.0);
        assert!(player.is_finished());
        let events = player.poll_events();
        let completions = events
            .iter()
            .filter(|e| **e == PlayerEvent::Completed)
            .count();
        assert_eq!(completions, 1);
        assert_eq!(events.len(), 5);
        assert_eq!(player.tick(1_000_000.0), FrameRequest::Idle);
    }

    #[test]
    fn skip_and_close_complete_immediately() {
        let mut player = player(PlaybackMode::Timed);
        player.skip();
        player.close();
        player.advance();
        assert_eq!(player.poll_events(), vec![PlayerEvent::Completed]);
        assert_eq!(player.active_index(), 0);
    }

    #[test]
    fn jump_to_is_idempotent_and_clamped() {
        let mut player = player(PlaybackMode::Timed);
        player.jump_to(2);
        player.jump_to(2);
        assert_eq!(player.poll_events().len(), 1);
        player.jump_to(99);
        assert_eq!(player.active_index(), 4);
        assert_eq!(
            player.scenes()[2].scene().phase(),
            ScenePhase::Idle,
            "left scenes are reset"
        );
    }

    fn shown_hours(player: &ScenePlayer) -> u64 {
        match &player.scenes()[1] {
            SceneSlot::TotalTime(scene) => scene.hours(),
            _ => panic!("total time is the second scene"),
        }
    }

    #[test]
    fn leaving_a_scene_rewinds_its_counters() {
        let mut player = player(PlaybackMode::Timed);
        player.jump_to(1);
        run(&mut player, 0.0, TOTAL_TIME_COUNT_MS / 2.0);
        let partway = shown_hours(&player);
        assert!(partway > 0 && partway < 240, "counter mid-run, got {}", partway);

        player.jump_to(2);
        assert_eq!(shown_hours(&player), 0);

        // Coming back starts the count again from zero
        player.jump_to(1);
        player.tick(10_000.0);
        assert_eq!(shown_hours(&player), 0);
        player.tick(10_000.0 + TOTAL_TIME_COUNT_MS / 4.0);
        assert_eq!(shown_hours(&player), 60);
    }

    #[test]
    fn retreat_on_first_scene_is_noop() {
        let mut player = player(PlaybackMode::Timed);
        player.retreat();
        assert_eq!(player.active_index(), 0);
        assert!(player.poll_events().is_empty());
    }

    #[test]
    fn advance_past_last_completes() {
        let mut player = player(PlaybackMode::Timed);
        player.jump_to(4);
        player.advance();
        assert!(player.is_finished());
    }

    #[test]
    fn paused_player_ignores_frames() {
        let mut player = player(PlaybackMode::Timed);
        player.tick(0.0);
        player.tick(1000.0);
        player.toggle_pause();
        assert_eq!(player.tick(50_000.0), FrameRequest::Idle);
        player.toggle_pause();
        player.tick(60_000.0);
        let progress = player.progress();
        assert!((progress - 1000.0 / SCENE_DWELL_MS).abs() < 1e-9);
    }

    #[test]
    fn browse_mode_shows_final_states() {
        let mut player = player(PlaybackMode::Browse);
        assert!(player.is_paused());
        assert!(player
            .scenes()
            .iter()
            .all(|s| s.scene().phase() == ScenePhase::Final));
        assert_eq!(player.tick(10_000.0), FrameRequest::Idle);

        player.navigate(NavDirection::Next);
        assert_eq!(player.active_index(), 1);
        player.jump_to(4);
        player.navigate(NavDirection::Next);
        assert_eq!(player.active_index(), 4);
        assert!(!player.is_finished());
        assert_eq!(
            player.scenes()[0].scene().phase(),
            ScenePhase::Final,
            "browse never resets scenes"
        );
    }

    #[test]
    fn empty_player_is_finished() {
        let mut player = ScenePlayer::new(Vec::new(), PlaybackMode::Timed);
        assert!(player.is_finished());
        assert_eq!(player.poll_events(), vec![PlayerEvent::Completed]);
        player.jump_to(3);
        assert_eq!(player.tick(0.0), FrameRequest::Idle);
    }
}
