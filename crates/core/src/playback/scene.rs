use serde::{Deserialize, Serialize};

use super::{FrameClock, FrameRequest};

/// The five scenes of a Wrap, in playback order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SceneId {
    Intro,
    TotalTime,
    TopGenres,
    TopGames,
    Trophies,
}

impl SceneId {
    pub const ALL: [SceneId; 5] = [
        SceneId::Intro,
        SceneId::TotalTime,
        SceneId::TopGenres,
        SceneId::TopGames,
        SceneId::Trophies,
    ];

    pub fn key(&self) -> &'static str {
        match self {
            SceneId::Intro => "intro",
            SceneId::TotalTime => "total_time",
            SceneId::TopGenres => "top_genres",
            SceneId::TopGames => "top_games",
            SceneId::Trophies => "trophies",
        }
    }

    pub fn title_key(&self) -> &'static str {
        match self {
            SceneId::Intro => "recap.introTitle",
            SceneId::TotalTime => "recap.totalGamingTimeTitle",
            SceneId::TopGenres => "recap.topGenresTitle",
            SceneId::TopGames => "recap.topGamesTitle",
            SceneId::Trophies => "recap.steamTrophiesTitle",
        }
    }
}

/// Lifecycle of a scene.
///
/// `Idle` -> `Revealing` on activation, `Revealing` -> `Settled` once every
/// counter has reached its target. `Final` shows end values with no animation
/// and is only left through `deactivate`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ScenePhase {
    #[default]
    Idle,
    Revealing,
    Settled,
    Final,
}

/// Phase, clock and dwell time shared by every scene
#[derive(Debug, Clone, PartialEq)]
pub struct SceneTimeline {
    phase: ScenePhase,
    clock: FrameClock,
    dwell_ms: f64,
}

impl SceneTimeline {
    pub fn new(dwell_ms: f64) -> Self {
        Self {
            phase: ScenePhase::Idle,
            clock: FrameClock::new(),
            dwell_ms: dwell_ms.max(0.0),
        }
    }

    pub fn phase(&self) -> ScenePhase {
        self.phase
    }

    pub fn dwell_ms(&self) -> f64 {
        self.dwell_ms
    }

    pub fn elapsed_ms(&self) -> f64 {
        self.clock.elapsed_ms()
    }

    /// Whether the scene is playing (revealing or dwelling after settling)
    pub fn is_running(&self) -> bool {
        matches!(self.phase, ScenePhase::Revealing | ScenePhase::Settled)
    }

    pub fn activate(&mut self) {
        self.clock.reset();
        self.phase = ScenePhase::Revealing;
    }

    pub fn deactivate(&mut self) {
        self.clock.reset();
        self.phase = ScenePhase::Idle;
    }

    pub fn show_final(&mut self) {
        self.phase = ScenePhase::Final;
    }

    /// Advance the clock while running; returns elapsed time since activation
    pub fn advance(&mut self, now_ms: f64) -> f64 {
        if self.is_running() {
            self.clock.advance(now_ms);
        }
        self.clock.elapsed_ms()
    }

    pub fn pause(&mut self) {
        self.clock.pause();
    }

    /// Mark the reveal as done; no effect outside `Revealing`
    pub fn settle(&mut self) {
        if self.phase == ScenePhase::Revealing {
            self.phase = ScenePhase::Settled;
        }
    }

    /// 0..=1 through the dwell window; `Final` always reads 1
    pub fn progress(&self) -> f64 {
        match self.phase {
            ScenePhase::Idle => 0.0,
            ScenePhase::Final => 1.0,
            ScenePhase::Revealing | ScenePhase::Settled => {
                if self.dwell_ms <= 0.0 {
                    return 1.0;
                }
                (self.clock.elapsed_ms() / self.dwell_ms).clamp(0.0, 1.0)
            }
        }
    }

    /// Settled and the dwell time has passed
    pub fn is_complete(&self) -> bool {
        match self.phase {
            ScenePhase::Settled => self.clock.elapsed_ms() >= self.dwell_ms,
            ScenePhase::Final => true,
            ScenePhase::Idle | ScenePhase::Revealing => false,
        }
    }

    /// Frames are needed until the scene completes
    pub fn frame_request(&self) -> FrameRequest {
        if self.is_running() && !self.is_complete() {
            FrameRequest::Continue
        } else {
            FrameRequest::Idle
        }
    }
}

/// Behaviour every scene provides to the player.
///
/// Implementors own their counters and reveal state; the provided methods
/// keep the shared timeline and the counters in step.
pub trait Scene {
    fn id(&self) -> SceneId;

    fn timeline(&self) -> &SceneTimeline;

    fn timeline_mut(&mut self) -> &mut SceneTimeline;

    /// Advance animations to `now_ms`. Does nothing unless the scene is running.
    fn tick(&mut self, now_ms: f64) -> FrameRequest;

    /// Drop frame anchors so the next tick resumes without a jump
    fn pause_animations(&mut self);

    /// Rewind every counter and reveal to its starting state
    fn reset_animations(&mut self);

    /// Jump every counter and reveal to its end state
    fn finish_animations(&mut self);

    fn phase(&self) -> ScenePhase {
        self.timeline().phase()
    }

    fn activate(&mut self) {
        self.reset_animations();
        self.timeline_mut().activate();
    }

    fn deactivate(&mut self) {
        self.reset_animations();
        self.timeline_mut().deactivate();
    }

    fn show_final(&mut self) {
        self.finish_animations();
        self.timeline_mut().show_final();
    }

    fn pause(&mut self) {
        self.pause_animations();
        self.timeline_mut().pause();
    }

    fn progress(&self) -> f64 {
        self.timeline().progress()
    }

    fn is_complete(&self) -> bool {
        self.timeline().is_complete()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn timeline_completes_after_settle_and_dwell() {
        let mut timeline = SceneTimeline::new(1000.0);
        assert_eq!(timeline.progress(), 0.0);
        timeline.activate();
        timeline.advance(0.0);
        timeline.advance(1200.0);
        assert!(!timeline.is_complete(), "still revealing");
        timeline.settle();
        assert!(timeline.is_complete());
        assert_eq!(timeline.progress(), 1.0);
        assert_eq!(timeline.frame_request(), FrameRequest::Idle);
    }

    #[test]
    fn idle_timeline_ignores_frames() {
        let mut timeline = SceneTimeline::new(1000.0);
        timeline.advance(0.0);
        timeline.advance(500.0);
        assert_eq!(timeline.elapsed_ms(), 0.0);
        timeline.settle();
        assert_eq!(timeline.phase(), ScenePhase::Idle);
    }

    #[test]
    fn final_reads_complete() {
        let mut timeline = SceneTimeline::new(1000.0);
        timeline.show_final();
        assert_eq!(timeline.progress(), 1.0);
        assert!(timeline.is_complete());
        timeline.deactivate();
        assert_eq!(timeline.phase(), ScenePhase::Idle);
    }
}
