//! Scene playback engine
//!
//! Everything here is driven by frame timestamps (milliseconds, monotonic)
//! handed in by the UI loop. Nothing reads a wall clock, so the engine runs
//! identically on desktop, in the browser and in tests.

mod clock;
mod counter;
mod gesture;
mod player;
mod reveal;
mod scene;
pub mod scenes;

pub use clock::FrameClock;
pub use counter::{AnimatedCounter, CounterStart};
pub use gesture::{
    GestureNavigator, NavDirection, NAVIGATION_COOLDOWN_MS, SWIPE_THRESHOLD_PX, WHEEL_THRESHOLD_PX,
};
pub use player::{PlaybackMode, PlayerEvent, ScenePlayer, SCENE_DWELL_MS};
pub use reveal::{sliced_reveal_count, window_progress, ChainedReveal, ItemPhase, RevealOrder};
pub use scene::{Scene, SceneId, ScenePhase, SceneTimeline};
pub use scenes::SceneSlot;

/// Whether a component wants another animation frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameRequest {
    Continue,
    Idle,
}

impl FrameRequest {
    pub fn needs_frame(&self) -> bool {
        matches!(self, FrameRequest::Continue)
    }

    /// `Continue` if either side wants a frame
    pub fn merge(self, other: FrameRequest) -> FrameRequest {
        if self.needs_frame() || other.needs_frame() {
            FrameRequest::Continue
        } else {
            FrameRequest::Idle
        }
    }
}

/// Round to one decimal place
pub fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}
