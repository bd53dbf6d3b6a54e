use crate::models::StatsSnapshot;
use crate::playback::{
    round1, AnimatedCounter, FrameRequest, Scene, SceneId, SceneTimeline, SCENE_DWELL_MS,
};

pub const TOTAL_TIME_COUNT_MS: f64 = 4000.0;
pub const HOURS_PER_DAY: f64 = 24.0;
/// A month counts as 30 days
pub const HOURS_PER_MONTH: f64 = 720.0;

/// Total hours with days and months derived from the same counter, so all
/// three animate together and agree at every frame.
#[derive(Debug, Clone, PartialEq)]
pub struct TotalTimeScene {
    timeline: SceneTimeline,
    hours: AnimatedCounter,
}

impl TotalTimeScene {
    pub fn new(snapshot: &StatsSnapshot) -> Self {
        Self {
            timeline: SceneTimeline::new(SCENE_DWELL_MS),
            hours: AnimatedCounter::with_target(snapshot.total_hours.round(), TOTAL_TIME_COUNT_MS),
        }
    }

    pub fn target_hours(&self) -> f64 {
        self.hours.target()
    }

    /// Whole hours shown right now
    pub fn hours(&self) -> u64 {
        self.hours.value().floor() as u64
    }

    pub fn days(&self) -> f64 {
        round1(self.hours.value() / HOURS_PER_DAY)
    }

    pub fn months(&self) -> f64 {
        round1(self.hours.value() / HOURS_PER_MONTH)
    }

    /// Sweep of the progress ring in degrees
    pub fn ring_degrees(&self) -> f64 {
        let target = self.hours.target();
        if target <= 0.0 {
            return 0.0;
        }
        (self.hours.value() / target * 360.0).clamp(0.0, 360.0)
    }
}

impl Scene for TotalTimeScene {
    fn id(&self) -> SceneId {
        SceneId::TotalTime
    }

    fn timeline(&self) -> &SceneTimeline {
        &self.timeline
    }

    fn timeline_mut(&mut self) -> &mut SceneTimeline {
        &mut self.timeline
    }

    fn tick(&mut self, now_ms: f64) -> FrameRequest {
        if !self.timeline.is_running() {
            return FrameRequest::Idle;
        }
        self.timeline.advance(now_ms);
        self.hours.tick(now_ms);
        if self.hours.is_settled() {
            self.timeline.settle();
        }
        self.timeline.frame_request()
    }

    fn pause_animations(&mut self) {
        self.hours.pause();
    }

    fn reset_animations(&mut self) {
        self.hours.reset();
    }

    fn finish_animations(&mut self) {
        self.hours.settle();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::RecapPayload;
    use crate::playback::ScenePhase;

    fn scene(total_hours: f64) -> TotalTimeScene {
        TotalTimeScene::new(&StatsSnapshot::from_payload_in_year(
            RecapPayload {
                total_hours: Some(total_hours),
                ..Default::default()
            },
            2025,
        ))
    }

    #[test]
    fn derived_units_follow_hours() {
        let mut scene = scene(240.0);
        scene.activate();
        scene.tick(0.0);
        scene.tick(TOTAL_TIME_COUNT_MS / 2.0);
        assert_eq!(scene.hours(), 120);
        assert_eq!(scene.days(), 5.0);
        assert_eq!(scene.ring_degrees(), 180.0);

        scene.tick(TOTAL_TIME_COUNT_MS);
        assert_eq!(scene.hours(), 240);
        assert_eq!(scene.days(), 10.0);
        assert_eq!(scene.months(), 0.3);
        assert_eq!(scene.ring_degrees(), 360.0);
        assert_eq!(scene.phase(), ScenePhase::Settled);
    }

    #[test]
    fn zero_hours_settles_without_ring() {
        let mut scene = scene(0.0);
        scene.activate();
        scene.tick(0.0);
        assert_eq!(scene.phase(), ScenePhase::Settled);
        assert_eq!(scene.ring_degrees(), 0.0);
        assert_eq!(scene.days(), 0.0);
    }

    #[test]
    fn completes_after_dwell() {
        let mut scene = scene(10.0);
        scene.activate();
        scene.tick(0.0);
        assert_eq!(scene.tick(SCENE_DWELL_MS - 1.0), FrameRequest::Continue);
        scene.tick(SCENE_DWELL_MS);
        assert!(scene.is_complete());
    }
}
