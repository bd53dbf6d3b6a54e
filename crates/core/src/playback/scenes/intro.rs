use chrono::{Datelike, NaiveDate};

use crate::models::StatsSnapshot;
use crate::playback::{
    window_progress, FrameRequest, Scene, SceneId, SceneTimeline, SCENE_DWELL_MS,
};

/// Length of each intro step (level, creation date, years active)
pub const INTRO_STEP_MS: f64 = 1500.0;
/// First year on the rolling year reel
pub const REEL_FIRST_YEAR: i32 = 2004;

const INTRO_REVEAL_MS: f64 = INTRO_STEP_MS * 3.0;

/// Position of the three date reels.
///
/// Indices are zero-based offsets into their reel: day 0 is "01", month 0 is
/// the first month abbreviation, year 0 is `first_year`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateReel {
    pub day_index: u32,
    pub month_index: u32,
    pub year_index: u32,
    pub first_year: i32,
}

impl DateReel {
    pub fn day(&self) -> u32 {
        self.day_index + 1
    }

    pub fn year(&self) -> i32 {
        self.first_year + self.year_index as i32
    }
}

/// Profile level, then the creation date on rolling reels, then years active.
///
/// The three steps run in fixed non-overlapping windows. A missing value shows
/// a placeholder for its window without delaying the others.
#[derive(Debug, Clone, PartialEq)]
pub struct IntroScene {
    timeline: SceneTimeline,
    persona_name: Option<String>,
    avatar_url: Option<String>,
    level: Option<u32>,
    created: Option<NaiveDate>,
    years_active: Option<u32>,
    reveal_ms: f64,
}

impl IntroScene {
    pub fn new(snapshot: &StatsSnapshot, today: NaiveDate) -> Self {
        Self {
            timeline: SceneTimeline::new(SCENE_DWELL_MS),
            persona_name: snapshot.profile.persona_name.clone(),
            avatar_url: snapshot.profile.avatar_url.clone(),
            level: snapshot.profile.level,
            created: snapshot.profile.created_at.map(|dt| dt.date_naive()),
            years_active: snapshot.years_active(today),
            reveal_ms: 0.0,
        }
    }

    pub fn persona_name(&self) -> Option<&str> {
        self.persona_name.as_deref()
    }

    pub fn avatar_url(&self) -> Option<&str> {
        self.avatar_url.as_deref()
    }

    pub fn created(&self) -> Option<NaiveDate> {
        self.created
    }

    pub fn level_target(&self) -> Option<u32> {
        self.level
    }

    /// Rolling level value, `None` when the profile has no level
    pub fn level_value(&self) -> Option<f64> {
        let progress = window_progress(self.reveal_ms, 0.0, INTRO_STEP_MS);
        self.level.map(|level| level as f64 * progress)
    }

    pub fn date_reel(&self) -> Option<DateReel> {
        let progress = window_progress(self.reveal_ms, INTRO_STEP_MS, INTRO_STEP_MS);
        self.created.map(|date| {
            let first_year = REEL_FIRST_YEAR.min(date.year());
            let roll = |target: u32| (target as f64 * progress).floor() as u32;
            DateReel {
                day_index: roll(date.day0()),
                month_index: roll(date.month0()),
                year_index: roll((date.year() - first_year) as u32),
                first_year,
            }
        })
    }

    pub fn years_target(&self) -> Option<u32> {
        self.years_active
    }

    pub fn years_value(&self) -> Option<f64> {
        let progress = window_progress(self.reveal_ms, INTRO_STEP_MS * 2.0, INTRO_STEP_MS);
        self.years_active.map(|years| years as f64 * progress)
    }

    fn reveal_duration(&self) -> f64 {
        if self.level.is_none() && self.created.is_none() && self.years_active.is_none() {
            0.0
        } else {
            INTRO_REVEAL_MS
        }
    }
}

impl Scene for IntroScene {
    fn id(&self) -> SceneId {
        SceneId::Intro
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
        let elapsed = self.timeline.advance(now_ms);
        self.reveal_ms = elapsed.min(INTRO_REVEAL_MS);
        if self.reveal_ms >= self.reveal_duration() {
            self.timeline.settle();
        }
        self.timeline.frame_request()
    }

    fn pause_animations(&mut self) {}

    fn reset_animations(&mut self) {
        self.reveal_ms = 0.0;
    }

    fn finish_animations(&mut self) {
        self.reveal_ms = INTRO_REVEAL_MS;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::RecapPayload;
    use crate::playback::ScenePhase;

    fn snapshot(level: Option<f64>, created: Option<f64>) -> StatsSnapshot {
        StatsSnapshot::from_payload_in_year(
            RecapPayload {
                steam_profile_level: level,
                steam_profile_created_at: created,
                ..Default::default()
            },
            2025,
        )
    }

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 12, 1).unwrap()
    }

    #[test]
    fn steps_run_in_sequence() {
        // 2015-06-15
        let mut scene = IntroScene::new(&snapshot(Some(42.0), Some(1_434_326_400.0)), today());
        scene.activate();
        scene.tick(0.0);
        scene.tick(750.0);
        assert_eq!(scene.level_value(), Some(21.0));
        assert_eq!(scene.date_reel().map(|r| r.year_index), Some(0));
        assert_eq!(scene.years_value(), Some(0.0));

        scene.tick(3000.0);
        assert_eq!(scene.level_value(), Some(42.0));
        let reel = scene.date_reel().unwrap();
        assert_eq!((reel.day(), reel.month_index, reel.year()), (15, 5, 2015));
        assert_eq!(scene.phase(), ScenePhase::Revealing);

        scene.tick(4500.0);
        assert_eq!(scene.years_value(), Some(10.0));
        assert_eq!(scene.phase(), ScenePhase::Settled);
    }

    #[test]
    fn missing_creation_date_does_not_block_level() {
        let mut scene = IntroScene::new(&snapshot(Some(7.0), None), today());
        scene.activate();
        scene.tick(0.0);
        scene.tick(1500.0);
        assert_eq!(scene.level_value(), Some(7.0));
        assert_eq!(scene.date_reel(), None);
        assert_eq!(scene.years_value(), None);
        scene.tick(4500.0);
        assert_eq!(scene.phase(), ScenePhase::Settled);
    }

    #[test]
    fn nothing_to_reveal_settles_on_first_frame() {
        let mut scene = IntroScene::new(&snapshot(None, None), today());
        scene.activate();
        scene.tick(0.0);
        assert_eq!(scene.phase(), ScenePhase::Settled);
        assert!(!scene.is_complete(), "still dwelling");
    }

    #[test]
    fn final_shows_end_values() {
        let mut scene = IntroScene::new(&snapshot(Some(42.0), Some(1_434_326_400.0)), today());
        scene.show_final();
        assert_eq!(scene.level_value(), Some(42.0));
        assert_eq!(scene.years_value(), Some(10.0));
        assert_eq!(scene.tick(0.0), FrameRequest::Idle);
    }
}
