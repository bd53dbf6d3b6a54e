use crate::models::{GenreShare, StatsSnapshot};
use crate::playback::{
    round1, sliced_reveal_count, FrameRequest, Scene, SceneId, SceneTimeline, SCENE_DWELL_MS,
};

pub const GENRE_REVEAL_MS: f64 = 2400.0;
pub const TOP_GENRE_COUNT: usize = 3;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GenreLabel {
    Named(String),
    /// Everything outside the top genres; localized at render time
    Other,
}

#[derive(Debug, Clone, PartialEq)]
pub struct GenreRow {
    pub label: GenreLabel,
    pub percent: f64,
}

impl GenreRow {
    /// Bar fill, 0..=1
    pub fn fill(&self) -> f32 {
        (self.percent / 100.0).clamp(0.0, 1.0) as f32
    }
}

/// Top genres by share plus an "Other" row for the remainder.
///
/// The remainder is `100 - sum(top)` rounded to one decimal and never negative,
/// even when the backend's shares add up to more than 100.
pub fn genre_rows(genres: &[GenreShare]) -> Vec<GenreRow> {
    if genres.is_empty() {
        return Vec::new();
    }
    let mut sorted: Vec<&GenreShare> = genres.iter().collect();
    sorted.sort_by(|a, b| {
        b.percent
            .partial_cmp(&a.percent)
            .unwrap_or(std::cmp::Ordering::Equal)
    });

    let mut rows: Vec<GenreRow> = sorted
        .into_iter()
        .take(TOP_GENRE_COUNT)
        .map(|g| GenreRow {
            label: GenreLabel::Named(g.name.clone()),
            percent: g.percent,
        })
        .collect();
    let top_sum: f64 = rows.iter().map(|r| r.percent).sum();
    rows.push(GenreRow {
        label: GenreLabel::Other,
        percent: round1(100.0 - top_sum).max(0.0),
    });
    rows
}

/// Genre bars revealed in slices over one timeline
#[derive(Debug, Clone, PartialEq)]
pub struct TopGenresScene {
    timeline: SceneTimeline,
    rows: Vec<GenreRow>,
    visible: usize,
}

impl TopGenresScene {
    pub fn new(snapshot: &StatsSnapshot) -> Self {
        Self {
            timeline: SceneTimeline::new(SCENE_DWELL_MS),
            rows: genre_rows(&snapshot.top_genres),
            visible: 0,
        }
    }

    pub fn rows(&self) -> &[GenreRow] {
        &self.rows
    }

    /// Rows revealed so far
    pub fn visible_rows(&self) -> &[GenreRow] {
        &self.rows[..self.visible.min(self.rows.len())]
    }

    pub fn has_data(&self) -> bool {
        !self.rows.is_empty()
    }
}

impl Scene for TopGenresScene {
    fn id(&self) -> SceneId {
        SceneId::TopGenres
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
        self.visible = sliced_reveal_count(elapsed, GENRE_REVEAL_MS, self.rows.len());
        if self.visible == self.rows.len() {
            self.timeline.settle();
        }
        self.timeline.frame_request()
    }

    fn pause_animations(&mut self) {}

    fn reset_animations(&mut self) {
        self.visible = 0;
    }

    fn finish_animations(&mut self) {
        self.visible = self.rows.len();
    }
}
