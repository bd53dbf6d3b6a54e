//! The concrete Wrap scenes
//!
//! Each scene is built once from a `StatsSnapshot` and owns every counter it
//! animates. `SceneSlot` is the closed set the player and the renderers work
//! with.

mod genres;
mod intro;
mod top_games;
mod total_time;
mod trophies;

use chrono::NaiveDate;

pub use genres::{
    genre_rows, GenreLabel, GenreRow, TopGenresScene, GENRE_REVEAL_MS, TOP_GENRE_COUNT,
};
pub use intro::{DateReel, IntroScene, INTRO_STEP_MS, REEL_FIRST_YEAR};
pub use top_games::{
    TopGamesScene, GAME_COUNT_MS, HIGHLIGHT_COUNT, HIGHLIGHT_REVEAL_MS, RECENT_HOURS_MS,
    TOP_GAME_COUNT,
};
pub use total_time::{TotalTimeScene, HOURS_PER_DAY, HOURS_PER_MONTH, TOTAL_TIME_COUNT_MS};
pub use trophies::{
    group_trophies, TierGroup, TrophiesScene, TrophyTier, TIER_PREVIEW_COUNT, TROPHY_REVEAL_MS,
};

use super::{Scene, SceneId};
use crate::models::StatsSnapshot;

#[derive(Debug, Clone, PartialEq)]
pub enum SceneSlot {
    Intro(IntroScene),
    TotalTime(TotalTimeScene),
    TopGenres(TopGenresScene),
    TopGames(TopGamesScene),
    Trophies(TrophiesScene),
}

impl SceneSlot {
    /// Every scene in playback order
    pub fn build_all(snapshot: &StatsSnapshot, today: NaiveDate) -> Vec<SceneSlot> {
        SceneId::ALL
            .iter()
            .map(|id| SceneSlot::build(*id, snapshot, today))
            .collect()
    }

    pub fn build(id: SceneId, snapshot: &StatsSnapshot, today: NaiveDate) -> SceneSlot {
        match id {
            SceneId::Intro => SceneSlot::Intro(IntroScene::new(snapshot, today)),
            SceneId::TotalTime => SceneSlot::TotalTime(TotalTimeScene::new(snapshot)),
            SceneId::TopGenres => SceneSlot::TopGenres(TopGenresScene::new(snapshot)),
            SceneId::TopGames => SceneSlot::TopGames(TopGamesScene::new(snapshot)),
            SceneId::Trophies => SceneSlot::Trophies(TrophiesScene::new(snapshot)),
        }
    }

    pub fn scene(&self) -> &dyn Scene {
        match self {
            SceneSlot::Intro(s) => s,
            SceneSlot::TotalTime(s) => s,
            SceneSlot::TopGenres(s) => s,
            SceneSlot::TopGames(s) => s,
            SceneSlot::Trophies(s) => s,
        }
    }

    pub fn scene_mut(&mut self) -> &mut dyn Scene {
        match self {
            SceneSlot::Intro(s) => s,
            SceneSlot::TotalTime(s) => s,
            SceneSlot::TopGenres(s) => s,
            SceneSlot::TopGames(s) => s,
            SceneSlot::Trophies(s) => s,
        }
    }

    pub fn id(&self) -> SceneId {
        self.scene().id()
    }
}
