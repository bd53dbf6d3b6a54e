use std::cmp::Ordering;

use crate::models::{AchievementEntry, CompletedGame, StatsSnapshot, TopGame};
use crate::playback::{
    sliced_reveal_count, AnimatedCounter, ChainedReveal, FrameRequest, ItemPhase, RevealOrder,
    Scene, SceneId, SceneTimeline, SCENE_DWELL_MS,
};

pub const TOP_GAME_COUNT: usize = 5;
/// Count-up time for each game's hours
pub const GAME_COUNT_MS: f64 = 800.0;
pub const RECENT_HOURS_MS: f64 = 2000.0;
pub const HIGHLIGHT_COUNT: usize = 3;
/// Both highlight lists are sliced over this window
pub const HIGHLIGHT_REVEAL_MS: f64 = 4000.0;

/// Most played games, revealed back to front so the top game lands last.
///
/// The recent-hours counter runs alongside the chain, as do the rarest
/// achievements and the longest completed games.
#[derive(Debug, Clone, PartialEq)]
pub struct TopGamesScene {
    timeline: SceneTimeline,
    games: Vec<TopGame>,
    chain: ChainedReveal,
    recent: AnimatedCounter,
    rare: Vec<AchievementEntry>,
    completed: Vec<CompletedGame>,
    highlights: AnimatedCounter,
}

impl TopGamesScene {
    pub fn new(snapshot: &StatsSnapshot) -> Self {
        let mut games = snapshot.top_games.clone();
        games.sort_by(|a, b| b.hours.partial_cmp(&a.hours).unwrap_or(Ordering::Equal));
        games.truncate(TOP_GAME_COUNT);

        // Unknown rarity sorts as 0%
        let mut rare: Vec<AchievementEntry> = snapshot
            .rare_achievements
            .iter()
            .filter(|a| !a.name.is_empty())
            .cloned()
            .collect();
        rare.sort_by(|a, b| {
            let (a, b) = (a.percent.unwrap_or(0.0), b.percent.unwrap_or(0.0));
            a.partial_cmp(&b).unwrap_or(Ordering::Equal)
        });
        rare.truncate(HIGHLIGHT_COUNT);

        let mut completed: Vec<CompletedGame> = snapshot
            .completed_games
            .iter()
            .filter(|g| !g.name.is_empty())
            .cloned()
            .collect();
        completed.sort_by(|a, b| b.hours.partial_cmp(&a.hours).unwrap_or(Ordering::Equal));
        completed.truncate(HIGHLIGHT_COUNT);

        // Target is the longest list so an empty pair settles at once
        let longest = rare.len().max(completed.len()) as f64;

        let chain = ChainedReveal::new(
            games.iter().map(|g| g.hours.round()),
            GAME_COUNT_MS,
            RevealOrder::BackToFront,
        );
        Self {
            timeline: SceneTimeline::new(SCENE_DWELL_MS),
            games,
            chain,
            recent: AnimatedCounter::with_target(snapshot.recent_hours.round(), RECENT_HOURS_MS),
            rare,
            completed,
            highlights: AnimatedCounter::with_target(longest, HIGHLIGHT_REVEAL_MS),
        }
    }

    pub fn games(&self) -> &[TopGame] {
        &self.games
    }

    pub fn game_phase(&self, index: usize) -> ItemPhase {
        self.chain.phase(index)
    }

    /// Hours shown for the game at `index`
    pub fn game_hours(&self, index: usize) -> u64 {
        self.chain.value(index).floor() as u64
    }

    pub fn active_game(&self) -> Option<usize> {
        self.chain.active_index()
    }

    pub fn recent_hours(&self) -> u64 {
        self.recent.value().floor() as u64
    }

    /// Rarest achievements first, at most three
    pub fn rare_achievements(&self) -> &[AchievementEntry] {
        &self.rare
    }

    /// Longest completed games first, at most three
    pub fn completed_games(&self) -> &[CompletedGame] {
        &self.completed
    }

    pub fn visible_rare(&self) -> usize {
        sliced_reveal_count(self.highlights.progress(), 1.0, self.rare.len())
    }

    pub fn visible_completed(&self) -> usize {
        sliced_reveal_count(self.highlights.progress(), 1.0, self.completed.len())
    }
}

impl Scene for TopGamesScene {
    fn id(&self) -> SceneId {
        SceneId::TopGames
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
        self.chain.start();
        self.chain.tick(now_ms);
        self.recent.tick(now_ms);
        self.highlights.tick(now_ms);
        if self.chain.is_complete() && self.recent.is_settled() && self.highlights.is_settled() {
            self.timeline.settle();
        }
        self.timeline.frame_request()
    }

    fn pause_animations(&mut self) {
        self.chain.pause();
        self.recent.pause();
        self.highlights.pause();
    }

    fn reset_animations(&mut self) {
        self.chain.reset();
        self.recent.reset();
        self.highlights.reset();
    }

    fn finish_animations(&mut self) {
        self.chain.finish();
        self.recent.settle();
        self.highlights.settle();
    }
}
