use crate::models::{AchievementEntry, StatsSnapshot};
use crate::playback::{
    sliced_reveal_count, FrameRequest, Scene, SceneId, SceneTimeline, SCENE_DWELL_MS,
};

pub const TROPHY_REVEAL_MS: f64 = 2400.0;
/// Entries listed under each tier before collapsing into "+N"
pub const TIER_PREVIEW_COUNT: usize = 3;

/// Rarity tier by global unlock percentage
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TrophyTier {
    Legendary,
    Epic,
    Rare,
    Uncommon,
    Common,
    Unknown,
}

impl TrophyTier {
    pub const ALL: [TrophyTier; 6] = [
        TrophyTier::Legendary,
        TrophyTier::Epic,
        TrophyTier::Rare,
        TrophyTier::Uncommon,
        TrophyTier::Common,
        TrophyTier::Unknown,
    ];

    /// Tier for an unlock percentage; the bounds are inclusive
    pub fn classify(percent: Option<f64>) -> TrophyTier {
        match percent {
            Some(p) if p <= 1.0 => TrophyTier::Legendary,
            Some(p) if p <= 5.0 => TrophyTier::Epic,
            Some(p) if p <= 10.0 => TrophyTier::Rare,
            Some(p) if p <= 20.0 => TrophyTier::Uncommon,
            Some(p) if p <= 100.0 => TrophyTier::Common,
            _ => TrophyTier::Unknown,
        }
    }

    pub fn label_key(&self) -> &'static str {
        match self {
            TrophyTier::Legendary => "recap.trophyTierLegendary",
            TrophyTier::Epic => "recap.trophyTierEpic",
            TrophyTier::Rare => "recap.trophyTierRare",
            TrophyTier::Uncommon => "recap.trophyTierUncommon",
            TrophyTier::Common => "recap.trophyTierCommon",
            TrophyTier::Unknown => "recap.trophyTierUnknown",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct TierGroup {
    pub tier: TrophyTier,
    pub trophies: Vec<AchievementEntry>,
}

impl TierGroup {
    /// Rarest entries shown by name
    pub fn preview(&self) -> &[AchievementEntry] {
        &self.trophies[..self.trophies.len().min(TIER_PREVIEW_COUNT)]
    }

    /// Entries hidden behind the "+N" label
    pub fn overflow(&self) -> usize {
        self.trophies.len().saturating_sub(TIER_PREVIEW_COUNT)
    }
}

/// One group per tier in `TrophyTier::ALL` order, rarest entries first.
/// Unknown percentages sort as 100.
pub fn group_trophies(entries: &[AchievementEntry]) -> Vec<TierGroup> {
    let mut sorted: Vec<&AchievementEntry> = entries.iter().collect();
    sorted.sort_by(|a, b| {
        a.percent
            .unwrap_or(100.0)
            .partial_cmp(&b.percent.unwrap_or(100.0))
            .unwrap_or(std::cmp::Ordering::Equal)
    });

    TrophyTier::ALL
        .iter()
        .map(|tier| TierGroup {
            tier: *tier,
            trophies: sorted
                .iter()
                .filter(|entry| TrophyTier::classify(entry.percent) == *tier)
                .map(|entry| (*entry).clone())
                .collect(),
        })
        .collect()
}

/// Achievements bucketed by rarity, one tier revealed per slice
#[derive(Debug, Clone, PartialEq)]
pub struct TrophiesScene {
    timeline: SceneTimeline,
    groups: Vec<TierGroup>,
    total: usize,
    visible_tiers: usize,
}

impl TrophiesScene {
    pub fn new(snapshot: &StatsSnapshot) -> Self {
        let source = snapshot.trophy_source();
        Self {
            timeline: SceneTimeline::new(SCENE_DWELL_MS),
            groups: group_trophies(source),
            total: source.len(),
            visible_tiers: 0,
        }
    }

    pub fn total(&self) -> usize {
        self.total
    }

    pub fn groups(&self) -> &[TierGroup] {
        &self.groups
    }

    pub fn visible_groups(&self) -> &[TierGroup] {
        &self.groups[..self.visible_tiers.min(self.groups.len())]
    }
}

impl Scene for TrophiesScene {
    fn id(&self) -> SceneId {
        SceneId::Trophies
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
        self.visible_tiers = sliced_reveal_count(elapsed, TROPHY_REVEAL_MS, self.groups.len());
        if self.visible_tiers == self.groups.len() {
            self.timeline.settle();
        }
        self.timeline.frame_request()
    }

    fn pause_animations(&mut self) {}

    fn reset_animations(&mut self) {
        self.visible_tiers = 0;
    }

    fn finish_animations(&mut self) {
        self.visible_tiers = self.groups.len();
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn entry(name: &str, percent: Option<f64>) -> AchievementEntry {
        AchievementEntry {
            game: "Game".to_string(),
            name: name.to_string(),
            percent,
        }
    }

    #[test]
    fn tier_bounds_are_inclusive() {
        assert_eq!(TrophyTier::classify(Some(1.0)), TrophyTier::Legendary);
        assert_eq!(TrophyTier::classify(Some(1.01)), TrophyTier::Epic);
        assert_eq!(TrophyTier::classify(Some(5.0)), TrophyTier::Epic);
        assert_eq!(TrophyTier::classify(Some(10.0)), TrophyTier::Rare);
        assert_eq!(TrophyTier::classify(Some(20.0)), TrophyTier::Uncommon);
        assert_eq!(TrophyTier::classify(Some(100.0)), TrophyTier::Common);
        assert_eq!(TrophyTier::classify(Some(120.0)), TrophyTier::Unknown);
        assert_eq!(TrophyTier::classify(None), TrophyTier::Unknown);
    }

    #[test]
    fn groups_sorted_rarest_first_with_overflow() {
        let entries = vec![
            entry("d", Some(0.9)),
            entry("a", Some(0.1)),
            entry("c", Some(0.5)),
            entry("b", Some(0.2)),
            entry("x", None),
            entry("e", Some(50.0)),
        ];
        let groups = group_trophies(&entries);
        assert_eq!(groups.len(), TrophyTier::ALL.len());

        let legendary = &groups[0];
        let names: Vec<&str> = legendary.preview().iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, vec!["a", "b", "c"]);
        assert_eq!(legendary.overflow(), 1);
        assert_eq!(groups[4].trophies.len(), 1);
        assert_eq!(groups[5].trophies[0].name, "x");
    }

    #[test]
    fn falls_back_to_rare_achievements() {
        let snapshot = StatsSnapshot {
            rare_achievements: vec![entry("only", Some(3.0))],
            ..Default::default()
        };
        let scene = TrophiesScene::new(&snapshot);
        assert_eq!(scene.total(), 1);
        assert_eq!(scene.groups()[1].trophies.len(), 1);
    }

    #[test]
    fn tiers_reveal_over_time() {
        let mut scene = TrophiesScene::new(&StatsSnapshot::default());
        scene.activate();
        scene.tick(0.0);
        assert_eq!(scene.visible_groups().len(), 0);
        scene.tick(TROPHY_REVEAL_MS / 2.0);
        assert_eq!(scene.visible_groups().len(), 3);
        scene.tick(TROPHY_REVEAL_MS);
        assert_eq!(scene.visible_groups().len(), 6);
    }
}
