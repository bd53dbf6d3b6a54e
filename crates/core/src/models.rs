//! Stats snapshot models shared by every front-end
//!
//! `RecapPayload` is the raw shape served by the recap API. It is deliberately
//! loose: every field is optional and numbers may arrive as strings. All
//! defaulting and clamping happens once, in `StatsSnapshot::from_payload`.

use chrono::{DateTime, Datelike, NaiveDate, TimeZone, Utc};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};

pub const DEFAULT_PLAYSTYLE: &str = "Strategist";

/// Account providers a user can link
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Provider {
    Steam,
    Riot,
}

impl Provider {
    pub const ALL: [Provider; 2] = [Provider::Steam, Provider::Riot];

    pub fn as_str(&self) -> &'static str {
        match self {
            Provider::Steam => "steam",
            Provider::Riot => "riot",
        }
    }

    /// Translation key for the provider's display name
    pub fn label_key(&self) -> &'static str {
        match self {
            Provider::Steam => "providers.steam",
            Provider::Riot => "providers.riot",
        }
    }
}

// ============================================================================
// Raw API payload
// ============================================================================

/// Recap payload exactly as the backend serves it
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct RecapPayload {
    #[serde(deserialize_with = "lenient_number")]
    pub year: Option<f64>,
    #[serde(deserialize_with = "lenient_string")]
    pub top_game: Option<String>,
    #[serde(deserialize_with = "lenient_number")]
    pub total_hours: Option<f64>,
    #[serde(deserialize_with = "lenient_string")]
    pub playstyle: Option<String>,
    #[serde(deserialize_with = "lenient_number")]
    pub longest_session: Option<f64>,

    #[serde(deserialize_with = "lenient_string")]
    pub steam_persona_name: Option<String>,
    #[serde(deserialize_with = "lenient_string")]
    pub steam_avatar_url: Option<String>,
    #[serde(deserialize_with = "lenient_number")]
    pub steam_profile_level: Option<f64>,
    #[serde(deserialize_with = "lenient_number")]
    pub steam_profile_created_at: Option<f64>,
    #[serde(deserialize_with = "lenient_list")]
    pub steam_top_games: Vec<RawTopGame>,
    #[serde(deserialize_with = "lenient_list")]
    pub steam_top_genres: Vec<RawGenre>,
    #[serde(deserialize_with = "lenient_list")]
    pub steam_achievements: Vec<RawAchievement>,
    #[serde(deserialize_with = "lenient_list")]
    pub steam_rare_achievements: Vec<RawAchievement>,
    #[serde(deserialize_with = "lenient_list")]
    pub steam_completed_games: Vec<RawCompletedGame>,
    #[serde(deserialize_with = "lenient_number")]
    pub steam_games_count: Option<f64>,
    #[serde(deserialize_with = "lenient_number")]
    pub steam_recent_hours: Option<f64>,

    #[serde(deserialize_with = "lenient_string")]
    pub riot_rank: Option<String>,
    #[serde(deserialize_with = "lenient_number")]
    pub riot_wins: Option<f64>,
    #[serde(deserialize_with = "lenient_number")]
    pub riot_losses: Option<f64>,
    #[serde(deserialize_with = "lenient_string")]
    pub riot_favorite: Option<String>,
    #[serde(deserialize_with = "lenient_number")]
    pub riot_win_rate: Option<f64>,
    #[serde(deserialize_with = "lenient_string")]
    pub riot_account_name: Option<String>,
    #[serde(deserialize_with = "lenient_number")]
    pub riot_profile_level: Option<f64>,
    #[serde(deserialize_with = "lenient_number")]
    pub riot_years_active: Option<f64>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct RawTopGame {
    #[serde(deserialize_with = "lenient_string")]
    pub name: Option<String>,
    #[serde(deserialize_with = "lenient_number")]
    pub hours: Option<f64>,
    #[serde(deserialize_with = "lenient_number")]
    pub appid: Option<f64>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct RawGenre {
    #[serde(deserialize_with = "lenient_string")]
    pub name: Option<String>,
    #[serde(deserialize_with = "lenient_number")]
    pub percent: Option<f64>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct RawAchievement {
    #[serde(deserialize_with = "lenient_string")]
    pub game: Option<String>,
    #[serde(deserialize_with = "lenient_string")]
    pub name: Option<String>,
    #[serde(deserialize_with = "lenient_number")]
    pub percent: Option<f64>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct RawCompletedGame {
    #[serde(deserialize_with = "lenient_string")]
    pub name: Option<String>,
    #[serde(deserialize_with = "lenient_number")]
    pub appid: Option<f64>,
    #[serde(deserialize_with = "lenient_number")]
    pub hours: Option<f64>,
}

/// Accept JSON numbers and numeric strings; anything else (or a non-finite
/// value) is treated as missing.
fn lenient_number<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(value
        .and_then(|v| match v {
            serde_json::Value::Number(n) => n.as_f64(),
            serde_json::Value::String(s) => s.trim().parse::<f64>().ok(),
            _ => None,
        })
        .filter(|n| n.is_finite()))
}

/// Accept strings and bare numbers; anything else is treated as missing
fn lenient_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(value.and_then(|v| match v {
        serde_json::Value::String(s) => Some(s),
        serde_json::Value::Number(n) => Some(n.to_string()),
        _ => None,
    }))
}

/// Decode a list element by element, dropping entries that don't fit
fn lenient_list<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    let items = match value {
        Some(serde_json::Value::Array(items)) => items,
        _ => return Ok(Vec::new()),
    };
    Ok(items
        .into_iter()
        .filter_map(|item| match serde_json::from_value(item) {
            Ok(parsed) => Some(parsed),
            Err(e) => {
                tracing::warn!("Dropping malformed recap list entry: {}", e);
                None
            }
        })
        .collect())
}

// ============================================================================
// Normalized snapshot
// ============================================================================

/// Steam profile identity
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SteamProfile {
    pub persona_name: Option<String>,
    pub avatar_url: Option<String>,
    pub level: Option<u32>,
    pub created_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TopGame {
    pub name: String,
    pub hours: f64,
    pub appid: Option<u64>,
}

/// Share of playtime for one genre. Shares are independent estimates and
/// are not guaranteed to sum to 100.
#[derive(Debug, Clone, PartialEq)]
pub struct GenreShare {
    pub name: String,
    pub percent: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct AchievementEntry {
    pub game: String,
    pub name: String,
    /// Global unlock rate, `None` when unknown
    pub percent: Option<f64>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CompletedGame {
    pub name: String,
    pub appid: Option<u64>,
    pub hours: f64,
}

/// Competitive stats from the secondary provider
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RiotSummary {
    pub account_name: Option<String>,
    pub rank: Option<String>,
    pub wins: u32,
    pub losses: u32,
    pub favorite: Option<String>,
    pub win_rate: Option<f64>,
    pub profile_level: Option<u32>,
    pub years_active: Option<u32>,
}

impl RiotSummary {
    pub fn total_matches(&self) -> u32 {
        self.wins.saturating_add(self.losses)
    }

    /// Reported win rate, or wins over total matches when the provider sent none
    pub fn effective_win_rate(&self) -> Option<f64> {
        self.win_rate.or_else(|| {
            let total = self.total_matches();
            (total > 0).then(|| self.wins as f64 / total as f64 * 100.0)
        })
    }
}

/// Aggregated statistics for one user and period.
///
/// Immutable for the duration of a presentation. Every numeric field is
/// non-negative; nullable fields are `None` rather than zero when unknown.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StatsSnapshot {
    pub year: i32,
    pub profile: SteamProfile,
    pub top_game: Option<String>,
    pub playstyle: String,
    pub total_hours: f64,
    pub longest_session: f64,
    pub recent_hours: f64,
    pub games_owned: u32,
    pub top_games: Vec<TopGame>,
    pub top_genres: Vec<GenreShare>,
    pub achievements: Vec<AchievementEntry>,
    pub rare_achievements: Vec<AchievementEntry>,
    pub completed_games: Vec<CompletedGame>,
    pub riot: Option<RiotSummary>,
}

impl StatsSnapshot {
    /// Normalize a raw payload into a snapshot
    pub fn from_payload(payload: RecapPayload) -> Self {
        Self::from_payload_in_year(payload, Utc::now().year())
    }

    /// Same as `from_payload` with an explicit fallback year
    pub fn from_payload_in_year(payload: RecapPayload, current_year: i32) -> Self {
        let profile = SteamProfile {
            persona_name: non_empty(payload.steam_persona_name),
            avatar_url: non_empty(payload.steam_avatar_url),
            level: optional_count(payload.steam_profile_level),
            created_at: payload
                .steam_profile_created_at
                .filter(|secs| *secs > 0.0)
                .and_then(|secs| Utc.timestamp_opt(secs as i64, 0).single()),
        };

        let top_games = payload
            .steam_top_games
            .into_iter()
            .filter_map(|g| {
                Some(TopGame {
                    name: non_empty(g.name)?,
                    hours: non_negative(g.hours),
                    appid: optional_id(g.appid),
                })
            })
            .collect();

        let top_genres = payload
            .steam_top_genres
            .into_iter()
            .filter_map(|g| {
                Some(GenreShare {
                    name: non_empty(g.name)?,
                    percent: non_negative(g.percent),
                })
            })
            .collect();

        let completed_games = payload
            .steam_completed_games
            .into_iter()
            .filter_map(|g| {
                Some(CompletedGame {
                    name: non_empty(g.name)?,
                    appid: optional_id(g.appid),
                    hours: non_negative(g.hours),
                })
            })
            .collect();

        let riot = RiotSummary {
            account_name: non_empty(payload.riot_account_name),
            rank: non_empty(payload.riot_rank),
            wins: count(payload.riot_wins),
            losses: count(payload.riot_losses),
            favorite: non_empty(payload.riot_favorite),
            win_rate: optional_non_negative(payload.riot_win_rate).filter(|r| *r > 0.0),
            profile_level: optional_count(payload.riot_profile_level),
            years_active: optional_count(payload.riot_years_active),
        };
        let has_riot = riot.rank.is_some()
            || riot.favorite.is_some()
            || riot.account_name.is_some()
            || riot.wins > 0
            || riot.losses > 0
            || riot.win_rate.is_some();

        Self {
            year: payload
                .year
                .filter(|y| *y >= 1.0)
                .map(|y| y as i32)
                .unwrap_or(current_year),
            profile,
            top_game: non_empty(payload.top_game),
            playstyle: non_empty(payload.playstyle)
                .unwrap_or_else(|| DEFAULT_PLAYSTYLE.to_string()),
            total_hours: non_negative(payload.total_hours),
            longest_session: non_negative(payload.longest_session),
            recent_hours: non_negative(payload.steam_recent_hours),
            games_owned: count(payload.steam_games_count),
            top_games,
            top_genres,
            achievements: achievements(payload.steam_achievements),
            rare_achievements: achievements(payload.steam_rare_achievements),
            completed_games,
            riot: has_riot.then_some(riot),
        }
    }

    /// Whole years since the profile was created, counting an anniversary
    /// only once it has passed. `None` when the creation date is unknown.
    pub fn years_active(&self, today: NaiveDate) -> Option<u32> {
        let created = self.profile.created_at?.date_naive();
        let mut years = today.year() - created.year();
        let before_anniversary = (today.month(), today.day()) < (created.month(), created.day());
        if before_anniversary {
            years -= 1;
        }
        Some(years.max(0) as u32)
    }

    /// Achievements used for rarity tiers: the full list when present,
    /// otherwise the rare highlights.
    pub fn trophy_source(&self) -> &[AchievementEntry] {
        if self.achievements.is_empty() {
            &self.rare_achievements
        } else {
            &self.achievements
        }
    }
}

/// Current UTC date, the reference for `StatsSnapshot::years_active`
pub fn today_utc() -> NaiveDate {
    Utc::now().date_naive()
}

impl From<RecapPayload> for StatsSnapshot {
    fn from(payload: RecapPayload) -> Self {
        Self::from_payload(payload)
    }
}

// ============================================================================
// Normalization helpers
// ============================================================================

fn non_empty(value: Option<String>) -> Option<String> {
    value
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
}

fn non_negative(value: Option<f64>) -> f64 {
    optional_non_negative(value).unwrap_or(0.0)
}

fn optional_non_negative(value: Option<f64>) -> Option<f64> {
    value.filter(|v| v.is_finite()).map(|v| v.max(0.0))
}

fn count(value: Option<f64>) -> u32 {
    optional_count(value).unwrap_or(0)
}

fn optional_count(value: Option<f64>) -> Option<u32> {
    optional_non_negative(value).map(|v| v.round() as u32)
}

fn optional_id(value: Option<f64>) -> Option<u64> {
    optional_non_negative(value)
        .filter(|v| *v > 0.0)
        .map(|v| v as u64)
}

fn achievements(raw: Vec<RawAchievement>) -> Vec<AchievementEntry> {
    raw.into_iter()
        .filter_map(|a| {
            Some(AchievementEntry {
                name: non_empty(a.name)?,
                game: non_empty(a.game).unwrap_or_default(),
                percent: optional_non_negative(a.percent),
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn decode(json: &str) -> StatsSnapshot {
        let payload: RecapPayload = serde_json::from_str(json).unwrap();
        StatsSnapshot::from_payload_in_year(payload, 2025)
    }

    #[test]
    fn empty_payload_uses_defaults() {
        let snapshot = decode("{}");
        assert_eq!(snapshot.year, 2025);
        assert_eq!(snapshot.playstyle, DEFAULT_PLAYSTYLE);
        assert_eq!(snapshot.total_hours, 0.0);
        assert_eq!(snapshot.profile, SteamProfile::default());
        assert!(snapshot.riot.is_none());
        assert!(snapshot.top_games.is_empty());
    }

    #[test]
    fn negative_and_malformed_numbers_are_clamped() {
        let snapshot = decode(
            r#"{
                "total_hours": -12,
                "steam_recent_hours": "7.5",
                "longest_session": "abc",
                "steam_games_count": 42.4,
                "steam_profile_level": -3
            }"#,
        );
        assert_eq!(snapshot.total_hours, 0.0);
        assert_eq!(snapshot.recent_hours, 7.5);
        assert_eq!(snapshot.longest_session, 0.0);
        assert_eq!(snapshot.games_owned, 42);
        assert_eq!(snapshot.profile.level, Some(0));
    }

    #[test]
    fn missing_creation_date_stays_unknown() {
        let snapshot = decode(r#"{"steam_profile_created_at": null}"#);
        assert!(snapshot.profile.created_at.is_none());
        let today = NaiveDate::from_ymd_opt(2025, 6, 1).unwrap();
        assert_eq!(snapshot.years_active(today), None);

        let zero = decode(r#"{"steam_profile_created_at": 0}"#);
        assert!(zero.profile.created_at.is_none());
    }

    #[test]
    fn years_active_respects_anniversary() {
        // 2015-06-15T00:00:00Z
        let snapshot = decode(r#"{"steam_profile_created_at": 1434326400}"#);
        let before = NaiveDate::from_ymd_opt(2025, 6, 14).unwrap();
        let on = NaiveDate::from_ymd_opt(2025, 6, 15).unwrap();
        assert_eq!(snapshot.years_active(before), Some(9));
        assert_eq!(snapshot.years_active(on), Some(10));
    }

    #[test]
    fn list_entries_without_names_are_dropped() {
        let snapshot = decode(
            r#"{
                "steam_top_genres": [
                    {"name": "RPG", "percent": 40},
                    {"name": "", "percent": 20},
                    {"percent": 10},
                    "garbage"
                ],
                "steam_rare_achievements": [
                    {"game": "Celeste", "name": "Farewell", "percent": null}
                ]
            }"#,
        );
        assert_eq!(
            snapshot.top_genres,
            vec![GenreShare {
                name: "RPG".into(),
                percent: 40.0
            }]
        );
        assert_eq!(snapshot.rare_achievements[0].percent, None);
        assert_eq!(snapshot.trophy_source().len(), 1);
    }

    #[test]
    fn riot_section_only_when_present() {
        let snapshot = decode(r#"{"riot_wins": 30, "riot_losses": 10}"#);
        let riot = snapshot.riot.expect("riot section");
        assert_eq!(riot.total_matches(), 40);
        assert_eq!(riot.effective_win_rate(), Some(75.0));
    }
}
