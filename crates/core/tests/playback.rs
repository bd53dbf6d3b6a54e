//! End-to-end playback: decode a recap body, then drive the player the way
//! the UI loop does.

use chrono::NaiveDate;
use nexus_core::playback::scenes::{GenreLabel, SceneSlot};
use nexus_core::playback::{
    GestureNavigator, NavDirection, PlaybackMode, PlayerEvent, Scene, SceneId, ScenePhase,
    ScenePlayer,
};
use nexus_core::{classify_response, decode_recap, decode_recap_response, StatsSnapshot};
use pretty_assertions::assert_eq;

const FRAME_MS: f64 = 100.0;

fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 12, 1).unwrap()
}

fn sample_snapshot() -> StatsSnapshot {
    decode_recap(
        r#"{
            "year": 2025,
            "total_hours": 240,
            "steam_persona_name": "Nova",
            "steam_profile_level": 42,
            "steam_profile_created_at": 1434326400,
            "steam_recent_hours": 12.5,
            "steam_top_games": [
                {"name": "Hades", "hours": 120.4},
                {"name": "Celeste", "hours": 60},
                {"name": "Factorio", "hours": 300}
            ],
            "steam_top_genres": [
                {"name": "Action", "percent": 60},
                {"name": "Indie", "percent": 50},
                {"name": "Strategy", "percent": 30}
            ],
            "steam_rare_achievements": [
                {"game": "Celeste", "name": "Farewell", "percent": 0.8},
                {"game": "Hades", "name": "Is There No Escape?", "percent": 4.1}
            ]
        }"#,
    )
    .unwrap()
}

/// Tick at a steady frame rate until the player finishes or `limit_ms` passes
fn run_until_finished(player: &mut ScenePlayer, start_ms: f64, limit_ms: f64) -> f64 {
    let mut now = start_ms;
    while !player.is_finished() && now < start_ms + limit_ms {
        player.tick(now);
        now += FRAME_MS;
    }
    now
}

fn total_time(player: &ScenePlayer) -> &nexus_core::playback::scenes::TotalTimeScene {
    player
        .scenes()
        .iter()
        .find_map(|slot| match slot {
            SceneSlot::TotalTime(scene) => Some(scene),
            _ => None,
        })
        .unwrap()
}

#[test]
fn timed_wrap_plays_every_scene_once_then_completes() {
    let mut player = ScenePlayer::from_snapshot(&sample_snapshot(), today(), PlaybackMode::Timed);
    run_until_finished(&mut player, 0.0, 60_000.0);
    assert!(player.is_finished());

    let events = player.poll_events();
    let visited: Vec<SceneId> = events
        .iter()
        .filter_map(|e| match e {
            PlayerEvent::Advanced { scene, .. } => Some(*scene),
            PlayerEvent::Completed => None,
        })
        .collect();
    assert_eq!(
        visited,
        vec![SceneId::TotalTime, SceneId::TopGenres, SceneId::TopGames, SceneId::Trophies]
    );
    assert_eq!(events.last(), Some(&PlayerEvent::Completed));

    // Further frames change nothing
    player.tick(100_000.0);
    assert!(player.poll_events().is_empty());
}

#[test]
fn browse_mode_shows_final_values() {
    let player = ScenePlayer::from_snapshot(&sample_snapshot(), today(), PlaybackMode::Browse);
    let scene = total_time(&player);
    assert_eq!(scene.hours(), 240);
    assert_eq!(scene.days(), 10.0);
    assert_eq!(scene.months(), 0.3);
}

#[test]
fn counters_end_exactly_on_target() {
    let mut player = ScenePlayer::from_snapshot(&sample_snapshot(), today(), PlaybackMode::Timed);
    player.advance();
    let mut last = 0;
    let mut now = 0.0;
    while total_time(&player).phase() != ScenePhase::Settled {
        assert!(now < 10_000.0, "counter never settled");
        player.tick(now);
        let shown = total_time(&player).hours();
        assert!(shown >= last, "counter went backwards: {} < {}", shown, last);
        last = shown;
        now += 16.0;
    }
    assert_eq!(player.active_index(), 1);
    assert_eq!(last, 240);
}

#[test]
fn small_wheel_does_nothing_and_cooldown_swallows_bursts() {
    let mut player = ScenePlayer::from_snapshot(&sample_snapshot(), today(), PlaybackMode::Timed);
    let mut gestures = GestureNavigator::default();
    let mut feed = |player: &mut ScenePlayer, delta: f64, now: f64| {
        if let Some(direction) = gestures.on_wheel(0.0, delta, now) {
            player.navigate(direction);
        }
    };

    feed(&mut player, 15.0, 0.0);
    assert_eq!(player.active_index(), 0);

    feed(&mut player, 10.0, 50.0);
    assert_eq!(player.active_index(), 1);

    // A trackpad burst inside the cooldown keeps extending it
    for step in 1..=10 {
        feed(&mut player, 40.0, 50.0 + step as f64 * 60.0);
    }
    assert_eq!(player.active_index(), 1);

    feed(&mut player, 40.0, 650.0 + 700.0);
    assert_eq!(player.active_index(), 2);
}

#[test]
fn swipe_back_and_forth() {
    let mut player = ScenePlayer::from_snapshot(&sample_snapshot(), today(), PlaybackMode::Browse);
    let mut gestures = GestureNavigator::default();

    gestures.touch_start(300.0, 200.0);
    gestures.touch_move(200.0, 210.0);
    let forward = gestures.touch_end(0.0);
    assert_eq!(forward, Some(NavDirection::Next));
    player.navigate(NavDirection::Next);
    assert_eq!(player.active_index(), 1);

    gestures.touch_start(100.0, 200.0);
    gestures.touch_move(200.0, 200.0);
    assert_eq!(gestures.touch_end(1_000.0), Some(NavDirection::Previous));
}

#[test]
fn skip_and_close_end_immediately() {
    for end in [ScenePlayer::skip as fn(&mut ScenePlayer), ScenePlayer::close] {
        let mut player =
            ScenePlayer::from_snapshot(&sample_snapshot(), today(), PlaybackMode::Timed);
        player.tick(0.0);
        end(&mut player);
        assert!(player.is_finished());
        assert_eq!(player.poll_events(), vec![PlayerEvent::Completed]);
        end(&mut player);
        assert!(player.poll_events().is_empty());
    }
}

#[test]
fn jump_to_is_idempotent() {
    let mut player = ScenePlayer::from_snapshot(&sample_snapshot(), today(), PlaybackMode::Timed);
    player.jump_to(3);
    player.jump_to(3);
    assert_eq!(player.active_index(), 3);
    assert_eq!(player.poll_events().len(), 1);
}

#[test]
fn pause_and_resume_are_idempotent() {
    let mut player = ScenePlayer::from_snapshot(&sample_snapshot(), today(), PlaybackMode::Timed);
    player.tick(0.0);
    player.tick(1_000.0);
    let before = player.progress();

    player.set_paused(true);
    player.set_paused(true);
    player.tick(50_000.0);
    assert_eq!(player.progress(), before);

    player.set_paused(false);
    player.set_paused(false);
    player.tick(50_100.0);
    player.tick(50_200.0);
    assert!(player.progress() > before);
    assert!(player.progress() < 1.0, "paused time must not count");
}

#[test]
fn missing_creation_date_gives_placeholders() {
    let snapshot = decode_recap(r#"{"steam_profile_created_at": null, "steam_profile_level": 7}"#)
        .unwrap();
    let player = ScenePlayer::from_snapshot(&snapshot, today(), PlaybackMode::Browse);
    let SceneSlot::Intro(intro) = &player.scenes()[0] else {
        panic!("intro scene comes first");
    };
    assert_eq!(intro.date_reel(), None);
    assert_eq!(intro.years_value(), None);
    assert_eq!(intro.level_value(), Some(7.0));
}

#[test]
fn genre_remainder_never_negative() {
    let player = ScenePlayer::from_snapshot(&sample_snapshot(), today(), PlaybackMode::Browse);
    let SceneSlot::TopGenres(genres) = &player.scenes()[2] else {
        panic!("genres are the third scene");
    };
    let other = genres
        .rows()
        .iter()
        .find(|row| row.label == GenreLabel::Other)
        .unwrap();
    assert_eq!(other.percent, 0.0);
}

#[test]
fn missing_recap_decodes_to_none() {
    let snapshot = decode_recap_response(classify_response(404, "")).unwrap();
    assert!(snapshot.is_none());
}
