use std::path::PathBuf;

use tokio::sync::mpsc;

use tile_collector::adapter::{run_sink, AnalyticsRecord, Analytics, AppConfig, EventName};
use tile_collector::core::Session;
use tile_collector::types::{GameStatus, Level};

fn temp_path(name: &str) -> PathBuf {
    let mut p = std::env::temp_dir();
    p.push(format!("tile-collector-{}-{}.jsonl", name, std::process::id()));
    let _ = std::fs::remove_file(&p);
    p
}

fn read_records(path: &PathBuf) -> Vec<AnalyticsRecord> {
    std::fs::read_to_string(path)
        .unwrap()
        .lines()
        .map(|l| serde_json::from_str(l).unwrap())
        .collect()
}

#[tokio::test]
async fn sink_preserves_order_and_shape() {
    let (tx, rx) = mpsc::unbounded_channel();
    tx.send(AnalyticsRecord::page_view(1)).unwrap();
    tx.send(AnalyticsRecord::share_click("terminal", "game_over", 2)).unwrap();
    tx.send(AnalyticsRecord::music_toggle(false, 3)).unwrap();
    drop(tx);

    let out = run_sink(rx, Vec::new()).await.unwrap();
    let values: Vec<serde_json::Value> = String::from_utf8(out)
        .unwrap()
        .lines()
        .map(|l| serde_json::from_str(l).unwrap())
        .collect();

    assert_eq!(values.len(), 3);
    assert_eq!(values[0]["event_name"], "page_view");
    assert_eq!(values[0]["event_data"], serde_json::json!({}));
    assert_eq!(values[1]["event_data"]["platform"], "terminal");
    assert_eq!(values[1]["event_data"]["context"], "game_over");
    assert_eq!(values[2]["event_data"]["is_playing"], false);
    assert_eq!(values[2]["ts"], 3);
}

#[test]
fn untracked_events_never_reach_the_sink() {
    let (tx, rx) = mpsc::unbounded_channel();
    let mut s = Session::new(Level::One, 5);
    s.grant_reward();
    let id = s.available_ids()[0];
    s.select_tile(id);
    s.settle();
    for event in s.take_events() {
        if let Some(record) = AnalyticsRecord::from_core(&event, 0) {
            tx.send(record).unwrap();
        }
    }
    drop(tx);

    let out = tokio_test::block_on(run_sink(rx, Vec::new())).unwrap();
    let text = String::from_utf8(out).unwrap();
    assert_eq!(text.lines().count(), 1);
    assert!(text.contains("\"level_start\""));
}

#[test]
fn session_events_reach_the_file() {
    let path = temp_path("session");
    let analytics = Analytics::start(&path).unwrap();
    analytics.track(AnalyticsRecord::page_view(0));

    let mut s = Session::new(Level::One, 3);
    s.restart();
    for event in s.take_events() {
        analytics.track_event(&event);
    }
    analytics.shutdown();

    let records = read_records(&path);
    let names: Vec<EventName> = records.iter().map(|r| r.event_name).collect();
    assert_eq!(
        names,
        vec![EventName::PageView, EventName::LevelStart, EventName::LevelStart]
    );
    let _ = std::fs::remove_file(&path);
}

#[test]
fn lost_game_emits_level_fail() {
    let path = temp_path("fail");
    let analytics = Analytics::start(&path).unwrap();

    let mut s = Session::new(Level::Two, 21);
    let mut guard = 0;
    while s.status() == GameStatus::Playing && guard < 200 {
        let bar = s.slot_bar();
        let pick = s.available_ids().into_iter().find(|&id| {
            s.board()
                .iter()
                .find(|t| t.id == id)
                .is_some_and(|t| bar.count_of(t.kind) < 2)
        });
        let Some(id) = pick.or_else(|| s.available_ids().first().copied()) else {
            break;
        };
        s.select_tile(id);
        s.settle();
        guard += 1;
    }
    assert_eq!(s.status(), GameStatus::Lost);

    for event in s.take_events() {
        analytics.track_event(&event);
    }
    analytics.shutdown();

    let records = read_records(&path);
    assert_eq!(records.first().map(|r| r.event_name), Some(EventName::LevelStart));
    assert_eq!(records.last().map(|r| r.event_name), Some(EventName::LevelFail));
    let _ = std::fs::remove_file(&path);
}

#[test]
fn disabled_config_starts_nothing() {
    let config = AppConfig {
        analytics_path: Some(temp_path("disabled")),
        analytics_disabled: true,
        ..AppConfig::default()
    };
    assert!(Analytics::start_from_config(&config).unwrap().is_none());
    assert!(Analytics::start_from_config(&AppConfig::default())
        .unwrap()
        .is_none());
}
