use super::*;
use crate::config::SyncConfig;
use crate::error::PlanError;
use crate::remote::{CalendarApi, MemoryCalendar};
use crate::row::ScheduleRow;

fn rows() -> Vec<ScheduleRow> {
    vec![
        ScheduleRow::new(2025, 12, 1, "HTML/CSS基礎"),
        ScheduleRow::new(2025, 12, 2, "JavaScript基礎"),
        ScheduleRow::new(2026, 1, 1, "TypeScript"),
    ]
}

#[tokio::test]
async fn test_ensure_calendar_creates_once() {
    let calendar = MemoryCalendar::new();
    let config = SyncConfig::default();
    let engine = SyncEngine::new(&calendar, &config);

    let first = engine.ensure_calendar().await.unwrap();
    let second = engine.ensure_calendar().await.unwrap();

    assert_eq!(first, second);
    let calendars = calendar.calendars();
    assert_eq!(calendars.len(), 1);
    assert_eq!(calendars[0].name, "フルスタック学習プログラム");
    assert_eq!(calendars[0].time_zone, "Asia/Tokyo");
}

#[tokio::test]
async fn test_first_run_creates_every_row() {
    let calendar = MemoryCalendar::new();
    let config = SyncConfig::default();
    let engine = SyncEngine::new(&calendar, &config);
    let id = engine.ensure_calendar().await.unwrap();

    let report = engine.run(&id, &rows(), |_, _| {}).await;

    assert_eq!((report.created, report.updated, report.skipped), (3, 0, 0));
    assert_eq!(calendar.events().len(), 3);
}

#[tokio::test]
async fn test_second_run_updates_every_row() {
    let calendar = MemoryCalendar::new();
    let config = SyncConfig::default();
    let engine = SyncEngine::new(&calendar, &config);
    let id = engine.ensure_calendar().await.unwrap();

    engine.run(&id, &rows(), |_, _| {}).await;
    let report = engine.run(&id, &rows(), |_, _| {}).await;

    assert_eq!((report.created, report.updated, report.skipped), (0, 3, 0));
    assert_eq!(calendar.events().len(), 3);
}

#[tokio::test]
async fn test_update_replaces_payload_of_matching_event() {
    let calendar = MemoryCalendar::new();
    let config = SyncConfig::default();
    let engine = SyncEngine::new(&calendar, &config);
    let id = engine.ensure_calendar().await.unwrap();

    let mut plan = rows();
    engine.run(&id, &plan, |_, _| {}).await;

    plan[1].content = "JavaScript応用".into();
    let outcome = engine.sync_row(&id, &plan[1]).await.unwrap();

    let event = match outcome {
        RowOutcome::Updated(event) => event,
        other => panic!("expected an update, got {other:?}"),
    };
    assert_eq!(event.title, "Week 2: JavaScript応用");

    let stored: Vec<_> = calendar
        .events()
        .into_iter()
        .filter(|e| e.payload.private_properties["fslearning_key"] == "2025-12-2")
        .collect();
    assert_eq!(stored.len(), 1);
    assert_eq!(stored[0].payload.title, "Week 2: JavaScript応用");
}

#[tokio::test]
async fn test_failing_row_is_skipped_and_others_continue() {
    let calendar = MemoryCalendar::new();
    calendar.fail_on("2025-12-2");
    let config = SyncConfig::default();
    let engine = SyncEngine::new(&calendar, &config);
    let id = engine.ensure_calendar().await.unwrap();

    let mut seen = Vec::new();
    let report = engine
        .run(&id, &rows(), |row, outcome| {
            seen.push((row.sync_key().to_string(), matches!(outcome, RowOutcome::Skipped(_))))
        })
        .await;

    assert_eq!((report.created, report.updated, report.skipped), (2, 0, 1));
    assert_eq!(report.total(), 3);
    assert_eq!(report.failures[0].key.as_str(), "2025-12-2");
    assert_eq!(report.failures[0].label, "2025/12 Week2");
    assert!(report.failures[0].error.contains("simulated failure"));
    assert_eq!(
        seen,
        vec![
            ("2025-12-1".to_string(), false),
            ("2025-12-2".to_string(), true),
            ("2026-01-1".to_string(), false),
        ]
    );
}

#[tokio::test]
async fn test_malformed_row_is_skipped() {
    let calendar = MemoryCalendar::new();
    let config = SyncConfig::default();
    let engine = SyncEngine::new(&calendar, &config);
    let id = engine.ensure_calendar().await.unwrap();

    let mut plan = rows();
    plan.insert(1, ScheduleRow::new(2026, 0, 1, "broken"));

    let report = engine.run(&id, &plan, |_, _| {}).await;

    assert_eq!((report.created, report.skipped), (3, 1));
    assert_eq!(report.total(), plan.len());
}

#[tokio::test]
async fn test_rejected_auth() {
    let calendar = MemoryCalendar::new();
    calendar.reject_auth();

    assert!(matches!(calendar.authenticate().await, Err(PlanError::Auth(_))));
}
