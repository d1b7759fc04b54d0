use std::path::PathBuf;

use chrono::NaiveDate;
use learnplan_core::config::SyncConfig;
use learnplan_core::remote::MemoryCalendar;
use learnplan_core::reschedule::{self, Shift};
use learnplan_core::sync::{RowOutcome, SyncEngine};
use learnplan_core::{Columns, PlanError, Schedule};
use tempfile::TempDir;

const PLAN: &str = "\
年度,月,週,学習内容,実践課題,開発工程,Claude活用法,メモ・参考URL
2025,12,1,HTML/CSS基礎,個人ポートフォリオ作成,要件定義 → 設計,Claudeで設計レビュー,https://developer.mozilla.org
2025,12,2,JavaScript基礎,ToDoアプリ,実装,Claudeでデバッグ,
2025,12,4,Git/GitHub,チーム開発演習,レビュー,Claudeでコミットメッセージ,
2026,1,2,TypeScript,型付きToDo,リファクタ,Claudeで型設計,https://www.typescriptlang.org
";

fn d(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn write_plan(dir: &TempDir) -> PathBuf {
    let path = dir.path().join("dev-schedule.csv");
    std::fs::write(&path, PLAN).unwrap();
    path
}

#[test]
fn load_then_save_is_byte_identical() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_plan(&dir);

    let schedule = Schedule::load(&path, &Columns::default()).unwrap();
    schedule.save(&path).unwrap();

    assert_eq!(std::fs::read_to_string(&path).unwrap(), PLAN);
}

#[test]
fn shift_and_save_only_moves_rows_past_cutoff() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_plan(&dir);

    let mut schedule = Schedule::load(&path, &Columns::default()).unwrap();

    // 2025-12 week 4 has index 52
    let moved = reschedule::shift(&mut schedule.rows, 52, Shift::new(2, 0)).unwrap();
    schedule.save(&path).unwrap();

    let reloaded = Schedule::load(&path, &Columns::default()).unwrap();
    let keys: Vec<String> = reloaded
        .rows
        .iter()
        .map(|r| r.sync_key().to_string())
        .collect();

    // Dec 22 + 2 weeks = Jan 5; Jan 8 + 2 weeks = Jan 22
    assert_eq!(keys, vec!["2025-12-1", "2025-12-2", "2026-01-4", "2026-01-2"]);
    assert_eq!(moved.len(), 1);
    assert_eq!(reloaded.rows[2].content, "Git/GitHub");
    assert_eq!(reloaded.rows[3].url, "https://www.typescriptlang.org");
}

fn synced_keys(calendar: &MemoryCalendar) -> Vec<String> {
    let mut keys: Vec<String> = calendar
        .events()
        .into_iter()
        .map(|e| e.payload.private_properties["fslearning_key"].clone())
        .collect();
    keys.sort();
    keys
}

#[tokio::test]
async fn resync_without_changes_updates_every_week() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_plan(&dir);
    let schedule = Schedule::load(&path, &Columns::default()).unwrap();

    let calendar = MemoryCalendar::new();
    let config = SyncConfig::default();
    let engine = SyncEngine::new(&calendar, &config);
    let calendar_id = engine.ensure_calendar().await.unwrap();

    let first = engine.run(&calendar_id, &schedule.rows, |_, _| {}).await;
    assert_eq!((first.created, first.updated, first.skipped), (4, 0, 0));

    let second = engine.run(&calendar_id, &schedule.rows, |_, _| {}).await;
    assert_eq!((second.created, second.updated, second.skipped), (0, 4, 0));

    let first_week = calendar
        .events()
        .into_iter()
        .find(|e| e.payload.private_properties["fslearning_key"] == "2025-12-1")
        .unwrap();
    assert_eq!(first_week.payload.start, d(2025, 11, 30));
    assert_eq!(first_week.payload.end, d(2025, 12, 7));
}

#[tokio::test]
async fn sync_after_reschedule_creates_moved_week() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_plan(&dir);
    let mut schedule = Schedule::load(&path, &Columns::default()).unwrap();

    let calendar = MemoryCalendar::new();
    let config = SyncConfig::default();
    let engine = SyncEngine::new(&calendar, &config);
    let calendar_id = engine.ensure_calendar().await.unwrap();

    let first = engine.run(&calendar_id, &schedule.rows, |_, _| {}).await;
    assert_eq!((first.created, first.updated, first.skipped), (4, 0, 0));

    let moved = reschedule::shift(&mut schedule.rows, 52, Shift::new(2, 0)).unwrap();
    assert_eq!(moved.len(), 1);
    schedule.save(&path).unwrap();
    let schedule = Schedule::load(&path, &Columns::default()).unwrap();

    let mut created = Vec::new();
    let second = engine
        .run(&calendar_id, &schedule.rows, |row, outcome| {
            if matches!(outcome, RowOutcome::Created(_)) {
                created.push(row.sync_key().to_string());
            }
        })
        .await;
    assert_eq!((second.created, second.updated, second.skipped), (1, 3, 0));
    assert_eq!(created, vec!["2026-01-4"]);

    // The week that moved away keeps its old event
    assert_eq!(
        synced_keys(&calendar),
        vec!["2025-12-1", "2025-12-2", "2025-12-4", "2026-01-2", "2026-01-4"]
    );
}

#[test]
fn missing_schedule_file_is_reported() {
    let dir = tempfile::tempdir().unwrap();
    let result = Schedule::load(&dir.path().join("dev-schedule.csv"), &Columns::default());
    assert!(matches!(result, Err(PlanError::FileNotFound(_))));
}
