//! Turning a schedule row into a calendar event.

use std::collections::BTreeMap;

use crate::config::SyncConfig;
use crate::error::PlanResult;
use crate::event::EventPayload;
use crate::row::ScheduleRow;

pub fn event_title(row: &ScheduleRow) -> String {
    format!("Week {}: {}", row.week, row.content)
}

/// Event description: one labelled line per field, with the reference URL
/// set apart at the end when there is one.
pub fn event_description(row: &ScheduleRow) -> String {
    let mut parts = vec![
        format!("📚 学習内容: {}", row.content),
        format!("🎯 実践課題: {}", row.project),
        format!("📋 開発工程: {}", row.process),
        format!("🤖 {}", row.claude_usage),
    ];

    if !row.url.is_empty() {
        parts.push(format!("\n📖 参考URL: {}", row.url));
    }

    parts.join("\n")
}

/// Full payload for the row's week, keyed by its sync key.
pub fn event_payload(row: &ScheduleRow, config: &SyncConfig) -> PlanResult<EventPayload> {
    let range = row.week_range()?;

    let mut private_properties = BTreeMap::new();
    private_properties.insert(config.key_field.clone(), row.sync_key().to_string());

    Ok(EventPayload {
        title: event_title(row),
        description: event_description(row),
        start: range.start,
        end: range.end,
        color_id: config.color_id.clone(),
        reminders: config.reminders(),
        private_properties,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn row() -> ScheduleRow {
        let mut row = ScheduleRow::new(2025, 12, 1, "HTML/CSS基礎");
        row.project = "個人ポートフォリオ作成".into();
        row.process = "要件定義 → 設計 → 実装 → テスト".into();
        row.claude_usage = "Claudeで設計レビュー".into();
        row
    }

    #[test]
    fn test_payload_for_first_week_of_december() {
        let payload = event_payload(&row(), &SyncConfig::default()).unwrap();

        assert_eq!(payload.title, "Week 1: HTML/CSS基礎");
        assert_eq!(payload.start, NaiveDate::from_ymd_opt(2025, 11, 30).unwrap());
        assert_eq!(payload.end, NaiveDate::from_ymd_opt(2025, 12, 7).unwrap());
        assert_eq!(payload.color_id, "9");
        assert_eq!(payload.private_properties["fslearning_key"], "2025-12-1");

        let minutes: Vec<i64> = payload.reminders.iter().map(|r| r.minutes).collect();
        assert_eq!(minutes, vec![1440, 60]);
        assert!(payload.reminders.iter().all(|r| r.method == "popup"));
    }

    #[test]
    fn test_description_without_url() {
        assert_eq!(
            event_description(&row()),
            "📚 学習内容: HTML/CSS基礎\n\
             🎯 実践課題: 個人ポートフォリオ作成\n\
             📋 開発工程: 要件定義 → 設計 → 実装 → テスト\n\
             🤖 Claudeで設計レビュー"
        );
    }

    #[test]
    fn test_description_with_url() {
        let mut row = row();
        row.url = "https://developer.mozilla.org".into();

        let description = event_description(&row);
        assert!(description.ends_with(
            "🤖 Claudeで設計レビュー\n\n📖 参考URL: https://developer.mozilla.org"
        ));
    }

    #[test]
    fn test_custom_key_field_and_color() {
        let config = SyncConfig {
            key_field: "plan_key".into(),
            color_id: "3".into(),
            reminder_minutes: vec![],
            ..SyncConfig::default()
        };

        let payload = event_payload(&row(), &config).unwrap();
        assert_eq!(payload.private_properties["plan_key"], "2025-12-1");
        assert_eq!(payload.color_id, "3");
        assert!(payload.reminders.is_empty());
    }
}
