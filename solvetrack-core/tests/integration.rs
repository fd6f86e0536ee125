//! Integration tests for the solvetrack ingestion and analytics pipeline
//!
//! Record files are written into a temporary directory and run through
//! `load_and_normalize` followed by `build_snapshot`.

use chrono::{Datelike, NaiveDate};
use solvetrack_core::analytics::{
    build_snapshot, AnalyticsSnapshot, CalendarDay, ChartKind, SnapshotRequest,
};
use solvetrack_core::config::AnalyticsConfig;
use solvetrack_core::ingest::{self, SkipReason};
use solvetrack_core::{Difficulty, Error};
use std::path::PathBuf;
use tempfile::TempDir;

/// Write `content` to a file inside `dir`
fn write_fixture(dir: &TempDir, name: &str, content: &str) -> PathBuf {
    let path = dir.path().join(name);
    std::fs::write(&path, content).expect("failed to write fixture");
    path
}

fn date(s: &str) -> NaiveDate {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
}

const MIXED_STORE: &str = r#"[
  {"id": 1, "date": "2024-06-01", "difficulty": "Easy", "xpEarned": 10, "timeMinutes": 12, "solvedAt": "2024-06-01T09:15:00Z", "title": "Two Sum"},
  {"id": "b", "date": "2024-06-02", "difficulty": "hard", "xpSum": 30, "timeSpent": 48},
  {"id": 3, "date": "2024-06-02", "difficulty": "Medium", "xp": 20},
  {"id": 4, "date": "2024-06-04", "difficulty": "Medium"},
  {"id": 5, "date": "not-a-date", "difficulty": "Easy", "xpEarned": 10},
  {"id": 6, "date": "2024-06-05", "difficulty": "Impossible", "xpEarned": 10},
  {"id": 7, "difficulty": "Easy"},
  {"id": 8, "date": "2024-06-05", "difficulty": "Easy", "xpEarned": -5},
  "not an object",
  {"id": 10, "date": "2024-05-30", "difficulty": "Easy", "points": 10, "timeMinutes": -3}
]"#;

fn june_snapshot(path: &std::path::Path, target: Option<u32>) -> AnalyticsSnapshot {
    let normalized = ingest::load_and_normalize(path).expect("load should succeed");
    let request = SnapshotRequest::new(2024, 6, date("2024-06-04"))
        .unwrap()
        .with_target(target);
    build_snapshot(&normalized, &request)
}

// ============================================
// Ingestion Tests
// ============================================

#[test]
fn test_mixed_store_normalization() {
    let dir = TempDir::new().unwrap();
    let path = write_fixture(&dir, "tasks.json", MIXED_STORE);

    let result = ingest::load_and_normalize(&path).unwrap();
    assert_eq!(result.records.len(), 5);
    assert_eq!(result.skipped_count(), 5);

    let reasons: Vec<(usize, SkipReason)> =
        result.skipped.iter().map(|s| (s.index, s.reason)).collect();
    assert_eq!(
        reasons,
        vec![
            (4, SkipReason::InvalidDate),
            (5, SkipReason::InvalidDifficulty),
            (6, SkipReason::MissingDate),
            (7, SkipReason::NegativeXp),
            (8, SkipReason::Malformed),
        ]
    );
    assert_eq!(result.skipped[0].id.as_deref(), Some("5"));
    assert_eq!(result.skipped[4].id, None);

    let hard = &result.records[1];
    assert_eq!(hard.id, "b");
    assert_eq!(hard.difficulty, Difficulty::Hard);
    assert_eq!(hard.xp, 30);
    assert_eq!(hard.time_spent_minutes, Some(48));

    // Missing reward falls back to the difficulty default
    assert_eq!(result.records[3].xp, 20);

    // Negative time is unknown, not a skip
    let may = &result.records[4];
    assert_eq!(may.date, date("2024-05-30"));
    assert_eq!(may.time_spent_minutes, None);
}

#[test]
fn test_wrapper_object_and_jsonl_layouts() {
    let dir = TempDir::new().unwrap();
    let wrapped = write_fixture(
        &dir,
        "wrapped.json",
        r#"{"tasks": [{"date": "2024-06-01", "difficulty": "Easy"}]}"#,
    );
    let jsonl = write_fixture(
        &dir,
        "tasks.jsonl",
        "{\"date\": \"2024-06-01\", \"difficulty\": \"Easy\"}\n\n{broken\n{\"date\": \"2024-06-03\", \"difficulty\": \"Hard\"}\n",
    );

    let wrapped = ingest::load_and_normalize(&wrapped).unwrap();
    assert_eq!(wrapped.records.len(), 1);
    assert_eq!(wrapped.records[0].id, "record-0");

    let jsonl = ingest::load_and_normalize(&jsonl).unwrap();
    assert_eq!(jsonl.records.len(), 2);
    assert_eq!(jsonl.skipped_count(), 1);
    assert_eq!(jsonl.skipped[0].reason, SkipReason::Malformed);
}

#[test]
fn test_broken_array_is_an_error() {
    let dir = TempDir::new().unwrap();
    let path = write_fixture(&dir, "tasks.json", "[{\"date\": ");
    assert!(matches!(
        ingest::load_and_normalize(&path),
        Err(Error::Json(_))
    ));
}

#[test]
fn test_missing_file_is_an_io_error() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("absent.json");
    assert!(matches!(ingest::load_and_normalize(&path), Err(Error::Io(_))));
}

// ============================================
// Snapshot Tests
// ============================================

#[test]
fn test_snapshot_invariants() {
    let dir = TempDir::new().unwrap();
    let path = write_fixture(&dir, "tasks.json", MIXED_STORE);
    let snapshot = june_snapshot(&path, Some(100));

    assert_eq!(snapshot.skipped_records, 5);

    // Difficulty counts partition each day's tasks
    for day in &snapshot.daily_stats {
        assert_eq!(
            day.easy_count + day.medium_count + day.hard_count,
            day.task_count
        );
    }

    // Month XP equals the sum of the month's daily entries
    let june_xp: u64 = snapshot
        .daily_stats
        .iter()
        .filter(|d| d.date.month() == 6)
        .map(|d| d.xp_sum)
        .sum();
    assert_eq!(snapshot.month_stats.current_xp, june_xp);
    assert_eq!(snapshot.month_stats.current_xp, 80);
    assert_eq!(snapshot.month_stats.total_tasks, 4);

    // Weekday distribution covers every task in the history
    let total_tasks: u32 = snapshot.daily_stats.iter().map(|d| d.task_count).sum();
    assert_eq!(snapshot.weekday_distribution.iter().sum::<u32>(), total_tasks);

    // Calendar is leading padding plus every day of June
    let padding = snapshot
        .calendar_days
        .iter()
        .take_while(|c| c.is_padding())
        .count();
    assert!(padding <= 6);
    assert_eq!(snapshot.calendar_days.len(), padding + 30);

    // Ranking is by count desc, then date desc
    assert!(snapshot.top_days.windows(2).all(|w| {
        w[0].task_count > w[1].task_count
            || (w[0].task_count == w[1].task_count && w[0].date > w[1].date)
    }));
    assert_eq!(snapshot.top_days[0].date, date("2024-06-02"));

    assert_eq!(snapshot.goal_progress.percent, 80);
    assert_eq!(snapshot.goal_progress.remaining, 20);
}

#[test]
fn test_calendar_cells_carry_tasks() {
    let dir = TempDir::new().unwrap();
    let path = write_fixture(&dir, "tasks.json", MIXED_STORE);
    let snapshot = june_snapshot(&path, None);

    let june_2 = snapshot
        .calendar_days
        .iter()
        .filter_map(CalendarDay::cell)
        .find(|c| c.date == date("2024-06-02"))
        .expect("June 2 should be on the grid");
    assert_eq!(june_2.tasks.len(), 2);
    assert_eq!(june_2.stat.task_count, 2);
    assert!(june_2.is_clickable());
    assert!(!june_2.is_today);

    let today = snapshot
        .calendar_days
        .iter()
        .filter_map(CalendarDay::cell)
        .find(|c| c.is_today)
        .expect("reference date should be marked");
    assert_eq!(today.date, date("2024-06-04"));

    // No target means no goal
    assert_eq!(snapshot.goal_progress.percent, 0);
    assert_eq!(snapshot.goal_progress.remaining, 0);
}

#[test]
fn test_streak_across_month_boundary() {
    let dir = TempDir::new().unwrap();
    let path = write_fixture(
        &dir,
        "tasks.json",
        r#"[
          {"date": "2024-05-30", "difficulty": "Easy"},
          {"date": "2024-05-31", "difficulty": "Easy"},
          {"date": "2024-06-01", "difficulty": "Easy"}
        ]"#,
    );
    let normalized = ingest::load_and_normalize(&path).unwrap();
    let request = SnapshotRequest::for_reference(date("2024-06-02"));
    let snapshot = build_snapshot(&normalized, &request);

    assert_eq!(snapshot.daily_stats[2].streak, 3);
    // Yesterday still counts toward a live streak
    assert_eq!(snapshot.current_streak(), 3);
    assert_eq!(snapshot.streak.longest, 3);
    assert_eq!(snapshot.streak.longest_start, Some(date("2024-05-30")));

    let later = SnapshotRequest::for_reference(date("2024-06-03"));
    assert_eq!(build_snapshot(&normalized, &later).current_streak(), 0);
}

#[test]
fn test_configured_windows_apply() {
    let dir = TempDir::new().unwrap();
    let path = write_fixture(&dir, "tasks.json", MIXED_STORE);
    let normalized = ingest::load_and_normalize(&path).unwrap();

    let settings = AnalyticsConfig {
        trailing_window: 2,
        top_days: 1,
        trend_weeks: 1,
    };
    let request = SnapshotRequest::for_reference(date("2024-06-04")).with_settings(&settings);
    let snapshot = build_snapshot(&normalized, &request);

    assert_eq!(snapshot.cumulative_xp.len(), 2);
    assert_eq!(
        snapshot.cumulative_labels,
        vec![date("2024-06-02"), date("2024-06-04")]
    );
    assert_eq!(snapshot.top_days.len(), 1);
    assert!(snapshot.time_trend.len() <= 1);
    assert_eq!(snapshot.series(ChartKind::DailyTasks).len(), 2);
}

#[test]
fn test_snapshot_serialization_is_stable() {
    let dir = TempDir::new().unwrap();
    let path = write_fixture(&dir, "tasks.json", MIXED_STORE);

    let first = serde_json::to_string(&june_snapshot(&path, Some(100))).unwrap();
    let second = serde_json::to_string(&june_snapshot(&path, Some(100))).unwrap();
    assert_eq!(first, second);

    let value: serde_json::Value = serde_json::from_str(&first).unwrap();
    assert!(value.get("dailyStats").is_some());
    assert!(value.get("weekdayDistribution").is_some());
    assert_eq!(value["goalProgress"]["percent"], 80);
    assert_eq!(value["calendarDays"][0]["kind"], "padding");
}
