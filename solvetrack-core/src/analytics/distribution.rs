//! Cumulative totals, weekday distribution and time trends.
//!
//! The cumulative curve works on a (possibly windowed) daily series. The
//! weekday distribution always covers the whole history. Time statistics are
//! computed from raw records because daily stats do not keep per-record
//! times.

use std::collections::BTreeMap;

use chrono::{Datelike, NaiveDate};
use serde::Serialize;

use crate::types::{DailyStat, Difficulty, TaskRecord, TimeStats};

/// Default number of weekly buckets kept in the time trend.
pub const DEFAULT_TREND_WEEKS: usize = 8;

/// Weekday labels, Monday first.
pub const WEEKDAY_LABELS: [&str; 7] = ["Mon", "Tue", "Wed", "Thu", "Fri", "Sat", "Sun"];

/// Mean time per task for one calendar week.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TimeTrendPoint {
    /// Monday of the week
    pub week_start: NaiveDate,
    /// `YYYY-MM-DD` of `week_start`
    pub week_label: String,
    /// Mean minutes per timed task, one decimal
    pub avg_minutes: f64,
    /// Timed tasks in the bucket
    pub tasks: u32,
}

/// Running XP total, index-aligned with `daily`.
pub fn cumulative_xp(daily: &[DailyStat]) -> Vec<u64> {
    daily
        .iter()
        .scan(0u64, |total, day| {
            *total += day.xp_sum;
            Some(*total)
        })
        .collect()
}

/// Task counts by day of week, Monday first.
pub fn weekday_distribution(daily: &[DailyStat]) -> [u32; 7] {
    let mut buckets = [0u32; 7];
    for day in daily {
        buckets[day.date.weekday().num_days_from_monday() as usize] += day.task_count;
    }
    buckets
}

/// Monday of the week containing `date`.
pub fn week_start(date: NaiveDate) -> NaiveDate {
    let offset = i64::from(date.weekday().num_days_from_monday());
    date.checked_sub_signed(chrono::Duration::days(offset))
        .unwrap_or(date)
}

/// Mean time per week over records with a known time.
///
/// Buckets are keyed by the Monday of each record's `solved_at` week, sorted
/// chronologically, and only the most recent `max_weeks` are kept.
pub fn weekly_time_trend(records: &[TaskRecord], max_weeks: usize) -> Vec<TimeTrendPoint> {
    let mut buckets: BTreeMap<NaiveDate, (u64, u32)> = BTreeMap::new();

    for record in records {
        if let Some(minutes) = record.time_spent_minutes {
            let bucket = buckets
                .entry(week_start(record.solved_at.date()))
                .or_insert((0, 0));
            bucket.0 += u64::from(minutes);
            bucket.1 += 1;
        }
    }

    let skip = buckets.len().saturating_sub(max_weeks);
    buckets
        .into_iter()
        .skip(skip)
        .map(|(week_start, (total, count))| TimeTrendPoint {
            week_start,
            week_label: week_start.format("%Y-%m-%d").to_string(),
            avg_minutes: mean(total, count),
            tasks: count,
        })
        .collect()
}

/// Time statistics over records with a known time.
pub fn time_stats(records: &[TaskRecord]) -> TimeStats {
    let mut totals = [(0u64, 0u32); 3];

    for record in records {
        if let Some(minutes) = record.time_spent_minutes {
            let slot = &mut totals[difficulty_index(record.difficulty)];
            slot.0 += u64::from(minutes);
            slot.1 += 1;
        }
    }

    let total_time: u64 = totals.iter().map(|(t, _)| t).sum();
    let timed_tasks: u32 = totals.iter().map(|(_, c)| c).sum();
    let avg = |difficulty: Difficulty| {
        let (total, count) = totals[difficulty_index(difficulty)];
        mean(total, count)
    };

    TimeStats {
        avg_time_easy: avg(Difficulty::Easy),
        avg_time_medium: avg(Difficulty::Medium),
        avg_time_hard: avg(Difficulty::Hard),
        average_time: mean(total_time, timed_tasks),
        total_time,
        timed_tasks,
    }
}

fn difficulty_index(difficulty: Difficulty) -> usize {
    match difficulty {
        Difficulty::Easy => 0,
        Difficulty::Medium => 1,
        Difficulty::Hard => 2,
    }
}

/// Mean rounded to one decimal; 0 when there is nothing to average.
fn mean(total: u64, count: u32) -> f64 {
    if count == 0 {
        return 0.0;
    }
    let value = total as f64 / f64::from(count);
    (value * 10.0).round() / 10.0
}
