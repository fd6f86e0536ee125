//! Daily aggregation.
//!
//! Groups normalized records by calendar date. The output is sparse (dates
//! without records have no entry) and always sorted ascending by date,
//! whatever order the records came in. Every other analytics component
//! relies on that ordering.

use std::collections::BTreeMap;

use chrono::NaiveDate;

use super::period::DateRange;
use super::streak;
use crate::types::{DailyStat, TaskRecord};

/// Aggregate records into one [`DailyStat`] per active date.
///
/// Each record is folded exactly once. Per-day `streak` values are filled in
/// before returning.
pub fn aggregate_daily(records: &[TaskRecord], range: Option<DateRange>) -> Vec<DailyStat> {
    let mut by_date: BTreeMap<NaiveDate, DailyStat> = BTreeMap::new();

    for record in records {
        if range.is_some_and(|r| !r.contains(record.date)) {
            continue;
        }
        by_date
            .entry(record.date)
            .or_insert_with(|| DailyStat::empty(record.date))
            .add(record);
    }

    let mut daily: Vec<DailyStat> = by_date.into_values().collect();
    streak::annotate_streaks(&mut daily);

    tracing::debug!(
        records = records.len(),
        days = daily.len(),
        "Aggregated daily stats"
    );
    daily
}

/// Records counted toward `date`, in input order.
pub fn records_on(records: &[TaskRecord], date: NaiveDate) -> Vec<TaskRecord> {
    records.iter().filter(|r| r.date == date).cloned().collect()
}

/// The last `size` entries of a sorted daily series.
pub fn trailing_window(daily: &[DailyStat], size: usize) -> &[DailyStat] {
    &daily[daily.len().saturating_sub(size)..]
}

/// Total tasks across a daily series.
pub fn total_tasks(daily: &[DailyStat]) -> u32 {
    daily.iter().map(|d| d.task_count).sum()
}

/// Total XP across a daily series.
pub fn total_xp(daily: &[DailyStat]) -> u64 {
    daily.iter().map(|d| d.xp_sum).sum()
}
