//! Month totals.

use super::period::MonthPeriod;
use crate::types::{DailyStat, MonthStats};

/// Totals for `period` from a daily series.
///
/// Entries outside the month are ignored, so the full history can be passed.
/// A missing goal is reported as a `target_xp` of 0.
pub fn month_stats(period: MonthPeriod, daily: &[DailyStat], target_xp: Option<u32>) -> MonthStats {
    let mut stats = MonthStats {
        year: period.year(),
        month: period.month(),
        target_xp: target_xp.unwrap_or(0),
        days_in_month: period.days_in_month(),
        ..Default::default()
    };

    for day in daily.iter().filter(|d| period.contains(d.date)) {
        stats.easy_count += day.easy_count;
        stats.medium_count += day.medium_count;
        stats.hard_count += day.hard_count;
        stats.total_tasks += day.task_count;
        stats.current_xp += day.xp_sum;
        if day.is_active() {
            stats.active_days += 1;
        }
    }

    stats
}
