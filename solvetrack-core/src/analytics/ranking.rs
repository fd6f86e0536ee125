//! Best-day rankings.

use chrono::NaiveDate;
use serde::Serialize;

use crate::types::DailyStat;

/// Default number of ranked days.
pub const DEFAULT_TOP_DAYS: usize = 5;

/// A ranked day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TopDay {
    pub date: NaiveDate,
    pub task_count: u32,
    pub xp_sum: u64,
}

/// The `n` busiest days by task count.
///
/// Ties go to the more recent date. Days without tasks never rank.
pub fn top_days(daily: &[DailyStat], n: usize) -> Vec<TopDay> {
    let mut ranked: Vec<&DailyStat> = daily.iter().filter(|d| d.task_count > 0).collect();
    ranked.sort_by(|a, b| {
        b.task_count
            .cmp(&a.task_count)
            .then_with(|| b.date.cmp(&a.date))
    });

    ranked
        .into_iter()
        .take(n)
        .map(|d| TopDay {
            date: d.date,
            task_count: d.task_count,
            xp_sum: d.xp_sum,
        })
        .collect()
}
