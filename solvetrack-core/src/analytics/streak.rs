//! Streak calculation.
//!
//! Two tiers are kept apart on purpose:
//! - the per-day historical streak stored on each [`DailyStat`], which feeds
//!   the streak-history chart and never changes once a day is past;
//! - the live current streak, which is only non-zero while the run is still
//!   alive relative to the reference date (today or yesterday was active).

use chrono::NaiveDate;
use serde::Serialize;

use crate::types::DailyStat;

/// Streak summary over a daily series.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StreakSummary {
    /// Live streak relative to the reference date
    pub current: u32,
    /// Longest run in the history
    pub longest: u32,
    /// Start of the longest run (earliest one on ties)
    pub longest_start: Option<NaiveDate>,
    /// End of the longest run
    pub longest_end: Option<NaiveDate>,
    /// Days with at least one task
    pub active_days: u32,
    /// Most recent active date on or before the reference date
    pub last_active_date: Option<NaiveDate>,
}

/// Fill `streak` on each entry of a sorted daily series.
///
/// `streak(d) = streak(d - 1) + 1` when the previous calendar day has an
/// active entry, else 1. Inactive entries get 0.
pub fn annotate_streaks(daily: &mut [DailyStat]) {
    let mut prev: Option<(NaiveDate, u32)> = None;

    for day in daily.iter_mut() {
        if !day.is_active() {
            day.streak = 0;
            prev = None;
            continue;
        }
        day.streak = match prev {
            Some((prev_date, prev_streak)) if prev_date.succ_opt() == Some(day.date) => {
                prev_streak + 1
            }
            _ => 1,
        };
        prev = Some((day.date, day.streak));
    }
}

/// Live streak as of `reference`.
///
/// Uses the most recent active entry on or before `reference`. That entry
/// only counts when it is `reference` itself or the day before; a gap of two
/// or more days means the run is over and the result is 0.
pub fn current_streak(daily: &[DailyStat], reference: NaiveDate) -> u32 {
    let Some(last) = last_active_on_or_before(daily, reference) else {
        return 0;
    };
    let gap = (reference - last.date).num_days();
    if gap <= 1 {
        last.streak
    } else {
        0
    }
}

/// Summarize streaks over a sorted, annotated daily series.
pub fn summarize(daily: &[DailyStat], reference: NaiveDate) -> StreakSummary {
    let mut summary = StreakSummary {
        current: current_streak(daily, reference),
        last_active_date: last_active_on_or_before(daily, reference).map(|d| d.date),
        ..Default::default()
    };

    for day in daily.iter().filter(|d| d.is_active()) {
        summary.active_days += 1;
        if day.streak > summary.longest {
            summary.longest = day.streak;
            summary.longest_end = Some(day.date);
            summary.longest_start = day
                .date
                .checked_sub_signed(chrono::Duration::days(i64::from(day.streak) - 1));
        }
    }

    summary
}

fn last_active_on_or_before(daily: &[DailyStat], reference: NaiveDate) -> Option<&DailyStat> {
    daily
        .iter()
        .rev()
        .find(|d| d.is_active() && d.date <= reference)
}
