//! Monday-first month calendar grid.
//!
//! A grid is `leading_padding` empty cells followed by one cell per day of
//! the month. There is no trailing padding, so the grid length is always
//! `leading_padding + days_in_month`.

use std::collections::HashMap;

use chrono::{Datelike, NaiveDate};
use serde::Serialize;

use super::period::MonthPeriod;
use crate::error::Result;
use crate::types::{DailyStat, TaskRecord};

/// XP per heat level step.
const XP_PER_INTENSITY_LEVEL: u64 = 5;
/// Highest heat level.
const MAX_INTENSITY: u8 = 5;

/// One cell of the calendar grid.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum CalendarDay {
    /// Blank cell before the first of the month
    Padding,
    /// A real day of the month
    Day(CalendarCell),
}

impl CalendarDay {
    pub fn is_padding(&self) -> bool {
        matches!(self, CalendarDay::Padding)
    }

    pub fn cell(&self) -> Option<&CalendarCell> {
        match self {
            CalendarDay::Padding => None,
            CalendarDay::Day(cell) => Some(cell),
        }
    }
}

/// A day cell with its stats and drill-down records.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CalendarCell {
    pub date: NaiveDate,
    /// Zero-valued when the date has no records
    pub stat: DailyStat,
    /// Records counted toward this date
    pub tasks: Vec<TaskRecord>,
    pub is_today: bool,
    /// Heat level 0..=5
    pub intensity: u8,
}

impl CalendarCell {
    /// Only days with tasks open a drill-down.
    pub fn is_clickable(&self) -> bool {
        self.stat.task_count > 0
    }
}

/// Heat level for a day: `min(ceil(xp / 5), 5)`, 0 for an inactive day.
pub fn intensity(stat: &DailyStat) -> u8 {
    if stat.task_count == 0 {
        return 0;
    }
    let level = stat.xp_sum.saturating_add(XP_PER_INTENSITY_LEVEL - 1) / XP_PER_INTENSITY_LEVEL;
    u8::try_from(level.min(u64::from(MAX_INTENSITY))).unwrap_or(MAX_INTENSITY)
}

/// Number of blank cells before the first of the month.
///
/// `(weekday(first) - 1) mod 7` with weekdays numbered 0=Sunday..6=Saturday,
/// so a month starting on Monday gets none and one starting on Sunday gets 6.
pub fn leading_padding(first_of_month: NaiveDate) -> usize {
    let sunday_based = first_of_month.weekday().num_days_from_sunday() as usize;
    (sunday_based + 6) % 7
}

/// Build the grid for `period`.
///
/// `daily` must be sorted (as produced by the aggregator); only entries inside
/// the month are used. `today` marks the matching cell by calendar date.
pub fn build_calendar(
    period: MonthPeriod,
    daily: &[DailyStat],
    records: &[TaskRecord],
    today: NaiveDate,
) -> Vec<CalendarDay> {
    let first = period.first_day();
    let padding = leading_padding(first);
    let days = period.days_in_month();

    let stats: HashMap<NaiveDate, &DailyStat> = daily
        .iter()
        .filter(|d| period.contains(d.date))
        .map(|d| (d.date, d))
        .collect();

    let mut tasks_by_date: HashMap<NaiveDate, Vec<TaskRecord>> = HashMap::new();
    for record in records.iter().filter(|r| period.contains(r.date)) {
        tasks_by_date
            .entry(record.date)
            .or_default()
            .push(record.clone());
    }

    let mut grid = Vec::with_capacity(padding + days as usize);
    grid.extend(std::iter::repeat(CalendarDay::Padding).take(padding));

    for date in first.iter_days().take(days as usize) {
        let stat = stats
            .get(&date)
            .map(|s| (*s).clone())
            .unwrap_or_else(|| DailyStat::empty(date));
        let tasks = tasks_by_date.remove(&date).unwrap_or_default();
        grid.push(CalendarDay::Day(CalendarCell {
            date,
            intensity: intensity(&stat),
            stat,
            tasks,
            is_today: date == today,
        }));
    }

    tracing::debug!(
        period = %period.display_name(),
        padding,
        cells = grid.len(),
        "Built calendar grid"
    );
    grid
}

/// Build the grid for a raw year/month, rejecting invalid months.
pub fn build_calendar_for(
    year: i32,
    month: u32,
    daily: &[DailyStat],
    records: &[TaskRecord],
    today: NaiveDate,
) -> Result<Vec<CalendarDay>> {
    let period = MonthPeriod::new(year, month)?;
    Ok(build_calendar(period, daily, records, today))
}
