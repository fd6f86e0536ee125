//! Snapshot assembly.
//!
//! Runs the full pipeline over one record batch and returns a single
//! [`AnalyticsSnapshot`]. Every invocation starts from scratch: no state
//! survives between calls and identical input gives identical output.
//!
//! ```text
//! records ─► normalize ─► aggregate_daily ─┬─► streaks
//!                                          ├─► calendar grid
//!                                          ├─► cumulative / weekday / trend
//!                                          ├─► top days
//!                                          └─► month stats ─► goal progress
//! ```

use chrono::NaiveDate;
use serde::Serialize;

use super::calendar::{build_calendar, CalendarDay};
use super::daily::{aggregate_daily, total_xp, trailing_window};
use super::distribution::{
    cumulative_xp, time_stats, weekday_distribution, weekly_time_trend, TimeTrendPoint,
    DEFAULT_TREND_WEEKS, WEEKDAY_LABELS,
};
use super::goal::{GoalProgress, RankProgress};
use super::month::month_stats;
use super::period::MonthPeriod;
use super::ranking::{top_days, TopDay, DEFAULT_TOP_DAYS};
use super::streak::{summarize, StreakSummary};
use crate::config::AnalyticsConfig;
use crate::error::Result;
use crate::ingest::NormalizeResult;
use crate::types::{DailyStat, Difficulty, MonthStats, TaskRecord, TimeStats};

/// Default number of daily entries used by windowed charts.
pub const DEFAULT_TRAILING_WINDOW: usize = 30;

/// Parameters for one snapshot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SnapshotRequest {
    /// Month shown in the calendar and month totals
    pub period: MonthPeriod,
    /// "Today" for streak liveness and calendar marking
    pub reference_date: NaiveDate,
    /// Monthly goal; `None` or 0 means no goal
    pub target_xp: Option<u32>,
    /// Daily entries used by windowed charts
    pub trailing_window: usize,
    /// Number of ranked days
    pub top_days: usize,
    /// Weekly buckets kept in the time trend
    pub trend_weeks: usize,
}

impl SnapshotRequest {
    /// Request for an explicit year/month. Invalid months are rejected.
    pub fn new(year: i32, month: u32, reference_date: NaiveDate) -> Result<Self> {
        let period = MonthPeriod::new(year, month)?;
        Ok(Self::for_period(period, reference_date))
    }

    /// Request for the month containing `reference_date`.
    pub fn for_reference(reference_date: NaiveDate) -> Self {
        Self::for_period(MonthPeriod::containing(reference_date), reference_date)
    }

    pub fn for_period(period: MonthPeriod, reference_date: NaiveDate) -> Self {
        Self {
            period,
            reference_date,
            target_xp: None,
            trailing_window: DEFAULT_TRAILING_WINDOW,
            top_days: DEFAULT_TOP_DAYS,
            trend_weeks: DEFAULT_TREND_WEEKS,
        }
    }

    pub fn with_target(mut self, target_xp: Option<u32>) -> Self {
        self.target_xp = target_xp;
        self
    }

    /// Apply window sizes from configuration.
    pub fn with_settings(mut self, settings: &AnalyticsConfig) -> Self {
        self.trailing_window = settings.trailing_window;
        self.top_days = settings.top_days;
        self.trend_weeks = settings.trend_weeks;
        self
    }
}

/// Every derived view for one record batch.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyticsSnapshot {
    pub period: MonthPeriod,
    pub reference_date: NaiveDate,
    /// Full history, sorted ascending by date
    pub daily_stats: Vec<DailyStat>,
    /// Monday-first grid for `period`, including leading padding
    pub calendar_days: Vec<CalendarDay>,
    pub month_stats: MonthStats,
    pub time_stats: TimeStats,
    /// Task counts by weekday over the full history, Monday first
    pub weekday_distribution: [u32; 7],
    /// Running XP over the trailing window
    pub cumulative_xp: Vec<u64>,
    /// Dates of the trailing window, aligned with `cumulative_xp`
    pub cumulative_labels: Vec<NaiveDate>,
    /// Chronological, most recent weeks only
    pub time_trend: Vec<TimeTrendPoint>,
    pub top_days: Vec<TopDay>,
    pub goal_progress: GoalProgress,
    pub streak: StreakSummary,
    /// Lifetime XP rank
    pub rank: RankProgress,
    /// Records dropped by the normalizer
    pub skipped_records: usize,
}

impl AnalyticsSnapshot {
    /// True when no record survived normalization.
    pub fn is_empty(&self) -> bool {
        self.daily_stats.is_empty()
    }

    /// The trailing window used by windowed charts.
    pub fn window(&self) -> &[DailyStat] {
        trailing_window(&self.daily_stats, self.cumulative_xp.len())
    }

    /// Current live streak.
    pub fn current_streak(&self) -> u32 {
        self.streak.current
    }

    /// Chart-backing series in the generic exporter shape.
    pub fn series(&self, kind: ChartKind) -> ChartSeries {
        match kind {
            ChartKind::DailyTasks => ChartSeries::from_points(
                self.window()
                    .iter()
                    .map(|d| (d.date.to_string(), f64::from(d.task_count))),
            ),
            ChartKind::DailyXp => ChartSeries::from_points(
                self.window()
                    .iter()
                    .map(|d| (d.date.to_string(), d.xp_sum as f64)),
            ),
            ChartKind::CumulativeXp => ChartSeries::from_points(
                self.cumulative_labels
                    .iter()
                    .zip(&self.cumulative_xp)
                    .map(|(date, xp)| (date.to_string(), *xp as f64)),
            ),
            ChartKind::StreakHistory => ChartSeries::from_points(
                self.window()
                    .iter()
                    .map(|d| (d.date.to_string(), f64::from(d.streak))),
            ),
            ChartKind::WeekdayDistribution => ChartSeries::from_points(
                WEEKDAY_LABELS
                    .iter()
                    .zip(self.weekday_distribution)
                    .map(|(label, count)| (label.to_string(), f64::from(count))),
            ),
            ChartKind::TimeTrend => ChartSeries::from_points(
                self.time_trend
                    .iter()
                    .map(|p| (p.week_label.clone(), p.avg_minutes)),
            ),
            ChartKind::TopDays => ChartSeries::from_points(
                self.top_days
                    .iter()
                    .map(|d| (d.date.to_string(), f64::from(d.task_count))),
            ),
            ChartKind::DifficultyBreakdown => {
                let stats = &self.month_stats;
                ChartSeries::from_points(Difficulty::ALL.into_iter().map(|difficulty| {
                    let count = match difficulty {
                        Difficulty::Easy => stats.easy_count,
                        Difficulty::Medium => stats.medium_count,
                        Difficulty::Hard => stats.hard_count,
                    };
                    (difficulty.to_string(), f64::from(count))
                }))
            }
            ChartKind::CalendarXp => ChartSeries::from_points(
                self.calendar_days
                    .iter()
                    .filter_map(|c| c.cell())
                    .map(|cell| (cell.date.to_string(), cell.stat.xp_sum as f64)),
            ),
        }
    }
}

/// Chart series that can be exported.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ChartKind {
    DailyTasks,
    DailyXp,
    CumulativeXp,
    StreakHistory,
    WeekdayDistribution,
    TimeTrend,
    TopDays,
    DifficultyBreakdown,
    CalendarXp,
}

impl ChartKind {
    pub const ALL: [ChartKind; 9] = [
        ChartKind::DailyTasks,
        ChartKind::DailyXp,
        ChartKind::CumulativeXp,
        ChartKind::StreakHistory,
        ChartKind::WeekdayDistribution,
        ChartKind::TimeTrend,
        ChartKind::TopDays,
        ChartKind::DifficultyBreakdown,
        ChartKind::CalendarXp,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ChartKind::DailyTasks => "daily_tasks",
            ChartKind::DailyXp => "daily_xp",
            ChartKind::CumulativeXp => "cumulative_xp",
            ChartKind::StreakHistory => "streak_history",
            ChartKind::WeekdayDistribution => "weekday_distribution",
            ChartKind::TimeTrend => "time_trend",
            ChartKind::TopDays => "top_days",
            ChartKind::DifficultyBreakdown => "difficulty_breakdown",
            ChartKind::CalendarXp => "calendar_xp",
        }
    }
}

impl std::str::FromStr for ChartKind {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        ChartKind::ALL
            .into_iter()
            .find(|kind| kind.as_str() == s)
            .ok_or_else(|| format!("unknown chart: {}", s))
    }
}

/// A labelled series: `labels[i]` names `values[i]`.
///
/// Only constructible from label/value pairs, so the two vectors always have
/// the same length.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ChartSeries {
    labels: Vec<String>,
    values: Vec<f64>,
}

impl ChartSeries {
    pub fn from_points<I>(points: I) -> Self
    where
        I: IntoIterator<Item = (String, f64)>,
    {
        let (labels, values) = points.into_iter().unzip();
        Self { labels, values }
    }

    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    pub fn values(&self) -> &[f64] {
        &self.values
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> + '_ {
        self.labels
            .iter()
            .map(String::as_str)
            .zip(self.values.iter().copied())
    }
}

/// Build a snapshot from normalized records.
pub fn build_snapshot(normalized: &NormalizeResult, request: &SnapshotRequest) -> AnalyticsSnapshot {
    build_snapshot_from_records(&normalized.records, normalized.skipped_count(), request)
}

/// Build a snapshot from already-canonical records.
pub fn build_snapshot_from_records(
    records: &[TaskRecord],
    skipped_records: usize,
    request: &SnapshotRequest,
) -> AnalyticsSnapshot {
    let daily_stats = aggregate_daily(records, None);
    let window = trailing_window(&daily_stats, request.trailing_window);

    let month_stats = month_stats(request.period, &daily_stats, request.target_xp);
    let goal_progress = GoalProgress::compute(month_stats.current_xp, request.target_xp);
    let streak = summarize(&daily_stats, request.reference_date);

    let snapshot = AnalyticsSnapshot {
        period: request.period,
        reference_date: request.reference_date,
        calendar_days: build_calendar(
            request.period,
            &daily_stats,
            records,
            request.reference_date,
        ),
        time_stats: time_stats(records),
        weekday_distribution: weekday_distribution(&daily_stats),
        cumulative_xp: cumulative_xp(window),
        cumulative_labels: window.iter().map(|d| d.date).collect(),
        time_trend: weekly_time_trend(records, request.trend_weeks),
        top_days: top_days(&daily_stats, request.top_days),
        rank: RankProgress::compute(total_xp(&daily_stats)),
        month_stats,
        goal_progress,
        streak,
        skipped_records,
        daily_stats,
    };

    tracing::info!(
        period = %request.period.display_name(),
        reference_date = %request.reference_date,
        days = snapshot.daily_stats.len(),
        current_streak = snapshot.streak.current,
        goal_percent = snapshot.goal_progress.percent,
        skipped = skipped_records,
        "Built analytics snapshot"
    );

    snapshot
}
