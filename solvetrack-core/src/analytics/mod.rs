//! Analytics module for solvetrack
//!
//! Every view is derived from one daily series built by [`daily`]:
//! - Streaks over consecutive active days
//! - Monday-first calendar grid for a month
//! - Month totals and goal progress
//! - Cumulative XP, weekday distribution and weekly time trend
//! - Best-day rankings and lifetime XP ranks
//!
//! [`snapshot::build_snapshot`] runs the whole pipeline and is the usual
//! entry point.

pub mod calendar;
pub mod daily;
pub mod distribution;
pub mod goal;
pub mod month;
pub mod period;
pub mod ranking;
pub mod snapshot;
pub mod streak;

pub use calendar::{build_calendar, build_calendar_for, CalendarCell, CalendarDay};
pub use daily::{aggregate_daily, records_on, trailing_window};
pub use distribution::{
    cumulative_xp, time_stats, weekday_distribution, weekly_time_trend, TimeTrendPoint,
};
pub use goal::{GoalProgress, Rank, RankProgress, RANKS};
pub use month::month_stats;
pub use period::{DateRange, MonthPeriod};
pub use ranking::{top_days, TopDay};
pub use snapshot::{
    build_snapshot, build_snapshot_from_records, AnalyticsSnapshot, ChartKind, ChartSeries,
    SnapshotRequest,
};
pub use streak::{current_streak, StreakSummary};
