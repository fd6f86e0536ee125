//! Core domain types for solvetrack
//!
//! These types represent the canonical data model that every analytics view
//! is derived from.
//!
//! ## Terminology
//!
//! | Term | Definition |
//! |------|------------|
//! | **Task** | One solved coding-practice problem |
//! | **XP** | Integer reward earned for a task, keyed by difficulty |
//! | **DailyStat** | Aggregate of all tasks counted toward one calendar date |
//! | **Streak** | Consecutive calendar days with at least one task |
//! | **Goal** | Caller-configured monthly XP target |
//!
//! Records arrive from an external store in several shapes. The
//! [`crate::ingest`] layer resolves them into [`TaskRecord`] once, and nothing
//! downstream looks at raw field names again.

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

// ============================================
// Difficulty
// ============================================

/// Difficulty tag of a solved task.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

impl Difficulty {
    /// All difficulties in presentation order.
    pub const ALL: [Difficulty; 3] = [Difficulty::Easy, Difficulty::Medium, Difficulty::Hard];

    pub fn as_str(&self) -> &'static str {
        match self {
            Difficulty::Easy => "Easy",
            Difficulty::Medium => "Medium",
            Difficulty::Hard => "Hard",
        }
    }

    /// XP granted when a record carries no reward field at all.
    pub fn default_xp(&self) -> u32 {
        match self {
            Difficulty::Easy => 10,
            Difficulty::Medium => 20,
            Difficulty::Hard => 30,
        }
    }
}

impl std::fmt::Display for Difficulty {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Difficulty {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "easy" => Ok(Difficulty::Easy),
            "medium" => Ok(Difficulty::Medium),
            "hard" => Ok(Difficulty::Hard),
            _ => Err(format!("unknown difficulty: {}", s)),
        }
    }
}

// ============================================
// TaskRecord
// ============================================

/// A normalized task-completion record.
///
/// Immutable once produced by the normalizer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskRecord {
    /// Identifier from the store, or a positional id when the store had none
    pub id: String,
    /// Calendar date the task counts toward
    pub date: NaiveDate,
    pub difficulty: Difficulty,
    /// Reward points
    pub xp: u32,
    /// Minutes spent; `None` means unknown, not zero
    pub time_spent_minutes: Option<u32>,
    /// When the task was solved (used for week bucketing only)
    pub solved_at: NaiveDateTime,
    /// Problem title, if the store has one
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
}

// ============================================
// DailyStat
// ============================================

/// Aggregated statistics for one calendar date.
///
/// `easy_count + medium_count + hard_count == task_count` always holds, and
/// `xp_sum` is the sum of `xp` over the same records.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DailyStat {
    pub date: NaiveDate,
    pub task_count: u32,
    pub xp_sum: u64,
    pub easy_count: u32,
    pub medium_count: u32,
    pub hard_count: u32,
    /// Consecutive active days ending at this date (0 for an inactive day)
    pub streak: u32,
}

impl DailyStat {
    /// A zero-valued day with no contributing records.
    pub fn empty(date: NaiveDate) -> Self {
        Self {
            date,
            task_count: 0,
            xp_sum: 0,
            easy_count: 0,
            medium_count: 0,
            hard_count: 0,
            streak: 0,
        }
    }

    /// Fold one record into this day.
    pub fn add(&mut self, record: &TaskRecord) {
        self.task_count += 1;
        self.xp_sum += u64::from(record.xp);
        match record.difficulty {
            Difficulty::Easy => self.easy_count += 1,
            Difficulty::Medium => self.medium_count += 1,
            Difficulty::Hard => self.hard_count += 1,
        }
    }

    pub fn count_for(&self, difficulty: Difficulty) -> u32 {
        match difficulty {
            Difficulty::Easy => self.easy_count,
            Difficulty::Medium => self.medium_count,
            Difficulty::Hard => self.hard_count,
        }
    }

    pub fn is_active(&self) -> bool {
        self.task_count > 0
    }
}

// ============================================
// MonthStats / TimeStats
// ============================================

/// Totals for one requested year+month.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthStats {
    pub year: i32,
    pub month: u32,
    pub easy_count: u32,
    pub medium_count: u32,
    pub hard_count: u32,
    pub total_tasks: u32,
    /// Configured goal (0 when no goal is set)
    pub target_xp: u32,
    /// Sum of `xp_sum` over the month's daily stats
    pub current_xp: u64,
    /// Days in the month with at least one task
    pub active_days: u32,
    pub days_in_month: u32,
}

/// Time-spent statistics over records with a known time.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TimeStats {
    pub avg_time_easy: f64,
    pub avg_time_medium: f64,
    pub avg_time_hard: f64,
    /// Mean over every timed record regardless of difficulty
    pub average_time: f64,
    /// Sum of known minutes
    pub total_time: u64,
    /// Number of records with a known time
    pub timed_tasks: u32,
}

impl TimeStats {
    pub fn avg_for(&self, difficulty: Difficulty) -> f64 {
        match difficulty {
            Difficulty::Easy => self.avg_time_easy,
            Difficulty::Medium => self.avg_time_medium,
            Difficulty::Hard => self.avg_time_hard,
        }
    }
}
