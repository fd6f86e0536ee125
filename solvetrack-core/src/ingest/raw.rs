//! Raw record shape as it arrives from the record store.
//!
//! Different store snapshots name the reward and time fields differently,
//! and some carry more than one spelling at once. Every spelling gets its own
//! slot so serde never sees a duplicate field; the accessors apply the
//! "first present, non-null" rule in a fixed order.

use serde::Deserialize;

/// Identifier as stored: numeric or textual.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum RawId {
    Int(i64),
    Text(String),
}

impl std::fmt::Display for RawId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RawId::Int(n) => write!(f, "{}", n),
            RawId::Text(s) => f.write_str(s),
        }
    }
}

/// A task record before normalization.
///
/// Unknown fields (platform, notes, problem ids, ...) are ignored.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawTaskRecord {
    pub id: Option<RawId>,
    pub date: Option<String>,
    pub difficulty: Option<String>,

    // Reward, primary spellings
    #[serde(rename = "xpEarned")]
    pub xp_earned: Option<i64>,
    #[serde(rename = "xp_earned")]
    pub xp_earned_snake: Option<i64>,
    pub xp: Option<i64>,
    pub points: Option<i64>,
    // Reward, secondary spellings
    #[serde(rename = "xpSum")]
    pub xp_sum: Option<i64>,
    #[serde(rename = "xp_sum")]
    pub xp_sum_snake: Option<i64>,

    // Elapsed minutes, primary spellings
    #[serde(rename = "timeMinutes")]
    pub time_minutes: Option<i64>,
    #[serde(rename = "time_minutes")]
    pub time_minutes_snake: Option<i64>,
    // Elapsed minutes, secondary spellings
    #[serde(rename = "timeSpent")]
    pub time_spent: Option<i64>,
    #[serde(rename = "time_spent")]
    pub time_spent_snake: Option<i64>,
    #[serde(rename = "timeSpentMinutes")]
    pub time_spent_minutes: Option<i64>,
    #[serde(rename = "time_spent_minutes")]
    pub time_spent_minutes_snake: Option<i64>,

    #[serde(rename = "solvedAt")]
    pub solved_at: Option<String>,
    #[serde(rename = "solved_at")]
    pub solved_at_snake: Option<String>,
    pub title: Option<String>,
}

impl RawTaskRecord {
    /// Reward from the first present, non-null slot.
    pub fn reward(&self) -> Option<i64> {
        self.xp_earned
            .or(self.xp_earned_snake)
            .or(self.xp)
            .or(self.points)
            .or(self.xp_sum)
            .or(self.xp_sum_snake)
    }

    /// Elapsed minutes from the first present, non-null slot.
    pub fn elapsed_minutes(&self) -> Option<i64> {
        self.time_minutes
            .or(self.time_minutes_snake)
            .or(self.time_spent)
            .or(self.time_spent_snake)
            .or(self.time_spent_minutes)
            .or(self.time_spent_minutes_snake)
    }

    /// Solve timestamp text, camelCase spelling first.
    pub fn solved_timestamp(&self) -> Option<&str> {
        self.solved_at
            .as_deref()
            .or(self.solved_at_snake.as_deref())
    }
}
