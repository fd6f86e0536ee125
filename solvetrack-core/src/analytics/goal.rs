//! Monthly goal progress and lifetime XP ranks.

use serde::Serialize;

/// Progress toward a monthly XP target.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GoalProgress {
    /// `round(current / target * 100)`; can exceed 100
    pub percent: u32,
    /// XP still missing, never negative
    pub remaining: u64,
    pub reached: bool,
}

impl GoalProgress {
    /// Compute progress. A missing or zero target means "no goal" and yields
    /// all zeros.
    pub fn compute(current_xp: u64, target_xp: Option<u32>) -> Self {
        let target = match target_xp {
            Some(t) if t > 0 => u64::from(t),
            _ => return Self::default(),
        };

        let percent = (current_xp as f64 / target as f64 * 100.0).round();
        Self {
            percent: if percent >= f64::from(u32::MAX) {
                u32::MAX
            } else {
                percent as u32
            },
            remaining: target.saturating_sub(current_xp),
            reached: current_xp >= target,
        }
    }
}

/// A lifetime XP tier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Rank {
    pub name: &'static str,
    pub min_xp: u64,
}

/// Rank ladder, ascending by threshold.
pub const RANKS: [Rank; 7] = [
    Rank { name: "Beginner", min_xp: 0 },
    Rank { name: "Apprentice", min_xp: 100 },
    Rank { name: "Skilled", min_xp: 300 },
    Rank { name: "Expert", min_xp: 600 },
    Rank { name: "Master", min_xp: 1000 },
    Rank { name: "Grandmaster", min_xp: 2000 },
    Rank { name: "Legend", min_xp: 4000 },
];

impl Rank {
    /// Highest rank whose threshold `xp` meets.
    pub fn for_xp(xp: u64) -> Rank {
        RANKS
            .iter()
            .rev()
            .find(|r| xp >= r.min_xp)
            .copied()
            .unwrap_or(RANKS[0])
    }

    /// Lowest rank still above `xp`, if any.
    pub fn next_after(xp: u64) -> Option<Rank> {
        RANKS.iter().find(|r| xp < r.min_xp).copied()
    }
}

/// Where a lifetime XP total sits on the ladder.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RankProgress {
    pub total_xp: u64,
    pub current: Rank,
    /// `None` at the top of the ladder
    pub next: Option<Rank>,
    /// 0 at the top of the ladder
    pub xp_to_next: u64,
}

impl RankProgress {
    pub fn compute(total_xp: u64) -> Self {
        let next = Rank::next_after(total_xp);
        Self {
            total_xp,
            current: Rank::for_xp(total_xp),
            next,
            xp_to_next: next.map(|r| r.min_xp - total_xp).unwrap_or(0),
        }
    }
}
