#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Deterministic statistics derived from a contribution grid.

use contribution_canon_core::{ActivityDay, ContributionGrid};
use serde::Serialize;

/// Aggregate figures describing a user's activity grid.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize)]
pub struct ActivityStats {
    /// Number of day cells in the grid.
    pub total_days: usize,
    /// Number of days with at least one action.
    pub active_days: usize,
    /// Sum of all day counts.
    pub total: u64,
    /// Largest single-day count.
    pub max_daily: u32,
    /// Longest run of consecutive active days in grid order.
    pub longest_streak: usize,
    /// Run of active days ending at the most recent cell.
    pub current_streak: usize,
}

/// Pure analytics system computing [`ActivityStats`].
#[derive(Debug, Default)]
pub struct Analytics;

impl Analytics {
    /// Creates a new analytics system.
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    /// Computes statistics for `grid` in a single pass.
    #[must_use]
    pub fn compute(&self, grid: &ContributionGrid) -> ActivityStats {
        let mut stats = ActivityStats::default();
        let mut run = 0;

        for day in grid.days() {
            stats.total_days += 1;
            stats.total += u64::from(day.count());
            stats.max_daily = stats.max_daily.max(day.count());

            if day.is_active() {
                stats.active_days += 1;
                run += 1;
                stats.longest_streak = stats.longest_streak.max(run);
            } else {
                run = 0;
            }
        }

        stats.current_streak = current_streak(grid.days());
        stats
    }
}

fn current_streak<'a, I>(days: I) -> usize
where
    I: DoubleEndedIterator<Item = &'a ActivityDay>,
{
    days.rev().take_while(|day| day.is_active()).count()
}
