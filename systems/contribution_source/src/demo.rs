//! Fixed sample activity for offline previews.

use chrono::NaiveDate;
use contribution_canon_core::{ActivityDay, ContributionGrid, Summary, DAYS_PER_WEEK};

use crate::{DataOrigin, SourcedContributions};

/// Login attached to the sample activity.
pub const DEMO_USERNAME: &str = "demo-user";

/// Number of weeks in the sample grid.
pub const DEMO_WEEKS: usize = 53;

/// Sample activity: a sparse diagonal pattern that grows week over week.
#[must_use]
pub fn demo_contributions() -> SourcedContributions {
    let start = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap_or_default();
    let days = start
        .iter_days()
        .take(DEMO_WEEKS * DAYS_PER_WEEK)
        .enumerate()
        .map(|(offset, date)| {
            let week = offset / DAYS_PER_WEEK;
            let day = offset % DAYS_PER_WEEK;
            ActivityDay::new(date, demo_count(week, day))
        });

    let grid = ContributionGrid::from_days(days);
    let summary = Summary::from_grid(DEMO_USERNAME, &grid);
    SourcedContributions {
        grid,
        summary,
        origin: DataOrigin::Demo,
    }
}

fn demo_count(week: usize, day: usize) -> u32 {
    if (week + day).is_multiple_of(3) && week.is_multiple_of(2) {
        (week / 4 + day * 2).min(15) as u32
    } else {
        0
    }
}
