use serde::Serialize;
use thiserror::Error;

use crate::ActivityDay;

/// Number of day slots in a full week column.
pub const DAYS_PER_WEEK: usize = 7;

/// Position of a cell inside the grid: week column first, day row second.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct CellIndex {
    week: usize,
    day: usize,
}

impl CellIndex {
    /// Creates a new cell index.
    #[must_use]
    pub const fn new(week: usize, day: usize) -> Self {
        Self { week, day }
    }

    /// Zero-based week column.
    #[must_use]
    pub const fn week(&self) -> usize {
        self.week
    }

    /// Zero-based day row within the week.
    #[must_use]
    pub const fn day(&self) -> usize {
        self.day
    }
}

/// Week-major arrangement of activity days.
///
/// Every week holds exactly [`DAYS_PER_WEEK`] days except the final one,
/// which may be short when the source data does not divide evenly. Weeks are
/// kept in chronological order and days in the order they were encountered.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, Serialize)]
pub struct ContributionGrid {
    weeks: Vec<Vec<ActivityDay>>,
}

impl ContributionGrid {
    /// Creates a grid without any weeks.
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    /// Chunks a flat chronological run of days into a grid.
    #[must_use]
    pub fn from_days<I>(days: I) -> Self
    where
        I: IntoIterator<Item = ActivityDay>,
    {
        GridNormalizer::new().chunk(days)
    }

    /// Validates hand-assembled weeks and wraps them into a grid.
    ///
    /// Returns an error when a week is empty, holds more than seven days, or
    /// is short without being the final week.
    pub fn from_weeks(weeks: Vec<Vec<ActivityDay>>) -> Result<Self, GridShapeError> {
        let last = weeks.len().saturating_sub(1);
        for (week, days) in weeks.iter().enumerate() {
            let len = days.len();
            if len == 0 {
                return Err(GridShapeError::EmptyWeek { week });
            }
            if len > DAYS_PER_WEEK {
                return Err(GridShapeError::OverfullWeek { week, days: len });
            }
            if len < DAYS_PER_WEEK && week != last {
                return Err(GridShapeError::ShortInteriorWeek { week, days: len });
            }
        }

        Ok(Self { weeks })
    }

    /// Week columns in chronological order.
    pub fn weeks(&self) -> impl ExactSizeIterator<Item = &[ActivityDay]> + '_ {
        self.weeks.iter().map(Vec::as_slice)
    }

    /// Number of week columns.
    #[must_use]
    pub fn week_count(&self) -> usize {
        self.weeks.len()
    }

    /// Number of day cells across all weeks.
    #[must_use]
    pub fn day_count(&self) -> usize {
        self.weeks.iter().map(Vec::len).sum()
    }

    /// Returns `true` when the grid contains no weeks.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.weeks.is_empty()
    }

    /// Looks up the day stored at `index`.
    #[must_use]
    pub fn get(&self, index: CellIndex) -> Option<&ActivityDay> {
        self.weeks.get(index.week())?.get(index.day())
    }

    /// Iterates every cell in (week, day) order.
    pub fn cells(&self) -> impl Iterator<Item = (CellIndex, &ActivityDay)> + '_ {
        self.weeks.iter().enumerate().flat_map(|(week, days)| {
            days.iter()
                .enumerate()
                .map(move |(day, activity)| (CellIndex::new(week, day), activity))
        })
    }

    /// Iterates every day in chronological order.
    pub fn days(&self) -> impl DoubleEndedIterator<Item = &ActivityDay> + '_ {
        self.weeks.iter().flatten()
    }

    /// Flattens the grid back into a single ordered run of days.
    #[must_use]
    pub fn flatten(&self) -> Vec<ActivityDay> {
        self.days().copied().collect()
    }

    /// Sum of all day counts.
    #[must_use]
    pub fn total(&self) -> u64 {
        self.days().map(|day| u64::from(day.count())).sum()
    }

    /// Largest single-day count, or zero for an empty grid.
    #[must_use]
    pub fn max_daily(&self) -> u32 {
        self.days().map(ActivityDay::count).max().unwrap_or(0)
    }

    /// Number of days with at least one action.
    #[must_use]
    pub fn active_days(&self) -> usize {
        self.days().filter(|day| day.is_active()).count()
    }
}

/// Structural defects detected in hand-assembled grids.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
pub enum GridShapeError {
    /// A week column carried no days at all.
    #[error("week {week} is empty")]
    EmptyWeek {
        /// Index of the offending week.
        week: usize,
    },
    /// A week column carried more than seven days.
    #[error("week {week} holds {days} days; at most {DAYS_PER_WEEK} are allowed")]
    OverfullWeek {
        /// Index of the offending week.
        week: usize,
        /// Number of days found in the week.
        days: usize,
    },
    /// A week other than the last one was short.
    #[error("week {week} holds {days} days but only the final week may be short")]
    ShortInteriorWeek {
        /// Index of the offending week.
        week: usize,
        /// Number of days found in the week.
        days: usize,
    },
}

/// Batches a flat run of days into seven-day week columns.
///
/// The normalizer walks its input once without look-ahead, emitting a week
/// every time seven days have accumulated and flushing any remainder as a
/// final short week. The week buffer is reused across calls.
#[derive(Debug, Default)]
pub struct GridNormalizer {
    week_buffer: Vec<ActivityDay>,
}

impl GridNormalizer {
    /// Creates a normalizer with an empty week buffer.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Chunks `days` into a grid, preserving their order.
    ///
    /// An empty input yields a grid with zero weeks.
    pub fn chunk<I>(&mut self, days: I) -> ContributionGrid
    where
        I: IntoIterator<Item = ActivityDay>,
    {
        self.week_buffer.clear();
        let mut weeks = Vec::new();

        for day in days {
            self.week_buffer.push(day);
            if self.week_buffer.len() == DAYS_PER_WEEK {
                weeks.push(self.week_buffer.drain(..).collect());
            }
        }

        if !self.week_buffer.is_empty() {
            weeks.push(self.week_buffer.drain(..).collect());
        }

        ContributionGrid { weeks }
    }
}
