use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::ContributionGrid;

/// Discretised intensity of a single day, always within `0..=4`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct Level(u8);

impl Level {
    /// Level assigned to days without any activity.
    pub const NONE: Self = Self(0);

    /// Highest level a day can reach.
    pub const MAX: Self = Self(4);

    /// Number of distinct levels, matching the length of a palette scale.
    pub const COUNT: usize = 5;

    /// Buckets a raw activity count into its level.
    ///
    /// `0` maps to level 0, `1..=3` to 1, `4..=6` to 2, `7..=9` to 3 and
    /// anything from 10 upwards to 4.
    #[must_use]
    pub const fn from_count(count: u32) -> Self {
        let level = match count {
            0 => 0,
            1..=3 => 1,
            4..=6 => 2,
            7..=9 => 3,
            _ => 4,
        };
        Self(level)
    }

    /// Numeric value of the level.
    #[must_use]
    pub const fn get(self) -> u8 {
        self.0
    }

    /// Index of the level inside a five-step colour scale.
    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

/// One calendar day of activity.
///
/// The level is never stored independently of the count: it is derived on
/// construction and on deserialisation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "ActivityRecord", into = "ActivityRecord")]
pub struct ActivityDay {
    date: NaiveDate,
    count: u32,
    level: Level,
}

impl ActivityDay {
    /// Creates a day record and derives its level from `count`.
    #[must_use]
    pub const fn new(date: NaiveDate, count: u32) -> Self {
        Self {
            date,
            count,
            level: Level::from_count(count),
        }
    }

    /// Creates a day record without any activity.
    #[must_use]
    pub const fn empty(date: NaiveDate) -> Self {
        Self::new(date, 0)
    }

    /// Calendar date the record describes.
    #[must_use]
    pub const fn date(&self) -> NaiveDate {
        self.date
    }

    /// Number of qualifying actions recorded on the day.
    #[must_use]
    pub const fn count(&self) -> u32 {
        self.count
    }

    /// Level derived from the count.
    #[must_use]
    pub const fn level(&self) -> Level {
        self.level
    }

    /// Returns `true` when at least one action was recorded.
    #[must_use]
    pub const fn is_active(&self) -> bool {
        self.count > 0
    }
}

/// Serialised shape of an [`ActivityDay`]; the level is recomputed on load.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActivityRecord {
    /// Calendar date of the record.
    pub date: NaiveDate,
    /// Raw activity count.
    pub count: u32,
}

impl From<ActivityRecord> for ActivityDay {
    fn from(record: ActivityRecord) -> Self {
        Self::new(record.date, record.count)
    }
}

impl From<ActivityDay> for ActivityRecord {
    fn from(day: ActivityDay) -> Self {
        Self {
            date: day.date,
            count: day.count,
        }
    }
}

/// Header metadata published alongside a grid.
///
/// `total` and `max_daily` are only ever computed from the grid the summary
/// travels with.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize)]
pub struct Summary {
    username: String,
    total: u64,
    max_daily: u32,
    week_count: usize,
}

impl Summary {
    /// Derives a summary from the provided grid.
    ///
    /// The week count defaults to the number of week columns in the grid.
    #[must_use]
    pub fn from_grid(username: impl Into<String>, grid: &ContributionGrid) -> Self {
        Self {
            username: username.into(),
            total: grid.total(),
            max_daily: grid.max_daily(),
            week_count: grid.week_count(),
        }
    }

    /// Replaces the week count with the number of week buckets reported upstream.
    #[must_use]
    pub fn with_week_count(mut self, week_count: usize) -> Self {
        self.week_count = week_count;
        self
    }

    /// Login the document is generated for.
    #[must_use]
    pub fn username(&self) -> &str {
        &self.username
    }

    /// Sum of all day counts in the grid.
    #[must_use]
    pub const fn total(&self) -> u64 {
        self.total
    }

    /// Largest single-day count in the grid.
    #[must_use]
    pub const fn max_daily(&self) -> u32 {
        self.max_daily
    }

    /// Number of week buckets the data was delivered in.
    #[must_use]
    pub const fn week_count(&self) -> usize {
        self.week_count
    }

    /// Returns `true` when the derived totals still match `grid`.
    #[must_use]
    pub fn matches(&self, grid: &ContributionGrid) -> bool {
        self.total == grid.total() && self.max_daily == grid.max_daily()
    }
}
