#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Tiered acquisition of a user's daily activity.
//!
//! [`ContributionSource::fetch`] walks an ordered chain of [`Tier`]s and
//! stops at the first one that yields activity. The default chain reads the
//! structured calendar, then tallies the public event feed, then synthesises
//! an all-zero year. Every tier's output goes through the same
//! [`GridNormalizer`] so the returned grid always has the canonical shape,
//! and fetching never fails.

mod demo;
mod tiers;
mod upstream;

use std::time::Duration;

use chrono::{Local, NaiveDate};
use contribution_canon_core::{ContributionGrid, GridNormalizer, Summary};
use serde::Serialize;
use tracing::{info, warn};

pub use demo::{demo_contributions, DEMO_USERNAME, DEMO_WEEKS};
pub use tiers::{
    trailing_window, CalendarTier, EventFeedTier, FetchedActivity, PlaceholderTier, Tier,
    TierError, TierRequest, QUALIFYING_EVENTS, WINDOW_DAYS,
};
pub use upstream::{
    CalendarData, CalendarDay, CalendarResponse, CalendarUser, CalendarWeek,
    ContributionCalendar, ContributionsCollection, FeedEvent, GraphQlError, UpstreamClient,
    UpstreamError, CALENDAR_QUERY,
};

/// Default time budget for a single tier.
pub const DEFAULT_TIER_TIMEOUT: Duration = Duration::from_secs(10);

/// Where a fetched grid came from.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum DataOrigin {
    /// Structured contribution calendar.
    Calendar,
    /// Tally of qualifying public events.
    EventFeed,
    /// Synthesised all-zero year.
    Placeholder,
    /// Built-in sample activity.
    Demo,
}

/// Tuning for a [`ContributionSource`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SourceConfig {
    /// Time budget handed to each tier's upstream calls.
    pub tier_timeout: Duration,
    /// Pins the window end date; the local date is used when unset.
    pub today: Option<NaiveDate>,
}

impl SourceConfig {
    /// Date the trailing windows end on.
    #[must_use]
    pub fn today(&self) -> NaiveDate {
        self.today.unwrap_or_else(|| Local::now().date_naive())
    }
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            tier_timeout: DEFAULT_TIER_TIMEOUT,
            today: None,
        }
    }
}

/// Normalised grid, its summary, and the tier that produced it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SourcedContributions {
    /// Week-major activity grid.
    pub grid: ContributionGrid,
    /// Headline figures for the grid.
    pub summary: Summary,
    /// Provenance of the data.
    pub origin: DataOrigin,
}

/// Total, tiered provider of contribution grids.
pub struct ContributionSource<C> {
    client: C,
    tiers: Vec<Box<dyn Tier>>,
    config: SourceConfig,
}

impl<C: UpstreamClient> ContributionSource<C> {
    /// Creates a source with the default calendar, event feed and
    /// placeholder chain.
    #[must_use]
    pub fn new(client: C, config: SourceConfig) -> Self {
        Self::with_tiers(
            client,
            config,
            vec![
                Box::new(CalendarTier),
                Box::new(EventFeedTier),
                Box::new(PlaceholderTier),
            ],
        )
    }

    /// Creates a source that walks `tiers` in order.
    ///
    /// A placeholder result is still produced if every tier fails.
    #[must_use]
    pub fn with_tiers(client: C, config: SourceConfig, tiers: Vec<Box<dyn Tier>>) -> Self {
        Self {
            client,
            tiers,
            config,
        }
    }

    /// Upstream client shared by the tiers.
    #[must_use]
    pub const fn client(&self) -> &C {
        &self.client
    }

    /// Names of the configured tiers in the order they are tried.
    pub fn tier_names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.tiers.iter().map(|tier| tier.name())
    }

    /// Fetches activity for `username`, degrading through the tier chain.
    #[must_use]
    pub fn fetch(&self, username: &str) -> SourcedContributions {
        let request = TierRequest {
            username,
            today: self.config.today(),
            timeout: self.config.tier_timeout,
        };

        for tier in &self.tiers {
            match tier.attempt(&self.client, &request) {
                Ok(activity) => {
                    info!(tier = tier.name(), username, "contribution tier resolved");
                    return assemble(tier.origin(), activity);
                }
                Err(error) => {
                    warn!(tier = tier.name(), username, %error, "contribution tier failed");
                }
            }
        }

        warn!(
            username,
            "every contribution tier failed; using placeholder"
        );
        assemble(
            DataOrigin::Placeholder,
            PlaceholderTier.synthesize(&request),
        )
    }
}

fn assemble(origin: DataOrigin, activity: FetchedActivity) -> SourcedContributions {
    let grid = GridNormalizer::new().chunk(activity.days);
    let week_count = activity.upstream_weeks.unwrap_or_else(|| grid.week_count());
    let summary = Summary::from_grid(activity.login, &grid)
        .with_week_count(week_count);

    if let Some(reported) = activity.reported_total {
        if reported != summary.total() {
            warn!(
                reported,
                derived = summary.total(),
                "upstream total disagrees with daily counts"
            );
        }
    }

    SourcedContributions {
        grid,
        summary,
        origin,
    }
}
