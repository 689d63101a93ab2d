//! Ordered acquisition tiers tried by [`crate::ContributionSource`].

use std::{collections::BTreeMap, time::Duration};

use chrono::{Days, NaiveDate};
use contribution_canon_core::ActivityDay;
use thiserror::Error;

use crate::{
    upstream::{UpstreamClient, UpstreamError},
    DataOrigin,
};

/// Number of days covered by the event feed and placeholder windows.
pub const WINDOW_DAYS: u64 = 365;

/// Event types counted by the event feed tier.
pub const QUALIFYING_EVENTS: [&str; 4] = [
    "PushEvent",
    "CreateEvent",
    "PullRequestEvent",
    "IssuesEvent",
];

/// Inputs shared by every tier of one fetch.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TierRequest<'a> {
    /// Login being looked up.
    pub username: &'a str,
    /// Last day of the trailing window.
    pub today: NaiveDate,
    /// Time budget for any upstream call made by the tier.
    pub timeout: Duration,
}

/// Flat activity returned by a tier before normalisation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FetchedActivity {
    /// Login to label the result with.
    pub login: String,
    /// Days in chronological order.
    pub days: Vec<ActivityDay>,
    /// Number of week buckets the upstream grouped the days into.
    pub upstream_weeks: Option<usize>,
    /// Total the upstream claims for the days.
    pub reported_total: Option<u64>,
}

/// Reasons a tier could not produce activity.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum TierError {
    /// The transport failed or the payload was unusable.
    #[error(transparent)]
    Upstream(#[from] UpstreamError),
    /// The upstream answered with an explicit error payload.
    #[error("upstream reported errors: {0}")]
    Rejected(String),
    /// The upstream did not return the requested user.
    #[error("upstream returned no user")]
    UserMissing,
}

/// One strategy in the acquisition chain.
pub trait Tier: Send + Sync {
    /// Short name used in diagnostics.
    fn name(&self) -> &'static str;

    /// Provenance recorded when this tier resolves a fetch.
    fn origin(&self) -> DataOrigin;

    /// Attempts to produce activity for `request`.
    fn attempt(
        &self,
        client: &dyn UpstreamClient,
        request: &TierRequest<'_>,
    ) -> Result<FetchedActivity, TierError>;
}

/// Primary tier reading the structured contribution calendar.
#[derive(Clone, Copy, Debug, Default)]
pub struct CalendarTier;

impl Tier for CalendarTier {
    fn name(&self) -> &'static str {
        "calendar"
    }

    fn origin(&self) -> DataOrigin {
        DataOrigin::Calendar
    }

    fn attempt(
        &self,
        client: &dyn UpstreamClient,
        request: &TierRequest<'_>,
    ) -> Result<FetchedActivity, TierError> {
        let response = client.query_calendar(request.username, request.timeout)?;

        if let Some(errors) = response.errors.filter(|errors| !errors.is_empty()) {
            let messages: Vec<String> = errors.into_iter().map(|error| error.message).collect();
            return Err(TierError::Rejected(messages.join("; ")));
        }

        let user = response
            .data
            .and_then(|data| data.user)
            .ok_or(TierError::UserMissing)?;
        let calendar = user.contributions_collection.contribution_calendar;

        let days = calendar
            .weeks
            .iter()
            .flat_map(|week| week.contribution_days.iter())
            .map(|day| ActivityDay::new(day.date, day.contribution_count))
            .collect();

        Ok(FetchedActivity {
            login: user.login,
            days,
            upstream_weeks: Some(calendar.weeks.len()),
            reported_total: Some(calendar.total_contributions),
        })
    }
}

/// First fallback tier tallying qualifying public events per UTC date.
#[derive(Clone, Copy, Debug, Default)]
pub struct EventFeedTier;

impl Tier for EventFeedTier {
    fn name(&self) -> &'static str {
        "event-feed"
    }

    fn origin(&self) -> DataOrigin {
        DataOrigin::EventFeed
    }

    fn attempt(
        &self,
        client: &dyn UpstreamClient,
        request: &TierRequest<'_>,
    ) -> Result<FetchedActivity, TierError> {
        let events = client.public_events(request.username, request.timeout)?;

        let mut tallies: BTreeMap<NaiveDate, u32> = BTreeMap::new();
        for event in events
            .iter()
            .filter(|event| QUALIFYING_EVENTS.contains(&event.kind.as_str()))
        {
            *tallies.entry(event.created_at.date_naive()).or_default() += 1;
        }

        let days = trailing_window(request.today)
            .map(|date| ActivityDay::new(date, tallies.get(&date).copied().unwrap_or(0)))
            .collect();

        Ok(FetchedActivity {
            login: request.username.to_owned(),
            days,
            upstream_weeks: None,
            reported_total: None,
        })
    }
}

/// Terminal tier producing an all-zero window without touching the network.
#[derive(Clone, Copy, Debug, Default)]
pub struct PlaceholderTier;

impl PlaceholderTier {
    /// Builds the zero-count window for `request`.
    #[must_use]
    pub fn synthesize(&self, request: &TierRequest<'_>) -> FetchedActivity {
        FetchedActivity {
            login: request.username.to_owned(),
            days: trailing_window(request.today)
                .map(ActivityDay::empty)
                .collect(),
            upstream_weeks: None,
            reported_total: None,
        }
    }
}

impl Tier for PlaceholderTier {
    fn name(&self) -> &'static str {
        "placeholder"
    }

    fn origin(&self) -> DataOrigin {
        DataOrigin::Placeholder
    }

    fn attempt(
        &self,
        _client: &dyn UpstreamClient,
        request: &TierRequest<'_>,
    ) -> Result<FetchedActivity, TierError> {
        Ok(self.synthesize(request))
    }
}

/// Consecutive dates of the [`WINDOW_DAYS`]-long window ending at `today`.
pub fn trailing_window(today: NaiveDate) -> impl Iterator<Item = NaiveDate> {
    let start = today
        .checked_sub_days(Days::new(WINDOW_DAYS - 1))
        .unwrap_or(NaiveDate::MIN);
    start.iter_days().take_while(move |date| *date <= today)
}
