//! Boundary with the upstream activity API.
//!
//! The transport itself lives in adapters; this module fixes the request
//! shapes, the decoded payloads, and the failures a transport may report.

use std::time::Duration;

use chrono::{DateTime, NaiveDate, Utc};
use serde::Deserialize;
use thiserror::Error;

/// Structured calendar query sent to the upstream GraphQL endpoint.
pub const CALENDAR_QUERY: &str = "query($userName: String!) { \
user(login: $userName) { login contributionsCollection { contributionCalendar { \
totalContributions weeks { contributionDays { contributionCount date } } } } } }";

/// Transport able to reach the upstream activity API.
///
/// Implementations must give up after `timeout` and report
/// [`UpstreamError::Timeout`] so the caller can fall through to its next tier.
pub trait UpstreamClient {
    /// Runs [`CALENDAR_QUERY`] for `username`.
    fn query_calendar(
        &self,
        username: &str,
        timeout: Duration,
    ) -> Result<CalendarResponse, UpstreamError>;

    /// Fetches the most recent page of public events for `username`.
    fn public_events(
        &self,
        username: &str,
        timeout: Duration,
    ) -> Result<Vec<FeedEvent>, UpstreamError>;
}

/// Failures reported by an [`UpstreamClient`].
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum UpstreamError {
    /// The request did not complete within the tier's time budget.
    #[error("request timed out after {0:?}")]
    Timeout(Duration),
    /// The connection could not be established or was interrupted.
    #[error("transport failure: {0}")]
    Transport(String),
    /// No credentials are available for an endpoint that requires them.
    #[error("no access token configured")]
    MissingToken,
    /// The upstream refused the supplied credentials.
    #[error("upstream rejected credentials with status {status}")]
    Unauthorized {
        /// HTTP status returned by the upstream.
        status: u16,
    },
    /// The upstream answered with a non-success status.
    #[error("upstream responded with status {status}")]
    Status {
        /// HTTP status returned by the upstream.
        status: u16,
    },
    /// The response body did not match the expected shape.
    #[error("could not decode upstream payload: {0}")]
    Decode(String),
}

/// Top-level GraphQL response for [`CALENDAR_QUERY`].
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
pub struct CalendarResponse {
    /// Query result, absent when the upstream only reports errors.
    #[serde(default)]
    pub data: Option<CalendarData>,
    /// Explicit error payload reported alongside or instead of data.
    #[serde(default)]
    pub errors: Option<Vec<GraphQlError>>,
}

/// `data` member of a [`CalendarResponse`].
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
pub struct CalendarData {
    /// Requested user, `null` when the login does not exist.
    #[serde(default)]
    pub user: Option<CalendarUser>,
}

/// User node carrying the contribution calendar.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CalendarUser {
    /// Canonical login as spelled upstream.
    pub login: String,
    /// Container of the calendar.
    pub contributions_collection: ContributionsCollection,
}

/// Wrapper object around the calendar.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContributionsCollection {
    /// Calendar grouped into week buckets.
    pub contribution_calendar: ContributionCalendar,
}

/// Contribution calendar in upstream week order.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContributionCalendar {
    /// Total the upstream reports for the calendar.
    pub total_contributions: u64,
    /// Week buckets in chronological order.
    pub weeks: Vec<CalendarWeek>,
}

/// One upstream week bucket.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CalendarWeek {
    /// Days of the bucket in day-of-week order.
    pub contribution_days: Vec<CalendarDay>,
}

/// One upstream calendar entry.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CalendarDay {
    /// Number of contributions on the day.
    pub contribution_count: u32,
    /// Calendar date of the entry.
    pub date: NaiveDate,
}

/// Entry of the GraphQL `errors` array.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct GraphQlError {
    /// Human-readable reason.
    pub message: String,
}

/// Public event feed entry.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct FeedEvent {
    /// Event type name such as `PushEvent`.
    #[serde(rename = "type")]
    pub kind: String,
    /// Time the event was recorded.
    pub created_at: DateTime<Utc>,
}
