use std::time::Duration;

use anyhow::{Context, Result};
use contribution_canon_system_contribution_source::{
    CalendarResponse, FeedEvent, UpstreamClient, UpstreamError, CALENDAR_QUERY,
};
use reqwest::{
    blocking::{Client, RequestBuilder, Response},
    StatusCode, Url,
};
use secrecy::{ExposeSecret, SecretString};
use serde::de::DeserializeOwned;
use serde_json::json;
use tracing::debug;

const USER_AGENT: &str = concat!("contribution-canon/", env!("CARGO_PKG_VERSION"));
const API_VERSION: &str = "2022-11-28";
const CONNECT_TIMEOUT: Duration = Duration::from_secs(5);
const EVENTS_PER_PAGE: &str = "100";

/// Blocking GitHub REST and GraphQL client.
pub(crate) struct GitHubClient {
    http: Client,
    api_base_url: Url,
    token: Option<SecretString>,
}

impl GitHubClient {
    pub(crate) fn new(api_base_url: &str, token: Option<SecretString>) -> Result<Self> {
        let api_base_url = Url::parse(api_base_url)
            .with_context(|| format!("invalid upstream base url `{api_base_url}`"))?;
        if api_base_url.cannot_be_a_base() {
            anyhow::bail!("upstream base url `{api_base_url}` cannot carry a path");
        }

        let http = Client::builder()
            .connect_timeout(CONNECT_TIMEOUT)
            .user_agent(USER_AGENT)
            .build()
            .context("failed to build upstream http client")?;

        Ok(Self {
            http,
            api_base_url,
            token,
        })
    }

    fn endpoint(&self, segments: &[&str]) -> Url {
        let mut url = self.api_base_url.clone();
        if let Ok(mut path) = url.path_segments_mut() {
            let _ = path.pop_if_empty().extend(segments);
        }
        url
    }

    fn prepare(&self, request: RequestBuilder, timeout: Duration) -> RequestBuilder {
        let request = request
            .timeout(timeout)
            .header("Accept", "application/vnd.github+json")
            .header("X-GitHub-Api-Version", API_VERSION);
        match &self.token {
            Some(token) => request.bearer_auth(token.expose_secret()),
            None => request,
        }
    }
}

impl UpstreamClient for GitHubClient {
    fn query_calendar(
        &self,
        username: &str,
        timeout: Duration,
    ) -> Result<CalendarResponse, UpstreamError> {
        if self.token.is_none() {
            return Err(UpstreamError::MissingToken);
        }

        let url = self.endpoint(&["graphql"]);
        debug!(%url, username, "querying contribution calendar");
        let body = json!({
            "query": CALENDAR_QUERY,
            "variables": { "userName": username },
        });
        let request = self.prepare(self.http.post(url), timeout).json(&body);
        decode(send(request, timeout)?)
    }

    fn public_events(
        &self,
        username: &str,
        timeout: Duration,
    ) -> Result<Vec<FeedEvent>, UpstreamError> {
        let mut url = self.endpoint(&["users", username, "events"]);
        let _ = url
            .query_pairs_mut()
            .append_pair("per_page", EVENTS_PER_PAGE);
        debug!(%url, username, "fetching public events");
        let request = self.prepare(self.http.get(url), timeout);
        decode(send(request, timeout)?)
    }
}

fn send(request: RequestBuilder, timeout: Duration) -> Result<Response, UpstreamError> {
    let response = request.send().map_err(|error| {
        if error.is_timeout() {
            UpstreamError::Timeout(timeout)
        } else {
            UpstreamError::Transport(error.to_string())
        }
    })?;

    match classify_status(response.status()) {
        Some(error) => Err(error),
        None => Ok(response),
    }
}

fn decode<T: DeserializeOwned>(response: Response) -> Result<T, UpstreamError> {
    response
        .json()
        .map_err(|error| UpstreamError::Decode(error.to_string()))
}

fn classify_status(status: StatusCode) -> Option<UpstreamError> {
    if status.is_success() {
        None
    } else if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
        Some(UpstreamError::Unauthorized {
            status: status.as_u16(),
        })
    } else {
        Some(UpstreamError::Status {
            status: status.as_u16(),
        })
    }
}
