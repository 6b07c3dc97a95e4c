use std::time::Duration;

use reqwest::Client;
use serde::Deserialize;
use tracing::{debug, info};

use crate::error::{FeedError, Result};
use crate::models::{MatchState, MatchStatus, Score, StateUpdate};

/// Client for an external live-score endpoint serving a JSON array of matches
pub struct RemoteFeedClient {
    client: Client,
    url: String,
}

/// Match record as served by the remote feed
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RemoteMatch {
    id: String,
    status: MatchStatus,
    home_score: Option<u32>,
    away_score: Option<u32>,
}

impl RemoteFeedClient {
    /// Create a new client. A request that has not completed within
    /// `timeout` fails as a transport error.
    pub fn new(url: &str, timeout: Duration) -> Result<Self> {
        let client = Client::builder().timeout(timeout).build()?;

        Ok(Self {
            client,
            url: url.to_string(),
        })
    }

    /// Fetch the current state of every match the feed knows about
    pub async fn fetch_updates(&self) -> Result<Vec<StateUpdate>> {
        debug!("Fetching live scores from {}", self.url);

        let response = self
            .client
            .get(&self.url)
            .header("Accept", "application/json")
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response.text().await.unwrap_or_default();
            return Err(FeedError::Status { status, body });
        }

        let body = response.text().await?;
        let updates = parse_updates(&body)?;

        info!("Remote feed returned {} matches", updates.len());

        Ok(updates)
    }
}

/// Parse a feed payload, rejecting records whose scores contradict their status
pub fn parse_updates(body: &str) -> Result<Vec<StateUpdate>> {
    let records: Vec<RemoteMatch> = serde_json::from_str(body)?;

    records.into_iter().map(convert_record).collect()
}

fn convert_record(record: RemoteMatch) -> Result<StateUpdate> {
    let score = match (record.home_score, record.away_score) {
        (Some(home), Some(away)) => Some(Score::new(home, away)),
        (None, None) => None,
        _ => {
            return Err(FeedError::InvalidRecord {
                match_id: record.id,
                reason: "only one side has a score".to_string(),
            })
        }
    };

    let state = match (record.status, score) {
        (MatchStatus::Upcoming, None) => MatchState::Upcoming,
        (MatchStatus::Live, Some(score)) => MatchState::Live(score),
        (MatchStatus::Finished, Some(score)) => MatchState::Finished(score),
        (MatchStatus::Upcoming, Some(_)) => {
            return Err(FeedError::InvalidRecord {
                match_id: record.id,
                reason: "upcoming match carries a score".to_string(),
            })
        }
        (status, None) => {
            return Err(FeedError::InvalidRecord {
                match_id: record.id,
                reason: format!("{} match has no score", status.as_str()),
            })
        }
    };

    Ok(StateUpdate {
        match_id: record.id,
        state,
    })
}
