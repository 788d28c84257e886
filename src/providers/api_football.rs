//! API-Football (api-sports.io) team lookup.
//!
//! Widest club coverage of the three providers. Requires a key sent in
//! the `x-apisports-key` header.
//!
//! API docs: https://www.api-football.com/documentation-v3
//! Endpoint: GET /teams?search={name}

use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use tracing::debug;

use super::TeamLookupProvider;
use crate::types::{ResolutionSource, TeamIdentity};

const BASE_URL: &str = "https://v3.football.api-sports.io";
const PROVIDER_NAME: &str = "api-football";

// ---------------------------------------------------------------------------
// API response types
// ---------------------------------------------------------------------------

/// API-Football wraps every payload in a `response` array.
#[derive(Debug, Deserialize)]
struct TeamsResponse {
    #[serde(default)]
    response: Vec<TeamEntry>,
}

#[derive(Debug, Deserialize)]
struct TeamEntry {
    team: AfTeam,
}

#[derive(Debug, Deserialize)]
struct AfTeam {
    name: String,
    #[serde(default)]
    country: Option<String>,
    /// National sides are modelled as teams too; we only resolve clubs.
    #[serde(default)]
    national: bool,
}

// ---------------------------------------------------------------------------
// Client
// ---------------------------------------------------------------------------

/// API-Football lookup client.
pub struct ApiFootballClient {
    http: Client,
    api_key: String,
}

impl ApiFootballClient {
    pub fn new(api_key: String) -> Result<Self> {
        let http = Client::builder()
            .timeout(std::time::Duration::from_secs(10))
            .user_agent("goalcast/0.1.0 (match-prediction-engine)")
            .build()
            .context("Failed to build HTTP client for API-Football")?;
        Ok(Self { http, api_key })
    }

    /// Convert an API-Football team entry into a `TeamIdentity`.
    ///
    /// API-Football doesn't return league membership on the team search
    /// endpoint (that needs a second call), so `league` stays `None`.
    fn to_identity(raw_input: &str, team: AfTeam) -> Option<TeamIdentity> {
        if team.national || team.name.is_empty() {
            return None;
        }
        Some(TeamIdentity {
            raw_input: raw_input.to_string(),
            canonical_name: team.name,
            country: team.country.unwrap_or_else(|| "Unknown".to_string()),
            league: None,
            source: ResolutionSource::ApiFootball,
        })
    }
}

#[async_trait]
impl TeamLookupProvider for ApiFootballClient {
    async fn lookup(&self, name: &str) -> Result<Option<TeamIdentity>> {
        let url = format!("{BASE_URL}/teams?search={}", urlencoding::encode(name));

        debug!(url = %url, "Querying API-Football");

        let resp = self
            .http
            .get(&url)
            .header("x-apisports-key", &self.api_key)
            .send()
            .await
            .context("API-Football request failed")?;

        if !resp.status().is_success() {
            let status = resp.status();
            let body = resp.text().await.unwrap_or_default();
            anyhow::bail!("API-Football error {status}: {body}");
        }

        let body: TeamsResponse = resp
            .json()
            .await
            .context("Failed to parse API-Football response")?;

        let identity = body
            .response
            .into_iter()
            .find_map(|entry| Self::to_identity(name, entry.team));

        Ok(identity)
    }

    fn name(&self) -> &str {
        PROVIDER_NAME
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
