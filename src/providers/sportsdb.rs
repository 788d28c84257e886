//! TheSportsDB team lookup.
//!
//! Free tier, no API key required (the shared test key `3` is baked into
//! the path, per their docs). Used as the zero-cost fallback source.
//!
//! API docs: https://www.thesportsdb.com/api.php
//! Endpoint: GET /api/v1/json/3/searchteams.php?t={name}

use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use tracing::debug;

use super::TeamLookupProvider;
use crate::types::{ResolutionSource, TeamIdentity};

const BASE_URL: &str = "https://www.thesportsdb.com/api/v1/json/3";
const PROVIDER_NAME: &str = "sportsdb";

// ---------------------------------------------------------------------------
// API response types (TheSportsDB JSON → Rust)
// ---------------------------------------------------------------------------

/// Response from `searchteams.php`. `teams` is null (not `[]`) when the
/// search finds nothing.
#[derive(Debug, Deserialize)]
struct SearchTeamsResponse {
    teams: Option<Vec<SportsDbTeam>>,
}

/// One team record. We only deserialize the fields we need.
#[derive(Debug, Deserialize)]
struct SportsDbTeam {
    #[serde(rename = "strTeam")]
    name: String,
    #[serde(rename = "strCountry", default)]
    country: Option<String>,
    #[serde(rename = "strLeague", default)]
    league: Option<String>,
    /// "Soccer", "Basketball", etc. Only football teams are accepted.
    #[serde(rename = "strSport", default)]
    sport: Option<String>,
}

// ---------------------------------------------------------------------------
// Client
// ---------------------------------------------------------------------------

/// TheSportsDB lookup client.
pub struct SportsDbClient {
    http: Client,
}

impl SportsDbClient {
    pub fn new() -> Result<Self> {
        let http = Client::builder()
            .timeout(std::time::Duration::from_secs(10))
            .user_agent("goalcast/0.1.0 (match-prediction-engine)")
            .build()
            .context("Failed to build HTTP client for TheSportsDB")?;
        Ok(Self { http })
    }

    /// Convert a SportsDB team record into a `TeamIdentity`.
    /// Returns `None` for non-football teams (the search endpoint spans
    /// every sport in their database).
    fn to_identity(raw_input: &str, team: SportsDbTeam) -> Option<TeamIdentity> {
        if team.sport.as_deref() != Some("Soccer") {
            return None;
        }
        if team.name.is_empty() {
            return None;
        }
        Some(TeamIdentity {
            raw_input: raw_input.to_string(),
            canonical_name: team.name,
            country: team.country.unwrap_or_else(|| "Unknown".to_string()),
            league: team.league,
            source: ResolutionSource::SportsDb,
        })
    }
}

#[async_trait]
impl TeamLookupProvider for SportsDbClient {
    async fn lookup(&self, name: &str) -> Result<Option<TeamIdentity>> {
        let url = format!(
            "{BASE_URL}/searchteams.php?t={}",
            urlencoding::encode(name),
        );

        debug!(url = %url, "Querying TheSportsDB");

        let resp = self
            .http
            .get(&url)
            .send()
            .await
            .context("TheSportsDB request failed")?;

        if !resp.status().is_success() {
            let status = resp.status();
            anyhow::bail!("TheSportsDB error {status}");
        }

        let body: SearchTeamsResponse = resp
            .json()
            .await
            .context("Failed to parse TheSportsDB response")?;

        let identity = body
            .teams
            .unwrap_or_default()
            .into_iter()
            .find_map(|t| Self::to_identity(name, t));

        Ok(identity)
    }

    fn name(&self) -> &str {
        PROVIDER_NAME
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn make_team(name: &str, sport: &str) -> SportsDbTeam {
        SportsDbTeam {
            name: name.to_string(),
            country: Some("England".to_string()),
            league: Some("Premier League".to_string()),
            sport: Some(sport.to_string()),
        }
    }

    #[test]
    fn test_to_identity_soccer_team() {
        let identity =
            SportsDbClient::to_identity("arsenal", make_team("Arsenal", "Soccer")).unwrap();
        assert_eq!(identity.canonical_name, "Arsenal");
        assert_eq!(identity.raw_input, "arsenal");
        assert_eq!(identity.source, ResolutionSource::SportsDb);
        assert_eq!(identity.league.as_deref(), Some("Premier League"));
    }

    #[test]
    fn test_to_identity_rejects_other_sports() {
        // "Arsenal" also matches a basketball team in their database
        let identity = SportsDbClient::to_identity("arsenal", make_team("Arsenal", "Basketball"));
        assert!(identity.is_none());
    }

    #[test]
    fn test_to_identity_rejects_empty_name() {
        let identity = SportsDbClient::to_identity("x", make_team("", "Soccer"));
        assert!(identity.is_none());
    }

    #[test]
    fn test_parse_null_teams() {
        // SportsDB returns {"teams": null} for no results
        let body: SearchTeamsResponse = serde_json::from_str(r#"{"teams": null}"#).unwrap();
        assert!(body.teams.is_none());
    }

    #[test]
    fn test_parse_team_record() {
        let json = r#"{
            "teams": [{
                "strTeam": "Paris Saint-Germain",
                "strCountry": "France",
                "strLeague": "French Ligue 1",
                "strSport": "Soccer"
            }]
        }"#;
        let body: SearchTeamsResponse = serde_json::from_str(json).unwrap();
        let teams = body.teams.unwrap();
        assert_eq!(teams.len(), 1);
        assert_eq!(teams[0].name, "Paris Saint-Germain");
    }

    #[test]
    fn test_client_name() {
        let client = SportsDbClient::new().unwrap();
        assert_eq!(client.name(), "sportsdb");
    }
}
