//! football-data.org team lookup.
//!
//! Covers the major European competitions. Requires an API token sent in
//! the `X-Auth-Token` header; the free tier is enough for name lookups.
//!
//! API docs: https://www.football-data.org/documentation/quickstart
//! Endpoint: GET /v4/teams?name={name}

use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use tracing::debug;

use super::TeamLookupProvider;
use crate::types::{ResolutionSource, TeamIdentity};

const BASE_URL: &str = "https://api.football-data.org/v4";
const PROVIDER_NAME: &str = "football-data";

// ---------------------------------------------------------------------------
// API response types
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
struct TeamsResponse {
    #[serde(default)]
    teams: Vec<FdTeam>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct FdTeam {
    name: String,
    #[serde(default)]
    short_name: Option<String>,
    #[serde(default)]
    area: Option<FdArea>,
    #[serde(default)]
    running_competitions: Vec<FdCompetition>,
}

#[derive(Debug, Deserialize)]
struct FdArea {
    name: String,
}

#[derive(Debug, Deserialize)]
struct FdCompetition {
    name: String,
    /// "LEAGUE", "CUP", ...
    #[serde(rename = "type", default)]
    kind: Option<String>,
}

// ---------------------------------------------------------------------------
// Client
// ---------------------------------------------------------------------------

/// football-data.org lookup client.
pub struct FootballDataClient {
    http: Client,
    api_key: String,
}

impl FootballDataClient {
    pub fn new(api_key: String) -> Result<Self> {
        let http = Client::builder()
            .timeout(std::time::Duration::from_secs(10))
            .user_agent("goalcast/0.1.0 (match-prediction-engine)")
            .build()
            .context("Failed to build HTTP client for football-data.org")?;
        Ok(Self { http, api_key })
    }

    /// Convert a football-data team record into a `TeamIdentity`.
    ///
    /// The domestic league (first LEAGUE-type competition) becomes the
    /// `league` field; cups are ignored.
    fn to_identity(raw_input: &str, team: FdTeam) -> Option<TeamIdentity> {
        if team.name.is_empty() {
            return None;
        }
        let league = team
            .running_competitions
            .iter()
            .find(|c| c.kind.as_deref() == Some("LEAGUE"))
            .map(|c| c.name.clone());
        Some(TeamIdentity {
            raw_input: raw_input.to_string(),
            canonical_name: team.name,
            country: team
                .area
                .map(|a| a.name)
                .unwrap_or_else(|| "Unknown".to_string()),
            league,
            source: ResolutionSource::FootballData,
        })
    }

    /// Pick the best match from a response: exact (case-insensitive) name
    /// or short-name match first, otherwise the first result.
    fn best_match(raw_input: &str, mut teams: Vec<FdTeam>) -> Option<FdTeam> {
        let needle = raw_input.trim().to_lowercase();
        if let Some(pos) = teams.iter().position(|t| {
            t.name.to_lowercase() == needle
                || t.short_name.as_deref().map(str::to_lowercase) == Some(needle.clone())
        }) {
            return Some(teams.swap_remove(pos));
        }
        if teams.is_empty() {
            None
        } else {
            Some(teams.swap_remove(0))
        }
    }
}

#[async_trait]
impl TeamLookupProvider for FootballDataClient {
    async fn lookup(&self, name: &str) -> Result<Option<TeamIdentity>> {
        let url = format!("{BASE_URL}/teams?name={}", urlencoding::encode(name));

        debug!(url = %url, "Querying football-data.org");

        let resp = self
            .http
            .get(&url)
            .header("X-Auth-Token", &self.api_key)
            .send()
            .await
            .context("football-data.org request failed")?;

        if !resp.status().is_success() {
            let status = resp.status();
            let body = resp.text().await.unwrap_or_default();
            anyhow::bail!("football-data.org error {status}: {body}");
        }

        let body: TeamsResponse = resp
            .json()
            .await
            .context("Failed to parse football-data.org response")?;

        Ok(Self::best_match(name, body.teams).and_then(|t| Self::to_identity(name, t)))
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

    fn make_team(name: &str, short_name: Option<&str>) -> FdTeam {
        FdTeam {
            name: name.to_string(),
            short_name: short_name.map(String::from),
            area: Some(FdArea {
                name: "England".to_string(),
            }),
            running_competitions: vec![
                FdCompetition {
                    name: "FA Cup".to_string(),
                    kind: Some("CUP".to_string()),
                },
                FdCompetition {
                    name: "Premier League".to_string(),
                    kind: Some("LEAGUE".to_string()),
                },
            ],
        }
    }

    #[test]
    fn test_to_identity_picks_league_not_cup() {
        let identity =
            FootballDataClient::to_identity("arsenal", make_team("Arsenal FC", None)).unwrap();
        assert_eq!(identity.canonical_name, "Arsenal FC");
        assert_eq!(identity.country, "England");
        assert_eq!(identity.league.as_deref(), Some("Premier League"));
        assert_eq!(identity.source, ResolutionSource::FootballData);
    }

    #[test]
    fn test_best_match_prefers_exact_name() {
        let teams = vec![
            make_team("Arsenal de Sarandí", None),
            make_team("Arsenal FC", Some("Arsenal")),
        ];
        let best = FootballDataClient::best_match("arsenal", teams).unwrap();
        assert_eq!(best.name, "Arsenal FC");
    }

    #[test]
    fn test_best_match_falls_back_to_first() {
        let teams = vec![make_team("Arsenal de Sarandí", None)];
        let best = FootballDataClient::best_match("arsenal", teams).unwrap();
        assert_eq!(best.name, "Arsenal de Sarandí");
    }

    #[test]
    fn test_best_match_empty() {
        assert!(FootballDataClient::best_match("arsenal", vec![]).is_none());
    }

    #[test]
    fn test_parse_response() {
        let json = r#"{
            "teams": [{
                "name": "Paris Saint-Germain FC",
                "shortName": "PSG",
                "area": {"name": "France"},
                "runningCompetitions": [
                    {"name": "Ligue 1", "type": "LEAGUE"}
                ]
            }]
        }"#;
        let body: TeamsResponse = serde_json::from_str(json).unwrap();
        assert_eq!(body.teams.len(), 1);
        assert_eq!(body.teams[0].short_name.as_deref(), Some("PSG"));
    }

    #[test]
    fn test_parse_empty_response() {
        let body: TeamsResponse = serde_json::from_str("{}").unwrap();
        assert!(body.teams.is_empty());
    }

    #[test]
    fn test_client_name() {
        let client = FootballDataClient::new("test-key".to_string()).unwrap();
        assert_eq!(client.name(), "football-data");
    }
}
