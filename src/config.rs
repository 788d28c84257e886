//! Configuration loading from TOML with environment variable resolution.
//!
//! Reads `config.toml` and deserializes into strongly-typed structs.
//! Secrets (API keys) are referenced by env-var name in the config and
//! resolved at runtime via `std::env::var`. The config is built once at
//! startup and passed into constructors; there is no module-global
//! mutable state.

use anyhow::{Context, Result};
use serde::Deserialize;
use std::fs;

/// Top-level application configuration.
#[derive(Debug, Deserialize, Clone)]
pub struct AppConfig {
    pub engine: EngineConfig,
    pub resolver: ResolverConfig,
    pub providers: ProvidersConfig,
    pub value_bets: ValueBetsConfig,
}

/// Numeric policy for the prediction engine.
#[derive(Debug, Deserialize, Clone)]
pub struct EngineConfig {
    /// Flat advantage points granted to the home side.
    pub home_advantage: f64,
    /// League-average goals per match used in the total-goals projection.
    pub league_avg_goals: f64,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            home_advantage: 2.0,
            league_avg_goals: 2.5,
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct ResolverConfig {
    /// Upper bound on each external lookup so resolution always terminates.
    pub provider_timeout_secs: u64,
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self {
            provider_timeout_secs: 4,
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct ProvidersConfig {
    pub football_data: FootballDataConfig,
    pub api_football: ApiFootballConfig,
    pub sportsdb: SportsDbConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct FootballDataConfig {
    pub enabled: bool,
    pub api_key_env: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ApiFootballConfig {
    pub enabled: bool,
    pub api_key_env: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct SportsDbConfig {
    pub enabled: bool,
}

/// Thresholds for the value-bet detector.
#[derive(Debug, Deserialize, Clone)]
pub struct ValueBetsConfig {
    /// Minimum edge percentage for a candidate to surface.
    pub min_edge_pct: f64,
    /// Edge above which a bet is labelled low risk.
    pub low_risk_edge_pct: f64,
    /// Edge above which a bet is labelled medium risk.
    pub medium_risk_edge_pct: f64,
}

impl Default for ValueBetsConfig {
    fn default() -> Self {
        Self {
            min_edge_pct: 5.0,
            low_risk_edge_pct: 20.0,
            medium_risk_edge_pct: 10.0,
        }
    }
}

impl AppConfig {
    /// Load configuration from a TOML file.
    pub fn load(path: &str) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {path}"))?;
        let config: AppConfig = toml::from_str(&contents)
            .with_context(|| format!("Failed to parse config file: {path}"))?;
        Ok(config)
    }

    /// Resolve an environment variable name to its value.
    /// Useful for loading secrets referenced in the config.
    pub fn resolve_env(env_name: &str) -> Result<String> {
        std::env::var(env_name)
            .with_context(|| format!("Environment variable not set: {env_name}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_full_config() {
        let toml_str = r#"
            [engine]
            home_advantage = 2.0
            league_avg_goals = 2.5

            [resolver]
            provider_timeout_secs = 4

            [providers.football_data]
            enabled = true
            api_key_env = "FOOTBALL_DATA_API_KEY"

            [providers.api_football]
            enabled = false
            api_key_env = "API_FOOTBALL_KEY"

            [providers.sportsdb]
            enabled = true

            [value_bets]
            min_edge_pct = 5.0
            low_risk_edge_pct = 20.0
            medium_risk_edge_pct = 10.0
        "#;
        let cfg: AppConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(cfg.engine.home_advantage, 2.0);
        assert_eq!(cfg.resolver.provider_timeout_secs, 4);
        assert!(cfg.providers.football_data.enabled);
        assert!(!cfg.providers.api_football.enabled);
        assert_eq!(cfg.value_bets.min_edge_pct, 5.0);
    }

    #[test]
    fn test_defaults() {
        let engine = EngineConfig::default();
        assert_eq!(engine.home_advantage, 2.0);
        assert_eq!(engine.league_avg_goals, 2.5);

        let vb = ValueBetsConfig::default();
        assert!(vb.low_risk_edge_pct > vb.medium_risk_edge_pct);
        assert!(vb.medium_risk_edge_pct > vb.min_edge_pct);
    }

    #[test]
    fn test_load_missing_file() {
        assert!(AppConfig::load("/nonexistent/config.toml").is_err());
    }
}
