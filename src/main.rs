//! GOALCAST: football match prediction and value-bet engine
//!
//! Entry point. Loads configuration, initialises structured logging,
//! builds the resolver with its configured provider set, and runs a
//! single resolve → predict → value-bet → consensus pass for a matchup
//! given on the command line.

use std::collections::HashMap;
use std::sync::Arc;

use anyhow::Result;
use tracing::{info, warn};

use goalcast::config::AppConfig;
use goalcast::engine::PredictionEngine;
use goalcast::providers::api_football::ApiFootballClient;
use goalcast::providers::football_data::FootballDataClient;
use goalcast::providers::sportsdb::SportsDbClient;
use goalcast::providers::TeamLookupProvider;
use goalcast::resolver::TeamResolver;
use goalcast::strategy::{aggregate, ValueBetDetector};
use goalcast::types::{
    ExpertPick, HeadToHeadMeeting, MatchOutcome, MeetingWinner, TeamStatistics,
};

const BANNER: &str = r#"
  ____  ___    _    _     ____    _    ____ _____
 / ___|/ _ \  / \  | |   / ___|  / \  / ___|_   _|
| |  _| | | |/ _ \ | |  | |     / _ \ \___ \ | |
| |_| | |_| / ___ \| |__| |___ / ___ \ ___) || |
 \____|\___/_/   \_\_____\____/_/   \_\____/ |_|

  Football Match Prediction & Value-Bet Engine
  v0.1.0
"#;

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if present (non-fatal if missing)
    let _ = dotenv::dotenv();

    // Load configuration from TOML
    let cfg = AppConfig::load("config.toml")?;

    init_logging();
    println!("{BANNER}");

    // -- Build the resolver over the enabled providers --------------------

    let providers = build_providers(&cfg);
    info!(providers = providers.len(), "Provider set ready");
    let resolver = TeamResolver::new(providers, &cfg.resolver);

    // -- Resolve the matchup ----------------------------------------------

    let mut args = std::env::args().skip(1);
    let home_input = args.next().unwrap_or_else(|| "PSG".to_string());
    let away_input = args.next().unwrap_or_else(|| "Marseille".to_string());

    let Some(home) = resolver.resolve(&home_input).await else {
        eprintln!("Team not found: {home_input:?}. Check the spelling and try again.");
        return Ok(());
    };
    let Some(away) = resolver.resolve(&away_input).await else {
        eprintln!("Team not found: {away_input:?}. Check the spelling and try again.");
        return Ok(());
    };

    info!(home = %home, away = %away, "Matchup resolved");

    // -- Predictions -------------------------------------------------------
    // Season statistics and head-to-head come from the external stats
    // feed in the full application; the demo uses a fixed snapshot.

    let (home_stats, away_stats, h2h) = demo_inputs();

    let mut engine = PredictionEngine::new(cfg.engine.clone());
    match engine.predict(
        &home.canonical_name,
        &away.canonical_name,
        &home_stats,
        &away_stats,
        &h2h,
    ) {
        Ok(predictions) => {
            println!("\nPredictions for {} vs {}:", home.canonical_name, away.canonical_name);
            for prediction in &predictions {
                println!("  {prediction}");
            }
        }
        Err(e) => {
            warn!(error = %e, "Prediction rejected");
            eprintln!("Could not generate predictions: {e}");
            return Ok(());
        }
    }

    // -- Value bets --------------------------------------------------------

    let board = demo_bookmaker_board(&home.canonical_name, &away.canonical_name);
    let mut detector = ValueBetDetector::new(cfg.value_bets.clone());
    let value_bets = detector.detect(&home.canonical_name, &away.canonical_name, &board);

    println!("\nValue bets ({} found):", value_bets.len());
    for candidate in &value_bets {
        println!("  {candidate}");
    }

    // -- Consensus ---------------------------------------------------------

    let picks = demo_expert_picks(&home.canonical_name);
    let summary = aggregate(&picks);
    println!("\nExpert consensus over {} picks: {summary}", picks.len());

    Ok(())
}

/// Instantiate every provider enabled in config. A provider whose API
/// key env-var is missing is skipped with a warning rather than
/// aborting startup.
fn build_providers(cfg: &AppConfig) -> Vec<Arc<dyn TeamLookupProvider>> {
    let mut providers: Vec<Arc<dyn TeamLookupProvider>> = Vec::new();

    if cfg.providers.football_data.enabled {
        match AppConfig::resolve_env(&cfg.providers.football_data.api_key_env) {
            Ok(key) => match FootballDataClient::new(key) {
                Ok(client) => providers.push(Arc::new(client)),
                Err(e) => warn!(error = %e, "football-data client unavailable"),
            },
            Err(e) => warn!(error = %e, "football-data disabled (no API key)"),
        }
    }

    if cfg.providers.api_football.enabled {
        match AppConfig::resolve_env(&cfg.providers.api_football.api_key_env) {
            Ok(key) => match ApiFootballClient::new(key) {
                Ok(client) => providers.push(Arc::new(client)),
                Err(e) => warn!(error = %e, "api-football client unavailable"),
            },
            Err(e) => warn!(error = %e, "api-football disabled (no API key)"),
        }
    }

    if cfg.providers.sportsdb.enabled {
        match SportsDbClient::new() {
            Ok(client) => providers.push(Arc::new(client)),
            Err(e) => warn!(error = %e, "sportsdb client unavailable"),
        }
    }

    providers
}

/// Fixed demo snapshot standing in for the external stats feed.
fn demo_inputs() -> (TeamStatistics, TeamStatistics, Vec<HeadToHeadMeeting>) {
    use MatchOutcome::*;
    let home_stats = TeamStatistics {
        recent_form: vec![Win, Win, Draw, Win, Loss],
        goals_for: 41,
        goals_against: 18,
        wins: 13,
        draws: 4,
        losses: 3,
    };
    let away_stats = TeamStatistics {
        recent_form: vec![Draw, Loss, Win, Draw, Win],
        goals_for: 28,
        goals_against: 24,
        wins: 9,
        draws: 6,
        losses: 5,
    };
    let h2h = vec![
        HeadToHeadMeeting {
            winner: MeetingWinner::Home,
            home_goals: 2,
            away_goals: 0,
        },
        HeadToHeadMeeting {
            winner: MeetingWinner::Draw,
            home_goals: 1,
            away_goals: 1,
        },
        HeadToHeadMeeting {
            winner: MeetingWinner::Home,
            home_goals: 3,
            away_goals: 1,
        },
    ];
    (home_stats, away_stats, h2h)
}

/// Demo bookmaker board quoting every catalog outcome.
fn demo_bookmaker_board(home: &str, away: &str) -> HashMap<String, f64> {
    HashMap::from([
        (format!("{home} wins"), 2.45),
        (format!("{away} wins"), 3.60),
        ("Draw".to_string(), 3.40),
        ("Over 2.5 goals".to_string(), 2.15),
        ("Under 2.5 goals".to_string(), 1.85),
        ("Both teams score".to_string(), 2.05),
        (format!("{home} scores 2+"), 2.90),
        (format!("{away} scores 2+"), 3.10),
    ])
}

/// Demo tipster picks standing in for the pro-pronostics feed.
fn demo_expert_picks(home: &str) -> Vec<ExpertPick> {
    vec![
        ExpertPick {
            outcome: format!("{home} wins"),
            confidence_pct: 82.0,
        },
        ExpertPick {
            outcome: format!("{home} wins"),
            confidence_pct: 76.0,
        },
        ExpertPick {
            outcome: "Over 2.5 goals".to_string(),
            confidence_pct: 64.0,
        },
    ]
}

/// Initialise the `tracing` subscriber.
fn init_logging() {
    use tracing_subscriber::{fmt, EnvFilter};

    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("goalcast=info"));

    let json_logging = std::env::var("GOALCAST_LOG_JSON").is_ok();

    if json_logging {
        fmt()
            .json()
            .with_env_filter(env_filter)
            .with_target(true)
            .init();
    } else {
        fmt().with_env_filter(env_filter).with_target(true).init();
    }
}
