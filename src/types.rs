//! Shared types for the GOALCAST engine.
//!
//! These types form the data model used across all modules.
//! Prediction outputs are serialized verbatim into persisted ticket
//! records by the caller, so field names and shapes must stay stable.

use serde::{Deserialize, Serialize};
use std::fmt;

// ---------------------------------------------------------------------------
// Match outcomes & statistics
// ---------------------------------------------------------------------------

/// Result of a single past match from one team's perspective.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MatchOutcome {
    Win,
    Draw,
    Loss,
}

impl MatchOutcome {
    /// Form points awarded for this outcome (3/1/0).
    pub fn form_points(&self) -> f64 {
        match self {
            MatchOutcome::Win => 3.0,
            MatchOutcome::Draw => 1.0,
            MatchOutcome::Loss => 0.0,
        }
    }
}

impl fmt::Display for MatchOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MatchOutcome::Win => write!(f, "W"),
            MatchOutcome::Draw => write!(f, "D"),
            MatchOutcome::Loss => write!(f, "L"),
        }
    }
}

/// Attempt to parse a string into a MatchOutcome (case-insensitive).
impl std::str::FromStr for MatchOutcome {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "w" | "win" | "won" => Ok(MatchOutcome::Win),
            "d" | "draw" | "drew" => Ok(MatchOutcome::Draw),
            "l" | "loss" | "lost" => Ok(MatchOutcome::Loss),
            _ => Err(anyhow::anyhow!("Unknown match outcome: {s}")),
        }
    }
}

/// Per-team season statistics supplied by the external stats source.
///
/// The engine treats this as read-only input and validates it before
/// any average is computed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TeamStatistics {
    /// Most recent matches, newest last.
    pub recent_form: Vec<MatchOutcome>,
    pub goals_for: i64,
    pub goals_against: i64,
    pub wins: i64,
    pub draws: i64,
    pub losses: i64,
}

impl fmt::Display for TeamStatistics {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let form: String = self.recent_form.iter().map(|o| o.to_string()).collect();
        write!(
            f,
            "form={} | GF {} GA {} | {}W-{}D-{}L",
            form, self.goals_for, self.goals_against, self.wins, self.draws, self.losses,
        )
    }
}

impl TeamStatistics {
    /// Total matches played this season.
    pub fn matches_played(&self) -> i64 {
        self.wins + self.draws + self.losses
    }

    /// Goal differential (goals for minus goals against).
    pub fn goal_diff(&self) -> i64 {
        self.goals_for - self.goals_against
    }

    /// Win rate in [0, 1]. Returns 0.0 when no matches are recorded.
    pub fn win_rate(&self) -> f64 {
        let played = self.matches_played();
        if played == 0 {
            0.0
        } else {
            self.wins as f64 / played as f64
        }
    }

    /// Average goals scored per match. Returns 0.0 when no matches played.
    pub fn avg_goals_for(&self) -> f64 {
        let played = self.matches_played();
        if played == 0 {
            0.0
        } else {
            self.goals_for as f64 / played as f64
        }
    }

    /// Average goals conceded per match. Returns 0.0 when no matches played.
    pub fn avg_goals_against(&self) -> f64 {
        let played = self.matches_played();
        if played == 0 {
            0.0
        } else {
            self.goals_against as f64 / played as f64
        }
    }

    /// Reject malformed statistics before they reach a scoring path.
    ///
    /// Negative counts or a season with zero matches would otherwise
    /// produce NaN/garbage confidence numbers downstream.
    pub fn validate(&self) -> Result<(), PredictError> {
        if self.goals_for < 0
            || self.goals_against < 0
            || self.wins < 0
            || self.draws < 0
            || self.losses < 0
        {
            return Err(PredictError::InvalidInput(format!(
                "negative count in statistics: {self}"
            )));
        }
        if self.matches_played() == 0 {
            return Err(PredictError::InvalidInput(
                "zero matches played".to_string(),
            ));
        }
        Ok(())
    }

    /// Helper to build sample statistics with sensible defaults.
    #[cfg(test)]
    pub fn sample() -> Self {
        TeamStatistics {
            recent_form: vec![
                MatchOutcome::Win,
                MatchOutcome::Win,
                MatchOutcome::Draw,
                MatchOutcome::Loss,
                MatchOutcome::Win,
            ],
            goals_for: 38,
            goals_against: 21,
            wins: 12,
            draws: 5,
            losses: 3,
        }
    }
}

// ---------------------------------------------------------------------------
// Head-to-head
// ---------------------------------------------------------------------------

/// Winner of a single past direct meeting, from the home side's view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MeetingWinner {
    Home,
    Away,
    Draw,
}

/// One past direct meeting between the two teams of a match query.
///
/// Only the signed win count matters downstream; ordering of the
/// sequence is not significant.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HeadToHeadMeeting {
    pub winner: MeetingWinner,
    pub home_goals: i64,
    pub away_goals: i64,
}

impl fmt::Display for HeadToHeadMeeting {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{} ({:?})", self.home_goals, self.away_goals, self.winner)
    }
}

// ---------------------------------------------------------------------------
// Team identity & resolution
// ---------------------------------------------------------------------------

/// Which source resolved a free-text team name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ResolutionSource {
    /// Static in-memory roster of known clubs.
    Local,
    FootballData,
    ApiFootball,
    SportsDb,
}

impl fmt::Display for ResolutionSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ResolutionSource::Local => write!(f, "local"),
            ResolutionSource::FootballData => write!(f, "football-data"),
            ResolutionSource::ApiFootball => write!(f, "api-football"),
            ResolutionSource::SportsDb => write!(f, "sportsdb"),
        }
    }
}

/// Canonical identity a free-text team name resolved to.
///
/// Recomputed per request; never persisted. `canonical_name` is never
/// empty on a successful resolution.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TeamIdentity {
    /// The user input as typed (trimmed).
    pub raw_input: String,
    pub canonical_name: String,
    pub country: String,
    pub league: Option<String>,
    pub source: ResolutionSource,
}

impl fmt::Display for TeamIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} ({}, {}) [via {}]",
            self.canonical_name,
            self.country,
            self.league.as_deref().unwrap_or("unknown league"),
            self.source,
        )
    }
}

// ---------------------------------------------------------------------------
// Predictions
// ---------------------------------------------------------------------------

/// The three prediction markets the engine always produces, in order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PredictionCategory {
    Winner,
    TotalGoals,
    BothTeamsScore,
}

impl PredictionCategory {
    /// All categories in the fixed output order.
    pub const ALL: &'static [PredictionCategory] = &[
        PredictionCategory::Winner,
        PredictionCategory::TotalGoals,
        PredictionCategory::BothTeamsScore,
    ];
}

impl fmt::Display for PredictionCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PredictionCategory::Winner => write!(f, "Winner"),
            PredictionCategory::TotalGoals => write!(f, "Total goals"),
            PredictionCategory::BothTeamsScore => write!(f, "Both teams to score"),
        }
    }
}

/// A single betting prediction produced by the engine.
///
/// Immutable after creation. Serialized verbatim into ticket records by
/// the caller, so these fields are part of the stable interface.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Prediction {
    pub category: PredictionCategory,
    pub outcome: String,
    /// Confidence percentage, always within [0, 100].
    pub confidence_pct: u8,
    /// Decimal odds implied by the confidence (100 / confidence).
    pub implied_odds: f64,
    pub reasoning: String,
}

impl fmt::Display for Prediction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[{}] {} ({}% @ {:.2})",
            self.category, self.outcome, self.confidence_pct, self.implied_odds,
        )
    }
}

// ---------------------------------------------------------------------------
// Value bets
// ---------------------------------------------------------------------------

/// Risk classification of a value bet.
///
/// The convention is inverted on purpose: larger edges are labelled
/// *lower* risk, treating them as more obviously correct rather than
/// more volatile. Inherited business policy, not a bug.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RiskTier {
    Low,
    Medium,
    High,
}

impl fmt::Display for RiskTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RiskTier::Low => write!(f, "low"),
            RiskTier::Medium => write!(f, "medium"),
            RiskTier::High => write!(f, "high"),
        }
    }
}

/// A bet outcome where the bookmaker's odds exceed the model's odds.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValueBetCandidate {
    pub outcome: String,
    pub bookmaker_odds: f64,
    pub model_odds: f64,
    /// Percentage by which bookmaker odds exceed model odds.
    pub edge_pct: f64,
    pub confidence_pct: u8,
    pub risk: RiskTier,
}

impl fmt::Display for ValueBetCandidate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} | book {:.2} vs model {:.2} | edge {:.1}% | conf {}% | risk {}",
            self.outcome,
            self.bookmaker_odds,
            self.model_odds,
            self.edge_pct,
            self.confidence_pct,
            self.risk,
        )
    }
}

// ---------------------------------------------------------------------------
// Consensus
// ---------------------------------------------------------------------------

/// One external prediction consumed by the consensus aggregator
/// (e.g. from a pro tipster feed).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExpertPick {
    pub outcome: String,
    pub confidence_pct: f64,
}

/// How concentrated a set of independent predictions is around a single
/// modal outcome.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ConsensusLevel {
    Low,
    Medium,
    High,
}

impl fmt::Display for ConsensusLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConsensusLevel::Low => write!(f, "low"),
            ConsensusLevel::Medium => write!(f, "medium"),
            ConsensusLevel::High => write!(f, "high"),
        }
    }
}

/// Stateless summary over a collection of expert picks.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConsensusSummary {
    /// Most frequent outcome; empty when no picks were supplied.
    pub modal_outcome: String,
    pub mean_confidence: f64,
    pub level: ConsensusLevel,
    /// Distinct outcomes with confidence >= 75, in first-seen order.
    pub qualifying_outcomes: Vec<String>,
}

impl ConsensusSummary {
    /// Neutral summary for the legitimate "no picks yet" state.
    pub fn neutral() -> Self {
        ConsensusSummary {
            modal_outcome: String::new(),
            mean_confidence: 0.0,
            level: ConsensusLevel::Low,
            qualifying_outcomes: Vec::new(),
        }
    }

    /// Whether any picks contributed to this summary.
    pub fn is_empty(&self) -> bool {
        self.modal_outcome.is_empty()
    }
}

impl fmt::Display for ConsensusSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_empty() {
            write!(f, "No consensus (no picks)")
        } else {
            write!(
                f,
                "{} ({} consensus, mean conf {:.1}%)",
                self.modal_outcome, self.level, self.mean_confidence,
            )
        }
    }
}

// ---------------------------------------------------------------------------
// Error types
// ---------------------------------------------------------------------------

/// Domain-specific error types for GOALCAST.
///
/// A team that cannot be resolved is *not* an error; resolution returns
/// `Ok(None)` for that normal negative outcome.
#[derive(Debug, thiserror::Error)]
pub enum PredictError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Lookup provider error ({provider}): {message}")]
    Provider { provider: String, message: String },

    #[error("Configuration error: {0}")]
    Config(String),
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    // -- MatchOutcome tests --

    #[test]
    fn test_match_outcome_form_points() {
        assert_eq!(MatchOutcome::Win.form_points(), 3.0);
        assert_eq!(MatchOutcome::Draw.form_points(), 1.0);
        assert_eq!(MatchOutcome::Loss.form_points(), 0.0);
    }

    #[test]
    fn test_match_outcome_from_str() {
        assert_eq!("W".parse::<MatchOutcome>().unwrap(), MatchOutcome::Win);
        assert_eq!("draw".parse::<MatchOutcome>().unwrap(), MatchOutcome::Draw);
        assert_eq!("LOST".parse::<MatchOutcome>().unwrap(), MatchOutcome::Loss);
        assert!("x".parse::<MatchOutcome>().is_err());
    }

    #[test]
    fn test_match_outcome_serialization_roundtrip() {
        for outcome in [MatchOutcome::Win, MatchOutcome::Draw, MatchOutcome::Loss] {
            let json = serde_json::to_string(&outcome).unwrap();
            let parsed: MatchOutcome = serde_json::from_str(&json).unwrap();
            assert_eq!(outcome, parsed);
        }
    }

    // -- TeamStatistics tests --

    #[test]
    fn test_statistics_derived_values() {
        let stats = TeamStatistics::sample(); // 12W 5D 3L, 38-21
        assert_eq!(stats.matches_played(), 20);
        assert_eq!(stats.goal_diff(), 17);
        assert!((stats.win_rate() - 0.6).abs() < 1e-10);
        assert!((stats.avg_goals_for() - 1.9).abs() < 1e-10);
        assert!((stats.avg_goals_against() - 1.05).abs() < 1e-10);
    }

    #[test]
    fn test_statistics_zero_matches_no_nan() {
        let stats = TeamStatistics {
            recent_form: vec![],
            goals_for: 0,
            goals_against: 0,
            wins: 0,
            draws: 0,
            losses: 0,
        };
        assert_eq!(stats.win_rate(), 0.0);
        assert_eq!(stats.avg_goals_for(), 0.0);
        assert_eq!(stats.avg_goals_against(), 0.0);
        assert!(stats.win_rate().is_finite());
    }

    #[test]
    fn test_statistics_validate_ok() {
        assert!(TeamStatistics::sample().validate().is_ok());
    }

    #[test]
    fn test_statistics_validate_zero_matches() {
        let stats = TeamStatistics {
            recent_form: vec![],
            goals_for: 0,
            goals_against: 0,
            wins: 0,
            draws: 0,
            losses: 0,
        };
        let err = stats.validate().unwrap_err();
        assert!(matches!(err, PredictError::InvalidInput(_)));
    }

    #[test]
    fn test_statistics_validate_negative_count() {
        let stats = TeamStatistics {
            goals_against: -3,
            ..TeamStatistics::sample()
        };
        assert!(stats.validate().is_err());
    }

    #[test]
    fn test_statistics_serialization_roundtrip() {
        let stats = TeamStatistics::sample();
        let json = serde_json::to_string(&stats).unwrap();
        let parsed: TeamStatistics = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.wins, 12);
        assert_eq!(parsed.recent_form.len(), 5);
    }

    #[test]
    fn test_statistics_display() {
        let display = format!("{}", TeamStatistics::sample());
        assert!(display.contains("WWDLW"));
        assert!(display.contains("12W-5D-3L"));
    }

    // -- TeamIdentity tests --

    #[test]
    fn test_team_identity_display() {
        let identity = TeamIdentity {
            raw_input: "psg".to_string(),
            canonical_name: "Paris Saint-Germain".to_string(),
            country: "France".to_string(),
            league: Some("Ligue 1".to_string()),
            source: ResolutionSource::Local,
        };
        let display = format!("{identity}");
        assert!(display.contains("Paris Saint-Germain"));
        assert!(display.contains("via local"));
    }

    #[test]
    fn test_resolution_source_display() {
        assert_eq!(format!("{}", ResolutionSource::Local), "local");
        assert_eq!(format!("{}", ResolutionSource::SportsDb), "sportsdb");
    }

    #[test]
    fn test_team_identity_serialization_roundtrip() {
        let identity = TeamIdentity {
            raw_input: "Arsenal".to_string(),
            canonical_name: "Arsenal FC".to_string(),
            country: "England".to_string(),
            league: Some("Premier League".to_string()),
            source: ResolutionSource::FootballData,
        };
        let json = serde_json::to_string(&identity).unwrap();
        let parsed: TeamIdentity = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.canonical_name, "Arsenal FC");
        assert_eq!(parsed.source, ResolutionSource::FootballData);
    }

    // -- Prediction tests --

    #[test]
    fn test_prediction_category_all_ordered() {
        assert_eq!(PredictionCategory::ALL.len(), 3);
        assert_eq!(PredictionCategory::ALL[0], PredictionCategory::Winner);
        assert_eq!(PredictionCategory::ALL[1], PredictionCategory::TotalGoals);
        assert_eq!(PredictionCategory::ALL[2], PredictionCategory::BothTeamsScore);
    }

    #[test]
    fn test_prediction_serialization_roundtrip() {
        let prediction = Prediction {
            category: PredictionCategory::Winner,
            outcome: "Arsenal wins".to_string(),
            confidence_pct: 71,
            implied_odds: 1.41,
            reasoning: "Stronger form and head-to-head record".to_string(),
        };
        let json = serde_json::to_string(&prediction).unwrap();
        let parsed: Prediction = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.category, PredictionCategory::Winner);
        assert_eq!(parsed.confidence_pct, 71);
        assert!((parsed.implied_odds - 1.41).abs() < 1e-10);
    }

    #[test]
    fn test_prediction_display() {
        let prediction = Prediction {
            category: PredictionCategory::TotalGoals,
            outcome: "Over 2.5".to_string(),
            confidence_pct: 68,
            implied_odds: 1.47,
            reasoning: String::new(),
        };
        let display = format!("{prediction}");
        assert!(display.contains("Over 2.5"));
        assert!(display.contains("68%"));
    }

    // -- ValueBetCandidate tests --

    #[test]
    fn test_value_bet_display() {
        let candidate = ValueBetCandidate {
            outcome: "Home win".to_string(),
            bookmaker_odds: 2.40,
            model_odds: 2.00,
            edge_pct: 20.0,
            confidence_pct: 90,
            risk: RiskTier::Medium,
        };
        let display = format!("{candidate}");
        assert!(display.contains("Home win"));
        assert!(display.contains("20.0%"));
        assert!(display.contains("medium"));
    }

    #[test]
    fn test_value_bet_serialization_roundtrip() {
        let candidate = ValueBetCandidate {
            outcome: "Over 2.5".to_string(),
            bookmaker_odds: 2.10,
            model_odds: 1.85,
            edge_pct: 13.5,
            confidence_pct: 87,
            risk: RiskTier::Medium,
        };
        let json = serde_json::to_string(&candidate).unwrap();
        let parsed: ValueBetCandidate = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.risk, RiskTier::Medium);
        assert!((parsed.edge_pct - 13.5).abs() < 1e-10);
    }

    // -- ConsensusSummary tests --

    #[test]
    fn test_consensus_neutral() {
        let summary = ConsensusSummary::neutral();
        assert!(summary.is_empty());
        assert_eq!(summary.mean_confidence, 0.0);
        assert_eq!(summary.level, ConsensusLevel::Low);
        assert!(summary.qualifying_outcomes.is_empty());
    }

    #[test]
    fn test_consensus_display() {
        let summary = ConsensusSummary {
            modal_outcome: "Arsenal wins".to_string(),
            mean_confidence: 76.67,
            level: ConsensusLevel::Medium,
            qualifying_outcomes: vec!["Arsenal wins".to_string()],
        };
        let display = format!("{summary}");
        assert!(display.contains("Arsenal wins"));
        assert!(display.contains("medium"));

        assert_eq!(format!("{}", ConsensusSummary::neutral()), "No consensus (no picks)");
    }

    #[test]
    fn test_consensus_serialization_roundtrip() {
        let summary = ConsensusSummary {
            modal_outcome: "Draw".to_string(),
            mean_confidence: 61.5,
            level: ConsensusLevel::Low,
            qualifying_outcomes: vec![],
        };
        let json = serde_json::to_string(&summary).unwrap();
        let parsed: ConsensusSummary = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.modal_outcome, "Draw");
        assert_eq!(parsed.level, ConsensusLevel::Low);
    }

    // -- PredictError tests --

    #[test]
    fn test_predict_error_display() {
        let e = PredictError::InvalidInput("zero matches played".to_string());
        assert_eq!(format!("{e}"), "Invalid input: zero matches played");

        let e = PredictError::Provider {
            provider: "sportsdb".to_string(),
            message: "connection timeout".to_string(),
        };
        assert!(format!("{e}").contains("sportsdb"));
        assert!(format!("{e}").contains("connection timeout"));
    }
}
