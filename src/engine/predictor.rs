//! Match prediction engine.
//!
//! Combines both teams' strength scores, the head-to-head record, and
//! home advantage into three independent predictions per match query:
//! winner, total goals over/under, and both-teams-to-score. Output
//! order is fixed: Winner, TotalGoals, BothTeamsScore.
//!
//! The draw branch carries the inherited confidence jitter (55 plus up
//! to 15 random points). The randomness is deliberate product behavior;
//! it is kept behind a seedable generator so tests can pin it down.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::debug;

use crate::config::EngineConfig;
use crate::engine::strength::strength;
use crate::types::{
    HeadToHeadMeeting, MeetingWinner, PredictError, Prediction, PredictionCategory,
    TeamStatistics,
};

/// Advantage beyond which one side is called the winner. At or below
/// this margin the engine refuses to pick a side; home advantage alone
/// (2 points) is never enough.
const DECISION_MARGIN: f64 = 5.0;

/// Projected-goals threshold separating over from under 2.5.
const OVER_THRESHOLD: f64 = 2.7;

/// Mean-goals threshold above which both teams are expected to score.
const BTTS_THRESHOLD: f64 = 1.2;

/// Produces the three match predictions.
pub struct PredictionEngine {
    config: EngineConfig,
    rng: StdRng,
}

impl PredictionEngine {
    pub fn new(config: EngineConfig) -> Self {
        Self {
            config,
            rng: StdRng::from_entropy(),
        }
    }

    /// Engine with a fixed seed: identical inputs give identical output.
    pub fn seeded(config: EngineConfig, seed: u64) -> Self {
        Self {
            config,
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Generate the three predictions for a match.
    ///
    /// Both statistics objects are validated first; malformed input is
    /// fatal to the call rather than coerced into spurious confidence
    /// numbers.
    pub fn predict(
        &mut self,
        home: &str,
        away: &str,
        home_stats: &TeamStatistics,
        away_stats: &TeamStatistics,
        h2h: &[HeadToHeadMeeting],
    ) -> Result<Vec<Prediction>, PredictError> {
        home_stats.validate()?;
        away_stats.validate()?;

        Ok(vec![
            self.predict_winner(home, away, home_stats, away_stats, h2h),
            self.predict_total_goals(home_stats, away_stats),
            self.predict_btts(home_stats, away_stats),
        ])
    }

    // -- Winner ----------------------------------------------------------

    fn predict_winner(
        &mut self,
        home: &str,
        away: &str,
        home_stats: &TeamStatistics,
        away_stats: &TeamStatistics,
        h2h: &[HeadToHeadMeeting],
    ) -> Prediction {
        let home_wins = h2h.iter().filter(|m| m.winner == MeetingWinner::Home).count() as f64;
        let away_wins = h2h.iter().filter(|m| m.winner == MeetingWinner::Away).count() as f64;
        let h2h_advantage = home_wins - away_wins;

        let strength_gap = strength(home_stats) - strength(away_stats);
        let total_advantage = strength_gap + h2h_advantage + self.config.home_advantage;

        debug!(
            home = %home,
            away = %away,
            strength_gap = format!("{strength_gap:.1}"),
            h2h_advantage,
            total_advantage = format!("{total_advantage:.1}"),
            "Winner inputs"
        );

        let (outcome, confidence) = if total_advantage > DECISION_MARGIN {
            (
                format!("{home} wins"),
                (65.0 + 2.0 * total_advantage.abs()).min(85.0),
            )
        } else if total_advantage < -DECISION_MARGIN {
            (
                format!("{away} wins"),
                (65.0 + 2.0 * total_advantage.abs()).min(85.0),
            )
        } else {
            // Too close to call: draw or double chance, jittered confidence
            (
                "Draw or double chance".to_string(),
                55.0 + self.rng.gen::<f64>() * 15.0,
            )
        };

        Self::build(
            PredictionCategory::Winner,
            outcome,
            confidence,
            format!(
                "Strength gap {strength_gap:.1}, head-to-head {h2h_advantage:+.0}, \
                 home advantage {:+.0}",
                self.config.home_advantage,
            ),
        )
    }

    // -- Total goals -----------------------------------------------------

    fn predict_total_goals(
        &self,
        home_stats: &TeamStatistics,
        away_stats: &TeamStatistics,
    ) -> Prediction {
        let projected = (home_stats.avg_goals_for()
            + away_stats.avg_goals_for()
            + self.config.league_avg_goals)
            / 2.0;

        let (outcome, confidence) = if projected > OVER_THRESHOLD {
            ("Over 2.5".to_string(), (60.0 + 20.0 * (projected - 2.5)).min(80.0))
        } else {
            ("Under 2.5".to_string(), (60.0 + 15.0 * (2.5 - projected)).min(75.0))
        };

        Self::build(
            PredictionCategory::TotalGoals,
            outcome,
            confidence,
            format!("Projected {projected:.2} goals against a league average of {:.1}",
                self.config.league_avg_goals),
        )
    }

    // -- Both teams to score ---------------------------------------------

    fn predict_btts(
        &self,
        home_stats: &TeamStatistics,
        away_stats: &TeamStatistics,
    ) -> Prediction {
        let btts_score = (home_stats.avg_goals_for()
            + away_stats.avg_goals_for()
            + home_stats.avg_goals_against()
            + away_stats.avg_goals_against())
            / 4.0;

        let (outcome, confidence) = if btts_score > BTTS_THRESHOLD {
            (
                "Both teams score".to_string(),
                (55.0 + 15.0 * btts_score).min(75.0),
            )
        } else {
            (
                "At least one team fails to score".to_string(),
                (60.0 + 10.0 * (BTTS_THRESHOLD - btts_score)).min(70.0),
            )
        };

        Self::build(
            PredictionCategory::BothTeamsScore,
            outcome,
            confidence,
            format!("Mean attacking/defensive goal rate {btts_score:.2}"),
        )
    }

    // -- Helpers ---------------------------------------------------------

    fn build(
        category: PredictionCategory,
        outcome: String,
        confidence: f64,
        reasoning: String,
    ) -> Prediction {
        let confidence_pct = confidence.clamp(0.0, 100.0).round() as u8;
        let implied_odds = if confidence_pct == 0 {
            0.0
        } else {
            (100.0 / confidence_pct as f64 * 100.0).round() / 100.0
        };
        Prediction {
            category,
            outcome,
            confidence_pct,
            implied_odds,
            reasoning,
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
