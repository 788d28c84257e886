//! Team strength scoring.
//!
//! Collapses a team's season statistics into a single scalar combining
//! recent form, goal differential, and win rate. Pure computation with
//! no failure mode: a zero-denominator win rate is treated as 0.

use crate::types::{MatchOutcome, TeamStatistics};

const FORM_WEIGHT: f64 = 0.4;
const GOAL_DIFF_WEIGHT: f64 = 0.3;
const WIN_RATE_WEIGHT: f64 = 0.3;

/// Form points over the recent-form sequence (3 per win, 1 per draw).
pub fn form_score(form: &[MatchOutcome]) -> f64 {
    form.iter().map(|o| o.form_points()).sum()
}

/// Composite strength score for a team.
///
/// `0.4·form + 0.3·goal_diff + 0.3·(win_rate·100)`. Win rate is scaled
/// to a percentage so the three components live on comparable ranges.
pub fn strength(stats: &TeamStatistics) -> f64 {
    FORM_WEIGHT * form_score(&stats.recent_form)
        + GOAL_DIFF_WEIGHT * stats.goal_diff() as f64
        + WIN_RATE_WEIGHT * (stats.win_rate() * 100.0)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
