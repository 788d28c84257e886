//! Expert consensus aggregation.
//!
//! Summarizes a collection of independent predictions from external
//! sources: modal outcome, mean confidence, and a concentration level.
//! Stateless; recomputed per call.

use tracing::debug;

use crate::types::{ConsensusLevel, ConsensusSummary, ExpertPick};

/// Share of picks on the modal outcome for a high-consensus call.
const HIGH_CONSENSUS_SHARE: f64 = 0.7;

/// Share of picks on the modal outcome for a medium-consensus call.
const MEDIUM_CONSENSUS_SHARE: f64 = 0.5;

/// Individual confidence required for an outcome to qualify on its own.
const QUALIFYING_CONFIDENCE: f64 = 75.0;

/// Aggregate a set of expert picks into a consensus summary.
///
/// An empty input is a legitimate state (no picks collected yet) and
/// yields the neutral summary rather than an error.
pub fn aggregate(picks: &[ExpertPick]) -> ConsensusSummary {
    if picks.is_empty() {
        return ConsensusSummary::neutral();
    }

    // Occurrence counts in first-seen order, so modal ties break
    // deterministically toward the earliest outcome.
    let mut counts: Vec<(&str, usize)> = Vec::new();
    for pick in picks {
        match counts.iter_mut().find(|(o, _)| *o == pick.outcome) {
            Some((_, n)) => *n += 1,
            None => counts.push((&pick.outcome, 1)),
        }
    }

    let (modal_outcome, modal_count) = counts
        .iter()
        .fold(("", 0usize), |best, &(outcome, n)| {
            if n > best.1 {
                (outcome, n)
            } else {
                best
            }
        });

    let total = picks.len();
    let modal_share = modal_count as f64 / total as f64;
    let level = if modal_share >= HIGH_CONSENSUS_SHARE {
        ConsensusLevel::High
    } else if modal_share >= MEDIUM_CONSENSUS_SHARE {
        ConsensusLevel::Medium
    } else {
        ConsensusLevel::Low
    };

    let mean_confidence =
        picks.iter().map(|p| p.confidence_pct).sum::<f64>() / total as f64;

    // Distinct outcomes that are confident enough on their own,
    // preserving first-seen order.
    let mut qualifying_outcomes: Vec<String> = Vec::new();
    for pick in picks {
        if pick.confidence_pct >= QUALIFYING_CONFIDENCE
            && !qualifying_outcomes.contains(&pick.outcome)
        {
            qualifying_outcomes.push(pick.outcome.clone());
        }
    }

    debug!(
        picks = total,
        modal = %modal_outcome,
        share = format!("{modal_share:.2}"),
        level = %level,
        "Consensus computed"
    );

    ConsensusSummary {
        modal_outcome: modal_outcome.to_string(),
        mean_confidence,
        level,
        qualifying_outcomes,
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn pick(outcome: &str, confidence_pct: f64) -> ExpertPick {
        ExpertPick {
            outcome: outcome.to_string(),
            confidence_pct,
        }
    }

    #[test]
    fn test_empty_input_neutral_summary() {
        let summary = aggregate(&[]);
        assert!(summary.is_empty());
        assert_eq!(summary.mean_confidence, 0.0);
        assert_eq!(summary.level, ConsensusLevel::Low);
    }

    #[test]
    fn test_two_of_three_is_medium() {
        // 2/3 ≈ 0.667: at least 0.5 but below 0.7
        let summary = aggregate(&[pick("A", 80.0), pick("A", 90.0), pick("B", 60.0)]);
        assert_eq!(summary.modal_outcome, "A");
        assert!((summary.mean_confidence - 76.67).abs() < 0.01);
        assert_eq!(summary.level, ConsensusLevel::Medium);
    }

    #[test]
    fn test_unanimous_is_high() {
        let summary = aggregate(&[pick("Draw", 60.0), pick("Draw", 70.0), pick("Draw", 65.0)]);
        assert_eq!(summary.modal_outcome, "Draw");
        assert_eq!(summary.level, ConsensusLevel::High);
    }

    #[test]
    fn test_scattered_is_low() {
        let summary = aggregate(&[
            pick("A", 60.0),
            pick("B", 60.0),
            pick("C", 60.0),
            pick("A", 60.0),
            pick("D", 60.0),
        ]);
        // 2/5 = 0.4 < 0.5
        assert_eq!(summary.modal_outcome, "A");
        assert_eq!(summary.level, ConsensusLevel::Low);
    }

    #[test]
    fn test_modal_tie_breaks_to_first_seen() {
        let summary = aggregate(&[
            pick("B", 50.0),
            pick("A", 90.0),
            pick("A", 90.0),
            pick("B", 50.0),
        ]);
        assert_eq!(summary.modal_outcome, "B");
    }

    #[test]
    fn test_qualifying_outcomes_threshold_and_order() {
        let summary = aggregate(&[
            pick("C", 75.0),
            pick("A", 90.0),
            pick("A", 80.0),
            pick("B", 74.9),
        ]);
        // Distinct, first-seen order, >= 75 only
        assert_eq!(summary.qualifying_outcomes, vec!["C", "A"]);
    }

    #[test]
    fn test_single_pick() {
        let summary = aggregate(&[pick("A", 88.0)]);
        assert_eq!(summary.modal_outcome, "A");
        assert_eq!(summary.level, ConsensusLevel::High);
        assert!((summary.mean_confidence - 88.0).abs() < 1e-10);
        assert_eq!(summary.qualifying_outcomes, vec!["A"]);
    }
}
