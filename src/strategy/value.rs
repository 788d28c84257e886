//! Value-bet detection.
//!
//! Compares model-implied "true" odds against supplied bookmaker odds
//! for a fixed catalog of bet types and surfaces only the bets where
//! the bookmaker's price exceeds the model's by more than the edge
//! floor, ranked best-first.
//!
//! Model odds are currently a base-odds table with a bounded random
//! perturbation standing in for a real predictive model; the generator
//! is seedable so tests stay deterministic.
//! TODO: derive model odds from the prediction engine's confidence
//! outputs instead of the perturbed base table.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::collections::HashMap;
use tracing::debug;

use crate::config::ValueBetsConfig;
use crate::types::{RiskTier, ValueBetCandidate};

// ---------------------------------------------------------------------------
// Policy
// ---------------------------------------------------------------------------

/// Edge-to-risk mapping. Deliberately inverted relative to intuition:
/// the bigger the edge, the *lower* the assigned risk, because large
/// edges are treated as more obviously correct rather than more
/// volatile. Inherited business policy; change only with product
/// sign-off.
#[derive(Debug, Clone, Copy)]
pub struct EdgeRiskThresholds {
    /// Edge above this is low risk.
    pub low: f64,
    /// Edge above this (and at or below `low`) is medium risk.
    pub medium: f64,
}

impl Default for EdgeRiskThresholds {
    fn default() -> Self {
        Self {
            low: 20.0,
            medium: 10.0,
        }
    }
}

impl EdgeRiskThresholds {
    pub fn tier_for(&self, edge_pct: f64) -> RiskTier {
        if edge_pct > self.low {
            RiskTier::Low
        } else if edge_pct > self.medium {
            RiskTier::Medium
        } else {
            RiskTier::High
        }
    }
}

/// Bound of the random perturbation applied to base odds.
const PERTURBATION: f64 = 0.3;

/// Decimal odds can never drop to (or below) even money from the model.
const MIN_MODEL_ODDS: f64 = 1.01;

/// Fixed catalog of bet outcomes with their base "true" odds.
///
/// Team-specific goal props are expanded with the actual team names.
fn outcome_catalog(home: &str, away: &str) -> Vec<(String, f64)> {
    vec![
        (format!("{home} wins"), 2.10),
        (format!("{away} wins"), 3.40),
        ("Draw".to_string(), 3.20),
        ("Over 2.5 goals".to_string(), 1.90),
        ("Under 2.5 goals".to_string(), 1.95),
        ("Both teams score".to_string(), 1.80),
        (format!("{home} scores 2+"), 2.60),
        (format!("{away} scores 2+"), 2.80),
    ]
}

// ---------------------------------------------------------------------------
// Detector
// ---------------------------------------------------------------------------

/// Detects bookmaker prices that exceed the model's odds.
pub struct ValueBetDetector {
    config: ValueBetsConfig,
    thresholds: EdgeRiskThresholds,
    rng: StdRng,
}

impl ValueBetDetector {
    pub fn new(config: ValueBetsConfig) -> Self {
        let thresholds = EdgeRiskThresholds {
            low: config.low_risk_edge_pct,
            medium: config.medium_risk_edge_pct,
        };
        Self {
            config,
            thresholds,
            rng: StdRng::from_entropy(),
        }
    }

    /// Detector with a fixed seed for deterministic model odds.
    pub fn seeded(config: ValueBetsConfig, seed: u64) -> Self {
        let mut detector = Self::new(config);
        detector.rng = StdRng::seed_from_u64(seed);
        detector
    }

    /// Find all value bets for a match given the bookmaker's prices.
    ///
    /// Catalog outcomes the bookmaker doesn't quote are skipped. Output
    /// is sorted descending by edge so the strongest opportunities
    /// surface first.
    pub fn detect(
        &mut self,
        home: &str,
        away: &str,
        bookmaker_odds: &HashMap<String, f64>,
    ) -> Vec<ValueBetCandidate> {
        let mut candidates = Vec::new();

        for (outcome, base_odds) in outcome_catalog(home, away) {
            let Some(&book) = bookmaker_odds.get(&outcome) else {
                continue;
            };

            let model = (base_odds + self.rng.gen_range(-PERTURBATION..=PERTURBATION))
                .max(MIN_MODEL_ODDS);
            let edge_pct = (book / model - 1.0) * 100.0;

            if edge_pct <= self.config.min_edge_pct {
                debug!(
                    outcome = %outcome,
                    edge = format!("{edge_pct:.1}%"),
                    "Edge below floor"
                );
                continue;
            }

            let confidence_pct = (60.0 + 2.0 * edge_pct).min(90.0).round() as u8;

            debug!(
                outcome = %outcome,
                book,
                model = format!("{model:.2}"),
                edge = format!("{edge_pct:.1}%"),
                "Value bet detected"
            );

            candidates.push(ValueBetCandidate {
                outcome,
                bookmaker_odds: book,
                model_odds: (model * 100.0).round() / 100.0,
                edge_pct,
                confidence_pct,
                risk: self.thresholds.tier_for(edge_pct),
            });
        }

        // Best opportunities first
        candidates.sort_by(|a, b| {
            b.edge_pct
                .partial_cmp(&a.edge_pct)
                .unwrap_or(std::cmp::Ordering::Equal)
        });

        candidates
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
