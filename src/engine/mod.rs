//! Prediction engine: team strength scoring and match predictions.

pub mod predictor;
pub mod strength;

pub use predictor::PredictionEngine;
pub use strength::strength;
