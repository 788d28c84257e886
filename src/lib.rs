//! GOALCAST: football match prediction and value-bet engine
//!
//! Library crate exposing all modules for use by integration tests
//! and the binary entry point.

pub mod config;
pub mod types;
pub mod providers;
pub mod resolver;
pub mod engine;
pub mod strategy;
