//! Downstream analysis: value-bet detection and expert consensus.

pub mod consensus;
pub mod value;

pub use consensus::aggregate;
pub use value::ValueBetDetector;
