//! Scoring - pure functions turning judgments into completion scores.

mod engine;

pub use engine::{criterion_weight, ScoreEngine};
