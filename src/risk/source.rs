//! Where assessment scores come from.
//!
//! The engines never roll their own dice: a caller hands them a
//! [`RiskScoreSource`] (a model, a fixed value, or a seeded fixture
//! generator) and the engine only classifies what it is given.

use crate::core::score::{PercentRiskScore, RiskScale, UnitRiskScore};
use rand::Rng;

/// Supplies risk scores on scale `S`.
pub trait RiskScoreSource<S: RiskScale> {
    fn next_score(&mut self) -> S;
}

/// Always yields the same score.
#[derive(Debug, Clone, Copy)]
pub struct FixedScore<S>(pub S);

impl<S: RiskScale> RiskScoreSource<S> for FixedScore<S> {
    fn next_score(&mut self) -> S {
        self.0
    }
}

/// Uniform samples over the whole scale from an owned RNG.
#[derive(Debug, Clone)]
pub struct UniformScoreSource<R> {
    rng: R,
}

impl<R: Rng> UniformScoreSource<R> {
    pub fn new(rng: R) -> Self {
        Self { rng }
    }
}

impl<R: Rng> RiskScoreSource<UnitRiskScore> for UniformScoreSource<R> {
    fn next_score(&mut self) -> UnitRiskScore {
        UnitRiskScore::saturating(self.rng.gen::<f64>())
    }
}

impl<R: Rng> RiskScoreSource<PercentRiskScore> for UniformScoreSource<R> {
    fn next_score(&mut self) -> PercentRiskScore {
        PercentRiskScore::saturating(self.rng.gen_range(0.0..PercentRiskScore::MAX))
    }
}
