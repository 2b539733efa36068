//! Stochastic test-data generation.
//!
//! Manufactures demo customers and pass/fail-weighted score streams. This is
//! the only place that decides how often a check "should" pass; the engines
//! themselves just classify the scores they are handed.

use crate::core::score::{PercentRiskScore, UnitRiskScore};
use crate::core::subject::SubjectId;
use crate::error::EngineResult;
use crate::lending::amortization::LoanTerms;
use crate::lending::credit::CreditProfile;
use crate::risk::category::RiskCategory;
use crate::risk::source::RiskScoreSource;
use rand::seq::SliceRandom;
use rand::Rng;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::ops::RangeInclusive;

const FIRST_NAMES: [&str; 10] = [
    "Ava", "Liam", "Maya", "Noah", "Priya", "Mateo", "Chloe", "Kenji", "Amara", "Lucas",
];
const LAST_NAMES: [&str; 10] = [
    "Johnson", "Okafor", "Silva", "Nguyen", "Patel", "Müller", "Garcia", "Kowalski", "Haddad",
    "Smith",
];
const TERM_CHOICES: [u32; 7] = [12, 24, 36, 60, 120, 180, 360];

/// Target pass probability for a check family when driven by fixtures.
pub fn target_pass_rate(check: RiskCategory) -> f64 {
    match check {
        RiskCategory::Sanctions | RiskCategory::Pep => 0.90,
        _ => 0.75,
    }
}

/// Configuration for generating demo customers.
#[derive(Debug, Clone)]
pub struct FixtureConfig {
    pub customer_count: usize,
    pub min_credit_score: u16,
    pub max_credit_score: u16,
    /// Upper bound on generated DTI, in percent.
    pub max_dti_percent: u32,
    pub min_income: u32,
    pub max_income: u32,
    pub min_principal: u32,
    pub max_principal: u32,
}

impl Default for FixtureConfig {
    fn default() -> Self {
        Self {
            customer_count: 10,
            min_credit_score: 300,
            max_credit_score: 850,
            max_dti_percent: 60,
            min_income: 15_000,
            max_income: 250_000,
            min_principal: 5_000,
            max_principal: 500_000,
        }
    }
}

/// A generated demo customer with everything the lending components consume.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CustomerFixture {
    pub subject_id: SubjectId,
    pub name: String,
    pub profile: CreditProfile,
    pub loan_terms: LoanTerms,
}

/// Generate `config.customer_count` demo customers.
///
/// Fails only when the configured principal range would produce invalid
/// loan terms.
pub fn generate_customers<R: Rng + ?Sized>(
    config: &FixtureConfig,
    rng: &mut R,
) -> EngineResult<Vec<CustomerFixture>> {
    let mut customers = Vec::with_capacity(config.customer_count);

    for i in 0..config.customer_count {
        let first = FIRST_NAMES.choose(rng).copied().unwrap_or("Alex");
        let last = LAST_NAMES.choose(rng).copied().unwrap_or("Doe");

        let credit_score = rng.gen_range(span(config.min_credit_score, config.max_credit_score));
        // One decimal place of DTI
        let dti = Decimal::new(rng.gen_range(0..=i64::from(config.max_dti_percent) * 10), 1);
        let income = round_to_hundred(rng.gen_range(span(config.min_income, config.max_income)));
        let principal =
            round_to_hundred(rng.gen_range(span(config.min_principal, config.max_principal)));
        let rate = Decimal::new(rng.gen_range(250..=1_500), 2);
        let term = TERM_CHOICES.choose(rng).copied().unwrap_or(36);

        customers.push(CustomerFixture {
            subject_id: SubjectId::new(format!("CUST-{:04}", i + 1)),
            name: format!("{} {}", first, last),
            profile: CreditProfile::new(credit_score, dti, income),
            loan_terms: LoanTerms::new(principal, rate, term)?,
        });
    }

    log::debug!("generated {} fixture customers", customers.len());
    Ok(customers)
}

/// `lo..=hi`, tolerating an inverted configuration.
fn span<T: Ord + Copy>(lo: T, hi: T) -> RangeInclusive<T> {
    lo..=hi.max(lo)
}

fn round_to_hundred(value: u32) -> Decimal {
    Decimal::from(value / 100 * 100)
}

/// Compliance scores that pass with the check family's target probability.
///
/// Passing draws land in `[0, 30)`, the rest in `[30, 100)`.
#[derive(Debug, Clone)]
pub struct FixtureScoreSource<R> {
    pass_rate: f64,
    rng: R,
}

impl<R: Rng> FixtureScoreSource<R> {
    pub fn new(check: RiskCategory, rng: R) -> Self {
        Self::with_pass_rate(target_pass_rate(check), rng)
    }

    pub fn with_pass_rate(pass_rate: f64, rng: R) -> Self {
        Self {
            pass_rate: clamp_probability(pass_rate),
            rng,
        }
    }

    pub fn pass_rate(&self) -> f64 {
        self.pass_rate
    }
}

impl<R: Rng> RiskScoreSource<PercentRiskScore> for FixtureScoreSource<R> {
    fn next_score(&mut self) -> PercentRiskScore {
        let value = if self.rng.gen_bool(self.pass_rate) {
            self.rng.gen_range(0.0..PercentRiskScore::ELEVATED)
        } else {
            self.rng.gen_range(PercentRiskScore::ELEVATED..PercentRiskScore::MAX)
        };
        PercentRiskScore::saturating(value)
    }
}

/// KYC scores on the unit scale with a target pass probability.
#[derive(Debug, Clone)]
pub struct UnitFixtureSource<R> {
    pass_rate: f64,
    rng: R,
}

impl<R: Rng> UnitFixtureSource<R> {
    pub fn new(rng: R) -> Self {
        Self::with_pass_rate(target_pass_rate(RiskCategory::Kyc), rng)
    }

    pub fn with_pass_rate(pass_rate: f64, rng: R) -> Self {
        Self {
            pass_rate: clamp_probability(pass_rate),
            rng,
        }
    }
}

impl<R: Rng> RiskScoreSource<UnitRiskScore> for UnitFixtureSource<R> {
    fn next_score(&mut self) -> UnitRiskScore {
        let value = if self.rng.gen_bool(self.pass_rate) {
            self.rng.gen_range(0.0..UnitRiskScore::ELEVATED)
        } else {
            self.rng.gen_range(UnitRiskScore::ELEVATED..1.0)
        };
        UnitRiskScore::saturating(value)
    }
}

fn clamp_probability(p: f64) -> f64 {
    if p.is_nan() {
        0.0
    } else {
        p.clamp(0.0, 1.0)
    }
}
