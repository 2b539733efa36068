use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Applicant attributes the credit policy evaluates.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreditProfile {
    /// FICO-style score, 300–850.
    pub credit_score: u16,
    /// Debt-to-income ratio as a percentage (36 = 36%).
    pub debt_to_income_percent: Decimal,
    pub annual_income: Decimal,
}

impl CreditProfile {
    pub fn new(credit_score: u16, debt_to_income_percent: Decimal, annual_income: Decimal) -> Self {
        Self {
            credit_score,
            debt_to_income_percent,
            annual_income,
        }
    }
}

/// Income multiple and cap for one limit tier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LimitTier {
    pub income_multiple: Decimal,
    pub cap: Decimal,
}

impl LimitTier {
    fn limit_for(&self, annual_income: Decimal) -> Decimal {
        (annual_income * self.income_multiple).min(self.cap)
    }
}

/// Policy thresholds. Defaults are the shipped lending policy.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CreditPolicyConfig {
    pub min_credit_score: u16,
    pub preferred_credit_score: u16,
    pub max_dti_percent: Decimal,
    pub preferred_dti_percent: Decimal,
    pub min_annual_income: Decimal,
    /// Both preferred criteria met.
    pub preferred_tier: LimitTier,
    /// Exactly one preferred criterion met.
    pub standard_tier: LimitTier,
    /// Neither preferred criterion met.
    pub basic_tier: LimitTier,
    /// Approved limits are rounded down to a multiple of this.
    pub limit_increment: Decimal,
}

impl Default for CreditPolicyConfig {
    fn default() -> Self {
        Self {
            min_credit_score: 640,
            preferred_credit_score: 720,
            max_dti_percent: dec!(43),
            preferred_dti_percent: dec!(36),
            min_annual_income: dec!(24_000),
            preferred_tier: LimitTier {
                income_multiple: dec!(0.50),
                cap: dec!(50_000),
            },
            standard_tier: LimitTier {
                income_multiple: dec!(0.30),
                cap: dec!(25_000),
            },
            basic_tier: LimitTier {
                income_multiple: dec!(0.20),
                cap: dec!(10_000),
            },
            limit_increment: dec!(100),
        }
    }
}

/// Which limit tier an approval landed in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LimitTierKind {
    Preferred,
    Standard,
    Basic,
}

/// The first policy check an application failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DenialReason {
    CreditScoreBelowMinimum,
    DebtToIncomeAboveMaximum,
    IncomeBelowMinimum,
}

/// Outcome of a credit decision. `limit` is present iff `approved`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreditDecision {
    pub approved: bool,
    pub reason: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<Decimal>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tier: Option<LimitTierKind>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub denial: Option<DenialReason>,
}

impl CreditDecision {
    fn deny(denial: DenialReason, reason: String) -> Self {
        Self {
            approved: false,
            reason,
            limit: None,
            tier: None,
            denial: Some(denial),
        }
    }

    fn approve(tier: LimitTierKind, limit: Decimal, reason: String) -> Self {
        Self {
            approved: true,
            reason,
            limit: Some(limit),
            tier: Some(tier),
            denial: None,
        }
    }
}

impl fmt::Display for CreditDecision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "=== Credit Decision ===")?;
        writeln!(
            f,
            "Decision:  {}",
            if self.approved { "APPROVED" } else { "DENIED" }
        )?;
        writeln!(f, "Reason:    {}", self.reason)?;
        if let Some(limit) = self.limit {
            writeln!(f, "Limit:     {}", limit)?;
        }
        Ok(())
    }
}

/// Tiered approve/deny policy over score, DTI and income.
///
/// Checks run in a fixed order (score floor, DTI ceiling, income floor) and
/// the first failure is the only reason reported. Never fails: a denial is a
/// normal result.
#[derive(Debug, Clone, Default)]
pub struct CreditDecisionPolicy {
    config: CreditPolicyConfig,
}

impl CreditDecisionPolicy {
    pub fn new(config: CreditPolicyConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &CreditPolicyConfig {
        &self.config
    }

    pub fn decide(&self, profile: &CreditProfile) -> CreditDecision {
        let c = &self.config;

        let decision = if profile.credit_score < c.min_credit_score {
            CreditDecision::deny(
                DenialReason::CreditScoreBelowMinimum,
                format!(
                    "Credit score {} is below the minimum of {}",
                    profile.credit_score, c.min_credit_score
                ),
            )
        } else if profile.debt_to_income_percent > c.max_dti_percent {
            CreditDecision::deny(
                DenialReason::DebtToIncomeAboveMaximum,
                format!(
                    "Debt-to-income ratio of {}% exceeds the maximum of {}%",
                    profile.debt_to_income_percent, c.max_dti_percent
                ),
            )
        } else if profile.annual_income < c.min_annual_income {
            CreditDecision::deny(
                DenialReason::IncomeBelowMinimum,
                format!(
                    "Annual income of {} is below the minimum of {}",
                    profile.annual_income, c.min_annual_income
                ),
            )
        } else {
            let strong_score = profile.credit_score >= c.preferred_credit_score;
            let low_dti = profile.debt_to_income_percent <= c.preferred_dti_percent;

            let (kind, tier, reason) = match (strong_score, low_dti) {
                (true, true) => (
                    LimitTierKind::Preferred,
                    &c.preferred_tier,
                    "Approved: excellent credit score and low debt-to-income ratio",
                ),
                (true, false) => (
                    LimitTierKind::Standard,
                    &c.standard_tier,
                    "Approved: strong credit score offsets a moderate debt-to-income ratio",
                ),
                (false, true) => (
                    LimitTierKind::Standard,
                    &c.standard_tier,
                    "Approved: low debt-to-income ratio offsets a fair credit score",
                ),
                (false, false) => (
                    LimitTierKind::Basic,
                    &c.basic_tier,
                    "Approved: meets minimum lending criteria",
                ),
            };

            let limit = round_down_to(tier.limit_for(profile.annual_income), c.limit_increment);
            CreditDecision::approve(kind, limit, reason.to_string())
        };

        log::debug!(
            "credit decision for score {} / dti {}% / income {}: approved={} limit={:?}",
            profile.credit_score,
            profile.debt_to_income_percent,
            profile.annual_income,
            decision.approved,
            decision.limit
        );

        decision
    }
}

/// Round `amount` down to a whole multiple of `increment`.
fn round_down_to(amount: Decimal, increment: Decimal) -> Decimal {
    if increment <= Decimal::ZERO {
        return amount;
    }
    (amount / increment).floor() * increment
}

#[cfg(test)]
mod tests {
    use super::*;

    fn decide(score: u16, dti: Decimal, income: Decimal) -> CreditDecision {
        CreditDecisionPolicy::default().decide(&CreditProfile::new(score, dti, income))
    }

    #[test]
    fn test_score_floor_denies() {
        let d = decide(639, dec!(20), dec!(100_000));
        assert!(!d.approved);
        assert!(d.limit.is_none());
        assert_eq!(d.denial, Some(DenialReason::CreditScoreBelowMinimum));
        assert!(d.reason.contains("Credit score"));
    }

    #[test]
    fn test_minimum_passing_profile_gets_basic_tier() {
        let d = decide(640, dec!(43), dec!(24_000));
        assert!(d.approved);
        assert_eq!(d.tier, Some(LimitTierKind::Basic));
        // 24,000 × 0.20 = 4,800
        assert_eq!(d.limit, Some(dec!(4_800)));
    }

    #[test]
    fn test_preferred_tier_capped() {
        let d = decide(720, dec!(36), dec!(100_000));
        assert!(d.approved);
        assert_eq!(d.tier, Some(LimitTierKind::Preferred));
        assert_eq!(d.limit, Some(dec!(50_000)));
    }

    #[test]
    fn test_standard_tier_either_criterion() {
        let strong_score = decide(750, dec!(40), dec!(60_000));
        assert_eq!(strong_score.tier, Some(LimitTierKind::Standard));
        assert_eq!(strong_score.limit, Some(dec!(18_000)));

        let low_dti = decide(680, dec!(30), dec!(120_000));
        assert_eq!(low_dti.tier, Some(LimitTierKind::Standard));
        assert_eq!(low_dti.limit, Some(dec!(25_000)));
    }

    #[test]
    fn test_first_failure_wins() {
        // Fails all three checks; only the score is reported.
        let d = decide(500, dec!(60), dec!(10_000));
        assert_eq!(d.denial, Some(DenialReason::CreditScoreBelowMinimum));

        // Passes score, fails DTI and income; DTI is reported.
        let d = decide(700, dec!(43.5), dec!(10_000));
        assert_eq!(d.denial, Some(DenialReason::DebtToIncomeAboveMaximum));

        let d = decide(700, dec!(20), dec!(23_999));
        assert_eq!(d.denial, Some(DenialReason::IncomeBelowMinimum));
    }

    #[test]
    fn test_limit_rounds_down_to_hundred() {
        // 33,333 × 0.20 = 6,666.6 → 6,600
        let d = decide(650, dec!(40), dec!(33_333));
        assert_eq!(d.limit, Some(dec!(6_600)));
    }

    #[test]
    fn test_custom_config_applies() {
        let policy = CreditDecisionPolicy::new(CreditPolicyConfig {
            min_credit_score: 700,
            ..Default::default()
        });
        let d = policy.decide(&CreditProfile::new(690, dec!(20), dec!(80_000)));
        assert!(!d.approved);
        assert!(d.reason.contains("700"));
    }

    #[test]
    fn test_partial_config_json_falls_back_to_defaults() {
        let config: CreditPolicyConfig =
            serde_json::from_str(r#"{ "min_credit_score": 660 }"#).unwrap();
        assert_eq!(config.min_credit_score, 660);
        assert_eq!(config.preferred_credit_score, 720);
        assert_eq!(config.max_dti_percent, dec!(43));
    }

    #[test]
    fn test_round_down_to() {
        assert_eq!(round_down_to(dec!(4_899.99), dec!(100)), dec!(4_800));
        assert_eq!(round_down_to(dec!(50_000), dec!(100)), dec!(50_000));
        assert_eq!(round_down_to(dec!(0), dec!(100)), dec!(0));
    }
}
