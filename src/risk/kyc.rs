use crate::core::score::{RiskScale, UnitRiskScore};
use crate::core::subject::SubjectId;
use crate::risk::catalog::RiskCatalog;
use crate::risk::category::RiskCategory;
use crate::risk::flag::FlagSet;
use crate::risk::result::{RiskResult, RiskStatus};
use crate::risk::source::RiskScoreSource;
use chrono::{DateTime, Utc};
use rand::Rng;
use serde::{Deserialize, Serialize};

const CLEAR_NOTES: &str = "Identity verified; no KYC concerns identified.";
const FLAGGED_NOTES: &str = "KYC screening raised concerns that require attention before onboarding.";

/// What an elevated KYC score turns into.
///
/// Deliberately has no `Default`: every caller states its own escalation policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum KycEscalation {
    /// Elevated scores fail outright.
    Fail,
    /// Elevated scores are routed to manual review.
    Review,
}

impl KycEscalation {
    fn status(self) -> RiskStatus {
        match self {
            KycEscalation::Fail => RiskStatus::Failed,
            KycEscalation::Review => RiskStatus::PendingReview,
        }
    }
}

/// Know-your-customer assessment on the unit score scale.
///
/// Scores below 0.3 pass with no flags. Anything higher escalates per the
/// configured [`KycEscalation`] and raises distinct flags from the KYC
/// catalog (identity, address, watchlist, fraud), high severity above 0.7.
///
/// # Examples
///
/// ```
/// use decision_engine::core::score::UnitRiskScore;
/// use decision_engine::core::subject::SubjectId;
/// use decision_engine::risk::kyc::{KycEscalation, RiskAssessmentEngine};
/// use decision_engine::risk::result::RiskStatus;
/// use rand::rngs::StdRng;
/// use rand::SeedableRng;
///
/// let engine = RiskAssessmentEngine::new(KycEscalation::Review);
/// let mut rng = StdRng::seed_from_u64(1);
/// let result = engine.assess_score(
///     SubjectId::new("CUST-1"),
///     UnitRiskScore::saturating(0.5),
///     &mut rng,
///     chrono::Utc::now(),
/// );
/// assert_eq!(result.status(), RiskStatus::PendingReview);
/// assert!(!result.flags().is_empty());
/// ```
#[derive(Debug, Clone)]
pub struct RiskAssessmentEngine {
    escalation: KycEscalation,
    catalog: RiskCatalog,
}

impl RiskAssessmentEngine {
    pub fn new(escalation: KycEscalation) -> Self {
        Self {
            escalation,
            catalog: RiskCatalog::kyc(),
        }
    }

    pub fn escalation(&self) -> KycEscalation {
        self.escalation
    }

    /// Pull one score from `source` and assess it.
    pub fn assess<S, R>(
        &self,
        subject: SubjectId,
        source: &mut S,
        rng: &mut R,
        now: DateTime<Utc>,
    ) -> RiskResult<UnitRiskScore>
    where
        S: RiskScoreSource<UnitRiskScore> + ?Sized,
        R: Rng + ?Sized,
    {
        let score = source.next_score();
        self.assess_score(subject, score, rng, now)
    }

    /// Assess an already-computed score. `rng` only picks which flags to raise.
    pub fn assess_score<R: Rng + ?Sized>(
        &self,
        subject: SubjectId,
        score: UnitRiskScore,
        rng: &mut R,
        now: DateTime<Utc>,
    ) -> RiskResult<UnitRiskScore> {
        let (status, flags) = match score.flag_severity() {
            None => (RiskStatus::Passed, FlagSet::new()),
            Some(severity) => {
                let candidates: Vec<RiskCategory> = self.catalog.categories().collect();
                let flags = self.catalog.draw_flags(&candidates, severity, rng);
                (self.escalation.status(), flags)
            }
        };
        let notes = if flags.is_empty() {
            CLEAR_NOTES
        } else {
            FLAGGED_NOTES
        };

        log::debug!(
            "kyc {}: score {} -> {} with {} flag(s)",
            subject,
            score,
            status,
            flags.len()
        );

        RiskResult::new(subject, RiskCategory::Kyc, status, score, now, flags, notes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::risk::flag::Severity;
    use crate::risk::source::FixedScore;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn assess(escalation: KycEscalation, score: f64) -> RiskResult<UnitRiskScore> {
        let engine = RiskAssessmentEngine::new(escalation);
        let mut rng = StdRng::seed_from_u64(21);
        engine.assess_score(
            SubjectId::new("CUST-1"),
            UnitRiskScore::saturating(score),
            &mut rng,
            Utc::now(),
        )
    }

    #[test]
    fn test_low_score_passes_clean() {
        let result = assess(KycEscalation::Fail, 0.1);
        assert_eq!(result.status(), RiskStatus::Passed);
        assert!(result.flags().is_empty());
        assert_eq!(result.notes(), CLEAR_NOTES);
        assert_eq!(result.check(), RiskCategory::Kyc);
    }

    #[test]
    fn test_high_score_escalates_with_high_flags() {
        let result = assess(KycEscalation::Fail, 0.9);
        assert_eq!(result.status(), RiskStatus::Failed);
        assert!(!result.flags().is_empty());
        assert_eq!(result.flags().max_severity(), Some(Severity::High));
        assert_eq!(result.notes(), FLAGGED_NOTES);
        assert!(result.is_consistent());
    }

    #[test]
    fn test_review_escalation() {
        let result = assess(KycEscalation::Review, 0.5);
        assert_eq!(result.status(), RiskStatus::PendingReview);
        assert!(result.flags().iter().all(|f| f.severity == Severity::Medium));
    }

    #[test]
    fn test_threshold_boundary() {
        assert_eq!(assess(KycEscalation::Fail, 0.299).status(), RiskStatus::Passed);
        assert_eq!(assess(KycEscalation::Fail, 0.3).status(), RiskStatus::Failed);
    }

    #[test]
    fn test_flags_only_from_kyc_catalog() {
        let engine = RiskAssessmentEngine::new(KycEscalation::Fail);
        let mut rng = StdRng::seed_from_u64(4);
        let allowed: Vec<_> = RiskCatalog::kyc().categories().collect();
        for _ in 0..100 {
            let result = engine.assess(
                SubjectId::new("CUST-2"),
                &mut FixedScore(UnitRiskScore::saturating(0.95)),
                &mut rng,
                Utc::now(),
            );
            assert!(result.flags().iter().all(|f| allowed.contains(&f.category)));
        }
    }
}
