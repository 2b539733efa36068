use crate::core::score::{PercentRiskScore, RiskScale};
use crate::core::subject::SubjectId;
use crate::risk::catalog::RiskCatalog;
use crate::risk::category::RiskCategory;
use crate::risk::flag::FlagSet;
use crate::risk::result::{RiskResult, RiskStatus};
use crate::risk::source::RiskScoreSource;
use chrono::{DateTime, Utc};
use rand::Rng;

/// Flag types any check may raise besides its own.
const SHARED_CANDIDATES: [RiskCategory; 6] = [
    RiskCategory::Identity,
    RiskCategory::Address,
    RiskCategory::Document,
    RiskCategory::Watchlist,
    RiskCategory::Transaction,
    RiskCategory::Behavior,
];

/// Generic compliance screening on the 0–100 scale.
///
/// | score      | status           | flags            |
/// |------------|------------------|------------------|
/// | `< 30`     | `passed`         | none             |
/// | `[30, 70)` | `pending-review` | 1–2, medium      |
/// | `>= 70`    | `failed`         | 2–3, high        |
#[derive(Debug, Clone)]
pub struct ComplianceCheckEngine {
    catalog: RiskCatalog,
}

impl Default for ComplianceCheckEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl ComplianceCheckEngine {
    pub fn new() -> Self {
        Self {
            catalog: RiskCatalog::compliance(),
        }
    }

    /// Candidate flag types for a check: the check's own type first, then
    /// the shared pool.
    pub fn candidates(check: RiskCategory) -> Vec<RiskCategory> {
        let mut candidates = Vec::with_capacity(SHARED_CANDIDATES.len() + 1);
        candidates.push(check);
        candidates.extend(SHARED_CANDIDATES.iter().copied().filter(|c| *c != check));
        candidates
    }

    pub fn run<S, R>(
        &self,
        subject: SubjectId,
        check: RiskCategory,
        source: &mut S,
        rng: &mut R,
        now: DateTime<Utc>,
    ) -> RiskResult<PercentRiskScore>
    where
        S: RiskScoreSource<PercentRiskScore> + ?Sized,
        R: Rng + ?Sized,
    {
        let score = source.next_score();
        self.run_score(subject, check, score, rng, now)
    }

    pub fn run_score<R: Rng + ?Sized>(
        &self,
        subject: SubjectId,
        check: RiskCategory,
        score: PercentRiskScore,
        rng: &mut R,
        now: DateTime<Utc>,
    ) -> RiskResult<PercentRiskScore> {
        let status = status_for(score);
        let flags = match score.flag_severity() {
            None => FlagSet::new(),
            Some(severity) => self
                .catalog
                .draw_flags(&Self::candidates(check), severity, rng),
        };
        let notes = notes_for(check, status);

        log::debug!(
            "{} check on {}: score {} -> {} with {} flag(s)",
            check,
            subject,
            score,
            status,
            flags.len()
        );

        RiskResult::new(subject, check, status, score, now, flags, notes)
    }
}

fn status_for(score: PercentRiskScore) -> RiskStatus {
    let v = score.value();
    if v < PercentRiskScore::ELEVATED {
        RiskStatus::Passed
    } else if v < PercentRiskScore::HIGH {
        RiskStatus::PendingReview
    } else {
        RiskStatus::Failed
    }
}

fn notes_for(check: RiskCategory, status: RiskStatus) -> String {
    let label = check.as_str().to_ascii_uppercase();
    match status {
        RiskStatus::Passed => format!("{} check completed with no findings.", label),
        RiskStatus::PendingReview => format!(
            "{} check raised findings that require analyst review.",
            label
        ),
        RiskStatus::Failed => format!("{} check failed; escalate before proceeding.", label),
    }
}
