//! Flag catalogs shared by the KYC and compliance engines.

use crate::risk::category::RiskCategory;
use crate::risk::flag::{Flag, FlagSet, Severity};
use rand::seq::SliceRandom;
use rand::Rng;
use serde::Serialize;

/// One `category → description` row of a catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CatalogEntry {
    pub category: RiskCategory,
    pub description: &'static str,
}

const fn entry(category: RiskCategory, description: &'static str) -> CatalogEntry {
    CatalogEntry {
        category,
        description,
    }
}

const KYC_ENTRIES: &[CatalogEntry] = &[
    entry(
        RiskCategory::Identity,
        "Identity document details could not be verified",
    ),
    entry(
        RiskCategory::Address,
        "Residential address does not match records on file",
    ),
    entry(
        RiskCategory::Watchlist,
        "Potential match found on an internal watchlist",
    ),
    entry(
        RiskCategory::Fraud,
        "Identity is linked to previously reported fraud",
    ),
];

const COMPLIANCE_ENTRIES: &[CatalogEntry] = &[
    entry(
        RiskCategory::Kyc,
        "Customer due diligence information is incomplete",
    ),
    entry(
        RiskCategory::Aml,
        "Transaction pattern is consistent with structuring",
    ),
    entry(RiskCategory::Fraud, "Activity matches a known fraud pattern"),
    entry(
        RiskCategory::Sanctions,
        "Potential match against a sanctions list",
    ),
    entry(
        RiskCategory::Pep,
        "Subject identified as a politically exposed person",
    ),
    entry(
        RiskCategory::Identity,
        "Identity could not be verified against trusted sources",
    ),
    entry(RiskCategory::Address, "Address verification failed"),
    entry(
        RiskCategory::Document,
        "Submitted document shows signs of alteration",
    ),
    entry(
        RiskCategory::Watchlist,
        "Name matches an entry on a monitored watchlist",
    ),
    entry(
        RiskCategory::Transaction,
        "Unusual transaction volume for this account",
    ),
    entry(
        RiskCategory::Behavior,
        "Account behavior deviates from the established profile",
    ),
];

/// A fixed mapping from flag category to description.
///
/// Engines only ever draw categories that the catalog lists, so a lookup
/// miss cannot happen at assessment time.
#[derive(Debug, Clone, Copy)]
pub struct RiskCatalog {
    entries: &'static [CatalogEntry],
}

impl RiskCatalog {
    /// Identity-verification findings used by KYC.
    pub const fn kyc() -> Self {
        Self {
            entries: KYC_ENTRIES,
        }
    }

    /// One entry for every [`RiskCategory`].
    pub const fn compliance() -> Self {
        Self {
            entries: COMPLIANCE_ENTRIES,
        }
    }

    pub fn entries(&self) -> &'static [CatalogEntry] {
        self.entries
    }

    pub fn categories(&self) -> impl Iterator<Item = RiskCategory> + '_ {
        self.entries.iter().map(|e| e.category)
    }

    pub fn describe(&self, category: RiskCategory) -> Option<&'static str> {
        self.entries
            .iter()
            .find(|e| e.category == category)
            .map(|e| e.description)
    }

    /// Draw distinct flags of `severity` from `candidates`.
    ///
    /// High severity raises 2–3 flags, medium 1–2, low exactly one, never more
    /// than there are usable candidates. Candidates absent from the catalog and
    /// repeated candidates are ignored.
    pub fn draw_flags<R: Rng + ?Sized>(
        &self,
        candidates: &[RiskCategory],
        severity: Severity,
        rng: &mut R,
    ) -> FlagSet {
        let mut pool: Vec<CatalogEntry> = Vec::with_capacity(candidates.len());
        for category in candidates {
            if pool.iter().any(|e| e.category == *category) {
                continue;
            }
            if let Some(description) = self.describe(*category) {
                pool.push(entry(*category, description));
            }
        }

        let count = match severity {
            Severity::High => rng.gen_range(2..=3),
            Severity::Medium => rng.gen_range(1..=2),
            Severity::Low => 1,
        }
        .min(pool.len());

        let mut flags = FlagSet::new();
        for chosen in pool.choose_multiple(rng, count) {
            flags.insert(Flag {
                category: chosen.category,
                severity,
                description: chosen.description.to_string(),
            });
        }
        flags
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_compliance_catalog_covers_every_category() {
        let catalog = RiskCatalog::compliance();
        for category in RiskCategory::ALL {
            assert!(
                catalog.describe(category).is_some(),
                "missing description for {}",
                category
            );
        }
        assert_eq!(catalog.entries().len(), RiskCategory::ALL.len());
    }

    #[test]
    fn test_kyc_catalog_is_identity_focused() {
        let categories: Vec<_> = RiskCatalog::kyc().categories().collect();
        assert_eq!(
            categories,
            vec![
                RiskCategory::Identity,
                RiskCategory::Address,
                RiskCategory::Watchlist,
                RiskCategory::Fraud
            ]
        );
        assert!(RiskCatalog::kyc().describe(RiskCategory::Sanctions).is_none());
    }

    #[test]
    fn test_draw_counts_by_severity() {
        let catalog = RiskCatalog::compliance();
        let mut rng = StdRng::seed_from_u64(11);
        for _ in 0..200 {
            let high = catalog.draw_flags(&RiskCategory::ALL, Severity::High, &mut rng);
            assert!((2..=3).contains(&high.len()));
            assert!(high.iter().all(|f| f.severity == Severity::High));

            let medium = catalog.draw_flags(&RiskCategory::ALL, Severity::Medium, &mut rng);
            assert!((1..=2).contains(&medium.len()));
        }
    }

    #[test]
    fn test_draw_ignores_duplicates_and_unknown_candidates() {
        let catalog = RiskCatalog::kyc();
        let mut rng = StdRng::seed_from_u64(3);
        let candidates = [
            RiskCategory::Address,
            RiskCategory::Address,
            RiskCategory::Sanctions,
        ];
        for _ in 0..50 {
            let flags = catalog.draw_flags(&candidates, Severity::High, &mut rng);
            assert_eq!(flags.len(), 1);
            assert!(flags.contains(RiskCategory::Address));
        }
    }

    #[test]
    fn test_descriptions_come_from_catalog() {
        let catalog = RiskCatalog::kyc();
        let mut rng = StdRng::seed_from_u64(5);
        let flags = catalog.draw_flags(&[RiskCategory::Fraud], Severity::Medium, &mut rng);
        let flag = flags.get(RiskCategory::Fraud).unwrap();
        assert_eq!(Some(flag.description.as_str()), catalog.describe(RiskCategory::Fraud));
    }
}
