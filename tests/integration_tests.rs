use chrono::{DateTime, NaiveDate, Utc};
use decision_engine::core::score::{PercentRiskScore, RiskScale, UnitRiskScore};
use decision_engine::core::subject::SubjectId;
use decision_engine::error::EngineError;
use decision_engine::fraud::alert::{AlertSeverity, AlertStatus, AlertType};
use decision_engine::fraud::generator::FraudAlertGenerator;
use decision_engine::lending::amortization::{AmortizationScheduler, LoanTerms};
use decision_engine::lending::credit::{
    CreditDecisionPolicy, CreditPolicyConfig, CreditProfile, DenialReason, LimitTierKind,
};
use decision_engine::risk::category::RiskCategory;
use decision_engine::risk::compliance::ComplianceCheckEngine;
use decision_engine::risk::flag::Severity;
use decision_engine::risk::kyc::{KycEscalation, RiskAssessmentEngine};
use decision_engine::risk::result::{RiskResult, RiskStatus};
use decision_engine::risk::source::FixedScore;
use decision_engine::simulation::fixtures::{
    generate_customers, FixtureConfig, FixtureScoreSource, UnitFixtureSource,
};
use rand::rngs::StdRng;
use rand::SeedableRng;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

fn at(rfc3339: &str) -> DateTime<Utc> {
    DateTime::parse_from_rfc3339(rfc3339)
        .unwrap()
        .with_timezone(&Utc)
}

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

/// Full onboarding pipeline: KYC → compliance → credit → schedule → fraud alert.
#[test]
fn full_onboarding_workflow() {
    let now = at("2025-03-01T09:30:00Z");
    let subject = SubjectId::new("CUST-0042");
    let mut rng = StdRng::seed_from_u64(2025);

    // KYC on a clean score
    let kyc = RiskAssessmentEngine::new(KycEscalation::Review).assess(
        subject.clone(),
        &mut FixedScore(UnitRiskScore::saturating(0.12)),
        &mut rng,
        now,
    );
    assert_eq!(kyc.status(), RiskStatus::Passed);
    assert!(kyc.flags().is_empty());
    assert_eq!(kyc.timestamp(), now);

    // Sanctions and AML screening
    let compliance = ComplianceCheckEngine::new();
    let sanctions = compliance.run_score(
        subject.clone(),
        RiskCategory::Sanctions,
        PercentRiskScore::saturating(8.0),
        &mut rng,
        now,
    );
    let aml = compliance.run_score(
        subject.clone(),
        RiskCategory::Aml,
        PercentRiskScore::saturating(41.5),
        &mut rng,
        now,
    );
    assert!(sanctions.is_passed());
    assert_eq!(aml.status(), RiskStatus::PendingReview);
    assert!(aml.is_consistent());

    // Credit decision
    let profile = CreditProfile::new(735, dec!(31.5), dec!(96_000));
    let decision = CreditDecisionPolicy::default().decide(&profile);
    assert!(decision.approved);
    assert_eq!(decision.tier, Some(LimitTierKind::Preferred));
    // 96,000 × 0.50 = 48,000, under the 50,000 cap
    assert_eq!(decision.limit, Some(dec!(48_000)));

    // Loan schedule
    let terms = LoanTerms::new(dec!(25_000), dec!(7.5), 48).unwrap();
    let schedule = AmortizationScheduler::schedule(&terms, date(2025, 4, 1)).unwrap();
    assert_eq!(schedule.len(), 48);
    assert_eq!(schedule.entries()[0].due_date, date(2025, 4, 1));
    assert_eq!(schedule.last().unwrap().due_date, date(2029, 3, 1));
    assert_eq!(schedule.last().unwrap().remaining_principal, Decimal::ZERO);
    assert_eq!(schedule.total_principal(), dec!(25_000));

    // Fraud alert on the first disbursement
    let alert = FraudAlertGenerator::new().generate(
        subject.clone(),
        AlertType::Transaction,
        Some(AlertSeverity::High),
        &mut rng,
        now,
    );
    assert_eq!(alert.subject_id(), &subject);
    assert_eq!(alert.status(), AlertStatus::New);
    assert!((60.0..80.0).contains(&alert.risk_score().value()));
}

/// Fixture customers run through every engine without errors.
#[test]
fn fixture_portfolio_workflow() {
    let mut rng = StdRng::seed_from_u64(11);
    let config = FixtureConfig {
        customer_count: 50,
        ..Default::default()
    };
    let customers = generate_customers(&config, &mut rng).unwrap();
    let now = at("2025-01-15T00:00:00Z");

    let kyc = RiskAssessmentEngine::new(KycEscalation::Fail);
    let compliance = ComplianceCheckEngine::new();
    let policy = CreditDecisionPolicy::default();
    let mut kyc_scores = UnitFixtureSource::new(StdRng::seed_from_u64(12));
    let mut pep_scores = FixtureScoreSource::new(RiskCategory::Pep, StdRng::seed_from_u64(13));

    let mut approved = 0;
    for customer in &customers {
        let kyc_result = kyc.assess(customer.subject_id.clone(), &mut kyc_scores, &mut rng, now);
        assert!(kyc_result.is_consistent());
        assert_ne!(kyc_result.status(), RiskStatus::PendingReview);

        let pep = compliance.run(
            customer.subject_id.clone(),
            RiskCategory::Pep,
            &mut pep_scores,
            &mut rng,
            now,
        );
        assert!(pep.is_consistent());

        let decision = policy.decide(&customer.profile);
        assert_eq!(decision.approved, decision.limit.is_some());
        assert_eq!(decision.approved, decision.denial.is_none());
        if decision.approved {
            approved += 1;
        }

        let schedule = AmortizationScheduler::schedule(&customer.loan_terms, date(2025, 2, 1))
            .unwrap();
        assert_eq!(schedule.total_principal(), customer.loan_terms.principal());
    }
    assert!(approved > 0 && approved < customers.len());
}

// --- Boundary cases ---

#[test]
fn score_640_dti_43_income_24000_is_approved_basic() {
    let decision =
        CreditDecisionPolicy::default().decide(&CreditProfile::new(640, dec!(43), dec!(24_000)));
    assert!(decision.approved);
    assert_eq!(decision.tier, Some(LimitTierKind::Basic));
    assert_eq!(decision.limit, Some(dec!(4_800)));
}

#[test]
fn score_639_is_denied_for_score() {
    let decision =
        CreditDecisionPolicy::default().decide(&CreditProfile::new(639, dec!(10), dec!(500_000)));
    assert!(!decision.approved);
    assert_eq!(decision.denial, Some(DenialReason::CreditScoreBelowMinimum));
    assert_eq!(decision.limit, None);
}

#[test]
fn dti_just_over_maximum_is_denied() {
    let decision =
        CreditDecisionPolicy::default().decide(&CreditProfile::new(800, dec!(43.01), dec!(90_000)));
    assert_eq!(decision.denial, Some(DenialReason::DebtToIncomeAboveMaximum));
}

#[test]
fn compliance_thresholds_are_half_open() {
    let engine = ComplianceCheckEngine::new();
    let mut rng = StdRng::seed_from_u64(3);
    let status = |score: f64, rng: &mut StdRng| {
        engine
            .run_score(
                SubjectId::new("CUST-1"),
                RiskCategory::Fraud,
                PercentRiskScore::saturating(score),
                rng,
                Utc::now(),
            )
            .status()
    };
    assert_eq!(status(29.999, &mut rng), RiskStatus::Passed);
    assert_eq!(status(30.0, &mut rng), RiskStatus::PendingReview);
    assert_eq!(status(70.0, &mut rng), RiskStatus::Failed);
}

#[test]
fn kyc_high_severity_is_strictly_above_point_seven() {
    let engine = RiskAssessmentEngine::new(KycEscalation::Review);
    let mut rng = StdRng::seed_from_u64(4);
    let at_threshold = engine.assess_score(
        SubjectId::new("CUST-2"),
        UnitRiskScore::saturating(0.7),
        &mut rng,
        Utc::now(),
    );
    let above = engine.assess_score(
        SubjectId::new("CUST-2"),
        UnitRiskScore::saturating(0.71),
        &mut rng,
        Utc::now(),
    );
    assert_eq!(at_threshold.flags().max_severity(), Some(Severity::Medium));
    assert_eq!(above.flags().max_severity(), Some(Severity::High));
}

#[test]
fn zero_rate_loan_splits_evenly() {
    let terms = LoanTerms::new(dec!(1_200), Decimal::ZERO, 12).unwrap();
    let schedule = AmortizationScheduler::schedule(&terms, date(2025, 1, 15)).unwrap();
    assert_eq!(schedule.monthly_payment(), dec!(100));
    assert_eq!(schedule.total_interest(), Decimal::ZERO);
    assert!(schedule.entries().iter().all(|e| e.total_payment == dec!(100)));
}

#[test]
fn invalid_loan_terms_are_rejected() {
    assert!(matches!(
        LoanTerms::new(Decimal::ZERO, dec!(5), 12),
        Err(EngineError::InvalidLoanTerms { field: "principal", .. })
    ));
    assert!(matches!(
        LoanTerms::new(dec!(1_000), dec!(5), 0),
        Err(EngineError::InvalidLoanTerms { field: "term_months", .. })
    ));
    assert!(matches!(
        LoanTerms::new(dec!(1_000), dec!(-1), 12),
        Err(EngineError::InvalidLoanTerms { .. })
    ));
}

#[test]
fn unknown_check_type_is_an_error() {
    assert!(matches!(
        "credit".parse::<RiskCategory>(),
        Err(EngineError::UnknownCategory { kind: "check", .. })
    ));
    assert_eq!("SANCTIONS".parse::<RiskCategory>().unwrap(), RiskCategory::Sanctions);
}

// --- Wire shapes ---

#[test]
fn risk_result_wire_shape() {
    let mut rng = StdRng::seed_from_u64(5);
    let result = ComplianceCheckEngine::new().run_score(
        SubjectId::new("CUST-7"),
        RiskCategory::Watchlist,
        PercentRiskScore::saturating(55.0),
        &mut rng,
        at("2025-05-05T05:05:05Z"),
    );
    let json = serde_json::to_value(&result).unwrap();

    assert_eq!(json["subject_id"], "CUST-7");
    assert_eq!(json["check"], "watchlist");
    assert_eq!(json["status"], "pending-review");
    assert_eq!(json["risk_score"], 55.0);
    let flags = json["flags"].as_array().unwrap();
    assert!(!flags.is_empty());
    for flag in flags {
        assert!(flag["type"].is_string());
        assert_eq!(flag["severity"], "medium");
        assert!(flag["description"].is_string());
    }
}

#[test]
fn off_scale_score_is_rejected_on_read() {
    let mut rng = StdRng::seed_from_u64(9);
    let result = RiskAssessmentEngine::new(KycEscalation::Fail).assess_score(
        SubjectId::new("CUST-9"),
        UnitRiskScore::saturating(0.2),
        &mut rng,
        at("2025-05-05T05:05:05Z"),
    );
    let mut json = serde_json::to_value(&result).unwrap();
    let round_trip: Result<RiskResult<UnitRiskScore>, _> = serde_json::from_value(json.clone());
    assert_eq!(round_trip.unwrap(), result);

    json["risk_score"] = serde_json::json!(5.0);
    assert!(serde_json::from_value::<RiskResult<UnitRiskScore>>(json).is_err());
}

#[test]
fn denied_decision_omits_limit() {
    let decision =
        CreditDecisionPolicy::default().decide(&CreditProfile::new(700, dec!(20), dec!(12_000)));
    let json = serde_json::to_value(&decision).unwrap();
    assert_eq!(json["approved"], false);
    assert!(json.get("limit").is_none());
    assert!(json["reason"].as_str().unwrap().contains("income"));
}

#[test]
fn fraud_alert_wire_shape() {
    let mut rng = StdRng::seed_from_u64(6);
    let alert = FraudAlertGenerator::new().generate(
        SubjectId::new("CUST-8"),
        AlertType::AccountChange,
        Some(AlertSeverity::Critical),
        &mut rng,
        at("2025-06-01T00:00:00Z"),
    );
    let json = serde_json::to_value(&alert).unwrap();
    assert_eq!(json["alert_type"], "account-change");
    assert_eq!(json["severity"], "critical");
    assert_eq!(json["status"], "new");
    assert!(json.get("details").is_none());
    assert!(json["id"].as_str().unwrap().len() == 36);
}

#[test]
fn policy_config_loads_from_partial_json() {
    let config: CreditPolicyConfig =
        serde_json::from_str(r#"{ "min_credit_score": 700 }"#).unwrap();
    let policy = CreditDecisionPolicy::new(config);
    let decision = policy.decide(&CreditProfile::new(680, dec!(20), dec!(60_000)));
    assert_eq!(decision.denial, Some(DenialReason::CreditScoreBelowMinimum));
    assert_eq!(policy.config().max_dti_percent, dec!(43));
}
