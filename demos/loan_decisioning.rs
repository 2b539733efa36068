//! End-to-end loan decisioning example.
//!
//! Screens a small seeded portfolio through KYC and sanctions checks,
//! decides credit, and prints a schedule for the first approved applicant.

use chrono::{NaiveDate, Utc};
use decision_engine::fraud::alert::AlertType;
use decision_engine::fraud::generator::FraudAlertGenerator;
use decision_engine::lending::amortization::AmortizationScheduler;
use decision_engine::lending::credit::CreditDecisionPolicy;
use decision_engine::risk::category::RiskCategory;
use decision_engine::risk::compliance::ComplianceCheckEngine;
use decision_engine::risk::kyc::{KycEscalation, RiskAssessmentEngine};
use decision_engine::simulation::fixtures::{
    generate_customers, FixtureConfig, FixtureScoreSource, UnitFixtureSource,
};
use rand::rngs::StdRng;
use rand::SeedableRng;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("╔══════════════════════════════════════════╗");
    println!("║  decision-engine: Loan Decisioning Demo  ║");
    println!("╚══════════════════════════════════════════╝\n");

    let mut rng = StdRng::seed_from_u64(2024);
    let now = Utc::now();
    let customers = generate_customers(
        &FixtureConfig {
            customer_count: 8,
            ..Default::default()
        },
        &mut rng,
    )?;

    let kyc = RiskAssessmentEngine::new(KycEscalation::Review);
    let compliance = ComplianceCheckEngine::new();
    let policy = CreditDecisionPolicy::default();
    let mut kyc_scores = UnitFixtureSource::new(StdRng::seed_from_u64(1));
    let mut sanctions_scores =
        FixtureScoreSource::new(RiskCategory::Sanctions, StdRng::seed_from_u64(2));

    // --- Screening and decisions ---
    println!("━━━ Screening ━━━\n");
    println!(
        "{:<10} {:<18} {:>6} {:<15} {:<15} {:>10}",
        "Id", "Name", "Score", "KYC", "Sanctions", "Limit"
    );

    let mut first_approved = None;
    for customer in &customers {
        let kyc_result = kyc.assess(customer.subject_id.clone(), &mut kyc_scores, &mut rng, now);
        let sanctions = compliance.run(
            customer.subject_id.clone(),
            RiskCategory::Sanctions,
            &mut sanctions_scores,
            &mut rng,
            now,
        );
        let decision = policy.decide(&customer.profile);

        let cleared = kyc_result.is_passed() && sanctions.is_passed();
        let limit = match decision.limit {
            Some(limit) => limit.to_string(),
            None => "-".to_string(),
        };
        println!(
            "{:<10} {:<18} {:>6} {:<15} {:<15} {:>10}",
            customer.subject_id,
            customer.name,
            customer.profile.credit_score,
            kyc_result.status(),
            sanctions.status(),
            limit
        );

        if cleared && decision.approved && first_approved.is_none() {
            first_approved = Some(customer);
        }
    }
    println!();

    // --- Schedule ---
    match first_approved {
        Some(customer) => {
            println!("━━━ Schedule for {} ━━━\n", customer.name);
            let first_due = NaiveDate::from_ymd_opt(2025, 1, 1).ok_or("invalid date")?;
            let schedule = AmortizationScheduler::schedule(&customer.loan_terms, first_due)?;
            println!("Monthly payment: {}", schedule.monthly_payment());
            println!("Total interest:  {}", schedule.total_interest());
            println!("Final payment:   {:?}", schedule.last().map(|e| e.total_payment));
            println!();

            // --- Fraud monitoring ---
            println!("━━━ Post-disbursement monitoring ━━━\n");
            let alert = FraudAlertGenerator::new().generate(
                customer.subject_id.clone(),
                AlertType::Transaction,
                None,
                &mut rng,
                now,
            );
            println!("{}", alert);
        }
        None => println!("No applicant cleared screening and credit."),
    }

    Ok(())
}
