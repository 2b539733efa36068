//! decision-engine CLI
//!
//! Run the lending and risk components from the command line.
//!
//! # Usage
//!
//! ```bash
//! # Amortization schedule
//! decision-engine amortize --principal 250000 --rate 6.5 --months 360
//!
//! # Credit decision with a custom policy file
//! decision-engine decide --score 700 --dti 38 --income 85000 --policy policy.json
//!
//! # Compliance check with a reproducible flag draw
//! decision-engine check --subject CUST-0001 --type sanctions --score 82 --seed 7 --format json
//! ```

use chrono::{NaiveDate, Utc};
use decision_engine::core::score::{PercentRiskScore, UnitRiskScore};
use decision_engine::core::subject::SubjectId;
use decision_engine::fraud::alert::{AlertSeverity, AlertType};
use decision_engine::fraud::generator::FraudAlertGenerator;
use decision_engine::lending::amortization::{AmortizationScheduler, LoanTerms};
use decision_engine::lending::credit::{CreditDecisionPolicy, CreditPolicyConfig, CreditProfile};
use decision_engine::risk::category::RiskCategory;
use decision_engine::risk::compliance::ComplianceCheckEngine;
use decision_engine::risk::kyc::{KycEscalation, RiskAssessmentEngine};
use decision_engine::simulation::fixtures::{generate_customers, FixtureConfig};
use rand::rngs::StdRng;
use rand::SeedableRng;
use rust_decimal::Decimal;
use serde::Serialize;
use std::collections::HashMap;
use std::fmt::Display;
use std::fs;
use std::process;
use std::str::FromStr;

fn print_usage() {
    eprintln!(
        r#"decision-engine — loan amortization, credit decisioning and risk scoring

USAGE:
    decision-engine <COMMAND> [OPTIONS]

COMMANDS:
    amortize    Build a level-payment amortization schedule
    decide      Run the credit decision policy
    kyc         Classify a KYC risk score (0–1)
    check       Run a compliance check on a 0–100 score
    alert       Raise a fraud alert
    generate    Generate demo customers (for testing)
    help        Show this message

OPTIONS (all commands):
    --format <FORMAT>     Output format: text (default) or json

OPTIONS (amortize):
    --principal <AMOUNT>  Loan principal
    --rate <PERCENT>      Annual interest rate, e.g. 6.5
    --months <N>          Term in months
    --first-due <DATE>    First due date, YYYY-MM-DD (default: today)

OPTIONS (decide):
    --score <N>           Credit score (300–850)
    --dti <PERCENT>       Debt-to-income ratio
    --income <AMOUNT>     Annual income
    --policy <FILE>       JSON policy overrides

OPTIONS (kyc, check, alert):
    --subject <ID>        Subject identifier
    --seed <N>            Seed for flag and alert draws (default: entropy)

OPTIONS (kyc):
    --score <X>           Risk score in [0, 1]
    --escalation <MODE>   fail or review (required)

OPTIONS (check):
    --type <TYPE>         kyc, aml, fraud, sanctions, pep, identity, address,
                          document, watchlist, transaction, behavior
    --score <X>           Risk score in [0, 100]

OPTIONS (alert):
    --type <TYPE>         transaction, login, device, account-change, identity
    --severity <SEV>      low, medium, high or critical (default: drawn)

OPTIONS (generate):
    --customers <N>       Number of customers (default: 10)
    --seed <N>            Seed (default: entropy)
    --output <FILE>       Write to file instead of stdout

EXAMPLES:
    decision-engine amortize --principal 20000 --rate 7.9 --months 60
    decision-engine decide --score 640 --dti 43 --income 24000
    decision-engine kyc --subject CUST-0001 --score 0.82 --escalation review
    decision-engine alert --subject CUST-0001 --type login --seed 42 --format json
    decision-engine generate --customers 25 --seed 1 --output customers.json"#
    );
}

fn fail(message: impl Display) -> ! {
    eprintln!("Error: {}", message);
    process::exit(1);
}

/// `--key value` pairs following a command.
struct Options {
    values: HashMap<String, String>,
}

impl Options {
    fn parse(args: &[String], allowed: &[&str]) -> Self {
        let mut values = HashMap::new();
        let mut i = 0;
        while i < args.len() {
            let key = args[i].as_str();
            let name = key
                .strip_prefix("--")
                .filter(|name| allowed.contains(name) || *name == "format")
                .unwrap_or_else(|| fail(format!("unknown option: {}", key)));
            i += 1;
            let value = args
                .get(i)
                .cloned()
                .unwrap_or_else(|| fail(format!("{} requires a value", key)));
            values.insert(name.to_string(), value);
            i += 1;
        }
        Self { values }
    }

    fn get(&self, name: &str) -> Option<&str> {
        self.values.get(name).map(String::as_str)
    }

    fn require(&self, name: &str) -> &str {
        self.get(name)
            .unwrap_or_else(|| fail(format!("--{} is required", name)))
    }

    fn parsed<T: FromStr>(&self, name: &str) -> Option<T>
    where
        T::Err: Display,
    {
        self.get(name).map(|raw| {
            raw.parse()
                .unwrap_or_else(|e| fail(format!("invalid --{} '{}': {}", name, raw, e)))
        })
    }

    fn required<T: FromStr>(&self, name: &str) -> T
    where
        T::Err: Display,
    {
        self.parsed(name)
            .unwrap_or_else(|| fail(format!("--{} is required", name)))
    }

    fn json(&self) -> bool {
        match self.get("format").unwrap_or("text") {
            "json" => true,
            "text" => false,
            other => fail(format!("--format must be 'text' or 'json', got '{}'", other)),
        }
    }

    fn rng(&self) -> StdRng {
        match self.parsed::<u64>("seed") {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        }
    }
}

fn emit<T: Serialize + Display>(value: &T, json: bool) {
    if json {
        match serde_json::to_string_pretty(value) {
            Ok(out) => println!("{}", out),
            Err(e) => fail(format!("could not serialize output: {}", e)),
        }
    } else {
        println!("{}", value);
    }
}

fn cmd_amortize(args: &[String]) {
    let opts = Options::parse(args, &["principal", "rate", "months", "first-due"]);
    let principal: Decimal = opts.required("principal");
    let rate: Decimal = opts.required("rate");
    let months: u32 = opts.required("months");
    let first_due = match opts.get("first-due") {
        Some(raw) => NaiveDate::parse_from_str(raw, "%Y-%m-%d")
            .unwrap_or_else(|e| fail(format!("invalid --first-due '{}': {}", raw, e))),
        None => Utc::now().date_naive(),
    };

    let schedule = LoanTerms::new(principal, rate, months)
        .and_then(|terms| AmortizationScheduler::schedule(&terms, first_due))
        .unwrap_or_else(|e| fail(e));

    log::info!(
        "schedule: {} payments of {}",
        schedule.len(),
        schedule.monthly_payment()
    );
    emit(&schedule, opts.json());
}

fn cmd_decide(args: &[String]) {
    let opts = Options::parse(args, &["score", "dti", "income", "policy"]);
    let profile = CreditProfile::new(
        opts.required("score"),
        opts.required("dti"),
        opts.required("income"),
    );

    let config = match opts.get("policy") {
        Some(path) => {
            let content = fs::read_to_string(path)
                .unwrap_or_else(|e| fail(format!("reading '{}': {}", path, e)));
            serde_json::from_str::<CreditPolicyConfig>(&content)
                .unwrap_or_else(|e| fail(format!("parsing policy '{}': {}", path, e)))
        }
        None => CreditPolicyConfig::default(),
    };

    let decision = CreditDecisionPolicy::new(config).decide(&profile);
    log::info!("credit decision: approved={}", decision.approved);
    emit(&decision, opts.json());
}

fn cmd_kyc(args: &[String]) {
    let opts = Options::parse(args, &["subject", "score", "escalation", "seed"]);
    let subject = SubjectId::new(opts.require("subject"));
    let raw: f64 = opts.required("score");
    let score = UnitRiskScore::new(raw)
        .unwrap_or_else(|| fail(format!("--score must be within [0, 1], got {}", raw)));
    let escalation = match opts.require("escalation") {
        "fail" => KycEscalation::Fail,
        "review" => KycEscalation::Review,
        other => fail(format!(
            "--escalation must be 'fail' or 'review', got '{}'",
            other
        )),
    };

    let mut rng = opts.rng();
    let result =
        RiskAssessmentEngine::new(escalation).assess_score(subject, score, &mut rng, Utc::now());
    log::info!("kyc result: {}", result.status());
    emit(&result, opts.json());
}

fn cmd_check(args: &[String]) {
    let opts = Options::parse(args, &["subject", "type", "score", "seed"]);
    let subject = SubjectId::new(opts.require("subject"));
    let check: RiskCategory = opts.required("type");
    let raw: f64 = opts.required("score");
    let score = PercentRiskScore::new(raw)
        .unwrap_or_else(|| fail(format!("--score must be within [0, 100], got {}", raw)));

    let mut rng = opts.rng();
    let result = ComplianceCheckEngine::new().run_score(subject, check, score, &mut rng, Utc::now());
    log::info!("{} check result: {}", check, result.status());
    emit(&result, opts.json());
}

fn cmd_alert(args: &[String]) {
    let opts = Options::parse(args, &["subject", "type", "severity", "seed"]);
    let subject = SubjectId::new(opts.require("subject"));
    let alert_type: AlertType = opts.required("type");
    let severity: Option<AlertSeverity> = opts.parsed("severity");

    let mut rng = opts.rng();
    let alert =
        FraudAlertGenerator::new().generate(subject, alert_type, severity, &mut rng, Utc::now());
    log::info!("raised {} alert {}", alert.severity(), alert.id());
    emit(&alert, opts.json());
}

fn cmd_generate(args: &[String]) {
    let opts = Options::parse(args, &["customers", "seed", "output"]);
    let config = FixtureConfig {
        customer_count: opts.parsed("customers").unwrap_or(10),
        ..Default::default()
    };

    let mut rng = opts.rng();
    let customers = generate_customers(&config, &mut rng).unwrap_or_else(|e| fail(e));
    let json = serde_json::to_string_pretty(&customers)
        .unwrap_or_else(|e| fail(format!("could not serialize customers: {}", e)));

    if let Some(path) = opts.get("output") {
        fs::write(path, &json).unwrap_or_else(|e| fail(format!("writing '{}': {}", path, e)));
        log::info!("generated {} customers -> {}", customers.len(), path);
        eprintln!("Generated {} customers → {}", customers.len(), path);
    } else {
        println!("{}", json);
    }
}

fn main() {
    env_logger::init();

    let args: Vec<String> = std::env::args().collect();

    if args.len() < 2 {
        print_usage();
        process::exit(1);
    }

    let command = args[1].as_str();
    let rest = &args[2..];

    match command {
        "amortize" => cmd_amortize(rest),
        "decide" => cmd_decide(rest),
        "kyc" => cmd_kyc(rest),
        "check" => cmd_check(rest),
        "alert" => cmd_alert(rest),
        "generate" => cmd_generate(rest),
        "help" | "--help" | "-h" => print_usage(),
        _ => {
            eprintln!("Unknown command: {}", command);
            print_usage();
            process::exit(1);
        }
    }
}
