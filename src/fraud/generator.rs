use crate::core::score::PercentRiskScore;
use crate::core::subject::SubjectId;
use crate::fraud::alert::{AlertDetails, AlertSeverity, AlertType, FraudAlert};
use chrono::{DateTime, Utc};
use rand::seq::SliceRandom;
use rand::Rng;
use rust_decimal::Decimal;
use uuid::Builder;

const TRANSACTION_TITLES: [&str; 4] = [
    "Unusual transaction amount",
    "Rapid succession of purchases",
    "Transaction from high-risk merchant",
    "Card used in unfamiliar country",
];
const TRANSACTION_DESCRIPTIONS: [&str; 4] = [
    "Transaction amount is significantly higher than the customer's typical spend.",
    "Multiple purchases were made within a short time window.",
    "Merchant category is associated with elevated fraud rates.",
    "Transaction originated from a country the customer has not visited before.",
];

const LOGIN_TITLES: [&str; 4] = [
    "Login from new location",
    "Multiple failed login attempts",
    "Impossible travel detected",
    "Login outside usual hours",
];
const LOGIN_DESCRIPTIONS: [&str; 4] = [
    "Successful login from a location not previously associated with this customer.",
    "Several consecutive failed password attempts preceded this session.",
    "Two logins occurred from locations too far apart for the elapsed time.",
    "Session started at a time well outside the customer's normal activity.",
];

const DEVICE_TITLES: [&str; 4] = [
    "Unrecognized device",
    "Emulator detected",
    "Device fingerprint mismatch",
    "Jailbroken device in use",
];
const DEVICE_DESCRIPTIONS: [&str; 4] = [
    "Account accessed from a device never seen before.",
    "Device characteristics indicate an emulated environment.",
    "Device fingerprint changed mid-session.",
    "Operating system integrity checks failed on the connecting device.",
];

const ACCOUNT_CHANGE_TITLES: [&str; 4] = [
    "Contact email changed",
    "Phone number updated",
    "Payout account modified",
    "Password reset requested",
];
const ACCOUNT_CHANGE_DESCRIPTIONS: [&str; 4] = [
    "The primary email address was changed shortly after login.",
    "The phone number used for verification codes was replaced.",
    "Bank details for outgoing payments were altered.",
    "A password reset was requested from an unverified channel.",
];

const IDENTITY_TITLES: [&str; 4] = [
    "Possible synthetic identity",
    "Document verification mismatch",
    "Shared identity attributes",
    "Identity linked to prior fraud",
];
const IDENTITY_DESCRIPTIONS: [&str; 4] = [
    "Identity attributes combine in a pattern typical of synthetic profiles.",
    "Details on the submitted document do not match the application.",
    "National ID number is shared with other customer records.",
    "Identity details match a previously confirmed fraud case.",
];

const MERCHANTS: [&str; 6] = [
    "Electronics Hub",
    "Global Travel Co",
    "Crypto Exchange Ltd",
    "Luxury Goods Online",
    "Gift Card Depot",
    "QuickCash Transfers",
];
const LOCATIONS: [&str; 6] = [
    "Lagos, NG",
    "Bucharest, RO",
    "Manila, PH",
    "Sao Paulo, BR",
    "Moscow, RU",
    "Kuala Lumpur, MY",
];
const CURRENCIES: [&str; 3] = ["USD", "EUR", "GBP"];
const LOGIN_DEVICES: [&str; 4] = [
    "Chrome on Windows",
    "Safari on iPhone",
    "Firefox on Linux",
    "Unknown browser",
];
const DEVICE_TYPES: [&str; 4] = ["Android phone", "iPhone", "Windows PC", "Emulator"];

/// Title and description catalogs for an alert type.
pub fn catalog(alert_type: AlertType) -> (&'static [&'static str; 4], &'static [&'static str; 4]) {
    match alert_type {
        AlertType::Transaction => (&TRANSACTION_TITLES, &TRANSACTION_DESCRIPTIONS),
        AlertType::Login => (&LOGIN_TITLES, &LOGIN_DESCRIPTIONS),
        AlertType::Device => (&DEVICE_TITLES, &DEVICE_DESCRIPTIONS),
        AlertType::AccountChange => (&ACCOUNT_CHANGE_TITLES, &ACCOUNT_CHANGE_DESCRIPTIONS),
        AlertType::Identity => (&IDENTITY_TITLES, &IDENTITY_DESCRIPTIONS),
    }
}

/// Raises severity-scored fraud alerts.
///
/// All randomness (severity, score within the severity band, catalog picks,
/// detail values, alert id) is drawn from the caller's RNG, so a seeded RNG
/// reproduces an alert exactly.
#[derive(Debug, Clone, Copy, Default)]
pub struct FraudAlertGenerator;

impl FraudAlertGenerator {
    pub fn new() -> Self {
        Self
    }

    pub fn generate<R: Rng + ?Sized>(
        &self,
        subject: SubjectId,
        alert_type: AlertType,
        severity: Option<AlertSeverity>,
        rng: &mut R,
        now: DateTime<Utc>,
    ) -> FraudAlert {
        let id = Builder::from_random_bytes(rng.gen()).into_uuid();
        let severity = severity.unwrap_or_else(|| AlertSeverity::from_roll(rng.gen::<f64>()));
        let risk_score = PercentRiskScore::saturating(rng.gen_range(severity.score_band()));

        let (titles, descriptions) = catalog(alert_type);
        let title = pick(titles, rng);
        let description = pick(descriptions, rng);
        let details = details_for(alert_type, rng);

        log::debug!(
            "fraud alert {} for {}: {} {} score {}",
            id,
            subject,
            severity,
            alert_type,
            risk_score
        );

        FraudAlert::new(
            id,
            subject,
            alert_type,
            severity,
            risk_score,
            title,
            description,
            now,
            details,
        )
    }
}

fn pick<R: Rng + ?Sized>(options: &[&'static str], rng: &mut R) -> &'static str {
    options.choose(rng).copied().unwrap_or_default()
}

fn random_ip<R: Rng + ?Sized>(rng: &mut R) -> String {
    format!(
        "{}.{}.{}.{}",
        rng.gen_range(1..=223u8),
        rng.gen::<u8>(),
        rng.gen::<u8>(),
        rng.gen_range(1..=254u8)
    )
}

fn details_for<R: Rng + ?Sized>(alert_type: AlertType, rng: &mut R) -> Option<AlertDetails> {
    match alert_type {
        AlertType::Transaction => Some(AlertDetails::Transaction {
            amount: Decimal::new(rng.gen_range(5_000..1_000_000), 2),
            currency: pick(&CURRENCIES, rng).to_string(),
            merchant: pick(&MERCHANTS, rng).to_string(),
            location: pick(&LOCATIONS, rng).to_string(),
        }),
        AlertType::Login => Some(AlertDetails::Login {
            ip_address: random_ip(rng),
            location: pick(&LOCATIONS, rng).to_string(),
            device: pick(&LOGIN_DEVICES, rng).to_string(),
        }),
        AlertType::Device => Some(AlertDetails::Device {
            device_id: format!("DEV-{:08X}", rng.gen::<u32>()),
            device_type: pick(&DEVICE_TYPES, rng).to_string(),
            ip_address: random_ip(rng),
        }),
        AlertType::AccountChange | AlertType::Identity => None,
    }
}
