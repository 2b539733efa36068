use crate::error::{EngineError, EngineResult};
use chrono::{Months, NaiveDate};
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};
use std::fmt;

const MINOR_UNIT_DP: u32 = 2;

/// Terms of a level-payment amortizing loan.
///
/// # Examples
///
/// ```
/// use decision_engine::lending::amortization::LoanTerms;
/// use rust_decimal_macros::dec;
///
/// let terms = LoanTerms::new(dec!(250_000), dec!(6.5), 360).unwrap();
/// assert_eq!(terms.term_months(), 360);
/// assert!(LoanTerms::new(dec!(0), dec!(6.5), 360).is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoanTerms {
    principal: Decimal,
    annual_rate_percent: Decimal,
    term_months: u32,
}

impl LoanTerms {
    pub fn new(
        principal: Decimal,
        annual_rate_percent: Decimal,
        term_months: u32,
    ) -> EngineResult<Self> {
        let terms = Self {
            principal,
            annual_rate_percent,
            term_months,
        };
        terms.validate()?;
        Ok(terms)
    }

    /// Reject degenerate terms. Nothing is ever clamped.
    pub fn validate(&self) -> EngineResult<()> {
        if self.principal <= Decimal::ZERO {
            return Err(EngineError::invalid_terms(
                "principal",
                format!("must be positive, got {}", self.principal),
            ));
        }
        if self.term_months == 0 {
            return Err(EngineError::invalid_terms(
                "term_months",
                "must be at least one month",
            ));
        }
        if self.annual_rate_percent < Decimal::ZERO {
            return Err(EngineError::invalid_terms(
                "annual_rate_percent",
                format!("must not be negative, got {}", self.annual_rate_percent),
            ));
        }
        Ok(())
    }

    pub fn principal(&self) -> Decimal {
        self.principal
    }

    pub fn annual_rate_percent(&self) -> Decimal {
        self.annual_rate_percent
    }

    pub fn term_months(&self) -> u32 {
        self.term_months
    }

    /// Periodic rate: annual percent / 100 / 12.
    pub fn monthly_rate(&self) -> Decimal {
        self.annual_rate_percent / Decimal::from(100) / Decimal::from(12)
    }
}

/// One period of a payment schedule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentScheduleEntry {
    pub payment_number: u32,
    pub due_date: NaiveDate,
    pub total_payment: Decimal,
    pub principal_payment: Decimal,
    pub interest_payment: Decimal,
    pub remaining_principal: Decimal,
}

/// Ordered payment schedule; one entry per month of the term.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaymentSchedule {
    terms: LoanTerms,
    /// Level payment before the final-period correction.
    monthly_payment: Decimal,
    entries: Vec<PaymentScheduleEntry>,
}

impl PaymentSchedule {
    pub fn terms(&self) -> &LoanTerms {
        &self.terms
    }

    pub fn monthly_payment(&self) -> Decimal {
        self.monthly_payment
    }

    pub fn entries(&self) -> &[PaymentScheduleEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn last(&self) -> Option<&PaymentScheduleEntry> {
        self.entries.last()
    }

    /// Sum of every payment made over the life of the loan.
    pub fn total_paid(&self) -> Decimal {
        self.entries.iter().map(|e| e.total_payment).sum()
    }

    /// Sum of every interest payment.
    pub fn total_interest(&self) -> Decimal {
        self.entries.iter().map(|e| e.interest_payment).sum()
    }

    /// Sum of every principal payment. Equals the original principal.
    pub fn total_principal(&self) -> Decimal {
        self.entries.iter().map(|e| e.principal_payment).sum()
    }
}

impl fmt::Display for PaymentSchedule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "=== Payment Schedule ===")?;
        writeln!(f, "Principal:        {}", self.terms.principal)?;
        writeln!(f, "Annual Rate:      {}%", self.terms.annual_rate_percent)?;
        writeln!(f, "Term:             {} months", self.terms.term_months)?;
        writeln!(f, "Monthly Payment:  {}", self.monthly_payment)?;
        writeln!(f, "Total Interest:   {}", self.total_interest())?;
        writeln!(f, "Total Paid:       {}", self.total_paid())?;
        writeln!(f)?;
        writeln!(
            f,
            "{:>4}  {:<10}  {:>12}  {:>12}  {:>12}  {:>14}",
            "#", "Due", "Payment", "Principal", "Interest", "Remaining"
        )?;
        for e in &self.entries {
            writeln!(
                f,
                "{:>4}  {:<10}  {:>12}  {:>12}  {:>12}  {:>14}",
                e.payment_number,
                e.due_date,
                e.total_payment,
                e.principal_payment,
                e.interest_payment,
                e.remaining_principal
            )?;
        }
        Ok(())
    }
}

/// Builds level-payment amortization schedules.
pub struct AmortizationScheduler;

impl AmortizationScheduler {
    /// Build the schedule for `terms`, with the first payment due on `first_due`
    /// and each later payment one calendar month after the previous one.
    ///
    /// # Algorithm
    ///
    /// 1. `r = rate / 100 / 12`, `M = P·r·(1+r)^n / ((1+r)^n − 1)` (or `P / n` when `r = 0`),
    ///    rounded to the minor unit.
    /// 2. Each period: `interest = remaining·r`, `principal = M − interest`
    ///    (never more than what is still owed).
    /// 3. The final period retires whatever remains, so the schedule closes at exactly zero.
    pub fn schedule(terms: &LoanTerms, first_due: NaiveDate) -> EngineResult<PaymentSchedule> {
        terms.validate()?;

        let n = terms.term_months;
        let r = terms.monthly_rate();

        // Reject out-of-range calendars before reserving one entry per period.
        if first_due.checked_add_months(Months::new(n - 1)).is_none() {
            return Err(EngineError::invalid_terms(
                "term_months",
                format!(
                    "{} payments from {} run past the supported date range",
                    n, first_due
                ),
            ));
        }

        let monthly_payment =
            to_minor_unit(level_payment(terms.principal, r, n).ok_or_else(out_of_range)?);

        let mut entries = Vec::with_capacity(n as usize);
        let mut remaining = terms.principal;
        let mut total_paid = Decimal::ZERO;

        for k in 1..=n {
            let due_date = first_due
                .checked_add_months(Months::new(k - 1))
                .ok_or_else(|| {
                    EngineError::invalid_terms(
                        "term_months",
                        format!("payment {} falls outside the supported date range", k),
                    )
                })?;

            let interest = to_minor_unit(remaining.checked_mul(r).ok_or_else(out_of_range)?);
            let principal_paid = if k == n {
                // Correction rule: absorb residue so the loan closes at exactly zero.
                remaining
            } else {
                (monthly_payment - interest).max(Decimal::ZERO).min(remaining)
            };
            remaining -= principal_paid;

            let total_payment = principal_paid
                .checked_add(interest)
                .ok_or_else(out_of_range)?;
            // Keeps the schedule's running totals representable.
            total_paid = total_paid
                .checked_add(total_payment)
                .ok_or_else(out_of_range)?;

            entries.push(PaymentScheduleEntry {
                payment_number: k,
                due_date,
                total_payment,
                principal_payment: principal_paid,
                interest_payment: interest,
                remaining_principal: remaining,
            });
        }

        log::debug!(
            "amortized {} over {} months at {}%: payment {}",
            terms.principal,
            n,
            terms.annual_rate_percent,
            monthly_payment
        );

        Ok(PaymentSchedule {
            terms: terms.clone(),
            monthly_payment,
            entries,
        })
    }
}

/// Annuity payment for principal `p`, periodic rate `r`, `n` periods.
/// `None` when the payment is beyond `Decimal` range.
fn level_payment(p: Decimal, r: Decimal, n: u32) -> Option<Decimal> {
    if r.is_zero() {
        return p.checked_div(Decimal::from(n));
    }
    let interest_only = p.checked_mul(r)?;
    match Decimal::ONE.checked_add(r).and_then(|base| pow_decimal(base, n)) {
        // P·r·g / (g − 1) written as P·r / (1 − 1/g) to keep intermediates small
        Some(growth) => interest_only.checked_div(Decimal::ONE - Decimal::ONE / growth),
        // (1+r)^n beyond Decimal range: the payment converges to pure interest
        None => Some(interest_only),
    }
}

fn out_of_range() -> EngineError {
    EngineError::invalid_terms(
        "principal",
        "scheduled amounts exceed the representable range at this rate",
    )
}

/// Integer power by squaring (avoids `powd` drift). `None` on overflow.
fn pow_decimal(base: Decimal, exp: u32) -> Option<Decimal> {
    let mut result = Decimal::ONE;
    let mut b = base;
    let mut e = exp;
    while e > 0 {
        if e & 1 == 1 {
            result = result.checked_mul(b)?;
        }
        e >>= 1;
        if e > 0 {
            b = b.checked_mul(b)?;
        }
    }
    Some(result)
}

fn to_minor_unit(amount: Decimal) -> Decimal {
    amount.round_dp_with_strategy(MINOR_UNIT_DP, RoundingStrategy::MidpointAwayFromZero)
}
