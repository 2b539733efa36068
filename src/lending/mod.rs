pub mod amortization;
pub mod credit;
