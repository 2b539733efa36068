pub mod catalog;
pub mod category;
pub mod compliance;
pub mod flag;
pub mod kyc;
pub mod result;
pub mod source;
