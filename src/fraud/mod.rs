pub mod alert;
pub mod generator;
