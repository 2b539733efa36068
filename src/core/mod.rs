pub mod score;
pub mod subject;
