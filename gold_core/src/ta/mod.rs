pub mod indicators;
pub mod types;
