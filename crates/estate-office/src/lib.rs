pub mod config;
pub mod error;
pub mod office;
pub mod telemetry;
