pub mod config;
pub mod errors;
pub mod refdata;
pub mod telemetry;
