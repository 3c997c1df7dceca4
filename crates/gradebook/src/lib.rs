pub mod academics;
pub mod config;
pub mod error;
pub mod telemetry;
