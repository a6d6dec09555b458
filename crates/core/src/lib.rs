#![forbid(unsafe_code)]

pub mod config;
pub mod model;
pub mod scoring;
pub mod time;

pub use config::{ConfigError, OnboardingConfig};
pub use scoring::DiagnosticScorer;
pub use time::Clock;
