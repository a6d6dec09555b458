//! Shared error types for the services crate.

use thiserror::Error;

use manhaj_core::ConfigError;
use manhaj_core::model::{CatalogError, QuizError};

/// Errors emitted by `OnboardingContext`.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum SessionError {
    #[error("no onboarding session is active")]
    NoActiveSession,
    #[error(transparent)]
    Catalog(#[from] CatalogError),
    #[error(transparent)]
    Quiz(#[from] QuizError),
    #[error(transparent)]
    Config(#[from] ConfigError),
}
