use std::fmt;
use std::sync::Arc;

use tracing::info;

use manhaj_core::model::Catalog;
use manhaj_core::{Clock, OnboardingConfig};

use crate::error::SessionError;
use crate::onboarding::OnboardingSession;
use crate::questions::QuestionSource;

/// Composition root for onboarding: owns the catalog and settings and hands
/// out at most one live session.
pub struct OnboardingContext {
    catalog: Arc<Catalog>,
    config: OnboardingConfig,
    clock: Clock,
    session: Option<OnboardingSession>,
}

impl OnboardingContext {
    /// # Errors
    ///
    /// Returns `SessionError::Config` if `config` fails validation.
    pub fn new(catalog: Catalog, config: OnboardingConfig, clock: Clock) -> Result<Self, SessionError> {
        let config = config.validate()?;
        Ok(Self {
            catalog: Arc::new(catalog),
            config,
            clock,
            session: None,
        })
    }

    /// Build a context from a JSON catalog document.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::Catalog` for malformed or inconsistent catalogs
    /// and `SessionError::Config` for invalid settings.
    pub fn from_catalog_json(
        json: &str,
        config: OnboardingConfig,
        clock: Clock,
    ) -> Result<Self, SessionError> {
        let catalog = Catalog::from_json(json)?;
        Self::new(catalog, config, clock)
    }

    #[must_use]
    pub fn catalog(&self) -> Arc<Catalog> {
        Arc::clone(&self.catalog)
    }

    #[must_use]
    pub fn config(&self) -> &OnboardingConfig {
        &self.config
    }

    #[must_use]
    pub fn has_session(&self) -> bool {
        self.session.is_some()
    }

    /// Start a fresh session, replacing any running one.
    pub fn start_session(&mut self, questions: Box<dyn QuestionSource>) -> &mut OnboardingSession {
        if self.session.is_some() {
            info!("replacing active onboarding session");
        }
        self.session.insert(OnboardingSession::new(
            Arc::clone(&self.catalog),
            self.config.clone(),
            self.clock,
            questions,
        ))
    }

    /// # Errors
    ///
    /// Returns `SessionError::NoActiveSession` before `start_session`.
    pub fn session(&self) -> Result<&OnboardingSession, SessionError> {
        self.session.as_ref().ok_or(SessionError::NoActiveSession)
    }

    /// # Errors
    ///
    /// Returns `SessionError::NoActiveSession` before `start_session`.
    pub fn session_mut(&mut self) -> Result<&mut OnboardingSession, SessionError> {
        self.session.as_mut().ok_or(SessionError::NoActiveSession)
    }

    pub fn end_session(&mut self) -> Option<OnboardingSession> {
        self.session.take()
    }
}

impl fmt::Debug for OnboardingContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OnboardingContext")
            .field("subject_areas_len", &self.catalog.subject_areas().len())
            .field("config", &self.config)
            .field("session", &self.session)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::questions::FixedQuestionSource;
    use manhaj_core::time::fixed_clock;

    fn context() -> OnboardingContext {
        OnboardingContext::new(Catalog::builtin(), OnboardingConfig::default(), fixed_clock())
            .unwrap()
    }

    #[test]
    fn session_is_missing_until_started() {
        let mut ctx = context();
        assert!(matches!(ctx.session(), Err(SessionError::NoActiveSession)));
        assert!(matches!(ctx.session_mut(), Err(SessionError::NoActiveSession)));

        ctx.start_session(Box::new(FixedQuestionSource::new()));
        assert!(ctx.has_session());
        assert!(ctx.session().unwrap().study_plan().is_empty());
    }

    #[test]
    fn end_session_hands_back_state() {
        let mut ctx = context();
        ctx.start_session(Box::new(FixedQuestionSource::new())).advance();
        let ended = ctx.end_session().unwrap();
        assert_eq!(ended.step().index(), 1);
        assert!(!ctx.has_session());
    }

    #[test]
    fn invalid_config_is_rejected() {
        let config = OnboardingConfig {
            skip_threshold: 120.0,
            ..OnboardingConfig::default()
        };
        let err = OnboardingContext::new(Catalog::builtin(), config, fixed_clock()).unwrap_err();
        assert!(matches!(err, SessionError::Config(_)));
    }

    #[test]
    fn malformed_catalog_json_is_rejected() {
        let err = OnboardingContext::from_catalog_json("{", OnboardingConfig::default(), fixed_clock())
            .unwrap_err();
        assert!(matches!(err, SessionError::Catalog(_)));
    }
}
