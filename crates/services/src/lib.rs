#![forbid(unsafe_code)]

pub mod context;
pub mod error;
pub mod manhaj;
pub mod onboarding;
pub mod questions;

pub use manhaj_core::Clock;

pub use context::OnboardingContext;
pub use error::SessionError;
pub use manhaj::{DashboardView, DisciplineGroup, ManhajGenerator, SubjectAreaSection};
pub use onboarding::{
    DiagnosticExam, DiagnosticOverview, DisciplineSummary, OnboardingSession, OnboardingSnapshot,
    OnboardingStep, SessionMode, SubjectAreaOption, Transition,
};
pub use questions::{FixedQuestionSource, QuestionSource, RandomQuestionGenerator};
