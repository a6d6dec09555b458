mod exam;
mod session;
mod step;
mod view;

// Public API of the onboarding subsystem.
pub use exam::DiagnosticExam;
pub use session::{OnboardingSession, OnboardingSnapshot, Transition};
pub use step::{OnboardingStep, SessionMode};
pub use view::{DiagnosticOverview, DisciplineSummary, SubjectAreaOption};
