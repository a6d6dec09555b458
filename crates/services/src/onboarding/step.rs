use serde::Serialize;

/// Wizard steps, in order. The dashboard is a separate mode, not a step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum OnboardingStep {
    Welcome,
    SelectSubjectAreas,
    ClaimMastery,
    DiagnosticOverview,
    DiagnosticExam,
    DiagnosticResults,
}

impl OnboardingStep {
    pub const ALL: [OnboardingStep; 6] = [
        OnboardingStep::Welcome,
        OnboardingStep::SelectSubjectAreas,
        OnboardingStep::ClaimMastery,
        OnboardingStep::DiagnosticOverview,
        OnboardingStep::DiagnosticExam,
        OnboardingStep::DiagnosticResults,
    ];

    /// Position in the wizard, `0..=5`.
    #[must_use]
    pub fn index(self) -> usize {
        self as usize
    }

    #[must_use]
    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    /// The following step, or `None` past the last one.
    #[must_use]
    pub fn next(self) -> Option<Self> {
        Self::from_index(self.index() + 1)
    }

    #[must_use]
    pub fn previous(self) -> Option<Self> {
        self.index().checked_sub(1).and_then(Self::from_index)
    }

    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            OnboardingStep::Welcome => "Welcome",
            OnboardingStep::SelectSubjectAreas => "Choose subject areas",
            OnboardingStep::ClaimMastery => "Prior knowledge",
            OnboardingStep::DiagnosticOverview => "Overview",
            OnboardingStep::DiagnosticExam => "Diagnostic exam",
            OnboardingStep::DiagnosticResults => "Results",
        }
    }
}

/// Whether the learner is inside the wizard or looking at their plan.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionMode {
    Wizard,
    Dashboard,
}
