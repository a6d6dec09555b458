//! Read models for the selection, overview and results steps.

use serde::Serialize;

use manhaj_core::OnboardingConfig;
use manhaj_core::model::{DiagnosticResult, Discipline, DisciplineId, SubjectAreaId};

/// A subject area as offered on the selection step.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SubjectAreaOption {
    pub subject_area_id: SubjectAreaId,
    pub selected: bool,
    /// Already in the study plan; not selectable.
    pub covered: bool,
}

/// What the learner is about to be tested on.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DiagnosticOverview {
    pub disciplines: Vec<DisciplineId>,
    pub estimated_questions: u32,
    pub estimated_minutes: u32,
}

impl DiagnosticOverview {
    #[must_use]
    pub fn build(disciplines: &[Discipline], config: &OnboardingConfig) -> Self {
        let units: usize = disciplines.iter().map(|d| d.units().len()).sum();
        let units = u32::try_from(units).unwrap_or(u32::MAX);
        let estimated_questions = units.saturating_mul(config.estimated_questions_per_unit);
        let minutes = (f64::from(estimated_questions) * config.estimated_minutes_per_question).ceil();
        // Bounded by u32 question counts times a small factor.
        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        let estimated_minutes = minutes as u32;

        Self {
            disciplines: disciplines.iter().map(|d| d.id().clone()).collect(),
            estimated_questions,
            estimated_minutes,
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.disciplines.is_empty()
    }
}

/// Headline numbers for one discipline on the results step.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DisciplineSummary {
    pub discipline_id: DisciplineId,
    pub overall_score: f64,
    pub skip_eligible_units: usize,
    pub total_units: usize,
    pub meets_threshold: bool,
}

impl DisciplineSummary {
    #[must_use]
    pub fn from_result(result: &DiagnosticResult, skip_threshold: f64) -> Self {
        Self {
            discipline_id: result.discipline_id().clone(),
            overall_score: result.overall_score(),
            skip_eligible_units: result.skip_eligible_count(),
            total_units: result.unit_results().len(),
            meets_threshold: result.overall_score() >= skip_threshold,
        }
    }
}
