use std::collections::BTreeSet;
use std::fmt;
use std::sync::Arc;

use serde::Serialize;
use tracing::{debug, info};

use manhaj_core::model::{
    Catalog, DiagnosticResult, Discipline, DisciplineId, PlanStatus, StudyPlan, SubjectAreaId,
    UnitId,
};
use manhaj_core::{Clock, DiagnosticScorer, OnboardingConfig};

use super::exam::{DiagnosticExam, ExamAdvance};
use super::step::{OnboardingStep, SessionMode};
use super::view::{DiagnosticOverview, DisciplineSummary, SubjectAreaOption};
use crate::manhaj::{DashboardView, ManhajGenerator};
use crate::questions::QuestionSource;

//
// ─── OUTCOMES ──────────────────────────────────────────────────────────────────
//

/// Result of a navigation or exam action.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    /// The session is now on this wizard step.
    Moved(OnboardingStep),
    /// The plan was (re)generated and the session switched to the dashboard.
    PlanGenerated { added: usize },
    /// Within the exam: moved to the next question.
    NextQuestion,
    PreviousQuestion,
    /// Within the exam: the current discipline was scored and the next one started.
    NextDiscipline,
    /// Nothing applied (stale action, missing answer, dashboard mode).
    Unchanged,
}

/// Immutable view of the session handed to the presentation layer.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OnboardingSnapshot {
    pub step: OnboardingStep,
    pub step_index: usize,
    pub mode: SessionMode,
    pub selected_subject_areas: Vec<SubjectAreaId>,
    pub claimed_mastered_disciplines: Vec<DisciplineId>,
    pub diagnostic_results: Vec<DiagnosticResult>,
    pub study_plan: StudyPlan,
    pub onboarding_complete: bool,
}

//
// ─── SESSION ───────────────────────────────────────────────────────────────────
//

/// In-memory onboarding session for a single learner.
///
/// Owns the wizard position, selections, diagnostic results and the study
/// plan. Every method is synchronous; stale ids are ignored rather than
/// reported.
pub struct OnboardingSession {
    catalog: Arc<Catalog>,
    config: OnboardingConfig,
    clock: Clock,
    scorer: DiagnosticScorer,
    questions: Box<dyn QuestionSource>,

    step: OnboardingStep,
    mode: SessionMode,
    selected_subject_areas: BTreeSet<SubjectAreaId>,
    claimed_mastered: BTreeSet<DisciplineId>,
    diagnostic_results: Vec<DiagnosticResult>,
    exam: Option<DiagnosticExam>,

    study_plan: StudyPlan,
    onboarding_complete: bool,
}

impl OnboardingSession {
    #[must_use]
    pub fn new(
        catalog: Arc<Catalog>,
        config: OnboardingConfig,
        clock: Clock,
        questions: Box<dyn QuestionSource>,
    ) -> Self {
        let scorer = DiagnosticScorer::from_config(&config);
        Self {
            catalog,
            config,
            clock,
            scorer,
            questions,
            step: OnboardingStep::Welcome,
            mode: SessionMode::Wizard,
            selected_subject_areas: BTreeSet::new(),
            claimed_mastered: BTreeSet::new(),
            diagnostic_results: Vec::new(),
            exam: None,
            study_plan: StudyPlan::new(),
            onboarding_complete: false,
        }
    }

    // ─── Accessors ────────────────────────────────────────────────────────────

    #[must_use]
    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    #[must_use]
    pub fn config(&self) -> &OnboardingConfig {
        &self.config
    }

    #[must_use]
    pub fn step(&self) -> OnboardingStep {
        self.step
    }

    #[must_use]
    pub fn mode(&self) -> SessionMode {
        self.mode
    }

    #[must_use]
    pub fn selected_subject_areas(&self) -> &BTreeSet<SubjectAreaId> {
        &self.selected_subject_areas
    }

    #[must_use]
    pub fn claimed_mastered_disciplines(&self) -> &BTreeSet<DisciplineId> {
        &self.claimed_mastered
    }

    #[must_use]
    pub fn diagnostic_results(&self) -> &[DiagnosticResult] {
        &self.diagnostic_results
    }

    #[must_use]
    pub fn diagnostic_result(&self, discipline_id: &DisciplineId) -> Option<&DiagnosticResult> {
        self.diagnostic_results
            .iter()
            .find(|r| r.discipline_id() == discipline_id)
    }

    #[must_use]
    pub fn exam(&self) -> Option<&DiagnosticExam> {
        self.exam.as_ref()
    }

    #[must_use]
    pub fn study_plan(&self) -> &StudyPlan {
        &self.study_plan
    }

    #[must_use]
    pub fn onboarding_complete(&self) -> bool {
        self.onboarding_complete
    }

    #[must_use]
    pub fn snapshot(&self) -> OnboardingSnapshot {
        OnboardingSnapshot {
            step: self.step,
            step_index: self.step.index(),
            mode: self.mode,
            selected_subject_areas: self.selected_subject_areas.iter().cloned().collect(),
            claimed_mastered_disciplines: self.claimed_mastered.iter().cloned().collect(),
            diagnostic_results: self.diagnostic_results.clone(),
            study_plan: self.study_plan.clone(),
            onboarding_complete: self.onboarding_complete,
        }
    }

    // ─── Navigation ───────────────────────────────────────────────────────────

    /// Move forward one step.
    ///
    /// From the overview, an empty set of disciplines to test skips straight
    /// to plan generation; otherwise the exam starts. From the results step
    /// the plan is generated and the session switches to the dashboard.
    pub fn advance(&mut self) -> Transition {
        if self.mode == SessionMode::Dashboard {
            return Transition::Unchanged;
        }
        match self.step {
            OnboardingStep::DiagnosticOverview => {
                let disciplines = self.disciplines_to_test();
                if disciplines.is_empty() {
                    info!("no claimed disciplines to test; building plan directly");
                    let added = self.generate_plan();
                    return Transition::PlanGenerated { added };
                }
                self.exam = DiagnosticExam::start(disciplines, self.questions.as_mut());
                self.move_to(OnboardingStep::DiagnosticExam)
            }
            OnboardingStep::DiagnosticExam => {
                self.exam = None;
                self.move_to(OnboardingStep::DiagnosticResults)
            }
            OnboardingStep::DiagnosticResults => {
                let added = self.generate_plan();
                Transition::PlanGenerated { added }
            }
            step => match step.next() {
                Some(next) => self.move_to(next),
                None => Transition::Unchanged,
            },
        }
    }

    /// Move back one step. Collected selections and recorded results are kept;
    /// an unfinished exam is discarded.
    pub fn retreat(&mut self) -> Transition {
        if self.mode == SessionMode::Dashboard {
            return Transition::Unchanged;
        }
        let Some(previous) = self.step.previous() else {
            return Transition::Unchanged;
        };
        match previous {
            // Going back from the results retakes the exam from the start.
            OnboardingStep::DiagnosticExam => {
                self.exam = DiagnosticExam::start(self.disciplines_to_test(), self.questions.as_mut());
                if self.exam.is_none() {
                    return self.move_to(OnboardingStep::DiagnosticOverview);
                }
            }
            _ => self.exam = None,
        }
        self.move_to(previous)
    }

    fn move_to(&mut self, step: OnboardingStep) -> Transition {
        debug!(from = self.step.label(), to = step.label(), "onboarding step");
        self.step = step;
        Transition::Moved(step)
    }

    // ─── Selections ───────────────────────────────────────────────────────────

    /// Replace the selected subject areas.
    ///
    /// Unknown ids and areas already covered by the plan are dropped. Returns
    /// the number of areas kept.
    pub fn select_subject_areas(&mut self, ids: impl IntoIterator<Item = SubjectAreaId>) -> usize {
        let mut selected = BTreeSet::new();
        for id in ids {
            if !self.catalog.contains_subject_area(&id) {
                debug!(subject_area = %id, "ignoring unknown subject area");
            } else if self.study_plan.covers_subject_area(&id) {
                debug!(subject_area = %id, "ignoring subject area already in plan");
            } else {
                selected.insert(id);
            }
        }
        self.selected_subject_areas = selected;
        self.selected_subject_areas.len()
    }

    /// Replace the set of disciplines the learner claims to know. May be empty.
    pub fn claim_mastered_disciplines(&mut self, ids: impl IntoIterator<Item = DisciplineId>) -> usize {
        let catalog = Arc::clone(&self.catalog);
        self.claimed_mastered = ids
            .into_iter()
            .filter(|id| {
                let known = catalog.contains_discipline(id);
                if !known {
                    debug!(discipline = %id, "ignoring unknown discipline");
                }
                known
            })
            .collect();
        self.claimed_mastered.len()
    }

    /// Every catalog subject area, flagged when an existing plan already covers it.
    #[must_use]
    pub fn subject_area_options(&self) -> Vec<SubjectAreaOption> {
        self.catalog
            .subject_areas()
            .iter()
            .map(|area| SubjectAreaOption {
                subject_area_id: area.id().clone(),
                selected: self.selected_subject_areas.contains(area.id()),
                covered: self.study_plan.covers_subject_area(area.id()),
            })
            .collect()
    }

    /// Claimed disciplines under the selected subject areas, in catalog order.
    #[must_use]
    pub fn disciplines_to_test(&self) -> Vec<Discipline> {
        self.catalog
            .subject_areas()
            .iter()
            .filter(|area| self.selected_subject_areas.contains(area.id()))
            .flat_map(|area| area.disciplines())
            .filter(|d| self.claimed_mastered.contains(d.id()))
            .cloned()
            .collect()
    }

    #[must_use]
    pub fn overview(&self) -> DiagnosticOverview {
        DiagnosticOverview::build(&self.disciplines_to_test(), &self.config)
    }

    // ─── Diagnostics ──────────────────────────────────────────────────────────

    /// Store a discipline's result, replacing any earlier one for the same discipline.
    /// Ignored once the plan has been generated.
    pub fn record_diagnostic_result(&mut self, result: DiagnosticResult) -> bool {
        if self.mode == SessionMode::Dashboard {
            debug!(discipline = %result.discipline_id(), "results are frozen on the dashboard");
            return false;
        }
        if !self.catalog.contains_discipline(result.discipline_id()) {
            debug!(discipline = %result.discipline_id(), "ignoring result for unknown discipline");
            return false;
        }
        info!(
            discipline = %result.discipline_id(),
            overall_score = result.overall_score(),
            skip_eligible = result.skip_eligible_count(),
            "diagnostic result recorded"
        );
        self.diagnostic_results
            .retain(|r| r.discipline_id() != result.discipline_id());
        self.diagnostic_results.push(result);
        true
    }

    /// Change whether the learner wants to skip one unit. No-op for unknown
    /// pairs and once the plan has been generated.
    pub fn set_skip_decision(
        &mut self,
        discipline_id: &DisciplineId,
        unit_id: &UnitId,
        wants_to_skip: bool,
    ) -> bool {
        if self.mode == SessionMode::Dashboard {
            debug!(discipline = %discipline_id, unit = %unit_id, "results are frozen on the dashboard");
            return false;
        }
        let updated = self
            .diagnostic_results
            .iter_mut()
            .find(|r| r.discipline_id() == discipline_id)
            .is_some_and(|r| r.set_skip_decision(unit_id, wants_to_skip));
        if !updated {
            debug!(discipline = %discipline_id, unit = %unit_id, "ignoring skip decision");
        }
        updated
    }

    #[must_use]
    pub fn results_summary(&self) -> Vec<DisciplineSummary> {
        self.diagnostic_results
            .iter()
            .map(|r| DisciplineSummary::from_result(r, self.scorer.skip_threshold()))
            .collect()
    }

    /// Select option `index` on the current exam question. Ignored outside the exam.
    pub fn choose_option(&mut self, index: usize) -> bool {
        match self.exam.as_mut() {
            Some(exam) if self.step == OnboardingStep::DiagnosticExam => exam.choose_option(index),
            _ => false,
        }
    }

    /// Confirm the current answer and move on through the exam.
    ///
    /// Results are recorded only once the last discipline is scored, and the
    /// session then moves to the results step. An abandoned exam records nothing.
    pub fn next_question(&mut self) -> Transition {
        if self.step != OnboardingStep::DiagnosticExam {
            return Transition::Unchanged;
        }
        let Some(exam) = self.exam.as_mut() else {
            return Transition::Unchanged;
        };
        match exam.advance(&self.scorer, self.questions.as_mut()) {
            ExamAdvance::Ignored => Transition::Unchanged,
            ExamAdvance::NextQuestion => Transition::NextQuestion,
            ExamAdvance::NextDiscipline => Transition::NextDiscipline,
            ExamAdvance::Finished(results) => {
                self.exam = None;
                for result in results {
                    self.record_diagnostic_result(result);
                }
                self.move_to(OnboardingStep::DiagnosticResults)
            }
        }
    }

    /// Go back one question; on a discipline's first question, leave the exam.
    pub fn previous_question(&mut self) -> Transition {
        if self.step != OnboardingStep::DiagnosticExam {
            return Transition::Unchanged;
        }
        let stepped_back = self.exam.as_mut().is_some_and(DiagnosticExam::previous);
        if stepped_back {
            Transition::PreviousQuestion
        } else {
            self.retreat()
        }
    }

    // ─── Plan ─────────────────────────────────────────────────────────────────

    /// Generate plan entries for the selected subject areas and switch to the dashboard.
    ///
    /// Areas already in the plan are not regenerated, so calling this again
    /// never duplicates or drops entries. Returns the number of entries added.
    pub fn generate_plan(&mut self) -> usize {
        let entries = ManhajGenerator::new(&self.catalog, self.clock.now()).generate(
            &self.selected_subject_areas,
            &self.diagnostic_results,
            &self.study_plan,
        );
        let added = self.study_plan.append(entries);
        self.exam = None;
        self.mode = SessionMode::Dashboard;
        self.onboarding_complete = true;

        info!(
            added,
            total = self.study_plan.len(),
            "study plan generated"
        );
        added
    }

    /// Clear the wizard state while keeping the plan and completion flag.
    pub fn reset_for_new_plan(&mut self) {
        self.step = OnboardingStep::Welcome;
        self.mode = SessionMode::Wizard;
        self.selected_subject_areas.clear();
        self.claimed_mastered.clear();
        self.diagnostic_results.clear();
        self.exam = None;
        debug!(plan_entries = self.study_plan.len(), "wizard reset for a new plan");
    }

    /// Reset and jump to subject area selection to extend an existing plan.
    pub fn begin_additional_plan(&mut self) -> Transition {
        self.reset_for_new_plan();
        self.move_to(OnboardingStep::SelectSubjectAreas)
    }

    /// Return to the dashboard without changes. Only possible once a plan exists.
    pub fn show_dashboard(&mut self) -> bool {
        if !self.onboarding_complete {
            return false;
        }
        self.mode = SessionMode::Dashboard;
        true
    }

    // ─── Dashboard ────────────────────────────────────────────────────────────

    pub fn start_studying(&mut self, unit_id: &UnitId) -> bool {
        let changed = self.study_plan.start_studying(unit_id);
        self.log_status_change(unit_id, changed, PlanStatus::InProgress);
        changed
    }

    pub fn complete_unit(&mut self, unit_id: &UnitId) -> bool {
        let changed = self.study_plan.complete_unit(unit_id);
        self.log_status_change(unit_id, changed, PlanStatus::Completed);
        changed
    }

    /// Only skipped units move back to in-progress.
    pub fn resume_skipped(&mut self, unit_id: &UnitId) -> bool {
        let changed = self.study_plan.resume_skipped(unit_id);
        self.log_status_change(unit_id, changed, PlanStatus::InProgress);
        changed
    }

    #[must_use]
    pub fn dashboard(&self) -> DashboardView {
        DashboardView::build(&self.catalog, &self.study_plan)
    }

    fn log_status_change(&self, unit_id: &UnitId, changed: bool, status: PlanStatus) {
        if changed {
            info!(unit = %unit_id, %status, "plan entry updated");
        } else {
            debug!(unit = %unit_id, %status, "plan entry unchanged");
        }
    }
}

impl fmt::Debug for OnboardingSession {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OnboardingSession")
            .field("step", &self.step)
            .field("mode", &self.mode)
            .field("selected_subject_areas", &self.selected_subject_areas)
            .field("claimed_mastered", &self.claimed_mastered)
            .field("diagnostic_results_len", &self.diagnostic_results.len())
            .field("exam", &self.exam)
            .field("plan_len", &self.study_plan.len())
            .field("onboarding_complete", &self.onboarding_complete)
            .finish_non_exhaustive()
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//
