//! Diagnostic scoring: turns a quiz and the user's answers into a `DiagnosticResult`.

use crate::config::OnboardingConfig;
use crate::model::{AnswerSheet, Discipline, DiagnosticResult, Quiz, UnitResult, DEFAULT_SKIP_THRESHOLD};

/// Scores discipline quizzes against a skip threshold.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DiagnosticScorer {
    skip_threshold: f64,
}

impl Default for DiagnosticScorer {
    fn default() -> Self {
        Self::new(DEFAULT_SKIP_THRESHOLD)
    }
}

impl DiagnosticScorer {
    #[must_use]
    pub fn new(skip_threshold: f64) -> Self {
        Self { skip_threshold }
    }

    #[must_use]
    pub fn from_config(config: &OnboardingConfig) -> Self {
        Self::new(config.skip_threshold)
    }

    #[must_use]
    pub fn skip_threshold(&self) -> f64 {
        self.skip_threshold
    }

    /// Score every unit of `discipline` in catalog order.
    ///
    /// A question counts as correct only when the recorded answer equals its
    /// correct set exactly; unanswered questions are wrong. Units without
    /// questions score 0.
    #[must_use]
    pub fn score(&self, discipline: &Discipline, quiz: &Quiz, answers: &AnswerSheet) -> DiagnosticResult {
        let unit_results = discipline
            .units()
            .iter()
            .map(|unit| {
                let mut total = 0_u32;
                let mut correct = 0_u32;
                for question in quiz.questions_for_unit(unit.id()) {
                    total = total.saturating_add(1);
                    if answers.get(question.id()).is_some_and(|a| question.is_correct(a)) {
                        correct = correct.saturating_add(1);
                    }
                }
                UnitResult::from_counts(unit.id().clone(), correct, total, self.skip_threshold)
            })
            .collect();

        DiagnosticResult::new(discipline.id().clone(), unit_results)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{
        AnswerSet, DisciplineId, Question, QuestionId, QuestionKind, StudyUnit, UnitId,
    };

    fn discipline() -> Discipline {
        Discipline::new(
            DisciplineId::new("d"),
            "D",
            "",
            vec![
                StudyUnit::new(UnitId::new("u1"), "U1", "", 1, 2),
                StudyUnit::new(UnitId::new("u2"), "U2", "", 1, 2),
                StudyUnit::new(UnitId::new("u3"), "U3", "", 1, 0),
            ],
        )
    }

    fn question(id: &str, unit: &str, correct: &[usize]) -> Question {
        Question::new(
            QuestionId::new(id),
            UnitId::new(unit),
            id,
            QuestionKind::Multiple,
            vec!["a".into(), "b".into(), "c".into()],
            AnswerSet::from_indices(correct.iter().copied()),
            "",
        )
        .unwrap()
    }

    #[test]
    fn scores_each_unit_and_averages() {
        let discipline = discipline();
        let quiz = Quiz::new(
            &discipline,
            vec![
                question("q1", "u1", &[0, 2]),
                question("q2", "u1", &[1]),
                question("q3", "u2", &[0]),
                question("q4", "u2", &[2]),
            ],
        )
        .unwrap();

        let mut answers = AnswerSheet::new();
        answers.set(QuestionId::new("q1"), AnswerSet::from_indices([0, 2]));
        answers.set(QuestionId::new("q2"), AnswerSet::from_indices([1]));
        answers.set(QuestionId::new("q3"), AnswerSet::from_indices([0]));
        // q4 partially right: no credit.
        answers.set(QuestionId::new("q4"), AnswerSet::from_indices([0, 2]));

        let result = DiagnosticScorer::default().score(&discipline, &quiz, &answers);
        let u1 = result.unit(&UnitId::new("u1")).unwrap();
        let u2 = result.unit(&UnitId::new("u2")).unwrap();
        let u3 = result.unit(&UnitId::new("u3")).unwrap();

        assert_eq!(u1.score(), 100.0);
        assert!(u1.skip_eligible());
        assert_eq!(u2.correct_count(), 1);
        assert_eq!(u2.score(), 50.0);
        assert!(!u2.skip_eligible());
        assert_eq!(u3.total_questions(), 0);
        assert_eq!(u3.score(), 0.0);
        assert!((result.overall_score() - 50.0).abs() < f64::EPSILON);
    }

    #[test]
    fn unanswered_questions_are_wrong() {
        let discipline = discipline();
        let quiz = Quiz::new(&discipline, vec![question("q1", "u1", &[0])]).unwrap();
        let result = DiagnosticScorer::default().score(&discipline, &quiz, &AnswerSheet::new());
        assert_eq!(result.unit(&UnitId::new("u1")).unwrap().correct_count(), 0);
    }

    #[test]
    fn custom_threshold_changes_eligibility() {
        let discipline = discipline();
        let quiz = Quiz::new(
            &discipline,
            vec![question("q1", "u1", &[0]), question("q2", "u1", &[1])],
        )
        .unwrap();
        let mut answers = AnswerSheet::new();
        answers.set(QuestionId::new("q1"), AnswerSet::from_indices([0]));

        let result = DiagnosticScorer::new(50.0).score(&discipline, &quiz, &answers);
        assert!(result.unit(&UnitId::new("u1")).unwrap().skip_eligible());
    }
}
