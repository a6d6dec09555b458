use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, HashMap};
use thiserror::Error;

use crate::model::catalog::Discipline;
use crate::model::ids::{DisciplineId, QuestionId, UnitId};

//
// ─── ERRORS ────────────────────────────────────────────────────────────────────
//

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum QuizError {
    #[error("question {0} has no options")]
    NoOptions(QuestionId),

    #[error("question {id} marks option {index} correct but has {options} options")]
    CorrectIndexOutOfRange {
        id: QuestionId,
        index: usize,
        options: usize,
    },

    #[error("boolean question {0} must have exactly two options")]
    BooleanOptionCount(QuestionId),

    #[error("question {id} of kind {kind:?} must have exactly one correct answer")]
    SingleAnswerExpected { id: QuestionId, kind: QuestionKind },

    #[error("question {0} has no correct answer")]
    NoCorrectAnswer(QuestionId),

    #[error("question {question} belongs to unit {unit} outside discipline {discipline}")]
    ForeignUnit {
        question: QuestionId,
        unit: UnitId,
        discipline: DisciplineId,
    },
}

//
// ─── ANSWER SET ────────────────────────────────────────────────────────────────
//

/// Set of option indices chosen by the user (or marked correct on a question).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AnswerSet(BTreeSet<usize>);

impl AnswerSet {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn from_indices(indices: impl IntoIterator<Item = usize>) -> Self {
        Self(indices.into_iter().collect())
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn contains(&self, index: usize) -> bool {
        self.0.contains(&index)
    }

    pub fn iter(&self) -> impl Iterator<Item = usize> + '_ {
        self.0.iter().copied()
    }

    fn toggle(&mut self, index: usize) {
        if !self.0.remove(&index) {
            self.0.insert(index);
        }
    }

    fn replace_with(&mut self, index: usize) {
        self.0.clear();
        self.0.insert(index);
    }
}

//
// ─── QUESTION ──────────────────────────────────────────────────────────────────
//

/// How a question accepts answers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QuestionKind {
    /// True/false, exactly two options.
    Boolean,
    /// Exactly one option is correct.
    Single,
    /// One or more options are correct; choosing toggles.
    Multiple,
}

/// A diagnostic question about one study unit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Question {
    id: QuestionId,
    unit_id: UnitId,
    text: String,
    kind: QuestionKind,
    options: Vec<String>,
    correct: AnswerSet,
    explanation: String,
}

impl Question {
    /// Build a validated question.
    ///
    /// # Errors
    ///
    /// Returns `QuizError` if options or correct answers are inconsistent with `kind`.
    pub fn new(
        id: QuestionId,
        unit_id: UnitId,
        text: impl Into<String>,
        kind: QuestionKind,
        options: Vec<String>,
        correct: AnswerSet,
        explanation: impl Into<String>,
    ) -> Result<Self, QuizError> {
        if options.is_empty() {
            return Err(QuizError::NoOptions(id));
        }
        if kind == QuestionKind::Boolean && options.len() != 2 {
            return Err(QuizError::BooleanOptionCount(id));
        }
        if correct.is_empty() {
            return Err(QuizError::NoCorrectAnswer(id));
        }
        if kind != QuestionKind::Multiple && correct.len() != 1 {
            return Err(QuizError::SingleAnswerExpected { id, kind });
        }
        if let Some(index) = correct.iter().find(|&i| i >= options.len()) {
            return Err(QuizError::CorrectIndexOutOfRange {
                id,
                index,
                options: options.len(),
            });
        }

        Ok(Self {
            id,
            unit_id,
            text: text.into(),
            kind,
            options,
            correct,
            explanation: explanation.into(),
        })
    }

    #[must_use]
    pub fn id(&self) -> &QuestionId {
        &self.id
    }

    #[must_use]
    pub fn unit_id(&self) -> &UnitId {
        &self.unit_id
    }

    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    #[must_use]
    pub fn kind(&self) -> QuestionKind {
        self.kind
    }

    #[must_use]
    pub fn options(&self) -> &[String] {
        &self.options
    }

    #[must_use]
    pub fn correct(&self) -> &AnswerSet {
        &self.correct
    }

    #[must_use]
    pub fn explanation(&self) -> &str {
        &self.explanation
    }

    /// An answer is correct only when it selects exactly the correct options.
    /// There is no partial credit.
    #[must_use]
    pub fn is_correct(&self, answer: &AnswerSet) -> bool {
        *answer == self.correct
    }

    /// Apply a user's click on option `index` to `answer`.
    ///
    /// Multiple-answer questions toggle the option; single and boolean
    /// questions replace the selection. Out-of-range indices are ignored and
    /// return `false`.
    pub fn choose(&self, answer: &mut AnswerSet, index: usize) -> bool {
        if index >= self.options.len() {
            return false;
        }
        match self.kind {
            QuestionKind::Multiple => answer.toggle(index),
            QuestionKind::Single | QuestionKind::Boolean => answer.replace_with(index),
        }
        true
    }
}

//
// ─── QUIZ ──────────────────────────────────────────────────────────────────────
//

/// The question set for a single discipline.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Quiz {
    discipline_id: DisciplineId,
    questions: Vec<Question>,
}

impl Quiz {
    /// Build a quiz for `discipline`.
    ///
    /// # Errors
    ///
    /// Returns `QuizError::ForeignUnit` if a question targets a unit outside the discipline.
    pub fn new(discipline: &Discipline, questions: Vec<Question>) -> Result<Self, QuizError> {
        if let Some(q) = questions.iter().find(|q| !discipline.contains_unit(q.unit_id())) {
            return Err(QuizError::ForeignUnit {
                question: q.id().clone(),
                unit: q.unit_id().clone(),
                discipline: discipline.id().clone(),
            });
        }
        Ok(Self {
            discipline_id: discipline.id().clone(),
            questions,
        })
    }

    /// A quiz with no questions.
    #[must_use]
    pub fn empty(discipline_id: DisciplineId) -> Self {
        Self {
            discipline_id,
            questions: Vec::new(),
        }
    }

    #[must_use]
    pub fn discipline_id(&self) -> &DisciplineId {
        &self.discipline_id
    }

    #[must_use]
    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.questions.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }

    pub fn questions_for_unit<'a>(
        &'a self,
        unit_id: &'a UnitId,
    ) -> impl Iterator<Item = &'a Question> + 'a {
        self.questions.iter().filter(move |q| q.unit_id() == unit_id)
    }
}

/// The user's answers to a quiz, keyed by question.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AnswerSheet {
    answers: HashMap<QuestionId, AnswerSet>,
}

impl AnswerSheet {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the full answer for a question, replacing any previous one.
    pub fn set(&mut self, question_id: QuestionId, answer: AnswerSet) {
        self.answers.insert(question_id, answer);
    }

    #[must_use]
    pub fn get(&self, question_id: &QuestionId) -> Option<&AnswerSet> {
        self.answers.get(question_id)
    }

    /// Apply a click on option `index` of `question`.
    pub fn choose(&mut self, question: &Question, index: usize) -> bool {
        let answer = self.answers.entry(question.id().clone()).or_default();
        question.choose(answer, index)
    }

    #[must_use]
    pub fn is_answered(&self, question_id: &QuestionId) -> bool {
        self.get(question_id).is_some_and(|a| !a.is_empty())
    }

    pub fn clear(&mut self) {
        self.answers.clear();
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::catalog::StudyUnit;
    use proptest::prelude::*;

    fn options(n: usize) -> Vec<String> {
        (0..n).map(|i| format!("option {i}")).collect()
    }

    fn multiple() -> Question {
        Question::new(
            QuestionId::new("q"),
            UnitId::new("u1"),
            "pick two",
            QuestionKind::Multiple,
            options(4),
            AnswerSet::from_indices([0, 2]),
            "",
        )
        .unwrap()
    }

    #[test]
    fn exact_match_is_correct() {
        let q = multiple();
        assert!(q.is_correct(&AnswerSet::from_indices([2, 0])));
    }

    #[test]
    fn subset_gets_no_partial_credit() {
        let q = multiple();
        assert!(!q.is_correct(&AnswerSet::from_indices([0])));
        assert!(!q.is_correct(&AnswerSet::from_indices([0, 1, 2])));
        assert!(!q.is_correct(&AnswerSet::new()));
    }

    #[test]
    fn multiple_choice_toggles() {
        let q = multiple();
        let mut sheet = AnswerSheet::new();
        assert!(sheet.choose(&q, 0));
        assert!(sheet.choose(&q, 2));
        assert!(sheet.choose(&q, 0));
        assert_eq!(sheet.get(q.id()), Some(&AnswerSet::from_indices([2])));
    }

    #[test]
    fn single_choice_replaces() {
        let q = Question::new(
            QuestionId::new("s"),
            UnitId::new("u1"),
            "pick one",
            QuestionKind::Single,
            options(4),
            AnswerSet::from_indices([1]),
            "",
        )
        .unwrap();
        let mut sheet = AnswerSheet::new();
        sheet.choose(&q, 0);
        sheet.choose(&q, 1);
        assert_eq!(sheet.get(q.id()), Some(&AnswerSet::from_indices([1])));
        assert!(q.is_correct(sheet.get(q.id()).unwrap()));
    }

    #[test]
    fn out_of_range_choice_is_ignored() {
        let q = multiple();
        let mut sheet = AnswerSheet::new();
        assert!(!sheet.choose(&q, 9));
        assert!(!sheet.is_answered(q.id()));
    }

    #[test]
    fn boolean_requires_two_options() {
        let err = Question::new(
            QuestionId::new("b"),
            UnitId::new("u1"),
            "true?",
            QuestionKind::Boolean,
            options(3),
            AnswerSet::from_indices([0]),
            "",
        )
        .unwrap_err();
        assert!(matches!(err, QuizError::BooleanOptionCount(_)));
    }

    #[test]
    fn correct_index_must_be_in_range() {
        let err = Question::new(
            QuestionId::new("s"),
            UnitId::new("u1"),
            "pick",
            QuestionKind::Single,
            options(2),
            AnswerSet::from_indices([5]),
            "",
        )
        .unwrap_err();
        assert!(matches!(err, QuizError::CorrectIndexOutOfRange { index: 5, .. }));
    }

    #[test]
    fn quiz_rejects_foreign_units() {
        let discipline = Discipline::new(
            DisciplineId::new("d"),
            "D",
            "",
            vec![StudyUnit::new(UnitId::new("other"), "Other", "", 1, 1)],
        );
        let err = Quiz::new(&discipline, vec![multiple()]).unwrap_err();
        assert!(matches!(err, QuizError::ForeignUnit { .. }));
    }

    proptest! {
        #[test]
        fn correctness_is_set_equality(
            correct in proptest::collection::btree_set(0usize..6, 1..6),
            chosen in proptest::collection::btree_set(0usize..6, 0..6),
        ) {
            let q = Question::new(
                QuestionId::new("p"),
                UnitId::new("u1"),
                "prop",
                QuestionKind::Multiple,
                options(6),
                AnswerSet::from_indices(correct.iter().copied()),
                "",
            )
            .unwrap();
            let answer = AnswerSet::from_indices(chosen.iter().copied());
            prop_assert_eq!(q.is_correct(&answer), chosen == correct);
        }
    }
}
