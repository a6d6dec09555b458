//! Question generation for diagnostic quizzes.
//!
//! Real question banks are out of scope; `RandomQuestionGenerator` produces
//! placeholder questions and `FixedQuestionSource` serves prepared fixtures.

use rand::Rng;
use std::collections::HashMap;
use tracing::debug;

use manhaj_core::OnboardingConfig;
use manhaj_core::model::{
    AnswerSet, Discipline, DisciplineId, Question, QuestionId, QuestionKind, Quiz, QuizError,
    StudyUnit,
};

/// Produces the quiz for a discipline when the exam reaches it.
pub trait QuestionSource: Send {
    fn quiz_for(&mut self, discipline: &Discipline) -> Quiz;
}

//
// ─── RANDOM STUB ───────────────────────────────────────────────────────────────
//

/// Placeholder generator: a random number of templated questions per unit.
///
/// Question kinds cycle boolean, single, multiple. Boolean questions have the
/// first option correct, single questions the second, multiple questions the
/// first and third.
#[derive(Debug, Clone)]
pub struct RandomQuestionGenerator {
    min_per_unit: u32,
    max_per_unit: u32,
}

impl Default for RandomQuestionGenerator {
    fn default() -> Self {
        Self::from_config(&OnboardingConfig::default())
    }
}

impl RandomQuestionGenerator {
    #[must_use]
    pub fn from_config(config: &OnboardingConfig) -> Self {
        Self {
            min_per_unit: config.min_questions_per_unit,
            max_per_unit: config.max_questions_per_unit.max(config.min_questions_per_unit),
        }
    }

    fn unit_questions(unit: &StudyUnit, count: u32) -> Vec<Question> {
        (0..count)
            .filter_map(|i| match template_question(unit, i) {
                Ok(q) => Some(q),
                Err(err) => {
                    debug!(unit = %unit.id(), error = %err, "skipping invalid template question");
                    None
                }
            })
            .collect()
    }
}

const BOOLEAN_OPTIONS: [&str; 2] = ["True", "False"];
const CHOICE_OPTIONS: [&str; 4] = ["First option", "Second option", "Third option", "Fourth option"];

fn template_question(unit: &StudyUnit, i: u32) -> Result<Question, QuizError> {
    let (kind, options, correct) = match i % 3 {
        0 => (QuestionKind::Boolean, BOOLEAN_OPTIONS.to_vec(), vec![0]),
        1 => (QuestionKind::Single, CHOICE_OPTIONS.to_vec(), vec![1]),
        _ => (QuestionKind::Multiple, CHOICE_OPTIONS.to_vec(), vec![0, 2]),
    };
    Question::new(
        QuestionId::new(format!("{}-q{i}", unit.id())),
        unit.id().clone(),
        format!("Question {} on {}: which ruling is correct?", i + 1, unit.name()),
        kind,
        options.into_iter().map(str::to_owned).collect(),
        AnswerSet::from_indices(correct),
        "The evidence from the texts supports this answer.",
    )
}

impl QuestionSource for RandomQuestionGenerator {
    fn quiz_for(&mut self, discipline: &Discipline) -> Quiz {
        let mut rng = rand::rng();
        let questions: Vec<Question> = discipline
            .units()
            .iter()
            .flat_map(|unit| {
                let count = rng.random_range(self.min_per_unit..=self.max_per_unit);
                Self::unit_questions(unit, count)
            })
            .collect();

        debug!(
            discipline = %discipline.id(),
            questions = questions.len(),
            "generated diagnostic quiz"
        );
        // Every question was built from one of the discipline's own units.
        Quiz::new(discipline, questions).unwrap_or_else(|_| Quiz::empty(discipline.id().clone()))
    }
}

//
// ─── FIXED FIXTURES ────────────────────────────────────────────────────────────
//

/// Serves prepared questions per discipline. Disciplines without fixtures get
/// an empty quiz.
#[derive(Debug, Clone, Default)]
pub struct FixedQuestionSource {
    questions: HashMap<DisciplineId, Vec<Question>>,
}

impl FixedQuestionSource {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register the questions for a discipline.
    ///
    /// # Errors
    ///
    /// Returns `QuizError::ForeignUnit` if a question targets a unit outside `discipline`.
    pub fn insert(
        &mut self,
        discipline: &Discipline,
        questions: Vec<Question>,
    ) -> Result<(), QuizError> {
        let quiz = Quiz::new(discipline, questions)?;
        self.questions
            .insert(discipline.id().clone(), quiz.questions().to_vec());
        Ok(())
    }

    /// Builder-style [`FixedQuestionSource::insert`].
    ///
    /// # Errors
    ///
    /// Returns `QuizError::ForeignUnit` if a question targets a unit outside `discipline`.
    pub fn with(mut self, discipline: &Discipline, questions: Vec<Question>) -> Result<Self, QuizError> {
        self.insert(discipline, questions)?;
        Ok(self)
    }
}

impl QuestionSource for FixedQuestionSource {
    fn quiz_for(&mut self, discipline: &Discipline) -> Quiz {
        let questions = self
            .questions
            .get(discipline.id())
            .cloned()
            .unwrap_or_default();
        Quiz::new(discipline, questions).unwrap_or_else(|_| Quiz::empty(discipline.id().clone()))
    }
}
