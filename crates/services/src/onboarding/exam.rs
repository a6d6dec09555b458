use std::fmt;

use manhaj_core::DiagnosticScorer;
use manhaj_core::model::{AnswerSet, AnswerSheet, DiagnosticResult, Discipline, Question, Quiz};

use crate::questions::QuestionSource;

/// What happened when the learner pressed "next" in the exam.
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum ExamAdvance {
    /// No question was answered, or the exam is over.
    Ignored,
    NextQuestion,
    /// The current discipline was scored and the next one started.
    NextDiscipline,
    /// The last discipline was scored. Carries every result of the exam.
    Finished(Vec<DiagnosticResult>),
}

/// Walks the learner through one quiz per claimed discipline.
///
/// Each discipline's quiz is generated only when the exam reaches it. Scored
/// results stay with the exam until the last discipline is done.
pub struct DiagnosticExam {
    disciplines: Vec<Discipline>,
    discipline_index: usize,
    quiz: Quiz,
    question_index: usize,
    answers: AnswerSheet,
    results: Vec<DiagnosticResult>,
    finished: bool,
}

impl DiagnosticExam {
    /// Start an exam over `disciplines`. Returns `None` when there is nothing to test.
    pub(crate) fn start(disciplines: Vec<Discipline>, source: &mut dyn QuestionSource) -> Option<Self> {
        let quiz = source.quiz_for(disciplines.first()?);
        Some(Self {
            disciplines,
            discipline_index: 0,
            quiz,
            question_index: 0,
            answers: AnswerSheet::new(),
            results: Vec::new(),
            finished: false,
        })
    }

    #[must_use]
    pub fn disciplines(&self) -> &[Discipline] {
        &self.disciplines
    }

    #[must_use]
    pub fn current_discipline(&self) -> Option<&Discipline> {
        if self.finished {
            return None;
        }
        self.disciplines.get(self.discipline_index)
    }

    #[must_use]
    pub fn quiz(&self) -> &Quiz {
        &self.quiz
    }

    #[must_use]
    pub fn current_question(&self) -> Option<&Question> {
        if self.finished {
            return None;
        }
        self.quiz.questions().get(self.question_index)
    }

    #[must_use]
    pub fn current_answer(&self) -> Option<&AnswerSet> {
        self.current_question()
            .and_then(|q| self.answers.get(q.id()))
    }

    #[must_use]
    pub fn question_index(&self) -> usize {
        self.question_index
    }

    #[must_use]
    pub fn discipline_index(&self) -> usize {
        self.discipline_index
    }

    /// Disciplines scored so far in this exam.
    #[must_use]
    pub fn scored(&self) -> &[DiagnosticResult] {
        &self.results
    }

    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.finished
    }

    /// The learner may move on once the current question has an answer.
    #[must_use]
    pub fn can_proceed(&self) -> bool {
        match self.current_question() {
            Some(q) => self.answers.is_answered(q.id()),
            None => !self.finished,
        }
    }

    /// Overall progress through all disciplines, in percent.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn progress_percent(&self) -> f64 {
        if self.finished {
            return 100.0;
        }
        let disciplines = self.disciplines.len() as f64;
        let within = if self.quiz.is_empty() {
            0.0
        } else {
            self.question_index as f64 / self.quiz.len() as f64 * 100.0
        };
        (self.discipline_index as f64 * 100.0 + within) / disciplines
    }

    /// Apply a click on option `index` of the current question.
    pub fn choose_option(&mut self, index: usize) -> bool {
        if self.finished {
            return false;
        }
        let Some(question) = self.quiz.questions().get(self.question_index) else {
            return false;
        };
        self.answers.choose(question, index)
    }

    /// Step back one question. Returns `false` on the first question of a discipline.
    pub fn previous(&mut self) -> bool {
        if self.finished || self.question_index == 0 {
            return false;
        }
        self.question_index -= 1;
        true
    }

    pub(crate) fn advance(
        &mut self,
        scorer: &DiagnosticScorer,
        source: &mut dyn QuestionSource,
    ) -> ExamAdvance {
        if self.finished {
            return ExamAdvance::Ignored;
        }
        if let Some(question) = self.current_question() {
            if !self.answers.is_answered(question.id()) {
                return ExamAdvance::Ignored;
            }
            if self.question_index + 1 < self.quiz.len() {
                self.question_index += 1;
                return ExamAdvance::NextQuestion;
            }
        }

        let Some(discipline) = self.disciplines.get(self.discipline_index) else {
            self.finished = true;
            return ExamAdvance::Ignored;
        };
        self.results
            .push(scorer.score(discipline, &self.quiz, &self.answers));

        self.discipline_index += 1;
        self.question_index = 0;
        self.answers.clear();
        match self.disciplines.get(self.discipline_index) {
            Some(next) => {
                self.quiz = source.quiz_for(next);
                ExamAdvance::NextDiscipline
            }
            None => {
                self.finished = true;
                ExamAdvance::Finished(std::mem::take(&mut self.results))
            }
        }
    }
}

impl fmt::Debug for DiagnosticExam {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DiagnosticExam")
            .field("disciplines_len", &self.disciplines.len())
            .field("discipline_index", &self.discipline_index)
            .field("questions_len", &self.quiz.len())
            .field("question_index", &self.question_index)
            .field("scored_len", &self.results.len())
            .field("finished", &self.finished)
            .finish_non_exhaustive()
    }
}
