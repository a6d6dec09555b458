mod builtin;
mod catalog;
mod diagnostic;
mod ids;
mod plan;
mod quiz;

pub use ids::{DisciplineId, ParseIdError, QuestionId, SubjectAreaId, UnitId};

pub use catalog::{Catalog, CatalogError, Discipline, StudyUnit, SubjectArea};
pub use diagnostic::{DEFAULT_SKIP_THRESHOLD, DiagnosticResult, UnitResult, unit_score};
pub use plan::{PlanEntry, PlanStats, PlanStatus, StudyPlan};
pub use quiz::{AnswerSet, AnswerSheet, Question, QuestionKind, Quiz, QuizError};
