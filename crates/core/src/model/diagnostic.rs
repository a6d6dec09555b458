use serde::{Deserialize, Serialize};

use crate::model::ids::{DisciplineId, UnitId};

/// Score threshold (percent) at or above which a unit may be skipped.
pub const DEFAULT_SKIP_THRESHOLD: f64 = 85.0;

/// Diagnostic outcome for a single study unit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UnitResult {
    unit_id: UnitId,
    score: f64,
    total_questions: u32,
    correct_count: u32,
    skip_eligible: bool,
    wants_to_skip: bool,
}

impl UnitResult {
    /// Score a unit from its question counts.
    ///
    /// A unit with zero questions scores 0. Skip intent defaults to eligibility.
    #[must_use]
    pub fn from_counts(unit_id: UnitId, correct_count: u32, total_questions: u32, threshold: f64) -> Self {
        let score = unit_score(correct_count, total_questions);
        let skip_eligible = score >= threshold;
        Self {
            unit_id,
            score,
            total_questions,
            correct_count,
            skip_eligible,
            wants_to_skip: skip_eligible,
        }
    }

    #[must_use]
    pub fn unit_id(&self) -> &UnitId {
        &self.unit_id
    }

    /// Percentage in `0.0..=100.0`.
    #[must_use]
    pub fn score(&self) -> f64 {
        self.score
    }

    #[must_use]
    pub fn total_questions(&self) -> u32 {
        self.total_questions
    }

    #[must_use]
    pub fn correct_count(&self) -> u32 {
        self.correct_count
    }

    #[must_use]
    pub fn skip_eligible(&self) -> bool {
        self.skip_eligible
    }

    #[must_use]
    pub fn wants_to_skip(&self) -> bool {
        self.wants_to_skip
    }

    pub fn set_wants_to_skip(&mut self, wants_to_skip: bool) {
        self.wants_to_skip = wants_to_skip;
    }

    /// True when the unit should be marked skipped in a generated plan.
    #[must_use]
    pub fn resolves_to_skip(&self) -> bool {
        self.skip_eligible && self.wants_to_skip
    }
}

/// `correct / total * 100`, or 0 when there are no questions.
#[must_use]
pub fn unit_score(correct_count: u32, total_questions: u32) -> f64 {
    if total_questions == 0 {
        return 0.0;
    }
    f64::from(correct_count) / f64::from(total_questions) * 100.0
}

/// Diagnostic outcome for a whole discipline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DiagnosticResult {
    discipline_id: DisciplineId,
    unit_results: Vec<UnitResult>,
    overall_score: f64,
}

impl DiagnosticResult {
    /// Build a result; the overall score is the unweighted mean of unit
    /// scores, and 0 when there are no units.
    #[must_use]
    pub fn new(discipline_id: DisciplineId, unit_results: Vec<UnitResult>) -> Self {
        let overall_score = if unit_results.is_empty() {
            0.0
        } else {
            let sum: f64 = unit_results.iter().map(UnitResult::score).sum();
            // Unit counts are tiny; the cast is exact.
            #[allow(clippy::cast_precision_loss)]
            let len = unit_results.len() as f64;
            sum / len
        };
        Self {
            discipline_id,
            unit_results,
            overall_score,
        }
    }

    #[must_use]
    pub fn discipline_id(&self) -> &DisciplineId {
        &self.discipline_id
    }

    #[must_use]
    pub fn unit_results(&self) -> &[UnitResult] {
        &self.unit_results
    }

    #[must_use]
    pub fn overall_score(&self) -> f64 {
        self.overall_score
    }

    #[must_use]
    pub fn unit(&self, unit_id: &UnitId) -> Option<&UnitResult> {
        self.unit_results.iter().find(|r| r.unit_id() == unit_id)
    }

    /// Update the skip intent of one unit. Returns `false` if the unit is unknown.
    pub fn set_skip_decision(&mut self, unit_id: &UnitId, wants_to_skip: bool) -> bool {
        match self.unit_results.iter_mut().find(|r| r.unit_id() == unit_id) {
            Some(result) => {
                result.set_wants_to_skip(wants_to_skip);
                true
            }
            None => false,
        }
    }

    #[must_use]
    pub fn skip_eligible_count(&self) -> usize {
        self.unit_results.iter().filter(|r| r.skip_eligible()).count()
    }
}
