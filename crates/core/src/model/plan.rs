use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, HashSet};

use crate::model::ids::{DisciplineId, SubjectAreaId, UnitId};

//
// ─── STATUS ────────────────────────────────────────────────────────────────────
//

/// Progress state of a single study unit in the plan.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PlanStatus {
    Pending,
    InProgress,
    Completed,
    Skipped,
}

impl PlanStatus {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            PlanStatus::Pending => "pending",
            PlanStatus::InProgress => "in_progress",
            PlanStatus::Completed => "completed",
            PlanStatus::Skipped => "skipped",
        }
    }
}

impl std::fmt::Display for PlanStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

//
// ─── ENTRY ─────────────────────────────────────────────────────────────────────
//

/// One study unit of the generated manhaj.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlanEntry {
    subject_area_id: SubjectAreaId,
    discipline_id: DisciplineId,
    unit_id: UnitId,
    status: PlanStatus,
    generated_at: DateTime<Utc>,
}

impl PlanEntry {
    #[must_use]
    pub fn new(
        subject_area_id: SubjectAreaId,
        discipline_id: DisciplineId,
        unit_id: UnitId,
        status: PlanStatus,
        generated_at: DateTime<Utc>,
    ) -> Self {
        Self {
            subject_area_id,
            discipline_id,
            unit_id,
            status,
            generated_at,
        }
    }

    #[must_use]
    pub fn subject_area_id(&self) -> &SubjectAreaId {
        &self.subject_area_id
    }

    #[must_use]
    pub fn discipline_id(&self) -> &DisciplineId {
        &self.discipline_id
    }

    #[must_use]
    pub fn unit_id(&self) -> &UnitId {
        &self.unit_id
    }

    #[must_use]
    pub fn status(&self) -> PlanStatus {
        self.status
    }

    #[must_use]
    pub fn generated_at(&self) -> DateTime<Utc> {
        self.generated_at
    }
}

//
// ─── STATS ─────────────────────────────────────────────────────────────────────
//

/// Status counts over a set of plan entries.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct PlanStats {
    pub total: usize,
    pub pending: usize,
    pub in_progress: usize,
    pub completed: usize,
    pub skipped: usize,
}

impl PlanStats {
    #[must_use]
    pub fn from_entries<'a>(entries: impl IntoIterator<Item = &'a PlanEntry>) -> Self {
        let mut stats = Self::default();
        for entry in entries {
            stats.total += 1;
            match entry.status() {
                PlanStatus::Pending => stats.pending += 1,
                PlanStatus::InProgress => stats.in_progress += 1,
                PlanStatus::Completed => stats.completed += 1,
                PlanStatus::Skipped => stats.skipped += 1,
            }
        }
        stats
    }

    /// Completed share of the units that are not skipped, in percent.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn progress_percent(&self) -> f64 {
        let active = self.total - self.skipped;
        if active == 0 {
            return 0.0;
        }
        self.completed as f64 / active as f64 * 100.0
    }
}

//
// ─── PLAN ──────────────────────────────────────────────────────────────────────
//

/// The learner's manhaj: an ordered list of plan entries, one per study unit.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StudyPlan {
    entries: Vec<PlanEntry>,
}

impl StudyPlan {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn entries(&self) -> &[PlanEntry] {
        &self.entries
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    #[must_use]
    pub fn entry(&self, unit_id: &UnitId) -> Option<&PlanEntry> {
        self.entries.iter().find(|e| e.unit_id() == unit_id)
    }

    #[must_use]
    pub fn status_of(&self, unit_id: &UnitId) -> Option<PlanStatus> {
        self.entry(unit_id).map(PlanEntry::status)
    }

    #[must_use]
    pub fn contains_unit(&self, unit_id: &UnitId) -> bool {
        self.entry(unit_id).is_some()
    }

    #[must_use]
    pub fn covers_subject_area(&self, id: &SubjectAreaId) -> bool {
        self.entries.iter().any(|e| e.subject_area_id() == id)
    }

    /// Subject areas that already have entries in the plan.
    #[must_use]
    pub fn covered_subject_areas(&self) -> BTreeSet<SubjectAreaId> {
        self.entries
            .iter()
            .map(|e| e.subject_area_id().clone())
            .collect()
    }

    pub fn entries_for<'a>(
        &'a self,
        subject_area_id: &'a SubjectAreaId,
    ) -> impl Iterator<Item = &'a PlanEntry> + 'a {
        self.entries
            .iter()
            .filter(move |e| e.subject_area_id() == subject_area_id)
    }

    #[must_use]
    pub fn stats(&self) -> PlanStats {
        PlanStats::from_entries(&self.entries)
    }

    /// Append newly generated entries, dropping any whose unit is already planned.
    ///
    /// Returns the number of entries actually added.
    pub fn append(&mut self, entries: impl IntoIterator<Item = PlanEntry>) -> usize {
        let mut seen: HashSet<UnitId> = self.entries.iter().map(|e| e.unit_id().clone()).collect();
        let before = self.entries.len();
        for entry in entries {
            if seen.insert(entry.unit_id().clone()) {
                self.entries.push(entry);
            }
        }
        self.entries.len() - before
    }

    /// Mark a unit as being studied, whatever its current status.
    pub fn start_studying(&mut self, unit_id: &UnitId) -> bool {
        self.update(unit_id, |_| Some(PlanStatus::InProgress))
    }

    /// Mark a unit as completed, whatever its current status.
    pub fn complete_unit(&mut self, unit_id: &UnitId) -> bool {
        self.update(unit_id, |_| Some(PlanStatus::Completed))
    }

    /// Bring a skipped unit back into study. Only `Skipped` entries change.
    pub fn resume_skipped(&mut self, unit_id: &UnitId) -> bool {
        self.update(unit_id, |status| {
            (status == PlanStatus::Skipped).then_some(PlanStatus::InProgress)
        })
    }

    fn update(
        &mut self,
        unit_id: &UnitId,
        transition: impl FnOnce(PlanStatus) -> Option<PlanStatus>,
    ) -> bool {
        let Some(entry) = self.entries.iter_mut().find(|e| e.unit_id() == unit_id) else {
            return false;
        };
        match transition(entry.status) {
            Some(next) => {
                entry.status = next;
                true
            }
            None => false,
        }
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//

#[cfg(test)]
mod tests {
    use super::*;
    use crate::time::fixed_now;

    fn entry(area: &str, unit: &str, status: PlanStatus) -> PlanEntry {
        PlanEntry::new(
            SubjectAreaId::new(area),
            DisciplineId::new("d"),
            UnitId::new(unit),
            status,
            fixed_now(),
        )
    }

    fn plan() -> StudyPlan {
        let mut plan = StudyPlan::new();
        plan.append(vec![
            entry("a", "u1", PlanStatus::Pending),
            entry("a", "u2", PlanStatus::Skipped),
            entry("b", "u3", PlanStatus::Pending),
        ]);
        plan
    }

    #[test]
    fn append_drops_duplicate_units() {
        let mut plan = plan();
        let added = plan.append(vec![
            entry("a", "u1", PlanStatus::Pending),
            entry("c", "u4", PlanStatus::Pending),
        ]);
        assert_eq!(added, 1);
        assert_eq!(plan.len(), 4);
    }

    #[test]
    fn start_and_complete_are_unconditional() {
        let mut plan = plan();
        assert!(plan.complete_unit(&UnitId::new("u1")));
        assert!(plan.start_studying(&UnitId::new("u1")));
        assert_eq!(plan.status_of(&UnitId::new("u1")), Some(PlanStatus::InProgress));
        assert!(plan.start_studying(&UnitId::new("u2")));
        assert_eq!(plan.status_of(&UnitId::new("u2")), Some(PlanStatus::InProgress));
    }

    #[test]
    fn resume_only_moves_skipped_entries() {
        let mut plan = plan();
        assert!(!plan.resume_skipped(&UnitId::new("u1")));
        assert_eq!(plan.status_of(&UnitId::new("u1")), Some(PlanStatus::Pending));

        plan.complete_unit(&UnitId::new("u3"));
        assert!(!plan.resume_skipped(&UnitId::new("u3")));
        assert_eq!(plan.status_of(&UnitId::new("u3")), Some(PlanStatus::Completed));

        assert!(plan.resume_skipped(&UnitId::new("u2")));
        assert_eq!(plan.status_of(&UnitId::new("u2")), Some(PlanStatus::InProgress));
    }

    #[test]
    fn unknown_unit_is_a_no_op() {
        let mut plan = plan();
        let before = plan.clone();
        assert!(!plan.start_studying(&UnitId::new("missing")));
        assert!(!plan.complete_unit(&UnitId::new("missing")));
        assert!(!plan.resume_skipped(&UnitId::new("missing")));
        assert_eq!(plan, before);
    }

    #[test]
    fn stats_exclude_skipped_from_progress() {
        let mut plan = plan();
        plan.complete_unit(&UnitId::new("u1"));
        let stats = plan.stats();
        assert_eq!(stats.total, 3);
        assert_eq!(stats.skipped, 1);
        assert_eq!(stats.completed, 1);
        assert!((stats.progress_percent() - 50.0).abs() < f64::EPSILON);
    }

    #[test]
    fn progress_of_all_skipped_is_zero() {
        let stats = PlanStats::from_entries(&[entry("a", "u1", PlanStatus::Skipped)]);
        assert_eq!(stats.progress_percent(), 0.0);
    }

    #[test]
    fn covered_subject_areas_are_reported() {
        let plan = plan();
        assert!(plan.covers_subject_area(&SubjectAreaId::new("b")));
        assert!(!plan.covers_subject_area(&SubjectAreaId::new("z")));
        assert_eq!(plan.covered_subject_areas().len(), 2);
        assert_eq!(plan.entries_for(&SubjectAreaId::new("a")).count(), 2);
    }

    #[test]
    fn status_serializes_snake_case() {
        let json = serde_json::to_string(&PlanStatus::InProgress).unwrap();
        assert_eq!(json, "\"in_progress\"");
    }
}
