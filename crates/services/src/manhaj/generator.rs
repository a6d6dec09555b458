use chrono::{DateTime, Utc};
use std::collections::BTreeSet;

use manhaj_core::model::{
    Catalog, DiagnosticResult, PlanEntry, PlanStatus, StudyPlan, StudyUnit, SubjectAreaId,
};

/// Derives plan entries from the catalog, the selection and diagnostic results.
pub struct ManhajGenerator<'a> {
    catalog: &'a Catalog,
    generated_at: DateTime<Utc>,
}

impl<'a> ManhajGenerator<'a> {
    #[must_use]
    pub fn new(catalog: &'a Catalog, generated_at: DateTime<Utc>) -> Self {
        Self {
            catalog,
            generated_at,
        }
    }

    /// Build entries for every unit under the selected subject areas.
    ///
    /// - Entries follow catalog order (subject area, discipline, unit).
    /// - Subject areas already present in `existing` produce nothing.
    /// - A unit is `Skipped` only when its discipline has a result and the unit
    ///   is both skip-eligible and wanted skipped; otherwise it is `Pending`.
    #[must_use]
    pub fn generate(
        &self,
        selected: &BTreeSet<SubjectAreaId>,
        results: &[DiagnosticResult],
        existing: &StudyPlan,
    ) -> Vec<PlanEntry> {
        let mut entries = Vec::new();
        for area in self.catalog.subject_areas() {
            if !selected.contains(area.id()) || existing.covers_subject_area(area.id()) {
                continue;
            }
            for discipline in area.disciplines() {
                let result = results
                    .iter()
                    .find(|r| r.discipline_id() == discipline.id());
                for unit in discipline.units() {
                    entries.push(PlanEntry::new(
                        area.id().clone(),
                        discipline.id().clone(),
                        unit.id().clone(),
                        initial_status(unit, result),
                        self.generated_at,
                    ));
                }
            }
        }
        entries
    }
}

fn initial_status(unit: &StudyUnit, result: Option<&DiagnosticResult>) -> PlanStatus {
    match result.and_then(|r| r.unit(unit.id())) {
        Some(unit_result) if unit_result.resolves_to_skip() => PlanStatus::Skipped,
        _ => PlanStatus::Pending,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use manhaj_core::model::{DisciplineId, UnitId, UnitResult, DEFAULT_SKIP_THRESHOLD};
    use manhaj_core::time::fixed_now;
    use std::collections::HashSet;

    fn selected(ids: &[&str]) -> BTreeSet<SubjectAreaId> {
        ids.iter().map(|id| SubjectAreaId::new(*id)).collect()
    }

    fn perfect(discipline: &str, unit: &str) -> DiagnosticResult {
        DiagnosticResult::new(
            DisciplineId::new(discipline),
            vec![UnitResult::from_counts(UnitId::new(unit), 5, 5, DEFAULT_SKIP_THRESHOLD)],
        )
    }

    #[test]
    fn one_entry_per_unit_in_catalog_order() {
        let catalog = Catalog::builtin();
        let generator = ManhajGenerator::new(&catalog, fixed_now());
        let entries = generator.generate(&selected(&["arabic", "aqidah"]), &[], &StudyPlan::new());

        assert_eq!(entries.len(), 7 + 4);
        assert_eq!(entries[0].unit_id().as_str(), "tawheed-1");
        assert_eq!(entries.last().unwrap().unit_id().as_str(), "sarf-1");
        let unique: HashSet<_> = entries.iter().map(PlanEntry::unit_id).collect();
        assert_eq!(unique.len(), entries.len());
        assert!(entries.iter().all(|e| e.status() == PlanStatus::Pending));
    }

    #[test]
    fn accepted_skip_marks_unit_skipped() {
        let catalog = Catalog::builtin();
        let generator = ManhajGenerator::new(&catalog, fixed_now());
        let entries = generator.generate(
            &selected(&["fiqh"]),
            &[perfect("muamalat", "muamalat-1")],
            &StudyPlan::new(),
        );

        for entry in &entries {
            let expected = if entry.unit_id().as_str() == "muamalat-1" {
                PlanStatus::Skipped
            } else {
                PlanStatus::Pending
            };
            assert_eq!(entry.status(), expected, "unit {}", entry.unit_id());
        }
    }

    #[test]
    fn declined_skip_stays_pending() {
        let catalog = Catalog::builtin();
        let mut result = perfect("muamalat", "muamalat-1");
        result.set_skip_decision(&UnitId::new("muamalat-1"), false);

        let entries = ManhajGenerator::new(&catalog, fixed_now()).generate(
            &selected(&["fiqh"]),
            &[result],
            &StudyPlan::new(),
        );
        let entry = entries
            .iter()
            .find(|e| e.unit_id().as_str() == "muamalat-1")
            .unwrap();
        assert_eq!(entry.status(), PlanStatus::Pending);
    }

    #[test]
    fn units_missing_from_result_stay_pending() {
        let catalog = Catalog::builtin();
        // Result only covers tawheed-1; the other tawheed units have no unit result.
        let entries = ManhajGenerator::new(&catalog, fixed_now()).generate(
            &selected(&["aqidah"]),
            &[perfect("tawheed", "tawheed-1")],
            &StudyPlan::new(),
        );
        let skipped: Vec<_> = entries
            .iter()
            .filter(|e| e.status() == PlanStatus::Skipped)
            .map(|e| e.unit_id().clone())
            .collect();
        assert_eq!(skipped, vec![UnitId::new("tawheed-1")]);
    }

    #[test]
    fn covered_subject_areas_are_not_regenerated() {
        let catalog = Catalog::builtin();
        let generator = ManhajGenerator::new(&catalog, fixed_now());
        let mut plan = StudyPlan::new();
        let first = generator.generate(&selected(&["seerah"]), &[], &plan);
        assert_eq!(plan.append(first), 2);

        let again = generator.generate(&selected(&["seerah", "quran"]), &[], &plan);
        assert_eq!(again.len(), 3);
        assert!(again.iter().all(|e| e.subject_area_id().as_str() == "quran"));
    }

    #[test]
    fn generation_is_deterministic() {
        let catalog = Catalog::builtin();
        let generator = ManhajGenerator::new(&catalog, fixed_now());
        let results = [perfect("nahw", "nahw-2")];
        let first = generator.generate(&selected(&["arabic", "hadith"]), &results, &StudyPlan::new());
        let second = generator.generate(&selected(&["hadith", "arabic"]), &results, &StudyPlan::new());
        assert_eq!(first, second);
    }

    #[test]
    fn unknown_subject_area_produces_nothing() {
        let catalog = Catalog::builtin();
        let entries = ManhajGenerator::new(&catalog, fixed_now()).generate(
            &selected(&["astronomy"]),
            &[],
            &StudyPlan::new(),
        );
        assert!(entries.is_empty());
    }
}
