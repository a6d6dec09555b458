//! Dashboard read model: the plan grouped for display, with progress stats.

use serde::Serialize;

use manhaj_core::model::{Catalog, DisciplineId, PlanEntry, PlanStats, StudyPlan, SubjectAreaId};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DisciplineGroup {
    pub discipline_id: DisciplineId,
    pub entries: Vec<PlanEntry>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SubjectAreaSection {
    pub subject_area_id: SubjectAreaId,
    pub disciplines: Vec<DisciplineGroup>,
    pub stats: PlanStats,
    pub progress_percent: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashboardView {
    /// Subject areas with a plan, in catalog order.
    pub sections: Vec<SubjectAreaSection>,
    /// Subject areas that could still be added with another wizard pass.
    pub uncovered: Vec<SubjectAreaId>,
    pub overall: PlanStats,
}

impl DashboardView {
    #[must_use]
    pub fn build(catalog: &Catalog, plan: &StudyPlan) -> Self {
        let covered = plan.covered_subject_areas();
        let mut sections = Vec::new();
        let mut uncovered = Vec::new();

        for area in catalog.subject_areas() {
            if !covered.contains(area.id()) {
                uncovered.push(area.id().clone());
                continue;
            }
            let disciplines: Vec<DisciplineGroup> = area
                .disciplines()
                .iter()
                .map(|d| DisciplineGroup {
                    discipline_id: d.id().clone(),
                    entries: plan
                        .entries_for(area.id())
                        .filter(|e| e.discipline_id() == d.id())
                        .cloned()
                        .collect(),
                })
                .filter(|g| !g.entries.is_empty())
                .collect();
            let stats = PlanStats::from_entries(plan.entries_for(area.id()));
            sections.push(SubjectAreaSection {
                subject_area_id: area.id().clone(),
                disciplines,
                stats,
                progress_percent: stats.progress_percent(),
            });
        }

        Self {
            sections,
            uncovered,
            overall: plan.stats(),
        }
    }

    #[must_use]
    pub fn section(&self, id: &SubjectAreaId) -> Option<&SubjectAreaSection> {
        self.sections.iter().find(|s| &s.subject_area_id == id)
    }

    /// Whether the "add another plan" action has anything left to offer.
    #[must_use]
    pub fn can_add_plan(&self) -> bool {
        !self.uncovered.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::manhaj::ManhajGenerator;
    use manhaj_core::model::UnitId;
    use manhaj_core::time::fixed_now;
    use std::collections::BTreeSet;

    fn plan_for(catalog: &Catalog, areas: &[&str]) -> StudyPlan {
        let selected: BTreeSet<_> = areas.iter().map(|a| SubjectAreaId::new(*a)).collect();
        let mut plan = StudyPlan::new();
        let entries = ManhajGenerator::new(catalog, fixed_now()).generate(&selected, &[], &plan);
        plan.append(entries);
        plan
    }

    #[test]
    fn groups_by_area_and_discipline() {
        let catalog = Catalog::builtin();
        let plan = plan_for(&catalog, &["hadith"]);
        let view = DashboardView::build(&catalog, &plan);

        assert_eq!(view.sections.len(), 1);
        let section = &view.sections[0];
        assert_eq!(section.disciplines.len(), 2);
        assert_eq!(section.disciplines[1].entries.len(), 3);
        assert_eq!(view.uncovered.len(), 5);
        assert!(view.can_add_plan());
    }

    #[test]
    fn progress_counts_completed_over_non_skipped() {
        let catalog = Catalog::builtin();
        let mut plan = plan_for(&catalog, &["seerah"]);
        plan.complete_unit(&UnitId::new("seerah-1"));
        let view = DashboardView::build(&catalog, &plan);

        let section = view.section(&SubjectAreaId::new("seerah")).unwrap();
        assert_eq!(section.stats.completed, 1);
        assert_eq!(section.stats.pending, 1);
        assert!((section.progress_percent - 50.0).abs() < f64::EPSILON);
    }

    #[test]
    fn full_coverage_leaves_nothing_to_add() {
        let catalog = Catalog::builtin();
        let all: Vec<&str> = catalog.subject_areas().iter().map(|a| a.id().as_str()).collect();
        let plan = plan_for(&catalog, &all);
        let view = DashboardView::build(&catalog, &plan);
        assert!(!view.can_add_plan());
        assert_eq!(view.overall.total, catalog.unit_count());
    }
}
