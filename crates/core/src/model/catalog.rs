use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use thiserror::Error;

use crate::model::ids::{DisciplineId, SubjectAreaId, UnitId};

//
// ─── ERRORS ────────────────────────────────────────────────────────────────────
//

#[derive(Debug, Error)]
#[non_exhaustive]
pub enum CatalogError {
    #[error("catalog entry has an empty id")]
    EmptyId,

    #[error("catalog entry {id} has an empty name")]
    EmptyName { id: String },

    #[error("duplicate subject area id: {0}")]
    DuplicateSubjectArea(SubjectAreaId),

    #[error("duplicate discipline id: {0}")]
    DuplicateDiscipline(DisciplineId),

    #[error("duplicate study unit id: {0}")]
    DuplicateUnit(UnitId),

    #[error("invalid catalog document: {0}")]
    Parse(#[from] serde_json::Error),
}

//
// ─── ENTITIES ──────────────────────────────────────────────────────────────────
//

/// A single text or curriculum item; the granular unit tracked by a study plan.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StudyUnit {
    id: UnitId,
    name: String,
    #[serde(default)]
    description: String,
    #[serde(default)]
    lesson_count: u32,
    #[serde(default)]
    question_count: u32,
}

impl StudyUnit {
    #[must_use]
    pub fn new(
        id: UnitId,
        name: impl Into<String>,
        description: impl Into<String>,
        lesson_count: u32,
        question_count: u32,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            description: description.into(),
            lesson_count,
            question_count,
        }
    }

    #[must_use]
    pub fn id(&self) -> &UnitId {
        &self.id
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }

    #[must_use]
    pub fn lesson_count(&self) -> u32 {
        self.lesson_count
    }

    #[must_use]
    pub fn question_count(&self) -> u32 {
        self.question_count
    }
}

/// A sub-field of a subject area. Diagnostic tests are taken per discipline.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Discipline {
    id: DisciplineId,
    name: String,
    #[serde(default)]
    description: String,
    units: Vec<StudyUnit>,
}

impl Discipline {
    #[must_use]
    pub fn new(
        id: DisciplineId,
        name: impl Into<String>,
        description: impl Into<String>,
        units: Vec<StudyUnit>,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            description: description.into(),
            units,
        }
    }

    #[must_use]
    pub fn id(&self) -> &DisciplineId {
        &self.id
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }

    #[must_use]
    pub fn units(&self) -> &[StudyUnit] {
        &self.units
    }

    #[must_use]
    pub fn contains_unit(&self, unit_id: &UnitId) -> bool {
        self.units.iter().any(|u| u.id() == unit_id)
    }
}

/// Top-level field of study.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubjectArea {
    id: SubjectAreaId,
    name: String,
    #[serde(default)]
    description: String,
    #[serde(default)]
    icon: String,
    disciplines: Vec<Discipline>,
}

impl SubjectArea {
    #[must_use]
    pub fn new(
        id: SubjectAreaId,
        name: impl Into<String>,
        description: impl Into<String>,
        icon: impl Into<String>,
        disciplines: Vec<Discipline>,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            description: description.into(),
            icon: icon.into(),
            disciplines,
        }
    }

    #[must_use]
    pub fn id(&self) -> &SubjectAreaId {
        &self.id
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }

    #[must_use]
    pub fn icon(&self) -> &str {
        &self.icon
    }

    #[must_use]
    pub fn disciplines(&self) -> &[Discipline] {
        &self.disciplines
    }

    /// Number of study units across all disciplines of this area.
    #[must_use]
    pub fn unit_count(&self) -> usize {
        self.disciplines.iter().map(|d| d.units().len()).sum()
    }
}

//
// ─── CATALOG ───────────────────────────────────────────────────────────────────
//

/// Immutable taxonomy of subject areas, disciplines and study units.
///
/// Ids are unique per kind across the whole catalog, so any id resolves to at
/// most one entity regardless of its parent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Catalog {
    subject_areas: Vec<SubjectArea>,
}

#[derive(Deserialize)]
struct CatalogDocument {
    subject_areas: Vec<SubjectArea>,
}

impl Catalog {
    /// Build a catalog, validating id uniqueness and required names.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError` on empty ids/names or duplicated ids.
    pub fn new(subject_areas: Vec<SubjectArea>) -> Result<Self, CatalogError> {
        let mut area_ids = HashSet::new();
        let mut discipline_ids = HashSet::new();
        let mut unit_ids = HashSet::new();

        for area in &subject_areas {
            check_entry(area.id().as_str(), area.name())?;
            if !area_ids.insert(area.id()) {
                return Err(CatalogError::DuplicateSubjectArea(area.id().clone()));
            }
            for discipline in area.disciplines() {
                check_entry(discipline.id().as_str(), discipline.name())?;
                if !discipline_ids.insert(discipline.id()) {
                    return Err(CatalogError::DuplicateDiscipline(discipline.id().clone()));
                }
                for unit in discipline.units() {
                    check_entry(unit.id().as_str(), unit.name())?;
                    if !unit_ids.insert(unit.id()) {
                        return Err(CatalogError::DuplicateUnit(unit.id().clone()));
                    }
                }
            }
        }

        Ok(Self { subject_areas })
    }

    /// Parse a catalog from a JSON document of the form `{"subject_areas": [...]}`.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::Parse` for malformed JSON, or a validation error.
    pub fn from_json(json: &str) -> Result<Self, CatalogError> {
        let doc: CatalogDocument = serde_json::from_str(json)?;
        Self::new(doc.subject_areas)
    }

    #[must_use]
    pub fn subject_areas(&self) -> &[SubjectArea] {
        &self.subject_areas
    }

    #[must_use]
    pub fn subject_area(&self, id: &SubjectAreaId) -> Option<&SubjectArea> {
        self.subject_areas.iter().find(|a| a.id() == id)
    }

    /// Looks up a discipline along with the subject area that owns it.
    #[must_use]
    pub fn discipline(&self, id: &DisciplineId) -> Option<(&SubjectArea, &Discipline)> {
        self.subject_areas.iter().find_map(|area| {
            area.disciplines()
                .iter()
                .find(|d| d.id() == id)
                .map(|d| (area, d))
        })
    }

    #[must_use]
    pub fn unit(&self, id: &UnitId) -> Option<&StudyUnit> {
        self.subject_areas
            .iter()
            .flat_map(SubjectArea::disciplines)
            .flat_map(Discipline::units)
            .find(|u| u.id() == id)
    }

    #[must_use]
    pub fn contains_subject_area(&self, id: &SubjectAreaId) -> bool {
        self.subject_area(id).is_some()
    }

    #[must_use]
    pub fn contains_discipline(&self, id: &DisciplineId) -> bool {
        self.discipline(id).is_some()
    }

    #[must_use]
    pub fn unit_count(&self) -> usize {
        self.subject_areas.iter().map(SubjectArea::unit_count).sum()
    }
}

fn check_entry(id: &str, name: &str) -> Result<(), CatalogError> {
    if id.trim().is_empty() {
        return Err(CatalogError::EmptyId);
    }
    if name.trim().is_empty() {
        return Err(CatalogError::EmptyName { id: id.to_owned() });
    }
    Ok(())
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//

#[cfg(test)]
mod tests {
    use super::*;

    fn unit(id: &str) -> StudyUnit {
        StudyUnit::new(UnitId::new(id), id, "", 1, 5)
    }

    fn area(id: &str, disciplines: Vec<Discipline>) -> SubjectArea {
        SubjectArea::new(SubjectAreaId::new(id), id, "", "", disciplines)
    }

    #[test]
    fn lookups_resolve_across_areas() {
        let catalog = Catalog::new(vec![
            area(
                "a",
                vec![Discipline::new(DisciplineId::new("d1"), "D1", "", vec![unit("u1")])],
            ),
            area(
                "b",
                vec![Discipline::new(
                    DisciplineId::new("d2"),
                    "D2",
                    "",
                    vec![unit("u2"), unit("u3")],
                )],
            ),
        ])
        .unwrap();

        let (owner, discipline) = catalog.discipline(&DisciplineId::new("d2")).unwrap();
        assert_eq!(owner.id(), &SubjectAreaId::new("b"));
        assert_eq!(discipline.units().len(), 2);
        assert!(catalog.unit(&UnitId::new("u3")).is_some());
        assert!(catalog.unit(&UnitId::new("missing")).is_none());
        assert_eq!(catalog.unit_count(), 3);
    }

    #[test]
    fn duplicate_unit_across_disciplines_is_rejected() {
        let err = Catalog::new(vec![area(
            "a",
            vec![
                Discipline::new(DisciplineId::new("d1"), "D1", "", vec![unit("u1")]),
                Discipline::new(DisciplineId::new("d2"), "D2", "", vec![unit("u1")]),
            ],
        )])
        .unwrap_err();
        assert!(matches!(err, CatalogError::DuplicateUnit(id) if id.as_str() == "u1"));
    }

    #[test]
    fn duplicate_subject_area_is_rejected() {
        let err = Catalog::new(vec![area("a", Vec::new()), area("a", Vec::new())]).unwrap_err();
        assert!(matches!(err, CatalogError::DuplicateSubjectArea(_)));
    }

    #[test]
    fn blank_name_is_rejected() {
        let err = Catalog::new(vec![SubjectArea::new(
            SubjectAreaId::new("a"),
            "  ",
            "",
            "",
            Vec::new(),
        )])
        .unwrap_err();
        assert!(matches!(err, CatalogError::EmptyName { id } if id == "a"));
    }

    #[test]
    fn from_json_parses_document() {
        let json = r#"{
            "subject_areas": [{
                "id": "arabic",
                "name": "Arabic",
                "disciplines": [{
                    "id": "nahw",
                    "name": "Grammar",
                    "units": [{ "id": "nahw-1", "name": "Ajurrumiyyah", "lesson_count": 15 }]
                }]
            }]
        }"#;
        let catalog = Catalog::from_json(json).unwrap();
        let unit = catalog.unit(&UnitId::new("nahw-1")).unwrap();
        assert_eq!(unit.lesson_count(), 15);
        assert_eq!(unit.question_count(), 0);
    }

    #[test]
    fn from_json_reports_parse_errors() {
        let err = Catalog::from_json("{ not json").unwrap_err();
        assert!(matches!(err, CatalogError::Parse(_)));
    }
}
