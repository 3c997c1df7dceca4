use super::catalog::Catalog;
use super::domain::{
    clamp_target_average, GradebookError, SubjectId, SubjectRecord, Term, DEFAULT_TARGET_AVERAGE,
};
use super::report::GradebookReport;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Subject lists for both grading periods of the selected year.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TermSheets {
    #[serde(default)]
    pub first: Vec<SubjectRecord>,
    #[serde(default)]
    pub second: Vec<SubjectRecord>,
}

impl TermSheets {
    pub fn get(&self, term: Term) -> &[SubjectRecord] {
        match term {
            Term::First => &self.first,
            Term::Second => &self.second,
        }
    }

    pub fn get_mut(&mut self, term: Term) -> &mut Vec<SubjectRecord> {
        match term {
            Term::First => &mut self.first,
            Term::Second => &mut self.second,
        }
    }
}

/// Everything a student has entered: the selected year, both terms, the
/// active term and the target average. This is the snapshot that gets
/// persisted between sessions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GradebookState {
    #[serde(default)]
    pub level_id: Option<String>,
    #[serde(default)]
    pub year_id: Option<String>,
    #[serde(default)]
    pub terms: TermSheets,
    #[serde(default)]
    pub active_term: Term,
    #[serde(default = "default_target_average")]
    pub target_average: f64,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

fn default_target_average() -> f64 {
    DEFAULT_TARGET_AVERAGE
}

impl Default for GradebookState {
    fn default() -> Self {
        Self {
            level_id: None,
            year_id: None,
            terms: TermSheets::default(),
            active_term: Term::First,
            target_average: DEFAULT_TARGET_AVERAGE,
            updated_at: None,
        }
    }
}

impl GradebookState {
    /// Selects a year and re-initializes both terms from its default
    /// subjects. Prior edits are discarded; unknown ids leave the state as is.
    pub fn select_year(
        &mut self,
        catalog: &Catalog,
        level_id: &str,
        year_id: &str,
    ) -> Result<(), GradebookError> {
        if catalog.level(level_id).is_none() {
            return Err(GradebookError::LevelNotFound(level_id.to_owned()));
        }
        let year = catalog
            .year(level_id, year_id)
            .ok_or_else(|| GradebookError::YearNotFound {
                level_id: level_id.to_owned(),
                year_id: year_id.to_owned(),
            })?;

        self.terms = TermSheets {
            first: year.instantiate(),
            second: year.instantiate(),
        };
        self.level_id = Some(level_id.to_owned());
        self.year_id = Some(year_id.to_owned());
        debug!(level_id, year_id, subjects = year.subjects.len(), "year selected");

        Ok(())
    }

    /// Re-selects the current year, or empties both terms when none is set.
    pub fn reset(&mut self, catalog: &Catalog) -> Result<(), GradebookError> {
        match (self.level_id.clone(), self.year_id.clone()) {
            (Some(level_id), Some(year_id)) => self.select_year(catalog, &level_id, &year_id),
            _ => {
                self.terms = TermSheets::default();
                Ok(())
            }
        }
    }

    pub fn set_active_term(&mut self, term: Term) {
        self.active_term = term;
    }

    pub fn set_target_average(&mut self, value: f64) {
        self.target_average = clamp_target_average(value);
    }

    pub fn subjects(&self, term: Term) -> &[SubjectRecord] {
        self.terms.get(term)
    }

    pub fn active_subjects(&self) -> &[SubjectRecord] {
        self.terms.get(self.active_term)
    }

    pub fn subject(&self, term: Term, id: &SubjectId) -> Option<&SubjectRecord> {
        self.terms.get(term).iter().find(|subject| &subject.id == id)
    }

    pub fn add_subject(&mut self, term: Term) -> SubjectId {
        let record = SubjectRecord::blank();
        let id = record.id.clone();
        self.terms.get_mut(term).push(record);
        id
    }

    pub fn remove_subject(&mut self, term: Term, id: &SubjectId) -> Result<(), GradebookError> {
        let subjects = self.terms.get_mut(term);
        let before = subjects.len();
        subjects.retain(|subject| &subject.id != id);
        if subjects.len() == before {
            return Err(not_found(term, id));
        }
        Ok(())
    }

    pub fn set_name(
        &mut self,
        term: Term,
        id: &SubjectId,
        name: impl Into<String>,
    ) -> Result<(), GradebookError> {
        self.subject_mut(term, id)?.set_name(name);
        Ok(())
    }

    pub fn set_coefficient(
        &mut self,
        term: Term,
        id: &SubjectId,
        raw: &str,
    ) -> Result<(), GradebookError> {
        self.subject_mut(term, id)?.set_coefficient(raw);
        Ok(())
    }

    pub fn set_coefficient_value(
        &mut self,
        term: Term,
        id: &SubjectId,
        value: f64,
    ) -> Result<(), GradebookError> {
        self.subject_mut(term, id)?.set_coefficient_value(value);
        Ok(())
    }

    pub fn set_grade(&mut self, term: Term, id: &SubjectId, raw: &str) -> Result<(), GradebookError> {
        self.subject_mut(term, id)?.set_grade(raw);
        Ok(())
    }

    pub fn set_grade_value(
        &mut self,
        term: Term,
        id: &SubjectId,
        value: Option<f64>,
    ) -> Result<(), GradebookError> {
        self.subject_mut(term, id)?.set_grade_value(value);
        Ok(())
    }

    /// Installs an imported subject list for one term.
    pub fn replace_term(&mut self, term: Term, subjects: Vec<SubjectRecord>) {
        *self.terms.get_mut(term) = subjects;
    }

    /// Re-applies every invariant to a snapshot coming from storage.
    pub fn sanitize(&mut self) {
        for term in Term::ordered() {
            for subject in self.terms.get_mut(term).iter_mut() {
                subject.sanitize();
            }
        }
        self.target_average = clamp_target_average(self.target_average);
    }

    pub fn touch(&mut self) {
        self.updated_at = Some(Utc::now());
    }

    pub fn report(&self) -> GradebookReport<'_> {
        GradebookReport::from_state(self)
    }

    fn subject_mut(
        &mut self,
        term: Term,
        id: &SubjectId,
    ) -> Result<&mut SubjectRecord, GradebookError> {
        self.terms
            .get_mut(term)
            .iter_mut()
            .find(|subject| &subject.id == id)
            .ok_or_else(|| not_found(term, id))
    }
}

fn not_found(term: Term, id: &SubjectId) -> GradebookError {
    GradebookError::SubjectNotFound {
        term,
        id: id.clone(),
    }
}
