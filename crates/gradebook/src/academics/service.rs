use std::sync::{Arc, Mutex};

use serde::Deserialize;
use tracing::info;

use super::catalog::Catalog;
use super::domain::{GradebookError, SubjectId, SubjectRecord, Term};
use super::state::GradebookState;
use super::store::{SnapshotStore, StoreError};

/// Raw field value as typed by the user: either text or a JSON number.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum FieldInput {
    Number(f64),
    Text(String),
}

/// Partial edit of one subject. Absent fields are left untouched; an empty
/// grade string clears the grade.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct SubjectUpdate {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub coefficient: Option<FieldInput>,
    #[serde(default)]
    pub grade: Option<FieldInput>,
}

/// Service owning the live gradebook state and writing every change through
/// to the snapshot store.
pub struct GradebookService<S> {
    store: Arc<S>,
    catalog: Arc<Catalog>,
    state: Mutex<GradebookState>,
}

impl<S> GradebookService<S>
where
    S: SnapshotStore + 'static,
{
    /// Restores the last saved snapshot, or starts empty.
    pub fn new(store: Arc<S>, catalog: Arc<Catalog>) -> Result<Self, GradebookServiceError> {
        let state = store.load()?.unwrap_or_default();
        Ok(Self {
            store,
            catalog,
            state: Mutex::new(state),
        })
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn snapshot(&self) -> Result<GradebookState, GradebookServiceError> {
        self.read(|state| state.clone())
    }

    pub fn select_year(
        &self,
        level_id: &str,
        year_id: &str,
    ) -> Result<GradebookState, GradebookServiceError> {
        let catalog = Arc::clone(&self.catalog);
        let state = self.mutate(|state| state.select_year(&catalog, level_id, year_id))?;
        info!(level_id, year_id, "gradebook year selected");
        Ok(state)
    }

    pub fn reset(&self) -> Result<GradebookState, GradebookServiceError> {
        let catalog = Arc::clone(&self.catalog);
        let state = self.mutate(|state| state.reset(&catalog))?;
        info!("gradebook reset to catalog defaults");
        Ok(state)
    }

    pub fn set_active_term(&self, term: Term) -> Result<GradebookState, GradebookServiceError> {
        self.mutate(|state| {
            state.set_active_term(term);
            Ok(())
        })
    }

    pub fn set_target_average(&self, value: f64) -> Result<GradebookState, GradebookServiceError> {
        self.mutate(|state| {
            state.set_target_average(value);
            Ok(())
        })
    }

    pub fn add_subject(&self, term: Term) -> Result<SubjectRecord, GradebookServiceError> {
        let mut added = None;
        self.mutate(|state| {
            let id = state.add_subject(term);
            added = state.subject(term, &id).cloned();
            Ok(())
        })?;
        let record = added.ok_or(GradebookServiceError::Unavailable)?;
        info!(%term, id = %record.id, "subject added");
        Ok(record)
    }

    pub fn update_subject(
        &self,
        term: Term,
        id: &SubjectId,
        update: SubjectUpdate,
    ) -> Result<SubjectRecord, GradebookServiceError> {
        let mut updated = None;
        self.mutate(|state| {
            if let Some(name) = update.name {
                state.set_name(term, id, name)?;
            }
            match update.coefficient {
                Some(FieldInput::Text(raw)) => state.set_coefficient(term, id, &raw)?,
                Some(FieldInput::Number(value)) => state.set_coefficient_value(term, id, value)?,
                None => {}
            }
            match update.grade {
                Some(FieldInput::Text(raw)) => state.set_grade(term, id, &raw)?,
                Some(FieldInput::Number(value)) => state.set_grade_value(term, id, Some(value))?,
                None => {}
            }
            updated = state.subject(term, id).cloned();
            Ok(())
        })?;

        updated.ok_or_else(|| {
            GradebookServiceError::Gradebook(GradebookError::SubjectNotFound {
                term,
                id: id.clone(),
            })
        })
    }

    pub fn remove_subject(
        &self,
        term: Term,
        id: &SubjectId,
    ) -> Result<GradebookState, GradebookServiceError> {
        let state = self.mutate(|state| state.remove_subject(term, id))?;
        info!(%term, %id, "subject removed");
        Ok(state)
    }

    fn read<T>(&self, f: impl FnOnce(&GradebookState) -> T) -> Result<T, GradebookServiceError> {
        let guard = self
            .state
            .lock()
            .map_err(|_| GradebookServiceError::Unavailable)?;
        Ok(f(&guard))
    }

    /// Applies `f` to a working copy and only commits it once the store has
    /// accepted the new snapshot.
    fn mutate(
        &self,
        f: impl FnOnce(&mut GradebookState) -> Result<(), GradebookError>,
    ) -> Result<GradebookState, GradebookServiceError> {
        let mut guard = self
            .state
            .lock()
            .map_err(|_| GradebookServiceError::Unavailable)?;

        let mut next = guard.clone();
        f(&mut next)?;
        next.touch();
        self.store.save(&next)?;
        *guard = next.clone();

        Ok(next)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum GradebookServiceError {
    #[error(transparent)]
    Gradebook(#[from] GradebookError),
    #[error(transparent)]
    Store(#[from] StoreError),
    #[error("gradebook state unavailable")]
    Unavailable,
}
