use std::sync::Arc;

use crate::academics::domain::{SubjectId, Term};
use crate::academics::store::{InMemoryStore, SnapshotStore, StoreError};
use crate::academics::{Catalog, GradebookService, GradebookState};

pub(super) const LEVEL: &str = "high";
pub(super) const YEAR: &str = "2bac_pc";

pub(super) fn catalog() -> Catalog {
    Catalog::standard()
}

pub(super) fn selected_state() -> GradebookState {
    let mut state = GradebookState::default();
    state
        .select_year(&catalog(), LEVEL, YEAR)
        .expect("standard year selectable");
    state
}

pub(super) fn subject_id(state: &GradebookState, term: Term, name: &str) -> SubjectId {
    state
        .subjects(term)
        .iter()
        .find(|subject| subject.name == name)
        .map(|subject| subject.id.clone())
        .unwrap_or_else(|| panic!("{name} present in {term}"))
}

pub(super) fn build_service() -> (GradebookService<InMemoryStore>, Arc<InMemoryStore>) {
    let store = Arc::new(InMemoryStore::default());
    let service = GradebookService::new(store.clone(), Arc::new(catalog()))
        .expect("service starts from empty store");
    (service, store)
}

/// Store that refuses every write.
pub(super) struct ReadOnlyStore;

impl SnapshotStore for ReadOnlyStore {
    fn load(&self) -> Result<Option<GradebookState>, StoreError> {
        Ok(None)
    }

    fn save(&self, _state: &GradebookState) -> Result<(), StoreError> {
        Err(StoreError::Unavailable("read-only".to_string()))
    }
}
