use super::common::*;
use crate::academics::domain::{SubjectId, Term};
use crate::academics::service::{FieldInput, SubjectUpdate};
use crate::academics::store::SnapshotStore;
use crate::academics::{GradebookError, GradebookService, GradebookServiceError};
use std::sync::Arc;

#[test]
fn mutations_are_persisted_to_the_store() {
    let (service, store) = build_service();

    service.select_year(LEVEL, YEAR).expect("year selected");
    let saved = store.load().expect("load").expect("snapshot saved");
    assert_eq!(saved.year_id.as_deref(), Some(YEAR));
    assert!(saved.updated_at.is_some());

    service.set_active_term(Term::Second).expect("term set");
    service.set_target_average(17.0).expect("target set");
    let saved = store.load().expect("load").expect("snapshot saved");
    assert_eq!(saved.active_term, Term::Second);
    assert_eq!(saved.target_average, 17.0);
}

#[test]
fn service_restores_previous_snapshot() {
    let (service, store) = build_service();
    service.select_year(LEVEL, YEAR).expect("year selected");
    let added = service.add_subject(Term::First).expect("subject added");

    let restored = GradebookService::new(store, Arc::new(catalog())).expect("restores");
    let snapshot = restored.snapshot().expect("snapshot");
    assert!(snapshot.subject(Term::First, &added.id).is_some());
}

#[test]
fn update_accepts_text_and_numbers() {
    let (service, _) = build_service();
    service.select_year(LEVEL, YEAR).expect("year selected");
    let snapshot = service.snapshot().expect("snapshot");
    let math = subject_id(&snapshot, Term::First, "Mathematics");

    let updated = service
        .update_subject(
            Term::First,
            &math,
            SubjectUpdate {
                name: Some("Maths".to_string()),
                coefficient: Some(FieldInput::Text("0.1".to_string())),
                grade: Some(FieldInput::Number(21.0)),
            },
        )
        .expect("updated");
    assert_eq!(updated.name, "Maths");
    assert_eq!(updated.coefficient, 0.5);
    assert_eq!(updated.grade, Some(20.0));

    let cleared = service
        .update_subject(
            Term::First,
            &math,
            SubjectUpdate {
                grade: Some(FieldInput::Text(String::new())),
                ..SubjectUpdate::default()
            },
        )
        .expect("cleared");
    assert!(cleared.grade.is_none());
    assert_eq!(cleared.name, "Maths");
}

#[test]
fn unknown_subject_is_reported() {
    let (service, _) = build_service();
    let result = service.update_subject(
        Term::First,
        &SubjectId("ghost".to_string()),
        SubjectUpdate::default(),
    );
    assert!(matches!(
        result,
        Err(GradebookServiceError::Gradebook(
            GradebookError::SubjectNotFound { .. }
        ))
    ));
}

#[test]
fn failed_save_does_not_commit_the_change() {
    let service = GradebookService::new(Arc::new(ReadOnlyStore), Arc::new(catalog()))
        .expect("service starts");

    let result = service.select_year(LEVEL, YEAR);
    assert!(matches!(result, Err(GradebookServiceError::Store(_))));

    let snapshot = service.snapshot().expect("snapshot");
    assert!(snapshot.year_id.is_none());
    assert!(snapshot.subjects(Term::First).is_empty());
}

#[test]
fn remove_subject_drops_it_from_the_term() {
    let (service, _) = build_service();
    let added = service.add_subject(Term::Second).expect("added");
    let state = service
        .remove_subject(Term::Second, &added.id)
        .expect("removed");
    assert!(state.subjects(Term::Second).is_empty());
}
