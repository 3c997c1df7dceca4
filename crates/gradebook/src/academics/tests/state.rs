use super::common::*;
use crate::academics::domain::{GradebookError, SubjectId, Term, DEFAULT_SUBJECT_NAME};
use crate::academics::GradebookState;

#[test]
fn selecting_a_year_fills_both_terms_independently() {
    let mut state = selected_state();

    let year = catalog().year(LEVEL, YEAR).cloned().expect("year");
    assert_eq!(state.subjects(Term::First).len(), year.subjects.len());
    assert_eq!(state.subjects(Term::Second).len(), year.subjects.len());

    let math = subject_id(&state, Term::First, "Mathematics");
    state
        .set_grade(Term::First, &math, "14")
        .expect("grade set");

    assert!(state
        .subjects(Term::Second)
        .iter()
        .all(|subject| subject.grade.is_none()));
}

#[test]
fn reselecting_discards_edits() {
    let mut state = selected_state();
    let math = subject_id(&state, Term::First, "Mathematics");
    state.set_grade(Term::First, &math, "18").expect("grade");
    state.add_subject(Term::Second);

    state.reset(&catalog()).expect("reset");

    assert!(state
        .subjects(Term::First)
        .iter()
        .all(|subject| subject.grade.is_none()));
    assert!(state
        .subjects(Term::Second)
        .iter()
        .all(|subject| subject.name != DEFAULT_SUBJECT_NAME));
}

#[test]
fn unknown_year_leaves_state_untouched() {
    let mut state = selected_state();
    let before = state.clone();

    let err = state
        .select_year(&catalog(), LEVEL, "3bac")
        .expect_err("unknown year rejected");
    assert!(matches!(err, GradebookError::YearNotFound { .. }));

    let err = state
        .select_year(&catalog(), "university", "l1")
        .expect_err("unknown level rejected");
    assert!(matches!(err, GradebookError::LevelNotFound(_)));

    assert_eq!(state, before);
}

#[test]
fn reset_without_selection_clears_terms() {
    let mut state = GradebookState::default();
    state.add_subject(Term::First);
    state.reset(&catalog()).expect("reset");
    assert!(state.subjects(Term::First).is_empty());
}

#[test]
fn mutations_apply_the_clamp_policy() {
    let mut state = selected_state();
    let math = subject_id(&state, Term::First, "Mathematics");

    state.set_grade(Term::First, &math, "25").expect("grade");
    state.set_coefficient(Term::First, &math, "0.1").expect("coef");
    let subject = state.subject(Term::First, &math).expect("subject");
    assert_eq!(subject.grade, Some(20.0));
    assert_eq!(subject.coefficient, 0.5);

    state.set_grade(Term::First, &math, "-5").expect("grade");
    state.set_coefficient(Term::First, &math, "abc").expect("coef");
    let subject = state.subject(Term::First, &math).expect("subject");
    assert_eq!(subject.grade, Some(0.0));
    assert_eq!(subject.coefficient, 1.0);

    state.set_grade(Term::First, &math, "").expect("grade cleared");
    assert!(state
        .subject(Term::First, &math)
        .is_some_and(|subject| subject.grade.is_none()));
}

#[test]
fn added_subject_gets_defaults_and_can_be_removed() {
    let mut state = GradebookState::default();
    let id = state.add_subject(Term::Second);

    let subject = state.subject(Term::Second, &id).expect("added");
    assert_eq!(subject.name, DEFAULT_SUBJECT_NAME);
    assert_eq!(subject.coefficient, 1.0);
    assert!(subject.grade.is_none());

    state.set_name(Term::Second, &id, "Robotics").expect("renamed");
    assert_eq!(
        state.subject(Term::Second, &id).map(|s| s.name.as_str()),
        Some("Robotics")
    );

    state.remove_subject(Term::Second, &id).expect("removed");
    assert!(state.subjects(Term::Second).is_empty());
}

#[test]
fn edits_are_scoped_to_their_term() {
    let mut state = selected_state();
    let first_math = subject_id(&state, Term::First, "Mathematics");

    let err = state
        .set_grade(Term::Second, &first_math, "12")
        .expect_err("id belongs to the first term");
    assert!(matches!(err, GradebookError::SubjectNotFound { term: Term::Second, .. }));

    let err = state
        .remove_subject(Term::First, &SubjectId("missing".to_string()))
        .expect_err("unknown id");
    assert!(matches!(err, GradebookError::SubjectNotFound { .. }));
}

#[test]
fn target_average_is_clamped() {
    let mut state = GradebookState::default();
    state.set_target_average(25.0);
    assert_eq!(state.target_average, 20.0);
    state.set_target_average(4.0);
    assert_eq!(state.target_average, 10.0);
}
