use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, patch, post, put},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use serde_json::json;

use super::domain::{GradebookError, SubjectId, Term};
use super::report::ReportSummary;
use super::service::{GradebookService, GradebookServiceError, SubjectUpdate};
use super::state::GradebookState;
use super::store::SnapshotStore;

#[derive(Debug, Deserialize)]
pub struct SelectYearRequest {
    pub level_id: String,
    pub year_id: String,
}

#[derive(Debug, Deserialize)]
pub struct ActiveTermRequest {
    pub term: Term,
}

#[derive(Debug, Deserialize)]
pub struct TargetAverageRequest {
    pub target_average: f64,
}

/// State snapshot plus everything derived from it.
#[derive(Debug, Serialize)]
pub struct GradebookView {
    pub state: GradebookState,
    pub report: ReportSummary,
}

impl GradebookView {
    pub fn from_state(state: GradebookState) -> Self {
        let report = state.report().summary();
        Self { state, report }
    }
}

/// Router builder exposing the catalog, the persisted gradebook and a
/// stateless report endpoint.
pub fn gradebook_router<S>(service: Arc<GradebookService<S>>) -> Router
where
    S: SnapshotStore + 'static,
{
    Router::new()
        .route("/api/v1/catalog", get(catalog_handler::<S>))
        .route("/api/v1/gradebook", get(gradebook_handler::<S>))
        .route("/api/v1/gradebook/year", put(select_year_handler::<S>))
        .route("/api/v1/gradebook/reset", post(reset_handler::<S>))
        .route("/api/v1/gradebook/term", put(active_term_handler::<S>))
        .route("/api/v1/gradebook/target", put(target_handler::<S>))
        .route(
            "/api/v1/gradebook/terms/:term/subjects",
            post(add_subject_handler::<S>),
        )
        .route(
            "/api/v1/gradebook/terms/:term/subjects/:subject_id",
            patch(update_subject_handler::<S>).delete(remove_subject_handler::<S>),
        )
        .route("/api/v1/report", post(report_handler))
        .with_state(service)
}

pub(crate) async fn catalog_handler<S>(State(service): State<Arc<GradebookService<S>>>) -> Response
where
    S: SnapshotStore + 'static,
{
    (StatusCode::OK, Json(service.catalog().clone())).into_response()
}

pub(crate) async fn gradebook_handler<S>(
    State(service): State<Arc<GradebookService<S>>>,
) -> Response
where
    S: SnapshotStore + 'static,
{
    state_response(service.snapshot(), StatusCode::OK)
}

pub(crate) async fn select_year_handler<S>(
    State(service): State<Arc<GradebookService<S>>>,
    Json(request): Json<SelectYearRequest>,
) -> Response
where
    S: SnapshotStore + 'static,
{
    state_response(
        service.select_year(&request.level_id, &request.year_id),
        StatusCode::OK,
    )
}

pub(crate) async fn reset_handler<S>(State(service): State<Arc<GradebookService<S>>>) -> Response
where
    S: SnapshotStore + 'static,
{
    state_response(service.reset(), StatusCode::OK)
}

pub(crate) async fn active_term_handler<S>(
    State(service): State<Arc<GradebookService<S>>>,
    Json(request): Json<ActiveTermRequest>,
) -> Response
where
    S: SnapshotStore + 'static,
{
    state_response(service.set_active_term(request.term), StatusCode::OK)
}

pub(crate) async fn target_handler<S>(
    State(service): State<Arc<GradebookService<S>>>,
    Json(request): Json<TargetAverageRequest>,
) -> Response
where
    S: SnapshotStore + 'static,
{
    state_response(
        service.set_target_average(request.target_average),
        StatusCode::OK,
    )
}

pub(crate) async fn add_subject_handler<S>(
    State(service): State<Arc<GradebookService<S>>>,
    Path(raw_term): Path<String>,
) -> Response
where
    S: SnapshotStore + 'static,
{
    let Some(term) = Term::parse(&raw_term) else {
        return unknown_term(&raw_term);
    };
    match service.add_subject(term) {
        Ok(record) => (StatusCode::CREATED, Json(record)).into_response(),
        Err(err) => error_response(err),
    }
}

pub(crate) async fn update_subject_handler<S>(
    State(service): State<Arc<GradebookService<S>>>,
    Path((raw_term, subject_id)): Path<(String, String)>,
    Json(update): Json<SubjectUpdate>,
) -> Response
where
    S: SnapshotStore + 'static,
{
    let Some(term) = Term::parse(&raw_term) else {
        return unknown_term(&raw_term);
    };
    match service.update_subject(term, &SubjectId(subject_id), update) {
        Ok(record) => (StatusCode::OK, Json(record)).into_response(),
        Err(err) => error_response(err),
    }
}

pub(crate) async fn remove_subject_handler<S>(
    State(service): State<Arc<GradebookService<S>>>,
    Path((raw_term, subject_id)): Path<(String, String)>,
) -> Response
where
    S: SnapshotStore + 'static,
{
    let Some(term) = Term::parse(&raw_term) else {
        return unknown_term(&raw_term);
    };
    state_response(
        service.remove_subject(term, &SubjectId(subject_id)),
        StatusCode::OK,
    )
}

/// Computes a report for a posted snapshot without touching the store.
pub(crate) async fn report_handler(Json(mut state): Json<GradebookState>) -> Response {
    state.sanitize();
    let summary = state.report().summary();
    (StatusCode::OK, Json(summary)).into_response()
}

fn state_response(
    result: Result<GradebookState, GradebookServiceError>,
    status: StatusCode,
) -> Response {
    match result {
        Ok(state) => (status, Json(GradebookView::from_state(state))).into_response(),
        Err(err) => error_response(err),
    }
}

fn unknown_term(raw: &str) -> Response {
    let payload = json!({
        "error": format!("unknown term '{raw}', expected 'first' or 'second'"),
    });
    (StatusCode::NOT_FOUND, Json(payload)).into_response()
}

fn error_response(err: GradebookServiceError) -> Response {
    let status = match &err {
        GradebookServiceError::Gradebook(
            GradebookError::LevelNotFound(_)
            | GradebookError::YearNotFound { .. }
            | GradebookError::SubjectNotFound { .. },
        ) => StatusCode::NOT_FOUND,
        GradebookServiceError::Store(_) | GradebookServiceError::Unavailable => {
            StatusCode::INTERNAL_SERVER_ERROR
        }
    };
    let payload = json!({
        "error": err.to_string(),
    });
    (status, Json(payload)).into_response()
}
