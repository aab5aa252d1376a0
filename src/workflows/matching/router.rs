use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post, put},
    Router,
};
use serde::Deserialize;
use serde_json::json;

use super::domain::{TaskDraft, TaskId, WorkerAvailability, WorkerId, WorkerRegistration};
use super::repository::{HirePublisher, RegistryError, TaskBoard, WorkerDirectory};
use super::service::{InstantMatchService, MatchServiceError};

/// Router builder exposing HTTP endpoints for the matching workflow.
pub fn match_router<D, B, N>(service: Arc<InstantMatchService<D, B, N>>) -> Router
where
    D: WorkerDirectory + 'static,
    B: TaskBoard + 'static,
    N: HirePublisher + 'static,
{
    Router::new()
        .route("/api/v1/workers", post(register_worker_handler::<D, B, N>))
        .route(
            "/api/v1/workers/:worker_id",
            get(worker_handler::<D, B, N>),
        )
        .route(
            "/api/v1/workers/:worker_id/availability",
            put(availability_handler::<D, B, N>),
        )
        .route("/api/v1/tasks", post(post_task_handler::<D, B, N>))
        .route(
            "/api/v1/tasks/:task_id/matches",
            post(shortlist_handler::<D, B, N>),
        )
        .route("/api/v1/tasks/:task_id/hire", post(hire_handler::<D, B, N>))
        .with_state(service)
}

#[derive(Debug, Deserialize)]
pub(crate) struct AvailabilityUpdate {
    pub availability: WorkerAvailability,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ShortlistRequest {
    pub requester_id: String,
}

#[derive(Debug, Deserialize)]
pub(crate) struct HireRequest {
    pub requester_id: String,
    pub worker_id: String,
}

pub(crate) async fn register_worker_handler<D, B, N>(
    State(service): State<Arc<InstantMatchService<D, B, N>>>,
    axum::Json(registration): axum::Json<WorkerRegistration>,
) -> Response
where
    D: WorkerDirectory + 'static,
    B: TaskBoard + 'static,
    N: HirePublisher + 'static,
{
    match service.register_worker(registration) {
        Ok(profile) => (StatusCode::CREATED, axum::Json(profile)).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn worker_handler<D, B, N>(
    State(service): State<Arc<InstantMatchService<D, B, N>>>,
    Path(worker_id): Path<String>,
) -> Response
where
    D: WorkerDirectory + 'static,
    B: TaskBoard + 'static,
    N: HirePublisher + 'static,
{
    match service.get_worker(&WorkerId(worker_id)) {
        Ok(profile) => (StatusCode::OK, axum::Json(profile)).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn availability_handler<D, B, N>(
    State(service): State<Arc<InstantMatchService<D, B, N>>>,
    Path(worker_id): Path<String>,
    axum::Json(update): axum::Json<AvailabilityUpdate>,
) -> Response
where
    D: WorkerDirectory + 'static,
    B: TaskBoard + 'static,
    N: HirePublisher + 'static,
{
    match service.set_availability(&WorkerId(worker_id), update.availability) {
        Ok(profile) => (StatusCode::OK, axum::Json(profile)).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn post_task_handler<D, B, N>(
    State(service): State<Arc<InstantMatchService<D, B, N>>>,
    axum::Json(draft): axum::Json<TaskDraft>,
) -> Response
where
    D: WorkerDirectory + 'static,
    B: TaskBoard + 'static,
    N: HirePublisher + 'static,
{
    match service.post_task(draft) {
        Ok(listing) => (StatusCode::CREATED, axum::Json(listing)).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn shortlist_handler<D, B, N>(
    State(service): State<Arc<InstantMatchService<D, B, N>>>,
    Path(task_id): Path<String>,
    axum::Json(request): axum::Json<ShortlistRequest>,
) -> Response
where
    D: WorkerDirectory + 'static,
    B: TaskBoard + 'static,
    N: HirePublisher + 'static,
{
    match service.shortlist(&TaskId(task_id), &WorkerId(request.requester_id)) {
        Ok(shortlist) => (StatusCode::OK, axum::Json(shortlist)).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn hire_handler<D, B, N>(
    State(service): State<Arc<InstantMatchService<D, B, N>>>,
    Path(task_id): Path<String>,
    axum::Json(request): axum::Json<HireRequest>,
) -> Response
where
    D: WorkerDirectory + 'static,
    B: TaskBoard + 'static,
    N: HirePublisher + 'static,
{
    match service.hire(
        &TaskId(task_id),
        &WorkerId(request.requester_id),
        &WorkerId(request.worker_id),
    ) {
        Ok(listing) => (StatusCode::OK, axum::Json(listing)).into_response(),
        Err(error) => error_response(error),
    }
}

fn error_response(error: MatchServiceError) -> Response {
    let status = match &error {
        MatchServiceError::Registry(RegistryError::NotFound) => StatusCode::NOT_FOUND,
        MatchServiceError::Registry(RegistryError::Conflict)
        | MatchServiceError::TaskNotOpen { .. } => StatusCode::CONFLICT,
        MatchServiceError::Ineligible(_) => StatusCode::UNPROCESSABLE_ENTITY,
        MatchServiceError::Registry(RegistryError::Unavailable(_))
        | MatchServiceError::Notify(_) => StatusCode::INTERNAL_SERVER_ERROR,
    };

    let payload = json!({ "error": error.to_string() });
    (status, axum::Json(payload)).into_response()
}
