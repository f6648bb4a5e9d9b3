use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Router,
};
use serde_json::{json, Value};

use super::domain::ApplicationId;
use super::repository::{ApplicationRepository, RepositoryError};
use super::service::{UnderwritingService, UnderwritingServiceError};

/// Router builder exposing HTTP endpoints for submission, lookups, and direct decisions.
pub fn underwriting_router<R>(service: Arc<UnderwritingService<R>>) -> Router
where
    R: ApplicationRepository + 'static,
{
    Router::new()
        .route("/applications/submit", post(submit_handler::<R>))
        .route("/applications/decision", post(decision_handler::<R>))
        .route(
            "/applications/assessment/:application_id",
            get(assessment_handler::<R>),
        )
        .route(
            "/applications/:application_id",
            get(application_handler::<R>),
        )
        .with_state(service)
}

fn error_response(status: StatusCode, message: impl Into<String>) -> Response {
    let payload = json!({ "error": message.into() });
    (status, axum::Json(payload)).into_response()
}

pub(crate) async fn submit_handler<R>(
    State(service): State<Arc<UnderwritingService<R>>>,
    axum::Json(payload): axum::Json<Value>,
) -> Response
where
    R: ApplicationRepository + 'static,
{
    match service.submit(payload) {
        Ok(record) => match record.assessment {
            Some(assessment) => (StatusCode::CREATED, axum::Json(assessment)).into_response(),
            None => error_response(StatusCode::INTERNAL_SERVER_ERROR, "assessment missing"),
        },
        Err(UnderwritingServiceError::Intake(violation)) => {
            error_response(StatusCode::BAD_REQUEST, violation.to_string())
        }
        Err(UnderwritingServiceError::Repository(RepositoryError::Conflict)) => {
            error_response(StatusCode::CONFLICT, "application already exists")
        }
        Err(UnderwritingServiceError::Assessment {
            application_id,
            source,
        }) => {
            let payload = json!({
                "error": format!("Error during assessment process: {source}"),
                "application_id": application_id,
            });
            (StatusCode::INTERNAL_SERVER_ERROR, axum::Json(payload)).into_response()
        }
        Err(other) => error_response(StatusCode::INTERNAL_SERVER_ERROR, other.to_string()),
    }
}

pub(crate) async fn application_handler<R>(
    State(service): State<Arc<UnderwritingService<R>>>,
    Path(application_id): Path<String>,
) -> Response
where
    R: ApplicationRepository + 'static,
{
    let id = ApplicationId(application_id);
    match service.application(&id) {
        Ok(record) => (StatusCode::OK, axum::Json(record.application)).into_response(),
        Err(UnderwritingServiceError::Repository(RepositoryError::NotFound)) => {
            error_response(StatusCode::NOT_FOUND, "Application not found")
        }
        Err(other) => error_response(StatusCode::INTERNAL_SERVER_ERROR, other.to_string()),
    }
}

pub(crate) async fn assessment_handler<R>(
    State(service): State<Arc<UnderwritingService<R>>>,
    Path(application_id): Path<String>,
) -> Response
where
    R: ApplicationRepository + 'static,
{
    let id = ApplicationId(application_id);
    match service.assessment(&id) {
        Ok(assessment) => (StatusCode::OK, axum::Json(assessment)).into_response(),
        Err(UnderwritingServiceError::Repository(RepositoryError::NotFound)) => error_response(
            StatusCode::NOT_FOUND,
            "Assessment not found for this application ID",
        ),
        Err(other) => error_response(StatusCode::INTERNAL_SERVER_ERROR, other.to_string()),
    }
}

pub(crate) async fn decision_handler<R>(
    State(service): State<Arc<UnderwritingService<R>>>,
    axum::Json(payload): axum::Json<Value>,
) -> Response
where
    R: ApplicationRepository + 'static,
{
    let raw_score = payload.get("risk_score");
    match service.decide(raw_score) {
        Ok(decision) => {
            let payload = json!({
                "risk_score": raw_score,
                "decision": decision.label(),
            });
            (StatusCode::OK, axum::Json(payload)).into_response()
        }
        Err(error) => error_response(StatusCode::UNPROCESSABLE_ENTITY, error.to_string()),
    }
}
