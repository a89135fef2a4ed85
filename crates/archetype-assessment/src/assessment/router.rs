use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Router,
};
use serde::{Deserialize, Serialize};

use super::catalog::CategoryProvider;
use super::domain::{CategoryId, Response as AssessmentResponse};
use super::narrative::{select_narrative, NarrativeSelection};
use super::repository::{AssessmentId, AssessmentRepository, AssessmentView};
use super::scoring::AssessmentResult;
use super::service::{AssessmentService, AssessmentSubmission};
use crate::error::AppError;

const DEFAULT_RECENT_LIMIT: usize = 20;
const MAX_RECENT_LIMIT: usize = 100;

/// Body for ad-hoc scoring against a category.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoreRequest {
    pub responses: Vec<AssessmentResponse>,
}

/// Query accepted by the recent-assessments listing.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RecentQuery {
    pub limit: Option<usize>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ScoreView {
    pub category_id: CategoryId,
    pub narrative: NarrativeSelection,
    pub result: AssessmentResult,
}

/// Router builder exposing catalog, scoring and submission endpoints.
pub fn assessment_router<C, R>(service: Arc<AssessmentService<C, R>>) -> Router
where
    C: CategoryProvider + 'static,
    R: AssessmentRepository + 'static,
{
    Router::new()
        .route("/api/v1/categories", get(categories_handler::<C, R>))
        .route(
            "/api/v1/categories/:category_id",
            get(category_handler::<C, R>),
        )
        .route(
            "/api/v1/categories/:category_id/score",
            post(score_handler::<C, R>),
        )
        .route(
            "/api/v1/assessments",
            get(recent_handler::<C, R>).post(submit_handler::<C, R>),
        )
        .route(
            "/api/v1/assessments/:assessment_id",
            get(assessment_handler::<C, R>),
        )
        .with_state(service)
}

pub(crate) async fn categories_handler<C, R>(
    State(service): State<Arc<AssessmentService<C, R>>>,
) -> Response
where
    C: CategoryProvider + 'static,
    R: AssessmentRepository + 'static,
{
    (StatusCode::OK, axum::Json(service.categories())).into_response()
}

pub(crate) async fn category_handler<C, R>(
    State(service): State<Arc<AssessmentService<C, R>>>,
    Path(category_id): Path<String>,
) -> Response
where
    C: CategoryProvider + 'static,
    R: AssessmentRepository + 'static,
{
    match service.category(&CategoryId(category_id)) {
        Ok(definition) => (StatusCode::OK, axum::Json(definition.as_ref())).into_response(),
        Err(err) => AppError::from(err).into_response(),
    }
}

pub(crate) async fn score_handler<C, R>(
    State(service): State<Arc<AssessmentService<C, R>>>,
    Path(category_id): Path<String>,
    axum::Json(request): axum::Json<ScoreRequest>,
) -> Response
where
    C: CategoryProvider + 'static,
    R: AssessmentRepository + 'static,
{
    let category_id = CategoryId(category_id);
    match service.score(&category_id, &request.responses) {
        Ok(result) => {
            let view = ScoreView {
                category_id,
                narrative: select_narrative(&result),
                result,
            };
            (StatusCode::OK, axum::Json(view)).into_response()
        }
        Err(err) => AppError::from(err).into_response(),
    }
}

pub(crate) async fn submit_handler<C, R>(
    State(service): State<Arc<AssessmentService<C, R>>>,
    axum::Json(submission): axum::Json<AssessmentSubmission>,
) -> Response
where
    C: CategoryProvider + 'static,
    R: AssessmentRepository + 'static,
{
    match service.submit(submission) {
        Ok(record) => (StatusCode::CREATED, axum::Json(record.view())).into_response(),
        Err(err) => AppError::from(err).into_response(),
    }
}

pub(crate) async fn assessment_handler<C, R>(
    State(service): State<Arc<AssessmentService<C, R>>>,
    Path(assessment_id): Path<String>,
) -> Response
where
    C: CategoryProvider + 'static,
    R: AssessmentRepository + 'static,
{
    match service.get(&AssessmentId(assessment_id)) {
        Ok(record) => (StatusCode::OK, axum::Json(record.view())).into_response(),
        Err(err) => AppError::from(err).into_response(),
    }
}

pub(crate) async fn recent_handler<C, R>(
    State(service): State<Arc<AssessmentService<C, R>>>,
    Query(query): Query<RecentQuery>,
) -> Response
where
    C: CategoryProvider + 'static,
    R: AssessmentRepository + 'static,
{
    let limit = query
        .limit
        .unwrap_or(DEFAULT_RECENT_LIMIT)
        .min(MAX_RECENT_LIMIT);
    match service.recent(limit) {
        Ok(records) => {
            let views: Vec<AssessmentView> = records.iter().map(|record| record.view()).collect();
            (StatusCode::OK, axum::Json(views)).into_response()
        }
        Err(err) => AppError::from(err).into_response(),
    }
}
