use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use storage::dto::training_center::{CreateTrainingCenterRequest, TrainingCenterResponse};
use uuid::Uuid;
use validator::Validate;

use crate::error::WebError;
use crate::extract::{Json, Path};
use crate::state::AppState;

use super::services;

#[utoipa::path(
    get,
    path = "/api/training-centers",
    responses(
        (
            status = 200,
            description = "List all training centers successfully",
            body = Vec<TrainingCenterResponse>
        )
    ),
    tag = "training-centers"
)]
pub async fn list_training_centers(
    State(state): State<AppState>,
) -> Result<Json<Vec<TrainingCenterResponse>>, WebError> {
    let centers = services::list_training_centers(state.store()).await?;

    Ok(Json(
        centers
            .into_iter()
            .map(TrainingCenterResponse::from)
            .collect(),
    ))
}

#[utoipa::path(
    get,
    path = "/api/training-centers/{id}",
    params(
        ("id" = Uuid, Path, description = "Training center id")
    ),
    responses(
        (status = 200, description = "Training center found", body = TrainingCenterResponse),
        (status = 404, description = "Training center not found")
    ),
    tag = "training-centers"
)]
pub async fn get_training_center(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Response, WebError> {
    let center = services::get_training_center(state.store(), id).await?;

    Ok(Json(TrainingCenterResponse::from(center)).into_response())
}

#[utoipa::path(
    post,
    path = "/api/training-centers",
    request_body = CreateTrainingCenterRequest,
    responses(
        (
            status = 201,
            description = "Training center created successfully",
            body = TrainingCenterResponse
        ),
        (status = 303, description = "A training center with this name already exists"),
        (status = 400, description = "Validation error")
    ),
    tag = "training-centers"
)]
pub async fn create_training_center(
    State(state): State<AppState>,
    Json(req): Json<CreateTrainingCenterRequest>,
) -> Result<Response, WebError> {
    req.validate()?;

    let center = services::create_training_center(state.store(), &req).await?;

    Ok((StatusCode::CREATED, Json(TrainingCenterResponse::from(center))).into_response())
}
