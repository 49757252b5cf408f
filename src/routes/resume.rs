use axum::{
    extract::{Extension, Path, State},
    http::StatusCode,
    response::{IntoResponse, Json},
};
use uuid::Uuid;
use validator::Validate;

use crate::{
    dto::resume_dto::ResumePayload,
    error::{Error, Result},
    middleware::auth::Claims,
    services::feed_service::ResumeKey,
    services::guard_service::{Actor, Resource},
    AppState,
};

#[utoipa::path(
    post,
    path = "/resumes",
    request_body = ResumePayload,
    responses(
        (status = 201, description = "Resume created"),
        (status = 400, description = "Invalid payload"),
        (status = 409, description = "User already has a resume")
    )
)]
#[axum::debug_handler]
pub async fn create_resume(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    Json(payload): Json<ResumePayload>,
) -> Result<impl IntoResponse> {
    payload.validate()?;
    let resume = state
        .resume_service
        .create(claims.user_id()?, payload)
        .await?;
    Ok((StatusCode::CREATED, Json(resume)))
}

#[utoipa::path(
    get,
    path = "/resumes/my",
    responses(
        (status = 200, description = "Caller's resume"),
        (status = 404, description = "Resume not found")
    )
)]
#[axum::debug_handler]
pub async fn my_resume(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
) -> Result<impl IntoResponse> {
    let resume = state.resume_service.get_by_user(claims.user_id()?).await?;
    Ok(Json(resume))
}

#[utoipa::path(
    patch,
    path = "/resumes/{resume_id}",
    params(
        ("resume_id" = Uuid, Path, description = "Resume ID")
    ),
    request_body = ResumePayload,
    responses(
        (status = 200, description = "Resume updated"),
        (status = 404, description = "Resume not found or not owned")
    )
)]
#[axum::debug_handler]
pub async fn update_resume(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    Path(resume_id): Path<Uuid>,
    Json(payload): Json<ResumePayload>,
) -> Result<impl IntoResponse> {
    payload.validate()?;
    let actor = Actor::from_claims(&claims)?;
    state
        .guard_service
        .ensure_owner(&actor, Resource::Resume(resume_id))
        .await?;
    let resume = state.resume_service.update(resume_id, payload).await?;
    Ok(Json(resume))
}

#[utoipa::path(
    delete,
    path = "/resumes/{resume_id}",
    params(
        ("resume_id" = Uuid, Path, description = "Resume ID")
    ),
    responses(
        (status = 204, description = "Resume deleted"),
        (status = 404, description = "Resume not found or not owned")
    )
)]
#[axum::debug_handler]
pub async fn delete_resume(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    Path(resume_id): Path<Uuid>,
) -> Result<impl IntoResponse> {
    let actor = Actor::from_claims(&claims)?;
    state
        .guard_service
        .ensure_owner(&actor, Resource::Resume(resume_id))
        .await?;
    state.resume_service.delete(resume_id).await?;
    Ok(StatusCode::NO_CONTENT)
}

#[utoipa::path(
    get,
    path = "/resumes/all",
    responses(
        (status = 200, description = "Resume feed, newest first")
    )
)]
#[axum::debug_handler]
pub async fn resumes_feed(State(state): State<AppState>) -> Result<impl IntoResponse> {
    let items = state.feed_service.resumes_feed().await?;
    Ok(Json(items))
}

#[utoipa::path(
    get,
    path = "/resume/{id}",
    params(
        ("id" = Uuid, Path, description = "Resume ID, or owning user ID as fallback")
    ),
    responses(
        (status = 200, description = "Resume found"),
        (status = 404, description = "Resume not found")
    )
)]
#[axum::debug_handler]
pub async fn get_resume(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse> {
    // Dual-keyed lookup: try the row id first, then the owning user id.
    let resume = match state.feed_service.resume_lookup(ResumeKey::ById(id)).await? {
        Some(resume) => resume,
        None => state
            .feed_service
            .resume_lookup(ResumeKey::ByOwner(id))
            .await?
            .ok_or_else(|| Error::NotFound("resume not found".to_string()))?,
    };
    Ok(Json(resume))
}
