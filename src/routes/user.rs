use axum::{
    extract::{Extension, Path, State},
    http::StatusCode,
    response::{IntoResponse, Json},
};
use uuid::Uuid;
use validator::Validate;

use crate::{
    dto::user_dto::{LoginPayload, RegisterPayload},
    error::Result,
    middleware::auth::Claims,
    AppState,
};

#[utoipa::path(
    post,
    path = "/user/register",
    request_body = RegisterPayload,
    responses(
        (status = 201, description = "User registered"),
        (status = 400, description = "Invalid payload"),
        (status = 409, description = "Email already taken")
    )
)]
#[axum::debug_handler]
pub async fn register(
    State(state): State<AppState>,
    Json(payload): Json<RegisterPayload>,
) -> Result<impl IntoResponse> {
    payload.validate()?;
    let user = state.user_service.register(payload).await?;
    Ok((StatusCode::CREATED, Json(user)))
}

#[utoipa::path(
    post,
    path = "/user/login",
    request_body = LoginPayload,
    responses(
        (status = 200, description = "Authenticated"),
        (status = 401, description = "Invalid credentials"),
        (status = 403, description = "Role mismatch")
    )
)]
#[axum::debug_handler]
pub async fn login(
    State(state): State<AppState>,
    Json(payload): Json<LoginPayload>,
) -> Result<impl IntoResponse> {
    payload.validate()?;
    let response = state.user_service.login(payload).await?;
    Ok(Json(response))
}

#[utoipa::path(
    get,
    path = "/user/profile",
    responses(
        (status = 200, description = "Caller's profile"),
        (status = 404, description = "User not found")
    )
)]
#[axum::debug_handler]
pub async fn my_profile(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
) -> Result<impl IntoResponse> {
    let profile = state.user_service.profile(claims.user_id()?).await?;
    Ok(Json(profile))
}

#[utoipa::path(
    get,
    path = "/user/profile/{id}",
    params(
        ("id" = Uuid, Path, description = "User ID")
    ),
    responses(
        (status = 200, description = "Profile found"),
        (status = 404, description = "User not found")
    )
)]
#[axum::debug_handler]
pub async fn profile_by_id(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse> {
    let profile = state.user_service.profile(id).await?;
    Ok(Json(profile))
}
