use axum::{
    extract::{Extension, Path, State},
    http::StatusCode,
    response::{IntoResponse, Json},
};
use uuid::Uuid;
use validator::Validate;

use crate::{
    dto::vacancy_dto::VacancyPayload,
    error::Result,
    middleware::auth::Claims,
    services::guard_service::{Actor, Resource},
    AppState,
};

#[utoipa::path(
    post,
    path = "/vacancies",
    request_body = VacancyPayload,
    responses(
        (status = 201, description = "Vacancy created"),
        (status = 400, description = "Invalid payload"),
        (status = 403, description = "Caller does not own the company")
    )
)]
#[axum::debug_handler]
pub async fn create_vacancy(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    Json(payload): Json<VacancyPayload>,
) -> Result<impl IntoResponse> {
    payload.validate()?;
    let actor = Actor::from_claims(&claims)?;
    state
        .guard_service
        .ensure_owner(&actor, Resource::Company(payload.company_id))
        .await?;
    let vacancy = state.vacancy_service.create(payload).await?;
    Ok((StatusCode::CREATED, Json(vacancy)))
}

#[utoipa::path(
    patch,
    path = "/vacancies/{vacancy_id}",
    params(
        ("vacancy_id" = Uuid, Path, description = "Vacancy ID")
    ),
    request_body = VacancyPayload,
    responses(
        (status = 200, description = "Vacancy updated"),
        (status = 404, description = "Vacancy not found or not owned")
    )
)]
#[axum::debug_handler]
pub async fn update_vacancy(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    Path(vacancy_id): Path<Uuid>,
    Json(payload): Json<VacancyPayload>,
) -> Result<impl IntoResponse> {
    payload.validate()?;
    let actor = Actor::from_claims(&claims)?;
    state
        .guard_service
        .ensure_owner(&actor, Resource::Vacancy(vacancy_id))
        .await?;
    state
        .guard_service
        .ensure_owner(&actor, Resource::Company(payload.company_id))
        .await?;
    let vacancy = state.vacancy_service.update(vacancy_id, payload).await?;
    Ok(Json(vacancy))
}

#[utoipa::path(
    delete,
    path = "/vacancies/{vacancy_id}",
    params(
        ("vacancy_id" = Uuid, Path, description = "Vacancy ID")
    ),
    responses(
        (status = 204, description = "Vacancy deleted"),
        (status = 404, description = "Vacancy not found or not owned")
    )
)]
#[axum::debug_handler]
pub async fn delete_vacancy(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    Path(vacancy_id): Path<Uuid>,
) -> Result<impl IntoResponse> {
    let actor = Actor::from_claims(&claims)?;
    state
        .guard_service
        .ensure_owner(&actor, Resource::Vacancy(vacancy_id))
        .await?;
    state.vacancy_service.delete(vacancy_id).await?;
    Ok(StatusCode::NO_CONTENT)
}

#[utoipa::path(
    get,
    path = "/vacancies/my",
    responses(
        (status = 200, description = "Caller's vacancies")
    )
)]
#[axum::debug_handler]
pub async fn my_vacancies(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
) -> Result<impl IntoResponse> {
    let items = state.vacancy_service.list_by_owner(claims.user_id()?).await?;
    Ok(Json(items))
}

#[utoipa::path(
    get,
    path = "/vacancies/all",
    responses(
        (status = 200, description = "Vacancy feed, newest first")
    )
)]
#[axum::debug_handler]
pub async fn vacancies_feed(State(state): State<AppState>) -> Result<impl IntoResponse> {
    let items = state.feed_service.vacancies_feed().await?;
    Ok(Json(items))
}

#[utoipa::path(
    get,
    path = "/vacancy/{id}",
    params(
        ("id" = Uuid, Path, description = "Vacancy ID")
    ),
    responses(
        (status = 200, description = "Vacancy found"),
        (status = 404, description = "Vacancy not found")
    )
)]
#[axum::debug_handler]
pub async fn get_vacancy(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse> {
    let vacancy = state.feed_service.vacancy_by_id(id).await?;
    Ok(Json(vacancy))
}
