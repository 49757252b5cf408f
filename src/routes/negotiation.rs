use axum::{
    extract::{Extension, Path, State},
    http::StatusCode,
    response::{IntoResponse, Json},
};
use uuid::Uuid;
use validator::Validate;

use crate::{
    dto::negotiation_dto::{SubmitInvitationPayload, SubmitResponsePayload, UpdateStatusPayload},
    error::{Error, Result},
    middleware::auth::Claims,
    models::negotiation::NegotiationStatus,
    services::guard_service::{Actor, Resource},
    AppState,
};

fn parse_target_status(payload: &UpdateStatusPayload) -> Result<NegotiationStatus> {
    payload.status.parse().map_err(|_| {
        Error::BadRequest("status must be one of pending, accepted, canceled".to_string())
    })
}

#[utoipa::path(
    post,
    path = "/vacancies/{vacancy_id}/responses",
    params(
        ("vacancy_id" = Uuid, Path, description = "Vacancy ID")
    ),
    request_body = SubmitResponsePayload,
    responses(
        (status = 201, description = "Response created"),
        (status = 200, description = "Existing response reactivated"),
        (status = 400, description = "Missing vacancy or resume")
    )
)]
#[axum::debug_handler]
pub async fn submit_response(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    Path(vacancy_id): Path<Uuid>,
    Json(payload): Json<SubmitResponsePayload>,
) -> Result<impl IntoResponse> {
    payload.validate()?;
    let outcome = state
        .negotiation_service
        .submit_response(vacancy_id, claims.user_id()?, &payload.message)
        .await?;
    let status = if outcome.created {
        StatusCode::CREATED
    } else {
        StatusCode::OK
    };
    Ok((status, Json(outcome.row)))
}

#[utoipa::path(
    get,
    path = "/vacancies/{vacancy_id}/responses",
    params(
        ("vacancy_id" = Uuid, Path, description = "Vacancy ID")
    ),
    responses(
        (status = 200, description = "Responses to the vacancy"),
        (status = 404, description = "Vacancy not found or not owned")
    )
)]
#[axum::debug_handler]
pub async fn list_vacancy_responses(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    Path(vacancy_id): Path<Uuid>,
) -> Result<impl IntoResponse> {
    let actor = Actor::from_claims(&claims)?;
    state
        .guard_service
        .ensure_owner(&actor, Resource::Vacancy(vacancy_id))
        .await?;
    let items = state.feed_service.vacancy_responses(vacancy_id).await?;
    Ok(Json(items))
}

#[utoipa::path(
    get,
    path = "/responses/vacancies",
    responses(
        (status = 200, description = "Responses the applicant has made")
    )
)]
#[axum::debug_handler]
pub async fn my_responses(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
) -> Result<impl IntoResponse> {
    let items = state
        .feed_service
        .applicant_responses(claims.user_id()?)
        .await?;
    Ok(Json(items))
}

#[utoipa::path(
    get,
    path = "/responses/vacancies-owner",
    responses(
        (status = 200, description = "Responses to the owner's vacancies")
    )
)]
#[axum::debug_handler]
pub async fn owner_responses(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
) -> Result<impl IntoResponse> {
    let items = state
        .feed_service
        .owner_responses(claims.user_id()?)
        .await?;
    Ok(Json(items))
}

#[utoipa::path(
    patch,
    path = "/vacancies/{vacancy_id}/responses/{response_id}",
    params(
        ("vacancy_id" = Uuid, Path, description = "Vacancy ID"),
        ("response_id" = Uuid, Path, description = "Response ID")
    ),
    request_body = UpdateStatusPayload,
    responses(
        (status = 200, description = "Status updated"),
        (status = 404, description = "Response not found or vacancy not owned"),
        (status = 409, description = "Illegal status transition")
    )
)]
#[axum::debug_handler]
pub async fn update_response_status(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    Path((vacancy_id, response_id)): Path<(Uuid, Uuid)>,
    Json(payload): Json<UpdateStatusPayload>,
) -> Result<impl IntoResponse> {
    let target = parse_target_status(&payload)?;
    let response = state.negotiation_service.response_by_id(response_id).await?;
    if response.vacancy_id != vacancy_id {
        return Err(Error::NotFound(
            "response not found for this vacancy".to_string(),
        ));
    }
    // Only the vacancy's owner may move a response out of pending.
    let actor = Actor::from_claims(&claims)?;
    state
        .guard_service
        .ensure_owner(&actor, Resource::Vacancy(response.vacancy_id))
        .await?;
    let updated = state
        .negotiation_service
        .set_response_status(&response, target)
        .await?;
    Ok(Json(updated))
}

#[utoipa::path(
    post,
    path = "/vacancies/{vacancy_id}/invitations",
    params(
        ("vacancy_id" = Uuid, Path, description = "Vacancy ID")
    ),
    request_body = SubmitInvitationPayload,
    responses(
        (status = 201, description = "Invitation created"),
        (status = 200, description = "Existing invitation reactivated"),
        (status = 400, description = "Missing vacancy or applicant")
    )
)]
#[axum::debug_handler]
pub async fn submit_invitation(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    Path(vacancy_id): Path<Uuid>,
    Json(payload): Json<SubmitInvitationPayload>,
) -> Result<impl IntoResponse> {
    payload.validate()?;
    let outcome = state
        .negotiation_service
        .submit_invitation(
            claims.user_id()?,
            vacancy_id,
            payload.applicant_id,
            &payload.message,
        )
        .await?;
    let status = if outcome.created {
        StatusCode::CREATED
    } else {
        StatusCode::OK
    };
    Ok((status, Json(outcome.row)))
}

#[utoipa::path(
    get,
    path = "/responses/vacancies-invited",
    responses(
        (status = 200, description = "Invitations the applicant has received")
    )
)]
#[axum::debug_handler]
pub async fn my_invitations(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
) -> Result<impl IntoResponse> {
    let items = state
        .feed_service
        .applicant_invitations(claims.user_id()?)
        .await?;
    Ok(Json(items))
}

#[utoipa::path(
    get,
    path = "/responses/vacancies-owner-invited",
    responses(
        (status = 200, description = "Invitations the owner has sent")
    )
)]
#[axum::debug_handler]
pub async fn sent_invitations(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
) -> Result<impl IntoResponse> {
    let items = state
        .feed_service
        .owner_invitations(claims.user_id()?)
        .await?;
    Ok(Json(items))
}

#[utoipa::path(
    patch,
    path = "/vacancies/{vacancy_id}/invitations/{invitation_id}",
    params(
        ("vacancy_id" = Uuid, Path, description = "Vacancy ID"),
        ("invitation_id" = Uuid, Path, description = "Invitation ID")
    ),
    request_body = UpdateStatusPayload,
    responses(
        (status = 200, description = "Status updated"),
        (status = 403, description = "Caller is not the invited applicant"),
        (status = 404, description = "Invitation not found"),
        (status = 409, description = "Illegal status transition")
    )
)]
#[axum::debug_handler]
pub async fn update_invitation_status(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    Path((vacancy_id, invitation_id)): Path<(Uuid, Uuid)>,
    Json(payload): Json<UpdateStatusPayload>,
) -> Result<impl IntoResponse> {
    let target = parse_target_status(&payload)?;
    let invitation = state
        .negotiation_service
        .invitation_by_id(invitation_id)
        .await?;
    if invitation.vacancy_id != vacancy_id {
        return Err(Error::NotFound(
            "invitation not found for this vacancy".to_string(),
        ));
    }
    // Only the invited applicant may accept or decline.
    if invitation.applicant_id != claims.user_id()? {
        return Err(Error::Forbidden(
            "only the invited applicant can update this invitation".to_string(),
        ));
    }
    let updated = state
        .negotiation_service
        .set_invitation_status(&invitation, target)
        .await?;
    Ok(Json(updated))
}
