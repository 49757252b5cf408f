use axum::{
    extract::{Extension, Path, State},
    http::StatusCode,
    response::{IntoResponse, Json},
};
use uuid::Uuid;
use validator::Validate;

use crate::{
    dto::chat_dto::{CreateChatPayload, PostMessagePayload},
    error::{Error, Result},
    middleware::auth::Claims,
    AppState,
};

#[utoipa::path(
    post,
    path = "/chats",
    request_body = CreateChatPayload,
    responses(
        (status = 201, description = "Chat created"),
        (status = 200, description = "Existing chat returned"),
        (status = 403, description = "Caller is not a participant")
    )
)]
#[axum::debug_handler]
pub async fn create_chat(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    Json(payload): Json<CreateChatPayload>,
) -> Result<impl IntoResponse> {
    let outcome = state
        .chat_service
        .create_or_get(&payload, claims.user_id()?)
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
    path = "/chats",
    responses(
        (status = 200, description = "Caller's chats, newest first")
    )
)]
#[axum::debug_handler]
pub async fn list_chats(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
) -> Result<impl IntoResponse> {
    let chats = state.chat_service.list_for_user(claims.user_id()?).await?;
    Ok(Json(chats))
}

#[utoipa::path(
    get,
    path = "/chats/{chat_id}/messages",
    params(
        ("chat_id" = Uuid, Path, description = "Chat ID")
    ),
    responses(
        (status = 200, description = "Messages in chronological order"),
        (status = 404, description = "Chat not found or caller not a member")
    )
)]
#[axum::debug_handler]
pub async fn list_messages(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    Path(chat_id): Path<Uuid>,
) -> Result<impl IntoResponse> {
    let user_id = claims.user_id()?;
    if !state.guard_service.is_chat_member(chat_id, user_id).await? {
        return Err(Error::NotFound("chat not found".to_string()));
    }
    let messages = state.chat_service.messages(chat_id).await?;
    Ok(Json(messages))
}

#[utoipa::path(
    post,
    path = "/chats/{chat_id}/messages",
    params(
        ("chat_id" = Uuid, Path, description = "Chat ID")
    ),
    request_body = PostMessagePayload,
    responses(
        (status = 201, description = "Message appended"),
        (status = 400, description = "Empty message"),
        (status = 403, description = "Sender is not a member")
    )
)]
#[axum::debug_handler]
pub async fn post_message(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    Path(chat_id): Path<Uuid>,
    Json(payload): Json<PostMessagePayload>,
) -> Result<impl IntoResponse> {
    payload.validate()?;
    let message = state
        .chat_service
        .post_message(chat_id, claims.user_id()?, &payload.text)
        .await?;
    Ok((StatusCode::CREATED, Json(message)))
}
