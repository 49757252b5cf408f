use axum::{
    extract::State,
    response::{IntoResponse, Json},
};

use crate::{error::Result, AppState};

#[utoipa::path(
    get,
    path = "/specializations",
    responses(
        (status = 200, description = "Static specialization reference data")
    )
)]
#[axum::debug_handler]
pub async fn list_specializations(State(state): State<AppState>) -> Result<impl IntoResponse> {
    let items = state.feed_service.specializations().await?;
    Ok(Json(items))
}
