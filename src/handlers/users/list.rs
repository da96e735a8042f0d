use axum::extract::State;

use crate::api::{ApiResponse, ApiResult};
use crate::app::AppState;
use crate::database::models::User;

/// GET /users - Every stored user, unfiltered
pub async fn get(State(state): State<AppState>) -> ApiResult<Vec<User>> {
    let users = state.store.find_all().await?;
    Ok(ApiResponse::success(users))
}
