use axum::extract::{rejection::PathRejection, Path, State};

use crate::api::{ApiResponse, ApiResult};
use crate::app::AppState;
use crate::database::models::User;
use crate::error::ApiError;

use super::utils::user_id;

/// GET /users/:id - Get a single user by primary key
pub async fn get(
    State(state): State<AppState>,
    path: Result<Path<i64>, PathRejection>,
) -> ApiResult<User> {
    let id = user_id(path)?;

    let user = state
        .store
        .find_by_id(id)
        .await?
        .ok_or_else(|| ApiError::user_not_found(id))?;

    Ok(ApiResponse::success(user))
}
