use axum::extract::{rejection::PathRejection, Path, State};
use serde_json::{json, Value};
use tracing::debug;

use crate::api::{ApiResponse, ApiResult};
use crate::app::AppState;
use crate::error::ApiError;

use super::utils::user_id;

/// DELETE /users/:id - Hard delete, no soft-delete or audit trail
pub async fn delete(
    State(state): State<AppState>,
    path: Result<Path<i64>, PathRejection>,
) -> ApiResult<Value> {
    let id = user_id(path)?;

    let user = state
        .store
        .find_by_id(id)
        .await?
        .ok_or_else(|| ApiError::user_not_found(id))?;

    state.store.delete(&user).await?;
    debug!("Deleted user {}", id);

    Ok(ApiResponse::success(json!({ "message": "User deleted successfully." })))
}
