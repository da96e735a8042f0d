use axum::extract::{
    rejection::{JsonRejection, PathRejection},
    Json, Path, State,
};
use tracing::debug;

use crate::api::{ApiResponse, ApiResult};
use crate::app::AppState;
use crate::database::models::{stored_now, User, UserInput};
use crate::error::{ApiError, EMAIL_IN_USE};

use super::utils::{json_body, user_id};
use super::validation::validate_update;

/// PUT /users/:id - Replace the mutable fields of a user
///
/// `id` and `createdAt` are never touched. Optional fields missing from the
/// body are cleared.
pub async fn put(
    State(state): State<AppState>,
    path: Result<Path<i64>, PathRejection>,
    payload: Result<Json<UserInput>, JsonRejection>,
) -> ApiResult<User> {
    let id = user_id(path)?;

    let mut user = state
        .store
        .find_by_id(id)
        .await?
        .ok_or_else(|| ApiError::user_not_found(id))?;

    let valid = validate_update(json_body(payload)?)?;

    // Keeping your own email is fine
    if let Some(owner) = state.store.find_by_email(&valid.email).await? {
        if owner.id != id {
            return Err(ApiError::bad_request(EMAIL_IN_USE));
        }
    }

    user.first_name = valid.first_name;
    user.last_name = valid.last_name;
    user.email = valid.email;
    user.phone_number = valid.phone_number;
    user.department = valid.department;
    user.updated_at = Some(stored_now());

    let stored = state.store.update(&user).await?;
    debug!("Updated user {}", id);

    Ok(ApiResponse::success(stored))
}
