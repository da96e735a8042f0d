use axum::extract::{rejection::JsonRejection, Json, State};
use tracing::debug;

use crate::api::{ApiResponse, ApiResult};
use crate::app::AppState;
use crate::database::models::{stored_now, NewUser, User, UserInput};
use crate::error::{ApiError, EMAIL_IN_USE};

use super::utils::json_body;
use super::validation::validate_create;

/// POST /users - Create a user
///
/// The server assigns `id` and `createdAt`; `updatedAt` stays null until the
/// first update. Responds 201 with `Location: /users/{id}`.
pub async fn post(
    State(state): State<AppState>,
    payload: Result<Json<UserInput>, JsonRejection>,
) -> ApiResult<User> {
    let valid = validate_create(json_body(payload)?)?;

    if state.store.find_by_email(&valid.email).await?.is_some() {
        return Err(ApiError::bad_request(EMAIL_IN_USE));
    }

    let user = state
        .store
        .insert(NewUser {
            first_name: valid.first_name,
            last_name: valid.last_name,
            email: valid.email,
            phone_number: valid.phone_number,
            department: valid.department,
            created_at: stored_now(),
        })
        .await?;

    debug!("Created user {}", user.id);

    let location = format!("/users/{}", user.id);
    Ok(ApiResponse::created(user, location))
}
