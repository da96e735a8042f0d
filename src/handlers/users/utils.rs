use axum::extract::rejection::{JsonRejection, PathRejection};
use axum::extract::{Json, Path};

use crate::error::ApiError;

/// Unwrap the `{id}` segment, answering non-integers with a JSON 400
pub fn user_id(path: Result<Path<i64>, PathRejection>) -> Result<i64, ApiError> {
    path.map(|Path(id)| id)
        .map_err(|_| ApiError::bad_request("User ID must be an integer."))
}

/// Unwrap a JSON body, answering malformed payloads with a JSON 400
pub fn json_body<T>(payload: Result<Json<T>, JsonRejection>) -> Result<T, ApiError> {
    payload
        .map(|Json(body)| body)
        .map_err(|rejection| {
            ApiError::bad_request(format!("Invalid request body: {}", rejection.body_text()))
        })
}
