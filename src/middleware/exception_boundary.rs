use std::any::Any;

use axum::response::{IntoResponse, Response};

use crate::error::ApiError;

/// Panic handler for `CatchPanicLayer`: whatever blew up downstream becomes
/// the uniform 500 body, with the panic payload as `details`.
pub fn catch_panic(err: Box<dyn Any + Send + 'static>) -> Response {
    let details = if let Some(s) = err.downcast_ref::<String>() {
        s.to_string()
    } else if let Some(s) = err.downcast_ref::<&str>() {
        s.to_string()
    } else {
        "<unknown>".into()
    };

    ApiError::internal(details).into_response()
}
