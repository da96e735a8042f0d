use std::time::Instant;

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};

use super::client_addr;

/// Toggle for the request log line
#[derive(Debug, Clone, Copy)]
pub struct RequestLogging {
    pub enabled: bool,
}

/// Logs method, path, client, final status and elapsed milliseconds.
/// Neither the request nor the response is touched.
pub async fn request_logger(
    State(logging): State<RequestLogging>,
    request: Request,
    next: Next,
) -> Response {
    if !logging.enabled {
        return next.run(request).await;
    }

    let method = request.method().clone();
    let path = request.uri().path().to_owned();
    let client = client_addr(&request);
    let started = Instant::now();

    let response = next.run(request).await;

    tracing::info!(
        %method,
        %path,
        %client,
        status = response.status().as_u16(),
        elapsed_ms = started.elapsed().as_millis() as u64,
        "Request completed"
    );

    response
}
