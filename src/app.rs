use std::sync::Arc;

use axum::{middleware::from_fn_with_state, routing::get, Router};
use tower_http::{catch_panic::CatchPanicLayer, cors::CorsLayer};

use crate::config::AppConfig;
use crate::database::UserStore;
use crate::handlers::{public, users};
use crate::middleware::{access_gate, catch_panic, request_logger, AccessPolicy, RequestLogging};

/// Shared handler state
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn UserStore>,
}

impl AppState {
    pub fn new(store: Arc<dyn UserStore>) -> Self {
        Self { store }
    }
}

/// Build the full router.
///
/// Request flow, outermost first: panic boundary, access gate, request
/// logger, handlers. A request the gate rejects is never logged by the
/// request logger.
pub fn router(state: AppState, config: &AppConfig) -> Router {
    let policy = Arc::new(AccessPolicy::from_config(&config.auth));
    let logging = RequestLogging {
        enabled: config.api.enable_request_logging,
    };

    let app = Router::new()
        // Public
        .route("/", get(public::root))
        .route("/favicon.ico", get(public::favicon))
        .route("/health", get(public::health))
        // Protected
        .merge(user_routes())
        // Later layers wrap earlier ones
        .layer(from_fn_with_state(logging, request_logger))
        .layer(from_fn_with_state(policy, access_gate))
        .layer(CatchPanicLayer::custom(catch_panic))
        .with_state(state);

    if config.security.enable_cors {
        app.layer(CorsLayer::permissive())
    } else {
        app
    }
}

fn user_routes() -> Router<AppState> {
    Router::new()
        .route("/users", get(users::user_list).post(users::user_create))
        .route(
            "/users/:id",
            get(users::user_show)
                .put(users::user_update)
                .delete(users::user_delete),
        )
}
