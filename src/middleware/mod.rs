pub mod access_gate;
pub mod exception_boundary;
pub mod request_logger;

use std::net::SocketAddr;

use axum::extract::{ConnectInfo, Request};

pub use access_gate::{access_gate, AccessDenied, AccessPolicy};
pub use exception_boundary::catch_panic;
pub use request_logger::{request_logger, RequestLogging};

/// Peer address when the server was started with connect info
pub(crate) fn client_addr(request: &Request) -> String {
    request
        .extensions()
        .get::<ConnectInfo<SocketAddr>>()
        .map(|ConnectInfo(addr)| addr.to_string())
        .unwrap_or_else(|| "unknown".to_string())
}
