//! HTTP surface: routes, handlers, and the JSON envelope.

pub mod handlers;
pub mod response;

use std::any::Any;

use axum::{
    extract::Request,
    response::{IntoResponse, Response},
    routing::get,
    Router,
};
use tower_http::{catch_panic::CatchPanicLayer, trace::TraceLayer};
use tracing::{debug_span, error, Span};

use crate::clients::UserClient;
use crate::error::ApiError;

pub use handlers::*;
pub use response::ApiResponse;

/// Builds the full application router around a user client.
pub fn router(client: UserClient) -> Router {
    Router::new()
        .route("/", get(hello))
        .route("/health", get(health_check))
        .route("/api/users", get(list_users).post(create_user))
        .route(
            "/api/users/:id",
            get(get_user).put(update_user).delete(delete_user),
        )
        .fallback(not_found)
        .with_state(client)
        .layer(CatchPanicLayer::custom(handle_panic))
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(|request: &Request| {
                    debug_span!(
                        "http_request",
                        method = ?request.method(),
                        uri = ?request.uri(),
                    )
                })
                .on_request(|request: &Request, _span: &Span| {
                    tracing::info!("{} {}", request.method(), request.uri());
                })
                .on_response(
                    |response: &Response, latency: std::time::Duration, _span: &Span| {
                        tracing::debug!(
                            status = response.status().as_u16(),
                            "finished processing request in {:?}",
                            latency
                        )
                    },
                ),
        )
}

/// Turns a handler panic into the standard 500 envelope.
pub fn handle_panic(err: Box<dyn Any + Send + 'static>) -> Response {
    let detail = if let Some(s) = err.downcast_ref::<String>() {
        s.clone()
    } else if let Some(s) = err.downcast_ref::<&str>() {
        s.to_string()
    } else {
        "unknown panic".to_string()
    };
    error!(panic = %detail, "Handler panicked");
    ApiError::Internal(detail).into_response()
}
