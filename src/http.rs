//! HTTP surface: the subscription select-list endpoint.
//!
//! - `GET /subscriptions` - JSON array of `{label, value}`
//!
//! The resolver does not fail; a panic while serving becomes a bare 500.

use crate::models::SubscriptionOption;
use crate::resolver::SubscriptionResolver;
use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use std::any::Any;
use std::error::Error;
use std::sync::Arc;
use tower_http::catch_panic::CatchPanicLayer;

/// Router exposing the resolver.
pub fn router(resolver: Arc<SubscriptionResolver>) -> Router {
    Router::new()
        .route("/subscriptions", get(list_subscriptions))
        .layer(CatchPanicLayer::custom(panic_response))
        .with_state(resolver)
}

async fn list_subscriptions(
    State(resolver): State<Arc<SubscriptionResolver>>,
) -> Json<Vec<SubscriptionOption>> {
    Json(resolver.resolve_as_options().await)
}

// No panic details leak into the body.
fn panic_response(_: Box<dyn Any + Send + 'static>) -> Response {
    log::error!("Panic while serving subscriptions");
    (StatusCode::INTERNAL_SERVER_ERROR, "Internal Server Error").into_response()
}

/// Bind `addr` and serve until the process exits.
pub async fn serve(resolver: Arc<SubscriptionResolver>, addr: &str) -> Result<(), Box<dyn Error>> {
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .map_err(|e| format!("Error binding {addr}: {e}"))?;
    log::info!("Azure Subscriptions service initialized, listening on {addr}");
    axum::serve(listener, router(resolver)).await?;
    Ok(())
}
