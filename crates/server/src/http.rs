//! HTTP surface for follower lookups.
//!
//! `GET /api/tiktok-followers?user=<handle>&debug=1` always answers `200 OK`
//! with a [`FollowerReport`]; failures show up as `followers: null` with a
//! status and note, never as an error status. `OPTIONS` preflights are
//! answered by the CORS layer.

use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{Query, State, rejection::QueryRejection},
    http::{Method, header},
    routing::get,
};
use serde_json::{Value, json};
use tokio::net::TcpListener;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::lookup::{FollowerReport, LookupService};

/// Query string accepted by the follower endpoint.
#[derive(Debug, Default)]
pub struct FollowerQuery {
    pub user: Option<String>,
    pub username: Option<String>,
    pub debug: Option<String>,
}

impl FollowerQuery {
    /// Collect known keys from decoded pairs; the first occurrence of a key wins.
    fn from_pairs(pairs: Vec<(String, String)>) -> Self {
        let mut query = Self::default();
        for (key, value) in pairs {
            let slot = match key.as_str() {
                "user" => &mut query.user,
                "username" => &mut query.username,
                "debug" => &mut query.debug,
                _ => continue,
            };
            slot.get_or_insert(value);
        }
        query
    }

    /// `user` wins over `username`; blank values count as absent.
    fn identifier(&self) -> Option<&str> {
        non_blank(&self.user).or_else(|| non_blank(&self.username))
    }

    fn debug(&self) -> bool {
        matches!(self.debug.as_deref(), Some("1" | "true"))
    }
}

fn non_blank(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|s| !s.trim().is_empty())
}

/// Build the router with CORS and request tracing applied.
pub fn router(service: Arc<LookupService>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE]);

    Router::new()
        .route("/api/tiktok-followers", get(followers))
        .route("/healthz", get(health))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(service)
}

async fn followers(
    State(service): State<Arc<LookupService>>, query: Result<Query<Vec<(String, String)>>, QueryRejection>,
) -> Json<FollowerReport> {
    let query = match query {
        Ok(Query(pairs)) => FollowerQuery::from_pairs(pairs),
        Err(rejection) => {
            tracing::warn!("ignoring malformed query string: {rejection}");
            FollowerQuery::default()
        }
    };
    Json(service.lookup(query.identifier(), query.debug()).await)
}

async fn health() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}

/// Bind `addr` and serve until Ctrl-C.
pub async fn serve(addr: &str, service: Arc<LookupService>) -> anyhow::Result<()> {
    let listener = TcpListener::bind(addr).await?;
    tracing::info!("Local dev running: http://{}", listener.local_addr()?);
    tracing::info!("API available at: http://{}/api/tiktok-followers", listener.local_addr()?);

    axum::serve(listener, router(service))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("failed to listen for shutdown signal: {e}");
        std::future::pending::<()>().await;
    }
    tracing::info!("shutting down");
}
