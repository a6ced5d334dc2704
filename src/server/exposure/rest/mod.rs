//! REST API exposure
//!
//! Consumes a `ServerHost` and produces an Axum `Router`: entity routes
//! nested under `/api`, health routes at the root, and the HTTP middleware
//! stack around everything.

pub mod users;
pub mod words;

pub use users::UserDescriptor;
pub use words::WordDescriptor;

use super::super::host::ServerHost;
use crate::server::router::apply_middleware;
use anyhow::Result;
use axum::{Json, Router, routing::get};
use serde_json::{Value, json};
use std::sync::Arc;

/// Path prefix of every entity route
pub const API_PREFIX: &str = "/api";

/// REST API exposure implementation
pub struct RestExposure;

impl RestExposure {
    /// Build the REST router from a host
    ///
    /// `custom_routes` are nested under `/api` next to the entity routes.
    pub fn build_router(host: Arc<ServerHost>, custom_routes: Vec<Router>) -> Result<Router> {
        let mut api = host.entity_registry.router();
        for custom_router in custom_routes {
            api = api.merge(custom_router);
        }

        let app = Self::health_routes().nest(API_PREFIX, api);

        Ok(apply_middleware(app, &host.config.server))
    }

    /// Build health check routes
    fn health_routes() -> Router {
        Router::new()
            .route("/health", get(Self::health_check))
            .route("/healthz", get(Self::health_check))
    }

    /// Health check endpoint handler
    async fn health_check() -> Json<Value> {
        Json(json!({
            "status": "ok",
            "service": "polyglotte"
        }))
    }
}
