//! HTTP front end for `pipemock-core`.
//!
//! Every request outside `/__admin` is replayed against the active routes of
//! a shared [`MocksController`]. The admin API switches collections, merges
//! single routes and clears the active set at runtime.

pub mod error;
pub mod handlers;
pub mod telemetry;

use anyhow::Context;
use axum::{
    routing::{get, put},
    Router,
};
use pipemock_core::config::{load_collections, load_routes};
use pipemock_core::fixtures::tasks;
use pipemock_core::mocks::{MocksController, MocksManager};
use std::sync::Arc;
use tokio::sync::RwLock;
use tower_http::trace::TraceLayer;

pub const ADMIN_PREFIX: &str = "/__admin";

/// Shared server state.
#[derive(Clone)]
pub struct AppState {
    pub controller: Arc<RwLock<MocksController>>,
}

impl AppState {
    pub fn new(controller: MocksController) -> Self {
        Self {
            controller: Arc::new(RwLock::new(controller)),
        }
    }
}

pub fn build_router(state: AppState) -> Router {
    let admin = Router::new()
        .route(
            "/routes",
            get(handlers::list_routes)
                .put(handlers::use_routes)
                .delete(handlers::clear_routes),
        )
        .route("/collection/{id}", put(handlers::use_collection))
        .method_not_allowed_fallback(handlers::admin_method_not_allowed)
        .fallback(handlers::admin_not_found);

    Router::new()
        .nest(ADMIN_PREFIX, admin)
        .fallback(handlers::replay)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Build a controller from route and collection files.
///
/// Without a routes pattern the built-in tasks scenario is registered and,
/// unless `collection` names another one, activated.
pub fn load_controller(
    routes: Option<&str>,
    collections: Option<&str>,
    collection: Option<&str>,
) -> anyhow::Result<MocksController> {
    let mut manager = MocksManager::new();

    match routes {
        Some(pattern) => manager.add_routes(
            load_routes(pattern).with_context(|| format!("loading routes from {pattern}"))?,
        ),
        None => tasks::register(&mut manager),
    }
    if let Some(pattern) = collections {
        manager.add_collections(
            load_collections(pattern)
                .with_context(|| format!("loading collections from {pattern}"))?,
        );
    }

    let mut controller = MocksController::new(manager);
    let active = collection.or(routes.is_none().then_some(tasks::COLLECTION_ID));
    if let Some(collection_id) = active {
        controller
            .use_collection(collection_id)
            .with_context(|| format!("activating collection {collection_id}"))?;
    }
    Ok(controller)
}
