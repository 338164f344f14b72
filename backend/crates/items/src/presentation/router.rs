//! Items Routers
//!
//! Two routers: the public surface (create, list, lookup) and the
//! protected surface (update, delete). The binary layers the bearer
//! middleware onto the protected router before merging, so token
//! verification happens before any gated handler runs.

use axum::{
    Router,
    extract::DefaultBodyLimit,
    routing::{get, put},
};
use std::sync::Arc;

/// Multipart bodies carry image payloads; leave headroom above the
/// configured per-image cap
const BODY_LIMIT_BYTES: usize = 10 * 1024 * 1024;

use crate::application::config::ItemsConfig;
use crate::domain::gateway::ImageStore;
use crate::domain::repository::ItemRepository;
use crate::infra::cloudinary::CloudinaryImageStore;
use crate::infra::postgres::PgItemRepository;
use crate::presentation::handlers::{self, ItemsAppState};

/// Public item routes with the production repository and gateway
pub fn items_public_router(
    repo: PgItemRepository,
    images: CloudinaryImageStore,
    config: ItemsConfig,
) -> Router {
    items_public_router_generic(repo, images, config)
}

/// Protected item routes with the production repository and gateway
pub fn items_protected_router(
    repo: PgItemRepository,
    images: CloudinaryImageStore,
    config: ItemsConfig,
) -> Router {
    items_protected_router_generic(repo, images, config)
}

/// Public item routes for any repository/gateway implementation
pub fn items_public_router_generic<R, G>(repo: R, images: G, config: ItemsConfig) -> Router
where
    R: ItemRepository + Clone + Send + Sync + 'static,
    G: ImageStore + Clone + Send + Sync + 'static,
{
    let state = ItemsAppState {
        repo: Arc::new(repo),
        images: Arc::new(images),
        config: Arc::new(config),
    };

    Router::new()
        .route(
            "/",
            get(handlers::list_items::<R, G>).post(handlers::create_item::<R, G>),
        )
        .route("/{unique_link}", get(handlers::get_item::<R, G>))
        .layer(DefaultBodyLimit::max(BODY_LIMIT_BYTES))
        .with_state(state)
}

/// Protected item routes for any repository/gateway implementation
pub fn items_protected_router_generic<R, G>(repo: R, images: G, config: ItemsConfig) -> Router
where
    R: ItemRepository + Clone + Send + Sync + 'static,
    G: ImageStore + Clone + Send + Sync + 'static,
{
    let state = ItemsAppState {
        repo: Arc::new(repo),
        images: Arc::new(images),
        config: Arc::new(config),
    };

    Router::new()
        .route(
            "/{unique_link}",
            put(handlers::update_item::<R, G>).delete(handlers::delete_item::<R, G>),
        )
        .layer(DefaultBodyLimit::max(BODY_LIMIT_BYTES))
        .with_state(state)
}
