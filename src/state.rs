//! Shared application state for all routes.

use crate::config::ServerConfig;
use crate::document::Links;
use crate::service::{BuildingResource, FloorResource};
use crate::store::Store;
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub store: Store,
    pub config: Arc<ServerConfig>,
}

impl AppState {
    pub fn new(store: Store, config: ServerConfig) -> Self {
        AppState {
            store,
            config: Arc::new(config),
        }
    }

    pub fn buildings(&self) -> BuildingResource {
        BuildingResource::new(&self.store)
    }

    pub fn floors(&self) -> FloorResource {
        FloorResource::new(&self.store)
    }

    pub fn links(&self) -> Links {
        self.config.links()
    }
}

/// State of the routes of one collection: its facade plus the link builder.
pub struct ResourceState<R> {
    pub resource: Arc<R>,
    pub links: Links,
}

impl<R> ResourceState<R> {
    pub fn new(resource: R, links: Links) -> Self {
        ResourceState {
            resource: Arc::new(resource),
            links,
        }
    }
}

// Manual impl: deriving would require `R: Clone`.
impl<R> Clone for ResourceState<R> {
    fn clone(&self) -> Self {
        ResourceState {
            resource: Arc::clone(&self.resource),
            links: self.links.clone(),
        }
    }
}
