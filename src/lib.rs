//! Building API: JSON:API backend for buildings and their floors over a
//! concurrent in-memory store.

pub mod config;
pub mod document;
pub mod error;
pub mod extractors;
pub mod handlers;
pub mod model;
pub mod response;
pub mod routes;
pub mod service;
pub mod state;
pub mod store;

pub use config::ServerConfig;
pub use error::{AppError, ConfigError, StoreError};
pub use model::{Building, BuildingView, Floor, RelationshipSet, ToMany};
pub use routes::{app, common_routes, entity_routes};
pub use service::{BuildingResource, CrudResource, FloorResource, ToManyResource};
pub use state::{AppState, ResourceState};
pub use store::{Entity, EntityTable, Page, PageRequest, Store};
