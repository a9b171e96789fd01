//! Resource facades: per-collection CRUD and relationship use cases over the store.

mod building;
mod floor;
mod resource;
pub use building::BuildingResource;
pub use floor::FloorResource;
pub use resource::{CrudResource, ToManyResource};
