//! Process-resident storage: one table per collection.

pub mod pagination;
mod table;

pub use pagination::{paginate, Page, PageNeighbours, PageRequest};
pub use table::{Entity, EntityTable};

use crate::model::{Building, Floor};
use std::sync::Arc;

/// All tables of the API. Built once at startup and shared by handle.
#[derive(Clone, Default)]
pub struct Store {
    pub buildings: Arc<EntityTable<Building>>,
    pub floors: Arc<EntityTable<Floor>>,
}

impl Store {
    pub fn new() -> Self {
        Store::default()
    }
}
