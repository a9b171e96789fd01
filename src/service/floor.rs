use crate::error::StoreError;
use crate::model::{Building, Floor};
use crate::service::CrudResource;
use crate::store::{EntityTable, Store};
use std::sync::Arc;

#[derive(Clone)]
pub struct FloorResource {
    floors: Arc<EntityTable<Floor>>,
    buildings: Arc<EntityTable<Building>>,
}

impl FloorResource {
    pub fn new(store: &Store) -> Self {
        FloorResource {
            floors: Arc::clone(&store.floors),
            buildings: Arc::clone(&store.buildings),
        }
    }

    /// Floors of one building, in the building's order. Fails only when the building is missing.
    pub fn find_by_building(&self, building_id: &str) -> Result<Vec<Floor>, StoreError> {
        let building = self.buildings.get_one(building_id)?;
        Ok(building.floors.resolve(&*self.floors))
    }
}

impl CrudResource for FloorResource {
    type Entity = Floor;
    type View = Floor;

    fn table(&self) -> &EntityTable<Floor> {
        &self.floors
    }

    fn resolve(&self, floor: Floor) -> Floor {
        floor
    }
}
