use crate::error::StoreError;
use crate::model::{Building, BuildingView, Floor, ToMany};
use crate::service::{CrudResource, ToManyResource};
use crate::store::{EntityTable, Store};
use std::sync::Arc;

/// Buildings, read together with their floors.
#[derive(Clone)]
pub struct BuildingResource {
    buildings: Arc<EntityTable<Building>>,
    floors: Arc<EntityTable<Floor>>,
}

impl BuildingResource {
    pub fn new(store: &Store) -> Self {
        BuildingResource {
            buildings: Arc::clone(&store.buildings),
            floors: Arc::clone(&store.floors),
        }
    }
}

impl CrudResource for BuildingResource {
    type Entity = Building;
    type View = BuildingView;

    fn table(&self) -> &EntityTable<Building> {
        &self.buildings
    }

    fn resolve(&self, building: Building) -> BuildingView {
        let floors = building.floors.resolve(&*self.floors);
        BuildingView { building, floors }
    }
}

impl ToManyResource for BuildingResource {
    type Related = Floor;

    fn related(&self, id: &str, name: &str) -> Result<Vec<Floor>, StoreError> {
        let building = self.buildings.get_one(id)?;
        Ok(building.to_many(name)?.resolve(&*self.floors))
    }
}
