use crate::document::{Links, ResourceAttributes, ResourceObject, ToDocument};
use crate::error::StoreError;
use crate::model::relationship::{RelationshipDef, RelationshipSet, ToMany};
use crate::model::Floor;
use crate::store::Entity;
use serde::{Deserialize, Serialize};

pub const FLOORS: &str = "floors";

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Building {
    pub id: String,
    pub address: String,
    pub floors: RelationshipSet,
}

impl Building {
    pub fn new(address: impl Into<String>) -> Self {
        Building {
            address: address.into(),
            ..Building::default()
        }
    }
}

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct BuildingAttributes {
    #[serde(default)]
    pub address: String,
}

impl Entity for Building {
    const KIND: &'static str = "buildings";

    fn id(&self) -> &str {
        &self.id
    }

    fn set_id(&mut self, id: String) {
        self.id = id;
    }
}

impl ToMany for Building {
    const RELATIONSHIPS: &'static [RelationshipDef] = &[RelationshipDef {
        name: FLOORS,
        kind: Floor::KIND,
    }];

    fn to_many(&self, name: &str) -> Result<&RelationshipSet, StoreError> {
        match name {
            FLOORS => Ok(&self.floors),
            _ => Err(StoreError::unknown_relationship(Self::KIND, name)),
        }
    }

    fn to_many_mut(&mut self, name: &str) -> Result<&mut RelationshipSet, StoreError> {
        match name {
            FLOORS => Ok(&mut self.floors),
            _ => Err(StoreError::unknown_relationship(Self::KIND, name)),
        }
    }
}

impl ResourceAttributes for Building {
    type Attributes = BuildingAttributes;

    fn attributes(&self) -> BuildingAttributes {
        BuildingAttributes {
            address: self.address.clone(),
        }
    }

    fn from_attributes(attributes: BuildingAttributes) -> Self {
        Building::new(attributes.address)
    }
}

/// A building with its floors resolved. Built per read, never stored.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BuildingView {
    pub building: Building,
    pub floors: Vec<Floor>,
}

impl ToDocument for BuildingView {
    fn to_resource(&self, links: &Links) -> ResourceObject {
        self.building.to_resource(links)
    }

    fn included(&self, links: &Links) -> Vec<ResourceObject> {
        self.floors.iter().map(|floor| floor.to_resource(links)).collect()
    }
}
