use crate::document::ResourceAttributes;
use crate::error::StoreError;
use crate::model::relationship::{RelationshipDef, RelationshipSet, ToMany};
use crate::store::Entity;
use serde::{Deserialize, Serialize};

/// Floor of a building.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Floor {
    pub id: String,
    pub name: String,
}

impl Floor {
    pub fn new(name: impl Into<String>) -> Self {
        Floor {
            id: String::new(),
            name: name.into(),
        }
    }
}

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct FloorAttributes {
    #[serde(default)]
    pub name: String,
}

impl Entity for Floor {
    const KIND: &'static str = "floors";

    fn id(&self) -> &str {
        &self.id
    }

    fn set_id(&mut self, id: String) {
        self.id = id;
    }
}

impl ToMany for Floor {
    const RELATIONSHIPS: &'static [RelationshipDef] = &[];

    fn to_many(&self, name: &str) -> Result<&RelationshipSet, StoreError> {
        Err(StoreError::unknown_relationship(Self::KIND, name))
    }

    fn to_many_mut(&mut self, name: &str) -> Result<&mut RelationshipSet, StoreError> {
        Err(StoreError::unknown_relationship(Self::KIND, name))
    }
}

impl ResourceAttributes for Floor {
    type Attributes = FloorAttributes;

    fn attributes(&self) -> FloorAttributes {
        FloorAttributes {
            name: self.name.clone(),
        }
    }

    fn from_attributes(attributes: FloorAttributes) -> Self {
        Floor::new(attributes.name)
    }
}
