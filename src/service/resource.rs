//! Capability traits the HTTP layer is written against.

use crate::error::StoreError;
use crate::model::ToMany;
use crate::store::{Entity, EntityTable, Page, PageRequest};

/// Create / read / update / delete / list over one collection.
///
/// Implementors supply the backing table and how a stored entity is turned into
/// the view handed to callers (e.g. with related entities attached).
pub trait CrudResource: Send + Sync + 'static {
    type Entity: ToMany;
    type View: Send;

    fn table(&self) -> &EntityTable<Self::Entity>;

    fn resolve(&self, entity: Self::Entity) -> Self::View;

    /// Relationship ids on `entity` are stored as given, without checking that they exist.
    fn create(&self, mut entity: Self::Entity) -> Self::Entity {
        let id = self.table().insert(entity.clone());
        entity.set_id(id);
        entity
    }

    fn find_one(&self, id: &str) -> Result<Self::View, StoreError> {
        let entity = self.table().get_one(id)?;
        Ok(self.resolve(entity))
    }

    /// Whole listing without a request, otherwise one window of it.
    fn find_all(&self, request: Option<&PageRequest>) -> Page<Self::View> {
        self.table()
            .paginated_find(request)
            .map(|entity| self.resolve(entity))
    }

    /// Full replace: relationship ids missing from `entity` are cleared.
    fn update(&self, entity: Self::Entity) -> Result<Self::Entity, StoreError> {
        self.table().update(entity.clone())?;
        Ok(entity)
    }

    /// Other entities that reference `id` keep their (now dangling) ids.
    fn delete(&self, id: &str) -> Result<(), StoreError> {
        self.table().delete(id)
    }
}

/// Read and mutate named to-many relationships of a collection's entities.
///
/// Mutations read the parent, change its id sequence and write the parent back.
/// That span is not exclusive: two mutations racing on one parent resolve as
/// last-write-wins, so callers needing strict ordering serialize per parent id.
pub trait ToManyResource: CrudResource {
    type Related: Send;

    /// Related entities in relationship order, dangling ids skipped.
    fn related(&self, id: &str, name: &str) -> Result<Vec<Self::Related>, StoreError>;

    fn relationship_ids(&self, id: &str, name: &str) -> Result<Vec<String>, StoreError> {
        let parent = self.table().get_one(id)?;
        Ok(parent.to_many(name)?.ids().to_vec())
    }

    fn replace_relationship(&self, id: &str, name: &str, ids: Vec<String>) -> Result<(), StoreError> {
        self.mutate_relationship(id, name, |parent| parent.replace_to_many(name, ids))
    }

    fn add_relationship(&self, id: &str, name: &str, ids: Vec<String>) -> Result<(), StoreError> {
        self.mutate_relationship(id, name, |parent| parent.add_to_many(name, ids))
    }

    fn remove_relationship(&self, id: &str, name: &str, ids: Vec<String>) -> Result<(), StoreError> {
        self.mutate_relationship(id, name, |parent| parent.remove_to_many(name, &ids))
    }

    fn mutate_relationship<F>(&self, id: &str, name: &str, mutate: F) -> Result<(), StoreError>
    where
        F: FnOnce(&mut Self::Entity) -> Result<(), StoreError>,
    {
        Self::Entity::relationship_def(name)?;
        let mut parent = self.table().get_one(id)?;
        mutate(&mut parent)?;
        tracing::debug!(kind = Self::Entity::KIND, id, relationship = name, "relationship changed");
        self.table().update(parent)
    }
}
