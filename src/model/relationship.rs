//! To-many relationship id sequences and named access to them.

use crate::error::StoreError;
use crate::store::{Entity, EntityTable};

/// Ordered foreign ids of one to-many relationship. Duplicates are kept.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RelationshipSet(Vec<String>);

impl RelationshipSet {
    pub fn new(ids: Vec<String>) -> Self {
        RelationshipSet(ids)
    }

    pub fn ids(&self) -> &[String] {
        &self.0
    }

    pub fn replace(&mut self, ids: Vec<String>) {
        self.0 = ids;
    }

    pub fn add(&mut self, ids: Vec<String>) {
        self.0.extend(ids);
    }

    /// Drops every occurrence of each id in `ids`; survivors keep their order.
    pub fn remove(&mut self, ids: &[String]) {
        self.0.retain(|id| !ids.contains(id));
    }

    /// Child entities in relationship order; ids without a row are skipped.
    pub fn resolve<C: Entity>(&self, children: &EntityTable<C>) -> Vec<C> {
        children.get_many(&self.0)
    }
}

impl<S: Into<String>> FromIterator<S> for RelationshipSet {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        RelationshipSet(iter.into_iter().map(Into::into).collect())
    }
}

/// Declared to-many relationship of an entity type.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RelationshipDef {
    pub name: &'static str,
    /// Resource type of the related entities.
    pub kind: &'static str,
}

/// Named access to an entity's to-many relationships. Unknown names fail with
/// `UnknownRelationship` before anything is touched.
pub trait ToMany: Entity {
    const RELATIONSHIPS: &'static [RelationshipDef];

    fn to_many(&self, name: &str) -> Result<&RelationshipSet, StoreError>;

    fn to_many_mut(&mut self, name: &str) -> Result<&mut RelationshipSet, StoreError>;

    fn relationship_def(name: &str) -> Result<RelationshipDef, StoreError> {
        Self::RELATIONSHIPS
            .iter()
            .find(|def| def.name == name)
            .copied()
            .ok_or_else(|| StoreError::unknown_relationship(Self::KIND, name))
    }

    fn replace_to_many(&mut self, name: &str, ids: Vec<String>) -> Result<(), StoreError> {
        self.to_many_mut(name)?.replace(ids);
        Ok(())
    }

    fn add_to_many(&mut self, name: &str, ids: Vec<String>) -> Result<(), StoreError> {
        self.to_many_mut(name)?.add(ids);
        Ok(())
    }

    fn remove_to_many(&mut self, name: &str, ids: &[String]) -> Result<(), StoreError> {
        self.to_many_mut(name)?.remove(ids);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Building, Floor};

    fn set(ids: &[&str]) -> RelationshipSet {
        ids.iter().copied().collect()
    }

    fn strings(ids: &[&str]) -> Vec<String> {
        ids.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn remove_drops_every_occurrence() {
        let mut ids = set(&["1", "2", "1", "3"]);
        ids.remove(&strings(&["1"]));
        assert_eq!(ids, set(&["2", "3"]));
    }

    #[test]
    fn add_appends_without_dedup() {
        let mut ids = set(&["1", "2"]);
        ids.add(strings(&["2", "4"]));
        assert_eq!(ids.ids(), strings(&["1", "2", "2", "4"]).as_slice());
    }

    #[test]
    fn replace_keeps_caller_order() {
        let mut ids = set(&["1"]);
        ids.replace(strings(&["3", "1", "3"]));
        assert_eq!(ids, set(&["3", "1", "3"]));
    }

    #[test]
    fn resolve_skips_dangling_ids() {
        let floors = EntityTable::new();
        floors.insert(Floor::new("B2"));
        floors.insert(Floor::new("G"));
        floors.delete("1").unwrap();
        let resolved = set(&["2", "1", "9"]).resolve(&floors);
        assert_eq!(resolved.len(), 1);
        assert_eq!(resolved[0].name, "G");
    }

    #[test]
    fn unknown_relationship_leaves_entity_untouched() {
        let mut building = Building::new("Jurong East");
        building.floors = set(&["1"]);
        let err = building.add_to_many("rooms", strings(&["2"])).unwrap_err();
        assert_eq!(err, StoreError::unknown_relationship("buildings", "rooms"));
        assert_eq!(building.floors, set(&["1"]));
    }

    #[test]
    fn floors_declare_no_relationships() {
        let mut floor = Floor::new("G");
        assert!(floor.to_many("buildings").is_err());
        assert!(floor.replace_to_many("buildings", Vec::new()).is_err());
        assert!(Floor::relationship_def("buildings").is_err());
    }

    #[test]
    fn relationship_def_names_related_kind() {
        let def = Building::relationship_def("floors").unwrap();
        assert_eq!(def.kind, "floors");
    }
}
