//! Entity types stored by the API and their relationship plumbing.

mod building;
mod floor;
pub mod relationship;

pub use building::{Building, BuildingAttributes, BuildingView, FLOORS};
pub use floor::{Floor, FloorAttributes};
pub use relationship::{RelationshipDef, RelationshipSet, ToMany};
