//! HTTP handlers for collection CRUD and to-many relationships.

pub mod entity;
pub mod relationship;
