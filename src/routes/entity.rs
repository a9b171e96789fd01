//! Collection routes, generic over the resource facade.

use crate::document::{ResourceAttributes, ToDocument};
use crate::handlers::{entity, relationship};
use crate::model::{Building, Floor};
use crate::service::{CrudResource, ToManyResource};
use crate::state::{AppState, ResourceState};
use crate::store::Entity;
use axum::{routing::get, Router};

/// `/` list + create, `/:id` read + update + delete.
pub fn resource_routes<R>(state: ResourceState<R>) -> Router
where
    R: CrudResource,
    R::Entity: ResourceAttributes,
    R::View: ToDocument,
{
    Router::new()
        .route("/", get(entity::list::<R>).post(entity::create::<R>))
        .route(
            "/:id",
            get(entity::read::<R>)
                .patch(entity::update::<R>)
                .delete(entity::delete::<R>),
        )
        .with_state(state)
}

/// `/:id/:name` related resources, `/:id/relationships/:name` linkage.
pub fn to_many_routes<R>(state: ResourceState<R>) -> Router
where
    R: ToManyResource,
    R::Related: ToDocument,
{
    Router::new()
        .route("/:id/:name", get(relationship::related::<R>))
        .route(
            "/:id/relationships/:name",
            get(relationship::linkage::<R>)
                .patch(relationship::replace::<R>)
                .post(relationship::add::<R>)
                .delete(relationship::remove::<R>),
        )
        .with_state(state)
}

/// All collections under `/{prefix}`.
pub fn entity_routes(state: &AppState) -> Router {
    let links = state.links();
    let buildings = ResourceState::new(state.buildings(), links.clone());
    let floors = ResourceState::new(state.floors(), links);
    let prefix = &state.config.prefix;

    Router::new()
        .nest(
            &collection_path(prefix, Building::KIND),
            resource_routes(buildings.clone()).merge(to_many_routes(buildings)),
        )
        .nest(&collection_path(prefix, Floor::KIND), resource_routes(floors))
}

fn collection_path(prefix: &str, kind: &str) -> String {
    if prefix.is_empty() {
        format!("/{}", kind)
    } else {
        format!("/{}/{}", prefix, kind)
    }
}
