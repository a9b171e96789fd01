//! To-many relationship handlers: related resources and linkage read/replace/add/remove.

use crate::document::{identifiers, linked_ids, CollectionDocument, IdentifierDocument, RelationshipDocument, ToDocument};
use crate::error::AppError;
use crate::model::ToMany;
use crate::response;
use crate::service::ToManyResource;
use crate::state::ResourceState;
use crate::store::Entity;
use axum::{
    extract::{Path, State},
    response::Response,
    Json,
};

/// GET /{type}/{id}/{name}: the related resources themselves.
pub async fn related<R>(
    State(state): State<ResourceState<R>>,
    Path((id, name)): Path<(String, String)>,
) -> Result<Response, AppError>
where
    R: ToManyResource,
    R::Related: ToDocument,
{
    let related = state.resource.related(&id, &name)?;
    Ok(response::ok(CollectionDocument::new(&related, &state.links)))
}

/// GET /{type}/{id}/relationships/{name}: linkage only.
pub async fn linkage<R>(
    State(state): State<ResourceState<R>>,
    Path((id, name)): Path<(String, String)>,
) -> Result<Response, AppError>
where
    R: ToManyResource,
{
    let def = R::Entity::relationship_def(&name)?;
    let ids = state.resource.relationship_ids(&id, &name)?;
    Ok(response::ok(RelationshipDocument {
        data: identifiers(def.kind, &ids),
        links: state.links.relationship(R::Entity::KIND, &id, &name),
    }))
}

#[derive(Clone, Copy, Debug)]
enum Change {
    Replace,
    Add,
    Remove,
}

fn apply<R: ToManyResource>(
    state: &ResourceState<R>,
    id: &str,
    name: &str,
    body: IdentifierDocument,
    change: Change,
) -> Result<Response, AppError> {
    let def = R::Entity::relationship_def(name)?;
    let ids = linked_ids(&def, body.data)?;
    match change {
        Change::Replace => state.resource.replace_relationship(id, name, ids)?,
        Change::Add => state.resource.add_relationship(id, name, ids)?,
        Change::Remove => state.resource.remove_relationship(id, name, ids)?,
    }
    tracing::info!(kind = R::Entity::KIND, id, relationship = name, ?change, "relationship updated");
    Ok(response::no_content())
}

/// PATCH: replace the whole linkage.
pub async fn replace<R: ToManyResource>(
    State(state): State<ResourceState<R>>,
    Path((id, name)): Path<(String, String)>,
    Json(body): Json<IdentifierDocument>,
) -> Result<Response, AppError> {
    apply(&state, &id, &name, body, Change::Replace)
}

/// POST: append ids.
pub async fn add<R: ToManyResource>(
    State(state): State<ResourceState<R>>,
    Path((id, name)): Path<(String, String)>,
    Json(body): Json<IdentifierDocument>,
) -> Result<Response, AppError> {
    apply(&state, &id, &name, body, Change::Add)
}

/// DELETE: drop every occurrence of the given ids.
pub async fn remove<R: ToManyResource>(
    State(state): State<ResourceState<R>>,
    Path((id, name)): Path<(String, String)>,
    Json(body): Json<IdentifierDocument>,
) -> Result<Response, AppError> {
    apply(&state, &id, &name, body, Change::Remove)
}
