//! Collection CRUD handlers: list, create, read, update, delete.

use crate::document::{CollectionDocument, IncomingDocument, ResourceAttributes, SingleDocument, ToDocument};
use crate::error::AppError;
use crate::extractors::PageQuery;
use crate::response;
use crate::service::CrudResource;
use crate::state::ResourceState;
use crate::store::Entity;
use axum::{
    extract::{Path, State},
    response::Response,
    Json,
};

pub async fn list<R>(
    State(state): State<ResourceState<R>>,
    PageQuery(page): PageQuery,
) -> Result<Response, AppError>
where
    R: CrudResource,
    R::View: ToDocument,
{
    let found = state.resource.find_all(page.as_ref());
    let doc = match page {
        Some(request) => CollectionDocument::paginated(&found, &request, R::Entity::KIND, &state.links),
        None => CollectionDocument::new(&found.items, &state.links),
    };
    Ok(response::ok(doc))
}

pub async fn create<R>(
    State(state): State<ResourceState<R>>,
    Json(body): Json<IncomingDocument>,
) -> Result<Response, AppError>
where
    R: CrudResource,
    R::Entity: ResourceAttributes,
{
    if body.data.id.is_some() {
        return Err(AppError::BadRequest("client-generated ids are not supported".into()));
    }
    let entity: R::Entity = body.data.into_entity()?;
    let created = state.resource.create(entity);
    tracing::info!(kind = R::Entity::KIND, id = %created.id(), "created");
    Ok(response::created(SingleDocument::new(&created, &state.links)))
}

pub async fn read<R>(
    State(state): State<ResourceState<R>>,
    Path(id): Path<String>,
) -> Result<Response, AppError>
where
    R: CrudResource,
    R::View: ToDocument,
{
    let view = state.resource.find_one(&id)?;
    Ok(response::ok(SingleDocument::new(&view, &state.links)))
}

/// Full replace of the stored entity; relationships absent from the body are cleared.
pub async fn update<R>(
    State(state): State<ResourceState<R>>,
    Path(id): Path<String>,
    Json(body): Json<IncomingDocument>,
) -> Result<Response, AppError>
where
    R: CrudResource,
    R::Entity: ResourceAttributes,
{
    if let Some(body_id) = body.data.id.as_deref() {
        if body_id != id {
            return Err(AppError::Conflict(format!(
                "body id {} does not match path id {}",
                body_id, id
            )));
        }
    }
    let mut entity: R::Entity = body.data.into_entity()?;
    entity.set_id(id);
    state.resource.update(entity)?;
    Ok(response::no_content())
}

/// Answers 204 No Content with an empty body rather than a 200 with a meta document.
pub async fn delete<R>(
    State(state): State<ResourceState<R>>,
    Path(id): Path<String>,
) -> Result<Response, AppError>
where
    R: CrudResource,
{
    state.resource.delete(&id)?;
    tracing::info!(kind = R::Entity::KIND, id = %id, "deleted");
    Ok(response::no_content())
}
