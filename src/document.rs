//! JSON:API documents: resource objects, relationship linkage, links and the
//! incoming payloads for create/update and relationship routes.

use crate::error::AppError;
use crate::model::{RelationshipDef, ToMany};
use crate::store::{Entity, Page, PageRequest};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::{BTreeMap, HashSet};

pub const JSONAPI_MEDIA_TYPE: &str = "application/vnd.api+json";

/// `{type, id}` pair used in relationship linkage.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ResourceIdentifier {
    #[serde(rename = "type")]
    pub kind: String,
    pub id: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct RelationshipLinks {
    #[serde(rename = "self")]
    pub self_link: String,
    pub related: String,
}

#[derive(Clone, Debug, Serialize)]
pub struct RelationshipObject {
    pub data: Vec<ResourceIdentifier>,
    pub links: RelationshipLinks,
}

#[derive(Clone, Debug, Serialize)]
pub struct ResourceObject {
    #[serde(rename = "type")]
    pub kind: String,
    pub id: String,
    pub attributes: Value,
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub relationships: BTreeMap<String, RelationshipObject>,
}

/// Builds absolute URLs below `{base_url}/{prefix}`.
#[derive(Clone, Debug)]
pub struct Links {
    root: String,
}

impl Links {
    pub fn new(base_url: &str, prefix: &str) -> Self {
        let base_url = base_url.trim_end_matches('/');
        let prefix = prefix.trim_matches('/');
        let root = if prefix.is_empty() {
            base_url.to_string()
        } else {
            format!("{}/{}", base_url, prefix)
        };
        Links { root }
    }

    pub fn collection(&self, kind: &str) -> String {
        format!("{}/{}", self.root, kind)
    }

    pub fn relationship(&self, kind: &str, id: &str, name: &str) -> RelationshipLinks {
        RelationshipLinks {
            self_link: format!("{}/{}/{}/relationships/{}", self.root, kind, id, name),
            related: format!("{}/{}/{}/{}", self.root, kind, id, name),
        }
    }

    pub fn page(&self, kind: &str, request: &PageRequest) -> String {
        let query: Vec<String> = request
            .query_pairs()
            .iter()
            .map(|(key, value)| format!("{}={}", key, value))
            .collect();
        format!("{}?{}", self.collection(kind), query.join("&"))
    }
}

/// Entities whose scalar fields travel as a JSON:API `attributes` object.
pub trait ResourceAttributes: ToMany {
    type Attributes: Serialize + DeserializeOwned;

    fn attributes(&self) -> Self::Attributes;

    fn from_attributes(attributes: Self::Attributes) -> Self;
}

/// Anything that renders as a primary resource, optionally with included resources.
pub trait ToDocument {
    fn to_resource(&self, links: &Links) -> ResourceObject;

    fn included(&self, _links: &Links) -> Vec<ResourceObject> {
        Vec::new()
    }
}

impl<E: ResourceAttributes> ToDocument for E {
    fn to_resource(&self, links: &Links) -> ResourceObject {
        let relationships = E::RELATIONSHIPS
            .iter()
            .filter_map(|def| {
                let ids = self.to_many(def.name).ok()?;
                let object = RelationshipObject {
                    data: identifiers(def.kind, ids.ids()),
                    links: links.relationship(E::KIND, self.id(), def.name),
                };
                Some((def.name.to_string(), object))
            })
            .collect();
        let attributes = serde_json::to_value(self.attributes()).unwrap_or_else(|e| {
            tracing::error!(kind = E::KIND, id = %self.id(), error = %e, "attributes failed to serialize");
            Value::Object(Default::default())
        });
        ResourceObject {
            kind: E::KIND.to_string(),
            id: self.id().to_string(),
            attributes,
            relationships,
        }
    }
}

pub fn identifiers(kind: &str, ids: &[String]) -> Vec<ResourceIdentifier> {
    ids.iter()
        .map(|id| ResourceIdentifier {
            kind: kind.to_string(),
            id: id.clone(),
        })
        .collect()
}

#[derive(Debug, Serialize)]
pub struct SingleDocument {
    pub data: ResourceObject,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub included: Vec<ResourceObject>,
}

impl SingleDocument {
    pub fn new<V: ToDocument>(view: &V, links: &Links) -> Self {
        SingleDocument {
            data: view.to_resource(links),
            included: dedup(view.included(links)),
        }
    }
}

#[derive(Debug, Default, PartialEq, Eq, Serialize)]
pub struct PageLinks {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub first: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub prev: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub next: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct PageMeta {
    pub total: usize,
}

#[derive(Debug, Serialize)]
pub struct CollectionDocument {
    pub data: Vec<ResourceObject>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub included: Vec<ResourceObject>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub links: Option<PageLinks>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub meta: Option<PageMeta>,
}

impl CollectionDocument {
    pub fn new<V: ToDocument>(views: &[V], links: &Links) -> Self {
        CollectionDocument {
            data: views.iter().map(|v| v.to_resource(links)).collect(),
            included: dedup(views.iter().flat_map(|v| v.included(links)).collect()),
            links: None,
            meta: None,
        }
    }

    /// Collection window with first/prev/next/last links and the total count.
    pub fn paginated<V: ToDocument>(
        page: &Page<V>,
        request: &PageRequest,
        kind: &str,
        links: &Links,
    ) -> Self {
        let neighbours = request.neighbours(page.total);
        let url = |r: Option<PageRequest>| r.map(|r| links.page(kind, &r));
        let page_links = PageLinks {
            first: url(neighbours.first),
            prev: url(neighbours.prev),
            next: url(neighbours.next),
            last: url(neighbours.last),
        };
        let mut doc = CollectionDocument::new(&page.items, links);
        doc.links = (page_links != PageLinks::default()).then_some(page_links);
        doc.meta = Some(PageMeta { total: page.total });
        doc
    }
}

/// Linkage of one relationship, served on `/relationships/{name}`.
#[derive(Debug, Serialize)]
pub struct RelationshipDocument {
    pub data: Vec<ResourceIdentifier>,
    pub links: RelationshipLinks,
}

#[derive(Debug, Deserialize)]
pub struct IncomingDocument {
    pub data: IncomingResource,
}

#[derive(Debug, Deserialize)]
pub struct IncomingResource {
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub attributes: Option<Value>,
    #[serde(default)]
    pub relationships: BTreeMap<String, IncomingRelationship>,
}

#[derive(Debug, Deserialize)]
pub struct IncomingRelationship {
    pub data: Vec<ResourceIdentifier>,
}

/// Body of relationship PATCH/POST/DELETE: `{"data": [{type, id}, ...]}`.
#[derive(Debug, Deserialize)]
pub struct IdentifierDocument {
    pub data: Vec<ResourceIdentifier>,
}

impl IncomingResource {
    /// Builds an entity of type `E`. The payload type must be `E::KIND`; relationship
    /// ids are taken as given. The id, if any, is left to the caller.
    pub fn into_entity<E: ResourceAttributes>(self) -> Result<E, AppError> {
        if self.kind != E::KIND {
            return Err(AppError::Conflict(format!(
                "resource type {} does not match collection {}",
                self.kind,
                E::KIND
            )));
        }
        let attributes = match self.attributes {
            Some(Value::Null) | None => Value::Object(Default::default()),
            Some(value) => value,
        };
        let attributes: E::Attributes = serde_json::from_value(attributes)
            .map_err(|e| AppError::BadRequest(format!("invalid attributes: {}", e)))?;
        let mut entity = E::from_attributes(attributes);
        for (name, relationship) in self.relationships {
            let def = E::relationship_def(&name).map_err(|e| AppError::BadRequest(e.to_string()))?;
            let ids = linked_ids(&def, relationship.data)?;
            entity.replace_to_many(&name, ids)?;
        }
        Ok(entity)
    }
}

/// Ids from linkage data, checking every identifier has the related type.
pub fn linked_ids(def: &RelationshipDef, data: Vec<ResourceIdentifier>) -> Result<Vec<String>, AppError> {
    data.into_iter()
        .map(|identifier| {
            if identifier.kind == def.kind {
                Ok(identifier.id)
            } else {
                Err(AppError::Conflict(format!(
                    "relationship {} expects type {}, got {}",
                    def.name, def.kind, identifier.kind
                )))
            }
        })
        .collect()
}

fn dedup(resources: Vec<ResourceObject>) -> Vec<ResourceObject> {
    let mut seen = HashSet::new();
    resources
        .into_iter()
        .filter(|r| seen.insert((r.kind.clone(), r.id.clone())))
        .collect()
}
