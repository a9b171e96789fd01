//! Service routes outside the JSON:API prefix: health, readiness, version, info.

use crate::model::{Building, Floor};
use crate::state::AppState;
use crate::store::Entity;
use axum::{extract::State, routing::get, Json, Router};
use serde::Serialize;

#[derive(Serialize)]
struct HealthBody {
    status: &'static str,
}

#[derive(Serialize)]
struct ReadyBody {
    status: &'static str,
    buildings: usize,
    floors: usize,
}

#[derive(Serialize)]
struct VersionBody {
    name: &'static str,
    version: &'static str,
}

#[derive(Serialize)]
struct InfoBody {
    #[serde(flatten)]
    version: VersionBody,
    base_url: String,
    collections: Vec<String>,
}

const VERSION: VersionBody = VersionBody {
    name: env!("CARGO_PKG_NAME"),
    version: env!("CARGO_PKG_VERSION"),
};

async fn health() -> Json<HealthBody> {
    Json(HealthBody { status: "ok" })
}

/// Always ready once serving; the counts come from the live tables.
async fn ready(State(state): State<AppState>) -> Json<ReadyBody> {
    Json(ReadyBody {
        status: "ok",
        buildings: state.store.buildings.len(),
        floors: state.store.floors.len(),
    })
}

async fn version() -> Json<VersionBody> {
    Json(VERSION)
}

async fn info(State(state): State<AppState>) -> Json<InfoBody> {
    let links = state.links();
    Json(InfoBody {
        version: VERSION,
        base_url: state.config.base_url.clone(),
        collections: [Building::KIND, Floor::KIND]
            .iter()
            .map(|kind| links.collection(kind))
            .collect(),
    })
}

/// GET /health, /ready, /version and /info.
pub fn common_routes(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/ready", get(ready))
        .route("/version", get(version))
        .route("/info", get(info))
        .with_state(state)
}
