use axum::body::{to_bytes, Body};
use axum::http::{header, Request, StatusCode};
use axum::Router;
use building_api::{app, AppState, ServerConfig, Store};
use serde_json::{json, Value};
use tower::ServiceExt;

const JSONAPI: &str = "application/vnd.api+json";

fn test_app() -> Router {
    app(AppState::new(Store::new(), ServerConfig::default()))
}

async fn send(app: &Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    let body = match body {
        Some(value) => {
            builder = builder.header(header::CONTENT_TYPE, JSONAPI);
            Body::from(serde_json::to_vec(&value).unwrap())
        }
        None => Body::empty(),
    };
    let resp = app.clone().oneshot(builder.body(body).unwrap()).await.unwrap();
    let status = resp.status();
    let bytes = to_bytes(resp.into_body(), usize::MAX).await.unwrap();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, value)
}

fn floors_links(id: &str) -> Value {
    json!({
        "related": format!("http://localhost:31415/v0/buildings/{}/floors", id),
        "self": format!("http://localhost:31415/v0/buildings/{}/relationships/floors", id)
    })
}

async fn create_building(app: &Router, address: &str) -> Value {
    let (status, body) = send(
        app,
        "POST",
        "/v0/buildings",
        Some(json!({ "data": { "type": "buildings", "attributes": { "address": address } } })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    body
}

async fn create_floor(app: &Router, name: &str) -> Value {
    let (status, body) = send(
        app,
        "POST",
        "/v0/floors",
        Some(json!({ "data": { "type": "floors", "attributes": { "name": name } } })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    body
}

async fn replace_floors(app: &Router, ids: &[&str]) {
    let data: Vec<Value> = ids.iter().map(|id| json!({ "type": "floors", "id": id })).collect();
    let (status, _) = send(
        app,
        "PATCH",
        "/v0/buildings/1/relationships/floors",
        Some(json!({ "data": data })),
    )
    .await;
    assert_eq!(status, StatusCode::NO_CONTENT);
}

#[tokio::test]
async fn creates_a_building() {
    let app = test_app();
    let body = create_building(&app, "Jurong East").await;
    assert_eq!(
        body,
        json!({
            "data": {
                "id": "1",
                "type": "buildings",
                "attributes": { "address": "Jurong East" },
                "relationships": {
                    "floors": { "data": [], "links": floors_links("1") }
                }
            }
        })
    );
}

#[tokio::test]
async fn creates_a_floor() {
    let app = test_app();
    let body = create_floor(&app, "B2").await;
    assert_eq!(
        body,
        json!({ "data": { "id": "1", "type": "floors", "attributes": { "name": "B2" } } })
    );
}

#[tokio::test]
async fn paginates_buildings_by_offset() {
    let app = test_app();
    create_building(&app, "Jurong East").await;
    create_building(&app, "Jurong West").await;

    let (status, body) = send(&app, "GET", "/v0/buildings?page[limit]=1&page[offset]=1", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!({
            "links": {
                "first": "http://localhost:31415/v0/buildings?page[limit]=1&page[offset]=0",
                "prev": "http://localhost:31415/v0/buildings?page[limit]=1&page[offset]=0"
            },
            "meta": { "total": 2 },
            "data": [{
                "type": "buildings",
                "id": "2",
                "attributes": { "address": "Jurong West" },
                "relationships": {
                    "floors": { "data": [], "links": floors_links("2") }
                }
            }]
        })
    );
}

#[tokio::test]
async fn page_number_and_offset_select_the_same_window() {
    let app = test_app();
    for address in ["A", "B", "C", "D"] {
        create_building(&app, address).await;
    }
    let (_, by_number) = send(&app, "GET", "/v0/buildings?page[number]=1&page[size]=2", None).await;
    let (_, by_offset) = send(&app, "GET", "/v0/buildings?page[limit]=2&page[offset]=0", None).await;
    assert_eq!(by_number["data"], by_offset["data"]);
    assert_eq!(by_number["meta"]["total"], 4);

    let (status, beyond) = send(&app, "GET", "/v0/buildings?page[limit]=10&page[offset]=10", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(beyond["data"], json!([]));
    assert_eq!(beyond["meta"]["total"], 4);
}

#[tokio::test]
async fn huge_page_values_are_clamped() {
    let app = test_app();
    create_floor(&app, "B2").await;
    create_floor(&app, "G").await;

    let (status, body) = send(
        &app,
        "GET",
        "/v0/floors?page[number]=1&page[size]=9223372036854775807",
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"].as_array().unwrap().len(), 2);
    assert_eq!(body["meta"]["total"], 2);
    assert!(body.get("links").is_none());

    let (status, body) = send(
        &app,
        "GET",
        "/v0/floors?page[limit]=1&page[offset]=9223372036854775807",
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"], json!([]));
    assert_eq!(
        body["links"]["prev"],
        "http://localhost:31415/v0/floors?page[limit]=1&page[offset]=9223372036854775806"
    );
}

#[tokio::test]
async fn page_number_below_one_links_forward() {
    let app = test_app();
    for name in ["B2", "B1", "G", "L1"] {
        create_floor(&app, name).await;
    }
    let (status, body) = send(&app, "GET", "/v0/floors?page[number]=-3&page[size]=2", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"][0]["id"], "1");
    assert_eq!(
        body["links"],
        json!({
            "next": "http://localhost:31415/v0/floors?page[number]=2&page[size]=2",
            "last": "http://localhost:31415/v0/floors?page[number]=2&page[size]=2"
        })
    );
}

#[tokio::test]
async fn rejects_non_numeric_pagination() {
    let app = test_app();
    let (status, body) = send(&app, "GET", "/v0/buildings?page[number]=one&page[size]=2", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["errors"][0]["code"], "invalid_parameter");
}

#[tokio::test]
async fn creates_a_building_with_floors() {
    let app = test_app();
    create_floor(&app, "B2").await;
    let (status, body) = send(
        &app,
        "POST",
        "/v0/buildings",
        Some(json!({
            "data": {
                "type": "buildings",
                "attributes": { "address": "Jurong East" },
                "relationships": {
                    "floors": { "data": [{ "id": "1", "type": "floors" }] }
                }
            }
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(
        body["data"]["relationships"]["floors"]["data"],
        json!([{ "id": "1", "type": "floors" }])
    );
}

#[tokio::test]
async fn replaces_floors_and_includes_them() {
    let app = test_app();
    create_building(&app, "Jurong East").await;
    create_floor(&app, "B2").await;
    replace_floors(&app, &["1"]).await;

    let (status, body) = send(&app, "GET", "/v0/buildings/1", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!({
            "data": {
                "attributes": { "address": "Jurong East" },
                "id": "1",
                "relationships": {
                    "floors": {
                        "data": [{ "id": "1", "type": "floors" }],
                        "links": floors_links("1")
                    }
                },
                "type": "buildings"
            },
            "included": [{ "attributes": { "name": "B2" }, "id": "1", "type": "floors" }]
        })
    );
}

#[tokio::test]
async fn removes_a_floor_from_a_building() {
    let app = test_app();
    create_building(&app, "Jurong East").await;
    create_floor(&app, "B2").await;
    replace_floors(&app, &["1"]).await;

    let (status, _) = send(
        &app,
        "DELETE",
        "/v0/buildings/1/relationships/floors",
        Some(json!({ "data": [{ "type": "floors", "id": "1" }] })),
    )
    .await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (_, body) = send(&app, "GET", "/v0/buildings/1", None).await;
    assert_eq!(body["data"]["relationships"]["floors"]["data"], json!([]));
    assert!(body.get("included").is_none());
}

#[tokio::test]
async fn adds_a_floor_to_a_building() {
    let app = test_app();
    create_building(&app, "Jurong East").await;
    create_floor(&app, "B2").await;

    let (status, _) = send(
        &app,
        "POST",
        "/v0/buildings/1/relationships/floors",
        Some(json!({ "data": [{ "type": "floors", "id": "1" }] })),
    )
    .await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (_, body) = send(&app, "GET", "/v0/buildings/1", None).await;
    assert_eq!(
        body["data"]["relationships"]["floors"]["data"],
        json!([{ "id": "1", "type": "floors" }])
    );
    assert_eq!(
        body["included"],
        json!([{ "attributes": { "name": "B2" }, "id": "1", "type": "floors" }])
    );
}

#[tokio::test]
async fn loads_floors_of_a_building_directly() {
    let app = test_app();
    create_building(&app, "Jurong East").await;
    create_floor(&app, "B2").await;
    replace_floors(&app, &["1"]).await;
    create_floor(&app, "G").await;

    let (_, all) = send(&app, "GET", "/v0/floors", None).await;
    assert_eq!(
        all,
        json!({
            "data": [
                { "attributes": { "name": "B2" }, "id": "1", "type": "floors" },
                { "attributes": { "name": "G" }, "id": "2", "type": "floors" }
            ]
        })
    );

    let (status, related) = send(&app, "GET", "/v0/buildings/1/floors", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        related,
        json!({ "data": [{ "type": "floors", "id": "1", "attributes": { "name": "B2" } }] })
    );

    let (status, linkage) = send(&app, "GET", "/v0/buildings/1/relationships/floors", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        linkage,
        json!({ "data": [{ "id": "1", "type": "floors" }], "links": floors_links("1") })
    );
}

#[tokio::test]
async fn update_replaces_attributes_and_relationships() {
    let app = test_app();
    create_building(&app, "Jurong East").await;
    create_floor(&app, "B2").await;
    replace_floors(&app, &["1"]).await;

    let (status, _) = send(
        &app,
        "PATCH",
        "/v0/buildings/1",
        Some(json!({ "data": { "type": "buildings", "id": "1", "attributes": { "address": "Jurong West" } } })),
    )
    .await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (_, body) = send(&app, "GET", "/v0/buildings/1", None).await;
    assert_eq!(body["data"]["attributes"]["address"], "Jurong West");
    assert_eq!(body["data"]["relationships"]["floors"]["data"], json!([]));
}

#[tokio::test]
async fn update_rejects_mismatched_id_and_type() {
    let app = test_app();
    create_building(&app, "Jurong East").await;

    let (status, _) = send(
        &app,
        "PATCH",
        "/v0/buildings/1",
        Some(json!({ "data": { "type": "buildings", "id": "2", "attributes": {} } })),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);

    let (status, _) = send(
        &app,
        "PATCH",
        "/v0/buildings/1",
        Some(json!({ "data": { "type": "floors", "attributes": {} } })),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);

    let (status, _) = send(
        &app,
        "PATCH",
        "/v0/buildings/7",
        Some(json!({ "data": { "type": "buildings", "attributes": {} } })),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn delete_is_permanent() {
    let app = test_app();
    create_floor(&app, "B2").await;

    let (status, _) = send(&app, "DELETE", "/v0/floors/1", None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (status, body) = send(&app, "GET", "/v0/floors/1", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["errors"][0]["status"], "404");

    let (status, _) = send(&app, "DELETE", "/v0/floors/1", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let created = create_floor(&app, "G").await;
    assert_eq!(created["data"]["id"], "2");
}

#[tokio::test]
async fn unknown_relationship_is_not_found() {
    let app = test_app();
    create_building(&app, "Jurong East").await;

    let (status, body) = send(&app, "GET", "/v0/buildings/1/relationships/rooms", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["errors"][0]["code"], "unknown_relationship");

    let (status, _) = send(&app, "GET", "/v0/buildings/1/rooms", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn dangling_floor_ids_are_skipped() {
    let app = test_app();
    create_building(&app, "Jurong East").await;
    create_floor(&app, "B2").await;
    replace_floors(&app, &["1", "5"]).await;

    let (status, body) = send(&app, "GET", "/v0/buildings/1", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["relationships"]["floors"]["data"].as_array().unwrap().len(), 2);
    assert_eq!(body["included"].as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn ready_reports_counts() {
    let app = test_app();
    create_building(&app, "Jurong East").await;
    create_floor(&app, "B2").await;
    create_floor(&app, "G").await;

    let (status, body) = send(&app, "GET", "/ready", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "status": "ok", "buildings": 1, "floors": 2 }));
}
