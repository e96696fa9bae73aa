//! In-process fake of the tourism backend for client integration tests.
//!
//! Binds an axum router on `127.0.0.1:0` and records every request so tests
//! can assert on paths, query strings and the `Authorization` header.

#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use axum::extract::{Multipart, Path, Query, Request, State};
use axum::http::{HeaderMap, StatusCode};
use axum::middleware::{self, Next};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post, put};
use axum::{Json, Router};
use serde_json::{json, Value};
use tourism_client::BackendClient;

pub const GOOD_TOKEN: &str = "good-token";

#[derive(Debug, Clone)]
pub struct Recorded {
    pub method: String,
    pub path: String,
    pub query: Option<String>,
    pub authorization: Option<String>,
}

#[derive(Default)]
pub struct FakeState {
    pub log: Mutex<Vec<Recorded>>,
    pub fail_seasons: AtomicBool,
    pub fail_nearby: AtomicBool,
}

pub struct FakeBackend {
    pub base_url: String,
    pub state: Arc<FakeState>,
}

impl FakeBackend {
    pub fn client(&self) -> BackendClient {
        BackendClient::new(&self.base_url, Duration::from_secs(5)).unwrap()
    }

    pub fn admin_client(&self) -> BackendClient {
        self.client().with_token(GOOD_TOKEN)
    }

    pub fn requests(&self) -> Vec<Recorded> {
        self.state.log.lock().unwrap().clone()
    }

    pub fn requests_to(&self, path: &str) -> Vec<Recorded> {
        self.requests()
            .into_iter()
            .filter(|r| r.path == path)
            .collect()
    }
}

pub fn place(id: i64, name: &str, coords: Option<(f64, f64)>, image: Option<&str>) -> Value {
    let mut value = json!({
        "id": id,
        "name": name,
        "description": format!("{name} description"),
        "district_id": 1,
        "category_id": 1,
        "images": image.map(|p| vec![json!({ "id": id * 10, "place_id": id, "image_path": p })]).unwrap_or_default(),
        "operating_hours": [
            { "day_of_week": "Everyday", "opening_time": "08:00:00", "closing_time": "17:00:00" }
        ]
    });
    if let Some((lat, lng)) = coords {
        value["latitude"] = json!(lat);
        value["longitude"] = json!(lng);
    }
    value
}

fn doi_suthep() -> Value {
    place(1, "Doi Suthep", Some((18.8048, 98.9216)), Some("places/1.jpg"))
}

fn night_bazaar() -> Value {
    place(2, "Night Bazaar", Some((18.7850, 99.0000)), Some("https://cdn.test/2.jpg"))
}

/// Sends its empty lists as `null`.
fn riverside_hotel() -> Value {
    let mut value = place(3, "Riverside Hotel", None, None);
    value["images"] = Value::Null;
    value["operating_hours"] = Value::Null;
    value["seasons"] = Value::Null;
    value
}

fn authorized(headers: &HeaderMap) -> bool {
    headers
        .get("authorization")
        .and_then(|v| v.to_str().ok())
        .is_some_and(|v| v == format!("Bearer {GOOD_TOKEN}"))
}

fn unauthorized() -> Response {
    (StatusCode::UNAUTHORIZED, Json(json!({ "message": "Unauthorized" }))).into_response()
}

async fn record(State(state): State<Arc<FakeState>>, request: Request, next: Next) -> Response {
    let recorded = Recorded {
        method: request.method().to_string(),
        path: request.uri().path().to_string(),
        query: request.uri().query().map(str::to_string),
        authorization: request
            .headers()
            .get("authorization")
            .and_then(|v| v.to_str().ok())
            .map(str::to_string),
    };
    state.log.lock().unwrap().push(recorded);
    next.run(request).await
}

// ---------------------------------------------------------------------------
// Public handlers
// ---------------------------------------------------------------------------

async fn list_places() -> Json<Value> {
    Json(json!({ "data": [doi_suthep(), night_bazaar()] }))
}

async fn get_place(Path(id): Path<i64>) -> Response {
    if id == 404 {
        return (StatusCode::NOT_FOUND, Json(json!({ "message": "Place not found" })))
            .into_response();
    }
    let mut value = doi_suthep();
    value["id"] = json!(id);
    Json(value).into_response()
}

async fn random_places(Query(params): Query<HashMap<String, String>>) -> Json<Value> {
    let limit: usize = params.get("limit").and_then(|l| l.parse().ok()).unwrap_or(3);
    let all = vec![doi_suthep(), night_bazaar(), riverside_hotel()];
    Json(Value::Array(all.into_iter().take(limit).collect()))
}

async fn currently_open() -> Json<Value> {
    Json(json!([night_bazaar()]))
}

async fn nearby_by_coordinates(
    State(state): State<Arc<FakeState>>,
) -> Response {
    if state.fail_nearby.load(Ordering::SeqCst) {
        return StatusCode::INTERNAL_SERVER_ERROR.into_response();
    }
    let mut far = doi_suthep();
    far["distance_km"] = json!(7.0);
    // Night Bazaar has no distance in the reply; the client computes it.
    Json(json!([far, night_bazaar()])).into_response()
}

async fn nearby_by_place(Path(id): Path<i64>) -> Json<Value> {
    let mut same = doi_suthep();
    same["id"] = json!(id);
    Json(json!([same, night_bazaar()]))
}

async fn search(Query(params): Query<HashMap<String, String>>) -> Json<Value> {
    let mut result = place(10, "Search hit", Some((18.7, 98.9)), Some("/uploads/hit.jpg"));
    result["echo"] = json!(params);
    Json(json!({ "data": [result] }))
}

async fn districts() -> Json<Value> {
    Json(json!([{ "id": 1, "name": "Mueang" }, { "id": 2, "name": "Mae Rim" }]))
}

async fn categories() -> Json<Value> {
    Json(json!([{ "id": 1, "name": "Tourist attraction" }, { "id": 2, "name": "Restaurant" }]))
}

async fn seasons(State(state): State<Arc<FakeState>>) -> Response {
    if state.fail_seasons.load(Ordering::SeqCst) {
        return (StatusCode::INTERNAL_SERVER_ERROR, "seasons table locked").into_response();
    }
    Json(json!([{ "id": 1, "name": "Cool season", "date_start": "2026-11-01", "date_end": "2027-02-28" }]))
        .into_response()
}

async fn real_time_seasons() -> Json<Value> {
    Json(json!([{ "id": 1, "name": "Cool season", "places": [doi_suthep()] }]))
}

async fn attractions() -> Json<Value> {
    Json(json!([doi_suthep()]))
}

async fn accommodations() -> Json<Value> {
    Json(json!([riverside_hotel()]))
}

async fn restaurants() -> Json<Value> {
    // Doi Suthep also appears here; the map must keep a single marker for it.
    Json(json!([night_bazaar(), doi_suthep()]))
}

async fn souvenir_shops() -> Json<Value> {
    Json(json!([]))
}

// ---------------------------------------------------------------------------
// Auth handlers
// ---------------------------------------------------------------------------

async fn login(Json(body): Json<Value>) -> Response {
    if body["password"] == "secret" {
        Json(json!({
            "token": GOOD_TOKEN,
            "user": { "id": 1, "username": body["username"], "role": "admin" }
        }))
        .into_response()
    } else {
        unauthorized()
    }
}

async fn register(Json(body): Json<Value>) -> Response {
    (
        StatusCode::CREATED,
        Json(json!({ "data": { "id": 2, "username": body["username"], "email": body["email"] } })),
    )
        .into_response()
}

async fn profile(headers: HeaderMap) -> Response {
    if !authorized(&headers) {
        return unauthorized();
    }
    Json(json!({ "id": 1, "username": "admin", "role": "admin" })).into_response()
}

// ---------------------------------------------------------------------------
// Admin handlers
// ---------------------------------------------------------------------------

async fn read_multipart(mut multipart: Multipart) -> (serde_json::Map<String, Value>, Vec<Value>) {
    let mut fields = serde_json::Map::new();
    let mut files = Vec::new();
    while let Some(field) = multipart.next_field().await.unwrap() {
        let name = field.name().unwrap_or_default().to_string();
        if let Some(file_name) = field.file_name().map(str::to_string) {
            let content_type = field.content_type().unwrap_or_default().to_string();
            let bytes = field.bytes().await.unwrap();
            files.push(json!({ "field": name, "file_name": file_name, "content_type": content_type, "len": bytes.len() }));
        } else {
            fields.insert(name, json!(field.text().await.unwrap()));
        }
    }
    (fields, files)
}

async fn create_place(headers: HeaderMap, multipart: Multipart) -> Response {
    if !authorized(&headers) {
        return unauthorized();
    }
    let (fields, files) = read_multipart(multipart).await;
    (
        StatusCode::CREATED,
        Json(json!({
            "id": 99,
            "name": fields.get("name").cloned().unwrap_or_default(),
            "images": [{ "id": 1, "place_id": 99, "image_path": "new.jpg" }],
            "received_fields": fields,
            "received_files": files,
        })),
    )
        .into_response()
}

async fn update_place(headers: HeaderMap, Path(id): Path<i64>, multipart: Multipart) -> Response {
    if !authorized(&headers) {
        return unauthorized();
    }
    let (fields, files) = read_multipart(multipart).await;
    Json(json!({
        "id": id,
        "name": fields.get("name").cloned().unwrap_or_default(),
        "received_fields": fields,
        "received_files": files,
    }))
    .into_response()
}

async fn admin_list_places(headers: HeaderMap) -> Response {
    if !authorized(&headers) {
        return unauthorized();
    }
    Json(json!([doi_suthep(), night_bazaar(), riverside_hotel()])).into_response()
}

async fn admin_get_place(headers: HeaderMap, Path(id): Path<i64>) -> Response {
    if !authorized(&headers) {
        return unauthorized();
    }
    get_place(Path(id)).await
}

/// Deletes succeed for id 1 and fail with 500 for anything else.
async fn admin_delete(headers: HeaderMap, Path(id): Path<i64>) -> Response {
    if !authorized(&headers) {
        return unauthorized();
    }
    if id == 1 {
        StatusCode::NO_CONTENT.into_response()
    } else {
        (StatusCode::INTERNAL_SERVER_ERROR, "delete failed").into_response()
    }
}

async fn upload_images(headers: HeaderMap, multipart: Multipart) -> Response {
    if !authorized(&headers) {
        return unauthorized();
    }
    let (fields, files) = read_multipart(multipart).await;
    let place_id: i64 = fields
        .get("place_id")
        .and_then(Value::as_str)
        .and_then(|s| s.parse().ok())
        .unwrap_or_default();
    let images: Vec<Value> = files
        .iter()
        .enumerate()
        .map(|(i, f)| {
            json!({
                "id": 100 + i as i64,
                "place_id": place_id,
                "image_path": format!("uploads/{}", f["file_name"].as_str().unwrap_or_default()),
            })
        })
        .collect();
    (StatusCode::CREATED, Json(json!({ "data": images }))).into_response()
}

async fn admin_lookup_list(
    headers: HeaderMap,
    State(state): State<Arc<FakeState>>,
    uri: axum::http::Uri,
) -> Response {
    if !authorized(&headers) {
        return unauthorized();
    }
    match uri.path() {
        "/admin/districts" => districts().await.into_response(),
        "/admin/categories" => categories().await.into_response(),
        "/admin/seasons" => seasons(State(state)).await,
        "/admin/time" => Json(json!([
            { "id": 1, "place_id": 1, "day_of_week": "Monday", "opening_time": "09:00", "closing_time": "18:00" }
        ]))
        .into_response(),
        "/admin/seasons-relation" => Json(json!([{ "id": 1, "season_id": 1, "place_id": 1 }])).into_response(),
        _ => StatusCode::NOT_FOUND.into_response(),
    }
}

async fn admin_create_json(headers: HeaderMap, Json(mut body): Json<Value>) -> Response {
    if !authorized(&headers) {
        return unauthorized();
    }
    body["id"] = json!(50);
    (StatusCode::CREATED, Json(json!({ "data": body }))).into_response()
}

async fn admin_update_json(
    headers: HeaderMap,
    Path(id): Path<i64>,
    Json(mut body): Json<Value>,
) -> Response {
    if !authorized(&headers) {
        return unauthorized();
    }
    body["id"] = json!(id);
    Json(body).into_response()
}

pub fn router(state: Arc<FakeState>) -> Router {
    let mut router = Router::new()
        .route("/", get(|| async { "tourism backend" }))
        .route("/places", get(list_places))
        .route("/places/random", get(random_places))
        .route("/places/currently-open", get(currently_open))
        .route("/places/nearby-by-coordinates", get(nearby_by_coordinates))
        .route("/places/{id}", get(get_place))
        .route("/places/{id}/nearby", get(nearby_by_place))
        .route("/search", get(search))
        .route("/districts", get(districts))
        .route("/categories", get(categories))
        .route("/seasons", get(seasons))
        .route("/seasons/real-time", get(real_time_seasons))
        .route("/tourist-attractions", get(attractions))
        .route("/accommodations", get(accommodations))
        .route("/restaurants", get(restaurants))
        .route("/souvenir-shops", get(souvenir_shops))
        .route("/auth/login", post(login))
        .route("/auth/register", post(register))
        .route("/auth/profile", get(profile))
        .route("/admin/place", get(admin_list_places).post(create_place))
        .route(
            "/admin/place/{id}",
            get(admin_get_place).put(update_place).delete(admin_delete),
        )
        .route("/admin/images", post(upload_images))
        .route("/admin/images/{id}", axum::routing::delete(admin_delete));

    for path in [
        "/admin/districts",
        "/admin/categories",
        "/admin/seasons",
        "/admin/time",
        "/admin/seasons-relation",
    ] {
        router = router
            .route(path, get(admin_lookup_list).post(admin_create_json))
            .route(
                &format!("{path}/{{id}}"),
                put(admin_update_json).delete(admin_delete),
            );
    }

    router
        .layer(middleware::from_fn_with_state(Arc::clone(&state), record))
        .with_state(state)
}

/// Start the fake backend on an ephemeral port.
pub async fn spawn_backend() -> FakeBackend {
    let state = Arc::new(FakeState::default());
    let app = router(Arc::clone(&state));

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    FakeBackend {
        base_url: format!("http://{addr}"),
        state,
    }
}
