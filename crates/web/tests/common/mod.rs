//! Shared harness for web integration tests.
//!
//! A small fake tourism backend runs on `127.0.0.1:0`; the app under test is
//! built with the production router and driven with `oneshot`.

#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use axum::body::Body;
use axum::extract::{Multipart, Path, Query, State};
use axum::http::{HeaderMap, Request, StatusCode};
use axum::middleware::{self, Next};
use axum::response::{IntoResponse, Response};
use axum::routing::{self, post};
use axum::{Json, Router};
use http_body_util::BodyExt;
use serde_json::{json, Value};
use tower::ServiceExt;
use tourism_client::BackendClient;
use tourism_web::config::ServerConfig;
use tourism_web::router::build_app_router;
use tourism_web::state::AppState;

pub const GOOD_TOKEN: &str = "good-token";
pub const MAPS_KEY: &str = "test-maps-key";
pub const TEST_ORIGIN: &str = "http://localhost:3001";

/// Number of places the fake `/places` listing returns.
pub const CATALOG_SIZE: i64 = 14;

// ---------------------------------------------------------------------------
// App under test
// ---------------------------------------------------------------------------

pub fn test_config(backend_url: &str) -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        backend_url: backend_url.to_string(),
        maps_api_key: Some(MAPS_KEY.to_string()),
        cors_origins: vec![TEST_ORIGIN.to_string()],
        request_timeout_secs: 30,
        backend_timeout_secs: 5,
        session_cookie_secure: false,
    }
}

/// Build the full application router against the given backend URL.
pub fn build_test_app(backend_url: &str) -> Router {
    let config = test_config(backend_url);
    let client = BackendClient::new(backend_url, Duration::from_secs(5)).unwrap();
    build_app_router(AppState {
        client,
        config: Arc::new(config),
    })
}

pub async fn send(app: Router, request: Request<Body>) -> Response {
    app.oneshot(request).await.unwrap()
}

pub async fn get(app: Router, uri: &str) -> Response {
    let request = Request::builder().uri(uri).body(Body::empty()).unwrap();
    send(app, request).await
}

/// GET with the session cookie set to `token`.
pub async fn get_with_session(app: Router, uri: &str, token: &str) -> Response {
    let request = Request::builder()
        .uri(uri)
        .header("cookie", format!("theme=dark; tourism_session={token}"))
        .body(Body::empty())
        .unwrap();
    send(app, request).await
}

pub async fn post_json(app: Router, uri: &str, body: Value) -> Response {
    let request = Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();
    send(app, request).await
}

pub async fn body_json(response: Response) -> Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

/// Build a `multipart/form-data` body from text fields and
/// `(field, file_name, content_type, bytes)` files.
pub fn multipart_body(
    boundary: &str,
    fields: &[(&str, &str)],
    files: &[(&str, &str, &str, &[u8])],
) -> Vec<u8> {
    let mut body = Vec::new();
    for (name, value) in fields {
        body.extend_from_slice(
            format!(
                "--{boundary}\r\nContent-Disposition: form-data; name=\"{name}\"\r\n\r\n{value}\r\n"
            )
            .as_bytes(),
        );
    }
    for (name, file_name, content_type, bytes) in files {
        body.extend_from_slice(
            format!(
                "--{boundary}\r\nContent-Disposition: form-data; name=\"{name}\"; filename=\"{file_name}\"\r\nContent-Type: {content_type}\r\n\r\n"
            )
            .as_bytes(),
        );
        body.extend_from_slice(bytes);
        body.extend_from_slice(b"\r\n");
    }
    body.extend_from_slice(format!("--{boundary}--\r\n").as_bytes());
    body
}

// ---------------------------------------------------------------------------
// Fake backend
// ---------------------------------------------------------------------------

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
}

pub struct FakeBackend {
    pub base_url: String,
    pub state: Arc<FakeState>,
}

impl FakeBackend {
    pub fn app(&self) -> Router {
        build_test_app(&self.base_url)
    }

    pub fn requests_to(&self, path: &str) -> Vec<Recorded> {
        self.state
            .log
            .lock()
            .unwrap()
            .iter()
            .filter(|r| r.path == path)
            .cloned()
            .collect()
    }
}

/// Place 1 is open around the clock; the others publish no hours.
pub fn place(id: i64) -> Value {
    let hours = if id == 1 {
        json!([{ "day_of_week": "Everyday", "opening_time": "00:00", "closing_time": "00:00" }])
    } else {
        json!([])
    };
    json!({
        "id": id,
        "name": format!("Place {id}"),
        "latitude": 18.70 + id as f64 / 100.0,
        "longitude": 98.90 + id as f64 / 100.0,
        "district_id": 1,
        "category_id": 1,
        "images": [{ "id": id * 10, "place_id": id, "image_path": format!("places/{id}.jpg") }],
        "operating_hours": hours,
    })
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

async fn record(State(state): State<Arc<FakeState>>, request: Request<Body>, next: Next) -> Response {
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

async fn list_places() -> Json<Value> {
    let places: Vec<Value> = (1..=CATALOG_SIZE).map(place).collect();
    Json(json!({ "data": places }))
}

async fn random_places(Query(params): Query<HashMap<String, String>>) -> Json<Value> {
    let limit: i64 = params.get("limit").and_then(|l| l.parse().ok()).unwrap_or(3);
    let places: Vec<Value> = (1..=limit.min(CATALOG_SIZE)).map(place).collect();
    Json(Value::Array(places))
}

async fn currently_open() -> Json<Value> {
    Json(json!([place(1)]))
}

async fn nearby_by_coordinates() -> Json<Value> {
    let mut far = place(2);
    far["distance_km"] = json!(3.0);
    let mut near = place(1);
    near["distance_km"] = json!(1.0);
    Json(json!([far, near]))
}

async fn get_place(Path(id): Path<i64>) -> Response {
    if id == 404 {
        return (StatusCode::NOT_FOUND, Json(json!({ "message": "Place not found" })))
            .into_response();
    }
    Json(place(id)).into_response()
}

/// Id 7 has a broken neighbour lookup.
async fn nearby_by_place(Path(id): Path<i64>) -> Response {
    if id == 7 {
        return (StatusCode::INTERNAL_SERVER_ERROR, "geo index offline").into_response();
    }
    Json(json!([place(id), place(3)])).into_response()
}

async fn search(Query(params): Query<HashMap<String, String>>) -> Json<Value> {
    let mut hit = place(10);
    hit["echo"] = json!(params);
    Json(json!({ "data": [hit] }))
}

async fn districts() -> Json<Value> {
    Json(json!([{ "id": 1, "name": "Mueang" }, { "id": 2, "name": "Mae Rim" }]))
}

async fn categories() -> Json<Value> {
    Json(json!([{ "id": 1, "name": "Tourist attraction" }]))
}

async fn seasons() -> Json<Value> {
    Json(json!([{ "id": 1, "name": "Cool season" }]))
}

async fn real_time_seasons() -> Json<Value> {
    Json(json!([{ "id": 1, "name": "Cool season", "places": [place(2)] }]))
}

async fn attractions() -> Json<Value> {
    Json(json!([place(1), place(2), place(3)]))
}

async fn empty_list() -> Json<Value> {
    Json(json!([]))
}

async fn login(Json(body): Json<Value>) -> Response {
    if body["password"] == "secret" {
        Json(json!({
            "token": GOOD_TOKEN,
            "user": { "id": 1, "username": body["username"], "role": "admin" }
        }))
        .into_response()
    } else {
        (StatusCode::UNAUTHORIZED, Json(json!({ "message": "Invalid credentials" })))
            .into_response()
    }
}

async fn register(Json(body): Json<Value>) -> Response {
    (
        StatusCode::CREATED,
        Json(json!({ "data": { "id": 2, "username": body["username"] } })),
    )
        .into_response()
}

async fn profile(headers: HeaderMap) -> Response {
    if !authorized(&headers) {
        return unauthorized();
    }
    Json(json!({ "id": 1, "username": "admin", "role": "admin" })).into_response()
}

async fn admin_list_places(headers: HeaderMap) -> Response {
    if !authorized(&headers) {
        return unauthorized();
    }
    Json(json!([place(1), place(2)])).into_response()
}

async fn admin_create_place(headers: HeaderMap, mut multipart: Multipart) -> Response {
    if !authorized(&headers) {
        return unauthorized();
    }
    let mut fields = serde_json::Map::new();
    let mut files = Vec::new();
    while let Some(field) = multipart.next_field().await.unwrap() {
        let name = field.name().unwrap_or_default().to_string();
        if let Some(file_name) = field.file_name().map(str::to_string) {
            files.push(json!({ "field": name, "file_name": file_name }));
            field.bytes().await.unwrap();
        } else {
            fields.insert(name, json!(field.text().await.unwrap()));
        }
    }
    (
        StatusCode::CREATED,
        Json(json!({
            "id": 99,
            "name": fields.get("name").cloned().unwrap_or_default(),
            "received_fields": fields,
            "received_files": files,
        })),
    )
        .into_response()
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

async fn admin_districts(headers: HeaderMap) -> Response {
    if !authorized(&headers) {
        return unauthorized();
    }
    districts().await.into_response()
}

async fn admin_categories(headers: HeaderMap) -> Response {
    if !authorized(&headers) {
        return unauthorized();
    }
    categories().await.into_response()
}

async fn admin_seasons(headers: HeaderMap) -> Response {
    if !authorized(&headers) {
        return unauthorized();
    }
    seasons().await.into_response()
}

/// A district named "Mueang" already exists.
async fn admin_create_district(headers: HeaderMap, Json(mut body): Json<Value>) -> Response {
    if !authorized(&headers) {
        return unauthorized();
    }
    if body["name"] == "Mueang" {
        return (
            StatusCode::CONFLICT,
            Json(json!({ "message": "District already exists" })),
        )
            .into_response();
    }
    body["id"] = json!(50);
    (StatusCode::CREATED, Json(json!({ "data": body }))).into_response()
}

fn backend_router(state: Arc<FakeState>) -> Router {
    Router::new()
        .route("/", routing::get(|| async { "tourism backend" }))
        .route("/places", routing::get(list_places))
        .route("/places/random", routing::get(random_places))
        .route("/places/currently-open", routing::get(currently_open))
        .route("/places/nearby-by-coordinates", routing::get(nearby_by_coordinates))
        .route("/places/{id}", routing::get(get_place))
        .route("/places/{id}/nearby", routing::get(nearby_by_place))
        .route("/search", routing::get(search))
        .route("/districts", routing::get(districts))
        .route("/categories", routing::get(categories))
        .route("/seasons", routing::get(seasons))
        .route("/seasons/real-time", routing::get(real_time_seasons))
        .route("/tourist-attractions", routing::get(attractions))
        .route("/accommodations", routing::get(empty_list))
        .route("/restaurants", routing::get(empty_list))
        .route("/souvenir-shops", routing::get(empty_list))
        .route("/auth/login", post(login))
        .route("/auth/register", post(register))
        .route("/auth/profile", routing::get(profile))
        .route(
            "/admin/place",
            routing::get(admin_list_places).post(admin_create_place),
        )
        .route("/admin/place/{id}", axum::routing::delete(admin_delete))
        .route(
            "/admin/districts",
            routing::get(admin_districts).post(admin_create_district),
        )
        .route("/admin/districts/{id}", axum::routing::delete(admin_delete))
        .route("/admin/categories", routing::get(admin_categories))
        .route("/admin/seasons", routing::get(admin_seasons))
        .layer(middleware::from_fn_with_state(Arc::clone(&state), record))
        .with_state(state)
}

/// Start the fake backend on an ephemeral port.
pub async fn spawn_backend() -> FakeBackend {
    let state = Arc::new(FakeState::default());
    let app = backend_router(Arc::clone(&state));

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
