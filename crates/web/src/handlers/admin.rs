//! Admin dashboard handlers.
//!
//! Every handler takes a [`Session`]; the backend enforces the admin role
//! and its 401/403 replies pass through unchanged.

use std::collections::HashSet;

use axum::extract::{Multipart, Path};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use serde::Serialize;
use tourism_client::admin::AdminResource;
use tourism_core::forms::{
    NamedForm, OperatingHourForm, OperatingHourInput, PlaceForm, SeasonForm, SeasonRelationForm,
    UploadFile,
};
use tourism_core::types::DbId;

use crate::error::{AppError, AppResult};
use crate::middleware::session::Session;
use crate::response::DataResponse;

// ---------------------------------------------------------------------------
// Multipart
// ---------------------------------------------------------------------------

/// Text fields and files pulled out of a place form upload.
#[derive(Debug, Default)]
struct PlaceUpload {
    name: Option<String>,
    description: Option<String>,
    latitude: Option<String>,
    longitude: Option<String>,
    location_link: Option<String>,
    district_id: Option<String>,
    category_id: Option<String>,
    season_ids: Vec<String>,
    operating_hours: Option<String>,
    images: Vec<UploadFile>,
}

async fn read_place_upload(mut multipart: Multipart) -> AppResult<PlaceUpload> {
    let mut upload = PlaceUpload::default();

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::BadRequest(e.to_string()))?
    {
        let name = field.name().unwrap_or("").to_string();
        if name == "images" || name == "images[]" {
            if let Some(file) = read_file(field).await? {
                upload.images.push(file);
            }
            continue;
        }

        let text = field
            .text()
            .await
            .map_err(|e| AppError::BadRequest(e.to_string()))?;
        match name.as_str() {
            "name" => upload.name = Some(text),
            "description" => upload.description = Some(text),
            "latitude" => upload.latitude = Some(text),
            "longitude" => upload.longitude = Some(text),
            "location_link" => upload.location_link = Some(text),
            "district_id" => upload.district_id = Some(text),
            "category_id" => upload.category_id = Some(text),
            "season_ids" | "season_ids[]" => upload.season_ids.push(text),
            "operating_hours" => upload.operating_hours = Some(text),
            _ => {}
        }
    }

    Ok(upload)
}

/// Read one file part. Empty parts (a file input left blank) are skipped.
async fn read_file(field: axum::extract::multipart::Field<'_>) -> AppResult<Option<UploadFile>> {
    let file_name = field.file_name().unwrap_or("upload").to_string();
    let content_type = field
        .content_type()
        .unwrap_or("application/octet-stream")
        .to_string();
    let bytes = field
        .bytes()
        .await
        .map_err(|e| AppError::BadRequest(e.to_string()))?;

    if bytes.is_empty() {
        return Ok(None);
    }
    Ok(Some(UploadFile {
        file_name,
        content_type,
        bytes: bytes.to_vec(),
    }))
}

fn non_empty(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn parse_number<T: std::str::FromStr>(field: &str, value: Option<String>) -> AppResult<Option<T>> {
    non_empty(value)
        .map(|v| {
            v.parse::<T>()
                .map_err(|_| AppError::BadRequest(format!("'{field}' must be a number")))
        })
        .transpose()
}

fn required_id(field: &str, value: Option<String>) -> AppResult<DbId> {
    parse_number(field, value)?
        .ok_or_else(|| AppError::BadRequest(format!("Missing required '{field}' field")))
}

/// Season ids arrive either as one JSON array (`[1,2]`) or as repeated fields.
/// Duplicates are dropped; first-seen order is kept.
fn parse_season_ids(values: Vec<String>) -> AppResult<Vec<DbId>> {
    let mut ids = Vec::new();
    for value in values {
        let value = value.trim();
        if value.is_empty() {
            continue;
        }
        if value.starts_with('[') {
            let parsed: Vec<DbId> = serde_json::from_str(value)
                .map_err(|e| AppError::BadRequest(format!("Invalid 'season_ids': {e}")))?;
            ids.extend(parsed);
        } else {
            ids.push(
                value
                    .parse()
                    .map_err(|_| AppError::BadRequest("'season_ids' must be numbers".into()))?,
            );
        }
    }
    let mut seen = HashSet::new();
    ids.retain(|id| seen.insert(*id));
    Ok(ids)
}

fn parse_operating_hours(value: Option<String>) -> AppResult<Vec<OperatingHourInput>> {
    match non_empty(value) {
        Some(json) => serde_json::from_str(&json)
            .map_err(|e| AppError::BadRequest(format!("Invalid 'operating_hours': {e}"))),
        None => Ok(Vec::new()),
    }
}

impl PlaceUpload {
    fn into_form(self) -> AppResult<PlaceForm> {
        Ok(PlaceForm {
            name: self.name.unwrap_or_default(),
            description: non_empty(self.description),
            latitude: parse_number("latitude", self.latitude)?,
            longitude: parse_number("longitude", self.longitude)?,
            location_link: non_empty(self.location_link),
            district_id: required_id("district_id", self.district_id)?,
            category_id: required_id("category_id", self.category_id)?,
            season_ids: parse_season_ids(self.season_ids)?,
            operating_hours: parse_operating_hours(self.operating_hours)?,
            images: self.images,
        })
    }
}

// ---------------------------------------------------------------------------
// Places
// ---------------------------------------------------------------------------

/// GET /api/v1/admin/places
pub async fn list_places(session: Session) -> AppResult<impl IntoResponse> {
    let places = session.client.admin_list_places().await?;
    Ok(Json(DataResponse { data: places }))
}

/// GET /api/v1/admin/places/{id}
pub async fn get_place(session: Session, Path(id): Path<DbId>) -> AppResult<impl IntoResponse> {
    let place = session.client.admin_get_place(id).await?;
    Ok(Json(DataResponse { data: place }))
}

/// POST /api/v1/admin/places (multipart)
pub async fn create_place(
    session: Session,
    multipart: Multipart,
) -> AppResult<impl IntoResponse> {
    let form = read_place_upload(multipart).await?.into_form()?;
    let place = session.client.create_place(&form).await?;
    Ok((StatusCode::CREATED, Json(DataResponse { data: place })))
}

/// PUT /api/v1/admin/places/{id} (multipart)
pub async fn update_place(
    session: Session,
    Path(id): Path<DbId>,
    multipart: Multipart,
) -> AppResult<impl IntoResponse> {
    let form = read_place_upload(multipart).await?.into_form()?;
    let place = session.client.update_place(id, &form).await?;
    Ok(Json(DataResponse { data: place }))
}

/// DELETE /api/v1/admin/places/{id}
pub async fn delete_place(session: Session, Path(id): Path<DbId>) -> AppResult<StatusCode> {
    session.client.delete_place(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

// ---------------------------------------------------------------------------
// Images
// ---------------------------------------------------------------------------

/// POST /api/v1/admin/places/{id}/images (multipart, repeated `images`)
pub async fn upload_images(
    session: Session,
    Path(place_id): Path<DbId>,
    mut multipart: Multipart,
) -> AppResult<impl IntoResponse> {
    let mut files = Vec::new();
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::BadRequest(e.to_string()))?
    {
        if field.file_name().is_none() {
            continue;
        }
        if let Some(file) = read_file(field).await? {
            files.push(file);
        }
    }

    if files.is_empty() {
        return Err(AppError::BadRequest("No images received".into()));
    }

    let images = session.client.upload_images(place_id, &files).await?;
    Ok((StatusCode::CREATED, Json(DataResponse { data: images })))
}

/// DELETE /api/v1/admin/images/{id}
pub async fn delete_image(session: Session, Path(id): Path<DbId>) -> AppResult<StatusCode> {
    session.client.delete_image(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

// ---------------------------------------------------------------------------
// Lookup tables
// ---------------------------------------------------------------------------

/// GET on any admin collection, e.g. `/admin/districts`.
pub async fn list_records<T>(session: Session) -> AppResult<impl IntoResponse>
where
    T: AdminResource + Serialize + Send + Sync + 'static,
{
    let records = session.client.admin_list::<T>().await?;
    Ok(Json(DataResponse { data: records }))
}

/// GET on one record of an admin collection.
pub async fn get_record<T>(session: Session, Path(id): Path<DbId>) -> AppResult<impl IntoResponse>
where
    T: AdminResource + Serialize + Send + Sync + 'static,
{
    let record = session.client.admin_get::<T>(id).await?;
    Ok(Json(DataResponse { data: record }))
}

/// DELETE on one record of an admin collection.
pub async fn delete_record<T>(session: Session, Path(id): Path<DbId>) -> AppResult<StatusCode>
where
    T: AdminResource + Send + Sync + 'static,
{
    session.client.admin_delete::<T>(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn create_district(
    session: Session,
    Json(form): Json<NamedForm>,
) -> AppResult<impl IntoResponse> {
    let district = session.client.create_district(&form).await?;
    Ok((StatusCode::CREATED, Json(DataResponse { data: district })))
}

pub async fn update_district(
    session: Session,
    Path(id): Path<DbId>,
    Json(form): Json<NamedForm>,
) -> AppResult<impl IntoResponse> {
    let district = session.client.update_district(id, &form).await?;
    Ok(Json(DataResponse { data: district }))
}

pub async fn create_category(
    session: Session,
    Json(form): Json<NamedForm>,
) -> AppResult<impl IntoResponse> {
    let category = session.client.create_category(&form).await?;
    Ok((StatusCode::CREATED, Json(DataResponse { data: category })))
}

pub async fn update_category(
    session: Session,
    Path(id): Path<DbId>,
    Json(form): Json<NamedForm>,
) -> AppResult<impl IntoResponse> {
    let category = session.client.update_category(id, &form).await?;
    Ok(Json(DataResponse { data: category }))
}

pub async fn create_season(
    session: Session,
    Json(form): Json<SeasonForm>,
) -> AppResult<impl IntoResponse> {
    let season = session.client.create_season(&form).await?;
    Ok((StatusCode::CREATED, Json(DataResponse { data: season })))
}

pub async fn update_season(
    session: Session,
    Path(id): Path<DbId>,
    Json(form): Json<SeasonForm>,
) -> AppResult<impl IntoResponse> {
    let season = session.client.update_season(id, &form).await?;
    Ok(Json(DataResponse { data: season }))
}

pub async fn create_operating_hour(
    session: Session,
    Json(form): Json<OperatingHourForm>,
) -> AppResult<impl IntoResponse> {
    let hour = session.client.create_operating_hour(&form).await?;
    Ok((StatusCode::CREATED, Json(DataResponse { data: hour })))
}

pub async fn update_operating_hour(
    session: Session,
    Path(id): Path<DbId>,
    Json(form): Json<OperatingHourForm>,
) -> AppResult<impl IntoResponse> {
    let hour = session.client.update_operating_hour(id, &form).await?;
    Ok(Json(DataResponse { data: hour }))
}

pub async fn create_season_relation(
    session: Session,
    Json(form): Json<SeasonRelationForm>,
) -> AppResult<impl IntoResponse> {
    let relation = session.client.create_season_relation(&form).await?;
    Ok((StatusCode::CREATED, Json(DataResponse { data: relation })))
}

pub async fn update_season_relation(
    session: Session,
    Path(id): Path<DbId>,
    Json(form): Json<SeasonRelationForm>,
) -> AppResult<impl IntoResponse> {
    let relation = session.client.update_season_relation(id, &form).await?;
    Ok(Json(DataResponse { data: relation }))
}

// ---------------------------------------------------------------------------
// Form options
// ---------------------------------------------------------------------------

/// GET /api/v1/admin/form-options
///
/// Districts, categories and seasons for the place form's dropdowns.
pub async fn form_options(session: Session) -> AppResult<impl IntoResponse> {
    let options = session.client.form_options().await?;
    Ok(Json(DataResponse { data: options }))
}
