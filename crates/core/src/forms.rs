//! Admin and auth form payloads.
//!
//! Field-level rules use `validator`; cross-field rules (paired times,
//! duplicate days, date ordering) are checked by each form's `check()`.

use std::collections::HashSet;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

use crate::error::CoreError;
use crate::models::{parse_clock, DayOfWeek};
use crate::types::DbId;

fn not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::new("blank"));
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Operating hours
// ---------------------------------------------------------------------------

/// One row of the operating-hours field array.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OperatingHourInput {
    pub day_of_week: DayOfWeek,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub opening_time: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub closing_time: Option<String>,
}

impl OperatingHourInput {
    fn check(&self) -> Result<(), CoreError> {
        let open = self.opening_time.as_deref().filter(|s| !s.trim().is_empty());
        let close = self.closing_time.as_deref().filter(|s| !s.trim().is_empty());

        match (open, close) {
            (None, None) => Ok(()),
            (Some(o), Some(c)) => {
                parse_clock(o).map_err(CoreError::Validation)?;
                parse_clock(c).map_err(CoreError::Validation)?;
                Ok(())
            }
            _ => Err(CoreError::Validation(format!(
                "{}: opening and closing time must both be set or both be empty",
                self.day_of_week
            ))),
        }
    }
}

/// Validate a whole field array: every row, and no day listed twice.
pub fn check_operating_hours(hours: &[OperatingHourInput]) -> Result<(), CoreError> {
    let mut seen = HashSet::new();
    for row in hours {
        row.check()?;
        if !seen.insert(row.day_of_week) {
            return Err(CoreError::Validation(format!(
                "{} is listed more than once",
                row.day_of_week
            )));
        }
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Uploads
// ---------------------------------------------------------------------------

/// A file received from (or destined for) a multipart form.
#[derive(Clone, PartialEq)]
pub struct UploadFile {
    pub file_name: String,
    pub content_type: String,
    pub bytes: Vec<u8>,
}

impl std::fmt::Debug for UploadFile {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UploadFile")
            .field("file_name", &self.file_name)
            .field("content_type", &self.content_type)
            .field("len", &self.bytes.len())
            .finish()
    }
}

impl UploadFile {
    pub fn check(&self) -> Result<(), CoreError> {
        if !self.content_type.starts_with("image/") {
            return Err(CoreError::Validation(format!(
                "{} is not an image ({})",
                self.file_name, self.content_type
            )));
        }
        if self.bytes.is_empty() {
            return Err(CoreError::Validation(format!("{} is empty", self.file_name)));
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Place
// ---------------------------------------------------------------------------

/// Create / update payload for a place, sent as `multipart/form-data`.
#[derive(Debug, Clone, PartialEq, Validate)]
pub struct PlaceForm {
    #[validate(custom(function = "not_blank"))]
    pub name: String,
    pub description: Option<String>,
    #[validate(range(min = -90.0, max = 90.0))]
    pub latitude: Option<f64>,
    #[validate(range(min = -180.0, max = 180.0))]
    pub longitude: Option<f64>,
    pub location_link: Option<String>,
    pub district_id: DbId,
    pub category_id: DbId,
    pub season_ids: Vec<DbId>,
    pub operating_hours: Vec<OperatingHourInput>,
    pub images: Vec<UploadFile>,
}

impl PlaceForm {
    pub fn check(&self) -> Result<(), CoreError> {
        self.validate()?;
        check_operating_hours(&self.operating_hours)?;
        for image in &self.images {
            image.check()?;
        }
        Ok(())
    }

    /// Text parts of the multipart payload, in submission order.
    ///
    /// `operating_hours` and `season_ids` are JSON arrays; the hours keep the
    /// order of the form's field array. Empty optionals are left out.
    pub fn text_fields(&self) -> Result<Vec<(&'static str, String)>, CoreError> {
        let mut fields = vec![("name", self.name.trim().to_string())];

        if let Some(d) = self.description.as_deref().filter(|d| !d.trim().is_empty()) {
            fields.push(("description", d.to_string()));
        }
        if let Some(lat) = self.latitude {
            fields.push(("latitude", lat.to_string()));
        }
        if let Some(lng) = self.longitude {
            fields.push(("longitude", lng.to_string()));
        }
        if let Some(link) = self.location_link.as_deref().filter(|l| !l.trim().is_empty()) {
            fields.push(("location_link", link.to_string()));
        }
        fields.push(("district_id", self.district_id.to_string()));
        fields.push(("category_id", self.category_id.to_string()));

        let to_json = |e: serde_json::Error| CoreError::Internal(e.to_string());
        fields.push((
            "season_ids",
            serde_json::to_string(&self.season_ids).map_err(to_json)?,
        ));
        fields.push((
            "operating_hours",
            serde_json::to_string(&self.operating_hours).map_err(to_json)?,
        ));

        Ok(fields)
    }
}

// ---------------------------------------------------------------------------
// Lookup tables
// ---------------------------------------------------------------------------

/// District and category forms carry only a name.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct NamedForm {
    #[validate(custom(function = "not_blank"))]
    pub name: String,
}

impl NamedForm {
    pub fn check(&self) -> Result<(), CoreError> {
        self.validate()?;
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct SeasonForm {
    #[validate(custom(function = "not_blank"))]
    pub name: String,
    #[serde(default)]
    pub date_start: Option<NaiveDate>,
    #[serde(default)]
    pub date_end: Option<NaiveDate>,
}

impl SeasonForm {
    pub fn check(&self) -> Result<(), CoreError> {
        self.validate()?;
        if let (Some(start), Some(end)) = (self.date_start, self.date_end) {
            if start > end {
                return Err(CoreError::Validation(
                    "date_start must not be after date_end".into(),
                ));
            }
        }
        Ok(())
    }
}

/// Single operating-hour row managed through `/admin/time`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OperatingHourForm {
    pub place_id: DbId,
    #[serde(flatten)]
    pub hour: OperatingHourInput,
}

impl OperatingHourForm {
    pub fn check(&self) -> Result<(), CoreError> {
        self.hour.check()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeasonRelationForm {
    pub season_id: DbId,
    pub place_id: DbId,
}

// ---------------------------------------------------------------------------
// Auth
// ---------------------------------------------------------------------------

#[derive(Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct LoginForm {
    #[validate(custom(function = "not_blank"))]
    pub username: String,
    #[validate(length(min = 1))]
    pub password: String,
}

impl LoginForm {
    pub fn check(&self) -> Result<(), CoreError> {
        self.validate()?;
        Ok(())
    }
}

impl std::fmt::Debug for LoginForm {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LoginForm")
            .field("username", &self.username)
            .finish_non_exhaustive()
    }
}

#[derive(Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct RegisterForm {
    #[validate(custom(function = "not_blank"))]
    pub username: String,
    #[validate(email)]
    pub email: String,
    #[validate(length(min = 6))]
    pub password: String,
}

impl RegisterForm {
    pub fn check(&self) -> Result<(), CoreError> {
        self.validate()?;
        Ok(())
    }
}

impl std::fmt::Debug for RegisterForm {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RegisterForm")
            .field("username", &self.username)
            .field("email", &self.email)
            .finish_non_exhaustive()
    }
}
