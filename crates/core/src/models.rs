//! Records mirrored from the tourism backend.
//!
//! The backend owns every lifecycle rule; these structs only carry what it
//! returns for the duration of a page view. Fields the backend may omit are
//! `Option`, and anything not modelled lands in `extra` so it survives a
//! round trip through the web layer untouched.

use std::fmt;
use std::str::FromStr;

use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Deserializer, Serialize};

use crate::types::{DbId, ExtraFields};

// ---------------------------------------------------------------------------
// Day of week
// ---------------------------------------------------------------------------

/// Day an operating-hour row applies to. `Everyday` covers all seven days.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DayOfWeek {
    Sunday,
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
    Saturday,
    Everyday,
}

impl DayOfWeek {
    pub const ALL: [DayOfWeek; 8] = [
        DayOfWeek::Sunday,
        DayOfWeek::Monday,
        DayOfWeek::Tuesday,
        DayOfWeek::Wednesday,
        DayOfWeek::Thursday,
        DayOfWeek::Friday,
        DayOfWeek::Saturday,
        DayOfWeek::Everyday,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            DayOfWeek::Sunday => "Sunday",
            DayOfWeek::Monday => "Monday",
            DayOfWeek::Tuesday => "Tuesday",
            DayOfWeek::Wednesday => "Wednesday",
            DayOfWeek::Thursday => "Thursday",
            DayOfWeek::Friday => "Friday",
            DayOfWeek::Saturday => "Saturday",
            DayOfWeek::Everyday => "Everyday",
        }
    }

    /// Whether an hour row for `self` applies on the concrete day `day`.
    pub fn covers(self, day: DayOfWeek) -> bool {
        self == DayOfWeek::Everyday || self == day
    }
}

impl From<chrono::Weekday> for DayOfWeek {
    fn from(day: chrono::Weekday) -> Self {
        match day {
            chrono::Weekday::Sun => DayOfWeek::Sunday,
            chrono::Weekday::Mon => DayOfWeek::Monday,
            chrono::Weekday::Tue => DayOfWeek::Tuesday,
            chrono::Weekday::Wed => DayOfWeek::Wednesday,
            chrono::Weekday::Thu => DayOfWeek::Thursday,
            chrono::Weekday::Fri => DayOfWeek::Friday,
            chrono::Weekday::Sat => DayOfWeek::Saturday,
        }
    }
}

impl fmt::Display for DayOfWeek {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DayOfWeek {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        DayOfWeek::ALL
            .into_iter()
            .find(|d| d.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| format!("Unknown day of week: '{s}'"))
    }
}

// ---------------------------------------------------------------------------
// Clock times
// ---------------------------------------------------------------------------

/// Parse a clock time in `HH:MM` or `HH:MM:SS` form.
pub fn parse_clock(value: &str) -> Result<NaiveTime, String> {
    let value = value.trim();
    NaiveTime::parse_from_str(value, "%H:%M")
        .or_else(|_| NaiveTime::parse_from_str(value, "%H:%M:%S"))
        .map_err(|_| format!("Invalid time '{value}', expected HH:MM"))
}

/// Serde adapter for `Option<NaiveTime>` rendered as `HH:MM`.
pub mod clock {
    use chrono::NaiveTime;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(value: &Option<NaiveTime>, s: S) -> Result<S::Ok, S::Error> {
        match value {
            Some(t) => s.serialize_str(&t.format("%H:%M").to_string()),
            None => s.serialize_none(),
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<Option<NaiveTime>, D::Error> {
        let raw: Option<String> = Option::deserialize(d)?;
        match raw.as_deref().map(str::trim) {
            None | Some("") => Ok(None),
            Some(v) => super::parse_clock(v)
                .map(Some)
                .map_err(serde::de::Error::custom),
        }
    }
}

// ---------------------------------------------------------------------------
// Records
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Image {
    pub id: DbId,
    #[serde(default)]
    pub place_id: Option<DbId>,
    #[serde(alias = "path")]
    pub image_path: String,
    /// Absolute URL, filled in by [`crate::image_url::ResolveImages`].
    #[serde(default)]
    pub image_url: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OperatingHour {
    #[serde(default)]
    pub id: Option<DbId>,
    #[serde(default)]
    pub place_id: Option<DbId>,
    pub day_of_week: DayOfWeek,
    #[serde(default, with = "clock")]
    pub opening_time: Option<NaiveTime>,
    #[serde(default, with = "clock")]
    pub closing_time: Option<NaiveTime>,
}

impl OperatingHour {
    /// Whether this row has the place open at `time` on `day`.
    ///
    /// The range is half-open, `[opening, closing)`. A closing time at or
    /// before the opening time wraps past midnight. A row without both times
    /// means closed.
    pub fn is_open_at(&self, day: DayOfWeek, time: NaiveTime) -> bool {
        if !self.day_of_week.covers(day) {
            return false;
        }
        let (Some(open), Some(close)) = (self.opening_time, self.closing_time) else {
            return false;
        };

        if open < close {
            time >= open && time < close
        } else {
            time >= open || time < close
        }
    }
}

/// A list the backend may send as `null` when it has no rows.
fn null_as_empty<'de, D, T>(d: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Ok(Option::<Vec<T>>::deserialize(d)?.unwrap_or_default())
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct District {
    pub id: DbId,
    pub name: String,
    #[serde(flatten)]
    pub extra: ExtraFields,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Category {
    pub id: DbId,
    pub name: String,
    #[serde(flatten)]
    pub extra: ExtraFields,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Season {
    pub id: DbId,
    pub name: String,
    #[serde(default)]
    pub date_start: Option<NaiveDate>,
    #[serde(default)]
    pub date_end: Option<NaiveDate>,
    /// Only populated by the real-time seasons endpoint.
    #[serde(
        default,
        deserialize_with = "null_as_empty",
        skip_serializing_if = "Vec::is_empty"
    )]
    pub places: Vec<Place>,
    #[serde(flatten)]
    pub extra: ExtraFields,
}

/// Link between a season and a place it is recommended for.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeasonRelation {
    pub id: DbId,
    pub season_id: DbId,
    pub place_id: DbId,
    #[serde(flatten)]
    pub extra: ExtraFields,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Place {
    pub id: DbId,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub latitude: Option<f64>,
    #[serde(default)]
    pub longitude: Option<f64>,
    #[serde(default)]
    pub location_link: Option<String>,
    #[serde(default)]
    pub district_id: Option<DbId>,
    #[serde(default)]
    pub district_name: Option<String>,
    #[serde(default)]
    pub category_id: Option<DbId>,
    #[serde(default)]
    pub category_name: Option<String>,
    #[serde(default)]
    pub admin_id: Option<DbId>,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub images: Vec<Image>,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub operating_hours: Vec<OperatingHour>,
    #[serde(
        default,
        deserialize_with = "null_as_empty",
        skip_serializing_if = "Vec::is_empty"
    )]
    pub seasons: Vec<Season>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub distance_km: Option<f64>,
    #[serde(flatten)]
    pub extra: ExtraFields,
}

impl Place {
    /// Whether any operating-hour row has the place open at `time` on `day`.
    pub fn is_open_at(&self, day: DayOfWeek, time: NaiveTime) -> bool {
        self.operating_hours.iter().any(|h| h.is_open_at(day, time))
    }

    /// First image URL, used as a card or marker thumbnail.
    pub fn thumbnail_url(&self) -> Option<&str> {
        self.images.iter().find_map(|i| i.image_url.as_deref())
    }
}

/// Administrator profile returned by `/auth/profile` and `/auth/register`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Profile {
    pub id: DbId,
    pub username: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub role: Option<String>,
    #[serde(flatten)]
    pub extra: ExtraFields,
}

/// Result of a successful login.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuthToken {
    #[serde(alias = "access_token")]
    pub token: String,
    #[serde(default, alias = "user")]
    pub profile: Option<Profile>,
}

// ---------------------------------------------------------------------------
// Category kinds
// ---------------------------------------------------------------------------

/// The four place classifications that have their own public listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CategoryKind {
    TouristAttraction,
    Accommodation,
    Restaurant,
    SouvenirShop,
}

impl CategoryKind {
    pub const ALL: [CategoryKind; 4] = [
        CategoryKind::TouristAttraction,
        CategoryKind::Accommodation,
        CategoryKind::Restaurant,
        CategoryKind::SouvenirShop,
    ];

    /// Public backend endpoint listing places of this kind.
    pub fn endpoint(self) -> &'static str {
        match self {
            CategoryKind::TouristAttraction => "/tourist-attractions",
            CategoryKind::Accommodation => "/accommodations",
            CategoryKind::Restaurant => "/restaurants",
            CategoryKind::SouvenirShop => "/souvenir-shops",
        }
    }
}
