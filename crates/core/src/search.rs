//! Search filter composition.
//!
//! A search combines free text with at most one facet: a category, a
//! district, a season, or an opening-hours window. Picking a concrete value
//! for one facet resets the others, mirroring the "select all / filter by id"
//! toggles of the public search page.

use chrono::NaiveTime;
use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize};

use crate::models::{parse_clock, DayOfWeek};
use crate::types::DbId;

/// "Select all" vs. "filter by this value".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "mode", content = "value")]
pub enum Selection<T> {
    #[default]
    All,
    Only(T),
}

impl<T: Copy> Selection<T> {
    pub fn value(&self) -> Option<T> {
        match self {
            Selection::All => None,
            Selection::Only(v) => Some(*v),
        }
    }

    pub fn is_all(&self) -> bool {
        matches!(self, Selection::All)
    }
}

impl<T> From<Option<T>> for Selection<T> {
    fn from(value: Option<T>) -> Self {
        value.map_or(Selection::All, Selection::Only)
    }
}

/// Opening-hours facet: places open on `day`, optionally at `time`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct HoursFilter {
    pub day: DayOfWeek,
    pub time: Option<NaiveTime>,
}

/// Which facet is currently narrowing the search.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Facet {
    Category,
    District,
    Season,
    Hours,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchFilters {
    query: String,
    category: Selection<DbId>,
    district: Selection<DbId>,
    season: Selection<DbId>,
    hours: Option<HoursFilter>,
}

impl SearchFilters {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn category(&self) -> Selection<DbId> {
        self.category
    }

    pub fn district(&self) -> Selection<DbId> {
        self.district
    }

    pub fn season(&self) -> Selection<DbId> {
        self.season
    }

    pub fn hours(&self) -> Option<HoursFilter> {
        self.hours
    }

    /// Replace the free-text part. Facets are kept.
    pub fn set_query(&mut self, text: &str) {
        self.query = text.trim().to_string();
    }

    pub fn select_category(&mut self, selection: Selection<DbId>) {
        if !selection.is_all() {
            self.clear_facets();
        }
        self.category = selection;
    }

    pub fn select_district(&mut self, selection: Selection<DbId>) {
        if !selection.is_all() {
            self.clear_facets();
        }
        self.district = selection;
    }

    pub fn select_season(&mut self, selection: Selection<DbId>) {
        if !selection.is_all() {
            self.clear_facets();
        }
        self.season = selection;
    }

    pub fn select_hours(&mut self, hours: Option<HoursFilter>) {
        if hours.is_some() {
            self.clear_facets();
        }
        self.hours = hours;
    }

    fn clear_facets(&mut self) {
        self.category = Selection::All;
        self.district = Selection::All;
        self.season = Selection::All;
        self.hours = None;
    }

    pub fn active_facet(&self) -> Option<Facet> {
        if !self.category.is_all() {
            Some(Facet::Category)
        } else if !self.district.is_all() {
            Some(Facet::District)
        } else if !self.season.is_all() {
            Some(Facet::Season)
        } else if self.hours.is_some() {
            Some(Facet::Hours)
        } else {
            None
        }
    }

    pub fn is_empty(&self) -> bool {
        self.query.is_empty() && self.active_facet().is_none()
    }

    /// Query-string pairs for the backend `/search` endpoint.
    pub fn to_query_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = Vec::new();

        if !self.query.is_empty() {
            pairs.push(("q", self.query.clone()));
        }
        if let Some(id) = self.category.value() {
            pairs.push(("category_id", id.to_string()));
        }
        if let Some(id) = self.district.value() {
            pairs.push(("district_id", id.to_string()));
        }
        if let Some(id) = self.season.value() {
            pairs.push(("season_id", id.to_string()));
        }
        if let Some(hours) = self.hours {
            pairs.push(("day", hours.day.to_string()));
            if let Some(time) = hours.time {
                pairs.push(("time", time.format("%H:%M").to_string()));
            }
        }

        pairs
    }

    /// Build filters from raw request parameters.
    ///
    /// Facets are applied in category, district, season, hours order, so
    /// when a caller supplies several only the first one survives.
    pub fn from_params(params: &SearchParams) -> Result<Self, String> {
        let mut filters = SearchFilters::new();
        filters.set_query(params.q.as_deref().unwrap_or_default());

        if let Some(id) = params.category_id {
            filters.select_category(Selection::Only(id));
        } else if let Some(id) = params.district_id {
            filters.select_district(Selection::Only(id));
        } else if let Some(id) = params.season_id {
            filters.select_season(Selection::Only(id));
        } else if let Some(day) = non_blank(params.day.as_deref()) {
            // Day and time are only read once no id facet has claimed the search.
            filters.select_hours(Some(HoursFilter {
                day: day.parse()?,
                time: non_blank(params.time.as_deref())
                    .map(parse_clock)
                    .transpose()?,
            }));
        }

        Ok(filters)
    }
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.trim().is_empty())
}

/// Raw search parameters as they arrive on a query string.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SearchParams {
    pub q: Option<String>,
    #[serde(default, deserialize_with = "blank_as_none")]
    pub category_id: Option<DbId>,
    #[serde(default, deserialize_with = "blank_as_none")]
    pub district_id: Option<DbId>,
    #[serde(default, deserialize_with = "blank_as_none")]
    pub season_id: Option<DbId>,
    pub day: Option<String>,
    pub time: Option<String>,
}

/// Id from a query string or JSON body; an empty value (a "show all"
/// dropdown entry) means no selection.
fn blank_as_none<'de, D>(d: D) -> Result<Option<DbId>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawId {
        Id(DbId),
        Text(String),
    }

    match Option::<RawId>::deserialize(d)? {
        None => Ok(None),
        Some(RawId::Id(id)) => Ok(Some(id)),
        Some(RawId::Text(text)) if text.trim().is_empty() => Ok(None),
        Some(RawId::Text(text)) => text
            .trim()
            .parse()
            .map(Some)
            .map_err(|_| D::Error::custom(format!("invalid id: '{text}'"))),
    }
}
