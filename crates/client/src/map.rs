//! Map view aggregation.
//!
//! The map shows every attraction, accommodation, restaurant and souvenir
//! shop at once, so the four listings are fetched together and merged into
//! one marker set.

use std::collections::HashSet;

use serde::Serialize;
use tourism_core::geo::Coordinates;
use tourism_core::models::{CategoryKind, Place};
use tourism_core::types::DbId;

use crate::error::ClientResult;
use crate::http::BackendClient;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MapMarker {
    pub place_id: DbId,
    pub name: String,
    pub kind: CategoryKind,
    pub latitude: f64,
    pub longitude: f64,
    pub thumbnail_url: Option<String>,
}

/// Merge per-kind listings into markers.
///
/// Places without coordinates are skipped. A place listed under more than
/// one kind keeps the marker of the first kind it appears under. Output is
/// ordered by kind, then name.
pub fn build_markers(listings: Vec<(CategoryKind, Vec<Place>)>) -> Vec<MapMarker> {
    let mut seen = HashSet::new();
    let mut markers = Vec::new();

    for (kind, places) in listings {
        for place in places {
            let Some(coords) = Coordinates::of(&place) else {
                tracing::debug!(place_id = place.id, "Skipping place without coordinates");
                continue;
            };
            if !seen.insert(place.id) {
                continue;
            }
            markers.push(MapMarker {
                place_id: place.id,
                thumbnail_url: place.thumbnail_url().map(str::to_string),
                name: place.name,
                kind,
                latitude: coords.latitude,
                longitude: coords.longitude,
            });
        }
    }

    markers.sort_by(|a, b| a.kind.cmp(&b.kind).then_with(|| a.name.cmp(&b.name)));
    markers
}

impl BackendClient {
    /// Fetch all four category listings concurrently and merge them.
    pub async fn map_markers(&self) -> ClientResult<Vec<MapMarker>> {
        let (attractions, accommodations, restaurants, shops) = futures::try_join!(
            self.list_by_kind(CategoryKind::TouristAttraction),
            self.list_by_kind(CategoryKind::Accommodation),
            self.list_by_kind(CategoryKind::Restaurant),
            self.list_by_kind(CategoryKind::SouvenirShop),
        )?;

        let markers = build_markers(vec![
            (CategoryKind::TouristAttraction, attractions),
            (CategoryKind::Accommodation, accommodations),
            (CategoryKind::Restaurant, restaurants),
            (CategoryKind::SouvenirShop, shops),
        ]);
        tracing::debug!(count = markers.len(), "Map markers built");
        Ok(markers)
    }
}
