//! Public read endpoints (no token needed).

use tourism_core::geo::{annotate_and_sort, Coordinates};
use tourism_core::models::{Category, CategoryKind, District, Place, Season};
use tourism_core::search::SearchFilters;
use tourism_core::types::DbId;

use crate::error::ClientResult;
use crate::http::BackendClient;

/// Radius used by "nearby" lookups when the caller does not pick one.
pub const DEFAULT_NEARBY_RADIUS_KM: f64 = 5.0;

/// Number of places shown in the home page carousel.
pub const DEFAULT_RANDOM_LIMIT: usize = 6;

impl BackendClient {
    /// GET /places
    pub async fn list_places(&self) -> ClientResult<Vec<Place>> {
        self.get_resolved("/places", &[]).await
    }

    /// GET /places/{id}
    pub async fn get_place(&self, id: DbId) -> ClientResult<Place> {
        self.get_resolved(&format!("/places/{id}"), &[]).await
    }

    /// GET /districts
    pub async fn list_districts(&self) -> ClientResult<Vec<District>> {
        self.get_json("/districts").await
    }

    /// GET /categories
    pub async fn list_categories(&self) -> ClientResult<Vec<Category>> {
        self.get_json("/categories").await
    }

    /// GET /seasons
    pub async fn list_seasons(&self) -> ClientResult<Vec<Season>> {
        self.get_resolved("/seasons", &[]).await
    }

    /// GET /search
    ///
    /// With no text and no facet there is nothing to narrow, so the full
    /// place list is returned instead.
    pub async fn search(&self, filters: &SearchFilters) -> ClientResult<Vec<Place>> {
        if filters.is_empty() {
            return self.list_places().await;
        }
        self.get_resolved("/search", &filters.to_query_pairs()).await
    }

    /// Listing for one of the four place classifications.
    pub async fn list_by_kind(&self, kind: CategoryKind) -> ClientResult<Vec<Place>> {
        self.get_resolved(kind.endpoint(), &[]).await
    }

    /// GET /places/nearby-by-coordinates
    ///
    /// Results are ordered nearest first; distances missing from the reply
    /// are computed locally.
    pub async fn nearby_by_coordinates(
        &self,
        origin: Coordinates,
        radius_km: f64,
    ) -> ClientResult<Vec<Place>> {
        let query = [
            ("latitude", origin.latitude.to_string()),
            ("longitude", origin.longitude.to_string()),
            ("radius", radius_km.to_string()),
        ];
        let mut places: Vec<Place> = self
            .get_resolved("/places/nearby-by-coordinates", &query)
            .await?;
        annotate_and_sort(&mut places, origin);
        Ok(places)
    }

    /// GET /places/{id}/nearby
    ///
    /// The place itself is never part of the result.
    pub async fn nearby_by_place(&self, id: DbId, radius_km: f64) -> ClientResult<Vec<Place>> {
        let query = [("radius", radius_km.to_string())];
        let mut places: Vec<Place> = self
            .get_resolved(&format!("/places/{id}/nearby"), &query)
            .await?;
        places.retain(|p| p.id != id);
        Ok(places)
    }

    /// GET /places/random
    pub async fn random_places(&self, limit: usize) -> ClientResult<Vec<Place>> {
        self.get_resolved("/places/random", &[("limit", limit.to_string())])
            .await
    }

    /// GET /places/currently-open
    pub async fn currently_open(&self) -> ClientResult<Vec<Place>> {
        self.get_resolved("/places/currently-open", &[]).await
    }

    /// GET /seasons/real-time
    ///
    /// Seasons in effect today, each with its recommended places.
    pub async fn real_time_seasons(&self) -> ClientResult<Vec<Season>> {
        self.get_resolved("/seasons/real-time", &[]).await
    }
}
