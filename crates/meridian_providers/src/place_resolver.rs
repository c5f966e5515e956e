use std::future::Future;

use meridian_core::{Coordinate, Provenance};
use serde::{Deserialize, Serialize};
use serde_with::{DisplayFromStr, serde_as};
use tracing::{debug, instrument, warn};

use crate::{
    config::ProviderConfig,
    error::ProviderError,
    http::{build_client, read_json},
};

pub const NOMINATIM_REVERSE_API_PATH: &str = "/reverse";
pub const NOMINATIM_SEARCH_API_PATH: &str = "/search";

pub const RESOLVED_CONFIDENCE: f64 = 0.9;
pub const FALLBACK_CONFIDENCE: f64 = 0.1;

const MIN_QUERY_LENGTH: usize = 2;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AddressComponents {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub road: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub suburb: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub state: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub postcode: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub country_code: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeocodeResult {
    pub coordinate: Coordinate,
    pub address: String,
    pub components: AddressComponents,
    /// 0..=1, low when the address is only the raw coordinate.
    pub confidence: f64,
    pub provenance: Provenance,
}

impl GeocodeResult {
    pub fn fallback(coordinate: Coordinate) -> Self {
        Self {
            coordinate,
            address: coordinate.to_string(),
            components: AddressComponents::default(),
            confidence: FALLBACK_CONFIDENCE,
            provenance: Provenance::Fallback,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlaceSuggestion {
    pub place_id: String,
    pub name: String,
    pub address: String,
    pub location: Coordinate,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    pub components: AddressComponents,
}

/// Forward and reverse geocoding. Both operations are total.
pub trait PlaceResolver: Send + Sync {
    fn reverse_geocode(&self, coordinate: Coordinate) -> impl Future<Output = GeocodeResult> + Send;

    fn search(
        &self,
        query: &str,
        country_filter: Option<&str>,
        limit: usize,
    ) -> impl Future<Output = Vec<PlaceSuggestion>> + Send;
}

#[derive(Deserialize, Default)]
struct NominatimAddress {
    road: Option<String>,
    suburb: Option<String>,
    neighbourhood: Option<String>,
    city: Option<String>,
    town: Option<String>,
    village: Option<String>,
    state: Option<String>,
    postcode: Option<String>,
    country: Option<String>,
    country_code: Option<String>,
}

impl From<NominatimAddress> for AddressComponents {
    fn from(value: NominatimAddress) -> Self {
        Self {
            road: value.road,
            suburb: value.suburb.or(value.neighbourhood),
            city: value.city.or(value.town).or(value.village),
            state: value.state,
            postcode: value.postcode,
            country: value.country,
            country_code: value.country_code,
        }
    }
}

#[serde_as]
#[derive(Deserialize)]
struct NominatimPlace {
    place_id: Option<u64>,
    #[serde_as(as = "DisplayFromStr")]
    lat: f64,
    #[serde_as(as = "DisplayFromStr")]
    lon: f64,
    display_name: String,
    #[serde(default)]
    name: Option<String>,
    #[serde(rename = "type", default)]
    kind: Option<String>,
    #[serde(default)]
    address: Option<NominatimAddress>,
}

/// Nominatim answers reverse lookups it cannot resolve with `{"error": ...}`.
#[derive(Deserialize)]
#[serde(untagged)]
enum NominatimReverseResponse {
    Place(NominatimPlace),
    Error { error: String },
}

impl From<NominatimPlace> for PlaceSuggestion {
    fn from(place: NominatimPlace) -> Self {
        let name = place
            .name
            .filter(|name| !name.is_empty())
            .or_else(|| place.display_name.split(',').next().map(|s| s.trim().to_owned()))
            .unwrap_or_default();

        Self {
            place_id: place.place_id.map(|id| id.to_string()).unwrap_or_default(),
            name,
            address: place.display_name,
            location: Coordinate::new(place.lat, place.lon),
            kind: place.kind,
            components: place.address.unwrap_or_default().into(),
        }
    }
}

pub struct NominatimPlaceResolver {
    client: reqwest::Client,
    base_url: String,
}

impl NominatimPlaceResolver {
    pub fn new(config: &ProviderConfig) -> Result<Self, ProviderError> {
        Ok(Self {
            client: build_client(config)?,
            base_url: config.nominatim_url.clone(),
        })
    }

    async fn request_reverse(&self, coordinate: Coordinate) -> Result<GeocodeResult, ProviderError> {
        let response = self
            .client
            .get(format!("{}{}", self.base_url, NOMINATIM_REVERSE_API_PATH))
            .query(&[
                ("lat", coordinate.lat.to_string()),
                ("lon", coordinate.lng.to_string()),
                ("format", "jsonv2".to_owned()),
                ("addressdetails", "1".to_owned()),
            ])
            .send()
            .await?;

        match read_json::<NominatimReverseResponse>(response).await? {
            NominatimReverseResponse::Place(place) => Ok(GeocodeResult {
                coordinate,
                address: place.display_name,
                components: place.address.unwrap_or_default().into(),
                confidence: RESOLVED_CONFIDENCE,
                provenance: Provenance::Provider,
            }),
            NominatimReverseResponse::Error { error } => Err(ProviderError::InvalidResponse(error)),
        }
    }

    async fn request_search(
        &self,
        query: &str,
        country_filter: Option<&str>,
        limit: usize,
    ) -> Result<Vec<PlaceSuggestion>, ProviderError> {
        let mut params = vec![
            ("q", query.to_owned()),
            ("format", "jsonv2".to_owned()),
            ("addressdetails", "1".to_owned()),
            ("limit", limit.to_string()),
        ];
        if let Some(country) = country_filter.filter(|c| !c.is_empty()) {
            params.push(("countrycodes", country.to_lowercase()));
        }

        let response = self
            .client
            .get(format!("{}{}", self.base_url, NOMINATIM_SEARCH_API_PATH))
            .query(&params)
            .send()
            .await?;

        let places: Vec<NominatimPlace> = read_json(response).await?;

        Ok(places.into_iter().take(limit).map(PlaceSuggestion::from).collect())
    }
}

impl PlaceResolver for NominatimPlaceResolver {
    #[instrument(skip(self))]
    async fn reverse_geocode(&self, coordinate: Coordinate) -> GeocodeResult {
        match self.request_reverse(coordinate).await {
            Ok(result) => result,
            Err(err) => {
                warn!("PlaceResolver: reverse geocode failed: {}", err);
                GeocodeResult::fallback(coordinate)
            }
        }
    }

    #[instrument(skip(self))]
    async fn search(
        &self,
        query: &str,
        country_filter: Option<&str>,
        limit: usize,
    ) -> Vec<PlaceSuggestion> {
        let query = query.trim();
        if query.chars().count() < MIN_QUERY_LENGTH || limit == 0 {
            debug!("PlaceResolver: query too short, skipping search");
            return Vec::new();
        }

        match self.request_search(query, country_filter, limit).await {
            Ok(places) => places,
            Err(err) => {
                warn!("PlaceResolver: search failed: {}", err);
                Vec::new()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use axum::{Json, Router, extract::Query, routing::get};
    use serde_json::json;

    use super::*;
    use crate::test_server::{UNREACHABLE_URL, serve, test_config};

    #[tokio::test]
    async fn reverse_geocode_failure_returns_raw_coordinate() {
        let resolver = NominatimPlaceResolver::new(&test_config(UNREACHABLE_URL)).unwrap();

        let result = resolver
            .reverse_geocode(Coordinate::new(23.8103, 90.4125))
            .await;

        assert_eq!(result.address, "23.810300, 90.412500");
        assert_eq!(result.confidence, FALLBACK_CONFIDENCE);
        assert_eq!(result.provenance, Provenance::Fallback);
    }

    #[tokio::test]
    async fn reverse_geocode_parses_address() {
        let router = Router::new().route(
            NOMINATIM_REVERSE_API_PATH,
            get(|| async {
                Json(json!({
                    "place_id": 1234,
                    "lat": "23.8103",
                    "lon": "90.4125",
                    "display_name": "Kazi Nazrul Islam Avenue, Dhaka, Bangladesh",
                    "address": {
                        "road": "Kazi Nazrul Islam Avenue",
                        "town": "Dhaka",
                        "country": "Bangladesh",
                        "country_code": "bd"
                    }
                }))
            }),
        );
        let base = serve(router).await;
        let resolver = NominatimPlaceResolver::new(&test_config(&base)).unwrap();

        let result = resolver
            .reverse_geocode(Coordinate::new(23.8103, 90.4125))
            .await;

        assert_eq!(result.provenance, Provenance::Provider);
        assert_eq!(result.address, "Kazi Nazrul Islam Avenue, Dhaka, Bangladesh");
        assert_eq!(result.components.city.as_deref(), Some("Dhaka"));
        assert_eq!(result.components.country_code.as_deref(), Some("bd"));
        assert_eq!(result.confidence, RESOLVED_CONFIDENCE);
    }

    #[tokio::test]
    async fn reverse_geocode_error_payload_falls_back() {
        let router = Router::new().route(
            NOMINATIM_REVERSE_API_PATH,
            get(|| async { Json(json!({ "error": "Unable to geocode" })) }),
        );
        let base = serve(router).await;
        let resolver = NominatimPlaceResolver::new(&test_config(&base)).unwrap();

        let result = resolver.reverse_geocode(Coordinate::new(0.0, 0.0)).await;

        assert_eq!(result.provenance, Provenance::Fallback);
    }

    #[tokio::test]
    async fn search_passes_country_filter_and_limit() {
        let router = Router::new().route(
            NOMINATIM_SEARCH_API_PATH,
            get(|Query(query): Query<HashMap<String, String>>| async move {
                let ok = query.get("countrycodes").map(String::as_str) == Some("bd")
                    && query.get("limit").map(String::as_str) == Some("1");
                let places = if ok {
                    json!([
                        {
                            "place_id": 1,
                            "lat": "23.7461",
                            "lon": "90.3742",
                            "display_name": "Dhanmondi, Dhaka, Bangladesh",
                            "name": "Dhanmondi",
                            "type": "suburb"
                        },
                        {
                            "place_id": 2,
                            "lat": "23.75",
                            "lon": "90.37",
                            "display_name": "Dhanmondi Lake, Dhaka, Bangladesh"
                        }
                    ])
                } else {
                    json!([])
                };
                Json(places)
            }),
        );
        let base = serve(router).await;
        let resolver = NominatimPlaceResolver::new(&test_config(&base)).unwrap();

        let suggestions = resolver.search("Dhanmondi", Some("BD"), 1).await;

        assert_eq!(suggestions.len(), 1);
        assert_eq!(suggestions[0].place_id, "1");
        assert_eq!(suggestions[0].name, "Dhanmondi");
        assert_eq!(suggestions[0].location, Coordinate::new(23.7461, 90.3742));
        assert_eq!(suggestions[0].kind.as_deref(), Some("suburb"));
    }

    #[tokio::test]
    async fn short_queries_and_failures_return_empty() {
        let resolver = NominatimPlaceResolver::new(&test_config(UNREACHABLE_URL)).unwrap();

        assert!(resolver.search(" a ", None, 5).await.is_empty());
        assert!(resolver.search("Dhaka", None, 0).await.is_empty());
        assert!(resolver.search("Dhaka", None, 5).await.is_empty());
    }
}
