//! Goong map API adapter (geocoding + directions).

use serde::Deserialize;
use tracing::warn;

use crate::geo::Coord;
use crate::polyline::Polyline;
use crate::traits::{DirectionsProvider, Geocoder, RouteLeg, TravelMode};

#[derive(Debug, Clone)]
pub struct GoongConfig {
    pub base_url: String,
    pub api_key: String,
    pub timeout_secs: u64,
}

impl Default for GoongConfig {
    fn default() -> Self {
        Self {
            base_url: "https://rsapi.goong.io".to_string(),
            api_key: String::new(),
            timeout_secs: 10,
        }
    }
}

#[derive(Debug, Clone)]
pub struct GoongClient {
    config: GoongConfig,
    client: reqwest::blocking::Client,
}

impl GoongClient {
    pub fn new(config: GoongConfig) -> Result<Self, reqwest::Error> {
        let client = reqwest::blocking::Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self { config, client })
    }

    fn geocode_request(&self, params: &[(&str, &str)]) -> Option<GeocodeResponse> {
        let url = format!("{}/Geocode", self.config.base_url);
        let mut query = params.to_vec();
        query.push(("api_key", self.config.api_key.as_str()));

        let response = self
            .client
            .get(url)
            .query(&query)
            .send()
            .and_then(|resp| resp.error_for_status())
            .and_then(|resp| resp.json::<GeocodeResponse>());

        match response {
            Ok(body) => Some(body),
            Err(err) => {
                warn!(%err, "goong geocode request failed");
                None
            }
        }
    }
}

impl Geocoder for GoongClient {
    fn geocode(&self, query: &str) -> Option<Coord> {
        let body = self.geocode_request(&[("address", query)])?;
        let result = body.results.unwrap_or_default().into_iter().next()?;
        let loc = result.geometry.location;
        Some(Coord::new(loc.lat, loc.lng))
    }

    fn reverse(&self, coord: Coord) -> Option<String> {
        let latlng = format!("{:.6},{:.6}", coord.lat, coord.lon);
        let body = self.geocode_request(&[("latlng", latlng.as_str())])?;
        body.results
            .unwrap_or_default()
            .into_iter()
            .next()
            .and_then(|r| r.formatted_address)
    }
}

impl DirectionsProvider for GoongClient {
    fn route(&self, origin: Coord, dest: Coord, mode: TravelMode) -> Option<RouteLeg> {
        let url = format!("{}/Direction", self.config.base_url);
        let origin = format!("{:.6},{:.6}", origin.lat, origin.lon);
        let destination = format!("{:.6},{:.6}", dest.lat, dest.lon);

        let response = self
            .client
            .get(url)
            .query(&[
                ("origin", origin.as_str()),
                ("destination", destination.as_str()),
                ("vehicle", mode.as_str()),
                ("api_key", self.config.api_key.as_str()),
            ])
            .send()
            .and_then(|resp| resp.error_for_status())
            .and_then(|resp| resp.json::<DirectionResponse>());

        let body = match response {
            Ok(body) => body,
            Err(err) => {
                warn!(%err, "goong direction request failed");
                return None;
            }
        };

        let route = body.routes.unwrap_or_default().into_iter().next()?;
        let geometry = match Polyline::decode(&route.overview_polyline.points) {
            Ok(polyline) => polyline,
            Err(err) => {
                warn!(%err, "goong returned undecodable polyline");
                return None;
            }
        };

        let distance_m = route.legs.iter().map(|l| l.distance.value).sum();
        let duration_s = route.legs.iter().map(|l| l.duration.value).sum();
        Some(RouteLeg { distance_m, duration_s, geometry })
    }
}

#[derive(Debug, Deserialize)]
struct GeocodeResponse {
    results: Option<Vec<GeocodeResult>>,
}

#[derive(Debug, Deserialize)]
struct GeocodeResult {
    geometry: Geometry,
    formatted_address: Option<String>,
}

#[derive(Debug, Deserialize)]
struct Geometry {
    location: LatLng,
}

#[derive(Debug, Deserialize)]
struct LatLng {
    lat: f64,
    lng: f64,
}

#[derive(Debug, Deserialize)]
struct DirectionResponse {
    routes: Option<Vec<DirectionRoute>>,
}

#[derive(Debug, Deserialize)]
struct DirectionRoute {
    overview_polyline: OverviewPolyline,
    #[serde(default)]
    legs: Vec<DirectionLeg>,
}

#[derive(Debug, Deserialize)]
struct OverviewPolyline {
    points: String,
}

#[derive(Debug, Deserialize)]
struct DirectionLeg {
    distance: ValueField,
    duration: ValueField,
}

#[derive(Debug, Deserialize)]
struct ValueField {
    value: f64,
}
