//! Provider seams for the decision core.
//!
//! Everything outside the core — the venue database, the map provider, the
//! weather service, the route history table — is reached through one of
//! these traits. Concrete apps wire in their own implementations; this
//! crate ships HTTP adapters ([`crate::goong`], [`crate::openweather`]) and
//! in-process implementations for the store and archive.

use serde::{Deserialize, Serialize};

use crate::archive::{ArchivedRoute, NewArchivedRoute};
use crate::error::ArchiveError;
use crate::geo::Coord;
use crate::polyline::Polyline;
use crate::retrieval::VenueFilters;
use crate::venue::Venue;

/// Queryable venue database. Read-only from the core's perspective.
///
/// Implementations must apply text filters case- and
/// diacritic-insensitively (see [`crate::normalize::contains_folded`]) and
/// honor `filters.limit`.
pub trait VenueStore {
    fn query(&self, filters: &VenueFilters) -> Vec<Venue>;
}

/// Forward and reverse geocoding. Absence of a result is a normal outcome.
pub trait Geocoder {
    fn geocode(&self, query: &str) -> Option<Coord>;
    fn reverse(&self, coord: Coord) -> Option<String>;
}

/// Travel mode for directions requests.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum TravelMode {
    #[default]
    Car,
    Bike,
    Taxi,
}

impl TravelMode {
    pub fn as_str(self) -> &'static str {
        match self {
            TravelMode::Car => "car",
            TravelMode::Bike => "bike",
            TravelMode::Taxi => "taxi",
        }
    }
}

/// One point-to-point driving segment returned by the directions provider.
#[derive(Debug, Clone, PartialEq)]
pub struct RouteLeg {
    pub distance_m: f64,
    pub duration_s: f64,
    pub geometry: Polyline,
}

/// Point-to-point routing. `None` covers both "no route" and provider
/// failure; callers degrade rather than abort.
pub trait DirectionsProvider {
    fn route(&self, origin: Coord, dest: Coord, mode: TravelMode) -> Option<RouteLeg>;
}

/// Current weather for a city.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeatherReport {
    pub city: String,
    pub description: String,
    pub temperature_c: f64,
    pub humidity: Option<f64>,
}

pub trait WeatherProvider {
    fn current(&self, city: &str) -> Option<WeatherReport>;
}

/// Durable store of previously planned routes.
///
/// Keyed loosely: lookups fetch by start text (case-insensitive) and the
/// cache layer compares stop-name sets. No TTL, no eviction; duplicate
/// near-identical entries from racing saves are acceptable.
pub trait RouteArchive {
    /// All archived routes whose start text equals `start`,
    /// case-insensitively.
    fn find_by_start(&self, start: &str) -> Vec<ArchivedRoute>;

    fn save(&self, route: NewArchivedRoute) -> Result<ArchivedRoute, ArchiveError>;

    fn list_for_user(&self, user: &str) -> Vec<ArchivedRoute>;

    fn rename(&self, id: i64, name: &str) -> Result<(), ArchiveError>;

    fn delete(&self, id: i64) -> Result<(), ArchiveError>;
}
