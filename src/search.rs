//! The search pipeline: normalize, retrieve, filter, rank.
//!
//! This is the request-scoped composition behind the search endpoint.
//! Upstream failures degrade: a dead weather provider just means no
//! weather bonus and no ambient weather in the response.

use tracing::{debug, warn};

use crate::profile::PreferenceProfile;
use crate::ranking::{rank, ScoreContext, ScoredVenue};
use crate::retrieval::retrieve;
use crate::traits::{Geocoder, VenueStore, WeatherProvider, WeatherReport};

/// Default result page size. Smaller than the retrieval pool on purpose.
pub const PAGE_SIZE: usize = 20;

#[derive(Debug, Clone)]
pub struct SearchOptions {
    pub page_size: usize,
    /// City for the ambient weather lookup. `None` skips weather entirely.
    pub city: Option<String>,
    /// Current time as minutes since midnight, for open-now display.
    pub now: Option<u16>,
}

impl Default for SearchOptions {
    fn default() -> Self {
        Self { page_size: PAGE_SIZE, city: None, now: None }
    }
}

#[derive(Debug, Clone)]
pub struct SearchResponse {
    pub venues: Vec<ScoredVenue>,
    pub weather: Option<WeatherReport>,
}

/// Runs one search request end to end.
pub fn search<S, G, W>(
    store: &S,
    geocoder: &G,
    weather_provider: &W,
    profile: &PreferenceProfile,
    opts: &SearchOptions,
) -> SearchResponse
where
    S: VenueStore,
    G: Geocoder,
    W: WeatherProvider,
{
    let (mut candidates, center) = retrieve(store, geocoder, profile);

    // The bounding box is only a pre-filter; cut to the exact radius here.
    if let (Some(center), Some(radius)) = (center, profile.radius_km) {
        candidates.retain(|venue| match venue.coord {
            Some(coord) => center.haversine_km(coord) <= radius,
            None => false,
        });
    }

    let weather = opts.city.as_deref().and_then(|city| {
        let report = weather_provider.current(city);
        if report.is_none() {
            warn!(city = %city, "weather lookup failed, skipping weather bonus");
        }
        report
    });

    let ctx = ScoreContext {
        center,
        radius_km: profile.radius_km,
        now: opts.now,
    };
    let mut venues = rank(candidates, profile, weather.as_ref(), &ctx);
    venues.truncate(opts.page_size);
    debug!(results = venues.len(), "search complete");

    SearchResponse { venues, weather }
}
