//! Candidate retrieval: translating a preference profile into store-level
//! filters and fetching a bounded candidate pool.
//!
//! These filters are deliberately coarse. The pool is larger than the
//! result page because exact radius filtering and scoring happen afterward
//! in [`crate::search`].

use tracing::{debug, warn};

use crate::geo::{BoundingBox, Coord};
use crate::normalize::{contains_folded, expand, fold};
use crate::profile::PreferenceProfile;
use crate::traits::{Geocoder, VenueStore};
use crate::venue::{CourseType, FoodType, PriceRange, ServingForm, Venue};

/// Candidate pool bound. Larger than any result page.
pub const POOL_SIZE: usize = 50;

/// Store-level filters. All fields are conjunctive; `terms` and
/// `districts` are internally OR-combined.
#[derive(Debug, Clone, Default)]
pub struct VenueFilters {
    pub food_type: Option<FoodType>,
    pub serving_form: Option<ServingForm>,
    pub course_type: Option<CourseType>,
    /// Candidate's max price must reach this.
    pub min_budget: Option<u32>,
    /// Candidate's min price must not exceed this.
    pub max_budget: Option<u32>,
    pub min_rating: Option<f64>,
    pub bbox: Option<BoundingBox>,
    /// Exact named-area filter, used when no center could be resolved.
    pub districts: Vec<String>,
    /// OR-combined substring terms matched against name/category/cuisine.
    pub terms: Vec<String>,
    pub limit: usize,
}

impl VenueFilters {
    /// Reference filter semantics. Store implementations that push filters
    /// down (SQL, search engine) must match this behavior.
    pub fn matches(&self, venue: &Venue) -> bool {
        if let Some(ft) = self.food_type {
            if venue.food_type != Some(ft) {
                return false;
            }
        }
        if let Some(sf) = self.serving_form {
            if venue.serving_form != Some(sf) {
                return false;
            }
        }
        if let Some(ct) = self.course_type {
            if venue.course_type != Some(ct) {
                return false;
            }
        }
        // Price overlap; venues without price data stay in (scored
        // neutrally later).
        if let Some(price) = venue.price {
            if let Some(min) = self.min_budget {
                if price.max < min {
                    return false;
                }
            }
            if let Some(max) = self.max_budget {
                if price.min > max {
                    return false;
                }
            }
        }
        if let Some(floor) = self.min_rating {
            if venue.rating < floor {
                return false;
            }
        }
        if let Some(bbox) = self.bbox {
            match venue.coord {
                Some(coord) if bbox.contains(coord) => {}
                _ => return false,
            }
        }
        if !self.districts.is_empty()
            && !self
                .districts
                .iter()
                .any(|d| fold(d) == fold(&venue.district))
        {
            return false;
        }
        if !self.terms.is_empty() {
            let hit = self.terms.iter().any(|term| {
                contains_folded(&venue.name, term)
                    || contains_folded(&venue.category, term)
                    || venue
                        .cuisine
                        .as_deref()
                        .is_some_and(|c| contains_folded(c, term))
            });
            if !hit {
                return false;
            }
        }
        true
    }
}

/// Fetches the candidate pool for a profile.
///
/// Returns the candidates and the resolved area center, if any. When the
/// geocoder cannot resolve the named area the search degrades to an exact
/// district filter instead of failing.
pub fn retrieve<S, G>(
    store: &S,
    geocoder: &G,
    profile: &PreferenceProfile,
) -> (Vec<Venue>, Option<Coord>)
where
    S: VenueStore,
    G: Geocoder,
{
    let mut filters = VenueFilters {
        food_type: profile.food_type,
        serving_form: profile.serving_form,
        course_type: profile.course_type,
        min_budget: profile.min_budget,
        max_budget: profile.budget,
        min_rating: profile.min_rating,
        limit: POOL_SIZE,
        ..VenueFilters::default()
    };

    if let Some(keyword) = profile.keyword.as_deref() {
        filters.terms = expand(keyword);
    }

    let mut center = None;
    match (&profile.area, profile.radius_km) {
        (Some(area), Some(radius)) => match geocoder.geocode(area) {
            Some(coord) => {
                filters.bbox = Some(BoundingBox::around(coord, radius));
                center = Some(coord);
            }
            None => {
                warn!(area = %area, "area geocoding failed, falling back to district filter");
                filters.districts = vec![area.clone()];
            }
        },
        (Some(area), None) => {
            filters.districts = vec![area.clone()];
        }
        _ => {}
    }

    let mut venues = store.query(&filters);
    venues.truncate(POOL_SIZE);
    debug!(candidates = venues.len(), "retrieved candidate pool");
    (venues, center)
}

/// In-process venue store.
///
/// The reference implementation of the filter contract; used by tests and
/// by embeddings that load the venue dataset into memory. Record
/// validation happens here, at the store boundary: inverted price
/// intervals are repaired on insert.
#[derive(Debug, Default)]
pub struct MemoryVenueStore {
    venues: Vec<Venue>,
}

impl MemoryVenueStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, mut venue: Venue) {
        if let Some(price) = venue.price {
            if !price.is_valid() {
                warn!(venue = %venue.name, "inverted price interval, swapping bounds");
                venue.price = Some(PriceRange::new(price.max, price.min));
            }
        }
        self.venues.push(venue);
    }

    pub fn len(&self) -> usize {
        self.venues.len()
    }

    pub fn is_empty(&self) -> bool {
        self.venues.is_empty()
    }
}

impl FromIterator<Venue> for MemoryVenueStore {
    fn from_iter<I: IntoIterator<Item = Venue>>(iter: I) -> Self {
        let mut store = MemoryVenueStore::new();
        for venue in iter {
            store.insert(venue);
        }
        store
    }
}

impl VenueStore for MemoryVenueStore {
    fn query(&self, filters: &VenueFilters) -> Vec<Venue> {
        let limit = if filters.limit == 0 { usize::MAX } else { filters.limit };
        self.venues
            .iter()
            .filter(|venue| filters.matches(venue))
            .take(limit)
            .cloned()
            .collect()
    }
}
