//! Multi-criteria ranking engine.
//!
//! `score` is a pure function of its inputs: no I/O, no shared state, safe
//! to evaluate for the whole candidate pool in parallel. Sub-scores are
//! each normalized to [0, 1], combined by the archetype's weight vector,
//! scaled to 100 and topped with a small weather-context bonus.

use std::cmp::Ordering;

use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::geo::Coord;
use crate::normalize::{contains_folded, fold};
use crate::profile::PreferenceProfile;
use crate::traits::WeatherReport;
use crate::venue::Venue;

/// Fixed normalization cap for the additive tag point system.
const MAX_TAG_POINTS: f64 = 10.0;

/// Venues scoring at or below this are dropped from results.
const MIN_SCORE: f64 = 0.0;

/// Stand-in average price for venues with no price data.
const DEFAULT_AVG_PRICE: f64 = 50_000.0;

/// Gaussian decay width as a fraction of the stated budget.
const SIGMA_FRACTION: f64 = 0.5;

/// Floor on sigma so tiny budgets don't collapse the decay.
const SIGMA_FLOOR: f64 = 1_000.0;

/// Flat bonus when the weather suggests the venue's fare.
const WEATHER_BONUS: f64 = 5.0;

/// Request-scoped context the profile itself doesn't carry.
#[derive(Debug, Clone, Copy, Default)]
pub struct ScoreContext {
    /// Resolved area center, when radius search is active.
    pub center: Option<Coord>,
    pub radius_km: Option<f64>,
    /// Current time as minutes since midnight, for open-now display.
    pub now: Option<u16>,
}

/// A venue paired with its match score and display fields.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoredVenue {
    pub venue: Venue,
    /// Match score on a 0-100 scale.
    pub score: f64,
    pub open_now: bool,
    pub distance_km: Option<f64>,
}

/// Price fit: full credit at or under budget, Gaussian decay over it.
pub fn price_score(venue: &Venue, budget: Option<u32>) -> f64 {
    let Some(budget) = budget.filter(|b| *b > 0) else {
        return 1.0;
    };
    let budget = budget as f64;
    let avg = venue.average_price().unwrap_or(DEFAULT_AVG_PRICE);
    if avg <= budget {
        return 1.0;
    }
    let sigma = (budget * SIGMA_FRACTION).max(SIGMA_FLOOR);
    let overage = avg - budget;
    (-(overage * overage) / (2.0 * sigma * sigma)).exp()
}

/// Rating on a 0-1 scale.
pub fn rating_score(venue: &Venue) -> f64 {
    (venue.rating / 5.0).clamp(0.0, 1.0)
}

/// Additive tag/flavor/vibe/keyword affinity, saturating at 1.0.
pub fn tag_score(venue: &Venue, profile: &PreferenceProfile) -> f64 {
    let mut points = 0.0;

    if let Some(cuisine) = venue.cuisine.as_deref() {
        if !profile.cuisines.is_empty()
            && profile.cuisines.iter().any(|c| fold(c) == fold(cuisine))
        {
            points += 5.0;
        }
    }

    if !profile.flavors.is_empty() && !venue.flavors.is_empty() {
        let shared = venue.flavors.intersection(&profile.flavors).count() as f64;
        points += shared.min(3.0);
    }

    if profile.food_type.is_some() && venue.food_type == profile.food_type {
        points += 0.5;
    }
    if profile.serving_form.is_some() && venue.serving_form == profile.serving_form {
        points += 0.5;
    }
    if profile.course_type.is_some() && venue.course_type == profile.course_type {
        points += 0.5;
    }

    // Vibes are unstructured: look the vibe's synonym keywords up in the
    // venue text. Category/cuisine hits count more than description hits.
    let folded_category = fold(&venue.category);
    let folded_cuisine = venue.cuisine.as_deref().map(|c| fold(c)).unwrap_or_default();
    let folded_description = {
        let mut d = fold(&venue.description);
        if let Some(alt) = venue.description_alt.as_deref() {
            d.push(' ');
            d.push_str(&fold(alt));
        }
        d
    };
    for vibe in &profile.vibes {
        let synonyms = vibe.synonyms();
        if synonyms
            .iter()
            .any(|s| folded_category.contains(s) || folded_cuisine.contains(s))
        {
            points += 1.0;
        } else if synonyms.iter().any(|s| folded_description.contains(s)) {
            points += 0.5;
        }
    }

    if let Some(keyword) = profile.keyword.as_deref().filter(|k| !k.trim().is_empty()) {
        if contains_folded(&venue.name, keyword) {
            points += 2.0;
        } else if folded_category.contains(&fold(keyword))
            || folded_cuisine.contains(&fold(keyword))
        {
            points += 1.0;
        } else if folded_description.contains(&fold(keyword)) {
            points += 0.5;
        }
    }

    points.min(MAX_TAG_POINTS) / MAX_TAG_POINTS
}

/// Linear decay inside the radius, zero outside or without radius context.
pub fn distance_score(distance_km: Option<f64>, radius_km: Option<f64>) -> f64 {
    match (distance_km, radius_km) {
        (Some(d), Some(r)) if r > 0.0 => (1.0 - d / r).clamp(0.0, 1.0),
        _ => 0.0,
    }
}

fn folded_weather_desc(weather: &WeatherReport) -> String {
    fold(&weather.description)
}

fn is_chilly(weather: &WeatherReport) -> bool {
    let desc = folded_weather_desc(weather);
    weather.temperature_c < 20.0
        || ["rain", "mua", "storm", "drizzle"].iter().any(|t| desc.contains(t))
}

fn is_hot(weather: &WeatherReport) -> bool {
    weather.temperature_c >= 32.0
}

const WARMING_FARE: &[&str] = &["lau", "hotpot", "nuong", "grill", "bbq", "cay", "spicy"];
const COOLING_FARE: &[&str] = &[
    "kem", "ice cream", "sinh to", "smoothie", "salad", "goi", "bia", "beer", "che", "nuoc ep",
];

/// Small flat bump for fare that fits the current weather. Applied after
/// the weighted sum, never part of it.
pub fn weather_bonus(venue: &Venue, weather: Option<&WeatherReport>) -> f64 {
    let Some(weather) = weather else { return 0.0 };
    let text = venue.folded_text();
    if is_chilly(weather) && WARMING_FARE.iter().any(|t| text.contains(t)) {
        return WEATHER_BONUS;
    }
    if is_hot(weather) && COOLING_FARE.iter().any(|t| text.contains(t)) {
        return WEATHER_BONUS;
    }
    0.0
}

/// Scores one venue against the profile. Deterministic; returns a value
/// in [0, 100].
pub fn score(
    venue: &Venue,
    profile: &PreferenceProfile,
    weather: Option<&WeatherReport>,
    ctx: &ScoreContext,
) -> f64 {
    let weights = profile.archetype.weights();
    let distance_km = match (ctx.center, venue.coord) {
        (Some(center), Some(coord)) => Some(center.haversine_km(coord)),
        _ => None,
    };

    let weighted = price_score(venue, profile.budget) * weights.price
        + rating_score(venue) * weights.rate
        + tag_score(venue, profile) * weights.tag
        + distance_score(distance_km, ctx.radius_km) * weights.distance;

    (weighted * 100.0 + weather_bonus(venue, weather)).min(100.0)
}

/// Scores, filters and sorts a candidate pool.
///
/// Sorted by (open-now descending, score descending); the sort is stable
/// so equally scored venues keep their retrieval order.
pub fn rank(
    venues: Vec<Venue>,
    profile: &PreferenceProfile,
    weather: Option<&WeatherReport>,
    ctx: &ScoreContext,
) -> Vec<ScoredVenue> {
    let mut scored: Vec<ScoredVenue> = venues
        .into_par_iter()
        .map(|venue| {
            let value = score(&venue, profile, weather, ctx);
            let distance_km = match (ctx.center, venue.coord) {
                (Some(center), Some(coord)) => Some(center.haversine_km(coord)),
                _ => None,
            };
            let open_now = match (venue.hours, ctx.now) {
                (Some(hours), Some(now)) => hours.contains(now),
                _ => false,
            };
            ScoredVenue { venue, score: value, open_now, distance_km }
        })
        .filter(|sv| sv.score > MIN_SCORE)
        .collect();

    scored.sort_by(|a, b| {
        b.open_now
            .cmp(&a.open_now)
            .then(b.score.partial_cmp(&a.score).unwrap_or(Ordering::Equal))
    });
    scored
}
