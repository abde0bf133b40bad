//! Multi-stop route optimizer.
//!
//! Orders stops with a greedy nearest-neighbor pass (a heuristic, not an
//! optimal TSP solve; O(n²) and fine for tens of stops), then asks the
//! directions provider for a driving leg between each consecutive pair,
//! including the final leg back to the start. Individual leg failures are
//! skipped and recorded, never fatal.

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::error::PlanError;
use crate::geo::Coord;
use crate::polyline::Polyline;
use crate::traits::{DirectionsProvider, Geocoder, TravelMode};

/// One requested stop. Coordinates win over an address, an address over
/// the bare name.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StopDescriptor {
    pub name: String,
    pub address: Option<String>,
    pub coord: Option<Coord>,
}

impl StopDescriptor {
    pub fn named(name: &str) -> Self {
        Self { name: name.to_string(), address: None, coord: None }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RouteRequest {
    /// Free-text start point, resolved through the geocoder.
    pub start: String,
    pub stops: Vec<StopDescriptor>,
    /// Visit stops in the given order instead of optimizing.
    pub manual_order: bool,
    pub mode: TravelMode,
}

/// A stop with resolved coordinates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Waypoint {
    pub name: String,
    pub address: String,
    pub coord: Coord,
}

/// A planned multi-stop route.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoutePlan {
    /// Stop names in visitation order; always a permutation of the
    /// resolved input stops.
    pub order: Vec<String>,
    pub waypoints: Vec<Waypoint>,
    pub total_distance_m: f64,
    pub total_duration_s: f64,
    /// Encoded path from the start through every stop.
    pub outbound: String,
    /// Encoded path of the final leg back to the start.
    pub return_path: String,
    pub start: Coord,
    /// Indices (into the leg sequence) of legs the provider failed on.
    /// Failed legs contribute nothing to the totals or paths.
    pub failed_legs: Vec<usize>,
    pub from_cache: bool,
}

/// Plans a route from `request.start` through every resolvable stop and
/// back.
///
/// Fails only when the start cannot be geocoded or no stop resolves to
/// coordinates; every other upstream problem degrades the plan instead.
pub fn plan<G, D>(
    geocoder: &G,
    directions: &D,
    request: &RouteRequest,
) -> Result<RoutePlan, PlanError>
where
    G: Geocoder,
    D: DirectionsProvider,
{
    let start = geocoder
        .geocode(&request.start)
        .ok_or_else(|| PlanError::StartNotFound(request.start.clone()))?;

    let mut waypoints = Vec::with_capacity(request.stops.len());
    for stop in &request.stops {
        let coord = stop.coord.or_else(|| {
            stop.address
                .as_deref()
                .and_then(|addr| geocoder.geocode(addr))
                .or_else(|| geocoder.geocode(&stop.name))
        });
        match coord {
            Some(coord) => waypoints.push(Waypoint {
                name: stop.name.clone(),
                address: stop.address.clone().unwrap_or_default(),
                coord,
            }),
            None => warn!(stop = %stop.name, "stop could not be resolved, dropping"),
        }
    }
    if waypoints.is_empty() {
        return Err(PlanError::NoValidStops);
    }

    let ordered = if request.manual_order {
        waypoints
    } else {
        nearest_neighbor_order(start, waypoints)
    };

    let mut sequence = Vec::with_capacity(ordered.len() + 2);
    sequence.push(start);
    sequence.extend(ordered.iter().map(|w| w.coord));
    sequence.push(start);

    let mut outbound = Polyline::default();
    let mut return_path = Polyline::default();
    let mut total_distance_m = 0.0;
    let mut total_duration_s = 0.0;
    let mut failed_legs = Vec::new();
    let last_leg = sequence.len() - 2;

    for (i, pair) in sequence.windows(2).enumerate() {
        match directions.route(pair[0], pair[1], request.mode) {
            Some(leg) => {
                total_distance_m += leg.distance_m;
                total_duration_s += leg.duration_s;
                if i == last_leg {
                    return_path.extend_from(&leg.geometry);
                } else {
                    outbound.extend_from(&leg.geometry);
                }
            }
            None => {
                warn!(leg = i, "directions provider failed for leg, skipping");
                failed_legs.push(i);
            }
        }
    }

    debug!(
        stops = ordered.len(),
        failed = failed_legs.len(),
        distance_m = total_distance_m,
        "route planned"
    );

    Ok(RoutePlan {
        order: ordered.iter().map(|w| w.name.clone()).collect(),
        waypoints: ordered,
        total_distance_m,
        total_duration_s,
        outbound: outbound.encode(),
        return_path: return_path.encode(),
        start,
        failed_legs,
        from_cache: false,
    })
}

/// Greedy nearest-neighbor ordering in coordinate space.
fn nearest_neighbor_order(start: Coord, mut remaining: Vec<Waypoint>) -> Vec<Waypoint> {
    let mut ordered = Vec::with_capacity(remaining.len());
    let mut current = start;
    while !remaining.is_empty() {
        let mut nearest_idx = 0;
        let mut nearest_dist = current.euclidean(remaining[0].coord);
        for (i, candidate) in remaining.iter().enumerate().skip(1) {
            let dist = current.euclidean(candidate.coord);
            if dist < nearest_dist {
                nearest_idx = i;
                nearest_dist = dist;
            }
        }
        let next = remaining.remove(nearest_idx);
        current = next.coord;
        ordered.push(next);
    }
    ordered
}
