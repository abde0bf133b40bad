//! Route cache over the archive.
//!
//! Two route requests are "the same" when their start text matches
//! case-insensitively and their stops have the same *name set* — order,
//! addresses and coordinates are ignored. That key is loose: a stop name
//! that later resolves to a different address will still hit the old plan.
//! The archived records keep the verbatim addresses, so a stricter key can
//! be layered on by callers that need it.

use std::collections::HashSet;

use tracing::{debug, warn};

use crate::archive::{ArchivedRoute, ArchivedStop, NewArchivedRoute};
use crate::error::PlanError;
use crate::geo::Coord;
use crate::optimizer::{plan, RoutePlan, RouteRequest, StopDescriptor, Waypoint};
use crate::polyline::Polyline;
use crate::traits::{DirectionsProvider, Geocoder, RouteArchive};

/// Stop-name set equality, the cache's notion of "the same trip".
fn same_stop_names(requested: &[StopDescriptor], archived: &[ArchivedStop]) -> bool {
    let a: HashSet<&str> = requested.iter().map(|s| s.name.trim()).collect();
    let b: HashSet<&str> = archived.iter().map(|s| s.name.trim()).collect();
    a == b
}

/// Rebuilds a plan from an archived route.
///
/// The start coordinate is recovered from the first point of the stored
/// outbound path; an undecodable path is only a recovery miss, so we fall
/// back to re-geocoding the start text and finally to a (0,0) sentinel.
fn rebuild<G: Geocoder>(geocoder: &G, record: &ArchivedRoute) -> RoutePlan {
    let decoded_start = match Polyline::decode(&record.outbound) {
        Ok(path) => path.first().map(|(lat, lon)| Coord::new(lat, lon)),
        Err(err) => {
            warn!(route = record.id, %err, "archived outbound path undecodable");
            None
        }
    };
    let start = decoded_start
        .or_else(|| geocoder.geocode(&record.start_point))
        .unwrap_or(Coord::ZERO);

    RoutePlan {
        order: record.stops.iter().map(|s| s.name.clone()).collect(),
        waypoints: record
            .stops
            .iter()
            .map(|s| Waypoint {
                name: s.name.clone(),
                address: s.address.clone().unwrap_or_default(),
                coord: s.coord.unwrap_or(Coord::ZERO),
            })
            .collect(),
        total_distance_m: record.total_distance_m,
        total_duration_s: record.total_duration_s,
        outbound: record.outbound.clone(),
        return_path: record.return_path.clone(),
        start,
        failed_legs: Vec::new(),
        from_cache: true,
    }
}

/// Looks a route request up in the archive.
pub fn lookup<A, G>(
    archive: &A,
    geocoder: &G,
    start: &str,
    stops: &[StopDescriptor],
) -> Option<RoutePlan>
where
    A: RouteArchive,
    G: Geocoder,
{
    for record in archive.find_by_start(start) {
        if same_stop_names(stops, &record.stops) {
            debug!(route = record.id, "route cache hit");
            return Some(rebuild(geocoder, &record));
        }
    }
    debug!(start = %start, "route cache miss");
    None
}

/// Maximum start-text length reflected into the default display name.
const NAME_PREFIX_LEN: usize = 20;

fn default_name(start: &str) -> String {
    let prefix: String = start.chars().take(NAME_PREFIX_LEN).collect();
    if prefix.len() < start.len() {
        format!("Route from {prefix}...")
    } else {
        format!("Route from {prefix}")
    }
}

/// Persists a freshly computed plan.
///
/// Stops are stored in visitation order so a cache hit replays the
/// original order. Requested stops that never resolved still go in (at
/// the end) so the stored name set stays equal to the requested one.
pub fn store<A: RouteArchive>(
    archive: &A,
    user: &str,
    request: &RouteRequest,
    plan: &RoutePlan,
) -> Result<ArchivedRoute, crate::error::ArchiveError> {
    let mut stops: Vec<ArchivedStop> = plan
        .waypoints
        .iter()
        .map(|w| ArchivedStop {
            name: w.name.clone(),
            address: Some(w.address.clone()).filter(|a| !a.is_empty()),
            coord: Some(w.coord),
        })
        .collect();
    for requested in &request.stops {
        if !stops.iter().any(|s| s.name == requested.name) {
            stops.push(ArchivedStop::from(requested));
        }
    }

    archive.save(NewArchivedRoute {
        name: default_name(&request.start),
        user: user.to_string(),
        start_point: request.start.clone(),
        stops,
        total_distance_m: plan.total_distance_m,
        total_duration_s: plan.total_duration_s,
        outbound: plan.outbound.clone(),
        return_path: plan.return_path.clone(),
    })
}

/// The full route flow: cache lookup, optimize on miss, persist.
///
/// An archive write failure is logged and swallowed; the computed plan is
/// still returned.
pub fn plan_with_cache<A, G, D>(
    archive: &A,
    geocoder: &G,
    directions: &D,
    user: &str,
    request: &RouteRequest,
) -> Result<RoutePlan, PlanError>
where
    A: RouteArchive,
    G: Geocoder,
    D: DirectionsProvider,
{
    if let Some(cached) = lookup(archive, geocoder, &request.start, &request.stops) {
        return Ok(cached);
    }

    let computed = plan(geocoder, directions, request)?;
    if let Err(err) = store(archive, user, request, &computed) {
        warn!(%err, "failed to archive computed route");
    }
    Ok(computed)
}
