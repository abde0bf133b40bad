//! Route cache behavior: hits, key semantics, degraded rebuilds.

mod fixtures;

use std::io;

use fixtures::{NullGeocoder, StaticGeocoder, StraightLineDirections};
use food_tour_core::archive::{ArchivedRoute, ArchivedStop, MemoryRouteArchive, NewArchivedRoute};
use food_tour_core::cache::{lookup, plan_with_cache};
use food_tour_core::error::ArchiveError;
use food_tour_core::geo::Coord;
use food_tour_core::optimizer::{RouteRequest, StopDescriptor};
use food_tour_core::traits::{RouteArchive, TravelMode};

fn geocoder() -> StaticGeocoder {
    StaticGeocoder::new(&[
        ("Bến Thành Market", Coord::new(10.772, 106.698)),
        ("pho", Coord::new(10.78, 106.69)),
        ("kem", Coord::new(10.77, 106.70)),
        ("lau", Coord::new(10.76, 106.68)),
    ])
}

fn request(start: &str, stops: &[&str]) -> RouteRequest {
    RouteRequest {
        start: start.to_string(),
        stops: stops.iter().map(|s| StopDescriptor::named(s)).collect(),
        manual_order: false,
        mode: TravelMode::Car,
    }
}

#[test]
fn second_identical_request_hits_the_cache() {
    let archive = MemoryRouteArchive::new();
    let geocoder = geocoder();
    let directions = StraightLineDirections;

    let first = plan_with_cache(
        &archive,
        &geocoder,
        &directions,
        "an",
        &request("Bến Thành Market", &["pho", "kem", "lau"]),
    )
    .unwrap();
    assert!(!first.from_cache);

    // Same trip spelled differently: start lowercased, stops reordered.
    let second = plan_with_cache(
        &archive,
        &geocoder,
        &directions,
        "an",
        &request("bến thành market", &["lau", "pho", "kem"]),
    )
    .unwrap();
    assert!(second.from_cache);
    assert_eq!(second.order, first.order);
    assert_eq!(second.outbound, first.outbound);
    assert_eq!(second.total_distance_m, first.total_distance_m);

    // The hit did not add a second record.
    assert_eq!(archive.list_for_user("an").len(), 1);
}

#[test]
fn different_stop_set_misses() {
    let archive = MemoryRouteArchive::new();
    let geocoder = geocoder();
    let directions = StraightLineDirections;

    plan_with_cache(&archive, &geocoder, &directions, "an", &request("pho", &["kem"])).unwrap();
    let other = plan_with_cache(
        &archive,
        &geocoder,
        &directions,
        "an",
        &request("pho", &["kem", "lau"]),
    )
    .unwrap();
    assert!(!other.from_cache);
    assert_eq!(archive.list_for_user("an").len(), 2);
}

#[test]
fn cached_plan_recovers_start_from_stored_path() {
    let archive = MemoryRouteArchive::new();
    let geocoder = geocoder();
    let directions = StraightLineDirections;

    let request = request("Bến Thành Market", &["pho"]);
    let computed =
        plan_with_cache(&archive, &geocoder, &directions, "an", &request).unwrap();

    // Even without a working geocoder, the start comes back from the
    // first point of the archived outbound path.
    let cached = lookup(&archive, &NullGeocoder, &request.start, &request.stops).unwrap();
    assert!((cached.start.lat - computed.start.lat).abs() < 1e-5);
    assert!((cached.start.lon - computed.start.lon).abs() < 1e-5);
}

fn corrupt_record(start: &str, stop: &str) -> NewArchivedRoute {
    NewArchivedRoute {
        name: format!("Route from {start}"),
        user: "an".to_string(),
        start_point: start.to_string(),
        stops: vec![ArchivedStop {
            name: stop.to_string(),
            address: None,
            coord: None,
        }],
        total_distance_m: 1000.0,
        total_duration_s: 200.0,
        outbound: "\u{1}\u{2}".to_string(),
        return_path: String::new(),
    }
}

#[test]
fn corrupt_path_falls_back_to_geocoding_the_start() {
    let archive = MemoryRouteArchive::new();
    archive.save(corrupt_record("Bến Thành Market", "pho")).unwrap();

    let stops = vec![StopDescriptor::named("pho")];
    let cached = lookup(&archive, &geocoder(), "Bến Thành Market", &stops).unwrap();
    assert_eq!(cached.start, Coord::new(10.772, 106.698));
}

#[test]
fn corrupt_path_without_geocoder_yields_sentinel_origin() {
    let archive = MemoryRouteArchive::new();
    archive.save(corrupt_record("somewhere", "pho")).unwrap();

    let stops = vec![StopDescriptor::named("pho")];
    let cached = lookup(&archive, &NullGeocoder, "somewhere", &stops).unwrap();
    assert_eq!(cached.start, Coord::ZERO);
    assert!(cached.from_cache);
    assert!(cached.failed_legs.is_empty());
}

/// Archive that rejects every write.
struct BrokenArchive;

impl RouteArchive for BrokenArchive {
    fn find_by_start(&self, _start: &str) -> Vec<ArchivedRoute> {
        Vec::new()
    }

    fn save(&self, _route: NewArchivedRoute) -> Result<ArchivedRoute, ArchiveError> {
        Err(ArchiveError::Io(io::Error::new(io::ErrorKind::Other, "disk full")))
    }

    fn list_for_user(&self, _user: &str) -> Vec<ArchivedRoute> {
        Vec::new()
    }

    fn rename(&self, id: i64, _name: &str) -> Result<(), ArchiveError> {
        Err(ArchiveError::NotFound(id))
    }

    fn delete(&self, id: i64) -> Result<(), ArchiveError> {
        Err(ArchiveError::NotFound(id))
    }
}

#[test]
fn archive_write_failure_still_returns_the_plan() {
    let plan = plan_with_cache(
        &BrokenArchive,
        &geocoder(),
        &StraightLineDirections,
        "an",
        &request("pho", &["kem"]),
    )
    .unwrap();
    assert!(!plan.from_cache);
    assert_eq!(plan.order, vec!["kem"]);
}
