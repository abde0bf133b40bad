//! Live Goong API smoke tests. Require a real key:
//!
//! ```sh
//! GOONG_API_KEY=... cargo test -- --ignored
//! ```

use food_tour_core::geo::Coord;
use food_tour_core::goong::{GoongClient, GoongConfig};
use food_tour_core::traits::{DirectionsProvider, Geocoder, TravelMode};

fn client() -> Option<GoongClient> {
    let api_key = std::env::var("GOONG_API_KEY").ok()?;
    GoongClient::new(GoongConfig { api_key, ..GoongConfig::default() }).ok()
}

#[test]
#[ignore = "requires a live GOONG_API_KEY"]
fn geocodes_a_known_landmark() {
    let Some(client) = client() else {
        panic!("set GOONG_API_KEY to run this test");
    };
    let coord = client
        .geocode("Chợ Bến Thành, Quận 1, Hồ Chí Minh")
        .expect("landmark should geocode");
    assert!((coord.lat - 10.772).abs() < 0.05);
    assert!((coord.lon - 106.698).abs() < 0.05);
}

#[test]
#[ignore = "requires a live GOONG_API_KEY"]
fn routes_between_two_points() {
    let Some(client) = client() else {
        panic!("set GOONG_API_KEY to run this test");
    };
    let origin = Coord::new(10.772, 106.698);
    let dest = Coord::new(10.7865, 106.6917);
    let leg = client
        .route(origin, dest, TravelMode::Car)
        .expect("route should exist");
    assert!(leg.distance_m > 500.0);
    assert!(leg.duration_s > 0.0);
    assert!(!leg.geometry.is_empty());
}
