//! Shared test fixtures: a venue builder, sample Saigon venues, and mock
//! provider implementations.
#![allow(dead_code)]

use std::collections::HashMap;

use food_tour_core::geo::Coord;
use food_tour_core::polyline::Polyline;
use food_tour_core::traits::{
    DirectionsProvider, Geocoder, RouteLeg, TravelMode, WeatherProvider, WeatherReport,
};
use food_tour_core::venue::{
    CourseType, Flavor, FlavorSet, FoodType, OpenHours, PriceRange, ServingForm, Venue,
};

/// Builder for test venues with sensible defaults.
#[derive(Clone, Debug)]
pub struct VenueBuilder {
    venue: Venue,
}

impl VenueBuilder {
    pub fn new(id: i64, name: &str) -> Self {
        Self {
            venue: Venue {
                id,
                place_id: format!("place-{id}"),
                name: name.to_string(),
                address: String::new(),
                district: String::new(),
                coord: None,
                rating: 0.0,
                price: None,
                hours: None,
                description: String::new(),
                description_alt: None,
                category: String::new(),
                cuisine: None,
                food_type: None,
                serving_form: None,
                course_type: None,
                flavors: FlavorSet::new(),
            },
        }
    }

    pub fn coord(mut self, lat: f64, lon: f64) -> Self {
        self.venue.coord = Some(Coord::new(lat, lon));
        self
    }

    pub fn rating(mut self, rating: f64) -> Self {
        self.venue.rating = rating;
        self
    }

    pub fn price(mut self, min: u32, max: u32) -> Self {
        self.venue.price = Some(PriceRange::new(min, max));
        self
    }

    pub fn hours(mut self, open: u16, close: u16) -> Self {
        self.venue.hours = Some(OpenHours { open, close });
        self
    }

    pub fn district(mut self, district: &str) -> Self {
        self.venue.district = district.to_string();
        self
    }

    pub fn category(mut self, category: &str) -> Self {
        self.venue.category = category.to_string();
        self
    }

    pub fn cuisine(mut self, cuisine: &str) -> Self {
        self.venue.cuisine = Some(cuisine.to_string());
        self
    }

    pub fn description(mut self, description: &str) -> Self {
        self.venue.description = description.to_string();
        self
    }

    pub fn food_type(mut self, food_type: FoodType) -> Self {
        self.venue.food_type = Some(food_type);
        self
    }

    pub fn serving_form(mut self, serving_form: ServingForm) -> Self {
        self.venue.serving_form = Some(serving_form);
        self
    }

    pub fn course_type(mut self, course_type: CourseType) -> Self {
        self.venue.course_type = Some(course_type);
        self
    }

    pub fn flavors(mut self, flavors: &[Flavor]) -> Self {
        self.venue.flavors = flavors.iter().copied().collect();
        self
    }

    pub fn build(self) -> Venue {
        self.venue
    }
}

/// A handful of venues around District 1, Ho Chi Minh City.
pub fn saigon_venues() -> Vec<Venue> {
    vec![
        VenueBuilder::new(1, "Phở Hòa Pasteur")
            .coord(10.7865, 106.6917)
            .district("Quận 1")
            .category("Quán phở")
            .cuisine("Món Việt")
            .rating(4.3)
            .price(50_000, 90_000)
            .hours(6 * 60, 22 * 60)
            .description("Phở bò truyền thống, nước dùng đậm đà")
            .flavors(&[Flavor::Salty, Flavor::Fatty])
            .build(),
        VenueBuilder::new(2, "Lẩu Dê 404")
            .coord(10.7590, 106.6822)
            .district("Quận 5")
            .category("Quán lẩu")
            .cuisine("Món Việt")
            .rating(4.0)
            .price(150_000, 300_000)
            .hours(16 * 60, 23 * 60)
            .description("Lẩu dê cay nóng cho ngày mưa")
            .flavors(&[Flavor::Spicy])
            .build(),
        VenueBuilder::new(3, "Sushi Rei")
            .coord(10.7812, 106.7002)
            .district("Quận 1")
            .category("Nhà hàng Nhật")
            .cuisine("Món Nhật")
            .rating(4.8)
            .price(400_000, 900_000)
            .hours(11 * 60, 22 * 60)
            .description("Omakase, không gian yên tĩnh lãng mạn")
            .build(),
        VenueBuilder::new(4, "Kem Bạch Đằng")
            .coord(10.7738, 106.7040)
            .district("Quận 1")
            .category("Quán kem")
            .cuisine("Tráng miệng")
            .rating(4.1)
            .price(30_000, 60_000)
            .hours(9 * 60, 23 * 60)
            .description("Kem dừa, sinh tố mát lạnh")
            .flavors(&[Flavor::Sweet])
            .build(),
    ]
}

/// Geocoder backed by a fixed table. Lookups are case-insensitive.
#[derive(Debug, Default)]
pub struct StaticGeocoder {
    entries: HashMap<String, Coord>,
}

impl StaticGeocoder {
    pub fn new(entries: &[(&str, Coord)]) -> Self {
        Self {
            entries: entries
                .iter()
                .map(|(k, v)| (k.to_lowercase(), *v))
                .collect(),
        }
    }
}

impl Geocoder for StaticGeocoder {
    fn geocode(&self, query: &str) -> Option<Coord> {
        self.entries.get(&query.to_lowercase()).copied()
    }

    fn reverse(&self, _coord: Coord) -> Option<String> {
        None
    }
}

/// Geocoder that never resolves anything.
#[derive(Debug, Default)]
pub struct NullGeocoder;

impl Geocoder for NullGeocoder {
    fn geocode(&self, _query: &str) -> Option<Coord> {
        None
    }

    fn reverse(&self, _coord: Coord) -> Option<String> {
        None
    }
}

/// Directions provider that synthesizes a straight leg between the two
/// points: 100 km/degree of straight-line distance, 40 km/h driving.
#[derive(Debug, Default)]
pub struct StraightLineDirections;

impl DirectionsProvider for StraightLineDirections {
    fn route(&self, origin: Coord, dest: Coord, _mode: TravelMode) -> Option<RouteLeg> {
        let distance_m = origin.euclidean(dest) * 100_000.0;
        Some(RouteLeg {
            distance_m,
            duration_s: distance_m / (40_000.0 / 3600.0),
            geometry: Polyline::new(vec![(origin.lat, origin.lon), (dest.lat, dest.lon)]),
        })
    }
}

/// Directions provider that fails for legs touching a given point.
#[derive(Debug)]
pub struct FlakyDirections {
    pub dead_point: Coord,
}

impl DirectionsProvider for FlakyDirections {
    fn route(&self, origin: Coord, dest: Coord, mode: TravelMode) -> Option<RouteLeg> {
        if origin == self.dead_point || dest == self.dead_point {
            return None;
        }
        StraightLineDirections.route(origin, dest, mode)
    }
}

/// Weather provider returning a fixed report.
#[derive(Debug)]
pub struct FixedWeather(pub WeatherReport);

impl WeatherProvider for FixedWeather {
    fn current(&self, _city: &str) -> Option<WeatherReport> {
        Some(self.0.clone())
    }
}

/// Weather provider that is always down.
#[derive(Debug, Default)]
pub struct NoWeather;

impl WeatherProvider for NoWeather {
    fn current(&self, _city: &str) -> Option<WeatherReport> {
        None
    }
}

pub fn rainy_weather() -> WeatherReport {
    WeatherReport {
        city: "Ho Chi Minh City".to_string(),
        description: "mưa vừa".to_string(),
        temperature_c: 24.0,
        humidity: Some(90.0),
    }
}

pub fn hot_weather() -> WeatherReport {
    WeatherReport {
        city: "Ho Chi Minh City".to_string(),
        description: "trời nắng".to_string(),
        temperature_c: 35.0,
        humidity: Some(60.0),
    }
}
