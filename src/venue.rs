//! Venue records and their closed classification vocabularies.
//!
//! Venues are produced by an offline pipeline and are read-only here.
//! The stringly-typed tags that pipeline emits (delimited flavor lists,
//! free-text type labels) are parsed into enums at the store boundary so
//! scoring code never touches raw strings.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::geo::Coord;
use crate::normalize::fold;

/// Vegetarian or not. "Both"/unknown is represented by `None` on the venue.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FoodType {
    Vegetarian,
    NonVegetarian,
}

/// Whether the venue serves drinks, food, or both.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ServingForm {
    Liquid,
    Solid,
    Both,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CourseType {
    Main,
    Dessert,
}

/// Flavor vocabulary. A venue carries a possibly-empty set of these.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Flavor {
    Spicy,
    Sweet,
    Sour,
    Bitter,
    Salty,
    Fatty,
    Light,
}

pub type FlavorSet = HashSet<Flavor>;

impl Flavor {
    /// Parses a single flavor label, accepting English and Vietnamese
    /// spellings, diacritic-insensitively.
    pub fn parse(raw: &str) -> Option<Flavor> {
        match fold(raw).trim() {
            "spicy" | "cay" => Some(Flavor::Spicy),
            "sweet" | "ngot" => Some(Flavor::Sweet),
            "sour" | "chua" => Some(Flavor::Sour),
            "bitter" | "dang" => Some(Flavor::Bitter),
            "salty" | "man" => Some(Flavor::Salty),
            "fatty" | "beo" => Some(Flavor::Fatty),
            "light" | "thanh dam" | "nhe" => Some(Flavor::Light),
            _ => None,
        }
    }

    /// Parses a delimited flavor list as stored by the pipeline
    /// ("Cay, Ngọt"). Unknown labels are dropped.
    pub fn parse_set(raw: &str) -> FlavorSet {
        raw.split(',').filter_map(Flavor::parse).collect()
    }
}

/// Price interval in integer currency units. `min <= max` once validated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PriceRange {
    pub min: u32,
    pub max: u32,
}

impl PriceRange {
    pub fn new(min: u32, max: u32) -> Self {
        Self { min, max }
    }

    pub fn average(&self) -> f64 {
        (self.min as f64 + self.max as f64) / 2.0
    }

    pub fn is_valid(&self) -> bool {
        self.min <= self.max
    }
}

/// Daily opening hours in minutes since midnight. May wrap past midnight
/// (e.g. open 18:00, close 02:00). `open == close` means open around the
/// clock, the way 24-hour venues are exported.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct OpenHours {
    pub open: u16,
    pub close: u16,
}

impl OpenHours {
    pub fn contains(&self, minute: u16) -> bool {
        if self.open == self.close {
            true
        } else if self.open < self.close {
            minute >= self.open && minute < self.close
        } else {
            minute >= self.open || minute < self.close
        }
    }
}

/// A restaurant / cafe record as served by the venue store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Venue {
    pub id: i64,
    pub place_id: String,
    pub name: String,
    pub address: String,
    pub district: String,
    pub coord: Option<Coord>,
    /// Aggregate rating, 0 to 5. 0 means unrated.
    pub rating: f64,
    pub price: Option<PriceRange>,
    pub hours: Option<OpenHours>,
    pub description: String,
    /// Secondary-language description, when the source had one.
    pub description_alt: Option<String>,
    pub category: String,
    pub cuisine: Option<String>,
    pub food_type: Option<FoodType>,
    pub serving_form: Option<ServingForm>,
    pub course_type: Option<CourseType>,
    pub flavors: FlavorSet,
}

impl Venue {
    /// Mean of the price interval, if any price data exists.
    pub fn average_price(&self) -> Option<f64> {
        let price = self.price?;
        let avg = price.average();
        if avg == 0.0 { None } else { Some(avg) }
    }

    /// All free-text fields joined and folded, for keyword-style matching.
    pub fn folded_text(&self) -> String {
        let mut text = fold(&self.name);
        for part in [
            Some(self.category.as_str()),
            self.cuisine.as_deref(),
            Some(self.description.as_str()),
            self.description_alt.as_deref(),
        ]
        .into_iter()
        .flatten()
        {
            text.push(' ');
            text.push_str(&fold(part));
        }
        text
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_bilingual_flavor_labels() {
        assert_eq!(Flavor::parse("Cay"), Some(Flavor::Spicy));
        assert_eq!(Flavor::parse("Ngọt"), Some(Flavor::Sweet));
        assert_eq!(Flavor::parse("sour"), Some(Flavor::Sour));
        assert_eq!(Flavor::parse("umami"), None);
    }

    #[test]
    fn parses_delimited_flavor_list() {
        let set = Flavor::parse_set("Cay, Ngọt, mystery");
        assert_eq!(set.len(), 2);
        assert!(set.contains(&Flavor::Spicy));
        assert!(set.contains(&Flavor::Sweet));
    }

    #[test]
    fn open_hours_regular_day() {
        let hours = OpenHours { open: 8 * 60, close: 22 * 60 };
        assert!(hours.contains(12 * 60));
        assert!(!hours.contains(23 * 60));
    }

    #[test]
    fn open_hours_round_the_clock() {
        let hours = OpenHours { open: 0, close: 0 };
        assert!(hours.contains(0));
        assert!(hours.contains(12 * 60));
        assert!(hours.contains(23 * 60 + 59));
    }

    #[test]
    fn open_hours_wrapping_past_midnight() {
        let hours = OpenHours { open: 18 * 60, close: 2 * 60 };
        assert!(hours.contains(23 * 60));
        assert!(hours.contains(60));
        assert!(!hours.contains(12 * 60));
    }

    #[test]
    fn price_average() {
        let price = PriceRange::new(30_000, 70_000);
        assert_eq!(price.average(), 50_000.0);
        assert!(price.is_valid());
        assert!(!PriceRange::new(10, 5).is_valid());
    }
}
