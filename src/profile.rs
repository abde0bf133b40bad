//! Preference profiles: what the user asked for, made explicit.
//!
//! A profile is built once at the API boundary from query parameters and
//! passed by value into pure scoring functions. Absent criteria are `None`
//! or empty sets, never sentinel strings.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::venue::{CourseType, FlavorSet, FoodType, ServingForm};

/// Named weighting profile selecting the score weight vector.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Archetype {
    /// Even trade-off between price, quality and taste affinity.
    #[default]
    Balanced,
    /// Budget-first.
    Saver,
    /// Quality and taste affinity first.
    Foodie,
}

impl Archetype {
    /// Parses an archetype tag, falling back to `Balanced` for unknown tags.
    pub fn parse(tag: &str) -> Archetype {
        match tag.trim().to_lowercase().as_str() {
            "saver" | "budget" => Archetype::Saver,
            "foodie" | "connoisseur" => Archetype::Foodie,
            _ => Archetype::Balanced,
        }
    }

    pub fn weights(self) -> ScoreWeights {
        match self {
            Archetype::Balanced => ScoreWeights { price: 0.3, rate: 0.2, tag: 0.4, distance: 0.1 },
            Archetype::Saver => ScoreWeights { price: 0.5, rate: 0.1, tag: 0.2, distance: 0.2 },
            Archetype::Foodie => ScoreWeights { price: 0.1, rate: 0.4, tag: 0.4, distance: 0.1 },
        }
    }
}

/// Weight vector applied to the normalized sub-scores. Each vector sums
/// to 1.0 so the weighted sum stays in [0, 1].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScoreWeights {
    pub price: f64,
    pub rate: f64,
    pub tag: f64,
    pub distance: f64,
}

/// Qualitative mood tags, matched via keyword association against venue
/// text rather than a structured field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Vibe {
    Romantic,
    Lively,
    Cozy,
    Family,
    Quiet,
}

impl Vibe {
    /// Folded keywords associated with the vibe, English and Vietnamese.
    pub fn synonyms(self) -> &'static [&'static str] {
        match self {
            Vibe::Romantic => &["romantic", "lang man", "hen ho", "couple", "date"],
            Vibe::Lively => &["lively", "soi dong", "nhon nhip", "party", "nhac song"],
            Vibe::Cozy => &["cozy", "am cung", "am ap", "nho xinh"],
            Vibe::Family => &["family", "gia dinh", "tre em", "kid"],
            Vibe::Quiet => &["quiet", "yen tinh", "thanh binh", "lam viec", "study"],
        }
    }

    pub fn parse(tag: &str) -> Option<Vibe> {
        match crate::normalize::fold(tag).trim() {
            "romantic" | "lang man" => Some(Vibe::Romantic),
            "lively" | "soi dong" => Some(Vibe::Lively),
            "cozy" | "am cung" => Some(Vibe::Cozy),
            "family" | "gia dinh" => Some(Vibe::Family),
            "quiet" | "yen tinh" => Some(Vibe::Quiet),
            _ => None,
        }
    }
}

/// Everything the user asked for, for the duration of one ranking call.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PreferenceProfile {
    pub archetype: Archetype,
    /// Budget ceiling in the venue store's currency units.
    pub budget: Option<u32>,
    /// Lower price bound, when the user wants to avoid cheap venues.
    pub min_budget: Option<u32>,
    pub cuisines: HashSet<String>,
    pub flavors: FlavorSet,
    pub vibes: HashSet<Vibe>,
    pub keyword: Option<String>,
    pub food_type: Option<FoodType>,
    pub serving_form: Option<ServingForm>,
    pub course_type: Option<CourseType>,
    /// Named area ("Quận 1") to center the search on.
    pub area: Option<String>,
    /// Search radius in kilometers around the area center.
    pub radius_km: Option<f64>,
    pub min_rating: Option<f64>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn archetype_parse_falls_back_to_balanced() {
        assert_eq!(Archetype::parse("saver"), Archetype::Saver);
        assert_eq!(Archetype::parse("connoisseur"), Archetype::Foodie);
        assert_eq!(Archetype::parse("whatever"), Archetype::Balanced);
    }

    #[test]
    fn weight_vectors_sum_to_one() {
        for archetype in [Archetype::Balanced, Archetype::Saver, Archetype::Foodie] {
            let w = archetype.weights();
            let sum = w.price + w.rate + w.tag + w.distance;
            assert!((sum - 1.0).abs() < 1e-9, "{archetype:?} sums to {sum}");
        }
    }

    #[test]
    fn vibe_parse_accepts_vietnamese() {
        assert_eq!(Vibe::parse("Lãng mạn"), Some(Vibe::Romantic));
        assert_eq!(Vibe::parse("yên tĩnh"), Some(Vibe::Quiet));
        assert_eq!(Vibe::parse("brutalist"), None);
    }
}
