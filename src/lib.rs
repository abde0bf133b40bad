//! food-tour-core
//!
//! Decision core for a food-tour application: multi-criteria restaurant
//! ranking plus multi-stop route planning with a durable route archive.
//! The web surface, persistence schema and data ingestion live elsewhere;
//! this crate talks to them through the provider traits in [`traits`].

pub mod archive;
pub mod cache;
pub mod error;
pub mod geo;
pub mod goong;
pub mod normalize;
pub mod openweather;
pub mod optimizer;
pub mod polyline;
pub mod profile;
pub mod ranking;
pub mod retrieval;
pub mod search;
pub mod traits;
pub mod venue;
