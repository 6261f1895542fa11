//! Relief Match - proximity listing and relevance ranking for disaster-relief aid
//!
//! This library provides the matching engine that pairs people requesting aid
//! with nearby volunteers: great-circle distances, listing filters and the
//! composite suggestion score, plus the store contracts and HTTP layer around it.

pub mod config;
pub mod core;
pub mod models;
pub mod routes;
pub mod services;

// Re-export commonly used types
pub use crate::core::{
    distance::{distance, haversine_distance},
    Clock, FixedClock, MatchError, Matcher, ScoringConfig, SystemClock,
};
pub use crate::models::{AidRequest, Coordinate, ListingFilters, Location, MatchResult, Viewer};
