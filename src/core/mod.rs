// Core algorithm exports
pub mod clock;
pub mod distance;
pub mod filters;
pub mod matcher;
pub mod scoring;

pub use clock::{Clock, FixedClock, SystemClock};
pub use distance::{distance, haversine_distance, known_distance, EARTH_RADIUS_KM};
pub use filters::{matches_listing_filters, within_max_distance, UnrecognizedPolicy};
pub use matcher::{compare_distance, LocationRequirement, MatchError, Matcher, MAX_SUGGESTIONS};
pub use scoring::{
    calculate_relevance_score, DistanceBand, RecencyBand, ScoringConfig, UrgencyWeights,
};
