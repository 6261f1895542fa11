use crate::models::{AidRequest, ListingFilters};
use serde::Deserialize;

/// What to do with a candidate whose type or urgency is not a known value
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UnrecognizedPolicy {
    /// Drop the candidate from every result
    Skip,
    /// Keep it; unknown parts earn no points when scored
    #[default]
    PassThrough,
}

impl UnrecognizedPolicy {
    #[inline]
    pub fn admits(&self, request: &AidRequest) -> bool {
        match self {
            UnrecognizedPolicy::Skip => request.is_well_formed(),
            UnrecognizedPolicy::PassThrough => true,
        }
    }
}

/// Check the exact-match constraints of a listing.
///
/// Absent filters impose no constraint.
#[inline]
pub fn matches_listing_filters(request: &AidRequest, filters: &ListingFilters) -> bool {
    if let Some(status) = filters.status {
        if request.status != status {
            return false;
        }
    }

    if let Some(help_type) = filters.help_type {
        if request.help_type != help_type {
            return false;
        }
    }

    if let Some(urgency) = filters.urgency {
        if request.urgency != urgency {
            return false;
        }
    }

    true
}

/// Check the max-distance cutoff.
///
/// With a cutoff set, an unknown distance never passes; the threshold itself does.
#[inline]
pub fn within_max_distance(distance_km: Option<f64>, max_distance_km: Option<f64>) -> bool {
    match max_distance_km {
        None => true,
        Some(max) => distance_km.is_some_and(|d| d <= max),
    }
}
