use crate::core::{
    clock::Clock,
    distance::known_distance,
    filters::{matches_listing_filters, within_max_distance, UnrecognizedPolicy},
    scoring::{calculate_relevance_score, ScoringConfig},
};
use crate::models::{AidRequest, ListingFilters, MatchResult, RequestStatus, Role, Viewer};
use std::cmp::Ordering;
use thiserror::Error;

/// Upper bound on the number of suggestions returned
pub const MAX_SUGGESTIONS: usize = 10;

/// Which precondition of a suggestion run failed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LocationRequirement {
    NotVolunteer,
    MissingLocation,
}

impl std::fmt::Display for LocationRequirement {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LocationRequirement::NotVolunteer => write!(f, "only volunteers can get suggestions"),
            LocationRequirement::MissingLocation => {
                write!(f, "location is required for suggestions")
            }
        }
    }
}

/// Errors raised by the matching engine
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MatchError {
    #[error("Location required: {0}")]
    LocationRequired(LocationRequirement),
}

/// Matching engine - proximity listing and scored suggestions
///
/// Holds only configuration; every call works on the inputs it is given.
#[derive(Debug, Clone)]
pub struct Matcher {
    scoring: ScoringConfig,
    unrecognized: UnrecognizedPolicy,
}

impl Matcher {
    pub fn new(scoring: ScoringConfig, unrecognized: UnrecognizedPolicy) -> Self {
        Self {
            scoring: scoring.normalized(),
            unrecognized,
        }
    }

    pub fn with_default_config() -> Self {
        Self::new(ScoringConfig::default(), UnrecognizedPolicy::default())
    }

    pub fn scoring(&self) -> &ScoringConfig {
        &self.scoring
    }

    /// Distance from the viewer to a request, if both locations are known
    #[inline]
    pub fn distance_between(&self, viewer: &Viewer, request: &AidRequest) -> Option<f64> {
        known_distance(viewer.origin().as_ref(), request.location.known().as_ref())
    }

    /// List requests nearest first
    ///
    /// # Pipeline Stages
    /// 1. Unrecognized-value policy
    /// 2. Status / type / urgency equality filters
    /// 3. Distance annotation (unknown stays `None`)
    /// 4. Max-distance cutoff, only when the viewer's location is known
    /// 5. Stable sort by distance, unknown last
    pub fn list_by_proximity(
        &self,
        viewer: &Viewer,
        candidates: Vec<AidRequest>,
        filters: &ListingFilters,
    ) -> Vec<MatchResult> {
        let total_candidates = candidates.len();
        // The cutoff needs a reference point
        let max_distance_km = viewer.origin().and(filters.max_distance_km);

        let mut results: Vec<MatchResult> = candidates
            .into_iter()
            .filter(|request| self.admit(request))
            .filter(|request| matches_listing_filters(request, filters))
            .filter_map(|request| {
                let distance_km = self.distance_between(viewer, &request);
                if !within_max_distance(distance_km, max_distance_km) {
                    return None;
                }
                Some(MatchResult {
                    request,
                    distance_km,
                    score: None,
                })
            })
            .collect();

        results.sort_by(|a, b| compare_distance(a.distance_km, b.distance_km));

        tracing::debug!(
            "Proximity listing kept {} of {} candidates",
            results.len(),
            total_candidates
        );

        results
    }

    /// Rank pending requests for a volunteer, best first, at most ten
    ///
    /// Fails when the viewer is not a volunteer or has no known location.
    pub fn suggest(
        &self,
        viewer: &Viewer,
        candidates: Vec<AidRequest>,
        clock: &dyn Clock,
    ) -> Result<Vec<MatchResult>, MatchError> {
        if viewer.role != Role::Volunteer {
            return Err(MatchError::LocationRequired(LocationRequirement::NotVolunteer));
        }
        let origin = viewer
            .origin()
            .ok_or(MatchError::LocationRequired(LocationRequirement::MissingLocation))?;

        let now = clock.now();
        let total_candidates = candidates.len();

        let mut scored: Vec<MatchResult> = candidates
            .into_iter()
            .filter(|request| request.status == RequestStatus::Pending)
            .filter(|request| self.admit(request))
            .filter_map(|request| {
                let target = request.location.known();
                let Some(distance_km) = known_distance(Some(&origin), target.as_ref()) else {
                    tracing::debug!("Skipping request {} without a usable location", request.id);
                    return None;
                };

                let score = calculate_relevance_score(
                    &request,
                    distance_km,
                    &viewer.skills,
                    now,
                    &self.scoring,
                );

                Some(MatchResult {
                    request,
                    distance_km: Some(distance_km),
                    score: Some(score),
                })
            })
            .collect();

        // Stable: equal scores keep input order
        scored.sort_by(|a, b| b.score.cmp(&a.score));
        scored.truncate(MAX_SUGGESTIONS);

        tracing::debug!(
            "Suggesting {} of {} candidates",
            scored.len(),
            total_candidates
        );

        Ok(scored)
    }

    #[inline]
    fn admit(&self, request: &AidRequest) -> bool {
        let admitted = self.unrecognized.admits(request);
        if !admitted {
            tracing::debug!(
                "Skipping request {} with unrecognized type or urgency",
                request.id
            );
        }
        admitted
    }
}

impl Default for Matcher {
    fn default() -> Self {
        Self::with_default_config()
    }
}

/// Known distances ascending, unknown after all known ones
#[inline]
pub fn compare_distance(a: Option<f64>, b: Option<f64>) -> Ordering {
    match (a, b) {
        (Some(a), Some(b)) => a.total_cmp(&b),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}
