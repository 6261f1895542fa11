use crate::models::{AidRequest, HelpType, Urgency};
use chrono::{DateTime, Utc};
use serde::Deserialize;
use std::collections::HashSet;

/// Points awarded when the request is at most `max_km` away
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct DistanceBand {
    pub max_km: f64,
    pub points: u32,
}

/// Points awarded when the request is younger than `max_age_hours`
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct RecencyBand {
    pub max_age_hours: f64,
    pub points: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default)]
pub struct UrgencyWeights {
    pub high: u32,
    pub medium: u32,
    pub low: u32,
}

impl Default for UrgencyWeights {
    fn default() -> Self {
        Self {
            high: 30,
            medium: 20,
            low: 10,
        }
    }
}

/// Tunable thresholds and weights of the suggestion score
///
/// score = distance band + urgency weight + skill bonus + recency band
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct ScoringConfig {
    pub distance_bands: Vec<DistanceBand>,
    pub urgency_weights: UrgencyWeights,
    pub skill_bonus: u32,
    pub recency_bands: Vec<RecencyBand>,
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            distance_bands: vec![
                DistanceBand { max_km: 5.0, points: 50 },
                DistanceBand { max_km: 15.0, points: 30 },
                DistanceBand { max_km: 30.0, points: 15 },
            ],
            urgency_weights: UrgencyWeights::default(),
            skill_bonus: 20,
            recency_bands: vec![
                RecencyBand { max_age_hours: 2.0, points: 10 },
                RecencyBand { max_age_hours: 6.0, points: 5 },
            ],
        }
    }
}

impl ScoringConfig {
    /// Order bands by ascending threshold so the tightest band wins
    pub fn normalized(mut self) -> Self {
        self.distance_bands
            .sort_by(|a, b| a.max_km.total_cmp(&b.max_km));
        self.recency_bands
            .sort_by(|a, b| a.max_age_hours.total_cmp(&b.max_age_hours));
        self
    }

    /// Highest score any request can reach under this configuration
    pub fn max_score(&self) -> u32 {
        let best_distance = self.distance_bands.iter().map(|b| b.points).max().unwrap_or(0);
        let best_recency = self.recency_bands.iter().map(|b| b.points).max().unwrap_or(0);
        let w = &self.urgency_weights;
        best_distance
            .saturating_add(w.high.max(w.medium).max(w.low))
            .saturating_add(self.skill_bonus)
            .saturating_add(best_recency)
    }
}

/// Score a request for a volunteer (integer, higher is better)
///
/// Bands in `config` must already be in ascending order.
pub fn calculate_relevance_score(
    request: &AidRequest,
    distance_km: f64,
    skills: &HashSet<HelpType>,
    now: DateTime<Utc>,
    config: &ScoringConfig,
) -> u32 {
    let age_hours = (now - request.created_at).num_milliseconds() as f64 / 3_600_000.0;

    distance_points(distance_km, config)
        .saturating_add(urgency_points(request.urgency, config))
        .saturating_add(skill_points(request.help_type, skills, config))
        .saturating_add(recency_points(age_hours, config))
}

#[inline]
fn distance_points(distance_km: f64, config: &ScoringConfig) -> u32 {
    config
        .distance_bands
        .iter()
        .find(|band| distance_km <= band.max_km)
        .map_or(0, |band| band.points)
}

#[inline]
fn urgency_points(urgency: Urgency, config: &ScoringConfig) -> u32 {
    match urgency {
        Urgency::High => config.urgency_weights.high,
        Urgency::Medium => config.urgency_weights.medium,
        Urgency::Low => config.urgency_weights.low,
        Urgency::Unrecognized => 0,
    }
}

/// An empty skill set matches nothing
#[inline]
fn skill_points(help_type: HelpType, skills: &HashSet<HelpType>, config: &ScoringConfig) -> u32 {
    if help_type.is_recognized() && skills.contains(&help_type) {
        config.skill_bonus
    } else {
        0
    }
}

#[inline]
fn recency_points(age_hours: f64, config: &ScoringConfig) -> u32 {
    config
        .recency_bands
        .iter()
        .find(|band| age_hours < band.max_age_hours)
        .map_or(0, |band| band.points)
}
