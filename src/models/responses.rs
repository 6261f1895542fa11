use crate::models::domain::{AidRequest, HelpType, Location, MatchResult, Urgency};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Round a distance for display
#[inline]
pub fn round_km(distance_km: f64) -> f64 {
    (distance_km * 100.0).round() / 100.0
}

/// A ranked request as returned to clients
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchResponse {
    #[serde(flatten)]
    pub request: AidRequest,
    pub distance_km: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub score: Option<u32>,
}

impl From<MatchResult> for MatchResponse {
    fn from(result: MatchResult) -> Self {
        Self {
            request: result.request,
            distance_km: result.distance_km.map(round_km),
            score: result.score,
        }
    }
}

/// A request pinned on the map
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MapEntry {
    pub id: String,
    #[serde(rename = "type")]
    pub help_type: HelpType,
    pub urgency: Urgency,
    pub description: String,
    pub location: Location,
    pub distance_km: Option<f64>,
    pub created_at: DateTime<Utc>,
}

impl MapEntry {
    pub fn from_result(result: MatchResult, description_chars: usize) -> Self {
        let request = result.request;
        Self {
            description: truncate_description(&request.description, description_chars),
            id: request.id,
            help_type: request.help_type,
            urgency: request.urgency,
            location: request.location,
            distance_km: result.distance_km.map(round_km),
            created_at: request.created_at,
        }
    }
}

/// Cut a description to `max_chars` characters, marking the cut with `...`
pub fn truncate_description(description: &str, max_chars: usize) -> String {
    match description.char_indices().nth(max_chars) {
        Some((cut, _)) => format!("{}...", &description[..cut]),
        None => description.to_string(),
    }
}

/// Map view payload
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MapResponse {
    pub requests: Vec<MapEntry>,
    pub user_location: Location,
}

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub timestamp: DateTime<Utc>,
}

/// Error response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
    pub status_code: u16,
}

/// Acknowledgement of a state change
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}

/// Reply to a created request
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatedResponse {
    pub message: String,
    pub request_id: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate_description() {
        let short = "Need water";
        assert_eq!(truncate_description(short, 100), short);

        let exact = "x".repeat(100);
        assert_eq!(truncate_description(&exact, 100), exact);

        let long = "y".repeat(150);
        let cut = truncate_description(&long, 100);
        assert_eq!(cut.len(), 103);
        assert!(cut.ends_with("..."));
    }

    #[test]
    fn test_truncate_multibyte() {
        let text = "é".repeat(120);
        let cut = truncate_description(&text, 100);
        assert_eq!(cut.chars().count(), 103);
    }

    #[test]
    fn test_round_km() {
        assert_eq!(round_km(1.23456), 1.23);
        assert_eq!(round_km(10.0), 10.0);
    }
}
