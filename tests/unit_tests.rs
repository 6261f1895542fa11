// Unit tests for Relief Match

use relief_match::core::{
    distance::{distance, haversine_distance, known_distance},
    filters::{matches_listing_filters, within_max_distance},
    scoring::{calculate_relevance_score, ScoringConfig},
};
use relief_match::models::{
    AidRequest, Coordinate, HelpType, ListingFilters, Location, RequestStatus, Urgency,
};
use chrono::{DateTime, Duration, TimeZone, Utc};
use std::collections::HashSet;

fn now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 9, 1, 12, 0, 0).unwrap()
}

fn create_request(help_type: HelpType, urgency: Urgency, age: Duration) -> AidRequest {
    AidRequest {
        id: "req".to_string(),
        victim_id: "victim".to_string(),
        victim_name: "Victim".to_string(),
        help_type,
        urgency,
        description: "Need help".to_string(),
        location: Location::at(40.7128, -74.0060),
        status: RequestStatus::Pending,
        volunteer_id: None,
        volunteer_name: None,
        volunteer_distance_km: None,
        created_at: now() - age,
        updated_at: None,
        fulfilled_at: None,
    }
}

#[test]
fn test_haversine_distance_zero() {
    let distance = haversine_distance(40.7128, -74.0060, 40.7128, -74.0060);
    assert_eq!(distance, 0.0);
}

#[test]
fn test_distance_symmetry() {
    let points = [
        Coordinate::new(40.7128, -74.0060),
        Coordinate::new(51.5074, -0.1278),
        Coordinate::new(-33.8688, 151.2093),
        Coordinate::new(0.0, 0.0),
        Coordinate::new(89.9, 179.9),
        Coordinate::new(-90.0, -180.0),
    ];

    for a in &points {
        assert!(distance(a, a).abs() < 1e-9);
        for b in &points {
            let ab = distance(a, b);
            let ba = distance(b, a);
            assert!((ab - ba).abs() < 1e-6, "{:?} / {:?}: {} vs {}", a, b, ab, ba);
            assert!(ab >= 0.0);
        }
    }
}

#[test]
fn test_triangle_inequality() {
    let a = Coordinate::new(40.7128, -74.0060);
    let b = Coordinate::new(51.5074, -0.1278);
    let c = Coordinate::new(48.8566, 2.3522);

    assert!(distance(&a, &c) <= distance(&a, &b) + distance(&b, &c) + 1e-6);
}

#[test]
fn test_quarter_great_circle() {
    let d = distance(&Coordinate::new(0.0, 0.0), &Coordinate::new(0.0, 90.0));
    assert!((d - 10007.5).abs() < 0.1, "Expected ~10007.5km, got {}", d);
}

#[test]
fn test_new_york_to_london() {
    let d = distance(
        &Coordinate::new(40.7128, -74.0060),
        &Coordinate::new(51.5074, -0.1278),
    );
    assert!((d - 5570.0).abs() < 20.0, "Expected ~5570km, got {}", d);
}

#[test]
fn test_unknown_location_has_no_distance() {
    let here = Coordinate::new(40.7128, -74.0060);
    assert_eq!(known_distance(Some(&here), Location::unknown().known().as_ref()), None);
}

#[test]
fn test_filters_exact_match() {
    let request = create_request(HelpType::Food, Urgency::High, Duration::hours(1));
    let filters = ListingFilters {
        status: Some(RequestStatus::Pending),
        help_type: Some(HelpType::Food),
        urgency: Some(Urgency::High),
        max_distance_km: None,
    };
    assert!(matches_listing_filters(&request, &filters));

    let other_type = ListingFilters {
        help_type: Some(HelpType::Shelter),
        ..filters
    };
    assert!(!matches_listing_filters(&request, &other_type));
}

#[test]
fn test_max_distance_boundary() {
    assert!(within_max_distance(Some(25.0), Some(25.0)));
    assert!(!within_max_distance(Some(26.0), Some(25.0)));
}

#[test]
fn test_score_composition_best_case() {
    let request = create_request(HelpType::Medical, Urgency::High, Duration::hours(1));
    let skills: HashSet<_> = [HelpType::Medical, HelpType::Food].into_iter().collect();

    let score = calculate_relevance_score(&request, 3.0, &skills, now(), &ScoringConfig::default());
    assert_eq!(score, 50 + 30 + 20 + 10);
}

#[test]
fn test_score_composition_far_and_stale() {
    let request = create_request(HelpType::Medical, Urgency::High, Duration::hours(10));
    let skills: HashSet<_> = [HelpType::Food].into_iter().collect();

    let config = ScoringConfig::default();
    let score = calculate_relevance_score(&request, 40.0, &skills, now(), &config);
    assert_eq!(score, 30);
}

#[test]
fn test_empty_skill_set_gets_no_bonus() {
    let request = create_request(HelpType::Water, Urgency::Low, Duration::hours(3));

    let config = ScoringConfig::default();
    let score = calculate_relevance_score(&request, 10.0, &HashSet::new(), now(), &config);
    assert_eq!(score, 30 + 10 + 5);
}

#[test]
fn test_unrecognized_values_score_zero() {
    let request =
        create_request(HelpType::Unrecognized, Urgency::Unrecognized, Duration::hours(24));
    let skills: HashSet<_> = HelpType::ALL.into_iter().collect();

    let config = ScoringConfig::default();
    let score = calculate_relevance_score(&request, 100.0, &skills, now(), &config);
    assert_eq!(score, 0);
}
