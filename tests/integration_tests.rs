// Integration tests for Relief Match

use chrono::{DateTime, Duration, TimeZone, Utc};
use relief_match::core::distance::distance;
use relief_match::core::{FixedClock, LocationRequirement, MatchError, Matcher, MAX_SUGGESTIONS};
use relief_match::models::{
    AidRequest, Coordinate, HelpType, ListingFilters, Location, RequestStatus, Role, Urgency,
    Viewer,
};

const ORIGIN: (f64, f64) = (40.7128, -74.0060); // New York

fn now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 9, 1, 12, 0, 0).unwrap()
}

fn create_test_request(
    id: &str,
    status: RequestStatus,
    lat: f64,
    lon: f64,
) -> AidRequest {
    AidRequest {
        id: id.to_string(),
        victim_id: format!("victim-{}", id),
        victim_name: format!("Victim {}", id),
        help_type: HelpType::Food,
        urgency: Urgency::Medium,
        description: "Need supplies".to_string(),
        location: Location::at(lat, lon),
        status,
        volunteer_id: None,
        volunteer_name: None,
        volunteer_distance_km: None,
        created_at: now() - Duration::hours(8),
        updated_at: None,
        fulfilled_at: None,
    }
}

fn create_volunteer(skills: &[HelpType]) -> Viewer {
    Viewer::new(Role::Volunteer, Some(Coordinate::new(ORIGIN.0, ORIGIN.1)))
        .with_skills(skills.iter().copied())
}

fn ids(results: &[relief_match::MatchResult]) -> Vec<String> {
    results.iter().map(|r| r.request.id.clone()).collect()
}

#[test]
fn test_integration_status_filter_in_distance_order() {
    let matcher = Matcher::default();
    let candidates = vec![
        create_test_request("p-far", RequestStatus::Pending, 41.0, -74.0),
        create_test_request("done", RequestStatus::Fulfilled, 40.72, -74.01),
        create_test_request("p-near", RequestStatus::Pending, 40.72, -74.01),
        create_test_request("busy", RequestStatus::InProgress, 40.71, -74.0),
        create_test_request("p-mid", RequestStatus::Pending, 40.8, -74.0),
        create_test_request("gone", RequestStatus::Cancelled, 40.73, -74.0),
    ];
    let filters = ListingFilters {
        status: Some(RequestStatus::Pending),
        ..Default::default()
    };

    let results = matcher.list_by_proximity(&create_volunteer(&[]), candidates, &filters);

    assert_eq!(ids(&results), vec!["p-near", "p-mid", "p-far"]);
    for pair in results.windows(2) {
        assert!(pair[0].distance_km <= pair[1].distance_km);
    }
}

#[test]
fn test_integration_max_distance_cutoff_inclusive() {
    let matcher = Matcher::default();
    let viewer = create_volunteer(&[]);
    let request = create_test_request("edge", RequestStatus::Pending, 40.9, -74.0);
    let exact = distance(&Coordinate::new(ORIGIN.0, ORIGIN.1), &Coordinate::new(40.9, -74.0));

    let at_threshold = ListingFilters {
        max_distance_km: Some(exact),
        ..Default::default()
    };
    let results = matcher.list_by_proximity(&viewer, vec![request.clone()], &at_threshold);
    assert_eq!(results.len(), 1);

    let one_km_short = ListingFilters {
        max_distance_km: Some(exact - 1.0),
        ..Default::default()
    };
    let results = matcher.list_by_proximity(&viewer, vec![request], &one_km_short);
    assert!(results.is_empty());
}

#[test]
fn test_integration_max_distance_drops_unknown_location() {
    let matcher = Matcher::default();
    let mut nowhere = create_test_request("nowhere", RequestStatus::Pending, 0.0, 0.0);
    nowhere.location = Location::unknown();
    let filters = ListingFilters {
        max_distance_km: Some(10_000.0),
        ..Default::default()
    };

    let results = matcher.list_by_proximity(&create_volunteer(&[]), vec![nowhere], &filters);
    assert!(results.is_empty());
}

#[test]
fn test_integration_unknown_location_listed_last_never_suggested() {
    let matcher = Matcher::default();
    let mut nowhere = create_test_request("nowhere", RequestStatus::Pending, 0.0, 0.0);
    nowhere.location = Location::unknown();
    let candidates = vec![
        nowhere,
        create_test_request("far", RequestStatus::Pending, 45.0, -74.0),
        create_test_request("near", RequestStatus::Pending, 40.72, -74.01),
    ];

    let listed = matcher.list_by_proximity(
        &create_volunteer(&[]),
        candidates.clone(),
        &ListingFilters::default(),
    );
    assert_eq!(ids(&listed), vec!["near", "far", "nowhere"]);
    assert_eq!(listed[2].distance_km, None);

    let suggested = matcher
        .suggest(&create_volunteer(&[]), candidates, &FixedClock(now()))
        .unwrap();
    assert!(suggested.iter().all(|r| r.request.id != "nowhere"));
    assert!(suggested.iter().all(|r| r.distance_km.is_some() && r.score.is_some()));
}

#[test]
fn test_integration_suggestion_cap() {
    let matcher = Matcher::default();
    let viewer = create_volunteer(&[HelpType::Medical, HelpType::Water]);
    let urgencies = [Urgency::Low, Urgency::Medium, Urgency::High];

    let candidates: Vec<AidRequest> = (0..50)
        .map(|i| {
            let mut request = create_test_request(
                &format!("r{}", i),
                RequestStatus::Pending,
                ORIGIN.0 + (i as f64 * 0.02),
                ORIGIN.1,
            );
            request.urgency = urgencies[i % 3];
            request.help_type = relief_match::models::HelpType::ALL[i % 6];
            request.created_at = now() - Duration::hours((i % 8) as i64);
            request
        })
        .collect();

    // Score each candidate on its own to know the full ranking
    let all_scores: Vec<(String, u32)> = candidates
        .iter()
        .map(|c| {
            let single = matcher
                .suggest(&viewer, vec![c.clone()], &FixedClock(now()))
                .unwrap();
            (c.id.clone(), single[0].score.unwrap())
        })
        .collect();

    let results = matcher.suggest(&viewer, candidates, &FixedClock(now())).unwrap();

    assert_eq!(results.len(), MAX_SUGGESTIONS);
    for pair in results.windows(2) {
        assert!(pair[0].score >= pair[1].score, "Suggestions not sorted by score");
    }

    let returned: Vec<String> = ids(&results);
    let lowest_returned = results.last().and_then(|r| r.score).unwrap();
    for (id, score) in &all_scores {
        if !returned.contains(id) {
            assert!(*score <= lowest_returned, "{} scored {} but was excluded", id, score);
        }
    }
}

#[test]
fn test_integration_suggest_preconditions() {
    let matcher = Matcher::default();
    let victim = Viewer::new(Role::Victim, Some(Coordinate::new(ORIGIN.0, ORIGIN.1)));
    let lost = Viewer::new(Role::Volunteer, None);
    let candidates = vec![create_test_request("a", RequestStatus::Pending, 40.72, -74.01)];

    assert_eq!(
        matcher.suggest(&victim, candidates.clone(), &FixedClock(now())),
        Err(MatchError::LocationRequired(LocationRequirement::NotVolunteer))
    );
    assert_eq!(
        matcher.suggest(&lost, candidates, &FixedClock(now())),
        Err(MatchError::LocationRequired(LocationRequirement::MissingLocation))
    );
}

#[test]
fn test_integration_empty_candidates() {
    let matcher = Matcher::default();
    let viewer = create_volunteer(&[HelpType::Food]);

    assert!(matcher.list_by_proximity(&viewer, vec![], &ListingFilters::default()).is_empty());
    assert!(matcher.suggest(&viewer, vec![], &FixedClock(now())).unwrap().is_empty());
}

#[test]
fn test_integration_idempotent_with_fixed_clock() {
    let matcher = Matcher::default();
    let viewer = create_volunteer(&[HelpType::Food]);
    let clock = FixedClock(now());
    let candidates: Vec<AidRequest> = (0..20)
        .map(|i| {
            let lat = 40.7 + (i % 5) as f64 * 0.05;
            create_test_request(&i.to_string(), RequestStatus::Pending, lat, -74.0)
        })
        .collect();

    let first = matcher.suggest(&viewer, candidates.clone(), &clock).unwrap();
    let second = matcher.suggest(&viewer, candidates.clone(), &clock).unwrap();
    assert_eq!(first, second);

    let listed_first =
        matcher.list_by_proximity(&viewer, candidates.clone(), &ListingFilters::default());
    let listed_second = matcher.list_by_proximity(&viewer, candidates, &ListingFilters::default());
    assert_eq!(listed_first, listed_second);
}

#[test]
fn test_integration_results_never_exceed_input() {
    let matcher = Matcher::default();
    let viewer = create_volunteer(&[]);
    let candidates: Vec<AidRequest> = (0..7)
        .map(|i| {
            let lon = -74.0 + i as f64 * 0.01;
            create_test_request(&i.to_string(), RequestStatus::Pending, 40.7, lon)
        })
        .collect();

    let listed = matcher.list_by_proximity(&viewer, candidates.clone(), &ListingFilters::default());
    assert_eq!(listed.len(), 7);
    assert_eq!(matcher.suggest(&viewer, candidates, &FixedClock(now())).unwrap().len(), 7);
}
