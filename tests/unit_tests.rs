// Unit tests for Festa Discovery

use festa_discovery::core::{
    classifier::classify,
    scoring::{hybrid_score, keyword_score, rating_score, DEFAULT_SUITABILITY, NEUTRAL_MIDPOINT},
};
use festa_discovery::models::{EventContext, PlaceCandidate, ScoringWeights, VendorCategory};

fn create_candidate(id: &str, name: &str, tags: &[&str], rating: Option<f64>) -> PlaceCandidate {
    PlaceCandidate {
        id: id.to_string(),
        name: name.to_string(),
        address: Some("42 Elm St, Riverdale".to_string()),
        tags: tags.iter().map(|s| s.to_string()).collect(),
        price_level: Some(2),
        rating,
        rating_count: Some(87),
        website: None,
        phone: None,
        photo_refs: vec![],
    }
}

#[test]
fn test_hybrid_score_clamped_to_ten() {
    // Saturate every sub-score plus the boost; the clamp must hold
    let candidate = create_candidate("p1", "Grand Banquet Hall", &["banquet_hall"], Some(5.0));
    let context = EventContext {
        attendee_count: Some("150".to_string()),
        ..Default::default()
    };

    let score = hybrid_score(
        &candidate,
        VendorCategory::Venue,
        Some(10.0),
        "grand banquet hall",
        Some(&context),
        &ScoringWeights::default(),
    );

    assert_eq!(score, 10.0);
}

#[test]
fn test_hybrid_score_always_in_range() {
    let weights = ScoringWeights::default();
    let queries = ["banquet hall", "a an to", "", "outdoor rustic wedding venue downtown"];
    let candidates = [
        create_candidate("p1", "Grand Hall", &["banquet_hall"], Some(5.0)),
        create_candidate("p2", "Nowhere", &[], None),
        create_candidate("p3", "Club Neon", &["night_club"], Some(0.0)),
    ];

    for query in &queries {
        for candidate in &candidates {
            let category = classify(&candidate.tags);
            for suitability in [None, Some(1.0), Some(10.0)] {
                let score = hybrid_score(candidate, category, suitability, query, None, &weights);
                assert!(
                    (0.0..=10.0).contains(&score),
                    "score {} out of range for query {:?}",
                    score,
                    query
                );
            }
        }
    }
}

#[test]
fn test_defaults_are_reproducible() {
    // No rating, no model score: the hybrid score is exactly the weighted
    // keyword sub-score plus the two neutral contributions
    let candidate = create_candidate("p1", "Grand Hall", &["banquet_hall"], None);
    let weights = ScoringWeights::default();

    let keyword = keyword_score(&candidate, VendorCategory::Venue, "banquet hall");
    let expected = 0.5 * DEFAULT_SUITABILITY + 0.3 * keyword + 0.2 * NEUTRAL_MIDPOINT;

    let first = hybrid_score(&candidate, VendorCategory::Venue, None, "banquet hall", None, &weights);
    let second = hybrid_score(&candidate, VendorCategory::Venue, None, "banquet hall", None, &weights);

    assert!((first - expected).abs() < 1e-9);
    assert_eq!(first, second);
}

#[test]
fn test_banquet_hall_scenario() {
    // Query "banquet hall", candidate tagged banquet_hall with rating 4.5,
    // enhancement unavailable: category comes from the fallback table and
    // the score is 0.5*6 + 0.3*10 + 0.2*9 with no boost
    let candidate = create_candidate("p1", "Grand Banquet Hall", &["banquet_hall"], Some(4.5));

    let category = classify(&candidate.tags);
    assert_eq!(category, VendorCategory::Venue);

    let score = hybrid_score(
        &candidate,
        category,
        None,
        "banquet hall",
        None,
        &ScoringWeights::default(),
    );

    let expected = 0.5 * DEFAULT_SUITABILITY + 0.3 * 10.0 + 0.2 * rating_score(Some(4.5));
    assert!((score - expected).abs() < 1e-9);
    assert!((score - 7.8).abs() < 1e-9);
}

#[test]
fn test_context_boost_strictly_increases_score() {
    let candidate = create_candidate("p1", "Grand Hall", &["banquet_hall"], Some(4.0));
    let weights = ScoringWeights::default();

    let context = EventContext {
        attendee_count: Some("50".to_string()),
        event_type: Some("venue".to_string()),
        special_requirements: None,
    };

    let with_context = hybrid_score(
        &candidate,
        VendorCategory::Venue,
        Some(7.0),
        "banquet hall",
        Some(&context),
        &weights,
    );
    let without_context = hybrid_score(
        &candidate,
        VendorCategory::Venue,
        Some(7.0),
        "banquet hall",
        None,
        &weights,
    );

    assert!(with_context > without_context);
    assert!((with_context - without_context - 1.0).abs() < 1e-9);
}

#[test]
fn test_stop_short_query_gets_neutral_keyword_score() {
    let candidate = create_candidate("p1", "Grand Hall", &["banquet_hall"], None);

    // Every token has length <= 2, so there is no lexical signal to measure
    let score = keyword_score(&candidate, VendorCategory::Venue, "a an to");
    assert_eq!(score, NEUTRAL_MIDPOINT);
}

#[test]
fn test_classifier_deterministic() {
    let tags: Vec<String> = vec!["restaurant".to_string(), "banquet_hall".to_string()];

    let first = classify(&tags);
    let second = classify(&tags);

    assert_eq!(first, second);
    assert_eq!(first, VendorCategory::Catering);
}

#[test]
fn test_classifier_table_spot_checks() {
    let tag = |t: &str| vec![t.to_string()];

    assert_eq!(classify(&tag("banquet_hall")), VendorCategory::Venue);
    assert_eq!(classify(&tag("restaurant")), VendorCategory::Catering);
    assert_eq!(classify(&tag("night_club")), VendorCategory::Entertainment);
    assert_eq!(classify(&tag("moving_company")), VendorCategory::Transportation);
    assert_eq!(classify(&tag("electronics_store")), VendorCategory::Equipment);
    assert_eq!(classify(&tag("employment_agency")), VendorCategory::Staffing);
    assert_eq!(classify(&tag("unheard_of_tag")), VendorCategory::Other);
    assert_eq!(classify(&[]), VendorCategory::Other);
}

#[test]
fn test_rating_defaults_to_neutral() {
    assert_eq!(rating_score(None), NEUTRAL_MIDPOINT);
    assert_eq!(rating_score(Some(4.5)), 9.0);
}
