use crate::models::{EventContext, PlaceCandidate, ScoringWeights, VendorCategory};

/// Neutral suitability used whenever the enhancement step supplied no score.
/// The source of truth for "no model opinion"; applied uniformly.
pub const DEFAULT_SUITABILITY: f64 = 6.0;

/// Neutral midpoint for the keyword and rating sub-scores when there is no
/// signal to measure (no meaningful query tokens, no provider rating)
pub const NEUTRAL_MIDPOINT: f64 = 5.0;

/// Lexical signal ceiling: matches are normalized against at most this many
/// query tokens
const KEYWORD_TOKEN_CAP: usize = 5;

/// Additive boost when the event is group-sized and the candidate carries a
/// group-friendly tag
const GROUP_BOOST: f64 = 1.0;

/// Attendee count must exceed this for the group boost to apply
const GROUP_SIZE_THRESHOLD: i64 = 10;

/// Provider tags considered group-friendly
const GROUP_FRIENDLY_TAGS: &[&str] = &[
    "restaurant",
    "event_venue",
    "conference_room",
    "banquet_hall",
];

/// Compute the hybrid relevance score (0-10) for a merged candidate
///
/// Scoring formula:
/// score = min(10,
///     model_score * 0.5 +       # LLM suitability, default 6
///     keyword_score * 0.3 +     # lexical query overlap
///     rating_score * 0.2 +      # provider rating rescaled to 0-10
///     context_boost             # additive, currently group-size rule
/// )
///
/// Pure: no I/O, no mutation of inputs; callable independently of the
/// pipeline. All sub-scores are non-negative by construction, so only the
/// upper bound needs clamping.
pub fn hybrid_score(
    candidate: &PlaceCandidate,
    category: VendorCategory,
    suitability: Option<f64>,
    query: &str,
    context: Option<&EventContext>,
    weights: &ScoringWeights,
) -> f64 {
    let model = suitability.unwrap_or(DEFAULT_SUITABILITY);
    let keyword = keyword_score(candidate, category, query);
    let rating = rating_score(candidate.rating);
    let boost = context_boost(candidate, context);

    let total = model * weights.model + keyword * weights.keyword + rating * weights.rating + boost;

    total.min(10.0)
}

/// Lexical overlap between the query and the candidate's text fields (0-10)
///
/// Tokens of length <= 2 are discarded; remaining tokens are checked for
/// case-insensitive substring containment in the concatenated name,
/// category, address, and tags. A query with no meaningful tokens yields
/// the neutral midpoint rather than zero.
#[inline]
pub fn keyword_score(candidate: &PlaceCandidate, category: VendorCategory, query: &str) -> f64 {
    let tokens: Vec<String> = query
        .split_whitespace()
        .filter(|t| t.chars().count() > 2)
        .map(|t| t.to_lowercase())
        .collect();

    if tokens.is_empty() {
        return NEUTRAL_MIDPOINT;
    }

    let mut haystack = candidate.name.to_lowercase();
    haystack.push(' ');
    haystack.push_str(category.as_str());
    if let Some(address) = &candidate.address {
        haystack.push(' ');
        haystack.push_str(&address.to_lowercase());
    }
    for tag in &candidate.tags {
        haystack.push(' ');
        haystack.push_str(&tag.to_lowercase());
    }

    let matches = tokens.iter().filter(|t| haystack.contains(t.as_str())).count();
    let ceiling = tokens.len().min(KEYWORD_TOKEN_CAP);

    (matches.min(ceiling) as f64 / ceiling as f64) * 10.0
}

/// Provider rating (0-5) rescaled linearly to 0-10; neutral when absent
#[inline]
pub fn rating_score(rating: Option<f64>) -> f64 {
    match rating {
        Some(r) => (r * 2.0).clamp(0.0, 10.0),
        None => NEUTRAL_MIDPOINT,
    }
}

/// Bounded additive boost derived from structured event context
///
/// Single rule today: attendee count parses as an integer above the group
/// threshold and the candidate carries a group-friendly tag. Further rules
/// add to the returned sum without touching the weighting scheme.
#[inline]
pub fn context_boost(candidate: &PlaceCandidate, context: Option<&EventContext>) -> f64 {
    let mut boost = 0.0;

    if let Some(ctx) = context {
        if let Some(attendees) = ctx.attendees() {
            if attendees > GROUP_SIZE_THRESHOLD
                && candidate.tags.iter().any(|tag| {
                    let tag = tag.to_lowercase();
                    GROUP_FRIENDLY_TAGS.contains(&tag.as_str())
                })
            {
                boost += GROUP_BOOST;
            }
        }
    }

    boost
}

#[cfg(test)]
mod tests {
    use super::*;

    fn candidate(tags: &[&str], rating: Option<f64>) -> PlaceCandidate {
        PlaceCandidate {
            id: "place_1".to_string(),
            name: "Grand Banquet Hall".to_string(),
            address: Some("123 Main St, Springfield".to_string()),
            tags: tags.iter().map(|s| s.to_string()).collect(),
            price_level: Some(2),
            rating,
            rating_count: Some(120),
            website: None,
            phone: None,
            photo_refs: vec![],
        }
    }

    #[test]
    fn test_score_within_bounds() {
        let c = candidate(&["banquet_hall"], Some(5.0));
        let ctx = EventContext {
            attendee_count: Some("200".to_string()),
            ..Default::default()
        };
        let score = hybrid_score(
            &c,
            VendorCategory::Venue,
            Some(10.0),
            "grand banquet hall springfield",
            Some(&ctx),
            &ScoringWeights::default(),
        );
        assert!(score >= 0.0 && score <= 10.0);
        // Maximal inputs saturate the clamp
        assert_eq!(score, 10.0);
    }

    #[test]
    fn test_defaults_are_deterministic() {
        // No model score, no rating: 0.5*6 + 0.2*5 baseline plus the
        // weighted keyword sub-score
        let c = candidate(&["banquet_hall"], None);
        let score = hybrid_score(
            &c,
            VendorCategory::Venue,
            None,
            "banquet hall",
            None,
            &ScoringWeights::default(),
        );
        let keyword = keyword_score(&c, VendorCategory::Venue, "banquet hall");
        let expected = 0.5 * DEFAULT_SUITABILITY + 0.3 * keyword + 0.2 * NEUTRAL_MIDPOINT;
        assert!((score - expected).abs() < 1e-9);
    }

    #[test]
    fn test_keyword_full_match() {
        let c = candidate(&["banquet_hall"], None);
        // Both tokens appear in the name/tags
        assert_eq!(keyword_score(&c, VendorCategory::Venue, "banquet hall"), 10.0);
    }

    #[test]
    fn test_keyword_partial_match() {
        let c = candidate(&["banquet_hall"], None);
        let score = keyword_score(&c, VendorCategory::Venue, "outdoor banquet wedding");
        // 1 of 3 meaningful tokens matches
        assert!((score - 10.0 / 3.0).abs() < 1e-9);
    }

    #[test]
    fn test_keyword_stop_short_tokens_neutral() {
        let c = candidate(&["banquet_hall"], None);
        assert_eq!(keyword_score(&c, VendorCategory::Venue, "a an to"), NEUTRAL_MIDPOINT);
        assert_eq!(keyword_score(&c, VendorCategory::Venue, ""), NEUTRAL_MIDPOINT);
    }

    #[test]
    fn test_keyword_token_cap() {
        // Seven meaningful tokens, all matching: normalized by the cap of 5
        let c = candidate(&["banquet_hall"], None);
        let score = keyword_score(
            &c,
            VendorCategory::Venue,
            "grand banquet hall main springfield venue 123x",
        );
        assert_eq!(score, 10.0);
    }

    #[test]
    fn test_rating_rescale() {
        assert_eq!(rating_score(Some(4.5)), 9.0);
        assert_eq!(rating_score(Some(0.0)), 0.0);
        assert_eq!(rating_score(Some(5.0)), 10.0);
        assert_eq!(rating_score(None), NEUTRAL_MIDPOINT);
    }

    #[test]
    fn test_banquet_hall_scenario() {
        // Query "banquet hall", one candidate tagged banquet_hall, rating
        // 4.5, no enhancement: 0.5*6 + 0.3*10 + 0.2*9 = 7.8
        let c = candidate(&["banquet_hall"], Some(4.5));
        let score = hybrid_score(
            &c,
            VendorCategory::Venue,
            None,
            "banquet hall",
            None,
            &ScoringWeights::default(),
        );
        assert!((score - 7.8).abs() < 1e-9);
    }

    #[test]
    fn test_context_boost_applied() {
        let c = candidate(&["banquet_hall"], Some(4.0));
        let ctx = EventContext {
            attendee_count: Some("50".to_string()),
            event_type: Some("venue".to_string()),
            ..Default::default()
        };

        let boosted = hybrid_score(
            &c,
            VendorCategory::Venue,
            None,
            "banquet hall",
            Some(&ctx),
            &ScoringWeights::default(),
        );
        let plain = hybrid_score(
            &c,
            VendorCategory::Venue,
            None,
            "banquet hall",
            None,
            &ScoringWeights::default(),
        );

        assert!(boosted > plain);
        assert!((boosted - plain - GROUP_BOOST).abs() < 1e-9);
    }

    #[test]
    fn test_no_boost_for_small_groups() {
        let c = candidate(&["banquet_hall"], None);
        let ctx = EventContext {
            attendee_count: Some("8".to_string()),
            ..Default::default()
        };
        assert_eq!(context_boost(&c, Some(&ctx)), 0.0);
    }

    #[test]
    fn test_no_boost_without_group_friendly_tag() {
        let c = candidate(&["moving_company"], None);
        let ctx = EventContext {
            attendee_count: Some("50".to_string()),
            ..Default::default()
        };
        assert_eq!(context_boost(&c, Some(&ctx)), 0.0);
    }

    #[test]
    fn test_non_numeric_attendees_no_boost() {
        let c = candidate(&["restaurant"], None);
        let ctx = EventContext {
            attendee_count: Some("lots".to_string()),
            ..Default::default()
        };
        assert_eq!(context_boost(&c, Some(&ctx)), 0.0);
    }
}
