use crate::models::VendorCategory;

/// Static provider-tag to category table
///
/// Tags are the raw type strings emitted by the place-search provider.
/// Order within the table does not matter; the candidate's own tag order
/// decides which mapping wins.
const TAG_TABLE: &[(&str, VendorCategory)] = &[
    // Venues
    ("banquet_hall", VendorCategory::Venue),
    ("event_venue", VendorCategory::Venue),
    ("wedding_venue", VendorCategory::Venue),
    ("conference_room", VendorCategory::Venue),
    ("community_center", VendorCategory::Venue),
    ("art_gallery", VendorCategory::Venue),
    ("museum", VendorCategory::Venue),
    ("park", VendorCategory::Venue),
    // Catering
    ("restaurant", VendorCategory::Catering),
    ("cafe", VendorCategory::Catering),
    ("bakery", VendorCategory::Catering),
    ("bar", VendorCategory::Catering),
    ("meal_delivery", VendorCategory::Catering),
    ("meal_takeaway", VendorCategory::Catering),
    ("food", VendorCategory::Catering),
    // Entertainment
    ("night_club", VendorCategory::Entertainment),
    ("casino", VendorCategory::Entertainment),
    ("bowling_alley", VendorCategory::Entertainment),
    ("amusement_park", VendorCategory::Entertainment),
    ("movie_theater", VendorCategory::Entertainment),
    // Staffing
    ("employment_agency", VendorCategory::Staffing),
    ("talent_agency", VendorCategory::Staffing),
    // Equipment
    ("electronics_store", VendorCategory::Equipment),
    ("furniture_store", VendorCategory::Equipment),
    ("home_goods_store", VendorCategory::Equipment),
    ("hardware_store", VendorCategory::Equipment),
    // Transportation
    ("moving_company", VendorCategory::Transportation),
    ("taxi_service", VendorCategory::Transportation),
    ("car_rental", VendorCategory::Transportation),
    ("limousine_service", VendorCategory::Transportation),
];

/// Classify a candidate by its provider tags
///
/// Deterministic and pure: the first tag (in provider-given order) with a
/// table entry decides the category; no match or no tags yields `Other`.
/// Used both as the total enhancement-failure fallback and to fill the
/// category for candidates the enhancement step omitted.
pub fn classify(tags: &[String]) -> VendorCategory {
    for tag in tags {
        let tag = tag.to_lowercase();
        if let Some((_, category)) = TAG_TABLE.iter().find(|(known, _)| *known == tag) {
            return *category;
        }
    }
    VendorCategory::Other
}
