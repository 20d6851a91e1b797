//! Listing: one venue returned by a search.

use serde::Serialize;

/// A venue with its availability for the searched slot.
///
/// Identity is the slug. Listings are never mutated after they arrive.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Listing {
    pub slug: String,
    pub venue_name: String,
    pub availability: Availability,
}

/// What a venue can offer around the requested time.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Availability {
    /// Slots the venue suggests, in the order the API returned them.
    pub recommended: Vec<RecommendedSlot>,

    /// Seating areas, each with its own bookable options.
    pub areas: Vec<Area>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RecommendedSlot {
    pub id: String,
    pub time: String,
    pub text: String,
}

/// A seating area (e.g. "bar", "terrace").
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Area {
    pub id: String,
    pub options: Vec<AreaOption>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AreaOption {
    pub time: String,
    pub text: String,
}
