//! JSON shapes exchanged with the reservation API.
//!
//! Kept apart from the domain model: the API nests the venue name under
//! `post`, and request bodies carry API spellings (`size`, `marketplace_id`).

use serde::{Deserialize, Serialize};

use crate::model::{Area, AreaOption, Availability, Listing, RecommendedSlot, SearchCriteria};

use super::Marketplace;

/// Response of `/api/loginAnonymously`.
#[derive(Debug, Deserialize)]
pub(super) struct LoginResponse {
    pub jwt_token: String,
}

/// Body of `/api/search_token`.
#[derive(Debug, Serialize)]
pub(super) struct SearchTokenRequest {
    criteria: WireCriteria,
    marketplace_id: String,
    locale: String,
    geocodes: Vec<String>,
}

#[derive(Debug, Serialize)]
struct WireCriteria {
    date: String,
    time: String,
    size: String,
}

impl SearchTokenRequest {
    pub fn new(criteria: &SearchCriteria, marketplace: &Marketplace) -> Self {
        Self {
            criteria: WireCriteria {
                date: criteria.compact_date(),
                time: criteria.compact_time(),
                size: criteria.size(),
            },
            marketplace_id: marketplace.id.clone(),
            locale: marketplace.locale.clone(),
            geocodes: marketplace.geocodes.clone(),
        }
    }
}

/// Response of `/api/search_token`.
#[derive(Debug, Deserialize)]
pub(super) struct SearchTokenResponse {
    pub search_id: String,
}

/// Body of `/api/search_request`.
#[derive(Debug, Serialize)]
pub(super) struct SearchRequest<'a> {
    pub search_id: &'a str,
}

/// Response of `/api/search_request`.
#[derive(Debug, Deserialize)]
pub(super) struct SearchResponse {
    #[serde(default)]
    pub posts: Vec<WirePost>,
    pub total: u64,
}

#[derive(Debug, Deserialize)]
pub(super) struct WirePost {
    slug: String,
    post: WireVenue,
    #[serde(default)]
    availability: WireAvailability,
}

#[derive(Debug, Deserialize)]
struct WireVenue {
    venue_name: String,
}

#[derive(Debug, Default, Deserialize)]
struct WireAvailability {
    #[serde(default)]
    recommended: Vec<WireRecommended>,
    #[serde(default)]
    areas: Vec<WireArea>,
}

#[derive(Debug, Deserialize)]
struct WireRecommended {
    id: String,
    time: String,
    text: String,
}

#[derive(Debug, Deserialize)]
struct WireArea {
    id: String,
    #[serde(default)]
    options: Vec<WireOption>,
}

#[derive(Debug, Deserialize)]
struct WireOption {
    time: String,
    text: String,
}

impl From<WirePost> for Listing {
    fn from(post: WirePost) -> Self {
        let WireAvailability { recommended, areas } = post.availability;
        Self {
            slug: post.slug,
            venue_name: post.post.venue_name,
            availability: Availability {
                recommended: recommended
                    .into_iter()
                    .map(|r| RecommendedSlot {
                        id: r.id,
                        time: r.time,
                        text: r.text,
                    })
                    .collect(),
                areas: areas
                    .into_iter()
                    .map(|a| Area {
                        id: a.id,
                        options: a
                            .options
                            .into_iter()
                            .map(|o| AreaOption {
                                time: o.time,
                                text: o.text,
                            })
                            .collect(),
                    })
                    .collect(),
            },
        }
    }
}
