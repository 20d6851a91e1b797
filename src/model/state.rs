//! State tracked by the search store between workflow steps.

use serde::Serialize;

use super::Listing;

/// Message shown when a workflow fails with an error the store doesn't recognise.
pub const UNKNOWN_ERROR: &str = "An unknown error occurred";

/// The anonymous session obtained by logging in.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Session {
    pub token: Option<String>,
}

/// The search created for one set of criteria.
///
/// Valid for one fetch sequence; creating a new search token overwrites it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchSession {
    pub search_id: Option<String>,
}

/// Listings accumulated across fetches.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResultSet {
    pub listings: Vec<Listing>,

    /// The total reported by the most recent response.
    /// Not reconciled with `listings.len()`.
    pub total_count: u64,
}

impl ResultSet {
    /// Folds one response into the set.
    ///
    /// Appends when listings are already present, replaces otherwise.
    /// Duplicate slugs are kept.
    pub fn absorb(&mut self, listings: Vec<Listing>, total_count: u64) {
        if self.listings.is_empty() {
            self.listings = listings;
        } else {
            self.listings.extend(listings);
        }
        self.total_count = total_count;
    }

    pub fn clear(&mut self) {
        self.listings.clear();
        self.total_count = 0;
    }
}

/// Loading and error flags for whoever displays the store.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WorkflowStatus {
    pub is_loading: bool,
    pub error_message: Option<String>,
}

impl WorkflowStatus {
    /// Marks the start of a run: loading, with any previous error cleared.
    pub fn begin(&mut self) {
        self.is_loading = true;
        self.error_message = None;
    }

    pub fn fail(&mut self, message: impl Into<String>) {
        self.error_message = Some(message.into());
    }

    pub fn finish(&mut self) {
        self.is_loading = false;
    }
}
