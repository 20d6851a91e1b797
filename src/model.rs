//! Core data model for seatsearch.
//!
//! These types represent what the search workflow works with:
//! the criteria a user searches by, the venue listings that come back,
//! and the state the store tracks between steps.

mod criteria;
mod listing;
mod state;

pub use criteria::SearchCriteria;
pub use listing::{Area, AreaOption, Availability, Listing, RecommendedSlot};
pub use state::{ResultSet, SearchSession, Session, UNKNOWN_ERROR, WorkflowStatus};
