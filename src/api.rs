//! The reservation search API.
//!
//! [`SearchApi`] is the seam between the store and the network: the store
//! only sees domain types and [`ApiError`], never HTTP. [`HttpApi`] is the
//! real implementation.

mod http;
mod wire;

use crate::model::{Listing, SearchCriteria};

pub use http::HttpApi;

/// Errors from a single API call.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("request to {endpoint} failed: {source}")]
    Transport {
        endpoint: &'static str,
        source: reqwest::Error,
    },

    #[error("{endpoint} returned HTTP {status}")]
    Status { endpoint: &'static str, status: u16 },

    #[error("could not decode {endpoint} response: {source}")]
    Decode {
        endpoint: &'static str,
        source: reqwest::Error,
    },
}

/// One page of search results.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchPage {
    pub listings: Vec<Listing>,
    pub total: u64,
}

/// Static search context sent with every search token request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Marketplace {
    pub id: String,
    pub locale: String,
    pub geocodes: Vec<String>,
}

/// The three calls a search needs, in the order they are made.
#[allow(async_fn_in_trait)]
pub trait SearchApi {
    /// `POST /api/loginAnonymously`. Returns the session token.
    async fn login_anonymously(&self) -> Result<String, ApiError>;

    /// `POST /api/search_token`. Returns the search id.
    async fn create_search_token(
        &self,
        token: &str,
        criteria: &SearchCriteria,
        marketplace: &Marketplace,
    ) -> Result<String, ApiError>;

    /// `POST /api/search_request`. Returns the listings for a search id.
    ///
    /// The token header is omitted when no token is held.
    async fn fetch_search_results(
        &self,
        token: Option<&str>,
        search_id: &str,
    ) -> Result<SearchPage, ApiError>;
}
