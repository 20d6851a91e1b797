//! `SearchApi` over HTTP.
//!
//! All three endpoints are JSON `POST`s on the configured base URL.
//! Authenticated calls carry the session token in a `token` header.

use reqwest::{Client, RequestBuilder};
use serde::de::DeserializeOwned;
use tracing::debug;

use crate::model::{Listing, SearchCriteria};

use super::wire::{
    LoginResponse, SearchRequest, SearchResponse, SearchTokenRequest, SearchTokenResponse,
};
use super::{ApiError, Marketplace, SearchApi, SearchPage};

const LOGIN_PATH: &str = "/api/loginAnonymously";
const SEARCH_TOKEN_PATH: &str = "/api/search_token";
const SEARCH_REQUEST_PATH: &str = "/api/search_request";

const TOKEN_HEADER: &str = "token";

/// HTTP client for the reservation API.
#[derive(Debug, Clone)]
pub struct HttpApi {
    client: Client,
    base_url: String,
}

impl HttpApi {
    /// `base_url` is scheme and host, e.g. `https://site.ontopo.work`.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.into(),
        }
    }

    fn post(&self, path: &str) -> RequestBuilder {
        self.client.post(format!("{}{path}", self.base_url))
    }

    /// Send a request and decode a successful JSON response.
    async fn send<T: DeserializeOwned>(
        endpoint: &'static str,
        request: RequestBuilder,
    ) -> Result<T, ApiError> {
        debug!(endpoint, "sending request");
        let response = request
            .send()
            .await
            .map_err(|source| ApiError::Transport { endpoint, source })?;

        let status = response.status();
        if !status.is_success() {
            return Err(ApiError::Status {
                endpoint,
                status: status.as_u16(),
            });
        }

        response
            .json::<T>()
            .await
            .map_err(|source| ApiError::Decode { endpoint, source })
    }
}

impl SearchApi for HttpApi {
    async fn login_anonymously(&self) -> Result<String, ApiError> {
        let response: LoginResponse = Self::send(LOGIN_PATH, self.post(LOGIN_PATH)).await?;
        Ok(response.jwt_token)
    }

    async fn create_search_token(
        &self,
        token: &str,
        criteria: &SearchCriteria,
        marketplace: &Marketplace,
    ) -> Result<String, ApiError> {
        let body = SearchTokenRequest::new(criteria, marketplace);
        let request = self
            .post(SEARCH_TOKEN_PATH)
            .header(TOKEN_HEADER, token)
            .json(&body);
        let response: SearchTokenResponse = Self::send(SEARCH_TOKEN_PATH, request).await?;
        Ok(response.search_id)
    }

    async fn fetch_search_results(
        &self,
        token: Option<&str>,
        search_id: &str,
    ) -> Result<SearchPage, ApiError> {
        let mut request = self
            .post(SEARCH_REQUEST_PATH)
            .json(&SearchRequest { search_id });
        if let Some(token) = token {
            request = request.header(TOKEN_HEADER, token);
        }
        let response: SearchResponse = Self::send(SEARCH_REQUEST_PATH, request).await?;
        Ok(SearchPage {
            listings: response.posts.into_iter().map(Listing::from).collect(),
            total: response.total,
        })
    }
}
