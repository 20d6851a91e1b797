//! In-memory `SearchApi` for store tests.
//!
//! Responses are queued per endpoint and consumed in order. Every call is
//! recorded, along with the loading flag the store published at the time.

use std::collections::VecDeque;
use std::sync::Mutex;

use tokio::sync::watch;

use crate::api::{ApiError, Marketplace, SearchApi, SearchPage};
use crate::model::{Listing, SearchCriteria, WorkflowStatus};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    Login,
    SearchToken {
        token: String,
        date: String,
        time: String,
        size: String,
    },
    Fetch {
        token: Option<String>,
        search_id: String,
    },
}

#[derive(Default)]
pub struct FakeApi {
    logins: Mutex<VecDeque<Result<String, u16>>>,
    search_tokens: Mutex<VecDeque<Result<String, u16>>>,
    pages: Mutex<VecDeque<Result<SearchPage, u16>>>,
    calls: Mutex<Vec<Call>>,
    status: Mutex<Option<watch::Receiver<WorkflowStatus>>>,
    loading_seen: Mutex<Vec<bool>>,
}

impl FakeApi {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn login_ok(self, token: &str) -> Self {
        self.logins.lock().unwrap().push_back(Ok(token.to_string()));
        self
    }

    pub fn login_fails(self, status: u16) -> Self {
        self.logins.lock().unwrap().push_back(Err(status));
        self
    }

    pub fn search_token_ok(self, search_id: &str) -> Self {
        self.search_tokens
            .lock()
            .unwrap()
            .push_back(Ok(search_id.to_string()));
        self
    }

    pub fn search_token_fails(self, status: u16) -> Self {
        self.search_tokens.lock().unwrap().push_back(Err(status));
        self
    }

    pub fn page_ok(self, listings: Vec<Listing>, total: u64) -> Self {
        self.pages
            .lock()
            .unwrap()
            .push_back(Ok(SearchPage { listings, total }));
        self
    }

    pub fn page_fails(self, status: u16) -> Self {
        self.pages.lock().unwrap().push_back(Err(status));
        self
    }

    /// Watch the store's status so each call records the loading flag.
    pub fn observe(&self, status: watch::Receiver<WorkflowStatus>) {
        *self.status.lock().unwrap() = Some(status);
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    pub fn loading_seen(&self) -> Vec<bool> {
        self.loading_seen.lock().unwrap().clone()
    }

    fn record(&self, call: Call) {
        self.calls.lock().unwrap().push(call);
        if let Some(status) = &*self.status.lock().unwrap() {
            self.loading_seen
                .lock()
                .unwrap()
                .push(status.borrow().is_loading);
        }
    }
}

impl SearchApi for FakeApi {
    async fn login_anonymously(&self) -> Result<String, ApiError> {
        self.record(Call::Login);
        self.logins
            .lock()
            .unwrap()
            .pop_front()
            .expect("unexpected login call")
            .map_err(|status| ApiError::Status {
                endpoint: "/api/loginAnonymously",
                status,
            })
    }

    async fn create_search_token(
        &self,
        token: &str,
        criteria: &SearchCriteria,
        _marketplace: &Marketplace,
    ) -> Result<String, ApiError> {
        self.record(Call::SearchToken {
            token: token.to_string(),
            date: criteria.compact_date(),
            time: criteria.compact_time(),
            size: criteria.size(),
        });
        self.search_tokens
            .lock()
            .unwrap()
            .pop_front()
            .expect("unexpected search token call")
            .map_err(|status| ApiError::Status {
                endpoint: "/api/search_token",
                status,
            })
    }

    async fn fetch_search_results(
        &self,
        token: Option<&str>,
        search_id: &str,
    ) -> Result<SearchPage, ApiError> {
        self.record(Call::Fetch {
            token: token.map(String::from),
            search_id: search_id.to_string(),
        });
        self.pages
            .lock()
            .unwrap()
            .pop_front()
            .expect("unexpected fetch call")
            .map_err(|status| ApiError::Status {
                endpoint: "/api/search_request",
                status,
            })
    }
}
