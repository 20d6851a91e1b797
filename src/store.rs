//! The search store: state and actions of the search workflow.
//!
//! A search takes three dependent calls, each consuming what the previous
//! one produced:
//!
//! ```text
//! login ──token──▶ create_search_token ──search id──▶ fetch_results
//! ```
//!
//! Each action can be called on its own; [`SearchStore::run_workflow`] runs
//! them in order as a [`pipeline`], tracking loading and error state for
//! display. Actions take `&mut self`, so two workflows can never interleave
//! on one store.
//!
//! Failures leave partial state in place: a token saved by a successful
//! login survives a later step failing.

pub mod pipeline;

#[cfg(test)]
mod fake;

use std::error::Error;

use tokio::sync::watch;
use tracing::{debug, error, info};

use crate::api::{Marketplace, SearchApi};
use crate::model::{
    Listing, ResultSet, SearchCriteria, SearchSession, Session, UNKNOWN_ERROR, WorkflowStatus,
};
use crate::storage::{self, Storage, TOKEN_KEY};

use pipeline::Step;

/// Why a store action failed.
///
/// Messages are meant for display and deliberately omit the underlying
/// cause, which is logged where the failure happens.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("Login failed")]
    Auth,

    /// An action was called before the step that feeds it.
    #[error("{0} is missing")]
    Precondition(&'static str),

    #[error("Search token creation failed")]
    SearchToken,

    #[error("Fetching restaurants failed")]
    Fetch,
}

pub type Result<T> = core::result::Result<T, StoreError>;

/// Display message for a failed workflow.
///
/// Store errors show their own message; anything else gets [`UNKNOWN_ERROR`].
pub fn failure_message(err: &(dyn Error + 'static)) -> String {
    match err.downcast_ref::<StoreError>() {
        Some(err) => err.to_string(),
        None => UNKNOWN_ERROR.to_string(),
    }
}

/// Owns everything a search produces.
pub struct SearchStore<A> {
    api: A,
    storage: Storage,
    marketplace: Marketplace,
    session: Session,
    search: SearchSession,
    results: ResultSet,
    status: WorkflowStatus,
    status_tx: watch::Sender<WorkflowStatus>,
}

impl<A: SearchApi> SearchStore<A> {
    /// Creates an empty store.
    ///
    /// The store starts without a token even when one is persisted;
    /// see [`Self::resume_session`].
    pub fn new(api: A, storage: Storage, marketplace: Marketplace) -> Self {
        let (status_tx, _) = watch::channel(WorkflowStatus::default());
        Self {
            api,
            storage,
            marketplace,
            session: Session::default(),
            search: SearchSession::default(),
            results: ResultSet::default(),
            status: WorkflowStatus::default(),
            status_tx,
        }
    }

    // ── Published state ──

    pub fn token(&self) -> Option<&str> {
        self.session.token.as_deref()
    }

    pub fn search_id(&self) -> Option<&str> {
        self.search.search_id.as_deref()
    }

    pub fn results(&self) -> &ResultSet {
        &self.results
    }

    pub fn listings(&self) -> &[Listing] {
        &self.results.listings
    }

    pub fn total_count(&self) -> u64 {
        self.results.total_count
    }

    pub fn status(&self) -> &WorkflowStatus {
        &self.status
    }

    /// Subscribe to status changes, for display layers that render while
    /// a workflow runs.
    pub fn subscribe(&self) -> watch::Receiver<WorkflowStatus> {
        self.status_tx.subscribe()
    }

    #[cfg(test)]
    pub fn api(&self) -> &A {
        &self.api
    }

    pub fn storage(&self) -> &Storage {
        &self.storage
    }

    // An empty token or search id counts as missing.

    fn held_token(&self) -> Option<&str> {
        self.session.token.as_deref().filter(|t| !t.is_empty())
    }

    fn held_search_id(&self) -> Option<&str> {
        self.search.search_id.as_deref().filter(|id| !id.is_empty())
    }

    // ── Actions ──

    /// Adopt the token persisted by an earlier login, if there is one.
    ///
    /// Returns whether a usable token was found.
    pub fn resume_session(&mut self) -> storage::Result<bool> {
        let token = self
            .storage
            .get_item(TOKEN_KEY)?
            .filter(|t| !t.is_empty());
        let found = token.is_some();
        if found {
            debug!("resumed persisted session");
            self.session.token = token;
        }
        Ok(found)
    }

    /// Log in anonymously, keeping the token in memory and in storage.
    pub async fn login(&mut self) -> Result<()> {
        let token = self.api.login_anonymously().await.map_err(|e| {
            error!(error = %e, "failed to log in");
            StoreError::Auth
        })?;

        self.session.token = Some(token.clone());
        self.storage.set_item(TOKEN_KEY, &token).map_err(|e| {
            error!(error = %e, "failed to persist session token");
            StoreError::Auth
        })?;

        info!("logged in anonymously");
        Ok(())
    }

    /// Register search criteria, keeping the returned search id.
    ///
    /// Requires a token. Overwrites any previous search id.
    pub async fn create_search_token(&mut self, criteria: &SearchCriteria) -> Result<()> {
        let Some(token) = self.held_token() else {
            error!("token is missing, log in first");
            return Err(StoreError::Precondition("Token"));
        };

        let search_id = self
            .api
            .create_search_token(token, criteria, &self.marketplace)
            .await
            .map_err(|e| {
                error!(error = %e, "failed to create search token");
                StoreError::SearchToken
            })?;

        info!(%search_id, date = %criteria.date, time = %criteria.time, guests = criteria.guest_count, "created search");
        self.search.search_id = Some(search_id);
        Ok(())
    }

    /// Fetch listings for the current search id.
    ///
    /// Appends to listings already held (no de-duplication) or replaces an
    /// empty set. The total always takes the latest reported value.
    pub async fn fetch_results(&mut self) -> Result<()> {
        let Some(search_id) = self.held_search_id() else {
            error!("search id is missing, create a search token first");
            return Err(StoreError::Precondition("Search ID"));
        };

        let page = self
            .api
            .fetch_search_results(self.session.token.as_deref(), search_id)
            .await
            .map_err(|e| {
                error!(error = %e, "failed to fetch venues");
                StoreError::Fetch
            })?;

        info!(received = page.listings.len(), total = page.total, "fetched venues");
        self.results.absorb(page.listings, page.total);
        Ok(())
    }

    /// Run a full search: login if needed, create a search, fetch results.
    ///
    /// Stops at the first failing step and records its message in the
    /// status. Loading is cleared afterwards whether or not a step failed.
    pub async fn run_workflow(&mut self, criteria: &SearchCriteria) {
        self.update_status(WorkflowStatus::begin);

        let steps = pipeline::plan(self.held_token().is_some());
        if let Err(err) = self.run_steps(&steps, criteria).await {
            error!(error = %err, "workflow failed");
            let message = failure_message(&err);
            self.update_status(|status| status.fail(message));
        }

        self.update_status(WorkflowStatus::finish);
    }

    /// Empty the listings and zero the total. Token and search id are kept.
    pub fn clear_search(&mut self) {
        self.results.clear();
    }

    async fn run_steps(&mut self, steps: &[Step], criteria: &SearchCriteria) -> Result<()> {
        for &step in steps {
            debug!(%step, "running step");
            match step {
                Step::Login => self.login().await?,
                Step::CreateSearchToken => self.create_search_token(criteria).await?,
                Step::FetchResults => self.fetch_results().await?,
            }
        }
        Ok(())
    }

    fn update_status(&mut self, change: impl FnOnce(&mut WorkflowStatus)) {
        change(&mut self.status);
        self.status_tx.send_replace(self.status.clone());
    }
}
