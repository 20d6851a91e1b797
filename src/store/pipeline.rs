//! The named steps of a search workflow and the order they run in.

use std::fmt;

/// One step of a search workflow.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    /// Obtain an anonymous session token.
    Login,
    /// Register the criteria and obtain a search id.
    CreateSearchToken,
    /// Fetch listings for the search id.
    FetchResults,
}

impl Step {
    pub fn name(self) -> &'static str {
        match self {
            Self::Login => "login",
            Self::CreateSearchToken => "create-search-token",
            Self::FetchResults => "fetch-results",
        }
    }
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// The steps a workflow runs, in order.
///
/// Login is skipped when a session token is already held.
pub fn plan(has_token: bool) -> Vec<Step> {
    let mut steps = Vec::with_capacity(3);
    if !has_token {
        steps.push(Step::Login);
    }
    steps.extend([Step::CreateSearchToken, Step::FetchResults]);
    steps
}
