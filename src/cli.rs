//! CLI interface for seatsearch.
//!
//! Each subcommand is non-interactive: arguments in, output out.
//! Venues go to stdout; progress and diagnostics go to stderr.
//!
//! - `seatsearch search` — run a full search and print venues.
//! - `seatsearch login` — obtain and persist an anonymous session token.
//! - `seatsearch session` — show the persisted session token.

mod format;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use jiff::civil::{Date, Time};
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::debug;

use crate::api::{HttpApi, Marketplace};
use crate::config::Config;
use crate::model::{SearchCriteria, WorkflowStatus};
use crate::storage::{Storage, TOKEN_KEY};
use crate::store::SearchStore;

use format::format_results;

const DATE_FORMAT: &str = "%Y-%m-%d";
const TIME_FORMAT: &str = "%H:%M";

/// seatsearch — find a table.
#[derive(Debug, Parser)]
#[command(name = "seatsearch", version, after_long_help = EXAMPLES_HELP)]
pub struct Cli {
    /// Reservation API base URL.
    /// Overrides `SEATSEARCH_BASE_URL` and the config file.
    #[arg(long, global = true)]
    base_url: Option<String>,

    /// Directory holding local storage (default `~/.seatsearch`).
    #[arg(long, global = true)]
    storage_dir: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

const EXAMPLES_HELP: &str = r#"Examples:
  seatsearch search --date 2024-05-01 --time 19:30 --guests 2
  seatsearch search --date 2024-05-01 --time 19:30 --guests 4 --pages 3 --json
  seatsearch login
  seatsearch --storage-dir /tmp/ss session"#;

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Search for venues with a table at the given date, time, and party size.
    ///
    /// Logs in anonymously when no session is held, registers the search,
    /// and fetches results.
    Search {
        /// Date to book (`YYYY-MM-DD`).
        #[arg(long, value_parser = parse_date)]
        date: Date,

        /// Time to book (`HH:MM`, 24h).
        #[arg(long, value_parser = parse_time)]
        time: Time,

        /// Party size.
        #[arg(long, value_parser = clap::value_parser!(u32).range(1..))]
        guests: u32,

        /// Number of result fetches. Pages are concatenated as they arrive.
        #[arg(long, default_value_t = 1, value_parser = clap::value_parser!(u32).range(1..))]
        pages: u32,

        /// Print results as JSON.
        #[arg(long)]
        json: bool,

        /// Reuse the token saved by an earlier login instead of logging in again.
        #[arg(long)]
        resume: bool,
    },

    /// Log in anonymously and save the session token. Prints the token.
    Login,

    /// Show the saved session token.
    Session,
}

fn parse_date(s: &str) -> Result<Date, String> {
    Date::strptime(DATE_FORMAT, s).map_err(|e| format!("expected YYYY-MM-DD: {e}"))
}

fn parse_time(s: &str) -> Result<Time, String> {
    Time::strptime(TIME_FORMAT, s).map_err(|e| format!("expected HH:MM: {e}"))
}

/// Build search criteria in the canonical `YYYY-MM-DD` / `HH:MM` forms.
fn criteria(date: Date, time: Time, guests: u32) -> SearchCriteria {
    SearchCriteria::new(
        date.strftime(DATE_FORMAT).to_string(),
        time.strftime(TIME_FORMAT).to_string(),
        guests,
    )
}

/// Run the CLI, returning an error message on failure.
pub async fn run() -> Result<(), String> {
    let cli = Cli::parse();

    let root = match cli.storage_dir {
        Some(dir) => dir,
        None => Storage::default_root().ok_or("could not determine home directory")?,
    };
    let storage =
        Storage::new(root).map_err(|e| format!("failed to initialize storage: {e}"))?;

    match cli.command {
        Command::Search {
            date,
            time,
            guests,
            pages,
            json,
            resume,
        } => {
            let mut store = open_store(cli.base_url.as_deref(), storage)?;
            cmd_search(&mut store, &criteria(date, time, guests), pages, json, resume).await
        }
        Command::Login => {
            let mut store = open_store(cli.base_url.as_deref(), storage)?;
            cmd_login(&mut store).await
        }
        Command::Session => cmd_session(&storage),
    }
}

fn open_store(base_url: Option<&str>, storage: Storage) -> Result<SearchStore<HttpApi>, String> {
    let config = Config::load(base_url)?;
    let marketplace = Marketplace {
        id: config.marketplace_id,
        locale: config.locale,
        geocodes: config.geocodes,
    };
    Ok(SearchStore::new(
        HttpApi::new(config.base_url),
        storage,
        marketplace,
    ))
}

async fn cmd_search(
    store: &mut SearchStore<HttpApi>,
    criteria: &SearchCriteria,
    pages: u32,
    json: bool,
    resume: bool,
) -> Result<(), String> {
    if resume {
        let found = store
            .resume_session()
            .map_err(|e| format!("failed to read saved session: {e}"))?;
        if !found {
            eprintln!("No saved session; logging in anonymously");
        }
    }

    let progress = report_progress(
        store.subscribe(),
        format!(
            "Searching {} at {} for {}...",
            criteria.date, criteria.time, criteria.guest_count
        ),
    );
    store.clear_search();
    store.run_workflow(criteria).await;

    let status = progress
        .await
        .map_err(|e| format!("progress reporter failed: {e}"))?;
    if let Some(message) = status.error_message {
        return Err(message);
    }

    for _ in 1..pages {
        store.fetch_results().await.map_err(|e| e.to_string())?;
    }
    debug!(
        search_id = store.search_id().unwrap_or_default(),
        received = store.listings().len(),
        total = store.total_count(),
        "search complete"
    );

    if json {
        let out = serde_json::to_string_pretty(store.results())
            .map_err(|e| format!("failed to serialize results: {e}"))?;
        println!("{out}");
    } else {
        println!("{}", format_results(store.results()));
    }

    Ok(())
}

/// Follow a workflow's published status until loading ends.
///
/// Prints `label` to stderr once loading is seen and resolves to the
/// status the workflow finished with.
fn report_progress(
    mut status: watch::Receiver<WorkflowStatus>,
    label: String,
) -> JoinHandle<WorkflowStatus> {
    tokio::spawn(async move {
        let mut announced = false;
        while status.changed().await.is_ok() {
            let current = status.borrow_and_update().clone();
            if current.is_loading && !announced {
                eprintln!("{label}");
                announced = true;
            }
            if !current.is_loading {
                return current;
            }
        }
        status.borrow().clone()
    })
}

async fn cmd_login(store: &mut SearchStore<HttpApi>) -> Result<(), String> {
    store.login().await.map_err(|e| e.to_string())?;

    println!("{}", store.token().unwrap_or_default());
    eprintln!("Session saved to {}", store.storage().path().display());
    Ok(())
}

fn cmd_session(storage: &Storage) -> Result<(), String> {
    let token = storage
        .get_item(TOKEN_KEY)
        .map_err(|e| format!("failed to read saved session: {e}"))?;

    match token {
        Some(token) => println!("{token}"),
        None => println!("No saved session"),
    }
    Ok(())
}
