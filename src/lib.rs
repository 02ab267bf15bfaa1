//! Crate entry point for **ghstats**.
//!
//! This library provides the internal implementation for the `ghstats` CLI.
//! Each submodule encapsulates one responsibility (config, the GraphQL executor,
//! one module per query, and the snapshot orchestrator).
//! The `pub use` re-exports make the commands and the fetch pipeline accessible
//! directly from the crate root.

mod config;
mod contributions;
mod github;
mod paths;
mod progress;
mod repos;
mod snapshot;
mod stats;

/// Re-export commonly used types and commands so they can be accessed from `ghstats::*`.
pub use config::{Config, Overrides, Secret};
pub use contributions::{ContributionDay, fetch_year_contributions};
pub use github::GraphqlClient;
pub use paths::ghstats_home;
pub use repos::{RepoEntry, UNKNOWN_LANGUAGE, fetch_public_repos};
pub use snapshot::{FetchReport, Snapshot, YearBucket, YearFailure, build_snapshot, cmd_fetch, run};
pub use stats::{UserStats, cmd_stats, fetch_user_stats};
