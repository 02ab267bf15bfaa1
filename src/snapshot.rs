use anyhow::{Context, Result};
use colored::Colorize;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::io::Write;
use std::path::Path;

use crate::config::{Config, Overrides, load_config};
use crate::contributions::{ContributionDay, fetch_year_contributions};
use crate::github::GraphqlClient;
use crate::progress::{finish_err, finish_ok, step};
use crate::repos::{RepoEntry, fetch_public_repos};

/// All contribution days fetched for one calendar year.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct YearBucket {
    pub year: String,
    pub commits: Vec<ContributionDay>,
}

/// The document written to the output file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Snapshot {
    pub git_commits: Vec<YearBucket>,
    pub public_repos: Vec<RepoEntry>,
}

/// A year whose fetch failed and was left out of the snapshot.
#[derive(Debug)]
pub struct YearFailure {
    pub year: i32,
    pub error: anyhow::Error,
}

impl fmt::Display for YearFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {:#}", self.year, self.error)
    }
}

/// Result of [`build_snapshot`]: the document plus the years left out of it.
#[derive(Debug)]
pub struct FetchReport {
    pub snapshot: Snapshot,
    pub skipped: Vec<YearFailure>,
}

/// Fetch every configured year, then the repository list.
///
/// A failing year is reported and skipped; it produces no bucket at all.
/// A failing repository list aborts the whole build.
pub fn build_snapshot(client: &GraphqlClient, cfg: &Config) -> Result<FetchReport> {
    let mut snapshot = Snapshot::default();
    let mut skipped = Vec::new();

    for &year in &cfg.years {
        let pb = step(format!("fetching contributions for {}…", year));
        match fetch_year_contributions(client, &cfg.account, year) {
            Ok(commits) => {
                finish_ok(&pb, format!("{}: {} days", year, commits.len()));
                snapshot.git_commits.push(YearBucket {
                    year: year.to_string(),
                    commits,
                });
            }
            Err(e) => {
                finish_err(&pb, format!("{} (error: {:#})", year, e));
                skipped.push(YearFailure { year, error: e });
            }
        }
    }

    let pb = step("fetching repositories…");
    match fetch_public_repos(client, &cfg.account) {
        Ok(repos) => {
            finish_ok(&pb, format!("{} public repositories", repos.len()));
            snapshot.public_repos = repos;
        }
        Err(e) => {
            finish_err(&pb, format!("repositories (error: {:#})", e));
            return Err(e.context(format!("failed to list repositories of {}", cfg.account)));
        }
    }

    Ok(FetchReport { snapshot, skipped })
}

/// Serialize `snapshot` as two-space indented JSON and replace `path` with it.
///
/// The document is written to a temporary file next to `path` and renamed
/// over it. Readers never see a truncated file.
pub fn write_snapshot(path: &Path, snapshot: &Snapshot) -> Result<()> {
    let json = serde_json::to_string_pretty(snapshot)?;

    let dir = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };
    fs::create_dir_all(dir)
        .with_context(|| format!("failed to create directory {}", dir.display()))?;

    let mut tmp = tempfile::Builder::new()
        .prefix(".ghstats-")
        .suffix(".json")
        .tempfile_in(dir)
        .with_context(|| format!("failed to create temp file in {}", dir.display()))?;
    tmp.write_all(json.as_bytes())?;
    tmp.as_file().sync_all()?;
    tmp.persist(path)
        .with_context(|| format!("failed to write {}", path.display()))?;
    Ok(())
}

/// Build the snapshot for `cfg` and write it to `cfg.output_path`.
pub fn run(cfg: &Config) -> Result<FetchReport> {
    let client = GraphqlClient::new(cfg)?;
    let report = build_snapshot(&client, cfg)?;
    write_snapshot(&cfg.output_path, &report.snapshot)?;
    Ok(report)
}

/// CLI command: fetch contributions and repositories, then write the JSON file.
///
/// Process:
/// 1. Resolve [`Config`] from `config.toml`, flags and `GITHUB_TOKEN`.
/// 2. Fetch each configured year in order; failures are skipped and each
///    one is printed to stderr with its cause, even when no spinner is drawn.
/// 3. Fetch the public repository list (fatal on failure, nothing is written).
/// 4. Write the snapshot and print its path.
pub fn cmd_fetch(ov: Overrides) -> Result<()> {
    let cfg = load_config(ov)?;
    println!("Fetching data for user: {}", cfg.account);

    let report = run(&cfg)?;

    for f in &report.skipped {
        eprintln!("{} skipped {}", "warning:".yellow().bold(), f);
    }
    println!("Successfully wrote data to {}", cfg.output_path.display());
    Ok(())
}
