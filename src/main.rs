//! # ghstats
//!
//! **ghstats** snapshots a GitHub account's public activity into a JSON file.
//!
//! Features:
//! - `ghstats fetch` writes daily contributions per year plus the public repository list
//! - `ghstats stats` prints merged PR and star totals
//! - `ghstats home` prints the configuration directory
//!
//! The token is read from `GITHUB_TOKEN`.
//! This CLI is built with [clap](https://docs.rs/clap).

use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use ghstats::{Overrides, cmd_fetch, cmd_stats, ghstats_home};
use std::path::PathBuf;

/// Command-line interface definition.
#[derive(Parser, Debug)]
#[command(
    name = "ghstats",
    version,
    about = "ghstats - snapshot GitHub contributions and repositories to JSON",
    arg_required_else_help = true
)]
struct Cli {
    #[command(subcommand)]
    cmd: Cmd,
}

/// Available subcommands.
#[derive(Subcommand, Debug)]
enum Cmd {
    /// Fetch contributions and repositories and write the JSON snapshot
    Fetch {
        #[command(flatten)]
        common: CommonArgs,
        /// Year to fetch (repeatable; replaces the configured list)
        #[arg(long = "year", value_name = "YEAR")]
        years: Vec<i32>,
        /// Output file path
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Print merged pull-request and star totals
    Stats {
        #[command(flatten)]
        common: CommonArgs,
    },
    /// Print the ghstats configuration directory
    Home,
}

#[derive(Args, Debug)]
struct CommonArgs {
    /// Path to a config.toml (defaults to `$(ghstats home)/config.toml`)
    #[arg(long)]
    config: Option<PathBuf>,
    /// GitHub login to query
    #[arg(long)]
    account: Option<String>,
}

impl CommonArgs {
    fn into_overrides(self) -> Overrides {
        Overrides {
            config_path: self.config,
            account: self.account,
            ..Default::default()
        }
    }
}

/// CLI entry point.
fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.cmd {
        Cmd::Fetch {
            common,
            years,
            output,
        } => cmd_fetch(Overrides {
            years,
            output,
            ..common.into_overrides()
        }),
        Cmd::Stats { common } => cmd_stats(common.into_overrides()),
        Cmd::Home => {
            println!("{}", ghstats_home()?.display());
            Ok(())
        }
    }
}
