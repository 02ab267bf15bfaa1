use anyhow::Result;
use colored::Colorize;
use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::config::{Overrides, load_config};
use crate::github::GraphqlClient;
use crate::github::queries::USER_STATS;

/// Account-wide totals. Not part of the snapshot file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct UserStats {
    #[serde(rename = "totalPRs")]
    pub total_prs: u64,
    #[serde(rename = "totalStars")]
    pub total_stars: u64,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct TotalCount {
    total_count: u64,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct StarNode {
    stargazer_count: u64,
}

#[derive(Debug, Deserialize)]
struct StarConnection {
    nodes: Vec<StarNode>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct StatsUser {
    pull_requests: TotalCount,
    repositories: StarConnection,
}

#[derive(Debug, Deserialize)]
struct StatsData {
    user: StatsUser,
}

impl From<StatsData> for UserStats {
    fn from(d: StatsData) -> Self {
        UserStats {
            total_prs: d.user.pull_requests.total_count,
            total_stars: d
                .user
                .repositories
                .nodes
                .iter()
                .map(|n| n.stargazer_count)
                .sum(),
        }
    }
}

/// Merged PR count and the star sum over the first 100 public non-fork repositories.
pub fn fetch_user_stats(client: &GraphqlClient, account: &str) -> Result<UserStats> {
    let data: StatsData = client.query(USER_STATS, json!({ "userName": account }))?;
    Ok(data.into())
}

/// CLI command: print aggregate stats for the configured account.
///
/// Example output:
/// ```text
/// octocat
///   totalPRs:   42
///   totalStars: 1337
/// ```
pub fn cmd_stats(ov: Overrides) -> Result<()> {
    let cfg = load_config(ov)?;
    let client = GraphqlClient::new(&cfg)?;
    let stats = fetch_user_stats(&client, &cfg.account)?;

    println!("{}", cfg.account.bold());
    println!("  totalPRs:   {}", stats.total_prs.to_string().green());
    println!("  totalStars: {}", stats.total_stars.to_string().yellow());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stars_are_summed_locally() {
        let raw = serde_json::json!({
            "user": {
                "pullRequests": { "totalCount": 12 },
                "repositories": { "nodes": [
                    { "stargazerCount": 5 },
                    { "stargazerCount": 0 },
                    { "stargazerCount": 30 }
                ]}
            }
        });
        let data: StatsData = serde_json::from_value(raw).unwrap();
        assert_eq!(
            UserStats::from(data),
            UserStats {
                total_prs: 12,
                total_stars: 35
            }
        );
    }

    #[test]
    fn no_repositories_means_zero_stars() {
        let raw = serde_json::json!({
            "user": {
                "pullRequests": { "totalCount": 0 },
                "repositories": { "nodes": [] }
            }
        });
        let data: StatsData = serde_json::from_value(raw).unwrap();
        assert_eq!(UserStats::from(data).total_stars, 0);
    }

    #[test]
    fn serializes_with_original_key_names() {
        let s = UserStats {
            total_prs: 1,
            total_stars: 2,
        };
        assert_eq!(
            serde_json::to_string(&s).unwrap(),
            r#"{"totalPRs":1,"totalStars":2}"#
        );
    }
}
