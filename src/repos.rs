use anyhow::Result;
use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::github::GraphqlClient;
use crate::github::queries::PUBLIC_REPOSITORIES;

/// Written in place of a primary language GitHub did not detect.
pub const UNKNOWN_LANGUAGE: &str = "Unknown";

/// One public repository as written to the output file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RepoEntry {
    pub extension: String,
    pub language: String,
}

#[derive(Debug, Deserialize)]
struct Language {
    name: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RepoNode {
    name: String,
    #[serde(default)]
    primary_language: Option<Language>,
}

#[derive(Debug, Deserialize)]
struct RepoConnection {
    nodes: Vec<RepoNode>,
}

#[derive(Debug, Deserialize)]
struct RepoUser {
    repositories: RepoConnection,
}

#[derive(Debug, Deserialize)]
struct RepoData {
    user: RepoUser,
}

impl From<RepoNode> for RepoEntry {
    fn from(n: RepoNode) -> Self {
        RepoEntry {
            extension: n.name,
            language: n
                .primary_language
                .map(|l| l.name)
                .unwrap_or_else(|| UNKNOWN_LANGUAGE.to_string()),
        }
    }
}

/// List up to 100 public repositories of `account`, most recently updated first.
///
/// Only the first page is requested.
pub fn fetch_public_repos(client: &GraphqlClient, account: &str) -> Result<Vec<RepoEntry>> {
    let data: RepoData = client.query(PUBLIC_REPOSITORIES, json!({ "userName": account }))?;
    Ok(data
        .user
        .repositories
        .nodes
        .into_iter()
        .map(RepoEntry::from)
        .collect())
}
