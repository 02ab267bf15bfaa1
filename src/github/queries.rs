/// Daily contribution counts for one account over a `DateTime` range.
pub const CONTRIBUTION_CALENDAR: &str = r#"
query($userName: String!, $from: DateTime!, $to: DateTime!) {
  user(login: $userName) {
    contributionsCollection(from: $from, to: $to) {
      contributionCalendar {
        weeks {
          contributionDays {
            contributionCount
            date
          }
        }
      }
    }
  }
}
"#;

/// First page of public repositories, most recently updated first.
pub const PUBLIC_REPOSITORIES: &str = r#"
query($userName: String!) {
  user(login: $userName) {
    repositories(first: 100, privacy: PUBLIC, orderBy: {field: UPDATED_AT, direction: DESC}) {
      nodes {
        name
        primaryLanguage {
          name
        }
      }
    }
  }
}
"#;

/// Merged PR total plus star counts of the first page of public non-fork repositories.
pub const USER_STATS: &str = r#"
query($userName: String!) {
  user(login: $userName) {
    pullRequests(states: MERGED) {
      totalCount
    }
    repositories(first: 100, privacy: PUBLIC, isFork: false) {
      nodes {
        stargazerCount
      }
    }
  }
}
"#;
