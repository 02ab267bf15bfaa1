use anyhow::{Context, Result};
use chrono::{NaiveDate, SecondsFormat};
use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::github::GraphqlClient;
use crate::github::queries::CONTRIBUTION_CALENDAR;

/// One day of the contribution calendar as written to the output file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContributionDay {
    pub date: NaiveDate,
    pub count: u32,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CalendarDay {
    contribution_count: u32,
    date: NaiveDate,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CalendarWeek {
    contribution_days: Vec<CalendarDay>,
}

#[derive(Debug, Deserialize)]
struct Calendar {
    weeks: Vec<CalendarWeek>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Collection {
    contribution_calendar: Calendar,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CalendarUser {
    contributions_collection: Collection,
}

#[derive(Debug, Deserialize)]
struct CalendarData {
    user: CalendarUser,
}

/// UTC bounds covering all of `year`, formatted as GraphQL `DateTime` strings.
///
/// `2024` yields `("2024-01-01T00:00:00Z", "2024-12-31T23:59:59Z")`.
pub fn year_range(year: i32) -> Result<(String, String)> {
    let from = NaiveDate::from_ymd_opt(year, 1, 1)
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .with_context(|| format!("year out of range: {}", year))?;
    let to = NaiveDate::from_ymd_opt(year, 12, 31)
        .and_then(|d| d.and_hms_opt(23, 59, 59))
        .with_context(|| format!("year out of range: {}", year))?;
    Ok((
        from.and_utc().to_rfc3339_opts(SecondsFormat::Secs, true),
        to.and_utc().to_rfc3339_opts(SecondsFormat::Secs, true),
    ))
}

/// Flatten `weeks -> days` into one sequence, keeping source order.
fn flatten_weeks(calendar: Calendar) -> Vec<ContributionDay> {
    calendar
        .weeks
        .into_iter()
        .flat_map(|w| w.contribution_days)
        .map(|d| ContributionDay {
            date: d.date,
            count: d.contribution_count,
        })
        .collect()
}

/// Fetch the daily contribution counts of `account` for one calendar year.
///
/// # Errors
/// Propagates executor and decoding failures unchanged.
pub fn fetch_year_contributions(
    client: &GraphqlClient,
    account: &str,
    year: i32,
) -> Result<Vec<ContributionDay>> {
    let (from, to) = year_range(year)?;
    let vars = json!({
        "userName": account,
        "from": from,
        "to": to,
    });
    let data: CalendarData = client.query(CONTRIBUTION_CALENDAR, vars)?;
    Ok(flatten_weeks(
        data.user.contributions_collection.contribution_calendar,
    ))
}
