//! GitHub GraphQL adapter behind [`StatsSource`].

use std::collections::HashMap;

use anyhow::{anyhow, bail, Context, Result};
use async_trait::async_trait;
use chrono::{Duration, TimeZone, Utc};
use chrono_tz::Tz;
use log::{debug, info};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use crate::domain::models::{GithubStats, LanguageShare};
use crate::domain::rank::{calculate_rank, Activity};
use crate::domain::stats::StatsSource;

const GITHUB_GRAPHQL: &str = "https://api.github.com/graphql";
const REPOS_PER_PAGE: u32 = 100;

const PROFILE_QUERY: &str = r#"
query($login: String!, $from: DateTime!, $to: DateTime!) {
  user(login: $login) {
    followers { totalCount }
    pullRequests(first: 1) { totalCount }
    mergedPullRequests: pullRequests(states: MERGED) { totalCount }
    openIssues: issues(states: OPEN) { totalCount }
    closedIssues: issues(states: CLOSED) { totalCount }
    repositoriesContributedTo(first: 1, contributionTypes: [COMMIT, ISSUE, PULL_REQUEST, REPOSITORY]) { totalCount }
    lastYear: contributionsCollection(from: $from, to: $to) {
      totalCommitContributions
      restrictedContributionsCount
    }
    allTime: contributionsCollection { totalPullRequestReviewContributions }
  }
}
"#;

const REPOS_QUERY: &str = r#"
query($login: String!, $first: Int!, $after: String) {
  user(login: $login) {
    repositories(first: $first, after: $after, ownerAffiliations: OWNER, isFork: false) {
      nodes {
        name
        stargazerCount
        languages(first: 10, orderBy: {field: SIZE, direction: DESC}) {
          edges { size node { name } }
        }
      }
      pageInfo { hasNextPage endCursor }
    }
  }
}
"#;

#[derive(Debug, Serialize)]
struct GraphQlRequest<'a> {
    query: &'a str,
    variables: Value,
}

#[derive(Debug, Deserialize)]
struct GraphQlResponse<T> {
    data: Option<T>,
    #[serde(default)]
    errors: Vec<GraphQlError>,
}

#[derive(Debug, Deserialize)]
struct GraphQlError {
    message: String,
}

impl<T> GraphQlResponse<T> {
    fn into_data(self) -> Result<T> {
        if !self.errors.is_empty() {
            let messages: Vec<String> = self.errors.into_iter().map(|e| e.message).collect();
            bail!("GitHub API error: {}", messages.join("; "));
        }
        self.data
            .ok_or_else(|| anyhow!("GitHub API returned no data"))
    }
}

#[derive(Debug, Deserialize)]
struct UserData<T> {
    user: Option<T>,
}

#[derive(Debug, Clone, Copy, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Count {
    total_count: u64,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct LastYear {
    total_commit_contributions: u64,
    restricted_contributions_count: u64,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct AllTime {
    total_pull_request_review_contributions: u64,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Profile {
    followers: Count,
    pull_requests: Count,
    merged_pull_requests: Count,
    open_issues: Count,
    closed_issues: Count,
    repositories_contributed_to: Count,
    last_year: LastYear,
    all_time: AllTime,
}

#[derive(Debug, Deserialize)]
struct RepoOwner {
    repositories: RepoPage,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RepoPage {
    nodes: Vec<Repo>,
    page_info: PageInfo,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PageInfo {
    has_next_page: bool,
    end_cursor: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Repo {
    name: String,
    stargazer_count: u64,
    languages: Languages,
}

#[derive(Debug, Default, Deserialize)]
struct Languages {
    #[serde(default)]
    edges: Vec<LanguageEdge>,
}

#[derive(Debug, Deserialize)]
struct LanguageEdge {
    size: u64,
    node: LanguageNode,
}

#[derive(Debug, Deserialize)]
struct LanguageNode {
    name: String,
}

pub struct GitHubAdapter {
    client: Client,
    token: String,
    endpoint: String,
    timezone: Tz,
}

impl GitHubAdapter {
    pub fn new(token: impl Into<String>) -> Result<Self> {
        let client = Client::builder()
            .user_agent(concat!("bootgif/", env!("CARGO_PKG_VERSION")))
            .build()
            .context("Failed to create HTTP client")?;
        Ok(Self {
            client,
            token: token.into(),
            endpoint: GITHUB_GRAPHQL.to_string(),
            timezone: Tz::UTC,
        })
    }

    /// Sends queries to `endpoint` instead of the public GitHub API.
    #[must_use]
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    /// Zone whose calendar year bounds the commit count. Defaults to UTC.
    #[must_use]
    pub fn with_timezone(mut self, timezone: Tz) -> Self {
        self.timezone = timezone;
        self
    }

    /// Reads the bearer token from `GITHUB_TOKEN`.
    pub fn from_env() -> Result<Self> {
        let token = std::env::var("GITHUB_TOKEN")
            .context("GITHUB_TOKEN must be set to query the GitHub API")?;
        Self::new(token)
    }

    async fn query<T: serde::de::DeserializeOwned>(&self, query: &str, variables: Value) -> Result<T> {
        let response = self
            .client
            .post(&self.endpoint)
            .bearer_auth(&self.token)
            .json(&GraphQlRequest { query, variables })
            .send()
            .await
            .with_context(|| format!("Failed to reach {}", self.endpoint))?
            .error_for_status()
            .context("GitHub API rejected the request")?;
        let body: GraphQlResponse<T> = response
            .json()
            .await
            .context("Failed to decode GitHub API response")?;
        body.into_data()
    }

    async fn fetch_profile(&self, login: &str, commit_year: i32) -> Result<Profile> {
        let (from, to) = year_bounds(commit_year, self.timezone)?;
        let data: UserData<Profile> = self
            .query(PROFILE_QUERY, json!({ "login": login, "from": from, "to": to }))
            .await?;
        data.user
            .ok_or_else(|| anyhow!("GitHub user {login} not found"))
    }

    async fn fetch_repos(&self, login: &str) -> Result<Vec<Repo>> {
        let mut repos = Vec::new();
        let mut after: Option<String> = None;
        loop {
            let data: UserData<RepoOwner> = self
                .query(
                    REPOS_QUERY,
                    json!({ "login": login, "first": REPOS_PER_PAGE, "after": after }),
                )
                .await?;
            let page = data
                .user
                .ok_or_else(|| anyhow!("GitHub user {login} not found"))?
                .repositories;
            debug!("fetched {} repositories", page.nodes.len());
            repos.extend(page.nodes);
            match page.page_info.end_cursor {
                Some(cursor) if page.page_info.has_next_page => after = Some(cursor),
                _ => break,
            }
        }
        Ok(repos)
    }
}

#[async_trait]
impl StatsSource for GitHubAdapter {
    async fn fetch_stats(
        &self,
        login: &str,
        ignore_repos: &[String],
        commit_year: i32,
    ) -> Result<GithubStats> {
        info!("fetching GitHub stats for {login}");
        let profile = self.fetch_profile(login, commit_year).await?;
        let repos = self.fetch_repos(login).await?;
        Ok(summarize(&profile, &repos, ignore_repos))
    }
}

// RFC 3339 bounds, in UTC, of the calendar year as seen in `tz`.
fn year_bounds(year: i32, tz: Tz) -> Result<(String, String)> {
    let midnight = |y: i32| {
        tz.with_ymd_and_hms(y, 1, 1, 0, 0, 0)
            .earliest()
            .ok_or_else(|| anyhow!("invalid year {year}"))
    };
    let start = midnight(year)?;
    let end = midnight(year + 1)? - Duration::seconds(1);
    let format = "%Y-%m-%dT%H:%M:%SZ";
    Ok((
        start.with_timezone(&Utc).format(format).to_string(),
        end.with_timezone(&Utc).format(format).to_string(),
    ))
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

fn summarize(profile: &Profile, repos: &[Repo], ignore_repos: &[String]) -> GithubStats {
    let counted: Vec<&Repo> = repos
        .iter()
        .filter(|r| !ignore_repos.iter().any(|name| name == &r.name))
        .collect();

    let total_stargazers: u64 = counted.iter().map(|r| r.stargazer_count).sum();

    let mut sizes: HashMap<&str, u64> = HashMap::new();
    for edge in counted.iter().flat_map(|r| &r.languages.edges) {
        *sizes.entry(edge.node.name.as_str()).or_default() += edge.size;
    }
    let total_size: u64 = sizes.values().sum();
    let mut languages_sorted: Vec<LanguageShare> = sizes
        .into_iter()
        .map(|(name, size)| LanguageShare {
            name: name.to_string(),
            percent: if total_size == 0 {
                0.0
            } else {
                round2(size as f64 / total_size as f64 * 100.0)
            },
        })
        .collect();
    languages_sorted.sort_by(|a, b| {
        b.percent
            .total_cmp(&a.percent)
            .then_with(|| a.name.cmp(&b.name))
    });

    let prs = profile.pull_requests.total_count;
    let merged = profile.merged_pull_requests.total_count;
    let pull_requests_merge_percentage = if prs == 0 {
        0.0
    } else {
        round2(merged as f64 / prs as f64 * 100.0)
    };

    let commits = profile.last_year.total_commit_contributions
        + profile.last_year.restricted_contributions_count;
    let user_rank = calculate_rank(&Activity {
        commits,
        prs,
        issues: profile.open_issues.total_count + profile.closed_issues.total_count,
        reviews: profile.all_time.total_pull_request_review_contributions,
        stars: total_stargazers,
        followers: profile.followers.total_count,
    });

    GithubStats {
        total_stargazers,
        total_commits_last_year: commits,
        total_pull_requests_made: prs,
        pull_requests_merge_percentage,
        total_repo_contributions: profile.repositories_contributed_to.total_count,
        user_rank,
        languages_sorted,
    }
}
