use crate::domain::models::GithubStats;
use anyhow::Result;
use async_trait::async_trait;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait StatsSource: Send + Sync {
    // Aggregated account statistics; repositories named in `ignore_repos`
    // do not count towards stars or languages. Commits are counted for
    // `commit_year` only.
    async fn fetch_stats(
        &self,
        login: &str,
        ignore_repos: &[String],
        commit_year: i32,
    ) -> Result<GithubStats>;
}
