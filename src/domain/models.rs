use std::fmt;

#[derive(Debug, Clone, PartialEq, Default)]
pub struct UserRank {
    /// One of `S`, `A+`, `A`, `A-`, `B+`, `B`, `B-`, `C+`, `C`.
    pub level: String,
    /// Share of users ranked above, 0 to 100.
    pub percentile: f64,
}

impl fmt::Display for UserRank {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.level)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct LanguageShare {
    pub name: String,
    pub percent: f64,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct GithubStats {
    pub total_stargazers: u64,
    pub total_commits_last_year: u64,
    pub total_pull_requests_made: u64,
    pub pull_requests_merge_percentage: f64,
    pub total_repo_contributions: u64,
    pub user_rank: UserRank,
    /// Sorted by share, largest first.
    pub languages_sorted: Vec<LanguageShare>,
}

impl GithubStats {
    /// Names of the `limit` most used languages, most used first.
    #[must_use]
    pub fn top_languages(&self, limit: usize) -> Vec<&str> {
        let mut ranked: Vec<&LanguageShare> = self.languages_sorted.iter().collect();
        ranked.sort_by(|a, b| b.percent.total_cmp(&a.percent));
        ranked.into_iter().take(limit).map(|l| l.name.as_str()).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn share(name: &str, percent: f64) -> LanguageShare {
        LanguageShare {
            name: name.to_string(),
            percent,
        }
    }

    #[test]
    fn test_top_languages_limit_and_order() {
        let stats = GithubStats {
            languages_sorted: vec![
                share("Lua", 5.0),
                share("Rust", 40.0),
                share("Python", 20.0),
                share("Shell", 1.0),
                share("Go", 30.0),
                share("C", 4.0),
            ],
            ..Default::default()
        };
        assert_eq!(
            stats.top_languages(5),
            vec!["Rust", "Go", "Python", "Lua", "C"]
        );
        assert!(GithubStats::default().top_languages(5).is_empty());
    }
}
