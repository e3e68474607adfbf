//! Percentile rank over a user's activity.
//!
//! Each signal is mapped into 0..1 by a CDF centred on a typical value, the
//! weighted mean is turned into a "top x%" figure and bucketed into a level.

use crate::domain::models::UserRank;

const COMMITS_MEDIAN: f64 = 250.0;
const COMMITS_WEIGHT: f64 = 2.0;
const PRS_MEDIAN: f64 = 50.0;
const PRS_WEIGHT: f64 = 3.0;
const ISSUES_MEDIAN: f64 = 25.0;
const ISSUES_WEIGHT: f64 = 1.0;
const REVIEWS_MEDIAN: f64 = 2.0;
const REVIEWS_WEIGHT: f64 = 1.0;
const STARS_MEDIAN: f64 = 50.0;
const STARS_WEIGHT: f64 = 4.0;
const FOLLOWERS_MEDIAN: f64 = 10.0;
const FOLLOWERS_WEIGHT: f64 = 1.0;

const TOTAL_WEIGHT: f64 = COMMITS_WEIGHT
    + PRS_WEIGHT
    + ISSUES_WEIGHT
    + REVIEWS_WEIGHT
    + STARS_WEIGHT
    + FOLLOWERS_WEIGHT;

const THRESHOLDS: [f64; 9] = [1.0, 12.5, 25.0, 37.5, 50.0, 62.5, 75.0, 87.5, 100.0];
const LEVELS: [&str; 9] = ["S", "A+", "A", "A-", "B+", "B", "B-", "C+", "C"];

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Activity {
    pub commits: u64,
    pub prs: u64,
    pub issues: u64,
    pub reviews: u64,
    pub stars: u64,
    pub followers: u64,
}

fn exponential_cdf(x: f64) -> f64 {
    1.0 - 2f64.powf(-x)
}

fn log_normal_cdf(x: f64) -> f64 {
    x / (1.0 + x)
}

#[must_use]
pub fn calculate_rank(activity: &Activity) -> UserRank {
    let ratio = |value: u64, median: f64| value as f64 / median;
    let score = COMMITS_WEIGHT * exponential_cdf(ratio(activity.commits, COMMITS_MEDIAN))
        + PRS_WEIGHT * exponential_cdf(ratio(activity.prs, PRS_MEDIAN))
        + ISSUES_WEIGHT * exponential_cdf(ratio(activity.issues, ISSUES_MEDIAN))
        + REVIEWS_WEIGHT * exponential_cdf(ratio(activity.reviews, REVIEWS_MEDIAN))
        + STARS_WEIGHT * log_normal_cdf(ratio(activity.stars, STARS_MEDIAN))
        + FOLLOWERS_WEIGHT * log_normal_cdf(ratio(activity.followers, FOLLOWERS_MEDIAN));
    let percentile = (1.0 - score / TOTAL_WEIGHT) * 100.0;
    let index = THRESHOLDS
        .iter()
        .position(|&t| percentile <= t)
        .unwrap_or(LEVELS.len() - 1);
    UserRank {
        level: LEVELS[index].to_string(),
        percentile,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_activity_is_lowest_level() {
        let rank = calculate_rank(&Activity::default());
        assert_eq!(rank.level, "C");
        assert!((rank.percentile - 100.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_medians_land_mid_table() {
        let rank = calculate_rank(&Activity {
            commits: 250,
            prs: 50,
            issues: 25,
            reviews: 2,
            stars: 50,
            followers: 10,
        });
        // Every signal sits at its CDF midpoint.
        assert!((rank.percentile - 50.0).abs() < 1e-9);
        assert_eq!(rank.level, "B+");
    }

    #[test]
    fn test_heavy_activity_reaches_top_levels() {
        let rank = calculate_rank(&Activity {
            commits: 5000,
            prs: 2000,
            issues: 1000,
            reviews: 500,
            stars: 100_000,
            followers: 10_000,
        });
        assert!(rank.percentile < 1.0, "{}", rank.percentile);
        assert_eq!(rank.level, "S");
    }

    #[test]
    fn test_more_stars_never_lowers_rank() {
        let base = Activity {
            commits: 100,
            prs: 10,
            ..Activity::default()
        };
        let starred = Activity { stars: 500, ..base };
        assert!(calculate_rank(&starred).percentile < calculate_rank(&base).percentile);
    }
}
