use ratatui::{
    style::{Color, Style},
    text::{Line, Span},
};

use crate::app::config::{InfoEntry, ProfileInfo};
use crate::domain::age::Age;
use crate::domain::models::GithubStats;

const RULE: &str = "----------------------------";
const TOP_LANGUAGES: usize = 5;

/// The neofetch-style summary printed next to the Mona art.
pub struct FetchPanel<'a> {
    pub profile: &'a ProfileInfo,
    pub stats: &'a GithubStats,
    pub age: Age,
    /// Year the commit count covers.
    pub commit_year: i32,
}

impl<'a> FetchPanel<'a> {
    pub fn lines(&self) -> Vec<Line<'static>> {
        let mut lines = Vec::new();

        let mut info: Vec<InfoEntry> = self.profile.info.clone();
        info.push(InfoEntry::new(
            "Uptime",
            &format!(
                "{} years, {} months, {} days",
                self.age.years, self.age.months, self.age.days
            ),
            None,
        ));
        info.extend(self.profile.extra_info.iter().cloned());
        section(
            &mut lines,
            &format!("{}@GitHub", self.profile.username),
            &info,
        );

        lines.push(Line::default());
        section(&mut lines, "GitHub Stats:", &self.stat_entries());

        if !self.profile.contact.is_empty() {
            lines.push(Line::default());
            section(&mut lines, "Contact:", &self.profile.contact);
        }
        lines
    }

    fn stat_entries(&self) -> Vec<InfoEntry> {
        let stats = self.stats;
        let languages = stats.top_languages(TOP_LANGUAGES).join(", ");
        vec![
            InfoEntry::new("Rating", &stats.user_rank.to_string(), None),
            InfoEntry::new("Stars", &stats.total_stargazers.to_string(), None),
            InfoEntry::new(
                &format!("Commits ({})", self.commit_year),
                &stats.total_commits_last_year.to_string(),
                None,
            ),
            InfoEntry::new(
                "Pull Requests",
                &stats.total_pull_requests_made.to_string(),
                None,
            ),
            InfoEntry::new(
                "Merged PR %",
                &stats.pull_requests_merge_percentage.to_string(),
                None,
            ),
            InfoEntry::new(
                "Contributions",
                &stats.total_repo_contributions.to_string(),
                None,
            ),
            InfoEntry::new("Top Languages", &languages, None),
        ]
    }
}

// Title, rule, then one aligned row per entry.
fn section(lines: &mut Vec<Line<'static>>, title: &str, entries: &[InfoEntry]) {
    lines.push(Line::from(Span::styled(
        title.to_string(),
        Style::default().fg(Color::Red),
    )));
    lines.push(Line::from(RULE));

    let width = entries
        .iter()
        .map(|e| e.label.chars().count() + 1)
        .max()
        .unwrap_or(0)
        + 2;
    for entry in entries {
        let mut spans = vec![
            Span::styled(
                format!("{:<width$}", format!("{}:", entry.label)),
                Style::default().fg(Color::LightYellow),
            ),
            Span::styled(entry.value.clone(), Style::default().fg(Color::Gray)),
        ];
        if let Some(note) = &entry.note {
            spans.push(Span::raw(" "));
            spans.push(Span::styled(
                note.clone(),
                Style::default().fg(Color::DarkGray),
            ));
        }
        lines.push(Line::from(spans));
    }
}
