use super::*;
use crate::app::config::{FontSet, ProfileConfig};
use crate::domain::models::{GithubStats, LanguageShare, UserRank};
use crate::domain::stats::MockStatsSource;
use crate::render::font::testing::BlockLoader;
use crate::render::{CanvasConfig, FontSpec, TtfLoader};
use chrono::TimeZone;
use image::codecs::gif::GifDecoder;
use image::AnimationDecoder;
use ratatui::style::Color;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

fn now() -> DateTime<Tz> {
    chrono_tz::Asia::Taipei
        .with_ymd_and_hms(2026, 10, 19, 9, 30, 0)
        .single()
        .unwrap()
}

// 30 rows x 100 cols for the terminal face, small enough to encode quickly.
fn test_config(dir: &Path) -> ProfileConfig {
    let mut config = ProfileConfig::default();
    config.canvas = CanvasConfig {
        width: 200,
        height: 150,
        xpad: 0,
        ypad: 0,
        encoder_speed: 30,
        ..CanvasConfig::default()
    };
    config.fonts = FontSet {
        logo: FontSpec::new(dir.join("logo.ttf"), 20.0, 0),
        terminal: FontSpec::new(dir.join("term.ttf"), 4.0, 1),
        mona: FontSpec::new(dir.join("mona.otf"), 5.0, 0),
    };
    config.profile.scramble_seed = Some(7);
    config.output.path = dir.join("output.gif");
    config
}

fn sample_stats() -> GithubStats {
    GithubStats {
        total_stargazers: 12,
        total_commits_last_year: 345,
        total_pull_requests_made: 10,
        pull_requests_merge_percentage: 90.0,
        total_repo_contributions: 4,
        user_rank: UserRank {
            level: "B+".to_string(),
            percentile: 45.0,
        },
        languages_sorted: vec![LanguageShare {
            name: "Rust".to_string(),
            percent: 100.0,
        }],
    }
}

fn terminal(config: &ProfileConfig) -> Terminal {
    let face = BlockLoader.load(&config.fonts.terminal).unwrap();
    let mut t = Terminal::new(&config.canvas, face, &config.output.path).unwrap();
    t.set_prompt(&config.profile.prompt);
    t
}

fn dir_entries(dir: &Path) -> Vec<String> {
    std::fs::read_dir(dir)
        .unwrap()
        .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
        .collect()
}

#[tokio::test]
async fn test_run_writes_single_gif() {
    let dir = tempfile::tempdir().unwrap();
    let config = test_config(dir.path());

    let mut mock = MockStatsSource::new();
    mock.expect_fetch_stats()
        .withf(|login, ignore, year| {
            login == "noidilin" && ignore.len() == 3 && *year == 2025
        })
        .times(1)
        .returning(|_, _, _| Ok(sample_stats()));

    let path = BootScript::new(&config, now())
        .run(&BlockLoader, &mock)
        .await
        .unwrap();

    assert_eq!(path, config.output.path);
    assert_eq!(dir_entries(dir.path()), vec!["output.gif".to_string()]);
    assert!(std::fs::metadata(&path).unwrap().len() > 0);

    let decoder = GifDecoder::new(BufReader::new(File::open(&path).unwrap())).unwrap();
    let frames = decoder.into_frames().collect_frames().unwrap();
    assert!(frames.len() > 50, "only {} frames", frames.len());
    assert_eq!(frames[0].buffer().dimensions(), (200, 150));
}

#[tokio::test]
async fn test_missing_font_fails_before_output() {
    let dir = tempfile::tempdir().unwrap();
    let config = test_config(dir.path());

    let mut mock = MockStatsSource::new();
    mock.expect_fetch_stats().never();

    let err = BootScript::new(&config, now())
        .run(&TtfLoader, &mock)
        .await
        .unwrap_err();

    assert!(format!("{err:#}").contains("logo.ttf"), "{err:#}");
    assert!(!config.output.path.exists());
    assert!(dir_entries(dir.path()).is_empty());
}

#[tokio::test]
async fn test_stats_failure_leaves_no_output() {
    let dir = tempfile::tempdir().unwrap();
    let config = test_config(dir.path());

    let mut mock = MockStatsSource::new();
    mock.expect_fetch_stats()
        .returning(|_, _, _| Err(anyhow::anyhow!("rate limited")));

    let err = BootScript::new(&config, now())
        .run(&BlockLoader, &mock)
        .await
        .unwrap_err();

    assert!(format!("{err:#}").contains("rate limited"));
    assert!(dir_entries(dir.path()).is_empty());
}

#[test]
fn test_boot_screen_contents() {
    let dir = tempfile::tempdir().unwrap();
    let config = test_config(dir.path());
    let mut t = terminal(&config);

    BootScript::new(&config, now()).boot(&mut t).unwrap();

    assert_eq!(t.row_text(1).unwrap(), "GIF_OS Modular BIOS v1.0.11");
    assert_eq!(
        t.row_text(2).unwrap(),
        "Copyright (C) 2026, noidilin Softwares Inc."
    );
    // "Copyright (C) 2026, " is 20 columns wide.
    assert_eq!(t.cell_colors(2, 21).unwrap().0, Color::Red);
    assert_eq!(
        t.row_text(4).unwrap(),
        "GitHub Profile ReadMe Terminal, Rev 1011"
    );
    assert_eq!(t.row_text(7).unwrap(), "Memory Test: 64KB OK");
    assert_eq!(
        t.row_text(t.num_rows()).unwrap(),
        "Press DEL to enter SETUP, ESC to cancel Memory Test"
    );
}

#[test]
fn test_login_screen_contents() {
    let dir = tempfile::tempdir().unwrap();
    let config = test_config(dir.path());
    let mut t = terminal(&config);

    BootScript::new(&config, now()).login(&mut t).unwrap();

    assert_eq!(t.row_text(1).unwrap(), "GIF OS v1.0.11 (tty1)");
    assert_eq!(t.row_text(3).unwrap(), "login: noidilin");
    assert_eq!(t.row_text(4).unwrap(), "password: *********");
    assert_eq!(
        t.row_text(6).unwrap(),
        "Last login: Mon Oct 19 09:30:00 AM CST 2026 on tty1"
    );
    assert_eq!(t.row_text(7).unwrap(), "noidilin@gifos ~> clear");
    // The half-typed command is replaced, so no bright red is left behind.
    let prompt_width = "noidilin@gifos ~> ".len();
    assert_eq!(
        t.cell_colors(7, prompt_width + 1).unwrap().0,
        Color::LightBlue
    );
}

#[tokio::test]
async fn test_fetch_screen_places_panel() {
    let dir = tempfile::tempdir().unwrap();
    let config = test_config(dir.path());
    let faces = BootScript::new(&config, now()).load_faces(&BlockLoader).unwrap();
    let mut t = terminal(&config);

    let mut mock = MockStatsSource::new();
    mock.expect_fetch_stats()
        .returning(|_, _, _| Ok(sample_stats()));

    BootScript::new(&config, now())
        .fetch(&mut t, &faces, &mock)
        .await
        .unwrap();

    let col = config.profile.details_col;
    let title = t.row_text(config.profile.details_row).unwrap();
    assert_eq!(title.trim_start(), "noidilin@GitHub");
    assert_eq!(title.len() - title.trim_start().len(), col - 1);

    let rows: Vec<String> = (1..=t.num_rows())
        .map(|r| t.row_text(r).unwrap().trim().to_string())
        .collect();
    assert!(rows.contains(&"Top Languages:   Rust".to_string()));
    assert!(rows.contains(&"Uptime:  30 years, 8 months, 29 days".to_string()));
    assert!(rows.contains(&"noidilin@gifos ~> # Let's just forget everything said...".to_string()));

    // Panel spans rows 3..=24; the closing prompt sits right below it.
    assert_eq!(config.profile.details_row, 3);
    assert_eq!(rows[23], "YouTube:  @noidilin");
    assert_eq!(
        rows[24],
        "noidilin@gifos ~> # Let's just forget everything said..."
    );
}

#[tokio::test]
async fn test_closing_prompt_never_overwrites_panel() {
    let dir = tempfile::tempdir().unwrap();
    let mut config = test_config(dir.path());
    // 24 terminal rows: the panel fills rows 3..=24 and leaves none below.
    config.canvas.height = 119;
    let faces = BootScript::new(&config, now()).load_faces(&BlockLoader).unwrap();
    let mut t = terminal(&config);
    assert_eq!(t.num_rows(), 24);

    let mut mock = MockStatsSource::new();
    mock.expect_fetch_stats()
        .returning(|_, _, _| Ok(sample_stats()));

    let err = BootScript::new(&config, now())
        .fetch(&mut t, &faces, &mock)
        .await
        .unwrap_err();

    assert!(format!("{err:#}").contains("row 25 is outside"), "{err:#}");
    let last = t.row_text(24).unwrap();
    assert_eq!(last.trim(), "YouTube:  @noidilin");
}
