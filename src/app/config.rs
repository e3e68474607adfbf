//! Profile configuration: every account detail, text, font and geometry the
//! boot script uses. Read from `./bootgif.toml`, then
//! `~/.config/bootgif/config.toml`, falling back to built-in defaults.

use std::path::{Path, PathBuf};

use anyhow::{anyhow, Context, Result};
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};

use crate::render::{CanvasConfig, FontSpec};

const LOCAL_CONFIG: &str = "bootgif.toml";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProfileConfig {
    pub canvas: CanvasConfig,
    pub fonts: FontSet,
    pub profile: ProfileInfo,
    pub output: OutputConfig,
}

/// The three faces the animation switches between.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FontSet {
    /// Decorative face for the scrambled OS logo.
    pub logo: FontSpec,
    /// Everyday terminal text.
    pub terminal: FontSpec,
    /// Pictographic face the Mona art is drawn in.
    pub mona: FontSpec,
}

impl Default for FontSet {
    fn default() -> Self {
        Self {
            logo: FontSpec::new("./fonts/vtks-blocketo.regular.ttf", 66.0, 0),
            terminal: FontSpec::new("./fonts/IosevkaTermNerdFont-Bold.ttf", 14.0, 1),
            mona: FontSpec::new("./fonts/Inversionz.otf", 16.0, 0),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BirthDate {
    pub day: u32,
    pub month: u32,
    pub year: i32,
}

/// One `Label: value #note` row of the fetch panel.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InfoEntry {
    pub label: String,
    pub value: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

impl InfoEntry {
    pub fn new(label: &str, value: &str, note: Option<&str>) -> Self {
        Self {
            label: label.to_string(),
            value: value.to_string(),
            note: note.map(str::to_string),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProfileInfo {
    /// GitHub account whose statistics are shown.
    pub username: String,
    /// Repositories left out of the star and language totals.
    pub ignore_repos: Vec<String>,
    /// IANA zone used for the copyright year and the last-login stamp.
    pub timezone: String,
    pub birth: BirthDate,
    pub os_name: String,
    pub os_version: String,
    pub company: String,
    pub login_name: String,
    /// Typed at the password prompt; never a real password.
    pub password_mask: String,
    /// ANSI prompt printed before each command.
    pub prompt: String,
    /// Rows above the uptime line in the panel's first section.
    pub info: Vec<InfoEntry>,
    /// Rows after the uptime line.
    pub extra_info: Vec<InfoEntry>,
    pub contact: Vec<InfoEntry>,
    /// Comment typed at the last prompt.
    pub farewell: String,
    pub details_row: usize,
    pub details_col: usize,
    /// Fixes the logo scramble for reproducible output.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scramble_seed: Option<u64>,
}

impl Default for ProfileInfo {
    fn default() -> Self {
        Self {
            username: "noidilin".to_string(),
            ignore_repos: vec![
                "noidilin".to_string(),
                "BlackJack".to_string(),
                "TyFun".to_string(),
            ],
            timezone: "Asia/Taipei".to_string(),
            birth: BirthDate {
                day: 20,
                month: 1,
                year: 1996,
            },
            os_name: "GIF OS".to_string(),
            os_version: "v1.0.11".to_string(),
            company: "noidilin Softwares Inc.".to_string(),
            login_name: "noidilin".to_string(),
            password_mask: "*********".to_string(),
            prompt: "\x1b[91mnoidilin\x1b[0m@\x1b[94mgifos\x1b[0m ~> ".to_string(),
            info: vec![
                InfoEntry::new("OS", "Windows, macOS, Arch/Omarchy", None),
                InfoEntry::new("Host", "National Taiwan University", Some("#NTU")),
                InfoEntry::new("Kernel", "Finance", Some("#FIN")),
            ],
            extra_info: vec![InfoEntry::new("IDE", "neovim, zed, VSCode", None)],
            contact: vec![
                InfoEntry::new("Email", "linganinja.0120@gmail.com", None),
                InfoEntry::new("YouTube", "@noidilin", None),
            ],
            farewell: "# Let's just forget everything said...".to_string(),
            details_row: 3,
            details_col: 39,
            scramble_seed: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    pub path: PathBuf,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from("output.gif"),
        }
    }
}

impl ProfileConfig {
    /// Loads the first config file found, or the defaults when there is none.
    pub fn load() -> Result<Self> {
        let local = PathBuf::from(LOCAL_CONFIG);
        let candidates = std::iter::once(local).chain(get_config_path());
        for path in candidates {
            if path.is_file() {
                log::info!("using config {}", path.display());
                return Self::from_file(&path);
            }
        }
        log::info!("no config file found, using defaults");
        Ok(Self::default())
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config {}", path.display()))?;
        toml::from_str(&content)
            .with_context(|| format!("Failed to parse config {}", path.display()))
    }

    pub fn timezone(&self) -> Result<Tz> {
        self.profile
            .timezone
            .parse::<Tz>()
            .map_err(|e| anyhow!("invalid timezone {:?}: {e}", self.profile.timezone))
    }
}

pub fn get_config_path() -> Option<PathBuf> {
    home::home_dir().map(|mut path| {
        path.push(".config");
        path.push("bootgif");
        path.push("config.toml");
        path
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_partial_file_keeps_defaults() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"
[profile]
username = "octocat"
ignore_repos = []

[canvas]
width = 400
palette = "nord"

[fonts.terminal]
path = "/tmp/mono.ttf"
size = 12.0
"#
        )
        .unwrap();

        let config = ProfileConfig::from_file(file.path()).unwrap();
        assert_eq!(config.profile.username, "octocat");
        assert!(config.profile.ignore_repos.is_empty());
        assert_eq!(config.profile.timezone, "Asia/Taipei");
        assert_eq!(config.canvas.width, 400);
        assert_eq!(config.canvas.height, 500);
        assert_eq!(config.fonts.terminal.line_spacing, 0);
        assert_eq!(config.fonts.logo, FontSet::default().logo);
        assert_eq!(config.output.path, PathBuf::from("output.gif"));
    }

    #[test]
    fn test_info_entries_parse_optional_note() {
        let config: ProfileConfig = toml::from_str(
            r##"
[[profile.info]]
label = "Host"
value = "Somewhere"
note = "#HQ"

[[profile.info]]
label = "OS"
value = "Linux"
"##,
        )
        .unwrap();
        assert_eq!(
            config.profile.info,
            vec![
                InfoEntry::new("Host", "Somewhere", Some("#HQ")),
                InfoEntry::new("OS", "Linux", None),
            ]
        );
    }

    #[test]
    fn test_malformed_file_is_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "[profile\nusername = ").unwrap();
        let err = ProfileConfig::from_file(file.path()).unwrap_err();
        assert!(err.to_string().contains("Failed to parse config"));
    }

    #[test]
    fn test_missing_file_is_error() {
        let dir = tempfile::tempdir().unwrap();
        assert!(ProfileConfig::from_file(&dir.path().join("absent.toml")).is_err());
    }

    #[test]
    fn test_timezone_parsing() {
        let mut config = ProfileConfig::default();
        assert_eq!(config.timezone().unwrap(), chrono_tz::Asia::Taipei);
        config.profile.timezone = "Mars/Olympus".to_string();
        assert!(config.timezone().is_err());
    }

    #[test]
    fn test_defaults_round_trip_through_toml() {
        let config = ProfileConfig::default();
        let text = toml::to_string(&config).unwrap();
        let parsed: ProfileConfig = toml::from_str(&text).unwrap();
        assert_eq!(parsed, config);
    }

    #[test]
    fn test_config_path_location() {
        if let Some(path) = get_config_path() {
            assert!(path.ends_with(".config/bootgif/config.toml"));
        }
    }
}
