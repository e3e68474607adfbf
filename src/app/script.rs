//! The boot animation: BIOS memory test, logo, login and the fetch screen,
//! recorded frame by frame and encoded once at the end.

use std::path::PathBuf;

use anyhow::{Context, Result};
use chrono::{DateTime, Datelike};
use chrono_tz::Tz;
use log::info;

use crate::app::config::ProfileConfig;
use crate::components::fetch_panel::FetchPanel;
use crate::components::mona::MONA_ART;
use crate::domain::age::calc_age;
use crate::domain::stats::StatsSource;
use crate::render::{FontLoader, FontSpec, Terminal, TextOpts, TextScramble, Typeface};

const MEMORY_TOP: usize = 65653;
const MEMORY_STEP: usize = 7168;
// Counter steps below this are held longer.
const MEMORY_SLOW_UNTIL: usize = 30000;
const MEMORY_ROW: usize = 7;
const SCRAMBLE_SPEED: usize = 3;
const FINAL_HOLD: u32 = 180;

struct Faces {
    logo: Typeface,
    terminal: Typeface,
    mona: Typeface,
}

pub struct BootScript<'a> {
    config: &'a ProfileConfig,
    now: DateTime<Tz>,
}

impl<'a> BootScript<'a> {
    /// `now` drives the copyright year, the last-login stamp, the commit
    /// year and the age.
    pub fn new(config: &'a ProfileConfig, now: DateTime<Tz>) -> Self {
        Self { config, now }
    }

    /// Plays every phase and writes the GIF. Fonts are loaded before the
    /// output is touched, so a bad font path leaves no file behind.
    pub async fn run(&self, fonts: &dyn FontLoader, stats: &dyn StatsSource) -> Result<PathBuf> {
        let faces = self.load_faces(fonts)?;
        let mut t = Terminal::new(
            &self.config.canvas,
            faces.terminal.clone(),
            &self.config.output.path,
        )
        .context("Failed to set up the canvas")?;
        t.set_prompt(&self.config.profile.prompt);

        self.boot(&mut t)?;
        self.logo(&mut t, &faces)?;
        self.login(&mut t)?;
        self.fetch(&mut t, &faces, stats).await?;

        let path = t.finish().context("Failed to write the GIF")?;
        Ok(path)
    }

    fn load_faces(&self, fonts: &dyn FontLoader) -> Result<Faces> {
        let set = &self.config.fonts;
        let load = |spec: &FontSpec| {
            fonts
                .load(spec)
                .with_context(|| format!("Failed to load font {}", spec.path.display()))
        };
        Ok(Faces {
            logo: load(&set.logo)?,
            terminal: load(&set.terminal)?,
            mona: load(&set.mona)?,
        })
    }

    fn boot(&self, t: &mut Terminal) -> Result<()> {
        info!("phase: memory test");
        let profile = &self.config.profile;
        t.gen_text("", 1, TextOpts::default().count(20))?;
        t.toggle_show_cursor(false);
        t.gen_text(
            &format!(
                "{} Modular BIOS {}",
                profile.os_name.replace(' ', "_"),
                profile.os_version
            ),
            1,
            TextOpts::default(),
        )?;
        t.gen_text(
            &format!(
                "Copyright (C) {}, \x1b[31m{}\x1b[0m",
                self.now.year(),
                profile.company
            ),
            2,
            TextOpts::default(),
        )?;
        let revision: String = profile
            .os_version
            .chars()
            .filter(char::is_ascii_digit)
            .collect();
        t.gen_text(
            &format!("\x1b[94mGitHub Profile ReadMe Terminal, Rev {revision}\x1b[0m"),
            4,
            TextOpts::default(),
        )?;
        t.gen_text("Krypton(tm) GIFCPU - 250Hz", 6, TextOpts::default())?;
        let last = t.num_rows();
        t.gen_text(
            "Press \x1b[94mDEL\x1b[0m to enter SETUP, \x1b[94mESC\x1b[0m to cancel Memory Test",
            last,
            TextOpts::default(),
        )?;

        for kb in (0..MEMORY_TOP).step_by(MEMORY_STEP) {
            let hold = if kb < MEMORY_SLOW_UNTIL { 2 } else { 1 };
            t.delete_row(MEMORY_ROW, None)?;
            t.gen_text(
                &format!("Memory Test: {kb}"),
                MEMORY_ROW,
                TextOpts::default().count(hold).contin(),
            )?;
        }
        t.delete_row(MEMORY_ROW, None)?;
        t.gen_text(
            "Memory Test: 64KB OK",
            MEMORY_ROW,
            TextOpts::default().count(10).contin(),
        )?;
        t.gen_text("", 11, TextOpts::default().count(10).contin())?;
        Ok(())
    }

    fn logo(&self, t: &mut Terminal, faces: &Faces) -> Result<()> {
        info!("phase: boot logo");
        let profile = &self.config.profile;
        t.clear_frame();
        t.gen_text("Initiating Boot Sequence ", 1, TextOpts::default().contin())?;
        t.gen_typing_text(".....", 1, TextOpts::default().contin())?;
        // Leaves the pen red for the logo.
        t.gen_text("\x1b[31m", 1, TextOpts::default().count(0).contin())?;

        t.set_font(&faces.logo)?;
        let logo = profile.os_name.as_str();
        let mid_row = (t.num_rows() + 1) / 2;
        let mid_col = (t.num_cols().saturating_sub(logo.chars().count()) + 1) / 2;
        let scramble = match profile.scramble_seed {
            Some(seed) => TextScramble::with_seed(logo, SCRAMBLE_SPEED, false, seed),
            None => TextScramble::new(logo, SCRAMBLE_SPEED, false),
        };
        for step in scramble {
            t.delete_row(mid_row + 1, None)?;
            t.gen_text(&step, mid_row + 1, TextOpts::default().at_col(mid_col + 1))?;
        }
        t.set_font(&faces.terminal)?;
        Ok(())
    }

    fn login(&self, t: &mut Terminal) -> Result<()> {
        info!("phase: login");
        let profile = &self.config.profile;
        t.clear_frame();
        t.clone_frame(5)?;
        t.toggle_show_cursor(false);
        t.gen_text(
            &format!(
                "\x1b[31m{} {} (tty1)\x1b[0m",
                profile.os_name, profile.os_version
            ),
            1,
            TextOpts::default().count(5),
        )?;
        t.gen_text("login: ", 3, TextOpts::default().count(5))?;
        t.toggle_show_cursor(true);
        t.gen_typing_text(&profile.login_name, 3, TextOpts::default().contin())?;
        t.gen_text("", 4, TextOpts::default().count(5))?;
        t.toggle_show_cursor(false);
        t.gen_text("password: ", 4, TextOpts::default().count(5))?;
        t.toggle_show_cursor(true);
        t.gen_typing_text(&profile.password_mask, 4, TextOpts::default().contin())?;
        t.toggle_show_cursor(false);
        let stamp = self.now.format("%a %b %d %I:%M:%S %p %Z %Y");
        t.gen_text(
            &format!("Last login: {stamp} on tty1"),
            6,
            TextOpts::default(),
        )?;

        t.gen_prompt(7, 5)?;
        let prompt_col = t.curr_col();
        t.toggle_show_cursor(true);
        retype(t, 7, prompt_col, "clea", "clear", 3)?;
        Ok(())
    }

    async fn fetch(&self, t: &mut Terminal, faces: &Faces, source: &dyn StatsSource) -> Result<()> {
        info!("phase: fetch");
        let profile = &self.config.profile;
        let commit_year = self.now.year() - 1;
        let stats = source
            .fetch_stats(&profile.username, &profile.ignore_repos, commit_year)
            .await
            .context("Failed to fetch GitHub stats")?;
        let age = calc_age(
            profile.birth.day,
            profile.birth.month,
            profile.birth.year,
            self.now.date_naive(),
        )?;
        let panel = FetchPanel {
            profile,
            stats: &stats,
            age,
            commit_year,
        }
        .lines();

        t.clear_frame();
        t.gen_prompt(1, 1)?;
        let prompt_col = t.curr_col();
        t.clone_frame(10)?;
        t.toggle_show_cursor(true);
        retype(t, 1, prompt_col, "fetch.s", "fetch.sh", 1)?;
        t.gen_typing_text(
            &format!(" -u {}", profile.username),
            1,
            TextOpts::default().contin(),
        )?;

        t.set_font(&faces.mona)?;
        t.toggle_show_cursor(false);
        // Bottom-aligned; the top of the art is cut when the grid is short.
        let visible = MONA_ART.len().min(t.num_rows());
        let art = MONA_ART[MONA_ART.len() - visible..].join("\n");
        t.gen_text(&art, t.num_rows() - visible + 1, TextOpts::default())?;

        t.set_font(&faces.terminal)?;
        t.toggle_show_cursor(true);
        t.gen_lines(
            &panel,
            profile.details_row,
            TextOpts::default()
                .at_col(profile.details_col)
                .count(5)
                .contin(),
        )?;

        let row = t.curr_row() + 1;
        t.gen_text(
            &profile.prompt,
            row,
            TextOpts::default().at_col(profile.details_col).contin(),
        )
        .context("No room for the closing prompt below the panel")?;
        t.gen_typing_text(
            &format!("\x1b[37m{}", profile.farewell),
            row,
            TextOpts::default().contin(),
        )?;
        t.gen_text("", row, TextOpts::default().count(FINAL_HOLD).contin())?;
        Ok(())
    }
}

// Types `partial` in bright red, then rewrites it as `full` in blue the way a
// shell highlights a command once it resolves.
fn retype(
    t: &mut Terminal,
    row: usize,
    prompt_col: usize,
    partial: &str,
    full: &str,
    count: u32,
) -> Result<()> {
    t.gen_typing_text(&format!("\x1b[91m{partial}"), row, TextOpts::default().contin())?;
    t.delete_row(row, Some(prompt_col))?;
    t.gen_text(
        &format!("\x1b[94m{full}\x1b[0m"),
        row,
        TextOpts::default().count(count).contin(),
    )?;
    Ok(())
}

#[cfg(test)]
#[path = "script_tests.rs"]
mod tests;
