use anyhow::{Context, Result};
use chrono::Utc;
use env_logger::Env;

use bootgif::app::config::ProfileConfig;
use bootgif::app::script::BootScript;
use bootgif::infrastructure::github::GitHubAdapter;
use bootgif::render::TtfLoader;

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();

    let config = ProfileConfig::load()?;
    let tz = config.timezone()?;
    let now = Utc::now().with_timezone(&tz);

    // Checked before any rendering so a missing token fails fast.
    let adapter = GitHubAdapter::from_env()?.with_timezone(tz);

    let path = BootScript::new(&config, now)
        .run(&TtfLoader, &adapter)
        .await
        .context("Failed to render the boot animation")?;
    log::info!("wrote {}", path.display());

    Ok(())
}
