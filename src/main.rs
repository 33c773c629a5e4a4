use anyhow::{Context, Result};
use pitwall::api::{HttpApi, RaceApi};
use pitwall::config::Config;
use pitwall::logger::Logger;
use pitwall::ui;
use std::sync::Arc;

fn load_config() -> Result<Config> {
    if Config::find_config_file()?.is_none() {
        // First run: write a default file the user can edit later
        let path = Config::get_default_config_path()?;
        if let Err(e) = Config::generate_default_config(&path) {
            eprintln!("⚠️  Could not write default config: {e:#}");
        }
    }
    Config::load().context("Failed to load configuration")
}

#[tokio::main]
async fn main() -> Result<()> {
    let config = match load_config() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("❌ Error: {e:#}");
            eprintln!("\n💡 Fix the configuration file or unset PITWALL_API_URL, then run the app again.");
            return Ok(());
        }
    };

    let logger = Logger::from_config(config.logging.enabled).context("Failed to initialize logging")?;
    let api: Arc<dyn RaceApi> = Arc::new(HttpApi::from_config(&config.api)?);

    // Run the TUI application
    ui::run_app(api, &config, logger).await?;

    Ok(())
}
