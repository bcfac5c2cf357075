use anyhow::{Context, Result};
use owo_colors::OwoColorize;
use rentcal_core::RentcalConfig;

/// Show the config file location and its settings. With `set_listing`, store
/// that listing as the default first.
pub fn run(set_listing: Option<String>) -> Result<()> {
    let config_path = RentcalConfig::config_path()?;
    let mut config = RentcalConfig::load().context("Failed to load config")?;

    if let Some(listing) = set_listing {
        config.default_listing = Some(config.listing(Some(&listing))?);
        config.save(&config_path)?;
        println!("{} Default listing set to {}", "✓".green(), listing.bold());
        println!();
    }

    println!("{}", "Paths".bold());
    println!("  Config:     {}", config_path.display());
    println!();
    println!("{}", "Settings".bold());
    println!("  API URL:    {}", config.api_url);
    println!(
        "  Token:      {}",
        if config.api_token.is_some() { "set" } else { "not set" }
    );
    println!(
        "  Listing:    {}",
        config.default_listing.as_deref().unwrap_or("not set")
    );
    println!("  Timeout:    {}s", config.timeout_secs);
    println!("  Week start: {:?}", config.week_starts_on);

    Ok(())
}
