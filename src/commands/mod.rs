pub mod bulk;
pub mod config;
pub mod month;
pub mod reservations;
pub mod set_status;
pub mod status;
pub mod toggle;

use anyhow::{Context, Result};
use rentcal_core::{ApiClient, AvailabilityCalendar, Month, RentcalConfig};

use crate::render::Render;
use crate::utils::tui::create_spinner;

/// Everything a command needs, loaded once per invocation.
pub struct ListingContext {
    pub config: RentcalConfig,
    pub listing_id: String,
    pub client: ApiClient,
}

impl ListingContext {
    pub fn load(listing: Option<&str>, api_url: Option<&str>) -> Result<Self> {
        let mut config = RentcalConfig::load().context("Failed to load config")?;
        if let Some(url) = api_url {
            config.api_url = url.to_string();
        }

        let listing_id = config.listing(listing)?;
        let client = ApiClient::from_config(&config)?;

        Ok(ListingContext {
            config,
            listing_id,
            client,
        })
    }

    /// Build the calendar for `month` and load it, failing if the load fails.
    pub async fn open_calendar(self, month: Month) -> Result<(AvailabilityCalendar<ApiClient>, RentcalConfig)> {
        let mut calendar = AvailabilityCalendar::new(self.client, &self.listing_id, month)?;

        let spinner = create_spinner(format!("Loading {} for {}", month.render(), self.listing_id));
        calendar.refresh().await;
        spinner.finish_and_clear();

        if let Some(err) = calendar.load_error() {
            anyhow::bail!("{}", err);
        }

        Ok((calendar, self.config))
    }
}
