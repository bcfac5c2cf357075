use anyhow::Result;
use chrono::NaiveDate;
use rentcal_core::ReservationPanel;

use super::ListingContext;
use crate::render::Render;

pub async fn run(ctx: ListingContext, date: NaiveDate) -> Result<()> {
    let panel = ReservationPanel::open(&ctx.client, &ctx.listing_id, date).await;
    println!("{}", panel.render());

    if let Some(err) = panel.error() {
        anyhow::bail!("{}", err);
    }

    Ok(())
}
