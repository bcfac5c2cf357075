use anyhow::Result;
use rentcal_core::Month;

use super::ListingContext;
use crate::render::Render;

pub async fn run(ctx: ListingContext, month: Month) -> Result<()> {
    let (calendar, config) = ctx.open_calendar(month).await?;

    println!("{}", calendar.grid(config.week_starts_on).render());

    Ok(())
}
