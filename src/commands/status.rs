use anyhow::Result;
use chrono::NaiveDate;
use rentcal_core::{DayStatus, Month, ReservationPanel};

use super::ListingContext;
use crate::render::Render;

pub async fn run(ctx: ListingContext, date: NaiveDate) -> Result<()> {
    let (calendar, _) = ctx.open_calendar(Month::containing(date)).await?;
    let status = calendar.status_of(date);

    println!("{} {}", date.format("%a %b %-d %Y"), status.render());

    if status == DayStatus::Reserved {
        let panel = ReservationPanel::open(calendar.store(), calendar.listing_id(), date).await;
        println!("{}", panel.render());
    }

    Ok(())
}
