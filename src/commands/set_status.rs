use anyhow::Result;
use chrono::NaiveDate;
use owo_colors::OwoColorize;
use rentcal_core::{Month, ReservationPanel, ReservationStatus};

use super::ListingContext;
use crate::render::Render;

/// The panel is opened directly rather than through a reserved-day click so
/// that cancelled or completed bookings can be reinstated too.
pub async fn run(ctx: ListingContext, date: NaiveDate, reservation_id: &str, status: ReservationStatus) -> Result<()> {
    let mut panel = ReservationPanel::open(&ctx.client, &ctx.listing_id, date).await;
    if let Some(err) = panel.error() {
        anyhow::bail!("{}", err);
    }

    if !panel.reservations().iter().any(|r| r.id == reservation_id) {
        println!("{}", panel.render());
        anyhow::bail!("Reservation '{}' does not cover {}", reservation_id, date);
    }

    let changed = panel.change_status(&ctx.client, reservation_id, status).await;
    println!("{}", panel.render());
    if !changed {
        anyhow::bail!("Status was not changed");
    }

    let (calendar, _) = ctx.open_calendar(Month::containing(date)).await?;
    println!(
        "\n{} {} is now {}",
        "✓".green(),
        date,
        calendar.status_of(date).render()
    );

    Ok(())
}
