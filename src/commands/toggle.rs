use anyhow::Result;
use chrono::NaiveDate;
use owo_colors::OwoColorize;
use rentcal_core::{DayClick, Month};

use super::ListingContext;
use crate::render::Render;

pub async fn run(ctx: ListingContext, date: NaiveDate) -> Result<()> {
    let (mut calendar, _) = ctx.open_calendar(Month::containing(date)).await?;

    match calendar.click_day(date, true).await? {
        DayClick::OpenedPanel => {
            println!("{} is {} and cannot be toggled", date, calendar.status_of(date).render());
            if let Some(panel) = calendar.panel() {
                println!("{}", panel.render());
            }
        }
        _ => println!("{} {} is now {}", "✓".green(), date, calendar.status_of(date).render()),
    }

    Ok(())
}
