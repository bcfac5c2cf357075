use anyhow::Result;
use chrono::NaiveDate;
use owo_colors::OwoColorize;
use rentcal_core::{ApiClient, AvailabilityCalendar, BulkIntent, DayClick, Month, RentCalError};

use super::ListingContext;
use crate::render::Render;
use crate::utils::tui::create_spinner;

/// Select `from` (and `to`) the way the admin screen does, then apply the
/// batch.
pub async fn run(ctx: ListingContext, from: NaiveDate, to: Option<NaiveDate>, intent: BulkIntent) -> Result<()> {
    let (mut calendar, config) = ctx.open_calendar(Month::containing(from)).await?;

    select(&mut calendar, from).await?;
    if let Some(to) = to {
        let month = Month::containing(to);
        if month != calendar.month() {
            calendar.show_month(month).await;
            if let Some(err) = calendar.load_error() {
                anyhow::bail!("{}", err);
            }
        }
        select(&mut calendar, to).await?;
    }

    let range = calendar
        .selection()
        .range()
        .ok_or(RentCalError::EmptySelection)?;

    let spinner = create_spinner(format!("Applying {} to {}", intent.verb(), range));
    let result = calendar.apply_bulk(intent).await;
    spinner.finish_and_clear();

    match result {
        Ok(written) => {
            let label = if written == 1 { "day" } else { "days" };
            println!("{} {} {} {}", "✓".green(), past_tense(intent), written, label);
            println!();
            println!("{}", calendar.grid(config.week_starts_on).render());
            Ok(())
        }
        Err(e) => anyhow::bail!("{}", e),
    }
}

async fn select(calendar: &mut AvailabilityCalendar<ApiClient>, date: NaiveDate) -> Result<()> {
    match calendar.click_day(date, false).await? {
        DayClick::Selected(_) => Ok(()),
        _ => anyhow::bail!(
            "{} is reserved and cannot start or end a range. Pick an unreserved day; \
             reserved days inside the range keep their reservation.",
            date
        ),
    }
}

fn past_tense(intent: BulkIntent) -> &'static str {
    match intent {
        BulkIntent::Block => "Blocked",
        BulkIntent::Unblock => "Unblocked",
    }
}
