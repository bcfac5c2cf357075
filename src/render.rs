//! TUI rendering traits for rentcal types.
//!
//! This module provides extension traits that add colored terminal rendering
//! to rentcal-core types using owo_colors.

use chrono::Datelike;
use owo_colors::OwoColorize;
use rentcal_core::{DayStatus, GridCell, Month, MonthGrid, ReservationInterval, ReservationPanel, ReservationStatus, StatusCounts};

/// Extension trait for TUI rendering with colors.
pub trait Render {
    fn render(&self) -> String;
}

impl Render for Month {
    fn render(&self) -> String {
        self.first_day().format("%B %Y").to_string()
    }
}

impl Render for DayStatus {
    fn render(&self) -> String {
        match self {
            DayStatus::Reserved => self.as_str().red().to_string(),
            DayStatus::Blocked => self.as_str().yellow().to_string(),
            DayStatus::Available => self.as_str().green().to_string(),
        }
    }
}

impl Render for ReservationStatus {
    fn render(&self) -> String {
        match self {
            ReservationStatus::Pending => self.as_str().yellow().to_string(),
            ReservationStatus::Confirmed => self.as_str().green().to_string(),
            ReservationStatus::Cancelled | ReservationStatus::Completed => self.as_str().dimmed().to_string(),
        }
    }
}

impl Render for GridCell {
    fn render(&self) -> String {
        let day = format!("{:>3}", self.date.day());
        let colored = match self.status {
            DayStatus::Reserved => day.red().to_string(),
            DayStatus::Blocked => day.yellow().strikethrough().to_string(),
            DayStatus::Available => day.green().to_string(),
        };

        match (self.selected, self.today) {
            (true, _) => colored.reversed().to_string(),
            (false, true) => colored.bold().underline().to_string(),
            (false, false) => colored,
        }
    }
}

impl Render for StatusCounts {
    fn render(&self) -> String {
        format!(
            "{} available, {} blocked, {} reserved",
            self.available.green(),
            self.blocked.yellow(),
            self.reserved.red()
        )
    }
}

impl Render for MonthGrid {
    fn render(&self) -> String {
        let mut lines = Vec::new();

        lines.push(format!("   {}", self.month.render().bold()));
        let labels: Vec<String> = self.week_start.labels().iter().map(|l| format!("{:>3}", l)).collect();
        lines.push(format!("  {}", labels.join(" ").dimmed()));

        for week in &self.weeks {
            let cells: Vec<String> = week
                .iter()
                .map(|cell| match cell {
                    Some(cell) => cell.render(),
                    None => "   ".to_string(),
                })
                .collect();
            lines.push(format!("  {}", cells.join(" ")));
        }

        lines.push(String::new());
        lines.push(format!("  {}", self.counts().render()));
        lines.push(format!(
            "  {} {} {}",
            "■ available".green(),
            "■ blocked".yellow(),
            "■ reserved".red()
        ));

        lines.join("\n")
    }
}

impl Render for ReservationInterval {
    fn render(&self) -> String {
        let guest = self
            .guest_name
            .as_deref()
            .map(|g| format!(" {}", g))
            .unwrap_or_default();
        let price = self
            .total_price
            .map(|p| format!(" ({:.2})", p))
            .unwrap_or_default();

        format!(
            "{} {} → {}{}{} [{}]",
            self.id.bold(),
            self.start_date,
            self.end_date,
            guest,
            price.dimmed(),
            self.status.render()
        )
    }
}

impl Render for ReservationPanel {
    fn render(&self) -> String {
        let mut lines = vec![format!("📅 {}", self.date().format("%a %b %-d %Y").bold())];

        if self.reservations().is_empty() {
            lines.push("   No reservations".dimmed().to_string());
        }
        for reservation in self.reservations() {
            lines.push(format!("   {}", reservation.render()));
        }
        if let Some(err) = self.error() {
            lines.push(format!("   {}", err.red()));
        }

        lines.join("\n")
    }
}
