//! Plain-text rendering of the month grid, its events and totals.

use rust_decimal::Decimal;

use crate::calendar::{CalendarDay, DayTotals};
use crate::core::services::DatedEvent;
use crate::utils::dates::WEEKDAY_HEADERS;
use crate::utils::format::currency_format;

const CELL_WIDTH: usize = 6;

/// Renders the grid one week per line. Days outside the month are shown in
/// parentheses, `*` marks days with events and `[..]` marks today.
pub fn render_grid(days: &[CalendarDay]) -> String {
    let mut lines = Vec::with_capacity(days.len() / 7 + 1);
    lines.push(
        WEEKDAY_HEADERS
            .iter()
            .map(|header| format!("{header:>CELL_WIDTH$}"))
            .collect::<String>(),
    );
    for week in days.chunks(7) {
        lines.push(week.iter().map(render_cell).collect::<String>());
    }
    lines.join("\n")
}

fn render_cell(day: &CalendarDay) -> String {
    let marker = if day.has_events { "*" } else { " " };
    let label = if day.is_today {
        format!("[{:>2}]{marker}", day.day)
    } else if day.current_month {
        format!("{:>2}{marker}", day.day)
    } else {
        format!("({:>2})", day.day)
    };
    format!("{label:>CELL_WIDTH$}")
}

/// Credits positive, debits negative.
pub fn signed_amount(event: &DatedEvent) -> Decimal {
    let amount = event.event.display_amount();
    if event.event.is_debit() {
        -amount
    } else {
        amount
    }
}

pub fn render_event_line(event: &DatedEvent) -> String {
    format!(
        "{}  {:<24} {:<18} {}",
        event.date.format("%b %d"),
        event.event.name,
        event.event.category.label(),
        currency_format(signed_amount(event))
    )
}

pub fn render_day_totals(totals: &DayTotals) -> Vec<String> {
    vec![
        format!("{:<12}{}", "Income", currency_format(totals.credit)),
        format!("{:<12}{}", "Expenses", currency_format(-totals.debit)),
        format!("{:<12}{}", "Net flow", currency_format(totals.net_flow())),
        format!("{:<12}{}", "Savings", currency_format(totals.savings())),
    ]
}
