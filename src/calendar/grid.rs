//! Month grid construction.
//!
//! The grid holds whole Sunday-first weeks: the tail of the previous month,
//! every day of the target month, then the head of the next month. Padding is
//! cut short only at the ends of chrono's date range.
//! Events are attached by comparing occurrence dates with each cell's date.

use chrono::{Datelike, Duration, NaiveDate};
use rust_decimal::Decimal;
use serde::Serialize;

use crate::domain::{
    DateValue, EntityId, EventCategory, EventType, Frequency, OccurrenceEntry, Occurrences,
};
use crate::utils::dates::{first_day_of_month, is_same_day, last_day_of_month};

/// An event as shown inside a day cell, with its amount already resolved
/// through [`RecurringEvent::display_amount`](crate::domain::RecurringEvent::display_amount).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DisplayEvent {
    pub id: EntityId,
    pub name: String,
    pub amount: Decimal,
    #[serde(rename = "type")]
    pub event_type: EventType,
    pub start_date: Option<DateValue>,
    pub end_date: Option<DateValue>,
    pub frequency: Frequency,
    pub category: EventCategory,
    pub description: Option<String>,
    pub active: bool,
    pub profile_id: Option<EntityId>,
    pub scenario_id: Option<EntityId>,
    pub monthly_payment: Option<Decimal>,
    pub escrow: Option<Decimal>,
    pub occurrences: Occurrences,
}

impl DisplayEvent {
    pub fn from_entry(entry: &OccurrenceEntry) -> Self {
        let event = &entry.event;
        Self {
            id: event.id.clone(),
            name: event.name.clone(),
            amount: event.display_amount(),
            event_type: event.event_type,
            start_date: event.start_date.clone(),
            end_date: event.end_date.clone(),
            frequency: event.frequency.clone(),
            category: event.category.clone(),
            description: event.description.clone(),
            active: event.active,
            profile_id: event.profile_id.clone(),
            scenario_id: event.scenario_id.clone(),
            monthly_payment: event.monthly_payment,
            escrow: event.escrow,
            occurrences: entry.occurrences.clone(),
        }
    }

    pub fn is_credit(&self) -> bool {
        self.event_type == EventType::Credit
    }

    pub fn is_debit(&self) -> bool {
        self.event_type == EventType::Debit
    }
}

/// One cell of the month grid.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CalendarDay {
    pub day: u32,
    pub current_month: bool,
    pub date: NaiveDate,
    pub has_events: bool,
    pub events: Vec<DisplayEvent>,
    pub is_today: bool,
}

pub struct CalendarGridBuilder;

impl CalendarGridBuilder {
    /// Builds the grid for the month containing `target`.
    ///
    /// Only entries occurring in the target month (start date fallback
    /// applied) are considered. Of those, entries without an occurrence list
    /// are never attached, while an empty list attaches on the start date.
    pub fn build(target: NaiveDate, today: NaiveDate, entries: &[OccurrenceEntry]) -> Vec<CalendarDay> {
        let first = first_day_of_month(target);
        let last = last_day_of_month(target);
        let (year, month) = (first.year(), first.month());

        let attachable: Vec<(&OccurrenceEntry, Vec<NaiveDate>)> = entries
            .iter()
            .filter(|entry| entry.occurs_in_month(year, month))
            .filter_map(|entry| entry.attachable_dates().map(|dates| (entry, dates)))
            .collect();

        let leading = first.weekday().num_days_from_sunday();
        let trailing = 6 - last.weekday().num_days_from_sunday();
        let (start, leading) = match first.checked_sub_signed(Duration::days(i64::from(leading))) {
            Some(start) => (start, leading),
            None => (first, 0),
        };
        let cells = leading + last.day() + trailing;

        let days: Vec<CalendarDay> = (0..cells)
            .map_while(|offset| start.checked_add_signed(Duration::days(i64::from(offset))))
            .map(|date| {
                let current_month = date.year() == year && date.month() == month;
                let events = events_on(date, &attachable);
                CalendarDay {
                    day: date.day(),
                    current_month,
                    date,
                    has_events: !events.is_empty(),
                    events,
                    is_today: current_month && is_same_day(&date, &today),
                }
            })
            .collect();

        tracing::debug!(
            year,
            month,
            cells = days.len(),
            entries = attachable.len(),
            "calendar grid built"
        );
        days
    }
}

fn events_on(date: NaiveDate, attachable: &[(&OccurrenceEntry, Vec<NaiveDate>)]) -> Vec<DisplayEvent> {
    attachable
        .iter()
        .flat_map(|(entry, dates)| {
            dates
                .iter()
                .filter(move |occurrence| **occurrence == date)
                .map(move |_| DisplayEvent::from_entry(entry))
        })
        .collect()
}

/// Credit and debit sums over the current-month cells of a grid.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DayTotals {
    pub credit: Decimal,
    pub debit: Decimal,
}

impl DayTotals {
    pub fn from_days(days: &[CalendarDay]) -> Self {
        days.iter()
            .filter(|day| day.current_month)
            .flat_map(|day| day.events.iter())
            .fold(Self::default(), |mut totals, event| {
                match event.event_type {
                    EventType::Credit => totals.credit += event.amount,
                    EventType::Debit => totals.debit += event.amount,
                }
                totals
            })
    }

    pub fn net_flow(&self) -> Decimal {
        self.credit - self.debit
    }

    /// Always zero; savings are not derived from the grid yet.
    pub fn savings(&self) -> Decimal {
        Decimal::ZERO
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::RecurringEvent;

    fn ymd(year: i32, month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(year, month, day).unwrap()
    }

    fn salary() -> RecurringEvent {
        RecurringEvent::new(
            1,
            "Salary",
            Decimal::from(3000),
            EventType::Credit,
            EventCategory::PrimaryIncome,
        )
        .with_start_date("2025-01-15")
    }

    fn mortgage() -> RecurringEvent {
        RecurringEvent::new(
            2,
            "Mortgage",
            Decimal::from(250_000),
            EventType::Debit,
            EventCategory::Mortgage,
        )
        .with_loan_terms(Decimal::from(1500), Some(Decimal::from(300)))
        .with_start_date("2024-06-01")
    }

    #[test]
    fn february_2025_spans_five_weeks() {
        let days = CalendarGridBuilder::build(ymd(2025, 2, 10), ymd(2024, 1, 1), &[]);
        assert_eq!(days.len(), 35);
        assert_eq!(days[0].date, ymd(2025, 1, 26));
        assert_eq!(days[6].date, ymd(2025, 2, 1));
        assert_eq!(days[34].date, ymd(2025, 3, 1));
        assert_eq!(days.iter().filter(|day| day.current_month).count(), 28);
    }

    #[test]
    fn today_is_flagged_once() {
        let days = CalendarGridBuilder::build(ymd(2025, 2, 1), ymd(2025, 2, 14), &[]);
        let flagged: Vec<_> = days.iter().filter(|day| day.is_today).collect();
        assert_eq!(flagged.len(), 1);
        assert_eq!(flagged[0].date, ymd(2025, 2, 14));
    }

    #[test]
    fn events_attach_to_matching_days_with_display_amount() {
        let entries = vec![
            OccurrenceEntry::new(salary(), ["2025-02-14T00:00:00.000Z", "2025-02-28"]),
            OccurrenceEntry::new(mortgage(), ["2025-02-01"]),
        ];
        let days = CalendarGridBuilder::build(ymd(2025, 2, 1), ymd(2025, 2, 1), &entries);

        let first = days.iter().find(|day| day.date == ymd(2025, 2, 1)).unwrap();
        assert!(first.has_events);
        assert_eq!(first.events[0].amount, Decimal::from(1800));

        let paydays = days
            .iter()
            .filter(|day| day.events.iter().any(|event| event.name == "Salary"))
            .count();
        assert_eq!(paydays, 2);
    }

    #[test]
    fn missing_occurrences_are_not_attached() {
        let entries = vec![OccurrenceEntry::without_occurrences(
            salary().with_start_date("2025-02-10"),
        )];
        let days = CalendarGridBuilder::build(ymd(2025, 2, 1), ymd(2025, 2, 1), &entries);
        assert!(days.iter().all(|day| !day.has_events));
    }

    #[test]
    fn empty_occurrences_attach_on_start_date() {
        let entries = vec![OccurrenceEntry::new(
            salary().with_start_date("2025-02-10"),
            Vec::<&str>::new(),
        )];
        let days = CalendarGridBuilder::build(ymd(2025, 2, 1), ymd(2025, 2, 1), &entries);
        let with_events: Vec<_> = days.iter().filter(|day| day.has_events).collect();
        assert_eq!(with_events.len(), 1);
        assert_eq!(with_events[0].date, ymd(2025, 2, 10));
    }

    #[test]
    fn totals_only_count_current_month_cells() {
        // March 1st 2025 is a trailing cell of the February grid.
        let entries = vec![
            OccurrenceEntry::new(salary(), ["2025-02-14", "2025-03-01"]),
            OccurrenceEntry::new(mortgage(), ["2025-02-01"]),
        ];
        let days = CalendarGridBuilder::build(ymd(2025, 2, 1), ymd(2025, 2, 1), &entries);
        assert!(days.last().unwrap().has_events);

        let totals = DayTotals::from_days(&days);
        assert_eq!(totals.credit, Decimal::from(3000));
        assert_eq!(totals.debit, Decimal::from(1800));
        assert_eq!(totals.net_flow(), Decimal::from(1200));
        assert_eq!(totals.savings(), Decimal::ZERO);
    }

    #[test]
    fn grid_is_truncated_at_the_date_range_limits() {
        let latest = CalendarGridBuilder::build(NaiveDate::MAX, NaiveDate::MAX, &[]);
        assert_eq!(latest.last().map(|day| day.date), Some(NaiveDate::MAX));
        assert_eq!(latest.iter().filter(|day| day.current_month).count(), 31);
        assert!(latest.last().is_some_and(|day| day.is_today));

        let earliest = CalendarGridBuilder::build(NaiveDate::MIN, NaiveDate::MAX, &[]);
        assert_eq!(earliest.first().map(|day| day.date), Some(NaiveDate::MIN));
        assert_eq!(earliest.iter().filter(|day| day.current_month).count(), 31);
    }
}
