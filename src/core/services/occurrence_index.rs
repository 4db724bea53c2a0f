use chrono::{Datelike, NaiveDate};
use rust_decimal::Decimal;
use serde::Serialize;

use crate::api::{BudgetApi, MonthQuery};
use crate::domain::{EventCategory, OccurrenceEntry, Profile, RecurringEvent, Scenario};
use crate::errors::BudgetError;
use crate::utils::dates::first_day_of_month;

/// One occurrence flattened out of an [`OccurrenceEntry`]: the event's fields
/// plus the matched date.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DatedEvent {
    #[serde(flatten)]
    pub event: RecurringEvent,
    pub date: NaiveDate,
}

/// Events and month occurrences of the active profile and scenario, with the
/// aggregate figures derived from them.
///
/// Fetch results carry the version that requested them. Anything older than
/// the last applied version is dropped so a slow response cannot overwrite a
/// newer month.
#[derive(Debug)]
pub struct EventOccurrenceIndex {
    events: Vec<RecurringEvent>,
    month_entries: Vec<OccurrenceEntry>,
    filtered_events: Vec<DatedEvent>,
    combined_active_events: Vec<RecurringEvent>,
    profile: Option<Profile>,
    scenario: Option<Scenario>,
    current_date: NaiveDate,
    loading: bool,
    error: Option<String>,
    applied_version: u64,
}

impl EventOccurrenceIndex {
    pub fn new(current_date: NaiveDate) -> Self {
        Self {
            events: Vec::new(),
            month_entries: Vec::new(),
            filtered_events: Vec::new(),
            combined_active_events: Vec::new(),
            profile: None,
            scenario: None,
            current_date,
            loading: false,
            error: None,
            applied_version: 0,
        }
    }

    pub fn all_events(&self) -> &[RecurringEvent] {
        &self.events
    }

    pub fn month_entries(&self) -> &[OccurrenceEntry] {
        &self.month_entries
    }

    pub fn filtered_events(&self) -> &[DatedEvent] {
        &self.filtered_events
    }

    pub fn combined_active_events(&self) -> &[RecurringEvent] {
        &self.combined_active_events
    }

    pub fn profile(&self) -> Option<&Profile> {
        self.profile.as_ref()
    }

    pub fn scenario(&self) -> Option<&Scenario> {
        self.scenario.as_ref()
    }

    pub fn current_date(&self) -> NaiveDate {
        self.current_date
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn has_error(&self) -> bool {
        self.error.is_some()
    }

    pub fn applied_version(&self) -> u64 {
        self.applied_version
    }

    /// Raw amounts of every fetched credit event.
    pub fn cash_flow_in_total(&self) -> Decimal {
        self.events
            .iter()
            .filter(|event| event.is_credit())
            .map(|event| event.amount)
            .sum()
    }

    /// Raw amounts of every fetched debit event.
    pub fn cash_flow_out_total(&self) -> Decimal {
        self.events
            .iter()
            .filter(|event| event.is_debit())
            .map(|event| event.amount)
            .sum()
    }

    pub fn monthly_income(&self) -> Decimal {
        self.combined_active_events
            .iter()
            .filter(|event| event.is_credit())
            .map(RecurringEvent::display_amount)
            .sum()
    }

    pub fn monthly_expenses(&self) -> Decimal {
        self.combined_active_events
            .iter()
            .filter(|event| event.is_debit() && !event.category.is_savings())
            .map(RecurringEvent::display_amount)
            .sum()
    }

    pub fn monthly_savings(&self) -> Decimal {
        self.combined_active_events
            .iter()
            .filter(|event| event.is_debit() && event.category == EventCategory::Savings)
            .map(RecurringEvent::display_amount)
            .sum()
    }

    pub fn cash_flow(&self) -> Decimal {
        self.monthly_income() - self.monthly_expenses()
    }

    /// Entries with at least one occurrence (start date fallback applied) in the month.
    pub fn entries_in_month(&self, year: i32, month: u32) -> Vec<&OccurrenceEntry> {
        self.month_entries
            .iter()
            .filter(|entry| entry.occurs_in_month(year, month))
            .collect()
    }

    /// Flattens `entries` into one record per occurrence inside `[start, end]`
    /// and keeps the result as the filtered events.
    pub fn filter_events_by_date_range(
        &mut self,
        start: NaiveDate,
        end: NaiveDate,
        entries: &[OccurrenceEntry],
    ) -> &[DatedEvent] {
        self.filtered_events = entries
            .iter()
            .flat_map(|entry| {
                entry
                    .effective_dates()
                    .into_iter()
                    .filter(move |date| *date >= start && *date <= end)
                    .map(move |date| DatedEvent {
                        event: entry.event.clone(),
                        date,
                    })
            })
            .collect();
        &self.filtered_events
    }

    /// Loads the occurrences of the current month for the selected scenario.
    /// Failures are stored in `error`; the call itself always completes.
    pub async fn fetch_events_for_month_by_scenario<A>(&mut self, api: &A, version: u64)
    where
        A: BudgetApi + ?Sized,
    {
        let Some(profile) = &self.profile else {
            let err = BudgetError::ProfileNotSet("fetching month events");
            tracing::error!(error = %err, "fetch skipped");
            self.error = Some(err.to_string());
            return;
        };
        let query = MonthQuery {
            profile_id: profile.id.clone(),
            scenario_id: self.scenario.as_ref().map(|scenario| scenario.id.clone()),
            year: self.current_date.year(),
            month: self.current_date.month(),
        };
        self.loading = true;
        self.error = None;
        match api.events_for_month(&query).await {
            Ok(entries) => {
                self.apply_month_entries(version, entries);
            }
            Err(err) => {
                tracing::error!(error = %err, year = query.year, month = query.month, "failed to fetch month events");
                self.error = Some(err.to_string());
            }
        }
        self.loading = false;
    }

    /// Loads every event of the profile and scenario and recomputes the active set.
    ///
    /// Runs after the month fetch of a navigation, so an error stored by that
    /// fetch is left in place.
    pub async fn fetch_events<A>(&mut self, api: &A, version: u64)
    where
        A: BudgetApi + ?Sized,
    {
        let Some(profile) = &self.profile else {
            let err = BudgetError::ProfileNotSet("fetching events");
            tracing::error!(error = %err, "fetch skipped");
            self.error = Some(err.to_string());
            return;
        };
        let profile_id = profile.id.clone();
        let scenario_id = self.scenario.as_ref().map(|scenario| scenario.id.clone());
        self.loading = true;
        match api.all_events(&profile_id, scenario_id.as_ref()).await {
            Ok(events) => {
                self.apply_events(version, events);
            }
            Err(err) => {
                tracing::error!(error = %err, profile = %profile_id, "failed to fetch events");
                self.error = Some(err.to_string());
            }
        }
        self.loading = false;
    }

    /// Stores month entries unless a newer version was already applied.
    /// Returns whether the entries were kept.
    pub fn apply_month_entries(&mut self, version: u64, entries: Vec<OccurrenceEntry>) -> bool {
        if !self.accept(version) {
            return false;
        }
        tracing::debug!(version, count = entries.len(), "applied month entries");
        self.month_entries = entries;
        true
    }

    pub fn apply_events(&mut self, version: u64, events: Vec<RecurringEvent>) -> bool {
        if !self.accept(version) {
            return false;
        }
        self.set_events(events);
        true
    }

    fn accept(&mut self, version: u64) -> bool {
        if version < self.applied_version {
            tracing::debug!(version, applied = self.applied_version, "discarding stale response");
            return false;
        }
        self.applied_version = version;
        true
    }

    pub fn set_events(&mut self, events: Vec<RecurringEvent>) {
        self.combined_active_events = events.iter().filter(|event| event.active).cloned().collect();
        self.events = events;
    }

    pub fn set_combined_active_events(&mut self, events: Vec<RecurringEvent>) {
        self.combined_active_events = events;
    }

    pub fn set_filtered_events(&mut self, events: Vec<DatedEvent>) {
        self.filtered_events = events;
    }

    pub fn set_profile(&mut self, profile: Option<Profile>) {
        self.profile = profile;
    }

    pub fn set_scenario(&mut self, scenario: Option<Scenario>) {
        self.scenario = scenario;
    }

    /// Normalised to the first of the month; only year and month are used in queries.
    pub fn set_current_date(&mut self, date: NaiveDate) {
        self.current_date = first_day_of_month(date);
    }

    pub fn clear_error(&mut self) {
        self.error = None;
    }

    /// Lets a fresh counter start over after the owner resets its versions.
    pub fn rewind_version(&mut self) {
        self.applied_version = 0;
    }

    /// Clears fetched data while keeping the profile and scenario selection.
    pub fn reset(&mut self) {
        self.events.clear();
        self.month_entries.clear();
        self.filtered_events.clear();
        self.combined_active_events.clear();
        self.loading = false;
        self.error = None;
    }

    pub fn reset_for_new_user(&mut self) {
        self.reset();
        self.profile = None;
        self.scenario = None;
        self.applied_version = 0;
    }
}
