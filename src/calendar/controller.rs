use chrono::NaiveDate;
use rust_decimal::Decimal;

use crate::api::BudgetApi;
use crate::calendar::grid::{CalendarDay, CalendarGridBuilder, DayTotals};
use crate::core::services::{EventOccurrenceIndex, ScenarioStore};
use crate::core::time::Clock;
use crate::domain::{EntityId, Profile, RecurringEvent};
use crate::errors::{BudgetError, Result};
use crate::utils::dates::{add_months, first_day_of_month};

const MONTH_YEAR_FORMAT: &str = "%B %Y";

/// Month navigation over the occurrence index.
///
/// Every navigation bumps the version counter, refetches the month and the
/// general event list tagged with that version, then rebuilds the grid. The
/// grid is rebuilt even when a fetch fails, from whatever data the index
/// still holds.
pub struct CalendarController<A, C> {
    api: A,
    clock: C,
    current_date: NaiveDate,
    version: u64,
    profile: Option<Profile>,
    calendar_days: Vec<CalendarDay>,
    index: EventOccurrenceIndex,
    scenarios: ScenarioStore,
    error: Option<String>,
}

impl<A, C> CalendarController<A, C>
where
    A: BudgetApi,
    C: Clock,
{
    pub fn new(api: A, clock: C) -> Self {
        let today = clock.today();
        Self {
            api,
            clock,
            current_date: today,
            version: 0,
            profile: None,
            calendar_days: Vec::new(),
            index: EventOccurrenceIndex::new(first_day_of_month(today)),
            scenarios: ScenarioStore::new(),
            error: None,
        }
    }

    pub fn api(&self) -> &A {
        &self.api
    }

    pub fn current_date(&self) -> NaiveDate {
        self.current_date
    }

    pub fn version(&self) -> u64 {
        self.version
    }

    pub fn profile(&self) -> Option<&Profile> {
        self.profile.as_ref()
    }

    pub fn calendar_days(&self) -> &[CalendarDay] {
        &self.calendar_days
    }

    pub fn index(&self) -> &EventOccurrenceIndex {
        &self.index
    }

    pub fn index_mut(&mut self) -> &mut EventOccurrenceIndex {
        &mut self.index
    }

    pub fn scenarios(&self) -> &ScenarioStore {
        &self.scenarios
    }

    pub fn scenarios_mut(&mut self) -> &mut ScenarioStore {
        &mut self.scenarios
    }

    /// Last profile lookup failure, if any.
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Displayed month, e.g. "February 2025".
    pub fn current_month_year(&self) -> String {
        self.current_date.format(MONTH_YEAR_FORMAT).to_string()
    }

    pub fn event_display_amount(&self, event: &RecurringEvent) -> Decimal {
        event.display_amount()
    }

    pub fn day_totals(&self) -> DayTotals {
        DayTotals::from_days(&self.calendar_days)
    }

    pub fn credit_total(&self) -> Decimal {
        self.day_totals().credit
    }

    pub fn debit_total(&self) -> Decimal {
        self.day_totals().debit
    }

    pub fn net_flow(&self) -> Decimal {
        self.day_totals().net_flow()
    }

    pub fn savings(&self) -> Decimal {
        self.day_totals().savings()
    }

    pub fn cash_flow_in_total(&self) -> Decimal {
        self.index.cash_flow_in_total()
    }

    pub fn cash_flow_out_total(&self) -> Decimal {
        self.index.cash_flow_out_total()
    }

    /// Loads the profile and hands it to the scenario store and the index.
    /// Failures are logged and kept in `error`.
    pub async fn fetch_profile_info(&mut self, profile_id: &EntityId) {
        match self.api.profile_by_id(profile_id).await {
            Ok(profile) => {
                tracing::info!(profile = %profile.id, name = %profile.name, "profile loaded");
                self.scenarios.set_profile(Some(profile.clone()));
                self.index.set_profile(Some(profile.clone()));
                self.profile = Some(profile);
                self.error = None;
            }
            Err(err) => {
                tracing::error!(error = %err, profile = %profile_id, "failed to fetch profile info");
                self.error = Some(err.to_string());
            }
        }
    }

    pub async fn fetch_scenarios(&mut self) {
        self.scenarios.fetch_scenarios(&self.api).await;
    }

    /// Rebuilds the grid from the index without fetching.
    pub fn update_calendar_days(&mut self) {
        self.calendar_days = CalendarGridBuilder::build(
            self.current_date,
            self.clock.today(),
            self.index.month_entries(),
        );
    }

    pub async fn previous_month(&mut self) {
        let target = add_months(first_day_of_month(self.current_date), -1);
        self.navigate_to(target).await;
    }

    pub async fn next_month(&mut self) {
        let target = add_months(first_day_of_month(self.current_date), 1);
        self.navigate_to(target).await;
    }

    /// Jumps to a specific day. `month` is 1-based.
    pub async fn set_calendar_to_date(&mut self, year: i32, month: u32, day: u32) -> Result<()> {
        let target = NaiveDate::from_ymd_opt(year, month, day).ok_or_else(|| {
            BudgetError::InvalidInput(format!("{year}-{month:02}-{day:02} is not a calendar date"))
        })?;
        self.navigate_to(target).await;
        Ok(())
    }

    /// Refetches and rebuilds the month currently displayed.
    pub async fn refresh(&mut self) {
        self.navigate_to(self.current_date).await;
    }

    async fn navigate_to(&mut self, target: NaiveDate) {
        self.current_date = target;
        self.version += 1;
        let version = self.version;
        tracing::info!(month = %self.current_month_year(), version, "navigating calendar");

        self.index.set_current_date(target);
        self.index
            .set_scenario(self.scenarios.selected_scenario().cloned());
        self.index
            .fetch_events_for_month_by_scenario(&self.api, version)
            .await;
        self.index.fetch_events(&self.api, version).await;
        self.update_calendar_days();
    }

    /// Back to today with an empty grid and a fresh version counter.
    pub fn reset_calendar(&mut self) {
        let today = self.clock.today();
        self.current_date = today;
        self.calendar_days.clear();
        self.version = 0;
        self.index.rewind_version();
        self.index.set_current_date(today);
    }

    pub fn reset_for_new_user(&mut self) {
        self.reset_calendar();
        self.profile = None;
        self.error = None;
        self.scenarios.reset_for_new_user();
        self.index.reset_for_new_user();
    }
}
