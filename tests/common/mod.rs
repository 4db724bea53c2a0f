#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;
use budgeteer_core::{
    api::{BudgetApi, MonthQuery},
    domain::{
        EntityId, EventCategory, EventType, OccurrenceEntry, Profile, RecurringEvent, Scenario,
    },
    errors::{BudgetError, Result},
};
use chrono::NaiveDate;
use rust_decimal::Decimal;

pub fn ymd(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).expect("valid date")
}

pub fn event(
    id: i64,
    name: &str,
    amount: i64,
    event_type: EventType,
    category: EventCategory,
) -> RecurringEvent {
    RecurringEvent::new(id, name, Decimal::from(amount), event_type, category)
}

pub fn salary() -> RecurringEvent {
    event(1, "Salary", 3200, EventType::Credit, EventCategory::PrimaryIncome)
        .with_start_date("2024-01-15")
}

pub fn mortgage() -> RecurringEvent {
    event(2, "Mortgage", 250_000, EventType::Debit, EventCategory::Mortgage)
        .with_loan_terms(Decimal::from(1500), Some(Decimal::from(300)))
        .with_start_date("2024-01-01")
}

pub fn groceries() -> RecurringEvent {
    event(3, "Groceries", 75, EventType::Debit, EventCategory::Grocery)
        .with_start_date("2024-01-06")
}

/// Month entries for February and March 2025.
pub fn sample_months() -> HashMap<(i32, u32), Vec<OccurrenceEntry>> {
    let mut months = HashMap::new();
    months.insert(
        (2025, 2),
        vec![
            OccurrenceEntry::new(salary(), ["2025-02-14T00:00:00.000Z", "2025-02-28"]),
            OccurrenceEntry::new(mortgage(), ["2025-02-01"]),
            OccurrenceEntry::new(
                groceries(),
                ["2025-02-01", "2025-02-08", "2025-02-15", "2025-02-22"],
            ),
        ],
    );
    months.insert(
        (2025, 3),
        vec![
            OccurrenceEntry::new(salary(), ["2025-03-14", "2025-03-28"]),
            OccurrenceEntry::new(mortgage(), ["2025-03-01"]),
        ],
    );
    months
}

/// In-memory backend that records the month queries it receives.
pub struct FakeApi {
    pub profile: Profile,
    pub scenarios: Vec<Scenario>,
    pub months: HashMap<(i32, u32), Vec<OccurrenceEntry>>,
    pub events: Vec<RecurringEvent>,
    pub fail_months: AtomicBool,
    pub fail_profiles: AtomicBool,
    pub queries: Mutex<Vec<MonthQuery>>,
}

impl FakeApi {
    pub fn new() -> Self {
        let mut default = Scenario::new(20, "Default");
        default.is_default = Some(true);
        Self {
            profile: Profile::new(7, "Household"),
            scenarios: vec![Scenario::new(21, "New car"), default],
            months: sample_months(),
            events: vec![salary(), mortgage(), groceries()],
            fail_months: AtomicBool::new(false),
            fail_profiles: AtomicBool::new(false),
            queries: Mutex::new(Vec::new()),
        }
    }

    pub fn fail_month_fetches(&self, fail: bool) {
        self.fail_months.store(fail, Ordering::SeqCst);
    }

    pub fn fail_profile_fetches(&self, fail: bool) {
        self.fail_profiles.store(fail, Ordering::SeqCst);
    }

    pub fn recorded_queries(&self) -> Vec<MonthQuery> {
        self.queries.lock().expect("query log").clone()
    }
}

#[async_trait]
impl BudgetApi for FakeApi {
    async fn profile_by_id(&self, profile_id: &EntityId) -> Result<Profile> {
        if profile_id == &self.profile.id {
            Ok(self.profile.clone())
        } else {
            Err(BudgetError::Api(format!("profile {profile_id} not found")))
        }
    }

    async fn all_profiles(&self) -> Result<Vec<Profile>> {
        if self.fail_profiles.load(Ordering::SeqCst) {
            return Err(BudgetError::Api("401 Unauthorized".into()));
        }
        Ok(vec![self.profile.clone()])
    }

    async fn scenarios_for_profile(&self, _profile_id: &EntityId) -> Result<Vec<Scenario>> {
        Ok(self.scenarios.clone())
    }

    async fn events_for_month(&self, query: &MonthQuery) -> Result<Vec<OccurrenceEntry>> {
        self.queries.lock().expect("query log").push(query.clone());
        if self.fail_months.load(Ordering::SeqCst) {
            return Err(BudgetError::Api("503 Service Unavailable".into()));
        }
        Ok(self
            .months
            .get(&(query.year, query.month))
            .cloned()
            .unwrap_or_default())
    }

    async fn all_events(
        &self,
        _profile_id: &EntityId,
        _scenario_id: Option<&EntityId>,
    ) -> Result<Vec<RecurringEvent>> {
        Ok(self.events.clone())
    }
}
