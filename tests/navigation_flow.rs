mod common;

use budgeteer_core::calendar::CalendarController;
use budgeteer_core::core::time::FixedClock;
use budgeteer_core::domain::{EntityId, OccurrenceEntry};
use common::{groceries, ymd, FakeApi};
use rust_decimal::Decimal;

async fn loaded_calendar() -> CalendarController<FakeApi, FixedClock> {
    let mut calendar = CalendarController::new(FakeApi::new(), FixedClock::new(ymd(2025, 2, 14)));
    calendar.fetch_profile_info(&EntityId::from(7)).await;
    calendar.fetch_scenarios().await;
    calendar
}

#[tokio::test]
async fn profile_and_default_scenario_are_shared() {
    let calendar = loaded_calendar().await;
    assert_eq!(calendar.profile().map(|p| p.name.as_str()), Some("Household"));
    assert!(calendar.scenarios().profile().is_some());
    assert!(calendar.index().profile().is_some());
    assert!(calendar.scenarios().is_default_scenario());
    assert_eq!(calendar.scenarios().custom_scenarios().len(), 1);
}

#[tokio::test]
async fn unknown_profile_is_logged_not_raised() {
    let mut calendar = CalendarController::new(FakeApi::new(), FixedClock::new(ymd(2025, 2, 14)));
    calendar.fetch_profile_info(&EntityId::from(99)).await;
    assert!(calendar.profile().is_none());
    assert!(calendar.error().is_some());
}

#[tokio::test]
async fn refresh_builds_current_month() {
    let mut calendar = loaded_calendar().await;
    calendar.refresh().await;

    assert_eq!(calendar.current_month_year(), "February 2025");
    assert_eq!(calendar.version(), 1);
    assert_eq!(calendar.calendar_days().len(), 35);
    assert_eq!(calendar.calendar_days().iter().filter(|d| d.is_today).count(), 1);
    assert_eq!(calendar.net_flow(), Decimal::from(6400 - 2100));
    assert_eq!(calendar.savings(), Decimal::ZERO);
    assert_eq!(calendar.index().combined_active_events().len(), 3);
    assert!(!calendar.index().is_loading());
    assert!(calendar.index().error().is_none());

    let queries = calendar.api().recorded_queries();
    assert_eq!(queries.len(), 1);
    assert_eq!((queries[0].year, queries[0].month), (2025, 2));
    assert_eq!(queries[0].scenario_id, Some(EntityId::from(20)));
}

#[tokio::test]
async fn next_and_previous_month_refetch() {
    let mut calendar = loaded_calendar().await;
    calendar.next_month().await;
    assert_eq!(calendar.current_month_year(), "March 2025");
    assert!(calendar.calendar_days().iter().all(|day| !day.is_today));
    assert_eq!(calendar.credit_total(), Decimal::from(6400));

    calendar.previous_month().await;
    calendar.previous_month().await;
    assert_eq!(calendar.current_month_year(), "January 2025");
    assert!(calendar.calendar_days().iter().all(|day| !day.has_events));
    assert_eq!(calendar.version(), 3);

    let months: Vec<u32> = calendar
        .api()
        .recorded_queries()
        .iter()
        .map(|query| query.month)
        .collect();
    assert_eq!(months, vec![3, 2, 1]);
}

#[tokio::test]
async fn previous_month_wraps_the_year() {
    let mut calendar = loaded_calendar().await;
    calendar.set_calendar_to_date(2025, 1, 31).await.unwrap();
    calendar.previous_month().await;
    assert_eq!(calendar.current_month_year(), "December 2024");
}

#[tokio::test]
async fn failed_refetch_still_rebuilds() {
    let mut calendar = loaded_calendar().await;
    calendar.refresh().await;
    assert!(calendar.calendar_days().iter().any(|day| day.has_events));

    calendar.api().fail_month_fetches(true);
    calendar.next_month().await;

    assert_eq!(calendar.current_month_year(), "March 2025");
    assert_eq!(calendar.api().recorded_queries().len(), 2);
    assert_eq!(calendar.calendar_days().len(), 35);
    // February entries are kept but do not belong to March.
    assert!(calendar.calendar_days().iter().all(|day| !day.has_events));
    assert_eq!(calendar.index().month_entries().len(), 3);
}

#[tokio::test]
async fn month_fetch_failure_survives_event_refresh() {
    let mut calendar = loaded_calendar().await;
    calendar.api().fail_month_fetches(true);
    calendar.next_month().await;

    assert!(calendar
        .index()
        .error()
        .is_some_and(|err| err.contains("503")));
    assert!(!calendar.index().is_loading());
    assert_eq!(calendar.index().all_events().len(), 3);

    calendar.api().fail_month_fetches(false);
    calendar.refresh().await;
    assert!(calendar.index().error().is_none());
    assert!(calendar.calendar_days().iter().any(|day| day.has_events));
}

#[tokio::test]
async fn stale_responses_are_discarded() {
    let mut calendar = loaded_calendar().await;
    calendar.next_month().await;
    calendar.next_month().await;
    assert_eq!(calendar.index().applied_version(), 2);

    let late = vec![OccurrenceEntry::new(groceries(), ["2025-04-05"])];
    assert!(!calendar.index_mut().apply_month_entries(1, late.clone()));
    assert!(calendar.index_mut().apply_month_entries(2, late));
}

#[tokio::test]
async fn reset_calendar_rewinds_versions() {
    let mut calendar = loaded_calendar().await;
    calendar.next_month().await;
    calendar.next_month().await;

    calendar.reset_calendar();
    assert_eq!(calendar.version(), 0);
    assert!(calendar.calendar_days().is_empty());
    assert_eq!(calendar.current_month_year(), "February 2025");

    calendar.refresh().await;
    assert_eq!(calendar.version(), 1);
    assert!(calendar.calendar_days().iter().any(|day| day.has_events));
}

#[tokio::test]
async fn reset_for_new_user_forgets_everything() {
    let mut calendar = loaded_calendar().await;
    calendar.refresh().await;

    calendar.reset_for_new_user();
    assert!(calendar.profile().is_none());
    assert!(calendar.scenarios().profile().is_none());
    assert!(!calendar.scenarios().has_scenarios());
    assert!(calendar.index().profile().is_none());
    assert!(calendar.index().all_events().is_empty());

    calendar.refresh().await;
    assert!(calendar.index().error().is_some());
    assert!(calendar.calendar_days().iter().all(|day| !day.has_events));
}
