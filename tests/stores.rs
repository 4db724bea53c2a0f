mod common;

use budgeteer_core::core::services::{ProfileStore, ScenarioStore};
use budgeteer_core::domain::{EntityId, Profile};
use budgeteer_core::errors::BudgetError;
use common::FakeApi;

#[tokio::test]
async fn profiles_load_and_resolve_by_id() {
    let api = FakeApi::new();
    let mut store = ProfileStore::new();
    store.fetch_profiles(&api).await.unwrap();

    assert_eq!(store.all_profiles().len(), 1);
    let household = store.profile(&EntityId::from(7)).cloned();
    assert!(household.is_some());
    store.set_current_profile(household);
    assert_eq!(store.current_profile().map(|p| p.name.as_str()), Some("Household"));
}

#[tokio::test]
async fn profile_failures_are_returned() {
    let api = FakeApi::new();
    api.fail_profile_fetches(true);
    let mut store = ProfileStore::new();

    let err = store.fetch_profiles(&api).await.unwrap_err();
    assert!(matches!(err, BudgetError::Api(ref message) if message.contains("401")));
    assert!(store.all_profiles().is_empty());
}

#[tokio::test]
async fn scenarios_need_a_profile() {
    let api = FakeApi::new();
    let mut store = ScenarioStore::new();

    store.fetch_scenarios(&api).await;
    assert!(!store.has_scenarios());
    assert!(!store.is_loading());

    store.set_profile(Some(Profile::new(7, "Household")));
    store.fetch_scenarios(&api).await;
    assert_eq!(store.all_scenarios().len(), 2);
    assert_eq!(
        store.selected_scenario().map(|s| s.id.as_str()),
        Some("20")
    );
}

#[tokio::test]
async fn first_scenario_is_selected_without_default() {
    let mut api = FakeApi::new();
    api.scenarios.retain(|scenario| !scenario.is_named_default());
    let mut store = ScenarioStore::new();
    store.set_profile(Some(Profile::new(7, "Household")));

    store.fetch_scenarios(&api).await;
    assert!(store.default_scenario().is_none());
    assert_eq!(store.selected_scenario().map(|s| s.name.as_str()), Some("New car"));
    assert!(!store.is_default_scenario());
}
