use crate::api::BudgetApi;
use crate::domain::{find_by_id, EntityId, Profile, Scenario};
use crate::errors::BudgetError;

/// Scenarios of the active profile and the one currently selected.
#[derive(Debug, Default)]
pub struct ScenarioStore {
    scenarios: Vec<Scenario>,
    current_scenario: Option<Scenario>,
    profile: Option<Profile>,
    loading: bool,
    error: Option<String>,
}

impl ScenarioStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn all_scenarios(&self) -> &[Scenario] {
        &self.scenarios
    }

    pub fn default_scenario(&self) -> Option<&Scenario> {
        self.scenarios.iter().find(|scenario| scenario.is_named_default())
    }

    pub fn selected_scenario(&self) -> Option<&Scenario> {
        self.current_scenario.as_ref()
    }

    pub fn is_default_scenario(&self) -> bool {
        self.current_scenario
            .as_ref()
            .is_some_and(Scenario::is_named_default)
    }

    pub fn custom_scenarios(&self) -> Vec<&Scenario> {
        self.scenarios
            .iter()
            .filter(|scenario| !scenario.is_named_default())
            .collect()
    }

    pub fn has_scenarios(&self) -> bool {
        !self.scenarios.is_empty()
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn has_error(&self) -> bool {
        self.error.is_some()
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn profile(&self) -> Option<&Profile> {
        self.profile.as_ref()
    }

    pub fn set_profile(&mut self, profile: Option<Profile>) {
        self.profile = profile;
    }

    /// Replaces the known scenarios without touching the selection.
    pub fn replace_scenarios(&mut self, scenarios: Vec<Scenario>) {
        self.scenarios = scenarios;
    }

    /// Loads the profile's scenarios and selects the default one, or the first
    /// when none is named "default". Failures land in `error`.
    pub async fn fetch_scenarios<A>(&mut self, api: &A)
    where
        A: BudgetApi + ?Sized,
    {
        let Some(profile_id) = self.profile.as_ref().map(|profile| profile.id.clone()) else {
            let err = BudgetError::ProfileNotSet("fetching scenarios");
            tracing::error!(error = %err, "fetch skipped");
            return;
        };
        self.loading = true;
        self.error = None;
        match api.scenarios_for_profile(&profile_id).await {
            Ok(scenarios) => {
                tracing::debug!(profile = %profile_id, count = scenarios.len(), "scenarios loaded");
                self.scenarios = scenarios;
                let preferred = self
                    .default_scenario()
                    .or_else(|| self.scenarios.first())
                    .cloned();
                if let Some(scenario) = preferred {
                    self.select_scenario(scenario);
                }
            }
            Err(err) => {
                tracing::error!(error = %err, profile = %profile_id, "failed to fetch scenarios");
                self.error = Some(err.to_string());
            }
        }
        self.loading = false;
    }

    pub fn select_scenario(&mut self, scenario: Scenario) {
        self.current_scenario = Some(scenario);
    }

    /// Selects a known scenario. Unknown ids are logged and leave the selection as is.
    pub fn select_scenario_by_id(&mut self, id: &EntityId) -> bool {
        match find_by_id(&self.scenarios, id) {
            Some(scenario) => {
                self.current_scenario = Some(scenario.clone());
                true
            }
            None => {
                tracing::error!(scenario = %id, "scenario not found");
                false
            }
        }
    }

    pub fn select_default_scenario(&mut self) -> bool {
        match self.default_scenario().cloned() {
            Some(scenario) => {
                self.current_scenario = Some(scenario);
                true
            }
            None => {
                tracing::warn!("no default scenario found");
                false
            }
        }
    }

    pub fn reset(&mut self) {
        self.scenarios.clear();
        self.current_scenario = None;
        self.loading = false;
        self.error = None;
    }

    pub fn reset_for_new_user(&mut self) {
        self.reset();
        self.profile = None;
    }

    pub fn clear_error(&mut self) {
        self.error = None;
    }
}
