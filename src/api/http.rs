use async_trait::async_trait;
use reqwest::Client;
use serde::de::DeserializeOwned;

use super::{BudgetApi, MonthQuery};
use crate::config::ClientConfig;
use crate::domain::{EntityId, OccurrenceEntry, Profile, RecurringEvent, Scenario};
use crate::errors::{BudgetError, Result};

const PROFILE_BY_ID: &str = "/api/profile/get-profile-by-id";
const ALL_PROFILES: &str = "/api/profile/get-all-profiles";
const SCENARIOS_FOR_PROFILE: &str = "/api/scenario/get-all-scenarios-for-profile";
const EVENTS_FOR_MONTH: &str = "/api/event/get-events-for-month-by-scenario";
const ALL_EVENTS: &str = "/api/event/get-all-events";

/// [`BudgetApi`] over the backend's JSON endpoints.
#[derive(Debug, Clone)]
pub struct HttpBudgetApi {
    http: Client,
    base_url: String,
    token: Option<String>,
}

impl HttpBudgetApi {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            http: Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
            token: None,
        }
    }

    pub fn from_config(config: &ClientConfig) -> Result<Self> {
        config.validate()?;
        let api = Self::new(config.api_url.clone());
        Ok(match &config.token {
            Some(token) => api.with_token(token.clone()),
            None => api,
        })
    }

    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    pub fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> Result<T> {
        let url = self.endpoint(path);
        let mut request = self.http.get(&url).query(query);
        if let Some(token) = &self.token {
            request = request.bearer_auth(token);
        }
        tracing::debug!(%url, "GET");
        let response = request.send().await?;
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(BudgetError::Api(format!("{path} returned {status}: {}", body.trim())));
        }
        Ok(response.json().await?)
    }
}

/// Query pairs for a month fetch; the scenario is omitted when none is selected.
pub fn month_query_params(query: &MonthQuery) -> Vec<(&'static str, String)> {
    let mut params = vec![("profileID", query.profile_id.to_string())];
    if let Some(scenario_id) = &query.scenario_id {
        params.push(("scenarioID", scenario_id.to_string()));
    }
    params.push(("month", query.month.to_string()));
    params.push(("year", query.year.to_string()));
    params
}

#[async_trait]
impl BudgetApi for HttpBudgetApi {
    async fn profile_by_id(&self, profile_id: &EntityId) -> Result<Profile> {
        self.get_json(PROFILE_BY_ID, &[("profileID", profile_id.to_string())])
            .await
    }

    async fn all_profiles(&self) -> Result<Vec<Profile>> {
        self.get_json(ALL_PROFILES, &[]).await
    }

    async fn scenarios_for_profile(&self, profile_id: &EntityId) -> Result<Vec<Scenario>> {
        self.get_json(SCENARIOS_FOR_PROFILE, &[("profileID", profile_id.to_string())])
            .await
    }

    async fn events_for_month(&self, query: &MonthQuery) -> Result<Vec<OccurrenceEntry>> {
        self.get_json(EVENTS_FOR_MONTH, &month_query_params(query))
            .await
    }

    async fn all_events(
        &self,
        profile_id: &EntityId,
        scenario_id: Option<&EntityId>,
    ) -> Result<Vec<RecurringEvent>> {
        let mut params = vec![("profileID", profile_id.to_string())];
        if let Some(scenario_id) = scenario_id {
            params.push(("scenarioID", scenario_id.to_string()));
        }
        self.get_json(ALL_EVENTS, &params).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn endpoint_joins_without_double_slash() {
        let api = HttpBudgetApi::new("http://localhost:3000/");
        assert_eq!(
            api.endpoint(PROFILE_BY_ID),
            "http://localhost:3000/api/profile/get-profile-by-id"
        );
    }

    #[test]
    fn config_token_is_carried() {
        let config = ClientConfig {
            token: Some("secret".into()),
            ..ClientConfig::default()
        };
        let api = HttpBudgetApi::from_config(&config).unwrap();
        assert_eq!(api.token.as_deref(), Some("secret"));
    }

    #[test]
    fn month_params_skip_missing_scenario() {
        let query = MonthQuery {
            profile_id: EntityId::from(3),
            scenario_id: None,
            year: 2025,
            month: 2,
        };
        let params = month_query_params(&query);
        assert_eq!(
            params,
            vec![
                ("profileID", "3".to_string()),
                ("month", "2".to_string()),
                ("year", "2025".to_string()),
            ]
        );
    }
}
