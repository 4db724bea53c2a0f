use std::{fs, path::Path};

use async_trait::async_trait;

use super::{BudgetApi, MonthQuery};
use crate::domain::{EntityId, OccurrenceEntry, Profile, RecurringEvent, Scenario};
use crate::errors::Result;

const OFFLINE_PROFILE_NAME: &str = "Offline";

/// [`BudgetApi`] answering from a saved `[{event, occurrences}]` document
/// instead of the network.
#[derive(Debug, Clone, Default)]
pub struct OfflineBudgetApi {
    entries: Vec<OccurrenceEntry>,
}

impl OfflineBudgetApi {
    pub fn new(entries: Vec<OccurrenceEntry>) -> Self {
        Self { entries }
    }

    pub fn from_path(path: &Path) -> Result<Self> {
        let data = fs::read_to_string(path)?;
        let entries: Vec<OccurrenceEntry> = serde_json::from_str(&data)?;
        tracing::debug!(path = %path.display(), count = entries.len(), "loaded offline entries");
        Ok(Self::new(entries))
    }

    fn in_scenario<'a>(
        &'a self,
        scenario_id: Option<&'a EntityId>,
    ) -> impl Iterator<Item = &'a OccurrenceEntry> + 'a {
        self.entries.iter().filter(move |entry| match scenario_id {
            Some(id) => entry.event.scenario_id.as_ref() == Some(id),
            None => true,
        })
    }
}

#[async_trait]
impl BudgetApi for OfflineBudgetApi {
    async fn profile_by_id(&self, profile_id: &EntityId) -> Result<Profile> {
        Ok(Profile::new(profile_id.clone(), OFFLINE_PROFILE_NAME))
    }

    async fn all_profiles(&self) -> Result<Vec<Profile>> {
        Ok(Vec::new())
    }

    async fn scenarios_for_profile(&self, _profile_id: &EntityId) -> Result<Vec<Scenario>> {
        Ok(Vec::new())
    }

    async fn events_for_month(&self, query: &MonthQuery) -> Result<Vec<OccurrenceEntry>> {
        Ok(self
            .in_scenario(query.scenario_id.as_ref())
            .filter(|entry| entry.occurs_in_month(query.year, query.month))
            .cloned()
            .collect())
    }

    async fn all_events(
        &self,
        _profile_id: &EntityId,
        scenario_id: Option<&EntityId>,
    ) -> Result<Vec<RecurringEvent>> {
        Ok(self
            .in_scenario(scenario_id)
            .map(|entry| entry.event.clone())
            .collect())
    }
}
