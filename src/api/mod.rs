//! Contract with the budgeting REST backend.

pub mod http;
pub mod offline;

use async_trait::async_trait;

use crate::domain::{EntityId, OccurrenceEntry, Profile, RecurringEvent, Scenario};
use crate::errors::Result;

pub use http::HttpBudgetApi;
pub use offline::OfflineBudgetApi;

/// Parameters of a month occurrence fetch. `month` is 1-based.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MonthQuery {
    pub profile_id: EntityId,
    pub scenario_id: Option<EntityId>,
    pub year: i32,
    pub month: u32,
}

/// Read-side operations the stores need from the backend. Implemented over
/// HTTP by [`HttpBudgetApi`] and over a saved document by [`OfflineBudgetApi`].
#[async_trait]
pub trait BudgetApi: Send + Sync {
    async fn profile_by_id(&self, profile_id: &EntityId) -> Result<Profile>;

    async fn all_profiles(&self) -> Result<Vec<Profile>>;

    async fn scenarios_for_profile(&self, profile_id: &EntityId) -> Result<Vec<Scenario>>;

    /// Events of one scenario paired with their occurrence dates inside the month.
    async fn events_for_month(&self, query: &MonthQuery) -> Result<Vec<OccurrenceEntry>>;

    /// Every event of the profile (optionally narrowed to a scenario), without dates.
    async fn all_events(
        &self,
        profile_id: &EntityId,
        scenario_id: Option<&EntityId>,
    ) -> Result<Vec<RecurringEvent>>;
}
