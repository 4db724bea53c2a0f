pub mod occurrence_index;
pub mod profile_service;
pub mod scenario_service;

pub use occurrence_index::{DatedEvent, EventOccurrenceIndex};
pub use profile_service::ProfileStore;
pub use scenario_service::ScenarioStore;
