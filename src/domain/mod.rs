//! Wire-level domain types shared by the stores, the API client and the grid.

pub mod category;
pub mod common;
pub mod event;
pub mod occurrence;
pub mod profile;

pub use category::EventCategory;
pub use common::{find_by_id, EntityId, Identifiable, NamedEntity};
pub use event::{EventType, Frequency, RecurringEvent};
pub use occurrence::{DateValue, OccurrenceEntry, Occurrences};
pub use profile::{Profile, Scenario};
