//! Month calendar: grid construction and navigation state.

pub mod controller;
pub mod grid;

pub use controller::CalendarController;
pub use grid::{CalendarDay, CalendarGridBuilder, DayTotals, DisplayEvent};
