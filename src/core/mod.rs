//! Stateful stores and the clock they read "today" from.

pub mod services;
pub mod time;
pub mod utils;

pub use time::{Clock, FixedClock, SystemClock};
