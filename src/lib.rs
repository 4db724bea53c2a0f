#![doc(test(attr(deny(warnings))))]

//! Budgeteer Core projects a profile's recurring income, bills and loan
//! payments onto a month calendar and derives the cash-flow figures shown
//! next to it.

pub mod api;
pub mod calendar;
pub mod cli;
pub mod config;
pub mod core;
pub mod domain;
pub mod errors;
pub mod utils;

use std::sync::Once;

static INIT_TRACING: Once = Once::new();

/// Initializes global tracing and emits a startup info log.
pub fn init() {
    INIT_TRACING.call_once(|| {
        utils::init_tracing();
        tracing::info!("Budgeteer Core tracing initialized.");
    });
}
