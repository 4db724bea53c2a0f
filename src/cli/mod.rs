pub mod output;
pub mod render;

use std::path::PathBuf;

use chrono::{Datelike, NaiveDate};
use clap::{Parser, Subcommand};

use crate::api::{BudgetApi, HttpBudgetApi, OfflineBudgetApi};
use crate::calendar::CalendarController;
use crate::config::{ClientConfig, ConfigManager};
use crate::core::time::SystemClock;
use crate::domain::{EntityId, NamedEntity};
use crate::errors::{BudgetError, Result};
use crate::utils::build_info;
use crate::utils::dates::{first_day_of_month, last_day_of_month};
use crate::utils::format::AmountTone;

#[derive(Parser)]
#[command(name = "budgeteer_cli")]
#[command(about = "Project recurring budget events onto a month calendar")]
pub struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the month grid, its events and totals
    Calendar {
        /// Profile to load
        #[arg(short, long)]
        profile: String,

        /// Scenario to show instead of the profile's default
        #[arg(short, long)]
        scenario: Option<String>,

        /// Month to show (YYYY-MM); defaults to the current month
        #[arg(short, long)]
        month: Option<String>,

        /// Read `[{event, occurrences}]` JSON from this file instead of the API
        #[arg(short, long)]
        file: Option<PathBuf>,
    },
    /// Inspect the client configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
    /// Print build information
    Version,
}

#[derive(Subcommand)]
enum ConfigAction {
    /// Print the resolved configuration and where it is stored
    Show,
}

pub async fn run_cli() -> Result<()> {
    run(Cli::parse()).await
}

pub async fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Commands::Calendar {
            profile,
            scenario,
            month,
            file,
        } => {
            let month = month.as_deref().map(parse_month).transpose()?;
            let request = CalendarRequest {
                profile_id: EntityId::from(profile),
                scenario_id: scenario.map(EntityId::from),
                month,
            };
            match file {
                Some(path) => show_calendar(OfflineBudgetApi::from_path(&path)?, request).await,
                None => {
                    let config = ConfigManager::new()?.load()?.with_env_overrides();
                    show_calendar(HttpBudgetApi::from_config(&config)?, request).await
                }
            }
        }
        Commands::Config {
            action: ConfigAction::Show,
        } => show_config(),
        Commands::Version => {
            output::info(build_info::current());
            Ok(())
        }
    }
}

struct CalendarRequest {
    profile_id: EntityId,
    scenario_id: Option<EntityId>,
    month: Option<NaiveDate>,
}

/// Parses `YYYY-MM` into the first day of that month.
fn parse_month(raw: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(&format!("{}-01", raw.trim()), "%Y-%m-%d")
        .map_err(|_| BudgetError::InvalidInput(format!("month `{raw}` is not in YYYY-MM form")))
}

async fn show_calendar<A: BudgetApi>(api: A, request: CalendarRequest) -> Result<()> {
    let mut calendar = CalendarController::new(api, SystemClock);

    calendar.fetch_profile_info(&request.profile_id).await;
    if let Some(err) = calendar.error() {
        return Err(BudgetError::Api(err.to_string()));
    }
    calendar.fetch_scenarios().await;
    if let Some(err) = calendar.scenarios().error() {
        output::warning(format!("Could not load scenarios: {err}"));
    }
    if let Some(scenario_id) = &request.scenario_id {
        if !calendar.scenarios_mut().select_scenario_by_id(scenario_id) {
            output::warning(format!("Scenario {scenario_id} not found; showing all events"));
        }
    }

    match request.month {
        Some(month) => {
            calendar
                .set_calendar_to_date(month.year(), month.month(), 1)
                .await?
        }
        None => calendar.refresh().await,
    }
    if let Some(err) = calendar.index().error() {
        output::warning(format!("Could not refresh events: {err}"));
    }

    let heading = match calendar.scenarios().selected_scenario() {
        Some(scenario) => format!("{} ({})", calendar.current_month_year(), scenario.name()),
        None => calendar.current_month_year(),
    };
    output::section(heading);
    output::info(render::render_grid(calendar.calendar_days()));

    let current = calendar.current_date();
    let entries = calendar.index().month_entries().to_vec();
    let events = calendar.index_mut().filter_events_by_date_range(
        first_day_of_month(current),
        last_day_of_month(current),
        &entries,
    );
    output::section("Events");
    if events.is_empty() {
        output::info("No events this month.");
    }
    for event in events {
        let tone = AmountTone::for_amount(render::signed_amount(event));
        output::info(output::toned(&render::render_event_line(event), tone));
    }

    output::section("Totals");
    for line in render::render_day_totals(&calendar.day_totals()) {
        output::info(line);
    }
    Ok(())
}

fn show_config() -> Result<()> {
    let manager = ConfigManager::new()?;
    let mut config: ClientConfig = manager.load()?.with_env_overrides();
    if config.token.is_some() {
        config.token = Some("********".into());
    }
    output::info(format!("path: {}", manager.path().display()));
    output::info(serde_json::to_string_pretty(&config)?);
    Ok(())
}
