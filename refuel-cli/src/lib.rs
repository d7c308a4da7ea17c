//! Command-line interface for the refuel planner.
//!
//! `refuel plan` prints a JSON `PlanOutcome`; `refuel cheapest` prints the
//! cheapest stations along the route. Both read their inputs from files
//! named by flags, configuration files or `REFUEL_CMDS_*` environment
//! variables.
#![forbid(unsafe_code)]

mod cheapest;
mod error;
mod inputs;
mod logging;
mod plan;

use std::io::Write;

use clap::{ArgAction, Parser, Subcommand};
use serde::Serialize;

pub use error::CliError;

use cheapest::{CheapestArgs, run_cheapest_with};
use plan::{PlanArgs, run_plan_with};

const ARG_REQUEST: &str = "request";
const ARG_ROUTE: &str = "route";
const ARG_STATIONS: &str = "stations";
const ARG_FUEL_TYPE: &str = "fuel-type";
const ARG_TANK_CAPACITY: &str = "tank-capacity";
const ARG_CONSUMPTION: &str = "consumption";
const ARG_CURRENT_FUEL: &str = "current-fuel";
const ARG_DESIRED_FUEL: &str = "desired-fuel";
const ARG_SEARCH_RADIUS: &str = "search-radius";
const ARG_INCLUDE_RESTRICTED: &str = "include-restricted";
const ARG_STRATEGY: &str = "strategy";
const ARG_TIE_BREAK: &str = "tie-break";
const ARG_LIMIT: &str = "limit";
const ENV_PLAN_ROUTE: &str = "REFUEL_CMDS_PLAN_ROUTE";
const ENV_PLAN_STATIONS: &str = "REFUEL_CMDS_PLAN_STATIONS";
const ENV_CHEAPEST_ROUTE: &str = "REFUEL_CMDS_CHEAPEST_ROUTE";
const ENV_CHEAPEST_STATIONS: &str = "REFUEL_CMDS_CHEAPEST_STATIONS";

/// Run the refuel CLI with the current process arguments and environment.
///
/// # Errors
/// Returns a [`CliError`] when arguments, configuration or inputs are
/// invalid, or when planning fails.
pub fn run() -> Result<(), CliError> {
    let cli = Cli::try_parse().map_err(CliError::ArgumentParsing)?;
    logging::init_logging(cli.verbose)?;
    let mut stdout = std::io::stdout().lock();
    dispatch(cli.command, &mut stdout)
}

fn dispatch(command: Command, writer: &mut dyn Write) -> Result<(), CliError> {
    match command {
        Command::Plan(args) => run_plan_with(args, writer),
        Command::Cheapest(args) => run_cheapest_with(args, writer),
    }
}

#[derive(Debug, Parser)]
#[command(
    name = "refuel",
    about = "Plan where to refuel along a driving route",
    version
)]
struct Cli {
    /// Log more detail to stderr; repeat for debug output.
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Plan refuelling stops along a route.
    Plan(PlanArgs),
    /// List the cheapest stations along a route.
    Cheapest(CheapestArgs),
}

fn write_json<T: Serialize + ?Sized>(writer: &mut dyn Write, value: &T) -> Result<(), CliError> {
    let payload = serde_json::to_string_pretty(value).map_err(CliError::SerialiseOutput)?;
    writer
        .write_all(payload.as_bytes())
        .map_err(CliError::WriteOutput)?;
    writer.write_all(b"\n").map_err(CliError::WriteOutput)?;
    Ok(())
}

#[cfg(test)]
mod tests;
