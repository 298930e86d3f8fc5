//! Command-line interface for planning drone delivery fleets.
//!
//! `skyroute plan <input.txt>` reads delivery coordinates, plans routes for
//! every fleet size from one drone up to `--max-drones`, prints a summary of
//! each plan and exports one route file per drone.
#![forbid(unsafe_code)]

mod error;
mod estimate;
mod export;
mod input;
mod plan;

use clap::{Parser, Subcommand};

pub use error::CliError;
pub use export::ExportError;
pub use input::{InputError, MAX_POINTS};

use plan::{PlanArgs, run_plan};

pub(crate) const ARG_INPUT: &str = "input";
pub(crate) const ARG_OUTPUT_DIR: &str = "output-dir";
pub(crate) const ARG_RESTARTS: &str = "restarts";
pub(crate) const ARG_SEARCH_SECONDS: &str = "search-seconds";
pub(crate) const ARG_SKIP_CHANCE: &str = "skip-chance";
pub(crate) const ARG_MAX_DRONES: &str = "max-drones";
pub(crate) const ARG_SEED: &str = "seed";
pub(crate) const ARG_DRONES: &str = "drones";
pub(crate) const ARG_FORMAT: &str = "format";
pub(crate) const ENV_INPUT: &str = "SKYROUTE_CMDS_PLAN_INPUT";

/// Run the Skyroute CLI with the current process arguments and environment.
pub fn run() -> Result<(), CliError> {
    let cli = Cli::try_parse().map_err(CliError::ArgumentParsing)?;
    match cli.command {
        Command::Plan(args) => run_plan(args),
    }
}

#[derive(Debug, Parser)]
#[command(
    name = "skyroute",
    about = "Plan delivery routes for a small fleet of drones",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Cluster deliveries and plan routes for every fleet size.
    Plan(PlanArgs),
}

#[cfg(test)]
mod tests;
