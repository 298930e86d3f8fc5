//! Error types emitted by the Skyroute CLI.
//!
//! Keep this error type reasonably small, as many CLI helpers return
//! `Result<_, CliError>` and the workspace enables `clippy::result_large_err`.

use std::sync::Arc;

use skyroute_solver::{PlanError, PlannerConfigError, RouteSearchError};
use thiserror::Error;

use crate::{ExportError, InputError};

/// Errors emitted by the Skyroute CLI.
#[derive(Debug, Error)]
pub enum CliError {
    /// Provided arguments failed Clap validation.
    #[error(transparent)]
    ArgumentParsing(#[from] clap::Error),
    /// Configuration layering failed (files, env, CLI).
    #[error("failed to load configuration: {0}")]
    Configuration(#[from] Arc<ortho_config::OrthoError>),
    /// A required option is missing after configuration merging.
    #[error("missing {field} (set --{field} or {env})")]
    MissingArgument {
        field: &'static str,
        env: &'static str,
    },
    /// An option holds a value outside its accepted range.
    #[error("invalid --{field}: {reason}")]
    InvalidOption { field: &'static str, reason: String },
    /// The skip chance was not a probability.
    #[error(transparent)]
    SkipChance(#[from] RouteSearchError),
    /// The merged planner settings were rejected.
    #[error("invalid planner configuration: {0}")]
    Planner(#[from] PlannerConfigError),
    /// The delivery file could not be loaded.
    #[error(transparent)]
    Input(#[from] InputError),
    /// Writing route files failed.
    #[error(transparent)]
    Export(#[from] ExportError),
    /// Seeding from operating-system entropy failed.
    #[error("failed to seed the random number generator: {0}")]
    RandomSource(#[source] rand::Error),
    /// No fleet size produced a plan.
    #[error("no fleet size could be planned: {0}")]
    NoPlans(#[source] PlanError),
    /// Serializing plans as JSON failed.
    #[error("failed to serialize plans: {0}")]
    SerializePlans(#[source] serde_json::Error),
    /// Writing command output failed.
    #[error("failed to write plan output: {0}")]
    WriteOutput(#[source] std::io::Error),
}
