//! Plan command implementation for the Skyroute CLI.

use std::io::Write;
use std::time::Duration;

use camino::Utf8PathBuf;
use chrono::Local;
use clap::{Parser, ValueEnum};
use log::{info, warn};
use ortho_config::{OrthoConfig, SubcmdConfigMerge};
use rand::SeedableRng;
use rand::rngs::OsRng;
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};
use skyroute_core::{MAX_DRONES, PointSet, Solution};
use skyroute_solver::{
    ClusterConfig, FleetPlan, Planner, PlannerConfig, RouteSearchConfig, SkipChance,
};

use crate::estimate::{completion_time, estimate_line};
use crate::export::{root_name, write_solution};
use crate::input::load_points;
use crate::{
    ARG_DRONES, ARG_FORMAT, ARG_INPUT, ARG_MAX_DRONES, ARG_OUTPUT_DIR, ARG_RESTARTS,
    ARG_SEARCH_SECONDS, ARG_SEED, ARG_SKIP_CHANCE, CliError, ENV_INPUT,
};

const DEFAULT_SEARCH_SECONDS: f64 = 1.0;

/// How plans are written to standard output.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub(crate) enum OutputFormat {
    /// Human-readable summary per fleet size.
    #[default]
    Text,
    /// JSON array of plans.
    Json,
}

/// CLI arguments for the `plan` subcommand.
#[derive(Debug, Clone, Parser, Deserialize, Serialize, OrthoConfig, Default)]
#[command(
    long_about = "Read delivery coordinates from a .txt file, cluster them \
                 around one launch pad per drone and search each cluster \
                 for a short closed route. Every fleet size from one drone \
                 up to --max-drones is planned, summarised and exported.",
    about = "Plan drone routes for every fleet size"
)]
#[ortho_config(prefix = "SKYROUTE")]
pub(crate) struct PlanArgs {
    /// Path to a .txt file with one `x y` pair per line.
    #[arg(value_name = "path")]
    #[serde(default)]
    pub(crate) input: Option<Utf8PathBuf>,
    /// Directory receiving the exported route files.
    #[arg(long = ARG_OUTPUT_DIR, value_name = "dir")]
    #[serde(default)]
    pub(crate) output_dir: Option<Utf8PathBuf>,
    /// Clustering trials per fleet size.
    #[arg(long = ARG_RESTARTS, value_name = "count")]
    #[serde(default)]
    pub(crate) restarts: Option<usize>,
    /// Route search budget per drone, in seconds.
    #[arg(long = ARG_SEARCH_SECONDS, value_name = "seconds")]
    #[serde(default)]
    pub(crate) search_seconds: Option<f64>,
    /// Probability of ignoring a closer stop while building a route.
    #[arg(long = ARG_SKIP_CHANCE, value_name = "probability")]
    #[serde(default)]
    pub(crate) skip_chance: Option<f64>,
    /// Largest fleet size to plan for (1 to 4).
    #[arg(long = ARG_MAX_DRONES, value_name = "count")]
    #[serde(default)]
    pub(crate) max_drones: Option<u8>,
    /// Seed for a reproducible run.
    #[arg(long = ARG_SEED, value_name = "seed")]
    #[serde(default)]
    pub(crate) seed: Option<u64>,
    /// Export only the plan for this fleet size.
    #[arg(long = ARG_DRONES, value_name = "count")]
    #[serde(default)]
    pub(crate) drones: Option<u8>,
    /// Output format for the plan summaries.
    #[arg(long = ARG_FORMAT, value_enum, value_name = "format")]
    #[serde(default)]
    pub(crate) format: Option<OutputFormat>,
}

impl PlanArgs {
    pub(crate) fn into_config(self) -> Result<PlanConfig, CliError> {
        let merged = self.load_and_merge().map_err(CliError::Configuration)?;
        PlanConfig::try_from(merged)
    }
}

/// Resolved `plan` command configuration.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct PlanConfig {
    /// Delivery file.
    pub(crate) input: Utf8PathBuf,
    /// Root of the exported fleet directories.
    pub(crate) output_dir: Utf8PathBuf,
    /// Validated planner settings.
    pub(crate) planner: PlannerConfig,
    /// Fixed seed, or `None` to draw from operating-system entropy.
    pub(crate) seed: Option<u64>,
    /// Fleet size to export, or `None` for all.
    pub(crate) export_drones: Option<u8>,
    /// Output format.
    pub(crate) format: OutputFormat,
}

impl PlanConfig {
    fn rng(&self) -> Result<ChaCha8Rng, CliError> {
        match self.seed {
            Some(seed) => {
                info!("using seed {seed}");
                Ok(ChaCha8Rng::seed_from_u64(seed))
            }
            None => ChaCha8Rng::from_rng(OsRng).map_err(CliError::RandomSource),
        }
    }

    fn exports(&self, drones: u8) -> bool {
        self.export_drones.is_none_or(|only| only == drones)
    }
}

impl TryFrom<PlanArgs> for PlanConfig {
    type Error = CliError;

    fn try_from(args: PlanArgs) -> Result<Self, Self::Error> {
        let input = args.input.ok_or(CliError::MissingArgument {
            field: ARG_INPUT,
            env: ENV_INPUT,
        })?;

        let seconds = args.search_seconds.unwrap_or(DEFAULT_SEARCH_SECONDS);
        let duration = Duration::try_from_secs_f64(seconds)
            .ok()
            .filter(|duration| !duration.is_zero())
            .ok_or_else(|| CliError::InvalidOption {
                field: ARG_SEARCH_SECONDS,
                reason: format!("expected a positive number of seconds, got {seconds}"),
            })?;
        let skip_chance = args
            .skip_chance
            .map_or(Ok(SkipChance::default()), SkipChance::new)?;

        let defaults = PlannerConfig::default();
        let planner = PlannerConfig {
            restarts: args.restarts.unwrap_or(defaults.restarts),
            max_drones: args.max_drones.unwrap_or(defaults.max_drones),
            cluster: ClusterConfig::default(),
            route_search: RouteSearchConfig {
                duration,
                skip_chance,
            },
        };
        planner.validate()?;

        if let Some(drones) = args.drones
            && (drones == 0 || drones > planner.max_drones)
        {
            let reason = if planner.max_drones < MAX_DRONES {
                format!(
                    "expected 1 to {} (limited by --{ARG_MAX_DRONES}), got {drones}",
                    planner.max_drones
                )
            } else {
                format!("expected 1 to {}, got {drones}", planner.max_drones)
            };
            return Err(CliError::InvalidOption {
                field: ARG_DRONES,
                reason,
            });
        }

        Ok(Self {
            input,
            output_dir: args.output_dir.unwrap_or_else(|| Utf8PathBuf::from(".")),
            planner,
            seed: args.seed,
            export_drones: args.drones,
            format: args.format.unwrap_or_default(),
        })
    }
}

pub(super) fn run_plan(args: PlanArgs) -> Result<(), CliError> {
    let mut stdout = std::io::stdout().lock();
    run_plan_with(args, &mut stdout)
}

pub(super) fn run_plan_with(args: PlanArgs, writer: &mut dyn Write) -> Result<(), CliError> {
    let config = args.into_config()?;
    execute_plan(&config, writer)
}

pub(super) fn execute_plan(config: &PlanConfig, writer: &mut dyn Write) -> Result<(), CliError> {
    let points = load_points(&config.input)?;
    let planner = Planner::new(config.planner)?;

    if config.format == OutputFormat::Text {
        let ready_at = completion_time(
            Local::now().time(),
            planner.fleet_sizes(points.len()),
            config.planner.route_search.duration,
        );
        writeln!(writer, "{}", estimate_line(points.len(), ready_at))
            .map_err(CliError::WriteOutput)?;
    }

    let mut rng = config.rng()?;
    let plans = collect_plans(&planner, &points, &mut rng)?;

    let root = root_name(&config.input);
    for plan in plans.iter().filter(|plan| config.exports(plan.drones())) {
        let written = write_solution(&config.output_dir, root, plan.solution())?;
        info!(
            "exported {} route file(s) for {} drone(s)",
            written.len(),
            plan.drones()
        );
    }

    match config.format {
        OutputFormat::Text => write_summaries(writer, &plans),
        OutputFormat::Json => write_json(writer, &plans),
    }
}

fn collect_plans(
    planner: &Planner,
    points: &PointSet,
    rng: &mut ChaCha8Rng,
) -> Result<Vec<FleetPlan>, CliError> {
    let mut plans = Vec::new();
    let mut first_error = None;
    for (drones, outcome) in planner.fleet_sizes(points.len()).zip(planner.plan(points, rng)) {
        match outcome {
            Ok(plan) => plans.push(plan),
            Err(err) => {
                warn!("no plan for {drones} drone(s): {err}");
                first_error.get_or_insert(err);
            }
        }
    }
    match first_error {
        Some(err) if plans.is_empty() => Err(CliError::NoPlans(err)),
        _ => Ok(plans),
    }
}

fn write_summaries(writer: &mut dyn Write, plans: &[FleetPlan]) -> Result<(), CliError> {
    for plan in plans {
        write!(writer, "{}", plan.solution()).map_err(CliError::WriteOutput)?;
    }
    Ok(())
}

#[derive(Debug, Serialize)]
struct PlanReport<'a> {
    drones: u8,
    sse: f64,
    solution: &'a Solution,
}

fn write_json(writer: &mut dyn Write, plans: &[FleetPlan]) -> Result<(), CliError> {
    let reports: Vec<PlanReport<'_>> = plans
        .iter()
        .map(|plan| PlanReport {
            drones: plan.drones(),
            sse: plan.clustering().sse(),
            solution: plan.solution(),
        })
        .collect();
    let payload = serde_json::to_string_pretty(&reports).map_err(CliError::SerializePlans)?;
    writer
        .write_all(payload.as_bytes())
        .map_err(CliError::WriteOutput)?;
    writer.write_all(b"\n").map_err(CliError::WriteOutput)?;
    Ok(())
}

#[cfg(test)]
pub(crate) fn config_from_layers_for_test(
    layers: Vec<ortho_config::MergeLayer<'static>>,
) -> Result<PlanConfig, CliError> {
    let merged = PlanArgs::merge_from_layers(layers).map_err(CliError::from)?;
    PlanConfig::try_from(merged)
}
