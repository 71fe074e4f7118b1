use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

const HELP_TEMPLATE: &str = "\
{before-help}{name} {version}
{author-with-newline}{about-with-newline}
{usage-heading} {usage}

{all-args}{after-help}
";

#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "FieldBilliard CLI - simulate charged billiards confined by static boundary fields.",
    help_template = HELP_TEMPLATE,
)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Increase verbosity level (-v for INFO, -vv for DEBUG, -vvv for TRACE)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all log output except for errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Write logs to a specified file in addition to the console output
    #[arg(long, global = true, value_name = "PATH")]
    pub log_file: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run a simulation scenario and write the recorded trajectory to CSV.
    Run(RunArgs),
    /// List the available integrator presets.
    Integrators(IntegratorsArgs),
}

/// Arguments for the `run` subcommand.
#[derive(Args, Debug, Clone)]
pub struct RunArgs {
    /// Path to the scenario file in TOML format.
    #[arg(short, long, required = true, value_name = "PATH")]
    pub config: PathBuf,

    /// Path for the trajectory CSV (columns: frame, particle, x, y).
    #[arg(short, long, required = true, value_name = "PATH")]
    pub output: PathBuf,

    /// Also write the recorded energy samples to this CSV file.
    #[arg(short, long, value_name = "PATH")]
    pub energy_output: Option<PathBuf>,

    /// Override the integrator preset (see `fieldbilliard integrators`).
    #[arg(short, long, value_name = "NAME")]
    pub integrator: Option<String>,

    /// Override the time step.
    #[arg(long, value_name = "FLOAT")]
    pub dt: Option<f64>,

    /// Override the number of steps.
    #[arg(short = 'n', long, value_name = "INT")]
    pub steps: Option<usize>,

    /// Override how many steps pass between recorded frames.
    #[arg(long, value_name = "INT")]
    pub record_every: Option<usize>,

    /// Override the number of frames kept in memory.
    #[arg(long, value_name = "INT")]
    pub memory: Option<usize>,

    /// Do not draw a progress bar.
    #[arg(long)]
    pub no_progress: bool,

    /// Set a specific configuration value, overriding the scenario file.
    /// Can be used multiple times. Example: -S run.dt=0.005
    #[arg(short = 'S', long = "set", value_name = "KEY=VALUE", num_args(0..))]
    pub set_values: Vec<String>,
}

/// Arguments for the `integrators` subcommand.
#[derive(Args, Debug, Clone)]
pub struct IntegratorsArgs {
    /// Include the legacy alias spellings accepted by `--integrator`.
    #[arg(long)]
    pub aliases: bool,
}
