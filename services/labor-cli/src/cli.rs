use crate::demo::{run_demo, DemoArgs};
use crate::replay::{run_replay, ReplayArgs};
use clap::{Parser, Subcommand};
use labor_core::config::AppConfig;
use labor_core::error::AppError;
use labor_core::labor::ConflictPolicy;
use labor_core::telemetry;
use tracing::debug;

#[derive(Parser, Debug)]
#[command(
    name = "Employment Lifecycle Engine",
    about = "Drive employment lifecycles against in-memory adapters from the command line",
    version
)]
struct Cli {
    /// Override LABOR_CONFLICT_POLICY (any_overlap | same_enterprise_and_type)
    #[arg(long, global = true, value_parser = crate::infra::parse_conflict_policy)]
    conflict_policy: Option<ConflictPolicy>,
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Narrated hire, onboard, overlap check, leave, and terminate (default command)
    Demo(DemoArgs),
    /// Apply a JSON script of lifecycle commands and print chains and events
    Replay(ReplayArgs),
}

pub(crate) fn run() -> Result<(), AppError> {
    let cli = Cli::parse();
    let mut config = AppConfig::load()?;
    if let Some(policy) = cli.conflict_policy {
        config.labor.conflict_policy = policy;
    }

    telemetry::init(&config.telemetry)?;
    debug!(
        ?config.environment,
        conflict_policy = config.labor.conflict_policy.label(),
        "labor cli configured"
    );

    let command = cli
        .command
        .unwrap_or_else(|| Command::Demo(DemoArgs::default()));

    match command {
        Command::Demo(args) => run_demo(args, &config),
        Command::Replay(args) => run_replay(args, &config),
    }
}
