use std::path::PathBuf;

use anyhow::Context;
use clap::{Args, Parser, Subcommand, ValueEnum};
use serde::Serialize;
use tracing::{info, warn};

use adtlab_config::AdtlabConfig;
use adtlab_engine::{Scenario, Session, Structure};
use adtlab_records::MemoryStore;
use adtlab_simulator::hash_key;
use adtlab_telemetry::{EventLogger, MetricsRecorder};

#[derive(Parser, Debug)]
#[command(version, about)]
pub struct Cli {
    /// Print the Prometheus exposition after the command
    #[arg(long, global = true)]
    pub metrics: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Replay a scenario file and print the per-step report
    Simulate(SimulateArgs),
    /// Print the render model of one structure after initialization
    Render(RenderArgs),
    /// Show which bucket a key hashes to
    Hash(HashArgs),
    /// Load, validate and print the effective configuration
    CheckConfig(CheckConfigArgs),
}

#[derive(Args, Debug, Clone)]
pub struct SimulateArgs {
    #[arg(short, long)]
    pub scenario: PathBuf,
    /// Dataset file; overrides `records.dataset`
    #[arg(short, long)]
    pub dataset: Option<PathBuf>,
    #[arg(long)]
    pub validate_hash: Option<String>,
}

#[derive(Args, Debug, Clone)]
pub struct RenderArgs {
    #[arg(value_enum)]
    pub structure: StructureArg,
    #[arg(short, long)]
    pub dataset: Option<PathBuf>,
}

#[derive(Args, Debug, Clone)]
pub struct HashArgs {
    pub key: String,
    #[arg(long, default_value_t = 10, value_parser = clap::value_parser!(u64).range(5..=15))]
    pub buckets: u64,
}

#[derive(Args, Debug, Clone)]
pub struct CheckConfigArgs {
    /// Configuration file; the default search path is used when omitted
    #[arg(short, long)]
    pub path: Option<PathBuf>,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum StructureArg {
    Tree,
    List,
    Stack,
    Queue,
    HashTable,
}

impl From<StructureArg> for Structure {
    fn from(arg: StructureArg) -> Self {
        match arg {
            StructureArg::Tree => Structure::Tree,
            StructureArg::List => Structure::List,
            StructureArg::Stack => Structure::Stack,
            StructureArg::Queue => Structure::Queue,
            StructureArg::HashTable => Structure::HashTable,
        }
    }
}

#[derive(Serialize)]
struct HashReport<'a> {
    key: &'a str,
    char_sum: u64,
    bucket_count: u64,
    bucket: usize,
}

pub async fn run_command(cli: Cli) -> anyhow::Result<()> {
    let config = match &cli.command {
        Commands::CheckConfig(args) => match &args.path {
            Some(path) => AdtlabConfig::load_from_path(path),
            None => AdtlabConfig::load(),
        },
        _ => AdtlabConfig::load(),
    }
    .context("loading configuration")?;
    EventLogger::init(&config.telemetry.log_level);

    let metrics = match cli.command {
        Commands::Simulate(args) => run_simulation(args, config.clone()).await?,
        Commands::Render(args) => run_render(args, config.clone()).await?,
        Commands::Hash(args) => {
            run_hash(&args)?;
            None
        }
        Commands::CheckConfig(_) => {
            print_json(&config)?;
            None
        }
    };

    if cli.metrics {
        match metrics {
            Some(_) if !config.telemetry.metrics => {
                warn!("metrics are disabled by telemetry.metrics")
            }
            Some(metrics) => println!("{}", metrics.gather_metrics()?),
            None => warn!("this command records no metrics"),
        }
    }
    Ok(())
}

async fn build_session(
    mut config: AdtlabConfig,
    dataset: Option<PathBuf>,
    seed: Option<u64>,
) -> anyhow::Result<Session> {
    if dataset.is_some() {
        config.records.dataset = dataset;
    }
    if let Some(seed) = seed {
        config.records.shuffle_seed = seed;
    }
    let store = MemoryStore::from_config(&config.records)
        .await
        .context("loading records")?;
    Ok(Session::initialize(&config, &store).await?)
}

async fn run_simulation(
    args: SimulateArgs,
    config: AdtlabConfig,
) -> anyhow::Result<Option<MetricsRecorder>> {
    let scenario = Scenario::load(&args.scenario)
        .await
        .with_context(|| format!("reading scenario {}", args.scenario.display()))?;
    info!(
        "Replaying scenario {} ({} steps)",
        args.scenario.display(),
        scenario.steps.len()
    );

    let mut session = build_session(config, args.dataset, scenario.seed).await?;
    let report = session.run(&scenario)?;
    print_json(&report)?;

    if let Some(expected) = args.validate_hash.as_deref() {
        report.validate_hash(expected)?;
    }
    Ok(Some(session.metrics().clone()))
}

async fn run_render(
    args: RenderArgs,
    config: AdtlabConfig,
) -> anyhow::Result<Option<MetricsRecorder>> {
    let session = build_session(config, args.dataset, None).await?;
    print_json(&session.render(args.structure.into()))?;
    Ok(Some(session.metrics().clone()))
}

fn run_hash(args: &HashArgs) -> anyhow::Result<()> {
    print_json(&HashReport {
        key: &args.key,
        char_sum: args.key.chars().map(|c| c as u64).sum(),
        bucket_count: args.buckets,
        bucket: hash_key(&args.key, args.buckets as usize),
    })
}

fn print_json<T: Serialize>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_render_structure_names() {
        let cli = Cli::try_parse_from(["adtlab", "render", "hash-table"]).unwrap();
        match cli.command {
            Commands::Render(args) => {
                assert_eq!(Structure::from(args.structure), Structure::HashTable)
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn bucket_count_is_range_checked() {
        assert!(Cli::try_parse_from(["adtlab", "hash", "ab", "--buckets", "4"]).is_err());
        let cli = Cli::try_parse_from(["adtlab", "hash", "ab", "--buckets", "15"]).unwrap();
        assert!(matches!(cli.command, Commands::Hash(HashArgs { buckets: 15, .. })));
    }

    #[test]
    fn metrics_flag_is_global() {
        let cli = Cli::try_parse_from([
            "adtlab",
            "simulate",
            "--scenario",
            "demo.yaml",
            "--metrics",
            "--validate-hash",
            "abc",
        ])
        .unwrap();
        assert!(cli.metrics);
        match cli.command {
            Commands::Simulate(args) => {
                assert_eq!(args.scenario, PathBuf::from("demo.yaml"));
                assert_eq!(args.validate_hash.as_deref(), Some("abc"));
                assert!(args.dataset.is_none());
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }
}
