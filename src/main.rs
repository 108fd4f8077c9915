//! payroll-engine entry point.
//!
//! `run` computes one allocation and writes the artifacts; `serve` loads the
//! sources once and answers allocation requests over HTTP.

use std::net::SocketAddr;
use std::path::PathBuf;

use anyhow::Context;
use chrono::{Local, NaiveDate};
use clap::{Args, Parser, Subcommand};
use rust_decimal::Decimal;
use tracing::info;

use payroll_engine::api::{AppState, create_router};
use payroll_engine::calculation::Budget;
use payroll_engine::config::ConfigLoader;
use payroll_engine::models::SourceTables;
use payroll_engine::pipeline::{Pipeline, PipelineParams};
use payroll_engine::sources::{ArtifactWriter, SourceLoader};

#[derive(Parser)]
#[command(name = "payroll-engine", version, about = "Compensation model and budget-capped raise allocation")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Run one allocation and write the enriched tables
    Run(RunArgs),
    /// Serve allocations over HTTP
    Serve(ServeArgs),
}

#[derive(Args)]
struct SourceArgs {
    /// Directory holding the source tables
    #[arg(long, env = "PAYROLL_DATA_DIR", default_value = "data")]
    data_dir: PathBuf,

    /// YAML configuration file
    #[arg(long, env = "PAYROLL_CONFIG")]
    config: Option<PathBuf>,
}

#[derive(Args)]
struct RunArgs {
    #[command(flatten)]
    sources: SourceArgs,

    /// Directory for the output artifacts
    #[arg(long, default_value = "output")]
    output_dir: PathBuf,

    /// Budget ceiling for all raises [default: configured budget]
    #[arg(long, allow_negative_numbers = true)]
    limit: Option<Decimal>,

    /// Date used for tenure and raise cooldown, YYYY-MM-DD [default: today]
    #[arg(long)]
    today: Option<NaiveDate>,
}

#[derive(Args)]
struct ServeArgs {
    #[command(flatten)]
    sources: SourceArgs,

    /// Address to listen on
    #[arg(long, env = "PAYROLL_ADDR", default_value = "127.0.0.1:8080")]
    addr: SocketAddr,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing();

    let cli = Cli::parse();
    match cli.command {
        Command::Run(args) => run(args),
        Command::Serve(args) => serve(args).await,
    }
}

fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()),
        )
        .init();
}

fn load(args: &SourceArgs) -> anyhow::Result<(ConfigLoader, SourceTables)> {
    let config = match &args.config {
        Some(path) => ConfigLoader::load(path)?,
        None => ConfigLoader::default(),
    };
    let sources = SourceLoader::new(&args.data_dir, &config.config().sources)
        .load()
        .with_context(|| format!("loading sources from {}", args.data_dir.display()))?;
    Ok((config, sources))
}

fn run(args: RunArgs) -> anyhow::Result<()> {
    let (config, sources) = load(&args.sources)?;

    let budget = Budget::new(args.limit.unwrap_or(config.config().budget))?;
    let today = args.today.unwrap_or_else(|| Local::now().date_naive());
    let params = PipelineParams::from_config(&config, &sources, budget, today);

    let output = Pipeline::run(&sources, &params)?;
    let written = ArtifactWriter::new(&args.output_dir).write(&output)?;
    info!(
        employees = %written.employees.display(),
        vacancies = %written.vacancies.display(),
        "Enriched tables written"
    );

    println!("Employees processed: {}", output.outcome.employees.len());
    println!("Vacancies separated: {}", output.vacancies.len());
    println!("Unused limit: {:.2}", output.outcome.leftover);

    Ok(())
}

async fn serve(args: ServeArgs) -> anyhow::Result<()> {
    let (config, sources) = load(&args.sources)?;
    let app = create_router(AppState::new(config, sources));

    info!("payroll-engine listening on http://{}", args.addr);

    axum::serve(tokio::net::TcpListener::bind(args.addr).await?, app)
        .await
        .context("server crashed")?;

    Ok(())
}
