//! `argmap`: run adaptive argument extraction over one article.
//!
//! Reads article text from a file or stdin, runs the requested modes for
//! each model in turn and prints a single JSON report on stdout. Logs go to
//! stderr.

mod config;
mod report;

use std::io::Read;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{bail, Context, Result};
use clap::{Parser, ValueEnum};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use argument_extraction::{
    DecisionLog, OpenAICompatEngine, Orchestrator, OrchestratorConfig, StrategyName,
};
use openai_client::OpenAIClient;

use crate::config::{parse_models, Config};
use crate::report::{ModelRun, Report};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Mode {
    /// Select, extract, validate, retry
    Adaptive,
    /// Fixed strategy subset merged with set semantics
    Aggregate,
    /// Every strategy once, for comparison
    Sweep,
    /// Adaptive then aggregate
    All,
}

impl Mode {
    fn as_str(&self) -> &'static str {
        match self {
            Mode::Adaptive => "adaptive",
            Mode::Aggregate => "aggregate",
            Mode::Sweep => "sweep",
            Mode::All => "all",
        }
    }
}

#[derive(Debug, Parser)]
#[command(name = "argmap", version, about = "Extract argument maps from article text")]
struct Cli {
    /// Article file; reads stdin when omitted
    input: Option<PathBuf>,

    /// Which orchestrator mode to run
    #[arg(long, value_enum, default_value_t = Mode::Adaptive)]
    mode: Mode,

    /// Title prepended to the article text
    #[arg(long)]
    title: Option<String>,

    /// Identifier recorded in decision log entries
    #[arg(long, default_value = "article")]
    source_id: String,

    /// Comma-separated models (overrides ARGMAP_MODELS)
    #[arg(long)]
    models: Option<String>,

    /// Comma-separated strategies for aggregate mode
    #[arg(long, value_delimiter = ',')]
    strategies: Vec<StrategyName>,

    /// Attempt budget for adaptive mode (overrides ARGMAP_MAX_RETRIES)
    #[arg(long)]
    max_retries: Option<u32>,

    /// Pause between engine-heavy runs in milliseconds (overrides ARGMAP_CALL_DELAY_MS)
    #[arg(long)]
    delay_ms: Option<u64>,

    /// Endpoint of the OpenAI-compatible server (overrides OPENAI_BASE_URL)
    #[arg(long)]
    base_url: Option<String>,

    /// Include a decision-log summary in the report
    #[arg(long)]
    summary: bool,

    /// Pretty-print the JSON report
    #[arg(long)]
    pretty: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging; stdout is reserved for the report
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,argument_extraction=debug".into()),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(true),
        )
        .init();

    let cli = Cli::parse();
    let config = apply_overrides(Config::from_env()?, &cli);

    let text = compose_text(cli.title.as_deref(), &read_input(cli.input.as_ref())?);
    if text.trim().is_empty() {
        bail!("article text is empty");
    }

    let mut client = OpenAIClient::new(&config.base_url);
    if let Some(key) = &config.api_key {
        client = client.with_api_key(key);
    }
    let engine = Arc::new(OpenAICompatEngine::new(client));

    let orchestrator_config = orchestrator_config(&config, &cli);

    tracing::info!(
        mode = cli.mode.as_str(),
        models = ?config.models,
        base_url = %config.base_url,
        chars = text.chars().count(),
        "Starting extraction"
    );

    let mut runs = Vec::with_capacity(config.models.len());
    let mut decision_log = DecisionLog::new();
    let mut first_run = true;

    for model in &config.models {
        let orchestrator =
            Orchestrator::with_config(engine.clone(), model.clone(), orchestrator_config.clone());
        let mut run = ModelRun::new(model.clone());

        if matches!(cli.mode, Mode::Adaptive | Mode::All) {
            pause(&config, &mut first_run).await;
            let outcome = orchestrator.process(&text, &cli.source_id).await;
            decision_log.extend(outcome.decisions.clone());
            run.adaptive = Some(outcome);
        }

        if matches!(cli.mode, Mode::Aggregate | Mode::All) {
            pause(&config, &mut first_run).await;
            run.aggregate = Some(orchestrator.process_multi(&text, &cli.source_id).await);
        }

        if cli.mode == Mode::Sweep {
            pause(&config, &mut first_run).await;
            run.sweep = Some(orchestrator.sweep(&text, &cli.source_id).await);
        }

        runs.push(run);
    }

    let summary = cli
        .summary
        .then(|| decision_log.summary(orchestrator_config.acceptance_threshold));

    let report = Report {
        source_id: cli.source_id.clone(),
        mode: cli.mode.as_str().to_string(),
        runs,
        decision_log,
        summary,
    };

    let json = if cli.pretty {
        serde_json::to_string_pretty(&report)
    } else {
        serde_json::to_string(&report)
    }
    .context("Failed to serialize report")?;
    println!("{}", json);

    Ok(())
}

/// Flags win over the environment.
fn apply_overrides(mut config: Config, cli: &Cli) -> Config {
    if let Some(models) = &cli.models {
        config.models = parse_models(models);
    }
    if let Some(ms) = cli.delay_ms {
        config.call_delay = std::time::Duration::from_millis(ms);
    }
    if let Some(retries) = cli.max_retries {
        config.max_retries = Some(retries);
    }
    if let Some(base_url) = &cli.base_url {
        config.base_url = base_url.clone();
    }
    config
}

fn orchestrator_config(config: &Config, cli: &Cli) -> OrchestratorConfig {
    let mut orchestrator_config = OrchestratorConfig::default();
    if let Some(retries) = config.max_retries {
        orchestrator_config = orchestrator_config.with_max_retries(retries);
    }
    if !cli.strategies.is_empty() {
        orchestrator_config = orchestrator_config.with_aggregate_strategies(cli.strategies.clone());
    }
    orchestrator_config
}

/// Sleep between runs, skipping the first.
async fn pause(config: &Config, first_run: &mut bool) {
    if *first_run {
        *first_run = false;
    } else if !config.call_delay.is_zero() {
        tokio::time::sleep(config.call_delay).await;
    }
}

fn read_input(path: Option<&PathBuf>) -> Result<String> {
    match path {
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display())),
        None => {
            let mut text = String::new();
            std::io::stdin()
                .read_to_string(&mut text)
                .context("Failed to read article from stdin")?;
            Ok(text)
        }
    }
}

/// Prepend the title as its own line.
fn compose_text(title: Option<&str>, body: &str) -> String {
    match title {
        Some(title) if !title.trim().is_empty() => format!("{}\n{}", title, body),
        _ => body.to_string(),
    }
}
