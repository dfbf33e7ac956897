//! Compare a single-agent baseline with a Planner -> Executor -> Critic loop.
//!
//! Reads gateway credentials from the environment (and `.env`), runs the
//! selected modes sequentially, writes one JSON log per run and prints the
//! final answers with their evaluation metrics.

use std::collections::BTreeMap;
use std::path::PathBuf;

use anyhow::Result;
use autoagent::core::evaluate::evaluate;
use autoagent::exit_codes;
use autoagent::io::config::{GatewayConfig, MissingConfigError, load_settings};
use autoagent::io::gateway::OpenAiGateway;
use autoagent::io::run_log::{LoggedMetadata, RunLogRequest, save_run_log};
use autoagent::logging;
use autoagent::orchestrate::{Orchestrator, RunSelection};
use autoagent::report::{render_comparison, render_run};
use clap::Parser;
use clap::builder::NonEmptyStringValueParser;
use tracing::info;

#[derive(Parser)]
#[command(
    name = "autoagent",
    version,
    about = "Compare a single LLM call with a Planner/Executor/Critic revision loop"
)]
struct Cli {
    /// Task prompt for the agent(s).
    #[arg(long, value_parser = NonEmptyStringValueParser::new())]
    task: String,

    /// Run mode.
    #[arg(long, value_enum)]
    mode: RunSelection,

    /// Max revision rounds for multi-agent [default: 2, or `max_rounds` from the settings file].
    #[arg(long = "max_rounds")]
    max_rounds: Option<u32>,

    /// Directory for run logs [default: runs, or `output_dir` from the settings file].
    #[arg(long)]
    output_dir: Option<PathBuf>,

    /// Optional TOML settings file.
    #[arg(long, default_value = "autoagent.toml")]
    config: PathBuf,
}

fn main() {
    logging::init();
    if let Err(err) = run() {
        eprintln!("{:#}", err);
        let code = if err.downcast_ref::<MissingConfigError>().is_some() {
            exit_codes::CONFIG
        } else {
            exit_codes::FAILED
        };
        std::process::exit(code);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();
    // A missing .env is fine; variables may come from the real environment.
    dotenvy::dotenv().ok();

    let settings = load_settings(&cli.config)?;
    let max_rounds = cli.max_rounds.unwrap_or(settings.max_rounds);
    let output_dir = cli.output_dir.unwrap_or(settings.output_dir);

    let gateway = OpenAiGateway::new(GatewayConfig::from_env()?)?;
    let orchestrator = Orchestrator::new(&gateway, gateway.config().model());

    info!(mode = ?cli.mode, max_rounds, "starting runs");
    let results = orchestrator.run(cli.mode, &cli.task, max_rounds)?;

    let mut all_metrics = BTreeMap::new();
    for (mode, result) in &results {
        let metrics = evaluate(&result.final_answer, result.metadata.rounds);
        let log_path = save_run_log(
            &output_dir,
            &RunLogRequest {
                task: &cli.task,
                mode: *mode,
                messages: &result.agent_messages,
                final_answer: &result.final_answer,
                metadata: LoggedMetadata::new(&result.metadata, Some(&metrics)),
            },
        )?;
        print!(
            "{}",
            render_run(*mode, &result.final_answer, &metrics, &log_path)
        );
        all_metrics.insert(*mode, metrics);
    }

    if cli.mode == RunSelection::Both {
        print!("{}", render_comparison(&all_metrics));
    }
    Ok(())
}
