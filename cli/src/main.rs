//! CLI entrypoint for roundtable
//!
//! This is the main binary that wires together all layers using
//! dependency injection.

mod drive;

use std::sync::Arc;

use anyhow::{Context, Result, bail};
use clap::Parser;
use roundtable_application::{
    BehaviorConfig, EventLogger, GenerationClient, NoEventLogger, PlanMeetingsUseCase,
    ProjectStore, SeriesController, attach_rating,
};
use roundtable_domain::{AgentId, AgentRegistry, Rating, Topic};
use roundtable_infrastructure::{
    ConfigLoader, FileConfig, GeminiBackend, JsonFileProjectStore, JsonlEventLogger,
};
use roundtable_presentation::{Cli, Command, ConsoleFormatter, ExportKind, input, markdown};
use tracing::info;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::prelude::*;

#[tokio::main]
async fn main() -> Result<()> {
    let mut cli = Cli::parse();

    // Keep the non-blocking writer guard alive for the whole run
    let _log_guard = init_logging(&cli)?;

    if cli.show_config {
        ConfigLoader::print_config_sources();
        return Ok(());
    }

    let config = if cli.no_config {
        ConfigLoader::load_defaults()
    } else {
        ConfigLoader::load(cli.config.as_ref()).map_err(|e| anyhow::anyhow!(e))?
    };

    info!("starting roundtable");
    let registry = Arc::new(AgentRegistry::builtin());
    let store = Arc::new(open_store(&config)?);

    let Some(command) = cli.command.take() else {
        bail!("no command given; run with --help to see usage");
    };

    match command {
        Command::Run { topic, yes, no_input } => {
            let topic = Topic::new(topic)?;
            let client = generation_client(&config)?;
            let events = event_logger(&cli);
            let behavior = config.behavior_config();

            // Plan, then let the user review before any meeting runs
            let planner = PlanMeetingsUseCase::new(Arc::clone(&client), Arc::clone(&registry));
            let plan = planner.execute(&topic).await?;

            if !cli.quiet {
                println!("{}", ConsoleFormatter::format_plan(&plan, &registry));
            }
            if !yes && !cli.quiet && !input::confirm_plan()? {
                println!("Plan rejected. Nothing was started.");
                return Ok(());
            }

            let controller = SeriesController::start(
                client,
                Arc::clone(&registry),
                store,
                behavior,
                events,
                topic,
                plan,
            )
            .await?;
            drive::run_series(controller, cli.quiet, no_input).await
        }

        Command::Resume { id, no_input } => {
            let project = store
                .load(&id)
                .await?
                .with_context(|| format!("no project with id {id}"))?;
            if project.is_completed() {
                println!("Project {id} is already complete.");
                if let Some(report) = &project.final_summary {
                    println!("{}", ConsoleFormatter::format_final_report(report));
                }
                return Ok(());
            }

            let client = generation_client(&config)?;
            let events = event_logger(&cli);
            let behavior = config.behavior_config();
            let controller = SeriesController::resume(
                client,
                Arc::clone(&registry),
                store,
                behavior,
                events,
                project,
            )
            .await?;
            drive::run_series(controller, cli.quiet, no_input).await
        }

        Command::List => {
            let projects = store.list().await?;
            print!("{}", ConsoleFormatter::format_history(&projects));
            Ok(())
        }

        Command::Show { id } => {
            let project = store
                .load(&id)
                .await?
                .with_context(|| format!("no project with id {id}"))?;
            print!("{}", ConsoleFormatter::format_project(&project, &registry));
            Ok(())
        }

        Command::Export { id, kind, meeting, out } => {
            let project = store
                .load(&id)
                .await?
                .with_context(|| format!("no project with id {id}"))?;

            let document = match kind {
                ExportKind::Transcript => {
                    markdown::project_transcript_to_markdown(&project, &registry, meeting)
                        .context("no transcript available for that selection")?
                }
                ExportKind::Report => markdown::project_report_to_markdown(&project, &registry),
            };

            match out {
                Some(path) => {
                    std::fs::write(&path, &document)
                        .with_context(|| format!("could not write {}", path.display()))?;
                    println!("Wrote {}", path.display());
                }
                None => println!("{document}"),
            }
            Ok(())
        }

        Command::Rate { id, meeting, agent, up, down } => {
            if up == down {
                bail!("pass exactly one of --up or --down");
            }
            let rating = if up { Rating::Up } else { Rating::Down };
            attach_rating(&*store, &id, meeting, AgentId::new(agent.as_str()), rating).await?;
            println!("Recorded {} for {agent} in meeting {}.", if up { "+1" } else { "-1" }, meeting + 1);
            Ok(())
        }
    }
}

/// Initialize tracing from the verbosity flags, optionally teeing to a file.
fn init_logging(cli: &Cli) -> Result<Option<tracing_appender::non_blocking::WorkerGuard>> {
    let filter = match cli.verbose {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };

    let stderr_layer = tracing_subscriber::fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false);

    match &cli.log_file {
        Some(path) => {
            let file = std::fs::OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)
                .with_context(|| format!("could not open log file {}", path.display()))?;
            let (writer, guard) = tracing_appender::non_blocking(file);
            let file_layer = tracing_subscriber::fmt::layer()
                .with_writer(writer)
                .with_ansi(false);
            tracing_subscriber::registry()
                .with(filter)
                .with(stderr_layer)
                .with(file_layer)
                .init();
            Ok(Some(guard))
        }
        None => {
            tracing_subscriber::registry()
                .with(filter)
                .with(stderr_layer)
                .init();
            Ok(None)
        }
    }
}

fn open_store(config: &FileConfig) -> Result<JsonFileProjectStore> {
    let limit = config.storage.history_limit;
    match &config.storage.path {
        Some(path) => Ok(JsonFileProjectStore::new(path, limit)),
        None => JsonFileProjectStore::at_default_location(limit)
            .map_err(|e| anyhow::anyhow!("could not open history store: {e}")),
    }
}

fn generation_client(config: &FileConfig) -> Result<Arc<GenerationClient<GeminiBackend>>> {
    let Some(api_key) = config.api.resolve_key() else {
        bail!(
            "no API key configured; set GEMINI_API_KEY or add gemini_api_key to the [api] \
             section of roundtable.toml"
        );
    };
    let backend = Arc::new(GeminiBackend::new(api_key).map_err(|e| anyhow::anyhow!(e))?);
    let behavior: BehaviorConfig = config.behavior_config();
    Ok(Arc::new(GenerationClient::new(backend, behavior.models)))
}

fn event_logger(cli: &Cli) -> Arc<dyn EventLogger> {
    match &cli.event_log {
        Some(path) => match JsonlEventLogger::new(path) {
            Some(logger) => Arc::new(logger),
            None => Arc::new(NoEventLogger),
        },
        None => Arc::new(NoEventLogger),
    }
}
