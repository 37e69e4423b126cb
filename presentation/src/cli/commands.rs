//! CLI command definitions

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// What an `export` invocation produces
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum ExportKind {
    /// Full meeting transcript as markdown
    Transcript,
    /// Meeting summaries and the final report as markdown
    Report,
}

/// CLI arguments for roundtable
#[derive(Parser, Debug)]
#[command(name = "roundtable")]
#[command(version, about = "Virtual roundtable - expert personas analyze a topic over multiple meetings")]
#[command(long_about = r#"
Roundtable decomposes a project topic into a short series of focused
meetings, each staffed by up to three expert personas. The experts
answer, cross-question each other, and answer follow-ups across three
rounds; each meeting ends in a structured summary and the series ends
in an executive report.

Configuration files are loaded from (in priority order):
1. --config <path>        Explicit config file
2. ./roundtable.toml      Project-level config
3. ~/.config/roundtable/config.toml   Global config

Example:
  roundtable run "Launch a subscription coffee box"
  roundtable resume 20260301T103000.000Z
  roundtable export 20260301T103000.000Z transcript --out transcript.md
"#)]
pub struct Cli {
    /// Not required so flags like --show-config work on their own
    #[command(subcommand)]
    pub command: Option<Command>,

    /// Verbosity level (-v = info, -vv = debug, -vvv = trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress progress output and interactive prompts
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Path to configuration file
    #[arg(long, value_name = "PATH", global = true)]
    pub config: Option<PathBuf>,

    /// Disable loading of configuration files
    #[arg(long, global = true)]
    pub no_config: bool,

    /// Show configuration file locations and exit
    #[arg(long, global = true)]
    pub show_config: bool,

    /// Append orchestration events to this JSONL file
    #[arg(long, value_name = "PATH", global = true)]
    pub event_log: Option<PathBuf>,

    /// Also write diagnostic logs to this file
    #[arg(long, value_name = "PATH", global = true)]
    pub log_file: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Plan and run a meeting series for a topic
    Run {
        /// The project topic to analyze
        topic: String,

        /// Accept the generated plan without review
        #[arg(short, long)]
        yes: bool,

        /// Skip the steering prompt between meetings (submit empty feedback)
        #[arg(long)]
        no_input: bool,
    },

    /// Resume a stored project from its exact interruption point
    Resume {
        /// Project id (see `roundtable list`)
        id: String,

        /// Skip the steering prompt between meetings
        #[arg(long)]
        no_input: bool,
    },

    /// List stored projects, most recent first
    List,

    /// Show a stored project's summaries and final report
    Show {
        /// Project id
        id: String,
    },

    /// Write a transcript or report to a markdown document
    Export {
        /// Project id
        id: String,

        /// What to export
        #[arg(value_enum)]
        kind: ExportKind,

        /// Limit a transcript export to one meeting (zero-based)
        #[arg(long, value_name = "N")]
        meeting: Option<usize>,

        /// Output path; default prints to stdout
        #[arg(long, value_name = "PATH")]
        out: Option<PathBuf>,
    },

    /// Rate an expert's contribution in a completed meeting
    Rate {
        /// Project id
        id: String,

        /// Meeting index (zero-based)
        #[arg(long, value_name = "N")]
        meeting: usize,

        /// Agent id (e.g. "product", "tech")
        #[arg(long)]
        agent: String,

        /// Thumbs up
        #[arg(long, conflicts_with = "down")]
        up: bool,

        /// Thumbs down
        #[arg(long)]
        down: bool,
    },
}
