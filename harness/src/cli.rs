//! `crucible` command-line interface.
//!
//! - `crucible search <element>` runs one recipe request and prints the
//!   response JSON to stdout.
//! - `crucible sanitize <input> <output>` cleans a graph file.
//!
//! The graph path comes from `--graph` or `CRUCIBLE_GRAPH`
//! (default `./data/recipes_complete.json`).

use std::io::Write;
use std::num::{NonZeroU64, NonZeroUsize};
use std::path::PathBuf;
use std::time::Duration;

use anyhow::Context;
use clap::{Args, Parser, Subcommand};
use crucible_graph::recipe_graph::{read_records, write_records};
use crucible_graph::sanitize::sanitize;
use crucible_search::TierRule;
use tracing::info;

use crate::config::RunnerConfig;
use crate::request::RecipeRequest;
use crate::runner::run_search;
use crate::store::{GraphStore, DEFAULT_GRAPH_PATH};

/// Enumerate crafting derivations over a recipe graph.
#[derive(Debug, Parser)]
#[command(name = "crucible")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Find derivations of one element.
    Search(SearchArgs),
    /// Remove recipes that can never be part of a valid derivation.
    Sanitize(SanitizeArgs),
}

#[derive(Debug, Args)]
pub struct SearchArgs {
    /// Element to derive.
    pub element: String,

    /// Traversal order: `bfs` or `dfs`.
    #[arg(long, default_value = "bfs")]
    pub algorithm: String,

    /// Maximum derivations to return; zero or negative means no limit.
    #[arg(long, default_value_t = 0, allow_negative_numbers = true)]
    pub max_recipe: i64,

    /// Worker threads (default: available parallelism).
    #[arg(long)]
    pub workers: Option<NonZeroUsize>,

    /// Frontier capacity in states.
    #[arg(long)]
    pub frontier_capacity: Option<usize>,

    /// Admit any ingredient below the target's tier (cycle-checked).
    #[arg(long)]
    pub relaxed_tiers: bool,

    /// Log search progress every N milliseconds (at debug level).
    #[arg(long, value_name = "MS")]
    pub progress_ms: Option<NonZeroU64>,

    /// Also print the search summary (counters, termination) to stderr.
    #[arg(long)]
    pub stats: bool,

    /// Recipe graph JSON file.
    #[arg(long, env = "CRUCIBLE_GRAPH", default_value = DEFAULT_GRAPH_PATH)]
    pub graph: PathBuf,
}

impl SearchArgs {
    /// Runner overrides taken from the flags.
    #[must_use]
    pub fn runner_config(&self) -> RunnerConfig {
        RunnerConfig {
            workers: self.workers,
            frontier_capacity: self.frontier_capacity,
            tier_rule: self.relaxed_tiers.then_some(TierRule::BelowTarget),
            progress_interval: self.progress_ms.map(|ms| Duration::from_millis(ms.get())),
        }
    }

    #[must_use]
    pub fn request(&self) -> RecipeRequest {
        RecipeRequest::new(self.element.clone(), self.algorithm.clone(), self.max_recipe)
    }
}

#[derive(Debug, Args)]
pub struct SanitizeArgs {
    /// Graph file to clean.
    pub input: PathBuf,
    /// Where to write the cleaned graph.
    pub output: PathBuf,
}

/// Run the parsed command, writing results to `out`.
///
/// # Errors
///
/// Returns any graph, search or output failure with context attached.
pub fn execute(cli: Cli, out: &mut impl Write) -> anyhow::Result<()> {
    match cli.command {
        Commands::Search(args) => search_command(&args, out),
        Commands::Sanitize(args) => sanitize_command(&args, out),
    }
}

fn search_command(args: &SearchArgs, out: &mut impl Write) -> anyhow::Result<()> {
    let store = GraphStore::new(&args.graph);
    let report = run_search(&store, &args.request(), &args.runner_config())
        .with_context(|| format!("search for {:?} failed", args.element))?;

    serde_json::to_writer_pretty(&mut *out, &report.response)?;
    writeln!(out)?;
    if args.stats {
        eprintln!("{}", serde_json::to_string_pretty(&report.summary)?);
    }
    Ok(())
}

fn sanitize_command(args: &SanitizeArgs, out: &mut impl Write) -> anyhow::Result<()> {
    let mut records = read_records(&args.input)
        .with_context(|| format!("reading {}", args.input.display()))?;
    let report = sanitize(&mut records);
    write_records(&args.output, &records)
        .with_context(|| format!("writing {}", args.output.display()))?;

    info!(
        input = %args.input.display(),
        output = %args.output.display(),
        removed = report.total_removed(),
        "graph sanitized"
    );
    writeln!(
        out,
        "removed {} recipes ({} dangling, {} tier, {} unreachable); {} items underivable",
        report.total_removed(),
        report.dangling_removed,
        report.tier_removed,
        report.unreachable_removed,
        report.underivable_items.len()
    )?;
    Ok(())
}
