// CLI command definitions

use crate::config::{Overrides, RunConfig};
use crate::graph::{parse_label_arg, Label};
use crate::reach::{QueueOrder, Strategy};
use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// bounded-reach - bounded two-label reachability
///
/// Computes, for every vertex of a labeled edge file, the targets reachable
/// through a terminal edge or through link edges into vertices that reach
/// them, keeping at most BOUND targets per vertex.
#[derive(Parser, Debug, Clone)]
#[command(name = "bounded-reach")]
#[command(author, version, about)]
#[command(long_about = "bounded-reach computes a bounded reachability relation over a labeled edge file.

Input: one edge per line, '<source> <label> <target>', whitespace separated.
Output: one '<source>\\t<target>' line per reachable pair.

A vertex reaches t if it has a terminal edge to t, or a link edge to a vertex
that reaches t. Each vertex keeps at most BOUND targets; once full it accepts
no more, and the first targets discovered win.")]
pub struct Cli {
    /// Path to a JSON config file
    #[arg(global = true, long, env = "BOUNDED_REACH_CONFIG")]
    pub config: Option<PathBuf>,

    /// Report format
    #[arg(global = true, long, value_enum, default_value_t = OutputFormat::Human)]
    pub format: OutputFormat,

    #[command(subcommand)]
    pub command: Commands,
}

/// Report format options
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// Human-readable text output
    Human,
    /// Compact JSON for programmatic consumption
    Json,
    /// Formatted JSON with indentation
    Pretty,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Compute the bounded relation and write it as tab-separated pairs
    Run(RunArgs),

    /// Answer query-label edges against the bounded relation
    Query(QueryArgs),

    /// Show edge index statistics (and run statistics when a bound is given)
    Stats(StatsArgs),
}

// ============================================================================
// Shared Arguments
// ============================================================================

#[derive(Args, Debug, Clone, Default)]
pub struct GraphArgs {
    /// Labeled edge file to read
    #[arg(long)]
    pub input: Option<PathBuf>,

    /// Maximum number of targets kept per vertex
    #[arg(long, allow_negative_numbers = true)]
    pub bound: Option<i64>,

    /// Label of terminal edges [default: 3]
    #[arg(long, value_parser = parse_label_arg)]
    pub terminal: Option<Label>,

    /// Label of link edges [default: 2]
    #[arg(long, value_parser = parse_label_arg)]
    pub link: Option<Label>,

    /// Order in which pending facts are drained [default: fifo]
    #[arg(long, value_enum)]
    pub order: Option<QueueOrder>,

    /// Fixpoint strategy [default: worklist]
    #[arg(long, value_enum)]
    pub strategy: Option<Strategy>,
}

impl GraphArgs {
    fn overrides(&self) -> Overrides {
        Overrides {
            input: self.input.clone(),
            bound: self.bound,
            terminal: self.terminal.clone(),
            link: self.link.clone(),
            order: self.order,
            strategy: self.strategy,
            ..Overrides::default()
        }
    }
}

// ============================================================================
// Commands
// ============================================================================

#[derive(Parser, Debug, Clone)]
pub struct RunArgs {
    #[command(flatten)]
    pub graph: GraphArgs,

    /// File to write the reachable pairs to (must not exist)
    #[arg(long)]
    pub output: Option<PathBuf>,

    /// Also write '<vertex>\t<degree>' lines to this file (must not exist)
    #[arg(long)]
    pub degrees: Option<PathBuf>,
}

#[derive(Parser, Debug, Clone)]
pub struct QueryArgs {
    #[command(flatten)]
    pub graph: GraphArgs,

    /// File to write '<source>\t<target>\t<light|heavy>' answers to (must not exist)
    #[arg(long)]
    pub output: Option<PathBuf>,

    /// Label of query edges [default: 1]
    #[arg(long, value_parser = parse_label_arg)]
    pub query_label: Option<Label>,
}

#[derive(Parser, Debug, Clone)]
pub struct StatsArgs {
    #[command(flatten)]
    pub graph: GraphArgs,
}

// ============================================================================
// Utility Functions
// ============================================================================

/// Resolve the run configuration for a command
fn resolve(cli: &Cli, overrides: Overrides, bound_required: bool) -> anyhow::Result<RunConfig> {
    let config = RunConfig::from_sources(cli.config.as_deref(), overrides, bound_required)?;
    tracing::debug!(?config, "resolved configuration");
    Ok(config)
}

fn print_report<T: serde::Serialize>(format: OutputFormat, report: T) {
    use crate::output::JsonResponse;

    match format {
        OutputFormat::Human => {}
        OutputFormat::Json => println!("{}", JsonResponse::new(report).to_json()),
        OutputFormat::Pretty => println!("{}", JsonResponse::new(report).to_pretty_json()),
    }
}

// ============================================================================
// Command Handlers
// ============================================================================

pub mod cmds {
    use super::*;
    use crate::emit;
    use crate::graph::{index_stats, EdgeIndex, IndexStats, LabelSet};
    use crate::output;
    use crate::reach::{self, answer_queries, DegreeClass, RunStats};
    use anyhow::{Context, Result};
    use serde::Serialize;

    #[derive(Debug, Serialize)]
    pub struct RunReport {
        pub input: PathBuf,
        pub output: PathBuf,
        pub labels: LabelSet,
        pub pairs_written: usize,
        #[serde(skip_serializing_if = "Option::is_none")]
        pub degrees_written: Option<usize>,
        pub stats: RunStats,
    }

    #[derive(Debug, Serialize)]
    pub struct QueryReport {
        pub input: PathBuf,
        pub output: PathBuf,
        pub query_edges: usize,
        pub light_answers: usize,
        pub heavy_answers: usize,
        pub stats: RunStats,
    }

    #[derive(Debug, Serialize)]
    pub struct StatsReport {
        pub input: PathBuf,
        pub index: IndexStats,
        #[serde(skip_serializing_if = "Option::is_none")]
        pub run: Option<RunStats>,
    }

    pub fn run(args: &RunArgs, cli: &Cli) -> Result<()> {
        let mut overrides = args.graph.overrides();
        overrides.output = args.output.clone();
        overrides.degrees = args.degrees.clone();

        let config = resolve(cli, overrides, true)?;
        let output_path = config.require_output()?.to_path_buf();
        config.preflight()?;

        let index = EdgeIndex::load(&config.input, &config.labels)
            .with_context(|| format!("failed to index {}", config.input.display()))?;
        let fixpoint = reach::compute(&index, &config.options());

        let pairs_written = emit::emit_pairs(&output_path, &index, &fixpoint.store)?;
        let degrees_written = match &config.degrees {
            Some(path) => match emit::emit_degrees(path, &index, &fixpoint.store) {
                Ok(lines) => Some(lines),
                Err(err) => {
                    // Leave no pairs file behind so the run can be retried as is
                    emit::discard(&output_path);
                    return Err(err.into());
                }
            },
            None => None,
        };

        if cli.format == OutputFormat::Human {
            output::success(&format!(
                "Wrote {} pairs to {}",
                pairs_written,
                output_path.display()
            ));
            if let (Some(lines), Some(path)) = (degrees_written, &config.degrees) {
                output::success(&format!("Wrote {} degrees to {}", lines, path.display()));
            }
            print_run_stats(&fixpoint.stats);
        }

        print_report(
            cli.format,
            RunReport {
                input: config.input.clone(),
                output: output_path,
                labels: config.labels.clone(),
                pairs_written,
                degrees_written,
                stats: fixpoint.stats,
            },
        );
        Ok(())
    }

    pub fn query(args: &QueryArgs, cli: &Cli) -> Result<()> {
        let mut overrides = args.graph.overrides();
        overrides.output = args.output.clone();
        overrides.query = args.query_label.clone();

        let config = resolve(cli, overrides, true)?;
        let output_path = config.require_output()?.to_path_buf();
        config.require_query_label()?;
        config.preflight()?;

        let index = EdgeIndex::load(&config.input, &config.labels)
            .with_context(|| format!("failed to index {}", config.input.display()))?;
        if index.query_edges().is_empty() {
            output::warn("No query edges found; the answer file will be empty");
        }
        let fixpoint = reach::compute(&index, &config.options());
        let answers = answer_queries(&index, &fixpoint.store);
        let lines = emit::emit_answers(&output_path, &index, &answers)?;

        if cli.format == OutputFormat::Human {
            output::success(&format!("Wrote {} answers to {}", lines, output_path.display()));
            output::info(&format!(
                "light: {}, heavy: {}",
                answers.count(DegreeClass::Light),
                answers.count(DegreeClass::Heavy)
            ));
            print_run_stats(&fixpoint.stats);
        }

        print_report(
            cli.format,
            QueryReport {
                input: config.input.clone(),
                output: output_path,
                query_edges: index.query_edges().len(),
                light_answers: answers.count(DegreeClass::Light),
                heavy_answers: answers.count(DegreeClass::Heavy),
                stats: fixpoint.stats,
            },
        );
        Ok(())
    }

    pub fn stats(args: &StatsArgs, cli: &Cli) -> Result<()> {
        let config = resolve(cli, args.graph.overrides(), false)?;
        let index = EdgeIndex::load(&config.input, &config.labels)
            .with_context(|| format!("failed to index {}", config.input.display()))?;
        let index_report = index_stats(&index);
        let run = (config.bound > 0).then(|| reach::compute(&index, &config.options()).stats);

        if cli.format == OutputFormat::Human {
            output::header(&format!("Edge index: {}", config.input.display()));
            println!("  vertices: {}", index_report.vertices);
            println!("  terminal edges: {}", index_report.edges.terminal);
            println!(
                "  link edges: {} ({} distinct)",
                index_report.edges.link, index_report.distinct_link_edges
            );
            println!("  query edges: {}", index_report.edges.query);
            println!("  ignored edges: {}", index_report.edges.ignored);
            println!("  link graph cyclic: {}", index_report.link_cyclic);
            println!(
                "  link components: {} (largest {})",
                index_report.link_components, index_report.largest_component
            );
            println!("  max link in-degree: {}", index_report.max_link_in_degree);
            if let Some(run) = &run {
                println!();
                print_run_stats(run);
            }
        }

        print_report(
            cli.format,
            StatsReport {
                input: config.input.clone(),
                index: index_report,
                run,
            },
        );
        Ok(())
    }

    fn print_run_stats(stats: &RunStats) {
        output::info(&format!(
            "{} strategy, bound {}: {} pairs, {} seeds, {} insertions / {} attempts",
            stats.strategy.name(),
            stats.bound,
            stats.pairs,
            stats.seed_facts,
            stats.insertions,
            stats.attempts
        ));
        if stats.saturated > 0 {
            output::info(&format!("{} vertices saturated at the bound", stats.saturated));
        }
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_run_command() {
        let cli = Cli::try_parse_from([
            "bounded-reach",
            "run",
            "--input",
            "g.facts",
            "--output",
            "out.tsv",
            "--bound",
            "80",
            "--terminal",
            "c",
            "--link",
            "b",
            "--order",
            "lifo",
        ])
        .unwrap();
        assert_eq!(cli.format, OutputFormat::Human);
        match cli.command {
            Commands::Run(args) => {
                assert_eq!(args.graph.bound, Some(80));
                assert_eq!(args.graph.terminal, Some(Label::parse("c")));
                assert_eq!(args.graph.order, Some(QueueOrder::Lifo));
                assert_eq!(args.output, Some(PathBuf::from("out.tsv")));
                assert!(args.degrees.is_none());
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_negative_bound_reaches_validation() {
        let cli = Cli::try_parse_from(["bounded-reach", "stats", "--input", "g", "--bound", "-2"]).unwrap();
        match cli.command {
            Commands::Stats(args) => assert_eq!(args.graph.bound, Some(-2)),
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let cli = Cli::try_parse_from([
            "bounded-reach",
            "query",
            "--input",
            "g",
            "--format",
            "json",
            "--query-label",
            "1",
        ])
        .unwrap();
        assert_eq!(cli.format, OutputFormat::Json);
        match cli.command {
            Commands::Query(args) => assert_eq!(args.query_label, Some(Label::Int(1))),
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_strategy_flag() {
        let cli = Cli::try_parse_from(["bounded-reach", "stats", "--strategy", "naive"]).unwrap();
        match cli.command {
            Commands::Stats(args) => assert_eq!(args.graph.strategy, Some(Strategy::Naive)),
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_empty_label_rejected() {
        assert!(Cli::try_parse_from(["bounded-reach", "run", "--terminal", ""]).is_err());
    }

    #[test]
    fn test_overrides_carry_graph_args() {
        let args = GraphArgs {
            input: Some(PathBuf::from("g")),
            bound: Some(3),
            ..GraphArgs::default()
        };
        let overrides = args.overrides();
        assert_eq!(overrides.input, Some(PathBuf::from("g")));
        assert_eq!(overrides.bound, Some(3));
        assert!(overrides.output.is_none());
    }
}
