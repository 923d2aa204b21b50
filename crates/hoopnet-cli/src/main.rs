#![forbid(unsafe_code)]

mod cmd;
mod output;
mod render;

use std::env;
use std::io;
use std::path::PathBuf;

use anyhow::Context as _;
use clap::{CommandFactory, Parser, Subcommand};
use hoopnet_core::config::load_config;
use hoopnet_core::timing::StageTimer;
use output::{CliError, OutputMode, render_error, resolve_output_mode};
use tracing::debug;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "hoopnet: assist-network analysis for a basketball game",
    long_about = None
)]
struct Cli {
    /// Enable verbose logging.
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Emit stage timing report to stderr.
    #[arg(long, global = true)]
    timing: bool,

    /// Output format (pretty, text, json). Defaults to pretty on a TTY.
    #[arg(long, global = true, value_enum)]
    format: Option<OutputMode>,

    /// Shorthand for `--format json`.
    #[arg(long, global = true, hide = true)]
    json: bool,

    /// Edge-list CSV (`from_player,to_player,assists`). Defaults to the built-in game.
    #[arg(long, global = true, value_name = "CSV")]
    input: Option<PathBuf>,

    /// Config file to use instead of hoopnet.toml discovery.
    #[arg(long, global = true, value_name = "PATH")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

impl Cli {
    fn output_mode(&self) -> OutputMode {
        resolve_output_mode(self.format, self.json)
    }
}

#[derive(Subcommand, Debug)]
enum Commands {
    #[command(
        next_help_heading = "Analysis",
        about = "Print the ranked metrics table",
        long_about = "Compute out/in strength, PageRank and betweenness per player and print them ranked by out-strength, then in-strength.",
        after_help = "EXAMPLES:\n    # Metrics for the built-in game\n    hoopnet metrics\n\n    # Top five from a CSV edge list\n    hoopnet metrics --input game.csv --top 5\n\n    # Emit machine-readable output\n    hoopnet metrics --format json"
    )]
    Metrics(cmd::metrics::MetricsArgs),

    #[command(
        next_help_heading = "Analysis",
        about = "Print the from x to assist matrix",
        long_about = "Print assist counts with passers as rows and receivers as columns.",
        after_help = "EXAMPLES:\n    # Matrix for the built-in game\n    hoopnet matrix\n\n    # Tab-separated for piping\n    hoopnet matrix --format text"
    )]
    Matrix(cmd::matrix::MatrixArgs),

    #[command(
        next_help_heading = "Analysis",
        about = "Print the validated edge list",
        long_about = "Validate the input edge list and print it with totals.",
        after_help = "EXAMPLES:\n    # Check a CSV before analysing it\n    hoopnet edges --input game.csv"
    )]
    Edges(cmd::edges::EdgesArgs),

    #[command(
        next_help_heading = "Artifacts",
        about = "Write CSV and PNG artifacts",
        long_about = "Write the edge list, metrics table, matrix, heatmap and graph drawing for one run.",
        after_help = "EXAMPLES:\n    # Export everything into ./out\n    hoopnet export\n\n    # Custom directory and label, CSV only\n    hoopnet export --out-dir reports --label opener --no-images\n\n    # Emit the manifest as JSON\n    hoopnet export --format json"
    )]
    Export(cmd::export::ExportArgs),

    #[command(
        next_help_heading = "Maintenance",
        about = "Generate shell completion scripts",
        long_about = "Generate shell completion scripts for supported shells.",
        after_help = "EXAMPLES:\n    # Generate bash completions\n    hoopnet completions bash\n\n    # Generate zsh completions\n    hoopnet completions zsh"
    )]
    Completions(cmd::completions::CompletionsArgs),
}

fn init_tracing(verbose: bool) {
    let filter = EnvFilter::try_from_env("HOOPNET_LOG").unwrap_or_else(|_| {
        EnvFilter::new(if verbose {
            "hoopnet=debug,info"
        } else {
            "hoopnet=info,warn"
        })
    });

    let format = env::var("HOOPNET_LOG_FORMAT").unwrap_or_else(|_| "compact".to_string());

    let registry = tracing_subscriber::registry().with(filter);

    match format.as_str() {
        "json" => {
            registry
                .with(fmt::layer().json().with_ansi(false).with_writer(io::stderr))
                .init();
        }
        _ => {
            registry
                .with(fmt::layer().compact().with_writer(io::stderr))
                .init();
        }
    }
}

fn run(cli: &Cli, output: OutputMode, timer: &mut StageTimer) -> anyhow::Result<()> {
    if let Commands::Completions(args) = &cli.command {
        let mut command = Cli::command();
        return cmd::completions::run_completions(args.shell, &mut command, &mut io::stdout());
    }

    let project_root = env::current_dir().context("failed to resolve working directory")?;
    let config = load_config(&project_root, cli.config.as_deref())
        .context("failed to load configuration")?;
    debug!(?config, "effective config");

    let ctx = cmd::RunContext::load(cli.input.as_deref(), config, timer)?;

    match &cli.command {
        Commands::Metrics(args) => cmd::metrics::run_metrics(args, &ctx, output, timer),
        Commands::Matrix(args) => cmd::matrix::run_matrix(args, &ctx, output, timer),
        Commands::Edges(args) => cmd::edges::run_edges(args, &ctx, output),
        Commands::Export(args) => cmd::export::run_export(args, &ctx, output, timer),
        Commands::Completions(_) => Ok(()),
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let output = cli.output_mode();
    let timing_enabled = cli.timing;
    let mut timer = StageTimer::new();

    let result = run(&cli, output, &mut timer);

    if timing_enabled {
        if timer.is_empty() {
            eprintln!("timing report: no stages recorded");
        } else {
            eprintln!("timing report:");
            eprintln!("{}", timer.display_table());
            eprintln!("timing report (json):");
            eprintln!("{}", serde_json::to_string_pretty(&timer.to_json())?);
        }
    }

    if let Err(err) = result {
        render_error(output, &CliError::from(&err))?;
        std::process::exit(1);
    }
    Ok(())
}
