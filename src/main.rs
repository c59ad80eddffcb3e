//! difflens - CLI entry point.

use std::io::Read;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use tracing_subscriber::EnvFilter;

use difflens::git::{collect_staged_diff, open_repository};
use difflens::report::{render_json, render_text};
use difflens::{AnalyzerConfig, parse_diff};

/// Environment variable holding a tracing filter directive.
const LOG_ENV_VAR: &str = "DIFFLENS_LOG";

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Text,
    Json,
}

/// Classify staged changes and recommend a conventional commit type and scope.
#[derive(Parser, Debug)]
#[command(name = "difflens")]
#[command(about = "Classify staged changes and recommend a commit type and scope")]
#[command(version)]
struct Cli {
    /// Repository to read staged changes from
    #[arg(short = 'C', long, default_value = ".")]
    repo: PathBuf,

    /// Read a unified diff from this file instead of the index ("-" for stdin)
    #[arg(short, long)]
    input: Option<PathBuf>,

    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,

    /// Show a short summary of each file's changes (text format)
    #[arg(long)]
    summary: bool,

    /// Never use the parallel worker pool
    #[arg(long)]
    sequential: bool,

    /// Upper bound on parallel workers
    #[arg(long)]
    max_workers: Option<usize>,

    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    // Step 1: Resolve configuration (flags > environment > defaults)
    let mut config = AnalyzerConfig::from_env();
    if let Some(max_workers) = cli.max_workers {
        config = config.with_max_workers(max_workers);
    }
    if cli.sequential {
        config = config.sequential();
    }

    // Step 2: Obtain the diff text
    let raw_diff = match &cli.input {
        Some(path) => read_input(path)?,
        None => {
            let repo = open_repository(&cli.repo)
                .context("Not a git repository. Run difflens from within a git repository.")?;
            collect_staged_diff(&repo).context("Failed to collect staged changes")?
        }
    };

    // Step 3: Parse and classify
    let result = parse_diff(&raw_diff, &config)
        .await
        .context("Failed to parse diff")?;

    if result.is_empty() && cli.format == OutputFormat::Text {
        println!("No staged changes.");
        println!("Stage files using git add and try again.");
        return Ok(());
    }

    // Step 4: Display
    match cli.format {
        OutputFormat::Text => print!("{}", render_text(&result, cli.summary)),
        OutputFormat::Json => {
            println!("{}", render_json(&result).context("Failed to serialize result")?)
        }
    }

    Ok(())
}

/// Install the stderr log subscriber.
fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_env(LOG_ENV_VAR)
        .unwrap_or_else(|_| EnvFilter::new(format!("difflens={default_level}")));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

/// Read diff text from a file, or stdin for "-".
fn read_input(path: &Path) -> Result<String> {
    if path.as_os_str() == "-" {
        let mut text = String::new();
        std::io::stdin()
            .read_to_string(&mut text)
            .context("Failed to read diff from stdin")?;
        return Ok(text);
    }

    std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read diff from {}", path.display()))
}
