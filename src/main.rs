mod annotation;
mod config;
mod counter;
mod term_counts;

use clap::Parser;
use config::{CounterConfig, Overrides, DEFAULT_CONFIG_FILE};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Count GO term annotations across isoform function lists and write a
/// term-to-count table.
#[derive(Parser, Debug)]
#[command(name = "isopret-terms", version, about)]
pub struct Cli {
    /// Config file path (default: isopret-terms.toml, optional)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Directory holding the annotation files (overrides config)
    #[arg(short, long)]
    dir: Option<PathBuf>,

    /// Output table path (overrides config)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Print resolved settings and exit without reading or writing files
    #[arg(long)]
    dry_run: bool,

    /// Extra logging (skipped lines, resolved config)
    #[arg(short, long, conflicts_with = "quiet")]
    verbose: bool,

    /// Only log warnings and errors
    #[arg(short, long)]
    quiet: bool,
}

impl Cli {
    fn overrides(&self) -> Overrides {
        Overrides {
            dir: self.dir.clone(),
            output: self.output.clone(),
        }
    }

    fn default_log_level(&self) -> &'static str {
        if self.verbose {
            "debug"
        } else if self.quiet {
            "warn"
        } else {
            "info"
        }
    }
}

fn init_logging(cli: &Cli) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(cli.default_log_level()));

    // stdout carries only the summary line
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_thread_ids(false)
        .init();
}

/// Layer defaults, the config file and CLI overrides, then validate.
fn resolve_config(cli: &Cli) -> Result<CounterConfig, config::ConfigError> {
    let (path, required) = match &cli.config {
        Some(path) => (path.clone(), true),
        None => (PathBuf::from(DEFAULT_CONFIG_FILE), false),
    };
    let mut config = CounterConfig::load(&path, required)?;
    config.apply(&cli.overrides());
    config.validate()?;
    Ok(config)
}

fn print_settings(config: &CounterConfig) {
    println!("isopret-terms v{}", env!("CARGO_PKG_VERSION"));
    println!("Input directory: {}", config.input.dir.display());
    for path in config.input_paths() {
        println!("Input file:      {}", path.display());
    }
    println!("Output file:     {}", config.output.file.display());
    println!("Dry run: config validated, no files read or written.");
}

/// Print an error with its source chain to stderr.
fn report(err: &dyn std::error::Error) {
    tracing::error!(error = %err, "run failed");
    eprintln!("error: {err}");
    let mut source = err.source();
    while let Some(cause) = source {
        eprintln!("  caused by: {cause}");
        source = cause.source();
    }
}

fn main() {
    let cli = Cli::parse();
    init_logging(&cli);

    tracing::info!(version = env!("CARGO_PKG_VERSION"), "isopret-terms starting");
    tracing::debug!(?cli, "parsed CLI arguments");

    let config = match resolve_config(&cli) {
        Ok(config) => config,
        Err(e) => {
            report(&e);
            std::process::exit(1);
        }
    };
    tracing::debug!(?config, "resolved configuration");

    if cli.dry_run {
        print_settings(&config);
        return;
    }

    if let Err(e) = counter::run(&config) {
        report(&e);
        std::process::exit(1);
    }
}
