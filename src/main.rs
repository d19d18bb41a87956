//! docsniff: check and fix the structure of PHP doc comments.
//!
//! Supports two modes:
//!
//! - **stdin mode**: `docsniff < file.php` (with `--fix`, prints the fixed source)
//! - **file mode**: `docsniff --fix src/ library/*.php`

use anyhow::{Context, Result};
use chrono::Datelike;
use clap::Parser;
use docsniff::config::Config;
use docsniff::report::{self, FileResult};
use docsniff::sniffs::{self, Sniff};
use docsniff::{fixer, lexer, Severity};
use std::fs;
use std::io::{self, Read};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing::{debug, info, warn};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "docsniff",
    about = "Check and fix file, class and function doc comments in PHP sources"
)]
struct Cli {
    /// Input files, directories or glob patterns. If omitted, reads from stdin.
    files: Vec<String>,

    /// Report format: full (default) or json
    #[arg(short = 'f', long, default_value = "full")]
    format: String,

    /// Rewrite fixable problems in place (stdin: print the fixed source)
    #[arg(long)]
    fix: bool,

    /// JSON ruleset configuration
    #[arg(short = 'c', long)]
    config: Option<PathBuf>,

    /// Year the copyright notice must end with. Defaults to the current year.
    #[arg(long)]
    year: Option<i32>,

    /// Only run these sniffs, comma separated. E.g. --sniffs function-comment
    #[arg(long, value_delimiter = ',')]
    sniffs: Vec<String>,

    /// Log each sniff run and fix pass to stderr
    #[arg(short = 'v', long)]
    verbose: bool,
}

fn main() -> Result<ExitCode> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let config = load_config(&cli)?;
    let sniffs = sniffs::create_sniffs(&config)?;
    let reporter = report::create_reporter(&cli.format)?;

    let results = if cli.files.is_empty() {
        stdin_mode(&cli, &sniffs)?
    } else {
        file_mode(&cli, &sniffs)?
    };

    let output = reporter.report(&results);
    // stdin fix mode prints the source instead of a report
    if !(cli.fix && cli.files.is_empty()) {
        print!("{}", output);
    }

    let failed = results.iter().any(|r| r.errors() > 0);
    Ok(if failed {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    })
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "docsniff=debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_env("DOCSNIFF_LOG").unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .init();
}

/// Build the configuration from --config, then apply --sniffs and --year.
fn load_config(cli: &Cli) -> Result<Config> {
    let mut config = match &cli.config {
        Some(path) => Config::load(path)
            .with_context(|| format!("failed to load config {}", path.display()))?,
        None => Config::default(),
    };
    if !cli.sniffs.is_empty() {
        config.sniffs = cli.sniffs.clone();
    }
    let configured = config.copyright.as_ref().and_then(|c| c.current_year);
    let year = resolve_year(cli.year, configured, chrono::Local::now().year());
    Ok(config.with_current_year(year))
}

/// --year wins over the config file, which wins over today's year.
fn resolve_year(flag: Option<i32>, configured: Option<i32>, today: i32) -> i32 {
    flag.or(configured).unwrap_or(today)
}

/// stdin mode: check (or fix) one source read from stdin.
fn stdin_mode(cli: &Cli, sniffs: &[Box<dyn Sniff>]) -> Result<Vec<FileResult>> {
    let mut input = String::new();
    io::stdin()
        .read_to_string(&mut input)
        .context("failed to read stdin")?;

    if cli.fix {
        let outcome = fixer::fix_source(&input, sniffs)?;
        print!("{}", outcome.source);
        return Ok(vec![FileResult::new("STDIN", outcome.remaining)]);
    }

    let diagnostics = docsniff::check(&input, sniffs)?;
    Ok(vec![FileResult::new("STDIN", diagnostics)])
}

/// file mode: check (or fix) every matched file.
fn file_mode(cli: &Cli, sniffs: &[Box<dyn Sniff>]) -> Result<Vec<FileResult>> {
    let input_files = expand_globs(&cli.files)?;

    let mut results = Vec::new();
    for path in &input_files {
        let content = fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?;
        let display_name = path.to_string_lossy().to_string();

        let diagnostics = if cli.fix {
            match fixer::fix_source(&content, sniffs) {
                Ok(outcome) => {
                    if outcome.source != content {
                        fs::write(path, &outcome.source)
                            .with_context(|| format!("failed to write {}", path.display()))?;
                        info!(file = %display_name, fixed = outcome.fixed, "fixed");
                    }
                    outcome.remaining
                }
                Err(e) => {
                    warn!("skipping {}: {}", display_name, e);
                    continue;
                }
            }
        } else {
            match lexer::tokenize(&content) {
                Ok(stream) => sniffs::run(&stream, sniffs),
                Err(e) => {
                    warn!("skipping {}: {}", display_name, e);
                    continue;
                }
            }
        };

        debug!(
            file = %display_name,
            errors = diagnostics.iter().filter(|d| d.severity == Severity::Error).count(),
            "checked"
        );
        results.push(FileResult::new(display_name, diagnostics));
    }
    Ok(results)
}

/// File extensions recognized as PHP sources.
const SUPPORTED_EXTENSIONS: &[&str] = &["php", "inc"];

/// Expand glob patterns into a list of real file paths.
/// Also handles bare directory paths by scanning for supported file types.
fn expand_globs(patterns: &[String]) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    for pattern in patterns {
        let path = Path::new(pattern);
        if path.is_file() {
            files.push(path.to_path_buf());
            continue;
        }
        // Directories are scanned non-recursively
        if path.is_dir() {
            let entries = fs::read_dir(path)
                .with_context(|| format!("failed to read directory: {}", path.display()))?;
            for entry in entries.flatten() {
                let p = entry.path();
                if p.is_file() && has_supported_extension(&p) {
                    files.push(p);
                }
            }
            continue;
        }
        let matches: Vec<_> = glob::glob(pattern)
            .with_context(|| format!("invalid glob pattern: {}", pattern))?
            .filter_map(|r| r.ok())
            .filter(|p| p.is_file())
            .collect();
        if matches.is_empty() {
            warn!("no files matched: {}", pattern);
        }
        files.extend(matches);
    }
    // Sort for deterministic output
    files.sort();
    files.dedup();
    Ok(files)
}

fn has_supported_extension(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|ext| SUPPORTED_EXTENSIONS.contains(&ext))
}
