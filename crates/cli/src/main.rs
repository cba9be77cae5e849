// muster CLI - headless workforce roster reconciliation

mod exit_codes;
mod util;

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::{Parser, Subcommand};

use muster_recon::engine::{run, SourceSet};
use muster_recon::error::MusterError;
use muster_recon::RosterConfig;

use exit_codes::{EXIT_CACHE_CORRUPT, EXIT_ERROR, EXIT_INVALID_CONFIG, EXIT_SOURCE};

#[derive(Parser)]
#[command(name = "muster")]
#[command(about = "Workforce roster reconciliation (headless)")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run a reconciliation pass from a TOML config file
    #[command(after_help = "\
Examples:
  muster run muster.toml
  muster run muster.toml --json
  muster run muster.toml --output pass.json --rebuild")]
    Run {
        /// Path to the muster.toml config file
        config: PathBuf,

        /// Output JSON to stdout in addition to the human summary
        #[arg(long)]
        json: bool,

        /// Write JSON output to file
        #[arg(long)]
        output: Option<PathBuf>,

        /// Force a service-date cache rebuild regardless of staleness
        #[arg(long)]
        rebuild: bool,
    },

    /// Validate a config without running
    #[command(after_help = "\
Examples:
  muster validate muster.toml")]
    Validate {
        /// Path to the muster.toml config file
        config: PathBuf,
    },
}

struct CliError {
    code: u8,
    message: String,
    hint: Option<String>,
}

fn cli_err(code: u8, message: impl Into<String>) -> CliError {
    CliError {
        code,
        message: message.into(),
        hint: None,
    }
}

/// Map an engine error to its exit code.
fn engine_exit_code(err: &MusterError) -> u8 {
    match err {
        MusterError::ConfigParse(_) | MusterError::ConfigValidation(_) => EXIT_INVALID_CONFIG,
        MusterError::MissingHeader { .. } | MusterError::Io(_) => EXIT_SOURCE,
        MusterError::CacheCorrupt { .. } => EXIT_CACHE_CORRUPT,
    }
}

fn engine_err(err: MusterError) -> CliError {
    let hint = match err {
        MusterError::CacheCorrupt { .. } => {
            Some("remove the cache file or re-run with --rebuild".to_string())
        }
        _ => None,
    };
    CliError {
        code: engine_exit_code(&err),
        message: err.to_string(),
        hint,
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Run {
            config,
            json,
            output,
            rebuild,
        } => cmd_run(config, json, output, rebuild),
        Commands::Validate { config } => cmd_validate(config),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {}", err.message);
            if let Some(hint) = err.hint {
                eprintln!("hint: {hint}");
            }
            ExitCode::from(err.code)
        }
    }
}

fn cmd_run(
    config_path: PathBuf,
    json_output: bool,
    output_file: Option<PathBuf>,
    force_rebuild: bool,
) -> Result<(), CliError> {
    let config_str = std::fs::read_to_string(&config_path)
        .map_err(|e| cli_err(EXIT_SOURCE, format!("cannot read config: {e}")))?;
    let mut config = RosterConfig::from_toml(&config_str).map_err(engine_err)?;

    // Source and cache paths are relative to the config file's directory
    let base_dir = config_path.parent().unwrap_or_else(|| Path::new("."));
    config.cache.file = base_dir.join(&config.cache.file).display().to_string();
    if force_rebuild {
        config.cache.rebuild = true;
    }

    let history_path = base_dir.join(&config.sources.history);
    let sources = SourceSet {
        roster: read_source(base_dir, &config.sources.roster)?,
        history: read_source(base_dir, &config.sources.history)?,
        summary: read_source(base_dir, &config.sources.summary)?,
        history_modified: std::fs::metadata(&history_path)
            .ok()
            .and_then(|m| m.modified().ok()),
    };

    let today = chrono::Local::now().date_naive();
    let result = run(&config, &sources, today).map_err(engine_err)?;

    let json_str = serde_json::to_string_pretty(&result)
        .map_err(|e| cli_err(EXIT_ERROR, format!("JSON serialization error: {e}")))?;

    if let Some(ref path) = output_file {
        std::fs::write(path, &json_str)
            .map_err(|e| cli_err(EXIT_SOURCE, format!("cannot write output: {e}")))?;
        eprintln!("wrote {}", path.display());
    }

    if json_output {
        println!("{json_str}");
    }

    // Human summary to stderr
    let t = &result.totals;
    eprintln!(
        "pass '{}': {} people across {} units — {} zones, {} roles",
        result.meta.config_name, t.people, t.units, t.zones, t.roles,
    );

    let d = &result.diagnostics;
    let skipped = d.roster_rows_skipped + d.history_rows_skipped + d.summary_rows_skipped;
    if skipped > 0 || d.unparsable_dates > 0 {
        eprintln!(
            "absorbed: {} rows without ids ({} roster, {} history, {} summary), {} unparsable dates",
            skipped,
            d.roster_rows_skipped,
            d.history_rows_skipped,
            d.summary_rows_skipped,
            d.unparsable_dates,
        );
    }

    let events = &result.events;
    if !events.birthdays.is_empty() || !events.anniversaries.is_empty() {
        eprintln!(
            "{}: {} birthday(s), {} service anniversary(ies)",
            result.meta.run_date,
            events.birthdays.len(),
            events.anniversaries.len(),
        );
    }

    Ok(())
}

fn read_source(base_dir: &Path, file: &str) -> Result<String, CliError> {
    util::read_file_as_utf8(&base_dir.join(file)).map_err(|e| cli_err(EXIT_SOURCE, e))
}

fn cmd_validate(config_path: PathBuf) -> Result<(), CliError> {
    let config_str = std::fs::read_to_string(&config_path)
        .map_err(|e| cli_err(EXIT_SOURCE, format!("cannot read config: {e}")))?;

    match RosterConfig::from_toml(&config_str) {
        Ok(config) => {
            eprintln!(
                "valid: pass '{}' over {} + {} + {}",
                config.name, config.sources.roster, config.sources.history, config.sources.summary,
            );
            Ok(())
        }
        Err(e) => Err(engine_err(e)),
    }
}
