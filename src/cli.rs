//! Command-line interface for dirsort.
//!
//! Parses arguments, checks the target folder, loads configuration, opens the
//! move log and hands everything to [`FileOrganizer`].

use crate::config::Config;
use crate::file_organizer::{FileOrganizer, OrganizeReport};
use crate::move_log::{DEFAULT_LOG_FILE, MoveLog};
use crate::output::OutputFormatter;
use clap::Parser;
use std::path::{Path, PathBuf};

/// Sort the files of a folder into category subfolders by extension.
#[derive(Parser, Debug, Clone)]
#[command(name = "dirsort", version, about)]
pub struct Cli {
    /// Target folder to organize
    pub folder: PathBuf,

    /// Show actions without moving files
    #[arg(long)]
    pub dry_run: bool,

    /// Configuration file (defaults to .dirsortrc.toml, then ~/.config/dirsort/config.toml)
    #[arg(short, long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Where to append the move log
    #[arg(long, value_name = "PATH")]
    pub log_file: Option<PathBuf>,

    /// Print the report as JSON instead of a summary
    #[arg(long)]
    pub json: bool,

    /// Enable debug diagnostics on stderr
    #[arg(short, long)]
    pub verbose: bool,
}

/// What a CLI run ended with.
#[derive(Debug)]
pub enum RunOutcome {
    /// The folder was processed.
    Organized {
        report: OrganizeReport,
        log_file: PathBuf,
    },
    /// The target path is not a directory; nothing was touched.
    FolderNotFound(PathBuf),
}

impl Cli {
    pub fn setup_logging(&self) {
        let level = if self.verbose {
            tracing::Level::DEBUG
        } else {
            tracing::Level::INFO
        };

        tracing_subscriber::fmt()
            .with_max_level(level)
            .with_writer(std::io::stderr)
            .with_target(false)
            .init();
    }

    /// The log file path: `--log-file`, then the config, then the default.
    pub fn resolve_log_file(&self, config: &Config) -> PathBuf {
        self.log_file
            .clone()
            .or_else(|| config.log.file.clone())
            .unwrap_or_else(|| PathBuf::from(DEFAULT_LOG_FILE))
    }
}

/// Runs one organize pass as described by `cli`.
///
/// A missing or non-directory target is not an error: it is reported as
/// [`RunOutcome::FolderNotFound`] before any configuration or log file is
/// touched.
pub fn run(cli: &Cli) -> Result<RunOutcome, String> {
    if !cli.folder.is_dir() {
        return Ok(RunOutcome::FolderNotFound(cli.folder.clone()));
    }

    let config = Config::load(cli.config.as_deref())
        .map_err(|e| format!("Error loading configuration: {}", e))?;
    let table = config
        .extension_table()
        .map_err(|e| format!("Error loading configuration: {}", e))?;
    let filters = config
        .compile_filters()
        .map_err(|e| format!("Error compiling filters: {}", e))?;

    let log_file = cli.resolve_log_file(&config);
    let mut log = MoveLog::open(&log_file)
        .map_err(|e| format!("Error opening log file {}: {}", log_file.display(), e))?;

    let mut organizer = FileOrganizer::new(table).with_filters(filters);
    if !cli.json {
        organizer = organizer.with_progress(OutputFormatter::create_progress_bar());
    }

    tracing::info!(
        "{} {}",
        if cli.dry_run { "Analyzing" } else { "Organizing" },
        cli.folder.display()
    );
    let report = organizer
        .organize(&cli.folder, cli.dry_run, &mut log)
        .map_err(|e| e.to_string())?;

    Ok(RunOutcome::Organized { report, log_file })
}

/// Prints the outcome of [`run`] to stdout.
pub fn print_outcome(outcome: &RunOutcome, json: bool) -> Result<(), String> {
    match outcome {
        RunOutcome::FolderNotFound(path) => {
            OutputFormatter::error(&format!("Folder not found: {}", path.display()));
        }
        RunOutcome::Organized { report, log_file } => {
            if json {
                let value = OutputFormatter::json_report(report, log_file);
                let text = serde_json::to_string_pretty(&value)
                    .map_err(|e| format!("Error rendering report: {}", e))?;
                println!("{}", text);
            } else {
                OutputFormatter::summary(report, log_file);
            }
        }
    }
    Ok(())
}

/// Runs one pass without a progress bar and with an explicit log path.
pub fn organize_folder(
    folder: &Path,
    dry_run: bool,
    config: Option<&Path>,
    log_file: &Path,
) -> Result<RunOutcome, String> {
    let cli = Cli {
        folder: folder.to_path_buf(),
        dry_run,
        config: config.map(Path::to_path_buf),
        log_file: Some(log_file.to_path_buf()),
        json: true,
        verbose: false,
    };
    run(&cli)
}
