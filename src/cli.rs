use crate::config::{Config, CopyErrorPolicy};
use crate::log_debug;
use crate::snapshot::{self, SnapshotOptions};
use crate::ui;
use clap::builder::{Styles, styling::AnsiColor};
use clap::{Parser, crate_version};
use std::path::PathBuf;

const LOG_FILE: &str = "git-snap-debug.log";

/// CLI structure defining the positional paths and global arguments
#[derive(Parser, Debug)]
#[command(
    author,
    version = crate_version!(),
    about = "git-snap: snapshot a Git working tree's uncommitted changes",
    long_about = "git-snap copies every modified, staged, and untracked file out of a Git \
working tree into a timestamped ZIP archive, together with a manifest describing the \
repository state at snapshot time.",
    styles = get_styles(),
)]
pub struct Cli {
    /// Path to the Git repository to snapshot
    #[arg(value_name = "SOURCE_GIT_DIRECTORY")]
    pub source: PathBuf,

    /// Directory the timestamped archive is written into (created if absent)
    #[arg(value_name = "BACKUP_DESTINATION")]
    pub backup_root: PathBuf,

    /// Log debug messages to a file
    #[arg(
        short = 'l',
        long = "log",
        help = "Log debug messages to a file"
    )]
    pub log: bool,

    /// Specify a custom log file path
    #[arg(
        long = "log-file",
        help = "Specify a custom log file path"
    )]
    pub log_file: Option<String>,

    /// Suppress non-essential output (per-file progress, spinners, etc.)
    #[arg(
        short = 'q',
        long = "quiet",
        help = "Suppress non-essential output"
    )]
    pub quiet: bool,

    /// Override the configured policy for files that cannot be copied
    #[arg(
        long = "on-copy-error",
        value_enum,
        help = "What to do when a listed file cannot be copied (skip or abort)"
    )]
    pub on_copy_error: Option<CopyErrorPolicy>,

    /// Keep the uncompressed staging directory next to the archive
    #[arg(
        long = "keep-staging",
        help = "Keep the uncompressed staging directory after archiving"
    )]
    pub keep_staging: bool,
}

impl Cli {
    /// Layer CLI overrides on top of the loaded configuration
    pub fn apply_to_config(&self, config: &mut Config) {
        if let Some(policy) = self.on_copy_error {
            config.copy.on_error = policy;
        }
        if self.keep_staging {
            config.archive.keep_staging = true;
        }
    }
}

/// Define custom styles for Clap
fn get_styles() -> Styles {
    Styles::styled()
        .header(AnsiColor::Magenta.on_default().bold())
        .usage(AnsiColor::Cyan.on_default().bold())
        .literal(AnsiColor::Green.on_default().bold())
        .placeholder(AnsiColor::Yellow.on_default())
        .valid(AnsiColor::Blue.on_default().bold())
        .invalid(AnsiColor::Red.on_default().bold())
        .error(AnsiColor::Red.on_default().bold())
}

/// Parse the command-line arguments.
///
/// Help and version requests exit 0; anything else that fails to parse
/// (wrong arity, unknown flags) prints the usage and exits 1.
pub fn parse_args() -> Cli {
    match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            use clap::error::ErrorKind;
            let code = match e.kind() {
                ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => 0,
                _ => 1,
            };
            let _ = e.print();
            std::process::exit(code);
        }
    }
}

/// Main function to parse arguments and run the snapshot
pub fn main() -> anyhow::Result<()> {
    let cli = parse_args();

    if cli.log {
        crate::logger::enable_logging();
        let log_file = cli.log_file.as_deref().unwrap_or(LOG_FILE);
        crate::logger::set_log_file(log_file)?;
    } else {
        crate::logger::disable_logging();
    }

    if cli.quiet {
        ui::set_quiet_mode(true);
    }

    handle_snapshot(&cli)
}

/// Handle the snapshot run
fn handle_snapshot(cli: &Cli) -> anyhow::Result<()> {
    log_debug!(
        "Handling snapshot with source: {:?}, backup_root: {:?}, on_copy_error: {:?}, keep_staging: {}",
        cli.source,
        cli.backup_root,
        cli.on_copy_error,
        cli.keep_staging
    );

    ui::print_version(crate_version!());
    ui::print_newline();

    let mut config = Config::load_for_repo(&cli.source)?;
    cli.apply_to_config(&mut config);
    let options = SnapshotOptions::from_config(&config);

    let report = snapshot::run(&cli.source, &cli.backup_root, &options)?;

    if !report.copy.skipped.is_empty() {
        ui::print_warning(&format!(
            "{} file(s) could not be copied and were skipped",
            report.copy.skipped.len()
        ));
    }

    ui::print_newline();
    ui::print_success(&format!(
        "Backup completed successfully: {}",
        report.archive_path.display()
    ));

    Ok(())
}
