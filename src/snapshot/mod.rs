// Snapshot pipeline: validate -> query -> write manifest -> copy -> archive

mod archive;
mod copier;
mod manifest;

pub use archive::create_archive;
pub use copier::copy_files;
pub use manifest::{MANIFEST_FILENAME, write_manifest};

use crate::config::{Config, CopyErrorPolicy};
use crate::context::SnapshotReport;
use crate::git::GitRepo;
use crate::ui;
use crate::{log_debug, log_info};
use anyhow::{Context, Result, anyhow};
use chrono::{DateTime, Local};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Validation and archiving failures with a stable, user-facing shape
#[derive(Debug, Error)]
pub enum SnapshotError {
    #[error("Source directory does not exist: {0}")]
    SourceMissing(PathBuf),
    #[error("Not a valid Git repository: {0}")]
    NotARepository(PathBuf),
}

/// Per-run settings resolved from config and CLI flags
#[derive(Debug, Clone, Copy)]
pub struct SnapshotOptions {
    /// Policy for files that cannot be read or copied
    pub on_copy_error: CopyErrorPolicy,
    /// Retain the uncompressed staging directory after archiving
    pub keep_staging: bool,
}

impl SnapshotOptions {
    pub fn from_config(config: &Config) -> Self {
        Self {
            on_copy_error: config.copy.on_error,
            keep_staging: config.archive.keep_staging,
        }
    }
}

/// Validates the source repository and prepares the backup root.
///
/// The source is checked before anything is written under the backup
/// destination, so an invalid source leaves the destination untouched.
///
/// # Returns
///
/// A Result containing the repository handle plus normalized absolute
/// source and backup-root paths, or an error.
pub fn validate_paths(source: &Path, backup_root: &Path) -> Result<(GitRepo, PathBuf, PathBuf)> {
    if !source.exists() {
        return Err(SnapshotError::SourceMissing(source.to_path_buf()).into());
    }

    let repo = GitRepo::open(source)
        .map_err(|_| SnapshotError::NotARepository(source.to_path_buf()))?;
    let source_root = repo.repo_path().clone();

    fs::create_dir_all(backup_root).with_context(|| {
        format!(
            "Failed to create backup directory: {}",
            backup_root.display()
        )
    })?;
    let backup_root = backup_root
        .canonicalize()
        .with_context(|| format!("Failed to resolve path: {}", backup_root.display()))?;

    Ok((repo, source_root, backup_root))
}

/// Runs the whole snapshot pipeline and returns a report on success.
pub fn run(source: &Path, backup_root: &Path, options: &SnapshotOptions) -> Result<SnapshotReport> {
    // A single timestamp drives the archive name and the manifest header,
    // so everything written during one run agrees on it.
    let started_at = Local::now();

    log_debug!(
        "Snapshot starting: source={:?}, backup_root={:?}, options={:?}",
        source,
        backup_root,
        options
    );

    let (repo, source_root, backup_root) = validate_paths(source, backup_root)?;

    let status = repo.worktree_status()?;
    log_info!(
        "Worktree status: {} modified, {} untracked, {} staged",
        status.modified.len(),
        status.untracked.len(),
        status.staged.len()
    );
    if status.is_clean() {
        ui::print_info("No uncommitted changes found; archiving a manifest-only snapshot.");
    }

    let stem = resolve_archive_stem(&backup_root, &started_at)?;
    let staging_dir = backup_root.join(&stem);
    fs::create_dir_all(&staging_dir).with_context(|| {
        format!("Failed to create staging directory: {}", staging_dir.display())
    })?;

    write_manifest(&staging_dir, &repo, &status, &started_at)?;

    let copy = copy_files(
        &status.all_paths(),
        &source_root,
        &staging_dir,
        options.on_copy_error,
    )?;

    let archive_path = create_archive(&backup_root, &stem, options.keep_staging)?;

    Ok(SnapshotReport {
        archive_path,
        status,
        copy,
    })
}

/// Picks the archive/staging base name for this run: the minute-granularity
/// timestamp, with a counter suffix when a previous run in the same minute
/// already claimed the name.
fn resolve_archive_stem(backup_root: &Path, started_at: &DateTime<Local>) -> Result<String> {
    let base = started_at.format("%Y%m%d_%H%M").to_string();

    let mut stem = base.clone();
    for n in 1..100u32 {
        let taken = backup_root.join(format!("{stem}.zip")).exists()
            || backup_root.join(&stem).exists();
        if !taken {
            return Ok(stem);
        }
        stem = format!("{base}_{n:02}");
    }

    Err(anyhow!(
        "Could not find a free archive name under {} for timestamp {}",
        backup_root.display(),
        base
    ))
}
