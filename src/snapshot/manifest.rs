use crate::context::WorktreeStatus;
use crate::git::GitRepo;
use crate::log_debug;
use anyhow::{Context, Result};
use chrono::{DateTime, Local};
use std::fmt::Write as _;
use std::fs;
use std::path::{Path, PathBuf};

/// Name of the manifest written at the root of every snapshot
pub const MANIFEST_FILENAME: &str = "backup_info.txt";

/// Writes the snapshot manifest into the staging directory.
///
/// The manifest records the run timestamp, repository identity, latest
/// commit, and the three status lists. Calling it again with the same
/// repository state and timestamp produces byte-identical output, and any
/// existing manifest is overwritten.
///
/// # Returns
///
/// A Result containing the manifest path or an error.
pub fn write_manifest(
    staging_dir: &Path,
    repo: &GitRepo,
    status: &WorktreeStatus,
    created_at: &DateTime<Local>,
) -> Result<PathBuf> {
    let manifest_path = staging_dir.join(MANIFEST_FILENAME);
    let content = render_manifest(repo, status, created_at)?;

    fs::write(&manifest_path, content)
        .with_context(|| format!("Failed to write manifest: {}", manifest_path.display()))?;

    log_debug!("Manifest written to {:?}", manifest_path);
    Ok(manifest_path)
}

fn render_manifest(
    repo: &GitRepo,
    status: &WorktreeStatus,
    created_at: &DateTime<Local>,
) -> Result<String> {
    let mut out = String::new();

    writeln!(
        out,
        "Backup created on: {}",
        created_at.format("%Y-%m-%d %H:%M:%S")
    )?;

    let remote = repo
        .get_remote_url()?
        .unwrap_or_else(|| "No remote URL found".to_string());
    writeln!(out, "Repository: {remote}")?;
    writeln!(out, "Current branch: {}", repo.get_current_branch()?)?;

    match repo.get_latest_commit()? {
        Some(commit) => {
            writeln!(out, "Last commit: {}", commit.hash)?;
            writeln!(out, "Author: {}", commit.author)?;
            writeln!(out, "Date: {}", commit.date)?;
            writeln!(out, "Message: {}", commit.message)?;
        }
        None => {
            writeln!(out, "Last commit: (no commits yet)")?;
        }
    }

    writeln!(out)?;
    write_section(&mut out, "Modified files:", &status.modified)?;
    writeln!(out)?;
    write_section(&mut out, "Untracked files:", &status.untracked)?;
    writeln!(out)?;
    write_section(&mut out, "Staged files:", &status.staged)?;

    Ok(out)
}

/// Writes one labeled section; an empty list still gets its label so every
/// section is present in every manifest.
fn write_section(out: &mut String, label: &str, paths: &[String]) -> Result<()> {
    writeln!(out, "{label}")?;
    if paths.is_empty() {
        writeln!(out, "(none)")?;
    } else {
        for path in paths {
            writeln!(out, "{path}")?;
        }
    }
    Ok(())
}
