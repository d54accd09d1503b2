use crate::config::CopyErrorPolicy;
use crate::context::CopyOutcome;
use crate::ui;
use crate::{log_debug, log_warn};
use anyhow::{Context, Result, bail};
use filetime::FileTime;
use std::fs;
use std::path::Path;

/// Replicates the listed files from the source tree into the staging
/// directory, mirroring their relative paths.
///
/// Each copy preserves the source file's permission bits and modification
/// time. A file that cannot be copied is handled per `policy`: skipped
/// with a warning, or failing the whole run. Existing destination files
/// are overwritten silently.
///
/// # Returns
///
/// A Result containing the `CopyOutcome` (copied/skipped counts) or an error.
pub fn copy_files(
    paths: &[String],
    source_root: &Path,
    staging_dir: &Path,
    policy: CopyErrorPolicy,
) -> Result<CopyOutcome> {
    log_debug!("Copying {} files into {:?}", paths.len(), staging_dir);
    let mut outcome = CopyOutcome::default();

    for relative in paths {
        let source_file = source_root.join(relative);
        let dest_file = staging_dir.join(relative);

        match copy_one(&source_file, &dest_file) {
            Ok(()) => {
                outcome.copied += 1;
                ui::print_message(&format!("Backed up: {relative}"));
            }
            Err(e) => match policy {
                CopyErrorPolicy::Abort => {
                    return Err(e).with_context(|| format!("Failed to back up {relative}"));
                }
                CopyErrorPolicy::Skip => {
                    let reason = format!("{e:#}");
                    log_warn!("Skipping {}: {}", relative, reason);
                    ui::print_warning(&format!("Skipping {relative}: {reason}"));
                    outcome.skipped.push((relative.clone(), reason));
                }
            },
        }
    }

    log_debug!(
        "Copy stage done: {} copied, {} skipped",
        outcome.copied,
        outcome.skipped.len()
    );
    Ok(outcome)
}

/// Copies a single file, creating intermediate directories and carrying
/// over permissions and the modification timestamp.
fn copy_one(source: &Path, dest: &Path) -> Result<()> {
    let metadata = fs::metadata(source).context("source file is missing or unreadable")?;
    if !metadata.is_file() {
        bail!("not a regular file");
    }

    if let Some(parent) = dest.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("failed to create directory {}", parent.display()))?;
    }

    // fs::copy carries the permission bits; the mtime is restored separately
    fs::copy(source, dest).with_context(|| format!("failed to copy to {}", dest.display()))?;

    let mtime = FileTime::from_last_modification_time(&metadata);
    filetime::set_file_mtime(dest, mtime)
        .with_context(|| format!("failed to set mtime on {}", dest.display()))?;

    Ok(())
}
