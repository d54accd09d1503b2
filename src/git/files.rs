use crate::context::WorktreeStatus;
use crate::log_debug;
use anyhow::{Context, Result};
use git2::{Repository, StatusOptions};

/// Retrieves the full uncommitted state of the working tree as three
/// path-sorted lists (modified, untracked, staged).
pub fn get_worktree_status(repo: &Repository) -> Result<WorktreeStatus> {
    Ok(WorktreeStatus {
        modified: get_modified_files(repo)?,
        untracked: get_untracked_files(repo)?,
        staged: get_staged_files(repo)?,
    })
}

/// Gets tracked files with uncommitted content changes in the working tree.
///
/// A tracked file deleted on disk still counts as modified here; the copy
/// stage deals with the missing source per its failure policy.
///
/// # Returns
///
/// A Result containing a Vec of repo-relative paths or an error.
pub fn get_modified_files(repo: &Repository) -> Result<Vec<String>> {
    log_debug!("Getting modified files");
    let mut modified = Vec::new();

    let mut opts = StatusOptions::new();
    opts.include_untracked(true);
    opts.exclude_submodules(true);
    let statuses = repo.statuses(Some(&mut opts))?;

    for entry in statuses.iter() {
        let status = entry.status();
        if status.is_wt_modified() || status.is_wt_deleted() {
            let path = entry.path().context("Could not get path")?;
            modified.push(path.to_string());
        }
    }

    modified.sort();
    log_debug!("Found {} modified files", modified.len());
    Ok(modified)
}

/// Gets only untracked files from the repository (new files not in the
/// index and not ignored).
///
/// # Returns
///
/// A Result containing a Vec of repo-relative paths or an error.
pub fn get_untracked_files(repo: &Repository) -> Result<Vec<String>> {
    log_debug!("Getting untracked files");
    let mut untracked = Vec::new();

    let mut opts = StatusOptions::new();
    opts.include_untracked(true);
    opts.recurse_untracked_dirs(true);
    opts.exclude_submodules(true);
    let statuses = repo.statuses(Some(&mut opts))?;

    for entry in statuses.iter() {
        let status = entry.status();
        if status.is_wt_new() && !status.is_index_new() {
            let path = entry.path().context("Could not get path")?;
            untracked.push(path.to_string());
        }
    }

    untracked.sort();
    log_debug!("Found {} untracked files", untracked.len());
    Ok(untracked)
}

/// Gets files staged for the next commit (index differs from HEAD).
///
/// # Returns
///
/// A Result containing a Vec of repo-relative paths or an error.
pub fn get_staged_files(repo: &Repository) -> Result<Vec<String>> {
    log_debug!("Getting staged files");
    let mut staged = Vec::new();

    let mut opts = StatusOptions::new();
    opts.include_untracked(true);
    opts.exclude_submodules(true);
    let statuses = repo.statuses(Some(&mut opts))?;

    for entry in statuses.iter() {
        let status = entry.status();
        if status.is_index_new() || status.is_index_modified() || status.is_index_deleted() {
            let path = entry.path().context("Could not get path")?;
            staged.push(path.to_string());
        }
    }

    staged.sort();
    log_debug!("Found {} staged files", staged.len());
    Ok(staged)
}
