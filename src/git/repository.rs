use crate::context::{CommitSummary, WorktreeStatus};
use crate::git::files::get_worktree_status;
use crate::log_debug;
use anyhow::{Context as AnyhowContext, Result};
use chrono::{DateTime, FixedOffset};
use git2::Repository;
use std::path::{Path, PathBuf};

/// Represents a Git repository and provides methods for interacting with it.
#[derive(Debug)]
pub struct GitRepo {
    repo_path: PathBuf,
}

impl GitRepo {
    /// Creates a new `GitRepo` instance from a local path, verifying that
    /// the path holds a valid repository.
    ///
    /// # Arguments
    ///
    /// * `repo_path` - The path to the Git repository.
    ///
    /// # Returns
    ///
    /// A Result containing the `GitRepo` instance or an error.
    pub fn open(repo_path: &Path) -> Result<Self> {
        Repository::open(repo_path)
            .with_context(|| format!("Not a valid Git repository: {}", repo_path.display()))?;

        let repo_path = repo_path
            .canonicalize()
            .with_context(|| format!("Failed to resolve path: {}", repo_path.display()))?;

        log_debug!("Opened repository at {:?}", repo_path);
        Ok(Self { repo_path })
    }

    /// Open the repository at the stored path
    pub fn open_repo(&self) -> Result<Repository, git2::Error> {
        Repository::open(&self.repo_path)
    }

    /// Returns the repository path
    pub fn repo_path(&self) -> &PathBuf {
        &self.repo_path
    }

    /// Retrieves the current branch name.
    ///
    /// # Returns
    ///
    /// A Result containing the branch name as a String or an error.
    pub fn get_current_branch(&self) -> Result<String> {
        let repo = self.open_repo()?;
        let branch_name = match repo.head() {
            Ok(head) => head.shorthand().unwrap_or("HEAD detached").to_string(),
            // Unborn branch: HEAD exists as a symbolic ref but points nowhere
            Err(_) => repo
                .find_reference("HEAD")
                .ok()
                .and_then(|r| r.symbolic_target().map(ToString::to_string))
                .and_then(|t| t.strip_prefix("refs/heads/").map(ToString::to_string))
                .unwrap_or_else(|| "HEAD detached".to_string()),
        };
        log_debug!("Current branch: {}", branch_name);
        Ok(branch_name)
    }

    /// Retrieves the URL of the `origin` remote, or of the first configured
    /// remote when no `origin` exists.
    ///
    /// # Returns
    ///
    /// A Result containing an Option with the remote URL or an error.
    pub fn get_remote_url(&self) -> Result<Option<String>> {
        let repo = self.open_repo()?;

        if let Ok(origin) = repo.find_remote("origin") {
            return Ok(origin.url().map(ToString::to_string));
        }

        let remotes = repo.remotes()?;
        let Some(name) = remotes.iter().flatten().next() else {
            log_debug!("No remote configured");
            return Ok(None);
        };

        let remote = repo.find_remote(name)?;
        Ok(remote.url().map(ToString::to_string))
    }

    /// Retrieves the commit currently at HEAD.
    ///
    /// # Returns
    ///
    /// A Result containing an Option with the `CommitSummary`, or None for
    /// a repository with no commits yet.
    pub fn get_latest_commit(&self) -> Result<Option<CommitSummary>> {
        let repo = self.open_repo()?;

        let Ok(head) = repo.head() else {
            log_debug!("Repository has no commits yet");
            return Ok(None);
        };

        let commit = head
            .peel_to_commit()
            .context("Failed to resolve HEAD to a commit")?;
        let author = commit.author();
        let author_line = match author.email() {
            Some(email) => format!("{} <{}>", author.name().unwrap_or_default(), email),
            None => author.name().unwrap_or_default().to_string(),
        };

        Ok(Some(CommitSummary {
            hash: commit.id().to_string(),
            author: author_line,
            date: format_commit_time(&commit.time()),
            message: commit.message().unwrap_or_default().trim_end().to_string(),
        }))
    }

    /// Retrieves the uncommitted state of the working tree.
    ///
    /// # Returns
    ///
    /// A Result containing the `WorktreeStatus` or an error.
    pub fn worktree_status(&self) -> Result<WorktreeStatus> {
        let repo = self.open_repo()?;
        get_worktree_status(&repo)
    }
}

/// Formats a git2 timestamp in the author's local offset.
fn format_commit_time(time: &git2::Time) -> String {
    let offset = FixedOffset::east_opt(time.offset_minutes() * 60);
    match (DateTime::from_timestamp(time.seconds(), 0), offset) {
        (Some(utc), Some(offset)) => utc
            .with_timezone(&offset)
            .format("%Y-%m-%d %H:%M:%S %z")
            .to_string(),
        (Some(utc), None) => utc.format("%Y-%m-%d %H:%M:%S %z").to_string(),
        (None, _) => time.seconds().to_string(),
    }
}
