use serde::Serialize;
use std::path::PathBuf;

/// Uncommitted state of a working tree, as three lists of paths relative
/// to the repository root. Lists are path-sorted; a file may appear in
/// more than one list (e.g. staged and then modified again).
#[derive(Serialize, Debug, Clone, Default)]
pub struct WorktreeStatus {
    pub modified: Vec<String>,
    pub untracked: Vec<String>,
    pub staged: Vec<String>,
}

impl WorktreeStatus {
    /// True when there is nothing uncommitted to snapshot.
    pub fn is_clean(&self) -> bool {
        self.modified.is_empty() && self.untracked.is_empty() && self.staged.is_empty()
    }

    /// Deduplicated, sorted union of the three lists — the set of files
    /// the copier replicates.
    pub fn all_paths(&self) -> Vec<String> {
        let mut paths: Vec<String> = self
            .modified
            .iter()
            .chain(self.untracked.iter())
            .chain(self.staged.iter())
            .cloned()
            .collect();
        paths.sort();
        paths.dedup();
        paths
    }
}

/// Metadata of the commit currently at HEAD.
#[derive(Serialize, Debug, Clone)]
pub struct CommitSummary {
    pub hash: String,
    pub author: String,
    pub date: String,
    pub message: String,
}

/// Result of the copy stage.
#[derive(Debug, Clone, Default)]
pub struct CopyOutcome {
    pub copied: usize,
    /// Paths that could not be copied, with the reason each was skipped.
    pub skipped: Vec<(String, String)>,
}

/// Result of a completed snapshot run.
#[derive(Debug, Clone)]
pub struct SnapshotReport {
    pub archive_path: PathBuf,
    pub status: WorktreeStatus,
    pub copy: CopyOutcome,
}
