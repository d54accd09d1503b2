//! git-snap - Git working tree snapshot utility
//!
//! Copies a repository's uncommitted state (modified, staged, and untracked
//! files) into a timestamped ZIP archive with a plain-text manifest
//! describing the repository at snapshot time.

// Allow certain clippy warnings that are stylistic
#![allow(clippy::uninlined_format_args)] // Style preference
#![allow(clippy::items_after_statements)] // Locally-scoped use statements are fine

pub mod cli;
pub mod config;
pub mod context;
pub mod git;
pub mod logger;
pub mod snapshot;
pub mod ui;

// Re-export important structs and functions for easier testing
pub use config::{Config, CopyErrorPolicy};
pub use context::{CommitSummary, CopyOutcome, SnapshotReport, WorktreeStatus};
pub use git::GitRepo;
pub use snapshot::{MANIFEST_FILENAME, SnapshotError, SnapshotOptions};
