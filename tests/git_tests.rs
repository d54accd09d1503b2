mod test_utils;

use std::fs;
use test_utils::{commit_index, setup_git_repo, stage_file, write_file};

#[test]
fn test_clean_repo_has_empty_status() {
    let (_temp_dir, git_repo) = setup_git_repo();

    let status = git_repo.worktree_status().expect("Failed to get status");

    assert!(status.modified.is_empty());
    assert!(status.untracked.is_empty());
    assert!(status.staged.is_empty());
    assert!(status.is_clean());
    assert!(status.all_paths().is_empty());
}

#[test]
fn test_modified_file_is_reported() {
    let (temp_dir, git_repo) = setup_git_repo();

    write_file(temp_dir.path(), "initial.txt", "Changed content");

    let status = git_repo.worktree_status().expect("Failed to get status");

    assert_eq!(status.modified, vec!["initial.txt".to_string()]);
    assert!(status.untracked.is_empty());
    assert!(status.staged.is_empty());
}

#[test]
fn test_untracked_file_is_reported() {
    let (temp_dir, git_repo) = setup_git_repo();

    write_file(temp_dir.path(), "notes.md", "scratch");

    let status = git_repo.worktree_status().expect("Failed to get status");

    assert!(status.modified.is_empty());
    assert_eq!(status.untracked, vec!["notes.md".to_string()]);
    assert!(status.staged.is_empty());
}

#[test]
fn test_untracked_files_in_directories_are_listed_individually() {
    let (temp_dir, git_repo) = setup_git_repo();

    write_file(temp_dir.path(), "docs/drafts/todo.md", "todo");
    write_file(temp_dir.path(), "docs/drafts/ideas.md", "ideas");

    let status = git_repo.worktree_status().expect("Failed to get status");

    assert_eq!(
        status.untracked,
        vec![
            "docs/drafts/ideas.md".to_string(),
            "docs/drafts/todo.md".to_string(),
        ]
    );
}

#[test]
fn test_staged_file_is_reported() {
    let (temp_dir, git_repo) = setup_git_repo();

    stage_file(temp_dir.path(), "new_file.txt", "New content");

    let status = git_repo.worktree_status().expect("Failed to get status");

    assert!(status.modified.is_empty());
    assert!(status.untracked.is_empty());
    assert_eq!(status.staged, vec!["new_file.txt".to_string()]);
}

#[test]
fn test_deleted_tracked_file_counts_as_modified() {
    let (temp_dir, git_repo) = setup_git_repo();

    fs::remove_file(temp_dir.path().join("initial.txt")).expect("Failed to delete file");

    let status = git_repo.worktree_status().expect("Failed to get status");

    assert_eq!(status.modified, vec!["initial.txt".to_string()]);
}

#[test]
fn test_status_lists_are_sorted() {
    let (temp_dir, git_repo) = setup_git_repo();

    write_file(temp_dir.path(), "zebra.txt", "z");
    write_file(temp_dir.path(), "alpha.txt", "a");
    write_file(temp_dir.path(), "mango.txt", "m");

    let status = git_repo.worktree_status().expect("Failed to get status");

    assert_eq!(
        status.untracked,
        vec![
            "alpha.txt".to_string(),
            "mango.txt".to_string(),
            "zebra.txt".to_string(),
        ]
    );
}

#[test]
fn test_all_paths_deduplicates_across_lists() {
    let (temp_dir, git_repo) = setup_git_repo();

    // Stage a change, then modify the file again: it shows up as both
    // staged and modified but must be copied only once
    stage_file(temp_dir.path(), "initial.txt", "Staged content");
    write_file(temp_dir.path(), "initial.txt", "Modified after staging");

    let status = git_repo.worktree_status().expect("Failed to get status");

    assert_eq!(status.modified, vec!["initial.txt".to_string()]);
    assert_eq!(status.staged, vec!["initial.txt".to_string()]);
    assert_eq!(status.all_paths(), vec!["initial.txt".to_string()]);
}

#[test]
fn test_current_branch_name() {
    let (_temp_dir, git_repo) = setup_git_repo();

    let branch = git_repo.get_current_branch().expect("Failed to get branch");
    assert_eq!(branch, "main");
}

#[test]
fn test_remote_url_absent_by_default() {
    let (_temp_dir, git_repo) = setup_git_repo();

    let url = git_repo.get_remote_url().expect("Failed to query remote");
    assert!(url.is_none());
}

#[test]
fn test_remote_url_reported_when_configured() {
    let (temp_dir, git_repo) = setup_git_repo();

    test_utils::add_origin(temp_dir.path(), "https://example.com/backup/repo.git");

    let url = git_repo.get_remote_url().expect("Failed to query remote");
    assert_eq!(url.as_deref(), Some("https://example.com/backup/repo.git"));
}

#[test]
fn test_latest_commit_metadata() {
    let (temp_dir, git_repo) = setup_git_repo();

    stage_file(temp_dir.path(), "second.txt", "Second");
    commit_index(temp_dir.path(), "Second commit");

    let commit = git_repo
        .get_latest_commit()
        .expect("Failed to get latest commit")
        .expect("Repository should have commits");

    assert_eq!(commit.hash.len(), 40);
    assert!(commit.author.contains("Test User"));
    assert!(commit.author.contains("test@example.com"));
    assert_eq!(commit.message, "Second commit");
    assert!(!commit.date.is_empty());
}

#[test]
fn test_open_rejects_non_repository() {
    let temp_dir = tempfile::TempDir::new().expect("Failed to create temporary directory");

    let result = git_snap::GitRepo::open(temp_dir.path());
    assert!(result.is_err());
}
