// tests/git_repository_test.rs
use git2::{Oid, Repository as RawRepository, Signature};
use std::fs;
use std::path::Path;
use tempfile::TempDir;
use tex_release::git::{Git2Repository, Repository};
use tex_release::ReleaseError;

fn init_repo(dir: &Path) -> RawRepository {
    let repo = RawRepository::init(dir).expect("Could not init git repo");
    {
        let mut config = repo.config().expect("Could not get config");
        config
            .set_str("user.name", "Test User")
            .expect("Could not set user.name");
        config
            .set_str("user.email", "test@example.com")
            .expect("Could not set user.email");
    }
    repo
}

fn commit_file(repo: &RawRepository, name: &str, content: &str, message: &str) -> Oid {
    let workdir = repo.workdir().expect("repo has a workdir");
    fs::write(workdir.join(name), content).expect("Could not write file");

    let mut index = repo.index().expect("Could not get index");
    index
        .add_path(Path::new(name))
        .expect("Could not add file to index");
    index.write().expect("Could not write index");

    let tree_id = index.write_tree().expect("Could not write tree");
    let tree = repo.find_tree(tree_id).expect("Could not find tree");
    let sig = Signature::now("Test User", "test@example.com").unwrap();

    let parent = repo.head().ok().and_then(|h| h.peel_to_commit().ok());
    let parents: Vec<&git2::Commit> = parent.iter().collect();

    repo.commit(Some("HEAD"), &sig, &sig, message, &tree, &parents)
        .expect("Could not create commit")
}

fn tag(repo: &RawRepository, name: &str, oid: Oid) {
    repo.tag_lightweight(name, &repo.find_object(oid, None).unwrap(), false)
        .expect("Could not create tag");
}

#[test]
fn test_latest_tag_none_without_tags() {
    let dir = TempDir::new().unwrap();
    let raw = init_repo(dir.path());
    commit_file(&raw, "main.tex", "\\documentclass{article}", "Initial commit");

    let repo = Git2Repository::open(dir.path()).unwrap();
    assert_eq!(repo.latest_tag().unwrap(), None);
}

#[test]
fn test_latest_tag_none_on_unborn_head() {
    let dir = TempDir::new().unwrap();
    init_repo(dir.path());

    let repo = Git2Repository::open(dir.path()).unwrap();
    assert_eq!(repo.latest_tag().unwrap(), None);
}

#[test]
fn test_latest_tag_is_nearest_reachable_tag() {
    let dir = TempDir::new().unwrap();
    let raw = init_repo(dir.path());

    let first = commit_file(&raw, "main.tex", "v1", "Initial commit");
    tag(&raw, "1.0.0", first);
    let second = commit_file(&raw, "main.tex", "v2", "Second draft");
    tag(&raw, "1.1.0", second);
    commit_file(&raw, "main.tex", "v3", "Untagged edits");

    let repo = Git2Repository::open(dir.path()).unwrap();
    assert_eq!(repo.latest_tag().unwrap().as_deref(), Some("1.1.0"));
}

#[test]
fn test_latest_tag_with_annotated_tag() {
    let dir = TempDir::new().unwrap();
    let raw = init_repo(dir.path());
    let oid = commit_file(&raw, "main.tex", "content", "Initial commit");

    let sig = Signature::now("Test User", "test@example.com").unwrap();
    raw.tag("v2.3.4", &raw.find_object(oid, None).unwrap(), &sig, "Release", false)
        .unwrap();

    let repo = Git2Repository::open(dir.path()).unwrap();
    assert_eq!(repo.latest_tag().unwrap().as_deref(), Some("v2.3.4"));
}

#[test]
fn test_stage_and_commit() {
    let dir = TempDir::new().unwrap();
    let raw = init_repo(dir.path());
    commit_file(&raw, "main.tex", "draft", "Initial commit");

    fs::write(dir.path().join("main.tex"), "final").unwrap();
    fs::write(dir.path().join("chapter1.tex"), "intro").unwrap();

    let repo = Git2Repository::open(dir.path()).unwrap();
    repo.stage_all().unwrap();
    let oid = repo
        .commit("Prepare for tag release 0.0.1.\n", false)
        .unwrap();

    let head = raw.head().unwrap().peel_to_commit().unwrap();
    assert_eq!(head.id(), oid);
    assert_eq!(head.message(), Some("Prepare for tag release 0.0.1.\n"));
    assert!(head.tree().unwrap().get_name("chapter1.tex").is_some());
}

#[test]
fn test_stage_all_skips_ignored_files() {
    let dir = TempDir::new().unwrap();
    let raw = init_repo(dir.path());
    commit_file(&raw, ".gitignore", "*.pdf\n*.aux\n", "Ignore build output");

    fs::write(dir.path().join("main.pdf"), "%PDF-1.5").unwrap();
    fs::write(dir.path().join("main.aux"), "aux").unwrap();
    fs::write(dir.path().join("main.tex"), "body").unwrap();

    let repo = Git2Repository::open(dir.path()).unwrap();
    repo.stage_all().unwrap();

    let index = raw.index().unwrap();
    assert!(index.get_path(Path::new("main.tex"), 0).is_some());
    assert!(index.get_path(Path::new("main.pdf"), 0).is_none());
    assert!(index.get_path(Path::new("main.aux"), 0).is_none());
}

#[test]
fn test_stage_all_records_deletions() {
    let dir = TempDir::new().unwrap();
    let raw = init_repo(dir.path());
    commit_file(&raw, "old.tex", "obsolete", "Initial commit");
    commit_file(&raw, "main.tex", "body", "Add main");

    fs::remove_file(dir.path().join("old.tex")).unwrap();

    let repo = Git2Repository::open(dir.path()).unwrap();
    repo.stage_all().unwrap();
    repo.commit("Remove old chapter", false).unwrap();

    let head = raw.head().unwrap().peel_to_commit().unwrap();
    assert!(head.tree().unwrap().get_name("old.tex").is_none());
}

#[test]
fn test_commit_without_changes_fails() {
    let dir = TempDir::new().unwrap();
    let raw = init_repo(dir.path());
    commit_file(&raw, "main.tex", "content", "Initial commit");

    let repo = Git2Repository::open(dir.path()).unwrap();
    repo.stage_all().unwrap();

    let err = repo.commit("Prepare for tag release 0.0.1.\n", false).unwrap_err();
    assert!(matches!(err, ReleaseError::Commit(_)));

    // allowed explicitly
    assert!(repo.commit("Prepare for tag release 0.0.1.\n", true).is_ok());
}

#[test]
fn test_current_branch_and_detached_head() {
    let dir = TempDir::new().unwrap();
    let raw = init_repo(dir.path());
    let oid = commit_file(&raw, "main.tex", "content", "Initial commit");

    let repo = Git2Repository::open(dir.path()).unwrap();
    let branch = repo.current_branch().unwrap();
    assert!(!branch.is_empty());

    raw.set_head_detached(oid).unwrap();
    assert!(repo.current_branch().is_err());
}

#[test]
fn test_push_branch_to_local_bare_remote() {
    let remote_dir = TempDir::new().unwrap();
    let bare = RawRepository::init_bare(remote_dir.path()).unwrap();

    let dir = TempDir::new().unwrap();
    let raw = init_repo(dir.path());
    let oid = commit_file(&raw, "main.tex", "content", "Initial commit");
    raw.remote("origin", remote_dir.path().to_str().unwrap())
        .unwrap();

    let repo = Git2Repository::open(dir.path()).unwrap();
    let branch = repo.current_branch().unwrap();
    repo.push_branch("origin", &branch).unwrap();

    let pushed = bare
        .find_reference(&format!("refs/heads/{}", branch))
        .unwrap();
    assert_eq!(pushed.target(), Some(oid));
}

#[test]
fn test_push_to_missing_remote_fails() {
    let dir = TempDir::new().unwrap();
    let raw = init_repo(dir.path());
    commit_file(&raw, "main.tex", "content", "Initial commit");

    let repo = Git2Repository::open(dir.path()).unwrap();
    let err = repo.push_branch("origin", "main").unwrap_err();
    assert!(matches!(err, ReleaseError::Remote(_)));
}

#[test]
fn test_fetch_tags_from_local_remote() {
    // upstream: a repository with a tagged commit
    let upstream_dir = TempDir::new().unwrap();
    let upstream = init_repo(upstream_dir.path());
    let oid = commit_file(&upstream, "main.tex", "content", "Initial commit");
    tag(&upstream, "0.3.0", oid);

    let dir = TempDir::new().unwrap();
    let raw = init_repo(dir.path());
    raw.remote("origin", upstream_dir.path().to_str().unwrap())
        .unwrap();

    let repo = Git2Repository::open(dir.path()).unwrap();
    repo.fetch_tags("origin").unwrap();

    let fetched = raw.find_reference("refs/tags/0.3.0").unwrap();
    assert_eq!(fetched.target(), Some(oid));
}

#[test]
fn test_fetch_tags_keeps_diverging_local_tag() {
    let upstream_dir = TempDir::new().unwrap();
    let upstream = init_repo(upstream_dir.path());
    let remote_oid = commit_file(&upstream, "main.tex", "remote", "Remote commit");
    tag(&upstream, "0.3.0", remote_oid);

    let dir = TempDir::new().unwrap();
    let raw = init_repo(dir.path());
    let local_oid = commit_file(&raw, "main.tex", "local", "Local commit");
    tag(&raw, "0.3.0", local_oid);
    raw.remote("origin", upstream_dir.path().to_str().unwrap())
        .unwrap();

    let repo = Git2Repository::open(dir.path()).unwrap();
    // whether libgit2 reports the rejected update or skips it, the tag stays
    let _ = repo.fetch_tags("origin");

    let local = raw.find_reference("refs/tags/0.3.0").unwrap();
    assert_eq!(local.target(), Some(local_oid));
}

#[test]
fn test_fetch_tags_from_missing_remote_fails() {
    let dir = TempDir::new().unwrap();
    init_repo(dir.path());

    let repo = Git2Repository::open(dir.path()).unwrap();
    assert!(repo.fetch_tags("origin").is_err());
}
