use super::*;
use std::fs;
use std::time::SystemTime;

use git2::{Repository, Signature, Time};

/// Authored far enough in the past to fall outside any test window.
const ANCIENT: i64 = 1_000_000;

fn create_test_repo() -> (tempfile::TempDir, Repository) {
    let dir = tempfile::tempdir().unwrap();
    let repo = Repository::init(dir.path()).unwrap();

    let mut config = repo.config().unwrap();
    config.set_str("user.name", "Test").unwrap();
    config.set_str("user.email", "test@test.com").unwrap();

    (dir, repo)
}

fn now_epoch() -> i64 {
    SystemTime::now()
        .duration_since(SystemTime::UNIX_EPOCH)
        .unwrap()
        .as_secs() as i64
}

fn commit_at(
    repo: &Repository,
    update_ref: &str,
    parents: &[git2::Oid],
    files: &[(&str, &[u8])],
    message: &str,
    epoch: i64,
) -> git2::Oid {
    let sig = Signature::new("Test", "test@test.com", &Time::new(epoch, 0)).unwrap();
    let mut index = repo.index().unwrap();

    for (path, content) in files {
        let full_path = repo.workdir().unwrap().join(path);
        if let Some(parent) = full_path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(&full_path, content).unwrap();
        index.add_path(Path::new(path)).unwrap();
    }

    index.write().unwrap();
    let tree_oid = index.write_tree().unwrap();
    let tree = repo.find_tree(tree_oid).unwrap();

    let parent_commits: Vec<git2::Commit> = parents
        .iter()
        .map(|oid| repo.find_commit(*oid).unwrap())
        .collect();
    let parent_refs: Vec<&git2::Commit> = parent_commits.iter().collect();

    repo.commit(Some(update_ref), &sig, &sig, message, &tree, &parent_refs)
        .unwrap()
}

/// `n` distinct lines prefixed with `prefix`, trailing newline included.
fn content(prefix: &str, n: usize) -> Vec<u8> {
    (1..=n)
        .map(|i| format!("{prefix}-{i}\n"))
        .collect::<String>()
        .into_bytes()
}

#[test]
fn scenario_mixed_feature_branch() {
    let (dir, repo) = create_test_repo();
    let now = now_epoch();

    // Base lands on the primary branch, outside the window.
    let base = commit_at(
        &repo,
        "HEAD",
        &[],
        &[
            ("lib/core.js", &content("core-old", 10)),
            ("lib/big.js", &content("big-old", 20)),
            ("src/app.js", &content("app-old", 5)),
        ],
        "base",
        ANCIENT,
    );

    // +50/-10 on one file: neither large nor sprawling.
    let c1 = commit_at(
        &repo,
        "refs/heads/feature/work",
        &[base],
        &[("lib/core.js", &content("core-new", 50))],
        "rework core",
        now,
    );
    // 7 files, +20/-5, test and production paths: sprawling + test-first.
    let c2 = commit_at(
        &repo,
        "refs/heads/feature/work",
        &[c1],
        &[
            ("src/app.js", &content("app-new", 5)),
            ("src/a.js", &content("a", 3)),
            ("src/b.js", &content("b", 3)),
            ("src/c.js", &content("c", 2)),
            ("src/d.js", &content("d", 2)),
            ("tests/app.test.js", &content("t1", 3)),
            ("tests/b.test.js", &content("t2", 2)),
        ],
        "wire app with tests",
        now + 1,
    );
    // +90/-20 on one file: large.
    commit_at(
        &repo,
        "refs/heads/feature/work",
        &[c2],
        &[("lib/big.js", &content("big-new", 90))],
        "rewrite big",
        now + 2,
    );

    let config = Config {
        large_commit_lines: 100,
        sprawling_commit_files: 5,
        ..Config::default()
    };
    let git_repo = GitRepo::open(dir.path()).unwrap();
    let analysis = analyze(&git_repo, &config).unwrap();
    let summary = &analysis.summary;

    assert_eq!(summary.total_commits, 3);
    assert_eq!(summary.branches_analyzed, 1);
    assert_eq!(summary.large_pct, 33.33);
    assert_eq!(summary.sprawling_pct, 33.33);
    assert_eq!(summary.test_first_pct, 33.33);
    assert_eq!(summary.avg_files, 3.0);
    assert_eq!(summary.avg_lines, 65.0);

    // Log order is newest-first; spot-check the classifications.
    let big = &analysis.commits[0];
    assert_eq!(big.record.message, "rewrite big");
    assert!(big.stats.large && !big.stats.sprawling && !big.stats.test_first);

    let wire = &analysis.commits[1];
    assert_eq!(wire.stats.files_changed, 7);
    assert_eq!(wire.stats.test_files, 2);
    assert_eq!(wire.stats.prod_files, 5);
    assert!(wire.stats.sprawling && wire.stats.test_first && !wire.stats.large);

    let rework = &analysis.commits[2];
    assert_eq!(rework.stats.additions, 50);
    assert_eq!(rework.stats.deletions, 10);
    assert!(!rework.stats.large && !rework.stats.sprawling);

    assert_eq!(summary.commits_per_branch.len(), 1);
    assert_eq!(summary.commits_per_branch[0].branch, "feature/work");
    assert_eq!(summary.commits_per_branch[0].commits, 3);
}

#[test]
fn scenario_no_feature_branches() {
    let (dir, repo) = create_test_repo();
    commit_at(
        &repo,
        "HEAD",
        &[],
        &[("a.txt", b"hello\n")],
        "base",
        now_epoch(),
    );

    let git_repo = GitRepo::open(dir.path()).unwrap();
    let analysis = analyze(&git_repo, &Config::default()).unwrap();
    let summary = &analysis.summary;

    assert_eq!(summary.total_commits, 0);
    assert_eq!(summary.branches_analyzed, 0);
    assert_eq!(summary.large_pct, 0.0);
    assert_eq!(summary.sprawling_pct, 0.0);
    assert_eq!(summary.test_first_pct, 0.0);
    assert_eq!(summary.avg_files, 0.0);
    assert_eq!(summary.avg_lines, 0.0);
    assert!(analysis.commits.is_empty());

    let insights = crate::insights::generate(summary, &analysis.commits);
    assert!(insights.warnings.is_empty(), "zero-commit runs emit no warnings");
}

#[test]
fn scenario_binary_file_commit() {
    let (dir, repo) = create_test_repo();
    let now = now_epoch();
    let base = commit_at(&repo, "HEAD", &[], &[("a.txt", b"text\n")], "base", ANCIENT);
    commit_at(
        &repo,
        "refs/heads/feature/assets",
        &[base],
        &[
            ("assets/logo.png", &[0u8, 159, 146, 150, 0, 3][..]),
            ("src/use_logo.js", &content("logo", 4)),
        ],
        "add logo",
        now,
    );

    let git_repo = GitRepo::open(dir.path()).unwrap();
    let analysis = analyze(&git_repo, &Config::default()).unwrap();

    assert_eq!(analysis.commits.len(), 1);
    let stats = &analysis.commits[0].stats;
    assert_eq!(stats.files_changed, 2);
    assert_eq!(stats.binary_files, 1);
    assert_eq!(stats.additions, 4, "binary file adds no lines");
    assert_eq!(stats.deletions, 0);
    assert_eq!(stats.prod_files, 1, "binary file is neither test nor production");
    assert_eq!(stats.test_files, 0);
}

#[test]
fn shared_commit_attributed_to_first_branch() {
    let (dir, repo) = create_test_repo();
    let now = now_epoch();
    let base = commit_at(&repo, "HEAD", &[], &[("a.txt", b"base\n")], "base", ANCIENT);
    let shared = commit_at(
        &repo,
        "refs/heads/feature/alpha",
        &[base],
        &[("b.txt", b"shared\n")],
        "shared work",
        now,
    );
    // Second branch points at the same commit.
    repo.branch("feature/beta", &repo.find_commit(shared).unwrap(), false)
        .unwrap();

    let git_repo = GitRepo::open(dir.path()).unwrap();
    let analysis = analyze(&git_repo, &Config::default()).unwrap();

    assert_eq!(analysis.commits.len(), 1, "shared commit appears exactly once");
    assert_eq!(
        analysis.commits[0].record.branch, "feature/alpha",
        "attributed to the branch enumerated first"
    );
    assert_eq!(analysis.summary.branches_analyzed, 2);
    assert_eq!(analysis.summary.commits_per_branch[0].commits, 1);
    assert_eq!(analysis.summary.commits_per_branch[1].commits, 0);
}

#[test]
fn commit_cap_truncates_head_first() {
    let (dir, repo) = create_test_repo();
    let now = now_epoch();
    let base = commit_at(&repo, "HEAD", &[], &[("a.txt", b"base\n")], "base", ANCIENT);

    let mut parent = base;
    for i in 0..5 {
        parent = commit_at(
            &repo,
            "refs/heads/feature/busy",
            &[parent],
            &[("file.txt", &content("v", i + 1))],
            &format!("step {i}"),
            now + i as i64,
        );
    }

    let config = Config {
        max_commits: 2,
        ..Config::default()
    };
    let git_repo = GitRepo::open(dir.path()).unwrap();
    let analysis = analyze(&git_repo, &config).unwrap();

    assert_eq!(analysis.commits.len(), 2, "cap is a hard truncation");
    assert_eq!(analysis.summary.total_commits, 2);
    // Newest first from git log, so the head of the list is the last step.
    assert_eq!(analysis.commits[0].record.message, "step 4");
}

#[test]
fn reruns_are_idempotent() {
    let (dir, repo) = create_test_repo();
    let now = now_epoch();
    let base = commit_at(&repo, "HEAD", &[], &[("a.txt", b"base\n")], "base", ANCIENT);
    commit_at(
        &repo,
        "refs/heads/feature/one",
        &[base],
        &[("b.txt", &content("b", 12))],
        "work",
        now,
    );

    let git_repo = GitRepo::open(dir.path()).unwrap();
    let config = Config::default();
    let first = analyze(&git_repo, &config).unwrap();
    let second = analyze(&git_repo, &config).unwrap();

    assert_eq!(
        serde_json::to_string(&first.summary).unwrap(),
        serde_json::to_string(&second.summary).unwrap(),
        "unchanged repo and config must reproduce the summary exactly"
    );
    assert_eq!(
        serde_json::to_string(&first.commits).unwrap(),
        serde_json::to_string(&second.commits).unwrap()
    );
}

#[test]
fn run_fails_outside_a_repository() {
    let dir = tempfile::tempdir().unwrap();
    let sub = dir.path().join("plain");
    fs::create_dir_all(&sub).unwrap();

    let err = run(&sub, &Config::default(), false).unwrap_err();
    assert!(
        err.to_string().contains("not a git repository"),
        "should mention the missing repository, got: {err}"
    );
}
