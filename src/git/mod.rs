use std::error::Error;
use std::path::{Path, PathBuf};
use std::process::Command;

use git2::Repository;

/// Result of a read-only history query.
///
/// The git CLI reports both "nothing matched" and "the query blew up" as
/// exit codes plus stderr text; callers need to tell them apart because a
/// failed query is worth a warning while an empty one is routine. Neither
/// propagates as an error: the pipeline decides how to degrade.
#[derive(Debug)]
pub enum QueryOutcome {
    /// Non-empty stdout from a successful query.
    Output(String),
    /// Successful query with nothing to report.
    Empty,
    /// The query failed; the payload is the tool's complaint.
    Failed(String),
}

impl QueryOutcome {
    fn from_command(mut cmd: Command) -> QueryOutcome {
        match cmd.output() {
            Ok(out) if out.status.success() => {
                let text = String::from_utf8_lossy(&out.stdout).into_owned();
                if text.trim().is_empty() {
                    QueryOutcome::Empty
                } else {
                    QueryOutcome::Output(text)
                }
            }
            Ok(out) => {
                let stderr = String::from_utf8_lossy(&out.stderr).trim().to_string();
                QueryOutcome::Failed(stderr)
            }
            Err(err) => QueryOutcome::Failed(err.to_string()),
        }
    }
}

/// Primary branches are never analyzed; drift is measured on feature work.
pub fn is_primary_branch(name: &str) -> bool {
    name.eq_ignore_ascii_case("main") || name.eq_ignore_ascii_case("master")
}

pub struct GitRepo {
    root: PathBuf,
    remote_url: Option<String>,
}

impl GitRepo {
    pub fn open(path: &Path) -> Result<Self, Box<dyn Error>> {
        let repo = Repository::discover(path)?;
        let root = repo
            .workdir()
            .ok_or("bare repositories are not supported")?
            .to_path_buf();
        // Remote is labeling only; a repo without one is fine.
        let remote_url = repo
            .find_remote("origin")
            .ok()
            .and_then(|r| r.url().map(|u| u.to_string()));
        Ok(Self { root, remote_url })
    }

    #[allow(dead_code)]
    pub fn is_git_repo(path: &Path) -> bool {
        Repository::discover(path).is_ok()
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn remote_url(&self) -> Option<&str> {
        self.remote_url.as_deref()
    }

    fn git(&self) -> Command {
        let mut cmd = Command::new("git");
        cmd.current_dir(&self.root);
        cmd
    }

    /// List local branch names, excluding the primary branch.
    /// Returns one name per line in `git branch` enumeration order.
    pub fn feature_branches(&self) -> QueryOutcome {
        let mut cmd = self.git();
        cmd.args(["branch", "--list", "--format=%(refname:short)"]);
        match QueryOutcome::from_command(cmd) {
            QueryOutcome::Output(text) => {
                let names: Vec<&str> = text
                    .lines()
                    .map(str::trim)
                    .filter(|l| !l.is_empty() && !is_primary_branch(l))
                    .collect();
                if names.is_empty() {
                    QueryOutcome::Empty
                } else {
                    QueryOutcome::Output(names.join("\n"))
                }
            }
            other => other,
        }
    }

    /// Commits reachable from `branch` authored within the last `days`
    /// days, one per line: `hash|author date|author name|subject`.
    pub fn branch_log(&self, branch: &str, days: u32) -> QueryOutcome {
        let mut cmd = self.git();
        cmd.args(["log", branch, "--pretty=format:%H|%aI|%an|%s"]);
        cmd.arg(format!("--since={days} days ago"));
        QueryOutcome::from_command(cmd)
    }

    /// Per-file diff stats for one commit: `added\tdeleted\tpath` lines,
    /// with `-` in place of the counts for binary files.
    pub fn commit_numstat(&self, hash: &str) -> QueryOutcome {
        let mut cmd = self.git();
        cmd.args(["show", "--numstat", "--format=", hash]);
        QueryOutcome::from_command(cmd)
    }
}

#[cfg(test)]
#[path = "mod_test.rs"]
mod tests;
