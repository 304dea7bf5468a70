use globset::GlobMatcher;
use serde::Serialize;

use crate::config::Config;

/// Marker git prints in place of line counts for binary files.
const BINARY_MARKER: &str = "-";

/// Aggregate diff stats for one commit plus the derived classifications.
/// The booleans are pure functions of the counts and the thresholds in
/// effect at analysis time.
#[derive(Clone, Debug, Serialize)]
pub struct CommitStats {
    pub additions: u64,
    pub deletions: u64,
    pub files_changed: usize,
    pub binary_files: usize,
    pub test_files: usize,
    pub prod_files: usize,
    /// Commit touches at least one test file and at least one non-test
    /// file. Co-occurrence only: this cannot tell test-first from
    /// test-after.
    pub test_first: bool,
    /// additions + deletions strictly above the configured line threshold.
    pub large: bool,
    /// files changed strictly above the configured file threshold.
    pub sprawling: bool,
    /// additions / deletions; `None` when nothing was deleted.
    pub change_ratio: Option<f64>,
}

/// True when `path` matches any configured test glob. Matchers are tried
/// in configured order and the first hit short-circuits.
pub fn is_test_path(path: &str, matchers: &[GlobMatcher]) -> bool {
    matchers.iter().any(|m| m.is_match(path))
}

/// Parse tab-delimited numstat lines (`added\tdeleted\tpath`) into one
/// `CommitStats`.
///
/// Binary lines (marker instead of counts) bump `files_changed` and
/// `binary_files` but contribute nothing else. Lines with no path are
/// skipped entirely. Non-numeric counts on a non-binary line default
/// to 0 rather than poisoning the commit.
pub fn parse_numstat(text: &str, config: &Config, matchers: &[GlobMatcher]) -> CommitStats {
    let mut additions: u64 = 0;
    let mut deletions: u64 = 0;
    let mut files_changed = 0usize;
    let mut binary_files = 0usize;
    let mut test_files = 0usize;
    let mut prod_files = 0usize;

    for line in text.lines() {
        let mut parts = line.split('\t');
        let (Some(added), Some(deleted), Some(path)) = (parts.next(), parts.next(), parts.next())
        else {
            continue;
        };
        let path = path.trim();
        if path.is_empty() {
            continue;
        }

        if added == BINARY_MARKER || deleted == BINARY_MARKER {
            files_changed += 1;
            binary_files += 1;
            continue;
        }

        additions += added.trim().parse::<u64>().unwrap_or(0);
        deletions += deleted.trim().parse::<u64>().unwrap_or(0);
        files_changed += 1;

        if is_test_path(path, matchers) {
            test_files += 1;
        } else {
            prod_files += 1;
        }
    }

    let total_lines = additions + deletions;
    CommitStats {
        test_first: test_files > 0 && prod_files > 0,
        large: total_lines > config.large_commit_lines,
        sprawling: files_changed > config.sprawling_commit_files,
        change_ratio: if deletions == 0 {
            None
        } else {
            Some(additions as f64 / deletions as f64)
        },
        additions,
        deletions,
        files_changed,
        binary_files,
        test_files,
        prod_files,
    }
}

#[cfg(test)]
#[path = "diffstat_test.rs"]
mod tests;
