use std::error::Error;

use globset::{Glob, GlobMatcher};
use serde::Serialize;

/// Default analysis window in days.
pub const DEFAULT_WINDOW_DAYS: u32 = 30;

/// Default cap on analyzed commits across all branches.
pub const DEFAULT_MAX_COMMITS: usize = 100;

/// A commit is "large" when its added+deleted line total exceeds this.
pub const DEFAULT_LARGE_COMMIT_LINES: u64 = 500;

/// A commit is "sprawling" when it touches more files than this.
pub const DEFAULT_SPRAWLING_FILES: usize = 10;

/// Built-in test-file globs, tried in order. Any match classifies a path
/// as a test file; order only affects short-circuiting, not the outcome.
pub const DEFAULT_TEST_PATTERNS: &[&str] = &[
    "**/*.test.*",
    "**/*.spec.*",
    "**/__tests__/**",
    "**/tests/**",
    "**/test/**",
    "**/*_test.*",
    "**/test_*",
];

/// Run configuration, fixed at start and passed by reference into each
/// stage. Serialized verbatim into the summary artifact so a report is
/// always readable alongside the thresholds that produced it.
#[derive(Clone, Serialize)]
pub struct Config {
    /// Only commits authored within the last `window_days` days count.
    pub window_days: u32,
    /// Head-first cap on the deduplicated commit set (a cap, not a sample).
    pub max_commits: usize,
    /// Strict lower bound for the `large` classification (lines).
    pub large_commit_lines: u64,
    /// Strict lower bound for the `sprawling` classification (files).
    pub sprawling_commit_files: usize,
    /// Ordered test-file globs; see `DEFAULT_TEST_PATTERNS`.
    pub test_patterns: Vec<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            window_days: DEFAULT_WINDOW_DAYS,
            max_commits: DEFAULT_MAX_COMMITS,
            large_commit_lines: DEFAULT_LARGE_COMMIT_LINES,
            sprawling_commit_files: DEFAULT_SPRAWLING_FILES,
            test_patterns: DEFAULT_TEST_PATTERNS
                .iter()
                .map(|p| p.to_string())
                .collect(),
        }
    }
}

impl Config {
    /// Compile the test globs, preserving configured order. A bad pattern
    /// (user-supplied via the CLI) fails the run up front rather than
    /// silently misclassifying every commit.
    pub fn test_matchers(&self) -> Result<Vec<GlobMatcher>, Box<dyn Error>> {
        let mut matchers = Vec::with_capacity(self.test_patterns.len());
        for pattern in &self.test_patterns {
            let glob = Glob::new(pattern)
                .map_err(|e| format!("invalid test pattern {pattern:?}: {e}"))?;
            matchers.push(glob.compile_matcher());
        }
        Ok(matchers)
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
