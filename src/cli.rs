/// CLI argument definitions for the `driftscan` command.
///
/// The whole configuration surface is flags with fixed defaults; there
/// is no config file and no environment lookup.
use std::path::PathBuf;

use clap::Parser;

#[derive(Parser)]
#[command(
    name = "driftscan",
    version,
    about = "Analyze git history for AI-assisted code drift",
    long_about = "\
Analyze feature-branch history for AI-assisted code drift.

Scans local feature branches (everything except main/master), classifies
each commit in the analysis window, and aggregates five proxies:

  large commits      added+deleted lines above --large-lines
  sprawling commits  changed files above --sprawl-files
  test-first         commit touches both test and production files
  avg files/commit   mean changed files over the analyzed set
  avg lines/commit   mean added+deleted lines over the analyzed set

Insight bands:
  large      > 40% critical, > 20% warning
  sprawling  > 25% critical, > 10% warning
  test-first > 50% good, < 30% warning
  avg lines  > 1000 critical, > 500 warning

Writes drift-commits.json and drift-summary.json to the current
directory on every run, replacing previous output."
)]
pub struct Cli {
    /// Directory inside the repository to analyze (default: current directory)
    pub path: Option<PathBuf>,

    /// Analysis window in days
    #[arg(long, default_value = "30")]
    pub days: u32,

    /// Maximum commits to analyze across all branches (head-first cap)
    #[arg(long, default_value = "100")]
    pub max_commits: usize,

    /// Added+deleted lines above which a commit counts as large
    #[arg(long, default_value = "500")]
    pub large_lines: u64,

    /// Changed files above which a commit counts as sprawling
    #[arg(long, default_value = "10")]
    pub sprawl_files: usize,

    /// Extra test-file glob, tried after the built-in patterns (repeatable)
    #[arg(long = "test-pattern", value_name = "GLOB")]
    pub test_patterns: Vec<String>,

    /// Print the summary as JSON to stdout instead of the table report
    #[arg(long)]
    pub json: bool,
}
