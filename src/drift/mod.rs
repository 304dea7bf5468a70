use std::collections::HashSet;
use std::error::Error;
use std::path::Path;

use serde::Serialize;

use crate::commits::{self, CommitRecord};
use crate::config::Config;
use crate::diffstat::{self, CommitStats};
use crate::git::{GitRepo, QueryOutcome};
use crate::insights;
use crate::report;
use crate::util::round2;

/// A commit joined with its diff stats. Serialized flat into the
/// detailed-metrics artifact.
#[derive(Clone, Debug, Serialize)]
pub struct AnalyzedCommit {
    #[serde(flatten)]
    pub record: CommitRecord,
    #[serde(flatten)]
    pub stats: CommitStats,
}

/// Commits attributed to one branch after deduplication.
#[derive(Clone, Debug, Serialize)]
pub struct BranchCount {
    pub branch: String,
    pub commits: usize,
}

/// Aggregate metrics over the analyzed set. Percentages are against the
/// analyzed set size, which the commit cap may make smaller than the
/// full population.
#[derive(Clone, Debug, Serialize)]
pub struct Summary {
    pub total_commits: usize,
    pub branches_analyzed: usize,
    pub large_pct: f64,
    pub sprawling_pct: f64,
    pub test_first_pct: f64,
    pub avg_files: f64,
    pub avg_lines: f64,
    pub branches: Vec<String>,
    pub commits_per_branch: Vec<BranchCount>,
}

pub struct Analysis {
    pub commits: Vec<AnalyzedCommit>,
    pub summary: Summary,
}

/// Entry point for the `driftscan` run: open the repository, analyze,
/// write artifacts, render the report. Only failure to find a repository
/// (or an unexpected error) propagates; per-branch and per-commit
/// failures degrade with a warning inside `analyze`.
pub fn run(path: &Path, config: &Config, json: bool) -> Result<(), Box<dyn Error>> {
    let repo =
        GitRepo::open(path).map_err(|e| format!("not a git repository (or any parent): {e}"))?;

    let analysis = analyze(&repo, config)?;

    if analysis.summary.total_commits == 0 {
        println!(
            "No feature-branch commits found in the last {} days.",
            config.window_days
        );
    }

    let insights = insights::generate(&analysis.summary, &analysis.commits);
    report::write_artifacts(Path::new("."), &analysis, config)?;

    if json {
        report::print_json(&analysis, config)?;
    } else {
        report::print_report(&repo, &analysis, &insights, config);
    }

    Ok(())
}

/// Pull commits from every feature branch, deduplicate, cap, and attach
/// per-commit diff stats. Query failures are logged and treated as empty
/// so one bad ref never sinks the run.
pub fn analyze(repo: &GitRepo, config: &Config) -> Result<Analysis, Box<dyn Error>> {
    let matchers = config.test_matchers()?;

    // Per-branch and per-commit query failures degrade to empty, but a
    // failed branch listing means git itself is broken or missing.
    let branches: Vec<String> = match repo.feature_branches() {
        QueryOutcome::Output(text) => text.lines().map(str::to_string).collect(),
        QueryOutcome::Empty => Vec::new(),
        QueryOutcome::Failed(err) => return Err(format!("failed to list branches: {err}").into()),
    };

    // Dedup across branches: first appearance wins, in branch
    // enumeration order, so a shared commit is attributed to the branch
    // whose query returned it first.
    let mut seen: HashSet<String> = HashSet::new();
    let mut records: Vec<CommitRecord> = Vec::new();
    for branch in &branches {
        let text = match repo.branch_log(branch, config.window_days) {
            QueryOutcome::Output(text) => text,
            QueryOutcome::Empty => continue,
            QueryOutcome::Failed(err) => {
                eprintln!("warning: log query failed for {branch}: {err}");
                continue;
            }
        };
        for record in commits::parse_log(&text, branch) {
            if seen.insert(record.hash.clone()) {
                records.push(record);
            }
        }
    }

    // Head-first cap, not a sample: with more commits than the cap the
    // tail is simply dropped.
    records.truncate(config.max_commits);

    let mut analyzed = Vec::with_capacity(records.len());
    for record in records {
        let text = match repo.commit_numstat(&record.hash) {
            QueryOutcome::Output(text) => text,
            QueryOutcome::Empty => String::new(),
            QueryOutcome::Failed(err) => {
                eprintln!("warning: diff stat query failed for {}: {err}", record.short_hash);
                String::new()
            }
        };
        let stats = diffstat::parse_numstat(&text, config, &matchers);
        analyzed.push(AnalyzedCommit { record, stats });
    }

    let summary = summarize(&analyzed, &branches);
    Ok(Analysis {
        commits: analyzed,
        summary,
    })
}

fn summarize(commits: &[AnalyzedCommit], branches: &[String]) -> Summary {
    let commits_per_branch = branches
        .iter()
        .map(|b| BranchCount {
            branch: b.clone(),
            commits: commits.iter().filter(|c| &c.record.branch == b).count(),
        })
        .collect();

    let n = commits.len();
    if n == 0 {
        return Summary {
            total_commits: 0,
            branches_analyzed: branches.len(),
            large_pct: 0.0,
            sprawling_pct: 0.0,
            test_first_pct: 0.0,
            avg_files: 0.0,
            avg_lines: 0.0,
            branches: branches.to_vec(),
            commits_per_branch,
        };
    }

    let nf = n as f64;
    let large = commits.iter().filter(|c| c.stats.large).count();
    let sprawling = commits.iter().filter(|c| c.stats.sprawling).count();
    let test_first = commits.iter().filter(|c| c.stats.test_first).count();
    let total_files: usize = commits.iter().map(|c| c.stats.files_changed).sum();
    let total_lines: u64 = commits
        .iter()
        .map(|c| c.stats.additions + c.stats.deletions)
        .sum();

    Summary {
        total_commits: n,
        branches_analyzed: branches.len(),
        large_pct: round2(100.0 * large as f64 / nf),
        sprawling_pct: round2(100.0 * sprawling as f64 / nf),
        test_first_pct: round2(100.0 * test_first as f64 / nf),
        avg_files: round2(total_files as f64 / nf),
        avg_lines: round2(total_lines as f64 / nf),
        branches: branches.to_vec(),
        commits_per_branch,
    }
}

#[cfg(test)]
#[path = "mod_test.rs"]
mod tests;
