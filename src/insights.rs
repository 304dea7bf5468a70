//! Decision table mapping summary stats to tiered messages.
//!
//! Bands:
//!   large      > 40% critical, > 20% warning, else positive
//!   sprawling  > 25% critical, > 10% warning, else positive
//!   test-first > 50% positive, < 30% warning (30-50 stays silent)
//!   avg lines  > 1000 critical, > 500 warning
//! plus a secondary heuristic: large commits where additions exceed
//! three times deletions, over 30% of the set, flag a bulk-acceptance
//! pattern.

use serde::Serialize;

use crate::drift::{AnalyzedCommit, Summary};

#[derive(Clone, Debug, Default, Serialize)]
pub struct Insights {
    pub insights: Vec<String>,
    pub warnings: Vec<String>,
    pub recommendations: Vec<String>,
}

/// Pure function of the summary and the analyzed set. Deterministic,
/// no side effects. A zero-commit summary produces no messages at all;
/// the vacuous 0% test-first figure must not read as a warning.
pub fn generate(summary: &Summary, commits: &[AnalyzedCommit]) -> Insights {
    let mut out = Insights::default();
    if summary.total_commits == 0 {
        return out;
    }

    if summary.large_pct > 40.0 {
        out.warnings.push(format!(
            "CRITICAL: {:.2}% of commits are large; bulk changes dominate this history",
            summary.large_pct
        ));
        out.recommendations.push(
            "Split work into smaller commits; large diffs hide unreviewed generated code"
                .to_string(),
        );
    } else if summary.large_pct > 20.0 {
        out.warnings.push(format!(
            "{:.2}% of commits are large; commit size is trending up",
            summary.large_pct
        ));
    } else {
        out.insights.push(format!(
            "Commit sizes look healthy ({:.2}% large)",
            summary.large_pct
        ));
    }

    if summary.sprawling_pct > 25.0 {
        out.warnings.push(format!(
            "CRITICAL: {:.2}% of commits sprawl across many files; changes lack focus",
            summary.sprawling_pct
        ));
        out.recommendations
            .push("Keep each commit to one concern; wide diffs are hard to review".to_string());
    } else if summary.sprawling_pct > 10.0 {
        out.warnings.push(format!(
            "{:.2}% of commits touch an unusually wide set of files",
            summary.sprawling_pct
        ));
    } else {
        out.insights.push(format!(
            "Commits stay focused ({:.2}% sprawling)",
            summary.sprawling_pct
        ));
    }

    if summary.test_first_pct > 50.0 {
        out.insights.push(format!(
            "Tests move with production code in {:.2}% of commits",
            summary.test_first_pct
        ));
    } else if summary.test_first_pct < 30.0 {
        out.warnings.push(format!(
            "Only {:.2}% of commits change tests alongside production code",
            summary.test_first_pct
        ));
        out.recommendations
            .push("Commit the test with the change it covers, not in a follow-up".to_string());
    }

    if summary.avg_lines > 1000.0 {
        out.warnings.push(format!(
            "CRITICAL: average commit is {:.2} lines; changes are landing in bulk",
            summary.avg_lines
        ));
        out.recommendations
            .push("Aim for commits a reviewer can read in one sitting".to_string());
    } else if summary.avg_lines > 500.0 {
        out.warnings.push(format!(
            "Average commit is {:.2} lines; consider smaller steps",
            summary.avg_lines
        ));
    }

    let addition_heavy = commits
        .iter()
        .filter(|c| c.stats.large && c.stats.additions > 3 * c.stats.deletions)
        .count();
    if addition_heavy as f64 > 0.3 * summary.total_commits as f64 {
        out.warnings.push(format!(
            "{addition_heavy} large commits are almost pure additions; \
             this pattern matches bulk acceptance of generated code"
        ));
    }

    out
}

#[cfg(test)]
#[path = "insights_test.rs"]
mod tests;
