//! Console report and persisted artifacts. Presentation only: every
//! number printed here was computed upstream.

mod json;

pub use json::{COMMITS_FILE, SUMMARY_FILE, print_json, write_artifacts};

use crate::config::Config;
use crate::drift::Analysis;
use crate::git::GitRepo;
use crate::insights::Insights;
use crate::util::truncate_message;

/// Commits shown in the sample section.
const SAMPLE_SIZE: usize = 10;

/// Message column width in the sample section.
const MESSAGE_WIDTH: usize = 60;

fn separator(width: usize) -> String {
    "\u{2500}".repeat(width)
}

fn print_section(title: &str, lines: &[String]) {
    if lines.is_empty() {
        return;
    }
    println!();
    println!(" {title}:");
    for line in lines {
        println!("   - {line}");
    }
}

pub fn print_report(repo: &GitRepo, analysis: &Analysis, insights: &Insights, config: &Config) {
    let summary = &analysis.summary;
    let sep = separator(78);

    println!("{sep}");
    println!(" AI Drift Analysis");
    match repo.remote_url() {
        Some(url) => println!(" Repository: {url}"),
        None => println!(" Repository: {}", repo.root().display()),
    }
    println!("{sep}");
    println!(
        " Commits analyzed:  {} (last {} days, {} feature branches)",
        summary.total_commits, config.window_days, summary.branches_analyzed
    );
    println!(
        " Large commits:     {:>6.2}%  (> {} lines)",
        summary.large_pct, config.large_commit_lines
    );
    println!(
        " Sprawling commits: {:>6.2}%  (> {} files)",
        summary.sprawling_pct, config.sprawling_commit_files
    );
    println!(" Test-first:        {:>6.2}%", summary.test_first_pct);
    println!(" Avg files/commit:  {:>6.2}", summary.avg_files);
    println!(" Avg lines/commit:  {:>6.2}", summary.avg_lines);

    if !summary.commits_per_branch.is_empty() {
        println!();
        println!(" Branches:");
        for bc in &summary.commits_per_branch {
            println!("   {:<40} {:>4} commits", bc.branch, bc.commits);
        }
    }

    print_section("Insights", &insights.insights);
    print_section("Warnings", &insights.warnings);
    print_section("Recommendations", &insights.recommendations);

    if !analysis.commits.is_empty() {
        let shown = analysis.commits.len().min(SAMPLE_SIZE);
        println!();
        println!("{sep}");
        println!(" Sample commits (first {shown}):");
        for c in analysis.commits.iter().take(SAMPLE_SIZE) {
            let mut flags = String::new();
            if c.stats.large {
                flags.push_str(" [large]");
            }
            if c.stats.sprawling {
                flags.push_str(" [sprawl]");
            }
            if c.stats.test_first {
                flags.push_str(" [tests]");
            }
            println!(
                " {}  {:<width$}  +{}/-{} {:>3} files{}",
                c.record.short_hash,
                truncate_message(&c.record.message, MESSAGE_WIDTH),
                c.stats.additions,
                c.stats.deletions,
                c.stats.files_changed,
                flags,
                width = MESSAGE_WIDTH
            );
        }
    }

    println!("{sep}");
    println!(" These metrics are proxies, not verdicts. High numbers mean");
    println!(" \"look closer\", starting with the flagged commits above.");
    println!(" Full data written to {COMMITS_FILE} and {SUMMARY_FILE}.");
}

#[cfg(test)]
#[path = "mod_test.rs"]
mod tests;
