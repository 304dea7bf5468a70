use std::error::Error;
use std::fs;
use std::path::Path;

use serde::Serialize;

use crate::config::Config;
use crate::drift::{Analysis, Summary};

/// Detailed-metrics artifact: the full analyzed commit list.
pub const COMMITS_FILE: &str = "drift-commits.json";

/// Summary artifact: aggregate stats plus the config that produced them.
pub const SUMMARY_FILE: &str = "drift-summary.json";

/// Fixed note embedded in the summary artifact.
pub const METHOD_NOTE: &str = "Large commits, multi-file sprawl, and test/production \
co-change are heuristic proxies for AI-assisted drift, not proof. Review flagged \
commits before acting on these numbers.";

#[derive(Serialize)]
pub struct SummaryDocument<'a> {
    pub generated_at: String,
    pub summary: &'a Summary,
    pub config: &'a Config,
    pub note: &'static str,
}

pub fn summary_document<'a>(summary: &'a Summary, config: &'a Config) -> SummaryDocument<'a> {
    SummaryDocument {
        generated_at: chrono::Utc::now().to_rfc3339(),
        summary,
        config,
        note: METHOD_NOTE,
    }
}

/// Write both artifacts into `dir`, replacing any previous run's output.
pub fn write_artifacts(
    dir: &Path,
    analysis: &Analysis,
    config: &Config,
) -> Result<(), Box<dyn Error>> {
    fs::write(
        dir.join(COMMITS_FILE),
        serde_json::to_string_pretty(&analysis.commits)?,
    )?;
    let doc = summary_document(&analysis.summary, config);
    fs::write(dir.join(SUMMARY_FILE), serde_json::to_string_pretty(&doc)?)?;
    Ok(())
}

/// Print the summary document to stdout (the `--json` mode).
pub fn print_json(analysis: &Analysis, config: &Config) -> Result<(), Box<dyn Error>> {
    let doc = summary_document(&analysis.summary, config);
    println!("{}", serde_json::to_string_pretty(&doc)?);
    Ok(())
}
