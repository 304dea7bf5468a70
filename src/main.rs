mod cli;
mod commits;
mod config;
mod diffstat;
mod drift;
mod git;
mod insights;
mod report;
mod util;

use std::path::PathBuf;

use clap::Parser;

use config::Config;

fn main() {
    let cli = cli::Cli::parse();
    let target = cli.path.unwrap_or_else(|| PathBuf::from("."));

    let mut config = Config {
        window_days: cli.days,
        max_commits: cli.max_commits,
        large_commit_lines: cli.large_lines,
        sprawling_commit_files: cli.sprawl_files,
        ..Config::default()
    };
    config.test_patterns.extend(cli.test_patterns);

    if let Err(err) = drift::run(&target, &config, cli.json) {
        eprintln!("error: {err}");
        std::process::exit(1);
    }
}
