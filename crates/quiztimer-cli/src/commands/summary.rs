//! The `quiztimer summary` command.

use std::path::PathBuf;

use anyhow::Result;

use quiztimer_core::report::SessionReport;

use super::run::print_review;

pub fn execute(report_path: PathBuf, format: String) -> Result<()> {
    let report = SessionReport::load_json(&report_path)?;

    match format.as_str() {
        "json" => {
            println!("{}", serde_json::to_string_pretty(&report)?);
        }
        "text" => {
            println!(
                "Session {} ({})",
                report.id,
                report.created_at.format("%Y-%m-%d %H:%M:%S UTC")
            );
            println!("Source: {}", report.source.display());
            println!(
                "Score: {}/{} ({:.1}%)",
                report.score,
                report.total,
                report.accuracy() * 100.0
            );
            println!(
                "Ended: {} after {:.1}s of {}s",
                report.end,
                report.elapsed_ms as f64 / 1000.0,
                report.limit_secs
            );

            let unanswered = report.total.saturating_sub(report.answers.len());
            if unanswered > 0 {
                println!("Unanswered: {unanswered}");
            }

            if !report.answers.is_empty() {
                print_review(&report.answers);
            }
        }
        other => anyhow::bail!("unknown format: {other} (expected text or json)"),
    }

    Ok(())
}
