//! The `flashdrill show` command.

use std::path::PathBuf;

use anyhow::Result;
use comfy_table::{Cell, Table};

use flashdrill_core::report::SessionReport;

pub fn execute(report_path: PathBuf, format: String) -> Result<()> {
    let report = SessionReport::load_json(&report_path)?;

    match format.as_str() {
        "markdown" | "md" => {
            println!("{}", report.to_markdown());
        }
        "json" => {
            println!("{}", serde_json::to_string_pretty(&report)?);
        }
        _ => {
            // text format
            println!(
                "Session {} ({}) from {}",
                &report.id.to_string()[..8],
                report.created_at.format("%Y-%m-%d %H:%M"),
                report.source
            );
            println!(
                "{} of {} words presented, {} assessments, {} mastered{}",
                report.summary.presented_words,
                report.summary.total_words,
                report.summary.total_assessments,
                report.summary.mastered_words,
                if report.ended_early {
                    " (ended early)"
                } else {
                    ""
                }
            );

            if report.results.is_empty() {
                println!("No words were assessed.");
                return Ok(());
            }

            let mut table = Table::new();
            table.set_header(vec!["#", "Word", "Unfamiliarity", "Seen"]);
            for (i, r) in report.results.iter().enumerate() {
                table.add_row(vec![
                    Cell::new(i + 1),
                    Cell::new(&r.word),
                    Cell::new(format!("{:.3}", r.unfamiliarity)),
                    Cell::new(r.occurrences),
                ]);
            }
            println!("{table}");
        }
    }

    Ok(())
}
