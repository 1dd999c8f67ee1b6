//! The `flashdrill learn` command.

use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use comfy_table::{Cell, Table};

use flashdrill_core::config::load_config_from;
use flashdrill_core::engine::{LearningSession, Phase};
use flashdrill_core::model::Assessment;
use flashdrill_core::parser;
use flashdrill_core::pool::WordPool;
use flashdrill_core::report::SessionReport;

pub fn execute(
    words: Option<PathBuf>,
    seed: Option<u64>,
    output: Option<PathBuf>,
    format: String,
    config_path: Option<PathBuf>,
) -> Result<()> {
    let config = load_config_from(config_path.as_deref())?;
    let engine_config = config.engine_config()?;

    let words_path = words.or_else(|| config.words.clone()).ok_or_else(|| {
        anyhow::anyhow!("no word list given; pass --words or set `words` in flashdrill.toml")
    })?;
    let records = parser::load_words(&words_path)?;
    let pool = WordPool::from_records(records)
        .with_context(|| format!("invalid word list: {}", words_path.display()))?;
    anyhow::ensure!(
        !pool.is_empty(),
        "word list is empty: {}",
        words_path.display()
    );

    tracing::debug!("loaded {} words from {}", pool.len(), words_path.display());

    let formats = report_formats(&format, output.is_some())?;
    let report_dir = output.unwrap_or_else(|| config.report_dir.clone());
    let source = words_path.display().to_string();

    let mut session = LearningSession::seeded(pool, engine_config, seed.or(config.seed));

    let stdin = io::stdin();
    let stdout = io::stdout();
    let mut input = stdin.lock();
    let mut out = stdout.lock();

    session.start()?;
    loop {
        run_session(&mut session, &mut input, &mut out)?;
        print_results(&session, &mut out)?;

        if !formats.is_empty() {
            let report = SessionReport::from_session(&session, &source)?;
            for path in save_report(&report, &report_dir, &formats)? {
                writeln!(out, "Report saved to: {}", path.display())?;
            }
        }

        write!(out, "\n[r] restart with the same words, anything else to quit > ")?;
        out.flush()?;
        match read_line(&mut input)? {
            Some(line) if line.trim().eq_ignore_ascii_case("r") => {
                session.restart();
            }
            _ => break,
        }
    }

    Ok(())
}

fn report_formats(format: &str, has_output: bool) -> Result<Vec<&'static str>> {
    let formats = match format {
        "none" if has_output => vec!["json"],
        "none" => vec![],
        "all" => vec!["json", "markdown"],
        other => other
            .split(',')
            .map(|f| match f.trim() {
                "json" => Ok("json"),
                "markdown" | "md" => Ok("markdown"),
                unknown => Err(anyhow::anyhow!("unknown report format: '{unknown}'")),
            })
            .collect::<Result<Vec<_>>>()?,
    };
    Ok(formats)
}

fn save_report(report: &SessionReport, dir: &Path, formats: &[&str]) -> Result<Vec<PathBuf>> {
    std::fs::create_dir_all(dir)
        .with_context(|| format!("failed to create report directory: {}", dir.display()))?;
    let timestamp = report.created_at.format("%Y-%m-%dT%H%M%S");
    let id = report.id.to_string();
    let stem = format!("report-{timestamp}-{}", &id[..8]);

    let mut written = Vec::new();
    for fmt in formats {
        match *fmt {
            "json" => {
                let path = dir.join(format!("{stem}.json"));
                report.save_json(&path)?;
                written.push(path);
            }
            "markdown" => {
                let path = dir.join(format!("{stem}.md"));
                std::fs::write(&path, report.to_markdown())
                    .with_context(|| format!("failed to write report to {}", path.display()))?;
                written.push(path);
            }
            _ => {}
        }
    }
    tracing::debug!(report = %report.id, files = written.len(), "saved session report");
    Ok(written)
}

/// Read one line; `None` at end of input.
fn read_line(input: &mut impl BufRead) -> Result<Option<String>> {
    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Ok(None);
    }
    Ok(Some(line))
}

/// Play cards until the session finishes, by mastery or by the learner quitting.
///
/// End of input counts as quitting.
fn run_session(
    session: &mut LearningSession,
    input: &mut impl BufRead,
    out: &mut impl Write,
) -> Result<()> {
    let mut round = 0usize;

    while let Some(entry) = session.current_word() {
        round += 1;
        let remaining = session
            .pool()
            .eligible_count(session.config().mastery_threshold);
        writeln!(out, "\n--- Card {round} ({remaining} words left) ---")?;
        writeln!(out, "  {}  ({})", entry.word, entry.part_of_speech)?;
        writeln!(out, "[Enter] reveal, [q] end session")?;

        let mut revealed = false;
        loop {
            write!(out, "> ")?;
            out.flush()?;
            let Some(line) = read_line(input)? else {
                session.end_early()?;
                return Ok(());
            };

            match line.trim() {
                "q" | "quit" => {
                    session.end_early()?;
                    return Ok(());
                }
                "" | "r" if !revealed => {
                    revealed = true;
                    if let Some(entry) = session.current_word() {
                        for (i, explanation) in entry.explanations.iter().enumerate() {
                            writeln!(out, "  {}. {explanation}", i + 1)?;
                        }
                    }
                    writeln!(out, "[u] unknown, [v] vague, [k] known, [q] end session")?;
                }
                cmd if revealed => match cmd.parse::<Assessment>() {
                    Ok(assessment) => {
                        session.assess(assessment)?;
                        break;
                    }
                    Err(_) => writeln!(out, "Answer with u (unknown), v (vague) or k (known).")?,
                },
                _ => writeln!(out, "Reveal the card first: press Enter.")?,
            }
        }
    }

    Ok(())
}

fn print_results(session: &LearningSession, out: &mut impl Write) -> Result<()> {
    debug_assert_eq!(session.phase(), Phase::Finished);
    let results = session.results()?;

    if session.ended_early() {
        writeln!(out, "\nSession ended early.")?;
    } else {
        writeln!(out, "\nAll words mastered!")?;
    }

    if results.is_empty() {
        writeln!(out, "No words were assessed.")?;
        return Ok(());
    }

    let mut table = Table::new();
    table.set_header(vec!["#", "Word", "Unfamiliarity", "Seen"]);
    for (i, r) in results.iter().enumerate() {
        table.add_row(vec![
            Cell::new(i + 1),
            Cell::new(&r.word),
            Cell::new(format!("{:.3}", r.unfamiliarity)),
            Cell::new(r.occurrences),
        ]);
    }
    writeln!(out, "{table}")?;
    Ok(())
}
