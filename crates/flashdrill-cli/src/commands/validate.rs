//! The `flashdrill validate` command.

use std::path::PathBuf;

use anyhow::{Context, Result};

use flashdrill_core::parser;

pub fn execute(words_path: PathBuf) -> Result<()> {
    let files = parser::word_files(&words_path)?;
    tracing::debug!(files = files.len(), "validating word lists");

    let mut invalid_words = 0;
    let mut malformed_lists = 0;

    for path in &files {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read word list: {}", path.display()))?;

        match parser::check_word_records_str(&content) {
            Ok(check) => {
                println!("Word list: {} ({} words)", path.display(), check.records);
                for e in &check.errors {
                    println!("  ERROR: {e}");
                }
                invalid_words += check.errors.len();
            }
            Err(e) => {
                println!("Word list: {}", path.display());
                println!("  ERROR: {e}");
                malformed_lists += 1;
            }
        }
    }

    match (invalid_words, malformed_lists) {
        (0, 0) => {
            println!("All words valid.");
            Ok(())
        }
        (n, 0) => anyhow::bail!("{n} invalid word(s) found"),
        (n, m) => anyhow::bail!("{n} invalid word(s) and {m} malformed word list(s) found"),
    }
}
