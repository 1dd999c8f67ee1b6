//! End-to-end session tests over the public API.
//!
//! Drives complete sessions headlessly: import from JSON, sample, assess,
//! finish or end early, aggregate, restart.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use flashdrill_core::engine::{select_weighted, EngineConfig, LearningSession, Phase};
use flashdrill_core::error::ImportError;
use flashdrill_core::model::{Assessment, WordEntry};
use flashdrill_core::parser::parse_word_records_str;
use flashdrill_core::pool::WordPool;

const WORDS: &str = r#"[
    {"word": "abate", "part_of_speech": "v.", "explanation": ["to lessen"]},
    {"word": "candid", "part_of_speech": "adj.", "explanation": ["frank"]},
    {"word": "laconic", "part_of_speech": "adj.", "explanation": ["brief"]}
]"#;

fn session_from_json(json: &str, seed: u64) -> LearningSession {
    let records = parse_word_records_str(json).unwrap();
    let pool = WordPool::from_records(records).unwrap();
    LearningSession::seeded(pool, EngineConfig::default(), Some(seed))
}

#[test]
fn import_rejects_empty_word_with_index() {
    let records =
        parse_word_records_str(r#"[{"word":"","part_of_speech":"n.","explanation":["x"]}]"#)
            .unwrap();
    let err = WordPool::from_records(records).unwrap_err();
    assert_eq!(err.index, 1);
    assert_eq!(err.field, "word");
}

#[test]
fn import_shape_errors_surface_as_validation() {
    let err = parse_word_records_str(
        r#"[{"word":"a","part_of_speech":"n.","explanation":["x", 3]}]"#,
    )
    .unwrap_err();
    assert!(matches!(err, ImportError::Validation(ref v) if v.field == "explanation"));
}

#[test]
fn hard_word_outranks_easy_words() {
    let mut session = session_from_json(WORDS, 11);
    session.start().unwrap();

    // "candid" is unknown the first two times it appears, known afterwards.
    let mut candid_seen = 0;
    let mut guard = 0;
    while let Some(entry) = session.current_word() {
        let assessment = if entry.word == "candid" {
            candid_seen += 1;
            if candid_seen <= 2 {
                Assessment::Unknown
            } else {
                Assessment::Known
            }
        } else {
            Assessment::Known
        };
        session.assess(assessment).unwrap();
        guard += 1;
        assert!(guard < 1_000, "session did not terminate");
    }

    let results = session.results().unwrap();
    assert_eq!(results.len(), 3);
    assert_eq!(results[0].word, "candid");
    assert!(results[0].unfamiliarity > results[1].unfamiliarity);
}

#[test]
fn end_early_then_restart_then_finish() {
    let mut session = session_from_json(WORDS, 5);
    session.start().unwrap();
    session.assess(Assessment::Vague).unwrap();
    session.assess(Assessment::Unknown).unwrap();

    let early = session.end_early().unwrap().to_vec();
    assert!(!early.is_empty());
    assert!(early.iter().all(|r| r.occurrences > 0));
    assert!(session.ended_early());

    session.restart();
    assert_eq!(session.phase(), Phase::Presenting);
    assert!(!session.ended_early());

    while session.phase() == Phase::Presenting {
        session.assess(Assessment::Known).unwrap();
    }
    let results = session.results().unwrap();
    assert_eq!(results.len(), 3);
    assert!(results.iter().all(|r| r.occurrences == 3));
}

#[test]
fn selection_frequency_follows_weights() {
    let entries: Vec<WordEntry> = [1.0, 3.0]
        .iter()
        .map(|&w| {
            let mut e = WordEntry::new("w", "n.", vec!["x".into()]);
            e.weight = w;
            e
        })
        .collect();

    let mut rng = StdRng::seed_from_u64(42);
    let draws = 20_000;
    let heavy = (0..draws)
        .filter(|_| select_weighted(&entries, 0.1, rng.gen::<f64>() * 4.0) == Some(1))
        .count();

    let share = heavy as f64 / draws as f64;
    assert!((share - 0.75).abs() < 0.02, "expected ~0.75, got {share}");
}

#[test]
fn custom_parameters_change_pace() {
    let records = parse_word_records_str(WORDS).unwrap();
    let pool = WordPool::from_records(records).unwrap();
    let config = EngineConfig {
        growth_factor: 10.0,
        mastery_threshold: 0.1,
    };
    let mut session = LearningSession::seeded(pool, config, Some(3));
    session.start().unwrap();

    // 1.0 / 10 = 0.1 is still eligible; a second known masters the word.
    let mut rounds = 0;
    while session.phase() == Phase::Presenting {
        session.assess(Assessment::Known).unwrap();
        rounds += 1;
    }
    assert_eq!(rounds, 6);
}
