//! The `flashdrill init` command.

use anyhow::Result;

pub fn execute() -> Result<()> {
    // Create flashdrill.toml
    if std::path::Path::new("flashdrill.toml").exists() {
        println!("flashdrill.toml already exists, skipping.");
    } else {
        std::fs::write("flashdrill.toml", SAMPLE_CONFIG)?;
        println!("Created flashdrill.toml");
    }

    // Create example word list
    std::fs::create_dir_all("words")?;
    let example_path = std::path::Path::new("words/example.json");
    if example_path.exists() {
        println!("words/example.json already exists, skipping.");
    } else {
        std::fs::write(example_path, EXAMPLE_WORDS)?;
        println!("Created words/example.json");
    }

    println!("\nNext steps:");
    println!("  1. Add your own words to words/example.json");
    println!("  2. Run: flashdrill validate --words words/example.json");
    println!("  3. Run: flashdrill learn");

    Ok(())
}

const SAMPLE_CONFIG: &str = r#"# flashdrill configuration

words = "words/example.json"

# unknown multiplies a word's weight by this factor, known divides by it
growth_factor = 2.16
# words whose weight drops below this are considered mastered
mastery_threshold = 0.1

report_dir = "./flashdrill-results"
# seed = 42
"#;

const EXAMPLE_WORDS: &str = r#"[
  {
    "word": "abate",
    "part_of_speech": "v.",
    "explanation": ["to become less intense or widespread", "to reduce in amount or degree"]
  },
  {
    "word": "candid",
    "part_of_speech": "adj.",
    "explanation": ["truthful and straightforward; frank"]
  },
  {
    "word": "ephemeral",
    "part_of_speech": "adj.",
    "explanation": ["lasting for a very short time"]
  },
  {
    "word": "laconic",
    "part_of_speech": "adj.",
    "explanation": ["using very few words"]
  },
  {
    "word": "mitigate",
    "part_of_speech": "v.",
    "explanation": ["to make less severe, serious, or painful"]
  }
]
"#;
