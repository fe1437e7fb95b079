// Test fixtures with known texts and expected segmentations
// WHY: Golden comparisons need deterministic input/output pairs

/// Abbreviation, number and terminal punctuation in three sentences over two pages
pub const SIMPLE_PAGES: &[&[&str]] = &[&["Dr. Smith went home. He left at 5."], &["It was late."]];

/// Expected semantic sentences of SIMPLE_PAGES
pub const SIMPLE_SENTENCES: &[&str] = &["Dr. Smith went home.", "He left at 5.", "It was late."];

/// Expected export of SIMPLE_PAGES
pub const SIMPLE_EXPORT: &str =
    "Sentence 1: Dr. Smith went home.\n\nSentence 2: He left at 5.\n\nSentence 3: It was late.";

/// Text where the naive splitter and the tokenizer disagree on every trap
pub const TRAP_TEXT: &str = "Prof. Jones of Acme Inc. reported 3.5 percent growth. \
Was it enough? Analysts said no! The U.S. market, e.g. retail, stayed flat. Results follow.";

/// Expected naive fragments of TRAP_TEXT
pub const TRAP_NAIVE_COUNT: usize = 7;

/// Expected semantic sentences of TRAP_TEXT
pub const TRAP_SENTENCES: &[&str] = &[
    "Prof. Jones of Acme Inc. reported 3.5 percent growth.",
    "Was it enough?",
    "Analysts said no!",
    "The U.S. market, e.g. retail, stayed flat.",
    "Results follow.",
];

/// One line of `count` short sentences, enough to reach the sample window when count > 58
pub fn numbered_text(count: usize) -> String {
    (0..count)
        .map(|i| format!("Sentence number {i} ends here."))
        .collect::<Vec<_>>()
        .join(" ")
}
