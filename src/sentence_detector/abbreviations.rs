// WHY: Centralized abbreviation handling for sentence boundary detection
// A period after a known abbreviation or a single-letter initial is not a boundary

use std::collections::HashSet;

/// English abbreviations shipped with the built-in model, stored without the final period
pub const ENGLISH_ABBREVIATIONS: &[&str] = &[
    // titles
    "dr", "mr", "mrs", "ms", "prof", "sr", "jr", "st", "rev", "gen", "col", "capt", "lt", "sgt",
    // organisations
    "inc", "ltd", "co", "corp", "dept", "univ", "assn",
    // places
    "u.s", "u.s.a", "u.k", "n.y", "d.c", "l.a", "mt", "ave", "blvd", "rd",
    // measures
    "ft", "lbs", "oz", "mi", "km", "kg", "deg", "approx",
    // references
    "e.g", "i.e", "etc", "vs", "cf", "al", "fig", "vol", "pp", "ch", "sec", "eq", "ref",
    // time
    "a.m", "p.m", "jan", "feb", "mar", "apr", "jun", "jul", "aug", "sep", "sept", "oct", "nov", "dec",
];

/// Characters stripped from the front of a token before lookup
const LEADING_PUNCTUATION: &[char] = &['"', '\'', '\u{201C}', '\u{2018}', '(', '[', '{'];

/// Single capital letters that usually end a sentence as a Roman numeral ("World War I.")
const ROMAN_LETTERS: &[char] = &['I', 'V', 'X'];

/// Efficient abbreviation lookup using HashSet for O(1) performance
///
/// Besides the listed abbreviations, a capital letter before the period counts
/// as an initial when it sits next to another initial ("J. R. Tolkien"), follows
/// a capitalized name ("John F. Kennedy") or opens the sentence before a
/// capitalized word ("J. Smith left."). After a lowercase word it is a grade or a
/// label and ends the sentence ("He got an A."). "Plan B. It failed." still
/// reads as one sentence.
#[derive(Debug, Clone)]
pub struct AbbreviationChecker {
    abbreviations: HashSet<String>,
}

impl AbbreviationChecker {
    /// Build a checker from model entries; case and a trailing period are ignored
    pub fn new<I, S>(abbreviations: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let abbreviations = abbreviations
            .into_iter()
            .map(|abbr| normalize_token(abbr.as_ref()))
            .filter(|abbr| !abbr.is_empty())
            .collect();
        Self { abbreviations }
    }

    /// Checker over the built-in English list
    pub fn english() -> Self {
        Self::new(ENGLISH_ABBREVIATIONS.iter().copied())
    }

    /// Check if a word (with or without its final period) is a known abbreviation
    pub fn is_abbreviation(&self, word: &str) -> bool {
        self.abbreviations.contains(&normalize_token(word))
    }

    pub fn len(&self) -> usize {
        self.abbreviations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.abbreviations.is_empty()
    }

    /// Check if the period between `prefix` and `rest` follows an abbreviation or initial
    ///
    /// `prefix` is the current sentence up to, not including, the candidate
    /// period. `rest` is the text after the candidate punctuation.
    pub fn suppresses_boundary(&self, prefix: &str, rest: &str) -> bool {
        // WHY: whitespace directly before the period means there is no token to inspect
        if prefix.ends_with(char::is_whitespace) {
            return false;
        }
        let mut words = prefix.split_whitespace().rev();
        let Some(last_word) = words.next() else {
            return false;
        };
        let clean_word = last_word.trim_start_matches(LEADING_PUNCTUATION);
        if self.is_abbreviation(clean_word) {
            return true;
        }
        let Some(letter) = initial_letter(clean_word) else {
            return false;
        };

        let previous = words.next().map(|word| word.trim_start_matches(LEADING_PUNCTUATION));
        let next = rest.split_whitespace().next().map(|word| word.trim_start_matches(LEADING_PUNCTUATION));

        if previous.is_some_and(is_initial_with_period) || next.is_some_and(is_initial_with_period) {
            return true;
        }
        match previous {
            Some(word) => starts_uppercase(word) && !ROMAN_LETTERS.contains(&letter),
            None => next.is_some_and(starts_uppercase),
        }
    }
}

impl Default for AbbreviationChecker {
    fn default() -> Self {
        Self::english()
    }
}

fn normalize_token(token: &str) -> String {
    token.trim().trim_end_matches('.').to_lowercase()
}

/// The letter of a single-capital token, as in "J" of "J. Smith"
fn initial_letter(word: &str) -> Option<char> {
    let mut chars = word.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) if c.is_uppercase() => Some(c),
        _ => None,
    }
}

fn is_initial_with_period(word: &str) -> bool {
    word.strip_suffix('.').and_then(initial_letter).is_some()
}

fn starts_uppercase(word: &str) -> bool {
    word.chars().next().is_some_and(char::is_uppercase)
}
