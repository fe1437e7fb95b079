// WHY: Abbreviation-aware boundary detection; the counterpart the naive splitter is measured against
// Candidate punctuation is found with a regex-automata meta regex, then filtered by context rules

use regex_automata::meta::Regex;
use std::ops::Range;
use tracing::debug;

use super::model::TokenizerModel;
use super::{AbbreviationChecker, SentenceTokenizer};
use crate::error::ModelUnavailableError;

/// Rule-based sentence tokenizer compiled from a [`TokenizerModel`]
///
/// A boundary is a run of `.`, `!` or `?` (plus optional closing quotes or
/// brackets) that is followed by whitespace or the end of the text, where the
/// next word does not start lowercase. A single `.` after an abbreviation or a
/// name initial is never a boundary; decimals never match because their period
/// is not followed by whitespace.
#[derive(Debug, Clone)]
pub struct SemanticTokenizer {
    language: String,
    candidates: Regex,
    abbreviations: AbbreviationChecker,
}

impl SemanticTokenizer {
    pub fn new(model: &TokenizerModel) -> Result<Self, ModelUnavailableError> {
        let pattern = candidate_pattern(&model.closing_punctuation);
        let candidates = Regex::new(&pattern).map_err(|e| {
            ModelUnavailableError::new(&model.language, format!("invalid boundary pattern: {e}"))
        })?;

        debug!("Compiled boundary pattern for {}: {}", model.language, pattern);

        Ok(Self {
            language: model.language.clone(),
            candidates,
            abbreviations: AbbreviationChecker::new(&model.abbreviations),
        })
    }

    /// Byte ranges of the trimmed sentences, in text order
    pub fn sentence_spans(&self, text: &str) -> Vec<Range<usize>> {
        let mut spans = Vec::new();
        let mut start = 0;

        for candidate in self.candidates.find_iter(text) {
            let end = candidate.end();
            let rest = &text[end..];

            // Must be followed by whitespace or end of text
            if rest.chars().next().is_some_and(|c| !c.is_whitespace()) {
                continue;
            }

            // Lowercase continuation means the sentence goes on
            if rest.trim_start().chars().next().is_some_and(char::is_lowercase) {
                continue;
            }

            let punctuation = text[candidate.start()..end].trim_end_matches(|c: char| !matches!(c, '.' | '!' | '?'));
            if punctuation == "."
                && self.abbreviations.suppresses_boundary(&text[start..candidate.start()], rest)
            {
                continue;
            }

            push_trimmed(text, start..end, &mut spans);
            start = end;
        }

        push_trimmed(text, start..text.len(), &mut spans);
        spans
    }

    /// Split text into owned sentences
    pub fn split(&self, text: &str) -> Vec<String> {
        self.sentence_spans(text)
            .into_iter()
            .map(|span| text[span].to_string())
            .collect()
    }
}

impl SentenceTokenizer for SemanticTokenizer {
    fn name(&self) -> &str {
        &self.language
    }

    fn tokenize(&self, text: &str) -> Result<Vec<String>, ModelUnavailableError> {
        let sentences = self.split(text);
        debug!("Tokenized {} characters into {} sentences", text.len(), sentences.len());
        Ok(sentences)
    }
}

/// `[.!?]+` followed by any run of the closing characters
fn candidate_pattern(closing: &[char]) -> String {
    let mut pattern = String::from("[.!?]+");
    if !closing.is_empty() {
        pattern.push('[');
        for c in closing {
            // Hex escapes are valid inside a class for every scalar value
            pattern.push_str(&format!("\\x{{{:X}}}", *c as u32));
        }
        pattern.push_str("]*");
    }
    pattern
}

/// Push `range` shrunk to its non-whitespace content, skipping blank ranges
fn push_trimmed(text: &str, range: Range<usize>, spans: &mut Vec<Range<usize>>) {
    let slice = &text[range.clone()];
    let trimmed_start = slice.trim_start();
    if trimmed_start.is_empty() {
        return;
    }
    let start = range.start + (slice.len() - trimmed_start.len());
    let end = start + trimmed_start.trim_end().len();
    spans.push(start..end);
}
