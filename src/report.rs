// WHY: Pure derivations over the two sentence lists; nothing here touches I/O or the model
// except rechunk_sample, which borrows an injected tokenizer

use serde::Serialize;

use crate::error::ModelUnavailableError;
use crate::sentence_detector::SentenceTokenizer;

/// Label of the naive split row
pub const NAIVE_METHOD: &str = "Basic Split (.)";
/// Label of the semantic tokenizer row
pub const SEMANTIC_METHOD: &str = "NLTK Tokenizer";
/// Static quality annotation of the naive row
pub const NAIVE_QUALITY: &str = "Low";
/// Static quality annotation of the semantic row
pub const SEMANTIC_QUALITY: &str = "High";

/// Characters kept in a sentence preview before `"..."` is appended
pub const PREVIEW_CHARS: usize = 80;
/// Number of leading semantic sentences described in detail
pub const STATS_LIMIT: usize = 10;
/// Characters kept from each naive fragment in the sample window
pub const SAMPLE_CHARS: usize = 100;
/// First naive fragment index of the default sample window
pub const DEFAULT_WINDOW_START: usize = 58;
/// Exclusive end of the default sample window
pub const DEFAULT_WINDOW_END: usize = 69;
/// Bin count used for the word-count histogram
pub const HISTOGRAM_BINS: usize = 30;

const ELLIPSIS: &str = "...";

/// One row of the side-by-side comparison table
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ComparisonRow {
    pub method: &'static str,
    pub sentence_count: usize,
    /// Mean character length, 0 for an empty list
    pub avg_length: f64,
    pub quality: &'static str,
}

impl ComparisonRow {
    fn measure(method: &'static str, quality: &'static str, sentences: &[String]) -> Self {
        Self {
            method,
            sentence_count: sentences.len(),
            avg_length: average_length(sentences),
            quality,
        }
    }
}

/// Detail record for one of the leading semantic sentences
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SentenceStat {
    /// 1-based position in the semantic list
    pub index: usize,
    pub preview: String,
    /// Character count of the full sentence
    pub length: usize,
    pub word_count: usize,
}

impl SentenceStat {
    pub fn describe(index: usize, sentence: &str) -> Self {
        Self {
            index,
            preview: preview(sentence, PREVIEW_CHARS),
            length: sentence.chars().count(),
            word_count: word_count(sentence),
        }
    }
}

/// Naive vs semantic comparison derived from the two sentence lists
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ComparisonReport {
    /// Always two rows: naive first, semantic second
    pub rows: [ComparisonRow; 2],
    pub sentence_stats: Vec<SentenceStat>,
}

impl ComparisonReport {
    pub fn naive(&self) -> &ComparisonRow {
        &self.rows[0]
    }

    pub fn semantic(&self) -> &ComparisonRow {
        &self.rows[1]
    }
}

/// Build the comparison table and the per-sentence details
pub fn build_report(naive: &[String], semantic: &[String]) -> ComparisonReport {
    let sentence_stats = semantic
        .iter()
        .take(STATS_LIMIT)
        .enumerate()
        .map(|(i, sentence)| SentenceStat::describe(i + 1, sentence))
        .collect();

    ComparisonReport {
        rows: [
            ComparisonRow::measure(NAIVE_METHOD, NAIVE_QUALITY, naive),
            ComparisonRow::measure(SEMANTIC_METHOD, SEMANTIC_QUALITY, semantic),
        ],
        sentence_stats,
    }
}

/// Mean character length; 0 when there are no sentences
pub fn average_length(sentences: &[String]) -> f64 {
    if sentences.is_empty() {
        return 0.0;
    }
    let total: usize = sentences.iter().map(|s| s.chars().count()).sum();
    total as f64 / sentences.len() as f64
}

/// First `max_chars` characters, with `"..."` only when something was cut
pub fn preview(sentence: &str, max_chars: usize) -> String {
    match sentence.char_indices().nth(max_chars) {
        Some((cut, _)) => format!("{}{ELLIPSIS}", &sentence[..cut]),
        None => sentence.to_string(),
    }
}

fn truncate_chars(text: &str, max_chars: usize) -> &str {
    match text.char_indices().nth(max_chars) {
        Some((cut, _)) => &text[..cut],
        None => text,
    }
}

pub fn word_count(sentence: &str) -> usize {
    sentence.split_whitespace().count()
}

/// Whitespace-token count of every semantic sentence, in order
pub fn word_counts(semantic: &[String]) -> Vec<usize> {
    semantic.iter().map(|s| word_count(s)).collect()
}

/// Fixed index range over the naive fragments used for inspection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SampleWindow {
    pub start: usize,
    pub end_exclusive: usize,
    /// Characters kept from each fragment
    pub max_chars: usize,
}

impl Default for SampleWindow {
    fn default() -> Self {
        Self {
            start: DEFAULT_WINDOW_START,
            end_exclusive: DEFAULT_WINDOW_END,
            max_chars: SAMPLE_CHARS,
        }
    }
}

impl SampleWindow {
    pub fn new(start: usize, end_exclusive: usize) -> Self {
        Self {
            start,
            end_exclusive,
            ..Self::default()
        }
    }
}

/// A naive fragment picked by the sample window
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SampleFragment {
    /// 0-based index into the naive list
    pub index: usize,
    pub text: String,
}

/// Fragments `[start, min(end_exclusive, len))`, each cut to `max_chars` characters
///
/// Returns nothing (not an error) when the list is too short to reach `start`.
pub fn sample_window(naive: &[String], window: &SampleWindow) -> Vec<SampleFragment> {
    let end = window.end_exclusive.min(naive.len());
    if window.start >= end {
        return Vec::new();
    }
    naive[window.start..end]
        .iter()
        .enumerate()
        .map(|(offset, fragment)| SampleFragment {
            index: window.start + offset,
            text: truncate_chars(fragment, window.max_chars).to_string(),
        })
        .collect()
}

/// Re-segment the sample window with the semantic tokenizer
///
/// The truncated fragments are joined with single spaces first, the way the
/// sample is shown to a reader.
pub fn rechunk_sample(
    sample: &[SampleFragment],
    tokenizer: &dyn SentenceTokenizer,
) -> Result<Vec<String>, ModelUnavailableError> {
    if sample.is_empty() {
        return Ok(Vec::new());
    }
    let joined = sample
        .iter()
        .map(|fragment| fragment.text.as_str())
        .collect::<Vec<_>>()
        .join(" ");
    tokenizer.tokenize(&joined)
}

/// One equal-width histogram bucket; `upper` is exclusive except for the last bin
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HistogramBin {
    pub lower: f64,
    pub upper: f64,
    pub count: usize,
}

/// Bucket values into `bins` equal-width bins spanning `[min, max]`
///
/// Equal values get the range `[v - 0.5, v + 0.5]`. No values or zero bins give
/// no buckets.
pub fn histogram(values: &[usize], bins: usize) -> Vec<HistogramBin> {
    let (Some(&min), Some(&max)) = (values.iter().min(), values.iter().max()) else {
        return Vec::new();
    };
    if bins == 0 {
        return Vec::new();
    }

    let (lower, upper) = if min == max {
        (min as f64 - 0.5, max as f64 + 0.5)
    } else {
        (min as f64, max as f64)
    };
    let width = (upper - lower) / bins as f64;

    let mut histogram: Vec<HistogramBin> = (0..bins)
        .map(|i| HistogramBin {
            lower: lower + width * i as f64,
            upper: lower + width * (i + 1) as f64,
            count: 0,
        })
        .collect();

    for &value in values {
        let position = ((value as f64 - lower) / width) as usize;
        histogram[position.min(bins - 1)].count += 1;
    }
    histogram
}
