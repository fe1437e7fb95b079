// WHY: Deliberately unintelligent baseline; abbreviations and decimals must
// keep breaking it so the comparison has something to show

/// Literal two-character delimiter used by the naive splitter
pub const NAIVE_DELIMITER: &str = ". ";

/// Split text on every occurrence of `". "`
///
/// The delimiter is consumed. Fragments are neither trimmed nor filtered, so the
/// result always holds at least one element (`[""]` for empty input).
pub fn split_naive(text: &str) -> Vec<String> {
    text.split(NAIVE_DELIMITER).map(str::to_owned).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_abbreviation_breaks_naive_split() {
        let fragments = split_naive("Dr. Smith went home. He left.");
        assert_eq!(fragments, vec!["Dr", "Smith went home", "He left."]);
    }

    #[test]
    fn test_empty_input_yields_single_empty_fragment() {
        assert_eq!(split_naive(""), vec![String::new()]);
    }

    #[test]
    fn test_never_empty() {
        for text in ["", ". ", "no delimiter", ". . ", "a.b. c"] {
            assert!(!split_naive(text).is_empty(), "empty result for {text:?}");
        }
    }

    #[test]
    fn test_no_trimming_or_filtering() {
        assert_eq!(split_naive(". . x"), vec!["", "", "x"]);
        assert_eq!(split_naive("a.  b"), vec!["a", " b"]);
    }

    #[test]
    fn test_other_terminators_ignored() {
        assert_eq!(split_naive("Really? Yes! 3.5 kg."), vec!["Really? Yes! 3.5 kg."]);
    }
}
