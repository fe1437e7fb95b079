// WHY: Two competing segmenters behind one module so the comparison report
// can run both over the same FullText

use crate::error::ModelUnavailableError;

pub mod abbreviations;
pub mod model;
pub mod naive;
pub mod semantic;

// Re-export core types
pub use abbreviations::AbbreviationChecker;
pub use model::{SharedTokenizer, TokenizerModel};
pub use naive::{split_naive, NAIVE_DELIMITER};
pub use semantic::SemanticTokenizer;

/// A sentence-boundary model that can be injected into the pipeline
///
/// Implementations may need a one-time initialization step before first use.
/// When that step has not happened or cannot succeed, `tokenize` must fail with
/// [`ModelUnavailableError`] rather than guessing.
pub trait SentenceTokenizer: Send + Sync {
    /// Short model name used in logs and errors
    fn name(&self) -> &str;

    /// Split text into ordered sentences; empty text yields an empty list
    fn tokenize(&self, text: &str) -> Result<Vec<String>, ModelUnavailableError>;
}

impl<T: SentenceTokenizer + ?Sized> SentenceTokenizer for std::sync::Arc<T> {
    fn name(&self) -> &str {
        (**self).name()
    }

    fn tokenize(&self, text: &str) -> Result<Vec<String>, ModelUnavailableError> {
        (**self).tokenize(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    #[test]
    fn test_tokenizer_is_object_safe() {
        let tokenizer: Box<dyn SentenceTokenizer> =
            Box::new(SemanticTokenizer::new(&TokenizerModel::english()).unwrap());
        let sentences = tokenizer.tokenize("Hello world. This is a test.").unwrap();
        assert_eq!(sentences, vec!["Hello world.", "This is a test."]);
    }

    #[test]
    fn test_arc_delegates() {
        let tokenizer = Arc::new(SemanticTokenizer::new(&TokenizerModel::english()).unwrap());
        assert_eq!(tokenizer.name(), "english");
        assert_eq!(SentenceTokenizer::tokenize(&tokenizer, "").unwrap().len(), 0);
    }
}
