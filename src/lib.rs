pub mod discovery;
pub mod error;
pub mod export;
pub mod extract;
pub mod pipeline;
pub mod presenter;
pub mod reader;
pub mod report;
pub mod sentence_detector;
pub mod stats;

// Re-export main types for convenient access
pub use error::{InputError, ModelUnavailableError, PipelineError};
pub use export::{export_dir_for, format_export, ExportFile, EXPORT_FILE_NAME, EXPORT_MIME_TYPE};
pub use extract::{Document, DocumentId, PdfTextExtractor, TextExtractor, TextMetrics};
pub use pipeline::{CompareConfig, Comparator, DocumentComparison, DEFAULT_CACHE_CAPACITY};
pub use report::{
    build_report, sample_window, word_counts, ComparisonReport, ComparisonRow, SampleFragment,
    SampleWindow, SentenceStat,
};

// Re-export segmentation entry points
pub use sentence_detector::{
    split_naive, SemanticTokenizer, SentenceTokenizer, SharedTokenizer, TokenizerModel,
};
