// WHY: Request/response entry point for one document: bytes in, comparison out
// FullText is extracted once per document identity and reused on later calls

use serde::Serialize;
use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Instant;
use tracing::{debug, info};

use crate::error::{InputError, PipelineError};
use crate::export::ExportFile;
use crate::extract::{Document, DocumentId, PdfTextExtractor, TextExtractor, TextMetrics};
use crate::report::{
    build_report, histogram, rechunk_sample, sample_window, word_counts, ComparisonReport,
    HistogramBin, SampleFragment, SampleWindow, HISTOGRAM_BINS,
};
use crate::sentence_detector::{split_naive, SentenceTokenizer, SharedTokenizer};

/// Documents whose FullText a comparator keeps by default
pub const DEFAULT_CACHE_CAPACITY: usize = 16;

/// Tunable parameters of a comparison run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CompareConfig {
    pub window: SampleWindow,
    pub histogram_bins: usize,
    /// Most recently used documents whose FullText stays cached; 0 disables the cache
    pub cache_capacity: usize,
}

impl Default for CompareConfig {
    fn default() -> Self {
        Self {
            window: SampleWindow::default(),
            histogram_bins: HISTOGRAM_BINS,
            cache_capacity: DEFAULT_CACHE_CAPACITY,
        }
    }
}

/// Everything derived from one document
#[derive(Debug, Clone, Serialize)]
pub struct DocumentComparison {
    /// `None` when the comparison started from text rather than PDF bytes
    pub document_id: Option<DocumentId>,
    pub tokenizer: String,
    pub metrics: TextMetrics,
    pub report: ComparisonReport,
    pub sample: Vec<SampleFragment>,
    /// Semantic re-segmentation of the joined sample fragments
    pub sample_chunks: Vec<String>,
    pub word_counts: Vec<usize>,
    pub histogram: Vec<HistogramBin>,
    #[serde(skip)]
    pub naive_sentences: Vec<String>,
    #[serde(skip)]
    pub semantic_sentences: Vec<String>,
}

impl DocumentComparison {
    /// Plain-text export of the semantic sentence list
    pub fn export(&self) -> ExportFile {
        ExportFile::from_sentences(&self.semantic_sentences)
    }
}

#[derive(Debug)]
struct ExtractedText {
    full_text: String,
    page_count: usize,
}

/// Least-recently-used FullText store holding at most `capacity` documents
#[derive(Debug)]
struct FullTextCache {
    capacity: usize,
    entries: HashMap<DocumentId, Arc<ExtractedText>>,
    // Front is the least recently used
    order: VecDeque<DocumentId>,
}

impl FullTextCache {
    fn new(capacity: usize) -> Self {
        Self {
            capacity,
            entries: HashMap::new(),
            order: VecDeque::new(),
        }
    }

    fn get(&mut self, id: &DocumentId) -> Option<Arc<ExtractedText>> {
        let hit = self.entries.get(id).cloned();
        if hit.is_some() {
            self.touch(id);
        }
        hit
    }

    fn insert(&mut self, id: DocumentId, extracted: Arc<ExtractedText>) {
        if self.capacity == 0 {
            return;
        }
        if self.entries.insert(id, extracted).is_some() {
            self.touch(&id);
            return;
        }
        self.order.push_back(id);
        while self.order.len() > self.capacity {
            if let Some(evicted) = self.order.pop_front() {
                self.entries.remove(&evicted);
                debug!("Evicted FullText of {} from cache", evicted);
            }
        }
    }

    fn touch(&mut self, id: &DocumentId) {
        if let Some(position) = self.order.iter().position(|cached| cached == id) {
            self.order.remove(position);
        }
        self.order.push_back(*id);
    }

    fn len(&self) -> usize {
        self.entries.len()
    }

    fn clear(&mut self) {
        self.entries.clear();
        self.order.clear();
    }
}

/// Runs the naive vs semantic comparison with injected extractor and tokenizer
pub struct Comparator {
    extractor: Box<dyn TextExtractor>,
    tokenizer: Arc<dyn SentenceTokenizer>,
    config: CompareConfig,
    cache: Mutex<FullTextCache>,
}

impl Comparator {
    pub fn new(
        extractor: Box<dyn TextExtractor>,
        tokenizer: Arc<dyn SentenceTokenizer>,
        config: CompareConfig,
    ) -> Self {
        Self {
            extractor,
            tokenizer,
            config,
            cache: Mutex::new(FullTextCache::new(config.cache_capacity)),
        }
    }

    /// lopdf extraction with the built-in English model
    pub fn with_defaults() -> Self {
        Self::new(
            Box::new(PdfTextExtractor::new()),
            Arc::new(SharedTokenizer::english()),
            CompareConfig::default(),
        )
    }

    pub fn config(&self) -> &CompareConfig {
        &self.config
    }

    /// Compare both segmentations of a PDF given as raw bytes
    pub fn compare(&self, pdf_bytes: &[u8]) -> Result<DocumentComparison, PipelineError> {
        let document_id = DocumentId::from_bytes(pdf_bytes);
        let extracted = self.extracted_text(document_id, pdf_bytes)?;
        self.run(Some(document_id), &extracted.full_text, extracted.page_count)
    }

    /// Compare both segmentations of already extracted pages
    pub fn compare_document(&self, document: &Document) -> Result<DocumentComparison, PipelineError> {
        self.run(None, &document.full_text(), document.page_count())
    }

    /// Compare both segmentations of FullText, treated as a single page
    pub fn compare_text(&self, full_text: &str) -> Result<DocumentComparison, PipelineError> {
        self.compare_document(&Document::new(vec![full_text.to_string()]))
    }

    /// Plain-text export of a finished comparison
    pub fn export(&self, comparison: &DocumentComparison) -> ExportFile {
        comparison.export()
    }

    /// Number of documents whose FullText is cached, never above `cache_capacity`
    pub fn cached_documents(&self) -> usize {
        self.cache().len()
    }

    pub fn clear_cache(&self) {
        self.cache().clear();
    }

    fn cache(&self) -> MutexGuard<'_, FullTextCache> {
        self.cache.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn extracted_text(
        &self,
        document_id: DocumentId,
        pdf_bytes: &[u8],
    ) -> Result<Arc<ExtractedText>, InputError> {
        let cached = self.cache().get(&document_id);
        if let Some(extracted) = cached {
            debug!("FullText cache hit for {}", document_id);
            return Ok(extracted);
        }

        let document = self.extractor.extract(pdf_bytes)?;
        let extracted = Arc::new(ExtractedText {
            full_text: document.full_text(),
            page_count: document.page_count(),
        });
        self.cache().insert(document_id, Arc::clone(&extracted));
        Ok(extracted)
    }

    fn run(
        &self,
        document_id: Option<DocumentId>,
        full_text: &str,
        page_count: usize,
    ) -> Result<DocumentComparison, PipelineError> {
        let start_time = Instant::now();
        let metrics = TextMetrics::measure(full_text, page_count);

        // WHY: empty FullText yields empty lists for both methods, not the naive [""]
        let (naive_sentences, semantic_sentences) = if full_text.is_empty() {
            (Vec::new(), Vec::new())
        } else {
            (split_naive(full_text), self.tokenizer.tokenize(full_text)?)
        };

        let report = build_report(&naive_sentences, &semantic_sentences);
        let sample = sample_window(&naive_sentences, &self.config.window);
        let sample_chunks = rechunk_sample(&sample, self.tokenizer.as_ref())?;
        let word_counts = word_counts(&semantic_sentences);
        let histogram = histogram(&word_counts, self.config.histogram_bins);

        info!(
            "Compared {} characters: {} naive fragments vs {} sentences in {}ms",
            metrics.char_count,
            naive_sentences.len(),
            semantic_sentences.len(),
            start_time.elapsed().as_millis()
        );

        Ok(DocumentComparison {
            document_id,
            tokenizer: self.tokenizer.name().to_string(),
            metrics,
            report,
            sample,
            sample_chunks,
            word_counts,
            histogram,
            naive_sentences,
            semantic_sentences,
        })
    }
}
