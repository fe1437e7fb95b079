// WHY: Model loading is an explicit, injectable step instead of a side effect at startup
// A shared tokenizer is built at most once and then only read

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::sync::OnceLock;
use tracing::{debug, info, warn};

use super::abbreviations::ENGLISH_ABBREVIATIONS;
use super::{SemanticTokenizer, SentenceTokenizer};
use crate::error::ModelUnavailableError;

/// Closing quotes and brackets that may follow terminal punctuation
pub const DEFAULT_CLOSING_PUNCTUATION: &[char] =
    &['"', '\'', '\u{201D}', '\u{2019}', ')', ']', '}'];

/// Serializable description of a rule-based sentence model
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenizerModel {
    /// Model name, e.g. `english`
    pub language: String,
    /// Tokens after which a period does not end a sentence
    pub abbreviations: Vec<String>,
    /// Characters that stay attached to the sentence after `.`, `!` or `?`
    #[serde(default = "default_closing_punctuation")]
    pub closing_punctuation: Vec<char>,
}

fn default_closing_punctuation() -> Vec<char> {
    DEFAULT_CLOSING_PUNCTUATION.to_vec()
}

impl TokenizerModel {
    /// Built-in English model
    pub fn english() -> Self {
        Self {
            language: "english".to_string(),
            abbreviations: ENGLISH_ABBREVIATIONS.iter().map(|s| s.to_string()).collect(),
            closing_punctuation: default_closing_punctuation(),
        }
    }

    /// Load a model from a JSON file
    pub fn from_json_file(path: &Path) -> Result<Self, ModelUnavailableError> {
        let model_name = path.display().to_string();
        let content = std::fs::read_to_string(path)
            .map_err(|e| ModelUnavailableError::new(&model_name, e.to_string()))?;
        serde_json::from_str(&content)
            .map_err(|e| ModelUnavailableError::new(&model_name, format!("invalid model file: {e}")))
    }
}

impl Default for TokenizerModel {
    fn default() -> Self {
        Self::english()
    }
}

/// Where a shared tokenizer gets its model from
#[derive(Debug, Clone)]
pub enum ModelSource {
    /// Compiled-in English model, always available
    BuiltinEnglish,
    /// JSON model file, read on initialization
    File(PathBuf),
}

impl ModelSource {
    fn label(&self) -> String {
        match self {
            ModelSource::BuiltinEnglish => "english".to_string(),
            ModelSource::File(path) => path.display().to_string(),
        }
    }

    fn load(&self) -> Result<TokenizerModel, ModelUnavailableError> {
        match self {
            ModelSource::BuiltinEnglish => Ok(TokenizerModel::english()),
            ModelSource::File(path) => TokenizerModel::from_json_file(path),
        }
    }
}

/// Lazily initialized, read-only tokenizer that can be shared across documents
///
/// `tokenize` initializes on first use. A failed initialization is not cached, so
/// a later call (or an explicit [`SharedTokenizer::initialize`]) retries.
#[derive(Debug)]
pub struct SharedTokenizer {
    source: ModelSource,
    label: String,
    tokenizer: OnceLock<SemanticTokenizer>,
}

impl SharedTokenizer {
    pub fn new(source: ModelSource) -> Self {
        let label = source.label();
        Self {
            source,
            label,
            tokenizer: OnceLock::new(),
        }
    }

    pub fn english() -> Self {
        Self::new(ModelSource::BuiltinEnglish)
    }

    pub fn from_file(path: impl Into<PathBuf>) -> Self {
        Self::new(ModelSource::File(path.into()))
    }

    pub fn is_initialized(&self) -> bool {
        self.tokenizer.get().is_some()
    }

    /// Load and compile the model if that has not happened yet; idempotent
    pub fn initialize(&self) -> Result<&SemanticTokenizer, ModelUnavailableError> {
        if let Some(tokenizer) = self.tokenizer.get() {
            return Ok(tokenizer);
        }

        debug!("Initializing sentence model from {}", self.label);
        let model = match self.source.load() {
            Ok(model) => model,
            Err(e) => {
                warn!("Sentence model initialization failed: {}", e);
                return Err(e);
            }
        };
        let tokenizer = SemanticTokenizer::new(&model)?;

        // WHY: a concurrent initializer may have won the race; both results are equivalent
        let _ = self.tokenizer.set(tokenizer);
        info!("Sentence model {} ready", self.label);
        self.tokenizer
            .get()
            .ok_or_else(|| ModelUnavailableError::new(&self.label, "initialization did not complete"))
    }
}

impl SentenceTokenizer for SharedTokenizer {
    fn name(&self) -> &str {
        &self.label
    }

    fn tokenize(&self, text: &str) -> Result<Vec<String>, ModelUnavailableError> {
        self.initialize()?.tokenize(text)
    }
}
