// WHY: callers must tell a bad document apart from a missing sentence model
// so they can retry model initialization instead of rejecting the input

use std::path::PathBuf;
use thiserror::Error;

/// The supplied document cannot be turned into text
#[derive(Debug, Error)]
pub enum InputError {
    /// No `%PDF-` header within the first kilobyte
    #[error("input is not a PDF document")]
    NotPdf,

    #[error("PDF is encrypted and cannot be read without a password")]
    Encrypted,

    #[error("malformed PDF: {0}")]
    Malformed(String),

    #[error("failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// The sentence model could not be loaded or has not been initialized
#[derive(Debug, Error)]
#[error("sentence model `{model}` unavailable: {reason}")]
pub struct ModelUnavailableError {
    pub model: String,
    pub reason: String,
}

impl ModelUnavailableError {
    pub fn new(model: impl Into<String>, reason: impl Into<String>) -> Self {
        Self {
            model: model.into(),
            reason: reason.into(),
        }
    }
}

/// Any failure of a single document's comparison run
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error(transparent)]
    Input(#[from] InputError),

    #[error(transparent)]
    ModelUnavailable(#[from] ModelUnavailableError),
}

impl PipelineError {
    /// True when the caller should initialize the model and re-invoke
    pub fn is_model_unavailable(&self) -> bool {
        matches!(self, PipelineError::ModelUnavailable(_))
    }
}
