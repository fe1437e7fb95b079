// WHY: Per-document run statistics written as JSON after a CLI run

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::path::Path;
use tokio::fs;

use crate::pipeline::DocumentComparison;

/// Outcome of one document
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum DocumentStatus {
    Success,
    Failed,
}

/// Per-document processing statistics
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct DocumentStats {
    /// Document path as given on the command line or found by discovery
    pub path: String,
    pub document_id: Option<String>,
    pub page_count: usize,
    /// Characters of FullText
    pub chars_extracted: usize,
    pub naive_count: usize,
    pub semantic_count: usize,
    pub naive_avg_length: f64,
    pub semantic_avg_length: f64,
    /// Processing time in milliseconds, reading included
    pub processing_time_ms: u64,
    pub status: DocumentStatus,
    /// Error message if processing failed
    pub error: Option<String>,
}

impl DocumentStats {
    pub fn success(path: &Path, comparison: &DocumentComparison, processing_time_ms: u64) -> Self {
        Self {
            path: path.display().to_string(),
            document_id: comparison.document_id.map(|id| id.to_string()),
            page_count: comparison.metrics.page_count,
            chars_extracted: comparison.metrics.char_count,
            naive_count: comparison.report.naive().sentence_count,
            semantic_count: comparison.report.semantic().sentence_count,
            naive_avg_length: comparison.report.naive().avg_length,
            semantic_avg_length: comparison.report.semantic().avg_length,
            processing_time_ms,
            status: DocumentStatus::Success,
            error: None,
        }
    }

    pub fn failure(path: &Path, error: impl ToString, processing_time_ms: u64) -> Self {
        Self {
            path: path.display().to_string(),
            document_id: None,
            page_count: 0,
            chars_extracted: 0,
            naive_count: 0,
            semantic_count: 0,
            naive_avg_length: 0.0,
            semantic_avg_length: 0.0,
            processing_time_ms,
            status: DocumentStatus::Failed,
            error: Some(error.to_string()),
        }
    }
}

/// Aggregate statistics of one CLI run
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
pub struct RunStats {
    pub documents_processed: usize,
    pub documents_failed: usize,
    pub total_processing_time_ms: u64,
    pub documents: Vec<DocumentStats>,
}

impl RunStats {
    pub fn record(&mut self, stats: DocumentStats) {
        match stats.status {
            DocumentStatus::Success => self.documents_processed += 1,
            DocumentStatus::Failed => self.documents_failed += 1,
        }
        self.total_processing_time_ms += stats.processing_time_ms;
        self.documents.push(stats);
    }

    /// Write as pretty JSON, creating parent directories as needed
    pub async fn save(&self, path: &Path) -> Result<()> {
        let content = serde_json::to_string_pretty(self)?;

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).await?;
        }

        fs::write(path, content).await?;
        Ok(())
    }

    pub async fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).await?;
        Ok(serde_json::from_str(&content)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pipeline::Comparator;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_run_stats_round_trip_through_json() {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let comparison = Comparator::with_defaults()
            .compare_text("Dr. Smith went home. He left.")
            .unwrap();

        let mut run = RunStats::default();
        run.record(DocumentStats::success(Path::new("a.pdf"), &comparison, 12));
        run.record(DocumentStats::failure(Path::new("b.pdf"), "input is not a PDF document", 3));
        assert_eq!(run.documents_processed, 1);
        assert_eq!(run.documents_failed, 1);
        assert_eq!(run.total_processing_time_ms, 15);

        let path = temp_dir.path().join("out/run_stats.json");
        run.save(&path).await.unwrap();
        let loaded = RunStats::load(&path).await.unwrap();
        assert_eq!(loaded.documents.len(), 2);
        assert_eq!(loaded.documents[0].document_id, run.documents[0].document_id);
        assert!((loaded.documents[0].naive_avg_length - run.documents[0].naive_avg_length).abs() < 1e-9);

        assert_eq!(loaded.documents[0].naive_count, 3);
        assert_eq!(loaded.documents[0].semantic_count, 2);
        assert_eq!(loaded.documents[1].status, DocumentStatus::Failed);
    }

    #[test]
    fn test_status_serializes_snake_case() {
        let json = serde_json::to_string(&DocumentStatus::Success).unwrap();
        assert_eq!(json, "\"success\"");
    }
}
