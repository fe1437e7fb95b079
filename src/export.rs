// WHY: Plain-text download of the semantic sentence list, decoupled from any presenter

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use tracing::info;

/// File name offered for the export
pub const EXPORT_FILE_NAME: &str = "tokenized_sentences.txt";
/// MIME type of the export
pub const EXPORT_MIME_TYPE: &str = "text/plain";

const BLOCK_SEPARATOR: &str = "\n\n";

/// Export payload ready to be written or served
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportFile {
    pub file_name: &'static str,
    pub mime_type: &'static str,
    pub bytes: Vec<u8>,
}

impl ExportFile {
    pub fn from_sentences(semantic: &[String]) -> Self {
        Self {
            file_name: EXPORT_FILE_NAME,
            mime_type: EXPORT_MIME_TYPE,
            bytes: format_export(semantic).into_bytes(),
        }
    }

    /// Location of the export inside `dir`
    pub fn path_in(&self, dir: &Path) -> PathBuf {
        dir.join(self.file_name)
    }

    /// Write the export into `dir`, creating it as needed; returns the written path
    pub async fn write_into(&self, dir: &Path) -> Result<PathBuf> {
        tokio::fs::create_dir_all(dir)
            .await
            .with_context(|| format!("Failed to create {}", dir.display()))?;

        let export_path = self.path_in(dir);
        tokio::fs::write(&export_path, &self.bytes)
            .await
            .with_context(|| format!("Failed to write {}", export_path.display()))?;
        info!("Wrote {} ({})", export_path.display(), self.mime_type);
        Ok(export_path)
    }
}

/// Directory receiving the export of `source`, found under the run's `input_root`
///
/// A single-file run exports straight into `export_root`. In a directory run the
/// source's path below `input_root`, file name included, becomes a subdirectory,
/// so distinct sources never share an export file.
pub fn export_dir_for(export_root: &Path, input_root: &Path, source: &Path) -> PathBuf {
    if source == input_root {
        return export_root.to_path_buf();
    }
    match source.strip_prefix(input_root) {
        Ok(relative) if !relative.as_os_str().is_empty() => export_root.join(relative),
        _ => export_root.join(source.file_name().unwrap_or(source.as_os_str())),
    }
}

/// One `Sentence <n>: <text>` block per sentence, separated by a blank line
pub fn format_export(semantic: &[String]) -> String {
    semantic
        .iter()
        .enumerate()
        .map(|(i, sentence)| format!("Sentence {}: {}", i + 1, sentence))
        .collect::<Vec<_>>()
        .join(BLOCK_SEPARATOR)
}
