use memmap2::Mmap;
use std::ops::Deref;
use std::path::Path;
use tokio::fs::File;
use tokio::io::{AsyncReadExt, BufReader};
use tracing::{debug, info, warn};

use crate::error::InputError;

/// Configuration for document reading behavior
#[derive(Debug, Clone)]
pub struct ReaderConfig {
    /// Map the file into memory instead of reading it through a buffer
    pub use_mmap: bool,
    /// Buffer size for async reading (default: 8KB)
    pub buffer_size: usize,
}

impl Default for ReaderConfig {
    fn default() -> Self {
        Self {
            use_mmap: false,
            buffer_size: 8192,
        }
    }
}

/// Statistics for one document read
#[derive(Debug, Clone)]
pub struct ReadStats {
    pub file_path: String,
    pub bytes_read: u64,
    pub duration_ms: u64,
}

/// Raw document bytes, either owned or memory mapped
///
/// Both forms are `Send`, so a mapped file can move into a blocking task as-is.
#[derive(Debug)]
pub enum DocumentBytes {
    Owned(Vec<u8>),
    Mapped(Mmap),
}

impl Deref for DocumentBytes {
    type Target = [u8];

    fn deref(&self) -> &[u8] {
        match self {
            DocumentBytes::Owned(bytes) => bytes,
            DocumentBytes::Mapped(map) => map,
        }
    }
}

/// Reads whole PDF documents from disk
pub struct DocumentReader {
    config: ReaderConfig,
}

impl DocumentReader {
    pub fn new(config: ReaderConfig) -> Self {
        Self { config }
    }

    /// Read a document; an unreadable file is an [`InputError::Read`]
    ///
    /// Whether a failed read aborts the run is up to the caller.
    pub async fn read_document<P: AsRef<Path>>(
        &self,
        file_path: P,
    ) -> Result<(DocumentBytes, ReadStats), InputError> {
        let path = file_path.as_ref();
        let start_time = std::time::Instant::now();

        debug!("Starting read of document: {}", path.display());

        let result = if self.config.use_mmap {
            read_mapped(path)
        } else {
            self.read_buffered(path).await
        };

        let bytes = result.map_err(|source| {
            warn!("Failed to read {}: {}", path.display(), source);
            InputError::Read {
                path: path.to_path_buf(),
                source,
            }
        })?;

        let stats = ReadStats {
            file_path: path.display().to_string(),
            bytes_read: bytes.len() as u64,
            duration_ms: start_time.elapsed().as_millis() as u64,
        };
        info!(
            "Read {}: {} bytes in {}ms",
            path.display(),
            stats.bytes_read,
            stats.duration_ms
        );
        Ok((bytes, stats))
    }

    async fn read_buffered(&self, path: &Path) -> std::io::Result<DocumentBytes> {
        let file = File::open(path).await?;
        let capacity = file.metadata().await.map(|m| m.len() as usize).unwrap_or(0);
        let mut reader = BufReader::with_capacity(self.config.buffer_size, file);
        let mut bytes = Vec::with_capacity(capacity);
        reader.read_to_end(&mut bytes).await?;
        Ok(DocumentBytes::Owned(bytes))
    }
}

fn read_mapped(path: &Path) -> std::io::Result<DocumentBytes> {
    let file = std::fs::File::open(path)?;
    // SAFETY: the map is read-only and dropped before the run ends; concurrent
    // truncation by another process is outside what this tool guards against
    let map = unsafe { Mmap::map(&file)? };
    Ok(DocumentBytes::Mapped(map))
}
