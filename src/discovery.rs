use anyhow::Result;
use ignore::WalkBuilder;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// Configuration for file discovery behavior
#[derive(Debug, Clone, Default)]
pub struct DiscoveryConfig {
    /// Whether to fail fast on first error or continue processing
    pub fail_fast: bool,
}

/// True for `*.pdf`, case-insensitive
pub fn is_pdf_path(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("pdf"))
}

/// Resolve the CLI input into the list of PDFs to compare
///
/// A file is returned as-is whatever its extension, so non-PDF input reaches the
/// extractor and is rejected there. A directory is walked recursively for
/// `*.pdf` files, returned in sorted order.
pub async fn collect_pdf_files(input: &Path, config: DiscoveryConfig) -> Result<Vec<PathBuf>> {
    let metadata = tokio::fs::metadata(input).await?;
    if metadata.is_file() {
        return Ok(vec![input.to_path_buf()]);
    }
    if !metadata.is_dir() {
        anyhow::bail!("Input is neither a file nor a directory: {}", input.display());
    }

    let root = input.to_path_buf();
    // WHY: ignore's walker is blocking; keep it off the async worker threads
    let files = tokio::task::spawn_blocking(move || walk_pdf_files(&root, &config)).await??;
    info!("Discovered {} PDF files under {}", files.len(), input.display());
    Ok(files)
}

fn walk_pdf_files(root: &Path, config: &DiscoveryConfig) -> Result<Vec<PathBuf>> {
    let walker = WalkBuilder::new(root)
        .follow_links(false) // Don't follow symlinks
        .hidden(false) // Don't skip hidden files/dirs
        .ignore(false) // Don't read .ignore files
        .git_ignore(false) // Don't read .gitignore files
        .build();

    let mut files = Vec::new();
    for entry in walker {
        match entry {
            Ok(entry) => {
                if entry.file_type().is_some_and(|ft| ft.is_file()) && is_pdf_path(entry.path()) {
                    debug!("Found matching file: {}", entry.path().display());
                    files.push(entry.into_path());
                }
            }
            Err(e) => {
                if config.fail_fast {
                    return Err(anyhow::anyhow!("Directory traversal failed: {}", e));
                }
                warn!("Skipping unreadable entry: {}", e);
            }
        }
    }

    files.sort();
    Ok(files)
}
