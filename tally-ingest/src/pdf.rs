//! PDF-backed [`DocumentReader`] using `pdf-extract`.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};

use crate::document::{DocumentReader, text_to_table};
use crate::types::Table;

/// Reads statement PDFs from disk. Tables are recovered from the laid-out
/// page text, one grid per page.
#[derive(Debug, Clone, Copy, Default)]
pub struct PdfReader;

impl PdfReader {
    fn pages(path: &Path) -> Result<Vec<String>> {
        let bytes = fs::read(path).with_context(|| format!("reading {}", path.display()))?;
        // pdf-extract panics on some malformed content streams
        let pages = std::panic::catch_unwind(|| pdf_extract::extract_text_from_mem_by_pages(&bytes))
            .map_err(|_| anyhow::anyhow!("pdf parser panicked on {}", path.display()))?
            .map_err(|e| anyhow::anyhow!("extracting text from {}: {}", path.display(), e))?;
        tracing::debug!(path = %path.display(), pages = pages.len(), "extracted pdf text");
        Ok(pages)
    }
}

impl DocumentReader for PdfReader {
    fn read_text(&self, path: &Path) -> Result<Vec<String>> {
        Self::pages(path)
    }

    fn read_tables(&self, path: &Path) -> Result<Vec<Table>> {
        Ok(Self::pages(path)?
            .iter()
            .map(|page| text_to_table(page))
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_file_is_an_error() {
        let err = PdfReader
            .read_text(Path::new("/nonexistent/statement.pdf"))
            .unwrap_err();
        assert!(err.to_string().contains("reading /nonexistent/statement.pdf"));
    }

    #[test]
    fn test_garbage_bytes_are_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.pdf");
        fs::write(&path, b"definitely not a pdf").unwrap();
        assert!(PdfReader.read_tables(&path).is_err());
    }
}
