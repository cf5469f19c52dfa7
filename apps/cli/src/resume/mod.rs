//! Resume ingestion — turns a user-selected document into plain text for the
//! search request. PDF parsing is CPU-bound and runs on the blocking pool.
//!
//! Only the most recent file's outcome matters: the session replaces or
//! clears its held text on every ingestion attempt, so a failed extraction
//! never leaves stale text behind.

use std::path::Path;

use thiserror::Error;
use tracing::info;

#[derive(Debug, Error)]
pub enum DocumentError {
    #[error("Failed to read {path}: {source}")]
    Read {
        path: String,
        source: std::io::Error,
    },

    #[error("Failed to extract text from PDF. Please upload a valid PDF file.")]
    Pdf(#[source] pdf_extract::OutputError),

    #[error("Unsupported resume format: {0} (expected .pdf, .txt, or .md)")]
    Unsupported(String),

    #[error("Extraction task failed: {0}")]
    Task(String),
}

/// Extracts the text content of a resume document, dispatching on extension.
/// PDF pages are concatenated in document order, separated by newlines.
pub fn extract_resume_text(path: &Path) -> Result<String, DocumentError> {
    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase())
        .unwrap_or_default();

    match extension.as_str() {
        "pdf" => extract_pdf_text(path),
        "txt" | "text" | "md" => read_text_file(path),
        _ => Err(DocumentError::Unsupported(path.display().to_string())),
    }
}

/// Async entry point: offloads extraction so the runtime stays responsive
/// while a large PDF is parsed.
pub async fn ingest(path: &Path) -> Result<String, DocumentError> {
    let owned = path.to_path_buf();
    let text = tokio::task::spawn_blocking(move || extract_resume_text(&owned))
        .await
        .map_err(|e| DocumentError::Task(format!("spawn_blocking failed in extraction: {e}")))??;

    info!(
        "Extracted {} characters from {}",
        text.chars().count(),
        path.display()
    );

    Ok(text)
}

fn extract_pdf_text(path: &Path) -> Result<String, DocumentError> {
    let bytes = std::fs::read(path).map_err(|source| DocumentError::Read {
        path: path.display().to_string(),
        source,
    })?;

    let pages = pdf_extract::extract_text_from_mem_by_pages(&bytes).map_err(DocumentError::Pdf)?;

    Ok(pages.join("\n"))
}

fn read_text_file(path: &Path) -> Result<String, DocumentError> {
    std::fs::read_to_string(path).map_err(|source| DocumentError::Read {
        path: path.display().to_string(),
        source,
    })
}
