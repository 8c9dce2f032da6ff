pub mod paginator;
pub mod pdf;

use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::sync::activity_store::{ActivityStore, FetchError};

pub use paginator::{Document, ExportPaginator, LineKind, Page, PageLayout, PlacedLine};
pub use pdf::{PdfError, render_pdf};

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("Export failed: {0}")]
    Fetch(#[from] FetchError),
    #[error(transparent)]
    Pdf(#[from] PdfError),
    #[error("Failed to write export file: {0}")]
    Io(#[from] std::io::Error),
}

#[derive(Debug, Clone, PartialEq)]
pub struct ExportSummary {
    pub path: PathBuf,
    pub pages: usize,
    pub days: usize,
}

/// Writes `document` as PDF. A directory `target` receives the document's
/// default file name; anything else is used as the file path.
pub fn write_document(document: &Document, target: &Path) -> Result<PathBuf, ExportError> {
    let path = if target.is_dir() {
        target.join(document.file_name())
    } else {
        target.to_path_buf()
    };

    let bytes = render_pdf(document)?;

    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent)?;
    }

    std::fs::write(&path, bytes)?;
    Ok(path)
}

pub async fn export_activities(
    store: &ActivityStore,
    paginator: &ExportPaginator,
    target: &Path,
) -> Result<ExportSummary, ExportError> {
    let index = store.load_all().await?;
    let document = paginator.export(&index);
    let path = write_document(&document, target)?;

    tracing::info!(
        "Exported {} days on {} pages to {}",
        index.day_count(),
        document.pages.len(),
        path.display()
    );

    Ok(ExportSummary {
        path,
        pages: document.pages.len(),
        days: index.day_count(),
    })
}
