//! CV export pipeline — record → template → conversion collaborator →
//! named download.
//!
//! One export may hold the gate at a time; a concurrent trigger is rejected
//! with a conflict rather than queued, so a retry always converts a fresh
//! read of the data files. Every failure path surfaces exactly one error and
//! leaves no scratch state behind (the process backend's temp dir drops with
//! the call).

pub mod handlers;

use bytes::Bytes;
use tokio::sync::Semaphore;
use tracing::info;

use crate::content::ContentStore;
use crate::errors::AppError;
use crate::pdf_client::{PageSetup, PdfRenderer};
use crate::render::{render_cv, CvStyle};

/// A finished export: the bytes plus the download filename derived from the
/// record's `name`.
#[derive(Debug)]
pub struct CvDownload {
    pub filename: String,
    pub bytes: Bytes,
}

/// Derives the download filename: whitespace runs in `name` collapse to a
/// single underscore.
pub fn cv_filename(name: &str) -> String {
    let sanitized = name.split_whitespace().collect::<Vec<_>>().join("_");
    format!("{sanitized}_CV.pdf")
}

/// Wraps the fragment into the standalone scratch document handed to the
/// conversion engine. Outer margin is zero; padding lives in the fragment.
fn scaffold_document(fragment: &str) -> String {
    format!(
        "<!DOCTYPE html><html><head><meta charset=\"utf-8\"></head>\
         <body style=\"margin:0\">{fragment}</body></html>"
    )
}

/// Runs the full export pipeline.
///
/// Steps:
/// 1. take the export gate (reject with 409 if an export is in flight)
/// 2. load the resume record (data failure aborts before any conversion)
/// 3. render the fragment and scaffold the document
/// 4. convert on A4, zero margin, scale 2
/// 5. name the download from the sanitized record name
pub async fn export_cv(
    store: &ContentStore,
    renderer: &dyn PdfRenderer,
    gate: &Semaphore,
    style: &CvStyle,
) -> Result<CvDownload, AppError> {
    let _permit = gate.try_acquire().map_err(|_| AppError::ExportInFlight)?;

    let record = store.load_resume().await?;
    let document = scaffold_document(&render_cv(&record, style));
    let bytes = renderer.render(&document, &PageSetup::a4()).await?;

    info!(
        "exported CV for {:?} ({} bytes)",
        record.name,
        bytes.len()
    );
    Ok(CvDownload {
        filename: cv_filename(&record.name),
        bytes,
    })
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    use async_trait::async_trait;

    use crate::content::RESUME_FILE;
    use crate::pdf_client::PdfError;

    struct OkRenderer {
        calls: AtomicUsize,
    }

    impl OkRenderer {
        fn new() -> Self {
            Self {
                calls: AtomicUsize::new(0),
            }
        }
    }

    #[async_trait]
    impl PdfRenderer for OkRenderer {
        async fn render(&self, html: &str, page: &PageSetup) -> Result<Bytes, PdfError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            assert_eq!(*page, PageSetup::a4());
            assert!(html.starts_with("<!DOCTYPE html>"));
            Ok(Bytes::from_static(b"%PDF-1.7 fake"))
        }
    }

    struct FailingRenderer;

    #[async_trait]
    impl PdfRenderer for FailingRenderer {
        async fn render(&self, _html: &str, _page: &PageSetup) -> Result<Bytes, PdfError> {
            Err(PdfError::Unavailable("engine down".to_string()))
        }
    }

    fn store_with_record(name: &str) -> (tempfile::TempDir, ContentStore) {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join(RESUME_FILE),
            format!(r#"{{"name": "{name}"}}"#),
        )
        .unwrap();
        let store = ContentStore::new(dir.path());
        (dir, store)
    }

    #[test]
    fn test_cv_filename_sanitization() {
        assert_eq!(cv_filename("Indra Wijaya"), "Indra_Wijaya_CV.pdf");
        assert_eq!(cv_filename("A  B"), "A_B_CV.pdf");
        assert_eq!(cv_filename("  Indra   Putra Wijaya "), "Indra_Putra_Wijaya_CV.pdf");
        assert_eq!(cv_filename(""), "_CV.pdf");
    }

    #[tokio::test]
    async fn test_export_produces_named_download() {
        let (_dir, store) = store_with_record("Indra Wijaya");
        let renderer = OkRenderer::new();
        let gate = Semaphore::new(1);
        let download = export_cv(&store, &renderer, &gate, &CvStyle::default())
            .await
            .unwrap();
        assert_eq!(download.filename, "Indra_Wijaya_CV.pdf");
        assert!(!download.bytes.is_empty());
        assert_eq!(renderer.calls.load(Ordering::SeqCst), 1);
        // The gate is free again once the export settles.
        assert_eq!(gate.available_permits(), 1);
    }

    #[tokio::test]
    async fn test_concurrent_trigger_is_rejected_then_allowed() {
        let (_dir, store) = store_with_record("Indra Wijaya");
        let renderer = OkRenderer::new();
        let gate = Arc::new(Semaphore::new(1));

        let held = gate.clone().try_acquire_owned().unwrap();
        let err = export_cv(&store, &renderer, &gate, &CvStyle::default())
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::ExportInFlight));
        assert_eq!(renderer.calls.load(Ordering::SeqCst), 0);

        drop(held);
        assert!(export_cv(&store, &renderer, &gate, &CvStyle::default())
            .await
            .is_ok());
    }

    #[tokio::test]
    async fn test_data_failure_aborts_before_conversion() {
        let dir = tempfile::tempdir().unwrap();
        let store = ContentStore::new(dir.path());
        let renderer = OkRenderer::new();
        let gate = Semaphore::new(1);
        let err = export_cv(&store, &renderer, &gate, &CvStyle::default())
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Data(_)));
        assert_eq!(renderer.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_conversion_failure_surfaces_and_releases_gate() {
        let (_dir, store) = store_with_record("Indra Wijaya");
        let gate = Semaphore::new(1);
        let err = export_cv(&store, &FailingRenderer, &gate, &CvStyle::default())
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Export(_)));
        assert_eq!(gate.available_permits(), 1);
    }
}
