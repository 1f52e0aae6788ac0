//! PDF Client — the single point of entry for HTML-to-PDF conversion.
//!
//! All conversion goes through the `PdfRenderer` trait; no other module may
//! talk to a conversion engine directly. Two backends exist: an HTTP backend
//! speaking the Gotenberg Chromium API (default) and a local `wkhtmltopdf`
//! process backend. Both verify their collaborator lazily on first use and
//! cache the verdict; startup never probes an engine.

use async_trait::async_trait;
use bytes::Bytes;
use reqwest::multipart::{Form, Part};
use reqwest::Client;
use thiserror::Error;
use tokio::process::Command;
use tokio::sync::OnceCell;
use tracing::{debug, warn};

const CONVERT_PATH: &str = "/forms/chromium/convert/html";
const HEALTH_PATH: &str = "/health";
const REQUEST_TIMEOUT_SECS: u64 = 120;
const MAX_RETRIES: u32 = 3;

/// Browser-default CSS pixel density; the device scale factor multiplies it.
const BASE_DPI: f32 = 96.0;

#[derive(Debug, Error)]
pub enum PdfError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("conversion service error (status {status}): {message}")]
    Service { status: u16, message: String },

    #[error("conversion process failed: {message}")]
    Process { message: String },

    #[error("conversion collaborator unavailable: {0}")]
    Unavailable(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("converter produced no output")]
    EmptyOutput,
}

// ────────────────────────────────────────────────────────────────────────────
// Page setup
// ────────────────────────────────────────────────────────────────────────────

/// Physical page policy for an export run. Margins are zero on purpose:
/// padding is handled inside the rendered fragment.
#[derive(Debug, Clone, PartialEq)]
pub struct PageSetup {
    pub paper_width_in: f32,
    pub paper_height_in: f32,
    pub margin_in: f32,
    /// Device pixel scale factor; at least 2 for text sharpness.
    pub scale: f32,
}

impl PageSetup {
    pub fn a4() -> Self {
        PageSetup {
            paper_width_in: 8.27,
            paper_height_in: 11.69,
            margin_in: 0.0,
            scale: 2.0,
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Trait definition
// ────────────────────────────────────────────────────────────────────────────

/// The conversion seam. Implement this to swap engines without touching the
/// export pipeline. Carried in `AppState` as `Arc<dyn PdfRenderer>`.
#[async_trait]
pub trait PdfRenderer: Send + Sync {
    async fn render(&self, html: &str, page: &PageSetup) -> Result<Bytes, PdfError>;
}

// ────────────────────────────────────────────────────────────────────────────
// HttpRenderer — Gotenberg-compatible service backend (default)
// ────────────────────────────────────────────────────────────────────────────

pub struct HttpRenderer {
    client: Client,
    base_url: String,
    ready: OnceCell<()>,
}

impl HttpRenderer {
    pub fn new(base_url: String) -> Self {
        Self {
            client: Client::builder()
                .timeout(std::time::Duration::from_secs(REQUEST_TIMEOUT_SECS))
                .build()
                .expect("Failed to build HTTP client"),
            base_url: base_url.trim_end_matches('/').to_string(),
            ready: OnceCell::new(),
        }
    }

    /// First-use probe of the conversion service, cached for the process
    /// lifetime.
    async fn ensure_ready(&self) -> Result<(), PdfError> {
        self.ready
            .get_or_try_init(|| async {
                let url = format!("{}{}", self.base_url, HEALTH_PATH);
                let response = self
                    .client
                    .get(&url)
                    .send()
                    .await
                    .map_err(|e| PdfError::Unavailable(format!("{url}: {e}")))?;
                if !response.status().is_success() {
                    return Err(PdfError::Unavailable(format!(
                        "{url} returned {}",
                        response.status()
                    )));
                }
                debug!("conversion service ready at {}", self.base_url);
                Ok(())
            })
            .await
            .map(|_| ())
    }

    fn build_form(&self, html: &str, page: &PageSetup) -> Result<Form, PdfError> {
        let file = Part::bytes(html.as_bytes().to_vec())
            .file_name("index.html")
            .mime_str("text/html")?;
        Ok(Form::new()
            .part("files", file)
            .text("paperWidth", format!("{}", page.paper_width_in))
            .text("paperHeight", format!("{}", page.paper_height_in))
            .text("marginTop", format!("{}", page.margin_in))
            .text("marginBottom", format!("{}", page.margin_in))
            .text("marginLeft", format!("{}", page.margin_in))
            .text("marginRight", format!("{}", page.margin_in))
            .text("scale", format!("{}", page.scale)))
    }
}

#[async_trait]
impl PdfRenderer for HttpRenderer {
    /// Converts via the service's Chromium route. Retries on 429 and 5xx
    /// with exponential backoff.
    async fn render(&self, html: &str, page: &PageSetup) -> Result<Bytes, PdfError> {
        self.ensure_ready().await?;

        let url = format!("{}{}", self.base_url, CONVERT_PATH);
        let mut last_error: Option<PdfError> = None;

        for attempt in 0..MAX_RETRIES {
            if attempt > 0 {
                let delay = std::time::Duration::from_millis(1000 * (1 << (attempt - 1)));
                warn!(
                    "conversion attempt {} failed, retrying after {}ms...",
                    attempt,
                    delay.as_millis()
                );
                tokio::time::sleep(delay).await;
            }

            // Multipart forms are single-use; rebuild per attempt.
            let form = self.build_form(html, page)?;
            let response = match self.client.post(&url).multipart(form).send().await {
                Ok(r) => r,
                Err(e) => {
                    last_error = Some(PdfError::Http(e));
                    continue;
                }
            };

            let status = response.status();
            if status.as_u16() == 429 || status.is_server_error() {
                let body = response.text().await.unwrap_or_default();
                warn!("conversion service returned {}: {}", status, body);
                last_error = Some(PdfError::Service {
                    status: status.as_u16(),
                    message: body,
                });
                continue;
            }

            if !status.is_success() {
                let message = response.text().await.unwrap_or_default();
                return Err(PdfError::Service {
                    status: status.as_u16(),
                    message,
                });
            }

            let bytes = response.bytes().await?;
            if bytes.is_empty() {
                return Err(PdfError::EmptyOutput);
            }
            debug!("conversion succeeded: {} bytes", bytes.len());
            return Ok(bytes);
        }

        Err(last_error.unwrap_or(PdfError::Unavailable(
            "conversion service kept failing".to_string(),
        )))
    }
}

// ────────────────────────────────────────────────────────────────────────────
// WkhtmltopdfRenderer — local process backend
// ────────────────────────────────────────────────────────────────────────────

pub struct WkhtmltopdfRenderer {
    binary: String,
    probed: OnceCell<()>,
}

impl WkhtmltopdfRenderer {
    pub fn new(binary: String) -> Self {
        Self {
            binary,
            probed: OnceCell::new(),
        }
    }

    /// First-use probe that the binary exists and runs, cached for the
    /// process lifetime.
    async fn ensure_ready(&self) -> Result<(), PdfError> {
        self.probed
            .get_or_try_init(|| async {
                let output = Command::new(&self.binary)
                    .arg("--version")
                    .output()
                    .await
                    .map_err(|e| {
                        PdfError::Unavailable(format!("{} not runnable: {e}", self.binary))
                    })?;
                if !output.status.success() {
                    return Err(PdfError::Unavailable(format!(
                        "{} --version exited with {}",
                        self.binary, output.status
                    )));
                }
                Ok(())
            })
            .await
            .map(|_| ())
    }
}

/// Command-line page arguments for the process backend. The device scale
/// factor maps to raster DPI (96 × scale).
fn page_args(page: &PageSetup) -> Vec<String> {
    let margin = format!("{}in", page.margin_in);
    vec![
        "--quiet".to_string(),
        "--encoding".to_string(),
        "utf-8".to_string(),
        "--page-width".to_string(),
        format!("{}in", page.paper_width_in),
        "--page-height".to_string(),
        format!("{}in", page.paper_height_in),
        "--margin-top".to_string(),
        margin.clone(),
        "--margin-bottom".to_string(),
        margin.clone(),
        "--margin-left".to_string(),
        margin.clone(),
        "--margin-right".to_string(),
        margin,
        "--dpi".to_string(),
        format!("{}", (BASE_DPI * page.scale).round() as u32),
    ]
}

#[async_trait]
impl PdfRenderer for WkhtmltopdfRenderer {
    async fn render(&self, html: &str, page: &PageSetup) -> Result<Bytes, PdfError> {
        self.ensure_ready().await?;

        // Scratch dir is removed on every exit path when it drops.
        let scratch = tempfile::tempdir()?;
        let input = scratch.path().join("page.html");
        let output = scratch.path().join("out.pdf");
        tokio::fs::write(&input, html).await?;

        let result = Command::new(&self.binary)
            .args(page_args(page))
            .arg(&input)
            .arg(&output)
            .output()
            .await
            .map_err(|e| PdfError::Unavailable(format!("{} not runnable: {e}", self.binary)))?;

        if !result.status.success() {
            return Err(PdfError::Process {
                message: String::from_utf8_lossy(&result.stderr).trim().to_string(),
            });
        }

        let bytes = tokio::fs::read(&output)
            .await
            .map_err(|_| PdfError::EmptyOutput)?;
        if bytes.is_empty() {
            return Err(PdfError::EmptyOutput);
        }
        Ok(Bytes::from(bytes))
    }
}
