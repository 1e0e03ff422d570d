//! # Export Controller
//!
//! "Export current document" as an async operation:
//!
//! ```text
//! live blocks ──capture──▶ JSON ──sanitize──▶ Vec<Block> ──render──▶ RenderedDocument
//!                                                                        │
//!                                          PageRenderer (async) ◀────────┘
//!                                                │
//!                                      bytes ──▶ Artifact "<basename>-<date>.<ext>"
//! ```
//!
//! The live document is only read. One export may be pending at a time; a
//! second request while one is pending is rejected. If the export future is
//! dropped before it settles, the status falls back to failed.

use crate::errors::{ExportError, RendererError};
use chrono::{Local, NaiveDateTime};
use folio_document::{sanitize, Block};
use folio_export::{DocumentInfo, RenderOptions, RenderedDocument, Renderer, Stylesheet};
use futures::future::BoxFuture;
use serde::Serialize;
use std::sync::{Mutex, MutexGuard, PoisonError};
use tracing::{info, warn};

pub const DEFAULT_BASENAME: &str = "folio-export";

/// Everything the page-layout renderer receives
#[derive(Debug, Clone, PartialEq)]
pub struct RenderRequest {
    pub document: RenderedDocument,
    pub info: DocumentInfo,
}

/// Page-layout backend that turns an output tree into file bytes
pub trait PageRenderer: Send + Sync {
    fn file_extension(&self) -> &str {
        "pdf"
    }

    fn render<'a>(
        &'a self,
        request: &'a RenderRequest,
    ) -> BoxFuture<'a, Result<Vec<u8>, RendererError>>;
}

/// A finished export
#[derive(Debug, Clone, PartialEq)]
pub struct Artifact {
    pub file_name: String,
    pub bytes: Vec<u8>,
}

/// Last known state of the export trigger, as a status line would show it
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
#[serde(tag = "state", rename_all = "camelCase")]
pub enum ExportStatus {
    #[default]
    Idle,
    Pending,
    #[serde(rename_all = "camelCase")]
    Succeeded { file_name: String },
    Failed { message: String },
}

#[derive(Debug, Clone)]
pub struct ExportOptions {
    /// File name stem; the date and extension are appended
    pub basename: String,
    pub author: String,
    pub subject: String,
    pub keywords: String,
    pub stylesheet: Stylesheet,
    pub max_nesting_depth: usize,
}

impl Default for ExportOptions {
    fn default() -> Self {
        let render = RenderOptions::default();
        Self {
            basename: DEFAULT_BASENAME.to_string(),
            author: String::new(),
            subject: String::new(),
            keywords: String::new(),
            stylesheet: render.stylesheet,
            max_nesting_depth: render.max_nesting_depth,
        }
    }
}

/// `<basename>-<YYYY-MM-DD>.<ext>`
pub fn artifact_name(basename: &str, date: NaiveDateTime, extension: &str) -> String {
    let basename = basename.trim();
    let basename = if basename.is_empty() {
        DEFAULT_BASENAME
    } else {
        basename
    };
    format!(
        "{}-{}.{}",
        basename,
        date.format("%Y-%m-%d"),
        extension.trim_start_matches('.')
    )
}

type Clock = Box<dyn Fn() -> NaiveDateTime + Send + Sync>;

pub struct Exporter<R> {
    renderer: R,
    options: ExportOptions,
    status: Mutex<ExportStatus>,
    clock: Clock,
}

impl<R: PageRenderer> Exporter<R> {
    pub fn new(renderer: R, options: ExportOptions) -> Self {
        Self {
            renderer,
            options,
            status: Mutex::new(ExportStatus::Idle),
            clock: Box::new(|| Local::now().naive_local()),
        }
    }

    /// Replace the wall clock used for the footer and file name
    pub fn with_clock(mut self, clock: impl Fn() -> NaiveDateTime + Send + Sync + 'static) -> Self {
        self.clock = Box::new(clock);
        self
    }

    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    pub fn options(&self) -> &ExportOptions {
        &self.options
    }

    pub fn status(&self) -> ExportStatus {
        self.lock_status().clone()
    }

    fn lock_status(&self) -> MutexGuard<'_, ExportStatus> {
        self.status.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Export the given live blocks under `title`
    pub async fn export(&self, live: &[Block], title: &str) -> Result<Artifact, ExportError> {
        let pending = self.begin()?;

        let result = self.run(live, title).await;
        match &result {
            Ok(artifact) => {
                info!(file = %artifact.file_name, bytes = artifact.bytes.len(), "Export succeeded");
                pending.settle(ExportStatus::Succeeded {
                    file_name: artifact.file_name.clone(),
                });
            }
            Err(err) => {
                warn!(error = %err, "Export did not produce an artifact");
                pending.settle(ExportStatus::Failed {
                    message: err.to_string(),
                });
            }
        }
        result
    }

    fn begin(&self) -> Result<PendingExport<'_>, ExportError> {
        let mut status = self.lock_status();
        if *status == ExportStatus::Pending {
            return Err(ExportError::AlreadyPending);
        }
        *status = ExportStatus::Pending;
        Ok(PendingExport {
            status: &self.status,
            settled: false,
        })
    }

    async fn run(&self, live: &[Block], title: &str) -> Result<Artifact, ExportError> {
        // Snapshot through the wire form so nothing downstream can touch the live blocks
        let captured = serde_json::to_value(live)?;
        let blocks = sanitize(&captured);
        if blocks.is_empty() {
            return Err(ExportError::NothingToExport);
        }

        let exported_at = (self.clock)();
        let renderer = Renderer::new(RenderOptions {
            stylesheet: self.options.stylesheet.clone(),
            max_nesting_depth: self.options.max_nesting_depth,
            exported_at,
        });
        let document = renderer.render(&blocks, title);

        let request = RenderRequest {
            info: DocumentInfo {
                title: title_text(&document),
                author: self.options.author.clone(),
                subject: self.options.subject.clone(),
                keywords: self.options.keywords.clone(),
            },
            document,
        };

        let bytes = self
            .renderer
            .render(&request)
            .await
            .map_err(ExportError::Renderer)?;

        Ok(Artifact {
            file_name: artifact_name(
                &self.options.basename,
                exported_at,
                self.renderer.file_extension(),
            ),
            bytes,
        })
    }
}

fn title_text(document: &RenderedDocument) -> String {
    document.title_node.text_content()
}

/// Pending status owned by one export; reset to failed if never settled
struct PendingExport<'a> {
    status: &'a Mutex<ExportStatus>,
    settled: bool,
}

impl PendingExport<'_> {
    fn settle(mut self, outcome: ExportStatus) {
        *self.status.lock().unwrap_or_else(PoisonError::into_inner) = outcome;
        self.settled = true;
    }
}

impl Drop for PendingExport<'_> {
    fn drop(&mut self) {
        if !self.settled {
            warn!("Export abandoned before it finished");
            *self.status.lock().unwrap_or_else(PoisonError::into_inner) = ExportStatus::Failed {
                message: "Export was interrupted".to_string(),
            };
        }
    }
}
