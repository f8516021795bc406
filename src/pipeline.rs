//! Per-document thumbnail pipeline.
//!
//! Each document goes through the same strictly sequential steps:
//!
//! ```text
//! read → front matter → title? ──no──→ Skipped(NoTitle)
//!                          │
//!                          yes
//!                          ↓
//!          LayoutTree → backend.render → write <dir>/thumbnail.png
//! ```
//!
//! ## Error containment
//!
//! Every failure inside one document becomes a [`ThumbnailError`] carried
//! in that document's [`DocumentEvent`]; nothing escapes to abort the run.
//! A failed write may leave a stale or missing file behind; no cleanup is
//! attempted.
//!
//! ## One thumbnail per directory
//!
//! Thumbnails are named by directory, not by document. Within a run the first
//! document to produce a thumbnail in a directory claims it; later titled
//! documents in that directory are skipped with
//! [`SkipReason::SharedDirectory`] rather than silently overwriting it.

use crate::frontmatter::{self, FrontMatterError};
use crate::render::{LayoutTree, RenderError, ThumbnailBackend};
use crate::scan::{self, ScanError, is_markdown};
use crate::types::DocumentRecord;
use log::debug;
use std::collections::{HashMap, HashSet};
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ThumbnailError {
    #[error("cannot read {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("{}: {source}", .path.display())]
    FrontMatter {
        path: PathBuf,
        source: FrontMatterError,
    },
    #[error("rendering {} failed: {source}", .path.display())]
    Render { path: PathBuf, source: RenderError },
    #[error("cannot write {}: {source}", .path.display())]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },
}

/// Why a document produced no thumbnail without failing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SkipReason {
    /// Front matter missing, or no usable `title`.
    NoTitle,
    /// Named on the command line but not on disk.
    NotFound,
    /// Another document already produced this directory's thumbnail.
    SharedDirectory { claimed_by: PathBuf },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Generated { title: String, output: PathBuf },
    Skipped(SkipReason),
}

/// What happened to one document.
#[derive(Debug)]
pub struct DocumentEvent {
    pub path: PathBuf,
    pub result: Result<Outcome, ThumbnailError>,
}

/// Counts for a whole run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Summary {
    pub generated: usize,
    pub skipped: usize,
    pub failed: usize,
}

impl Summary {
    fn record(&mut self, result: &Result<Outcome, ThumbnailError>) {
        match result {
            Ok(Outcome::Generated { .. }) => self.generated += 1,
            Ok(Outcome::Skipped(_)) => self.skipped += 1,
            Err(_) => self.failed += 1,
        }
    }

    pub fn total(&self) -> usize {
        self.generated + self.skipped + self.failed
    }
}

/// Read a document and resolve its title.
pub fn read_document(path: &Path) -> Result<DocumentRecord, ThumbnailError> {
    let content = std::fs::read_to_string(path).map_err(|source| ThumbnailError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let title =
        frontmatter::extract_title(&content).map_err(|source| ThumbnailError::FrontMatter {
            path: path.to_path_buf(),
            source,
        })?;
    Ok(DocumentRecord {
        path: path.to_path_buf(),
        title,
    })
}

/// Sequential thumbnail generator for one run.
pub struct Pipeline<'a, B: ThumbnailBackend> {
    backend: &'a B,
    /// Absolute thumbnail path → document that produced it.
    claimed: HashMap<PathBuf, PathBuf>,
    summary: Summary,
}

impl<'a, B: ThumbnailBackend> Pipeline<'a, B> {
    pub fn new(backend: &'a B) -> Self {
        Self {
            backend,
            claimed: HashMap::new(),
            summary: Summary::default(),
        }
    }

    /// Run one document through the pipeline.
    pub fn process(&mut self, path: &Path) -> DocumentEvent {
        let result = self.generate(path);
        self.finish_event(path, result)
    }

    /// Record a command-line document that does not exist.
    pub fn not_found(&mut self, path: &Path) -> DocumentEvent {
        self.finish_event(path, Ok(Outcome::Skipped(SkipReason::NotFound)))
    }

    pub fn summary(&self) -> Summary {
        self.summary
    }

    fn finish_event(
        &mut self,
        path: &Path,
        result: Result<Outcome, ThumbnailError>,
    ) -> DocumentEvent {
        self.summary.record(&result);
        DocumentEvent {
            path: path.to_path_buf(),
            result,
        }
    }

    fn generate(&mut self, path: &Path) -> Result<Outcome, ThumbnailError> {
        let record = read_document(path)?;
        let Some(title) = record.title.as_deref() else {
            return Ok(Outcome::Skipped(SkipReason::NoTitle));
        };

        let output = record.thumbnail_path();
        let key = claim_key(&output);
        if let Some(first) = self.claimed.get(&key) {
            return Ok(Outcome::Skipped(SkipReason::SharedDirectory {
                claimed_by: first.clone(),
            }));
        }

        debug!("rendering '{title}' for {}", path.display());
        let tree = LayoutTree::thumbnail(title);
        let png = self
            .backend
            .render(&tree)
            .map_err(|source| ThumbnailError::Render {
                path: path.to_path_buf(),
                source,
            })?;

        std::fs::write(&output, &png).map_err(|source| ThumbnailError::Write {
            path: output.clone(),
            source,
        })?;
        self.claimed.insert(key, path.to_path_buf());

        Ok(Outcome::Generated {
            title: title.to_string(),
            output,
        })
    }
}

/// Normalize so `a/thumbnail.png` and `./a/thumbnail.png` collide.
fn claim_key(output: &Path) -> PathBuf {
    std::path::absolute(output).unwrap_or_else(|_| output.to_path_buf())
}

/// Scan `root` and process every Markdown/MDX document under it.
///
/// A missing root is not an error: there is nothing to do, and `Ok(None)` is
/// returned without walking. `on_found` receives the document count before
/// the first document is processed.
pub fn run_scan<B: ThumbnailBackend>(
    backend: &B,
    root: &Path,
    on_found: impl FnOnce(usize),
    on_event: impl FnMut(&DocumentEvent),
) -> Result<Option<Summary>, ScanError> {
    if !root.is_dir() {
        return Ok(None);
    }
    let documents = scan::find_documents(root)?;
    on_found(documents.len());
    Ok(Some(run_documents(backend, documents, on_event)))
}

/// Process every document in order, reporting each as it completes.
pub fn run_documents<B: ThumbnailBackend>(
    backend: &B,
    documents: impl IntoIterator<Item = PathBuf>,
    mut on_event: impl FnMut(&DocumentEvent),
) -> Summary {
    let mut pipeline = Pipeline::new(backend);
    for path in documents {
        let event = pipeline.process(&path);
        on_event(&event);
    }
    pipeline.summary()
}

/// Process explicitly named files.
///
/// Arguments without a `.md`/`.mdx` extension are ignored without an event,
/// as are repeats of a file already named; missing files are reported as
/// skipped and the run continues.
pub fn run_files<B: ThumbnailBackend>(
    backend: &B,
    files: &[PathBuf],
    mut on_event: impl FnMut(&DocumentEvent),
) -> Summary {
    let mut pipeline = Pipeline::new(backend);
    let mut seen = HashSet::new();
    for path in files.iter().filter(|p| is_markdown(p)) {
        if !seen.insert(claim_key(path)) {
            continue;
        }
        let event = if path.exists() {
            pipeline.process(path)
        } else {
            pipeline.not_found(path)
        };
        on_event(&event);
    }
    pipeline.summary()
}
