//! Records shared between the pipeline and output formatting.

use std::path::{Path, PathBuf};

/// File name every thumbnail is written under.
pub const THUMBNAIL_FILE: &str = "thumbnail.png";

/// One Markdown/MDX document and the title found in its front matter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentRecord {
    pub path: PathBuf,
    /// `None` when the front matter is missing or has no usable `title`.
    pub title: Option<String>,
}

impl DocumentRecord {
    /// Where this document's thumbnail goes.
    pub fn thumbnail_path(&self) -> PathBuf {
        thumbnail_path(&self.path)
    }
}

/// `thumbnail.png` in the same directory as `document`.
///
/// A bare file name has an empty parent, so its thumbnail lands in the
/// working directory.
pub fn thumbnail_path(document: &Path) -> PathBuf {
    match document.parent() {
        Some(dir) => dir.join(THUMBNAIL_FILE),
        None => PathBuf::from(THUMBNAIL_FILE),
    }
}
