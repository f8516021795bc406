//! Shared test utilities for the og-thumbnail test suite.
//!
//! Fixture content is small enough to be written inline, so instead of a
//! fixtures directory the helpers here build content trees inside a
//! `TempDir` that each test owns.
//!
//! # Usage
//!
//! ```ignore
//! use crate::test_helpers::*;
//!
//! let tmp = TempDir::new().unwrap();
//! let doc = write_doc(tmp.path(), "posts/a/index.mdx", Some("Hello World"));
//! assert_thumbnail_exists(&doc);
//! ```

use std::path::{Path, PathBuf};

use crate::pipeline::{DocumentEvent, Outcome};

// =========================================================================
// Fixture setup
// =========================================================================

/// Write `contents` to `root/rel`, creating parent directories.
pub fn write_file(root: &Path, rel: &str, contents: &str) -> PathBuf {
    let path = root.join(rel);
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).unwrap();
    }
    std::fs::write(&path, contents).unwrap();
    path
}

/// Write a Markdown document with YAML front matter.
///
/// `None` writes front matter without a `title` key.
pub fn write_doc(root: &Path, rel: &str, title: Option<&str>) -> PathBuf {
    let front = match title {
        Some(t) => format!("---\ntitle: \"{t}\"\ndate: 2024-01-01\n---\n"),
        None => "---\ndate: 2024-01-01\n---\n".to_string(),
    };
    write_file(root, rel, &format!("{front}\n# Body\n\nSome text.\n"))
}

/// Expected thumbnail location for a document.
pub fn thumbnail_for(doc: &Path) -> PathBuf {
    doc.parent().unwrap().join("thumbnail.png")
}

// =========================================================================
// Assertions
// =========================================================================

pub fn assert_thumbnail_exists(doc: &Path) {
    let thumb = thumbnail_for(doc);
    assert!(thumb.is_file(), "expected thumbnail at {}", thumb.display());
}

pub fn assert_no_thumbnail(doc: &Path) {
    let thumb = thumbnail_for(doc);
    assert!(!thumb.exists(), "unexpected thumbnail at {}", thumb.display());
}

/// Titles of all generated documents, in event order.
pub fn generated_titles(events: &[DocumentEvent]) -> Vec<&str> {
    events
        .iter()
        .filter_map(|e| match &e.result {
            Ok(Outcome::Generated { title, .. }) => Some(title.as_str()),
            _ => None,
        })
        .collect()
}
