//! Content directory scanning.
//!
//! Walks the content root and yields every regular file beneath it as an
//! absolute path. The walk is iterative (no call-stack recursion however deep
//! the tree goes) and lazy: paths are produced as directories are read, so
//! callers that only need a filtered subset never hold the full listing.
//!
//! ```text
//! src/
//! ├── posts/
//! │   ├── a/
//! │   │   ├── index.mdx        # → src/posts/a/thumbnail.png
//! │   │   └── cover.jpg        # yielded, filtered out by is_markdown
//! │   └── b/
//! │       └── index.md         # → src/posts/b/thumbnail.png
//! └── about.md                 # → src/thumbnail.png
//! ```
//!
//! Entries within a directory are visited in file-name order so repeated runs
//! see documents in the same sequence.

use std::path::{Path, PathBuf};
use thiserror::Error;
use walkdir::WalkDir;

#[derive(Error, Debug)]
pub enum ScanError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Failed to read directory: {0}")]
    Walk(#[from] walkdir::Error),
}

/// File extensions treated as documents. Matched case-sensitively.
const DOCUMENT_EXTENSIONS: &[&str] = &["md", "mdx"];

/// True when `path` ends in `.md` or `.mdx`.
pub fn is_markdown(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| DOCUMENT_EXTENSIONS.contains(&e))
}

/// Lazy iterator over all regular files under a root directory.
///
/// Single pass, not restartable. A traversal error is yielded as `Err` and
/// the caller decides whether to stop.
pub struct FileWalker {
    inner: walkdir::IntoIter,
}

impl Iterator for FileWalker {
    type Item = Result<PathBuf, ScanError>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            match self.inner.next()? {
                Ok(entry) if entry.file_type().is_dir() => continue,
                Ok(entry) => return Some(Ok(entry.into_path())),
                Err(e) => return Some(Err(e.into())),
            }
        }
    }
}

/// Start walking `root`. The root is made absolute first so every yielded
/// path is absolute too.
pub fn walk(root: &Path) -> Result<FileWalker, ScanError> {
    let root = std::path::absolute(root)?;
    let inner = WalkDir::new(root)
        .follow_links(false)
        .sort_by_file_name()
        .into_iter();
    Ok(FileWalker { inner })
}

/// Collect every Markdown/MDX document under `root`.
///
/// Fails on the first traversal error: without a complete listing there is
/// nothing trustworthy to process.
pub fn find_documents(root: &Path) -> Result<Vec<PathBuf>, ScanError> {
    let mut documents = Vec::new();
    for path in walk(root)? {
        let path = path?;
        if is_markdown(&path) {
            documents.push(path);
        }
    }
    Ok(documents)
}
