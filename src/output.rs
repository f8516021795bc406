//! CLI output formatting.
//!
//! # Output Format
//!
//! ```text
//! Font: Noto Sans KR (400 normal)
//!     Source: fonts/NotoSansKR-Regular.ttf
//! Found 3 MDX/MD files
//! Hello World
//!     Source: /site/src/posts/a/index.mdx
//!     Thumbnail: /site/src/posts/a/thumbnail.png
//! Skipping /site/src/posts/b/index.md: no title found
//!
//! Done: 1 generated, 1 skipped, 0 failed
//! ```
//!
//! Generated documents lead with their title; paths are indented context.
//! Skips that are part of normal operation print to stdout. Shared-directory
//! skips and failures go through the `log` facade (stderr) as warnings and
//! errors.
//!
//! # Architecture
//!
//! Each `format_*` function returns `Vec<String>` (or a `String`) and does no
//! I/O, so it can be tested directly; `print_*` wrappers write the result.

use crate::pipeline::{DocumentEvent, Outcome, SkipReason, Summary};
use crate::render::FontSet;
use crate::types::THUMBNAIL_FILE;
use log::{error, warn};
use std::path::Path;

/// Return indentation string: 4 spaces per depth level.
fn indent(depth: usize) -> String {
    "    ".repeat(depth)
}

/// Pluralize `noun` for `n`.
fn count(n: usize, noun: &str) -> String {
    if n == 1 {
        format!("{n} {noun}")
    } else {
        format!("{n} {noun}s")
    }
}

// ============================================================================
// Startup
// ============================================================================

/// Which font titles will be set in.
pub fn format_font_status(fonts: &FontSet) -> Vec<String> {
    match fonts.embedded_font() {
        Some(font) => vec![
            format!(
                "Font: {} ({} {})",
                font.family,
                font.weight,
                font.style.as_css()
            ),
            format!("{}Source: {}", indent(1), font.path.display()),
        ],
        None => vec![format!(
            "Font: system fallback ({} available)",
            count(fonts.face_count(), "face")
        )],
    }
}

pub fn print_font_status(fonts: &FontSet) {
    for line in format_font_status(fonts) {
        println!("{}", line);
    }
}

pub fn format_found(documents: usize) -> String {
    format!("Found {documents} MDX/MD files")
}

pub fn format_missing_root(root: &Path) -> String {
    format!("{} directory does not exist, nothing to do", root.display())
}

// ============================================================================
// Per-document events
// ============================================================================

/// Format a single document event as display lines.
pub fn format_event(event: &DocumentEvent) -> Vec<String> {
    let path = event.path.display();
    match &event.result {
        Ok(Outcome::Generated { title, output }) => vec![
            title.clone(),
            format!("{}Source: {}", indent(1), path),
            format!("{}Thumbnail: {}", indent(1), output.display()),
        ],
        Ok(Outcome::Skipped(SkipReason::NoTitle)) => {
            vec![format!("Skipping {path}: no title found")]
        }
        Ok(Outcome::Skipped(SkipReason::NotFound)) => vec![format!("File not found: {path}")],
        Ok(Outcome::Skipped(SkipReason::SharedDirectory { claimed_by })) => vec![format!(
            "Skipping {path}: {THUMBNAIL_FILE} in this directory already generated from {}",
            claimed_by.display()
        )],
        Err(e) => vec![format!("Error generating thumbnail for {path}: {e}")],
    }
}

/// Print an event to the sink matching its severity.
pub fn print_event(event: &DocumentEvent) {
    let lines = format_event(event);
    match &event.result {
        Err(_) => lines.iter().for_each(|l| error!("{l}")),
        Ok(Outcome::Skipped(SkipReason::SharedDirectory { .. })) => {
            lines.iter().for_each(|l| warn!("{l}"))
        }
        Ok(_) => lines.iter().for_each(|l| println!("{l}")),
    }
}

// ============================================================================
// Completion
// ============================================================================

pub fn format_summary(summary: &Summary) -> String {
    format!(
        "Done: {} generated, {} skipped, {} failed",
        summary.generated, summary.skipped, summary.failed
    )
}

pub fn print_summary(summary: &Summary) {
    println!();
    println!("{}", format_summary(summary));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pipeline::ThumbnailError;
    use std::path::PathBuf;

    fn event(path: &str, result: Result<Outcome, ThumbnailError>) -> DocumentEvent {
        DocumentEvent {
            path: PathBuf::from(path),
            result,
        }
    }

    #[test]
    fn indent_levels() {
        assert_eq!(indent(0), "");
        assert_eq!(indent(2), "        ");
    }

    #[test]
    fn count_pluralizes() {
        assert_eq!(count(0, "face"), "0 faces");
        assert_eq!(count(1, "face"), "1 face");
        assert_eq!(count(12, "face"), "12 faces");
    }

    #[test]
    fn format_generated_event() {
        let lines = format_event(&event(
            "src/posts/a/index.mdx",
            Ok(Outcome::Generated {
                title: "Hello World".to_string(),
                output: PathBuf::from("src/posts/a/thumbnail.png"),
            }),
        ));
        assert_eq!(
            lines,
            vec![
                "Hello World",
                "    Source: src/posts/a/index.mdx",
                "    Thumbnail: src/posts/a/thumbnail.png",
            ]
        );
    }

    #[test]
    fn format_skip_events() {
        assert_eq!(
            format_event(&event("a.md", Ok(Outcome::Skipped(SkipReason::NoTitle)))),
            vec!["Skipping a.md: no title found"]
        );
        assert_eq!(
            format_event(&event("b.md", Ok(Outcome::Skipped(SkipReason::NotFound)))),
            vec!["File not found: b.md"]
        );
        assert_eq!(
            format_event(&event(
                "post/notes.md",
                Ok(Outcome::Skipped(SkipReason::SharedDirectory {
                    claimed_by: PathBuf::from("post/index.md"),
                }))
            )),
            vec![
                "Skipping post/notes.md: thumbnail.png in this directory already generated from post/index.md"
            ]
        );
    }

    #[test]
    fn format_error_event_names_path() {
        let lines = format_event(&event(
            "broken.md",
            Err(ThumbnailError::Read {
                path: PathBuf::from("broken.md"),
                source: std::io::Error::from(std::io::ErrorKind::PermissionDenied),
            }),
        ));
        assert_eq!(lines.len(), 1);
        assert!(
            lines[0].starts_with("Error generating thumbnail for broken.md: cannot read broken.md")
        );
    }

    #[test]
    fn format_summary_counts() {
        let summary = Summary {
            generated: 4,
            skipped: 2,
            failed: 1,
        };
        assert_eq!(
            format_summary(&summary),
            "Done: 4 generated, 2 skipped, 1 failed"
        );
    }

    #[test]
    fn format_found_and_missing_root() {
        assert_eq!(format_found(3), "Found 3 MDX/MD files");
        assert_eq!(
            format_missing_root(Path::new("src")),
            "src directory does not exist, nothing to do"
        );
    }

    #[test]
    fn font_status_without_embedded_font() {
        let lines = format_font_status(&FontSet::empty());
        assert_eq!(lines, vec!["Font: system fallback (0 faces available)"]);
    }
}
