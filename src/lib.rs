//! # og-thumbnail
//!
//! Generates Open Graph preview images for a Markdown/MDX content tree. Each
//! document whose front matter carries a `title` gets a 1200×630
//! `thumbnail.png` next to it: the title centred in white on a diagonal
//! blue-to-purple gradient.
//!
//! # Architecture: Per-Document Pipeline
//!
//! ```text
//! scan src/ ─→ *.md, *.mdx ─→ front matter ─→ title
//!                                               │
//!          thumbnail.png ←─ PNG ←─ SVG ←─ layout tree
//! ```
//!
//! Documents are processed one at a time, in walk order. A failure in one
//! document is reported and the run moves on; only configuration and scan
//! errors end the process early.
//!
//! Rendering goes through the [`render::ThumbnailBackend`] trait. The
//! production backend lays the title out with real glyph advances, emits SVG
//! markup, and rasterizes it with resvg. Tests swap in a mock backend, so the
//! pipeline's file handling and error containment are exercised without fonts
//! or pixels.
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`scan`] | Lazy, sorted walk of the content root; `.md`/`.mdx` filter |
//! | [`frontmatter`] | YAML / TOML / JSON front-matter extraction and title lookup |
//! | [`render`] | Layout tree, text layout, SVG markup, rasterization, font loading |
//! | [`pipeline`] | Read → title → render → write for each document, with per-document errors |
//! | [`config`] | Optional `thumbnails.toml`: content root and title font |
//! | [`types`] | Document record and thumbnail path derivation |
//! | [`output`] | CLI output formatting |
//!
//! # Design Decisions
//!
//! ## SVG as the Intermediate Format
//!
//! The card is described as a small flexbox-like tree, laid out in pure Rust,
//! then serialized to SVG with Maud. The SVG is a plain string that can be
//! inspected and asserted on; rasterization is a single resvg call. Nothing
//! needs a browser or a system graphics stack.
//!
//! ## Font Loaded Once
//!
//! The title font is read at startup into a [`render::FontSet`] shared by every
//! render. If it cannot be read the run continues with system fonts rather
//! than failing: a thumbnail in the wrong typeface beats no thumbnail.
//!
//! ## One Thumbnail per Directory
//!
//! Output is named by directory, so two titled documents in one directory
//! would fight over the same file. The first one processed wins; the rest are
//! skipped with a warning. See [`pipeline`].
//!
//! ## Deterministic Output
//!
//! The walk is sorted and rendering has no time or randomness in it, so the
//! same content and font produce byte-identical PNGs on every run.

pub mod config;
pub mod frontmatter;
pub mod output;
pub mod pipeline;
pub mod render;
pub mod scan;
pub mod types;

#[cfg(test)]
pub(crate) mod test_helpers;
