//! Thumbnail rendering: layout tree → SVG markup → PNG bytes.
//!
//! | Stage | Module | Crate |
//! |---|---|---|
//! | **Fonts** | [`font`] | `fontdb` (via `usvg`), `ttf-parser` for advances |
//! | **Layout** | [`layout`] | pure Rust, no dependencies |
//! | **Markup** | [`svg`] | `maud` |
//! | **Rasterize** | [`raster`] | `resvg` / `tiny-skia`, `image` for PNG |
//!
//! The module is split into:
//! - **Layout**: the fixed thumbnail tree and a pure layout pass (unit testable)
//! - **Backend**: [`ThumbnailBackend`] trait + [`ResvgBackend`]
//! - **Font / raster / svg**: the pieces the backend composes

pub mod backend;
pub mod font;
pub mod layout;
pub mod raster;
pub mod svg;

pub use backend::{RenderError, ResvgBackend, ThumbnailBackend};
pub use font::{FontBytes, FontError, FontSet};
pub use layout::{CANVAS_HEIGHT, CANVAS_WIDTH, LayoutTree};
