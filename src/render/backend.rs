//! Render backend trait and shared error type.
//!
//! The [`ThumbnailBackend`] trait turns a [`LayoutTree`] into encoded PNG
//! bytes. The pipeline only ever talks to this trait, so its file handling
//! and error containment can be tested with a mock that never touches a
//! font or a pixel.
//!
//! The production implementation is [`ResvgBackend`]: layout with real glyph
//! metrics, serialization to SVG, rasterization with resvg.

use super::font::FontSet;
use super::layout::{CANVAS_HEIGHT, CANVAS_WIDTH, LayoutTree, compute};
use super::{raster, svg};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum RenderError {
    #[error("SVG parse failed: {0}")]
    Svg(#[from] resvg::usvg::Error),
    #[error("cannot allocate a {width}x{height} canvas")]
    Canvas { width: u32, height: u32 },
    #[error("PNG encoding failed: {0}")]
    Encode(#[from] image::ImageError),
}

/// Trait for thumbnail render backends.
pub trait ThumbnailBackend {
    /// Render a layout tree to PNG bytes at the fixed canvas size.
    fn render(&self, tree: &LayoutTree) -> Result<Vec<u8>, RenderError>;
}

/// Layout + SVG + resvg, sharing one [`FontSet`] across every render.
pub struct ResvgBackend<'a> {
    fonts: &'a FontSet,
}

impl<'a> ResvgBackend<'a> {
    pub fn new(fonts: &'a FontSet) -> Self {
        Self { fonts }
    }

    /// The intermediate SVG markup for a tree.
    pub fn to_svg(&self, tree: &LayoutTree) -> String {
        let layout = compute(tree, CANVAS_WIDTH, CANVAS_HEIGHT, self.fonts);
        svg::to_svg(&layout, &self.fonts.family_list())
    }
}

impl ThumbnailBackend for ResvgBackend<'_> {
    fn render(&self, tree: &LayoutTree) -> Result<Vec<u8>, RenderError> {
        raster::rasterize(&self.to_svg(tree), self.fonts)
    }
}

#[cfg(test)]
pub mod tests {
    use super::*;
    use std::cell::RefCell;

    /// Placeholder bytes the mock "renders". Not a real PNG.
    pub const MOCK_PNG: &[u8] = b"mock-png";

    /// Mock backend that records the text of every tree it is asked to
    /// render. Titles listed in `fail_on` produce a `Canvas` error instead.
    #[derive(Default)]
    pub struct MockBackend {
        pub rendered: RefCell<Vec<String>>,
        pub fail_on: Vec<String>,
    }

    impl MockBackend {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn failing_on(titles: &[&str]) -> Self {
            Self {
                rendered: RefCell::new(Vec::new()),
                fail_on: titles.iter().map(|t| t.to_string()).collect(),
            }
        }

        pub fn titles(&self) -> Vec<String> {
            self.rendered.borrow().clone()
        }
    }

    impl ThumbnailBackend for MockBackend {
        fn render(&self, tree: &LayoutTree) -> Result<Vec<u8>, RenderError> {
            let text = tree.text();
            self.rendered.borrow_mut().push(text.clone());
            if self.fail_on.contains(&text) {
                return Err(RenderError::Canvas {
                    width: CANVAS_WIDTH,
                    height: CANVAS_HEIGHT,
                });
            }
            Ok(MOCK_PNG.to_vec())
        }
    }

    #[test]
    fn mock_records_titles() {
        let backend = MockBackend::new();
        backend.render(&LayoutTree::thumbnail("One")).unwrap();
        backend.render(&LayoutTree::thumbnail("Two")).unwrap();
        assert_eq!(backend.titles(), vec!["One", "Two"]);
    }

    #[test]
    fn mock_fails_on_request() {
        let backend = MockBackend::failing_on(&["Bad"]);
        assert!(backend.render(&LayoutTree::thumbnail("Good")).is_ok());
        assert!(matches!(
            backend.render(&LayoutTree::thumbnail("Bad")),
            Err(RenderError::Canvas { .. })
        ));
    }

    #[test]
    fn resvg_svg_uses_font_family_list() {
        let fonts = FontSet::empty();
        let svg = ResvgBackend::new(&fonts).to_svg(&LayoutTree::thumbnail("Hello World"));
        assert!(svg.contains("font-family=\"sans-serif\""));
        assert!(svg.contains(">Hello World</tspan>"));
    }

    #[test]
    fn resvg_renders_full_canvas() {
        let fonts = FontSet::empty();
        let png = ResvgBackend::new(&fonts)
            .render(&LayoutTree::thumbnail("Hello World"))
            .unwrap();
        let img = image::load_from_memory(&png).unwrap();
        assert_eq!((img.width(), img.height()), (1200, 630));
    }

    #[test]
    fn resvg_renders_title_with_control_character() {
        let fonts = FontSet::empty();
        let backend = ResvgBackend::new(&fonts);
        let tree = LayoutTree::thumbnail("a\u{1}b");
        assert!(backend.to_svg(&tree).contains(">ab</tspan>"));
        let png = backend.render(&tree).unwrap();
        let img = image::load_from_memory(&png).unwrap();
        assert_eq!((img.width(), img.height()), (1200, 630));
    }

    #[test]
    fn resvg_paints_gradient_corners() {
        let fonts = FontSet::empty();
        let png = ResvgBackend::new(&fonts)
            .render(&LayoutTree::thumbnail("x"))
            .unwrap();
        let img = image::load_from_memory(&png).unwrap().to_rgba8();
        let top_left = img.get_pixel(0, 0).0;
        let bottom_right = img.get_pixel(1199, 629).0;
        // Opaque, bluish at the start, purplish at the end
        assert_eq!(top_left[3], 255);
        assert!(top_left[2] > bottom_right[2]);
        assert!(top_left[0] < bottom_right[0]);
    }
}
