//! SVG → PNG rasterization.
//!
//! | Step | Crate / function |
//! |---|---|
//! | Parse + text shaping | `usvg::Tree::from_str` with the [`FontSet`] database |
//! | Paint | `resvg::render` into a `tiny_skia::Pixmap` |
//! | Encode | `image::codecs::png::PngEncoder` (straight RGBA8) |

use super::backend::RenderError;
use super::font::FontSet;
use image::codecs::png::PngEncoder;
use image::{ExtendedColorType, ImageEncoder};
use resvg::{tiny_skia, usvg};

/// Rasterize SVG markup at its intrinsic size and return PNG bytes.
pub fn rasterize(svg: &str, fonts: &FontSet) -> Result<Vec<u8>, RenderError> {
    let options = usvg::Options {
        fontdb: fonts.database(),
        ..usvg::Options::default()
    };
    let tree = usvg::Tree::from_str(svg, &options)?;

    let size = tree.size().to_int_size();
    let mut pixmap =
        tiny_skia::Pixmap::new(size.width(), size.height()).ok_or(RenderError::Canvas {
            width: size.width(),
            height: size.height(),
        })?;
    resvg::render(&tree, tiny_skia::Transform::default(), &mut pixmap.as_mut());

    encode_png(&pixmap)
}

/// Encode a pixmap as PNG. tiny-skia stores premultiplied alpha; PNG wants
/// straight alpha.
fn encode_png(pixmap: &tiny_skia::Pixmap) -> Result<Vec<u8>, RenderError> {
    let mut rgba = Vec::with_capacity(pixmap.data().len());
    for pixel in pixmap.pixels() {
        let c = pixel.demultiply();
        rgba.extend_from_slice(&[c.red(), c.green(), c.blue(), c.alpha()]);
    }

    let mut png = Vec::new();
    PngEncoder::new(&mut png).write_image(
        &rgba,
        pixmap.width(),
        pixmap.height(),
        ExtendedColorType::Rgba8,
    )?;
    Ok(png)
}

#[cfg(test)]
mod tests {
    use super::*;

    const SQUARE: &str = r##"<svg xmlns="http://www.w3.org/2000/svg" width="4" height="2"><rect width="4" height="2" fill="#ff0000"></rect></svg>"##;

    #[test]
    fn rasterizes_at_intrinsic_size() {
        let png = rasterize(SQUARE, &FontSet::empty()).unwrap();
        let img = image::load_from_memory(&png).unwrap().to_rgba8();
        assert_eq!(img.dimensions(), (4, 2));
        assert_eq!(img.get_pixel(0, 0).0, [255, 0, 0, 255]);
    }

    #[test]
    fn output_is_png() {
        let png = rasterize(SQUARE, &FontSet::empty()).unwrap();
        assert_eq!(&png[..8], b"\x89PNG\r\n\x1a\n");
    }

    #[test]
    fn malformed_svg_is_error() {
        let result = rasterize("<svg", &FontSet::empty());
        assert!(matches!(result, Err(RenderError::Svg(_))));
    }

    #[test]
    fn rendering_is_deterministic() {
        let a = rasterize(SQUARE, &FontSet::empty()).unwrap();
        let b = rasterize(SQUARE, &FontSet::empty()).unwrap();
        assert_eq!(a, b);
    }
}
