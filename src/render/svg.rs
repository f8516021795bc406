//! SVG serialization of a computed layout.
//!
//! Markup is produced with Maud, the same way HTML pages are elsewhere in
//! the ecosystem: compile-time checked structure, auto-escaped text. Every
//! element is written with an explicit (possibly empty) body so the output is
//! well-formed XML; Maud's `;` void syntax would emit HTML-style unclosed
//! tags that an XML parser rejects.

use super::layout::{Align, ComputedLayout};
use maud::html;

const SVG_NS: &str = "http://www.w3.org/2000/svg";

/// Serialize `layout` as a standalone SVG document.
///
/// `font_family` is written verbatim into each text element's `font-family`.
pub fn to_svg(layout: &ComputedLayout, font_family: &str) -> String {
    let bg = &layout.background;
    html! {
        svg xmlns=(SVG_NS)
            width=(layout.width)
            height=(layout.height)
            viewBox={ "0 0 " (layout.width) " " (layout.height) } {
            defs {
                linearGradient id="background" gradientUnits="userSpaceOnUse"
                    x1=(num(bg.x1)) y1=(num(bg.y1)) x2=(num(bg.x2)) y2=(num(bg.y2)) {
                    @for stop in &bg.stops {
                        stop offset=(num(stop.offset)) stop-color=(stop.color.to_string()) {}
                    }
                }
            }
            rect width=(layout.width) height=(layout.height) fill="url(#background)" {}
            @for run in &layout.runs {
                text font-family=(xml_text(font_family))
                    font-size=(num(run.font_size))
                    font-weight=(run.font_weight)
                    fill=(run.fill.to_string())
                    text-anchor=(text_anchor(run.align)) {
                    @for line in &run.lines {
                        tspan x=(num(line.x)) y=(num(line.baseline)) { (xml_text(&line.text)) }
                    }
                }
            }
        }
    }
    .into_string()
}

fn text_anchor(align: Align) -> &'static str {
    match align {
        Align::Start => "start",
        Align::Center => "middle",
        Align::End => "end",
    }
}

/// Drop characters XML 1.0 cannot carry, even escaped (C0 controls other
/// than tab/newline/CR, U+FFFE, U+FFFF). Maud handles `&`, `<`, `>`, `"`.
fn xml_text(s: &str) -> String {
    s.chars().filter(|&c| is_xml_char(c)).collect()
}

fn is_xml_char(c: char) -> bool {
    matches!(c, '\t' | '\n' | '\r' | '\u{20}'..='\u{D7FF}' | '\u{E000}'..='\u{FFFD}')
        || c >= '\u{10000}'
}

/// Fixed two-decimal coordinates keep output stable across platforms'
/// float formatting.
fn num(v: f32) -> String {
    let s = format!("{v:.2}");
    match s.trim_end_matches('0').trim_end_matches('.') {
        "-0" => "0".to_string(),
        trimmed => trimmed.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::layout::{
        ApproximateMeasure, CANVAS_HEIGHT, CANVAS_WIDTH, LayoutTree, compute,
    };

    fn svg_for(title: &str) -> String {
        let layout = compute(
            &LayoutTree::thumbnail(title),
            CANVAS_WIDTH,
            CANVAS_HEIGHT,
            &ApproximateMeasure,
        );
        to_svg(&layout, "'Noto Sans KR', sans-serif")
    }

    #[test]
    fn num_trims_trailing_zeros() {
        assert_eq!(num(600.0), "600");
        assert_eq!(num(142.5), "142.5");
        assert_eq!(num(-142.5), "-142.5");
        assert_eq!(num(1.234), "1.23");
        assert_eq!(num(-0.001), "0");
    }

    #[test]
    fn svg_has_canvas_size_and_namespace() {
        let svg = svg_for("Hello World");
        assert!(svg.starts_with("<svg xmlns=\"http://www.w3.org/2000/svg\""));
        assert!(svg.contains("width=\"1200\""));
        assert!(svg.contains("height=\"630\""));
        assert!(svg.contains("viewBox=\"0 0 1200 630\""));
    }

    #[test]
    fn svg_contains_title_text() {
        let svg = svg_for("Hello World");
        assert!(svg.contains(">Hello World</tspan>"));
        assert!(svg.contains("text-anchor=\"middle\""));
        assert!(svg.contains("font-weight=\"700\""));
        assert!(svg.contains("font-size=\"48\""));
        assert!(svg.contains("fill=\"#ffffff\""));
    }

    #[test]
    fn svg_background_gradient() {
        let svg = svg_for("x");
        assert!(svg.contains("<linearGradient id=\"background\""));
        assert!(svg.contains("stop-color=\"#667eea\""));
        assert!(svg.contains("stop-color=\"#764ba2\""));
        assert!(svg.contains("fill=\"url(#background)\""));
    }

    #[test]
    fn svg_escapes_markup_in_titles() {
        let svg = svg_for("Tom & Jerry <3 \"quotes\"");
        assert!(svg.contains("Tom &amp; Jerry &lt;3 &quot;quotes&quot;"));
        assert!(!svg.contains("<3"));
    }

    #[test]
    fn svg_drops_characters_xml_forbids() {
        let svg = svg_for("a\u{1}b\u{FFFE} c\u{1F600}");
        assert!(svg.contains(">ab c\u{1F600}</tspan>"));
        assert!(!svg.contains('\u{1}'));
        assert!(!svg.contains('\u{FFFE}'));
    }

    #[test]
    fn xml_char_ranges() {
        assert!(is_xml_char('\t'));
        assert!(is_xml_char('한'));
        assert!(is_xml_char('\u{10FFFF}'));
        assert!(!is_xml_char('\u{0}'));
        assert!(!is_xml_char('\u{1B}'));
        assert!(!is_xml_char('\u{FFFF}'));
    }

    #[test]
    fn svg_elements_are_closed() {
        let svg = svg_for("x");
        assert!(svg.contains("></stop>"));
        assert!(svg.contains("></rect>"));
        assert!(svg.ends_with("</svg>"));
    }

    #[test]
    fn one_tspan_per_line() {
        let svg = svg_for(&"word ".repeat(60));
        let layout = compute(
            &LayoutTree::thumbnail(&"word ".repeat(60)),
            CANVAS_WIDTH,
            CANVAS_HEIGHT,
            &ApproximateMeasure,
        );
        assert_eq!(svg.matches("<tspan").count(), layout.runs[0].lines.len());
    }
}
