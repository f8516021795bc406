//! The thumbnail layout tree and a minimal flex-column layout pass.
//!
//! Only the subset of flexbox the thumbnail needs is modelled: a single
//! column container with padding that positions its text children along the
//! main axis (`justify`) and the cross axis (`align_items`). Text children
//! wrap to a maximum width and may carry a bottom margin, which takes part in
//! centering the same way it does in CSS.
//!
//! Layout is pure: glyph measurements come in through [`TextMeasure`], so the
//! geometry can be tested without any font on disk.

use std::collections::HashMap;
use std::fmt;

pub const CANVAS_WIDTH: u32 = 1200;
pub const CANVAS_HEIGHT: u32 = 630;

/// An opaque sRGB color.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgb(pub u8, pub u8, pub u8);

impl Rgb {
    pub const WHITE: Rgb = Rgb(0xff, 0xff, 0xff);
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.0, self.1, self.2)
    }
}

/// Position along an axis, also used for text alignment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Align {
    Start,
    Center,
    End,
}

impl Align {
    /// Offset of a box of size `used` inside `available`.
    fn offset(self, available: f32, used: f32) -> f32 {
        match self {
            Align::Start => 0.0,
            Align::Center => (available - used) / 2.0,
            Align::End => available - used,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ColorStop {
    /// 0.0 ..= 1.0 along the gradient line.
    pub offset: f32,
    pub color: Rgb,
}

/// CSS-style linear gradient: an angle in degrees (0 points up, 90 right)
/// and its color stops.
#[derive(Debug, Clone, PartialEq)]
pub struct LinearGradient {
    pub angle: f32,
    pub stops: Vec<ColorStop>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ContainerStyle {
    pub justify: Align,
    pub align_items: Align,
    /// Uniform padding; the container is border-box sized to the canvas.
    pub padding: f32,
    pub background: LinearGradient,
    /// Inherited text color.
    pub color: Rgb,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TextStyle {
    pub font_size: f32,
    pub font_weight: u16,
    pub text_align: Align,
    /// Multiplier of `font_size`.
    pub line_height: f32,
    pub max_width: f32,
    pub margin_bottom: f32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TextNode {
    pub content: String,
    pub style: TextStyle,
}

/// A column container holding text blocks.
#[derive(Debug, Clone, PartialEq)]
pub struct LayoutTree {
    pub style: ContainerStyle,
    pub children: Vec<TextNode>,
}

impl LayoutTree {
    /// The social-share card: a diagonal purple gradient with the title
    /// centered in white, bold, at most 1000px wide.
    pub fn thumbnail(title: &str) -> Self {
        Self {
            style: ContainerStyle {
                justify: Align::Center,
                align_items: Align::Center,
                padding: 40.0,
                background: LinearGradient {
                    angle: 135.0,
                    stops: vec![
                        ColorStop {
                            offset: 0.0,
                            color: Rgb(0x66, 0x7e, 0xea),
                        },
                        ColorStop {
                            offset: 1.0,
                            color: Rgb(0x76, 0x4b, 0xa2),
                        },
                    ],
                },
                color: Rgb::WHITE,
            },
            children: vec![TextNode {
                content: title.to_string(),
                style: TextStyle {
                    font_size: 48.0,
                    font_weight: 700,
                    text_align: Align::Center,
                    line_height: 1.2,
                    max_width: 1000.0,
                    margin_bottom: 20.0,
                },
            }],
        }
    }

    /// Concatenated text of every node.
    pub fn text(&self) -> String {
        self.children.iter().map(|c| c.content.as_str()).collect()
    }
}

// ============================================================================
// Measurement
// ============================================================================

/// Horizontal advances and vertical metrics of one face, in em units.
#[derive(Debug, Clone, PartialEq)]
pub struct FontMetrics {
    ascender: f32,
    /// Negative below the baseline.
    descender: f32,
    advances: HashMap<char, f32>,
}

impl FontMetrics {
    pub fn new(ascender: f32, descender: f32, advances: HashMap<char, f32>) -> Self {
        Self {
            ascender,
            descender,
            advances,
        }
    }

    /// Metrics used when no face is available.
    pub fn approximate() -> Self {
        Self::new(0.88, -0.12, HashMap::new())
    }

    fn char_advance(&self, c: char, size: f32) -> f32 {
        let em = self
            .advances
            .get(&c)
            .copied()
            .unwrap_or_else(|| fallback_advance(c));
        em * size
    }

    pub fn advance(&self, text: &str, size: f32) -> f32 {
        text.chars().map(|c| self.char_advance(c, size)).sum()
    }

    /// Baseline offset from the top of a line box of height `line_height`.
    fn baseline(&self, size: f32, line_height: f32) -> f32 {
        let content = (self.ascender - self.descender) * size;
        (line_height - content) / 2.0 + self.ascender * size
    }
}

/// Guess for characters the face has no glyph for: CJK and other wide
/// scripts take a full em, everything else a bit over half.
fn fallback_advance(c: char) -> f32 {
    if c >= '\u{1100}' { 1.0 } else { 0.55 }
}

/// Source of glyph metrics for a run of text at a given weight.
pub trait TextMeasure {
    fn metrics(&self, text: &str, weight: u16) -> FontMetrics;
}

/// Measures every glyph with [`FontMetrics::approximate`].
pub struct ApproximateMeasure;

impl TextMeasure for ApproximateMeasure {
    fn metrics(&self, _text: &str, _weight: u16) -> FontMetrics {
        FontMetrics::approximate()
    }
}

// ============================================================================
// Layout pass
// ============================================================================

/// Gradient resolved to user-space endpoints.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedGradient {
    pub x1: f32,
    pub y1: f32,
    pub x2: f32,
    pub y2: f32,
    pub stops: Vec<ColorStop>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PositionedLine {
    pub text: String,
    /// Anchor x: left edge, center, or right edge depending on `TextRun::align`.
    pub x: f32,
    pub baseline: f32,
    pub width: f32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TextRun {
    pub font_size: f32,
    pub font_weight: u16,
    pub fill: Rgb,
    pub align: Align,
    /// Top edge of the block's border box.
    pub top: f32,
    pub height: f32,
    pub lines: Vec<PositionedLine>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ComputedLayout {
    pub width: u32,
    pub height: u32,
    pub background: ResolvedGradient,
    pub runs: Vec<TextRun>,
}

/// Lay out `tree` on a `width` × `height` canvas.
pub fn compute(
    tree: &LayoutTree,
    width: u32,
    height: u32,
    measure: &impl TextMeasure,
) -> ComputedLayout {
    let style = &tree.style;
    let (w, h) = (width as f32, height as f32);
    let content_x = style.padding;
    let content_y = style.padding;
    let content_w = (w - 2.0 * style.padding).max(0.0);
    let content_h = (h - 2.0 * style.padding).max(0.0);

    struct Block<'a> {
        node: &'a TextNode,
        metrics: FontMetrics,
        lines: Vec<(String, f32)>,
        width: f32,
        height: f32,
    }

    let blocks: Vec<Block> = tree
        .children
        .iter()
        .map(|node| {
            let s = &node.style;
            let metrics = measure.metrics(&node.content, s.font_weight);
            let available = s.max_width.min(content_w);
            let lines = wrap(&node.content, available, s.font_size, &metrics);
            let width = lines.iter().map(|(_, w)| *w).fold(0.0, f32::max);
            let height = lines.len() as f32 * s.font_size * s.line_height;
            Block {
                node,
                metrics,
                lines,
                width,
                height,
            }
        })
        .collect();

    let total: f32 = blocks
        .iter()
        .map(|b| b.height + b.node.style.margin_bottom)
        .sum();
    let mut y = content_y + style.justify.offset(content_h, total);

    let runs = blocks
        .into_iter()
        .map(|block| {
            let s = &block.node.style;
            let line_box = s.font_size * s.line_height;
            let left = content_x + style.align_items.offset(content_w, block.width);
            let top = y;
            let lines = block
                .lines
                .into_iter()
                .enumerate()
                .map(|(i, (text, line_w))| PositionedLine {
                    text,
                    x: left + anchor_offset(s.text_align, block.width),
                    baseline: top
                        + i as f32 * line_box
                        + block.metrics.baseline(s.font_size, line_box),
                    width: line_w,
                })
                .collect();
            y += block.height + s.margin_bottom;
            TextRun {
                font_size: s.font_size,
                font_weight: s.font_weight,
                fill: style.color,
                align: s.text_align,
                top,
                height: block.height,
                lines,
            }
        })
        .collect();

    ComputedLayout {
        width,
        height,
        background: resolve_gradient(&style.background, w, h),
        runs,
    }
}

/// Where a line's anchor sits inside a block of `block_width`.
fn anchor_offset(align: Align, block_width: f32) -> f32 {
    match align {
        Align::Start => 0.0,
        Align::Center => block_width / 2.0,
        Align::End => block_width,
    }
}

/// Greedy line breaking at whitespace. A word wider than `max_width` on its
/// own is split between characters.
fn wrap(text: &str, max_width: f32, size: f32, metrics: &FontMetrics) -> Vec<(String, f32)> {
    let space = metrics.advance(" ", size);
    let mut lines = Vec::new();
    let mut line = String::new();
    let mut line_w = 0.0;

    for word in text.split_whitespace() {
        let word_w = metrics.advance(word, size);
        if !line.is_empty() {
            if line_w + space + word_w <= max_width {
                line.push(' ');
                line.push_str(word);
                line_w += space + word_w;
                continue;
            }
            lines.push((std::mem::take(&mut line), line_w));
            line_w = 0.0;
        }
        if word_w <= max_width {
            line.push_str(word);
            line_w = word_w;
            continue;
        }
        for c in word.chars() {
            let c_w = metrics.char_advance(c, size);
            if !line.is_empty() && line_w + c_w > max_width {
                lines.push((std::mem::take(&mut line), line_w));
                line_w = 0.0;
            }
            line.push(c);
            line_w += c_w;
        }
    }
    if !line.is_empty() {
        lines.push((line, line_w));
    }
    lines
}

/// Endpoints of a CSS `linear-gradient(<angle>, ...)` over a `w` × `h` box.
///
/// The gradient line passes through the center; its length is chosen so the
/// corners hit the first and last stops exactly.
fn resolve_gradient(gradient: &LinearGradient, w: f32, h: f32) -> ResolvedGradient {
    let rad = gradient.angle.to_radians();
    let (dx, dy) = (rad.sin(), -rad.cos());
    let half = (w * dx.abs() + h * dy.abs()) / 2.0;
    let (cx, cy) = (w / 2.0, h / 2.0);
    ResolvedGradient {
        x1: cx - dx * half,
        y1: cy - dy * half,
        x2: cx + dx * half,
        y2: cy + dy * half,
        stops: gradient.stops.clone(),
    }
}
