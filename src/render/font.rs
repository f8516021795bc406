//! Font loading.
//!
//! The title font is read from disk exactly once, at startup, into a
//! [`FontSet`] that every render borrows. When the configured file is missing
//! or holds no usable face the set falls back to the system fonts; text still
//! renders, just not in the intended typeface.
//!
//! In both cases the database's `sans-serif` generic family is pointed at a
//! face that actually exists, and the SVG names `sans-serif` as the last
//! fallback, so the rasterizer always finds something to draw with.

use super::layout::{FontMetrics, TextMeasure};
use crate::config::{FontConfig, FontStyle};
use log::{debug, warn};
use resvg::usvg::fontdb;
use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::Arc;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum FontError {
    #[error("cannot read font file {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("no usable font face in {0}")]
    NoFace(PathBuf),
}

/// One embedded font file and how it is declared.
#[derive(Debug, Clone)]
pub struct FontBytes {
    pub path: PathBuf,
    pub family: String,
    pub weight: u16,
    pub style: FontStyle,
    pub data: Arc<Vec<u8>>,
}

impl FontBytes {
    /// Read the configured font file.
    pub fn read(config: &FontConfig) -> Result<Self, FontError> {
        let data = std::fs::read(&config.path).map_err(|source| FontError::Read {
            path: config.path.clone(),
            source,
        })?;
        Ok(Self {
            path: config.path.clone(),
            family: config.family.clone(),
            weight: config.weight,
            style: config.style,
            data: Arc::new(data),
        })
    }
}

/// Immutable font configuration shared by every render.
pub struct FontSet {
    embedded: Option<FontBytes>,
    db: Arc<fontdb::Database>,
    /// Face used when nothing better matches a metrics query.
    primary: Option<fontdb::ID>,
}

impl FontSet {
    /// Load the configured font, degrading to system fonts on any failure.
    pub fn load(config: &FontConfig) -> Self {
        match FontBytes::read(config).and_then(Self::embedded) {
            Ok(set) => set,
            Err(e) => {
                warn!("{e}; falling back to system fonts");
                Self::system()
            }
        }
    }

    /// Font set backed by a single embedded font.
    pub fn embedded(font: FontBytes) -> Result<Self, FontError> {
        let mut db = fontdb::Database::new();
        db.load_font_source(fontdb::Source::Binary(font.data.clone()));

        let (id, actual_family) = db
            .faces()
            .next()
            .map(|face| (face.id, primary_family(face)))
            .ok_or_else(|| FontError::NoFace(font.path.clone()))?;

        debug!(
            "registered {} as '{}' (face family '{}')",
            font.path.display(),
            font.family,
            actual_family.as_deref().unwrap_or("?")
        );
        if let Some(name) = actual_family {
            db.set_sans_serif_family(name);
        }

        Ok(Self {
            embedded: Some(font),
            db: Arc::new(db),
            primary: Some(id),
        })
    }

    /// Font set backed by whatever the system provides.
    pub fn system() -> Self {
        let mut db = fontdb::Database::new();
        db.load_system_fonts();
        Self::from_database(db)
    }

    /// Font set with no fonts at all. Text is laid out with approximate
    /// metrics and the rasterizer skips it.
    pub fn empty() -> Self {
        Self::from_database(fontdb::Database::new())
    }

    fn from_database(mut db: fontdb::Database) -> Self {
        let sans = db.query(&fontdb::Query {
            families: &[fontdb::Family::SansSerif],
            ..Default::default()
        });
        let primary = match sans {
            Some(id) => Some(id),
            None => {
                let first = db.faces().next().map(|f| (f.id, primary_family(f)));
                match first {
                    Some((id, family)) => {
                        if let Some(name) = family {
                            db.set_sans_serif_family(name);
                        }
                        Some(id)
                    }
                    None => None,
                }
            }
        };
        Self {
            embedded: None,
            db: Arc::new(db),
            primary,
        }
    }

    /// The embedded font, if it loaded.
    pub fn embedded_font(&self) -> Option<&FontBytes> {
        self.embedded.as_ref()
    }

    pub fn is_embedded(&self) -> bool {
        self.embedded.is_some()
    }

    /// Number of faces available to the rasterizer.
    pub fn face_count(&self) -> usize {
        self.db.len()
    }

    /// Value for the SVG `font-family` attribute.
    pub fn family_list(&self) -> String {
        match &self.embedded {
            Some(font) => format!("'{}', sans-serif", font.family),
            None => "sans-serif".to_string(),
        }
    }

    /// Shared handle to the font database for the rasterizer.
    pub fn database(&self) -> Arc<fontdb::Database> {
        Arc::clone(&self.db)
    }
}

impl TextMeasure for FontSet {
    fn metrics(&self, text: &str, weight: u16) -> FontMetrics {
        let id = self
            .db
            .query(&fontdb::Query {
                families: &[fontdb::Family::SansSerif],
                weight: fontdb::Weight(weight),
                ..Default::default()
            })
            .or(self.primary);

        id.and_then(|id| {
            self.db.with_face_data(id, |data, index| {
                ttf_parser::Face::parse(data, index)
                    .ok()
                    .map(|face| metrics_from_face(&face, text))
            })
        })
        .flatten()
        .unwrap_or_else(FontMetrics::approximate)
    }
}

fn primary_family(face: &fontdb::FaceInfo) -> Option<String> {
    face.families.first().map(|(name, _)| name.clone())
}

/// Read the advances of every character in `text` from a parsed face.
fn metrics_from_face(face: &ttf_parser::Face, text: &str) -> FontMetrics {
    let units = f32::from(face.units_per_em());
    let mut advances = HashMap::new();
    for c in text.chars().chain([' ']) {
        if advances.contains_key(&c) {
            continue;
        }
        let advance = face
            .glyph_index(c)
            .and_then(|glyph| face.glyph_hor_advance(glyph));
        if let Some(advance) = advance {
            advances.insert(c, f32::from(advance) / units);
        }
    }
    FontMetrics::new(
        f32::from(face.ascender()) / units,
        f32::from(face.descender()) / units,
        advances,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn config_at(path: PathBuf) -> FontConfig {
        FontConfig {
            path,
            ..FontConfig::default()
        }
    }

    #[test]
    fn read_missing_font_is_error() {
        let tmp = TempDir::new().unwrap();
        let result = FontBytes::read(&config_at(tmp.path().join("missing.ttf")));
        assert!(matches!(result, Err(FontError::Read { .. })));
    }

    #[test]
    fn read_keeps_declared_registration() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("font.ttf");
        std::fs::write(&path, b"not really a font").unwrap();

        let font = FontBytes::read(&config_at(path.clone())).unwrap();
        assert_eq!(font.path, path);
        assert_eq!(font.family, "Noto Sans KR");
        assert_eq!(font.weight, 400);
        assert_eq!(font.style, FontStyle::Normal);
        assert_eq!(font.data.as_slice(), b"not really a font");
    }

    #[test]
    fn garbage_bytes_have_no_face() {
        let font = FontBytes {
            path: PathBuf::from("junk.ttf"),
            family: "Junk".to_string(),
            weight: 400,
            style: FontStyle::Normal,
            data: Arc::new(vec![0u8; 64]),
        };
        assert!(matches!(FontSet::embedded(font), Err(FontError::NoFace(_))));
    }

    #[test]
    fn load_missing_font_degrades_to_system() {
        let tmp = TempDir::new().unwrap();
        let fonts = FontSet::load(&config_at(tmp.path().join("missing.ttf")));
        assert!(!fonts.is_embedded());
        assert!(fonts.embedded_font().is_none());
        assert_eq!(fonts.family_list(), "sans-serif");
    }

    #[test]
    fn empty_set_measures_approximately() {
        let fonts = FontSet::empty();
        assert_eq!(fonts.face_count(), 0);
        assert_eq!(fonts.metrics("Hello", 700), FontMetrics::approximate());
    }
}
