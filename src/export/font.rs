//! TrueType font asset embedded by the PDF renderer.
//!
//! Thai (and anything else outside Latin-1) cannot be drawn with the PDF
//! base fonts, so the asset must be loaded and validated before rendering.

use crate::errors::{AppError, AppResult};
use std::fs;
use std::path::Path;
use ttf_parser::{Face, GlyphId};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FontAsset {
    /// PDF-safe font name (used as `/BaseFont`).
    pub name: String,
    pub data: Vec<u8>,
}

impl FontAsset {
    /// Read and validate a `.ttf` file.
    pub fn load(path: &Path) -> AppResult<Self> {
        let data = fs::read(path).map_err(|e| {
            AppError::FontLoad(format!("cannot read font '{}': {e}", path.display()))
        })?;

        let stem = path
            .file_stem()
            .map(|s| s.to_string_lossy().to_string())
            .unwrap_or_else(|| "EmbeddedFont".to_string());

        Self::from_bytes(&stem, data)
    }

    /// Wrap raw font bytes, failing if they are not a parseable font.
    pub fn from_bytes(name: &str, data: Vec<u8>) -> AppResult<Self> {
        Face::parse(&data, 0)
            .map_err(|e| AppError::FontLoad(format!("invalid font data for '{name}': {e}")))?;

        Ok(Self {
            name: pdf_name(name),
            data,
        })
    }

    pub fn face(&self) -> AppResult<Face<'_>> {
        Face::parse(&self.data, 0)
            .map_err(|e| AppError::FontLoad(format!("invalid font data for '{}': {e}", self.name)))
    }

    /// Fail on the first visible character of `texts` the face has no
    /// glyph for.
    pub fn ensure_covers<'t>(&self, texts: impl IntoIterator<Item = &'t str>) -> AppResult<()> {
        let face = self.face()?;

        for text in texts {
            let missing = text
                .chars()
                .filter(|c| !c.is_whitespace() && !c.is_control())
                .find(|c| face.glyph_index(*c).is_none());

            if let Some(c) = missing {
                return Err(AppError::FontLoad(format!(
                    "font '{}' has no glyph for '{c}' (U+{:04X})",
                    self.name, c as u32
                )));
            }
        }
        Ok(())
    }
}

/// Metrics of a parsed face, scaled to the 1000-unit PDF glyph space.
pub struct FaceMetrics {
    pub ascent: f32,
    pub descent: f32,
    pub cap_height: f32,
    pub italic_angle: f32,
    pub bbox: [f32; 4],
}

impl FaceMetrics {
    pub fn of(face: &Face<'_>) -> Self {
        let upem = face.units_per_em() as f32;
        let scale = |v: i16| v as f32 * 1000.0 / upem;
        let bb = face.global_bounding_box();

        Self {
            ascent: scale(face.ascender()),
            descent: scale(face.descender()),
            cap_height: scale(face.capital_height().unwrap_or(face.ascender())),
            italic_angle: face.italic_angle(),
            bbox: [scale(bb.x_min), scale(bb.y_min), scale(bb.x_max), scale(bb.y_max)],
        }
    }
}

/// Glyph id and advance (1000-unit space) of `c`; missing glyphs map to
/// `.notdef` (glyph 0).
pub fn glyph_for(face: &Face<'_>, c: char) -> (u16, f32) {
    let gid = face.glyph_index(c).unwrap_or(GlyphId(0));
    let upem = face.units_per_em() as f32;
    let advance = face.glyph_hor_advance(gid).unwrap_or(0) as f32 * 1000.0 / upem;
    (gid.0, advance)
}

/// Keep only characters allowed in a PDF name without escaping.
fn pdf_name(raw: &str) -> String {
    let cleaned: String = raw
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || *c == '-' || *c == '_')
        .collect();

    if cleaned.is_empty() {
        "EmbeddedFont".to_string()
    } else {
        cleaned
    }
}
