//! Font access
//!
//! The pipeline only needs outlines, advances, kerning and a handful of
//! vertical metrics. `OutlineSource` is that capability; `TtfFont` provides
//! it for TrueType/OpenType data through ttf-parser.

use ttf_parser::gpos::{PairAdjustment, PositioningSubtable};
use ttf_parser::{Face, GlyphId, Tag};

use crate::{GlyphOutline, Result, ShapeError};

/// Font-wide vertical metrics in font units
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FontMetrics {
    pub units_per_em: u16,
    /// Ascender (above baseline)
    pub ascender: i16,
    /// Descender (below baseline, usually negative)
    pub descender: i16,
    pub line_gap: i16,
}

impl FontMetrics {
    /// Scale factor from font units to pixels at `font_size`
    pub fn scale(&self, font_size: f32) -> f32 {
        font_size / self.units_per_em as f32
    }

    /// Line height (ascender - descender + line_gap) in font units
    pub fn line_height(&self) -> i32 {
        self.ascender as i32 - self.descender as i32 + self.line_gap as i32
    }
}

/// Anything that can hand out glyph outlines for characters
pub trait OutlineSource {
    /// Face name reported in the descriptor
    fn family_name(&self) -> String;

    fn metrics(&self) -> FontMetrics;

    /// Outline and advance of the glyph mapped to `c`
    fn glyph(&self, c: char) -> GlyphOutline;

    /// Kerning between two characters in font units (0 when unset)
    fn kerning(&self, first: char, second: char) -> i16;
}

/// Parsed TrueType/OpenType face
pub struct TtfFont<'a> {
    face: Face<'a>,
}

impl<'a> TtfFont<'a> {
    /// Parse a font face from data
    pub fn parse(data: &'a [u8], index: u32) -> Result<Self> {
        let face = Face::parse(data, index).map_err(|e| ShapeError::FontParsing(e.to_string()))?;
        Self::from_face(face)
    }

    /// Wrap an already parsed face, e.g. one built from raw tables
    pub fn from_face(face: Face<'a>) -> Result<Self> {
        if face.units_per_em() == 0 {
            return Err(ShapeError::InvalidMetrics("units per em is zero".into()));
        }
        Ok(Self { face })
    }

    /// Get underlying ttf-parser face
    pub fn ttf_face(&self) -> &Face<'a> {
        &self.face
    }

    fn glyph_id(&self, c: char) -> GlyphId {
        self.face.glyph_index(c).unwrap_or_else(|| {
            tracing::warn!("No glyph for {:?}, using .notdef", c);
            GlyphId(0)
        })
    }

    /// Horizontal pair adjustment from the GPOS `kern` feature.
    ///
    /// `None` when the face has no GPOS `kern` feature. Lookups are summed,
    /// and within a lookup the first subtable covering the pair wins.
    fn gpos_kerning(&self, left: GlyphId, right: GlyphId) -> Option<i16> {
        let gpos = self.face.tables().gpos?;
        let kern_tag = Tag::from_bytes(b"kern");

        let mut lookups: Vec<u16> = gpos
            .features
            .into_iter()
            .filter(|feature| feature.tag == kern_tag)
            .flat_map(|feature| feature.lookup_indices)
            .collect();
        if lookups.is_empty() {
            return None;
        }
        lookups.sort_unstable();
        lookups.dedup();

        let total = lookups
            .into_iter()
            .filter_map(|index| gpos.lookups.get(index))
            .filter_map(|lookup| {
                (0..lookup.subtables.len())
                    .filter_map(|i| lookup.subtables.get::<PositioningSubtable>(i))
                    .find_map(|subtable| match subtable {
                        PositioningSubtable::Pair(pair) => pair_advance(&pair, left, right),
                        _ => None,
                    })
            })
            .fold(0i16, |acc, v| acc.saturating_add(v));
        Some(total)
    }

    /// Summed `kern` table subtables (horizontal, non-variable, no state machine)
    fn kern_table_kerning(&self, left: GlyphId, right: GlyphId) -> i16 {
        let Some(kern) = self.face.tables().kern else {
            return 0;
        };

        kern.subtables
            .into_iter()
            .filter(|st| st.horizontal && !st.variable && !st.has_state_machine)
            .filter_map(|st| st.glyphs_kerning(left, right))
            .fold(0i16, |acc, v| acc.saturating_add(v))
    }
}

/// X advance a pair adjustment subtable applies to the first glyph
fn pair_advance(pair: &PairAdjustment, left: GlyphId, right: GlyphId) -> Option<i16> {
    match pair {
        PairAdjustment::Format1 { coverage, sets } => {
            let set = sets.get(coverage.get(left)?)?;
            set.get(right).map(|(first, _)| first.x_advance)
        }
        PairAdjustment::Format2 { coverage, classes, matrix } => {
            coverage.get(left)?;
            let key = (classes.0.get(left), classes.1.get(right));
            matrix.get(key).map(|(first, _)| first.x_advance)
        }
    }
}

impl OutlineSource for TtfFont<'_> {
    fn family_name(&self) -> String {
        self.face
            .names()
            .into_iter()
            .filter(|name| name.name_id == ttf_parser::name_id::FAMILY && name.is_unicode())
            .find_map(|name| name.to_string())
            .unwrap_or_default()
    }

    fn metrics(&self) -> FontMetrics {
        FontMetrics {
            units_per_em: self.face.units_per_em(),
            ascender: self.face.ascender(),
            descender: self.face.descender(),
            line_gap: self.face.line_gap(),
        }
    }

    fn glyph(&self, c: char) -> GlyphOutline {
        let id = self.glyph_id(c);
        let advance = self.face.glyph_hor_advance(id).unwrap_or(0) as f32;
        let mut outline = GlyphOutline::blank(id.0, advance);
        // Blank glyphs (space) have no outline and report None here
        if self.face.outline_glyph(id, &mut outline).is_none() {
            outline.commands.clear();
        }
        outline
    }

    fn kerning(&self, first: char, second: char) -> i16 {
        let (Some(left), Some(right)) = (self.face.glyph_index(first), self.face.glyph_index(second)) else {
            return 0;
        };

        // GPOS takes precedence; `kern` covers older fonts
        self.gpos_kerning(left, right)
            .unwrap_or_else(|| self.kern_table_kerning(left, right))
    }
}
