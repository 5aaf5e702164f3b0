//! Edge case tests for bmsdf-shape

use bmsdf_shape::*;

// ============================================================================
// SHAPE GRAMMAR
// ============================================================================

#[test]
fn test_open_contour_not_closed() {
    let commands = vec![
        OutlineCommand::MoveTo(0.0, 0.0),
        OutlineCommand::LineTo(4.0, 0.0),
        OutlineCommand::LineTo(4.0, 4.0),
    ];
    let shape = ShapeBuilder::new(1.0).build(&commands);
    assert_eq!(shape.contours.len(), 1);
    assert!(!shape.contours[0].closed);
    assert_eq!(shape.description, "{0, 0; 4, 0; 4, -4}");
}

#[test]
fn test_consecutive_moves_drop_nothing() {
    // Two moves in a row: the first becomes a single-point contour
    let commands = vec![
        OutlineCommand::MoveTo(1.0, 1.0),
        OutlineCommand::MoveTo(2.0, 2.0),
        OutlineCommand::LineTo(3.0, 2.0),
    ];
    let shape = ShapeBuilder::new(1.0).build(&commands);
    assert_eq!(shape.contours.len(), 2);
    assert!(shape.contours[0].is_degenerate());
    assert_eq!(shape.bbox, BoundingBox { left: 1.0, bottom: -2.0, right: 3.0, top: -1.0 });
}

#[test]
fn test_close_only_is_blank() {
    let shape = ShapeBuilder::new(1.0).build(&[OutlineCommand::Close]);
    assert!(shape.is_empty());
    assert_eq!(shape.bbox.width(), 0.0);
}

#[test]
fn test_deterministic_description() {
    let commands = vec![
        OutlineCommand::MoveTo(10.0, 0.0),
        OutlineCommand::CurveTo(20.0, 0.0, 30.0, 10.0, 30.0, 20.0),
        OutlineCommand::QuadTo(30.0, 30.0, 10.0, 30.0),
        OutlineCommand::Close,
    ];
    let builder = ShapeBuilder::new(0.1);
    assert_eq!(builder.build(&commands), builder.build(&commands));
}

// ============================================================================
// OUTLINE SOURCE
// ============================================================================

struct Fixed;

impl OutlineSource for Fixed {
    fn family_name(&self) -> String {
        "Fixed".into()
    }

    fn metrics(&self) -> FontMetrics {
        FontMetrics { units_per_em: 2048, ascender: 1638, descender: -410, line_gap: 0 }
    }

    fn glyph(&self, c: char) -> GlyphOutline {
        if c == ' ' {
            return GlyphOutline::blank(1, 512.0);
        }
        GlyphOutline {
            glyph_index: 2,
            commands: vec![
                OutlineCommand::MoveTo(0.0, 0.0),
                OutlineCommand::LineTo(1024.0, 0.0),
                OutlineCommand::LineTo(1024.0, 1024.0),
                OutlineCommand::Close,
            ],
            advance: 1100.0,
        }
    }

    fn kerning(&self, _first: char, _second: char) -> i16 {
        0
    }
}

#[test]
fn test_source_through_builder() {
    let font = Fixed;
    let builder = ShapeBuilder::new(font.metrics().scale(32.0));

    let shape = builder.build(&font.glyph('A').commands);
    assert_eq!(shape.bbox.width(), 16.0);
    assert_eq!(shape.bbox.height(), 16.0);

    let space = font.glyph(' ');
    assert!(space.is_blank());
    assert!(builder.build(&space.commands).is_empty());
}
