//! Glyph outline capture

/// Outline command, in font design units (y up)
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum OutlineCommand {
    MoveTo(f32, f32),
    LineTo(f32, f32),
    QuadTo(f32, f32, f32, f32),
    CurveTo(f32, f32, f32, f32, f32, f32),
    Close,
}

/// A complete glyph outline with its horizontal advance
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GlyphOutline {
    /// Glyph index inside the font
    pub glyph_index: u16,
    /// Outline commands in drawing order
    pub commands: Vec<OutlineCommand>,
    /// Horizontal advance in font units
    pub advance: f32,
}

impl GlyphOutline {
    /// Outline without any drawing commands (e.g. space)
    pub fn blank(glyph_index: u16, advance: f32) -> Self {
        Self {
            glyph_index,
            commands: Vec::new(),
            advance,
        }
    }

    /// Check if the outline draws nothing
    pub fn is_blank(&self) -> bool {
        self.commands
            .iter()
            .all(|c| matches!(c, OutlineCommand::Close))
    }
}

impl ttf_parser::OutlineBuilder for GlyphOutline {
    fn move_to(&mut self, x: f32, y: f32) {
        self.commands.push(OutlineCommand::MoveTo(x, y));
    }

    fn line_to(&mut self, x: f32, y: f32) {
        self.commands.push(OutlineCommand::LineTo(x, y));
    }

    fn quad_to(&mut self, x1: f32, y1: f32, x: f32, y: f32) {
        self.commands.push(OutlineCommand::QuadTo(x1, y1, x, y));
    }

    fn curve_to(&mut self, x1: f32, y1: f32, x2: f32, y2: f32, x: f32, y: f32) {
        self.commands.push(OutlineCommand::CurveTo(x1, y1, x2, y2, x, y));
    }

    fn close(&mut self) {
        self.commands.push(OutlineCommand::Close);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ttf_parser::OutlineBuilder;

    #[test]
    fn test_builder_records_commands() {
        let mut outline = GlyphOutline::default();
        outline.move_to(0.0, 0.0);
        outline.line_to(10.0, 0.0);
        outline.quad_to(10.0, 10.0, 0.0, 10.0);
        outline.close();

        assert_eq!(outline.commands.len(), 4);
        assert_eq!(outline.commands[2], OutlineCommand::QuadTo(10.0, 10.0, 0.0, 10.0));
        assert!(!outline.is_blank());
    }

    #[test]
    fn test_blank_outline() {
        assert!(GlyphOutline::blank(3, 250.0).is_blank());
    }
}
