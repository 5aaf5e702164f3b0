//! Multi-page atlas packer
//!
//! Pages are opened lazily and tried in creation order. Every rect reserves
//! `padding` extra pixels to its right and bottom; the usable area of a page
//! is widened by the same amount so a rect may still end flush with the
//! border. Together this keeps at least `padding` pixels between neighbours.

use crate::{MaxRectsBin, PackError, Rect, Result};

/// Packer options
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PackerConfig {
    /// Page width in pixels
    pub width: u32,
    /// Page height in pixels
    pub height: u32,
    /// Gap kept between placed rects
    pub padding: u32,
    /// Margin kept free along the page edges
    pub border: u32,
    /// Shrink the reported page size to the used extent
    pub smart_size: bool,
    /// Round the reported page size up to a power of two
    pub pot: bool,
    /// Report square pages
    pub square: bool,
}

impl Default for PackerConfig {
    fn default() -> Self {
        Self {
            width: 512,
            height: 512,
            padding: 2,
            border: 0,
            smart_size: false,
            pot: false,
            square: false,
        }
    }
}

/// Where one input rect ended up
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PackedRect {
    pub page: u32,
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

impl PackedRect {
    pub fn rect(&self) -> Rect {
        Rect::new(self.x, self.y, self.width, self.height)
    }
}

/// Result of packing a whole batch
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackResult {
    /// One entry per input, None for zero-sized inputs
    pub placements: Vec<Option<PackedRect>>,
    pub page_count: u32,
    pub page_width: u32,
    pub page_height: u32,
}

/// Packs rects onto as many pages as needed
#[derive(Debug)]
pub struct AtlasPacker {
    config: PackerConfig,
    pages: Vec<MaxRectsBin>,
}

impl AtlasPacker {
    pub fn new(config: PackerConfig) -> Result<Self> {
        if config.width == 0
            || config.height == 0
            || config.width <= config.border.saturating_mul(2)
            || config.height <= config.border.saturating_mul(2)
        {
            return Err(PackError::InvalidPage {
                width: config.width,
                height: config.height,
                border: config.border,
            });
        }
        Ok(Self {
            config,
            pages: Vec::new(),
        })
    }

    /// Pack a batch of `(width, height)` sizes in order
    pub fn pack_all(config: PackerConfig, sizes: &[(u32, u32)]) -> Result<PackResult> {
        let mut packer = Self::new(config)?;
        let placements = sizes
            .iter()
            .map(|&(w, h)| packer.insert(w, h))
            .collect::<Result<Vec<_>>>()?;
        let (page_width, page_height) = packer.page_size();

        tracing::info!(
            "Packed {} rects onto {} page(s) of {}x{}",
            placements.iter().flatten().count(),
            packer.page_count(),
            page_width,
            page_height
        );

        Ok(PackResult {
            placements,
            page_count: packer.page_count(),
            page_width,
            page_height,
        })
    }

    /// Place one rect. Zero-sized rects are not placed and return None.
    pub fn insert(&mut self, width: u32, height: u32) -> Result<Option<PackedRect>> {
        if width == 0 || height == 0 {
            return Ok(None);
        }

        let padding = self.config.padding;
        let (w, h) = (width + padding, height + padding);

        // Try existing pages
        for (page, bin) in self.pages.iter_mut().enumerate() {
            if let Some(node) = bin.insert(w, h) {
                return Ok(Some(packed(page, node, width, height)));
            }
        }

        // Open a new page
        let mut bin = MaxRectsBin::new(self.usable_area());
        let node = bin.insert(w, h).ok_or(PackError::TooLarge {
            width,
            height,
            page_width: self.config.width,
            page_height: self.config.height,
        })?;

        let page = self.pages.len();
        tracing::debug!("Opened page {} for {}x{} rect", page, width, height);
        self.pages.push(bin);
        Ok(Some(packed(page, node, width, height)))
    }

    pub fn page_count(&self) -> u32 {
        self.pages.len() as u32
    }

    /// Page size after the smart size, pot and square options
    pub fn page_size(&self) -> (u32, u32) {
        let c = &self.config;
        let (mut width, mut height) = (c.width, c.height);

        if c.smart_size {
            // Placed rects carry their padding, strip it back off
            let (used_w, used_h) = self
                .pages
                .iter()
                .flat_map(|bin| bin.used())
                .fold((0, 0), |(w, h), r| (w.max(r.right()), h.max(r.bottom())));
            width = (used_w.saturating_sub(c.padding) + c.border).max(1);
            height = (used_h.saturating_sub(c.padding) + c.border).max(1);
        }
        if c.pot {
            width = width.next_power_of_two();
            height = height.next_power_of_two();
        }
        if c.square {
            width = width.max(height);
            height = width;
        }

        (width.min(c.width), height.min(c.height))
    }

    fn usable_area(&self) -> Rect {
        let c = &self.config;
        Rect::new(
            c.border,
            c.border,
            (c.width - c.border * 2).saturating_add(c.padding),
            (c.height - c.border * 2).saturating_add(c.padding),
        )
    }
}

fn packed(page: usize, node: Rect, width: u32, height: u32) -> PackedRect {
    PackedRect {
        page: page as u32,
        x: node.x,
        y: node.y,
        width,
        height,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(width: u32, height: u32, padding: u32) -> PackerConfig {
        PackerConfig {
            width,
            height,
            padding,
            ..PackerConfig::default()
        }
    }

    #[test]
    fn test_padding_between_rects() {
        let mut packer = AtlasPacker::new(config(64, 64, 2)).unwrap();
        let a = packer.insert(10, 10).unwrap().unwrap();
        let b = packer.insert(10, 10).unwrap().unwrap();
        assert_eq!((a.x, a.y), (0, 0));
        assert!(b.x >= 12 || b.y >= 12);
    }

    #[test]
    fn test_full_width_rect_fits() {
        let mut packer = AtlasPacker::new(config(64, 64, 4)).unwrap();
        let r = packer.insert(64, 64).unwrap().unwrap();
        assert_eq!((r.page, r.x, r.y), (0, 0, 0));
    }

    #[test]
    fn test_zero_size_not_packed() {
        let mut packer = AtlasPacker::new(config(64, 64, 2)).unwrap();
        assert_eq!(packer.insert(0, 10).unwrap(), None);
        assert_eq!(packer.page_count(), 0);
    }

    #[test]
    fn test_overflow_opens_page() {
        let mut packer = AtlasPacker::new(config(32, 32, 0)).unwrap();
        for _ in 0..4 {
            assert_eq!(packer.insert(16, 16).unwrap().unwrap().page, 0);
        }
        assert_eq!(packer.insert(16, 16).unwrap().unwrap().page, 1);
        assert_eq!(packer.page_count(), 2);
    }

    #[test]
    fn test_too_large() {
        let mut packer = AtlasPacker::new(config(32, 32, 0)).unwrap();
        assert!(matches!(packer.insert(33, 8), Err(PackError::TooLarge { .. })));
    }

    #[test]
    fn test_border() {
        let cfg = PackerConfig { border: 3, ..config(32, 32, 1) };
        let mut packer = AtlasPacker::new(cfg).unwrap();
        let r = packer.insert(26, 26).unwrap().unwrap();
        assert_eq!((r.x, r.y), (3, 3));
        assert!(matches!(packer.insert(27, 1), Err(PackError::TooLarge { .. })));
    }

    #[test]
    fn test_invalid_page() {
        let cfg = PackerConfig { border: 16, ..config(32, 32, 0) };
        assert!(matches!(AtlasPacker::new(cfg), Err(PackError::InvalidPage { .. })));

        let cfg = PackerConfig { border: u32::MAX, ..config(32, 32, 0) };
        assert!(matches!(AtlasPacker::new(cfg), Err(PackError::InvalidPage { .. })));
        let cfg = PackerConfig { border: u32::MAX / 2 + 1, ..config(u32::MAX, u32::MAX, 0) };
        assert!(matches!(AtlasPacker::new(cfg), Err(PackError::InvalidPage { .. })));
    }

    #[test]
    fn test_smart_size() {
        let cfg = PackerConfig { smart_size: true, ..config(512, 512, 2) };
        let result = AtlasPacker::pack_all(cfg, &[(30, 20)]).unwrap();
        assert_eq!((result.page_width, result.page_height), (30, 20));

        let cfg = PackerConfig { pot: true, ..cfg };
        let result = AtlasPacker::pack_all(cfg, &[(30, 20)]).unwrap();
        assert_eq!((result.page_width, result.page_height), (32, 32));

        let cfg = PackerConfig { square: true, pot: false, ..cfg };
        let result = AtlasPacker::pack_all(cfg, &[(30, 20)]).unwrap();
        assert_eq!((result.page_width, result.page_height), (30, 30));
    }
}
