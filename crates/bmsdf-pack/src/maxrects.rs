//! Single page MaxRects bin

/// Axis aligned rectangle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Rect {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

impl Rect {
    pub fn new(x: u32, y: u32, width: u32, height: u32) -> Self {
        Self { x, y, width, height }
    }

    pub fn right(&self) -> u32 {
        self.x + self.width
    }

    pub fn bottom(&self) -> u32 {
        self.y + self.height
    }

    pub fn area(&self) -> u64 {
        self.width as u64 * self.height as u64
    }

    /// Can fit another rect
    pub fn can_fit(&self, width: u32, height: u32) -> bool {
        self.width >= width && self.height >= height
    }

    /// Interiors overlap (touching edges do not count)
    pub fn intersects(&self, other: &Rect) -> bool {
        self.x < other.right()
            && other.x < self.right()
            && self.y < other.bottom()
            && other.y < self.bottom()
    }

    pub fn contains(&self, other: &Rect) -> bool {
        other.x >= self.x
            && other.y >= self.y
            && other.right() <= self.right()
            && other.bottom() <= self.bottom()
    }
}

/// Free-space bookkeeping for one page
#[derive(Debug, Clone)]
pub struct MaxRectsBin {
    free: Vec<Rect>,
    used: Vec<Rect>,
}

impl MaxRectsBin {
    /// Bin covering `area`
    pub fn new(area: Rect) -> Self {
        Self {
            free: vec![area],
            used: Vec::new(),
        }
    }

    /// Place a rect, returning its position, or None when it does not fit
    pub fn insert(&mut self, width: u32, height: u32) -> Option<Rect> {
        let node = self.find_position(width, height)?;
        self.place(node);
        Some(node)
    }

    /// Occupied rects in placement order
    pub fn used(&self) -> &[Rect] {
        &self.used
    }

    pub fn free_rects(&self) -> &[Rect] {
        &self.free
    }

    /// Best short side fit, ties broken by best long side fit
    fn find_position(&self, width: u32, height: u32) -> Option<Rect> {
        let mut best = None;
        let mut best_short_side = u32::MAX;
        let mut best_long_side = u32::MAX;

        for rect in &self.free {
            if !rect.can_fit(width, height) {
                continue;
            }

            let leftover_h = rect.width - width;
            let leftover_v = rect.height - height;
            let short_side = leftover_h.min(leftover_v);
            let long_side = leftover_h.max(leftover_v);

            if short_side < best_short_side
                || (short_side == best_short_side && long_side < best_long_side)
            {
                best = Some(Rect::new(rect.x, rect.y, width, height));
                best_short_side = short_side;
                best_long_side = long_side;
            }
        }

        best
    }

    fn place(&mut self, node: Rect) {
        let mut split = Vec::new();
        self.free.retain(|free| {
            if free.intersects(&node) {
                split_free_rect(free, &node, &mut split);
                false
            } else {
                true
            }
        });
        self.free.extend(split);
        self.prune_free_rects();
        self.used.push(node);
    }

    /// Drop degenerate free rects and ones contained in another
    fn prune_free_rects(&mut self) {
        self.free.retain(|r| r.width > 0 && r.height > 0);

        let mut i = 0;
        while i < self.free.len() {
            let mut removed_i = false;
            let mut j = i + 1;
            while j < self.free.len() {
                if self.free[j].contains(&self.free[i]) {
                    self.free.remove(i);
                    removed_i = true;
                    break;
                }
                if self.free[i].contains(&self.free[j]) {
                    self.free.remove(j);
                } else {
                    j += 1;
                }
            }
            if !removed_i {
                i += 1;
            }
        }
    }
}

/// Remaining pieces of `free` around `node`, up to four maximal rects
fn split_free_rect(free: &Rect, node: &Rect, out: &mut Vec<Rect>) {
    if node.x < free.right() && node.right() > free.x {
        // Above the node
        if node.y > free.y && node.y < free.bottom() {
            out.push(Rect::new(free.x, free.y, free.width, node.y - free.y));
        }
        // Below the node
        if node.bottom() < free.bottom() {
            out.push(Rect::new(
                free.x,
                node.bottom(),
                free.width,
                free.bottom() - node.bottom(),
            ));
        }
    }

    if node.y < free.bottom() && node.bottom() > free.y {
        // Left of the node
        if node.x > free.x && node.x < free.right() {
            out.push(Rect::new(free.x, free.y, node.x - free.x, free.height));
        }
        // Right of the node
        if node.right() < free.right() {
            out.push(Rect::new(
                node.right(),
                free.y,
                free.right() - node.right(),
                free.height,
            ));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_rect_at_origin() {
        let mut bin = MaxRectsBin::new(Rect::new(0, 0, 64, 64));
        assert_eq!(bin.insert(10, 20), Some(Rect::new(0, 0, 10, 20)));
        assert_eq!(bin.free_rects().len(), 2);
    }

    #[test]
    fn test_exact_fill() {
        let mut bin = MaxRectsBin::new(Rect::new(0, 0, 32, 32));
        for _ in 0..4 {
            assert!(bin.insert(16, 16).is_some());
        }
        assert!(bin.insert(1, 1).is_none());
        assert!(bin.free_rects().is_empty());
    }

    #[test]
    fn test_rejects_oversized() {
        let mut bin = MaxRectsBin::new(Rect::new(0, 0, 32, 32));
        assert!(bin.insert(33, 1).is_none());
        assert!(bin.used().is_empty());
    }

    #[test]
    fn test_contained_free_rects_pruned() {
        let mut bin = MaxRectsBin::new(Rect::new(0, 0, 100, 100));
        bin.insert(10, 10);
        bin.insert(10, 10);
        let free = bin.free_rects();
        for (i, a) in free.iter().enumerate() {
            for (j, b) in free.iter().enumerate() {
                if i != j {
                    assert!(!a.contains(b), "{a:?} contains {b:?}");
                }
            }
        }
    }

    #[test]
    fn test_offset_area() {
        let mut bin = MaxRectsBin::new(Rect::new(4, 4, 20, 20));
        assert_eq!(bin.insert(5, 5), Some(Rect::new(4, 4, 5, 5)));
    }
}
