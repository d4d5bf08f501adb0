//! Module-to-pixel geometry and finder-window classification.
//!
//! Everything here is a pure function of its inputs, so it is safe to call
//! from the parallel module pass.

use crate::error::StyleError;

/// Side of each square finder window, in modules
pub const FINDER_WINDOW: usize = 8;

/// Region a module belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RegionClass {
    /// Inside one of the three finder windows
    FinderCorner,
    /// Any other module
    RegularModule,
}

/// Which finder window a module sits in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FinderWindow {
    /// Top-left window
    TopLeft,
    /// Bottom-left window
    BottomLeft,
    /// Top-right window
    TopRight,
}

/// Half-open pixel rectangle `[left, right) x [top, bottom)`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct CellBox {
    /// First column
    pub left: u32,
    /// First row
    pub top: u32,
    /// One past the last column
    pub right: u32,
    /// One past the last row
    pub bottom: u32,
}

impl CellBox {
    /// Create a box from its edges
    pub fn new(left: u32, top: u32, right: u32, bottom: u32) -> Self {
        Self {
            left,
            top,
            right,
            bottom,
        }
    }

    /// Width in pixels
    pub fn width(&self) -> u32 {
        self.right.saturating_sub(self.left)
    }

    /// Height in pixels
    pub fn height(&self) -> u32 {
        self.bottom.saturating_sub(self.top)
    }

    /// Check whether the pixel (px, py) lies inside
    pub fn contains(&self, px: u32, py: u32) -> bool {
        px >= self.left && px < self.right && py >= self.top && py < self.bottom
    }

    /// Check whether two boxes share at least one pixel
    pub fn intersects(&self, other: &CellBox) -> bool {
        self.left < other.right
            && other.left < self.right
            && self.top < other.bottom
            && other.top < self.bottom
    }
}

/// Finder window containing (x, y), if any.
///
/// Windows are tested top-left, bottom-left, top-right; when they overlap
/// (side below 16) the first match wins. For side < 8 every module is in
/// the top-left window.
pub fn finder_window(x: usize, y: usize, side: usize) -> Option<FinderWindow> {
    let far = side.saturating_sub(FINDER_WINDOW);
    if x < FINDER_WINDOW && y < FINDER_WINDOW {
        Some(FinderWindow::TopLeft)
    } else if x < FINDER_WINDOW && y >= far {
        Some(FinderWindow::BottomLeft)
    } else if x >= far && y < FINDER_WINDOW {
        Some(FinderWindow::TopRight)
    } else {
        None
    }
}

/// Classify module (x, y) of a `side` x `side` matrix
pub fn classify(x: usize, y: usize, side: usize) -> RegionClass {
    match finder_window(x, y, side) {
        Some(_) => RegionClass::FinderCorner,
        None => RegionClass::RegularModule,
    }
}

/// Pixel box of module (x, y)
pub fn bbox(x: usize, y: usize, pixels_per_module: u32, border_modules: u32) -> CellBox {
    let left = (x as u32 + border_modules) * pixels_per_module;
    let top = (y as u32 + border_modules) * pixels_per_module;
    CellBox::new(left, top, left + pixels_per_module, top + pixels_per_module)
}

/// Image layout derived from matrix side, module size and border
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RenderGeometry {
    /// Matrix side in modules
    pub side: usize,
    /// Pixels per module edge
    pub pixels_per_module: u32,
    /// Light border around the matrix, in modules
    pub border_modules: u32,
}

impl RenderGeometry {
    /// Create a geometry
    pub fn new(side: usize, pixels_per_module: u32, border_modules: u32) -> Self {
        Self {
            side,
            pixels_per_module,
            border_modules,
        }
    }

    /// Create a geometry from caller-supplied values.
    ///
    /// Rejects an empty matrix, a zero module size, and any combination
    /// whose image side or RGB buffer length does not fit its integer type.
    pub fn try_new(
        side: usize,
        pixels_per_module: u32,
        border_modules: u32,
    ) -> Result<Self, StyleError> {
        if pixels_per_module == 0 {
            return Err(StyleError::InvalidGeometry(
                "pixels per module must be positive".to_string(),
            ));
        }
        if side == 0 {
            return Err(StyleError::InvalidGeometry("matrix is empty".to_string()));
        }
        let geometry = Self::new(side, pixels_per_module, border_modules);
        if geometry.checked_buffer_len().is_none() {
            return Err(StyleError::InvalidGeometry(format!(
                "{side} modules with a {border_modules}-module border at {pixels_per_module}px \
                 per module overflows the image size"
            )));
        }
        Ok(geometry)
    }

    /// Output image side: `(side + 2 * border) * pixels_per_module`.
    ///
    /// Only meaningful for geometries accepted by [`RenderGeometry::try_new`].
    pub fn image_side(&self) -> u32 {
        (self.side as u32 + 2 * self.border_modules) * self.pixels_per_module
    }

    /// [`image_side`](Self::image_side), or `None` on overflow
    pub fn checked_image_side(&self) -> Option<u32> {
        let side = u32::try_from(self.side).ok()?;
        self.border_modules
            .checked_mul(2)?
            .checked_add(side)?
            .checked_mul(self.pixels_per_module)
    }

    /// Byte length of the RGB image buffer, or `None` when it cannot be
    /// allocated
    pub fn checked_buffer_len(&self) -> Option<usize> {
        let side = usize::try_from(self.checked_image_side()?).ok()?;
        side.checked_mul(side)?
            .checked_mul(3)
            .filter(|&len| len <= isize::MAX as usize)
    }

    /// Pixel box of module (x, y)
    pub fn bbox(&self, x: usize, y: usize) -> CellBox {
        bbox(x, y, self.pixels_per_module, self.border_modules)
    }

    /// Region class of module (x, y)
    pub fn classify(&self, x: usize, y: usize) -> RegionClass {
        classify(x, y, self.side)
    }

    /// Finder window of module (x, y)
    pub fn finder_window(&self, x: usize, y: usize) -> Option<FinderWindow> {
        finder_window(x, y, self.side)
    }

    /// Box covering the whole matrix, border excluded
    pub fn matrix_box(&self) -> CellBox {
        let start = self.border_modules * self.pixels_per_module;
        let end = start + self.side as u32 * self.pixels_per_module;
        CellBox::new(start, start, end, end)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_finder_windows() {
        for n in [8usize, 9, 15, 16, 21, 25, 57] {
            for y in 0..n {
                for x in 0..n {
                    let expected = (x < 8 && y < 8)
                        || (x < 8 && y >= n - 8)
                        || (x >= n - 8 && y < 8);
                    let got = classify(x, y, n) == RegionClass::FinderCorner;
                    assert_eq!(got, expected, "n={n} x={x} y={y}");
                }
            }
        }
    }

    #[test]
    fn test_small_matrix_is_all_corner() {
        for n in 1..8 {
            for y in 0..n {
                for x in 0..n {
                    assert_eq!(classify(x, y, n), RegionClass::FinderCorner);
                    assert_eq!(finder_window(x, y, n), Some(FinderWindow::TopLeft));
                }
            }
        }
    }

    #[test]
    fn test_finder_window_orientation() {
        let n = 21;
        assert_eq!(finder_window(0, 0, n), Some(FinderWindow::TopLeft));
        assert_eq!(finder_window(7, 20, n), Some(FinderWindow::BottomLeft));
        assert_eq!(finder_window(13, 7, n), Some(FinderWindow::TopRight));
        assert_eq!(finder_window(13, 13, n), None);
        assert_eq!(finder_window(8, 8, n), None);
    }

    #[test]
    fn test_bbox_is_affine() {
        let b = bbox(3, 5, 10, 4);
        assert_eq!(b, CellBox::new(70, 90, 80, 100));
        assert_eq!(b.width(), 10);
        assert_eq!(b.height(), 10);
    }

    #[test]
    fn test_bbox_tiling() {
        let geometry = RenderGeometry::new(9, 3, 2);
        let side = geometry.image_side();
        assert_eq!(side, (9 + 4) * 3);

        let mut owner = vec![0u32; (side * side) as usize];
        for y in 0..geometry.side {
            for x in 0..geometry.side {
                let b = geometry.bbox(x, y);
                for py in b.top..b.bottom {
                    for px in b.left..b.right {
                        owner[(py * side + px) as usize] += 1;
                    }
                }
            }
        }

        let matrix = geometry.matrix_box();
        for py in 0..side {
            for px in 0..side {
                let count = owner[(py * side + px) as usize];
                if matrix.contains(px, py) {
                    assert_eq!(count, 1, "pixel ({px},{py}) covered {count} times");
                } else {
                    assert_eq!(count, 0, "border pixel ({px},{py}) covered");
                }
            }
        }
    }

    #[test]
    fn test_try_new_rejects_overflow() {
        let ok = RenderGeometry::try_new(21, 10, 4).unwrap();
        assert_eq!(ok.checked_image_side(), Some(290));
        assert_eq!(ok.checked_buffer_len(), Some(290 * 290 * 3));

        for (ppm, border) in [(10, u32::MAX / 2), (u32::MAX, 4), (100_000_000, 4)] {
            assert!(
                matches!(
                    RenderGeometry::try_new(21, ppm, border),
                    Err(StyleError::InvalidGeometry(_))
                ),
                "ppm={ppm} border={border}"
            );
        }
        assert_eq!(RenderGeometry::new(21, 10, u32::MAX / 2).checked_image_side(), None);
        assert!(RenderGeometry::try_new(0, 10, 4).is_err());
        assert!(RenderGeometry::try_new(21, 0, 4).is_err());
        assert!(RenderGeometry::try_new(21, 1, 0).is_ok());
    }

    #[test]
    fn test_neighbouring_boxes_disjoint() {
        let a = bbox(0, 0, 10, 4);
        let b = bbox(1, 0, 10, 4);
        let c = bbox(0, 1, 10, 4);
        assert!(!a.intersects(&b));
        assert!(!a.intersects(&c));
        assert!(a.intersects(&a));
    }
}
