//! Per-module shape rasterization.
//!
//! Each shape is a coverage test over the pixels of one module box, sampled
//! at pixel centers. A drawer never touches pixels outside the box it is
//! given, which keeps neighbouring modules independent.

use crate::models::{FinderWindow, Rgb, ShapeStyle};
use std::collections::HashMap;
use std::sync::Arc;

/// What a drawer knows about the module it is filling
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ShapeCell {
    /// Box width in pixels
    pub width: u32,
    /// Box height in pixels
    pub height: u32,
    /// Finder window of the module, if it lies in one
    pub window: Option<FinderWindow>,
}

impl ShapeCell {
    /// Square cell of the given side
    pub fn square(side: u32, window: Option<FinderWindow>) -> Self {
        Self {
            width: side,
            height: side,
            window,
        }
    }
}

/// Coverage rule for one module shape
pub trait ShapeDrawer: Send + Sync {
    /// Whether local pixel (lx, ly) of `cell` belongs to the shape
    fn covers(&self, cell: &ShapeCell, lx: u32, ly: u32) -> bool;
}

/// Fills the whole box
#[derive(Debug, Default, Clone, Copy)]
pub struct SquareDrawer;

/// Ellipse inscribed in the box
#[derive(Debug, Default, Clone, Copy)]
pub struct CircleDrawer;

/// Rounded rectangle with radius `side / 4`
#[derive(Debug, Default, Clone, Copy)]
pub struct RoundedDrawer;

/// Quadrilateral through the edge midpoints
#[derive(Debug, Default, Clone, Copy)]
pub struct DiamondDrawer;

/// Right triangle pointing into the matrix inside finder windows,
/// square everywhere else
#[derive(Debug, Default, Clone, Copy)]
pub struct PointedDrawer;

impl ShapeDrawer for SquareDrawer {
    fn covers(&self, cell: &ShapeCell, lx: u32, ly: u32) -> bool {
        lx < cell.width && ly < cell.height
    }
}

impl ShapeDrawer for CircleDrawer {
    fn covers(&self, cell: &ShapeCell, lx: u32, ly: u32) -> bool {
        ellipse_covers(cell.width, cell.height, lx, ly)
    }
}

impl ShapeDrawer for RoundedDrawer {
    fn covers(&self, cell: &ShapeCell, lx: u32, ly: u32) -> bool {
        let radius = cell.width.min(cell.height) / 4;
        rounded_rect_covers(cell.width, cell.height, radius, lx, ly)
    }
}

impl ShapeDrawer for DiamondDrawer {
    fn covers(&self, cell: &ShapeCell, lx: u32, ly: u32) -> bool {
        let (w, h) = (cell.width as f32, cell.height as f32);
        let (mid_x, mid_y) = ((cell.width / 2) as f32, (cell.height / 2) as f32);
        polygon_covers(&[(mid_x, 0.0), (w, mid_y), (mid_x, h), (0.0, mid_y)], lx, ly)
    }
}

impl ShapeDrawer for PointedDrawer {
    fn covers(&self, cell: &ShapeCell, lx: u32, ly: u32) -> bool {
        let (w, h) = (cell.width as f32, cell.height as f32);
        match cell.window {
            Some(FinderWindow::TopLeft) => polygon_covers(&[(0.0, h), (w, 0.0), (w, h)], lx, ly),
            Some(FinderWindow::BottomLeft) => {
                polygon_covers(&[(0.0, 0.0), (w, h), (w, 0.0)], lx, ly)
            }
            Some(FinderWindow::TopRight) => {
                polygon_covers(&[(0.0, 0.0), (w, h), (0.0, h)], lx, ly)
            }
            None => SquareDrawer.covers(cell, lx, ly),
        }
    }
}

/// Pixel-center test against the ellipse inscribed in a `w` x `h` box
pub fn ellipse_covers(w: u32, h: u32, lx: u32, ly: u32) -> bool {
    if w == 0 || h == 0 || lx >= w || ly >= h {
        return false;
    }
    let (rx, ry) = (w as f32 / 2.0, h as f32 / 2.0);
    let dx = (lx as f32 + 0.5 - rx) / rx;
    let dy = (ly as f32 + 0.5 - ry) / ry;
    dx * dx + dy * dy <= 1.0
}

/// Pixel-center test against a rounded rectangle filling a `w` x `h` box
pub fn rounded_rect_covers(w: u32, h: u32, radius: u32, lx: u32, ly: u32) -> bool {
    if lx >= w || ly >= h {
        return false;
    }
    if radius == 0 {
        return true;
    }
    let r = radius as f32;
    let px = lx as f32 + 0.5;
    let py = ly as f32 + 0.5;
    // Distance to the inner rectangle shrunk by the radius
    let qx = px.clamp(r, (w as f32 - r).max(r));
    let qy = py.clamp(r, (h as f32 - r).max(r));
    let (dx, dy) = (px - qx, py - qy);
    dx * dx + dy * dy <= r * r
}

/// Pixel-center test against a convex polygon given in either winding
pub fn polygon_covers(vertices: &[(f32, f32)], lx: u32, ly: u32) -> bool {
    let (px, py) = (lx as f32 + 0.5, ly as f32 + 0.5);
    let mut positive = false;
    let mut negative = false;
    for (i, &(x0, y0)) in vertices.iter().enumerate() {
        let (x1, y1) = vertices[(i + 1) % vertices.len()];
        let cross = (x1 - x0) * (py - y0) - (y1 - y0) * (px - x0);
        if cross > 0.0 {
            positive = true;
        } else if cross < 0.0 {
            negative = true;
        }
        if positive && negative {
            return false;
        }
    }
    true
}

/// Shapes the `random` style chooses between
pub const RANDOM_CHOICES: [ShapeStyle; 3] =
    [ShapeStyle::Square, ShapeStyle::Circle, ShapeStyle::Diamond];

/// Lookup from shape style to drawer.
///
/// `Random` is resolved to a concrete shape before lookup; any style with no
/// registered drawer is drawn as a square.
#[derive(Clone)]
pub struct ShapeRegistry {
    drawers: HashMap<ShapeStyle, Arc<dyn ShapeDrawer>>,
    fallback: Arc<dyn ShapeDrawer>,
}

impl ShapeRegistry {
    /// Registry with the built-in drawers
    pub fn standard() -> Self {
        let mut registry = Self {
            drawers: HashMap::new(),
            fallback: Arc::new(SquareDrawer),
        };
        registry.register(ShapeStyle::Square, SquareDrawer);
        registry.register(ShapeStyle::Circle, CircleDrawer);
        registry.register(ShapeStyle::Rounded, RoundedDrawer);
        registry.register(ShapeStyle::Diamond, DiamondDrawer);
        registry.register(ShapeStyle::Pointed, PointedDrawer);
        registry
    }

    /// Install or replace the drawer for a style
    pub fn register<D: ShapeDrawer + 'static>(&mut self, style: ShapeStyle, drawer: D) {
        self.drawers.insert(style, Arc::new(drawer));
    }

    /// Drawer for a style
    pub fn get(&self, style: ShapeStyle) -> &dyn ShapeDrawer {
        self.drawers
            .get(&style)
            .map(|d| d.as_ref())
            .unwrap_or(self.fallback.as_ref())
    }
}

impl Default for ShapeRegistry {
    fn default() -> Self {
        Self::standard()
    }
}

impl std::fmt::Debug for ShapeRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut styles: Vec<&str> = self.drawers.keys().map(|s| s.name()).collect();
        styles.sort_unstable();
        f.debug_struct("ShapeRegistry").field("styles", &styles).finish()
    }
}

/// Fill one shape into an RGB buffer.
///
/// `buf` holds rows of `stride` pixels; the cell's top-left corner sits at
/// (`left`, `top`) in buffer coordinates.
pub fn fill_shape(
    buf: &mut [u8],
    stride: u32,
    left: u32,
    top: u32,
    cell: &ShapeCell,
    drawer: &dyn ShapeDrawer,
    color: Rgb,
) {
    let row_len = (stride as usize * 3).max(1);
    let rows = buf.len() / row_len;
    let channels = color.channels();
    for ly in 0..cell.height {
        let y = (top + ly) as usize;
        if y >= rows {
            break;
        }
        for lx in 0..cell.width {
            let x = left + lx;
            if x >= stride {
                break;
            }
            if drawer.covers(cell, lx, ly) {
                let idx = y * row_len + x as usize * 3;
                buf[idx..idx + 3].copy_from_slice(&channels);
            }
        }
    }
}
