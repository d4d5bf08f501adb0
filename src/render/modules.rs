//! Module pass: decide every dark module's shape and color, then fill the
//! image in horizontal bands, one band per module row.
//!
//! Planning is sequential so the `random` style consumes the RNG in a fixed
//! row-major order. Filling is row-band parallel: a module box never crosses
//! its band, so bands can be written without synchronization.

use super::color::color_at;
use super::shapes::{RANDOM_CHOICES, ShapeCell, ShapeRegistry, fill_shape};
use crate::models::{FinderWindow, ModuleMatrix, RenderGeometry, Rgb, ShapeStyle, StyleConfig};
use image::RgbImage;
use rand::Rng;
use rand::seq::SliceRandom;
use rayon::prelude::*;

/// One dark module, ready to draw
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlannedModule {
    /// Module column
    pub x: usize,
    /// Concrete shape (never `Random`)
    pub shape: ShapeStyle,
    /// Finder window, if the module lies in one
    pub window: Option<FinderWindow>,
    /// Fill color
    pub color: Rgb,
}

/// Drawing plan for a whole matrix, grouped by module row
#[derive(Debug, Clone, Default)]
pub struct ModulePlan {
    rows: Vec<Vec<PlannedModule>>,
}

impl ModulePlan {
    /// Modules of row `y`
    pub fn row(&self, y: usize) -> &[PlannedModule] {
        self.rows.get(y).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Total number of planned modules
    pub fn len(&self) -> usize {
        self.rows.iter().map(Vec::len).sum()
    }

    /// Whether no module is planned
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Number of planned modules inside finder windows
    pub fn finder_count(&self) -> usize {
        self.rows
            .iter()
            .flatten()
            .filter(|m| m.window.is_some())
            .count()
    }
}

/// Resolve shape and color for every dark module.
///
/// Finder-window modules take `corner_style`, the rest `dot_style`; a
/// `Random` style draws one of square, circle or diamond per module.
pub fn plan_modules<R: Rng + ?Sized>(
    matrix: &ModuleMatrix,
    geometry: &RenderGeometry,
    style: &StyleConfig,
    rng: &mut R,
) -> ModulePlan {
    let image_side = geometry.image_side();
    let ppm = geometry.pixels_per_module;
    let mut rows = vec![Vec::new(); matrix.side()];

    for (x, y) in matrix.dark_modules() {
        let window = geometry.finder_window(x, y);
        let requested = if window.is_some() {
            style.corner_style
        } else {
            style.dot_style
        };
        let shape = match requested {
            ShapeStyle::Random => *RANDOM_CHOICES.choose(rng).unwrap_or(&ShapeStyle::Square),
            other => other,
        };
        // Colors are sampled at the module origin, border excluded
        let color = color_at(x as u32 * ppm, y as u32 * ppm, style, image_side);
        rows[y].push(PlannedModule {
            x,
            shape,
            window,
            color,
        });
    }

    ModulePlan { rows }
}

fn draw_band(
    band: &mut [u8],
    modules: &[PlannedModule],
    geometry: &RenderGeometry,
    registry: &ShapeRegistry,
) {
    let stride = geometry.image_side();
    let ppm = geometry.pixels_per_module;
    for module in modules {
        let left = (module.x as u32 + geometry.border_modules) * ppm;
        let cell = ShapeCell::square(ppm, module.window);
        fill_shape(band, stride, left, 0, &cell, registry.get(module.shape), module.color);
    }
}

/// Fill a plan into `image`, which must be `geometry.image_side()` square.
///
/// With `parallel` the bands are filled on the rayon pool; the call returns
/// once every band is done.
pub fn draw_modules(
    image: &mut RgbImage,
    plan: &ModulePlan,
    geometry: &RenderGeometry,
    registry: &ShapeRegistry,
    parallel: bool,
) {
    let band_len =
        geometry.image_side() as usize * 3 * geometry.pixels_per_module as usize;
    if band_len == 0 {
        return;
    }
    let border = geometry.border_modules as usize;
    let buf: &mut [u8] = image;

    let fill = |(band, chunk): (usize, &mut [u8])| {
        if band < border {
            return;
        }
        let modules = plan.row(band - border);
        if !modules.is_empty() {
            draw_band(chunk, modules, geometry, registry);
        }
    };

    if parallel {
        buf.par_chunks_mut(band_len).enumerate().for_each(fill);
    } else {
        buf.chunks_mut(band_len).enumerate().for_each(fill);
    }
}

/// Create the background image and draw every dark module onto it
pub fn render_modules<R: Rng + ?Sized>(
    matrix: &ModuleMatrix,
    geometry: &RenderGeometry,
    style: &StyleConfig,
    registry: &ShapeRegistry,
    rng: &mut R,
    parallel_min_modules: usize,
) -> (RgbImage, ModulePlan) {
    let side = geometry.image_side();
    let mut image = RgbImage::from_pixel(side, side, style.background_color.into());
    let plan = plan_modules(matrix, geometry, style, rng);
    let parallel = plan.len() >= parallel_min_modules;
    log::debug!(
        "drawing {} modules ({} in finder windows), parallel={}",
        plan.len(),
        plan.finder_count(),
        parallel
    );
    draw_modules(&mut image, &plan, geometry, registry, parallel);
    (image, plan)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Gradient;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn checkerboard(side: usize) -> ModuleMatrix {
        let mut matrix = ModuleMatrix::new(side);
        for y in 0..side {
            for x in 0..side {
                matrix.set(x, y, (x + y) % 2 == 0);
            }
        }
        matrix
    }

    #[test]
    fn test_plan_uses_region_styles() {
        let matrix = checkerboard(21);
        let geometry = RenderGeometry::new(21, 10, 4);
        let style = StyleConfig {
            corner_style: ShapeStyle::Rounded,
            dot_style: ShapeStyle::Circle,
            ..StyleConfig::default()
        };
        let plan = plan_modules(&matrix, &geometry, &style, &mut StdRng::seed_from_u64(1));
        assert_eq!(plan.len(), matrix.dark_count());
        for y in 0..21 {
            for m in plan.row(y) {
                let expected = if m.window.is_some() {
                    ShapeStyle::Rounded
                } else {
                    ShapeStyle::Circle
                };
                assert_eq!(m.shape, expected);
            }
        }
    }

    #[test]
    fn test_random_plan_is_seeded() {
        let matrix = checkerboard(25);
        let geometry = RenderGeometry::new(25, 4, 1);
        let style = StyleConfig {
            dot_style: ShapeStyle::Random,
            ..StyleConfig::default()
        };
        let a = plan_modules(&matrix, &geometry, &style, &mut StdRng::seed_from_u64(9));
        let b = plan_modules(&matrix, &geometry, &style, &mut StdRng::seed_from_u64(9));
        let shapes = |p: &ModulePlan| -> Vec<ShapeStyle> {
            (0..25).flat_map(|y| p.row(y).iter().map(|m| m.shape).collect::<Vec<_>>()).collect()
        };
        assert_eq!(shapes(&a), shapes(&b));

        let all = shapes(&a);
        assert!(all.iter().all(|s| RANDOM_CHOICES.contains(s)));
        for choice in RANDOM_CHOICES {
            assert!(all.contains(&choice), "{choice:?} never chosen");
        }
    }

    #[test]
    fn test_plan_colors_follow_gradient() {
        let matrix = checkerboard(21);
        let geometry = RenderGeometry::new(21, 10, 4);
        let style = StyleConfig {
            gradient: Some(Gradient::new(Rgb::new(0, 0, 0), Rgb::new(200, 200, 200))),
            ..StyleConfig::default()
        };
        let plan = plan_modules(&matrix, &geometry, &style, &mut StdRng::seed_from_u64(0));
        assert_eq!(plan.row(0)[0].color, Rgb::new(0, 0, 0));
        let last = plan.row(20).last().copied().unwrap();
        assert_eq!(last.x, 20);
        // ratio = (200 + 200) / 580
        let expected = (200.0 * 400.0 / 580.0) as u8;
        assert_eq!(last.color, Rgb::new(expected, expected, expected));
    }

    #[test]
    fn test_parallel_matches_sequential() {
        let matrix = checkerboard(29);
        let geometry = RenderGeometry::new(29, 6, 2);
        let style = StyleConfig {
            corner_style: ShapeStyle::Pointed,
            dot_style: ShapeStyle::Diamond,
            ..StyleConfig::default()
        };
        let registry = ShapeRegistry::standard();
        let (seq, _) = render_modules(
            &matrix,
            &geometry,
            &style,
            &registry,
            &mut StdRng::seed_from_u64(3),
            usize::MAX,
        );
        let (par, _) = render_modules(
            &matrix,
            &geometry,
            &style,
            &registry,
            &mut StdRng::seed_from_u64(3),
            0,
        );
        assert_eq!(seq.as_raw(), par.as_raw());
    }

    #[test]
    fn test_border_stays_background() {
        let mut matrix = ModuleMatrix::new(21);
        for y in 0..21 {
            for x in 0..21 {
                matrix.set(x, y, true);
            }
        }
        let geometry = RenderGeometry::new(21, 5, 3);
        let registry = ShapeRegistry::standard();
        let style = StyleConfig::default();
        let (image, _) = render_modules(
            &matrix,
            &geometry,
            &style,
            &registry,
            &mut StdRng::seed_from_u64(0),
            0,
        );
        let inner = geometry.matrix_box();
        for (x, y, p) in image.enumerate_pixels() {
            let expected = if inner.contains(x, y) { Rgb::BLACK } else { Rgb::WHITE };
            assert_eq!(Rgb::from(*p), expected, "({x},{y})");
        }
    }
}
