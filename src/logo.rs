//! Logo compositing: scale, circular mask when the logo has no alpha, and
//! center over the finished matrix.
//!
//! Covering modules with a logo can make the code unreadable; decodability
//! after compositing is left to the encoder's error-correction margin.

use crate::error::RenderWarning;
use crate::render::shapes::ellipse_covers;
use image::imageops::FilterType;
use image::{DynamicImage, GenericImageView, Luma, RgbImage, RgbaImage};
use std::path::{Path, PathBuf};

/// Logo edge limit as a fraction of the image's shorter side
pub const LOGO_FRACTION: u32 = 4;

/// Logo image loaded once and reused read-only
#[derive(Debug, Clone)]
pub struct LogoAsset {
    image: DynamicImage,
}

impl LogoAsset {
    /// Wrap an already decoded image
    pub fn new(image: DynamicImage) -> Self {
        Self { image }
    }

    /// Read a logo from disk.
    ///
    /// Any failure becomes a [`RenderWarning`] rather than an error, since the
    /// render can proceed without the logo.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, RenderWarning> {
        let path = path.as_ref();
        let unavailable = |reason: String| RenderWarning::LogoUnavailable {
            path: PathBuf::from(path),
            reason,
        };
        if !path.is_file() {
            return Err(unavailable("file not found".to_string()));
        }
        image::open(path)
            .map(Self::new)
            .map_err(|e| unavailable(e.to_string()))
    }

    /// Source dimensions
    pub fn dimensions(&self) -> (u32, u32) {
        self.image.dimensions()
    }

    /// Whether the source carries its own alpha channel
    pub fn has_alpha(&self) -> bool {
        self.image.color().has_alpha()
    }

    /// Logo scaled to fit a `limit` square (never upscaled) with the alpha
    /// channel it will be composited with
    pub fn prepare(&self, limit: u32) -> RgbaImage {
        let (w, h) = self.image.dimensions();
        let scaled = if w > limit || h > limit {
            self.image.resize(limit, limit, FilterType::Lanczos3)
        } else {
            self.image.clone()
        };
        let mut rgba = scaled.to_rgba8();
        if !self.has_alpha() {
            let mask = circular_mask(rgba.width(), rgba.height());
            for (pixel, alpha) in rgba.pixels_mut().zip(mask.pixels()) {
                pixel.0[3] = alpha.0[0];
            }
        }
        rgba
    }
}

/// Opaque ellipse inscribed in a `width` x `height` box, transparent outside
pub fn circular_mask(width: u32, height: u32) -> image::GrayImage {
    image::GrayImage::from_fn(width, height, |x, y| {
        if ellipse_covers(width, height, x, y) {
            Luma([255])
        } else {
            Luma([0])
        }
    })
}

/// Largest logo edge allowed on an image of the given size
pub fn logo_limit(width: u32, height: u32) -> u32 {
    width.min(height) / LOGO_FRACTION
}

/// Top-left corner that centers a `logo` sized box on an `image` sized box
pub fn centered_offset(image: (u32, u32), logo: (u32, u32)) -> (u32, u32) {
    (
        image.0.saturating_sub(logo.0) / 2,
        image.1.saturating_sub(logo.1) / 2,
    )
}

/// Alpha-composite `logo` over `image` with its top-left corner at `offset`
pub fn paste_with_alpha(image: &mut RgbImage, logo: &RgbaImage, offset: (u32, u32)) {
    for (lx, ly, src) in logo.enumerate_pixels() {
        let (x, y) = (offset.0 + lx, offset.1 + ly);
        if x >= image.width() || y >= image.height() {
            continue;
        }
        let alpha = src.0[3] as u32;
        if alpha == 0 {
            continue;
        }
        let dst = image.get_pixel_mut(x, y);
        for c in 0..3 {
            let blended = (src.0[c] as u32 * alpha + dst.0[c] as u32 * (255 - alpha) + 127) / 255;
            dst.0[c] = blended as u8;
        }
    }
}

/// Scale, mask and center `logo` over `image`.
///
/// Returns the box the logo occupies as `(x, y, width, height)`.
pub fn composite_logo(image: &mut RgbImage, logo: &LogoAsset) -> (u32, u32, u32, u32) {
    let limit = logo_limit(image.width(), image.height());
    let prepared = logo.prepare(limit);
    let offset = centered_offset(image.dimensions(), prepared.dimensions());
    log::debug!(
        "compositing logo {:?} -> {:?} at {:?} (alpha: {})",
        logo.dimensions(),
        prepared.dimensions(),
        offset,
        logo.has_alpha()
    );
    paste_with_alpha(image, &prepared, offset);
    (offset.0, offset.1, prepared.width(), prepared.height())
}
