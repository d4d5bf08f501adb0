//! Whole-image blending helpers.
//!
//! Rows are processed in parallel; every output pixel depends only on the
//! pixels at the same position.

use image::RgbImage;
use rayon::prelude::*;

/// Linear blend of two channel values: `a + (b - a) * alpha`, truncated
/// toward zero and clamped to `0..=255`
#[inline]
pub fn mix_channel(a: u8, b: u8, alpha: f32) -> u8 {
    let value = a as f32 + alpha * (b as f32 - a as f32);
    value.clamp(0.0, 255.0) as u8
}

/// Blend `overlay` into `base` in place: `base * (1 - alpha) + overlay * alpha`.
///
/// Both images must have the same dimensions; otherwise `base` is untouched.
pub fn blend_into(base: &mut RgbImage, overlay: &RgbImage, alpha: f32) {
    if base.dimensions() != overlay.dimensions() {
        log::debug!(
            "blend skipped: {:?} vs {:?}",
            base.dimensions(),
            overlay.dimensions()
        );
        return;
    }
    let row_len = (base.width() * 3) as usize;
    if row_len == 0 {
        return;
    }
    let src: &[u8] = overlay;
    let dst: &mut [u8] = base;
    dst.par_chunks_mut(row_len)
        .zip(src.par_chunks(row_len))
        .for_each(|(d, s)| {
            for (a, &b) in d.iter_mut().zip(s) {
                *a = mix_channel(*a, b, alpha);
            }
        });
}

/// Blend every pixel of `base` toward a solid color
pub fn blend_with_color(base: &mut RgbImage, color: [u8; 3], alpha: f32) {
    let row_len = (base.width() * 3) as usize;
    if row_len == 0 {
        return;
    }
    let dst: &mut [u8] = base;
    dst.par_chunks_mut(row_len).for_each(|row| {
        for px in row.chunks_exact_mut(3) {
            for (a, &b) in px.iter_mut().zip(&color) {
                *a = mix_channel(*a, b, alpha);
            }
        }
    });
}

/// Add an offset to a channel, clamping to `0..=255`
#[inline]
pub fn offset_channel(value: u8, delta: i32) -> u8 {
    (value as i32 + delta).clamp(0, 255) as u8
}

/// Scale a channel, clamping at 255 and truncating
#[inline]
pub fn scale_channel(value: u8, factor: f32) -> u8 {
    (value as f32 * factor).min(255.0) as u8
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgb;

    #[test]
    fn test_mix_channel() {
        assert_eq!(mix_channel(0, 255, 0.0), 0);
        assert_eq!(mix_channel(0, 255, 1.0), 255);
        assert_eq!(mix_channel(100, 200, 0.2), 120);
        assert_eq!(mix_channel(255, 255, 0.7), 255);
    }

    #[test]
    fn test_mix_channel_truncates() {
        assert_eq!(mix_channel(0, 255, 0.5), 127);
        assert_eq!(mix_channel(255, 0, 0.5), 127);
        assert_eq!(mix_channel(0, 255, 0.1), 25);
        assert_eq!(mix_channel(10, 13, 0.9), 12);
    }

    #[test]
    fn test_blend_into() {
        let mut base = RgbImage::from_pixel(3, 2, Rgb([0, 100, 200]));
        let overlay = RgbImage::from_pixel(3, 2, Rgb([255, 255, 255]));
        blend_into(&mut base, &overlay, 0.2);
        for p in base.pixels() {
            assert_eq!(p.0, [51, 131, 211]);
        }
    }

    #[test]
    fn test_blend_mismatched_sizes_is_noop() {
        let mut base = RgbImage::from_pixel(3, 3, Rgb([10, 10, 10]));
        let overlay = RgbImage::from_pixel(2, 2, Rgb([255, 255, 255]));
        blend_into(&mut base, &overlay, 0.5);
        assert!(base.pixels().all(|p| p.0 == [10, 10, 10]));
    }

    #[test]
    fn test_blend_with_color() {
        let mut base = RgbImage::from_pixel(2, 2, Rgb([0, 0, 0]));
        blend_with_color(&mut base, [255, 255, 255], 0.1);
        assert!(base.pixels().all(|p| p.0 == [25, 25, 25]));
    }

    #[test]
    fn test_channel_clamps() {
        assert_eq!(offset_channel(250, 20), 255);
        assert_eq!(offset_channel(5, -20), 0);
        assert_eq!(scale_channel(200, 1.5), 255);
        assert_eq!(scale_channel(65, 1.5), 97);
    }
}
