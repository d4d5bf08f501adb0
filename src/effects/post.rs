//! Preset post-effects, the last pass before encoding.

use crate::models::{Rgb, StyleConfig};
use crate::style::StylePreset;
use crate::utils::blend::{blend_into, blend_with_color};
use image::{RgbImage, imageops};
use imageproc::drawing::{draw_filled_circle_mut, draw_line_segment_mut};
use rand::Rng;
use rand::seq::SliceRandom;

/// Grid pitch of the cyber effect, in pixels
pub const GRID_SPACING: u32 = 20;
/// Decorative circles drawn by the abstract effect
pub const ABSTRACT_CIRCLES: usize = 20;
/// Radius range of the decorative circles
pub const ABSTRACT_RADIUS: (i32, i32) = (5, 30);
/// Colors the decorative circles pick from
pub const ABSTRACT_PALETTE: [Rgb; 4] = [
    Rgb::new(0xFF, 0x57, 0x22),
    Rgb::new(0xFF, 0x98, 0x00),
    Rgb::new(0xFF, 0xC1, 0x07),
    Rgb::new(0xFF, 0xEB, 0x3B),
];

/// Apply the final effect keyed by the style preset.
///
/// Presets without an effect return the image unchanged.
pub fn apply_post_effect<R: Rng + ?Sized>(
    image: RgbImage,
    preset: StylePreset,
    style: &StyleConfig,
    rng: &mut R,
) -> RgbImage {
    match preset {
        StylePreset::Watercolor => watercolor_wash(image),
        StylePreset::Cyber => cyber_grid(image, style.module_color),
        StylePreset::Abstract => abstract_circles(image, rng),
        StylePreset::Neon => neon_glow(image),
        _ => image,
    }
}

/// Whether `preset` has a post-effect
pub fn has_post_effect(preset: StylePreset) -> bool {
    matches!(
        preset,
        StylePreset::Watercolor | StylePreset::Cyber | StylePreset::Abstract | StylePreset::Neon
    )
}

/// Blur (sigma 1) then blend 10% toward white
pub fn watercolor_wash(image: RgbImage) -> RgbImage {
    let mut blurred = imageops::blur(&image, 1.0);
    blend_with_color(&mut blurred, Rgb::WHITE.channels(), 0.1);
    blurred
}

/// Opaque 1px grid lines every [`GRID_SPACING`] pixels in `accent`
pub fn cyber_grid(mut image: RgbImage, accent: Rgb) -> RgbImage {
    let (width, height) = image.dimensions();
    let color = accent.into();
    for x in (0..width).step_by(GRID_SPACING as usize) {
        draw_line_segment_mut(
            &mut image,
            (x as f32, 0.0),
            (x as f32, height as f32),
            color,
        );
    }
    for y in (0..height).step_by(GRID_SPACING as usize) {
        draw_line_segment_mut(
            &mut image,
            (0.0, y as f32),
            (width as f32, y as f32),
            color,
        );
    }
    image
}

/// Draw [`ABSTRACT_CIRCLES`] filled circles at random positions, radii
/// and palette colors
pub fn abstract_circles<R: Rng + ?Sized>(mut image: RgbImage, rng: &mut R) -> RgbImage {
    let (width, height) = image.dimensions();
    for _ in 0..ABSTRACT_CIRCLES {
        let cx = rng.gen_range(0..=width as i32);
        let cy = rng.gen_range(0..=height as i32);
        let radius = rng.gen_range(ABSTRACT_RADIUS.0..=ABSTRACT_RADIUS.1);
        let color = *ABSTRACT_PALETTE.choose(rng).unwrap_or(&ABSTRACT_PALETTE[0]);
        draw_filled_circle_mut(&mut image, (cx, cy), radius, color.into());
    }
    image
}

/// Blur a copy (sigma 3) and blend 30% original with 70% blurred
pub fn neon_glow(mut image: RgbImage) -> RgbImage {
    let glow = imageops::blur(&image, 3.0);
    blend_into(&mut image, &glow, 0.7);
    image
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgb as Pixel;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn test_cyber_grid_lines() {
        let image = RgbImage::from_pixel(45, 45, Pixel([0, 0, 0]));
        let accent = Rgb::new(0x00, 0xFF, 0x41);
        let out = cyber_grid(image, accent);
        for i in 0..45 {
            for line in [0, 20, 40] {
                assert_eq!(out.get_pixel(line, i).0, [0x00, 0xFF, 0x41]);
                assert_eq!(out.get_pixel(i, line).0, [0x00, 0xFF, 0x41]);
            }
        }
        assert_eq!(out.get_pixel(10, 10).0, [0, 0, 0]);
        assert_eq!(out.get_pixel(21, 33).0, [0, 0, 0]);
    }

    #[test]
    fn test_abstract_circles_use_palette() {
        let image = RgbImage::from_pixel(120, 120, Pixel([0, 0, 0]));
        let out = abstract_circles(image, &mut StdRng::seed_from_u64(11));
        let palette: Vec<[u8; 3]> = ABSTRACT_PALETTE.iter().map(|c| c.channels()).collect();
        let mut painted = 0;
        for p in out.pixels() {
            if p.0 != [0, 0, 0] {
                assert!(palette.contains(&p.0), "unexpected color {:?}", p.0);
                painted += 1;
            }
        }
        assert!(painted > 0);
    }

    #[test]
    fn test_abstract_circles_are_seeded() {
        let image = RgbImage::from_pixel(60, 60, Pixel([0, 0, 0]));
        let a = abstract_circles(image.clone(), &mut StdRng::seed_from_u64(2));
        let b = abstract_circles(image, &mut StdRng::seed_from_u64(2));
        assert_eq!(a.as_raw(), b.as_raw());
    }

    #[test]
    fn test_uniform_image_survives_blurs() {
        let image = RgbImage::from_pixel(30, 30, Pixel([0, 0, 0]));
        let washed = watercolor_wash(image.clone());
        assert!(washed.pixels().all(|p| p.0 == [25, 25, 25]));

        let glowing = neon_glow(RgbImage::from_pixel(30, 30, Pixel([40, 80, 120])));
        assert!(glowing.pixels().all(|p| p.0 == [40, 80, 120]));
    }

    #[test]
    fn test_presets_without_effect_are_noop() {
        let image = RgbImage::from_pixel(10, 10, Pixel([9, 9, 9]));
        let style = StyleConfig::default();
        for preset in StylePreset::ALL {
            if has_post_effect(preset) {
                continue;
            }
            let out = apply_post_effect(
                image.clone(),
                preset,
                &style,
                &mut StdRng::seed_from_u64(0),
            );
            assert_eq!(out.as_raw(), image.as_raw(), "{}", preset.name());
        }
    }
}
