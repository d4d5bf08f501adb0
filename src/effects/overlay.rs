use crate::models::{OverlayPattern, Rgb};
use crate::render::shapes::ellipse_covers;
use crate::utils::blend::{blend_into, offset_channel, scale_channel};
use image::{RgbImage, imageops};
use rand::Rng;

/// Dot diameter of the `dots` layer, in pixels
pub const DOT_SIZE: u32 = 2;
/// Distance between dot origins, in pixels
pub const DOT_SPACING: u32 = 4;
/// Weight of the dot layer in the final blend
pub const DOT_ALPHA: f32 = 0.2;
/// Largest per-channel noise offset of the watercolor pass
pub const WATERCOLOR_NOISE: i32 = 20;
/// Blur sigma of the watercolor pass
pub const WATERCOLOR_BLUR: f32 = 1.0;
/// Green multiplier of the cyber pass
pub const CYBER_GREEN_BOOST: f32 = 1.5;

/// Apply the overlay pass selected by `pattern`; `None` leaves the image as is
pub fn apply_overlay<R: Rng + ?Sized>(
    image: RgbImage,
    pattern: Option<OverlayPattern>,
    module_color: Rgb,
    rng: &mut R,
) -> RgbImage {
    match pattern {
        Some(OverlayPattern::Dots) => apply_dots(image, module_color),
        Some(OverlayPattern::Watercolor) => apply_watercolor(image, rng),
        Some(OverlayPattern::Cyber) => apply_cyber(image),
        None => image,
    }
}

/// Full-size layer of small dots in `color` on white
pub fn dots_layer(width: u32, height: u32, color: Rgb) -> RgbImage {
    let mut layer = RgbImage::from_pixel(width, height, Rgb::WHITE.into());
    let pixel = color.into();
    for y in (0..height).step_by(DOT_SPACING as usize) {
        for x in (0..width).step_by(DOT_SPACING as usize) {
            for dy in 0..DOT_SIZE {
                for dx in 0..DOT_SIZE {
                    let (px, py) = (x + dx, y + dy);
                    if px < width && py < height && ellipse_covers(DOT_SIZE, DOT_SIZE, dx, dy) {
                        layer.put_pixel(px, py, pixel);
                    }
                }
            }
        }
    }
    layer
}

/// Blend a dot layer over the image at [`DOT_ALPHA`]
pub fn apply_dots(mut image: RgbImage, color: Rgb) -> RgbImage {
    let layer = dots_layer(image.width(), image.height(), color);
    blend_into(&mut image, &layer, DOT_ALPHA);
    image
}

/// Add per-channel noise in `[-20, 20]`, then blur lightly
pub fn apply_watercolor<R: Rng + ?Sized>(mut image: RgbImage, rng: &mut R) -> RgbImage {
    for channel in image.iter_mut() {
        let delta = rng.gen_range(-WATERCOLOR_NOISE..=WATERCOLOR_NOISE);
        *channel = offset_channel(*channel, delta);
    }
    imageops::blur(&image, WATERCOLOR_BLUR)
}

/// Boost the green channel, leaving red and blue untouched
pub fn apply_cyber(mut image: RgbImage) -> RgbImage {
    for pixel in image.pixels_mut() {
        pixel.0[1] = scale_channel(pixel.0[1], CYBER_GREEN_BOOST);
    }
    image
}
