use crate::models::{Gradient, Rgb, StyleConfig};

/// Module fill color at pixel (px, py) of an `image_side` square image.
///
/// Without a gradient this is the flat module color. With one, the ratio is
/// `(px + py) / (2 * image_side)` and each channel is interpolated linearly
/// and truncated, giving a diagonal ramp keyed on `px + py`.
pub fn color_at(px: u32, py: u32, style: &StyleConfig, image_side: u32) -> Rgb {
    match &style.gradient {
        None => style.module_color,
        Some(gradient) => gradient_at(gradient, px, py, image_side),
    }
}

/// Interpolate a gradient at pixel (px, py)
pub fn gradient_at(gradient: &Gradient, px: u32, py: u32, image_side: u32) -> Rgb {
    if image_side == 0 {
        return gradient.start;
    }
    let ratio = (px as f64 + py as f64) / (2.0 * image_side as f64);
    let lerp = |start: u8, end: u8| -> u8 {
        let value = start as f64 + (end as f64 - start as f64) * ratio;
        // `as` truncates toward zero and saturates
        value as u8
    };
    Rgb::new(
        lerp(gradient.start.r, gradient.end.r),
        lerp(gradient.start.g, gradient.end.g),
        lerp(gradient.start.b, gradient.end.b),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn telegram() -> StyleConfig {
        StyleConfig {
            gradient: Some(Gradient::new(Rgb::new(0x00, 0x88, 0xcc), Rgb::new(0x00, 0xac, 0xed))),
            ..StyleConfig::default()
        }
    }

    #[test]
    fn test_flat_color_without_gradient() {
        let style = StyleConfig {
            module_color: Rgb::new(1, 2, 3),
            ..StyleConfig::default()
        };
        assert_eq!(color_at(0, 0, &style, 290), Rgb::new(1, 2, 3));
        assert_eq!(color_at(289, 289, &style, 290), Rgb::new(1, 2, 3));
    }

    #[test]
    fn test_gradient_start_is_exact() {
        let style = telegram();
        assert_eq!(color_at(0, 0, &style, 290), Rgb::new(0x00, 0x88, 0xcc));
    }

    #[test]
    fn test_gradient_midpoint_truncates() {
        let style = telegram();
        // ratio = (145 + 145) / 580 = 0.5
        // g: 136 + 36 * 0.5 = 154, b: 204 + 33 * 0.5 = 220.5 -> 220
        assert_eq!(color_at(145, 145, &style, 290), Rgb::new(0, 154, 220));
    }

    #[test]
    fn test_gradient_depends_on_coordinate_sum() {
        let style = telegram();
        assert_eq!(color_at(100, 40, &style, 290), color_at(40, 100, &style, 290));
        assert_eq!(color_at(140, 0, &style, 290), color_at(0, 140, &style, 290));
    }

    #[test]
    fn test_descending_channel() {
        let gradient = Gradient::new(Rgb::new(200, 0, 0), Rgb::new(100, 0, 0));
        // ratio = 0.25 -> 200 - 25 = 175
        assert_eq!(gradient_at(&gradient, 50, 50, 200), Rgb::new(175, 0, 0));
    }
}
