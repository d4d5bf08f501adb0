//! Style resolution: a named preset merged with caller overrides.
//!
//! Precedence rules:
//! - colors come from the preset; only `default` passes the caller's through
//! - gradient and overlay pattern: an explicit value wins over the preset
//! - corner and dot style: an explicit value wins only when it is not
//!   `"square"`, so `"square"` cannot override a preset's non-square shape

/// Named preset table
pub mod presets;

pub use presets::{PresetDefaults, StylePreset};

use crate::error::StyleError;
use crate::models::{Gradient, OverlayPattern, Rgb, ShapeStyle, StyleConfig};

/// Tag that corner/dot overrides treat as "not set"
const SQUARE_TAG: &str = "square";

/// Caller-supplied style fields. `None` means "not supplied".
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StyleOverrides {
    /// Module color (hex); honored by the `default` preset only
    pub color: Option<String>,
    /// Background color (hex); honored by the `default` preset only
    pub background: Option<String>,
    /// Gradient start and end colors (hex)
    pub gradient: Option<(String, String)>,
    /// Overlay pattern tag
    pub pattern: Option<String>,
    /// Finder-window shape tag
    pub corner_style: Option<String>,
    /// Regular module shape tag
    pub dot_style: Option<String>,
}

impl StyleOverrides {
    /// Set the module color
    pub fn color(mut self, hex: impl Into<String>) -> Self {
        self.color = Some(hex.into());
        self
    }

    /// Set the background color
    pub fn background(mut self, hex: impl Into<String>) -> Self {
        self.background = Some(hex.into());
        self
    }

    /// Set the gradient endpoints
    pub fn gradient(mut self, start: impl Into<String>, end: impl Into<String>) -> Self {
        self.gradient = Some((start.into(), end.into()));
        self
    }

    /// Set the overlay pattern tag
    pub fn pattern(mut self, tag: impl Into<String>) -> Self {
        self.pattern = Some(tag.into());
        self
    }

    /// Set the finder-window shape tag
    pub fn corner_style(mut self, tag: impl Into<String>) -> Self {
        self.corner_style = Some(tag.into());
        self
    }

    /// Set the regular module shape tag
    pub fn dot_style(mut self, tag: impl Into<String>) -> Self {
        self.dot_style = Some(tag.into());
        self
    }
}

fn parse_optional(hex: Option<&String>) -> Result<Option<Rgb>, StyleError> {
    hex.map(String::as_str).map(Rgb::from_hex).transpose()
}

fn shape_override(explicit: Option<&str>, preset: ShapeStyle) -> ShapeStyle {
    match explicit {
        Some(tag) if tag != SQUARE_TAG => ShapeStyle::from_tag(tag),
        _ => preset,
    }
}

/// Resolve a preset name and caller overrides into a concrete style.
///
/// Unknown preset names behave as `"default"`. Every caller color string is
/// validated, even when the preset ignores it.
pub fn resolve(preset_name: &str, overrides: &StyleOverrides) -> Result<StyleConfig, StyleError> {
    let preset = StylePreset::from_name(preset_name);
    resolve_preset(preset, overrides)
}

/// Like [`resolve`], for an already looked-up preset
pub fn resolve_preset(
    preset: StylePreset,
    overrides: &StyleOverrides,
) -> Result<StyleConfig, StyleError> {
    let defaults = preset.defaults();

    let explicit_color = parse_optional(overrides.color.as_ref())?;
    let explicit_background = parse_optional(overrides.background.as_ref())?;
    let explicit_gradient = match &overrides.gradient {
        Some((start, end)) => Some(Gradient::new(Rgb::from_hex(start)?, Rgb::from_hex(end)?)),
        None => None,
    };

    let module_color = defaults
        .module_color
        .unwrap_or_else(|| explicit_color.unwrap_or(Rgb::BLACK));
    let background_color = defaults
        .background_color
        .unwrap_or_else(|| explicit_background.unwrap_or(Rgb::WHITE));

    let gradient = explicit_gradient.or(defaults.gradient);
    let overlay = match overrides.pattern.as_deref() {
        Some(tag) => OverlayPattern::from_tag(tag),
        None => defaults.pattern.and_then(OverlayPattern::from_tag),
    };

    let style = StyleConfig {
        module_color,
        background_color,
        gradient,
        overlay,
        corner_style: shape_override(overrides.corner_style.as_deref(), defaults.corner_style),
        dot_style: shape_override(overrides.dot_style.as_deref(), defaults.dot_style),
    };
    log::debug!("resolved style {:?}: {:?}", preset.name(), style);
    Ok(style)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_maps_caller_colors() {
        let overrides = StyleOverrides::default().color("#112233").background("#FAFAFA");
        let style = resolve("default", &overrides).unwrap();
        assert_eq!(style.module_color, Rgb::new(0x11, 0x22, 0x33));
        assert_eq!(style.background_color, Rgb::new(0xfa, 0xfa, 0xfa));
        assert_eq!(style.gradient, None);
        assert_eq!(style.overlay, None);
        assert_eq!(style.corner_style, ShapeStyle::Square);
        assert_eq!(style.dot_style, ShapeStyle::Square);
    }

    #[test]
    fn test_default_without_colors_is_black_on_white() {
        let style = resolve("default", &StyleOverrides::default()).unwrap();
        assert_eq!(style, StyleConfig::default());
    }

    #[test]
    fn test_preset_colors_ignore_caller() {
        let overrides = StyleOverrides::default().color("#112233").background("#445566");
        let style = resolve("telegram", &overrides).unwrap();
        assert_eq!(style.module_color, Rgb::new(0x00, 0x88, 0xcc));
        assert_eq!(style.background_color, Rgb::WHITE);
    }

    #[test]
    fn test_unknown_preset_is_default() {
        let overrides = StyleOverrides::default().color("#ff0000").background("#00ff00");
        assert_eq!(
            resolve("nonexistent", &overrides).unwrap(),
            resolve("default", &overrides).unwrap()
        );
    }

    #[test]
    fn test_preset_names_are_case_sensitive() {
        let style = resolve("NEON", &StyleOverrides::default()).unwrap();
        assert_eq!(style, resolve("default", &StyleOverrides::default()).unwrap());
        assert_eq!(style.background_color, Rgb::WHITE);

        let overrides = StyleOverrides::default().dot_style("Circle");
        assert_eq!(resolve("default", &overrides).unwrap().dot_style, ShapeStyle::Square);
    }

    #[test]
    fn test_resolution_is_idempotent() {
        for preset in StylePreset::ALL {
            let a = resolve(preset.name(), &StyleOverrides::default()).unwrap();
            let b = resolve(preset.name(), &StyleOverrides::default()).unwrap();
            assert_eq!(a, b);
        }
    }

    #[test]
    fn test_explicit_gradient_and_pattern_win() {
        let overrides = StyleOverrides::default()
            .gradient("#000000", "#ffffff")
            .pattern("cyber");
        let style = resolve("vintage", &overrides).unwrap();
        assert_eq!(style.gradient, Some(Gradient::new(Rgb::BLACK, Rgb::WHITE)));
        assert_eq!(style.overlay, Some(OverlayPattern::Cyber));

        // An explicit inert tag still replaces the preset's dots
        let style = resolve("vintage", &StyleOverrides::default().pattern("rounded")).unwrap();
        assert_eq!(style.overlay, None);
    }

    #[test]
    fn test_square_override_is_ignored() {
        let style = resolve("instagram", &StyleOverrides::default().dot_style("square")).unwrap();
        assert_eq!(style.dot_style, ShapeStyle::Rounded);

        let style = resolve("instagram", &StyleOverrides::default().corner_style("square")).unwrap();
        assert_eq!(style.corner_style, ShapeStyle::Rounded);
    }

    #[test]
    fn test_non_square_override_wins() {
        let overrides = StyleOverrides::default()
            .corner_style("pointed")
            .dot_style("diamond");
        let style = resolve("telegram", &overrides).unwrap();
        assert_eq!(style.corner_style, ShapeStyle::Pointed);
        assert_eq!(style.dot_style, ShapeStyle::Diamond);

        // Unknown tags override the preset and then fall back to square
        let style = resolve("telegram", &StyleOverrides::default().dot_style("hexagon")).unwrap();
        assert_eq!(style.dot_style, ShapeStyle::Square);
    }

    #[test]
    fn test_invalid_colors_are_rejected() {
        let bad_color = StyleOverrides::default().color("not-a-color");
        assert!(matches!(
            resolve("telegram", &bad_color),
            Err(StyleError::InvalidColorFormat { .. })
        ));

        let bad_gradient = StyleOverrides::default().gradient("#000000", "#zzzzzz");
        assert!(matches!(
            resolve("default", &bad_gradient),
            Err(StyleError::InvalidColorFormat { .. })
        ));
    }
}
