use crate::models::{Gradient, OverlayPattern, Rgb, ShapeStyle};

/// Built-in style presets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StylePreset {
    /// Caller colors, square modules, nothing else
    Default,
    /// Purple-to-red gradient with rounded modules
    Instagram,
    /// Blue gradient, rounded corners and circular dots
    Telegram,
    /// White modules on near-black
    Dark,
    /// Magenta-to-cyan diamonds with a glow pass
    Neon,
    /// Brown on beige with a dot texture
    Vintage,
    /// Black circles on white
    Minimal,
    /// Orange random shapes with decorative circles
    Abstract,
    /// Soft blue with noise and blur
    Watercolor,
    /// Terminal green with a grid
    Cyber,
    /// Pastel pink circles
    Pastel,
}

/// Field values a preset contributes to a resolved style.
///
/// `module_color`/`background_color` are `None` only for [`StylePreset::Default`],
/// which takes them from the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PresetDefaults {
    /// Module color, or `None` to use the caller's
    pub module_color: Option<Rgb>,
    /// Background color, or `None` to use the caller's
    pub background_color: Option<Rgb>,
    /// Preset gradient
    pub gradient: Option<Gradient>,
    /// Raw overlay tag as carried by the preset
    pub pattern: Option<&'static str>,
    /// Finder-window shape
    pub corner_style: ShapeStyle,
    /// Regular module shape
    pub dot_style: ShapeStyle,
}

const fn hex(v: u32) -> Rgb {
    Rgb::new((v >> 16) as u8, (v >> 8) as u8, v as u8)
}

const fn gradient(start: u32, end: u32) -> Option<Gradient> {
    Some(Gradient::new(hex(start), hex(end)))
}

impl StylePreset {
    /// Every preset, in table order
    pub const ALL: [StylePreset; 11] = [
        StylePreset::Default,
        StylePreset::Instagram,
        StylePreset::Telegram,
        StylePreset::Dark,
        StylePreset::Neon,
        StylePreset::Vintage,
        StylePreset::Minimal,
        StylePreset::Abstract,
        StylePreset::Watercolor,
        StylePreset::Cyber,
        StylePreset::Pastel,
    ];

    /// Look up a preset by exact (case-sensitive) name; anything else maps
    /// to `Default`
    pub fn from_name(name: &str) -> Self {
        Self::ALL
            .into_iter()
            .find(|p| p.name() == name)
            .unwrap_or_else(|| {
                log::debug!("unknown style {name:?}, using default");
                StylePreset::Default
            })
    }

    /// Preset name
    pub fn name(&self) -> &'static str {
        match self {
            StylePreset::Default => "default",
            StylePreset::Instagram => "instagram",
            StylePreset::Telegram => "telegram",
            StylePreset::Dark => "dark",
            StylePreset::Neon => "neon",
            StylePreset::Vintage => "vintage",
            StylePreset::Minimal => "minimal",
            StylePreset::Abstract => "abstract",
            StylePreset::Watercolor => "watercolor",
            StylePreset::Cyber => "cyber",
            StylePreset::Pastel => "pastel",
        }
    }

    /// The preset's field values
    pub fn defaults(&self) -> PresetDefaults {
        use ShapeStyle::*;
        let (module_color, background_color, gradient, pattern, corner_style, dot_style) =
            match self {
                StylePreset::Default => (None, None, None, None, Square, Square),
                StylePreset::Instagram => (
                    Some(hex(0xE1306C)),
                    Some(hex(0xFFFFFF)),
                    gradient(0x833AB4, 0xFD1D1D),
                    Some("rounded"),
                    Rounded,
                    Rounded,
                ),
                StylePreset::Telegram => (
                    Some(hex(0x0088CC)),
                    Some(hex(0xFFFFFF)),
                    gradient(0x0088CC, 0x00ACED),
                    None,
                    Rounded,
                    Circle,
                ),
                StylePreset::Dark => (
                    Some(hex(0xFFFFFF)),
                    Some(hex(0x121212)),
                    None,
                    None,
                    Square,
                    Square,
                ),
                StylePreset::Neon => (
                    Some(hex(0x0FF0FC)),
                    Some(hex(0x000000)),
                    gradient(0xFF00FF, 0x00FFFF),
                    Some("diamond"),
                    Pointed,
                    Diamond,
                ),
                StylePreset::Vintage => (
                    Some(hex(0x8B4513)),
                    Some(hex(0xF5F5DC)),
                    gradient(0x8B4513, 0xA0522D),
                    Some("dots"),
                    Rounded,
                    Circle,
                ),
                StylePreset::Minimal => (
                    Some(hex(0x000000)),
                    Some(hex(0xFFFFFF)),
                    None,
                    None,
                    Square,
                    Circle,
                ),
                StylePreset::Abstract => (
                    Some(hex(0xFF5722)),
                    Some(hex(0x212121)),
                    gradient(0xFF5722, 0xFF9800),
                    Some("random"),
                    Circle,
                    Random,
                ),
                StylePreset::Watercolor => (
                    Some(hex(0x1E88E5)),
                    Some(hex(0xE3F2FD)),
                    gradient(0x1E88E5, 0x64B5F6),
                    Some("watercolor"),
                    Rounded,
                    Rounded,
                ),
                StylePreset::Cyber => (
                    Some(hex(0x00FF41)),
                    Some(hex(0x0D0208)),
                    gradient(0x008F11, 0x00FF41),
                    Some("cyber"),
                    Pointed,
                    Square,
                ),
                StylePreset::Pastel => (
                    Some(hex(0xFF9AA2)),
                    Some(hex(0xFFFFFF)),
                    gradient(0xFFB7B2, 0xFFDAC1),
                    Some("rounded"),
                    Rounded,
                    Circle,
                ),
            };

        PresetDefaults {
            module_color,
            background_color,
            gradient,
            pattern,
            corner_style,
            dot_style,
        }
    }

    /// Overlay pass the preset's own pattern tag selects
    pub fn overlay(&self) -> Option<OverlayPattern> {
        self.defaults().pattern.and_then(OverlayPattern::from_tag)
    }
}
