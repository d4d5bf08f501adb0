use super::color::Rgb;

/// Shape drawn for a single module
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ShapeStyle {
    /// Fill the whole module box
    #[default]
    Square,
    /// Ellipse inscribed in the module box
    Circle,
    /// Rounded rectangle, corner radius `pixels_per_module / 4`
    Rounded,
    /// Polygon through the midpoints of the box edges
    Diamond,
    /// Right triangle facing the matrix interior inside finder windows
    Pointed,
    /// Per-module uniform choice of square, circle or diamond
    Random,
}

impl ShapeStyle {
    /// Tag used by presets and callers
    pub fn name(&self) -> &'static str {
        match self {
            ShapeStyle::Square => "square",
            ShapeStyle::Circle => "circle",
            ShapeStyle::Rounded => "rounded",
            ShapeStyle::Diamond => "diamond",
            ShapeStyle::Pointed => "pointed",
            ShapeStyle::Random => "random",
        }
    }

    /// Parse a shape tag (case-sensitive); unknown tags fall back to `Square`
    pub fn from_tag(tag: &str) -> Self {
        match tag {
            "circle" => ShapeStyle::Circle,
            "rounded" => ShapeStyle::Rounded,
            "diamond" => ShapeStyle::Diamond,
            "pointed" => ShapeStyle::Pointed,
            "random" => ShapeStyle::Random,
            "square" => ShapeStyle::Square,
            other => {
                log::debug!("unknown shape tag {other:?}, using square");
                ShapeStyle::Square
            }
        }
    }
}

/// Whole-image texture blended over the drawn modules
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OverlayPattern {
    /// Evenly spaced 2px dots in the module color, blended at 20%
    Dots,
    /// Per-channel noise followed by a light blur
    Watercolor,
    /// Green channel boost
    Cyber,
}

impl OverlayPattern {
    /// Tag used by presets and callers
    pub fn name(&self) -> &'static str {
        match self {
            OverlayPattern::Dots => "dots",
            OverlayPattern::Watercolor => "watercolor",
            OverlayPattern::Cyber => "cyber",
        }
    }

    /// Parse an overlay tag. Tags without an overlay pass (for example the
    /// `rounded` or `random` tags some presets carry) yield `None`.
    pub fn from_tag(tag: &str) -> Option<Self> {
        match tag {
            "dots" => Some(OverlayPattern::Dots),
            "watercolor" => Some(OverlayPattern::Watercolor),
            "cyber" => Some(OverlayPattern::Cyber),
            other => {
                log::debug!("overlay tag {other:?} has no overlay pass");
                None
            }
        }
    }
}

/// Two-color diagonal gradient
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Gradient {
    /// Color at the top-left corner of the image
    pub start: Rgb,
    /// Color approached at the bottom-right corner
    pub end: Rgb,
}

impl Gradient {
    /// Create a gradient between two colors
    pub const fn new(start: Rgb, end: Rgb) -> Self {
        Self { start, end }
    }
}

/// Fully resolved style for one render call
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct StyleConfig {
    /// Flat module fill, used when no gradient is set
    pub module_color: Rgb,
    /// Image background
    pub background_color: Rgb,
    /// Optional gradient that replaces the flat module fill
    pub gradient: Option<Gradient>,
    /// Optional overlay pass
    pub overlay: Option<OverlayPattern>,
    /// Shape for modules inside the three finder windows
    pub corner_style: ShapeStyle,
    /// Shape for every other module
    pub dot_style: ShapeStyle,
}

impl Default for StyleConfig {
    fn default() -> Self {
        Self {
            module_color: Rgb::BLACK,
            background_color: Rgb::WHITE,
            gradient: None,
            overlay: None,
            corner_style: ShapeStyle::Square,
            dot_style: ShapeStyle::Square,
        }
    }
}
