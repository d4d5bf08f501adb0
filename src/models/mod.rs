/// RGB color values and hex parsing
pub mod color;
/// Module boxes and finder-region classification
pub mod geometry;
/// Packed module matrix
pub mod matrix;
/// Resolved style values
pub mod style;

pub use color::Rgb;
pub use geometry::{CellBox, FinderWindow, RegionClass, RenderGeometry};
pub use matrix::ModuleMatrix;
pub use style::{Gradient, OverlayPattern, ShapeStyle, StyleConfig};
