//! qr_style - styled rendering of QR module matrices
//!
//! Turns a boolean module matrix into a decorated raster image: preset
//! styles, per-region shapes, diagonal gradients, overlay textures, a
//! centered logo and preset post-effects.
//!
//! ```no_run
//! use qr_style::{RenderRequest, StyleOverrides, encode_text, EcLevel};
//!
//! let matrix = encode_text("https://example.org", EcLevel::H).unwrap();
//! let request = RenderRequest::new(matrix)
//!     .style("telegram")
//!     .overrides(StyleOverrides::default().dot_style("circle"))
//!     .seed(Some(7));
//! let warnings = qr_style::render_to_file(&request, "qr.png").unwrap();
//! assert!(warnings.is_empty());
//! ```

#![warn(missing_docs)]
#![allow(clippy::missing_docs_in_private_items)]

/// Environment knobs (seed, parallel threshold)
pub mod config;
/// Payload formatting (text, URL, WiFi, vCard)
pub mod content;
/// Overlay patterns and preset post-effects
pub mod effects;
/// QR encoder adapter
pub mod encode;
/// Error and warning types
pub mod error;
/// Logo compositing
pub mod logo;
/// Core data structures (ModuleMatrix, Rgb, StyleConfig, RenderGeometry)
pub mod models;
/// Stage orchestration and PNG output
pub mod pipeline;
/// Color evaluation, shape drawers and the module pass
pub mod render;
/// Style presets and resolution
pub mod style;
/// Blending helpers
pub mod utils;

pub use content::{Payload, PayloadKind};
pub use encode::{EcLevel, encode_text};
pub use error::{RenderWarning, StyleError};
pub use models::{
    Gradient, ModuleMatrix, OverlayPattern, RegionClass, RenderGeometry, Rgb, ShapeStyle,
    StyleConfig,
};
pub use pipeline::{
    RenderOutput, RenderRequest, RenderTelemetry, render, render_to_file, render_to_png_bytes,
};
pub use render::shapes::{ShapeDrawer, ShapeRegistry};
pub use style::{StyleOverrides, StylePreset, resolve};

use pipeline::{encode_png, render_with};
use std::path::Path;

/// Renderer with a reusable shape registry
#[derive(Debug, Clone)]
pub struct Renderer {
    registry: ShapeRegistry,
}

impl Renderer {
    /// Create a renderer with the built-in shape drawers
    pub fn new() -> Self {
        Self {
            registry: ShapeRegistry::standard(),
        }
    }

    /// Create a renderer around a custom registry
    pub fn with_registry(registry: ShapeRegistry) -> Self {
        Self { registry }
    }

    /// Install or replace the drawer for a shape style
    pub fn register<D: ShapeDrawer + 'static>(&mut self, style: ShapeStyle, drawer: D) {
        self.registry.register(style, drawer);
    }

    /// Shape registry in use
    pub fn registry(&self) -> &ShapeRegistry {
        &self.registry
    }

    /// Render a request
    pub fn render(&self, request: &RenderRequest) -> Result<RenderOutput, StyleError> {
        render_with(request, &self.registry)
    }

    /// Render a request into PNG bytes
    pub fn render_png(
        &self,
        request: &RenderRequest,
    ) -> Result<(Vec<u8>, Vec<RenderWarning>), StyleError> {
        let output = self.render(request)?;
        Ok((encode_png(&output.image)?, output.warnings))
    }

    /// Render a request into a PNG file
    pub fn render_file<P: AsRef<Path>>(
        &self,
        request: &RenderRequest,
        path: P,
    ) -> Result<Vec<RenderWarning>, StyleError> {
        let output = self.render(request)?;
        output
            .image
            .save_with_format(path.as_ref(), image::ImageFormat::Png)
            .map_err(|source| StyleError::Encoding {
                stage: "write",
                source,
            })?;
        Ok(output.warnings)
    }
}

impl Default for Renderer {
    fn default() -> Self {
        Self::new()
    }
}
