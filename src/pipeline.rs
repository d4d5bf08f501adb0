//! Render pipeline: style resolution, module pass, overlay, logo and
//! post-effect, in that order.
//!
//! Every stage after the module pass reads the whole image, so stages run
//! strictly one after another; only the module pass and the whole-image
//! blends parallelize internally.

use crate::config;
use crate::effects::overlay::apply_overlay;
use crate::effects::post::{apply_post_effect, has_post_effect};
use crate::error::{RenderWarning, StyleError};
use crate::logo::{LogoAsset, composite_logo};
use crate::models::{ModuleMatrix, RenderGeometry, StyleConfig};
use crate::render::modules::render_modules;
use crate::render::shapes::ShapeRegistry;
use crate::style::{StyleOverrides, StylePreset, resolve_preset};
use image::{ImageOutputFormat, RgbImage};
use rand::SeedableRng;
use rand::rngs::StdRng;
use std::io::Cursor;
use std::path::{Path, PathBuf};
use std::time::Instant;

/// Default module edge in pixels
pub const DEFAULT_PIXELS_PER_MODULE: u32 = 10;
/// Default quiet-zone width in modules
pub const DEFAULT_BORDER_MODULES: u32 = 4;

/// Everything one render needs
#[derive(Debug, Clone)]
pub struct RenderRequest {
    matrix: ModuleMatrix,
    style: String,
    overrides: StyleOverrides,
    pixels_per_module: u32,
    border_modules: u32,
    logo: Option<PathBuf>,
    seed: Option<u64>,
}

impl RenderRequest {
    /// Request for `matrix` with the `default` preset and default geometry
    pub fn new(matrix: ModuleMatrix) -> Self {
        Self {
            matrix,
            style: StylePreset::Default.name().to_string(),
            overrides: StyleOverrides::default(),
            pixels_per_module: DEFAULT_PIXELS_PER_MODULE,
            border_modules: DEFAULT_BORDER_MODULES,
            logo: None,
            seed: None,
        }
    }

    /// Preset name; unknown names render as `default`
    pub fn style(mut self, name: impl Into<String>) -> Self {
        self.style = name.into();
        self
    }

    /// Caller-supplied style values
    pub fn overrides(mut self, overrides: StyleOverrides) -> Self {
        self.overrides = overrides;
        self
    }

    /// Module edge in pixels
    pub fn pixels_per_module(mut self, pixels: u32) -> Self {
        self.pixels_per_module = pixels;
        self
    }

    /// Quiet-zone width in modules
    pub fn border(mut self, modules: u32) -> Self {
        self.border_modules = modules;
        self
    }

    /// Logo to composite over the center
    pub fn logo(mut self, path: impl Into<PathBuf>) -> Self {
        self.logo = Some(path.into());
        self
    }

    /// Fixed RNG seed; `None` falls back to `QRSTYLE_SEED`, then to entropy
    pub fn seed(mut self, seed: Option<u64>) -> Self {
        self.seed = seed;
        self
    }

    /// Matrix being rendered
    pub fn matrix(&self) -> &ModuleMatrix {
        &self.matrix
    }

    /// Requested preset name
    pub fn style_name(&self) -> &str {
        &self.style
    }

    /// Validated geometry implied by the matrix and request
    pub fn geometry(&self) -> Result<RenderGeometry, StyleError> {
        RenderGeometry::try_new(self.matrix.side(), self.pixels_per_module, self.border_modules)
    }

    fn rng(&self) -> StdRng {
        match self.seed.or_else(config::default_seed) {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        }
    }
}

/// Stage counters collected during one render
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RenderTelemetry {
    /// Dark modules drawn
    pub modules_drawn: usize,
    /// Of those, modules inside finder windows
    pub finder_modules: usize,
    /// Whether an overlay pattern ran
    pub overlay_applied: bool,
    /// Whether a logo was composited
    pub logo_applied: bool,
    /// Whether a preset post-effect ran
    pub post_effect_applied: bool,
}

/// Finished render
#[derive(Debug, Clone)]
pub struct RenderOutput {
    /// Final image
    pub image: RgbImage,
    /// Style the image was drawn with
    pub style: StyleConfig,
    /// Non-fatal problems met on the way
    pub warnings: Vec<RenderWarning>,
    /// Stage counters
    pub telemetry: RenderTelemetry,
}

/// Render with the built-in shape drawers
pub fn render(request: &RenderRequest) -> Result<RenderOutput, StyleError> {
    render_with(request, &ShapeRegistry::standard())
}

/// Render with a caller-provided shape registry
pub fn render_with(
    request: &RenderRequest,
    registry: &ShapeRegistry,
) -> Result<RenderOutput, StyleError> {
    let geometry = request.geometry()?;
    let preset = StylePreset::from_name(&request.style);
    let style = resolve_preset(preset, &request.overrides)?;
    let mut rng = request.rng();
    let mut telemetry = RenderTelemetry::default();
    let mut warnings = Vec::new();

    let start = Instant::now();
    let (image, plan) = render_modules(
        &request.matrix,
        &geometry,
        &style,
        registry,
        &mut rng,
        config::parallel_min_modules(),
    );
    telemetry.modules_drawn = plan.len();
    telemetry.finder_modules = plan.finder_count();
    log::debug!(
        "module pass: {} modules on {}px in {:?}",
        plan.len(),
        geometry.image_side(),
        start.elapsed()
    );

    let start = Instant::now();
    let mut image = apply_overlay(image, style.overlay, style.module_color, &mut rng);
    telemetry.overlay_applied = style.overlay.is_some();
    if let Some(pattern) = style.overlay {
        log::debug!("overlay {}: {:?}", pattern.name(), start.elapsed());
    }

    if let Some(path) = &request.logo {
        match LogoAsset::open(path) {
            Ok(logo) => {
                composite_logo(&mut image, &logo);
                telemetry.logo_applied = true;
            }
            Err(warning) => {
                log::warn!("{warning}; rendering without logo");
                warnings.push(warning);
            }
        }
    }

    let start = Instant::now();
    let image = apply_post_effect(image, preset, &style, &mut rng);
    telemetry.post_effect_applied = has_post_effect(preset);
    if telemetry.post_effect_applied {
        log::debug!("post-effect {}: {:?}", preset.name(), start.elapsed());
    }

    Ok(RenderOutput {
        image,
        style,
        warnings,
        telemetry,
    })
}

/// Serialize an image as PNG
pub fn encode_png(image: &RgbImage) -> Result<Vec<u8>, StyleError> {
    let mut bytes = Cursor::new(Vec::new());
    image
        .write_to(&mut bytes, ImageOutputFormat::Png)
        .map_err(|source| StyleError::Encoding {
            stage: "encode",
            source,
        })?;
    Ok(bytes.into_inner())
}

/// Render and return PNG bytes with any warnings
pub fn render_to_png_bytes(
    request: &RenderRequest,
) -> Result<(Vec<u8>, Vec<RenderWarning>), StyleError> {
    let output = render(request)?;
    let bytes = encode_png(&output.image)?;
    Ok((bytes, output.warnings))
}

/// Render and write a PNG to `path`, returning any warnings
pub fn render_to_file<P: AsRef<Path>>(
    request: &RenderRequest,
    path: P,
) -> Result<Vec<RenderWarning>, StyleError> {
    let output = render(request)?;
    output
        .image
        .save_with_format(path.as_ref(), image::ImageFormat::Png)
        .map_err(|source| StyleError::Encoding {
            stage: "write",
            source,
        })?;
    log::debug!("wrote {}", path.as_ref().display());
    Ok(output.warnings)
}
