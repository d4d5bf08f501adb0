//! Whole-image passes applied after the module pass
//!
//! - Overlay patterns (dots, watercolor, cyber), chosen by the resolved style
//! - Post-effects, chosen by the preset name

pub mod overlay;
pub mod post;
