//! Utility functions for image processing
//!
//! - Blending (per-channel mixes, image-over-image and image-over-color)
//! - Channel arithmetic with clamping

pub mod blend;
