//! Test utilities for integration tests.
//!
//! Helpers for building gates with explicit limits and synthetic source images.

use std::sync::Arc;

use image::{DynamicImage, Rgb, RgbImage};

use thumbgate::{GenerationGate, LimitPolicy, LimitThresholds, ResampleFilter, SizeCatalog};

/// Limits used by the reference scenarios: precached 1024, uncached 2048.
pub fn strict_thresholds() -> LimitThresholds {
    LimitThresholds::new(1024, 2048).unwrap()
}

/// Limits after reconfiguration: precached 2048, uncached 7680.
pub fn relaxed_thresholds() -> LimitThresholds {
    LimitThresholds::new(2048, 7680).unwrap()
}

/// Build a gate over the builtin catalog with its own policy.
pub fn create_gate(thresholds: LimitThresholds) -> GenerationGate {
    create_gate_with_filter(thresholds, ResampleFilter::Lanczos)
}

pub fn create_gate_with_filter(
    thresholds: LimitThresholds,
    filter: ResampleFilter,
) -> GenerationGate {
    GenerationGate::new(
        Arc::new(SizeCatalog::builtin(filter)),
        Arc::new(LimitPolicy::new(thresholds)),
    )
}

/// A simple RGB test image with a diagonal gradient.
pub fn create_test_image(width: u32, height: u32) -> DynamicImage {
    DynamicImage::ImageRgb8(RgbImage::from_fn(width, height, |x, y| {
        let val = ((x + y) % 256) as u8;
        Rgb([val, 255 - val, 128])
    }))
}
