//! In-memory resampler.
//!
//! Applies a size's crop strategy and filter to an already decoded
//! [`DynamicImage`]. Decoding the original and encoding the result are left
//! to the caller.

use image::{DynamicImage, ImageBuffer, Rgba};

use crate::resample::{KernelDescriptor, ResampleFilter};
use crate::size::{Anchor, CropStrategy, Size};

/// Resample `img` into the box described by `size`.
///
/// - `Fit` keeps the aspect ratio and stays within the box.
/// - `Tile` and `Fill` cover the box and crop the overflow.
/// - `Resize` stretches to exactly the box.
///
/// An image with a zero dimension is returned unchanged.
pub fn render(img: &DynamicImage, size: &Size) -> DynamicImage {
    if img.width() == 0 || img.height() == 0 {
        return img.clone();
    }

    match size.crop {
        CropStrategy::Fit => {
            let (w, h) = fit_dimensions(img.width(), img.height(), size.width, size.height);
            scale(img, w, h, size.filter)
        }
        CropStrategy::Tile => fill(img, size.width, size.height, Anchor::Center, size.filter),
        CropStrategy::Fill(anchor) => fill(img, size.width, size.height, anchor, size.filter),
        CropStrategy::Resize => scale(img, size.width, size.height, size.filter),
    }
}

/// Scale to exactly `width` x `height` with `filter`.
fn scale(img: &DynamicImage, width: u32, height: u32, filter: ResampleFilter) -> DynamicImage {
    match filter.image_filter() {
        Some(filter) => img.resize_exact(width, height, filter),
        None => convolve(img, width, height, &filter.kernel()),
    }
}

/// Scale to cover `width` x `height`, then crop at `anchor`.
fn fill(
    img: &DynamicImage,
    width: u32,
    height: u32,
    anchor: Anchor,
    filter: ResampleFilter,
) -> DynamicImage {
    let (cover_w, cover_h) = cover_dimensions(img.width(), img.height(), width, height);
    let scaled = scale(img, cover_w, cover_h, filter);

    let (x, y) = match anchor {
        Anchor::Center => ((cover_w - width) / 2, (cover_h - height) / 2),
        Anchor::TopLeft => (0, 0),
        Anchor::BottomRight => (cover_w - width, cover_h - height),
    };

    scaled.crop_imm(x, y, width, height)
}

/// Largest dimensions with the source aspect ratio that fit in the box.
///
/// Never smaller than 1x1.
pub(crate) fn fit_dimensions(src_w: u32, src_h: u32, width: u32, height: u32) -> (u32, u32) {
    if src_w == 0 || src_h == 0 {
        return (width, height);
    }

    let ratio = f64::min(
        f64::from(width) / f64::from(src_w),
        f64::from(height) / f64::from(src_h),
    );

    let w = (f64::from(src_w) * ratio).round() as u32;
    let h = (f64::from(src_h) * ratio).round() as u32;

    (w.clamp(1, width.max(1)), h.clamp(1, height.max(1)))
}

/// Smallest dimensions with the source aspect ratio that cover the box.
///
/// Never smaller than the box on either axis.
pub(crate) fn cover_dimensions(src_w: u32, src_h: u32, width: u32, height: u32) -> (u32, u32) {
    if src_w == 0 || src_h == 0 {
        return (width, height);
    }

    let ratio = f64::max(
        f64::from(width) / f64::from(src_w),
        f64::from(height) / f64::from(src_h),
    );

    let w = (f64::from(src_w) * ratio).round() as u32;
    let h = (f64::from(src_h) * ratio).round() as u32;

    (w.max(width), h.max(height))
}

// =============================================================================
// Kernel Convolution
// =============================================================================

/// Source samples and normalized weights for one output sample.
#[derive(Debug)]
struct Contribution {
    start: usize,
    weights: Vec<f32>,
}

/// Per-axis sample windows for scaling `src_len` samples to `dst_len`.
///
/// When downscaling the kernel is stretched by the scale factor so every
/// source sample contributes.
fn contributions(src_len: u32, dst_len: u32, kernel: &KernelDescriptor) -> Vec<Contribution> {
    let scale = f64::from(src_len) / f64::from(dst_len);
    let filter_scale = scale.max(1.0);
    let radius = kernel.support * filter_scale;
    let last = i64::from(src_len) - 1;

    (0..dst_len)
        .map(|x| {
            let center = (f64::from(x) + 0.5) * scale - 0.5;
            let left = ((center - radius).floor() as i64).clamp(0, last);
            let right = ((center + radius).ceil() as i64).clamp(0, last);

            let weights: Vec<f64> = (left..=right)
                .map(|i| kernel.weight((i as f64 - center) / filter_scale))
                .collect();
            let sum: f64 = weights.iter().sum();

            if sum.abs() < f64::EPSILON {
                let nearest = (center.round() as i64).clamp(0, last);
                return Contribution {
                    start: nearest as usize,
                    weights: vec![1.0],
                };
            }

            Contribution {
                start: left as usize,
                weights: weights.iter().map(|w| (w / sum) as f32).collect(),
            }
        })
        .collect()
}

/// Separable resample of `img` to `width` x `height` with `kernel`.
///
/// Runs a horizontal then a vertical pass over RGBA f32 samples and
/// returns an 8-bit RGBA image.
fn convolve(img: &DynamicImage, width: u32, height: u32, kernel: &KernelDescriptor) -> DynamicImage {
    let src = img.to_rgba32f();
    let (src_w, src_h) = src.dimensions();
    let samples = src.as_raw();

    let columns = contributions(src_w, width, kernel);
    let rows = contributions(src_h, height, kernel);

    let stride = width as usize * 4;
    let mut horizontal = vec![0f32; stride * src_h as usize];

    for (y, out_row) in horizontal.chunks_exact_mut(stride).enumerate() {
        let src_row = &samples[y * src_w as usize * 4..(y + 1) * src_w as usize * 4];

        for (out, c) in out_row.chunks_exact_mut(4).zip(&columns) {
            for (k, w) in c.weights.iter().enumerate() {
                let i = (c.start + k) * 4;
                for (o, s) in out.iter_mut().zip(&src_row[i..i + 4]) {
                    *o += s * w;
                }
            }
        }
    }

    let out = ImageBuffer::from_fn(width, height, |x, y| {
        let c = &rows[y as usize];
        let mut px = [0f32; 4];

        for (k, w) in c.weights.iter().enumerate() {
            let i = (c.start + k) * stride + x as usize * 4;
            for (o, s) in px.iter_mut().zip(&horizontal[i..i + 4]) {
                *o += s * w;
            }
        }

        Rgba(px.map(|v| (v.clamp(0.0, 1.0) * 255.0).round() as u8))
    });

    DynamicImage::ImageRgba8(out)
}

// =============================================================================
// Tests
// =============================================================================
