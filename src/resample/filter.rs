//! Resample filter catalog.
//!
//! Sizes name a [`ResampleFilter`]; the numeric kernel parameters live here in
//! [`KernelDescriptor`] so the size catalog stays declarative.
//!
//! | Filter | Support | Kernel |
//! |---|---|---|
//! | `blackman` | 3.0 | Blackman-windowed sinc |
//! | `lanczos` | 3.0 | Lanczos-windowed sinc (3 lobes) |
//! | `cubic` | 2.0 | Catmull-Rom BC-spline (B=0, C=0.5) |
//! | `linear` | 1.0 | Triangle |
//! | `nearest` | 0.0 | Box |

use std::f64::consts::PI;
use std::fmt;
use std::str::FromStr;

use image::imageops::FilterType;
use serde::{Deserialize, Serialize};

use crate::error::ThumbError;

// =============================================================================
// Filter Kinds
// =============================================================================

/// Named resampling filter attached to a thumbnail size.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResampleFilter {
    /// Blackman-windowed sinc, slightly softer than Lanczos
    Blackman,
    /// Lanczos3, the default for photographic content
    #[default]
    Lanczos,
    /// Catmull-Rom cubic
    Cubic,
    /// Bilinear / triangle
    Linear,
    /// Nearest neighbor, used for color sampling sizes
    Nearest,
}

impl ResampleFilter {
    /// All supported filters.
    pub const ALL: [ResampleFilter; 5] = [
        ResampleFilter::Blackman,
        ResampleFilter::Lanczos,
        ResampleFilter::Cubic,
        ResampleFilter::Linear,
        ResampleFilter::Nearest,
    ];

    /// Lowercase name used in configuration and JSON.
    pub fn name(self) -> &'static str {
        match self {
            ResampleFilter::Blackman => "blackman",
            ResampleFilter::Lanczos => "lanczos",
            ResampleFilter::Cubic => "cubic",
            ResampleFilter::Linear => "linear",
            ResampleFilter::Nearest => "nearest",
        }
    }

    /// Kernel parameters for this filter.
    pub fn kernel(self) -> KernelDescriptor {
        let support = match self {
            ResampleFilter::Blackman => 3.0,
            ResampleFilter::Lanczos => 3.0,
            ResampleFilter::Cubic => 2.0,
            ResampleFilter::Linear => 1.0,
            ResampleFilter::Nearest => 0.0,
        };

        KernelDescriptor {
            filter: self,
            support,
        }
    }

    /// Matching `image` crate filter, if there is one.
    ///
    /// `image` has no Blackman window, so Blackman returns `None` and is
    /// resampled with [`KernelDescriptor::weight`] instead.
    pub fn image_filter(self) -> Option<FilterType> {
        match self {
            ResampleFilter::Blackman => None,
            ResampleFilter::Lanczos => Some(FilterType::Lanczos3),
            ResampleFilter::Cubic => Some(FilterType::CatmullRom),
            ResampleFilter::Linear => Some(FilterType::Triangle),
            ResampleFilter::Nearest => Some(FilterType::Nearest),
        }
    }
}

impl fmt::Display for ResampleFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.name())
    }
}

impl FromStr for ResampleFilter {
    type Err = ThumbError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_lowercase();
        ResampleFilter::ALL
            .into_iter()
            .find(|filter| filter.name() == normalized)
            .ok_or_else(|| ThumbError::InvalidFilterKind(s.to_string()))
    }
}

// =============================================================================
// Kernel Descriptor
// =============================================================================

/// Convolution kernel parameters for a resample filter.
///
/// `support` is the kernel radius in source pixels at scale 1.0; a resampler
/// sizes its convolution window as `2 * support * scale`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct KernelDescriptor {
    pub filter: ResampleFilter,
    pub support: f64,
}

impl KernelDescriptor {
    /// Kernel weight at distance `x` from the sample center.
    ///
    /// Zero outside `[-support, support]`. The nearest-neighbor kernel has no
    /// support and is a box of width 1.
    pub fn weight(&self, x: f64) -> f64 {
        let x = x.abs();
        match self.filter {
            ResampleFilter::Blackman => {
                if x < 3.0 {
                    sinc(x) * blackman(x / 3.0)
                } else {
                    0.0
                }
            }
            ResampleFilter::Lanczos => {
                if x < 3.0 {
                    sinc(x) * sinc(x / 3.0)
                } else {
                    0.0
                }
            }
            ResampleFilter::Cubic => bc_spline(x, 0.0, 0.5),
            ResampleFilter::Linear => {
                if x < 1.0 {
                    1.0 - x
                } else {
                    0.0
                }
            }
            ResampleFilter::Nearest => {
                if x < 0.5 {
                    1.0
                } else {
                    0.0
                }
            }
        }
    }
}

fn sinc(x: f64) -> f64 {
    if x == 0.0 {
        1.0
    } else {
        (PI * x).sin() / (PI * x)
    }
}

fn blackman(x: f64) -> f64 {
    0.42 - 0.5 * (PI * x + PI).cos() + 0.08 * (2.0 * PI * x).cos()
}

/// Mitchell-Netravali family of cubic splines; expects `x >= 0`.
fn bc_spline(x: f64, b: f64, c: f64) -> f64 {
    if x < 1.0 {
        ((12.0 - 9.0 * b - 6.0 * c) * x * x * x
            + (-18.0 + 12.0 * b + 6.0 * c) * x * x
            + (6.0 - 2.0 * b))
            / 6.0
    } else if x < 2.0 {
        ((-b - 6.0 * c) * x * x * x
            + (6.0 * b + 30.0 * c) * x * x
            + (-12.0 * b - 48.0 * c) * x
            + (8.0 * b + 24.0 * c))
            / 6.0
    } else {
        0.0
    }
}

// =============================================================================
// Tests
// =============================================================================
