//! Generation gate.
//!
//! The entry point a thumbnail pipeline consults before doing any pixel work:
//!
//! ```text
//! size name ──▶ SizeCatalog::get ──▶ LimitPolicy::classify ──▶ Decision
//!                                                              │
//!                                   allowed ◀──────────────────┤
//!                                      │                       └──▶ ResourceLimitExceeded
//!                                      ▼
//!                       ResampleFilter::kernel / render
//! ```
//!
//! Every call re-reads the current limits; there is no per-size state.

use std::sync::Arc;

use image::DynamicImage;
use serde::Serialize;
use tracing::{debug, warn};

use crate::error::ThumbError;
use crate::limits::{LimitPolicy, LimitThresholds, Tier};
use crate::resample::{self, KernelDescriptor};
use crate::size::{Size, SizeCatalog};

// =============================================================================
// Decision
// =============================================================================

/// Why a generation request was denied.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DenyReason {
    ResourceLimitExceeded,
}

/// Outcome of [`GenerationGate::can_generate`].
///
/// A rejected size is an ordinary outcome here, not an error. Use
/// [`Decision::into_result`] to turn it into one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Decision {
    pub tier: Tier,
}

impl Decision {
    pub fn is_allowed(&self) -> bool {
        self.tier != Tier::Rejected
    }

    /// Whether the generated thumbnail should be stored durably.
    pub fn should_persist(&self) -> bool {
        self.tier == Tier::Precached
    }

    pub fn reason(&self) -> Option<DenyReason> {
        match self.tier {
            Tier::Rejected => Some(DenyReason::ResourceLimitExceeded),
            Tier::Precached | Tier::OnDemand => None,
        }
    }

    /// Convert a rejection into [`ThumbError::ResourceLimitExceeded`].
    pub fn into_result(self, size: &Size, thresholds: &LimitThresholds) -> Result<Tier, ThumbError> {
        match self.reason() {
            Some(DenyReason::ResourceLimitExceeded) => Err(ThumbError::ResourceLimitExceeded {
                name: size.name.clone(),
                footprint: size.footprint(),
                limit: thresholds.uncached_footprint(),
            }),
            None => Ok(self.tier),
        }
    }
}

// =============================================================================
// Thumbnail
// =============================================================================

/// A resampled thumbnail, ready for encoding.
#[derive(Debug, Clone)]
pub struct Thumbnail {
    pub size: String,
    pub tier: Tier,
    pub image: DynamicImage,
}

impl Thumbnail {
    /// Whether the pipeline should store this thumbnail durably.
    pub fn should_persist(&self) -> bool {
        self.tier == Tier::Precached
    }
}

// =============================================================================
// Generation Gate
// =============================================================================

/// Decides which sizes may be generated and how to resample them.
///
/// Cheap to clone; the catalog and policy are shared.
#[derive(Debug, Clone)]
pub struct GenerationGate {
    catalog: Arc<SizeCatalog>,
    policy: Arc<LimitPolicy>,
}

impl GenerationGate {
    pub fn new(catalog: Arc<SizeCatalog>, policy: Arc<LimitPolicy>) -> Self {
        Self { catalog, policy }
    }

    pub fn catalog(&self) -> &SizeCatalog {
        &self.catalog
    }

    pub fn policy(&self) -> &LimitPolicy {
        &self.policy
    }

    /// Decide whether `size` may be generated under the current limits.
    pub fn can_generate(&self, size: &Size) -> Decision {
        Decision {
            tier: self.policy.classify(size),
        }
    }

    /// Like [`can_generate`](Self::can_generate), resolving the size by name.
    ///
    /// # Errors
    ///
    /// Returns [`ThumbError::UnknownSize`] if the name is not in the catalog.
    pub fn can_generate_named(&self, name: &str) -> Result<Decision, ThumbError> {
        let size = self.catalog.get(name)?;
        Ok(self.can_generate(size))
    }

    /// Kernel parameters for resampling `size`.
    pub fn resample_params(&self, size: &Size) -> KernelDescriptor {
        size.filter.kernel()
    }

    /// Sizes eligible for eager batch generation under the current limits.
    pub fn precache_sizes(&self) -> Vec<&Size> {
        let thresholds = self.policy.thresholds();
        self.catalog
            .iter()
            .filter(|s| thresholds.classify(s) == Tier::Precached)
            .collect()
    }

    /// Resample `img` for `size`, checking the limits first.
    ///
    /// The size's own filter is applied, including Blackman.
    ///
    /// # Errors
    ///
    /// Returns [`ThumbError::ResourceLimitExceeded`] without touching the
    /// image if the size is rejected, and [`ThumbError::EmptyImage`] if
    /// `img` has a zero dimension.
    pub fn generate(&self, img: &DynamicImage, size: &Size) -> Result<Thumbnail, ThumbError> {
        let thresholds = self.policy.thresholds();
        let decision = Decision {
            tier: thresholds.classify(size),
        };

        let tier = decision.into_result(size, &thresholds).map_err(|e| {
            warn!(size = %size.name, footprint = size.footprint(), "Refusing to generate thumbnail: {}", e);
            e
        })?;

        if img.width() == 0 || img.height() == 0 {
            let err = ThumbError::EmptyImage {
                size: size.name.clone(),
                width: img.width(),
                height: img.height(),
            };
            warn!(size = %size.name, "Refusing to generate thumbnail: {}", err);
            return Err(err);
        }

        debug!(
            size = %size.name,
            tier = %tier,
            filter = %size.filter,
            src_width = img.width(),
            src_height = img.height(),
            "Generating thumbnail"
        );

        Ok(Thumbnail {
            size: size.name.clone(),
            tier,
            image: resample::render(img, size),
        })
    }

    /// Like [`generate`](Self::generate), resolving the size by name.
    pub fn generate_named(&self, img: &DynamicImage, name: &str) -> Result<Thumbnail, ThumbError> {
        let size = self.catalog.get(name)?;
        self.generate(img, size)
    }
}

// =============================================================================
// Tests
// =============================================================================
