//! Limit policy engine.
//!
//! Classifies every [`Size`] into one of three caching tiers by comparing its
//! footprint (`width * height`) with two runtime-adjustable limits.
//!
//! # Limits
//!
//! Limits are configured as square edge lengths in pixels, the same way the
//! `--thumb-size` options are written. A limit `l` admits footprints up to
//! `l * l`:
//!
//! ```text
//!   0 ───────────── precached² ───────────── uncached² ─────────────▶ footprint
//!   │   Precached   ││        OnDemand        ││       Rejected
//!                   (inclusive)               (inclusive)
//! ```
//!
//! Equality with a limit stays in the lower tier; only a strictly larger
//! footprint moves a size up.
//!
//! Only the area is compared, never a single edge. Under the default limits
//! a 2560x1600 size is precached even though it is wider than 2048.
//!
//! # Concurrency
//!
//! [`LimitPolicy`] packs both limits into a single `AtomicU64`. Readers take
//! one snapshot per classification and writers publish both limits with one
//! swap, so no reader can observe a half-updated pair. Nothing is memoized:
//! an update changes the next classification of every size.

use std::sync::atomic::{AtomicU64, Ordering};

use serde::Serialize;
use tracing::{info, trace};

use crate::error::ThumbError;
use crate::size::Size;

/// Default precached limit (edge length in pixels).
pub const DEFAULT_PRECACHED_LIMIT: u32 = 2048;

/// Default uncached limit (edge length in pixels).
pub const DEFAULT_UNCACHED_LIMIT: u32 = 7680;

// =============================================================================
// Tier
// =============================================================================

/// Caching tier of a size, ordered from least to most restrictive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Tier {
    /// Generated eagerly and kept until invalidated
    Precached,
    /// Generated per request and may be evicted freely
    OnDemand,
    /// Never generated
    Rejected,
}

impl Tier {
    pub fn as_str(self) -> &'static str {
        match self {
            Tier::Precached => "precached",
            Tier::OnDemand => "on_demand",
            Tier::Rejected => "rejected",
        }
    }
}

impl std::fmt::Display for Tier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.pad(self.as_str())
    }
}

// =============================================================================
// Thresholds
// =============================================================================

/// A consistent pair of limits. `precached <= uncached` always holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct LimitThresholds {
    precached: u32,
    uncached: u32,
}

impl LimitThresholds {
    /// Create a threshold pair.
    ///
    /// # Errors
    ///
    /// Returns [`ThumbError::InvalidThresholds`] if `precached > uncached`.
    pub fn new(precached: u32, uncached: u32) -> Result<Self, ThumbError> {
        if precached > uncached {
            return Err(ThumbError::InvalidThresholds {
                precached,
                uncached,
            });
        }

        Ok(Self {
            precached,
            uncached,
        })
    }

    /// Precached limit as an edge length.
    pub fn precached_limit(&self) -> u32 {
        self.precached
    }

    /// Uncached limit as an edge length.
    pub fn uncached_limit(&self) -> u32 {
        self.uncached
    }

    /// Largest footprint that is still precached.
    pub fn precached_footprint(&self) -> u64 {
        u64::from(self.precached) * u64::from(self.precached)
    }

    /// Largest footprint that may be generated at all.
    pub fn uncached_footprint(&self) -> u64 {
        u64::from(self.uncached) * u64::from(self.uncached)
    }

    /// Returns `true` if the size must never be generated.
    #[inline]
    pub fn exceeds_limit(&self, size: &Size) -> bool {
        size.footprint() > self.uncached_footprint()
    }

    /// Returns `true` if the size is too large to precache.
    ///
    /// Also true for sizes that exceed the limit entirely.
    #[inline]
    pub fn uncached(&self, size: &Size) -> bool {
        size.footprint() > self.precached_footprint()
    }

    /// Classify a size against this pair.
    pub fn classify(&self, size: &Size) -> Tier {
        if self.exceeds_limit(size) {
            Tier::Rejected
        } else if self.uncached(size) {
            Tier::OnDemand
        } else {
            Tier::Precached
        }
    }

    fn pack(self) -> u64 {
        (u64::from(self.precached) << 32) | u64::from(self.uncached)
    }

    fn unpack(bits: u64) -> Self {
        Self {
            precached: (bits >> 32) as u32,
            uncached: bits as u32,
        }
    }
}

impl Default for LimitThresholds {
    fn default() -> Self {
        Self {
            precached: DEFAULT_PRECACHED_LIMIT,
            uncached: DEFAULT_UNCACHED_LIMIT,
        }
    }
}

// =============================================================================
// Policy
// =============================================================================

/// Shared, runtime-adjustable limit policy.
///
/// Share it across threads with `Arc<LimitPolicy>`; every method takes `&self`.
///
/// # Example
///
/// ```
/// use thumbgate::limits::{LimitPolicy, LimitThresholds, Tier};
/// use thumbgate::size::Size;
///
/// let policy = LimitPolicy::new(LimitThresholds::new(1024, 2048).unwrap());
/// let size = Size::new("fit_2048", 2048, 2048);
/// assert_eq!(policy.classify(&size), Tier::OnDemand);
///
/// let previous = policy.update(LimitThresholds::new(2048, 7680).unwrap());
/// assert_eq!(policy.classify(&size), Tier::Precached);
///
/// policy.update(previous);
/// ```
#[derive(Debug)]
pub struct LimitPolicy {
    bits: AtomicU64,
}

impl LimitPolicy {
    pub fn new(thresholds: LimitThresholds) -> Self {
        Self {
            bits: AtomicU64::new(thresholds.pack()),
        }
    }

    /// Current limits as one consistent snapshot.
    #[inline]
    pub fn thresholds(&self) -> LimitThresholds {
        LimitThresholds::unpack(self.bits.load(Ordering::Acquire))
    }

    /// Publish new limits and return the previous pair.
    ///
    /// Both limits become visible together; callers can restore the returned
    /// pair to undo the change.
    pub fn update(&self, thresholds: LimitThresholds) -> LimitThresholds {
        let previous = LimitThresholds::unpack(self.bits.swap(thresholds.pack(), Ordering::AcqRel));

        if previous != thresholds {
            info!(
                precached = thresholds.precached,
                uncached = thresholds.uncached,
                previous_precached = previous.precached,
                previous_uncached = previous.uncached,
                "Updated thumbnail size limits"
            );
        }

        previous
    }

    /// Classify a size against the current limits.
    pub fn classify(&self, size: &Size) -> Tier {
        let tier = self.thresholds().classify(size);
        trace!(size = %size.name, footprint = size.footprint(), %tier, "Classified size");
        tier
    }
}

impl Default for LimitPolicy {
    fn default() -> Self {
        Self::new(LimitThresholds::default())
    }
}

// =============================================================================
// Tests
// =============================================================================
