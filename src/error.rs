use thiserror::Error;

/// Errors raised by the size catalog, limit policy and generation gate.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ThumbError {
    /// Requested size name is not present in the catalog
    #[error("Unknown thumbnail size: {0}")]
    UnknownSize(String),

    /// Filter name does not match any supported resample kernel
    #[error("Invalid resample filter: {0:?} (expected one of blackman, lanczos, cubic, linear, nearest)")]
    InvalidFilterKind(String),

    /// Size footprint is above the uncached limit and must not be generated
    #[error("Size {name} exceeds resource limit: footprint {footprint}px > {limit}px")]
    ResourceLimitExceeded {
        name: String,
        footprint: u64,
        limit: u64,
    },

    /// Size definition violates a catalog invariant
    #[error("Invalid size {name}: {reason}")]
    InvalidSize { name: String, reason: String },

    /// Source image has no pixels to resample
    #[error("Source image is empty ({width}x{height}), cannot generate {size}")]
    EmptyImage { size: String, width: u32, height: u32 },

    /// Precached limit is larger than the uncached limit
    #[error("Invalid limit thresholds: precached {precached} > uncached {uncached}")]
    InvalidThresholds { precached: u32, uncached: u32 },
}
