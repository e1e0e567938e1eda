//! # thumbgate
//!
//! Resource governance for thumbnail generation in a media library.
//!
//! For every named thumbnail size this crate decides whether the thumbnail is
//! generated eagerly and kept ([`Tier::Precached`]), generated per request
//! ([`Tier::OnDemand`]), or never generated ([`Tier::Rejected`]), and which
//! resample kernel produces it.
//!
//! ## Architecture
//!
//! - [`resample`] - Filter catalog, kernel descriptors and the in-memory resampler
//! - [`size`] - Immutable catalog of named sizes
//! - [`limits`] - Runtime-adjustable limits and tier classification
//! - [`gate`] - Decision entry point for generation pipelines
//! - [`config`] - CLI and environment configuration
//!
//! Decoding, encoding, storage and HTTP are left to the caller.
//!
//! ## Example
//!
//! ```rust
//! use std::sync::Arc;
//! use thumbgate::{GenerationGate, LimitPolicy, LimitThresholds, ResampleFilter, SizeCatalog, Tier};
//!
//! let catalog = Arc::new(SizeCatalog::builtin(ResampleFilter::Lanczos));
//! let policy = Arc::new(LimitPolicy::new(LimitThresholds::new(1024, 2048).unwrap()));
//! let gate = GenerationGate::new(catalog, policy);
//!
//! let decision = gate.can_generate_named("fit_2048").unwrap();
//! assert!(decision.is_allowed());
//! assert_eq!(decision.tier, Tier::OnDemand);
//!
//! let size = gate.catalog().get("fit_2048").unwrap();
//! assert_eq!(gate.resample_params(size).support, 3.0);
//! ```

pub mod config;
pub mod error;
pub mod gate;
pub mod limits;
pub mod resample;
pub mod size;

// Re-export commonly used types
pub use config::{CheckArgs, Command, Config, SizesArgs};
pub use error::ThumbError;
pub use gate::{Decision, DenyReason, GenerationGate, Thumbnail};
pub use limits::{LimitPolicy, LimitThresholds, Tier};
pub use resample::{KernelDescriptor, ResampleFilter};
pub use size::{Anchor, CropStrategy, OutputFormat, Size, SizeCatalog, SizeCatalogBuilder};
