//! Configuration management for thumbgate.
//!
//! This module provides:
//! - Command-line arguments via clap
//! - Environment variables with `THUMB_` prefix
//! - Validation and an atomic apply step onto a shared [`LimitPolicy`]
//!
//! # Example
//!
//! ```
//! use clap::Parser;
//! use thumbgate::config::Config;
//! use thumbgate::limits::LimitPolicy;
//!
//! let config = Config::try_parse_from([
//!     "thumbgate", "--thumb-size", "1024", "--thumb-size-uncached", "4096", "sizes",
//! ])
//! .unwrap();
//! config.validate().unwrap();
//!
//! let policy = LimitPolicy::default();
//! config.apply(&policy).unwrap();
//! assert_eq!(policy.thresholds().uncached_limit(), 4096);
//! ```
//!
//! # Environment Variables
//!
//! - `THUMB_SIZE` - Precached limit as an edge length (default: 2048)
//! - `THUMB_SIZE_UNCACHED` - Uncached limit as an edge length (default: 7680)
//! - `THUMB_FILTER` - Resample filter for builtin sizes (default: lanczos)

use clap::{Args, Parser, Subcommand};

use crate::error::ThumbError;
use crate::limits::{LimitPolicy, LimitThresholds, DEFAULT_PRECACHED_LIMIT, DEFAULT_UNCACHED_LIMIT};
use crate::resample::ResampleFilter;
use crate::size::SizeCatalog;

// =============================================================================
// Default Values
// =============================================================================

/// Default precached limit.
pub const DEFAULT_THUMB_SIZE: u32 = DEFAULT_PRECACHED_LIMIT;

/// Default uncached limit.
pub const DEFAULT_THUMB_SIZE_UNCACHED: u32 = DEFAULT_UNCACHED_LIMIT;

/// Smallest accepted precached limit.
pub const MIN_THUMB_SIZE: u32 = 720;

/// Largest accepted limit.
pub const MAX_THUMB_SIZE: u32 = 7680;

// =============================================================================
// CLI Arguments
// =============================================================================

/// thumbgate - Thumbnail size limits and resample filters.
///
/// Shows which thumbnail sizes are precached, generated on demand, or
/// rejected under the configured limits.
#[derive(Parser, Debug, Clone)]
#[command(name = "thumbgate")]
#[command(author, version, about, long_about = None)]
pub struct Config {
    // =========================================================================
    // Limit Configuration
    // =========================================================================
    /// Precached limit in pixels (edge length of the largest precached square).
    #[arg(long, default_value_t = DEFAULT_THUMB_SIZE, env = "THUMB_SIZE", global = true)]
    pub thumb_size: u32,

    /// Uncached limit in pixels. Larger sizes are never generated.
    #[arg(
        long,
        default_value_t = DEFAULT_THUMB_SIZE_UNCACHED,
        env = "THUMB_SIZE_UNCACHED",
        global = true
    )]
    pub thumb_size_uncached: u32,

    // =========================================================================
    // Resample Configuration
    // =========================================================================
    /// Resample filter: blackman, lanczos, cubic, linear or nearest.
    #[arg(long, default_value_t = ResampleFilter::default(), env = "THUMB_FILTER", global = true)]
    pub thumb_filter: ResampleFilter,

    // =========================================================================
    // Logging Configuration
    // =========================================================================
    /// Enable verbose logging (debug level).
    #[arg(short, long, default_value_t = false, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

/// Available subcommands.
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// List thumbnail sizes with their current tier.
    Sizes(SizesArgs),

    /// Check whether a single size may be generated.
    Check(CheckArgs),
}

#[derive(Args, Debug, Clone, PartialEq, Eq)]
pub struct SizesArgs {
    /// Print JSON instead of a table.
    #[arg(long, default_value_t = false)]
    pub json: bool,

    /// Only list public sizes.
    #[arg(long, default_value_t = false)]
    pub public: bool,
}

#[derive(Args, Debug, Clone, PartialEq, Eq)]
pub struct CheckArgs {
    /// Size name, e.g. fit_2048.
    pub name: String,
}

impl Config {
    /// Validate the configuration and return an error message if invalid.
    pub fn validate(&self) -> Result<(), String> {
        if self.thumb_size < MIN_THUMB_SIZE || self.thumb_size > MAX_THUMB_SIZE {
            return Err(format!(
                "thumb_size must be between {} and {}, got {}",
                MIN_THUMB_SIZE, MAX_THUMB_SIZE, self.thumb_size
            ));
        }

        if self.thumb_size_uncached < self.thumb_size || self.thumb_size_uncached > MAX_THUMB_SIZE {
            return Err(format!(
                "thumb_size_uncached must be between thumb_size ({}) and {}, got {}",
                self.thumb_size, MAX_THUMB_SIZE, self.thumb_size_uncached
            ));
        }

        Ok(())
    }

    /// Limit pair described by this configuration.
    pub fn thresholds(&self) -> Result<LimitThresholds, ThumbError> {
        LimitThresholds::new(self.thumb_size, self.thumb_size_uncached)
    }

    /// Publish this configuration's limits to `policy` in one step.
    ///
    /// Returns the limits that were replaced.
    pub fn apply(&self, policy: &LimitPolicy) -> Result<LimitThresholds, ThumbError> {
        Ok(policy.update(self.thresholds()?))
    }

    /// Builtin size catalog using the configured filter.
    pub fn catalog(&self) -> SizeCatalog {
        SizeCatalog::builtin(self.thumb_filter)
    }
}

// =============================================================================
// Tests
// =============================================================================
