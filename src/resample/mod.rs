//! Resampling layer.
//!
//! - [`ResampleFilter`]: named filter kinds attached to sizes
//! - [`KernelDescriptor`]: support radius and kernel curve for a filter
//! - [`render`]: applies a size's crop strategy and filter to a decoded image.
//!   Filters `image` provides go through it; Blackman is convolved with
//!   [`KernelDescriptor::weight`].
//!
//! # Example
//!
//! ```
//! use thumbgate::resample::ResampleFilter;
//!
//! let kernel = ResampleFilter::Blackman.kernel();
//! assert_eq!(kernel.support, 3.0);
//! ```

mod filter;
mod render;

pub use filter::{KernelDescriptor, ResampleFilter};
pub use render::render;
