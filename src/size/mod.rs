//! Thumbnail size catalog.
//!
//! Every thumbnail request names a size. The catalog maps that name to an
//! immutable [`Size`]: target box, crop behavior, output format, filter and
//! visibility.
//!
//! # Builtin Sizes
//!
//! | Name | Box | Crop | Derived from |
//! |---|---|---|---|
//! | `colors` | 3x3 | resize | `tile_500` |
//! | `tile_50` / `tile_100` / `tile_224` | square | tile | `tile_500` |
//! | `left_224` / `right_224` | 224x224 | fill (top-left / bottom-right) | `fit_720` |
//! | `tile_500` / `tile_1080` | square | tile | original |
//! | `fit_720` ... `fit_7680` | various | fit | original or `fit_2048` |
//!
//! # Example
//!
//! ```
//! use thumbgate::resample::ResampleFilter;
//! use thumbgate::size::{SizeCatalog, FIT_2048};
//!
//! let catalog = SizeCatalog::builtin(ResampleFilter::Lanczos);
//! let size = catalog.get(FIT_2048).unwrap();
//! assert_eq!(size.footprint(), 2048 * 2048);
//! ```

mod catalog;
mod definition;

pub use catalog::{
    SizeCatalog, SizeCatalogBuilder, COLORS, FIT_1280, FIT_1600, FIT_1920, FIT_2048, FIT_2560,
    FIT_3840, FIT_4096, FIT_720, FIT_7680, LEFT_224, RIGHT_224, TILE_100, TILE_1080, TILE_224,
    TILE_50, TILE_500,
};
pub use definition::{Anchor, CropStrategy, OutputFormat, Size};
