//! Immutable registry of thumbnail sizes.
//!
//! A [`SizeCatalog`] is built once at startup, validated, and then only read.
//! It holds no interior mutability, so an `Arc<SizeCatalog>` can be shared
//! freely across threads.

use std::collections::HashMap;

use tracing::debug;

use crate::error::ThumbError;
use crate::resample::ResampleFilter;

use super::definition::{Anchor, CropStrategy, OutputFormat, Size};

// =============================================================================
// Builtin Size Names
// =============================================================================

pub const COLORS: &str = "colors";
pub const TILE_50: &str = "tile_50";
pub const TILE_100: &str = "tile_100";
pub const TILE_224: &str = "tile_224";
pub const LEFT_224: &str = "left_224";
pub const RIGHT_224: &str = "right_224";
pub const TILE_500: &str = "tile_500";
pub const FIT_720: &str = "fit_720";
pub const TILE_1080: &str = "tile_1080";
pub const FIT_1280: &str = "fit_1280";
pub const FIT_1600: &str = "fit_1600";
pub const FIT_1920: &str = "fit_1920";
pub const FIT_2048: &str = "fit_2048";
pub const FIT_2560: &str = "fit_2560";
pub const FIT_3840: &str = "fit_3840";
pub const FIT_4096: &str = "fit_4096";
pub const FIT_7680: &str = "fit_7680";

// =============================================================================
// Size Catalog
// =============================================================================

/// Ordered, read-only collection of [`Size`] definitions.
#[derive(Debug, Clone)]
pub struct SizeCatalog {
    sizes: Vec<Size>,
    index: HashMap<String, usize>,
}

impl SizeCatalog {
    /// Start building a custom catalog.
    pub fn builder() -> SizeCatalogBuilder {
        SizeCatalogBuilder::default()
    }

    /// The standard media library sizes.
    ///
    /// `colors` is always sampled with the nearest-neighbor filter; every other
    /// size uses `filter`. The table goes through [`SizeCatalogBuilder::build`]
    /// like any custom catalog.
    pub fn builtin(filter: ResampleFilter) -> Self {
        let fit = |name: &str, w: u32, h: u32, usage: &str| {
            Size::new(name, w, h)
                .with_usage(usage)
                .with_filter(filter)
        };
        let tile = |name: &str, w: u32, usage: &str| {
            fit(name, w, w, usage).with_crop(CropStrategy::Tile)
        };

        let sizes = [
            Size::new(COLORS, 3, 3)
                .with_source(TILE_500)
                .with_usage("Color Detection")
                .with_crop(CropStrategy::Resize)
                .with_format(OutputFormat::Png)
                .with_filter(ResampleFilter::Nearest),
            tile(TILE_50, 50, "Lists").with_source(TILE_500),
            tile(TILE_100, 100, "Maps").with_source(TILE_500),
            tile(TILE_224, 224, "TensorFlow, Mosaic").with_source(TILE_500),
            fit(LEFT_224, 224, 224, "TensorFlow")
                .with_source(FIT_720)
                .with_crop(CropStrategy::Fill(Anchor::TopLeft)),
            fit(RIGHT_224, 224, 224, "TensorFlow")
                .with_source(FIT_720)
                .with_crop(CropStrategy::Fill(Anchor::BottomRight)),
            tile(TILE_500, 500, "FlipBook"),
            fit(FIT_720, 720, 720, "Mobile, TV").public(),
            tile(TILE_1080, 1080, "Instagram"),
            fit(FIT_1280, 1280, 1024, "Mobile, HD Ready TV")
                .with_source(FIT_2048)
                .public(),
            fit(FIT_1600, 1600, 900, "Social Media").with_source(FIT_2048),
            fit(FIT_1920, 1920, 1200, "Mobile, Full HD TV")
                .with_source(FIT_2048)
                .public(),
            fit(FIT_2048, 2048, 2048, "Tablets, Cinema 2K").public(),
            fit(FIT_2560, 2560, 1600, "Quad HD, Retina Display").public(),
            fit(FIT_3840, 3840, 2400, "Ultra HD"),
            fit(FIT_4096, 4096, 4096, "Ultra HD, Retina 4K").public(),
            fit(FIT_7680, 7680, 4320, "8K Ultra HD 2, Retina 6K").public(),
        ];

        sizes
            .into_iter()
            .fold(Self::builder(), SizeCatalogBuilder::size)
            .build()
            .expect("builtin size table is valid")
    }

    /// Look up a size by name.
    pub fn get(&self, name: &str) -> Result<&Size, ThumbError> {
        self.index
            .get(name)
            .map(|&i| &self.sizes[i])
            .ok_or_else(|| ThumbError::UnknownSize(name.to_string()))
    }

    pub fn contains(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    /// Sizes in definition order.
    pub fn iter(&self) -> std::slice::Iter<'_, Size> {
        self.sizes.iter()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.sizes.iter().map(|s| s.name.as_str())
    }

    pub fn len(&self) -> usize {
        self.sizes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sizes.is_empty()
    }

    /// Sizes whose footprint is at most `footprint` pixels.
    pub fn within(&self, footprint: u64) -> impl Iterator<Item = &Size> {
        self.sizes.iter().filter(move |s| s.footprint() <= footprint)
    }

    /// Largest fit size whose longer edge is at most `limit`.
    pub fn find(&self, limit: u32) -> Option<&Size> {
        self.sizes
            .iter()
            .filter(|s| s.crop == CropStrategy::Fit && s.longest_edge() <= limit)
            .max_by_key(|s| (s.longest_edge(), s.footprint()))
    }
}

impl<'a> IntoIterator for &'a SizeCatalog {
    type Item = &'a Size;
    type IntoIter = std::slice::Iter<'a, Size>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

// =============================================================================
// Builder
// =============================================================================

/// Collects size definitions and validates them into a [`SizeCatalog`].
#[derive(Debug, Default)]
pub struct SizeCatalogBuilder {
    sizes: Vec<Size>,
}

impl SizeCatalogBuilder {
    /// Append a size definition. Order is preserved.
    pub fn size(mut self, size: Size) -> Self {
        self.sizes.push(size);
        self
    }

    /// Validate and freeze the catalog.
    ///
    /// # Errors
    ///
    /// Returns [`ThumbError::InvalidSize`] if a size has an empty name, a zero
    /// dimension, a duplicate name, or a `source` that is not in the catalog.
    pub fn build(self) -> Result<SizeCatalog, ThumbError> {
        let mut index = HashMap::with_capacity(self.sizes.len());

        for (i, size) in self.sizes.iter().enumerate() {
            if size.name.is_empty() {
                return Err(invalid(size, "name must not be empty"));
            }
            if size.width == 0 || size.height == 0 {
                return Err(invalid(
                    size,
                    &format!("dimensions must be positive, got {}x{}", size.width, size.height),
                ));
            }
            if index.insert(size.name.clone(), i).is_some() {
                return Err(invalid(size, "duplicate name"));
            }
        }

        for size in &self.sizes {
            if let Some(ref source) = size.source {
                if source == &size.name {
                    return Err(invalid(size, "size cannot be its own source"));
                }
                if !index.contains_key(source) {
                    return Err(invalid(size, &format!("unknown source size {source}")));
                }
            }
        }

        debug!(sizes = self.sizes.len(), "Built size catalog");

        Ok(SizeCatalog {
            sizes: self.sizes,
            index,
        })
    }
}

fn invalid(size: &Size, reason: &str) -> ThumbError {
    ThumbError::InvalidSize {
        name: size.name.clone(),
        reason: reason.to_string(),
    }
}

// =============================================================================
// Tests
// =============================================================================
