//! Thumbnail size definitions.

use serde::Serialize;

use crate::resample::ResampleFilter;

// =============================================================================
// Crop Strategy
// =============================================================================

/// Where the retained region sits when a fill crop discards pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Anchor {
    #[default]
    Center,
    TopLeft,
    BottomRight,
}

/// How the source image is mapped onto the target box.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CropStrategy {
    /// Scale to fit within the box, preserving aspect ratio
    Fit,
    /// Scale to cover the box, then crop the overflow at the anchor
    Fill(Anchor),
    /// Square center crop to fill
    Tile,
    /// Scale to exactly the box, ignoring aspect ratio
    Resize,
}

/// Output format tag recorded with the size.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Jpeg,
    Png,
}

impl OutputFormat {
    /// File extension without the dot.
    pub fn extension(self) -> &'static str {
        match self {
            OutputFormat::Jpeg => "jpg",
            OutputFormat::Png => "png",
        }
    }
}

// =============================================================================
// Size
// =============================================================================

/// A named thumbnail size.
///
/// Sizes are created through [`Size::new`] and the `with_*` helpers, then
/// frozen inside a [`SizeCatalog`](super::SizeCatalog). The catalog checks
/// the invariants (positive dimensions, unique names, resolvable `source`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Size {
    pub name: String,

    /// Another catalog size this one may be derived from instead of the original
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,

    #[serde(rename = "use")]
    pub usage: String,

    #[serde(rename = "w")]
    pub width: u32,

    #[serde(rename = "h")]
    pub height: u32,

    pub crop: CropStrategy,

    pub format: OutputFormat,

    pub filter: ResampleFilter,

    /// Whether the size may be served without restricted access
    pub public: bool,
}

impl Size {
    /// Create a size that fits within `width` x `height` using the default filter.
    pub fn new(name: impl Into<String>, width: u32, height: u32) -> Self {
        Self {
            name: name.into(),
            source: None,
            usage: String::new(),
            width,
            height,
            crop: CropStrategy::Fit,
            format: OutputFormat::Jpeg,
            filter: ResampleFilter::default(),
            public: false,
        }
    }

    pub fn with_source(mut self, source: impl Into<String>) -> Self {
        self.source = Some(source.into());
        self
    }

    pub fn with_usage(mut self, usage: impl Into<String>) -> Self {
        self.usage = usage.into();
        self
    }

    pub fn with_crop(mut self, crop: CropStrategy) -> Self {
        self.crop = crop;
        self
    }

    pub fn with_format(mut self, format: OutputFormat) -> Self {
        self.format = format;
        self
    }

    pub fn with_filter(mut self, filter: ResampleFilter) -> Self {
        self.filter = filter;
        self
    }

    pub fn public(mut self) -> Self {
        self.public = true;
        self
    }

    /// Pixel area of the target box.
    #[inline]
    pub fn footprint(&self) -> u64 {
        u64::from(self.width) * u64::from(self.height)
    }

    /// Longer edge of the target box.
    #[inline]
    pub fn longest_edge(&self) -> u32 {
        self.width.max(self.height)
    }

    /// Returns `true` if generating this size from a `src_width` x `src_height`
    /// image would only upscale it.
    ///
    /// Only fit sizes can be skipped this way; crop sizes always produce
    /// their exact box.
    pub fn upscales(&self, src_width: u32, src_height: u32) -> bool {
        matches!(self.crop, CropStrategy::Fit)
            && src_width <= self.width
            && src_height <= self.height
    }
}

// =============================================================================
// Tests
// =============================================================================
