//! Rendering configuration
//!
//! Configuration is plain serde data so hosts can embed it in their own
//! settings files. A standalone `contour.toml` looks like:
//!
//! ```toml
//! [raster]
//! anti_alias = true
//! origin = "top-left"
//! placement = "inside"
//! max_pixels = 67108864
//!
//! [host]
//! native_border = true
//! native_border_offset = false
//! animate_layout = false
//! ```

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors that can occur while loading configuration
#[derive(Error, Debug)]
pub enum ConfigError {
    /// IO error when reading the file
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// TOML parsing error
    #[error("config parsing error: {0}")]
    Parse(#[from] toml::de::Error),
}

/// Vertical origin of rasterized output
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RasterOrigin {
    /// Row 0 is the top edge (y-down, matches path coordinates)
    #[default]
    TopLeft,
    /// Row 0 is the bottom edge; paths are flipped before scaling
    BottomLeft,
}

/// Where a border stroke sits relative to the shape boundary
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum StrokePlacement {
    /// Entirely within the shape
    #[default]
    Inside,
    /// Entirely outside the shape (reserved)
    Outside,
    /// Centered on the boundary (reserved)
    Center,
}

impl StrokePlacement {
    pub fn name(self) -> &'static str {
        match self {
            StrokePlacement::Inside => "inside",
            StrokePlacement::Outside => "outside",
            StrokePlacement::Center => "center",
        }
    }
}

/// Default image size limit: 8192 × 8192 pixels
pub const DEFAULT_MAX_PIXELS: u64 = 1 << 26;

/// Border image pipeline settings
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RasterConfig {
    /// Anti-alias mask edges
    pub anti_alias: bool,
    /// Row order of produced images
    pub origin: RasterOrigin,
    /// Stroke placement; only `inside` is implemented
    pub placement: StrokePlacement,
    /// Largest image, in pixels, the pipeline will allocate
    pub max_pixels: u64,
}

impl Default for RasterConfig {
    fn default() -> Self {
        Self {
            anti_alias: true,
            origin: RasterOrigin::TopLeft,
            placement: StrokePlacement::Inside,
            max_pixels: DEFAULT_MAX_PIXELS,
        }
    }
}

/// What the host layer tree can do natively
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HostConfig {
    /// The host layer can stroke its own bounds with a colored border
    pub native_border: bool,
    /// The host layer has a native border-offset property
    pub native_border_offset: bool,
    /// Animate geometry changes made during layout
    pub animate_layout: bool,
}

impl Default for HostConfig {
    fn default() -> Self {
        Self {
            native_border: true,
            native_border_offset: false,
            animate_layout: false,
        }
    }
}

/// Top-level configuration
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ContourConfig {
    pub raster: RasterConfig,
    pub host: HostConfig,
}

impl ContourConfig {
    /// Defaults: inside strokes, native borders without offset, no layout animation
    pub fn standard() -> Self {
        Self::default()
    }

    /// A host whose layers support native borders including an offset
    pub fn native() -> Self {
        Self::default().with_native_border_offset(true)
    }

    /// A host without native borders; every border is drawn with masks
    pub fn masked() -> Self {
        Self::default().with_native_border(false)
    }

    /// Parse configuration from a TOML string
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(content)?)
    }

    /// Load configuration from a TOML file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path.as_ref())?;
        let config = Self::from_toml_str(&content)?;
        tracing::debug!("loaded config from {}", path.as_ref().display());
        Ok(config)
    }

    /// Serialize to a TOML string
    pub fn to_toml_string(&self) -> String {
        toml::to_string(self).unwrap_or_default()
    }

    pub fn with_native_border(mut self, supported: bool) -> Self {
        self.host.native_border = supported;
        self
    }

    pub fn with_native_border_offset(mut self, supported: bool) -> Self {
        self.host.native_border_offset = supported;
        self
    }

    pub fn with_animate_layout(mut self, animate: bool) -> Self {
        self.host.animate_layout = animate;
        self
    }

    pub fn with_anti_alias(mut self, anti_alias: bool) -> Self {
        self.raster.anti_alias = anti_alias;
        self
    }

    pub fn with_origin(mut self, origin: RasterOrigin) -> Self {
        self.raster.origin = origin;
        self
    }

    pub fn with_placement(mut self, placement: StrokePlacement) -> Self {
        self.raster.placement = placement;
        self
    }

    pub fn with_max_pixels(mut self, max_pixels: u64) -> Self {
        self.raster.max_pixels = max_pixels;
        self
    }
}
